//! 失败记录服务 - 业务能力层
//!
//! 只负责"把失败单元追加到文本文件"能力，不关心流程

use anyhow::{Context, Result};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// 失败记录服务
///
/// 职责：
/// - 将处理失败的单元（书 / 节 / 活动部分）写入文件，便于之后重跑
/// - 每次调用只写一行
pub struct FailureWriter {
    path: String,
}

impl FailureWriter {
    /// 使用默认文件 `failures.txt`
    pub fn new() -> Self {
        Self::with_path("failures.txt")
    }

    pub fn with_path(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// 追加一条失败记录
    ///
    /// # 参数
    /// - `unit`: 失败单元描述
    /// - `reason`: 失败原因
    pub async fn write(&self, unit: &str, reason: &str) -> Result<()> {
        debug!("写入失败记录: {} | {}", unit, reason);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .with_context(|| format!("无法打开失败记录文件: {}", self.path))?;

        let line = format!(
            "{} | {} | {}\n",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            unit,
            reason.replace('\n', " ")
        );
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }
}

impl Default for FailureWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("failures.txt");
        let writer = FailureWriter::with_path(path.to_string_lossy().to_string());

        tokio_test::block_on(async {
            writer.write("书 ABC123 第3章 第1节", "网络请求失败").await.unwrap();
            writer.write("活动 999 第1部分", "HTTP 500\nretry").await.unwrap();
        });

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("书 ABC123 第3章 第1节 | 网络请求失败"));
        assert!(lines[1].ends_with("活动 999 第1部分 | HTTP 500 retry"));
    }
}
