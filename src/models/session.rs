//! 会话与签名材料
//!
//! 每次运行都通过 [`RunContext`] 显式传递，不存在全局状态。

use std::fmt;

/// 登录后得到的会话
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user_id: String,
}

/// 前端配置中发布的 build key，参与请求签名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildKey(String);

impl BuildKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BuildKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 运行模式
#[derive(Debug, Clone)]
pub enum RunMode {
    /// 提交每个活动，需要 build key 签名
    Submit(BuildKey),
    /// 只遍历并列出活动
    DryRun,
}

/// 一次运行的上下文
#[derive(Debug, Clone)]
pub struct RunContext {
    pub session: Session,
    pub mode: RunMode,
}

impl RunContext {
    pub fn new(session: Session, mode: RunMode) -> Self {
        Self { session, mode }
    }

    pub fn build_key(&self) -> Option<&BuildKey> {
        match &self.mode {
            RunMode::Submit(key) => Some(key),
            RunMode::DryRun => None,
        }
    }
}
