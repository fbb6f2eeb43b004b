//! 进度回调
//!
//! 编排层通过 [`ProgressSink`] 向调用方报告进度和失败，
//! 命令行入口和交互式前端都只是不同的 sink 实现。

use async_trait::async_trait;
use std::fmt;
use tracing::{error, info, warn};

use crate::error::AppError;
use crate::models::{Activity, ActivityOutcome, Book};
use crate::services::FailureWriter;
use crate::workflow::ActivityCtx;

/// 处理失败的单元
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailedUnit {
    /// 章节结构拿不到，整本书跳过
    Book { code: String },
    /// 某一节的活动列表拿不到
    Section {
        book_code: String,
        chapter_number: u32,
        section_number: u32,
    },
    /// 某个活动的某一部分提交失败
    Part {
        book_code: String,
        activity_id: String,
        part: u32,
    },
}

impl fmt::Display for FailedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailedUnit::Book { code } => write!(f, "书 {}", code),
            FailedUnit::Section {
                book_code,
                chapter_number,
                section_number,
            } => write!(f, "书 {} 第{}章 第{}节", book_code, chapter_number, section_number),
            FailedUnit::Part {
                book_code,
                activity_id,
                part,
            } => write!(f, "书 {} 活动 {} 第{}部分", book_code, activity_id, part),
        }
    }
}

/// 进度接收者，所有方法都有空的默认实现
#[async_trait]
pub trait ProgressSink: Send {
    async fn book_started(&mut self, _book: &Book) {}

    async fn activity_finished(
        &mut self,
        _ctx: &ActivityCtx,
        _activity: &Activity,
        _outcome: ActivityOutcome,
    ) {
    }

    /// 单元失败，不影响后续兄弟单元
    async fn unit_failed(&mut self, _unit: &FailedUnit, _error: &AppError) {}
}

/// 命令行使用的 sink：写日志，并把失败追加到文件
pub struct LogSink {
    writer: FailureWriter,
}

impl LogSink {
    pub fn new(writer: FailureWriter) -> Self {
        Self { writer }
    }
}

#[async_trait]
impl ProgressSink for LogSink {
    async fn activity_finished(
        &mut self,
        ctx: &ActivityCtx,
        activity: &Activity,
        outcome: ActivityOutcome,
    ) {
        if outcome == ActivityOutcome::Listed {
            info!(
                "{} 活动 ID: {}, 类型: {}, 部分数: {}",
                ctx,
                activity.id,
                activity.kind,
                activity.part_count()
            );
        }
    }

    async fn unit_failed(&mut self, unit: &FailedUnit, error: &AppError) {
        error!("❌ {} 处理失败: {}", unit, error);
        if let Err(e) = self.writer.write(&unit.to_string(), &error.to_string()).await {
            warn!("写入失败记录出错 ({}): {}", self.writer.path(), e);
        }
    }
}
