use crate::error::AppError;

/// 单个部分的提交结果
#[derive(Debug)]
pub enum PartOutcome {
    Succeeded,
    Failed(AppError),
}

impl PartOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, PartOutcome::Succeeded)
    }
}

/// 一次提交尝试的记录，报告后即丢弃
#[derive(Debug)]
pub struct SubmissionRecord {
    pub activity_id: String,
    pub part: u32,
    pub timestamp: String,
    pub checksum: String,
    pub outcome: PartOutcome,
}

/// 单个活动的最终状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityOutcome {
    /// 纯展示活动，没有发出任何请求
    Skipped,
    /// 仅列出（dry run）
    Listed,
    /// 所有部分都已尝试，无论成败
    Done { succeeded: u32, failed: u32 },
}

impl ActivityOutcome {
    /// 汇总一组部分记录
    pub fn from_records(records: &[SubmissionRecord]) -> Self {
        let succeeded = records.iter().filter(|r| r.outcome.is_success()).count() as u32;
        ActivityOutcome::Done {
            succeeded,
            failed: records.len() as u32 - succeeded,
        }
    }
}
