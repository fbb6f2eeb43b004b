//! 活动提交流程 - 流程层
//!
//! 核心职责：定义"一个活动"的完整提交流程
//!
//! 状态流转：
//! Pending → Skipped（html 活动，不发请求）
//! Pending → Submitting → 每个部分 成功/失败 → Done
//!
//! 时间戳和校验和每个活动只计算一次，所有部分共用；
//! 某个部分失败不会中断后续部分。

use serde_json::{json, Value as JsonValue};
use tracing::{info, warn};

use crate::clients::ZyClient;
use crate::error::AppError;
use crate::models::{Activity, ActivityOutcome, BuildKey, PartOutcome, Session, SubmissionRecord};
use crate::services::checksum;
use crate::utils::logging::truncate_text;
use crate::workflow::activity_ctx::ActivityCtx;

/// 单个活动的处理结果
#[derive(Debug)]
pub struct ActivityReport {
    pub outcome: ActivityOutcome,
    /// 每个部分一条记录，按部分序号排列
    pub records: Vec<SubmissionRecord>,
}

impl ActivityReport {
    pub fn skipped() -> Self {
        Self {
            outcome: ActivityOutcome::Skipped,
            records: Vec::new(),
        }
    }

    /// 取出失败的部分
    pub fn failures(&self) -> impl Iterator<Item = (&SubmissionRecord, &AppError)> {
        self.records.iter().filter_map(|record| match &record.outcome {
            PartOutcome::Failed(err) => Some((record, err)),
            PartOutcome::Succeeded => None,
        })
    }
}

/// 活动提交流程
///
/// - 判断活动是否可提交
/// - 计算签名，按部分顺序逐个提交
/// - 不持有任何资源，client 和会话都由调用方传入
pub struct ActivityFlow;

impl ActivityFlow {
    pub fn new() -> Self {
        Self
    }

    pub async fn submit(
        &self,
        client: &ZyClient,
        session: &Session,
        build_key: &BuildKey,
        ctx: &ActivityCtx,
        activity: &Activity,
    ) -> ActivityReport {
        if !activity.is_submittable() {
            info!("{} ⏭️ 跳过 {} 类型活动 {}", ctx, activity.kind, activity.id);
            return ActivityReport::skipped();
        }

        let timestamp = checksum::current_timestamp();
        let cs = checksum::sign(&activity.id, &timestamp, &session.token, build_key.as_str());

        let parts = activity.effective_parts();
        info!(
            "{} 📤 提交 {} 活动 {}，共 {} 个部分",
            ctx, activity.kind, activity.id, parts
        );

        let mut records = Vec::with_capacity(parts as usize);
        for part in 0..parts {
            let payload = Self::build_payload(part, &ctx.book_code, &session.token, &timestamp, &cs);
            let outcome = match self.submit_part(client, &activity.id, part, &payload).await {
                Ok(()) => PartOutcome::Succeeded,
                Err(e) => {
                    warn!("{} ⚠️ 活动 {} 第 {} 部分失败: {}", ctx, activity.id, part, e);
                    PartOutcome::Failed(e)
                }
            };
            records.push(SubmissionRecord {
                activity_id: activity.id.clone(),
                part,
                timestamp: timestamp.clone(),
                checksum: cs.clone(),
                outcome,
            });
        }

        let outcome = ActivityOutcome::from_records(&records);
        if let ActivityOutcome::Done { succeeded, failed } = outcome {
            if failed == 0 {
                info!("{} ✓ 活动 {} 完成 ({}/{})", ctx, activity.id, succeeded, parts);
            } else {
                warn!(
                    "{} 活动 {} 完成，成功 {} 失败 {}",
                    ctx, activity.id, succeeded, failed
                );
            }
        }

        ActivityReport { outcome, records }
    }

    /// 提交单个部分
    async fn submit_part(
        &self,
        client: &ZyClient,
        activity_id: &str,
        part: u32,
        payload: &JsonValue,
    ) -> Result<(), AppError> {
        let reply = client.submit_activity(activity_id, payload).await?;

        let rejected_by_body = reply
            .json()
            .map(|body| ZyClient::is_explicit_failure(&body))
            .unwrap_or(false);

        if reply.is_success() && !rejected_by_body {
            Ok(())
        } else {
            Err(AppError::SubmitRejected {
                activity_id: activity_id.to_string(),
                part,
                status: reply.status,
                body: truncate_text(&reply.body, 200),
            })
        }
    }

    /// 构建提交数据
    pub fn build_payload(
        part: u32,
        book_code: &str,
        token: &str,
        timestamp: &str,
        cs: &str,
    ) -> JsonValue {
        json!({
            "part": part,
            "complete": true,
            "metadata": "{}",
            "zybook_code": book_code,
            "auth_token": token,
            "timestamp": timestamp,
            "__cs__": cs
        })
    }
}

impl Default for ActivityFlow {
    fn default() -> Self {
        Self::new()
    }
}
