//! 单本书处理器 - 编排层
//!
//! ## 职责
//!
//! 遍历一本书的 学期 → 章 → 节 → 活动，逐个交给 `ActivityFlow`。
//!
//! 1. **顺序遍历**：严格按服务端顺序，一次只有一个请求在途
//! 2. **章节过滤**：按配置的章节白名单跳过
//! 3. **失败隔离**：某一节读取失败只记录，继续下一节
//! 4. **统计输出**：记录活动、部分的成功/失败数量

use tracing::{debug, warn};

use crate::clients::ZyClient;
use crate::config::Config;
use crate::error::AppResult;
use crate::models::{ActivityOutcome, Book, RunContext};
use crate::orchestrator::progress::{FailedUnit, ProgressSink};
use crate::services::ContentWalker;
use crate::workflow::{ActivityCtx, ActivityFlow};

/// 单本书的处理统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BookStats {
    pub sections: usize,
    pub sections_failed: usize,
    pub activities: usize,
    pub activities_skipped: usize,
    pub activities_listed: usize,
    pub parts_succeeded: usize,
    pub parts_failed: usize,
}

impl BookStats {
    pub fn record(&mut self, outcome: ActivityOutcome) {
        self.activities += 1;
        match outcome {
            ActivityOutcome::Skipped => self.activities_skipped += 1,
            ActivityOutcome::Listed => self.activities_listed += 1,
            ActivityOutcome::Done { succeeded, failed } => {
                self.parts_succeeded += succeeded as usize;
                self.parts_failed += failed as usize;
            }
        }
    }

    pub fn merge(&mut self, other: &BookStats) {
        self.sections += other.sections;
        self.sections_failed += other.sections_failed;
        self.activities += other.activities;
        self.activities_skipped += other.activities_skipped;
        self.activities_listed += other.activities_listed;
        self.parts_succeeded += other.parts_succeeded;
        self.parts_failed += other.parts_failed;
    }
}

/// 处理单本书
///
/// # 参数
/// - `client`: API 客户端
/// - `run`: 会话与运行模式
/// - `book`: 已通过资格过滤的书
/// - `config`: 配置（章节白名单）
/// - `sink`: 进度接收者
///
/// # 返回
/// 章节结构读取失败时返回错误（整本书不可达），其余失败都在内部隔离
pub async fn process_book(
    client: &ZyClient,
    run: &RunContext,
    book: &Book,
    config: &Config,
    sink: &mut dyn ProgressSink,
) -> AppResult<BookStats> {
    let walker = ContentWalker::new();
    let flow = ActivityFlow::new();

    let terms = walker.list_chapters(client, &run.session, &book.code).await?;
    let mut stats = BookStats::default();

    for chapter in terms.iter().flat_map(|term| term.chapters.iter()) {
        if !config.allows_chapter(chapter.number) {
            debug!("[{}] 跳过第 {} 章（不在白名单中）", book.code, chapter.number);
            continue;
        }

        for section in &chapter.sections {
            stats.sections += 1;

            let activities = match walker
                .list_activities(client, &run.session, &book.code, chapter.number, section.number)
                .await
            {
                Ok(activities) => activities,
                Err(e) => {
                    warn!(
                        "[{}] ⚠️ 第 {} 章第 {} 节读取失败，继续下一节: {}",
                        book.code, chapter.number, section.number, e
                    );
                    stats.sections_failed += 1;
                    let unit = FailedUnit::Section {
                        book_code: book.code.clone(),
                        chapter_number: chapter.number,
                        section_number: section.number,
                    };
                    sink.unit_failed(&unit, &e).await;
                    continue;
                }
            };

            for (index, activity) in activities.iter().enumerate() {
                let ctx = ActivityCtx::new(&book.code, chapter.number, section.number, index + 1);

                let outcome = match run.build_key() {
                    None => ActivityOutcome::Listed,
                    Some(build_key) => {
                        let report = flow
                            .submit(client, &run.session, build_key, &ctx, activity)
                            .await;
                        for (record, error) in report.failures() {
                            let unit = FailedUnit::Part {
                                book_code: book.code.clone(),
                                activity_id: record.activity_id.clone(),
                                part: record.part,
                            };
                            sink.unit_failed(&unit, error).await;
                        }
                        report.outcome
                    }
                };

                stats.record(outcome);
                sink.activity_finished(&ctx, activity, outcome).await;
            }
        }
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_record_and_merge() {
        let mut first = BookStats::default();
        first.record(ActivityOutcome::Skipped);
        first.record(ActivityOutcome::Done {
            succeeded: 2,
            failed: 1,
        });

        let mut second = BookStats {
            sections: 3,
            sections_failed: 1,
            ..BookStats::default()
        };
        second.record(ActivityOutcome::Listed);
        second.merge(&first);

        assert_eq!(second.activities, 3);
        assert_eq!(second.activities_skipped, 1);
        assert_eq!(second.activities_listed, 1);
        assert_eq!(second.parts_succeeded, 2);
        assert_eq!(second.parts_failed, 1);
        assert_eq!(second.sections_failed, 1);
    }
}
