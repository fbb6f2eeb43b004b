//! 整次运行处理器 - 编排层
//!
//! 管理一次运行的生命周期：
//! 1. 致命阶段：凭据校验 → 登录 → 获取 build key → 书籍列表
//! 2. 逐本书处理（单本书失败只记录，继续下一本）
//! 3. 输出全局统计

use tracing::{debug, error};

use crate::clients::ZyClient;
use crate::config::Config;
use crate::error::RunError;
use crate::models::{Book, RunContext, RunMode, Session};
use crate::orchestrator::book_processor::{process_book, BookStats};
use crate::orchestrator::progress::{FailedUnit, ProgressSink};
use crate::services::{AuthService, BuildKeyService, ContentWalker};
use crate::utils::logging;

/// 一次运行的汇总
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub books: usize,
    pub books_failed: usize,
    pub totals: BookStats,
}

impl RunReport {
    /// 失败单元总数（书 + 节 + 部分）
    pub fn units_failed(&self) -> usize {
        self.books_failed + self.totals.sections_failed + self.totals.parts_failed
    }
}

/// 应用主结构
pub struct App {
    config: Config,
    client: ZyClient,
}

impl App {
    /// 初始化应用（只构建客户端，不发请求）
    pub fn initialize(config: Config) -> Result<Self, RunError> {
        let client = ZyClient::new(&config).map_err(RunError::Setup)?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 用配置中的凭据登录后运行
    pub async fn run(&self, sink: &mut dyn ProgressSink) -> Result<RunReport, RunError> {
        logging::log_startup(&self.config);

        let (email, password) = self.config.credentials()?;
        let session = AuthService::new()
            .sign_in(&self.client, email, password)
            .await
            .map_err(|e| {
                error!("❌ 登录失败: {}", e);
                RunError::Login(e)
            })?;
        debug!("会话 token: {}", logging::mask(&session.token));

        self.run_with_session(session, sink).await
    }

    /// 使用外部已获得的会话运行
    pub async fn run_with_session(
        &self,
        session: Session,
        sink: &mut dyn ProgressSink,
    ) -> Result<RunReport, RunError> {
        let mode = if self.config.dry_run {
            RunMode::DryRun
        } else {
            let build_key = BuildKeyService::new()
                .fetch_build_key(&self.client)
                .await
                .map_err(|e| {
                    error!("❌ 获取 build key 失败: {}", e);
                    RunError::BuildKey(e)
                })?;
            RunMode::Submit(build_key)
        };
        let run = RunContext::new(session, mode);

        let books = self.load_books(&run).await?;
        let report = self.process_all_books(&run, &books, sink).await;

        logging::print_final_stats(
            report.books,
            report.totals.activities,
            report.totals.parts_succeeded,
            report.totals.parts_failed,
            report.units_failed(),
            &self.config.failure_log_file,
        );

        Ok(report)
    }

    /// 获取书籍列表，按角色和白名单过滤
    async fn load_books(&self, run: &RunContext) -> Result<Vec<Book>, RunError> {
        let all_books = ContentWalker::new()
            .list_books(&self.client, &run.session)
            .await
            .map_err(|e| {
                error!("❌ 获取书籍列表失败: {}", e);
                RunError::Books(e)
            })?;

        let total = all_books.len();
        let books: Vec<Book> = ContentWalker::eligible_books(all_books)
            .into_iter()
            .filter(|book| self.config.allows_book(&book.code))
            .collect();

        logging::log_books_loaded(total, books.len());
        Ok(books)
    }

    /// 逐本书处理
    async fn process_all_books(
        &self,
        run: &RunContext,
        books: &[Book],
        sink: &mut dyn ProgressSink,
    ) -> RunReport {
        let mut report = RunReport::default();

        for (index, book) in books.iter().enumerate() {
            logging::log_book_start(index + 1, books.len(), &book.code);
            sink.book_started(book).await;
            report.books += 1;

            match process_book(&self.client, run, book, &self.config, sink).await {
                Ok(stats) => {
                    logging::log_book_complete(
                        &book.code,
                        stats.parts_succeeded,
                        stats.parts_failed,
                        stats.activities_skipped,
                    );
                    report.totals.merge(&stats);
                }
                Err(e) => {
                    report.books_failed += 1;
                    let unit = FailedUnit::Book {
                        code: book.code.clone(),
                    };
                    sink.unit_failed(&unit, &e).await;
                }
            }
        }

        report
    }
}
