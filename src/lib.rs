//! # AutoBookz
//!
//! 自动完成 zyBooks 课程活动的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（HTTP Client），只暴露能力
//! - `HttpExecutor` - 唯一的 client owner，提供 get / post 能力
//!
//! ### ② 客户端层（Clients）
//! - `ZyClient` - 每个远端接口一个方法，只关心 URL 与报文结构
//!
//! ### ③ 业务能力层（Services）
//! - `AuthService` - 登录，获得会话
//! - `BuildKeyService` - 从前端配置中提取 build key
//! - `ContentWalker` - 读取书籍、章节、活动
//! - `checksum` - 请求签名
//! - `FailureWriter` - 写失败记录
//!
//! ### ④ 流程层（Workflow）
//! - `ActivityCtx` - 上下文封装（书 + 章 + 节 + 活动序号）
//! - `ActivityFlow` - 单个活动的提交流程（判断 → 签名 → 逐部分提交）
//!
//! ### ⑤ 编排层（Orchestration）
//! - `orchestrator/run_processor` - 整次运行，处理致命阶段和书籍列表
//! - `orchestrator/book_processor` - 单本书，遍历章节并隔离失败
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::ZyClient;
pub use config::Config;
pub use error::{AppError, AppResult, ConfigError, RunError, Severity};
pub use infrastructure::HttpExecutor;
pub use models::{Activity, ActivityOutcome, Book, BookRole, BuildKey, RunContext, RunMode, Session};
pub use orchestrator::{App, FailedUnit, LogSink, ProgressSink, RunReport};
pub use workflow::{ActivityCtx, ActivityFlow, ActivityReport};
