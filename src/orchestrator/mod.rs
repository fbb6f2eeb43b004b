//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `run_processor` - 整次运行处理器
//! - 管理应用生命周期（初始化、运行、统计）
//! - 执行致命阶段：登录、build key、书籍列表
//! - 按角色与白名单筛选书籍
//!
//! ### `book_processor` - 单本书处理器
//! - 遍历 学期 → 章 → 节 → 活动
//! - 隔离单节、单个部分的失败
//!
//! ### `progress` - 进度回调
//! - `ProgressSink` 由调用方实现（命令行、前端、测试）
//!
//! ## 层次关系
//!
//! ```text
//! run_processor (处理 Vec<Book>)
//!     ↓
//! book_processor (处理 Vec<Activity>)
//!     ↓
//! workflow::ActivityFlow (处理单个 Activity)
//!     ↓
//! services (能力层：auth / build key / walker / checksum)
//!     ↓
//! clients → infrastructure (HttpExecutor)
//! ```

pub mod book_processor;
pub mod progress;
pub mod run_processor;

pub use book_processor::{process_book, BookStats};
pub use progress::{FailedUnit, LogSink, ProgressSink};
pub use run_processor::{App, RunReport};
