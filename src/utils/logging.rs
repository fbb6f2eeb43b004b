/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use crate::config::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化 tracing 订阅者
///
/// 优先使用 `RUST_LOG`，否则默认 info（verbose 时为 debug）
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - {}", if config.dry_run { "仅列出模式" } else { "提交模式" });
    info!("🌐 API: {}", config.api_base_url);
    if !config.book_codes.is_empty() {
        info!("📚 书籍范围: {}", config.book_codes.join(", "));
    }
    if !config.chapters.is_empty() {
        let chapters: Vec<String> = config.chapters.iter().map(u32::to_string).collect();
        info!("📖 章节范围: {}", chapters.join(", "));
    }
    info!("{}", "=".repeat(60));
}

/// 记录书籍加载信息
pub fn log_books_loaded(total: usize, eligible: usize) {
    info!("✓ 找到 {} 本书，其中 {} 本可处理", total, eligible);
}

/// 记录单本书开始
pub fn log_book_start(book_num: usize, total_books: usize, code: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📦 开始处理第 {}/{} 本书: {}", book_num, total_books, code);
    info!("{}", "=".repeat(60));
}

/// 记录单本书完成
pub fn log_book_complete(code: &str, succeeded: usize, failed: usize, skipped: usize) {
    info!("\n{}", "─".repeat(60));
    info!(
        "✓ {} 完成: 部分成功 {}，失败 {}，跳过活动 {}",
        code, succeeded, failed, skipped
    );
    info!("{}", "─".repeat(60));
}

/// 打印最终统计信息
pub fn print_final_stats(
    books: usize,
    activities: usize,
    parts_succeeded: usize,
    parts_failed: usize,
    units_failed: usize,
    failure_log_file: &str,
) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("📚 书籍: {}  活动: {}", books, activities);
    info!("✅ 成功部分: {}", parts_succeeded);
    info!("❌ 失败部分: {}", parts_failed);
    info!("❌ 失败单元（含书 / 节）: {}", units_failed);
    info!("{}", "=".repeat(60));
    if units_failed > 0 {
        info!("\n失败记录已保存至: {}", failure_log_file);
    }
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大字符数
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

/// 隐藏 token，只保留前 6 个字符
pub fn mask(secret: &str) -> String {
    let visible: String = secret.chars().take(6).collect();
    format!("{}***", visible)
}
