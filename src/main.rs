use anyhow::Result;
use autobookz::services::FailureWriter;
use autobookz::utils::logging;
use autobookz::{App, Config, LogSink};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::load()?;

    // 初始化日志
    logging::init(config.verbose_logging);

    let mut sink = LogSink::new(FailureWriter::with_path(config.failure_log_file.clone()));

    // 初始化并运行应用
    let report = App::initialize(config)?.run(&mut sink).await?;

    if report.units_failed() > 0 {
        tracing::warn!("⚠️ 有 {} 个单元处理失败，可重新运行补交", report.units_failed());
    }

    Ok(())
}
