//! Logging configuration for hooprag

use std::path::Path;

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::{
    self,
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Registry;

use crate::config::AppConfig;
use crate::Result;

const LOG_FILE_PREFIX: &str = "hooprag.log";

/// Initialize logging from the `[logging]` section
pub fn init_logging_with_config(config: &AppConfig) -> Result<()> {
    let level = &config.logging.level;
    let filter = EnvFilter::new(format!("{level},hooprag={level}"));
    install(filter, &config.logging.log_dir)?;
    tracing::info!("Logging initialized with level: {}", level);
    Ok(())
}

/// Initialize logging with custom log level, writing files under `logs/`
pub fn init_logging_with_level(level: &str) -> Result<()> {
    let filter = EnvFilter::new(format!("{level},hooprag={level}"));
    install(filter, Path::new("logs"))?;
    tracing::info!("Logging initialized with level: {}", level);
    Ok(())
}

/// Initialize simple logging for testing
pub fn init_simple_logging() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_target(true)
        .with_max_level(tracing::Level::INFO)
        .try_init();
    Ok(())
}

fn install(filter: EnvFilter, log_dir: &Path) -> Result<()> {
    if !log_dir.exists() {
        std::fs::create_dir_all(log_dir)?;
    }

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_writer(std::io::stderr);

    let file_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(non_blocking)
        .with_ansi(false);

    Registry::default()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    tracing::info!(
        "Log files will be saved to: {}/{}.YYYY-MM-DD",
        log_dir.display(),
        LOG_FILE_PREFIX
    );

    // The writer thread must outlive every span; the process owns it until exit.
    std::mem::forget(guard);

    Ok(())
}
