use crate::config::AppConfig;
use std::fs;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs the global tracing subscriber: a daily-rolling file layer and,
/// when `LOG_TO_STDOUT=true`, a coloured stdout layer.
///
/// The returned guard flushes the file writer on drop, so keep it alive for
/// the lifetime of the process.
pub fn init_logger(config: &AppConfig) -> WorkerGuard {
    fs::create_dir_all(&config.log_dir).ok();

    let file_appender = rolling::daily(&config.log_dir, &config.log_file);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true);

    let env_filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer);

    if config.log_to_stdout {
        let stdout_layer = fmt::layer()
            .with_writer(std::io::stdout)
            .with_ansi(true)
            .with_target(true);
        registry.with(stdout_layer).init();
    } else {
        registry.init();
    }

    guard
}
