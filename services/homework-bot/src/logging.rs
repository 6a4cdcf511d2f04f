//! Console and rotating-file log setup

use tracing::Level;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::Layer;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::LogConfig;

/// Build the rolling file appender described by `config`
pub fn file_appender(config: &LogConfig) -> crate::Result<RollingFileAppender> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(&config.file_prefix)
        .filename_suffix("log")
        .max_log_files(config.max_files.max(1))
        .build(&config.directory)
        .map_err(|e| {
            crate::BotError::Config(format!(
                "Cannot open log directory {:?}: {}",
                config.directory, e
            ))
        })
}

/// Install the global subscriber. Keep the returned guard alive for as long
/// as log lines should reach the file.
pub fn init_logging(level: Level, config: &LogConfig) -> crate::Result<WorkerGuard> {
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender(config)?);

    subscriber(level, file_writer)
        .try_init()
        .map_err(|e| crate::BotError::Config(format!("Logging already initialised: {}", e)))?;

    Ok(guard)
}

/// The file always records at least debug, whatever the console shows
fn file_filter(level: Level) -> LevelFilter {
    std::cmp::max(LevelFilter::from_level(level), LevelFilter::DEBUG)
}

fn subscriber(
    level: Level,
    file_writer: NonBlocking,
) -> impl tracing::Subscriber + Send + Sync + 'static {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(LevelFilter::from_level(level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(file_writer)
                .with_filter(file_filter(level)),
        )
}
