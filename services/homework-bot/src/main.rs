//! Homework bot CLI
//!
//! Long-running poller that reports homework review status changes to Telegram.

use std::path::PathBuf;

use clap::Parser;
use homework_bot::{load_config, logging, Config};
use tracing::Level;

#[derive(Parser)]
#[command(name = "homework-bot")]
#[command(about = "Notifies a Telegram chat about homework review status changes")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: Level,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // A missing .env is fine, the variables may come from the environment
    let dotenv = dotenvy::dotenv();

    let mut config = match &args.config {
        Some(config_path) => load_config(config_path)?,
        None => Config::default(),
    };

    let _log_guard = logging::init_logging(args.log_level, &config.log)?;

    tracing::debug!(
        "Parsed command line arguments: config={:?}, log_level={:?}",
        args.config,
        args.log_level
    );
    match dotenv {
        Ok(path) => tracing::debug!("Loaded environment from {:?}", path),
        Err(e) => tracing::debug!("No .env file loaded: {}", e),
    }

    config.resolve_secrets();
    if let Err(e) = config.validate() {
        tracing::error!("Refusing to start: {}", e);
        return Err(e.into());
    }

    tracing::info!("Starting homework bot");
    tracing::debug!(
        "Endpoint: {}, retry interval: {}s, cursor mode: {:?}",
        config.endpoint,
        config.retry_interval_seconds,
        config.cursor.mode
    );

    homework_bot::run(config).await?;

    Ok(())
}
