#![warn(clippy::all, clippy::pedantic)]

use anyhow::{Context, Result};
use clap::Parser;
use stark_assistant::app::dispatch::dispatch;
use stark_assistant::cli::Cli;
use stark_assistant::config::Config;
use std::fs::{self, OpenOptions};
use std::sync::Mutex;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_or_init()?;
    config.apply_env_overrides();
    config.validate().context("Invalid configuration")?;

    init_logging(&config)?;

    dispatch(cli, config).await
}

/// Logs go to a file only, so the interactive prompt stays clean.
fn init_logging(config: &Config) -> Result<()> {
    let level = config.logging.max_level()?;
    let log_path = config.log_path();
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
    Ok(())
}
