//! Watchlist scanner CLI application.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use scanner_config::load_config;
use scanner_monitor::setup_logging;
use std::path::PathBuf;

/// Log file used by the dashboard when none is configured, so log lines
/// never land on the terminal it draws to.
const DASHBOARD_LOG_FILE: &str = "scanner.log";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let loaded = load_config(&cli.config);

    // Setup logging
    let logging = loaded
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_default();
    let log_level = cli
        .log_level
        .map(|l| l.as_str().to_string())
        .unwrap_or(logging.level.clone());
    let json = cli.json_logs || logging.is_json();
    let log_file = cli.log_file.clone().or(logging.file).or_else(|| {
        matches!(cli.command, Commands::Dashboard(_)).then(|| PathBuf::from(DASHBOARD_LOG_FILE))
    });
    let _guard = setup_logging(&log_level, json, log_file.as_deref());

    // Execute command
    match cli.command {
        Commands::Dashboard(args) => {
            let config = loaded.context("Failed to load configuration")?;
            cli::commands::dashboard::run(args, config).await
        }
        Commands::Scan(args) => {
            let config = loaded.context("Failed to load configuration")?;
            cli::commands::scan::run(args, config).await
        }
        Commands::ValidateConfig => cli::commands::validate::run(&cli.config, loaded).await,
        Commands::HashPassword(args) => {
            let config = loaded.context("Failed to load configuration")?;
            cli::commands::hash_password::run(args.salt, config).await
        }
    }
}
