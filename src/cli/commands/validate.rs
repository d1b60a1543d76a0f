//! Validate configuration command.

use anyhow::Result;
use scanner_config::{AppConfig, ConfigError};
use std::path::Path;

pub async fn run(config_path: &Path, loaded: Result<AppConfig, ConfigError>) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);
    if !config_path.exists() {
        println!("File not found, checking defaults and environment only");
    }

    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    };

    if let Err(e) = config.validate() {
        println!("Configuration error: {}", e);
        anyhow::bail!(e);
    }

    println!("Configuration is valid!");
    println!();
    println!("App: {}", config.app.name);
    println!("Environment: {}", config.app.environment);
    println!("Log level: {}", config.logging.level);
    println!("Watchlist: {}", config.watchlist.symbols().join(", "));
    println!("Interval: {}", config.scan.interval);
    println!("Lookback: {}", config.scan.lookback);
    println!("Poll period: {}s", config.scan.poll_period_secs);
    println!(
        "RSI({}) thresholds: {}/{}",
        config.indicators.rsi_period, config.indicators.oversold, config.indicators.overbought
    );
    println!(
        "EMA spans: {}/{}",
        config.indicators.fast_span, config.indicators.slow_span
    );
    println!("Access gate: {}", if config.auth.enabled { "on" } else { "off" });
    println!();
    println!("Effective configuration:");
    println!("{}", config.to_toml()?);

    Ok(())
}
