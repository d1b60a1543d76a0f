//! CLI command implementations.

pub mod dashboard;
pub mod hash_password;
mod prompt;
pub mod scan;
pub mod validate;

use anyhow::{Context, Result};
use scanner_config::{AccessGate, AppConfig, AppSettings, AuthSettings, DataSourceKind};
use scanner_core::traits::SeriesFetcher;
use scanner_data::{CsvDirectoryFetcher, YahooConfig, YahooFetcher};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Build the configured market data source.
pub fn build_fetcher(config: &AppConfig) -> Result<Arc<dyn SeriesFetcher>> {
    match config.data.source {
        DataSourceKind::Yahoo => {
            let yahoo = YahooConfig {
                base_url: config.data.yahoo.base_url.clone(),
                timeout: Duration::from_secs(config.data.yahoo.timeout_secs),
                ..Default::default()
            };
            let fetcher = YahooFetcher::new(yahoo).context("Failed to create Yahoo client")?;
            Ok(Arc::new(fetcher))
        }
        DataSourceKind::Csv => {
            let dir = config
                .data
                .csv_dir
                .as_ref()
                .context("data.csv_dir is required for the csv source")?;
            let fetcher = CsvDirectoryFetcher::new(dir)?;
            Ok(Arc::new(fetcher))
        }
    }
}

/// Run the access gate, if enabled. Must pass before anything is fetched.
pub fn check_access(auth: &AuthSettings, app: &AppSettings) -> Result<()> {
    let Some(gate) = AccessGate::from_settings(auth)? else {
        return Ok(());
    };

    let password = read_password(&auth.password_env)?;
    if let Err(e) = gate.verify(&password) {
        warn!("Access denied");
        return Err(e.into());
    }

    info!(trader = app.trader_name(), "Access granted");
    eprintln!("{}", app.welcome());
    Ok(())
}

/// Password from `env_var`, or typed at a hidden prompt.
pub fn read_password(env_var: &str) -> Result<String> {
    if let Ok(password) = std::env::var(env_var) {
        return Ok(password);
    }
    prompt::read_hidden("Password: ")
}

/// Fail on cross-field configuration errors.
pub fn ensure_valid(config: &AppConfig) -> Result<()> {
    config
        .validate()
        .map_err(anyhow::Error::msg)
        .context("Invalid configuration")
}
