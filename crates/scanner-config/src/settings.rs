//! Configuration structures.

use scanner_core::types::{Lookback, Timeframe, Watchlist};
use scanner_engine::{EngineSettings, ScanRequest};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub watchlist: Watchlist,
    #[serde(default)]
    pub scan: ScanSettings,
    #[serde(default)]
    pub indicators: EngineSettings,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub auth: AuthSettings,
}

impl AppConfig {
    /// Check cross-field constraints the types alone cannot express.
    pub fn validate(&self) -> Result<(), String> {
        self.indicators.validate().map_err(|e| e.to_string())?;

        if self.scan.poll_period_secs == 0 {
            return Err("scan.poll_period_secs must be greater than 0".to_string());
        }
        if self.data.yahoo.timeout_secs == 0 {
            return Err("data.yahoo.timeout_secs must be greater than 0".to_string());
        }
        if self.data.source == DataSourceKind::Csv && self.data.csv_dir.is_none() {
            return Err("data.csv_dir is required when data.source = \"csv\"".to_string());
        }
        if self.auth.enabled && self.auth.password_hash.is_none() {
            return Err("auth.password_hash is required when auth.enabled = true".to_string());
        }
        Ok(())
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

const DEFAULT_TRADER: &str = "Trader";

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
    /// Name shown in the welcome banner
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trader: Option<String>,
}

impl AppSettings {
    /// Trader name, `"Trader"` when unset or blank.
    pub fn trader_name(&self) -> &str {
        self.trader
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_TRADER)
    }

    /// Greeting printed once the access gate passes.
    pub fn welcome(&self) -> String {
        format!("Welcome {}! Access granted.", self.trader_name())
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "watchlist-scanner".to_string(),
            environment: "development".to_string(),
            trader: None,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

/// Polling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanSettings {
    /// Bar sampling interval
    pub interval: Timeframe,
    /// History window requested per fetch
    pub lookback: Lookback,
    /// Seconds between polling cycles
    pub poll_period_secs: u64,
}

impl ScanSettings {
    pub fn request(&self) -> ScanRequest {
        ScanRequest {
            lookback: self.lookback,
            interval: self.interval,
        }
    }

    pub fn poll_period(&self) -> Duration {
        Duration::from_secs(self.poll_period_secs)
    }
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            interval: Timeframe::Minute5,
            lookback: Lookback::days(5),
            poll_period_secs: 60,
        }
    }
}

/// Which market data source to poll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceKind {
    #[default]
    Yahoo,
    Csv,
}

/// Data source settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    pub source: DataSourceKind,
    pub yahoo: YahooSettings,
    /// Directory of `SYMBOL.csv` files for the csv source
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csv_dir: Option<PathBuf>,
}

/// Yahoo chart API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YahooSettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for YahooSettings {
    fn default() -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Access gate settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    pub enabled: bool,
    /// HMAC key for the password digest
    pub salt: String,
    /// Hex HMAC-SHA256 of the password, see `scanner hash-password`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    /// Environment variable checked before prompting
    pub password_env: String,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            salt: "watchlist-scanner".to_string(),
            password_hash: None,
            password_env: "SCANNER_PASSWORD".to_string(),
        }
    }
}
