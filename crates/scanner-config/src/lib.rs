//! Configuration management.

mod access;
mod settings;

pub use access::AccessGate;
pub use settings::{
    AppConfig, AppSettings, AuthSettings, DataSettings, DataSourceKind, LoggingConfig,
    ScanSettings, YahooSettings,
};

pub use config::ConfigError;

use config::{Config, Environment, File};
use std::path::Path;

/// Load configuration from file and environment.
///
/// A missing file is not an error: defaults apply, then `SCANNER__*`
/// environment variables (e.g. `SCANNER__SCAN__INTERVAL=15m`,
/// `SCANNER__WATCHLIST=AAPL,TSLA`).
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(false))
        .add_source(
            Environment::with_prefix("SCANNER")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("watchlist")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}
