//! CLI definitions.

pub mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use scanner_config::{AppConfig, DataSourceKind};
use scanner_core::types::{Lookback, Timeframe, Watchlist};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scanner")]
#[command(author, version, about = "Polling watchlist scanner with RSI and EMA cross signals")]
pub struct Cli {
    /// Configuration file path (defaults apply when it does not exist)
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level, overrides `logging.level`
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Poll the watchlist and show the live dashboard
    Dashboard(DashboardArgs),
    /// Run a single polling cycle and print the report
    Scan(ScanArgs),
    /// Validate configuration
    ValidateConfig,
    /// Print the access gate digest for a password
    HashPassword(HashPasswordArgs),
}

/// Overrides shared by the polling commands.
#[derive(clap::Args)]
pub struct WatchArgs {
    /// Symbols to watch (comma-separated)
    #[arg(short = 'S', long, value_delimiter = ',')]
    pub symbols: Vec<String>,

    /// Bar sampling interval (1m, 5m, 15m, 30m, 1h, 1d, 1wk, 1mo)
    #[arg(short, long)]
    pub interval: Option<Timeframe>,

    /// History window per fetch (e.g. 5d, 12h, 2w)
    #[arg(long)]
    pub lookback: Option<Lookback>,

    /// Read bars from SYMBOL.csv files in this directory instead of Yahoo
    #[arg(long)]
    pub csv_dir: Option<PathBuf>,

    /// Your name for the welcome banner
    #[arg(long)]
    pub trader: Option<String>,
}

impl WatchArgs {
    /// Apply the flags on top of the loaded configuration.
    pub fn apply(&self, config: &mut AppConfig) -> Result<()> {
        if !self.symbols.is_empty() {
            config.watchlist = Watchlist::new(&self.symbols)?;
        }
        if let Some(interval) = self.interval {
            config.scan.interval = interval;
        }
        if let Some(lookback) = self.lookback {
            config.scan.lookback = lookback;
        }
        if let Some(dir) = &self.csv_dir {
            config.data.source = DataSourceKind::Csv;
            config.data.csv_dir = Some(dir.clone());
        }
        if let Some(trader) = &self.trader {
            config.app.trader = Some(trader.clone());
        }
        Ok(())
    }
}

#[derive(clap::Args)]
pub struct DashboardArgs {
    #[command(flatten)]
    pub watch: WatchArgs,

    /// Seconds between polling cycles
    #[arg(short, long)]
    pub period: Option<u64>,

    /// Screen refresh interval in milliseconds
    #[arg(long, default_value = "250")]
    pub refresh_ms: u64,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(clap::Args)]
pub struct ScanArgs {
    #[command(flatten)]
    pub watch: WatchArgs,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(clap::Args)]
pub struct HashPasswordArgs {
    /// Salt to key the digest with, defaults to `auth.salt`
    #[arg(long)]
    pub salt: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dashboard_overrides() {
        let cli = Cli::parse_from([
            "scanner",
            "dashboard",
            "--symbols",
            "tsla,nvda",
            "--interval",
            "15m",
            "--lookback",
            "2d",
            "--period",
            "30",
        ]);

        let Commands::Dashboard(args) = cli.command else {
            panic!("expected dashboard command");
        };
        assert_eq!(args.period, Some(30));

        let mut config = AppConfig::default();
        args.watch.apply(&mut config).unwrap();
        assert_eq!(config.watchlist.symbols(), ["TSLA", "NVDA"]);
        assert_eq!(config.scan.interval, Timeframe::Minute15);
        assert_eq!(config.scan.lookback, Lookback::days(2));
        assert_eq!(config.data.source, DataSourceKind::Yahoo);
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let cli = Cli::parse_from(["scanner", "scan", "--output", "json"]);
        let Commands::Scan(args) = cli.command else {
            panic!("expected scan command");
        };
        assert!(matches!(args.output, OutputFormat::Json));

        let mut config = AppConfig::default();
        args.watch.apply(&mut config).unwrap();
        assert_eq!(config.watchlist, Watchlist::default());
    }

    #[test]
    fn test_csv_dir_switches_source() {
        let cli = Cli::parse_from(["scanner", "scan", "--csv-dir", "data"]);
        let Commands::Scan(args) = cli.command else {
            panic!("expected scan command");
        };

        let mut config = AppConfig::default();
        args.watch.apply(&mut config).unwrap();
        assert_eq!(config.data.source, DataSourceKind::Csv);
        assert_eq!(config.data.csv_dir, Some(PathBuf::from("data")));
    }

    #[test]
    fn test_trader_override() {
        let cli = Cli::parse_from(["scanner", "dashboard", "--trader", "Dana"]);
        let Commands::Dashboard(args) = cli.command else {
            panic!("expected dashboard command");
        };

        let mut config = AppConfig::default();
        assert_eq!(config.app.trader_name(), "Trader");
        args.watch.apply(&mut config).unwrap();
        assert_eq!(config.app.trader_name(), "Dana");
    }

    #[test]
    fn test_bad_interval_rejected() {
        assert!(Cli::try_parse_from(["scanner", "scan", "--interval", "7m"]).is_err());
    }
}
