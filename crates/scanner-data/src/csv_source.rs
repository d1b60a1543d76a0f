//! CSV directory fetcher for offline scans.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;
use scanner_core::error::DataError;
use scanner_core::traits::SeriesFetcher;
use scanner_core::types::{Bar, Lookback, PriceSeries, Timeframe};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// CSV record format.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(
        alias = "Date",
        alias = "date",
        alias = "Datetime",
        alias = "timestamp",
        alias = "Timestamp"
    )]
    date: String,
    #[serde(alias = "Open", alias = "open", default)]
    open: Option<f64>,
    #[serde(alias = "High", alias = "high", default)]
    high: Option<f64>,
    #[serde(alias = "Low", alias = "low", default)]
    low: Option<f64>,
    #[serde(alias = "Close", alias = "close")]
    close: f64,
    #[serde(alias = "Volume", alias = "volume", default)]
    volume: Option<f64>,
}

/// Reads `{SYMBOL}.csv` files from a directory.
///
/// The lookback window is measured back from the newest bar in the file, not
/// from the wall clock, so recorded data stays usable.
pub struct CsvDirectoryFetcher {
    dir: PathBuf,
}

impl CsvDirectoryFetcher {
    /// Create a new CSV fetcher over `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, DataError> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(DataError::Internal(format!(
                "CSV data directory not found: {}",
                dir.display()
            )));
        }
        Ok(Self { dir })
    }

    /// Locate the file for a symbol, trying the exact and lowercase names.
    fn file_for(&self, symbol: &str) -> Option<PathBuf> {
        [
            self.dir.join(format!("{}.csv", symbol)),
            self.dir.join(format!("{}.csv", symbol.to_lowercase())),
        ]
        .into_iter()
        .find(|p| p.is_file())
    }
}

/// Load bars from a CSV file.
fn load_bars(path: &Path) -> Result<Vec<Bar>, DataError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| DataError::Parse(e.to_string()))?;

    let mut bars = Vec::new();

    for result in reader.deserialize() {
        let record: CsvRecord = result.map_err(|e| DataError::Parse(e.to_string()))?;
        let timestamp = parse_timestamp(&record.date)?;

        bars.push(Bar::new(
            timestamp,
            record.open.unwrap_or(record.close),
            record.high.unwrap_or(record.close),
            record.low.unwrap_or(record.close),
            record.close,
            record.volume.unwrap_or(0.0),
        ));
    }

    Ok(bars)
}

/// Parse various timestamp formats into Unix milliseconds.
fn parse_timestamp(date_str: &str) -> Result<i64, DataError> {
    let datetime_formats = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];
    for format in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, format) {
            return Ok(dt.and_utc().timestamp_millis());
        }
    }

    let date_formats = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
    for format in date_formats {
        if let Ok(d) = NaiveDate::parse_from_str(date_str, format) {
            if let Some(dt) = d.and_hms_opt(0, 0, 0) {
                return Ok(dt.and_utc().timestamp_millis());
            }
        }
    }

    // Try parsing as Unix timestamp
    if let Ok(ts) = date_str.parse::<i64>() {
        // Assume milliseconds if > 10 digits
        if ts > 10_000_000_000 {
            return Ok(ts);
        } else {
            return Ok(ts * 1000);
        }
    }

    Err(DataError::Parse(format!(
        "Could not parse date: {}",
        date_str
    )))
}

#[async_trait]
impl SeriesFetcher for CsvDirectoryFetcher {
    async fn fetch(
        &self,
        symbol: &str,
        lookback: Lookback,
        interval: Timeframe,
    ) -> Result<PriceSeries, DataError> {
        let Some(path) = self.file_for(symbol) else {
            debug!(symbol, dir = %self.dir.display(), "No CSV file for symbol");
            return Ok(PriceSeries::new(symbol, interval));
        };

        // File IO stays off the async workers
        let bars = tokio::task::spawn_blocking({
            let path = path.clone();
            move || load_bars(&path)
        })
        .await
        .map_err(|e| DataError::Internal(e.to_string()))??;
        let mut series = PriceSeries::from_bars(symbol, interval, bars);
        if let Some(newest) = series.last().map(|b| b.timestamp) {
            series.retain_since(newest - lookback.as_millis());
        }

        debug!(symbol, bars = series.len(), path = %path.display(), "Loaded CSV series");
        Ok(series)
    }

    fn name(&self) -> &str {
        "csv"
    }
}
