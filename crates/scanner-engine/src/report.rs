//! Polling cycle report.

use chrono::{DateTime, Local, Utc};
use serde::Serialize;

use crate::snapshot::{format_value, Snapshot};

/// Notice shown instead of an empty table.
pub const NO_DATA_NOTICE: &str = "No data available at the moment.";

/// Why a ticker was left out of a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The data source errored
    Fetch,
    /// The data source returned no bars
    EmptySeries,
}

/// A ticker skipped during a cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickerFailure {
    pub symbol: String,
    pub kind: FailureKind,
    pub message: String,
}

/// Result of one pass over the watchlist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleReport {
    /// When the cycle finished
    pub generated_at: DateTime<Utc>,
    /// Snapshots in watchlist order
    pub snapshots: Vec<Snapshot>,
    /// Skipped tickers in watchlist order
    pub failures: Vec<TickerFailure>,
}

impl CycleReport {
    /// No ticker produced a snapshot.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Wall-clock time of the update, `HH:MM:SS` in local time.
    pub fn update_time(&self) -> String {
        self.generated_at
            .with_timezone(&Local)
            .format("%H:%M:%S")
            .to_string()
    }

    /// Serialize the report as pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Generate a text table.
    pub fn to_text(&self) -> String {
        let mut s = String::new();

        if self.is_empty() {
            s.push_str(NO_DATA_NOTICE);
            s.push('\n');
        } else {
            s.push_str(&format!(
                "{:<10} {:>10} {:>8} {:>10} {:>10}  {}\n",
                "Ticker", "Close", "RSI", "EMA20", "EMA50", "Signal"
            ));
            s.push_str("───────────────────────────────────────────────────────────────────────\n");
            for snap in &self.snapshots {
                s.push_str(&format!(
                    "{:<10} {:>10} {:>8} {:>10} {:>10}  {}\n",
                    snap.symbol,
                    format_value(snap.last_close),
                    format_value(snap.rsi),
                    format_value(snap.ema_fast),
                    format_value(snap.ema_slow),
                    snap.signal
                ));
            }
        }

        for failure in &self.failures {
            s.push_str(&format!("! {}: {}\n", failure.symbol, failure.message));
        }

        s.push_str(&format!("Last update: {}\n", self.update_time()));
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::{EmaTrend, Signal};
    use rust_decimal_macros::dec;

    fn snapshot(symbol: &str) -> Snapshot {
        Snapshot {
            symbol: symbol.to_string(),
            last_close: Some(dec!(101.5)),
            rsi: None,
            ema_fast: Some(dec!(100.25)),
            ema_slow: Some(dec!(99.75)),
            signal: Signal {
                momentum: None,
                trend: Some(EmaTrend::Bullish),
            },
            bars: 20,
            as_of: Utc::now(),
        }
    }

    #[test]
    fn test_text_table() {
        let report = CycleReport {
            generated_at: Utc::now(),
            snapshots: vec![snapshot("AAPL")],
            failures: vec![TickerFailure {
                symbol: "ZZZZ".to_string(),
                kind: FailureKind::EmptySeries,
                message: "No bars returned for ZZZZ".to_string(),
            }],
        };

        let text = report.to_text();
        assert!(text.contains("AAPL"));
        assert!(text.contains("101.50"));
        assert!(text.contains("Bullish EMA Cross"));
        assert!(text.contains("! ZZZZ: No bars returned for ZZZZ"));
        assert!(text.contains("Last update: "));
        assert!(!text.contains(NO_DATA_NOTICE));
    }

    #[test]
    fn test_empty_report_notice() {
        let report = CycleReport {
            generated_at: Utc::now(),
            snapshots: vec![],
            failures: vec![],
        };

        assert!(report.is_empty());
        assert!(report.to_text().starts_with(NO_DATA_NOTICE));
    }

    #[test]
    fn test_json_shape() {
        let report = CycleReport {
            generated_at: Utc::now(),
            snapshots: vec![snapshot("MSFT")],
            failures: vec![],
        };

        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(value["snapshots"][0]["symbol"], "MSFT");
        assert_eq!(value["snapshots"][0]["signal"], "Bullish EMA Cross");
        assert!(value["snapshots"][0]["rsi"].is_null());
    }
}
