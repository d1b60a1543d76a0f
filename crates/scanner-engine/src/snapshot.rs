//! Per-ticker indicator snapshot.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::signal::Signal;

/// Latest indicator readings for one ticker in one polling cycle.
///
/// Values are rounded to two decimal places. `None` means there was not
/// enough history for a defined value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub symbol: String,
    pub last_close: Option<Decimal>,
    pub rsi: Option<Decimal>,
    pub ema_fast: Option<Decimal>,
    pub ema_slow: Option<Decimal>,
    pub signal: Signal,
    /// Number of bars the values were computed from
    pub bars: usize,
    /// Timestamp of the newest bar
    pub as_of: DateTime<Utc>,
}

/// Round to two decimal places. Non-finite values have no decimal form.
pub(crate) fn round2(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::try_from(value).ok().map(|d| d.round_dp(2))
}

/// Format an optional value for tables, `-` when undefined.
pub fn format_value(value: Option<Decimal>) -> String {
    value
        .map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round2() {
        assert_eq!(round2(66.949_152_542), Some(dec!(66.95)));
        assert_eq!(round2(100.0), Some(dec!(100)));
        assert_eq!(round2(f64::NAN), None);
        assert_eq!(round2(f64::INFINITY), None);
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(Some(dec!(61.72))), "61.72");
        assert_eq!(format_value(Some(dec!(100))), "100.00");
        assert_eq!(format_value(None), "-");
    }
}
