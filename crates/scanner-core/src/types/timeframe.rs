//! Sampling interval and lookback window definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sampling interval for bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Timeframe {
    /// 1 minute bars
    #[serde(rename = "1m")]
    Minute1,
    /// 5 minute bars
    #[serde(rename = "5m")]
    #[default]
    Minute5,
    /// 15 minute bars
    #[serde(rename = "15m")]
    Minute15,
    /// 30 minute bars
    #[serde(rename = "30m")]
    Minute30,
    /// 1 hour bars
    #[serde(rename = "1h")]
    Hour1,
    /// Daily bars
    #[serde(rename = "1d")]
    Daily,
    /// Weekly bars
    #[serde(rename = "1w")]
    Weekly,
    /// Monthly bars
    #[serde(rename = "1mo")]
    Monthly,
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Timeframe::Minute1 => "1m",
            Timeframe::Minute5 => "5m",
            Timeframe::Minute15 => "15m",
            Timeframe::Minute30 => "30m",
            Timeframe::Hour1 => "1h",
            Timeframe::Daily => "1d",
            Timeframe::Weekly => "1w",
            Timeframe::Monthly => "1mo",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1m" | "1min" | "minute" => Ok(Timeframe::Minute1),
            "5m" | "5min" => Ok(Timeframe::Minute5),
            "15m" | "15min" => Ok(Timeframe::Minute15),
            "30m" | "30min" => Ok(Timeframe::Minute30),
            "1h" | "60m" | "1hour" | "hour" => Ok(Timeframe::Hour1),
            "1d" | "day" | "daily" => Ok(Timeframe::Daily),
            "1w" | "1wk" | "week" | "weekly" => Ok(Timeframe::Weekly),
            "1mo" | "month" | "monthly" => Ok(Timeframe::Monthly),
            _ => Err(format!("Invalid timeframe: {}", s)),
        }
    }
}

/// Historical range requested from a data source, e.g. `5d` or `2w`.
///
/// Accepted units are `m` (minutes), `h` (hours), `d` (days) and `w` (weeks).
/// The window is capped so that its length in milliseconds fits an `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Lookback {
    secs: u64,
}

impl Lookback {
    /// Longest accepted window, in seconds.
    pub const MAX_SECS: u64 = (i64::MAX / 1000) as u64;

    /// Lookback of the given number of days, saturating at `MAX_SECS`.
    pub fn days(days: u64) -> Self {
        Self {
            secs: days.saturating_mul(86400).min(Self::MAX_SECS),
        }
    }

    /// Length of the window in seconds.
    pub fn as_secs(&self) -> u64 {
        self.secs
    }

    /// Length of the window in milliseconds.
    pub fn as_millis(&self) -> i64 {
        (self.secs.min(Self::MAX_SECS) as i64).saturating_mul(1000)
    }
}

impl Default for Lookback {
    fn default() -> Self {
        Self::days(5)
    }
}

impl fmt::Display for Lookback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.secs;
        if s % 604800 == 0 && s > 0 {
            write!(f, "{}w", s / 604800)
        } else if s % 86400 == 0 && s > 0 {
            write!(f, "{}d", s / 86400)
        } else if s % 3600 == 0 && s > 0 {
            write!(f, "{}h", s / 3600)
        } else {
            write!(f, "{}m", s / 60)
        }
    }
}

impl FromStr for Lookback {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        let split = s
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| format!("Missing unit in lookback: {}", s))?;
        let (amount, unit) = s.split_at(split);
        let amount: u64 = amount
            .parse()
            .map_err(|_| format!("Invalid lookback amount: {}", s))?;
        if amount == 0 {
            return Err(format!("Lookback must be positive: {}", s));
        }
        let unit_secs: u64 = match unit {
            "m" | "min" => 60,
            "h" => 3600,
            "d" => 86400,
            "w" | "wk" => 604800,
            _ => return Err(format!("Invalid lookback unit: {}", s)),
        };
        let secs = amount
            .checked_mul(unit_secs)
            .filter(|secs| *secs <= Self::MAX_SECS)
            .ok_or_else(|| format!("Lookback too large: {}", s))?;
        Ok(Self { secs })
    }
}

impl TryFrom<String> for Lookback {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Lookback> for String {
    fn from(value: Lookback) -> Self {
        value.to_string()
    }
}
