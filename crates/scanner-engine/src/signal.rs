//! Signal classification from the latest RSI and EMA values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// RSI thresholds for the momentum clause.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalThresholds {
    /// RSI strictly below this is oversold
    pub oversold: f64,
    /// RSI strictly above this is overbought
    pub overbought: f64,
}

impl Default for SignalThresholds {
    fn default() -> Self {
        Self {
            oversold: 30.0,
            overbought: 70.0,
        }
    }
}

/// Momentum reading from the RSI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RsiZone {
    Oversold,
    Overbought,
}

impl fmt::Display for RsiZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RsiZone::Oversold => write!(f, "RSI Oversold"),
            RsiZone::Overbought => write!(f, "RSI Overbought"),
        }
    }
}

/// Trend reading from the fast/slow EMA pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmaTrend {
    Bullish,
    Bearish,
}

impl fmt::Display for EmaTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmaTrend::Bullish => write!(f, "Bullish EMA Cross"),
            EmaTrend::Bearish => write!(f, "Bearish EMA Cross"),
        }
    }
}

/// Combined signal. Renders as the momentum clause, then the trend clause,
/// or `-` when neither fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(into = "String")]
pub struct Signal {
    pub momentum: Option<RsiZone>,
    pub trend: Option<EmaTrend>,
}

impl Signal {
    /// Classify the latest indicator values.
    pub fn classify(
        rsi: Option<f64>,
        ema_fast: Option<f64>,
        ema_slow: Option<f64>,
        thresholds: &SignalThresholds,
    ) -> Self {
        let momentum = match rsi {
            Some(v) if v < thresholds.oversold => Some(RsiZone::Oversold),
            Some(v) if v > thresholds.overbought => Some(RsiZone::Overbought),
            _ => None,
        };

        let trend = match (ema_fast, ema_slow) {
            (Some(fast), Some(slow)) if fast > slow => Some(EmaTrend::Bullish),
            (Some(fast), Some(slow)) if fast < slow => Some(EmaTrend::Bearish),
            _ => None,
        };

        Self { momentum, trend }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.momentum, self.trend) {
            (Some(m), Some(t)) => write!(f, "{} {}", m, t),
            (Some(m), None) => write!(f, "{}", m),
            (None, Some(t)) => write!(f, "{}", t),
            (None, None) => write!(f, "-"),
        }
    }
}

impl From<Signal> for String {
    fn from(value: Signal) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(rsi: Option<f64>, fast: Option<f64>, slow: Option<f64>) -> String {
        Signal::classify(rsi, fast, slow, &SignalThresholds::default()).to_string()
    }

    #[test]
    fn test_oversold_and_bullish() {
        assert_eq!(
            classify(Some(25.0), Some(12.0), Some(10.0)),
            "RSI Oversold Bullish EMA Cross"
        );
    }

    #[test]
    fn test_neutral() {
        assert_eq!(classify(Some(50.0), Some(10.0), Some(10.0)), "-");
        assert_eq!(Signal::default().to_string(), "-");
    }

    #[test]
    fn test_single_clauses() {
        assert_eq!(classify(Some(75.0), None, Some(10.0)), "RSI Overbought");
        assert_eq!(classify(None, Some(9.0), Some(10.0)), "Bearish EMA Cross");
        assert_eq!(classify(Some(45.0), Some(11.0), Some(10.0)), "Bullish EMA Cross");
    }

    #[test]
    fn test_thresholds_are_strict() {
        assert_eq!(classify(Some(30.0), None, None), "-");
        assert_eq!(classify(Some(70.0), None, None), "-");
        assert_eq!(classify(Some(70.01), None, None), "RSI Overbought");
    }

    #[test]
    fn test_undefined_inputs() {
        assert_eq!(classify(None, None, None), "-");
        assert_eq!(classify(None, Some(1.0), None), "-");
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = SignalThresholds {
            oversold: 20.0,
            overbought: 80.0,
        };
        let signal = Signal::classify(Some(25.0), None, None, &thresholds);
        assert_eq!(signal, Signal::default());
    }

    #[test]
    fn test_serializes_as_text() {
        let signal = Signal {
            momentum: Some(RsiZone::Overbought),
            trend: Some(EmaTrend::Bearish),
        };
        assert_eq!(
            serde_json::to_string(&signal).unwrap(),
            "\"RSI Overbought Bearish EMA Cross\""
        );
    }
}
