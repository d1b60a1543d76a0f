//! Momentum indicators.

use scanner_core::error::IndicatorError;
use scanner_core::traits::Indicator;

use crate::moving_average::Sma;

/// Relative Strength Index (RSI).
///
/// Measures the speed and magnitude of recent price changes
/// to evaluate overbought or oversold conditions.
///
/// Gains and losses are averaged with a simple moving average over `period`
/// positions. The first position has no previous price and counts as zero
/// gain and zero loss, so the first defined value sits at index `period - 1`.
#[derive(Debug, Clone)]
pub struct Rsi {
    average: Sma,
}

impl Rsi {
    /// Create a new RSI indicator.
    ///
    /// Common periods are 14 (default) or 9.
    pub fn new(period: usize) -> Self {
        Self {
            average: Sma::new(period),
        }
    }

    /// Create a new RSI indicator, rejecting a zero period.
    pub fn try_new(period: usize) -> Result<Self, IndicatorError> {
        let average = Sma::try_new(period).map_err(|_| {
            IndicatorError::InvalidParameter("RSI period must be greater than 0".to_string())
        })?;
        Ok(Self { average })
    }

    /// RSI from average gain and average loss.
    ///
    /// A gain-only window is 100. A window with neither gains nor losses
    /// has no defined value.
    fn from_averages(avg_gain: f64, avg_loss: f64) -> Option<f64> {
        if avg_loss == 0.0 {
            if avg_gain > 0.0 {
                Some(100.0)
            } else {
                None
            }
        } else {
            Some(100.0 - (100.0 / (1.0 + avg_gain / avg_loss)))
        }
    }
}

impl Default for Rsi {
    fn default() -> Self {
        Self::new(14)
    }
}

impl Indicator for Rsi {
    type Output = Option<f64>;

    fn calculate(&self, data: &[f64]) -> Vec<Option<f64>> {
        if data.is_empty() {
            return vec![];
        }

        // Calculate price changes
        let mut gains = Vec::with_capacity(data.len());
        let mut losses = Vec::with_capacity(data.len());
        gains.push(0.0);
        losses.push(0.0);

        for pair in data.windows(2) {
            let change = pair[1] - pair[0];
            if change > 0.0 {
                gains.push(change);
                losses.push(0.0);
            } else if change < 0.0 {
                gains.push(0.0);
                losses.push(-change);
            } else {
                gains.push(0.0);
                losses.push(0.0);
            }
        }

        let avg_gains = self.average.calculate(&gains);
        let avg_losses = self.average.calculate(&losses);

        avg_gains
            .into_iter()
            .zip(avg_losses)
            .map(|(gain, loss)| match (gain, loss) {
                (Some(gain), Some(loss)) => Self::from_averages(gain, loss),
                _ => None,
            })
            .collect()
    }

    fn period(&self) -> usize {
        self.average.period()
    }

    fn name(&self) -> &str {
        "RSI"
    }
}
