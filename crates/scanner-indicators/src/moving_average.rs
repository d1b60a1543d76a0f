//! Moving average indicators.

use scanner_core::error::IndicatorError;
use scanner_core::traits::Indicator;

/// Simple Moving Average (SMA).
///
/// Arithmetic mean of the trailing `period` values. A position is defined
/// only once a full window is available, so the first `period - 1` outputs
/// are `None`.
#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
}

impl Sma {
    /// Create a new SMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    /// Create a new SMA, rejecting a zero period.
    pub fn try_new(period: usize) -> Result<Self, IndicatorError> {
        if period == 0 {
            return Err(IndicatorError::InvalidParameter(
                "SMA period must be greater than 0".to_string(),
            ));
        }
        Ok(Self { period })
    }
}

impl Indicator for Sma {
    type Output = Option<f64>;

    fn calculate(&self, data: &[f64]) -> Vec<Option<f64>> {
        let warmup = (self.period - 1).min(data.len());
        let period_f64 = self.period as f64;

        // Each window is summed on its own so a zero window stays exactly zero.
        let mut result = vec![None; warmup];
        result.extend(
            data.windows(self.period)
                .map(|window| Some(window.iter().sum::<f64>() / period_f64)),
        );
        result
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "SMA"
    }
}

/// Exponential Moving Average (EMA).
///
/// Recursive form seeded with the first price:
/// `ema[0] = price[0]`, `ema[i] = alpha * price[i] + (1 - alpha) * ema[i - 1]`
/// with `alpha = 2 / (span + 1)`. No bias correction is applied, so every
/// position is defined.
#[derive(Debug, Clone)]
pub struct Ema {
    span: usize,
    alpha: f64,
}

impl Ema {
    /// Create a new EMA with the specified span.
    pub fn new(span: usize) -> Self {
        assert!(span > 0, "Span must be greater than 0");
        Self {
            span,
            alpha: 2.0 / (span as f64 + 1.0),
        }
    }

    /// Create a new EMA, rejecting a zero span.
    pub fn try_new(span: usize) -> Result<Self, IndicatorError> {
        if span == 0 {
            return Err(IndicatorError::InvalidParameter(
                "EMA span must be greater than 0".to_string(),
            ));
        }
        Ok(Self::new(span))
    }
}

impl Indicator for Ema {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        let Some((&first, rest)) = data.split_first() else {
            return vec![];
        };

        let mut result = Vec::with_capacity(data.len());

        // Same recurrence written as a correction step, so a price equal to
        // the running average leaves it bit-for-bit unchanged.
        let mut ema = first;
        result.push(ema);
        for &price in rest {
            ema += self.alpha * (price - ema);
            result.push(ema);
        }

        result
    }

    fn period(&self) -> usize {
        self.span
    }

    fn name(&self) -> &str {
        "EMA"
    }
}
