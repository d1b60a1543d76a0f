//! Indicator engine.

use chrono::Utc;
use scanner_core::error::{DataError, IndicatorError};
use scanner_core::traits::{Indicator, SeriesFetcher};
use scanner_core::types::{Lookback, PriceSeries, Timeframe, Watchlist};
use scanner_indicators::{Ema, Rsi};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::report::{CycleReport, FailureKind, TickerFailure};
use crate::signal::{Signal, SignalThresholds};
use crate::snapshot::{round2, Snapshot};

/// Indicator engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// RSI period
    pub rsi_period: usize,
    /// Fast EMA span
    pub fast_span: usize,
    /// Slow EMA span
    pub slow_span: usize,
    /// RSI below this is oversold
    pub oversold: f64,
    /// RSI above this is overbought
    pub overbought: f64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        let thresholds = SignalThresholds::default();
        Self {
            rsi_period: 14,
            fast_span: 20,
            slow_span: 50,
            oversold: thresholds.oversold,
            overbought: thresholds.overbought,
        }
    }
}

impl EngineSettings {
    /// Check the settings are usable.
    pub fn validate(&self) -> Result<(), IndicatorError> {
        if self.rsi_period == 0 {
            return Err(IndicatorError::InvalidParameter(
                "rsi_period must be greater than 0".to_string(),
            ));
        }
        if self.fast_span == 0 || self.slow_span == 0 {
            return Err(IndicatorError::InvalidParameter(
                "EMA spans must be greater than 0".to_string(),
            ));
        }
        if self.fast_span >= self.slow_span {
            return Err(IndicatorError::InvalidParameter(format!(
                "fast_span ({}) must be less than slow_span ({})",
                self.fast_span, self.slow_span
            )));
        }
        if !(0.0..=100.0).contains(&self.oversold)
            || !(0.0..=100.0).contains(&self.overbought)
            || self.oversold >= self.overbought
        {
            return Err(IndicatorError::InvalidParameter(format!(
                "RSI thresholds must satisfy 0 <= oversold ({}) < overbought ({}) <= 100",
                self.oversold, self.overbought
            )));
        }
        Ok(())
    }

    pub fn thresholds(&self) -> SignalThresholds {
        SignalThresholds {
            oversold: self.oversold,
            overbought: self.overbought,
        }
    }
}

/// What to ask the data source for on every fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScanRequest {
    pub lookback: Lookback,
    pub interval: Timeframe,
}

/// Computes snapshots from price series and runs watchlist cycles.
#[derive(Debug, Clone)]
pub struct IndicatorEngine {
    rsi: Rsi,
    ema_fast: Ema,
    ema_slow: Ema,
    thresholds: SignalThresholds,
}

impl IndicatorEngine {
    /// Create an engine from validated settings.
    pub fn new(settings: &EngineSettings) -> Result<Self, IndicatorError> {
        settings.validate()?;
        Ok(Self {
            rsi: Rsi::try_new(settings.rsi_period)?,
            ema_fast: Ema::try_new(settings.fast_span)?,
            ema_slow: Ema::try_new(settings.slow_span)?,
            thresholds: settings.thresholds(),
        })
    }

    /// Evaluate one series.
    ///
    /// Returns `None` when the series is missing or has no bars.
    pub fn evaluate(&self, symbol: &str, series: Option<&PriceSeries>) -> Option<Snapshot> {
        let series = series.filter(|s| !s.is_empty())?;
        let last = *series.last()?;
        let closes = series.closes();

        let rsi = self.rsi.latest(&closes).flatten();
        let ema_fast = self.ema_fast.latest(&closes);
        let ema_slow = self.ema_slow.latest(&closes);

        if rsi.is_none() {
            debug!(
                symbol,
                bars = closes.len(),
                period = self.rsi.period(),
                "RSI undefined for latest bar"
            );
        }

        let signal = Signal::classify(rsi, ema_fast, ema_slow, &self.thresholds);

        Some(Snapshot {
            symbol: symbol.to_string(),
            last_close: round2(last.close),
            rsi: rsi.and_then(round2),
            ema_fast: ema_fast.and_then(round2),
            ema_slow: ema_slow.and_then(round2),
            signal,
            bars: closes.len(),
            as_of: last.datetime(),
        })
    }

    /// Fetch and evaluate every ticker of the watchlist, one at a time.
    ///
    /// Failed or empty tickers are logged and recorded in the report; they
    /// never stop the remaining tickers from being processed.
    pub async fn run_cycle(
        &self,
        fetcher: &dyn SeriesFetcher,
        watchlist: &Watchlist,
        request: &ScanRequest,
    ) -> CycleReport {
        let started = Instant::now();
        let mut snapshots = Vec::with_capacity(watchlist.len());
        let mut failures = Vec::new();

        for symbol in watchlist.iter() {
            let result = fetcher
                .fetch(symbol, request.lookback, request.interval)
                .await
                .and_then(|series| {
                    self.evaluate(symbol, Some(&series))
                        .ok_or_else(|| DataError::EmptySeries(symbol.to_string()))
                });

            match result {
                Ok(snapshot) => {
                    debug!(symbol, signal = %snapshot.signal, "Evaluated ticker");
                    snapshots.push(snapshot);
                }
                Err(e) => {
                    warn!(symbol, source = fetcher.name(), error = %e, "Skipping ticker");
                    let kind = if e.is_empty_series() {
                        FailureKind::EmptySeries
                    } else {
                        FailureKind::Fetch
                    };
                    failures.push(TickerFailure {
                        symbol: symbol.to_string(),
                        kind,
                        message: e.to_string(),
                    });
                }
            }
        }

        info!(
            tickers = watchlist.len(),
            snapshots = snapshots.len(),
            failures = failures.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Polling cycle complete"
        );

        CycleReport {
            generated_at: Utc::now(),
            snapshots,
            failures,
        }
    }
}
