//! Indicator engine for the watchlist scanner.
//!
//! Turns a price series into an indicator snapshot (RSI, fast and slow EMA,
//! textual signal), runs one pass over the watchlist per polling cycle, and
//! drives those cycles on a fixed period until told to stop.

mod engine;
mod poller;
mod report;
pub mod signal;
mod snapshot;

pub use engine::{EngineSettings, IndicatorEngine, ScanRequest};
pub use poller::Poller;
pub use report::{CycleReport, FailureKind, TickerFailure, NO_DATA_NOTICE};
pub use signal::{EmaTrend, RsiZone, Signal, SignalThresholds};
pub use snapshot::{format_value, Snapshot};
