//! Periodic polling task.

use scanner_core::traits::SeriesFetcher;
use scanner_core::types::Watchlist;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

use crate::engine::{IndicatorEngine, ScanRequest};
use crate::report::CycleReport;

/// Runs one watchlist cycle per period until stopped.
///
/// The first cycle starts immediately. Reports are published on a watch
/// channel so readers always see the latest one. A cycle that has started
/// always runs to completion; the stop signal is checked between cycles.
pub struct Poller {
    engine: IndicatorEngine,
    fetcher: Arc<dyn SeriesFetcher>,
    watchlist: Watchlist,
    request: ScanRequest,
    period: Duration,
}

impl Poller {
    /// Create a new poller.
    pub fn new(
        engine: IndicatorEngine,
        fetcher: Arc<dyn SeriesFetcher>,
        watchlist: Watchlist,
        request: ScanRequest,
        period: Duration,
    ) -> Self {
        Self {
            engine,
            fetcher,
            watchlist,
            request,
            period,
        }
    }

    /// Run until `stop` turns true or its sender is dropped.
    ///
    /// Returns the number of completed cycles.
    pub async fn run(
        self,
        reports: watch::Sender<Option<CycleReport>>,
        mut stop: watch::Receiver<bool>,
    ) -> usize {
        let mut ticker = time::interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            source = self.fetcher.name(),
            tickers = self.watchlist.len(),
            period_secs = self.period.as_secs(),
            "Poller started"
        );

        let mut cycles = 0usize;
        loop {
            if *stop.borrow() {
                break;
            }

            tokio::select! {
                biased;
                changed = stop.changed() => {
                    if changed.is_err() {
                        debug!("Stop sender dropped");
                        break;
                    }
                    continue;
                }
                _ = ticker.tick() => {}
            }

            let report = self
                .engine
                .run_cycle(self.fetcher.as_ref(), &self.watchlist, &self.request)
                .await;
            cycles += 1;
            reports.send_replace(Some(report));
        }

        info!(cycles, "Poller stopped");
        cycles
    }
}
