//! Dashboard command implementation.

use anyhow::{Context, Result};
use scanner_config::AppConfig;
use scanner_engine::{IndicatorEngine, Poller};
use scanner_monitor::{Dashboard, DashboardState};
use tokio::sync::watch;
use tracing::info;

use crate::cli::DashboardArgs;

pub async fn run(args: DashboardArgs, mut config: AppConfig) -> Result<()> {
    args.watch.apply(&mut config)?;
    if let Some(period) = args.period {
        config.scan.poll_period_secs = period;
    }
    super::ensure_valid(&config)?;
    super::check_access(&config.auth, &config.app)?;

    let engine = IndicatorEngine::new(&config.indicators)?;
    let fetcher = super::build_fetcher(&config)?;

    let template = DashboardState {
        trader: config.app.trader_name().to_string(),
        source: fetcher.name().to_string(),
        tickers: config.watchlist.len(),
        period_secs: config.scan.poll_period_secs,
        report: None,
    };

    info!(
        symbols = ?config.watchlist.symbols(),
        interval = %config.scan.interval,
        lookback = %config.scan.lookback,
        "Starting dashboard"
    );

    let (report_tx, report_rx) = watch::channel(None);
    let (stop_tx, stop_rx) = watch::channel(false);

    let poller = Poller::new(
        engine,
        fetcher,
        config.watchlist.clone(),
        config.scan.request(),
        config.scan.poll_period(),
    );
    let poller_handle = tokio::spawn(poller.run(report_tx, stop_rx));

    let refresh_ms = args.refresh_ms;
    let ui_result = tokio::task::spawn_blocking(move || {
        Dashboard::new(refresh_ms).run(|| DashboardState {
            report: report_rx.borrow().clone(),
            ..template.clone()
        })
    })
    .await
    .context("Dashboard task failed")?;

    // A cycle in flight finishes before the poller observes the stop
    stop_tx.send_replace(true);
    let cycles = poller_handle.await.context("Poller task failed")?;
    info!(cycles, "Dashboard closed");

    ui_result.context("Terminal error")
}
