//! Single-cycle scan command implementation.

use anyhow::Result;
use scanner_config::AppConfig;
use scanner_engine::IndicatorEngine;
use tracing::info;

use crate::cli::{OutputFormat, ScanArgs};

pub async fn run(args: ScanArgs, mut config: AppConfig) -> Result<()> {
    args.watch.apply(&mut config)?;
    super::ensure_valid(&config)?;
    super::check_access(&config.auth, &config.app)?;

    let engine = IndicatorEngine::new(&config.indicators)?;
    let fetcher = super::build_fetcher(&config)?;

    info!(source = fetcher.name(), tickers = config.watchlist.len(), "Running scan");
    let report = engine
        .run_cycle(fetcher.as_ref(), &config.watchlist, &config.scan.request())
        .await;

    match args.output {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Text => print!("{}", report.to_text()),
    }

    Ok(())
}
