//! Series fetcher trait definitions.

use crate::error::DataError;
use crate::types::{Lookback, PriceSeries, Timeframe};
use async_trait::async_trait;

/// Trait for sources of recent price history.
#[async_trait]
pub trait SeriesFetcher: Send + Sync {
    /// Fetch the bars of one symbol.
    ///
    /// # Arguments
    /// * `symbol` - The symbol to fetch
    /// * `lookback` - How far back from now the series should reach
    /// * `interval` - The sampling interval of the bars
    ///
    /// # Returns
    /// A series ordered from oldest to newest. Unknown or delisted symbols
    /// produce an empty series, not an error.
    async fn fetch(
        &self,
        symbol: &str,
        lookback: Lookback,
        interval: Timeframe,
    ) -> Result<PriceSeries, DataError>;

    /// Get the data source name.
    fn name(&self) -> &str;
}
