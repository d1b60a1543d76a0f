//! Core data types for the scanner.

mod ohlcv;
mod timeframe;
mod watchlist;

pub use ohlcv::{Bar, PriceSeries};
pub use timeframe::{Lookback, Timeframe};
pub use watchlist::Watchlist;
