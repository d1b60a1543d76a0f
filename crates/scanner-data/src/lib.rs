//! Price series fetchers for the watchlist scanner.

mod csv_source;
mod yahoo;

pub use csv_source::CsvDirectoryFetcher;
pub use yahoo::{YahooConfig, YahooFetcher};
