//! Core traits for the scanner.

mod fetcher;
mod indicator;

pub use fetcher::SeriesFetcher;
pub use indicator::Indicator;
