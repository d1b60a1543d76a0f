//! Core types and traits for the watchlist scanner.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (Bar, PriceSeries)
//! - Sampling interval and lookback window definitions
//! - The watchlist
//! - Core traits for indicators and series fetchers

pub mod types;
pub mod traits;
pub mod error;

pub use error::{ScannerError, ScannerResult};
pub use types::*;
pub use traits::*;
