//! Technical indicators for the watchlist scanner.
//!
//! This crate provides the indicators the scanner evaluates on closing prices:
//! - Moving averages (SMA with a full-window requirement, recursive EMA)
//! - Momentum (RSI over simple averages of gains and losses)
//!
//! Every indicator returns a series aligned with its input. Positions without
//! enough history are `None` rather than NaN.

pub mod momentum;
pub mod moving_average;

pub use momentum::Rsi;
pub use moving_average::{Ema, Sma};
