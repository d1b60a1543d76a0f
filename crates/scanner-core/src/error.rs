//! Error types for the scanner.

use thiserror::Error;

/// Errors raised while building scanner inputs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScannerError {
    #[error("Invalid watchlist: {0}")]
    Watchlist(String),
}

/// Series fetcher errors.
///
/// Every variant is recoverable at the cycle level: the ticker is skipped
/// and the rest of the watchlist is still processed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    #[error("No bars returned for {0}")]
    EmptySeries(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Data source error: {0}")]
    Internal(String),
}

impl DataError {
    /// Whether this is the empty-series case rather than a fetch failure.
    pub fn is_empty_series(&self) -> bool {
        matches!(self, DataError::EmptySeries(_))
    }
}

/// Indicator configuration errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndicatorError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Access gate errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AccessError {
    #[error("Access denied")]
    Denied,

    #[error("Access gate is enabled but no password hash is configured")]
    NotConfigured,

    #[error("Malformed password hash: {0}")]
    MalformedHash(String),
}

/// Result type alias for scanner operations.
pub type ScannerResult<T> = Result<T, ScannerError>;
