//! Watchlist of ticker symbols.

use serde::{Deserialize, Serialize};

use crate::error::{ScannerError, ScannerResult};

/// Fixed, ordered set of ticker symbols.
///
/// Symbols are trimmed and upper-cased. Duplicates keep their first position.
/// Only ASCII letters, digits and `.-^=_` are accepted, so a symbol is always
/// safe as a URL path segment or a file name. The list cannot be modified
/// once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Watchlist {
    symbols: Vec<String>,
}

impl Watchlist {
    /// Build a watchlist from raw symbols.
    pub fn new<I, S>(symbols: I) -> ScannerResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for raw in symbols {
            let symbol = raw.as_ref().trim().to_uppercase();
            if symbol.is_empty() {
                return Err(ScannerError::Watchlist("blank symbol".to_string()));
            }
            if !symbol.chars().all(is_symbol_char) {
                return Err(ScannerError::Watchlist(format!(
                    "invalid character in symbol: {}",
                    symbol
                )));
            }
            if !normalized.contains(&symbol) {
                normalized.push(symbol);
            }
        }

        if normalized.is_empty() {
            return Err(ScannerError::Watchlist("no symbols".to_string()));
        }

        Ok(Self {
            symbols: normalized,
        })
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(String::as_str)
    }
}

fn is_symbol_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '=' | '_')
}

impl Default for Watchlist {
    fn default() -> Self {
        Self {
            symbols: vec!["AAPL".to_string(), "MSFT".to_string(), "GOOG".to_string()],
        }
    }
}

impl TryFrom<Vec<String>> for Watchlist {
    type Error = ScannerError;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Watchlist> for Vec<String> {
    fn from(value: Watchlist) -> Self {
        value.symbols
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_watchlist() {
        let watchlist = Watchlist::default();
        assert_eq!(watchlist.symbols(), ["AAPL", "MSFT", "GOOG"]);
    }

    #[test]
    fn test_normalization() {
        let watchlist =
            Watchlist::new([" aapl", "MSFT ", "Aapl", "brk.b", "^gspc", "eurusd=x"]).unwrap();
        assert_eq!(
            watchlist.symbols(),
            ["AAPL", "MSFT", "BRK.B", "^GSPC", "EURUSD=X"]
        );
        assert_eq!(watchlist.len(), 5);
    }

    #[test]
    fn test_rejects_invalid() {
        assert!(Watchlist::new(Vec::<String>::new()).is_err());
        assert!(Watchlist::new(["AAPL", "  "]).is_err());
        assert!(Watchlist::new(["BRK B"]).is_err());
    }

    #[test]
    fn test_rejects_path_characters() {
        for symbol in ["A/B", "../etc/passwd", "C:\\X", "A?B", "A#B", "A%2F"] {
            assert!(
                matches!(Watchlist::new([symbol]), Err(ScannerError::Watchlist(_))),
                "{symbol} should be rejected"
            );
        }
    }

    #[test]
    fn test_serde_roundtrip_validates() {
        let parsed: Watchlist = serde_json::from_str(r#"["tsla", "nvda"]"#).unwrap();
        assert_eq!(parsed.symbols(), ["TSLA", "NVDA"]);
        assert!(serde_json::from_str::<Watchlist>("[]").is_err());
    }
}
