//! Yahoo Finance chart API fetcher.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, StatusCode, Url};
use scanner_core::error::DataError;
use scanner_core::traits::SeriesFetcher;
use scanner_core::types::{Bar, Lookback, PriceSeries, Timeframe};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Yahoo Finance client configuration.
#[derive(Debug, Clone)]
pub struct YahooConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com".to_string(),
            timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Chart API response types
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteColumns>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteColumns {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

/// Series fetcher backed by the Yahoo Finance v8 chart endpoint.
pub struct YahooFetcher {
    base_url: Url,
    client: Client,
}

impl YahooFetcher {
    /// Create a new Yahoo fetcher.
    pub fn new(config: YahooConfig) -> Result<Self, DataError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| DataError::Internal(format!("Invalid base URL {}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(DataError::Internal(format!(
                "Base URL cannot carry a path: {}",
                config.base_url
            )));
        }

        let client = Client::builder()
            .user_agent(config.user_agent)
            .timeout(config.timeout)
            .build()
            .map_err(|e| DataError::Connection(e.to_string()))?;

        Ok(Self { base_url, client })
    }

    /// Interval code understood by the chart endpoint.
    fn interval_code(interval: Timeframe) -> &'static str {
        match interval {
            Timeframe::Minute1 => "1m",
            Timeframe::Minute5 => "5m",
            Timeframe::Minute15 => "15m",
            Timeframe::Minute30 => "30m",
            Timeframe::Hour1 => "60m",
            Timeframe::Daily => "1d",
            Timeframe::Weekly => "1wk",
            Timeframe::Monthly => "1mo",
        }
    }

    /// Chart endpoint for a symbol. The symbol is percent-encoded as a
    /// single path segment.
    fn chart_url(&self, symbol: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["v8", "finance", "chart", symbol]);
        }
        url
    }
}

/// Convert a chart response into a series.
///
/// Rows without a close are dropped. Missing open/high/low fall back to the
/// close and a missing volume to zero.
fn parse_chart(
    symbol: &str,
    interval: Timeframe,
    response: ChartResponse,
) -> Result<PriceSeries, DataError> {
    if let Some(error) = response.chart.error {
        if error.code.eq_ignore_ascii_case("Not Found") {
            warn!(symbol, "Symbol not found, treating as empty series");
            return Ok(PriceSeries::new(symbol, interval));
        }
        return Err(DataError::Internal(format!(
            "{}: {}",
            error.code,
            error.description.unwrap_or_default()
        )));
    }

    let Some(result) = response.chart.result.and_then(|r| r.into_iter().next()) else {
        return Ok(PriceSeries::new(symbol, interval));
    };

    let timestamps = result.timestamp.unwrap_or_default();
    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();

    let mut skipped = 0usize;
    let mut bars = Vec::with_capacity(timestamps.len());
    for (i, &ts) in timestamps.iter().enumerate() {
        let Some(close) = quote.close.get(i).copied().flatten() else {
            skipped += 1;
            continue;
        };
        let column = |values: &[Option<f64>]| values.get(i).copied().flatten();

        bars.push(Bar::new(
            ts * 1000,
            column(quote.open.as_slice()).unwrap_or(close),
            column(quote.high.as_slice()).unwrap_or(close),
            column(quote.low.as_slice()).unwrap_or(close),
            close,
            column(quote.volume.as_slice()).unwrap_or(0.0),
        ));
    }

    if skipped > 0 {
        debug!(symbol, skipped, total = timestamps.len(), "Skipped rows without a close");
    }

    Ok(PriceSeries::from_bars(symbol, interval, bars))
}

#[async_trait]
impl SeriesFetcher for YahooFetcher {
    #[instrument(skip(self, lookback, interval), fields(lookback = %lookback, interval = %interval))]
    async fn fetch(
        &self,
        symbol: &str,
        lookback: Lookback,
        interval: Timeframe,
    ) -> Result<PriceSeries, DataError> {
        let period2 = Utc::now().timestamp();
        let period1 = period2.saturating_sub(lookback.as_secs() as i64).max(0);

        let url = self.chart_url(symbol);
        debug!(url = %url, "Requesting chart");

        let resp = self
            .client
            .get(url)
            .query(&[
                ("interval", Self::interval_code(interval).to_string()),
                ("period1", period1.to_string()),
                ("period2", period2.to_string()),
                ("includePrePost", "false".to_string()),
            ])
            .send()
            .await
            .map_err(|e| DataError::Connection(e.to_string()))?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            warn!(symbol, "Chart endpoint returned 404, treating as empty series");
            return Ok(PriceSeries::new(symbol, interval));
        }
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(DataError::Http {
                status: status.as_u16(),
                message: text,
            });
        }

        let body: ChartResponse = resp
            .json()
            .await
            .map_err(|e| DataError::Parse(e.to_string()))?;

        let series = parse_chart(symbol, interval, body)?;
        debug!(bars = series.len(), "Fetched chart");
        Ok(series)
    }

    fn name(&self) -> &str {
        "yahoo"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    fn parse(json: &str) -> Result<PriceSeries, DataError> {
        let response: ChartResponse = serde_json::from_str(json).unwrap();
        parse_chart("AAPL", Timeframe::Minute5, response)
    }

    #[test]
    fn test_parse_chart() {
        let series = parse(
            r#"{"chart":{"result":[{
                "meta":{"symbol":"AAPL"},
                "timestamp":[1700000300,1700000000,1700000600],
                "indicators":{"quote":[{
                    "open":[1.5,1.0,null],
                    "high":[2.5,2.0,3.5],
                    "low":[0.5,0.25,2.5],
                    "close":[2.0,1.5,null],
                    "volume":[200,100,300]
                }]}
            }],"error":null}}"#,
        )
        .unwrap();

        assert_eq!(series.symbol, "AAPL");
        assert_eq!(series.len(), 2);
        assert_eq!(series.closes(), vec![1.5, 2.0]);
        assert_eq!(series.bars()[0].timestamp, 1_700_000_000_000);
        assert!((series.bars()[1].volume - 200.0).abs() < 1e-12);
    }

    #[test]
    fn test_parse_chart_not_found_is_empty() {
        let series = parse(
            r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#,
        )
        .unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn test_parse_chart_other_error() {
        let err = parse(r#"{"chart":{"result":null,"error":{"code":"Bad Request","description":"Invalid input"}}}"#)
            .unwrap_err();
        assert!(matches!(err, DataError::Internal(_)));
    }

    #[test]
    fn test_parse_chart_without_timestamps() {
        let series = parse(
            r#"{"chart":{"result":[{"meta":{},"indicators":{"quote":[{}]}}],"error":null}}"#,
        )
        .unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn test_interval_codes() {
        assert_eq!(YahooFetcher::interval_code(Timeframe::Minute5), "5m");
        assert_eq!(YahooFetcher::interval_code(Timeframe::Hour1), "60m");
        assert_eq!(YahooFetcher::interval_code(Timeframe::Weekly), "1wk");
    }

    #[test]
    fn test_chart_url() {
        let fetcher = YahooFetcher::new(YahooConfig {
            base_url: "http://localhost:8080/".to_string(),
            ..YahooConfig::default()
        })
        .unwrap();
        assert_eq!(
            fetcher.chart_url("MSFT").as_str(),
            "http://localhost:8080/v8/finance/chart/MSFT"
        );
    }

    #[test]
    fn test_chart_url_encodes_symbol() {
        let fetcher = YahooFetcher::new(YahooConfig {
            base_url: "http://localhost:8080/api".to_string(),
            ..YahooConfig::default()
        })
        .unwrap();
        assert_eq!(
            fetcher.chart_url("A/B").as_str(),
            "http://localhost:8080/api/v8/finance/chart/A%2FB"
        );
        assert_eq!(
            fetcher.chart_url("../x").path(),
            "/api/v8/finance/chart/..%2Fx"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        for base_url in ["not a url", "mailto:someone@example.com"] {
            let result = YahooFetcher::new(YahooConfig {
                base_url: base_url.to_string(),
                ..YahooConfig::default()
            });
            assert!(matches!(result, Err(DataError::Internal(_))));
        }
    }

    /// Serve one canned HTTP response on a local port. Yields the base URL
    /// and a receiver for the request head.
    async fn serve_once(status: &str, body: &str) -> (String, oneshot::Receiver<String>) {
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (head_tx, head_rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let _ = head_tx.send(String::from_utf8_lossy(&request).into_owned());
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });

        (format!("http://{}", addr), head_rx)
    }

    fn local_fetcher(base_url: String) -> YahooFetcher {
        let mut fetcher = YahooFetcher::new(YahooConfig {
            base_url,
            timeout: Duration::from_secs(5),
            ..YahooConfig::default()
        })
        .unwrap();
        // Local test servers must not go through an environment proxy
        fetcher.client = Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        fetcher
    }

    #[tokio::test]
    async fn test_fetch_ok() {
        let body = r#"{"chart":{"result":[{
            "timestamp":[1700000000,1700000300],
            "indicators":{"quote":[{"close":[10.0,10.5]}]}
        }],"error":null}}"#;
        let (base_url, head) = serve_once("200 OK", body).await;

        let series = local_fetcher(base_url)
            .fetch("MSFT", Lookback::days(2), Timeframe::Minute15)
            .await
            .unwrap();

        assert_eq!(series.closes(), vec![10.0, 10.5]);
        assert_eq!(series.timeframe, Timeframe::Minute15);

        let head = head.await.unwrap();
        assert!(head.starts_with("GET /v8/finance/chart/MSFT?"));
        assert!(head.contains("interval=15m"));
        assert!(head.contains("period1="));
        assert!(head.contains("period2="));
    }

    #[tokio::test]
    async fn test_fetch_404_is_empty_series() {
        let (base_url, _head) = serve_once("404 Not Found", "").await;

        let series = local_fetcher(base_url)
            .fetch("ZZZZ", Lookback::days(5), Timeframe::Minute5)
            .await
            .unwrap();

        assert!(series.is_empty());
        assert_eq!(series.symbol, "ZZZZ");
    }

    #[tokio::test]
    async fn test_fetch_server_error_is_http_error() {
        let (base_url, _head) = serve_once("500 Internal Server Error", "boom").await;

        let err = local_fetcher(base_url)
            .fetch("AAPL", Lookback::days(5), Timeframe::Minute5)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            DataError::Http {
                status: 500,
                message: "boom".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_fetch_bad_json_is_parse_error() {
        let (base_url, _head) = serve_once("200 OK", "{not json").await;

        let err = local_fetcher(base_url)
            .fetch("AAPL", Lookback::days(5), Timeframe::Minute5)
            .await
            .unwrap_err();

        assert!(matches!(err, DataError::Parse(_)));
    }

    #[tokio::test]
    async fn test_fetch_closed_port_is_connection_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = local_fetcher(format!("http://{}", addr))
            .fetch("AAPL", Lookback::days(5), Timeframe::Minute5)
            .await
            .unwrap_err();

        assert!(matches!(err, DataError::Connection(_)));
    }

    #[tokio::test]
    async fn test_fetch_huge_lookback_does_not_overflow() {
        let body = r#"{"chart":{"result":[],"error":null}}"#;
        let (base_url, head) = serve_once("200 OK", body).await;

        let series = local_fetcher(base_url)
            .fetch("AAPL", Lookback::days(u64::MAX), Timeframe::Daily)
            .await
            .unwrap();

        assert!(series.is_empty());
        assert!(head.await.unwrap().contains("period1=0&"));
    }
}
