//! CSV-over-HTTP price feed.
//!
//! Reads a published tabular document (e.g. a spreadsheet exported as CSV)
//! with `Ticker` and `Price` columns. Formatting quirks stay contained
//! here: thousands separators are stripped and unparseable prices become
//! `None` rather than failing the fetch.

use std::time::Duration;

use async_trait::async_trait;
use csv::ReaderBuilder;
use log::debug;
use reqwest::Client;

use super::PriceFeed;
use crate::errors::FeedError;
use crate::models::SourcePrice;

/// Default HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Reads `(ticker, price)` pairs from a CSV document served over HTTP.
pub struct CsvHttpFeed {
    client: Client,
    url: String,
}

impl CsvHttpFeed {
    /// Create a feed reading the document at `url`.
    pub fn new(url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            url: url.into(),
        }
    }

    /// Parse CSV text into source prices.
    ///
    /// The header must contain `Ticker` and `Price` columns (any casing).
    /// Rows without a ticker are dropped; tickers are trimmed and
    /// upper-cased so downstream normalization sees consistent input.
    fn parse(text: &str) -> Result<Vec<SourcePrice>, FeedError> {
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| FeedError::Malformed(e.to_string()))?;
        let ticker_col = headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case("ticker"));
        let price_col = headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case("price"));
        let (ticker_col, price_col) = match (ticker_col, price_col) {
            (Some(ticker), Some(price)) => (ticker, price),
            _ => {
                return Err(FeedError::Malformed(
                    "header must contain Ticker and Price columns".to_string(),
                ))
            }
        };

        let mut prices = Vec::new();
        for row in reader.records() {
            let row = row.map_err(|e| FeedError::Malformed(e.to_string()))?;

            let ticker = row
                .get(ticker_col)
                .map(|t| t.trim().to_ascii_uppercase())
                .unwrap_or_default();
            if ticker.is_empty() {
                continue;
            }

            let price = row
                .get(price_col)
                .map(|p| p.replace(',', ""))
                .filter(|p| !p.trim().is_empty())
                .and_then(|p| p.trim().parse::<f64>().ok());

            prices.push(SourcePrice { ticker, price });
        }

        Ok(prices)
    }
}

#[async_trait]
impl PriceFeed for CsvHttpFeed {
    async fn fetch_prices(&self) -> Result<Vec<SourcePrice>, FeedError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FeedError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FeedError::Unavailable(format!(
                "feed fetch returned HTTP {}",
                response.status()
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| FeedError::Unavailable(e.to_string()))?;

        let prices = Self::parse(&text)?;
        debug!("price feed returned {} rows", prices.len());
        Ok(prices)
    }
}
