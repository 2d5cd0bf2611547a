//! The authoritative price feed.
//!
//! The engine only sees the [`PriceFeed`] trait; [`CsvHttpFeed`] is the
//! production implementation reading a published CSV document.

mod csv;

pub use csv::CsvHttpFeed;

use async_trait::async_trait;

use crate::errors::FeedError;
use crate::models::SourcePrice;

/// Source of truth for prices.
///
/// Implementations fetch the full current price table; the engine calls
/// this once per run and never caches across runs.
#[async_trait]
pub trait PriceFeed: Send + Sync {
    /// Fetch the current `(ticker, price)` table.
    async fn fetch_prices(&self) -> Result<Vec<SourcePrice>, FeedError>;
}
