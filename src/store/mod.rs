//! The remote record store.
//!
//! The engine drives the [`RecordStore`] trait; [`HttpRecordStore`] is the
//! production client for the hosted entity API.

mod http;

pub use http::HttpRecordStore;

use async_trait::async_trait;

use crate::errors::StoreError;
use crate::models::RemoteRecord;

/// The mutable side of the synchronization: a remote collection of stock
/// records whose prices the engine rewrites. Records are never created or
/// deleted here.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch the full current record snapshot.
    async fn list(&self) -> Result<Vec<RemoteRecord>, StoreError>;

    /// Rewrite one record's price.
    ///
    /// Writes are idempotent - re-applying the same price is harmless,
    /// which is what makes at-least-once delivery safe.
    async fn update_price(&self, id: &str, price: f64) -> Result<(), StoreError>;
}
