//! Error types and retry classification for the synchronization engine.
//!
//! This module provides:
//! - [`FeedError`]: failures reading the authoritative price feed
//! - [`StoreError`]: failures talking to the remote record store
//! - [`SyncError`]: failures that abort an entire synchronization run
//! - [`RetryClass`]: classification for determining retry behavior

mod retry;

pub use retry::RetryClass;

use std::time::Duration;

use thiserror::Error;

/// Errors reading the authoritative price feed.
///
/// Any feed error is fatal for the whole run: no partial diff is attempted
/// against a source of truth that could not be read.
#[derive(Error, Debug)]
pub enum FeedError {
    /// The feed document could not be retrieved.
    #[error("feed unavailable: {0}")]
    Unavailable(String),

    /// The feed was retrieved but is not usable, e.g. the header is
    /// missing a required column.
    #[error("feed malformed: {0}")]
    Malformed(String),
}

/// Errors from the remote record store.
///
/// Each variant is classified into a [`RetryClass`] via the
/// [`retry_class`](Self::retry_class) method, which determines whether the
/// write executor retries the call.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store rate limited the request (HTTP 429).
    /// Should retry, honoring `retry_after` when the store supplies one.
    #[error("rate limited by remote store")]
    RateLimited {
        /// Advisory wait supplied by the store, when present.
        retry_after: Option<Duration>,
    },

    /// Server-side transient failure (HTTP 5xx).
    /// Should retry with exponential backoff.
    #[error("remote store server error {status}: {body}")]
    Server {
        /// HTTP status code returned by the store.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// The store rejected the request (other 4xx).
    /// This is a terminal error for the write - retrying won't help.
    #[error("remote store rejected request ({status}): {body}")]
    Rejected {
        /// HTTP status code returned by the store.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// The request never produced an HTTP response (connect failure,
    /// timeout, protocol error).
    #[error("transport error: {0}")]
    Transport(String),
}

impl StoreError {
    /// Returns the retry classification for this error.
    ///
    /// Only failure classes expected to succeed on a later attempt are
    /// [`RetryClass::WithBackoff`]; everything else fails immediately.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricesync::errors::{RetryClass, StoreError};
    ///
    /// let error = StoreError::RateLimited { retry_after: None };
    /// assert_eq!(error.retry_class(), RetryClass::WithBackoff);
    ///
    /// let error = StoreError::Rejected { status: 400, body: String::new() };
    /// assert_eq!(error.retry_class(), RetryClass::Never);
    /// ```
    pub fn retry_class(&self) -> RetryClass {
        match self {
            // Transient - the store may recover before the next attempt
            Self::RateLimited { .. } | Self::Server { .. } | Self::Transport(_) => {
                RetryClass::WithBackoff
            }

            // Terminal - the request itself is bad
            Self::Rejected { .. } => RetryClass::Never,
        }
    }

    /// Advisory retry delay supplied by the store, when present.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after } => *retry_after,
            _ => None,
        }
    }
}

/// Errors that abort an entire synchronization run.
///
/// Individual write failures are deliberately absent: the pool isolates
/// them, sibling writes continue, and the run still returns a report.
#[derive(Error, Debug)]
pub enum SyncError {
    /// The price feed could not be read.
    #[error("price feed failed: {0}")]
    Feed(#[from] FeedError),

    /// Listing the remote store failed.
    #[error("remote store listing failed: {0}")]
    RemoteList(#[source] StoreError),

    /// Window parameters failed validation. Surfaced before any write is
    /// attempted.
    #[error("invalid window: {0}")]
    InvalidWindow(String),
}
