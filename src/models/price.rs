use serde::{Deserialize, Serialize};

/// One row of the authoritative price feed.
///
/// The feed does not guarantee ticker uniqueness; when the same normalized
/// ticker appears twice, the last occurrence wins.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SourcePrice {
    /// Raw ticker as published by the feed.
    pub ticker: String,

    /// Price, if the feed row carried a parseable number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

/// A stock record owned by the remote store.
///
/// The engine never creates or deletes these; it only rewrites `price`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RemoteRecord {
    /// Opaque identifier assigned by the remote store.
    pub id: String,

    /// Raw ticker as stored remotely.
    pub ticker: String,

    /// Current remote price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

/// A remote record whose price needs updating in this run.
#[derive(Clone, Debug, PartialEq)]
pub struct Candidate {
    /// Identifier of the record to rewrite.
    pub remote_id: String,

    /// Raw remote ticker, kept for logging.
    pub ticker: String,

    /// The price to write.
    pub new_price: f64,
}
