//! Canonical ticker resolution.
//!
//! The feed and the remote store decorate tickers differently
//! ("NASDAQ:AAPL", "AAPL.US", "aapl"). [`normalize`] produces the canonical
//! form both sides are joined on - equality of normalized tickers, not raw
//! strings, determines a match.

mod ticker;

pub use ticker::normalize;
