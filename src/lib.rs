//! Pricesync - batch price synchronization engine.
//!
//! Keeps a remote store of stock records eventually consistent with an
//! external, authoritative CSV price feed, despite the store's per-request
//! rate limits, occasional server failures, and hard execution-time limits
//! on each invocation.
//!
//! # Overview
//!
//! The model is batch and cold-pull: one invocation fetches both sides
//! fresh, diffs them, and applies a bounded window of writes. Delivery is
//! at-least-once over idempotent writes; consistency with the store is
//! eventual and convergent.
//!
//! # Architecture
//!
//! ```text
//! +-----------+      +-------------+      +-----------------+
//! | PriceFeed |----->| Diff Engine |----->| Window Selector |
//! +-----------+      +-------------+      +-----------------+
//!                           ^                      |
//!                           | snapshot             v
//!                    +-------------+      +-----------------+
//!                    | RecordStore |<-----| Concurrency Pool|
//!                    +-------------+      |  WriteExecutor  |
//!                                         |   + RateGate    |
//!                                         +-----------------+
//! ```
//!
//! The engine is stateless between invocations: progress travels in the
//! [`SyncReport`] (`next_offset`, `done`), and unattended periodic callers
//! derive their window parameters from wall-clock time via
//! [`scheduler::segment_for`] - no cursor is ever persisted, so missed or
//! duplicated invocations self-correct at the next time boundary.
//!
//! # Core Types
//!
//! - [`SyncEngine`] / [`SyncRequest`] - one bounded synchronization pass
//! - [`SyncReport`] - counts, skip breakdown, and resume state
//! - [`Segment`] - time-derived slice of the record space
//! - [`PriceFeed`] / [`RecordStore`] - the external collaborators
//! - [`SyncConfig`] / [`RetryPolicy`] - every tunable as explicit data

pub mod engine;
pub mod errors;
pub mod feed;
pub mod models;
pub mod resolver;
pub mod scheduler;
pub mod store;

// Re-export the engine surface
pub use engine::{
    DiffOutcome, RateGate, RetryPolicy, SyncConfig, SyncEngine, SyncRequest, WriteExecutor,
    MAX_WINDOW_LIMIT,
};

// Re-export errors
pub use errors::{FeedError, RetryClass, StoreError, SyncError};

// Re-export collaborators
pub use feed::{CsvHttpFeed, PriceFeed};
pub use store::{HttpRecordStore, RecordStore};

// Re-export models
pub use models::{
    Breakdown, Candidate, RemoteRecord, Segment, SkipSamples, SourcePrice, SyncReport,
};

// Re-export the scheduler entry point
pub use scheduler::segment_for;
