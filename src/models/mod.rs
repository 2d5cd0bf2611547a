//! Data model for a synchronization run.
//!
//! [`SourcePrice`] and [`RemoteRecord`] are fetched fresh each run; the
//! remaining types are computation artifacts of a single run, created and
//! discarded within it. Nothing here has cross-run identity except
//! [`RemoteRecord::id`], which is owned and assigned by the remote store.

mod price;
mod report;
mod segment;

pub use price::{Candidate, RemoteRecord, SourcePrice};
pub use report::{Breakdown, SkipSamples, SyncReport};
pub use segment::Segment;
