//! Batch synchronization engine.
//!
//! One invocation is a bounded batch: diff the feed against the remote
//! snapshot, slice a window of candidates, fan the writes out under the
//! shared rate gate, and return a report with enough state for the caller
//! to resume. The engine is stateless between invocations by design - all
//! progress travels in the [`SyncReport`].

pub mod config;
pub mod diff;
pub mod pool;
pub mod window;

mod executor;
mod rate_limiter;

pub use config::{RetryPolicy, SyncConfig};
pub use diff::DiffOutcome;
pub use executor::WriteExecutor;
pub use rate_limiter::RateGate;
pub use window::MAX_WINDOW_LIMIT;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use chrono::Timelike;
use log::{error, info};

use crate::errors::SyncError;
use crate::feed::PriceFeed;
use crate::models::{Candidate, Segment, SyncReport};
use crate::scheduler;
use crate::store::RecordStore;

/// Parameters for one synchronization invocation.
#[derive(Clone, Debug)]
pub struct SyncRequest {
    /// First candidate to process.
    pub offset: usize,

    /// Candidates to process this invocation, capped at
    /// [`MAX_WINDOW_LIMIT`].
    pub limit: usize,

    /// Diff and window as usual, but simulate the writes.
    pub dry_run: bool,

    /// Update matching records even when within tolerance.
    pub force: bool,

    /// When set, only these normalized tickers are considered.
    pub allow: Option<HashSet<String>>,

    /// Hard wall-clock deadline for this invocation, when the host
    /// imposes one. Admission of new writes stops a safety margin before
    /// it.
    pub deadline: Option<Instant>,
}

impl Default for SyncRequest {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: MAX_WINDOW_LIMIT,
            dry_run: false,
            force: false,
            allow: None,
            deadline: None,
        }
    }
}

impl SyncRequest {
    /// Request for the window starting at `offset`.
    pub fn window(offset: usize, limit: usize) -> Self {
        Self {
            offset,
            limit,
            ..Self::default()
        }
    }
}

/// The batch synchronization engine.
///
/// Ties the collaborators together: the feed is the source of truth, the
/// store is the mutable side, and one shared [`RateGate`] paces every
/// writer. Concurrent runs are not mutually excluded here - when
/// at-most-one-run matters, the scheduling layer provides it.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use pricesync::{CsvHttpFeed, HttpRecordStore, SyncConfig, SyncEngine, SyncRequest};
///
/// let engine = SyncEngine::new(
///     Arc::new(CsvHttpFeed::new(csv_url)),
///     Arc::new(HttpRecordStore::new(store_url, api_key)),
///     SyncConfig::default(),
/// );
/// let report = engine.synchronize(SyncRequest::default()).await?;
/// ```
pub struct SyncEngine {
    feed: Arc<dyn PriceFeed>,
    store: Arc<dyn RecordStore>,
    config: SyncConfig,
    gate: Arc<RateGate>,
}

impl SyncEngine {
    /// Create an engine over the given collaborators.
    pub fn new(
        feed: Arc<dyn PriceFeed>,
        store: Arc<dyn RecordStore>,
        config: SyncConfig,
    ) -> Self {
        let gate = Arc::new(RateGate::new(config.requests_per_second));
        Self {
            feed,
            store,
            config,
            gate,
        }
    }

    /// The engine's configuration.
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Run one bounded synchronization pass.
    ///
    /// Feed, listing and window-validation failures abort the run; write
    /// failures are counted and logged, never fatal. The returned report
    /// carries `next_offset`/`done` so the caller decides whether and when
    /// to continue.
    pub async fn synchronize(&self, request: SyncRequest) -> Result<SyncReport, SyncError> {
        let sources = self.feed.fetch_prices().await?;
        let remote = self.store.list().await.map_err(SyncError::RemoteList)?;

        let outcome = diff::diff(
            &sources,
            &remote,
            request.allow.as_ref(),
            self.config.tolerance,
            request.force,
        );

        let selected = window::select(&outcome.candidates, request.offset, request.limit)?;
        info!(
            "sync window [{}..{}) of {} candidates ({} remote records, dry_run={})",
            request.offset,
            selected.next_offset,
            outcome.candidates.len(),
            remote.len(),
            request.dry_run
        );

        let (updated, admitted) = if request.dry_run {
            (selected.candidates.len(), selected.candidates.len())
        } else {
            self.apply(selected.candidates, request.deadline).await
        };

        // A deadline can stop admission mid-window; resume exactly where
        // admission stopped.
        let all_admitted = admitted == selected.candidates.len();
        let (next_offset, done) = if all_admitted {
            (selected.next_offset, selected.done)
        } else {
            (request.offset + admitted, false)
        };

        info!(
            "sync pass updated {}/{} admitted candidates (next_offset={}, done={})",
            updated, admitted, next_offset, done
        );

        Ok(SyncReport {
            updated,
            skipped: remote.len().saturating_sub(updated),
            breakdown: outcome.breakdown,
            sample: outcome.samples,
            next_offset,
            done,
        })
    }

    /// Segment an unattended periodic invocation should process at `now`,
    /// using the configured chunk shape.
    pub fn segment<T: Timelike>(&self, now: &T, approx_total: usize) -> Segment {
        scheduler::segment_for(
            now,
            approx_total,
            self.config.chunk_size,
            self.config.chunks_per_run,
        )
    }

    /// Fan the window's writes out through the pool.
    async fn apply(&self, candidates: &[Candidate], deadline: Option<Instant>) -> (usize, usize) {
        let executor = WriteExecutor::new(Arc::clone(&self.gate), self.config.retry.clone());
        let margin = self.config.deadline_margin;

        let admit = move || match deadline {
            Some(deadline) => Instant::now() + margin < deadline,
            None => true,
        };

        pool::run_until(
            candidates.to_vec(),
            |candidate| {
                let executor = executor.clone();
                let store = Arc::clone(&self.store);
                async move {
                    let result = executor
                        .execute(|| store.update_price(&candidate.remote_id, candidate.new_price))
                        .await;
                    match result {
                        Ok(()) => true,
                        Err(err) => {
                            error!(
                                "update failed for {} (id {}): {}",
                                candidate.ticker, candidate.remote_id, err
                            );
                            false
                        }
                    }
                }
            },
            self.config.concurrency,
            admit,
        )
        .await
    }
}
