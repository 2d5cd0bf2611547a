use serde::{Deserialize, Serialize};

/// Per-reason counts for remote records that were not updated by the diff.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakdown {
    /// Remote ticker empty, absent from the feed, or excluded by the
    /// caller's allow list.
    pub not_found: usize,

    /// Feed carried no usable price for the ticker.
    pub null_price: usize,

    /// Remote price already within tolerance of the feed price.
    pub unchanged: usize,
}

impl Breakdown {
    /// Total records the diff skipped.
    pub fn total(&self) -> usize {
        self.not_found + self.null_price + self.unchanged
    }
}

/// First few raw tickers per skip reason, for debugging a run's report
/// without re-running the diff.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipSamples {
    pub not_found: Vec<String>,
    pub null_price: Vec<String>,
    pub unchanged: Vec<String>,
}

/// Outcome of one synchronization invocation.
///
/// The sole output of a run. Never persisted - callers resume from
/// `next_offset` and reschedule while `done` is false.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SyncReport {
    /// Writes applied (or simulated, for dry runs).
    pub updated: usize,

    /// Remote records not updated this run.
    pub skipped: usize,

    /// Why records were skipped during diffing.
    pub breakdown: Breakdown,

    /// Sample tickers per skip reason.
    pub sample: SkipSamples,

    /// Offset the next invocation should resume from.
    pub next_offset: usize,

    /// True when no candidates remain past `next_offset`.
    pub done: bool,
}
