//! Bounded window selection over the candidate list.

use log::warn;

use crate::errors::SyncError;
use crate::models::Candidate;

/// Hard cap on candidates per invocation, protecting the execution-time
/// budget.
pub const MAX_WINDOW_LIMIT: usize = 150;

/// One invocation's slice of the candidate list.
#[derive(Clone, Debug, PartialEq)]
pub struct Window<'a> {
    /// Candidates to process this invocation.
    pub candidates: &'a [Candidate],

    /// Offset the next invocation should resume from.
    pub next_offset: usize,

    /// True when nothing remains past `next_offset`.
    pub done: bool,
}

/// Slice `candidates` into the `[offset, offset + limit)` window.
///
/// A `limit` of zero is a validation failure; limits above
/// [`MAX_WINDOW_LIMIT`] are clamped rather than rejected. An offset past
/// the end yields an empty window with `done = true` - a terminal,
/// successful no-op, not an error.
pub fn select(
    candidates: &[Candidate],
    offset: usize,
    limit: usize,
) -> Result<Window<'_>, SyncError> {
    if limit < 1 {
        return Err(SyncError::InvalidWindow(format!(
            "limit must be at least 1, got {limit}"
        )));
    }

    let limit = if limit > MAX_WINDOW_LIMIT {
        warn!("window limit {} clamped to {}", limit, MAX_WINDOW_LIMIT);
        MAX_WINDOW_LIMIT
    } else {
        limit
    };

    let start = offset.min(candidates.len());
    let next_offset = offset.saturating_add(limit).min(candidates.len());

    Ok(Window {
        candidates: &candidates[start..next_offset],
        next_offset,
        done: next_offset >= candidates.len(),
    })
}
