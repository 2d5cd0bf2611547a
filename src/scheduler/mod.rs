//! Segmented time scheduling for unattended invocations.
//!
//! A periodic trigger has no persisted cursor: each invocation recomputes
//! its slice of the record space purely from the wall clock. Quarter-hour
//! slots walk the segments round-robin, so repeated invocations sweep the
//! whole space and a missed invocation is simply picked up on the next
//! sweep. The only correctness requirement is that `approx_total`,
//! `chunk_size` and `chunks_per_run` stay stable across invocations.

use chrono::Timelike;

use crate::models::Segment;

/// Pick the processing segment for an unattended invocation at `now`.
///
/// `approx_total` is a rough upper bound on the remote record count; it
/// only needs to be stable, not exact, for a sweep to cover every record.
/// `chunk_size` and `chunks_per_run` shape the per-invocation workload and
/// are clamped to a minimum of 1.
///
/// Pure function of the passed clock - calling it twice with the same
/// inputs yields the same segment.
pub fn segment_for<T: Timelike>(
    now: &T,
    approx_total: usize,
    chunk_size: usize,
    chunks_per_run: usize,
) -> Segment {
    let chunk_size = chunk_size.max(1);
    let chunks_per_run = chunks_per_run.max(1);
    let segment_size = chunk_size * chunks_per_run;

    let seg_count = ((approx_total + segment_size - 1) / segment_size).max(1);

    let slot = (now.minute() / 15) as usize;
    let index = ((now.hour() as usize) * 4 + slot) % seg_count;

    Segment {
        index,
        offset: index * segment_size,
        size: segment_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashSet;

    use chrono::NaiveTime;

    fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).expect("valid time")
    }

    #[test]
    fn test_deterministic_for_identical_inputs() {
        let now = at(16, 32);
        let first = segment_for(&now, 1_234, 150, 2);
        let second = segment_for(&now, 1_234, 150, 2);
        assert_eq!(first, second);
    }

    #[test]
    fn test_segment_shape() {
        // 1234 records in 300-record segments -> 5 segments.
        let segment = segment_for(&at(0, 0), 1_234, 150, 2);
        assert_eq!(segment.index, 0);
        assert_eq!(segment.offset, 0);
        assert_eq!(segment.size, 300);

        let segment = segment_for(&at(0, 47), 1_234, 150, 2);
        assert_eq!(segment.index, 3);
        assert_eq!(segment.offset, 900);
    }

    #[test]
    fn test_quarter_hour_slots_advance_the_index() {
        let base = segment_for(&at(9, 0), 10_000, 150, 2);
        let next = segment_for(&at(9, 15), 10_000, 150, 2);
        assert_eq!(next.index, base.index + 1);

        // Minutes within a slot do not move the segment.
        assert_eq!(
            segment_for(&at(9, 0), 10_000, 150, 2),
            segment_for(&at(9, 14), 10_000, 150, 2)
        );
    }

    #[test]
    fn test_full_day_covers_every_segment() {
        // 5 segments, 96 quarter-hour slots a day.
        let mut seen = HashSet::new();
        for hour in 0..24 {
            for slot in 0..4 {
                let segment = segment_for(&at(hour, slot * 15), 1_234, 150, 2);
                assert!(segment.index < 5);
                assert_eq!(segment.offset, segment.index * 300);
                seen.insert(segment.index);
            }
        }
        assert_eq!(seen, (0..5).collect::<HashSet<_>>());
    }

    #[test]
    fn test_empty_space_still_yields_one_segment() {
        let segment = segment_for(&at(13, 30), 0, 150, 2);
        assert_eq!(segment.index, 0);
        assert_eq!(segment.offset, 0);
        assert_eq!(segment.size, 300);
    }

    #[test]
    fn test_degenerate_parameters_clamped() {
        let segment = segment_for(&at(0, 0), 10, 0, 0);
        assert_eq!(segment.size, 1);
    }

    #[test]
    fn test_chunk_offsets_feed_window_parameters() {
        let segment = segment_for(&at(0, 47), 1_234, 150, 2);
        assert_eq!(segment.chunk_offsets(150), vec![900, 1_050]);
    }
}
