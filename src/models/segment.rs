use serde::{Deserialize, Serialize};

/// A deterministic, time-derived partition of the approximate record space.
///
/// Recomputed fresh each invocation from wall-clock time and never
/// persisted: a missed invocation is simply skipped and its segment comes
/// around again on the next sweep.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Position of this segment within the sweep.
    pub index: usize,

    /// First record offset covered by this segment.
    pub offset: usize,

    /// Number of records this segment covers.
    pub size: usize,
}

impl Segment {
    /// Per-chunk window offsets inside this segment, spaced `chunk_size`
    /// apart.
    ///
    /// Each offset is the `offset` parameter of one bounded synchronization
    /// call; together the chunks cover the whole segment.
    pub fn chunk_offsets(&self, chunk_size: usize) -> Vec<usize> {
        let chunk_size = chunk_size.max(1);
        (self.offset..self.offset + self.size)
            .step_by(chunk_size)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_offsets_cover_segment() {
        let segment = Segment {
            index: 2,
            offset: 600,
            size: 300,
        };
        assert_eq!(segment.chunk_offsets(150), vec![600, 750]);
    }

    #[test]
    fn test_single_chunk_segment() {
        let segment = Segment {
            index: 0,
            offset: 0,
            size: 100,
        };
        assert_eq!(segment.chunk_offsets(100), vec![0]);
    }

    #[test]
    fn test_zero_chunk_size_clamped() {
        let segment = Segment {
            index: 0,
            offset: 0,
            size: 3,
        };
        assert_eq!(segment.chunk_offsets(0), vec![0, 1, 2]);
    }
}
