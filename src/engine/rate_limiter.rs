//! Global write-rate gate.
//!
//! The remote store's rate limit is global, not per worker, so a single
//! gate shared by every concurrent writer is the one point of truth for
//! "may we write now". The gate spaces acquisitions with a monotonically
//! advancing "next eligible instant" cursor: each acquire reserves the
//! next slot under the lock, then sleeps outside it until that slot
//! arrives.

use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use log::{debug, warn};

/// Minimum-spacing gate for remote writes.
#[derive(Debug)]
pub struct RateGate {
    /// Spacing between consecutive acquisitions.
    interval: Duration,

    /// Next instant at which a slot may start.
    cursor: Mutex<Instant>,
}

impl RateGate {
    /// Create a gate allowing `requests_per_second` acquisitions per
    /// second. Non-positive rates disable spacing entirely.
    pub fn new(requests_per_second: f64) -> Self {
        let interval = if requests_per_second > 0.0 {
            Duration::from_secs_f64(1.0 / requests_per_second)
        } else {
            Duration::ZERO
        };

        Self {
            interval,
            cursor: Mutex::new(Instant::now()),
        }
    }

    /// Lock the cursor mutex, recovering from poison if necessary.
    ///
    /// Worst case after recovery is one slightly mistimed slot, which is
    /// preferable to panicking every subsequent writer.
    fn lock_cursor(&self) -> MutexGuard<'_, Instant> {
        self.cursor.lock().unwrap_or_else(|poisoned| {
            warn!("rate gate cursor mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Wait until the next write slot is available.
    ///
    /// Slots are handed out in acquisition order; no two acquisitions on
    /// the same gate resolve closer together than the configured interval.
    pub async fn acquire(&self) {
        let wait = {
            let mut cursor = self.lock_cursor();
            let now = Instant::now();
            let slot = (*cursor).max(now);
            *cursor = slot + self.interval;
            slot.saturating_duration_since(now)
        };

        if wait > Duration::ZERO {
            debug!("rate gate: waiting {:?} for next write slot", wait);
            tokio::time::sleep(wait).await;
        }
    }

    /// Spacing enforced between acquisitions.
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_from_rate() {
        let gate = RateGate::new(12.5);
        assert_eq!(gate.interval(), Duration::from_millis(80));
    }

    #[test]
    fn test_non_positive_rate_disables_spacing() {
        assert_eq!(RateGate::new(0.0).interval(), Duration::ZERO);
        assert_eq!(RateGate::new(-1.0).interval(), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_acquisitions_are_spaced() {
        let gate = RateGate::new(100.0); // 10ms apart

        let start = Instant::now();
        gate.acquire().await;
        gate.acquire().await;
        gate.acquire().await;
        let elapsed = start.elapsed();

        // First slot is immediate, the next two each wait one interval.
        assert!(elapsed >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn test_zero_interval_never_waits() {
        let gate = RateGate::new(0.0);

        let start = Instant::now();
        for _ in 0..100 {
            gate.acquire().await;
        }
        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_concurrent_acquirers_share_the_cursor() {
        use std::sync::Arc;

        let gate = Arc::new(RateGate::new(100.0));
        let start = Instant::now();

        let mut handles = Vec::new();
        for _ in 0..4 {
            let gate = Arc::clone(&gate);
            handles.push(tokio::spawn(async move { gate.acquire().await }));
        }
        for handle in handles {
            handle.await.expect("acquirer task panicked");
        }

        // Four acquisitions on one gate occupy at least three intervals.
        assert!(start.elapsed() >= Duration::from_millis(30));
    }
}
