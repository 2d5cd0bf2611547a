//! Engine configuration.
//!
//! Every tunable that tends to drift between deployments - tolerance,
//! concurrency, write rate, retry limits, chunk sizes - is explicit data
//! here rather than a constant buried in the code that uses it.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default absolute price tolerance for "unchanged" detection.
pub const DEFAULT_TOLERANCE: f64 = 0.005;

/// Default number of concurrent writers per run.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Default remote write rate (requests per second).
pub const DEFAULT_REQUESTS_PER_SECOND: f64 = 12.5;

/// Default safety margin kept before a hard invocation deadline.
pub const DEFAULT_DEADLINE_MARGIN: Duration = Duration::from_secs(5);

/// Default records per scheduler chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 150;

/// Default chunks swept per unattended invocation.
pub const DEFAULT_CHUNKS_PER_RUN: usize = 2;

/// Default total attempts per remote write.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Default first backoff delay.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(400);

/// Default backoff ceiling.
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_millis(8_000);

/// Default upper bound of the random jitter added to each backoff.
pub const DEFAULT_MAX_JITTER: Duration = Duration::from_millis(100);

/// Tunables for one synchronization engine instance.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Maximum absolute price difference still considered unchanged.
    pub tolerance: f64,

    /// Concurrent in-flight writes per run.
    pub concurrency: usize,

    /// Global write rate toward the remote store. The store's limit is
    /// global, so this is enforced by one gate shared across all workers.
    pub requests_per_second: f64,

    /// Retry behavior for individual writes.
    pub retry: RetryPolicy,

    /// How long before a hard deadline the run stops admitting new writes.
    pub deadline_margin: Duration,

    /// Records per scheduler chunk.
    pub chunk_size: usize,

    /// Chunks swept per unattended invocation.
    pub chunks_per_run: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            concurrency: DEFAULT_CONCURRENCY,
            requests_per_second: DEFAULT_REQUESTS_PER_SECOND,
            retry: RetryPolicy::default(),
            deadline_margin: DEFAULT_DEADLINE_MARGIN,
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunks_per_run: DEFAULT_CHUNKS_PER_RUN,
        }
    }
}

/// Bounded exponential backoff settings for remote writes.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total attempts per write, first try included.
    pub max_attempts: u32,

    /// First backoff delay.
    pub base_delay: Duration,

    /// Backoff ceiling.
    pub max_delay: Duration,

    /// Upper bound of the random jitter added to each backoff.
    pub max_jitter: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_BASE_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
            max_jitter: DEFAULT_MAX_JITTER,
        }
    }
}

impl RetryPolicy {
    /// Backoff delay after `failures` failed attempts, jitter excluded.
    ///
    /// Doubles from `base_delay` and never exceeds `max_delay`.
    pub fn backoff_delay(&self, failures: u32) -> Duration {
        let exponent = failures.saturating_sub(1).min(31);
        self.base_delay
            .saturating_mul(2u32.saturating_pow(exponent))
            .min(self.max_delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles_up_to_ceiling() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff_delay(1), Duration::from_millis(400));
        assert_eq!(policy.backoff_delay(2), Duration::from_millis(800));
        assert_eq!(policy.backoff_delay(3), Duration::from_millis(1_600));
        assert_eq!(policy.backoff_delay(4), Duration::from_millis(3_200));
        assert_eq!(policy.backoff_delay(5), Duration::from_millis(6_400));
        assert_eq!(policy.backoff_delay(6), Duration::from_millis(8_000));
        assert_eq!(policy.backoff_delay(20), Duration::from_millis(8_000));
    }

    #[test]
    fn test_config_round_trips_through_serde() {
        let config = SyncConfig {
            tolerance: 1e-7,
            concurrency: 4,
            ..SyncConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: SyncConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.tolerance, 1e-7);
        assert_eq!(parsed.concurrency, 4);
        assert_eq!(parsed.retry.max_attempts, DEFAULT_MAX_ATTEMPTS);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed: SyncConfig = serde_json::from_str(r#"{"concurrency": 2}"#).unwrap();
        assert_eq!(parsed.concurrency, 2);
        assert_eq!(parsed.tolerance, DEFAULT_TOLERANCE);
        assert_eq!(parsed.chunk_size, DEFAULT_CHUNK_SIZE);
    }
}
