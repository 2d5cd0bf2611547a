//! Bounded-retry write execution.
//!
//! Wraps a single remote write with the shared rate gate and the retry
//! policy. The retryable/terminal distinction
//! ([`StoreError::retry_class`]) is what keeps a run from burning its
//! time budget re-sending requests the store will never accept.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use rand::Rng;

use super::config::RetryPolicy;
use super::rate_limiter::RateGate;
use crate::errors::{RetryClass, StoreError};

/// Executes remote writes under the shared gate with bounded retries.
#[derive(Clone)]
pub struct WriteExecutor {
    gate: Arc<RateGate>,
    policy: RetryPolicy,
}

impl WriteExecutor {
    /// Create an executor over the run's shared gate.
    pub fn new(gate: Arc<RateGate>, policy: RetryPolicy) -> Self {
        Self { gate, policy }
    }

    /// Run `write` until it succeeds, fails terminally, or attempts run
    /// out.
    ///
    /// Every attempt first acquires the rate gate. A transient failure
    /// waits the store-advertised `Retry-After` when one is given, else an
    /// exponentially growing backoff with a little jitter. Exhausting the
    /// attempt budget surfaces the last observed failure.
    pub async fn execute<F, Fut>(&self, write: F) -> Result<(), StoreError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<(), StoreError>>,
    {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            self.gate.acquire().await;

            let err = match write().await {
                Ok(()) => return Ok(()),
                Err(err) => err,
            };

            if err.retry_class() == RetryClass::Never {
                return Err(err);
            }
            if attempt >= max_attempts {
                warn!("write failed after {} attempts: {}", attempt, err);
                return Err(err);
            }

            let delay = match err.retry_after() {
                Some(advised) => advised,
                None => self.policy.backoff_delay(attempt) + self.jitter(),
            };
            debug!(
                "transient write failure (attempt {}/{}), retrying in {:?}: {}",
                attempt, max_attempts, delay, err
            );
            tokio::time::sleep(delay).await;
        }
    }

    fn jitter(&self) -> Duration {
        let max_ms = self.policy.max_jitter.as_millis() as u64;
        if max_ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::thread_rng().gen_range(0..=max_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Instant;

    fn fast_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(4),
            max_jitter: Duration::ZERO,
        }
    }

    fn executor(max_attempts: u32) -> WriteExecutor {
        WriteExecutor::new(Arc::new(RateGate::new(0.0)), fast_policy(max_attempts))
    }

    #[tokio::test]
    async fn test_two_rate_limits_then_success_is_three_attempts() {
        let attempts = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&attempts);

        let result = executor(5)
            .execute(|| {
                let attempt = counter.fetch_add(1, Ordering::SeqCst) + 1;
                async move {
                    if attempt <= 2 {
                        Err(StoreError::RateLimited { retry_after: None })
                    } else {
                        Ok(())
                    }
                }
            })
            .await;

        assert!(result.is_ok());
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_rejected_fails_on_first_attempt() {
        let attempts = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&attempts);

        let result = executor(5)
            .execute(|| {
                counter.fetch_add(1, Ordering::SeqCst);
                async {
                    Err(StoreError::Rejected {
                        status: 400,
                        body: "bad request".to_string(),
                    })
                }
            })
            .await;

        assert!(matches!(result, Err(StoreError::Rejected { status: 400, .. })));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_exhausting_attempts_surfaces_last_failure() {
        let attempts = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&attempts);

        let result = executor(3)
            .execute(|| {
                counter.fetch_add(1, Ordering::SeqCst);
                async {
                    Err(StoreError::Server {
                        status: 502,
                        body: "bad gateway".to_string(),
                    })
                }
            })
            .await;

        assert!(matches!(result, Err(StoreError::Server { status: 502, .. })));
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_advised_retry_after_is_honored() {
        let attempts = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&attempts);

        let start = Instant::now();
        let result = executor(5)
            .execute(|| {
                let attempt = counter.fetch_add(1, Ordering::SeqCst) + 1;
                async move {
                    if attempt == 1 {
                        Err(StoreError::RateLimited {
                            retry_after: Some(Duration::from_millis(50)),
                        })
                    } else {
                        Ok(())
                    }
                }
            })
            .await;

        assert!(result.is_ok());
        assert!(start.elapsed() >= Duration::from_millis(50));
    }
}
