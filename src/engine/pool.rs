//! Bounded-concurrency write pool.
//!
//! Drains a work list while keeping up to `concurrency` workers in flight.
//! A worker's failure is counted, never propagated: sibling writes keep
//! going and the run reports aggregate counts instead of aborting.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::future;
use futures::stream::{self, StreamExt};

/// Run `worker` over `items` with at most `concurrency` in flight.
///
/// Returns how many workers reported success. Items are started in input
/// order; completion order is unspecified. `concurrency` is clamped to a
/// minimum of 1.
pub async fn run<T, F, Fut>(items: Vec<T>, worker: F, concurrency: usize) -> usize
where
    F: Fn(T) -> Fut,
    Fut: Future<Output = bool>,
{
    let (successes, _) = run_until(items, worker, concurrency, || true).await;
    successes
}

/// Like [`run`], but consults `admit` before starting each item.
///
/// Admission happens in item order; once `admit` returns false no further
/// items are started (workers already in flight still finish). Returns the
/// success count and the number of items admitted, so a caller can report
/// where to resume.
pub async fn run_until<T, F, Fut, A>(
    items: Vec<T>,
    worker: F,
    concurrency: usize,
    admit: A,
) -> (usize, usize)
where
    F: Fn(T) -> Fut,
    Fut: Future<Output = bool>,
    A: Fn() -> bool,
{
    let concurrency = concurrency.max(1);
    let admitted = AtomicUsize::new(0);

    let successes = stream::iter(items)
        .take_while(|_| future::ready(admit()))
        .map(|item| {
            admitted.fetch_add(1, Ordering::Relaxed);
            worker(item)
        })
        .buffer_unordered(concurrency)
        .filter(|succeeded| future::ready(*succeeded))
        .count()
        .await;

    (successes, admitted.load(Ordering::Relaxed))
}
