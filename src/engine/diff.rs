//! Source-vs-remote price diffing.
//!
//! Pure, synchronous classification pass: every remote record either
//! becomes a write [`Candidate`] or lands in exactly one skip bucket.
//! Candidates keep the remote snapshot's order, which is what makes
//! windowing reproducible across invocations against an unchanged
//! snapshot.

use std::collections::{HashMap, HashSet};

use log::warn;

use crate::models::{Breakdown, Candidate, RemoteRecord, SkipSamples, SourcePrice};
use crate::resolver::normalize;

/// How many raw tickers each skip bucket keeps for the report.
const MAX_SAMPLES: usize = 10;

/// Everything the diff pass learned about one remote snapshot.
#[derive(Clone, Debug, Default)]
pub struct DiffOutcome {
    /// Records needing a write, in remote-snapshot order.
    pub candidates: Vec<Candidate>,

    /// Counts per skip reason.
    pub breakdown: Breakdown,

    /// Sample tickers per skip reason.
    pub samples: SkipSamples,
}

/// Diff feed prices against the remote snapshot.
///
/// Builds a last-write-wins map keyed by normalized ticker, then
/// classifies each remote record in input order:
///
/// - `not_found`: empty ticker, absent from the feed, or excluded by
///   `allow` (a set of normalized tickers)
/// - `null_price`: the feed row carried no finite price
/// - `unchanged`: remote price is finite and within `tolerance` of the
///   feed price (skipped unless `force`)
/// - otherwise a [`Candidate`] is emitted
///
/// Duplicate normalized tickers in `remote` are each diffed
/// independently; per-record identity belongs to the store, not to this
/// pass.
pub fn diff(
    sources: &[SourcePrice],
    remote: &[RemoteRecord],
    allow: Option<&HashSet<String>>,
    tolerance: f64,
    force: bool,
) -> DiffOutcome {
    let mut price_map: HashMap<String, Option<f64>> = HashMap::with_capacity(sources.len());
    for source in sources {
        let key = normalize(&source.ticker);
        if key.is_empty() {
            continue;
        }
        price_map.insert(key, source.price);
    }

    let mut outcome = DiffOutcome::default();
    let mut seen_remote: HashSet<String> = HashSet::new();

    for record in remote {
        let key = normalize(&record.ticker);

        if !key.is_empty() && !seen_remote.insert(key.clone()) {
            warn!(
                "duplicate remote record for ticker '{}' (id {}), diffing independently",
                key, record.id
            );
        }

        let allowed = allow.map_or(true, |set| set.contains(&key));
        if key.is_empty() || !allowed || !price_map.contains_key(&key) {
            outcome.breakdown.not_found += 1;
            push_sample(&mut outcome.samples.not_found, &record.ticker);
            continue;
        }

        let new_price = match price_map.get(&key) {
            Some(Some(price)) if price.is_finite() => *price,
            _ => {
                outcome.breakdown.null_price += 1;
                push_sample(&mut outcome.samples.null_price, &record.ticker);
                continue;
            }
        };

        let within_tolerance = record
            .price
            .map_or(false, |old| old.is_finite() && (old - new_price).abs() < tolerance);
        if within_tolerance && !force {
            outcome.breakdown.unchanged += 1;
            push_sample(&mut outcome.samples.unchanged, &record.ticker);
            continue;
        }

        outcome.candidates.push(Candidate {
            remote_id: record.id.clone(),
            ticker: record.ticker.clone(),
            new_price,
        });
    }

    outcome
}

fn push_sample(samples: &mut Vec<String>, ticker: &str) {
    if samples.len() < MAX_SAMPLES {
        samples.push(ticker.to_string());
    }
}
