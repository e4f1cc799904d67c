//! Settle-all fan-out and merge-by-key
//!
//! [`settle_all`] runs one future per key and waits for every one of them,
//! successes and failures alike. [`merge_by_key`] folds the outcomes back into
//! an ordered collection without changing its order or membership.

use futures::future::join_all;
use std::future::Future;

/// Outcome of one keyed operation
#[derive(Debug)]
pub struct Settled<K, T, E> {
    pub key: K,
    pub outcome: Result<T, E>,
}

/// Run `op` for every key concurrently and collect all outcomes in key order
///
/// A failure never cancels its siblings.
pub async fn settle_all<K, T, E, F, Fut>(
    keys: impl IntoIterator<Item = K>,
    op: F,
) -> Vec<Settled<K, T, E>>
where
    K: Clone,
    F: Fn(K) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let pending = keys.into_iter().map(|key| {
        let fut = op(key.clone());
        async move {
            Settled {
                key,
                outcome: fut.await,
            }
        }
    });

    join_all(pending).await
}

/// What [`merge_by_key`] did with each outcome
#[derive(Debug)]
pub struct MergeReport<K, E> {
    /// Items replaced by a successful outcome
    pub replaced: usize,
    /// Keys whose operation failed; their items were left untouched
    pub failed: Vec<(K, E)>,
    /// Outcomes whose key is no longer present; discarded
    pub dropped: usize,
}

impl<K, E> Default for MergeReport<K, E> {
    fn default() -> Self {
        Self {
            replaced: 0,
            failed: Vec::new(),
            dropped: 0,
        }
    }
}

/// Fold settled outcomes into `items` by key
///
/// Successes replace the item in place, failures keep the old item, and
/// outcomes for keys missing from `items` are dropped rather than appended.
pub fn merge_by_key<K, T, E>(
    items: &mut [T],
    settled: Vec<Settled<K, T, E>>,
    key_of: impl Fn(&T) -> &K,
) -> MergeReport<K, E>
where
    K: PartialEq,
{
    let mut report = MergeReport::default();

    for Settled { key, outcome } in settled {
        let Some(slot) = items.iter_mut().find(|item| key_of(item) == &key) else {
            report.dropped += 1;
            continue;
        };

        match outcome {
            Ok(fresh) => {
                *slot = fresh;
                report.replaced += 1;
            }
            Err(e) => report.failed.push((key, e)),
        }
    }

    report
}
