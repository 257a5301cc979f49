//! Per-invocation score memoization
//!
//! Within one duplicate check the same pair of strings is never scored
//! twice, even when the comparison window carries repeated titles or
//! bodies. The table lives for a single invocation and is dropped with it;
//! cross-call caching is the job of [`crate::cache::VerdictCache`].

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Mutex;

/// The memoized computations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum MetricKind {
    Edit,
    Jaccard,
    Cosine,
    Overlap,
    Semantic,
}

/// Task-safe memo table for one duplicate-check invocation
pub(crate) struct ScoreMemo {
    table: Mutex<HashMap<(MetricKind, u64, u64), f64>>,
}

fn fingerprint(text: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    text.hash(&mut hasher);
    hasher.finish()
}

// Keys are order-normalized so memoization sees symmetric pairs as one.
fn key(kind: MetricKind, a: &str, b: &str) -> (MetricKind, u64, u64) {
    let (fa, fb) = (fingerprint(a), fingerprint(b));
    if fa <= fb {
        (kind, fa, fb)
    } else {
        (kind, fb, fa)
    }
}

impl ScoreMemo {
    pub(crate) fn new() -> Self {
        Self { table: Mutex::new(HashMap::new()) }
    }

    /// Return the memoized score for this pair, computing it on first use
    pub(crate) fn get_or_compute(
        &self,
        kind: MetricKind,
        a: &str,
        b: &str,
        compute: impl FnOnce() -> f64,
    ) -> f64 {
        let key = key(kind, a, b);
        if let Some(&score) = self.table.lock().unwrap().get(&key) {
            return score;
        }
        // Computed outside the lock; a concurrent duplicate compute is
        // harmless because the result is deterministic
        let score = compute();
        self.table.lock().unwrap().insert(key, score);
        score
    }

    /// Memoized lookup without computing (used by the async semantic path)
    pub(crate) fn get(&self, kind: MetricKind, a: &str, b: &str) -> Option<f64> {
        self.table.lock().unwrap().get(&key(kind, a, b)).copied()
    }

    /// Record a score computed by the caller
    pub(crate) fn insert(&self, kind: MetricKind, a: &str, b: &str, score: f64) {
        self.table.lock().unwrap().insert(key(kind, a, b), score);
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.table.lock().unwrap().len()
    }
}
