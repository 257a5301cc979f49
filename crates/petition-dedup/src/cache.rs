//! Cross-call verdict cache
//!
//! Avoids recomputation when the same candidate is checked repeatedly
//! within the TTL window, e.g. a user resubmitting after a validation
//! round-trip. Keyed by normalized title + category. Entries expire after
//! the TTL plus a 10% grace period; the entry count is bounded with
//! least-recently-inserted eviction.
//!
//! This cache is deliberately separate from the per-invocation score memo
//! in [`crate::memo`]: one caches verdicts across calls, the other caches
//! metric results within a single call.

use petition_domain::DuplicateVerdict;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Observability counters for the verdict cache
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from a live entry
    pub hits: u64,
    /// Lookups that found nothing, or only a stale entry
    pub misses: u64,
    /// Entries dropped to respect the size bound
    pub evictions: u64,
    /// Entries currently live (stale entries not counted)
    pub live_entries: usize,
}

struct CacheEntry {
    verdict: DuplicateVerdict,
    inserted_at: Instant,
}

struct CacheInner {
    entries: HashMap<String, CacheEntry>,
    // Insertion order, oldest at the front
    order: VecDeque<String>,
    hits: u64,
    misses: u64,
    evictions: u64,
}

/// Bounded, TTL'd verdict cache shared by all concurrent checks
pub struct VerdictCache {
    inner: Mutex<CacheInner>,
    ttl: Duration,
    max_entries: usize,
}

/// Whether an entry of the given age is past the TTL plus its grace period
fn is_stale(age: Duration, ttl: Duration) -> bool {
    age > ttl + ttl / 10
}

impl VerdictCache {
    /// Create a cache with the given TTL and entry bound
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                entries: HashMap::new(),
                order: VecDeque::new(),
                hits: 0,
                misses: 0,
                evictions: 0,
            }),
            ttl,
            max_entries,
        }
    }

    /// Look up a live verdict; a stale entry is dropped and counts as a miss
    pub fn get(&self, key: &str) -> Option<DuplicateVerdict> {
        let mut guard = self.inner.lock().unwrap();
        let inner = &mut *guard;

        let live = inner
            .entries
            .get(key)
            .map(|entry| !is_stale(entry.inserted_at.elapsed(), self.ttl));

        match live {
            Some(true) => {
                let verdict = inner.entries[key].verdict.clone();
                inner.hits += 1;
                Some(verdict)
            }
            Some(false) => {
                inner.entries.remove(key);
                inner.order.retain(|k| k != key);
                inner.misses += 1;
                None
            }
            None => {
                inner.misses += 1;
                None
            }
        }
    }

    /// Store a verdict under the given key, evicting the oldest insertion
    /// if the cache is full
    pub fn insert(&self, key: String, verdict: &DuplicateVerdict) {
        let mut inner = self.inner.lock().unwrap();

        if inner.entries.contains_key(&key) {
            // Re-insertion refreshes both the entry and its position
            inner.order.retain(|k| k != &key);
        } else if inner.entries.len() >= self.max_entries {
            while let Some(oldest) = inner.order.pop_front() {
                if inner.entries.remove(&oldest).is_some() {
                    inner.evictions += 1;
                    break;
                }
            }
        }

        inner.order.push_back(key.clone());
        inner.entries.insert(
            key,
            CacheEntry { verdict: verdict.clone(), inserted_at: Instant::now() },
        );
    }

    /// Drop every entry; counters are preserved
    pub fn clear(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.entries.clear();
        inner.order.clear();
    }

    /// Current counters and live-entry count
    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.lock().unwrap();
        let live_entries = inner
            .entries
            .values()
            .filter(|e| !is_stale(e.inserted_at.elapsed(), self.ttl))
            .count();
        CacheStats {
            hits: inner.hits,
            misses: inner.misses,
            evictions: inner.evictions,
            live_entries,
        }
    }
}
