//! Metrics collection for detector operations

/// Metrics collected across duplicate checks
///
/// Tracks completed checks, verdict outcomes, cache usage, and retry
/// behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectorMetrics {
    /// Checks that produced a verdict (cached or computed)
    pub checks_completed: usize,

    /// Checks whose verdict was a duplicate
    pub duplicates_found: usize,

    /// Verdicts answered from the cross-call cache
    pub cache_hits: usize,

    /// Transient-failure retries performed
    pub retries: usize,

    /// Checks that exhausted their retry budget
    pub failures: usize,
}

impl DetectorMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed check and its outcome
    pub fn record_check(&mut self, is_duplicate: bool) {
        self.checks_completed += 1;
        if is_duplicate {
            self.duplicates_found += 1;
        }
    }

    /// Record a verdict served from cache
    pub fn record_cache_hit(&mut self, is_duplicate: bool) {
        self.cache_hits += 1;
        self.record_check(is_duplicate);
    }

    /// Record one transient-failure retry
    pub fn record_retry(&mut self) {
        self.retries += 1;
    }

    /// Record a check that exhausted its retries
    pub fn record_failure(&mut self) {
        self.failures += 1;
    }

    /// Reset all counters
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let lines = vec![
            "Detector Metrics Summary".to_string(),
            "========================".to_string(),
            format!("Checks completed: {}", self.checks_completed),
            format!("Duplicates found: {}", self.duplicates_found),
            format!("Cache hits: {}", self.cache_hits),
            format!("Retries: {}", self.retries),
            format!("Failed checks: {}", self.failures),
        ];
        lines.join("\n")
    }
}
