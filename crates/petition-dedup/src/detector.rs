//! The duplicate-check orchestrator
//!
//! One public operation: [`DuplicateDetector::check`]. Validates the
//! candidate, consults the verdict cache, retrieves the comparison window,
//! scores it in bounded concurrent batches, thresholds the best match, and
//! caches the result. Transient failures (retrieval, timeout) are retried
//! with linearly increasing backoff.

use crate::cache::{CacheStats, VerdictCache};
use crate::config::DetectorConfig;
use crate::error::DetectorError;
use crate::memo::ScoreMemo;
use crate::metrics::DetectorMetrics;
use crate::scorer::{score_pair, Candidate};
use futures::future::join_all;
use petition_domain::normalize::normalize;
use petition_domain::traits::{RecentQuery, SemanticScorer, SubmissionStore};
use petition_domain::{DuplicateVerdict, SimilarityScore};
use petition_semantic::NoopScorer;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Screens candidate submissions against the recent window of their category
///
/// Generic over the store and the semantic strategy so tests and future
/// embedding providers plug in without touching the orchestration.
pub struct DuplicateDetector<S, H = NoopScorer> {
    store: S,
    semantic: H,
    config: DetectorConfig,
    cache: VerdictCache,
    metrics: Mutex<DetectorMetrics>,
}

impl<S: SubmissionStore> DuplicateDetector<S, NoopScorer> {
    /// Create a detector with the default (inert) semantic strategy
    ///
    /// Fails with [`DetectorError::InvalidConfiguration`] if any weight set
    /// is invalid; configuration problems surface here, never per request.
    pub fn new(store: S, config: DetectorConfig) -> Result<Self, DetectorError> {
        Self::with_semantic(store, NoopScorer, config)
    }
}

impl<S: SubmissionStore, H: SemanticScorer> DuplicateDetector<S, H> {
    /// Create a detector with a custom semantic strategy
    pub fn with_semantic(store: S, semantic: H, config: DetectorConfig) -> Result<Self, DetectorError> {
        config.validate()?;
        let cache = VerdictCache::new(config.cache_ttl(), config.cache_max_entries);
        Ok(Self { store, semantic, config, cache, metrics: Mutex::new(DetectorMetrics::new()) })
    }

    /// Run the full duplicate check for one candidate
    ///
    /// Returns a verdict, or [`DetectorError::InvalidInput`] for empty
    /// fields and [`DetectorError::CheckFailed`] once transient-failure
    /// retries are exhausted.
    pub async fn check(
        &self,
        title: &str,
        category: &str,
        body: &str,
    ) -> Result<DuplicateVerdict, DetectorError> {
        let title = title.trim();
        let category = category.trim();
        let body = body.trim();
        if title.is_empty() {
            return Err(DetectorError::InvalidInput("title"));
        }
        if category.is_empty() {
            return Err(DetectorError::InvalidInput("category"));
        }
        if body.is_empty() {
            return Err(DetectorError::InvalidInput("body"));
        }

        let cache_key = format!("{}|{}", category.to_lowercase(), normalize(title));
        if let Some(verdict) = self.cache.get(&cache_key) {
            tracing::debug!(key = %cache_key, "verdict served from cache");
            self.metrics.lock().unwrap().record_cache_hit(verdict.is_duplicate);
            return Ok(verdict.cached());
        }

        let candidate = Candidate::extract(title, body, self.config.min_keyword_len);

        let mut last_error: Option<DetectorError> = None;
        for attempt in 1..=self.config.max_retries {
            let outcome = tokio::time::timeout(
                self.config.check_timeout(),
                self.run_check(&candidate, category),
            )
            .await
            .unwrap_or(Err(DetectorError::Timeout(self.config.check_timeout_ms)));

            match outcome {
                Ok(verdict) => {
                    self.cache.insert(cache_key, &verdict);
                    self.metrics.lock().unwrap().record_check(verdict.is_duplicate);
                    tracing::info!(
                        category,
                        is_duplicate = verdict.is_duplicate,
                        highest_score = verdict.highest_score,
                        "duplicate check completed"
                    );
                    return Ok(verdict);
                }
                Err(e) if e.is_transient() => {
                    tracing::warn!(attempt, error = %e, "duplicate check attempt failed");
                    last_error = Some(e);
                    if attempt < self.config.max_retries {
                        self.metrics.lock().unwrap().record_retry();
                        tokio::time::sleep(self.config.retry_delay(attempt)).await;
                    }
                }
                Err(e) => return Err(e),
            }
        }

        self.metrics.lock().unwrap().record_failure();
        Err(DetectorError::CheckFailed {
            attempts: self.config.max_retries,
            last: Box::new(last_error.unwrap_or(DetectorError::Timeout(self.config.check_timeout_ms))),
        })
    }

    /// One orchestration attempt: retrieve, batch-score, threshold
    async fn run_check(
        &self,
        candidate: &Candidate,
        category: &str,
    ) -> Result<DuplicateVerdict, DetectorError> {
        let since = current_timestamp().saturating_sub(self.config.window_secs());
        let query = RecentQuery::window(category, since);
        let window = self
            .store
            .find_recent(&query)
            .await
            .map_err(|e| DetectorError::Retrieval(e.to_string()))?;

        if window.is_empty() {
            tracing::debug!(category, "empty comparison window");
            return Ok(DuplicateVerdict::clear(0.0, None));
        }

        let memo = ScoreMemo::new();
        let mut best: Option<SimilarityScore> = None;

        // Fixed-size batches bound peak concurrency; pairs within a batch
        // score concurrently and share only the memo table
        for batch in window.chunks(self.config.batch_size) {
            let scores = join_all(batch.iter().map(|existing| {
                score_pair(candidate, existing, &self.config, &memo, &self.semantic)
            }))
            .await;

            for score in scores {
                let is_better = best
                    .as_ref()
                    .map(|current| score.combined > current.combined)
                    .unwrap_or(true);
                if is_better {
                    best = Some(score);
                }
            }
        }

        // Window is non-empty, so at least one score exists
        let best = best.expect("scored window must produce a best match");

        if best.combined >= self.config.duplicate_threshold {
            let matched = window
                .into_iter()
                .find(|s| s.id == best.submission)
                .expect("best match comes from the window");
            Ok(DuplicateVerdict::duplicate(matched, best.combined, best.signals))
        } else {
            Ok(DuplicateVerdict::clear(best.combined, Some(best.signals)))
        }
    }

    /// Snapshot of the detector counters
    pub fn metrics(&self) -> DetectorMetrics {
        self.metrics.lock().unwrap().clone()
    }

    /// Reset the detector counters
    pub fn reset_metrics(&self) {
        self.metrics.lock().unwrap().reset();
    }

    /// Verdict-cache counters
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Drop every cached verdict
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// The configuration this detector was built with
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// The store this detector reads from
    pub fn store(&self) -> &S {
        &self.store
    }
}

fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before Unix epoch")
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use petition_domain::{Submission, SubmissionId, SubmissionStatus};

    struct EmptyStore;

    #[async_trait]
    impl SubmissionStore for EmptyStore {
        type Error = String;

        async fn add_submission(&self, s: Submission) -> Result<SubmissionId, Self::Error> {
            Ok(s.id)
        }

        async fn get_submission(&self, _id: SubmissionId) -> Result<Option<Submission>, Self::Error> {
            Ok(None)
        }

        async fn find_recent(&self, _query: &RecentQuery) -> Result<Vec<Submission>, Self::Error> {
            Ok(Vec::new())
        }

        async fn update_status(
            &self,
            _id: SubmissionId,
            _status: SubmissionStatus,
        ) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_empty_fields_rejected_without_retry() {
        let detector = DuplicateDetector::new(EmptyStore, DetectorConfig::default()).unwrap();

        for (title, category, body, field) in [
            ("", "Parks", "body", "title"),
            ("   ", "Parks", "body", "title"),
            ("title", "", "body", "category"),
            ("title", "Parks", "\n", "body"),
        ] {
            match detector.check(title, category, body).await {
                Err(DetectorError::InvalidInput(f)) => assert_eq!(f, field),
                other => panic!("expected InvalidInput, got {:?}", other.map(|v| v.is_duplicate)),
            }
        }
    }

    #[tokio::test]
    async fn test_invalid_config_rejected_at_construction() {
        let config = DetectorConfig {
            duplicate_threshold: 2.0,
            ..Default::default()
        };
        assert!(matches!(
            DuplicateDetector::new(EmptyStore, config),
            Err(DetectorError::InvalidConfiguration(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_window_is_clear_verdict() {
        let detector = DuplicateDetector::new(EmptyStore, DetectorConfig::default()).unwrap();
        let verdict = detector.check("New request", "Parks", "Please add benches.").await.unwrap();

        assert!(!verdict.is_duplicate);
        assert_eq!(verdict.highest_score, 0.0);
        assert!(verdict.matched.is_none());
        assert!(!verdict.from_cache);
    }
}
