//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and
//! infrastructure. Implementations live in other crates:
//! [`SubmissionStore`] in petition-store, [`SemanticScorer`] in
//! petition-semantic.

use crate::submission::{Submission, SubmissionId, SubmissionStatus};
use async_trait::async_trait;

/// Query criteria for the recent-window retrieval
#[derive(Debug, Clone)]
pub struct RecentQuery {
    /// Category the candidate was filed under; comparisons never cross it
    pub category: String,

    /// Lower bound on creation time (seconds since Unix epoch)
    pub since: u64,

    /// Statuses excluded from comparison
    pub excluded_statuses: Vec<SubmissionStatus>,

    /// Maximum results to return (newest first)
    pub limit: Option<usize>,
}

impl RecentQuery {
    /// Standard comparison window for a category: everything since the
    /// given timestamp except drafts and rejected submissions
    pub fn window(category: impl Into<String>, since: u64) -> Self {
        Self {
            category: category.into(),
            since,
            excluded_statuses: SubmissionStatus::excluded_from_comparison(),
            limit: None,
        }
    }
}

/// Trait for storing and retrieving submissions
///
/// Implemented by the infrastructure layer (petition-store). Retrieval is
/// the only suspension point of the duplicate detector besides the
/// semantic hook.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Error type for store operations
    type Error: std::fmt::Display + Send;

    /// Persist a new submission
    async fn add_submission(&self, submission: Submission) -> Result<SubmissionId, Self::Error>;

    /// Fetch a submission by id
    async fn get_submission(&self, id: SubmissionId) -> Result<Option<Submission>, Self::Error>;

    /// Fetch the comparison window for a category, newest first
    async fn find_recent(&self, query: &RecentQuery) -> Result<Vec<Submission>, Self::Error>;

    /// Update the lifecycle status of a submission
    async fn update_status(
        &self,
        id: SubmissionId,
        status: SubmissionStatus,
    ) -> Result<(), Self::Error>;
}

/// Pluggable semantic-similarity strategy
///
/// Scores two texts in [0, 1]. The default implementation returns 0; a
/// failing provider never blocks a duplicate check - the detector logs the
/// failure and scores the signal as 0.
#[async_trait]
pub trait SemanticScorer: Send + Sync {
    /// Error type for scoring operations
    type Error: std::fmt::Display + Send;

    /// Semantic similarity of two texts, in [0, 1]
    async fn score(&self, a: &str, b: &str) -> Result<f64, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_query_excludes_drafts_and_rejected() {
        let query = RecentQuery::window("Transportation", 1000);
        assert_eq!(query.category, "Transportation");
        assert_eq!(query.since, 1000);
        assert!(query.excluded_statuses.contains(&SubmissionStatus::Draft));
        assert!(query.excluded_statuses.contains(&SubmissionStatus::Rejected));
        assert!(query.limit.is_none());
    }
}
