//! Duplicate-check result types
//!
//! Value objects produced by the detector: per-pair similarity scores and
//! the final verdict handed back to the intake flow. None of these are
//! persisted; the verdict cache holds them only in memory.

use crate::submission::{Submission, SubmissionId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The five top-level signals of one pair comparison, each in [0, 1]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalScores {
    /// Composite title similarity (edit + Jaccard + cosine)
    pub title: f64,
    /// Composite body similarity (edit + Jaccard + cosine)
    pub body: f64,
    /// Position-boosted title keyword overlap
    pub title_overlap: f64,
    /// Position-boosted body keyword overlap
    pub body_overlap: f64,
    /// Pluggable semantic similarity (0 unless a provider is configured)
    pub semantic: f64,
}

impl SignalScores {
    /// Name → score view, for logs and API payloads
    pub fn as_map(&self) -> HashMap<&'static str, f64> {
        HashMap::from([
            ("title", self.title),
            ("body", self.body),
            ("title_overlap", self.title_overlap),
            ("body_overlap", self.body_overlap),
            ("semantic", self.semantic),
        ])
    }
}

/// Score of one candidate-vs-existing comparison
///
/// Ephemeral: created per comparison, discarded after the best match is
/// selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityScore {
    /// The existing submission compared against
    pub submission: SubmissionId,
    /// Per-signal breakdown
    pub signals: SignalScores,
    /// Weighted combination of the signals
    pub combined: f64,
}

/// The detector's answer for one candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateVerdict {
    /// Whether the best match crossed the duplicate threshold
    pub is_duplicate: bool,

    /// The closest existing submission, present only on a duplicate verdict
    pub matched: Option<Submission>,

    /// Highest combined score observed (0 for an empty comparison window);
    /// useful near-miss visibility even on a clear verdict
    pub highest_score: f64,

    /// Signal breakdown of the best match, if any comparison ran
    pub signals: Option<SignalScores>,

    /// Whether this verdict was served from the cross-call cache
    #[serde(default)]
    pub from_cache: bool,
}

impl DuplicateVerdict {
    /// Clear verdict: nothing in the window crossed the threshold
    pub fn clear(highest_score: f64, signals: Option<SignalScores>) -> Self {
        Self {
            is_duplicate: false,
            matched: None,
            highest_score,
            signals,
            from_cache: false,
        }
    }

    /// Duplicate verdict carrying the closest match and its breakdown
    pub fn duplicate(matched: Submission, combined: f64, signals: SignalScores) -> Self {
        Self {
            is_duplicate: true,
            matched: Some(matched),
            highest_score: combined,
            signals: Some(signals),
            from_cache: false,
        }
    }

    /// Copy of this verdict tagged as served-from-cache
    pub fn cached(&self) -> Self {
        Self { from_cache: true, ..self.clone() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submission::Submission;

    #[test]
    fn test_signal_map_is_complete() {
        let signals = SignalScores { title: 0.9, body: 0.8, ..Default::default() };
        let map = signals.as_map();
        assert_eq!(map.len(), 5);
        assert_eq!(map["title"], 0.9);
        assert_eq!(map["semantic"], 0.0);
    }

    #[test]
    fn test_clear_verdict() {
        let verdict = DuplicateVerdict::clear(0.4, None);
        assert!(!verdict.is_duplicate);
        assert!(verdict.matched.is_none());
        assert_eq!(verdict.highest_score, 0.4);
        assert!(!verdict.from_cache);
    }

    #[test]
    fn test_duplicate_verdict_carries_match() {
        let existing = Submission::new("Fix Elm St", "Transportation", "Potholes.", 100);
        let verdict = DuplicateVerdict::duplicate(existing.clone(), 0.91, SignalScores::default());
        assert!(verdict.is_duplicate);
        assert_eq!(verdict.matched.unwrap().id, existing.id);
        assert_eq!(verdict.highest_score, 0.91);
    }

    #[test]
    fn test_cached_copy_only_sets_flag() {
        let verdict = DuplicateVerdict::clear(0.2, None);
        let cached = verdict.cached();
        assert!(cached.from_cache);
        assert_eq!(cached.highest_score, verdict.highest_score);
        assert_eq!(cached.is_duplicate, verdict.is_duplicate);
    }

    #[test]
    fn test_verdict_serde_roundtrip() {
        let existing = Submission::new("Fix Elm St", "Transportation", "Potholes.", 100);
        let verdict = DuplicateVerdict::duplicate(
            existing,
            0.88,
            SignalScores { title: 0.95, body: 0.8, title_overlap: 0.9, body_overlap: 0.7, semantic: 0.0 },
        );
        let json = serde_json::to_string(&verdict).unwrap();
        let back: DuplicateVerdict = serde_json::from_str(&json).unwrap();
        assert_eq!(verdict, back);
    }
}
