//! Named, validated weight sets for combining similarity scores
//!
//! The source of truth for every combination step in the detector. Weight
//! sets are configuration, not hard-coded constants: each set validates
//! that its entries lie in [0, 1] and sum to 1 (within a small epsilon)
//! before the detector accepts it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tolerance when checking that weights sum to 1
pub const WEIGHT_EPSILON: f64 = 1e-6;

/// Errors produced by weight-set validation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WeightError {
    /// The entries of a weight set do not sum to 1
    #[error("{set} weights sum to {sum}, expected 1.0")]
    InvalidSum {
        /// Name of the offending weight set
        set: &'static str,
        /// Actual sum of the entries
        sum: f64,
    },

    /// A single weight lies outside [0, 1]
    #[error("{set} weight '{name}' = {value} is outside [0, 1]")]
    OutOfRange {
        /// Name of the offending weight set
        set: &'static str,
        /// Name of the offending entry
        name: &'static str,
        /// Value of the offending entry
        value: f64,
    },
}

fn check(set: &'static str, entries: &[(&'static str, f64)]) -> Result<(), WeightError> {
    for &(name, value) in entries {
        if !(0.0..=1.0).contains(&value) {
            return Err(WeightError::OutOfRange { set, name, value });
        }
    }
    let sum: f64 = entries.iter().map(|&(_, v)| v).sum();
    if (sum - 1.0).abs() > WEIGHT_EPSILON {
        return Err(WeightError::InvalidSum { set, sum });
    }
    Ok(())
}

/// Weights over the three text metrics for a single field comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricWeights {
    /// Weight of edit-distance similarity
    pub edit: f64,
    /// Weight of keyword-set Jaccard similarity
    pub jaccard: f64,
    /// Weight of TF-IDF cosine similarity
    pub cosine: f64,
}

impl MetricWeights {
    /// Weights used when comparing titles (edit distance dominates short text)
    pub fn title_default() -> Self {
        Self { edit: 0.5, jaccard: 0.3, cosine: 0.2 }
    }

    /// Weights used when comparing bodies (vector similarity dominates long text)
    pub fn body_default() -> Self {
        Self { edit: 0.3, jaccard: 0.3, cosine: 0.4 }
    }

    /// Validate that entries lie in [0, 1] and sum to 1
    pub fn validate(&self, set: &'static str) -> Result<(), WeightError> {
        check(
            set,
            &[("edit", self.edit), ("jaccard", self.jaccard), ("cosine", self.cosine)],
        )
    }

    /// Weighted sum of the three metric scores, clamped to [0, 1]
    pub fn combine(&self, edit: f64, jaccard: f64, cosine: f64) -> f64 {
        (self.edit * edit + self.jaccard * jaccard + self.cosine * cosine).clamp(0.0, 1.0)
    }
}

impl Default for MetricWeights {
    /// General-purpose weights for a standalone field comparison
    fn default() -> Self {
        Self { edit: 0.4, jaccard: 0.3, cosine: 0.3 }
    }
}

/// Weights over the five top-level signals of a pair comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalWeights {
    /// Composite title similarity
    pub title: f64,
    /// Composite body similarity
    pub body: f64,
    /// Position-boosted title keyword overlap
    pub title_overlap: f64,
    /// Position-boosted body keyword overlap
    pub body_overlap: f64,
    /// Pluggable semantic similarity
    pub semantic: f64,
}

impl SignalWeights {
    /// Validate that entries lie in [0, 1] and sum to 1
    pub fn validate(&self, set: &'static str) -> Result<(), WeightError> {
        check(
            set,
            &[
                ("title", self.title),
                ("body", self.body),
                ("title_overlap", self.title_overlap),
                ("body_overlap", self.body_overlap),
                ("semantic", self.semantic),
            ],
        )
    }

    /// Weighted sum of the five signal scores, clamped to [0, 1]
    pub fn combine(&self, signals: &crate::verdict::SignalScores) -> f64 {
        (self.title * signals.title
            + self.body * signals.body
            + self.title_overlap * signals.title_overlap
            + self.body_overlap * signals.body_overlap
            + self.semantic * signals.semantic)
            .clamp(0.0, 1.0)
    }
}

impl Default for SignalWeights {
    fn default() -> Self {
        Self {
            title: 0.3,
            body: 0.25,
            title_overlap: 0.2,
            body_overlap: 0.15,
            semantic: 0.1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verdict::SignalScores;

    #[test]
    fn test_default_sets_are_valid() {
        assert!(MetricWeights::default().validate("metric").is_ok());
        assert!(MetricWeights::title_default().validate("title").is_ok());
        assert!(MetricWeights::body_default().validate("body").is_ok());
        assert!(SignalWeights::default().validate("signal").is_ok());
    }

    #[test]
    fn test_invalid_sum_rejected() {
        let weights = MetricWeights { edit: 0.5, jaccard: 0.5, cosine: 0.5 };
        match weights.validate("metric") {
            Err(WeightError::InvalidSum { set, sum }) => {
                assert_eq!(set, "metric");
                assert!((sum - 1.5).abs() < 1e-9);
            }
            other => panic!("expected InvalidSum, got {:?}", other),
        }
    }

    #[test]
    fn test_out_of_range_rejected() {
        let weights = MetricWeights { edit: 1.2, jaccard: -0.1, cosine: -0.1 };
        match weights.validate("metric") {
            Err(WeightError::OutOfRange { name, .. }) => assert_eq!(name, "edit"),
            other => panic!("expected OutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn test_sum_within_epsilon_accepted() {
        let weights = MetricWeights { edit: 0.4, jaccard: 0.3, cosine: 0.3000001 };
        assert!(weights.validate("metric").is_ok());
    }

    #[test]
    fn test_metric_combine() {
        let weights = MetricWeights::title_default();
        let score = weights.combine(1.0, 0.5, 0.0);
        assert!((score - (0.5 + 0.15)).abs() < 1e-9);
    }

    #[test]
    fn test_signal_combine_bounds() {
        let weights = SignalWeights::default();
        let all_ones = SignalScores {
            title: 1.0,
            body: 1.0,
            title_overlap: 1.0,
            body_overlap: 1.0,
            semantic: 1.0,
        };
        assert!((weights.combine(&all_ones) - 1.0).abs() < 1e-9);

        let all_zeros = SignalScores::default();
        assert_eq!(weights.combine(&all_zeros), 0.0);
    }

    #[test]
    fn test_serde_roundtrip() {
        let weights = SignalWeights::default();
        let json = serde_json::to_string(&weights).unwrap();
        let back: SignalWeights = serde_json::from_str(&json).unwrap();
        assert_eq!(weights, back);
    }
}
