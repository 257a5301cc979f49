//! Pairwise scoring of a candidate against existing submissions
//!
//! Five signals per pair, combined in two tiers: edit/Jaccard/cosine
//! composites for title and body, position-boosted keyword overlap for
//! each field, and the pluggable semantic signal. Candidate-side features
//! are extracted once per invocation; everything pair-shaped goes through
//! the invocation memo.

use crate::config::DetectorConfig;
use crate::memo::{MetricKind, ScoreMemo};
use petition_domain::keywords::{keyword_list, keyword_set};
use petition_domain::normalize::normalize;
use petition_domain::similarity::{
    cosine_similarity, jaccard_similarity, levenshtein_similarity, positional_overlap,
};
use petition_domain::traits::SemanticScorer;
use petition_domain::weights::MetricWeights;
use petition_domain::{SignalScores, SimilarityScore, Submission};
use std::collections::HashSet;

/// Comparison features of one text field
pub(crate) struct TextFeatures {
    pub(crate) normalized: String,
    pub(crate) keywords: HashSet<String>,
    pub(crate) ordered_keywords: Vec<String>,
}

impl TextFeatures {
    pub(crate) fn extract(text: &str, min_keyword_len: usize) -> Self {
        let normalized = normalize(text);
        let keywords = keyword_set(&normalized, min_keyword_len);
        let ordered_keywords = keyword_list(&normalized, min_keyword_len);
        Self { normalized, keywords, ordered_keywords }
    }
}

/// Candidate-side features, extracted once per duplicate check
pub(crate) struct Candidate {
    pub(crate) title: TextFeatures,
    pub(crate) body: TextFeatures,
    /// Semantic providers receive the raw body, not the normalized form
    pub(crate) raw_body: String,
}

impl Candidate {
    pub(crate) fn extract(title: &str, body: &str, min_keyword_len: usize) -> Self {
        Self {
            title: TextFeatures::extract(title, min_keyword_len),
            body: TextFeatures::extract(body, min_keyword_len),
            raw_body: body.to_string(),
        }
    }
}

/// Edit/Jaccard/cosine composite for one field pair
fn field_similarity(
    memo: &ScoreMemo,
    a: &TextFeatures,
    b: &TextFeatures,
    weights: &MetricWeights,
) -> f64 {
    let edit = memo.get_or_compute(MetricKind::Edit, &a.normalized, &b.normalized, || {
        levenshtein_similarity(&a.normalized, &b.normalized)
    });
    let jaccard = memo.get_or_compute(MetricKind::Jaccard, &a.normalized, &b.normalized, || {
        jaccard_similarity(&a.keywords, &b.keywords)
    });
    let cosine = memo.get_or_compute(MetricKind::Cosine, &a.normalized, &b.normalized, || {
        cosine_similarity(&a.normalized, &b.normalized)
    });
    weights.combine(edit, jaccard, cosine)
}

async fn semantic_signal<H: SemanticScorer>(
    candidate: &Candidate,
    existing: &Submission,
    memo: &ScoreMemo,
    semantic: &H,
) -> f64 {
    if let Some(score) = memo.get(MetricKind::Semantic, &candidate.raw_body, &existing.body) {
        return score;
    }
    // A failing provider contributes 0 instead of failing the check
    let score = match semantic.score(&candidate.raw_body, &existing.body).await {
        Ok(score) => score.clamp(0.0, 1.0),
        Err(e) => {
            tracing::warn!(error = %e, "semantic scorer failed, signal scored as 0");
            0.0
        }
    };
    memo.insert(MetricKind::Semantic, &candidate.raw_body, &existing.body, score);
    score
}

/// Score one candidate / existing pair across all five signals
pub(crate) async fn score_pair<H: SemanticScorer>(
    candidate: &Candidate,
    existing: &Submission,
    config: &DetectorConfig,
    memo: &ScoreMemo,
    semantic: &H,
) -> SimilarityScore {
    let existing_title = TextFeatures::extract(&existing.title, config.min_keyword_len);
    let existing_body = TextFeatures::extract(&existing.body, config.min_keyword_len);

    let title = field_similarity(memo, &candidate.title, &existing_title, &config.title_weights);
    let body = field_similarity(memo, &candidate.body, &existing_body, &config.body_weights);

    let title_overlap = memo.get_or_compute(
        MetricKind::Overlap,
        &candidate.title.normalized,
        &existing_title.normalized,
        || positional_overlap(&candidate.title.ordered_keywords, &existing_title.ordered_keywords),
    );
    let body_overlap = memo.get_or_compute(
        MetricKind::Overlap,
        &candidate.body.normalized,
        &existing_body.normalized,
        || positional_overlap(&candidate.body.ordered_keywords, &existing_body.ordered_keywords),
    );

    let semantic = semantic_signal(candidate, existing, memo, semantic).await;

    let signals = SignalScores { title, body, title_overlap, body_overlap, semantic };
    let combined = config.signal_weights.combine(&signals);

    SimilarityScore { submission: existing.id, signals, combined }
}
