//! Petition Semantic Similarity Layer
//!
//! Pluggable implementations of the `SemanticScorer` trait from
//! `petition-domain`. The detector treats this signal as optional: the
//! default [`NoopScorer`] contributes 0, and any provider failure is
//! logged and scored as 0 rather than failing the check.
//!
//! # Providers
//!
//! - [`NoopScorer`]: inert default, always 0
//! - [`FixedScorer`]: deterministic scores (and failures) for testing
//! - [`EmbeddingScorer`]: cosine over any [`Embedder`] - the hash-based
//!   [`HashEmbedder`] for offline use, [`OllamaEmbedder`] for a real model
//!
//! # Examples
//!
//! ```
//! use petition_domain::traits::SemanticScorer;
//! use petition_semantic::{EmbeddingScorer, HashEmbedder};
//!
//! # async fn run() {
//! let scorer = EmbeddingScorer::new(HashEmbedder::new(128));
//! let score = scorer.score("repave the road", "repave the road").await.unwrap();
//! assert!((score - 1.0).abs() < 1e-6);
//! # }
//! ```

#![warn(missing_docs)]

pub mod embedding;
pub mod ollama;

use async_trait::async_trait;
use petition_domain::traits::SemanticScorer;
use thiserror::Error;

pub use embedding::{cosine_similarity, Embedder, HashEmbedder};
pub use ollama::OllamaEmbedder;

/// Errors that can occur during semantic scoring
#[derive(Error, Debug)]
pub enum SemanticError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from the provider
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Invalid input text
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// The inert default strategy: every pair scores 0
///
/// Keeps the semantic slot of the combined score empty until a real
/// provider is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopScorer;

#[async_trait]
impl SemanticScorer for NoopScorer {
    type Error = SemanticError;

    async fn score(&self, _a: &str, _b: &str) -> Result<f64, Self::Error> {
        Ok(0.0)
    }
}

/// Deterministic scorer for tests: a fixed score, or a fixed failure
#[derive(Debug, Clone, Copy)]
pub struct FixedScorer {
    score: f64,
    fail: bool,
}

impl FixedScorer {
    /// Scorer that answers every pair with the given score
    pub fn new(score: f64) -> Self {
        Self { score, fail: false }
    }

    /// Scorer that fails every request
    pub fn failing() -> Self {
        Self { score: 0.0, fail: true }
    }
}

#[async_trait]
impl SemanticScorer for FixedScorer {
    type Error = SemanticError;

    async fn score(&self, _a: &str, _b: &str) -> Result<f64, Self::Error> {
        if self.fail {
            return Err(SemanticError::Communication("scripted failure".to_string()));
        }
        Ok(self.score)
    }
}

/// Adapts any [`Embedder`] into a [`SemanticScorer`] via cosine similarity
///
/// Negative cosine values clamp to 0 so the signal stays in [0, 1].
pub struct EmbeddingScorer<M> {
    embedder: M,
}

impl<M: Embedder> EmbeddingScorer<M> {
    /// Wrap an embedder
    pub fn new(embedder: M) -> Self {
        Self { embedder }
    }
}

#[async_trait]
impl<M: Embedder> SemanticScorer for EmbeddingScorer<M> {
    type Error = SemanticError;

    async fn score(&self, a: &str, b: &str) -> Result<f64, Self::Error> {
        let embedding_a = self.embedder.embed(a).await?;
        let embedding_b = self.embedder.embed(b).await?;
        let similarity = cosine_similarity(&embedding_a, &embedding_b);
        Ok(f64::from(similarity).clamp(0.0, 1.0))
    }
}
