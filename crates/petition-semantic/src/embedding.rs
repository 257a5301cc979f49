//! Embedding models for text vectorization
//!
//! The semantic signal compares submissions through embedding vectors.
//! This module defines the [`Embedder`] trait and a deterministic
//! hash-based implementation that exercises the full pipeline without a
//! model server; real providers (e.g. Ollama) live in [`crate::ollama`].

use crate::SemanticError;
use async_trait::async_trait;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Trait for embedding models
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Generate an embedding vector for the given text
    async fn embed(&self, text: &str) -> Result<Vec<f32>, SemanticError>;

    /// Dimension of the embeddings produced by this model
    fn dimension(&self) -> usize;
}

/// Deterministic hash-based embedder
///
/// Generates pseudo-random but reproducible unit vectors from text
/// content. Useful for tests and offline deployments:
///
/// - **Deterministic**: same text always produces the same embedding
/// - **Normalized**: all vectors have unit length
/// - **Diverse**: different texts produce different embeddings
///
/// Hash-based vectors carry no real semantics; two related texts are not
/// closer than two unrelated ones. Production deployments should plug in
/// a model-backed embedder.
pub struct HashEmbedder {
    dimension: usize,
}

impl HashEmbedder {
    /// Create a hash embedder of the given dimension
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    /// Hash text with a seed to get a deterministic f32 value in [-1, 1]
    fn hash_with_seed(text: &str, seed: u64) -> f32 {
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        seed.hash(&mut hasher);
        let hash_value = hasher.finish();

        let normalized = (hash_value as f64 / u64::MAX as f64) * 2.0 - 1.0;
        normalized as f32
    }
}

#[async_trait]
impl Embedder for HashEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, SemanticError> {
        if text.is_empty() {
            return Err(SemanticError::InvalidInput("empty text cannot be embedded".to_string()));
        }

        let mut embedding = Vec::with_capacity(self.dimension);
        for i in 0..self.dimension {
            embedding.push(Self::hash_with_seed(text, i as u64));
        }

        // Normalize to unit length for cosine similarity
        let magnitude: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for value in &mut embedding {
                *value /= magnitude;
            }
        }

        Ok(embedding)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

/// Calculate cosine similarity between two embedding vectors
///
/// Returns a value in [-1, 1]: 1 for identical direction, 0 for
/// orthogonal, -1 for opposite. Zero-magnitude input scores 0.
///
/// # Panics
///
/// Panics if the vectors have different lengths.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    assert_eq!(a.len(), b.len(), "Vectors must have same length");

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let magnitude_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let magnitude_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }

    dot_product / (magnitude_a * magnitude_b)
}
