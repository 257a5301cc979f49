//! Ollama embedding provider
//!
//! Integrates with Ollama's local embeddings API so the semantic signal
//! can run against a real model without network egress or API costs.
//!
//! # Features
//!
//! - Async HTTP communication with the Ollama API
//! - Configurable endpoint and model
//! - Retry logic with exponential backoff
//! - Timeout handling

use crate::embedding::Embedder;
use crate::SemanticError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default timeout for embedding requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of retry attempts
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Ollama API embedder for local models
pub struct OllamaEmbedder {
    endpoint: String,
    model: String,
    dimension: usize,
    client: reqwest::Client,
    max_retries: u32,
}

/// Request body for the Ollama embeddings API
#[derive(Serialize)]
struct OllamaEmbeddingRequest {
    model: String,
    prompt: String,
}

/// Response from the Ollama embeddings API
#[derive(Deserialize)]
struct OllamaEmbeddingResponse {
    embedding: Vec<f32>,
}

impl OllamaEmbedder {
    /// Create a new Ollama embedder
    ///
    /// # Parameters
    ///
    /// - `endpoint`: Ollama API endpoint (e.g., "http://localhost:11434")
    /// - `model`: Embedding model to use (e.g., "nomic-embed-text")
    /// - `dimension`: Dimension the model produces (e.g., 768)
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use petition_semantic::OllamaEmbedder;
    ///
    /// let embedder = OllamaEmbedder::new("http://localhost:11434", "nomic-embed-text", 768);
    /// ```
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>, dimension: usize) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("reqwest client with static configuration");

        Self {
            endpoint: endpoint.into(),
            model: model.into(),
            dimension,
            client,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Create an embedder against the default local endpoint
    pub fn default_endpoint(model: impl Into<String>, dimension: usize) -> Self {
        Self::new(DEFAULT_ENDPOINT, model, dimension)
    }

    /// Set the maximum number of retry attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    async fn request_embedding(&self, text: &str) -> Result<Vec<f32>, SemanticError> {
        let url = format!("{}/api/embeddings", self.endpoint);

        let request_body = OllamaEmbeddingRequest {
            model: self.model.clone(),
            prompt: text.to_string(),
        };

        // Retry logic with exponential backoff
        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self.client.post(&url).json(&request_body).send().await {
                Ok(response) => {
                    if response.status().is_success() {
                        return match response.json::<OllamaEmbeddingResponse>().await {
                            Ok(parsed) => Ok(parsed.embedding),
                            Err(e) => Err(SemanticError::InvalidResponse(format!(
                                "Failed to parse response: {}",
                                e
                            ))),
                        };
                    } else if response.status() == reqwest::StatusCode::NOT_FOUND {
                        return Err(SemanticError::ModelNotAvailable(self.model.clone()));
                    } else {
                        let status = response.status();
                        let error_text =
                            response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
                        last_error = Some(SemanticError::Communication(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    }
                }
                Err(e) => {
                    last_error =
                        Some(SemanticError::Communication(format!("Request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                // Exponential backoff: 1s, 2s, 4s, etc.
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| SemanticError::Communication("Max retries exceeded".to_string())))
    }
}

#[async_trait]
impl Embedder for OllamaEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, SemanticError> {
        if text.is_empty() {
            return Err(SemanticError::InvalidInput("empty text cannot be embedded".to_string()));
        }

        let embedding = self.request_embedding(text).await?;
        if embedding.len() != self.dimension {
            return Err(SemanticError::InvalidResponse(format!(
                "Expected {} dimensions, got {}",
                self.dimension,
                embedding.len()
            )));
        }
        Ok(embedding)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ollama_embedder_creation() {
        let embedder = OllamaEmbedder::new("http://localhost:11434", "nomic-embed-text", 768);
        assert_eq!(embedder.endpoint, "http://localhost:11434");
        assert_eq!(embedder.model, "nomic-embed-text");
        assert_eq!(embedder.dimension(), 768);
        assert_eq!(embedder.max_retries, DEFAULT_MAX_RETRIES);
    }

    #[test]
    fn test_ollama_embedder_default_endpoint() {
        let embedder = OllamaEmbedder::default_endpoint("nomic-embed-text", 768);
        assert_eq!(embedder.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_ollama_embedder_with_max_retries() {
        let embedder = OllamaEmbedder::new("http://localhost:11434", "nomic-embed-text", 768)
            .with_max_retries(5);
        assert_eq!(embedder.max_retries, 5);
    }

    #[tokio::test]
    async fn test_ollama_rejects_empty_text() {
        let embedder = OllamaEmbedder::default_endpoint("nomic-embed-text", 768);
        let result = embedder.embed("").await;
        assert!(matches!(result, Err(SemanticError::InvalidInput(_))));
    }

    // Integration test (requires running Ollama)
    #[tokio::test]
    #[ignore] // Only run when Ollama is available
    async fn test_ollama_embed_integration() {
        let embedder = OllamaEmbedder::default_endpoint("nomic-embed-text", 768);
        let result = embedder.embed("The road needs repair").await;

        if let Ok(embedding) = result {
            assert_eq!(embedding.len(), 768);
        }
    }

    #[tokio::test]
    async fn test_ollama_error_handling() {
        // Unreachable endpoint triggers a communication error
        let embedder =
            OllamaEmbedder::new("http://127.0.0.1:9", "nomic-embed-text", 768).with_max_retries(1);

        let result = embedder.embed("test").await;
        match result {
            Err(SemanticError::Communication(_)) => {}
            other => panic!("Expected Communication error, got {:?}", other.map(|v| v.len())),
        }
    }
}
