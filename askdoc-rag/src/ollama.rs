//! Ollama embedding provider.
//!
//! Calls the `/api/embeddings` endpoint. Text capability only; image
//! embedding reports unsupported, which the pipeline handles as a
//! per-file skip.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};

/// The default embedding model.
const DEFAULT_MODEL: &str = "all-minilm";

/// An [`EmbeddingProvider`] backed by an Ollama embedding model.
///
/// The `dimensions` value is configuration: it must match what the chosen
/// model actually produces, and the pipeline verifies returned vectors
/// against the collection dimension.
#[derive(Debug)]
pub struct OllamaEmbedder {
    client: reqwest::Client,
    base_url: String,
    model: String,
    dimensions: usize,
}

impl OllamaEmbedder {
    /// Create a provider for the given endpoint and dimensionality.
    pub fn new(base_url: impl Into<String>, dimensions: usize) -> Result<Self> {
        let base_url = base_url.into();
        if base_url.is_empty() {
            return Err(RagError::Embedding {
                provider: "Ollama".into(),
                message: "base URL must not be empty".into(),
            });
        }

        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
            model: DEFAULT_MODEL.into(),
            dimensions,
        })
    }

    /// Set the embedding model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

// ── Wire types ─────────────────────────────────────────────────────

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    embedding: Vec<f32>,
}

#[async_trait]
impl EmbeddingProvider for OllamaEmbedder {
    async fn embed_text(&self, text: &str) -> Result<Vec<f32>> {
        debug!(provider = "Ollama", model = %self.model, text_len = text.len(), "embedding text");

        let url = format!("{}/api/embeddings", self.base_url);
        let request_body = EmbeddingRequest { model: &self.model, prompt: text };

        let response = self
            .client
            .post(&url)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(provider = "Ollama", error = %e, "request failed");
                RagError::Embedding {
                    provider: "Ollama".into(),
                    message: format!("request failed: {e}"),
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(provider = "Ollama", %status, "API error");
            return Err(RagError::Embedding {
                provider: "Ollama".into(),
                message: format!("API returned {status}: {body}"),
            });
        }

        let embedding_response: EmbeddingResponse = response.json().await.map_err(|e| {
            error!(provider = "Ollama", error = %e, "failed to parse response");
            RagError::Embedding {
                provider: "Ollama".into(),
                message: format!("failed to parse response: {e}"),
            }
        })?;

        Ok(embedding_response.embedding)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_base_url_is_rejected() {
        let err = OllamaEmbedder::new("", 384).unwrap_err();
        assert!(matches!(err, RagError::Embedding { .. }));
    }

    #[test]
    fn dimensions_come_from_configuration() {
        let embedder = OllamaEmbedder::new("http://localhost:11434", 384).unwrap();
        assert_eq!(embedder.dimensions(), 384);
    }

    #[tokio::test]
    async fn image_capability_is_unsupported() {
        let embedder = OllamaEmbedder::new("http://localhost:11434", 384).unwrap();
        let raster = image::RgbImage::new(1, 1);
        let err = embedder.embed_image(&raster).await.unwrap_err();
        assert!(matches!(err, RagError::Embedding { .. }));
    }
}
