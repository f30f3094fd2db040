//! Embedding provider trait for text and image vectors.

use async_trait::async_trait;
use image::RgbImage;

use crate::error::{RagError, Result};

/// A provider that turns content into fixed-dimension vectors.
///
/// A provider may support text only, or both text and images; the default
/// [`embed_image`](EmbeddingProvider::embed_image) reports the capability
/// as unsupported, which the ingestion pipeline treats as a per-file skip.
/// When separate models back the two capabilities, both must be configured
/// to the same dimensionality as the active collection — the dimension is
/// declared via [`dimensions`](EmbeddingProvider::dimensions), never
/// inferred from an output vector.
///
/// Embedding must be deterministic for identical input so that stub
/// providers yield reproducible tests.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate an embedding vector for a text input.
    async fn embed_text(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate an embedding vector for a decoded RGB image.
    async fn embed_image(&self, raster: &RgbImage) -> Result<Vec<f32>> {
        let _ = raster;
        Err(RagError::Embedding {
            provider: "text-only".to_string(),
            message: "image embedding not supported by this provider".to_string(),
        })
    }

    /// The dimensionality of vectors produced by this provider.
    fn dimensions(&self) -> usize;
}
