//! Deterministic hashed embeddings.
//!
//! [`HashEmbedder`] maps content into hash-bucketed feature vectors:
//! words and word bigrams for text, raw pixel bytes for images. The
//! output is L2-normalized so cosine similarity reduces to a dot product.
//! It needs no model service, making it the provider of choice for tests
//! and offline runs; identical input always yields the identical vector.

use async_trait::async_trait;
use image::RgbImage;

use crate::embedding::EmbeddingProvider;
use crate::error::Result;

/// A deterministic, model-free [`EmbeddingProvider`] supporting both the
/// text and image capabilities.
#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dimensions: usize,
}

impl HashEmbedder {
    /// Create an embedder producing vectors of the given dimensionality.
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }
}

/// Stable string hash; the basis for bucket assignment.
fn bucket_hash(s: &str) -> u64 {
    s.bytes().fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(u64::from(b)))
}

fn l2_normalize(v: &mut [f32]) {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

#[async_trait]
impl EmbeddingProvider for HashEmbedder {
    async fn embed_text(&self, text: &str) -> Result<Vec<f32>> {
        let normalized: String = text
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric() || c.is_whitespace())
            .collect();
        let words: Vec<&str> = normalized.split_whitespace().collect();

        let mut vector = vec![0.0f32; self.dimensions];
        for word in &words {
            let hash = bucket_hash(word);
            vector[(hash as usize) % self.dimensions] += 1.0;
            // A second bucket for longer words spreads the distribution.
            if word.len() > 3 {
                vector[((hash >> 16) as usize) % self.dimensions] += 0.5;
            }
        }
        for window in words.windows(2) {
            let bigram = format!("{} {}", window[0], window[1]);
            vector[(bucket_hash(&bigram) as usize) % self.dimensions] += 0.3;
        }

        l2_normalize(&mut vector);
        Ok(vector)
    }

    async fn embed_image(&self, raster: &RgbImage) -> Result<Vec<f32>> {
        let mut vector = vec![0.0f32; self.dimensions];
        for (i, byte) in raster.as_raw().iter().enumerate() {
            let bucket = (i.wrapping_mul(31).wrapping_add(usize::from(*byte))) % self.dimensions;
            vector[bucket] += f32::from(*byte) / 255.0;
        }
        l2_normalize(&mut vector);
        Ok(vector)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cosine(a: &[f32], b: &[f32]) -> f32 {
        a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
    }

    #[tokio::test]
    async fn identical_input_yields_identical_vectors() {
        let embedder = HashEmbedder::new(64);
        let a = embedder.embed_text("Django is a web framework.").await.unwrap();
        let b = embedder.embed_text("Django is a web framework.").await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn output_is_l2_normalized() {
        let embedder = HashEmbedder::new(64);
        let v = embedder.embed_text("some text to embed").await.unwrap();
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[tokio::test]
    async fn word_overlap_scores_higher_than_disjoint_text() {
        let embedder = HashEmbedder::new(384);
        let doc = embedder.embed_text("Django is a web framework.").await.unwrap();
        let similar = embedder.embed_text("what is a web framework").await.unwrap();
        let unrelated = embedder.embed_text("grilled cheese sandwich recipe").await.unwrap();

        assert!(cosine(&doc, &similar) > cosine(&doc, &unrelated));
    }

    #[tokio::test]
    async fn embeds_images_deterministically() {
        let embedder = HashEmbedder::new(64);
        let raster = RgbImage::from_pixel(4, 4, image::Rgb([100, 150, 200]));
        let a = embedder.embed_image(&raster).await.unwrap();
        let b = embedder.embed_image(&raster).await.unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[tokio::test]
    async fn empty_text_yields_a_zero_vector() {
        let embedder = HashEmbedder::new(16);
        let v = embedder.embed_text("").await.unwrap();
        assert!(v.iter().all(|x| *x == 0.0));
    }
}
