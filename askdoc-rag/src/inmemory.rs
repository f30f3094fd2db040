//! In-memory vector store using cosine similarity.
//!
//! [`InMemoryStore`] keeps collections in nested `HashMap`s behind a
//! `tokio::sync::RwLock`. It mirrors the backend contract closely enough
//! to stand in for Qdrant in tests and offline runs, including rejecting
//! vectors whose length does not match the collection dimension.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::document::{DocumentPoint, SearchHit};
use crate::error::{RagError, Result};
use crate::vectorstore::VectorStore;

struct Collection {
    dimension: usize,
    points: HashMap<u64, DocumentPoint>,
}

/// An in-memory [`VectorStore`] with cosine scoring.
#[derive(Default)]
pub struct InMemoryStore {
    collections: RwLock<HashMap<String, Collection>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn store_error(message: impl Into<String>) -> RagError {
    RagError::VectorStore { backend: "in-memory".to_string(), message: message.into() }
}

/// Cosine similarity; 0.0 when either vector has zero magnitude.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[async_trait]
impl VectorStore for InMemoryStore {
    async fn collection_exists(&self, name: &str) -> Result<bool> {
        Ok(self.collections.read().await.contains_key(name))
    }

    async fn create_collection(&self, name: &str, dimension: usize) -> Result<()> {
        let mut collections = self.collections.write().await;
        if collections.contains_key(name) {
            return Err(store_error(format!("collection '{name}' already exists")));
        }
        collections
            .insert(name.to_string(), Collection { dimension, points: HashMap::new() });
        Ok(())
    }

    async fn delete_collection(&self, name: &str) -> Result<()> {
        self.collections.write().await.remove(name);
        Ok(())
    }

    async fn upsert(&self, collection: &str, points: &[DocumentPoint]) -> Result<()> {
        if points.is_empty() {
            return Ok(());
        }
        let mut collections = self.collections.write().await;
        let entry = collections
            .get_mut(collection)
            .ok_or_else(|| store_error(format!("collection '{collection}' does not exist")))?;
        for point in points {
            if point.vector.len() != entry.dimension {
                return Err(store_error(format!(
                    "vector length {} does not match collection dimension {}",
                    point.vector.len(),
                    entry.dimension
                )));
            }
            entry.points.insert(point.id, point.clone());
        }
        Ok(())
    }

    async fn search(
        &self,
        collection: &str,
        vector: &[f32],
        top_k: usize,
    ) -> Result<Vec<SearchHit>> {
        if top_k == 0 {
            return Ok(Vec::new());
        }
        let collections = self.collections.read().await;
        let entry = collections
            .get(collection)
            .ok_or_else(|| store_error(format!("collection '{collection}' does not exist")))?;

        let mut hits: Vec<SearchHit> = entry
            .points
            .values()
            .map(|point| SearchHit {
                content: point.content.clone(),
                source_path: point.source_path.clone(),
                score: cosine_similarity(&point.vector, vector),
            })
            .collect();

        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        hits.truncate(top_k);
        Ok(hits)
    }
}
