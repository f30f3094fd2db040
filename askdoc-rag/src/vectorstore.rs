//! Vector store trait: collection lifecycle, upsert, similarity search.

use async_trait::async_trait;

use crate::document::{DocumentPoint, SearchHit};
use crate::error::Result;

/// A storage backend for embedding vectors with cosine similarity search.
///
/// Implementations manage named collections of [`DocumentPoint`]s. Handles
/// are long-lived and safe for concurrent use; a destructive
/// delete-and-recreate racing an in-flight search or upsert against the
/// same collection is a serialization requirement for the deployment, not
/// something the store resolves.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Whether a collection with this name exists.
    async fn collection_exists(&self, name: &str) -> Result<bool>;

    /// Create a named collection with the given dimensionality and cosine
    /// metric.
    ///
    /// # Errors
    ///
    /// Fails if a collection with the same name already exists. Destroying
    /// an existing collection is a separate, explicit operation
    /// ([`delete_collection`](VectorStore::delete_collection)).
    async fn create_collection(&self, name: &str, dimension: usize) -> Result<()>;

    /// Delete a named collection and all its points. Irreversible.
    async fn delete_collection(&self, name: &str) -> Result<()>;

    /// Upsert points in one batch. Idempotent on id: re-upserting an id
    /// replaces the prior point. An empty batch is a no-op.
    async fn upsert(&self, collection: &str, points: &[DocumentPoint]) -> Result<()>;

    /// Return at most `top_k` hits ordered by descending similarity.
    ///
    /// An empty collection yields an empty result, and `top_k == 0`
    /// returns empty without touching the backend.
    async fn search(
        &self,
        collection: &str,
        vector: &[f32],
        top_k: usize,
    ) -> Result<Vec<SearchHit>>;
}
