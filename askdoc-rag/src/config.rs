//! Configuration for the ingestion and answering pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{RagError, Result};

/// Parameters tying a collection to its embedding space.
///
/// The `dimension` is authoritative: the embedding provider must produce
/// vectors of exactly this length, enforced when the pipeline is built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexConfig {
    /// Name of the vector collection.
    pub collection: String,
    /// Dimensionality of the collection's vectors.
    pub dimension: usize,
    /// Default number of hits to retrieve for a query.
    pub top_k: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self { collection: "docs".to_string(), dimension: 384, top_k: 5 }
    }
}

impl IndexConfig {
    /// Create a new builder for constructing an [`IndexConfig`].
    pub fn builder() -> IndexConfigBuilder {
        IndexConfigBuilder::default()
    }
}

/// Builder for constructing a validated [`IndexConfig`].
#[derive(Debug, Clone, Default)]
pub struct IndexConfigBuilder {
    config: IndexConfig,
}

impl IndexConfigBuilder {
    /// Set the collection name.
    pub fn collection(mut self, name: impl Into<String>) -> Self {
        self.config.collection = name.into();
        self
    }

    /// Set the vector dimensionality.
    pub fn dimension(mut self, dimension: usize) -> Self {
        self.config.dimension = dimension;
        self
    }

    /// Set the default number of hits retrieved per query.
    pub fn top_k(mut self, top_k: usize) -> Self {
        self.config.top_k = top_k;
        self
    }

    /// Build the [`IndexConfig`], validating the parameters.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if the collection name is empty or the
    /// dimension is zero.
    pub fn build(self) -> Result<IndexConfig> {
        if self.config.collection.is_empty() {
            return Err(RagError::Config("collection name must not be empty".to_string()));
        }
        if self.config.dimension == 0 {
            return Err(RagError::Config("dimension must be greater than zero".to_string()));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_produces_valid_config() {
        let config = IndexConfig::builder()
            .collection("notes")
            .dimension(128)
            .top_k(3)
            .build()
            .unwrap();
        assert_eq!(config.collection, "notes");
        assert_eq!(config.dimension, 128);
        assert_eq!(config.top_k, 3);
    }

    #[test]
    fn empty_collection_name_is_rejected() {
        let err = IndexConfig::builder().collection("").build().unwrap_err();
        assert!(matches!(err, RagError::Config(_)));
    }

    #[test]
    fn zero_dimension_is_rejected() {
        let err = IndexConfig::builder().dimension(0).build().unwrap_err();
        assert!(matches!(err, RagError::Config(_)));
    }
}
