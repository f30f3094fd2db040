//! Data types for indexed points, search hits, and queries.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One ingested unit: the extracted content of a single file with its
/// embedding vector.
///
/// Ids are assigned sequentially within one ingestion run, counting only
/// files that embedded successfully. Points are never mutated after
/// creation; re-upserting an id replaces the prior point wholesale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentPoint {
    /// Sequential identifier within the ingestion run.
    pub id: u64,
    /// Extracted text, or the synthetic label for images.
    pub content: String,
    /// Filesystem path the content came from.
    pub source_path: String,
    /// Embedding vector, fixed length equal to the collection dimension.
    pub vector: Vec<f32>,
}

/// A similarity search result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// The stored content of the matching point.
    pub content: String,
    /// The stored source path of the matching point.
    pub source_path: String,
    /// Similarity under the collection's metric; in `[-1, 1]` for cosine.
    pub score: f32,
}

/// A user query: free text, or a reference to an image file whose raster
/// is embedded via the image capability.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryInput {
    /// A natural-language question.
    Text(String),
    /// Path to an image file to query by.
    ImagePath(PathBuf),
}
