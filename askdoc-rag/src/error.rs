//! Error types for the `askdoc-rag` crate.

use thiserror::Error;

/// Errors that can occur in ingestion and retrieval operations.
#[derive(Debug, Error)]
pub enum RagError {
    /// An error from an embedding provider.
    #[error("embedding error ({provider}): {message}")]
    Embedding {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// An error from a vector store backend.
    #[error("vector store error ({backend}): {message}")]
    VectorStore {
        /// The vector store backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },

    /// A configuration validation error, including dimension mismatches
    /// between the embedding provider and the collection.
    #[error("configuration error: {0}")]
    Config(String),

    /// A content extraction failure for a single file.
    #[error(transparent)]
    Extract(#[from] askdoc_extract::ExtractError),
}

/// A convenience result type for ingestion and retrieval operations.
pub type Result<T> = std::result::Result<T, RagError>;

/// Failure of an answer request, split by stage so callers can react
/// differently to a retrieval outage versus a model outage.
#[derive(Debug, Error)]
pub enum AnswerError {
    /// Embedding the query or searching the store failed.
    #[error("retrieval failed: {0}")]
    Retrieval(#[from] RagError),

    /// The generation service failed or timed out.
    #[error("generation failed: {0}")]
    Generation(#[from] askdoc_model::GenerateError),
}
