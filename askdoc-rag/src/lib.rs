//! # askdoc-rag
//!
//! The ingestion and retrieval-augmented answering pipeline behind askdoc.
//!
//! Write path: [`IngestionPipeline`] walks input paths, extracts content per
//! file kind, embeds it, and batches the resulting points into a
//! [`VectorStore`] collection. Read path: [`RagEngine`] embeds a query,
//! retrieves the most similar points, assembles a context-bearing prompt,
//! and delegates to a [`Generator`](askdoc_model::Generator) for the final
//! answer.
//!
//! Backends are injected as `Arc<dyn …>` trait objects so deployments can
//! mix and match: [`QdrantStore`] or [`InMemoryStore`] for storage,
//! [`OllamaEmbedder`] or [`HashEmbedder`] for embeddings.

pub mod config;
pub mod document;
pub mod embedding;
pub mod engine;
pub mod error;
pub mod hash;
pub mod ingest;
pub mod inmemory;
pub mod ollama;
pub mod qdrant;
pub mod vectorstore;

pub use config::IndexConfig;
pub use document::{DocumentPoint, QueryInput, SearchHit};
pub use embedding::EmbeddingProvider;
pub use engine::RagEngine;
pub use error::{AnswerError, RagError, Result};
pub use hash::HashEmbedder;
pub use ingest::{IngestReport, IngestionPipeline};
pub use inmemory::InMemoryStore;
pub use ollama::OllamaEmbedder;
pub use qdrant::QdrantStore;
pub use vectorstore::VectorStore;
