//! Answer orchestration: embed the query, retrieve context, generate.

use std::sync::Arc;

use askdoc_model::{GenerateRequest, Generator};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use tracing::{debug, info};

use crate::config::IndexConfig;
use crate::document::{QueryInput, SearchHit};
use crate::embedding::EmbeddingProvider;
use crate::error::{AnswerError, RagError, Result};
use crate::vectorstore::VectorStore;

/// Stands in for retrieved content when the search comes back empty;
/// generation proceeds with it rather than failing.
const NO_CONTEXT_PLACEHOLDER: &str = "No relevant context was found.";

/// The read path: a query in, an answer out.
///
/// Composes the shared store and embedding handles with a
/// [`Generator`]. Failures keep their stage: anything up to and including
/// the search surfaces as [`AnswerError::Retrieval`], the model call as
/// [`AnswerError::Generation`].
pub struct RagEngine {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
    generator: Arc<dyn Generator>,
    config: IndexConfig,
}

impl RagEngine {
    /// Create an engine over injected handles.
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStore>,
        generator: Arc<dyn Generator>,
        config: IndexConfig,
    ) -> Self {
        Self { embedder, store, generator, config }
    }

    /// Answer a query against the indexed collection.
    ///
    /// Retrieves the `top_k` most similar points, assembles a prompt with
    /// a numbered context block and the literal query text, and returns
    /// the generator's accumulated answer. An optional raw image is
    /// base64-encoded and attached to the generation request.
    pub async fn ask(
        &self,
        query: &QueryInput,
        top_k: usize,
        image: Option<&[u8]>,
    ) -> std::result::Result<String, AnswerError> {
        let (query_text, vector) =
            self.embed_query(query).await.map_err(AnswerError::Retrieval)?;

        let hits = self
            .store
            .search(&self.config.collection, &vector, top_k)
            .await
            .map_err(AnswerError::Retrieval)?;
        debug!(hits = hits.len(), top_k, "retrieved context");

        let prompt = build_prompt(&query_text, &build_context(&hits));

        let mut request = GenerateRequest::text(prompt);
        if let Some(bytes) = image {
            request = request.with_image(BASE64.encode(bytes));
        }

        let answer =
            self.generator.generate(&request).await.map_err(AnswerError::Generation)?;
        info!(answer_len = answer.len(), "answered query");
        Ok(answer)
    }

    /// Answer with the configured default `top_k`.
    pub async fn ask_default(
        &self,
        query: &QueryInput,
        image: Option<&[u8]>,
    ) -> std::result::Result<String, AnswerError> {
        self.ask(query, self.config.top_k, image).await
    }

    /// Embed the query and pick the text that represents it in the prompt.
    async fn embed_query(&self, query: &QueryInput) -> Result<(String, Vec<f32>)> {
        match query {
            QueryInput::Text(text) => {
                let vector = self.embedder.embed_text(text).await?;
                Ok((text.clone(), vector))
            }
            QueryInput::ImagePath(path) => match askdoc_extract::extract(path).await? {
                askdoc_extract::ExtractedContent::Image { label, raster } => {
                    let vector = self.embedder.embed_image(&raster).await?;
                    Ok((label, vector))
                }
                askdoc_extract::ExtractedContent::Text(_) => Err(RagError::Config(format!(
                    "query path {} is not an image",
                    path.display()
                ))),
            },
        }
    }
}

/// Number the hits 1-indexed in retrieval order, blank-line separated.
fn build_context(hits: &[SearchHit]) -> String {
    if hits.is_empty() {
        return NO_CONTEXT_PLACEHOLDER.to_string();
    }
    hits.iter()
        .enumerate()
        .map(|(i, hit)| format!("{}. {}", i + 1, hit.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Assemble the final prompt with labeled sections.
fn build_prompt(query: &str, context: &str) -> String {
    format!("Context:\n{context}\n\nUser Query: {query}")
}
