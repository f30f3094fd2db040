//! Streaming generation client.
//!
//! The generation service answers with newline-delimited JSON fragments,
//! each optionally carrying a `response` text field. The wire is not
//! trustworthy: fragments may be malformed, and the stream may cut out.
//! Parsing is kept in pure functions ([`parse_fragment`], [`drain_lines`])
//! separate from the transport loop so the accumulation rules are
//! testable without a live service.

use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::config::ModelConfig;

/// Errors from a generation request.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The service rejected the request before streaming began.
    #[error("generation service returned status {status}: {body}")]
    Status {
        /// HTTP status code of the initial response.
        status: u16,
        /// Response body, as returned by the service.
        body: String,
    },

    /// The connection or stream failed mid-flight.
    #[error("generation transport error: {0}")]
    Transport(String),

    /// The request exceeded the configured timeout.
    #[error("generation timed out after {0:?}")]
    Timeout(Duration),
}

/// A request to the generation service.
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    /// The fully assembled prompt.
    pub prompt: String,
    /// Base64-encoded images to attach, if any.
    pub images: Vec<String>,
}

impl GenerateRequest {
    /// A text-only request.
    pub fn text(prompt: impl Into<String>) -> Self {
        Self { prompt: prompt.into(), images: Vec::new() }
    }

    /// Attach a base64-encoded image.
    pub fn with_image(mut self, image: String) -> Self {
        self.images.push(image);
        self
    }
}

/// A provider of accumulated text completions.
///
/// The contract returns only the final, fully accumulated answer; callers
/// that need partial results must consume the stream themselves.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Run one generation request to completion and return the answer text.
    async fn generate(&self, request: &GenerateRequest) -> Result<String, GenerateError>;
}

// ── Wire types ─────────────────────────────────────────────────────

#[derive(Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    images: Option<&'a [String]>,
}

#[derive(Deserialize)]
struct StreamFragment {
    #[serde(default)]
    response: Option<String>,
}

/// Parse one stream line into its partial text.
///
/// Returns `None` for lines that are not valid fragment records; a valid
/// record without a `response` field contributes an empty string.
fn parse_fragment(line: &str) -> Option<String> {
    serde_json::from_str::<StreamFragment>(line)
        .ok()
        .map(|fragment| fragment.response.unwrap_or_default())
}

/// Split complete lines out of `buffer` and fold each into `answer`.
///
/// Malformed fragments are skipped; parsed fragments are appended in
/// arrival order, never reordered or deduplicated. Bytes after the last
/// newline stay in the buffer for the next chunk.
fn drain_lines(buffer: &mut Vec<u8>, answer: &mut String) {
    while let Some(pos) = buffer.iter().position(|&b| b == b'\n') {
        let line: Vec<u8> = buffer.drain(..=pos).collect();
        append_fragment(answer, &line);
    }
}

fn append_fragment(answer: &mut String, raw: &[u8]) {
    let line = String::from_utf8_lossy(raw);
    let line = line.trim();
    if line.is_empty() {
        return;
    }
    match parse_fragment(line) {
        Some(text) => answer.push_str(&text),
        None => warn!(fragment = %line, "skipping malformed stream fragment"),
    }
}

// ── Client ─────────────────────────────────────────────────────────

/// A [`Generator`] backed by the Ollama `/api/generate` endpoint.
pub struct OllamaClient {
    config: ModelConfig,
    client: reqwest::Client,
}

impl OllamaClient {
    /// Create a client from configuration.
    pub fn new(config: ModelConfig) -> Result<Self, GenerateError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| GenerateError::Transport(e.to_string()))?;
        Ok(Self { config, client })
    }

    /// The model this client generates with.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    async fn perform(&self, request: &GenerateRequest) -> Result<String, GenerateError> {
        let url = format!("{}/api/generate", self.config.base_url);
        let body = WireRequest {
            model: &self.config.model,
            prompt: &request.prompt,
            images: if request.images.is_empty() { None } else { Some(&request.images) },
        };

        debug!(model = %self.config.model, prompt_len = request.prompt.len(), "generation request");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerateError::Transport(e.to_string()))?;

        // A bad status means there is no fragment stream to parse.
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GenerateError::Status { status, body });
        }

        let mut stream = response.bytes_stream();
        let mut buffer: Vec<u8> = Vec::new();
        let mut answer = String::new();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| GenerateError::Transport(e.to_string()))?;
            buffer.extend_from_slice(&chunk);
            drain_lines(&mut buffer, &mut answer);
        }
        // A final fragment may arrive without a trailing newline.
        append_fragment(&mut answer, &buffer);

        Ok(answer.trim().to_string())
    }
}

#[async_trait]
impl Generator for OllamaClient {
    async fn generate(&self, request: &GenerateRequest) -> Result<String, GenerateError> {
        match timeout(self.config.timeout, self.perform(request)).await {
            Ok(result) => result,
            // Partial accumulation is dropped with the aborted future.
            Err(_) => Err(GenerateError::Timeout(self.config.timeout)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_fragment_with_response_text() {
        assert_eq!(parse_fragment(r#"{"response":"Hel"}"#), Some("Hel".to_string()));
    }

    #[test]
    fn fragment_without_response_field_contributes_nothing() {
        assert_eq!(parse_fragment(r#"{"done":true}"#), Some(String::new()));
    }

    #[test]
    fn malformed_fragment_is_skipped() {
        assert_eq!(parse_fragment("garbage"), None);
        assert_eq!(parse_fragment("{not json"), None);
    }

    #[test]
    fn accumulates_fragments_in_arrival_order_skipping_garbage() {
        let mut answer = String::new();
        for line in [r#"{"response":"Hel"}"#, "garbage", r#"{"response":"lo"}"#] {
            append_fragment(&mut answer, line.as_bytes());
        }
        assert_eq!(answer.trim(), "Hello");
    }

    #[test]
    fn drain_lines_handles_fragments_split_across_chunks() {
        let mut buffer = Vec::new();
        let mut answer = String::new();

        buffer.extend_from_slice(br#"{"response":"Hel"#);
        drain_lines(&mut buffer, &mut answer);
        assert_eq!(answer, "");

        buffer.extend_from_slice(b"lo\"}\n{\"response\":\" world\"}\n");
        drain_lines(&mut buffer, &mut answer);
        assert_eq!(answer, "Hello world");
        assert!(buffer.is_empty());
    }

    #[test]
    fn trailing_fragment_without_newline_is_still_counted() {
        let mut buffer = Vec::new();
        let mut answer = String::new();
        buffer.extend_from_slice(br#"{"response":"tail"}"#);
        drain_lines(&mut buffer, &mut answer);
        append_fragment(&mut answer, &buffer);
        assert_eq!(answer, "tail");
    }

    #[test]
    fn status_error_carries_code_and_body() {
        let err = GenerateError::Status { status: 503, body: "overloaded".to_string() };
        let rendered = err.to_string();
        assert!(rendered.contains("503"));
        assert!(rendered.contains("overloaded"));
    }

    #[test]
    fn request_builder_attaches_images() {
        let request = GenerateRequest::text("hi").with_image("aGVsbG8=".to_string());
        assert_eq!(request.images.len(), 1);
    }
}
