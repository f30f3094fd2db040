//! # askdoc-model
//!
//! Client for the generation service consumed by askdoc.
//!
//! The service speaks the Ollama `/api/generate` contract: a JSON request
//! carrying a prompt (and optionally base64-encoded images), answered with
//! a stream of newline-delimited JSON fragments, each contributing a piece
//! of the final text. [`OllamaClient`] accumulates that stream into the
//! complete answer; the [`Generator`] trait is the seam callers depend on,
//! so tests can substitute a canned implementation.

mod client;
mod config;

pub use client::{GenerateError, GenerateRequest, Generator, OllamaClient};
pub use config::ModelConfig;
