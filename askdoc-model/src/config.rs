//! Generation service configuration.

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default Ollama endpoint.
const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Default generation model.
const DEFAULT_MODEL: &str = "llama3.2-vision";

/// Default request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Configuration for the generation client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Base URL of the generation service.
    pub base_url: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// Overall timeout for one generation request, stream included.
    pub timeout: Duration,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ModelConfig {
    /// Create configuration with an explicit endpoint and model.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Create configuration from `OLLAMA_URL` / `OLLAMA_MODEL`, falling back
    /// to the defaults for anything unset.
    pub fn from_env() -> Self {
        let base_url = env::var("OLLAMA_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = env::var("OLLAMA_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Self::new(base_url, model)
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
