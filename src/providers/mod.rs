//! Ollama server probes

mod ollama;

use thiserror::Error;

pub use ollama::{OllamaProvider, PROBE_TIMEOUT};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Unexpected status: {0}")]
    UnexpectedStatus(reqwest::StatusCode),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
