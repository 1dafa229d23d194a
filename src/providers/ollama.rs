//! Ollama `/api/tags` client

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;

use super::ProviderError;

/// Upper bound on a single probe, independent of the configured timeouts.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

pub struct OllamaProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    models: Vec<ModelTag>,
}

#[derive(Debug, Deserialize)]
struct ModelTag {
    name: String,
}

impl OllamaProvider {
    pub fn new(base_url: String, api_key: Option<String>) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(PROBE_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    pub fn tags_url(&self) -> String {
        format!("{}/api/tags", self.base_url)
    }

    pub async fn is_reachable(&self) -> bool {
        match self.fetch_tags().await {
            Ok(response) if response.status() == StatusCode::OK => {
                tracing::debug!("Ollama server at {} is reachable", self.base_url);
                true
            }
            Ok(response) => {
                tracing::warn!(
                    "Ollama server at {} answered {}",
                    self.base_url,
                    response.status()
                );
                false
            }
            Err(e) => {
                tracing::warn!("Ollama server at {} is unreachable: {}", self.base_url, e);
                false
            }
        }
    }

    pub async fn list_models(&self) -> Result<Vec<String>, ProviderError> {
        let response = self.fetch_tags().await?;

        if response.status() != StatusCode::OK {
            return Err(ProviderError::UnexpectedStatus(response.status()));
        }

        let body = response.bytes().await?;
        let tags: TagsResponse = serde_json::from_slice(&body)
            .map_err(|e| ProviderError::InvalidResponse(format!("Failed to parse tags: {}", e)))?;

        let models: Vec<String> = tags.models.into_iter().map(|m| m.name).collect();
        tracing::debug!("Ollama server at {} has {} model(s)", self.base_url, models.len());

        Ok(models)
    }

    async fn fetch_tags(&self) -> Result<reqwest::Response, ProviderError> {
        let mut request = self.client.get(self.tags_url());

        if let Some(ref api_key) = self.api_key {
            request = request.bearer_auth(api_key);
        }

        Ok(request.send().await?)
    }
}
