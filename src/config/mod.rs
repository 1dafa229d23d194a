//! Application configuration
//!
//! All settings come from environment variables (optionally seeded from a
//! local `.env` file). A [`Settings`] value is built once at startup and
//! passed to whatever needs it.

mod error;
mod level;

use std::env;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use reqwest::Url;
use serde::Serialize;

use crate::providers::OllamaProvider;

pub use error::ConfigError;
pub use level::LogLevel;

pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "llama3.2";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: i64 = 120;
pub const DEFAULT_CONNECTION_TIMEOUT_SECS: i64 = 60;
pub const DEFAULT_MAX_TOKENS: i64 = 2048;
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Settings for talking to an Ollama server
#[derive(Clone, PartialEq)]
pub struct Settings {
    pub service_base_url: String,
    pub model_name: String,
    pub api_key: String,
    pub log_level: LogLevel,
    pub request_timeout_secs: i64,
    pub connection_timeout_secs: i64,
    pub max_tokens: i64,
    pub temperature: f64,
}

/// Projection of [`Settings`] handed to model clients
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: i64,
}

/// Merge a local `.env` file into the process environment.
///
/// Variables already present in the process take precedence. A missing
/// file is not an error.
pub fn load_dotenv() {
    load_dotenv_from(Path::new(".env"));
}

/// Merge the env file at `path` into the process environment.
///
/// Same precedence as [`load_dotenv`]. Returns whether the file was read.
pub fn load_dotenv_from(path: &Path) -> bool {
    match dotenvy::from_path(path) {
        Ok(()) => {
            tracing::debug!("Loaded environment from {}", path.display());
            true
        }
        Err(e) if e.not_found() => false,
        Err(e) => {
            tracing::warn!("Ignoring unreadable env file {}: {}", path.display(), e);
            false
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary variable source.
    ///
    /// Unset or blank variables take their default; a present value that
    /// does not parse is an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let service_base_url = match read("OLLAMA_BASE_URL") {
            Some(raw) => normalize_base_url("OLLAMA_BASE_URL", &raw)?,
            None => DEFAULT_BASE_URL.to_string(),
        };

        let log_level = match read("LOG_LEVEL") {
            Some(raw) => raw.parse()?,
            None => LogLevel::default(),
        };

        Ok(Self {
            service_base_url,
            model_name: read("OLLAMA_DEFAULT_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into()),
            api_key: read("OPENAI_API_KEY").unwrap_or_default(),
            log_level,
            request_timeout_secs: parse_int(
                "OLLAMA_TIMEOUT",
                read("OLLAMA_TIMEOUT"),
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?,
            connection_timeout_secs: parse_int(
                "OLLAMA_CONNECTION_TIMEOUT",
                read("OLLAMA_CONNECTION_TIMEOUT"),
                DEFAULT_CONNECTION_TIMEOUT_SECS,
            )?,
            max_tokens: parse_int("MAX_TOKENS", read("MAX_TOKENS"), DEFAULT_MAX_TOKENS)?,
            temperature: parse_float("TEMPERATURE", read("TEMPERATURE"), DEFAULT_TEMPERATURE)?,
        })
    }

    pub fn to_service_config(&self) -> ServiceConfig {
        ServiceConfig {
            base_url: self.service_base_url.clone(),
            model: self.model_name.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// `None` when the configured value is negative.
    pub fn request_timeout(&self) -> Option<Duration> {
        u64::try_from(self.request_timeout_secs)
            .ok()
            .map(Duration::from_secs)
    }

    pub fn connection_timeout(&self) -> Option<Duration> {
        u64::try_from(self.connection_timeout_secs)
            .ok()
            .map(Duration::from_secs)
    }

    /// Whether the server answers `GET /api/tags` with 200 OK.
    ///
    /// Bounded by a fixed 5 second timeout. Never errors.
    pub async fn check_service_reachable(&self) -> bool {
        match self.provider() {
            Some(provider) => provider.is_reachable().await,
            None => false,
        }
    }

    /// Names of the models the server has loaded, in server order.
    ///
    /// `None` if the server is unreachable, answers with anything but 200,
    /// or sends a body without a `models` list of named entries.
    pub async fn list_available_models(&self) -> Option<Vec<String>> {
        let provider = self.provider()?;
        match provider.list_models().await {
            Ok(models) => Some(models),
            Err(e) => {
                tracing::warn!("Could not list models at {}: {}", self.service_base_url, e);
                None
            }
        }
    }

    fn provider(&self) -> Option<OllamaProvider> {
        let api_key = self.has_api_key().then(|| self.api_key.clone());
        match OllamaProvider::new(self.service_base_url.clone(), api_key) {
            Ok(provider) => Some(provider),
            Err(e) => {
                tracing::warn!("Could not build HTTP client: {}", e);
                None
            }
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("service_base_url", &self.service_base_url)
            .field("model_name", &self.model_name)
            .field("api_key", &if self.has_api_key() { "<redacted>" } else { "" })
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("connection_timeout_secs", &self.connection_timeout_secs)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .finish()
    }
}

fn normalize_base_url(var: &'static str, raw: &str) -> Result<String, ConfigError> {
    let invalid = || ConfigError::InvalidUrl {
        var,
        value: raw.to_string(),
    };

    let url = Url::parse(raw).map_err(|_| invalid())?;
    if url.cannot_be_a_base()
        || !matches!(url.scheme(), "http" | "https")
        || url.query().is_some()
        || url.fragment().is_some()
    {
        return Err(invalid());
    }

    Ok(raw.trim_end_matches('/').to_string())
}

fn parse_int<T: FromStr>(var: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidInteger { var, value }),
        None => Ok(default),
    }
}

fn parse_float(var: &'static str, raw: Option<String>, default: f64) -> Result<f64, ConfigError> {
    match raw {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidFloat { var, value }),
        None => Ok(default),
    }
}
