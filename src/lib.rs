//! Ollama settings
//!
//! Loads Ollama connection settings from the environment, configures
//! logging, and probes the server for availability and loaded models.

pub mod config;
pub mod logging;
pub mod providers;

pub use config::{load_dotenv, load_dotenv_from, ConfigError, LogLevel, ServiceConfig, Settings};
