/// Configuration errors
///
/// Raised while reading settings when a variable is present but malformed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be an integer, got {value:?}")]
    InvalidInteger { var: &'static str, value: String },

    #[error("{var} must be a number, got {value:?}")]
    InvalidFloat { var: &'static str, value: String },

    #[error("LOG_LEVEL must be one of DEBUG, INFO, WARNING, ERROR, CRITICAL, got {value:?}")]
    InvalidLogLevel { value: String },

    #[error("{var} must be an http(s) base URL, got {value:?}")]
    InvalidUrl { var: &'static str, value: String },
}
