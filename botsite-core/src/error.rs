/// Structured error types for botsite-core.
///
/// Library consumers get `thiserror` enums; the `botsite` binary wraps
/// them with `anyhow` context.
use thiserror::Error;

/// Main error type for botsite-core operations
#[derive(Error, Debug)]
pub enum CoreError {
    /// A configuration variable holds an unusable value
    #[error("Configuration error in {key}: {reason}")]
    Config { key: &'static str, reason: String },

    /// A required configuration variable is not set
    #[error("Missing required configuration variable '{key}'")]
    MissingVar { key: &'static str },
}

/// Result type alias for botsite-core operations
pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// Create a config error
    pub fn config(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Config {
            key,
            reason: reason.into(),
        }
    }

    /// Create a missing variable error
    pub fn missing_var(key: &'static str) -> Self {
        Self::MissingVar { key }
    }
}
