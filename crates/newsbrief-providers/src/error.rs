//! Error types for the providers crate

use thiserror::Error;

/// Substring markers that identify provider throttling in error text
const QUOTA_MARKERS: &[&str] = &["RESOURCE_EXHAUSTED", "429", "quota", "rate limit", "exceeded"];

/// Errors that can occur when calling generation backends
#[derive(Debug, Error, PartialEq, Clone)]
pub enum ProviderError {
    /// No backend is registered for the requested model
    #[error("No backend found for model: {0}")]
    NotFound(String),

    /// Authentication failed (never includes key details)
    #[error("Authentication failed")]
    AuthError,

    /// Rate limited by provider
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Network error occurred
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Generic provider error
    #[error("Provider error: {0}")]
    ProviderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Invalid model specified
    #[error("Invalid model: {0}")]
    InvalidModel(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl ProviderError {
    /// Whether this failure looks like provider quota exhaustion or throttling.
    ///
    /// Matches the `RateLimited` variant directly, otherwise falls back to a
    /// substring scan of the error text for known throttling markers. The
    /// dispatcher records this classification but does not branch on it; both
    /// classes of failure fall through to the next candidate model.
    pub fn is_quota_error(&self) -> bool {
        if matches!(self, ProviderError::RateLimited(_)) {
            return true;
        }
        let message = self.to_string().to_lowercase();
        QUOTA_MARKERS
            .iter()
            .any(|marker| message.contains(&marker.to_lowercase()))
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::SerializationError(err.to_string())
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::ProviderError("Request timeout".to_string())
        } else if err.is_connect() {
            ProviderError::NetworkError(err.to_string())
        } else {
            ProviderError::ProviderError(err.to_string())
        }
    }
}
