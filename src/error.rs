// src/error.rs
// Standardized error types for moodscope

use thiserror::Error;

/// Main error type for the moodscope library
#[derive(Error, Debug)]
pub enum MoodscopeError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("analysis service error: {0}")]
    Llm(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("unknown error: {0}")]
    Other(String),
}

/// Convenience type alias for Result using MoodscopeError
pub type Result<T> = std::result::Result<T, MoodscopeError>;

/// Markers that identify a rate-limit rejection inside a provider error body.
/// Only used to customize the displayed text, never to change control flow.
const RATE_LIMIT_MARKERS: &[&str] = &["429", "quota", "rate limit", "resource_exhausted"];

impl MoodscopeError {
    /// True when the error message carries a rate-limit indicator
    pub fn is_rate_limited(&self) -> bool {
        let text = self.to_string().to_lowercase();
        RATE_LIMIT_MARKERS.iter().any(|m| text.contains(m))
    }

    /// Convert to a user-facing string for display at CLI and HTTP boundaries
    pub fn to_user_string(&self) -> String {
        if self.is_rate_limited() {
            return "The analysis service is currently rate limiting requests. \
                    Wait a moment and resubmit."
                .to_string();
        }
        self.to_string()
    }
}

impl From<String> for MoodscopeError {
    fn from(s: String) -> Self {
        MoodscopeError::Other(s)
    }
}

impl From<MoodscopeError> for String {
    fn from(err: MoodscopeError) -> Self {
        err.to_string()
    }
}
