//! Error types for the chat-completion client.

use thiserror::Error;

/// Errors that can occur when requesting a completion.
#[derive(Debug, Error)]
pub enum ChatError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API key cannot be sent as a header value.
    #[error("invalid API key")]
    InvalidApiKey,

    /// The service returned an error body.
    #[error("API error ({status}): {message}")]
    Api {
        /// Status string from the error body (e.g. `INVALID_ARGUMENT`).
        status: String,
        /// Error message.
        message: String,
    },

    /// Rate limited by the API.
    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Authentication failed.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Failed to parse response.
    #[error("parse error: {0}")]
    Parse(String),

    /// The response carried no text (e.g. blocked by safety filters).
    #[error("empty completion")]
    EmptyCompletion,
}

/// Error body returned by the API.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiError,
}

/// Nested error details.
#[derive(Debug, serde::Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: u16,
    pub message: String,
    #[serde(default)]
    pub status: String,
}
