//! Error types for remote model operations

use thiserror::Error;

/// Errors reported while talking to the Ollama server
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered with a non-success HTTP status
    #[error("{message} (status {status})")]
    Status { status: u16, message: String },

    /// The server answered successfully but the body carried an `error` field
    #[error("{0}")]
    Remote(String),

    #[error("could not reach server: {0}")]
    Connection(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("invalid model name: {0}")]
    InvalidModelName(String),

    #[error("invalid host: {0}")]
    InvalidEndpoint(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Build a status error from a failed response body.
    ///
    /// Ollama reports failures as `{"error": "..."}`. Anything else falls back to
    /// the raw body text, then to the canonical reason phrase.
    pub fn from_status(status: u16, reason: Option<&str>, body: &str) -> Self {
        let from_json = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| value.get("error").and_then(|e| e.as_str()).map(str::to_string));

        let message = match from_json {
            Some(message) => message,
            None if !body.trim().is_empty() => body.trim().to_string(),
            None => reason.unwrap_or("unknown error").to_string(),
        };

        ApiError::Status { status, message }
    }

    /// HTTP status code, when the server produced one
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The error text without the status suffix
    pub fn message(&self) -> String {
        match self {
            ApiError::Status { message, .. } => message.clone(),
            ApiError::Remote(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout(err.to_string())
        } else if err.is_decode() {
            ApiError::MalformedResponse(err.to_string())
        } else if err.is_builder() {
            ApiError::Config(err.to_string())
        } else {
            ApiError::Connection(err.to_string())
        }
    }
}
