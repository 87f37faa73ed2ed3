//! Error classification for the Bedrock runtime API.

use thiserror::Error;

use crate::domain::ports::ProviderError;

/// Errors that can occur when invoking a model through the Bedrock runtime.
#[derive(Debug, Error)]
pub enum BedrockApiError {
    /// Invalid request parameters or malformed request body.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Authentication failed due to an invalid or missing token.
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Request was throttled; the caller decides whether it gets another
    /// attempt.
    #[error("request throttled")]
    Throttled,

    /// The model id is not available on this endpoint.
    #[error("model not found: {0}")]
    ModelNotFound(String),

    /// The runtime returned a server-side error.
    #[error("server error: {0}")]
    ServerError(String),

    /// Network error during the request.
    #[error("network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// The response body was not parseable JSON.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Anything else.
    #[error("unknown error: {0}")]
    Unknown(String),
}

impl BedrockApiError {
    /// Whether this failure is transient (throttling, 5xx, network).
    ///
    /// The client itself never retries — one invocation is one attempt in
    /// the acquisition loop — but log consumers use the distinction.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Throttled | Self::ServerError(_) | Self::NetworkError(_)
        )
    }

    /// Map an HTTP status code and response body to an error variant.
    pub fn from_status(status: reqwest::StatusCode, body: String) -> Self {
        match status.as_u16() {
            400 => Self::InvalidRequest(body),
            401 | 403 => Self::AuthenticationFailed(body),
            404 => Self::ModelNotFound(body),
            429 => Self::Throttled,
            s if status.is_server_error() => Self::ServerError(format!("HTTP {s}: {body}")),
            s => Self::Unknown(format!("HTTP {s}: {body}")),
        }
    }
}

impl From<BedrockApiError> for ProviderError {
    fn from(err: BedrockApiError) -> Self {
        match err {
            BedrockApiError::AuthenticationFailed(msg) => ProviderError::Auth(msg),
            BedrockApiError::Throttled => ProviderError::RateLimited("bedrock throttled".to_string()),
            BedrockApiError::SerializationError(e) => ProviderError::MalformedBody(e.to_string()),
            other => ProviderError::Transport(other.to_string()),
        }
    }
}
