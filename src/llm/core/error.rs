//! Error types for the generation client

use thiserror::Error;

/// Errors that can occur when calling the generation API
#[derive(Debug, Error)]
pub enum LlmError {
    /// HTTP request failures (status 0 when no response was received)
    #[error("HTTP error (status {status}): {body}")]
    HttpError { status: u16, body: String },

    /// JSON encoding/decoding issues
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Invalid request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Error reported by the API in its error envelope
    #[error("Provider error ({code}): {message}")]
    ProviderError { code: String, message: String },

    /// The response carried no candidate, no content or no parts
    #[error("no content returned from API")]
    EmptyResponse,

    /// The first content part was not text
    #[error("unexpected response part type")]
    UnexpectedPart,

    /// Every attempt allowed by the retry policy failed
    #[error("API request failed after {attempts} attempt(s): {last}")]
    RetriesExhausted { attempts: u32, last: Box<LlmError> },
}

impl LlmError {
    /// Whether another attempt at the same call could succeed
    ///
    /// Transport and API failures are retryable; malformed or empty
    /// responses and bad requests are not.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            LlmError::HttpError { .. }
                | LlmError::ProviderError { .. }
                | LlmError::SerializationError(_)
        )
    }
}

impl From<serde_json::Error> for LlmError {
    fn from(err: serde_json::Error) -> Self {
        LlmError::SerializationError(err.to_string())
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            LlmError::HttpError {
                status: status.as_u16(),
                body: err.to_string(),
            }
        } else {
            LlmError::HttpError {
                status: 0,
                body: err.to_string(),
            }
        }
    }
}
