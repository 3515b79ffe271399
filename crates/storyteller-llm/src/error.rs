//! Error types for storyteller-llm.

use crate::extract::ExtractError;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, LlmError>;

/// Errors that can occur while talking to the model service.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// The HTTP request could not be sent or its body could not be read.
    #[error("request to {endpoint} failed: {source}")]
    Request {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The model service answered with a non-success status.
    #[error("{endpoint} returned HTTP {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: u16,
        body: String,
    },

    /// The response parsed but carried no usable content.
    #[error("{endpoint} response had no content")]
    EmptyResponse { endpoint: &'static str },

    /// The reply text did not contain a usable JSON object.
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// The reply object lacked a field the capability needs.
    #[error("reply is missing field: {0}")]
    MissingField(&'static str),

    /// Invalid input provided by the caller.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl LlmError {
    pub(crate) fn request(endpoint: &'static str, source: reqwest::Error) -> Self {
        Self::Request { endpoint, source }
    }

    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

impl From<LlmError> for storyteller_common::Error {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::InvalidInput(msg) => Self::validation(msg),
            LlmError::Extract(_) | LlmError::MissingField(_) => Self::extraction(err.to_string()),
            other => Self::upstream(other.to_string()),
        }
    }
}
