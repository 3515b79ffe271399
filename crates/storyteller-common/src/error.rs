//! Common error types used throughout storyteller.
//!
//! Every failure a request can hit funnels into [`Error`], which carries
//! enough context for the HTTP layer to pick a status code via
//! [`Error::http_status`] and a client-safe message via
//! [`Error::public_message`].

/// Message returned when a POST endpoint receives no body.
pub const MISSING_DATA_MESSAGE: &str = "No data provided";

/// Message returned for every server-side failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Common error type for storyteller.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request carried no body, or an explicit `null`.
    #[error("No data provided")]
    MissingData,

    /// Request data failed validation.
    #[error("{0}")]
    Validation(String),

    /// The requested resource was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The remote model service failed or returned an error status.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// The model reply did not contain a usable JSON object.
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new MissingData error.
    pub fn missing_data() -> Self {
        Self::MissingData
    }

    /// Create a Validation error for a required field that was absent.
    pub fn missing_field(field: &str) -> Self {
        Self::Validation(format!("Missing required field: {field}"))
    }

    /// Create a new Validation error.
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new NotFound error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a new Upstream error.
    pub fn upstream<S: Into<String>>(msg: S) -> Self {
        Self::Upstream(msg.into())
    }

    /// Create a new Extraction error.
    pub fn extraction<S: Into<String>>(msg: S) -> Self {
        Self::Extraction(msg.into())
    }

    /// Create a new Internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }

    /// Map this error to an HTTP status code.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::MissingData | Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::Upstream(_) | Self::Extraction(_) | Self::Io(_) | Self::Internal(_) => 500,
        }
    }

    /// Message that is safe to hand back to the client.
    ///
    /// Server errors collapse to a generic message; the detail only goes to the log.
    pub fn public_message(&self) -> String {
        if self.http_status() >= 500 {
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON error: {err}"))
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
