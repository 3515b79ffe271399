//! Response envelope, API errors, and JSON body extraction.
//!
//! Every JSON endpoint answers with `{type, message, status, data}`. Errors
//! travel as [`ApiError`] and render into the same shape, so clients only
//! ever parse one format.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use storyteller_common::Error;
use storyteller_llm::LlmError;
use utoipa::ToSchema;

/// Message for a body that is present but not JSON.
pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON body";

/// Outcome marker carried in the envelope's `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeKind {
    Success,
    Error,
}

/// Uniform response body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Envelope {
    /// `success` or `error`
    #[serde(rename = "type")]
    pub kind: EnvelopeKind,
    /// Human-readable summary
    pub message: String,
    /// HTTP status, repeated for clients that only read the body
    pub status: u16,
    /// Payload, `null` on error
    #[schema(value_type = Object)]
    pub data: Value,
}

impl Envelope {
    pub fn success(message: impl Into<String>, data: Value) -> Self {
        Self {
            kind: EnvelopeKind::Success,
            message: message.into(),
            status: StatusCode::OK.as_u16(),
            data,
        }
    }

    pub fn error(status: u16, message: impl Into<String>) -> Self {
        Self {
            kind: EnvelopeKind::Error,
            message: message.into(),
            status,
            data: Value::Null,
        }
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// Result type for envelope handlers.
pub type ApiResult = Result<Envelope, ApiError>;

/// Wrap a serializable payload in a success envelope.
pub fn ok<T: Serialize>(message: &str, data: T) -> ApiResult {
    let data = serde_json::to_value(data).map_err(Error::from)?;
    Ok(Envelope::success(message, data))
}

/// Error returned from handlers; renders as an error envelope.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl From<LlmError> for ApiError {
    fn from(err: LlmError) -> Self {
        Self(Error::from(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.0.http_status();
        if status >= 500 {
            tracing::error!("Request failed: {}", self.0);
        } else {
            tracing::warn!("Rejected request: {}", self.0);
        }
        Envelope::error(status, self.0.public_message()).into_response()
    }
}

/// Take a required request field.
pub fn required<T>(value: Option<T>, field: &str) -> Result<T, ApiError> {
    value.ok_or_else(|| ApiError(Error::missing_field(field)))
}

/// Take a required text field; blank text counts as missing.
pub fn required_text(value: Option<String>, field: &str) -> Result<String, ApiError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(ApiError(Error::missing_field(field))),
    }
}

/// JSON body extractor that reports failures through the envelope.
///
/// Unlike `axum::Json` it does not insist on a JSON content type, since the
/// browser client posts with whatever its fetch call defaults to.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError(Error::validation(rejection.body_text())))?;
        parse_body(&bytes).map(JsonBody).map_err(ApiError)
    }
}

/// Parse a request body.
///
/// An empty body or a JSON `null` is "no data"; anything unparsable is an
/// invalid body.
pub fn parse_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, Error> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(Error::missing_data());
    }

    let value: Value =
        serde_json::from_slice(bytes).map_err(|_| Error::validation(INVALID_JSON_MESSAGE))?;
    if value.is_null() {
        return Err(Error::missing_data());
    }

    serde_json::from_value(value)
        .map_err(|e| Error::validation(format!("Invalid request body: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Probe {
        text: Option<String>,
    }

    #[test]
    fn test_parse_body_missing_data() {
        for body in [&b""[..], &b"   \n"[..], &b"null"[..]] {
            let err = parse_body::<Probe>(body).unwrap_err();
            assert!(matches!(err, Error::MissingData));
            assert_eq!(err.to_string(), "No data provided");
        }
    }

    #[test]
    fn test_parse_body_invalid_json() {
        let err = parse_body::<Probe>(b"{not json").unwrap_err();
        assert_eq!(err.to_string(), INVALID_JSON_MESSAGE);
        assert_eq!(err.http_status(), 400);
    }

    #[test]
    fn test_parse_body_wrong_shape() {
        let err = parse_body::<Probe>(br#"{"text": 5}"#).unwrap_err();
        assert_eq!(err.http_status(), 400);
        assert!(err.to_string().starts_with("Invalid request body"));
    }

    #[test]
    fn test_parse_body_ok() {
        let probe: Probe = parse_body(br#"{"text": "hi"}"#).unwrap();
        assert_eq!(probe.text.as_deref(), Some("hi"));

        let probe: Probe = parse_body(b"{}").unwrap();
        assert!(probe.text.is_none());
    }

    #[test]
    fn test_required_fields() {
        assert_eq!(required(Some(3), "n").unwrap(), 3);
        let err = required::<u8>(None, "context").unwrap_err();
        assert_eq!(err.0.to_string(), "Missing required field: context");

        assert!(required_text(Some("  ".into()), "text").is_err());
        assert_eq!(required_text(Some("a".into()), "text").unwrap(), "a");
    }

    #[test]
    fn test_envelope_serialization() {
        let envelope = Envelope::success("Done", json!({"a": 1}));
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({"type": "success", "message": "Done", "status": 200, "data": {"a": 1}})
        );

        let envelope = Envelope::error(400, "No data provided");
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({"type": "error", "message": "No data provided", "status": 400, "data": null})
        );
    }

    #[test]
    fn test_api_error_status() {
        let response = ApiError(Error::upstream("boom")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = ApiError(Error::missing_data()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
