//! Text-to-speech relay and speech-to-text.
//!
//! Speech audio is streamed to the client chunk by chunk as the model
//! service produces it; nothing is buffered beyond a single chunk.

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use bytes::Bytes;
use futures::TryStreamExt;
use serde::{Deserialize, Serialize};
use storyteller_common::paths::normalize_extension;
use storyteller_common::{Language, Platform};
use utoipa::{IntoParams, ToSchema};

use super::envelope::{ok, required_text, ApiError, ApiResult, Envelope, JsonBody};
use super::AppContext;
use crate::uploads::decode_data;

const DEFAULT_AUDIO_TYPE: &str = "webm";

pub fn speech_routes() -> Router<AppContext> {
    Router::new()
        .route("/read", get(read_query).post(read_body))
        .route("/story/speech-to-text", post(speech_to_text))
}

/// Text to read aloud and the client OS.
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ReadRequest {
    pub text: Option<String>,
    /// `ios` selects MP3; anything else gets Ogg/Opus
    pub os: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SpeechToTextRequest {
    /// Base64 recording, optionally as a data URL
    pub audio: Option<String>,
    /// Recording container (defaults to `webm`)
    #[serde(rename = "type")]
    pub audio_type: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TranscriptResponse {
    pub text: String,
}

#[utoipa::path(
    get,
    path = "/api/read",
    tag = "speech",
    params(ReadRequest),
    responses(
        (status = 200, description = "Streamed audio (audio/mpeg on iOS, audio/ogg otherwise)"),
        (status = 400, description = "Missing text", body = Envelope),
        (status = 500, description = "Model request failed", body = Envelope)
    )
)]
pub async fn read_query(
    State(ctx): State<AppContext>,
    Query(req): Query<ReadRequest>,
) -> Result<Response, ApiError> {
    read_aloud(&ctx, req).await
}

#[utoipa::path(
    post,
    path = "/api/read",
    tag = "speech",
    request_body = ReadRequest,
    responses(
        (status = 200, description = "Streamed audio (audio/mpeg on iOS, audio/ogg otherwise)"),
        (status = 400, description = "Missing data", body = Envelope),
        (status = 500, description = "Model request failed", body = Envelope)
    )
)]
pub async fn read_body(
    State(ctx): State<AppContext>,
    JsonBody(req): JsonBody<ReadRequest>,
) -> Result<Response, ApiError> {
    read_aloud(&ctx, req).await
}

async fn read_aloud(ctx: &AppContext, req: ReadRequest) -> Result<Response, ApiError> {
    let text = required_text(req.text, "text")?;
    let platform = Platform::from_hint(req.os.as_deref());

    let stream = ctx.storyteller.speech(&text, platform).await?;
    let stream = stream.inspect_err(|e| tracing::error!("Speech stream failed: {}", e));

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, platform.mime_type()),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        Body::from_stream(stream),
    )
        .into_response())
}

#[utoipa::path(
    post,
    path = "/api/story/speech-to-text",
    tag = "speech",
    request_body = SpeechToTextRequest,
    responses(
        (status = 200, description = "Transcript as {text}", body = Envelope),
        (status = 400, description = "Missing or undecodable audio", body = Envelope),
        (status = 500, description = "Model request failed", body = Envelope)
    )
)]
pub async fn speech_to_text(
    State(ctx): State<AppContext>,
    JsonBody(req): JsonBody<SpeechToTextRequest>,
) -> ApiResult {
    let audio = required_text(req.audio, "audio")?;
    let audio = Bytes::from(decode_data(&audio)?);
    let extension = req
        .audio_type
        .as_deref()
        .map(|t| normalize_extension(t.split(';').next().unwrap_or(t)))
        .filter(|ext| !ext.is_empty())
        .unwrap_or_else(|| DEFAULT_AUDIO_TYPE.to_string());
    let language = Language::from_code(req.language.as_deref().unwrap_or("en"));

    let text = ctx
        .storyteller
        .transcribe(audio, &format!("audio.{extension}"), language)
        .await?;
    ok("Audio transcribed", TranscriptResponse { text })
}
