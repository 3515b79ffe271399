//! Character creation from a drawing, and serving stored drawings.

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::Value;
use storyteller_common::{Complexity, Error};
use tokio_util::io::ReaderStream;
use utoipa::ToSchema;

use super::envelope::{ok, required_text, ApiError, ApiResult, Envelope, JsonBody};
use super::AppContext;
use crate::uploads::content_type_for;

pub fn character_routes() -> Router<AppContext> {
    Router::new()
        .route("/character", post(create_character))
        .route("/uploads/:filename", get(serve_upload))
}

/// Request body for character creation.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CharacterRequest {
    /// Base64 drawing, optionally as a data URL
    pub image: Option<String>,
    /// Image extension or MIME type (`png`, `image/jpeg`, ...)
    #[serde(rename = "type")]
    pub image_type: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub complexity: Option<Complexity>,
}

#[utoipa::path(
    post,
    path = "/api/character",
    tag = "character",
    request_body = CharacterRequest,
    responses(
        (status = 200, description = "Drawing stored and character generated; data carries id, filename, image (with src), character", body = Envelope),
        (status = 400, description = "Missing data or unsupported image type", body = Envelope),
        (status = 500, description = "Model request failed", body = Envelope)
    )
)]
pub async fn create_character(
    State(ctx): State<AppContext>,
    JsonBody(req): JsonBody<CharacterRequest>,
) -> ApiResult {
    let image = required_text(req.image, "image")?;
    let image_type = required_text(req.image_type, "type")?;
    let complexity = ctx.complexity(req.complexity);

    let store = ctx.uploads.clone();
    let stored = tokio::task::spawn_blocking(move || store.save_base64(&image, &image_type))
        .await
        .map_err(|e| Error::internal(format!("Upload task failed: {e}")))??;

    let mut data = ctx
        .storyteller
        .generate_character(&stored.data_url(), &complexity)
        .await?;
    if let Some(Value::Object(image)) = data.get_mut("image") {
        image.insert("src".to_string(), Value::String(upload_src(&stored.filename)));
    }
    data.insert("id".to_string(), Value::String(stored.id.to_string()));
    data.insert("filename".to_string(), Value::String(stored.filename));

    ok("Character generated", data)
}

/// Public path of a stored upload.
fn upload_src(filename: &str) -> String {
    format!("/api/uploads/{filename}")
}

#[utoipa::path(
    get,
    path = "/api/uploads/{filename}",
    tag = "character",
    params(
        ("filename" = String, Path, description = "Stored upload file name")
    ),
    responses(
        (status = 200, description = "Image bytes"),
        (status = 400, description = "Invalid file name", body = Envelope),
        (status = 404, description = "Upload not found", body = Envelope)
    )
)]
pub async fn serve_upload(
    State(ctx): State<AppContext>,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    let path = ctx.uploads.path_for(&filename)?;
    let file = tokio::fs::File::open(&path)
        .await
        .map_err(|_| Error::not_found(filename.clone()))?;

    let body = Body::from_stream(ReaderStream::new(file));

    Ok((
        StatusCode::OK,
        [
            (header::CACHE_CONTROL, "public, max-age=31536000, immutable"),
            (header::CONTENT_TYPE, content_type_for(&filename)),
        ],
        body,
    )
        .into_response())
}
