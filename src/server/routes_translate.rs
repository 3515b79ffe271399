use axum::{
    extract::{Query, State},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use super::envelope::{ok, required, required_text, ApiResult, Envelope, JsonBody};
use super::AppContext;

const DEFAULT_LANGUAGE: &str = "en";

pub fn translate_routes() -> Router<AppContext> {
    Router::new()
        .route("/translate", get(translate))
        .route("/translate/keypoints", post(translate_keypoints))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct TranslateQuery {
    /// Text to translate
    pub text: Option<String>,
    /// Source language code (defaults to `en`)
    pub src_lang: Option<String>,
    /// Target language code (defaults to `en`)
    pub tgt_lang: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TranslateResponse {
    pub text: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct KeypointsRequest {
    /// Key-point table with `head` and `body`
    #[schema(value_type = Option<Object>)]
    pub keypoints: Option<Value>,
    pub src_lang: Option<String>,
    pub tgt_lang: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/translate",
    tag = "translate",
    params(TranslateQuery),
    responses(
        (status = 200, description = "Translated text as {text}", body = Envelope),
        (status = 400, description = "Missing text", body = Envelope),
        (status = 500, description = "Model request failed", body = Envelope)
    )
)]
pub async fn translate(
    State(ctx): State<AppContext>,
    Query(query): Query<TranslateQuery>,
) -> ApiResult {
    let text = required_text(query.text, "text")?;
    let source = query.src_lang.as_deref().unwrap_or(DEFAULT_LANGUAGE);
    let target = query.tgt_lang.as_deref().unwrap_or(DEFAULT_LANGUAGE);

    let text = ctx.storyteller.translate_text(&text, source, target).await?;
    ok("Text translated", TranslateResponse { text })
}

#[utoipa::path(
    post,
    path = "/api/translate/keypoints",
    tag = "translate",
    request_body = KeypointsRequest,
    responses(
        (status = 200, description = "Translated key points as {head, body}", body = Envelope),
        (status = 400, description = "Missing data", body = Envelope),
        (status = 500, description = "Model request failed", body = Envelope)
    )
)]
pub async fn translate_keypoints(
    State(ctx): State<AppContext>,
    JsonBody(req): JsonBody<KeypointsRequest>,
) -> ApiResult {
    let keypoints = required(req.keypoints, "keypoints")?;
    let source = req.src_lang.as_deref().unwrap_or(DEFAULT_LANGUAGE);
    let target = req.tgt_lang.as_deref().unwrap_or(DEFAULT_LANGUAGE);

    let data = ctx
        .storyteller
        .translate_keypoints(&keypoints, source, target)
        .await?;
    ok("Key points translated", data)
}
