//! Motion and improv endpoints.

use axum::{extract::State, routing::post, Router};
use serde::Deserialize;
use serde_json::Value;
use storyteller_common::Language;
use storyteller_llm::ImprovInput;
use utoipa::ToSchema;

use super::envelope::{ok, required, ApiResult, Envelope, JsonBody};
use super::routes_story::StoryRequest;
use super::AppContext;

pub fn improv_routes() -> Router<AppContext> {
    Router::new()
        .route("/story/motion", post(process_motion))
        .route("/story/motionpart", post(motion_part))
        .route("/story/hints", post(init_hints))
        .route("/story/end_hints", post(end_hints))
        .route("/story/process_improv", post(process_improv))
        .route("/story/improvpart", post(improv_part))
        .route("/story/premise_improv", post(premise_improv))
        .route("/story/character_improv", post(character_improv))
        .route("/story/character_image_improv", post(character_image_improv))
        .route("/story/end_story_improv", post(end_story_improv))
}

/// Frames of a performed movement, top-level or wrapped in `context`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct MotionRequest {
    /// Ordered frames as image data URLs
    pub frames: Option<Vec<String>>,
    #[schema(value_type = Option<Object>)]
    pub story: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub context: Option<Value>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct HintsRequest {
    /// `en` or `it`; anything else falls back to English
    pub language: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ImprovRequest {
    pub frames: Option<Vec<String>>,
    /// Transcript text, or the transcription result `{text}`
    #[serde(rename = "audioResult")]
    #[schema(value_type = Option<Object>)]
    pub audio_result: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub story: Option<Value>,
    /// Who/where/what hints, or the chosen ending
    #[schema(value_type = Option<Object>)]
    pub hints: Option<Value>,
    pub language: Option<String>,
    /// The performance is the story's ending
    pub end: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PremiseImprovRequest {
    pub transcript: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub motion: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub character: Option<Value>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CharacterImprovRequest {
    pub transcript: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub motion: Option<Value>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CharacterImageImprovRequest {
    #[schema(value_type = Option<Object>)]
    pub character: Option<Value>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct EndStoryImprovRequest {
    #[schema(value_type = Option<Object>)]
    pub story: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub improv: Option<Value>,
}

/// Story text as sent to the model; non-string stories go as compact JSON.
fn story_text(story: &Value) -> String {
    match story {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Transcript from a plain string or a `{text}` transcription result.
fn transcript_text(audio_result: &Value) -> Option<String> {
    match audio_result {
        Value::String(text) => Some(text.clone()),
        Value::Object(map) => map.get("text").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

fn frames_from(value: Option<&Value>) -> Option<Vec<String>> {
    value.and_then(|v| serde_json::from_value(v.clone()).ok())
}

#[utoipa::path(
    post,
    path = "/api/story/motion",
    tag = "improv",
    request_body = MotionRequest,
    responses(
        (status = 200, description = "Motion analysis", body = Envelope),
        (status = 400, description = "Missing data or no frames", body = Envelope),
        (status = 500, description = "Model request failed", body = Envelope)
    )
)]
pub async fn process_motion(
    State(ctx): State<AppContext>,
    JsonBody(req): JsonBody<MotionRequest>,
) -> ApiResult {
    let wrapped = req.context.as_ref();
    let frames = req
        .frames
        .or_else(|| frames_from(wrapped.and_then(|c| c.get("frames"))));
    let frames = required(frames, "frames")?;
    let story = req
        .story
        .as_ref()
        .or_else(|| wrapped.and_then(|c| c.get("story")))
        .map(story_text)
        .unwrap_or_default();

    let data = ctx.storyteller.process_motion(&frames, &story).await?;
    ok("Motion processed", data)
}

#[utoipa::path(
    post,
    path = "/api/story/motionpart",
    tag = "improv",
    request_body = StoryRequest,
    responses(
        (status = 200, description = "Story part built from the motion", body = Envelope),
        (status = 400, description = "Missing data", body = Envelope),
        (status = 500, description = "Model request failed", body = Envelope)
    )
)]
pub async fn motion_part(
    State(ctx): State<AppContext>,
    JsonBody(req): JsonBody<StoryRequest>,
) -> ApiResult {
    let context = required(req.context, "context")?;
    let data = ctx
        .storyteller
        .generate_motion_part(&context, &ctx.complexity(req.complexity))
        .await?;
    ok("Motion part generated", data)
}

#[utoipa::path(
    post,
    path = "/api/story/hints",
    tag = "improv",
    request_body = HintsRequest,
    responses(
        (status = 200, description = "Opening hints", body = Envelope),
        (status = 400, description = "Missing data", body = Envelope),
        (status = 500, description = "Model request failed", body = Envelope)
    )
)]
pub async fn init_hints(
    State(ctx): State<AppContext>,
    JsonBody(req): JsonBody<HintsRequest>,
) -> ApiResult {
    let language = Language::from_code(req.language.as_deref().unwrap_or("en"));
    let data = ctx
        .storyteller
        .generate_init_hints(language, ctx.config.story.hint_count)
        .await?;
    ok("Hints generated", data)
}

#[utoipa::path(
    post,
    path = "/api/story/end_hints",
    tag = "improv",
    request_body = HintsRequest,
    responses(
        (status = 200, description = "Ending hints", body = Envelope),
        (status = 400, description = "Missing data", body = Envelope),
        (status = 500, description = "Model request failed", body = Envelope)
    )
)]
pub async fn end_hints(
    State(ctx): State<AppContext>,
    JsonBody(req): JsonBody<HintsRequest>,
) -> ApiResult {
    let language = Language::from_code(req.language.as_deref().unwrap_or("en"));
    let data = ctx
        .storyteller
        .generate_end_hints(language, ctx.config.story.hint_count)
        .await?;
    ok("Ending hints generated", data)
}

#[utoipa::path(
    post,
    path = "/api/story/process_improv",
    tag = "improv",
    request_body = ImprovRequest,
    responses(
        (status = 200, description = "Improv analysis", body = Envelope),
        (status = 400, description = "Missing data or no frames", body = Envelope),
        (status = 500, description = "Model request failed", body = Envelope)
    )
)]
pub async fn process_improv(
    State(ctx): State<AppContext>,
    JsonBody(req): JsonBody<ImprovRequest>,
) -> ApiResult {
    let frames = required(req.frames, "frames")?;
    let transcript = required(req.audio_result.as_ref().and_then(transcript_text), "audioResult")?;

    let input = ImprovInput {
        frames,
        transcript,
        hints: req.hints.and_then(|hints| match hints {
            Value::Object(map) => Some(map),
            _ => None,
        }),
        language: Language::from_code(req.language.as_deref().unwrap_or("en")),
        story: req
            .story
            .as_ref()
            .map(story_text)
            .filter(|story| !story.trim().is_empty()),
        ending: req.end.unwrap_or(false),
    };

    let data = ctx.storyteller.process_improv(&input).await?;
    ok("Improv processed", data)
}

#[utoipa::path(
    post,
    path = "/api/story/improvpart",
    tag = "improv",
    request_body = StoryRequest,
    responses(
        (status = 200, description = "Story part built from the improv", body = Envelope),
        (status = 400, description = "Missing data", body = Envelope),
        (status = 500, description = "Model request failed", body = Envelope)
    )
)]
pub async fn improv_part(
    State(ctx): State<AppContext>,
    JsonBody(req): JsonBody<StoryRequest>,
) -> ApiResult {
    let context = required(req.context, "context")?;
    let data = ctx
        .storyteller
        .generate_part_improv(&context, &ctx.complexity(req.complexity))
        .await?;
    ok("Improv part generated", data)
}

#[utoipa::path(
    post,
    path = "/api/story/premise_improv",
    tag = "improv",
    request_body = PremiseImprovRequest,
    responses(
        (status = 200, description = "Premise from the opening performance", body = Envelope),
        (status = 400, description = "Missing data", body = Envelope),
        (status = 500, description = "Model request failed", body = Envelope)
    )
)]
pub async fn premise_improv(
    State(ctx): State<AppContext>,
    JsonBody(req): JsonBody<PremiseImprovRequest>,
) -> ApiResult {
    let transcript = required(req.transcript, "transcript")?;
    let motion = required(req.motion, "motion")?;
    let character = required(req.character, "character")?;
    let data = ctx
        .storyteller
        .generate_premise_improv(&transcript, &motion, &character)
        .await?;
    ok("Premise generated", data)
}

#[utoipa::path(
    post,
    path = "/api/story/character_improv",
    tag = "improv",
    request_body = CharacterImprovRequest,
    responses(
        (status = 200, description = "Character from the performance", body = Envelope),
        (status = 400, description = "Missing data", body = Envelope),
        (status = 500, description = "Model request failed", body = Envelope)
    )
)]
pub async fn character_improv(
    State(ctx): State<AppContext>,
    JsonBody(req): JsonBody<CharacterImprovRequest>,
) -> ApiResult {
    let transcript = required(req.transcript, "transcript")?;
    let motion = required(req.motion, "motion")?;
    let data = ctx
        .storyteller
        .generate_character_improv(&transcript, &motion)
        .await?;
    ok("Character generated", data)
}

#[utoipa::path(
    post,
    path = "/api/story/character_image_improv",
    tag = "improv",
    request_body = CharacterImageImprovRequest,
    responses(
        (status = 200, description = "Character portrait prompt and URL", body = Envelope),
        (status = 400, description = "Missing data", body = Envelope),
        (status = 500, description = "Model request failed", body = Envelope)
    )
)]
pub async fn character_image_improv(
    State(ctx): State<AppContext>,
    JsonBody(req): JsonBody<CharacterImageImprovRequest>,
) -> ApiResult {
    let character = required(req.character, "character")?;
    let data = ctx
        .storyteller
        .generate_character_image_improv(&character)
        .await?;
    ok("Character image generated", data)
}

#[utoipa::path(
    post,
    path = "/api/story/end_story_improv",
    tag = "improv",
    request_body = EndStoryImprovRequest,
    responses(
        (status = 200, description = "Closing part from the final performance", body = Envelope),
        (status = 400, description = "Missing data", body = Envelope),
        (status = 500, description = "Model request failed", body = Envelope)
    )
)]
pub async fn end_story_improv(
    State(ctx): State<AppContext>,
    JsonBody(req): JsonBody<EndStoryImprovRequest>,
) -> ApiResult {
    let story = required(req.story, "story")?;
    let improv = required(req.improv, "improv")?;
    let data = ctx
        .storyteller
        .terminate_story_improv(&story, &improv)
        .await?;
    ok("Story terminated", data)
}
