//! Classic story flow: premise, opening, parts, actions, ending, analytics,
//! illustrations, and the practice-mode opening.

use axum::{extract::State, routing::post, Router};
use serde::Deserialize;
use serde_json::Value;
use storyteller_common::Complexity;
use utoipa::ToSchema;

use super::envelope::{ok, required, required_text, ApiResult, Envelope, JsonBody};
use super::AppContext;

pub fn story_routes() -> Router<AppContext> {
    Router::new()
        .route("/story/premise", post(premise))
        .route("/story/init", post(init_story))
        .route("/story/part", post(story_part))
        .route("/story/actions", post(actions))
        .route("/story/end", post(end_story))
        .route("/story/analyze", post(analyze))
        .route("/story/image", post(story_image))
        .route("/practice/generate_storytoend", post(story_to_end))
}

/// Story context plus an optional complexity.
#[derive(Debug, Deserialize, ToSchema)]
pub struct StoryRequest {
    /// Numeric level 0..=3 or a free-form instruction
    #[schema(value_type = Option<Object>)]
    pub complexity: Option<Complexity>,
    /// Character, premise, story so far, chosen action, ...
    #[schema(value_type = Option<Object>)]
    pub context: Option<Value>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StoryImageRequest {
    /// Key moment to illustrate
    pub content: Option<String>,
    /// Drawing style of the character
    pub style: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StoryToEndRequest {
    /// Maximum length of the opening in characters
    pub limit: Option<u32>,
}

#[utoipa::path(
    post,
    path = "/api/story/premise",
    tag = "story",
    request_body = StoryRequest,
    responses(
        (status = 200, description = "Premises as {list:[{title,desc}]}", body = Envelope),
        (status = 400, description = "Missing data", body = Envelope),
        (status = 500, description = "Model request failed", body = Envelope)
    )
)]
pub async fn premise(
    State(ctx): State<AppContext>,
    JsonBody(req): JsonBody<StoryRequest>,
) -> ApiResult {
    let context = required(req.context, "context")?;
    // Accept either the character itself or a context that wraps it.
    let character = context.get("character").unwrap_or(&context);
    let data = ctx
        .storyteller
        .generate_premise(
            character,
            &ctx.complexity(req.complexity),
            ctx.config.story.premise_count,
        )
        .await?;
    ok("Premises generated", data)
}

#[utoipa::path(
    post,
    path = "/api/story/init",
    tag = "story",
    request_body = StoryRequest,
    responses(
        (status = 200, description = "Opening part", body = Envelope),
        (status = 400, description = "Missing data", body = Envelope),
        (status = 500, description = "Model request failed", body = Envelope)
    )
)]
pub async fn init_story(
    State(ctx): State<AppContext>,
    JsonBody(req): JsonBody<StoryRequest>,
) -> ApiResult {
    let context = required(req.context, "context")?;
    let data = ctx
        .storyteller
        .initialize_story(&context, &ctx.complexity(req.complexity))
        .await?;
    ok("Story initialized", data)
}

#[utoipa::path(
    post,
    path = "/api/story/part",
    tag = "story",
    request_body = StoryRequest,
    responses(
        (status = 200, description = "Next story part as {part:{...}}", body = Envelope),
        (status = 400, description = "Missing data", body = Envelope),
        (status = 500, description = "Model request failed", body = Envelope)
    )
)]
pub async fn story_part(
    State(ctx): State<AppContext>,
    JsonBody(req): JsonBody<StoryRequest>,
) -> ApiResult {
    let context = required(req.context, "context")?;
    let data = ctx
        .storyteller
        .generate_story_part(&context, &ctx.complexity(req.complexity))
        .await?;
    ok("Story part generated", data)
}

#[utoipa::path(
    post,
    path = "/api/story/actions",
    tag = "story",
    request_body = StoryRequest,
    responses(
        (status = 200, description = "Suggested actions as {list:[{title,desc}]}", body = Envelope),
        (status = 400, description = "Missing data", body = Envelope),
        (status = 500, description = "Model request failed", body = Envelope)
    )
)]
pub async fn actions(
    State(ctx): State<AppContext>,
    JsonBody(req): JsonBody<StoryRequest>,
) -> ApiResult {
    let context = required(req.context, "context")?;
    let data = ctx
        .storyteller
        .generate_actions(
            &context,
            &ctx.complexity(req.complexity),
            ctx.config.story.action_count,
        )
        .await?;
    ok("Actions generated", data)
}

#[utoipa::path(
    post,
    path = "/api/story/end",
    tag = "story",
    request_body = StoryRequest,
    responses(
        (status = 200, description = "Closing part as {part:{...}}", body = Envelope),
        (status = 400, description = "Missing data", body = Envelope),
        (status = 500, description = "Model request failed", body = Envelope)
    )
)]
pub async fn end_story(
    State(ctx): State<AppContext>,
    JsonBody(req): JsonBody<StoryRequest>,
) -> ApiResult {
    let context = required(req.context, "context")?;
    let data = ctx
        .storyteller
        .terminate_story(&context, &ctx.complexity(req.complexity))
        .await?;
    ok("Story terminated", data)
}

#[utoipa::path(
    post,
    path = "/api/story/analyze",
    tag = "story",
    request_body = StoryRequest,
    responses(
        (status = 200, description = "Per-part analytics", body = Envelope),
        (status = 400, description = "Missing data", body = Envelope),
        (status = 500, description = "Model request failed", body = Envelope)
    )
)]
pub async fn analyze(
    State(ctx): State<AppContext>,
    JsonBody(req): JsonBody<StoryRequest>,
) -> ApiResult {
    let context = required(req.context, "context")?;
    required(context.get("story"), "story")?;
    required(context.get("story_parts"), "story_parts")?;
    let data = ctx.storyteller.analyze_story_parts(&context).await?;
    ok("Story parts analyzed", data)
}

#[utoipa::path(
    post,
    path = "/api/story/image",
    tag = "story",
    request_body = StoryImageRequest,
    responses(
        (status = 200, description = "Image prompt and URL", body = Envelope),
        (status = 400, description = "Missing data", body = Envelope),
        (status = 500, description = "Model request failed", body = Envelope)
    )
)]
pub async fn story_image(
    State(ctx): State<AppContext>,
    JsonBody(req): JsonBody<StoryImageRequest>,
) -> ApiResult {
    let content = required_text(req.content, "content")?;
    let style = required_text(req.style, "style")?;
    let data = ctx
        .storyteller
        .generate_story_image(&content, &style)
        .await?;
    ok("Story image generated", data)
}

#[utoipa::path(
    post,
    path = "/api/practice/generate_storytoend",
    tag = "practice",
    request_body = StoryToEndRequest,
    responses(
        (status = 200, description = "Practice story opening", body = Envelope),
        (status = 400, description = "Missing data", body = Envelope),
        (status = 500, description = "Model request failed", body = Envelope)
    )
)]
pub async fn story_to_end(
    State(ctx): State<AppContext>,
    JsonBody(req): JsonBody<StoryToEndRequest>,
) -> ApiResult {
    let limit = req.limit.unwrap_or(ctx.config.story.story_to_end_limit);
    let data = ctx.storyteller.generate_story_to_end(limit).await?;
    ok("Story opening generated", data)
}
