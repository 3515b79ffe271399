use axum::{extract::State, routing::get, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::envelope::{ok, ApiResult, Envelope};
use super::AppContext;

pub fn session_routes() -> Router<AppContext> {
    Router::new()
        .route("/hello", get(hello))
        .route("/hello/llm", get(hello_llm))
        .route("/session", get(new_session))
}

/// A freshly minted client session; nothing is kept server-side.
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub id: Uuid,
    /// RFC 3339 creation time
    pub created_at: String,
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
}

#[utoipa::path(
    get,
    path = "/api/hello",
    tag = "session",
    responses(
        (status = 200, description = "Static greeting", body = Envelope)
    )
)]
pub async fn hello() -> ApiResult {
    ok("Hello from the backend!", serde_json::Value::Null)
}

#[utoipa::path(
    get,
    path = "/api/hello/llm",
    tag = "session",
    responses(
        (status = 200, description = "Greeting written by the chat model", body = Envelope),
        (status = 500, description = "Model request failed", body = Envelope)
    )
)]
pub async fn hello_llm(State(ctx): State<AppContext>) -> ApiResult {
    let greeting = ctx.storyteller.hello_world().await?;
    ok("Hello from the model!", greeting)
}

#[utoipa::path(
    get,
    path = "/api/session",
    tag = "session",
    responses(
        (status = 200, description = "New session identifier", body = Envelope)
    )
)]
pub async fn new_session() -> ApiResult {
    let now = Utc::now();
    let session = SessionResponse {
        id: Uuid::new_v4(),
        created_at: now.to_rfc3339(),
        timestamp: now.timestamp_millis(),
    };
    tracing::info!("New session {}", session.id);
    ok("Session created", session)
}
