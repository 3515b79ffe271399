//! The capability catalogue.
//!
//! [`Storyteller`] exposes one async method per story capability. Each method
//! renders its template, sends the request through the [`ModelBackend`], and
//! extracts the JSON object from the reply. Request context is passed to the
//! model as compact JSON.

mod improv;
mod media;
mod story;

#[cfg(test)]
pub(crate) mod fake;

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::backend::ModelBackend;
use crate::error::{LlmError, Result};
use crate::extract::{extract_json, JsonObject};
use crate::message::{ChatMessage, ChatRequest, ContentPart};
use crate::templates::FRAMES_INTRO;

pub use improv::ImprovInput;

/// Story generation front end over a model backend.
#[derive(Clone)]
pub struct Storyteller {
    backend: Arc<dyn ModelBackend>,
}

impl Storyteller {
    pub fn new(backend: Arc<dyn ModelBackend>) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &Arc<dyn ModelBackend> {
        &self.backend
    }

    /// Send a request and extract the JSON object from the reply.
    async fn complete_json(
        &self,
        capability: &'static str,
        request: ChatRequest,
    ) -> Result<JsonObject> {
        debug!(capability, backend = self.backend.name(), "Running capability");
        let reply = self.backend.chat(request).await?;
        Ok(extract_json(&reply)?)
    }
}

/// Compact JSON for embedding request context in a prompt.
pub(crate) fn compact(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Fetch a string field from a reply object.
pub(crate) fn string_field(object: &JsonObject, field: &'static str) -> Result<String> {
    object
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(LlmError::MissingField(field))
}

/// Build the user message carrying ordered video frames.
pub(crate) fn frames_message(frames: &[String]) -> Result<ChatMessage> {
    if frames.is_empty() {
        return Err(LlmError::invalid_input("No frames provided"));
    }
    let mut parts = Vec::with_capacity(frames.len() + 1);
    parts.push(ContentPart::text(FRAMES_INTRO));
    parts.extend(
        frames
            .iter()
            .map(|frame| ContentPart::low_detail_image(frame.as_str())),
    );
    Ok(ChatMessage::user_parts(parts))
}
