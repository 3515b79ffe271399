//! Scripted backend for unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream;
use futures::StreamExt;

use crate::backend::{AudioInput, ModelBackend, SpeechStream};
use crate::error::{LlmError, Result};
use crate::message::ChatRequest;

/// Replays canned chat replies and records every request.
#[derive(Default)]
pub struct FakeBackend {
    replies: Mutex<VecDeque<String>>,
    pub requests: Mutex<Vec<ChatRequest>>,
    pub image_prompts: Mutex<Vec<String>>,
    pub speech_formats: Mutex<Vec<String>>,
    pub transcriptions: Mutex<Vec<AudioInput>>,
}

impl FakeBackend {
    pub fn with_replies<I, S>(replies: I) -> Arc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            ..Self::default()
        })
    }

    pub fn last_request(&self) -> ChatRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no chat request was made")
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ModelBackend for FakeBackend {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn chat(&self, request: ChatRequest) -> Result<String> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(LlmError::EmptyResponse {
                endpoint: "chat/completions",
            })
    }

    async fn generate_image(&self, prompt: &str) -> Result<String> {
        self.image_prompts.lock().unwrap().push(prompt.to_string());
        Ok("https://images.example.com/generated.png".to_string())
    }

    async fn speech(&self, _text: &str, format: &str) -> Result<SpeechStream> {
        self.speech_formats.lock().unwrap().push(format.to_string());
        let chunks = vec![Ok(Bytes::from_static(b"ID3")), Ok(Bytes::from_static(b"audio"))];
        Ok(stream::iter(chunks).boxed())
    }

    async fn transcribe(&self, audio: AudioInput) -> Result<String> {
        self.transcriptions.lock().unwrap().push(audio);
        Ok("Help me, please".to_string())
    }
}
