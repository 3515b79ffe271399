//! The model service seam.
//!
//! [`ModelBackend`] is what every capability talks to. The production
//! implementation is [`OpenAiBackend`](crate::OpenAiBackend); tests plug in a
//! scripted fake.

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;

use crate::error::Result;
use crate::message::ChatRequest;

/// Audio chunks relayed from the speech model as they arrive.
pub type SpeechStream = BoxStream<'static, Result<Bytes>>;

/// Audio to transcribe.
#[derive(Debug, Clone)]
pub struct AudioInput {
    pub bytes: Bytes,
    /// File name sent with the upload; its extension tells the service the codec.
    pub filename: String,
    /// ISO 639-1 language hint.
    pub language: Option<String>,
    /// Free-text hint to bias the transcription.
    pub prompt: Option<String>,
}

/// A remote model service.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    /// Short name for logging.
    fn name(&self) -> &'static str;

    /// Run a chat completion and return the first choice's text.
    async fn chat(&self, request: ChatRequest) -> Result<String>;

    /// Generate one image and return its URL.
    async fn generate_image(&self, prompt: &str) -> Result<String>;

    /// Synthesize speech in the given format (`mp3`, `opus`).
    async fn speech(&self, text: &str, format: &str) -> Result<SpeechStream>;

    /// Transcribe audio to text.
    async fn transcribe(&self, audio: AudioInput) -> Result<String>;
}
