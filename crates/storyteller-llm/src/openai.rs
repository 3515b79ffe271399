//! OpenAI-compatible model backend.
//!
//! Implements [`ModelBackend`] against the OpenAI REST API (or any service
//! exposing the same endpoints under a different base URL).
//!
//! Endpoints used:
//! - `chat/completions` for text, JSON, and vision requests.
//! - `images/generations` for illustrations.
//! - `audio/speech` for streamed text-to-speech.
//! - `audio/transcriptions` for speech-to-text.

use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::backend::{AudioInput, ModelBackend, SpeechStream};
use crate::error::{LlmError, Result};
use crate::message::{ChatMessage, ChatRequest, ModelTier};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

const CHAT_ENDPOINT: &str = "chat/completions";
const IMAGE_ENDPOINT: &str = "images/generations";
const SPEECH_ENDPOINT: &str = "audio/speech";
const TRANSCRIBE_ENDPOINT: &str = "audio/transcriptions";

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Concrete model names for each tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelNames {
    pub chat: String,
    pub fast_chat: String,
    pub vision: String,
    pub image: String,
    pub tts: String,
    pub stt: String,
}

impl Default for ModelNames {
    fn default() -> Self {
        Self {
            chat: "gpt-4-1106-preview".to_string(),
            fast_chat: "gpt-3.5-turbo-1106".to_string(),
            vision: "gpt-4-vision-preview".to_string(),
            image: "dall-e-2".to_string(),
            tts: "tts-1".to_string(),
            stt: "whisper-1".to_string(),
        }
    }
}

impl ModelNames {
    /// Model name for a chat tier.
    pub fn for_tier(&self, tier: ModelTier) -> &str {
        match tier {
            ModelTier::Chat => &self.chat,
            ModelTier::FastChat => &self.fast_chat,
            ModelTier::Vision => &self.vision,
        }
    }
}

/// Connection and model settings for [`OpenAiBackend`].
#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    pub api_key: String,
    pub organization: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
    pub max_tokens: u32,
    pub models: ModelNames,
    pub image_size: String,
    pub voice: String,
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            organization: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(120),
            max_tokens: 1024,
            models: ModelNames::default(),
            image_size: "512x512".to_string(),
            voice: "echo".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Wire types (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ChatBody<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

#[derive(Debug, Serialize)]
struct ImageBody<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u32,
    size: &'a str,
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    data: Vec<ImageDatum>,
}

#[derive(Debug, Deserialize)]
struct ImageDatum {
    url: Option<String>,
}

#[derive(Debug, Serialize)]
struct SpeechBody<'a> {
    model: &'a str,
    voice: &'a str,
    input: &'a str,
    response_format: &'a str,
}

#[derive(Debug, Deserialize)]
struct Transcription {
    text: String,
}

// ---------------------------------------------------------------------------
// Backend implementation
// ---------------------------------------------------------------------------

/// OpenAI-compatible backend.
///
/// # Examples
///
/// ```no_run
/// use storyteller_llm::{OpenAiBackend, OpenAiSettings};
///
/// let settings = OpenAiSettings {
///     api_key: "sk-...".into(),
///     ..OpenAiSettings::default()
/// };
/// let backend = OpenAiBackend::new(settings).unwrap();
/// ```
pub struct OpenAiBackend {
    client: reqwest::Client,
    settings: OpenAiSettings,
}

impl OpenAiBackend {
    /// Create a backend with its own HTTP client.
    pub fn new(settings: OpenAiSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| LlmError::request("client", e))?;
        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &OpenAiSettings {
        &self.settings
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.settings.base_url.trim_end_matches('/'), endpoint)
    }

    fn post(&self, endpoint: &str) -> reqwest::RequestBuilder {
        let builder = self
            .client
            .post(self.url(endpoint))
            .bearer_auth(&self.settings.api_key);
        match &self.settings.organization {
            Some(org) if !org.is_empty() => builder.header("OpenAI-Organization", org),
            _ => builder,
        }
    }

    /// Send a request and turn non-success statuses into errors.
    async fn send(
        &self,
        endpoint: &'static str,
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response> {
        let response = builder
            .send()
            .await
            .map_err(|e| LlmError::request(endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Status {
                endpoint,
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl ModelBackend for OpenAiBackend {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn chat(&self, request: ChatRequest) -> Result<String> {
        let model = self.settings.models.for_tier(request.tier);
        let body = ChatBody {
            model,
            messages: &request.messages,
            max_tokens: self.settings.max_tokens,
            temperature: request.temperature,
            response_format: request.json.then_some(ResponseFormat {
                kind: "json_object",
            }),
        };

        let completion: ChatCompletion = self
            .send(CHAT_ENDPOINT, self.post(CHAT_ENDPOINT).json(&body))
            .await?
            .json()
            .await
            .map_err(|e| LlmError::request(CHAT_ENDPOINT, e))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(LlmError::EmptyResponse {
                endpoint: CHAT_ENDPOINT,
            })?;

        debug!(model, chars = content.len(), "Chat completion received");
        Ok(content)
    }

    async fn generate_image(&self, prompt: &str) -> Result<String> {
        let model = self.settings.models.image.as_str();
        let body = ImageBody {
            model,
            prompt,
            n: 1,
            size: &self.settings.image_size,
        };

        let response: ImageResponse = self
            .send(IMAGE_ENDPOINT, self.post(IMAGE_ENDPOINT).json(&body))
            .await?
            .json()
            .await
            .map_err(|e| LlmError::request(IMAGE_ENDPOINT, e))?;

        let url = response
            .data
            .into_iter()
            .next()
            .and_then(|d| d.url)
            .ok_or(LlmError::EmptyResponse {
                endpoint: IMAGE_ENDPOINT,
            })?;

        debug!(model, "Image generated");
        Ok(url)
    }

    async fn speech(&self, text: &str, format: &str) -> Result<SpeechStream> {
        let model = self.settings.models.tts.as_str();
        let body = SpeechBody {
            model,
            voice: &self.settings.voice,
            input: text,
            response_format: format,
        };

        let response = self
            .send(SPEECH_ENDPOINT, self.post(SPEECH_ENDPOINT).json(&body))
            .await?;

        debug!(model, format, "Speech stream opened");
        Ok(response
            .bytes_stream()
            .map(|chunk| chunk.map_err(|e| LlmError::request(SPEECH_ENDPOINT, e)))
            .boxed())
    }

    async fn transcribe(&self, audio: AudioInput) -> Result<String> {
        let model = self.settings.models.stt.clone();
        let file = Part::bytes(audio.bytes.to_vec()).file_name(audio.filename);
        let mut form = Form::new()
            .text("model", model.clone())
            .text("response_format", "json")
            .part("file", file);
        if let Some(language) = audio.language.filter(|l| !l.is_empty()) {
            form = form.text("language", language);
        }
        if let Some(prompt) = audio.prompt.filter(|p| !p.is_empty()) {
            form = form.text("prompt", prompt);
        }

        let transcription: Transcription = self
            .send(
                TRANSCRIBE_ENDPOINT,
                self.post(TRANSCRIBE_ENDPOINT).multipart(form),
            )
            .await?
            .json()
            .await
            .map_err(|e| LlmError::request(TRANSCRIBE_ENDPOINT, e))?;

        debug!(model = %model, chars = transcription.text.len(), "Transcription received");
        Ok(transcription.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_for_tier() {
        let models = ModelNames::default();
        assert_eq!(models.for_tier(ModelTier::Chat), "gpt-4-1106-preview");
        assert_eq!(models.for_tier(ModelTier::FastChat), "gpt-3.5-turbo-1106");
        assert_eq!(models.for_tier(ModelTier::Vision), "gpt-4-vision-preview");
    }

    #[test]
    fn test_url_joins_base() {
        let backend = OpenAiBackend::new(OpenAiSettings {
            base_url: "http://localhost:9999/v1/".into(),
            ..OpenAiSettings::default()
        })
        .unwrap();
        assert_eq!(
            backend.url(CHAT_ENDPOINT),
            "http://localhost:9999/v1/chat/completions"
        );
    }

    #[test]
    fn test_chat_body_shape() {
        let messages = vec![ChatMessage::user("hi")];
        let body = ChatBody {
            model: "m",
            messages: &messages,
            max_tokens: 1024,
            temperature: None,
            response_format: Some(ResponseFormat {
                kind: "json_object",
            }),
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["response_format"]["type"], "json_object");
        assert_eq!(value["max_tokens"], 1024);
        assert!(value.get("temperature").is_none());
    }
}
