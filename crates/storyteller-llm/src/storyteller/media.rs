//! Images, translation, and audio.

use bytes::Bytes;
use serde_json::Value;
use storyteller_common::{language_display_name, Language, Platform};
use tracing::debug;

use super::{compact, string_field, Storyteller};
use crate::backend::{AudioInput, SpeechStream};
use crate::error::Result;
use crate::extract::JsonObject;
use crate::message::{ChatMessage, ChatRequest, ModelTier};
use crate::prompt::{PromptTemplate, PromptVars};
use crate::templates;

/// Transcription hint for improv recordings.
const TRANSCRIBE_PROMPT: &str =
    "This voice recording is from the starting part of an improv story.";

impl Storyteller {
    /// Free-text greeting from the chat model.
    pub async fn hello_world(&self) -> Result<String> {
        let messages = vec![
            ChatMessage::system(templates::HELLO.render(&PromptVars::new())),
            ChatMessage::user(templates::HELLO_USER),
        ];
        self.backend
            .chat(ChatRequest::text(ModelTier::Chat, messages))
            .await
    }

    /// Rewrite a prompt so it suits an image model.
    async fn improve_image_prompt(&self, prompt: &str) -> Result<String> {
        let vars = PromptVars::new()
            .with_var("usage", templates::IMAGE_USAGE)
            .with_var("info", templates::IMAGE_INFO)
            .with_var("example", templates::IMAGE_EXAMPLE);
        let messages = vec![
            ChatMessage::system(templates::IMPROVE_PROMPT.render(&vars)),
            ChatMessage::user(
                templates::IMPROVE_PROMPT_USER.render(&PromptVars::new().with_var("prompt", prompt)),
            ),
        ];
        let improved = self
            .complete_json(
                "improve_prompt",
                ChatRequest::json(ModelTier::FastChat, messages),
            )
            .await?;
        let new_prompt = string_field(&improved, "new_prompt")?;
        debug!(prompt = %new_prompt, "Improved image prompt");
        Ok(new_prompt)
    }

    /// Improve a prompt, generate the image, and report both.
    async fn illustrate(&self, prompt: &str) -> Result<JsonObject> {
        let prompt = self.improve_image_prompt(prompt).await?;
        let image_url = self.backend.generate_image(&prompt).await?;

        let mut result = JsonObject::new();
        result.insert("prompt".to_string(), Value::String(prompt));
        result.insert("image_url".to_string(), Value::String(image_url));
        Ok(result)
    }

    /// Illustrate a story key moment in the given style.
    pub async fn generate_story_image(&self, content: &str, style: &str) -> Result<JsonObject> {
        let prompt = templates::STORY_IMAGE.render(
            &PromptVars::new()
                .with_var("content", content)
                .with_var("style", style),
        );
        self.illustrate(&prompt).await
    }

    /// Portrait of an improv character.
    pub async fn generate_character_image_improv(&self, character: &Value) -> Result<JsonObject> {
        let prompt = templates::CHARACTER_IMAGE
            .render(&PromptVars::new().with_var("character", compact(character)));
        self.illustrate(&prompt).await
    }

    /// Translate free text, returning only the translation.
    pub async fn translate_text(&self, text: &str, source: &str, target: &str) -> Result<String> {
        let user = templates::TRANSLATE_USER.render(&PromptVars::new().with_var("text", text));
        let reply = self
            .complete_json(
                "translate_text",
                translation_request(templates::TRANSLATE_TEXT, source, target, user),
            )
            .await?;
        string_field(&reply, "translation")
    }

    /// Translate a key-points table, keeping its `head`/`body` keys.
    pub async fn translate_keypoints(
        &self,
        keypoints: &Value,
        source: &str,
        target: &str,
    ) -> Result<JsonObject> {
        let user =
            templates::TRANSLATE_USER.render(&PromptVars::new().with_var("text", compact(keypoints)));
        self.complete_json(
            "translate_keypoints",
            translation_request(templates::TRANSLATE_KEYPOINTS, source, target, user),
        )
        .await
    }

    /// Read text aloud in the platform's audio format.
    pub async fn speech(&self, text: &str, platform: Platform) -> Result<SpeechStream> {
        debug!(chars = text.len(), format = platform.audio_format(), "Requesting speech");
        self.backend.speech(text, platform.audio_format()).await
    }

    /// Transcribe a recording of an improv performance.
    pub async fn transcribe(
        &self,
        audio: Bytes,
        filename: &str,
        language: Language,
    ) -> Result<String> {
        self.backend
            .transcribe(AudioInput {
                bytes: audio,
                filename: filename.to_string(),
                language: Some(language.code().to_string()),
                prompt: Some(TRANSCRIBE_PROMPT.to_string()),
            })
            .await
    }
}

/// Fast-chat JSON request for one of the translation templates.
fn translation_request(
    template: PromptTemplate,
    source: &str,
    target: &str,
    user: String,
) -> ChatRequest {
    let vars = PromptVars::new()
        .with_var("source", language_display_name(source))
        .with_var("target", language_display_name(target));
    ChatRequest::json(
        ModelTier::FastChat,
        vec![ChatMessage::system(template.render(&vars)), ChatMessage::user(user)],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storyteller::fake::FakeBackend;
    use crate::LlmError;
    use futures::TryStreamExt;
    use serde_json::json;

    #[tokio::test]
    async fn test_hello_world_is_free_text() {
        let backend = FakeBackend::with_replies(["Hi, I'm a chatbot."]);
        let storyteller = Storyteller::new(backend.clone());

        assert_eq!(storyteller.hello_world().await.unwrap(), "Hi, I'm a chatbot.");
        assert!(!backend.last_request().json);
    }

    #[tokio::test]
    async fn test_story_image_improves_prompt_first() {
        let backend = FakeBackend::with_replies([
            r#"{"old_prompt": "x", "new_prompt": "Childlike drawing of a cat in a kitchen."}"#,
        ]);
        let storyteller = Storyteller::new(backend.clone());

        let result = storyteller
            .generate_story_image("A cat in a kitchen", "crayon")
            .await
            .unwrap();
        assert_eq!(result["prompt"], "Childlike drawing of a cat in a kitchen.");
        assert_eq!(result["image_url"], "https://images.example.com/generated.png");

        let request = backend.last_request();
        assert_eq!(request.tier, ModelTier::FastChat);
        assert!(request
            .user_text()
            .unwrap()
            .contains("A cat in a kitchen.\nIn the style of: crayon."));
        assert_eq!(
            backend.image_prompts.lock().unwrap().as_slice(),
            ["Childlike drawing of a cat in a kitchen.".to_string()]
        );
    }

    #[tokio::test]
    async fn test_improved_prompt_missing_field() {
        let backend = FakeBackend::with_replies([r#"{"old_prompt": "x"}"#]);
        let storyteller = Storyteller::new(backend.clone());

        let err = storyteller
            .generate_character_image_improv(&json!({"fullname": "Johnny"}))
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::MissingField("new_prompt")));
        assert!(backend.image_prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_translate_text_returns_translation() {
        let backend = FakeBackend::with_replies([
            "```json\n{\"original\": \"Hello\", \"translation\": \"Ciao\"}\n```",
        ]);
        let storyteller = Storyteller::new(backend.clone());

        let text = storyteller.translate_text("Hello", "en", "it").await.unwrap();
        assert_eq!(text, "Ciao");

        let request = backend.last_request();
        assert!(request
            .system_text()
            .unwrap()
            .starts_with("Translate text from English to Italian."));
        assert_eq!(request.user_text().unwrap(), "Original text: 'Hello'.");
    }

    #[tokio::test]
    async fn test_translate_keypoints_keeps_table() {
        let backend = FakeBackend::with_replies([r#"{"head": ["Chi"], "body": [[1, "Riccardo"]]}"#]);
        let storyteller = Storyteller::new(backend.clone());

        let result = storyteller
            .translate_keypoints(&json!({"head": ["Who"], "body": [[1, "Riccardo"]]}), "en", "it")
            .await
            .unwrap();
        assert_eq!(result["head"][0], "Chi");
        assert!(backend
            .last_request()
            .system_text()
            .unwrap()
            .contains("Keep the keys \"head\" and \"body\" untranslated."));
    }

    #[tokio::test]
    async fn test_speech_format_by_platform() {
        let backend = FakeBackend::with_replies(Vec::<String>::new());
        let storyteller = Storyteller::new(backend.clone());

        let chunks: Vec<Bytes> = storyteller
            .speech("Once upon a time", Platform::Ios)
            .await
            .unwrap()
            .try_collect()
            .await
            .unwrap();
        assert_eq!(chunks.concat(), b"ID3audio");

        storyteller.speech("Again", Platform::Other).await.unwrap();
        assert_eq!(
            backend.speech_formats.lock().unwrap().as_slice(),
            ["mp3".to_string(), "opus".to_string()]
        );
    }

    #[tokio::test]
    async fn test_transcribe_passes_language_and_hint() {
        let backend = FakeBackend::with_replies(Vec::<String>::new());
        let storyteller = Storyteller::new(backend.clone());

        let text = storyteller
            .transcribe(Bytes::from_static(b"RIFF"), "audio.webm", Language::Italian)
            .await
            .unwrap();
        assert_eq!(text, "Help me, please");

        let calls = backend.transcriptions.lock().unwrap();
        assert_eq!(calls[0].filename, "audio.webm");
        assert_eq!(calls[0].language.as_deref(), Some("it"));
        assert_eq!(calls[0].prompt.as_deref(), Some(TRANSCRIBE_PROMPT));
    }
}
