//! Classic story flow: character, premise, parts, actions, ending.

use serde_json::Value;
use storyteller_common::Complexity;
use tracing::debug;

use super::{compact, Storyteller};
use crate::error::Result;
use crate::extract::JsonObject;
use crate::knobs::{self, PartKnobs};
use crate::message::{ChatMessage, ChatRequest, ContentPart, ModelTier};
use crate::prompt::PromptVars;
use crate::templates;

impl Storyteller {
    /// Describe a drawing and invent a character for it.
    pub async fn generate_character(
        &self,
        drawing_url: &str,
        complexity: &Complexity,
    ) -> Result<JsonObject> {
        let vars = PromptVars::new().with_var("complexity", complexity.prompt());
        let messages = vec![
            ChatMessage::system(templates::CHARACTER.render(&vars)),
            ChatMessage::user_parts(vec![ContentPart::image(drawing_url)]),
        ];
        self.complete_json(
            "generate_character",
            ChatRequest::text(ModelTier::Vision, messages),
        )
        .await
    }

    /// Propose `count` premises for a character.
    pub async fn generate_premise(
        &self,
        character: &Value,
        complexity: &Complexity,
        count: u32,
    ) -> Result<JsonObject> {
        let vars = PromptVars::new()
            .with_var("count", count.to_string())
            .with_var("complexity", complexity.prompt());
        let messages = vec![
            ChatMessage::system(templates::PREMISE.render(&vars)),
            ChatMessage::user(compact(character)),
        ];
        self.complete_json(
            "generate_premise",
            ChatRequest::json(ModelTier::FastChat, messages),
        )
        .await
    }

    /// Write the opening part of a story.
    pub async fn initialize_story(
        &self,
        context: &Value,
        complexity: &Complexity,
    ) -> Result<JsonObject> {
        let length = knobs::sentence_cap(&mut rand::thread_rng());
        let vars = PromptVars::new()
            .with_var("length", length.to_string())
            .with_var("complexity", complexity.prompt());
        let messages = vec![
            ChatMessage::system(templates::INITIALIZE_STORY.render(&vars)),
            ChatMessage::user(compact(context)),
        ];
        self.complete_json(
            "initialize_story",
            ChatRequest::json(ModelTier::Chat, messages),
        )
        .await
    }

    /// Continue the story with the chosen action.
    pub async fn generate_story_part(
        &self,
        context: &Value,
        complexity: &Complexity,
    ) -> Result<JsonObject> {
        let knobs = PartKnobs::roll();
        debug!(setting = knobs.setting, length = knobs.length, "Chosen setting");
        let system = templates::STORY_PART.render(&part_vars(&knobs, complexity));
        let messages = vec![ChatMessage::system(system), ChatMessage::user(compact(context))];
        self.complete_json(
            "generate_story_part",
            ChatRequest::json(ModelTier::Chat, messages),
        )
        .await
    }

    /// Suggest `2 * count` next actions for the main character.
    pub async fn generate_actions(
        &self,
        context: &Value,
        complexity: &Complexity,
        count: u32,
    ) -> Result<JsonObject> {
        let vars = PromptVars::new()
            .with_var("count", (count * 2).to_string())
            .with_var("complexity", complexity.prompt());
        let messages = vec![
            ChatMessage::system(templates::GENERATE_ACTIONS.render(&vars)),
            ChatMessage::user(compact(context)),
        ];
        self.complete_json(
            "generate_actions",
            ChatRequest::json(ModelTier::Chat, messages),
        )
        .await
    }

    /// Write the final part of the story with a random ending style.
    pub async fn terminate_story(
        &self,
        context: &Value,
        complexity: &Complexity,
    ) -> Result<JsonObject> {
        let ending = knobs::ending(&mut rand::thread_rng());
        debug!(ending, "Chosen ending");
        let vars = PromptVars::new()
            .with_var("ending", ending)
            .with_var("complexity", complexity.prompt());
        let messages = vec![
            ChatMessage::system(templates::TERMINATE_STORY.render(&vars)),
            ChatMessage::user(compact(context)),
        ];
        self.complete_json(
            "terminate_story",
            ChatRequest::json(ModelTier::Chat, messages),
        )
        .await
    }

    /// Score candidate story parts against the story so far.
    pub async fn analyze_story_parts(&self, context: &Value) -> Result<JsonObject> {
        let messages = vec![
            ChatMessage::system(templates::ANALYZE_STORY_PARTS.render(&PromptVars::new())),
            ChatMessage::user(compact(context)),
        ];
        self.complete_json(
            "analyze_story_parts",
            ChatRequest::json(ModelTier::FastChat, messages),
        )
        .await
    }
}

/// Variables shared by every story-part template.
pub(super) fn part_vars(knobs: &PartKnobs, complexity: &Complexity) -> PromptVars {
    PromptVars::new()
        .with_var("convergence", knobs.convergence)
        .with_var("setting", knobs.setting)
        .with_var("length", knobs.length.to_string())
        .with_var("complexity", complexity.prompt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storyteller::fake::FakeBackend;
    use crate::templates::{ENDINGS, PLOT_SETTINGS};
    use crate::LlmError;
    use serde_json::json;

    const PART_REPLY: &str = r#"```json
{"part": {"text": "He crept into the kitchen.", "keymoment": "An empty can.", "sentiment": "sad", "who": ["Johnny"], "where": "kitchen", "objects": ["tuna"]}}
```"#;

    #[tokio::test]
    async fn test_generate_character_uses_vision_without_json_mode() {
        let backend = FakeBackend::with_replies([
            r#"{"image": {"content": "A cat"}, "character": {"shortname": "Johnny"}}"#,
        ]);
        let storyteller = Storyteller::new(backend.clone());

        let result = storyteller
            .generate_character("data:image/jpeg;base64,AAAA", &Complexity::Level(0))
            .await
            .unwrap();
        assert_eq!(result["character"]["shortname"], "Johnny");

        let request = backend.last_request();
        assert_eq!(request.tier, ModelTier::Vision);
        assert!(!request.json);
        let system = request.system_text().unwrap();
        assert!(system.contains(Complexity::Level(0).prompt()));
        let user = serde_json::to_value(&request.messages[1]).unwrap();
        assert_eq!(
            user["content"][0]["image_url"]["url"],
            "data:image/jpeg;base64,AAAA"
        );
    }

    #[tokio::test]
    async fn test_generate_premise_counts_and_context() {
        let backend = FakeBackend::with_replies([r#"{"list": [{"title": "t", "desc": "d"}]}"#]);
        let storyteller = Storyteller::new(backend.clone());

        let character = json!({"fullname": "Johnny the cat"});
        let result = storyteller
            .generate_premise(&character, &Complexity::Level(1), 3)
            .await
            .unwrap();
        assert_eq!(result["list"][0]["title"], "t");

        let request = backend.last_request();
        assert_eq!(request.tier, ModelTier::FastChat);
        assert!(request.json);
        assert!(request.system_text().unwrap().contains("Invent 3 distinct"));
        assert_eq!(
            request.user_text().unwrap(),
            r#"{"fullname":"Johnny the cat"}"#
        );
    }

    #[tokio::test]
    async fn test_story_part_renders_all_knobs() {
        let backend = FakeBackend::with_replies([PART_REPLY]);
        let storyteller = Storyteller::new(backend.clone());

        let context = json!({"premise": "p", "story": "s", "action": "Investigate"});
        let result = storyteller
            .generate_story_part(&context, &Complexity::Prompt("Use rhymes.".into()))
            .await
            .unwrap();
        assert_eq!(result["part"]["where"], "kitchen");

        let system = backend.last_request().system_text().unwrap();
        assert!(!system.contains("{convergence}"));
        assert!(!system.contains("{setting}"));
        assert!(!system.contains("{length}"));
        assert!(system.contains("Use rhymes."));
        assert!(PLOT_SETTINGS.iter().any(|s| system.contains(s)));
    }

    #[tokio::test]
    async fn test_actions_are_doubled() {
        let backend = FakeBackend::with_replies([r#"{"list": []}"#]);
        let storyteller = Storyteller::new(backend.clone());

        storyteller
            .generate_actions(&json!({"story": "s"}), &Complexity::default(), 2)
            .await
            .unwrap();
        assert!(backend
            .last_request()
            .system_text()
            .unwrap()
            .contains("Suggest 4 distinct actions"));
    }

    #[tokio::test]
    async fn test_terminate_story_picks_an_ending() {
        let backend = FakeBackend::with_replies([PART_REPLY]);
        let storyteller = Storyteller::new(backend.clone());

        storyteller
            .terminate_story(&json!({"story": "s"}), &Complexity::default())
            .await
            .unwrap();
        let system = backend.last_request().system_text().unwrap();
        assert!(ENDINGS.iter().any(|e| system.contains(e)));
    }

    #[tokio::test]
    async fn test_initialize_story_bare_reply() {
        let backend = FakeBackend::with_replies([
            r#"{"text": "Once upon a time", "keymoment": "k", "sentiment": "happy"}"#,
        ]);
        let storyteller = Storyteller::new(backend.clone());

        let result = storyteller
            .initialize_story(&json!({"character": {}, "premise": {}}), &Complexity::default())
            .await
            .unwrap();
        assert_eq!(result["sentiment"], "happy");
        assert_eq!(backend.last_request().tier, ModelTier::Chat);
    }

    #[tokio::test]
    async fn test_unparsable_reply_is_an_error() {
        let backend = FakeBackend::with_replies(["I'm sorry, I can't help with that."]);
        let storyteller = Storyteller::new(backend);

        let err = storyteller
            .analyze_story_parts(&json!({"story": [], "story_parts": []}))
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Extract(_)));
    }
}
