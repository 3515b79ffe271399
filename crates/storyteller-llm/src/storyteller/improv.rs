//! Motion and improvisation flow.
//!
//! These capabilities analyse performed video (as ordered frames) and, for
//! improv, the transcript of what the performer said, then fold the result
//! into the story.

use serde_json::{json, Value};
use storyteller_common::{Complexity, Language};
use tracing::debug;

use super::story::part_vars;
use super::{compact, frames_message, Storyteller};
use crate::error::{LlmError, Result};
use crate::extract::JsonObject;
use crate::knobs::PartKnobs;
use crate::message::{ChatMessage, ChatRequest, ModelTier};
use crate::prompt::PromptVars;
use crate::templates;

const INIT_HINTS_TEMPERATURE: f32 = 1.3;
const END_HINTS_TEMPERATURE: f32 = 1.2;
const TERMINATE_IMPROV_TEMPERATURE: f32 = 0.5;

/// Everything needed to analyse one improv performance.
#[derive(Debug, Clone, Default)]
pub struct ImprovInput {
    /// Ordered frames as image data URLs.
    pub frames: Vec<String>,
    /// What the performer said.
    pub transcript: String,
    /// Who/where/what hints, or the chosen ending when `ending` is set.
    pub hints: Option<JsonObject>,
    pub language: Language,
    /// Story so far; `None` when the performance opens the story.
    pub story: Option<String>,
    /// The hints describe an ending rather than a starting point.
    pub ending: bool,
}

impl Storyteller {
    /// Describe the key movement in a sequence of frames.
    pub async fn process_motion(&self, frames: &[String], story: &str) -> Result<JsonObject> {
        debug!(frames = frames.len(), "Processing motion");
        let messages = vec![
            ChatMessage::system(templates::PROCESS_MOTION.render(&PromptVars::new())),
            ChatMessage::user(
                templates::PROCESS_MOTION_USER.render(&PromptVars::new().with_var("story", story)),
            ),
            frames_message(frames)?,
        ];
        self.complete_json(
            "process_motion",
            ChatRequest::json(ModelTier::Chat, messages),
        )
        .await
    }

    /// Continue the story with the analysed motion.
    ///
    /// `context` carries `premise`, `story`, and `motion.data` with the
    /// `action`, `desc`, and `emotion` of the performed movement.
    pub async fn generate_motion_part(
        &self,
        context: &Value,
        complexity: &Complexity,
    ) -> Result<JsonObject> {
        let motion = nested_data(context, "motion")?;
        let ctx = json!({
            "premise": context.get("premise"),
            "story": context.get("story"),
            "action": motion.get("action"),
            "desc": motion.get("desc"),
            "emotion": motion.get("emotion"),
        });

        let knobs = PartKnobs::roll();
        debug!(setting = knobs.setting, length = knobs.length, "Chosen setting");
        let messages = vec![
            ChatMessage::system(templates::MOTION_PART.render(&part_vars(&knobs, complexity))),
            ChatMessage::user(compact(&ctx)),
        ];
        self.complete_json(
            "generate_motion_part",
            ChatRequest::json(ModelTier::Chat, messages),
        )
        .await
    }

    /// Analyse an improv performance together with its transcript.
    pub async fn process_improv(&self, input: &ImprovInput) -> Result<JsonObject> {
        debug!(
            frames = input.frames.len(),
            language = %input.language,
            with_story = input.story.is_some(),
            "Processing improv"
        );
        let frames = frames_message(&input.frames)?;
        let system = improv_system_prompt(input);

        let user = match &input.story {
            Some(story) => templates::IMPROV_STORY_USER.render(
                &PromptVars::new()
                    .with_var("transcript", input.transcript.as_str())
                    .with_var("story", story.as_str()),
            ),
            None => templates::IMPROV_USER.render(
                &PromptVars::new().with_var("transcript", input.transcript.as_str()),
            ),
        };

        let messages = vec![ChatMessage::system(system), ChatMessage::user(user), frames];
        self.complete_json(
            "process_improv",
            ChatRequest::json(ModelTier::Chat, messages),
        )
        .await
    }

    /// Turn an opening performance into a story premise.
    pub async fn generate_premise_improv(
        &self,
        transcript: &str,
        motion: &Value,
        character: &Value,
    ) -> Result<JsonObject> {
        let improv = json!({"dialogue": transcript, "motion": motion});
        let user = templates::PREMISE_IMPROV_USER.render(
            &PromptVars::new()
                .with_var("improv", compact(&improv))
                .with_var("character", compact(character)),
        );
        let messages = vec![
            ChatMessage::system(templates::PREMISE_IMPROV.render(&PromptVars::new())),
            ChatMessage::user(user),
        ];
        self.complete_json(
            "generate_premise_improv",
            ChatRequest::json(ModelTier::Chat, messages),
        )
        .await
    }

    /// Continue the story with an analysed improv performance.
    ///
    /// `context` carries `premise`, `story`, and `improv.data` with the
    /// `action`, `description`, `emotion`, and `transcript` of the performance.
    pub async fn generate_part_improv(
        &self,
        context: &Value,
        complexity: &Complexity,
    ) -> Result<JsonObject> {
        let improv = nested_data(context, "improv")?;
        let ctx = json!({
            "premise": context.get("premise"),
            "story": context.get("story"),
            "action": improv.get("action"),
            "desc": improv.get("description"),
            "emotion": improv.get("emotion"),
            "transcript": improv.get("transcript"),
        });

        let knobs = PartKnobs::roll();
        debug!(setting = knobs.setting, length = knobs.length, "Chosen setting");
        let messages = vec![
            ChatMessage::system(templates::PART_IMPROV.render(&part_vars(&knobs, complexity))),
            ChatMessage::user(compact(&ctx)),
        ];
        self.complete_json(
            "generate_part_improv",
            ChatRequest::json(ModelTier::Chat, messages),
        )
        .await
    }

    /// Invent a story opening for the practice mode, under `limit` characters.
    pub async fn generate_story_to_end(&self, limit: u32) -> Result<JsonObject> {
        let vars = PromptVars::new().with_var("limit", limit.to_string());
        let messages = vec![ChatMessage::system(templates::STORY_TO_END.render(&vars))];
        self.complete_json(
            "generate_story_to_end",
            ChatRequest::json(ModelTier::Chat, messages),
        )
        .await
    }

    /// Propose `count` who/where/what prompts for starting an improv.
    pub async fn generate_init_hints(&self, language: Language, count: u32) -> Result<JsonObject> {
        let keys = language.hint_keys();
        let [who, place, what] = hint_examples(language);
        let vars = PromptVars::new()
            .with_var("language", language.name())
            .with_var("count", count.to_string())
            .with_var("who_key", keys.who)
            .with_var("who_example", who)
            .with_var("place_key", keys.place)
            .with_var("place_example", place)
            .with_var("what_key", keys.what)
            .with_var("what_example", what);
        let messages = vec![ChatMessage::system(templates::INIT_HINTS.render(&vars))];
        self.complete_json(
            "generate_init_hints",
            ChatRequest::json(ModelTier::Chat, messages).with_temperature(INIT_HINTS_TEMPERATURE),
        )
        .await
    }

    /// Propose `count` sets of happy/sad/absurd/catastrophic endings.
    pub async fn generate_end_hints(&self, language: Language, count: u32) -> Result<JsonObject> {
        let [happy_key, sad_key, absurd_key, catastrophic_key] = language.ending_keys();
        let [happy, sad, absurd, catastrophic] = ending_examples(language);
        let vars = PromptVars::new()
            .with_var("language", language.name())
            .with_var("count", count.to_string())
            .with_var("happy_key", happy_key)
            .with_var("happy_example", happy)
            .with_var("sad_key", sad_key)
            .with_var("sad_example", sad)
            .with_var("absurd_key", absurd_key)
            .with_var("absurd_example", absurd)
            .with_var("catastrophic_key", catastrophic_key)
            .with_var("catastrophic_example", catastrophic);
        let messages = vec![ChatMessage::system(templates::END_HINTS.render(&vars))];
        self.complete_json(
            "generate_end_hints",
            ChatRequest::json(ModelTier::Chat, messages).with_temperature(END_HINTS_TEMPERATURE),
        )
        .await
    }

    /// Close the story in the direction the final improv points to.
    pub async fn terminate_story_improv(&self, story: &Value, improv: &Value) -> Result<JsonObject> {
        let vars = PromptVars::new().with_var("improv", compact(improv));
        let messages = vec![
            ChatMessage::system(templates::TERMINATE_IMPROV.render(&vars)),
            ChatMessage::user(compact(story)),
        ];
        self.complete_json(
            "terminate_story_improv",
            ChatRequest::json(ModelTier::Chat, messages)
                .with_temperature(TERMINATE_IMPROV_TEMPERATURE),
        )
        .await
    }

    /// Create the protagonist from what the performer said and did.
    pub async fn generate_character_improv(
        &self,
        transcript: &str,
        motion: &Value,
    ) -> Result<JsonObject> {
        let user = templates::CHARACTER_IMPROV_USER.render(
            &PromptVars::new()
                .with_var("transcript", transcript)
                .with_var("motion", compact(motion)),
        );
        let messages = vec![
            ChatMessage::system(templates::CHARACTER_IMPROV.render(&PromptVars::new())),
            ChatMessage::user(user),
        ];
        self.complete_json(
            "generate_character_improv",
            ChatRequest::json(ModelTier::Chat, messages),
        )
        .await
    }
}

/// Get `context[field].data` as an object.
fn nested_data<'a>(context: &'a Value, field: &str) -> Result<&'a JsonObject> {
    context
        .get(field)
        .and_then(|v| v.get("data"))
        .and_then(Value::as_object)
        .ok_or_else(|| LlmError::invalid_input(format!("Missing required field: {field}")))
}

/// Whether a hint is present with a non-empty value.
fn has_hint(hints: &JsonObject, key: &str) -> bool {
    match hints.get(key) {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(_) => true,
    }
}

/// Assemble the numbered system instruction for an improv analysis.
fn improv_system_prompt(input: &ImprovInput) -> String {
    let (intro, mut step) = match input.story {
        Some(_) => (templates::IMPROV_STORY_INTRO, 4),
        None => (templates::IMPROV_INTRO, 3),
    };
    let mut sections = vec![intro.render(&PromptVars::new())];

    if let Some(hints) = input.hints.as_ref().filter(|h| !h.is_empty()) {
        let vars = PromptVars::new()
            .with_var("step", step.to_string())
            .with_var("hints", compact(&Value::Object(hints.clone())));
        step += 1;

        if input.ending && input.story.is_none() {
            sections.push(templates::IMPROV_ENDING_HINTS.render(&vars));
        } else {
            sections.push(templates::IMPROV_GUIDE_HINTS.render(&vars));
            let keys = input.language.hint_keys();
            for (key, template) in [
                (keys.who, templates::IMPROV_HINT_WHO),
                (keys.place, templates::IMPROV_HINT_WHERE),
                (keys.what, templates::IMPROV_HINT_WHAT),
            ] {
                if has_hint(hints, key) {
                    sections.push(template.render(&PromptVars::new().with_var("key", key)));
                }
            }
        }
    }

    sections.push(
        templates::IMPROV_OUTPUT.render(&PromptVars::new().with_var("step", step.to_string())),
    );
    sections.join("\n")
}

/// Localised example values for the who/where/what hint keys.
fn hint_examples(language: Language) -> [&'static str; 3] {
    match language {
        Language::English => [
            "The Pope",
            "A haunted house",
            "He found a secret passage in the basement.",
        ],
        Language::Italian => [
            "Il Papa",
            "Una casa infestata",
            "Ha trovato un passaggio segreto in cantina.",
        ],
    }
}

/// Localised example values for the four ending categories.
fn ending_examples(language: Language) -> [&'static str; 4] {
    match language {
        Language::English => [
            "He uncovers a hidden treasure that brings peace to the town.",
            "He finds an old letter revealing a tragic family secret.",
            "The basement opens onto a disco where ghosts are throwing a party.",
            "The passage collapses and traps him in the haunted house forever.",
        ],
        Language::Italian => [
            "Scopre un tesoro nascosto che riporta la pace in paese.",
            "Trova una vecchia lettera che rivela un tragico segreto di famiglia.",
            "La cantina porta a una discoteca dove i fantasmi danno una festa.",
            "Il passaggio crolla e lo intrappola per sempre nella casa infestata.",
        ],
    }
}
