//! Storyteller-LLM: the generation layer.
//!
//! This crate owns everything between a story request and the remote model:
//!
//! - **Prompt catalogue**: one instruction template per capability ([`templates`])
//! - **Prompt rendering**: `{name}` placeholder substitution ([`PromptVars`])
//! - **Model backend**: the [`ModelBackend`] seam and its OpenAI-compatible
//!   implementation ([`OpenAiBackend`])
//! - **Extraction**: pulling a JSON object out of fenced or bare replies
//!   ([`extract_json`])
//! - **Capabilities**: [`Storyteller`], one async method per story operation
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use storyteller_common::Complexity;
//! use storyteller_llm::{OpenAiBackend, OpenAiSettings, Storyteller};
//!
//! # async fn run() -> storyteller_llm::Result<()> {
//! let backend = OpenAiBackend::new(OpenAiSettings {
//!     api_key: "sk-...".into(),
//!     ..OpenAiSettings::default()
//! })?;
//! let storyteller = Storyteller::new(Arc::new(backend));
//!
//! let character = serde_json::json!({"fullname": "Johnny the cat"});
//! let premises = storyteller
//!     .generate_premise(&character, &Complexity::Level(1), 3)
//!     .await?;
//! println!("{}", serde_json::Value::Object(premises));
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod error;
pub mod extract;
pub mod knobs;
pub mod message;
pub mod openai;
pub mod prompt;
pub mod storyteller;
pub mod templates;

pub use backend::{AudioInput, ModelBackend, SpeechStream};
pub use error::{LlmError, Result};
pub use extract::{extract_json, ExtractError, JsonObject};
pub use message::{ChatMessage, ChatRequest, ContentPart, ModelTier, Role};
pub use openai::{ModelNames, OpenAiBackend, OpenAiSettings};
pub use prompt::{PromptTemplate, PromptVars};
pub use storyteller::{ImprovInput, Storyteller};
