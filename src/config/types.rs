use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use storyteller_common::paths::image_extensions;
use storyteller_llm::{ModelNames, OpenAiSettings};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub openai: OpenAiConfig,

    #[serde(default)]
    pub uploads: UploadsConfig,

    #[serde(default)]
    pub story: StoryConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Built frontend to serve alongside the API
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OpenAiConfig {
    /// API key (overridden by `OPENAI_API_KEY`)
    #[serde(default)]
    pub api_key: String,

    /// Organization id (overridden by `OPENAI_ORG`)
    #[serde(default)]
    pub organization: Option<String>,

    /// API root (overridden by `OPENAI_BASE_URL`)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Completion token cap for every chat request
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default)]
    pub models: ModelsConfig,

    #[serde(default = "default_image_size")]
    pub image_size: String,

    #[serde(default = "default_voice")]
    pub voice: String,
}

fn default_base_url() -> String {
    storyteller_llm::openai::DEFAULT_BASE_URL.to_string()
}
fn default_timeout() -> u64 {
    120
}
fn default_max_tokens() -> u32 {
    1024
}
fn default_image_size() -> String {
    "512x512".to_string()
}
fn default_voice() -> String {
    "echo".to_string()
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            organization: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            max_tokens: default_max_tokens(),
            models: ModelsConfig::default(),
            image_size: default_image_size(),
            voice: default_voice(),
        }
    }
}

impl OpenAiConfig {
    /// Backend settings for this configuration.
    pub fn settings(&self) -> OpenAiSettings {
        OpenAiSettings {
            api_key: self.api_key.clone(),
            organization: self.organization.clone(),
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            max_tokens: self.max_tokens,
            models: ModelNames {
                chat: self.models.chat.clone(),
                fast_chat: self.models.fast_chat.clone(),
                vision: self.models.vision.clone(),
                image: self.models.image.clone(),
                tts: self.models.tts.clone(),
                stt: self.models.stt.clone(),
            },
            image_size: self.image_size.clone(),
            voice: self.voice.clone(),
        }
    }
}

/// Model name per tier.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ModelsConfig {
    pub chat: String,
    pub fast_chat: String,
    pub vision: String,
    pub image: String,
    pub tts: String,
    pub stt: String,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        let names = ModelNames::default();
        Self {
            chat: names.chat,
            fast_chat: names.fast_chat,
            vision: names.vision,
            image: names.image,
            tts: names.tts,
            stt: names.stt,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UploadsConfig {
    #[serde(default = "default_upload_dir")]
    pub dir: PathBuf,

    /// Accepted image extensions, case-insensitive
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("uploads")
}
fn default_allowed_extensions() -> Vec<String> {
    image_extensions().iter().map(|e| e.to_string()).collect()
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            dir: default_upload_dir(),
            allowed_extensions: default_allowed_extensions(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoryConfig {
    /// Premises offered per character
    #[serde(default = "default_premise_count")]
    pub premise_count: u32,

    /// Action pairs offered per turn (twice this many actions are generated)
    #[serde(default = "default_pair_count")]
    pub action_count: u32,

    /// Hint sets per improv hint request
    #[serde(default = "default_pair_count")]
    pub hint_count: u32,

    /// Character limit for practice story openings
    #[serde(default = "default_story_to_end_limit")]
    pub story_to_end_limit: u32,

    /// Complexity level used when a request carries none (0..=3)
    #[serde(default = "default_complexity")]
    pub default_complexity: u8,
}

fn default_premise_count() -> u32 {
    3
}
fn default_pair_count() -> u32 {
    2
}
fn default_story_to_end_limit() -> u32 {
    500
}
fn default_complexity() -> u8 {
    1
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            premise_count: default_premise_count(),
            action_count: default_pair_count(),
            hint_count: default_pair_count(),
            story_to_end_limit: default_story_to_end_limit(),
            default_complexity: default_complexity(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Also write logs to this file
    #[serde(default)]
    pub file: Option<PathBuf>,
}
