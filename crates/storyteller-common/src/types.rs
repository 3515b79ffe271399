//! Core type definitions for story requests.
//!
//! This module defines the small vocabulary shared by the HTTP layer and the
//! generation layer: reading complexity, supported story languages, and the
//! client platform that decides the speech audio format.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reading-level prompts, indexed by complexity level.
const COMPLEXITY_PROMPTS: [&str; 4] = [
    "Kindergarten to 2nd grade level of language and concepts. No complex words or ideas. Short sentences and paragraphs.",
    "3rd grade to 6th grade level of language and concepts. No complex words or ideas. Short sentences and paragraphs.",
    "7th grade to 12th grade level of language and concepts. Some complex words and ideas. Long sentences and paragraphs.",
    "Professional level of language and concepts. Many complex words and ideas. Long sentences and paragraphs.",
];

/// Story complexity as sent by the client.
///
/// Clients send either a numeric level (0 = easy .. 3 = expert) or the
/// instruction text itself. Levels above 3 clamp to expert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Complexity {
    /// One of the predefined reading levels.
    Level(u8),
    /// Free-form instruction text.
    Prompt(String),
}

impl Complexity {
    /// Get the instruction text to embed in a prompt.
    pub fn prompt(&self) -> &str {
        match self {
            Self::Level(level) => {
                let idx = usize::from(*level).min(COMPLEXITY_PROMPTS.len() - 1);
                COMPLEXITY_PROMPTS[idx]
            }
            Self::Prompt(text) => text,
        }
    }

    /// Human-readable label for a predefined level.
    pub fn label(&self) -> &str {
        match self {
            Self::Level(0) => "Easy",
            Self::Level(1) => "Medium",
            Self::Level(2) => "Hard",
            Self::Level(_) => "Expert",
            Self::Prompt(_) => "Custom",
        }
    }
}

impl Default for Complexity {
    fn default() -> Self {
        Self::Level(1)
    }
}

/// Story language for hints and improvisation prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English (`en`), the fallback for anything unsupported.
    #[default]
    English,
    /// Italian (`it`).
    Italian,
}

impl Language {
    /// Resolve a language code, falling back to English.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_lowercase().as_str() {
            "it" | "it-it" | "italian" => Self::Italian,
            _ => Self::English,
        }
    }

    /// ISO 639-1 code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Italian => "it",
        }
    }

    /// English name of the language, as used inside prompts.
    pub fn name(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Italian => "Italian",
        }
    }

    /// Localised keys for the who / where / what improv hints.
    pub fn hint_keys(&self) -> HintKeys {
        match self {
            Self::English => HintKeys {
                who: "who",
                place: "where",
                what: "what",
            },
            Self::Italian => HintKeys {
                who: "chi",
                place: "dove",
                what: "cosa",
            },
        }
    }

    /// Localised keys for the four ending categories.
    pub fn ending_keys(&self) -> [&'static str; 4] {
        match self {
            Self::English => ["happy", "sad", "absurd", "catastrophic"],
            Self::Italian => ["felice", "triste", "assurdo", "catastrofico"],
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Localised improv hint keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HintKeys {
    /// Key naming the protagonist.
    pub who: &'static str,
    /// Key naming the location.
    pub place: &'static str,
    /// Key naming the starting event.
    pub what: &'static str,
}

/// Display name for a translation language code.
///
/// Known codes render as their English name; anything else passes through.
pub fn language_display_name(code: &str) -> String {
    match code.trim().to_lowercase().as_str() {
        "en" => "English".to_string(),
        "it" => "Italian".to_string(),
        "" => "English".to_string(),
        _ => code.trim().to_string(),
    }
}

/// Client platform, which decides the speech audio encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// iOS Safari, which cannot play Opus in the media source.
    Ios,
    /// Everything else.
    #[default]
    Other,
}

impl Platform {
    /// Resolve a client-supplied OS hint.
    pub fn from_hint(hint: Option<&str>) -> Self {
        match hint.map(|h| h.trim().to_lowercase()) {
            Some(h) if h == "ios" => Self::Ios,
            _ => Self::Other,
        }
    }

    /// Audio format requested from the speech model.
    pub fn audio_format(&self) -> &'static str {
        match self {
            Self::Ios => "mp3",
            Self::Other => "opus",
        }
    }

    /// MIME type of the relayed audio.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Ios => "audio/mpeg",
            Self::Other => "audio/ogg",
        }
    }
}
