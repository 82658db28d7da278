// Practice settings: language, difficulty tier and generation topic

use serde::{Deserialize, Serialize};

/// Practice language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Pt,
    Es,
}

impl Language {
    /// Human-readable name used when talking to the coaching service.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Pt => "Portuguese (Brazilian)",
            Language::Es => "Spanish",
        }
    }

    /// BCP-47 tag handed to speech recognition and synthesis backends.
    pub fn recognition_tag(&self) -> &'static str {
        match self {
            Language::En => "en-US",
            Language::Pt => "pt-BR",
            Language::Es => "es-ES",
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::En
    }
}

/// Difficulty tier, derived from the practice level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Beginner,
    Intermediate,
    Advanced,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Beginner => "beginner",
            Tier::Intermediate => "intermediate",
            Tier::Advanced => "advanced",
        }
    }
}

impl Default for Tier {
    fn default() -> Self {
        Tier::Beginner
    }
}

/// User-editable application settings.
///
/// Persisted as-is; the session re-reads the stored copy before every
/// generation or scoring request so concurrent edits are honored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    pub language: Language,
    pub level: Tier,
    pub topic: String,
    #[serde(default)]
    pub api_key: String,
}

impl AppSettings {
    /// Credential to attach to collaborator requests, if one is configured.
    pub fn credential(&self) -> Option<String> {
        if self.api_key.trim().is_empty() {
            None
        } else {
            Some(self.api_key.clone())
        }
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            language: Language::default(),
            level: Tier::default(),
            topic: "daily conversation".to_string(),
            api_key: String::new(),
        }
    }
}
