// Request/response shapes for the coaching collaborators. These mirror the
// services' JSON contracts; this crate owns no wire format of its own.

use crate::settings::{Language, Tier};
use serde::{Deserialize, Serialize};

/// A phrase to practice, as produced by the generation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPhrase {
    pub phrase: String,
    /// IPA transcription
    pub phonetic: String,
    pub tips: String,
    /// When/where the phrase is used
    pub context: String,
}

/// Per-word breakdown within a scoring response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordAnalysis {
    pub target: String,
    /// What the user said, or None when the word was missed entirely
    pub spoken: Option<String>,
    pub score: u32,
    pub issue: String,
    pub tip: String,
}

/// Full scoring response for one attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringResult {
    /// Overall score, 0-100
    pub score: u32,
    pub overall_feedback: String,
    #[serde(default)]
    pub word_analysis: Vec<WordAnalysis>,
    #[serde(default)]
    pub encouragement: String,
    #[serde(default)]
    pub focus_area: String,
}

/// Rolling context threaded through generation requests so consecutive
/// phrases avoid repetition and target the user's weak spots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationContext {
    pub topic: String,
    pub previous_phrases: Vec<String>,
    pub weak_areas: Vec<String>,
    pub last_score: Option<u32>,
}

/// Keep only the most recent phrases in the generation context.
const MAX_PREVIOUS_PHRASES: usize = 5;
/// Cap on tracked weak areas.
const MAX_WEAK_AREAS: usize = 10;
/// Word scores below this feed the weak-area list.
const WEAK_WORD_THRESHOLD: u32 = 60;

impl ConversationContext {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            previous_phrases: Vec::new(),
            weak_areas: Vec::new(),
            last_score: None,
        }
    }

    /// Fold a scored attempt into the context: remember the phrase, pull
    /// weak words out of the analysis and record the score.
    pub fn note_attempt(&mut self, phrase: &str, result: &ScoringResult) {
        self.previous_phrases.push(phrase.to_string());
        if self.previous_phrases.len() > MAX_PREVIOUS_PHRASES {
            let excess = self.previous_phrases.len() - MAX_PREVIOUS_PHRASES;
            self.previous_phrases.drain(..excess);
        }

        for word in &result.word_analysis {
            if word.score < WEAK_WORD_THRESHOLD && !self.weak_areas.contains(&word.target) {
                self.weak_areas.push(word.target.clone());
            }
        }
        if self.weak_areas.len() > MAX_WEAK_AREAS {
            let excess = self.weak_areas.len() - MAX_WEAK_AREAS;
            self.weak_areas.drain(..excess);
        }

        self.last_score = Some(result.score);
    }

    /// Start over, e.g. after the user changes language, level or topic.
    pub fn reset(&mut self, topic: impl Into<String>) {
        *self = Self::new(topic);
    }
}

/// Request to the phrase-generation collaborator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhraseRequest {
    pub language: Language,
    pub level: Tier,
    pub topic: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_context: Option<ConversationContext>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// Request to the pronunciation-scoring collaborator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringRequest {
    pub target_phrase: String,
    pub user_transcription: String,
    pub language: Language,
    pub level: Tier,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
