// External coaching collaborators: phrase generation, pronunciation
// scoring and speech synthesis. Transport implementations live in the
// host; this module owns the contracts.

mod parse;
mod prompts;
mod types;

pub use parse::parse_scoring_response;
pub use prompts::{
    phrase_user_prompt, scoring_user_prompt, PHRASE_GENERATION_SYSTEM_PROMPT,
    PRONUNCIATION_SYSTEM_PROMPT,
};
pub use types::{
    ConversationContext, GeneratedPhrase, PhraseRequest, ScoringRequest, ScoringResult,
    WordAnalysis,
};

use crate::settings::Language;
use async_trait::async_trait;

/// Errors from the text-generation collaborators.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoachError {
    /// The service rejected the configured credential.
    #[error("invalid API credential")]
    InvalidCredential,
    /// Transport failure or non-success status.
    #[error("request failed: {0}")]
    Request(String),
    /// The service replied but the payload could not be understood.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Produces the next practice phrase for the configured language, level
/// and topic, steered by the conversation context.
#[async_trait]
pub trait PhraseGenerator: Send + Sync {
    async fn generate(&self, request: &PhraseRequest) -> Result<GeneratedPhrase, CoachError>;
}

/// Scores a pronunciation attempt by comparing the target phrase with the
/// transcription of what the user actually said.
#[async_trait]
pub trait PronunciationScorer: Send + Sync {
    async fn score(&self, request: &ScoringRequest) -> Result<ScoringResult, CoachError>;
}

/// Errors from the speech-synthesis collaborator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SynthesisError {
    /// The synthesis service has no credential configured. Callers fall
    /// back to on-device synthesis.
    #[error("speech synthesis is not configured")]
    NotConfigured,
    #[error("speech synthesis failed: {0}")]
    Failed(String),
}

/// Turns text into an encoded audio payload.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str, language: Language) -> Result<Vec<u8>, SynthesisError>;
}
