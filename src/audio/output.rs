// Audio output: synthesized-take playback and on-device utterance fallback

use crate::capability::Capability;
use crate::settings::Language;
use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlaybackError {
    #[error("audio playback failed: {0}")]
    Failed(String),
    /// On-device utterance synthesis is absent on this platform.
    #[error("on-device speech synthesis unavailable")]
    SpeechUnavailable,
}

/// Plays audio for the session.
///
/// `play` and `speak` resolve when playback has finished, so the session
/// can sequence visualization state around them.
#[async_trait]
pub trait AudioOutput: Send + Sync {
    /// Play an encoded audio take to completion.
    async fn play(&self, audio: &[u8]) -> Result<(), PlaybackError>;

    /// Whether on-device utterance synthesis exists. Resolved once at
    /// startup.
    fn speech_capability(&self) -> Capability;

    /// Speak `text` with the on-device synthesizer, to completion. Used
    /// when the remote synthesis service is not configured or fails.
    async fn speak(&self, text: &str, language: Language) -> Result<(), PlaybackError>;
}
