// Speech-to-text source contract and the shared live transcript buffer

mod transcript;

pub use transcript::TranscriptBuffer;

use crate::capability::Capability;
use crate::settings::Language;

/// Errors from the recognition backend.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpeechError {
    /// Recognition is absent on this platform.
    #[error("speech recognition is not supported on this platform")]
    Unsupported,
    /// Terminal recognition failure, with the platform's reason code.
    #[error("speech recognition error: {reason}")]
    Recognition { reason: String },
}

/// Continuous transcript producer with start/stop semantics.
///
/// Implementations keep `transcript()` current for the session's duration;
/// the session reads it once, after the stop routine and settle delay.
pub trait SpeechToTextSource: Send + Sync {
    /// Whether recognition exists at all. Resolved once at startup.
    fn capability(&self) -> Capability;

    /// Begin recognizing in `language`. Clears any previous transcript.
    fn start(&self, language: Language) -> Result<(), SpeechError>;

    /// Stop recognizing. Idempotent; the transcript stays readable.
    fn stop(&self);

    /// Latest transcript text.
    fn transcript(&self) -> String;

    /// Terminal error reported since `start`, if any. Clears on read.
    fn take_error(&self) -> Option<SpeechError>;
}
