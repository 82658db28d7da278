// Session events for host notification
// Defines event payloads and emission trait for testability

use serde::Serialize;

use crate::coach::GeneratedPhrase;
use crate::progression::{LevelUpEvent, UserProgress};
use crate::recording::OrbState;

/// Event names as constants for consistency
pub mod event_names {
    pub const ORB_STATE_CHANGED: &str = "orb_state_changed";
    pub const PHRASE_READY: &str = "phrase_ready";
    pub const PROGRESS_UPDATED: &str = "progress_updated";
    pub const LEVEL_UP: &str = "level_up";
    pub const SESSION_ERROR: &str = "session_error";
}

/// Payload for orb_state_changed event
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrbStateChangedPayload {
    pub state: OrbState,
    /// ISO 8601 timestamp of the transition
    pub timestamp: String,
}

/// Payload for phrase_ready event
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PhraseReadyPayload {
    pub phrase: GeneratedPhrase,
}

/// Payload for progress_updated event
///
/// A summary rather than the whole record: history is unbounded and any
/// interested view reloads it from storage.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdatedPayload {
    pub xp: u64,
    pub level: u32,
    pub total_attempts: u32,
    pub average_score: u32,
    pub best_score: u32,
    pub streak_days: u32,
}

impl From<&UserProgress> for ProgressUpdatedPayload {
    fn from(progress: &UserProgress) -> Self {
        Self {
            xp: progress.xp,
            level: progress.level,
            total_attempts: progress.total_attempts,
            average_score: progress.average_score,
            best_score: progress.best_score,
            streak_days: progress.streak_days,
        }
    }
}

/// Payload for session_error event
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionErrorPayload {
    /// Stable key the host resolves against its localization tables
    pub message_key: String,
    /// Untranslated detail, for logs and diagnostics
    pub detail: String,
}

/// Trait for emitting session events
/// Allows mocking in tests while a real host bridges to its UI layer
pub trait SessionEventEmitter: Send + Sync {
    /// Emit orb_state_changed event
    fn emit_orb_state_changed(&self, payload: OrbStateChangedPayload);

    /// Emit phrase_ready event
    fn emit_phrase_ready(&self, payload: PhraseReadyPayload);

    /// Emit progress_updated event
    fn emit_progress_updated(&self, payload: ProgressUpdatedPayload);

    /// Emit level_up event. The payload carries tiers only when the tier
    /// actually changed.
    fn emit_level_up(&self, payload: LevelUpEvent);

    /// Emit session_error event
    fn emit_session_error(&self, payload: SessionErrorPayload);
}

/// Get the current timestamp in ISO 8601 format
pub fn current_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

#[cfg(test)]
#[path = "events_test.rs"]
pub(crate) mod tests;
