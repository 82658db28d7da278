// Practice session controller
// Orchestrates microphone capture, live transcription, silence detection,
// the scoring round-trip and progression while driving the orb state
// machine. All collaborator failures are converted here; the rendering
// layer only ever sees SessionError categories and their message keys.

use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use std::time::Duration;

use crate::audio::{AudioOutput, AudioRecorder, Microphone, MicrophoneHandle};
use crate::audio_constants::TRANSCRIPT_SETTLE_DELAY_MS;
use crate::capability::Capability;
use crate::coach::{
    CoachError, ConversationContext, GeneratedPhrase, PhraseGenerator, PhraseRequest,
    PronunciationScorer, ScoringRequest, ScoringResult, SpeechSynthesizer, SynthesisError,
};
use crate::events::{
    current_timestamp, OrbStateChangedPayload, PhraseReadyPayload, ProgressUpdatedPayload,
    SessionErrorPayload, SessionEventEmitter,
};
use crate::progression::{record_attempt, AttemptRecord};
use crate::recording::{OrbState, SessionState, SilenceConfig, SilenceDetector};
use crate::settings::{AppSettings, Language};
use crate::speech::{SpeechError, SpeechToTextSource};
use crate::storage::AppStorage;
use crate::water::WaterState;

/// Errors surfaced by the session, already classified per the error
/// taxonomy: every variant is recoverable and maps to a message key the
/// host resolves against its localization tables.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    /// No phrase is loaded yet
    #[error("no phrase is loaded")]
    PhraseNotReady,
    /// The requested action conflicts with the current orb state
    #[error("another recording or scoring pass is in flight")]
    Busy,
    /// Speech recognition is absent on this platform
    #[error("speech recognition is not supported on this platform")]
    RecognitionUnsupported,
    /// The recognition backend reported a terminal error
    #[error("speech recognition failed: {reason}")]
    Recognition { reason: String },
    /// The transcript was empty or whitespace-only
    #[error("no speech was detected")]
    EmptyTranscript,
    /// The coaching service rejected the configured credential
    #[error("the configured API credential was rejected")]
    InvalidCredential,
    /// Phrase generation failed
    #[error("phrase generation failed")]
    GenerationFailed,
    /// The scoring round-trip failed
    #[error("pronunciation scoring failed")]
    ScoringFailed,
    /// Neither synthesized nor on-device playback was possible
    #[error("audio playback failed")]
    PlaybackFailed,
}

impl SessionError {
    /// Stable key the rendering host resolves to localized text.
    pub fn message_key(&self) -> &'static str {
        match self {
            SessionError::PhraseNotReady | SessionError::Busy => "practice.notReady",
            SessionError::RecognitionUnsupported => "practice.speechRequired",
            SessionError::Recognition { .. } => "practice.speechError",
            SessionError::EmptyTranscript => "practice.noSpeech",
            SessionError::InvalidCredential => "practice.invalidApiKey",
            SessionError::GenerationFailed => "practice.failedGenerate",
            SessionError::ScoringFailed => "practice.failedFeedback",
            SessionError::PlaybackFailed => "practice.couldNotPlay",
        }
    }
}

impl From<SpeechError> for SessionError {
    fn from(err: SpeechError) -> Self {
        match err {
            SpeechError::Unsupported => SessionError::RecognitionUnsupported,
            SpeechError::Recognition { reason } => SessionError::Recognition { reason },
        }
    }
}

/// Timing knobs for the session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Delay between the stop routine and the final transcript read,
    /// letting asynchronous transcript delivery catch up (milliseconds).
    pub settle_delay_ms: u64,
    pub silence: SilenceConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: TRANSCRIPT_SETTLE_DELAY_MS,
            silence: SilenceConfig::default(),
        }
    }
}

/// Collaborators the session orchestrates. All are trait objects so hosts
/// and tests swap implementations freely.
pub struct SessionDeps {
    pub generator: Arc<dyn PhraseGenerator>,
    pub scorer: Arc<dyn PronunciationScorer>,
    pub synthesizer: Arc<dyn SpeechSynthesizer>,
    pub audio_output: Arc<dyn AudioOutput>,
    pub speech: Arc<dyn SpeechToTextSource>,
    pub microphone: Arc<dyn Microphone>,
    pub recorder: Arc<dyn AudioRecorder>,
    pub storage: AppStorage,
    pub water: Arc<WaterState>,
}

/// Resources owned by one pass through the listening state. Both fields
/// are absent when the microphone could not be acquired: recording still
/// proceeds, with visualization and auto-stop degraded.
struct ActiveCapture {
    microphone: Option<Box<dyn MicrophoneHandle>>,
    detector: Option<Arc<SilenceDetector>>,
}

/// Controller for one practice session.
///
/// At most one recording pass is active at a time: the orb state machine
/// gates every entry point, and every exit from Listening runs the same
/// stop routine, releasing the microphone and audio graph before anything
/// downstream reads the transcript.
pub struct PracticeSession<E: SessionEventEmitter + 'static> {
    emitter: Arc<E>,
    deps: SessionDeps,
    config: SessionConfig,
    state: Mutex<SessionState>,
    capture: Mutex<Option<ActiveCapture>>,
    current_phrase: Mutex<Option<GeneratedPhrase>>,
    last_result: Mutex<Option<ScoringResult>>,
    last_transcript: Mutex<String>,
    /// Finalized playback take from the most recent recording; replaced
    /// when superseded
    last_take: Mutex<Option<Vec<u8>>>,
    conversation: Mutex<ConversationContext>,
    /// Handed to the silence detector so its completion callback can reach
    /// back into the session without keeping it alive
    weak_self: Weak<Self>,
}

impl<E: SessionEventEmitter + 'static> PracticeSession<E> {
    pub fn new(emitter: Arc<E>, deps: SessionDeps) -> Arc<Self> {
        Self::with_config(emitter, deps, SessionConfig::default())
    }

    pub fn with_config(emitter: Arc<E>, deps: SessionDeps, config: SessionConfig) -> Arc<Self> {
        let topic = deps.storage.settings().unwrap_or_default().topic;
        Arc::new_cyclic(|weak_self| Self {
            emitter,
            deps,
            config,
            state: Mutex::new(SessionState::new()),
            capture: Mutex::new(None),
            current_phrase: Mutex::new(None),
            last_result: Mutex::new(None),
            last_transcript: Mutex::new(String::new()),
            last_take: Mutex::new(None),
            conversation: Mutex::new(ConversationContext::new(topic)),
            weak_self: weak_self.clone(),
        })
    }

    // -------------------------------------------------------------------------
    // Introspection
    // -------------------------------------------------------------------------

    pub fn orb_state(&self) -> OrbState {
        self.state.lock().get()
    }

    pub fn current_phrase(&self) -> Option<GeneratedPhrase> {
        self.current_phrase.lock().clone()
    }

    pub fn last_result(&self) -> Option<ScoringResult> {
        self.last_result.lock().clone()
    }

    pub fn last_transcript(&self) -> String {
        self.last_transcript.lock().clone()
    }

    /// Finalized playback take from the most recent recording, if the
    /// platform recorder produced one.
    pub fn last_take(&self) -> Option<Vec<u8>> {
        self.last_take.lock().clone()
    }

    pub fn conversation_context(&self) -> ConversationContext {
        self.conversation.lock().clone()
    }

    // -------------------------------------------------------------------------
    // Phrase lifecycle
    // -------------------------------------------------------------------------

    /// Restore the persisted phrase snapshot, or generate a fresh phrase
    /// when none survives.
    pub async fn load_phrase(&self) -> Result<(), SessionError> {
        if let Some(saved) = self.deps.storage.current_phrase() {
            crate::debug!("restoring persisted phrase snapshot");
            *self.current_phrase.lock() = Some(saved.clone());
            self.emitter
                .emit_phrase_ready(PhraseReadyPayload { phrase: saved });
            return Ok(());
        }
        self.generate_phrase().await
    }

    /// Leave the score screen and fetch the next phrase.
    pub async fn continue_to_next(&self) -> Result<(), SessionError> {
        *self.last_result.lock() = None;
        *self.current_phrase.lock() = None;
        self.deps.storage.clear_current_phrase();
        self.generate_phrase().await
    }

    /// Dismiss the score and retry the same phrase.
    pub fn retry(&self) -> Result<(), SessionError> {
        self.state
            .lock()
            .transition_to(OrbState::Idle)
            .map_err(|_| SessionError::Busy)?;
        *self.last_result.lock() = None;
        self.notify_state(OrbState::Idle);
        Ok(())
    }

    /// Re-read persisted settings after an edit: recolor the water, reset
    /// the conversation context and fetch a phrase for the new
    /// language/level/topic.
    pub async fn apply_settings_change(&self) -> Result<(), SessionError> {
        let settings = self.settings();
        self.deps.water.set_colors_for_language(settings.language);
        self.conversation.lock().reset(settings.topic.clone());
        *self.last_result.lock() = None;
        *self.current_phrase.lock() = None;
        self.deps.storage.clear_current_phrase();
        self.generate_phrase().await
    }

    async fn generate_phrase(&self) -> Result<(), SessionError> {
        // Latest persisted settings win over anything cached in the UI
        let settings = self.settings();
        self.set_state(OrbState::Processing)?;

        let request = PhraseRequest {
            language: settings.language,
            level: settings.level,
            topic: settings.topic.clone(),
            conversation_context: Some(self.conversation.lock().clone()),
            api_key: settings.credential(),
        };

        match self.deps.generator.generate(&request).await {
            Ok(phrase) => {
                self.deps.storage.save_current_phrase(&phrase);
                *self.current_phrase.lock() = Some(phrase.clone());
                self.set_state(OrbState::Idle)?;
                self.emitter.emit_phrase_ready(PhraseReadyPayload { phrase });
                Ok(())
            }
            Err(CoachError::InvalidCredential) => {
                self.fail_to_idle(SessionError::InvalidCredential)
            }
            Err(err) => {
                crate::warn!("phrase generation failed: {}", err);
                self.fail_to_idle(SessionError::GenerationFailed)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Recording
    // -------------------------------------------------------------------------

    /// Start a recording pass: acquire the microphone (best effort), start
    /// live transcription and arm the silence detector.
    pub async fn start_recording(&self) -> Result<(), SessionError> {
        if self.current_phrase.lock().is_none() {
            return Err(SessionError::PhraseNotReady);
        }
        if self.deps.speech.capability() == Capability::Unsupported {
            return self.surface(SessionError::RecognitionUnsupported);
        }

        self.state
            .lock()
            .transition_to(OrbState::Listening)
            .map_err(|_| SessionError::Busy)?;
        self.notify_state(OrbState::Listening);

        *self.last_result.lock() = None;
        self.last_transcript.lock().clear();

        // Microphone acquisition fails soft: without it the visualization
        // and silence auto-stop degrade, recording still proceeds.
        let capture = match self.deps.microphone.open() {
            Ok(handle) => {
                let analyser = handle.analyser();
                self.deps.water.set_analyser(Some(analyser.clone()));

                let weak = self.weak_self.clone();
                let detector = SilenceDetector::with_config(
                    analyser,
                    move || {
                        if let Some(session) = weak.upgrade() {
                            tokio::spawn(async move {
                                let _ = session.stop_and_score().await;
                            });
                        }
                    },
                    self.config.silence.clone(),
                );
                detector.start();

                ActiveCapture {
                    microphone: Some(handle),
                    detector: Some(detector),
                }
            }
            Err(err) => {
                crate::warn!("microphone unavailable, continuing degraded: {}", err);
                ActiveCapture {
                    microphone: None,
                    detector: None,
                }
            }
        };
        *self.capture.lock() = Some(capture);

        if self.deps.recorder.capability().is_available() {
            self.deps.recorder.start();
        }

        let language = self.settings().language;
        if let Err(err) = self.deps.speech.start(language) {
            // Recognition never came up: unwind the whole pass
            self.release_capture();
            self.state.lock().reset_to_idle();
            self.notify_state(OrbState::Idle);
            return self.surface(err.into());
        }

        Ok(())
    }

    /// Stop the recording pass and run the scoring round-trip.
    ///
    /// Convergence point for the user's stop action and the silence
    /// detector: the state gate makes whichever trigger arrives second a
    /// no-op, so this is safe to call from both paths concurrently.
    pub async fn stop_and_score(&self) -> Result<(), SessionError> {
        if !self.state.lock().begin_stop() {
            return Ok(());
        }
        self.notify_state(OrbState::Processing);

        // Stop routine: every capture resource is stopped and released
        // before the transcript read, so no residual audio callback can
        // touch shared state after the session has left Listening.
        self.deps.speech.stop();
        if let Some(take) = self.deps.recorder.stop() {
            *self.last_take.lock() = Some(take);
        }
        self.release_capture();

        tokio::time::sleep(Duration::from_millis(self.config.settle_delay_ms)).await;

        if let Some(err) = self.deps.speech.take_error() {
            return self.fail_to_idle(err.into());
        }

        let transcript = self.deps.speech.transcript();
        *self.last_transcript.lock() = transcript.clone();
        if transcript.trim().is_empty() {
            return self.fail_to_idle(SessionError::EmptyTranscript);
        }

        let Some(phrase) = self.current_phrase.lock().clone() else {
            return self.fail_to_idle(SessionError::PhraseNotReady);
        };

        let settings = self.settings();
        let request = ScoringRequest {
            target_phrase: phrase.phrase.clone(),
            user_transcription: transcript.clone(),
            language: settings.language,
            level: settings.level,
            api_key: settings.credential(),
        };

        let result = match self.deps.scorer.score(&request).await {
            Ok(result) => result,
            Err(CoachError::InvalidCredential) => {
                return self.fail_to_idle(SessionError::InvalidCredential)
            }
            Err(err) => {
                crate::warn!("scoring failed: {}", err);
                return self.fail_to_idle(SessionError::ScoringFailed);
            }
        };

        self.record_scored_attempt(&settings, &phrase, transcript, &result);
        *self.last_result.lock() = Some(result);

        if let Err(err) = self.state.lock().transition_to(OrbState::Score) {
            // Unreachable through the public API: the gate above owns the
            // Processing state until this point
            crate::error!("score transition rejected: {}", err);
        }
        self.notify_state(OrbState::Score);
        Ok(())
    }

    /// Fold a scored attempt into progress, persist it and notify.
    fn record_scored_attempt(
        &self,
        settings: &AppSettings,
        phrase: &GeneratedPhrase,
        transcript: String,
        result: &ScoringResult,
    ) {
        let mut progress = self.deps.storage.progress();
        let attempt = AttemptRecord::new(
            settings.language,
            settings.level,
            phrase.phrase.clone(),
            transcript,
            result.score,
            chrono::Utc::now().timestamp_millis(),
        );
        let level_up = record_attempt(&mut progress, attempt);
        self.deps.storage.save_progress(&progress);

        self.emitter
            .emit_progress_updated(ProgressUpdatedPayload::from(&progress));

        if let Some(event) = level_up {
            if let Some(tier) = event.new_tier {
                // Crossing a tier raises the practice difficulty going
                // forward
                let mut updated = settings.clone();
                updated.level = tier;
                self.deps.storage.save_settings(&updated);
            }
            self.emitter.emit_level_up(event);
        }

        self.conversation.lock().note_attempt(&phrase.phrase, result);
    }

    // -------------------------------------------------------------------------
    // Playback
    // -------------------------------------------------------------------------

    /// Play the current phrase: synthesized audio when the service is
    /// configured, the on-device synthesizer otherwise.
    pub async fn play_phrase(&self) -> Result<(), SessionError> {
        let Some(phrase) = self.current_phrase.lock().clone() else {
            return Err(SessionError::PhraseNotReady);
        };
        if matches!(self.orb_state(), OrbState::Listening | OrbState::Processing) {
            return Err(SessionError::Busy);
        }

        let language = self.settings().language;
        let pulse = self.deps.water.clone().begin_playback_pulse();

        let outcome = match self
            .deps
            .synthesizer
            .synthesize(&phrase.phrase, language)
            .await
        {
            Ok(audio) => match self.deps.audio_output.play(&audio).await {
                Ok(()) => Ok(()),
                Err(err) => {
                    crate::debug!("synthesized playback failed, falling back: {}", err);
                    self.speak_fallback(&phrase.phrase, language).await
                }
            },
            Err(SynthesisError::NotConfigured) => {
                self.speak_fallback(&phrase.phrase, language).await
            }
            Err(err) => {
                crate::debug!("synthesis failed, falling back: {}", err);
                self.speak_fallback(&phrase.phrase, language).await
            }
        };
        drop(pulse);

        match outcome {
            Ok(()) => Ok(()),
            Err(()) => self.surface(SessionError::PlaybackFailed),
        }
    }

    async fn speak_fallback(&self, text: &str, language: Language) -> Result<(), ()> {
        if self.deps.audio_output.speech_capability() == Capability::Unsupported {
            return Err(());
        }
        self.deps
            .audio_output
            .speak(text, language)
            .await
            .map_err(|err| {
                crate::warn!("on-device synthesis failed: {}", err);
            })
    }

    // -------------------------------------------------------------------------
    // Session teardown
    // -------------------------------------------------------------------------

    /// Whether the outer shell may tear the session down. Blocked while
    /// capture or scoring is in flight to avoid orphaning resources.
    pub fn can_end_session(&self) -> bool {
        matches!(self.orb_state(), OrbState::Idle | OrbState::Score)
    }

    /// End the practice session, resetting shared visualization state.
    pub fn end_session(&self) -> Result<(), SessionError> {
        if !self.can_end_session() {
            return Err(SessionError::Busy);
        }
        *self.last_take.lock() = None;
        self.deps.water.reset();
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn settings(&self) -> AppSettings {
        self.deps.storage.settings().unwrap_or_default()
    }

    /// Stop the detector, close the microphone and detach the analyser
    /// from the visualization. Runs unconditionally on every exit from
    /// Listening, including error paths.
    fn release_capture(&self) {
        if let Some(mut capture) = self.capture.lock().take() {
            if let Some(detector) = capture.detector.take() {
                detector.stop();
            }
            if let Some(mut microphone) = capture.microphone.take() {
                microphone.close();
            }
        }
        self.deps.water.set_analyser(None);
    }

    fn set_state(&self, to: OrbState) -> Result<(), SessionError> {
        self.state
            .lock()
            .transition_to(to)
            .map_err(|_| SessionError::Busy)?;
        self.notify_state(to);
        Ok(())
    }

    fn notify_state(&self, state: OrbState) {
        self.deps.water.apply_orb_state(state);
        self.emitter.emit_orb_state_changed(OrbStateChangedPayload {
            state,
            timestamp: current_timestamp(),
        });
    }

    /// Emit a session error and return it, without touching state.
    fn surface(&self, err: SessionError) -> Result<(), SessionError> {
        self.emitter.emit_session_error(SessionErrorPayload {
            message_key: err.message_key().to_string(),
            detail: err.to_string(),
        });
        Err(err)
    }

    /// Emit a session error, force the machine back to Idle and return the
    /// error. UserProgress is never touched on this path.
    fn fail_to_idle(&self, err: SessionError) -> Result<(), SessionError> {
        self.emitter.emit_session_error(SessionErrorPayload {
            message_key: err.message_key().to_string(),
            detail: err.to_string(),
        });
        self.state.lock().reset_to_idle();
        self.notify_state(OrbState::Idle);
        Err(err)
    }
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;
