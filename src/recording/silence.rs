// Silence detection for automatic recording stop
// Watches analyser energy and fires a one-shot callback when sustained
// silence follows sustained speech

use crate::audio::{average_energy, SpectrumSource};
use crate::audio_constants::{
    MIN_SPEECH_DURATION_MS, SILENCE_DURATION_MS, SILENCE_POLL_INTERVAL_MS, SILENCE_THRESHOLD,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Configuration for silence detection
#[derive(Debug, Clone)]
pub struct SilenceConfig {
    /// Byte-average energy below which a poll counts as silent (0-255, default: 20)
    pub silence_threshold: u8,
    /// Duration of continuous silence before completing in milliseconds (default: 2000)
    pub silence_duration_ms: u64,
    /// Minimum speech before silence detection arms itself in milliseconds (default: 500)
    pub min_speech_duration_ms: u64,
    /// Polling interval in milliseconds (default: 100)
    pub poll_interval_ms: u64,
}

impl Default for SilenceConfig {
    fn default() -> Self {
        Self {
            silence_threshold: SILENCE_THRESHOLD,
            silence_duration_ms: SILENCE_DURATION_MS,
            min_speech_duration_ms: MIN_SPEECH_DURATION_MS,
            poll_interval_ms: SILENCE_POLL_INTERVAL_MS,
        }
    }
}

/// Per-poll decision state for end-of-speech detection.
///
/// Two-phase gate: speech must accumulate past the minimum before silence
/// starts counting, so ambient noise before the user talks cannot trigger
/// completion and brief inter-word pauses do not end the session. Time
/// flows in from the caller, keeping the algorithm synchronous and
/// deterministic.
#[derive(Debug, Default)]
pub struct SilenceTracker {
    /// When the first above-threshold sample was observed; None until then
    speech_start_ms: Option<u64>,
    /// When the current silence run started; cleared whenever speech resumes
    silence_start_ms: Option<u64>,
}

impl SilenceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset for a new recording session.
    pub fn reset(&mut self) {
        self.speech_start_ms = None;
        self.silence_start_ms = None;
    }

    /// Whether any above-threshold sample has been observed.
    pub fn has_detected_speech(&self) -> bool {
        self.speech_start_ms.is_some()
    }

    /// Feed one energy sample. Returns true when the silence window has
    /// elapsed and the recording should stop.
    pub fn observe(&mut self, energy: f32, now_ms: u64, config: &SilenceConfig) -> bool {
        if energy >= config.silence_threshold as f32 {
            if self.speech_start_ms.is_none() {
                self.speech_start_ms = Some(now_ms);
            }
            // Speech refills the window; no partial credit accumulates
            self.silence_start_ms = None;
            return false;
        }

        let speech_ms = self
            .speech_start_ms
            .map(|start| now_ms.saturating_sub(start))
            .unwrap_or(0);
        if speech_ms < config.min_speech_duration_ms {
            return false;
        }

        match self.silence_start_ms {
            None => {
                self.silence_start_ms = Some(now_ms);
                false
            }
            Some(start) => now_ms.saturating_sub(start) >= config.silence_duration_ms,
        }
    }
}

/// Silence detector for automatic recording stop.
///
/// Polls a spectrum source on a fixed interval and invokes the completion
/// callback at most once per detector lifetime. `stop` is idempotent and
/// safe to call before `start` or after the detector has already fired.
pub struct SilenceDetector {
    config: SilenceConfig,
    source: Arc<dyn SpectrumSource>,
    /// Taken exactly once; at-most-once firing falls out of the take
    on_silence: Mutex<Option<Box<dyn FnOnce() + Send>>>,
    stopped: AtomicBool,
    poller: Mutex<Option<JoinHandle<()>>>,
    weak_self: Weak<Self>,
}

impl SilenceDetector {
    /// Create a detector with default configuration.
    pub fn new(
        source: Arc<dyn SpectrumSource>,
        on_silence: impl FnOnce() + Send + 'static,
    ) -> Arc<Self> {
        Self::with_config(source, on_silence, SilenceConfig::default())
    }

    /// Create a detector with custom configuration.
    pub fn with_config(
        source: Arc<dyn SpectrumSource>,
        on_silence: impl FnOnce() + Send + 'static,
        config: SilenceConfig,
    ) -> Arc<Self> {
        Arc::new_cyclic(|weak_self| Self {
            config,
            source,
            on_silence: Mutex::new(Some(Box::new(on_silence))),
            stopped: AtomicBool::new(false),
            poller: Mutex::new(None),
            weak_self: weak_self.clone(),
        })
    }

    pub fn config(&self) -> &SilenceConfig {
        &self.config
    }

    /// Reset timestamps and begin polling. Requires a Tokio runtime.
    pub fn start(&self) {
        self.stopped.store(false, Ordering::SeqCst);

        let mut poller = self.poller.lock();
        if let Some(old) = poller.take() {
            old.abort();
        }

        let Some(detector) = self.weak_self.upgrade() else {
            return;
        };
        *poller = Some(tokio::spawn(async move {
            let mut tracker = SilenceTracker::new();
            let started = tokio::time::Instant::now();
            let period = Duration::from_millis(detector.config.poll_interval_ms);

            loop {
                tokio::time::sleep(period).await;
                if detector.stopped.load(Ordering::SeqCst) {
                    break;
                }
                // A stale source (capture gone) produces no frames; the
                // detector simply stops deciding and the session-level stop
                // paths remain responsible for cleanup.
                let Some(frame) = detector.source.frequency_data() else {
                    continue;
                };
                let now_ms = started.elapsed().as_millis() as u64;
                if tracker.observe(average_energy(&frame), now_ms, &detector.config) {
                    crate::debug!("[silence] window elapsed after {}ms, completing", now_ms);
                    detector.complete();
                    break;
                }
            }
        }));
    }

    /// Cancel polling. Idempotent; never invokes the callback.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
        if let Some(handle) = self.poller.lock().take() {
            handle.abort();
        }
    }

    fn complete(&self) {
        // The swap makes completion and stop mutually exclusive: whichever
        // side flips the flag first wins, so a detector stopped by the user
        // never fires and a fired detector ignores later stops.
        if !self.stopped.swap(true, Ordering::SeqCst) {
            let callback = self.on_silence.lock().take();
            if let Some(callback) = callback {
                callback();
            }
        }
    }
}

#[cfg(test)]
#[path = "silence_test.rs"]
mod tests;
