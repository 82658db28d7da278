// Shared visualization context for the water background.
// Owned by the application, read every frame by the renderer, written by
// the session controller; replaces ambient module globals with a context
// object that has defined reset semantics at session end.

use crate::audio::AudioAnalyser;
use crate::audio_constants::PLAYBACK_PULSE_INTERVAL_MS;
use crate::recording::OrbState;
use crate::settings::Language;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

pub type Rgb = [f32; 3];

/// Water color presets by practice language: (deep, highlight).
pub fn colors_for_language(language: Language) -> (Rgb, Rgb) {
    match language {
        // deep blue / cyan
        Language::En => ([0.039, 0.098, 0.184], [0.392, 1.0, 0.855]),
        // deep purple / warm amber
        Language::Es => ([0.098, 0.055, 0.157], [1.0, 0.647, 0.176]),
        // deep forest / emerald
        Language::Pt => ([0.039, 0.122, 0.063], [0.204, 0.867, 0.600]),
    }
}

/// Smoothing toward the target level each frame.
const LEVEL_ATTACK: f32 = 0.15;
/// Decay multiplier per frame once no audio is flowing.
const LEVEL_DECAY: f32 = 0.92;

#[derive(Debug)]
struct WaterInner {
    color_deep: Rgb,
    color_highlight: Rgb,
    wave_speed: f32,
    wave_intensity: f32,
    analyser: Option<Arc<AudioAnalyser>>,
    audio_level: f32,
    direct_level: Option<f32>,
}

impl Default for WaterInner {
    fn default() -> Self {
        let (color_deep, color_highlight) = colors_for_language(Language::En);
        Self {
            color_deep,
            color_highlight,
            wave_speed: 1.0,
            wave_intensity: 1.0,
            analyser: None,
            audio_level: 0.0,
            direct_level: None,
        }
    }
}

/// Visualization parameters shared between the session and the renderer.
pub struct WaterState {
    inner: Mutex<WaterInner>,
}

impl WaterState {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(WaterInner::default()),
        }
    }

    pub fn set_colors_for_language(&self, language: Language) {
        let (deep, highlight) = colors_for_language(language);
        let mut inner = self.inner.lock();
        inner.color_deep = deep;
        inner.color_highlight = highlight;
    }

    /// Wave presets per orb state: listening leans in, processing churns,
    /// a score settles into slow, tall swells.
    pub fn apply_orb_state(&self, state: OrbState) {
        let (speed, intensity) = match state {
            OrbState::Idle => (1.0, 1.0),
            OrbState::Listening => (1.3, 1.3),
            OrbState::Processing => (1.8, 0.8),
            OrbState::Score => (0.6, 1.5),
        };
        let mut inner = self.inner.lock();
        inner.wave_speed = speed;
        inner.wave_intensity = intensity;
    }

    /// Hand the renderer a read-only analyser, or detach it with `None`
    /// when the recording session ends.
    pub fn set_analyser(&self, analyser: Option<Arc<AudioAnalyser>>) {
        self.inner.lock().analyser = analyser;
    }

    pub fn has_analyser(&self) -> bool {
        self.inner.lock().analyser.is_some()
    }

    /// Override the analyser-derived level, e.g. while synthesized audio
    /// plays through a path the analyser cannot observe.
    pub fn set_direct_level(&self, level: Option<f32>) {
        self.inner.lock().direct_level = level;
    }

    pub fn colors(&self) -> (Rgb, Rgb) {
        let inner = self.inner.lock();
        (inner.color_deep, inner.color_highlight)
    }

    pub fn wave_speed(&self) -> f32 {
        self.inner.lock().wave_speed
    }

    pub fn wave_intensity(&self) -> f32 {
        self.inner.lock().wave_intensity
    }

    /// Advance the smoothed audio level one frame and return it. Called by
    /// the renderer every frame.
    pub fn update_audio_level(&self) -> f32 {
        let mut inner = self.inner.lock();
        if let Some(direct) = inner.direct_level {
            inner.audio_level += (direct - inner.audio_level) * LEVEL_ATTACK;
        } else if let Some(target) = inner.analyser.as_ref().map(|analyser| analyser.level()) {
            inner.audio_level += (target - inner.audio_level) * LEVEL_ATTACK;
        } else {
            inner.audio_level *= LEVEL_DECAY;
        }
        inner.audio_level
    }

    /// Session-end semantics: detach audio, clear overrides and restore
    /// idle wave parameters. Colors persist; they follow the language.
    pub fn reset(&self) {
        let mut inner = self.inner.lock();
        inner.analyser = None;
        inner.direct_level = None;
        inner.audio_level = 0.0;
        inner.wave_speed = 1.0;
        inner.wave_intensity = 1.0;
    }

    /// Drive the level with a deterministic pulse while synthesized audio
    /// plays. The override clears when the returned guard drops.
    pub fn begin_playback_pulse(self: Arc<Self>) -> PlaybackPulse {
        let task = tokio::spawn(async move {
            // Clearing lives inside the task so cancellation cannot race a
            // final poll into leaving a stale override behind
            let clear = ClearDirectLevel(self);
            let started = tokio::time::Instant::now();
            loop {
                let elapsed = started.elapsed().as_secs_f32();
                let level = 0.25 + (elapsed * 4.0).sin() * 0.1 + (elapsed * 7.3).sin() * 0.08;
                clear.0.set_direct_level(Some(level.clamp(0.0, 1.0)));
                tokio::time::sleep(Duration::from_millis(PLAYBACK_PULSE_INTERVAL_MS)).await;
            }
        });
        PlaybackPulse { task }
    }
}

impl Default for WaterState {
    fn default() -> Self {
        Self::new()
    }
}

/// Guard for a running playback pulse.
pub struct PlaybackPulse {
    task: JoinHandle<()>,
}

impl Drop for PlaybackPulse {
    fn drop(&mut self) {
        self.task.abort();
    }
}

struct ClearDirectLevel(Arc<WaterState>);

impl Drop for ClearDirectLevel {
    fn drop(&mut self) {
        self.0.set_direct_level(None);
    }
}

#[cfg(test)]
#[path = "water_test.rs"]
mod tests;
