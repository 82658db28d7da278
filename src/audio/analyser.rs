// Frequency-domain analyser shared between capture, silence detection and
// the visualization. The capture backend pushes frames; readers only read.

use crate::audio_constants::ANALYSER_BIN_COUNT;
use parking_lot::Mutex;

/// Source of frequency-domain energy frames, one byte per bin (0-255).
pub trait SpectrumSource: Send + Sync {
    /// Latest frame, or `None` when no audio is flowing.
    fn frequency_data(&self) -> Option<Vec<u8>>;
}

/// Arithmetic mean of all bins on the 0-255 scale.
pub fn average_energy(frame: &[u8]) -> f32 {
    if frame.is_empty() {
        return 0.0;
    }
    let sum: u32 = frame.iter().map(|&bin| bin as u32).sum();
    sum as f32 / frame.len() as f32
}

/// Latest-frame holder fed by a capture backend.
///
/// Owned by the recording session; the visualization and the silence
/// detector hold shared read-only references that go stale (return `None`)
/// once the backend stops pushing.
#[derive(Debug)]
pub struct AudioAnalyser {
    bin_count: usize,
    frame: Mutex<Option<Vec<u8>>>,
}

impl AudioAnalyser {
    pub fn new() -> Self {
        Self::with_bin_count(ANALYSER_BIN_COUNT)
    }

    pub fn with_bin_count(bin_count: usize) -> Self {
        Self {
            bin_count,
            frame: Mutex::new(None),
        }
    }

    pub fn bin_count(&self) -> usize {
        self.bin_count
    }

    /// Replace the current frame. Frames are truncated or zero-padded to
    /// the configured bin count so readers always see a uniform shape.
    pub fn push_frame(&self, mut frame: Vec<u8>) {
        frame.resize(self.bin_count, 0);
        *self.frame.lock() = Some(frame);
    }

    /// Drop the current frame; readers see `None` until the next push.
    pub fn clear(&self) {
        *self.frame.lock() = None;
    }

    /// Normalized 0.0-1.0 level of the latest frame, for the visualization.
    pub fn level(&self) -> f32 {
        self.frame
            .lock()
            .as_deref()
            .map(|frame| average_energy(frame) / 255.0)
            .unwrap_or(0.0)
    }
}

impl SpectrumSource for AudioAnalyser {
    fn frequency_data(&self) -> Option<Vec<u8>> {
        self.frame.lock().clone()
    }
}

impl Default for AudioAnalyser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "analyser_test.rs"]
mod tests;
