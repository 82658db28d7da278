// Live transcript shared between a recognition backend and the session

use parking_lot::Mutex;

/// Transcript buffer mutated by a recognition backend for the duration of
/// a recording.
///
/// Recognition engines deliver interim hypotheses before final results;
/// `current` prefers accumulated final text and falls back to the latest
/// interim hypothesis, so the session always sees the best available text.
#[derive(Debug, Default)]
pub struct TranscriptBuffer {
    inner: Mutex<TranscriptInner>,
}

#[derive(Debug, Default)]
struct TranscriptInner {
    final_text: String,
    interim_text: String,
}

impl TranscriptBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finalized segment.
    pub fn push_final(&self, text: &str) {
        let mut inner = self.inner.lock();
        inner.final_text.push_str(text);
        inner.interim_text.clear();
    }

    /// Replace the interim hypothesis.
    pub fn set_interim(&self, text: &str) {
        self.inner.lock().interim_text = text.to_string();
    }

    /// Best available transcript: final text when any exists, otherwise the
    /// interim hypothesis.
    pub fn current(&self) -> String {
        let inner = self.inner.lock();
        if inner.final_text.is_empty() {
            inner.interim_text.clone()
        } else {
            inner.final_text.clone()
        }
    }

    /// Reset for a new recording.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.final_text.clear();
        inner.interim_text.clear();
    }
}

#[cfg(test)]
#[path = "transcript_test.rs"]
mod tests;
