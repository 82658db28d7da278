// Microphone acquisition and optional take recording

use super::AudioAnalyser;
use crate::capability::Capability;
use std::sync::Arc;

/// Errors acquiring or running microphone capture.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MicrophoneError {
    /// The user (or platform policy) denied microphone access.
    #[error("microphone permission denied")]
    PermissionDenied,
    /// No usable input device exists.
    #[error("no audio input device available")]
    NoDevice,
    /// The device was acquired but the stream failed.
    #[error("audio capture failed: {0}")]
    Capture(String),
}

/// Factory for microphone capture sessions.
pub trait Microphone: Send + Sync {
    /// Acquire the device and start feeding an analyser.
    fn open(&self) -> Result<Box<dyn MicrophoneHandle>, MicrophoneError>;
}

/// An open microphone stream.
///
/// `close` stops all tracks and must be idempotent. Implementations release
/// the device on drop as a backstop, but the session always closes
/// explicitly so release ordering is deterministic.
pub trait MicrophoneHandle: Send {
    /// Analyser fed by this stream. Readers get a shared, read-only view;
    /// the stream owns the data flow.
    fn analyser(&self) -> Arc<AudioAnalyser>;
    fn close(&mut self);
}

/// Optional recorder accumulating an encoded audio take for playback.
///
/// Platforms without a usable encoder report `Unsupported` and are skipped
/// silently; recording and scoring proceed without a take.
pub trait AudioRecorder: Send + Sync {
    /// Resolved once at startup.
    fn capability(&self) -> Capability;
    fn start(&self);
    /// Stop and finalize the take, if any. Idempotent; a second call
    /// returns `None`.
    fn stop(&self) -> Option<Vec<u8>>;
}

/// No-op recorder for platforms without a native encoder.
pub struct UnsupportedRecorder;

impl AudioRecorder for UnsupportedRecorder {
    fn capability(&self) -> Capability {
        Capability::Unsupported
    }

    fn start(&self) {}

    fn stop(&self) -> Option<Vec<u8>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_recorder_yields_nothing() {
        let recorder = UnsupportedRecorder;
        assert_eq!(recorder.capability(), Capability::Unsupported);
        recorder.start();
        assert_eq!(recorder.stop(), None);
    }
}
