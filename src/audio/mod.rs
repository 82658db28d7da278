// Audio contracts: analyser frames, microphone capture, take recording
// and synthesized playback. Platform backends implement the traits; the
// session only sees the contracts.

mod analyser;
mod capture;
mod output;

pub use analyser::{average_energy, AudioAnalyser, SpectrumSource};
pub use capture::{
    AudioRecorder, Microphone, MicrophoneError, MicrophoneHandle, UnsupportedRecorder,
};
pub use output::{AudioOutput, PlaybackError};
