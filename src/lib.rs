// Core engine for the pronounce practice loop.
//
// The crate owns the control and data logic of a pronunciation-practice
// session: the orb state machine, energy-based silence detection, the
// XP/leveling progression engine, persistence, and the contracts for the
// external collaborators (phrase generation, scoring, synthesis and
// speech-to-text). Rendering, layout and platform backends live in the host.

pub mod audio;
pub mod audio_constants;
pub mod capability;
pub mod coach;
pub mod events;
pub mod progression;
pub mod recording;
pub mod session;
pub mod settings;
pub mod speech;
pub mod storage;
pub mod water;

// Re-export log macros for use throughout the crate
pub use log::{debug, error, info, trace, warn};
