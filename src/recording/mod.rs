// Recording module: session state machine and silence detection

mod silence;
mod state;

pub use silence::{SilenceConfig, SilenceDetector, SilenceTracker};
pub use state::{OrbState, SessionState, StateError};
