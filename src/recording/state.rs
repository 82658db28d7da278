// Session state management for the practice loop

use serde::Serialize;

/// Visible state of the practice orb. Drives the visualization and gates
/// which user actions are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrbState {
    /// Ready: a phrase may be loaded and recording may start.
    Idle,
    /// Microphone open, live transcription running.
    Listening,
    /// Stop routine, phrase loading or a scoring round-trip in flight.
    Processing,
    /// A scored attempt is on display.
    Score,
}

impl Default for OrbState {
    fn default() -> Self {
        Self::Idle
    }
}

/// Errors that can occur during state transitions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    /// Invalid state transition attempted
    #[error("invalid state transition from {from:?} to {to:?}")]
    InvalidTransition { from: OrbState, to: OrbState },
}

/// Guarded state machine for a practice session.
/// Designed to be wrapped in a Mutex and shared with the controller.
pub struct SessionState {
    state: OrbState,
}

impl SessionState {
    /// Create a new SessionState in Idle state.
    pub fn new() -> Self {
        Self {
            state: OrbState::Idle,
        }
    }

    /// Get the current orb state.
    pub fn get(&self) -> OrbState {
        self.state
    }

    /// Transition to a new state with validation.
    ///
    /// Valid transitions:
    /// - Idle -> Listening (user starts recording; a phrase must be loaded)
    /// - Idle -> Processing (phrase generation in flight)
    /// - Listening -> Processing (stop routine; prefer `begin_stop`)
    /// - Processing -> Idle (failure path, or a fresh phrase has loaded)
    /// - Processing -> Score (scoring succeeded)
    /// - Score -> Idle (retry the same phrase)
    /// - Score -> Processing (continue to the next phrase)
    ///
    /// Returns error for invalid transitions
    #[must_use = "this returns a Result that should be handled"]
    pub fn transition_to(&mut self, new_state: OrbState) -> Result<(), StateError> {
        let valid = matches!(
            (self.state, new_state),
            (OrbState::Idle, OrbState::Listening)
                | (OrbState::Idle, OrbState::Processing)
                | (OrbState::Listening, OrbState::Processing)
                | (OrbState::Processing, OrbState::Idle)
                | (OrbState::Processing, OrbState::Score)
                | (OrbState::Score, OrbState::Idle)
                | (OrbState::Score, OrbState::Processing)
        );

        if !valid {
            return Err(StateError::InvalidTransition {
                from: self.state,
                to: new_state,
            });
        }

        self.state = new_state;
        Ok(())
    }

    /// One-way gate out of Listening.
    ///
    /// Returns true only for the caller that performs the transition to
    /// Processing. The user's stop action and the silence detector both
    /// converge on this gate; whichever arrives second observes a
    /// non-Listening state and becomes a no-op.
    pub fn begin_stop(&mut self) -> bool {
        if self.state == OrbState::Listening {
            self.state = OrbState::Processing;
            true
        } else {
            false
        }
    }

    /// Force reset to Idle state.
    ///
    /// Use for error recovery when normal state transitions aren't possible
    /// (e.g. capture failure right after entering Listening).
    pub fn reset_to_idle(&mut self) {
        self.state = OrbState::Idle;
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
