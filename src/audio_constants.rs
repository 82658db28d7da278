//! Centralized constants for audio and session timing.
//!
//! All timing and threshold magic numbers are defined here with
//! documentation explaining their purpose and constraints.

// =============================================================================
// ANALYSER
// =============================================================================

/// Number of frequency bins produced per analyser frame.
///
/// Matches an FFT size of 256: capture backends hand the analyser half the
/// FFT size worth of magnitude bins, each on a 0-255 scale.
pub const ANALYSER_BIN_COUNT: usize = 128;

// =============================================================================
// SILENCE DETECTION
// =============================================================================

/// Byte-average energy below which a poll counts as silent (0-255 scale).
///
/// The mean of all analyser bins is compared against this value. 20 sits
/// comfortably above electrical noise floor while catching soft speech.
pub const SILENCE_THRESHOLD: u8 = 20;

/// Duration of unbroken silence before stopping recording (milliseconds).
///
/// After speech has been detected, this much continuous sub-threshold
/// audio ends the recording automatically.
pub const SILENCE_DURATION_MS: u64 = 2000;

/// Speech required before silence detection arms itself (milliseconds).
///
/// Ambient noise before the user starts talking must not end the session;
/// the silence window only counts down once this much speech has been seen.
pub const MIN_SPEECH_DURATION_MS: u64 = 500;

/// Polling interval for the silence detector (milliseconds).
///
/// 100ms balances responsiveness against wasted wakeups; the silence
/// window is 20 polls long at this rate.
pub const SILENCE_POLL_INTERVAL_MS: u64 = 100;

// =============================================================================
// SESSION TIMING
// =============================================================================

/// Delay between the stop routine and the final transcript read
/// (milliseconds).
///
/// Recognition backends deliver results asynchronously; the session waits
/// this long after stopping before treating the transcript as final.
pub const TRANSCRIPT_SETTLE_DELAY_MS: u64 = 500;

/// Update interval for the synthesized-playback level pulse (milliseconds).
pub const PLAYBACK_PULSE_INTERVAL_MS: u64 = 30;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silence_window_spans_multiple_polls() {
        // The window must be much longer than one poll so a single noisy
        // sample cannot flip the decision.
        assert!(SILENCE_DURATION_MS >= SILENCE_POLL_INTERVAL_MS * 10);
    }

    #[test]
    fn test_min_speech_shorter_than_silence_window() {
        // Arming must be quicker than triggering, or short utterances
        // could never complete.
        assert!(MIN_SPEECH_DURATION_MS < SILENCE_DURATION_MS);
    }

    #[test]
    fn test_settle_delay_bounded() {
        // Long enough for async transcript delivery, short enough that the
        // processing state doesn't feel stuck.
        assert!(TRANSCRIPT_SETTLE_DELAY_MS >= 100);
        assert!(TRANSCRIPT_SETTLE_DELAY_MS <= 1000);
    }
}
