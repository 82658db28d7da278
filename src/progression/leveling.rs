// Leveling math for the progression engine
// Pure functions over total XP; level is always derived, never stored
// independently of being recomputable

use crate::settings::Tier;
use serde::Serialize;

use super::AttemptRecord;

/// XP needed to go from level n-1 to level n. Levels count from 1.
pub fn xp_for_level(level: u32) -> u64 {
    100 + (level.saturating_sub(1) as u64) * 50
}

/// Cumulative XP required to reach level n.
pub fn total_xp_for_level(level: u32) -> u64 {
    (1..level).map(|i| xp_for_level(i + 1)).sum()
}

/// Given total XP, return the current level (1-based).
///
/// Greedily accumulates per-level costs while they still fit under the
/// total, so the result is the largest level whose cumulative cost is
/// covered.
pub fn calculate_level(total_xp: u64) -> u32 {
    let mut level = 1;
    let mut accumulated = 0u64;
    loop {
        let needed = xp_for_level(level + 1);
        if accumulated + needed > total_xp {
            break;
        }
        accumulated += needed;
        level += 1;
    }
    level
}

/// Progress within the current level.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct XpProgress {
    /// XP earned since the current level started
    pub current: u64,
    /// XP needed to finish the current level
    pub needed: u64,
    /// current/needed, clamped to 1.0
    pub fraction: f64,
}

/// Progress within the current level for a given XP total.
pub fn xp_progress(total_xp: u64) -> XpProgress {
    let level = calculate_level(total_xp);
    let current = total_xp - total_xp_for_level(level);
    let needed = xp_for_level(level + 1);
    XpProgress {
        current,
        needed,
        fraction: (current as f64 / needed as f64).min(1.0),
    }
}

/// Map a level to its difficulty tier: 1-5 beginner, 6-10 intermediate,
/// 11+ advanced.
pub fn tier_for_level(level: u32) -> Tier {
    if level <= 5 {
        Tier::Beginner
    } else if level <= 10 {
        Tier::Intermediate
    } else {
        Tier::Advanced
    }
}

/// Migration helper: total XP implied by an attempt history.
pub fn xp_from_history(history: &[AttemptRecord]) -> u64 {
    history.iter().map(|attempt| attempt.score as u64).sum()
}

#[cfg(test)]
#[path = "leveling_test.rs"]
mod tests;
