// Progression module: leveling math and practice history

mod leveling;
mod progress;

pub use leveling::{
    calculate_level, tier_for_level, total_xp_for_level, xp_for_level, xp_from_history,
    xp_progress, XpProgress,
};
pub use progress::{record_attempt, AttemptRecord, LevelUpEvent, UserProgress};
