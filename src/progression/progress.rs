// User progress: attempt history, aggregates, daily streaks and XP

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::leveling::{calculate_level, tier_for_level, xp_from_history};
use crate::settings::{Language, Tier};

/// One scored pronunciation attempt. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptRecord {
    pub id: String,
    pub exercise_id: String,
    pub language: Language,
    /// Difficulty tier at the time of the attempt
    pub level: Tier,
    pub target_phrase: String,
    pub user_transcription: String,
    /// Integer score, 0-100
    pub score: u32,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
}

impl AttemptRecord {
    pub fn new(
        language: Language,
        level: Tier,
        target_phrase: String,
        user_transcription: String,
        score: u32,
        timestamp: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            exercise_id: format!("gen-{timestamp}"),
            language,
            level,
            target_phrase,
            user_transcription,
            score,
            timestamp,
        }
    }

    /// Calendar date (UTC) of the attempt, for streak accounting.
    fn practice_date(&self) -> Option<NaiveDate> {
        DateTime::from_timestamp_millis(self.timestamp).map(|dt| dt.date_naive())
    }
}

/// Persistent practice progress. One instance per install.
///
/// `history` is newest-first and currently unbounded; aggregates are kept
/// consistent with it on every mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProgress {
    pub total_attempts: u32,
    /// round(mean(history[].score))
    pub average_score: u32,
    pub best_score: u32,
    pub history: Vec<AttemptRecord>,
    pub streak_days: u32,
    /// YYYY-MM-DD of the most recent practice day
    pub last_practice_date: Option<String>,
    pub xp: u64,
    pub level: u32,
}

impl UserProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repair a loaded record.
    ///
    /// Records persisted before XP tracking carry history but no XP; the
    /// XP is backfilled as the sum of historical scores. The level is
    /// always recomputed from XP, so repairing twice is a no-op.
    pub fn repair(&mut self) {
        if self.xp == 0 && !self.history.is_empty() {
            self.xp = xp_from_history(&self.history);
        }
        self.level = calculate_level(self.xp);
    }
}

impl Default for UserProgress {
    fn default() -> Self {
        Self {
            total_attempts: 0,
            average_score: 0,
            best_score: 0,
            history: Vec::new(),
            streak_days: 0,
            last_practice_date: None,
            xp: 0,
            level: 1,
        }
    }
}

/// Level-up notification. Tiers are populated only when the tier actually
/// changed, not on every level-up.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelUpEvent {
    pub previous_level: u32,
    pub new_level: u32,
    pub previous_tier: Option<Tier>,
    pub new_tier: Option<Tier>,
}

/// Fold a new attempt into the progress record.
///
/// Appends to history (newest first), updates the aggregates and the daily
/// streak, adds the score to XP and recomputes the level. Returns a
/// level-up descriptor when the level increased.
pub fn record_attempt(progress: &mut UserProgress, attempt: AttemptRecord) -> Option<LevelUpEvent> {
    let previous_level = progress.level.max(1);

    let score = attempt.score;
    let practice_date = attempt.practice_date();

    progress.history.insert(0, attempt);
    progress.total_attempts += 1;

    let total: u64 = progress.history.iter().map(|a| a.score as u64).sum();
    progress.average_score = (total as f64 / progress.history.len() as f64).round() as u32;
    if score > progress.best_score {
        progress.best_score = score;
    }

    if let Some(today) = practice_date {
        let last = progress
            .last_practice_date
            .as_deref()
            .and_then(|raw| raw.parse::<NaiveDate>().ok());
        match last {
            Some(last) => {
                let gap_days = (today - last).num_days();
                if gap_days == 1 {
                    progress.streak_days += 1;
                } else if gap_days > 1 {
                    progress.streak_days = 1;
                }
                // Same-day repeats leave the streak unchanged
            }
            None => progress.streak_days = 1,
        }
        progress.last_practice_date = Some(today.format("%Y-%m-%d").to_string());
    }

    progress.xp += score as u64;
    progress.level = calculate_level(progress.xp);

    if progress.level > previous_level {
        let previous_tier = tier_for_level(previous_level);
        let new_tier = tier_for_level(progress.level);
        let tier_changed = previous_tier != new_tier;
        Some(LevelUpEvent {
            previous_level,
            new_level: progress.level,
            previous_tier: tier_changed.then_some(previous_tier),
            new_tier: tier_changed.then_some(new_tier),
        })
    } else {
        None
    }
}

#[cfg(test)]
#[path = "progress_test.rs"]
mod tests;
