use super::*;
use crate::progression::leveling::calculate_level;

const DAY_MS: i64 = 86_400_000;

fn attempt(score: u32, timestamp: i64) -> AttemptRecord {
    AttemptRecord::new(
        Language::En,
        Tier::Beginner,
        "the quick brown fox".to_string(),
        "the quick brown fox".to_string(),
        score,
        timestamp,
    )
}

#[test]
fn test_attempts_accumulate_xp_and_levels() {
    let mut progress = UserProgress::new();
    assert_eq!(progress.xp, 0);
    assert_eq!(progress.level, 1);

    let mut level_ups = Vec::new();
    for i in 0..9 {
        let event = record_attempt(&mut progress, attempt(100, i * DAY_MS));
        if let Some(event) = event {
            level_ups.push((i + 1, event));
        }
    }

    assert_eq!(progress.xp, 900);
    assert_eq!(progress.level, calculate_level(900));
    assert_eq!(progress.level, 5);

    // Boundaries at 150/350/600/900 XP are crossed on attempts 2, 4, 6, 9
    let attempts: Vec<i64> = level_ups.iter().map(|(n, _)| *n).collect();
    assert_eq!(attempts, vec![2, 4, 6, 9]);

    // Each event carries consecutive levels; none of these cross a tier
    for (_, event) in &level_ups {
        assert_eq!(event.new_level, event.previous_level + 1);
        assert_eq!(event.previous_tier, None);
        assert_eq!(event.new_tier, None);
    }
}

#[test]
fn test_aggregates_follow_history() {
    let mut progress = UserProgress::new();
    for (i, score) in [80, 60, 100].into_iter().enumerate() {
        record_attempt(&mut progress, attempt(score, i as i64));
    }

    assert_eq!(progress.total_attempts, 3);
    assert_eq!(progress.average_score, 80); // round(240 / 3)
    assert_eq!(progress.best_score, 100);

    // History is newest first
    assert_eq!(progress.history[0].score, 100);
    assert_eq!(progress.history[2].score, 80);
}

#[test]
fn test_average_rounds_to_nearest() {
    let mut progress = UserProgress::new();
    record_attempt(&mut progress, attempt(70, 0));
    record_attempt(&mut progress, attempt(81, 1));
    // mean 75.5 rounds to 76
    assert_eq!(progress.average_score, 76);
}

#[test]
fn test_streak_increments_on_consecutive_days() {
    let mut progress = UserProgress::new();
    record_attempt(&mut progress, attempt(50, 0));
    assert_eq!(progress.streak_days, 1);

    record_attempt(&mut progress, attempt(50, DAY_MS));
    assert_eq!(progress.streak_days, 2);

    record_attempt(&mut progress, attempt(50, 2 * DAY_MS));
    assert_eq!(progress.streak_days, 3);
}

#[test]
fn test_streak_resets_after_gap() {
    let mut progress = UserProgress::new();
    record_attempt(&mut progress, attempt(50, 0));
    record_attempt(&mut progress, attempt(50, DAY_MS));
    assert_eq!(progress.streak_days, 2);

    // Two days missed
    record_attempt(&mut progress, attempt(50, 4 * DAY_MS));
    assert_eq!(progress.streak_days, 1);
}

#[test]
fn test_streak_unchanged_on_same_day() {
    let mut progress = UserProgress::new();
    record_attempt(&mut progress, attempt(50, 0));
    record_attempt(&mut progress, attempt(50, 3_600_000));
    record_attempt(&mut progress, attempt(50, 7_200_000));
    assert_eq!(progress.streak_days, 1);
    assert_eq!(progress.total_attempts, 3);
}

#[test]
fn test_level_up_carries_tier_only_on_tier_change() {
    // 1200 XP sits just under the 1250 needed for level 6
    let mut progress = UserProgress {
        xp: 1200,
        level: calculate_level(1200),
        ..UserProgress::default()
    };
    assert_eq!(progress.level, 5);

    let event = record_attempt(&mut progress, attempt(100, 0)).expect("level up");
    assert_eq!(event.previous_level, 5);
    assert_eq!(event.new_level, 6);
    assert_eq!(event.previous_tier, Some(Tier::Beginner));
    assert_eq!(event.new_tier, Some(Tier::Intermediate));
}

#[test]
fn test_no_level_up_without_boundary() {
    let mut progress = UserProgress::new();
    let event = record_attempt(&mut progress, attempt(50, 0));
    assert!(event.is_none());
    assert_eq!(progress.level, 1);
}

#[test]
fn test_repair_backfills_xp_from_history() {
    let mut progress = UserProgress {
        history: vec![attempt(80, 0), attempt(70, 1), attempt(90, 2)],
        total_attempts: 3,
        average_score: 80,
        best_score: 90,
        xp: 0,
        level: 1,
        ..UserProgress::default()
    };

    progress.repair();
    assert_eq!(progress.xp, 240);
    assert_eq!(progress.level, calculate_level(240));

    // Idempotent: a second repair changes nothing
    let snapshot = progress.clone();
    progress.repair();
    assert_eq!(progress, snapshot);
}

#[test]
fn test_repair_leaves_fresh_progress_at_level_one() {
    let mut progress = UserProgress::new();
    progress.repair();
    assert_eq!(progress.xp, 0);
    assert_eq!(progress.level, 1);
}

#[test]
fn test_deserializes_record_predating_xp_tracking() {
    let raw = r#"{
        "totalAttempts": 1,
        "averageScore": 75,
        "bestScore": 75,
        "history": [{
            "id": "a",
            "exerciseId": "gen-0",
            "language": "en",
            "level": "beginner",
            "targetPhrase": "hello",
            "userTranscription": "hello",
            "score": 75,
            "timestamp": 0
        }],
        "streakDays": 1,
        "lastPracticeDate": "1970-01-01"
    }"#;

    let mut progress: UserProgress = serde_json::from_str(raw).unwrap();
    progress.repair();
    assert_eq!(progress.xp, 75);
    assert_eq!(progress.level, 1);
}
