use super::*;

fn word(target: &str, score: u32) -> WordAnalysis {
    WordAnalysis {
        target: target.to_string(),
        spoken: Some(target.to_string()),
        score,
        issue: "correct".to_string(),
        tip: String::new(),
    }
}

fn result_with_words(score: u32, words: Vec<WordAnalysis>) -> ScoringResult {
    ScoringResult {
        score,
        overall_feedback: "ok".to_string(),
        word_analysis: words,
        encouragement: String::new(),
        focus_area: String::new(),
    }
}

#[test]
fn test_note_attempt_tracks_phrase_and_score() {
    let mut context = ConversationContext::new("travel");
    context.note_attempt("where is the station", &result_with_words(85, vec![]));

    assert_eq!(context.previous_phrases, vec!["where is the station"]);
    assert_eq!(context.last_score, Some(85));
    assert!(context.weak_areas.is_empty());
}

#[test]
fn test_previous_phrases_keep_only_most_recent_five() {
    let mut context = ConversationContext::new("travel");
    for i in 0..8 {
        context.note_attempt(&format!("phrase {i}"), &result_with_words(70, vec![]));
    }

    assert_eq!(context.previous_phrases.len(), 5);
    assert_eq!(context.previous_phrases[0], "phrase 3");
    assert_eq!(context.previous_phrases[4], "phrase 7");
}

#[test]
fn test_weak_areas_collect_low_scoring_words() {
    let mut context = ConversationContext::new("food");
    let result = result_with_words(
        60,
        vec![word("thorough", 40), word("the", 95), word("borough", 55)],
    );
    context.note_attempt("the thorough borough", &result);

    assert_eq!(context.weak_areas, vec!["thorough", "borough"]);
}

#[test]
fn test_weak_areas_deduplicate_and_cap_at_ten() {
    let mut context = ConversationContext::new("food");
    for round in 0..3 {
        let words = (0..6)
            .map(|i| word(&format!("word{}{}", round, i), 30))
            .collect();
        context.note_attempt("x", &result_with_words(50, words));
    }
    assert_eq!(context.weak_areas.len(), 10);

    // Re-reporting a tracked word does not duplicate it
    let before = context.weak_areas.clone();
    let repeat = result_with_words(50, vec![word(&before[9].clone(), 30)]);
    context.note_attempt("x", &repeat);
    assert_eq!(context.weak_areas, before);
}

#[test]
fn test_reset_clears_everything_but_topic() {
    let mut context = ConversationContext::new("travel");
    context.note_attempt("hola", &result_with_words(40, vec![word("hola", 40)]));

    context.reset("sports");
    assert_eq!(context.topic, "sports");
    assert!(context.previous_phrases.is_empty());
    assert!(context.weak_areas.is_empty());
    assert_eq!(context.last_score, None);
}

#[test]
fn test_scoring_result_accepts_minimal_payload() {
    // Services sometimes omit the optional sections
    let raw = r#"{"score": 72, "overallFeedback": "Good effort"}"#;
    let result: ScoringResult = serde_json::from_str(raw).unwrap();
    assert_eq!(result.score, 72);
    assert!(result.word_analysis.is_empty());
    assert_eq!(result.encouragement, "");
}

#[test]
fn test_word_analysis_spoken_may_be_null() {
    let raw = r#"{"target": "cat", "spoken": null, "score": 0, "issue": "missed", "tip": "slow down"}"#;
    let word: WordAnalysis = serde_json::from_str(raw).unwrap();
    assert_eq!(word.spoken, None);
}
