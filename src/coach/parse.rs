// Scoring-response parsing with progressive repair
// The scoring service is asked for bare JSON but occasionally wraps it in
// fences or emits almost-JSON; parsing strips, repairs and finally
// salvages field-by-field before giving up.

use super::types::ScoringResult;
use super::CoachError;
use regex::Regex;
use std::sync::OnceLock;

fn object_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)\{.*\}").expect("valid regex"))
}

fn trailing_comma_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r",\s*([}\]])").expect("valid regex"))
}

fn score_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#""score"\s*:\s*(\d+)"#).expect("valid regex"))
}

fn string_field_re(field: &'static str, cell: &'static OnceLock<Regex>) -> &'static Regex {
    cell.get_or_init(|| {
        Regex::new(&format!(r#""{field}"\s*:\s*"([^"]*)""#)).expect("valid regex")
    })
}

fn capture_string(re: &Regex, text: &str) -> Option<String> {
    re.captures(text).map(|captures| captures[1].to_string())
}

/// Parse a scoring response, repairing common service quirks.
///
/// Attempts, in order: the text as-is with fences stripped; the outermost
/// JSON object with trailing commas and single quotes repaired; a minimal
/// result rebuilt from whatever fields are recognizable. Only when no score
/// can be recovered does parsing fail.
pub fn parse_scoring_response(text: &str) -> Result<ScoringResult, CoachError> {
    // Strip markdown code fences
    let cleaned = text.replace("```json", "").replace("```", "");
    let cleaned = cleaned.trim();

    if let Ok(result) = serde_json::from_str::<ScoringResult>(cleaned) {
        return Ok(result);
    }

    // Extract a JSON object from surrounding prose
    let mut candidate = match object_re().find(cleaned) {
        Some(found) => found.as_str().to_string(),
        None => cleaned.to_string(),
    };

    // Fix trailing commas before } or ]
    candidate = trailing_comma_re()
        .replace_all(&candidate, "$1")
        .into_owned();

    // Fix single quotes around property names and values
    candidate = candidate.replace('\'', "\"");

    if let Ok(result) = serde_json::from_str::<ScoringResult>(&candidate) {
        return Ok(result);
    }

    // Last resort: build a minimal valid result from recognizable fields
    static FEEDBACK_RE: OnceLock<Regex> = OnceLock::new();
    static ENCOURAGEMENT_RE: OnceLock<Regex> = OnceLock::new();
    static FOCUS_RE: OnceLock<Regex> = OnceLock::new();

    let score = score_re()
        .captures(text)
        .and_then(|captures| captures[1].parse::<u32>().ok());

    match score {
        Some(score) => Ok(ScoringResult {
            score,
            overall_feedback: capture_string(string_field_re("overallFeedback", &FEEDBACK_RE), text)
                .unwrap_or_else(|| "Analysis complete.".to_string()),
            word_analysis: Vec::new(),
            encouragement: capture_string(string_field_re("encouragement", &ENCOURAGEMENT_RE), text)
                .unwrap_or_default(),
            focus_area: capture_string(string_field_re("focusArea", &FOCUS_RE), text)
                .unwrap_or_default(),
        }),
        None => Err(CoachError::MalformedResponse(
            "could not parse scoring response".to_string(),
        )),
    }
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
