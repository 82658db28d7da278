// System and user prompts for the coaching service

use super::types::{PhraseRequest, ScoringRequest};

pub const PRONUNCIATION_SYSTEM_PROMPT: &str = r#"You are an expert pronunciation coach and phonetics specialist. You analyze pronunciation attempts by comparing a target phrase with the user's spoken transcription.

For each attempt, you MUST respond with ONLY valid JSON (no markdown, no code blocks) in this exact structure:

{
  "score": <number 0-100>,
  "overallFeedback": "<1-2 sentences of encouraging overall assessment>",
  "wordAnalysis": [
    {
      "target": "<expected word>",
      "spoken": "<what user said or null if missed>",
      "issue": "<description of the pronunciation issue or 'correct'>",
      "score": <number 0-100>,
      "tip": "<practical tip: tongue position, mouth shape, airflow, etc.>"
    }
  ],
  "encouragement": "<motivational message>",
  "focusArea": "<the #1 thing to improve for next attempt>"
}

Scoring guidelines:
- 90-100: Near-native pronunciation
- 70-89: Good, clearly understandable with minor accent
- 50-69: Understandable but with notable errors
- 30-49: Difficult to understand, significant errors
- 0-29: Major pronunciation issues

Be specific about phonetic issues. Reference IPA symbols when helpful. Give actionable physical tips (tongue placement, lip rounding, airflow). Be encouraging but honest. Adapt feedback language to the user's apparent level."#;

pub const PHRASE_GENERATION_SYSTEM_PROMPT: &str = r#"You are a language learning phrase generator. You create contextual phrases for pronunciation practice.

You MUST respond with ONLY valid JSON (no markdown, no code blocks) in this exact structure:

{
  "phrase": "<the phrase to practice>",
  "phonetic": "<IPA phonetic transcription>",
  "tips": "<pronunciation tips for this specific phrase>",
  "context": "<brief context about when/where this phrase is used>"
}

Guidelines:
- Generate phrases appropriate for the given difficulty level
- beginner: Simple, common phrases (3-6 words)
- intermediate: Conversational phrases with some challenging sounds (5-10 words)
- advanced: Complex sentences with difficult phonetic combinations (8-15 words)
- Make phrases relevant to the given topic
- Include varied phonetic challenges
- Avoid repeating phrases from the conversation history
- If weak areas are provided, include words that target those sounds
- Keep phrases natural and useful in real conversations"#;

/// Build the user message for a phrase-generation request, folding in the
/// conversation context and steering difficulty by the last score.
pub fn phrase_user_prompt(request: &PhraseRequest) -> String {
    let language = request.language.display_name();
    let mut prompt = format!(
        "Generate a pronunciation practice phrase.\n\
         Language: {language}\n\
         Level: {level}\n\
         Topic: {topic}\n\n\
         IMPORTANT: The phrase must be in {language}. The \"tips\" and \"context\" fields must also be written in {language}.",
        level = request.level.as_str(),
        topic = request.topic,
    );

    if let Some(context) = &request.conversation_context {
        if !context.previous_phrases.is_empty() {
            prompt.push_str("\n\nPrevious phrases (avoid repeating):");
            for phrase in &context.previous_phrases {
                prompt.push_str(&format!("\n- \"{phrase}\""));
            }
        }
        if !context.weak_areas.is_empty() {
            prompt.push_str(&format!(
                "\n\nWeak areas to target: {}",
                context.weak_areas.join(", ")
            ));
        }
        if let Some(last_score) = context.last_score {
            prompt.push_str(&format!("\n\nLast score: {last_score}/100"));
            if last_score >= 90 {
                prompt.push_str(" (doing great, increase difficulty slightly)");
            } else if last_score < 50 {
                prompt.push_str(" (struggling, simplify a bit)");
            }
        }
    }

    prompt
}

/// Build the user message for a scoring request.
pub fn scoring_user_prompt(request: &ScoringRequest) -> String {
    let language = request.language.display_name();
    format!(
        "Language: {language}\n\
         Level: {level}\n\
         Target phrase: \"{target}\"\n\
         User's transcription: \"{spoken}\"\n\n\
         IMPORTANT: Write ALL feedback text (overallFeedback, encouragement, focusArea, issue, tip) in {language}. The JSON keys must stay in English, but all human-readable values must be in {language}.\n\n\
         Please analyze the pronunciation attempt and provide detailed feedback.",
        level = request.level.as_str(),
        target = request.target_phrase,
        spoken = request.user_transcription,
    )
}
