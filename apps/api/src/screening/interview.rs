//! Interview question generation.

use tracing::warn;

use crate::chat::fallback::fallback_interview_questions;
use crate::chat::AiService;
use crate::screening::prompts::{fill_template, INTERVIEW_QUESTIONS_PROMPT_TEMPLATE};
use crate::screening::ExtractionError;

pub const MAX_QUESTIONS: usize = 5;

/// Asks the model for five questions. On any failure the whole fixed list is
/// returned; a partial model answer is never mixed with fallback questions.
pub async fn generate_interview_questions(
    ai: &AiService,
    role: &str,
    years_experience: &str,
) -> Vec<String> {
    let prompt = fill_template(
        INTERVIEW_QUESTIONS_PROMPT_TEMPLATE,
        &[("{role}", role), ("{years_experience}", years_experience)],
    );

    let reply = match ai.complete(&prompt, None).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!("Interview question generation failed: {e}");
            return fallback_interview_questions();
        }
    };

    parse_questions(&reply).unwrap_or_else(|e| {
        warn!("Interview question extraction failed: {e}");
        fallback_interview_questions()
    })
}

/// Non-blank lines of the reply, at most `MAX_QUESTIONS` of them.
pub fn parse_questions(reply: &str) -> Result<Vec<String>, ExtractionError> {
    let questions: Vec<String> = reply
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(MAX_QUESTIONS)
        .map(String::from)
        .collect();

    if questions.is_empty() {
        return Err(ExtractionError::NoQuestions);
    }
    Ok(questions)
}
