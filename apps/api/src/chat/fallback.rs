//! Canned responses substituted whenever the live model path is unavailable.
//!
//! Nothing here calls a provider. Each value is fixed so callers (and tests)
//! can compare against it exactly.

use crate::screening::ResumeAnalysisResult;

/// Shown when a configured provider fails at runtime.
pub const APOLOGY_MESSAGE: &str =
    "Sorry, I am having trouble connecting right now. Please try again later.";

/// Returned when the chat-completions vendor answers without any choices.
pub const COULD_NOT_GENERATE_MESSAGE: &str = "Sorry, I could not generate a response.";

/// Shown when no provider credential is configured at all.
pub fn no_provider_message(support_email: &str) -> String {
    format!(
        "Our AI assistant isn't configured yet. Please add a GEMINI_API_KEY or \
         OPENAI_API_KEY to enable live answers, or email us at {support_email} \
         and our team will get back to you."
    )
}

pub fn fallback_interview_questions() -> Vec<String> {
    [
        "Can you walk me through a recent project you are proud of and your specific role in it?",
        "How do you approach debugging a problem you have never seen before?",
        "Describe a time you had to make a trade-off between speed and quality. What did you decide?",
        "How do you keep your technical skills current?",
        "Tell me about a disagreement with a teammate and how you resolved it.",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

pub fn fallback_resume_analysis() -> ResumeAnalysisResult {
    ResumeAnalysisResult {
        score: 70,
        strengths: vec![
            "Relevant technical experience".to_string(),
            "Solid educational background".to_string(),
            "Demonstrated problem-solving skills".to_string(),
        ],
        weaknesses: vec![
            "Limited leadership experience".to_string(),
            "Could highlight more quantifiable achievements".to_string(),
        ],
        recommendation: "Consider for next round".to_string(),
    }
}
