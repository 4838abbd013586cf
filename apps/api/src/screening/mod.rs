// Screening tools: structured extraction on top of the chat dispatcher.
// Both operations always return a populated value; failures fall back to
// the fixed answers in chat::fallback.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod handlers;
pub mod interview;
pub mod prompts;
pub mod resume_match;

pub use interview::generate_interview_questions;
pub use resume_match::analyze_resume;

/// Typed result of a resume vs job description comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeAnalysisResult {
    pub score: u8, // 0 – 100
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendation: String,
}

/// Why a model reply could not be turned into a typed result.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("reply contained no usable lines")]
    NoQuestions,

    #[error("reply contained no JSON object")]
    NoJsonObject,

    #[error("JSON did not match the analysis schema: {0}")]
    Json(#[from] serde_json::Error),

    #[error("score is not a finite number")]
    InvalidScore,
}
