//! Axum route handlers for the screening tools.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::chat::fallback::{fallback_interview_questions, fallback_resume_analysis};
use crate::errors::{require_field, AppError};
use crate::screening::{analyze_resume, generate_interview_questions, ResumeAnalysisResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct InterviewQuestionsRequest {
    pub role: String,
    pub years_experience: String,
}

#[derive(Debug, Serialize)]
pub struct InterviewQuestionsResponse {
    pub questions: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResumeAnalysisRequest {
    pub resume_text: String,
    pub job_description: String,
}

/// POST /api/v1/interview-questions
pub async fn handle_interview_questions(
    State(state): State<AppState>,
    Json(request): Json<InterviewQuestionsRequest>,
) -> Result<Json<InterviewQuestionsResponse>, AppError> {
    require_field("role", &request.role)?;
    require_field("years_experience", &request.years_experience)?;

    let questions = match &state.ai {
        Some(ai) => {
            generate_interview_questions(ai, request.role.trim(), request.years_experience.trim())
                .await
        }
        None => fallback_interview_questions(),
    };

    Ok(Json(InterviewQuestionsResponse { questions }))
}

/// POST /api/v1/resume-analysis
pub async fn handle_resume_analysis(
    State(state): State<AppState>,
    Json(request): Json<ResumeAnalysisRequest>,
) -> Result<Json<ResumeAnalysisResult>, AppError> {
    require_field("resume_text", &request.resume_text)?;
    require_field("job_description", &request.job_description)?;

    let analysis = match &state.ai {
        Some(ai) => analyze_resume(ai, &request.resume_text, &request.job_description).await,
        None => fallback_resume_analysis(),
    };

    Ok(Json(analysis))
}
