pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::chat::handlers as chat;
use crate::screening::handlers as screening;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Chat widget
        .route("/api/v1/chat", post(chat::handle_chat))
        // Screening tools
        .route(
            "/api/v1/interview-questions",
            post(screening::handle_interview_questions),
        )
        .route(
            "/api/v1/resume-analysis",
            post(screening::handle_resume_analysis),
        )
        .with_state(state)
}
