//! Axum route handlers for the chat widget.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::chat::fallback::no_provider_message;
use crate::chat::models::ConversationTurn;
use crate::errors::{require_field, AppError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// Optional system guidance for this one call. Not remembered.
    pub context: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: ConversationTurn,
    /// False when no provider is configured and the reply is the guidance message.
    pub configured: bool,
}

/// POST /api/v1/chat
///
/// Always answers with an assistant turn: a live reply, the apology message
/// on provider failure, or setup guidance when no provider is configured.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    require_field("message", &request.message)?;

    let context = request
        .context
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());

    let response = match &state.ai {
        Some(ai) => ChatResponse {
            reply: ConversationTurn::assistant(ai.chat(&request.message, context).await),
            configured: true,
        },
        None => ChatResponse {
            reply: ConversationTurn::assistant(no_provider_message(&state.config.support_email)),
            configured: false,
        },
    };

    Ok(Json(response))
}
