//! AI Assistant Handler
//!
//! Passthrough to the analysis/chat collaborator. The service is opaque
//! and fallible; failures surface as AnalysisFailed so the widget can
//! offer a retry.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::services::{AnalysisError, ChatMessage};
use crate::utils::AppError;

const MAX_TURNS: usize = 50;

#[derive(Debug, Deserialize)]
pub struct ChatApiRequest {
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
pub struct ChatApiResponse {
    pub reply: String,
}

/// POST /api/chat - one assistant turn
pub async fn chat(
    State(state): State<ServerState>,
    Json(req): Json<ChatApiRequest>,
) -> Result<Json<ChatApiResponse>, AppError> {
    if req.messages.is_empty() {
        return Err(AppError::validation("messages must not be empty".to_string()));
    }
    if req.messages.len() > MAX_TURNS {
        return Err(AppError::validation(format!(
            "conversation too long (max {MAX_TURNS} turns)"
        )));
    }

    let reply = state.analysis.chat(&req.messages).await.map_err(|e| {
        let reason = match e {
            AnalysisError::Timeout => "assistant timed out".to_string(),
            other => other.to_string(),
        };
        AppError::AnalysisFailed(reason)
    })?;

    Ok(Json(ChatApiResponse { reply }))
}
