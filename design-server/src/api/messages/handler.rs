//! Contact Message Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{ContactMessage, ContactMessageCreate};
use crate::db::repository::MessageRepository;
use crate::utils::AppError;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_email, validate_optional_text,
    validate_required_text,
};

/// POST /api/messages - public contact form
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ContactMessageCreate>,
) -> Result<Json<ContactMessage>, AppError> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_email(&payload.email)?;
    validate_optional_text(&payload.subject, "subject", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.message, "message", MAX_NOTE_LEN)?;

    let repo = MessageRepository::new(state.get_db());
    let message = repo.create(payload).await?;

    tracing::info!(
        from = %message.email,
        subscribed = message.subscribed,
        "Contact message received"
    );

    Ok(Json(message))
}

/// GET /api/messages - admin inbox, newest first
pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<ContactMessage>>, AppError> {
    let repo = MessageRepository::new(state.get_db());
    let messages = repo.find_all().await?;
    Ok(Json(messages))
}

/// PUT /api/messages/:id/read - admin only
pub async fn mark_read(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<ContactMessage>, AppError> {
    let repo = MessageRepository::new(state.get_db());
    let message = repo.mark_read(&id).await?;
    Ok(Json(message))
}
