//! Distributor API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{Distributor, DistributorCreate, DistributorUpdate};
use crate::db::repository::DistributorRepository;
use crate::utils::AppError;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_email, validate_optional_text, validate_required_text,
};

/// GET /api/distributors
pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<Distributor>>, AppError> {
    let repo = DistributorRepository::new(state.get_db());
    let distributors = repo.find_all().await?;
    Ok(Json(distributors))
}

/// GET /api/distributors/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Distributor>, AppError> {
    let repo = DistributorRepository::new(state.get_db());
    let distributor = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Distributor {}", id)))?;
    Ok(Json(distributor))
}

/// POST /api/distributors - admin only
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<DistributorCreate>,
) -> Result<Json<Distributor>, AppError> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.location, "location", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_email(&payload.contact.email)?;

    let repo = DistributorRepository::new(state.get_db());
    let distributor = repo.create(payload).await?;
    Ok(Json(distributor))
}

/// PUT /api/distributors/:id - admin only
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<DistributorUpdate>,
) -> Result<Json<Distributor>, AppError> {
    validate_optional_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.location, "location", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    if let Some(ref contact) = payload.contact {
        validate_email(&contact.email)?;
    }

    let repo = DistributorRepository::new(state.get_db());
    let distributor = repo.update(&id, payload).await?;
    Ok(Json(distributor))
}

/// DELETE /api/distributors/:id - admin only, restricted while referenced
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<bool>, AppError> {
    let repo = DistributorRepository::new(state.get_db());
    repo.delete(&id).await?;
    Ok(Json(true))
}
