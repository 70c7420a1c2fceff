//! Material API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{Material, MaterialCreate, MaterialUpdate};
use crate::db::repository::MaterialRepository;
use crate::utils::AppError;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, MAX_URL_LEN, validate_amount, validate_optional_text,
    validate_required_text,
};

#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Case-insensitive exact category match
    pub category: Option<String>,
}

/// GET /api/materials - list catalog, optionally by category
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Material>>, AppError> {
    let repo = MaterialRepository::new(state.get_db());
    let materials = repo.find_all(params.category.as_deref()).await?;
    Ok(Json(materials))
}

/// GET /api/materials/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Material>, AppError> {
    let repo = MaterialRepository::new(state.get_db());
    let material = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Material {}", id)))?;
    Ok(Json(material))
}

/// POST /api/materials - admin only
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MaterialCreate>,
) -> Result<Json<Material>, AppError> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.category, "category", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.material_type, "material_type", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.unit, "unit", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.image_url, "image_url", MAX_URL_LEN)?;
    validate_amount(payload.price, "price")?;

    let repo = MaterialRepository::new(state.get_db());
    let material = repo.create(payload).await?;
    Ok(Json(material))
}

/// PUT /api/materials/:id - admin only
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<MaterialUpdate>,
) -> Result<Json<Material>, AppError> {
    validate_optional_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.category, "category", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.image_url, "image_url", MAX_URL_LEN)?;
    if let Some(price) = payload.price {
        validate_amount(price, "price")?;
    }

    let repo = MaterialRepository::new(state.get_db());
    let material = repo.update(&id, payload).await?;
    Ok(Json(material))
}
