//! Estimation Handler
//!
//! Thin boundary over the pure estimator: loads a catalog snapshot and
//! hands the request through.

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::db::models::ProjectType;
use crate::db::repository::MaterialRepository;
use crate::estimate::{CatalogSnapshot, estimate_cost};
use crate::utils::AppError;
use shared::estimate::{EstimateRequest, EstimateResponse};

/// POST /api/estimate - public cost estimation
pub async fn estimate(
    State(state): State<ServerState>,
    Json(req): Json<EstimateRequest>,
) -> Result<Json<EstimateResponse>, AppError> {
    if req.project_type.trim().is_empty() {
        return Err(AppError::validation("project_type is required".to_string()));
    }
    let project_type = ProjectType::from(req.project_type.as_str());

    let repo = MaterialRepository::new(state.get_db());
    let catalog = CatalogSnapshot::new(repo.find_all(None).await?);

    let response = estimate_cost(&project_type, &req.materials, req.size.as_deref(), &catalog);
    Ok(Json(response))
}
