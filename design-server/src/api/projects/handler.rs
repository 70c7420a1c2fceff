//! Project API Handlers
//!
//! Projects are private: the owner and staff see them, nobody else.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Project, ProjectUpdate};
use crate::db::repository::ProjectRepository;
use crate::utils::AppError;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_amount, validate_optional_text,
};

#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Admin-only: list another user's projects
    pub user_id: Option<String>,
}

/// GET /api/projects - own projects (admins may pass ?user_id=)
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Project>>, AppError> {
    let owner = match params.user_id {
        Some(other) if user.is_admin() => other,
        Some(_) => {
            return Err(AppError::forbidden(
                "only admins may list other users' projects".to_string(),
            ));
        }
        None => user.id.clone(),
    };

    let repo = ProjectRepository::new(state.get_db());
    let projects = repo.find_by_user(&owner).await?;
    Ok(Json(projects))
}

/// GET /api/projects/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<Project>, AppError> {
    let repo = ProjectRepository::new(state.get_db());
    let project = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Project {}", id)))?;

    check_access(&project, &user)?;
    Ok(Json(project))
}

/// PUT /api/projects/:id - owner or admin
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<ProjectUpdate>,
) -> Result<Json<Project>, AppError> {
    validate_optional_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.status, "status", MAX_SHORT_TEXT_LEN)?;
    if let Some(cost) = payload.cost {
        validate_amount(cost, "cost")?;
    }

    let repo = ProjectRepository::new(state.get_db());
    let project = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Project {}", id)))?;
    check_access(&project, &user)?;

    let updated = repo.update(&id, payload).await?;
    Ok(Json(updated))
}

/// Owner-or-admin gate
fn check_access(project: &Project, user: &CurrentUser) -> Result<(), AppError> {
    if user.is_admin() || project.user_id.to_string() == user.id {
        Ok(())
    } else {
        Err(AppError::forbidden(
            "project belongs to another user".to_string(),
        ))
    }
}
