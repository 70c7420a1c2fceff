//! Quote API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::auth::{CurrentUser, MaybeUser};
use crate::core::ServerState;
use crate::db::models::{Quote, QuoteCreate, QuoteStatus, Role};
use crate::db::repository::QuoteRepository;
use crate::utils::AppError;
use shared::quote::{QuoteCreateRequest, QuoteStatusUpdateRequest};

/// POST /api/quotes - create a quote (anonymous allowed)
///
/// When a valid token accompanies the request the quote is attached to
/// that identity; otherwise `user_id` stays empty.
pub async fn create(
    State(state): State<ServerState>,
    MaybeUser(user): MaybeUser,
    Json(req): Json<QuoteCreateRequest>,
) -> Result<Json<Quote>, AppError> {
    let repo = QuoteRepository::new(state.get_db());
    let quote = repo
        .create(QuoteCreate {
            user_id: user.map(|u| u.id),
            project_id: req.project_id,
            details: req.details,
            total_cost: req.total_cost,
        })
        .await?;

    tracing::info!(
        quote_id = %quote.id.as_ref().map(|t| t.to_string()).unwrap_or_default(),
        tipo = %quote.details.tipo,
        "Quote created"
    );

    Ok(Json(quote))
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Filter to one status
    pub status: Option<String>,
    /// Staff-only: list another user's quotes (or all, with "all")
    pub user_id: Option<String>,
}

/// GET /api/quotes - own quotes, most recent first
///
/// Staff (admin/disenador) may pass `?user_id=<id>` or `?user_id=all`.
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Quote>>, AppError> {
    let status = match params.status {
        Some(ref s) => Some(
            QuoteStatus::parse(s)
                .ok_or_else(|| AppError::validation(format!("unknown status: {s}")))?,
        ),
        None => None,
    };

    let is_staff = user.has_any_role(&[Role::Admin, Role::Disenador]);
    let repo = QuoteRepository::new(state.get_db());

    let quotes = match params.user_id {
        Some(ref target) if is_staff => {
            if target == "all" {
                repo.find_all(status).await?
            } else {
                repo.find_by_user(target, status).await?
            }
        }
        Some(_) => {
            return Err(AppError::forbidden(
                "only staff may list other users' quotes".to_string(),
            ));
        }
        None => repo.find_by_user(&user.id, status).await?,
    };

    Ok(Json(quotes))
}

/// PUT /api/quotes/:id/status - staff-only transition
///
/// Legality is decided by the centralized state machine; the role gate
/// sits on the route.
pub async fn update_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(req): Json<QuoteStatusUpdateRequest>,
) -> Result<Json<Quote>, AppError> {
    let new_status = QuoteStatus::parse(&req.status)
        .ok_or_else(|| AppError::validation(format!("unknown status: {}", req.status)))?;

    let repo = QuoteRepository::new(state.get_db());
    let quote = repo.update_status(&id, new_status).await?;

    tracing::info!(
        quote_id = %id,
        status = %new_status,
        actor = %user.username,
        "Quote status updated"
    );

    Ok(Json(quote))
}
