//! Staged image serving
//!
//! Serves files staged by the submission workflow under `/api/image/`.

use axum::{
    Router,
    body::Body,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};

use crate::core::ServerState;
use crate::utils::AppError;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/image/{filename}", get(serve))
}

async fn serve(
    State(state): State<ServerState>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    let path = state
        .image_store
        .path_for(&filename)
        .ok_or_else(|| AppError::not_found(format!("Image {}", filename)))?;

    let data = tokio::fs::read(&path)
        .await
        .map_err(|e| AppError::internal(format!("Failed to read image: {}", e)))?;

    let mime = mime_guess::from_path(&path).first_or_octet_stream();

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, mime.to_string())],
        Body::from(data),
    )
        .into_response())
}
