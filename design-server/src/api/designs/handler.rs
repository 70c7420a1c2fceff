//! Design Submission Handler
//!
//! Accepts a multipart form (`file` + `project_type` and optional
//! `project_id`, `name`, `description`) and runs the submission workflow.

use axum::Json;
use axum::extract::{Multipart, State};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Project, ProjectType};
use crate::designs::{self, MAX_IMAGE_SIZE, SubmitDesign};
use crate::utils::AppError;
use crate::utils::validation::{MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text};

/// POST /api/designs - submit an image for analysis
pub async fn submit(
    State(state): State<ServerState>,
    user: CurrentUser,
    mut multipart: Multipart,
) -> Result<Json<Project>, AppError> {
    let mut data: Option<Vec<u8>> = None;
    let mut project_type: Option<ProjectType> = None;
    let mut project_id: Option<String> = None;
    let mut name: Option<String> = None;
    let mut description: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart request: {}", e)))?
    {
        match field.name().unwrap_or_default() {
            "file" => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Multipart error: {}", e)))?;
                if bytes.len() > MAX_IMAGE_SIZE {
                    // Surface the typed limit error before the workflow
                    return Err(AppError::PayloadTooLarge(format!(
                        "image is {} bytes, maximum is {} bytes",
                        bytes.len(),
                        MAX_IMAGE_SIZE
                    )));
                }
                data = Some(bytes.to_vec());
            }
            "project_type" => {
                let text = field.text().await?;
                project_type = Some(ProjectType::from(text.as_str()));
            }
            "project_id" => {
                project_id = Some(field.text().await?);
            }
            "name" => {
                name = Some(field.text().await?);
            }
            "description" => {
                description = Some(field.text().await?);
            }
            _ => {}
        }
    }

    let data =
        data.ok_or_else(|| AppError::validation("No 'file' field found".to_string()))?;
    if data.is_empty() {
        return Err(AppError::validation("Empty file provided".to_string()));
    }
    let project_type = project_type
        .ok_or_else(|| AppError::validation("'project_type' field is required".to_string()))?;
    validate_optional_text(&name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&description, "description", MAX_NOTE_LEN)?;

    let project = designs::submit_design(
        &state,
        &user.id,
        user.is_admin(),
        SubmitDesign {
            data,
            project_type,
            project_id,
            name,
            description,
        },
    )
    .await?;

    Ok(Json(project))
}
