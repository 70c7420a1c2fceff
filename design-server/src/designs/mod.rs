//! Design Submission Workflow
//!
//! Turns a raw image + project type into a staged image URL, a project
//! record, and (on success) an attached analysis result:
//!
//! 1. validate payload (size, encoding), transcoding HEIC externally
//! 2. stage the JPEG and obtain a stable URL
//! 3. create or load the project, with the image URL set
//! 4. run the external analysis under a deadline
//! 5. attach analysis + derived materials list + cost estimate
//!
//! Staging is atomic relative to analysis: once step 3 finishes, no later
//! failure can lose the image or the project. Analysis failures surface as
//! a distinct error so the caller retries only that stage.

use dashmap::DashMap;
use std::time::Duration;

use crate::core::ServerState;
use crate::db::models::{Project, ProjectCreate, ProjectType, ProjectUpdate};
use crate::db::repository::{MaterialRepository, ProjectRepository};
use crate::estimate::{self, CatalogSnapshot};
use crate::services::{AnalysisError, ImageStore, TranscodeError};
use crate::utils::AppError;
use shared::design::{AnalysisResult, MaterialsList, MaterialsListItem};

/// Maximum accepted image payload (10 MB)
pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024;

// =============================================================================
// Payload sniffing
// =============================================================================

/// Accepted upload encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadFormat {
    Jpeg,
    Png,
    Heic,
}

/// Detect the payload encoding from magic bytes.
///
/// Extension and content-type headers lie; the bytes decide.
pub fn sniff_format(data: &[u8]) -> Option<UploadFormat> {
    if data.len() < 12 {
        return None;
    }
    if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some(UploadFormat::Jpeg);
    }
    if data.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
        return Some(UploadFormat::Png);
    }
    // ISO-BMFF: size(4) + "ftyp" + brand(4)
    if &data[4..8] == b"ftyp" {
        let brand: [u8; 4] = data[8..12].try_into().unwrap_or_default();
        if matches!(
            &brand,
            b"heic" | b"heix" | b"heif" | b"hevc" | b"mif1" | b"msf1"
        ) {
            return Some(UploadFormat::Heic);
        }
    }
    None
}

// =============================================================================
// In-flight tracking
// =============================================================================

/// Per-project submission generation counter.
///
/// A new submission bumps the project's generation; a completion whose
/// generation is stale was superseded and must not attach its result.
/// Dispatched external calls are never cancelled, only discarded.
#[derive(Debug, Default)]
pub struct InFlightAnalyses {
    generations: DashMap<String, u64>,
}

impl InFlightAnalyses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new submission for a project, returning its generation
    pub fn begin(&self, project_id: &str) -> u64 {
        let mut entry = self.generations.entry(project_id.to_string()).or_insert(0);
        *entry += 1;
        *entry
    }

    /// Whether the given generation is still the latest for the project
    pub fn is_current(&self, project_id: &str, generation: u64) -> bool {
        self.generations
            .get(project_id)
            .map(|g| *g == generation)
            .unwrap_or(false)
    }

    /// Drop tracking once the latest submission settled
    pub fn finish(&self, project_id: &str, generation: u64) {
        self.generations
            .remove_if(project_id, |_, g| *g == generation);
    }
}

// =============================================================================
// Workflow
// =============================================================================

/// Submission input, decoded from the multipart request by the handler
#[derive(Debug)]
pub struct SubmitDesign {
    pub data: Vec<u8>,
    pub project_type: ProjectType,
    /// Attach to an existing project instead of creating one
    pub project_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Run the submission workflow for an authenticated owner.
///
/// On analysis failure the staged image and project survive; the error
/// message carries the project id so the caller can retry analysis only.
pub async fn submit_design(
    state: &ServerState,
    owner_id: &str,
    is_privileged: bool,
    input: SubmitDesign,
) -> Result<Project, AppError> {
    // (1) payload constraints
    if input.data.len() > MAX_IMAGE_SIZE {
        return Err(AppError::PayloadTooLarge(format!(
            "image is {} bytes, maximum is {} bytes",
            input.data.len(),
            MAX_IMAGE_SIZE
        )));
    }
    let format = sniff_format(&input.data).ok_or_else(|| {
        AppError::UnsupportedFormat("accepted encodings: JPEG, PNG, HEIC/HEIF".to_string())
    })?;

    // HEIC is delegated to the transcoding collaborator; JPEG/PNG are
    // decoded locally. Either way the staged bytes are normalized JPEG.
    let decodable = match format {
        UploadFormat::Heic => state
            .transcoder
            .transcode_to_jpeg(&input.data)
            .await
            .map_err(|e| match e {
                TranscodeError::Timeout => {
                    AppError::TranscodeFailed("transcoding timed out".to_string())
                }
                other => AppError::TranscodeFailed(other.to_string()),
            })?,
        UploadFormat::Jpeg | UploadFormat::Png => input.data.clone(),
    };
    let (_, jpeg) = ImageStore::reencode_jpeg(&decodable)?;

    // (2) stage: from here on the image has a stable URL
    let staged = state.image_store.stage(&jpeg)?;

    // (3) create or load the project with the image URL attached
    let projects = ProjectRepository::new(state.get_db());
    let project = match input.project_id {
        Some(ref id) => {
            let existing = projects
                .find_by_id(id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Project {}", id)))?;
            check_owner(&existing, owner_id, is_privileged)?;
            projects
                .update(
                    id,
                    ProjectUpdate {
                        image_url: Some(staged.url.clone()),
                        ..Default::default()
                    },
                )
                .await?
        }
        None => {
            let name = input
                .name
                .unwrap_or_else(|| format!("Proyecto {}", input.project_type));
            projects
                .create(
                    owner_id,
                    ProjectCreate {
                        name,
                        description: input.description,
                        project_type: input.project_type.clone(),
                        image_url: Some(staged.url.clone()),
                    },
                )
                .await?
        }
    };

    let project_id = project
        .id
        .as_ref()
        .map(|t| t.to_string())
        .ok_or_else(|| AppError::internal("project created without id"))?;

    // (4) analysis under the configured deadline
    let generation = state.in_flight.begin(&project_id);
    let deadline = Duration::from_millis(state.config.analysis_timeout_ms);
    let analysis = tokio::time::timeout(
        deadline,
        state
            .analysis
            .analyze(&jpeg, "image/jpeg", &project.project_type),
    )
    .await;

    let analysis = match analysis {
        Ok(Ok(result)) => result,
        Ok(Err(e)) => {
            state.in_flight.finish(&project_id, generation);
            let reason = match e {
                AnalysisError::Timeout => "analysis timed out".to_string(),
                other => other.to_string(),
            };
            return Err(AppError::AnalysisFailed(format!(
                "{reason}; image staged at {} on project {project_id}, retry analysis only",
                staged.url
            )));
        }
        Err(_) => {
            state.in_flight.finish(&project_id, generation);
            return Err(AppError::AnalysisFailed(format!(
                "analysis timed out; image staged at {} on project {project_id}, retry analysis only",
                staged.url
            )));
        }
    };

    // (5) attach, unless a newer submission superseded this one or the
    // project disappeared meanwhile
    let attached = attach_if_current(state, &projects, &project_id, generation, analysis).await?;
    state.in_flight.finish(&project_id, generation);
    Ok(attached)
}

/// Attach the analysis to the project when this run is still the latest.
async fn attach_if_current(
    state: &ServerState,
    projects: &ProjectRepository,
    project_id: &str,
    generation: u64,
    analysis: AnalysisResult,
) -> Result<Project, AppError> {
    if !state.in_flight.is_current(project_id, generation) {
        tracing::info!(
            target: "designs",
            project = %project_id,
            "analysis result superseded by a newer submission, discarding"
        );
        return projects
            .find_by_id(project_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Project {}", project_id)));
    }

    let Some(current) = projects.find_by_id(project_id).await? else {
        tracing::warn!(
            target: "designs",
            project = %project_id,
            "project vanished before analysis completion, discarding result"
        );
        return Err(AppError::not_found(format!("Project {}", project_id)));
    };

    let materials = MaterialRepository::new(state.get_db());
    let catalog = CatalogSnapshot::new(materials.find_all(None).await?);
    let (materials_list, cost, delivery) =
        derive_materials_and_cost(&current.project_type, &analysis, &catalog);

    let attached = projects
        .attach_analysis(project_id, analysis, materials_list, cost, delivery)
        .await?;
    Ok(attached)
}

/// Map analysis material suggestions onto the catalog and derive the
/// project's cost estimate from the matches.
fn derive_materials_and_cost(
    project_type: &ProjectType,
    analysis: &AnalysisResult,
    catalog: &CatalogSnapshot,
) -> (MaterialsList, Option<i64>, Option<String>) {
    let mut items = Vec::new();
    let mut unmatched = Vec::new();
    let mut matched_ids = Vec::new();

    for name in &analysis.materials {
        match catalog.find_by_name(name) {
            Some(material) => {
                let id = material.id.as_ref().map(|t| t.key().to_string());
                if let Some(ref id) = id {
                    matched_ids.push(id.clone());
                }
                items.push(MaterialsListItem {
                    material_id: id,
                    name: material.name.clone(),
                    category: Some(material.category.clone()),
                    unit_price: Some(material.price),
                });
            }
            None => unmatched.push(name.clone()),
        }
    }

    let estimate = estimate::estimate_cost(project_type, &matched_ids, None, catalog);
    let midpoint = (estimate.estimated_cost.min + estimate.estimated_cost.max) / 2;

    (
        MaterialsList { items, unmatched },
        Some(midpoint),
        Some(estimate.time_frame),
    )
}

/// Owner-or-admin check for attaching to an existing project
fn check_owner(project: &Project, owner_id: &str, is_privileged: bool) -> Result<(), AppError> {
    if is_privileged {
        return Ok(());
    }
    let owner = project.user_id.to_string();
    let normalized = if owner_id.contains(':') {
        owner_id.to_string()
    } else {
        format!("user:{owner_id}")
    };
    if owner == normalized {
        Ok(())
    } else {
        Err(AppError::forbidden(
            "project belongs to another user".to_string(),
        ))
    }
}
