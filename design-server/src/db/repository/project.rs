//! Project Repository

use super::{BaseRepository, RepoError, RepoResult, parse_id};
use crate::db::models::{Project, ProjectCreate, ProjectUpdate};
use chrono::Utc;
use shared::design::{AnalysisResult, MaterialsList};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "project";

#[derive(Clone)]
pub struct ProjectRepository {
    base: BaseRepository,
}

impl ProjectRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find project by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Project>> {
        let thing = parse_id(TABLE, id)?;
        let project: Option<Project> = self.base.db().select(thing).await?;
        Ok(project)
    }

    /// Find all projects owned by a user, most recent first
    pub async fn find_by_user(&self, user_id: &str) -> RepoResult<Vec<Project>> {
        // user_id is stored in its string form; bind the normalized string
        let owner = parse_id("user", user_id)?.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM project WHERE user_id = $owner ORDER BY created_at DESC")
            .bind(("owner", owner))
            .await?;
        let projects: Vec<Project> = result.take(0)?;
        Ok(projects)
    }

    /// Create a project for a user. The owner must exist.
    pub async fn create(&self, user_id: &str, data: ProjectCreate) -> RepoResult<Project> {
        let owner = parse_id("user", user_id)?;
        let owner_exists: Option<serde_json::Value> =
            self.base.db().select(owner.clone()).await?;
        if owner_exists.is_none() {
            return Err(RepoError::Validation(format!(
                "Owner {} does not exist",
                user_id
            )));
        }

        let now = Utc::now();
        let project = Project {
            id: None,
            user_id: owner,
            name: data.name,
            description: data.description,
            project_type: data.project_type,
            status: "draft".to_string(),
            cost: None,
            estimated_delivery_time: None,
            image_url: data.image_url,
            ai_analysis: None,
            materials_list: None,
            created_at: Some(now),
            updated_at: Some(now),
        };

        let created: Option<Project> = self.base.db().create(TABLE).content(project).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create project".to_string()))
    }

    /// Update a project; refreshes `updated_at`
    pub async fn update(&self, id: &str, data: ProjectUpdate) -> RepoResult<Project> {
        let thing = parse_id(TABLE, id)?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Project {} not found", id)))?;

        #[derive(serde::Serialize)]
        struct ProjectUpdateDb {
            #[serde(skip_serializing_if = "Option::is_none")]
            name: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            description: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            status: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            cost: Option<i64>,
            #[serde(skip_serializing_if = "Option::is_none")]
            estimated_delivery_time: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            image_url: Option<String>,
            updated_at: chrono::DateTime<Utc>,
        }

        let update_data = ProjectUpdateDb {
            name: data.name,
            description: data.description,
            status: data.status,
            cost: data.cost,
            estimated_delivery_time: data.estimated_delivery_time,
            image_url: data.image_url,
            updated_at: Utc::now(),
        };

        self.base
            .db()
            .query("UPDATE $thing MERGE $data")
            .bind(("thing", thing.clone()))
            .bind(("data", update_data))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Project {} not found", id)))
    }

    /// Attach a completed analysis run to a project in one statement.
    ///
    /// The analysis, the derived materials list and the cost estimate land
    /// together or not at all; a reader never observes a partial result.
    pub async fn attach_analysis(
        &self,
        id: &str,
        analysis: AnalysisResult,
        materials_list: MaterialsList,
        cost: Option<i64>,
        estimated_delivery_time: Option<String>,
    ) -> RepoResult<Project> {
        let thing = parse_id(TABLE, id)?;

        #[derive(serde::Serialize)]
        struct AnalysisPatch {
            ai_analysis: AnalysisResult,
            materials_list: MaterialsList,
            #[serde(skip_serializing_if = "Option::is_none")]
            cost: Option<i64>,
            #[serde(skip_serializing_if = "Option::is_none")]
            estimated_delivery_time: Option<String>,
            status: String,
            updated_at: chrono::DateTime<Utc>,
        }

        let patch = AnalysisPatch {
            ai_analysis: analysis,
            materials_list,
            cost,
            estimated_delivery_time,
            status: "analizado".to_string(),
            updated_at: Utc::now(),
        };

        let mut result = self
            .base
            .db()
            .query("UPDATE $thing MERGE $data RETURN AFTER")
            .bind(("thing", thing))
            .bind(("data", patch))
            .await?;

        result
            .take::<Option<Project>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Project {} not found", id)))
    }
}
