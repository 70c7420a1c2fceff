//! Project Model
//!
//! A user's in-progress design request for one renovation category.

use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::design::{AnalysisResult, MaterialsList};
use surrealdb::RecordId;

/// Project ID type
pub type ProjectId = RecordId;

/// Renovation categories. The closed variants cover the catalog the studio
/// actually sells; `Otro` keeps unknown categories readable instead of
/// failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Cocina,
    Puerta,
    Ventana,
    Gabinete,
    Piscina,
    Contenedor,
    #[serde(untagged)]
    Otro(String),
}

impl ProjectType {
    pub fn as_str(&self) -> &str {
        match self {
            ProjectType::Cocina => "cocina",
            ProjectType::Puerta => "puerta",
            ProjectType::Ventana => "ventana",
            ProjectType::Gabinete => "gabinete",
            ProjectType::Piscina => "piscina",
            ProjectType::Contenedor => "contenedor",
            ProjectType::Otro(s) => s.as_str(),
        }
    }
}

impl From<&str> for ProjectType {
    fn from(value: &str) -> Self {
        match value {
            "cocina" => ProjectType::Cocina,
            "puerta" => ProjectType::Puerta,
            "ventana" => ProjectType::Ventana,
            "gabinete" => ProjectType::Gabinete,
            "piscina" => ProjectType::Piscina,
            "contenedor" => ProjectType::Contenedor,
            other => ProjectType::Otro(other.to_string()),
        }
    }
}

impl std::fmt::Display for ProjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Project model matching the SurrealDB schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<ProjectId>,
    /// Owner; every project belongs to exactly one user
    #[serde(with = "serde_helpers::record_id")]
    pub user_id: RecordId,
    pub name: String,
    pub description: Option<String>,
    pub project_type: ProjectType,
    /// Free-text lifecycle tag ("draft", "en progreso", ...)
    #[serde(default = "default_status")]
    pub status: String,
    /// Estimated cost in the smallest currency unit
    pub cost: Option<i64>,
    pub estimated_delivery_time: Option<String>,
    pub image_url: Option<String>,
    /// Set only by a successful design submission run, never partially
    pub ai_analysis: Option<AnalysisResult>,
    pub materials_list: Option<MaterialsList>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_status() -> String {
    "draft".to_string()
}

/// Create project payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectCreate {
    pub name: String,
    pub description: Option<String>,
    pub project_type: ProjectType,
    pub image_url: Option<String>,
}

/// Update project payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProjectUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_delivery_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_type_round_trip() {
        let t: ProjectType = serde_json::from_str("\"cocina\"").unwrap();
        assert_eq!(t, ProjectType::Cocina);
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"cocina\"");
    }

    #[test]
    fn unknown_project_type_is_preserved() {
        let t: ProjectType = serde_json::from_str("\"pergola\"").unwrap();
        assert_eq!(t, ProjectType::Otro("pergola".to_string()));
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"pergola\"");
    }
}
