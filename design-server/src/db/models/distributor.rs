//! Distributor Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Distributor ID type
pub type DistributorId = RecordId;

/// Contact details for a distributor
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ContactInfo {
    pub phone: String,
    pub email: String,
}

/// Distributor entity. Materials hold a weak reference to it; deleting a
/// distributor that is still referenced is rejected (restrict-delete).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Distributor {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<DistributorId>,
    pub name: String,
    pub location: String,
    pub description: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
    pub image_url: Option<String>,
    #[serde(default)]
    pub contact: ContactInfo,
}

fn default_status() -> String {
    "active".to_string()
}

/// Create distributor payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistributorCreate {
    pub name: String,
    pub location: String,
    pub description: Option<String>,
    pub status: Option<String>,
    pub image_url: Option<String>,
    pub contact: ContactInfo,
}

/// Update distributor payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DistributorUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<ContactInfo>,
}
