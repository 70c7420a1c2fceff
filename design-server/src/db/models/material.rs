//! Material Model (catalog entry)

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Material ID type
pub type MaterialId = RecordId;

/// Catalog availability state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    #[default]
    Available,
    Limited,
    Unavailable,
}

/// Material catalog entry. Read-mostly; written by admin tooling only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<MaterialId>,
    pub name: String,
    pub category: String,
    pub material_type: String,
    pub color: Option<String>,
    pub finish: Option<String>,
    /// Pricing unit, e.g. "m2", "unidad", "metro lineal"
    pub unit: String,
    /// Price per unit in the smallest currency unit, non-negative
    pub price: i64,
    #[serde(default)]
    pub availability: Availability,
    /// Weak reference; the distributor may be absent
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub distributor_id: Option<RecordId>,
    pub image_url: Option<String>,
}

/// Create material payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialCreate {
    pub name: String,
    pub category: String,
    pub material_type: String,
    pub color: Option<String>,
    pub finish: Option<String>,
    pub unit: String,
    pub price: i64,
    #[serde(default)]
    pub availability: Availability,
    pub distributor_id: Option<String>,
    pub image_url: Option<String>,
}

/// Update material payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MaterialUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<Availability>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distributor_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}
