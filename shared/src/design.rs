//! Design analysis contract types
//!
//! Structured output of the AI analysis collaborator, attached to a project
//! once a submission run completes. These are closed types with a generic
//! `extra` fallback so new analysis fields do not break older callers.

use serde::{Deserialize, Serialize};

/// Structured result of an image analysis run.
///
/// Only ever attached to a project as a whole: either the full result is
/// present or the field is absent, never a partial mix.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisResult {
    /// Free-form description of the analyzed space
    pub description: String,
    /// Detected style, e.g. "moderno", "rustico"
    pub style: String,
    /// Material names the analysis recognized or suggests
    pub materials: Vec<String>,
    /// Dominant color palette
    pub colors: Vec<String>,
    /// Concrete renovation recommendations
    pub recommendations: Vec<String>,
    /// Forward-compatibility: fields this version does not model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<serde_json::Value>,
}

/// One line of a project's derived materials list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaterialsListItem {
    /// Catalog material id when the suggestion matched the catalog
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material_id: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Unit price in the smallest currency unit, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<i64>,
}

/// Materials list derived from an analysis run against the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MaterialsList {
    pub items: Vec<MaterialsListItem>,
    /// Suggested material names that did not match any catalog entry
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unmatched: Vec<String>,
}
