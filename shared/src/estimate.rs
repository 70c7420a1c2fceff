//! Cost estimation contract types

use serde::{Deserialize, Serialize};

/// Estimation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateRequest {
    /// Project type, e.g. "cocina", "puerta"
    pub project_type: String,
    /// Catalog material ids selected by the caller
    #[serde(default)]
    pub materials: Vec<String>,
    /// Free-form size, e.g. "12m2"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

/// Inclusive cost range in the smallest currency unit
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CostRange {
    pub min: i64,
    pub max: i64,
}

/// One component of the estimate breakdown
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BreakdownEntry {
    pub component: String,
    pub cost: i64,
}

/// Estimation response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EstimateResponse {
    pub estimated_cost: CostRange,
    /// Human-readable delivery window, e.g. "3-5 semanas"
    pub time_frame: String,
    pub breakdown: Vec<BreakdownEntry>,
    /// Material ids that were not found in the catalog and were skipped
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignored: Vec<String>,
}
