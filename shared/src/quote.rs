//! Quote contract types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Structured quote details.
///
/// `tipo` and `datos` are required at creation; `datos` stays a generic
/// payload because its shape depends on the quote kind (kitchen remodel,
/// window replacement, ...), while the surrounding fields are closed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuoteDetails {
    /// Quote kind, e.g. "cocina", "ventana"
    pub tipo: String,
    /// Kind-specific parameters (dimensions, selected materials, ...)
    pub datos: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    /// Defaults to submission time when absent in the request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fecha_solicitud: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comentarios: Option<String>,
}

/// Quote creation request (anonymous callers allowed)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteCreateRequest {
    /// Optional reference to an existing project
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    pub details: QuoteDetails,
    /// Total in the smallest currency unit, non-negative
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<i64>,
}

/// Status transition request (admin / disenador only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteStatusUpdateRequest {
    /// Target status: "approved", "rejected" or "completed"
    pub status: String,
}
