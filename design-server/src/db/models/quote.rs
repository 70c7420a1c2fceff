//! Quote Model
//!
//! Status semantics (which transitions are legal) live in [`crate::quotes`];
//! this file only defines the stored shape.

use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::quote::QuoteDetails;
use surrealdb::RecordId;

/// Quote ID type
pub type QuoteId = RecordId;

/// Quote status. `Pending` is the only initial state.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Completed,
}

impl QuoteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteStatus::Pending => "pending",
            QuoteStatus::Approved => "approved",
            QuoteStatus::Rejected => "rejected",
            QuoteStatus::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(QuoteStatus::Pending),
            "approved" => Some(QuoteStatus::Approved),
            "rejected" => Some(QuoteStatus::Rejected),
            "completed" => Some(QuoteStatus::Completed),
            _ => None,
        }
    }
}

impl std::fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Quote entity. `user_id` is nullable: anonymous quotes are allowed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<QuoteId>,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub user_id: Option<RecordId>,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub project_id: Option<RecordId>,
    #[serde(default)]
    pub status: QuoteStatus,
    pub details: QuoteDetails,
    /// Total in the smallest currency unit, non-negative
    pub total_cost: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Create quote payload (repository-level; identity resolved by the handler)
#[derive(Debug, Clone)]
pub struct QuoteCreate {
    /// "user:..." id string when the caller is authenticated
    pub user_id: Option<String>,
    /// "project:..." id string when quoting an existing project
    pub project_id: Option<String>,
    pub details: QuoteDetails,
    pub total_cost: Option<i64>,
}
