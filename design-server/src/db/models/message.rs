//! Contact Message Model

use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Contact-form submission. Write-once from the public form; only the
/// read flag is mutated afterwards, by admins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessage {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_read: bool,
    /// Newsletter opt-in from the form
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub subscribed: bool,
}

/// Create message payload (public endpoint, no auth)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessageCreate {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
    #[serde(default)]
    pub subscribed: bool,
}
