//! Quote Repository
//!
//! Status transition legality is decided by [`crate::quotes`]; this
//! repository only persists the outcome.

use super::{BaseRepository, RepoError, RepoResult, parse_id};
use crate::db::models::{Quote, QuoteCreate, QuoteStatus};
use crate::quotes;
use chrono::Utc;
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "quote";

#[derive(Clone)]
pub struct QuoteRepository {
    base: BaseRepository,
}

impl QuoteRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find quote by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Quote>> {
        let thing = parse_id(TABLE, id)?;
        let quote: Option<Quote> = self.base.db().select(thing).await?;
        Ok(quote)
    }

    /// Quotes for one owner, most recent first, optionally filtered by status
    pub async fn find_by_user(
        &self,
        user_id: &str,
        status: Option<QuoteStatus>,
    ) -> RepoResult<Vec<Quote>> {
        // user_id is stored in its string form; bind the normalized string
        let owner = parse_id("user", user_id)?.to_string();
        let quotes: Vec<Quote> = match status {
            Some(s) => {
                self.base
                    .db()
                    .query("SELECT * FROM quote WHERE user_id = $owner AND status = $status ORDER BY created_at DESC")
                    .bind(("owner", owner))
                    .bind(("status", s))
                    .await?
                    .take(0)?
            }
            None => {
                self.base
                    .db()
                    .query("SELECT * FROM quote WHERE user_id = $owner ORDER BY created_at DESC")
                    .bind(("owner", owner))
                    .await?
                    .take(0)?
            }
        };
        Ok(quotes)
    }

    /// All quotes, most recent first (staff view)
    pub async fn find_all(&self, status: Option<QuoteStatus>) -> RepoResult<Vec<Quote>> {
        let quotes: Vec<Quote> = match status {
            Some(s) => {
                self.base
                    .db()
                    .query("SELECT * FROM quote WHERE status = $status ORDER BY created_at DESC")
                    .bind(("status", s))
                    .await?
                    .take(0)?
            }
            None => {
                self.base
                    .db()
                    .query("SELECT * FROM quote ORDER BY created_at DESC")
                    .await?
                    .take(0)?
            }
        };
        Ok(quotes)
    }

    /// Create a quote. Always starts Pending; `fecha_solicitud` defaults to
    /// now; user/project references, when present, must resolve.
    pub async fn create(&self, data: QuoteCreate) -> RepoResult<Quote> {
        if data.details.tipo.trim().is_empty() {
            return Err(RepoError::Validation(
                "details.tipo must not be empty".to_string(),
            ));
        }
        if data.details.datos.is_null() {
            return Err(RepoError::Validation(
                "details.datos is required".to_string(),
            ));
        }
        if let Some(total) = data.total_cost
            && total < 0
        {
            return Err(RepoError::Validation(format!(
                "total_cost must be non-negative, got {total}"
            )));
        }

        let user_id = match data.user_id {
            Some(ref id) => Some(self.resolve_ref("user", id).await?),
            None => None,
        };
        let project_id = match data.project_id {
            Some(ref id) => Some(self.resolve_ref("project", id).await?),
            None => None,
        };

        let mut details = data.details;
        if details.fecha_solicitud.is_none() {
            details.fecha_solicitud = Some(Utc::now());
        }

        let quote = Quote {
            id: None,
            user_id,
            project_id,
            status: QuoteStatus::Pending,
            details,
            total_cost: data.total_cost,
            created_at: Some(Utc::now()),
        };

        let created: Option<Quote> = self.base.db().create(TABLE).content(quote).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create quote".to_string()))
    }

    /// Apply a status transition. Illegal transitions are rejected before
    /// any write happens.
    pub async fn update_status(&self, id: &str, new_status: QuoteStatus) -> RepoResult<Quote> {
        let thing = parse_id(TABLE, id)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Quote {} not found", id)))?;

        quotes::check_transition(existing.status, new_status)
            .map_err(|e| RepoError::InvalidTransition(e.to_string()))?;

        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET status = $status RETURN AFTER")
            .bind(("thing", thing))
            .bind(("status", new_status))
            .await?;

        result
            .take::<Option<Quote>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Quote {} not found", id)))
    }

    /// Resolve and verify a foreign reference
    async fn resolve_ref(&self, table: &str, id: &str) -> RepoResult<RecordId> {
        let thing = parse_id(table, id)?;
        let exists: Option<serde_json::Value> = self.base.db().select(thing.clone()).await?;
        if exists.is_none() {
            return Err(RepoError::Validation(format!(
                "{} {} does not exist",
                table, id
            )));
        }
        Ok(thing)
    }
}
