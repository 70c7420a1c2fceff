//! Repository Module
//!
//! CRUD operations over the SurrealDB tables. Uniqueness and referential
//! constraints are enforced here, at write time.

pub mod distributor;
pub mod material;
pub mod message;
pub mod project;
pub mod quote;
pub mod user;

// Re-exports
pub use distributor::DistributorRepository;
pub use material::MaterialRepository;
pub use message::MessageRepository;
pub use project::ProjectRepository;
pub use quote::QuoteRepository;
pub use user::UserRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention: "table:id" strings at the API edge, RecordId internally
// =============================================================================
//
//   - parse: let id: RecordId = "project:abc".parse()?;
//   - create: RecordId::from_table_key("project", "abc")
//   - CRUD: db.select(id) / db.delete(id) take RecordId directly

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

/// Parse an id string into a RecordId, requiring a specific table.
///
/// Accepts both "table:key" and bare "key" forms. Full forms go through
/// RecordId's own parser so escaped keys round-trip correctly.
pub(crate) fn parse_id(table: &str, id: &str) -> RepoResult<surrealdb::RecordId> {
    if id.contains(':') {
        let rid: surrealdb::RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {id}")))?;
        if rid.table() != table {
            return Err(RepoError::Validation(format!("Invalid {table} ID: {id}")));
        }
        Ok(rid)
    } else {
        Ok(surrealdb::RecordId::from_table_key(table, id))
    }
}
