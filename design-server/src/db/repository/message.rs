//! Contact Message Repository

use super::{BaseRepository, RepoError, RepoResult, parse_id};
use crate::db::models::{ContactMessage, ContactMessageCreate};
use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "message";

#[derive(Clone)]
pub struct MessageRepository {
    base: BaseRepository,
}

impl MessageRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Store a contact-form submission (public, no auth)
    pub async fn create(&self, data: ContactMessageCreate) -> RepoResult<ContactMessage> {
        let message = ContactMessage {
            id: None,
            name: data.name,
            email: data.email,
            subject: data.subject,
            message: data.message,
            created_at: Some(Utc::now()),
            is_read: false,
            subscribed: data.subscribed,
        };

        let created: Option<ContactMessage> =
            self.base.db().create(TABLE).content(message).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create message".to_string()))
    }

    /// All messages, newest first (admin view)
    pub async fn find_all(&self) -> RepoResult<Vec<ContactMessage>> {
        let messages: Vec<ContactMessage> = self
            .base
            .db()
            .query("SELECT * FROM message ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(messages)
    }

    /// Mark a message as read
    pub async fn mark_read(&self, id: &str) -> RepoResult<ContactMessage> {
        let thing = parse_id(TABLE, id)?;
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET is_read = true RETURN AFTER")
            .bind(("thing", thing))
            .await?;

        result
            .take::<Option<ContactMessage>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Message {} not found", id)))
    }
}
