//! User Repository

use super::{BaseRepository, RepoError, RepoResult, parse_id};
use crate::db::models::{Role, User, UserCreate, UserUpdate};
use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "user";

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find user by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        let thing = parse_id(TABLE, id)?;
        let user: Option<User> = self.base.db().select(thing).await?;
        Ok(user)
    }

    /// Find user by username
    pub async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let username_owned = username.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE username = $username LIMIT 1")
            .bind(("username", username_owned))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Create a new user. Duplicate usernames are rejected; the role
    /// defaults to Cliente unless a privileged caller set one.
    pub async fn create(&self, data: UserCreate) -> RepoResult<User> {
        if self.find_by_username(&data.username).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Username '{}' already exists",
                data.username
            )));
        }

        let hash_pass = User::hash_password(&data.password)
            .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?;

        let user = User {
            id: None,
            username: data.username,
            hash_pass,
            email: data.email,
            full_name: data.full_name,
            role: data.role.unwrap_or_default(),
            is_professional: data.is_professional,
            is_active: true,
            created_at: Some(Utc::now()),
            stripe_customer_id: None,
            stripe_subscription_id: None,
        };

        let created: Option<User> = self.base.db().create(TABLE).content(user).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    /// Update a user. Role changes are the caller's responsibility to gate.
    pub async fn update(&self, id: &str, data: UserUpdate) -> RepoResult<User> {
        let thing = parse_id(TABLE, id)?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))?;

        let hash_pass = match data.password {
            Some(ref password) => Some(
                User::hash_password(password)
                    .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?,
            ),
            None => None,
        };

        #[derive(serde::Serialize)]
        struct UserUpdateDb {
            #[serde(skip_serializing_if = "Option::is_none")]
            email: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            full_name: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            hash_pass: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            role: Option<Role>,
            #[serde(skip_serializing_if = "Option::is_none")]
            is_professional: Option<bool>,
            #[serde(skip_serializing_if = "Option::is_none")]
            is_active: Option<bool>,
            #[serde(skip_serializing_if = "Option::is_none")]
            stripe_customer_id: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            stripe_subscription_id: Option<String>,
        }

        let update_data = UserUpdateDb {
            email: data.email,
            full_name: data.full_name,
            hash_pass,
            role: data.role,
            is_professional: data.is_professional,
            is_active: data.is_active,
            stripe_customer_id: data.stripe_customer_id,
            stripe_subscription_id: data.stripe_subscription_id,
        };

        self.base
            .db()
            .query("UPDATE $thing MERGE $data")
            .bind(("thing", thing.clone()))
            .bind(("data", update_data))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))
    }

    /// Soft-delete: users are never removed, only deactivated
    pub async fn deactivate(&self, id: &str) -> RepoResult<User> {
        self.update(
            id,
            UserUpdate {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
    }

    /// Seed the bootstrap admin account if no admin exists yet.
    ///
    /// Returns the created user, or None when an admin was already present.
    pub async fn ensure_admin(&self, password: &str) -> RepoResult<Option<User>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE role = 'admin' LIMIT 1")
            .await?;
        let existing: Vec<User> = result.take(0)?;
        if !existing.is_empty() {
            return Ok(None);
        }

        let admin = self
            .create(UserCreate {
                username: "admin".to_string(),
                password: password.to_string(),
                email: "admin@localhost".to_string(),
                full_name: None,
                is_professional: false,
                role: Some(Role::Admin),
            })
            .await?;
        tracing::info!("Bootstrap admin account created");
        Ok(Some(admin))
    }
}
