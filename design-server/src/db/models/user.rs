//! User Model

use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::client::UserInfo;
use surrealdb::RecordId;

/// User ID type
pub type UserId = RecordId;

/// Closed role set, validated at the data-model boundary.
///
/// Unknown or empty stored values deserialize to [`Role::Cliente`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Disenador,
    #[default]
    #[serde(other)]
    Cliente,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Cliente => "cliente",
            Role::Disenador => "disenador",
        }
    }

    /// Parse a role string; unknown values are rejected (privileged updates
    /// must name a real role, unlike lenient storage reads).
    pub fn parse_strict(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(Role::Admin),
            "cliente" => Some(Role::Cliente),
            "disenador" => Some(Role::Disenador),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User model matching the SurrealDB schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<UserId>,
    pub username: String,
    #[serde(skip_serializing)]
    pub hash_pass: String,
    pub email: String,
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_professional: bool,
    #[serde(
        default = "default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
    // Payment provider references (set by billing tooling, never required)
    pub stripe_customer_id: Option<String>,
    pub stripe_subscription_id: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Create user payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreate {
    pub username: String,
    pub password: String,
    pub email: String,
    pub full_name: Option<String>,
    #[serde(default)]
    pub is_professional: bool,
    /// Only honored for privileged callers; defaults to Cliente
    pub role: Option<Role>,
}

/// Update user payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Role changes are privileged; enforced at the handler boundary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_professional: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stripe_customer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stripe_subscription_id: Option<String>,
}

impl User {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.hash_pass)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }

    /// Public view of this user (no credentials)
    pub fn to_info(&self) -> UserInfo {
        UserInfo {
            id: self.id.as_ref().map(|t| t.to_string()).unwrap_or_default(),
            username: self.username.clone(),
            email: self.email.clone(),
            full_name: self.full_name.clone(),
            role: self.role.as_str().to_string(),
            is_professional: self.is_professional,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trip() {
        for (role, s) in [
            (Role::Admin, "\"admin\""),
            (Role::Cliente, "\"cliente\""),
            (Role::Disenador, "\"disenador\""),
        ] {
            assert_eq!(serde_json::to_string(&role).unwrap(), s);
            assert_eq!(serde_json::from_str::<Role>(s).unwrap(), role);
        }
    }

    #[test]
    fn unknown_role_falls_back_to_cliente() {
        let role: Role = serde_json::from_str("\"superuser\"").unwrap();
        assert_eq!(role, Role::Cliente);
        assert_eq!(Role::parse_strict("superuser"), None);
    }

    #[test]
    fn password_hash_and_verify() {
        let hash = User::hash_password("hunter2-segura").unwrap();
        let user = User {
            id: None,
            username: "ana".into(),
            hash_pass: hash,
            email: "ana@example.com".into(),
            full_name: None,
            role: Role::Cliente,
            is_professional: false,
            is_active: true,
            created_at: None,
            stripe_customer_id: None,
            stripe_subscription_id: None,
        };
        assert!(user.verify_password("hunter2-segura").unwrap());
        assert!(!user.verify_password("wrong").unwrap());
    }
}
