//! Authentication Handlers
//!
//! Registration, login and current-user lookup.

use std::time::Duration;

use axum::{Json, extract::State};

use crate::AppError;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::UserCreate;
use crate::db::repository::UserRepository;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_USERNAME_LEN, validate_email, validate_optional_text, validate_password,
    validate_required_text,
};

// Re-use shared DTOs for API consistency
use shared::client::{LoginRequest, LoginResponse, RegisterRequest, UserInfo};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// POST /api/auth/register - public sign-up
///
/// The role is always Cliente here; privileged role assignment is a
/// separate admin operation.
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    validate_required_text(&req.username, "username", MAX_USERNAME_LEN)?;
    validate_email(&req.email)?;
    validate_password(&req.password)?;
    validate_optional_text(&req.full_name, "full_name", MAX_NAME_LEN)?;

    let users = UserRepository::new(state.get_db());
    let user = users
        .create(UserCreate {
            username: req.username,
            password: req.password,
            email: req.email,
            full_name: req.full_name,
            is_professional: req.is_professional,
            role: None,
        })
        .await?;

    let user_id = user.id.as_ref().map(|t| t.to_string()).unwrap_or_default();
    let token = state
        .get_jwt_service()
        .generate_token(&user_id, &user.username, &user.email, user.role)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(user_id = %user_id, username = %user.username, "User registered");

    Ok(Json(LoginResponse {
        token,
        user: user.to_info(),
    }))
}

/// POST /api/auth/login
///
/// Authenticates credentials and returns a JWT token.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let users = UserRepository::new(state.get_db());
    let user = users.find_by_username(&req.username).await?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Unified error message to prevent username enumeration
    let user = match user {
        Some(u) => {
            if !u.is_active {
                return Err(AppError::forbidden("Account has been disabled".to_string()));
            }

            let password_valid = u
                .verify_password(&req.password)
                .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;

            if !password_valid {
                tracing::warn!(username = %req.username, "Login failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }

            u
        }
        None => {
            tracing::warn!(username = %req.username, "Login failed - user not found");
            return Err(AppError::invalid_credentials());
        }
    };

    let user_id = user.id.as_ref().map(|t| t.to_string()).unwrap_or_default();
    let token = state
        .get_jwt_service()
        .generate_token(&user_id, &user.username, &user.email, user.role)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(
        user_id = %user_id,
        username = %user.username,
        role = %user.role,
        "User logged in successfully"
    );

    Ok(Json(LoginResponse {
        token,
        user: user.to_info(),
    }))
}

/// GET /api/auth/me - current identity
pub async fn me(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> Result<Json<UserInfo>, AppError> {
    let users = UserRepository::new(state.get_db());
    let stored = users
        .find_by_id(&user.id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {}", user.id)))?;
    Ok(Json(stored.to_info()))
}
