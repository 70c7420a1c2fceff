//! API route modules
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`auth`] - registration, login, current user
//! - [`designs`] - design submission workflow (image + analysis)
//! - [`projects`] - project management
//! - [`quotes`] - quote creation, listing and status lifecycle
//! - [`materials`] - catalog read + admin write
//! - [`distributors`] - catalog read + admin write
//! - [`messages`] - public contact form + admin inbox
//! - [`estimate`] - cost estimation
//! - [`chat`] - AI assistant passthrough
//! - [`image`] - staged image serving

pub mod auth;
pub mod chat;
pub mod designs;
pub mod distributors;
pub mod estimate;
pub mod health;
pub mod image;
pub mod materials;
pub mod messages;
pub mod projects;
pub mod quotes;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResponse, AppResult};
