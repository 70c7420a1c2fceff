//! Shared types for the design studio platform
//!
//! API contract types used between design-server and external callers
//! (web frontend, admin tooling). Keeping the request/response shapes in
//! one crate means the server and its consumers cannot drift apart.

pub mod client;
pub mod design;
pub mod estimate;
pub mod quote;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use client::{LoginRequest, LoginResponse, RegisterRequest, UserInfo};
pub use design::{AnalysisResult, MaterialsList, MaterialsListItem};
pub use estimate::{CostRange, EstimateRequest, EstimateResponse};
pub use quote::{QuoteCreateRequest, QuoteDetails, QuoteStatusUpdateRequest};
