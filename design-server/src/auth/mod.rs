//! Authentication and authorization
//!
//! JWT bearer auth (jsonwebtoken + argon2-hashed credentials) and
//! role gating. The per-request identity is a [`CurrentUser`] context
//! object built once by the extractor from validated claims and passed
//! down; nothing reads a mutable ambient session.

pub mod extractor;
pub mod jwt;
pub mod middleware;

pub use extractor::MaybeUser;
pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_auth, require_roles};
