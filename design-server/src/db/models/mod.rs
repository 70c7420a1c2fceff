//! Database Models

// Serde helpers
pub mod serde_helpers;

// Identity
pub mod user;

// Design domain
pub mod project;
pub mod quote;

// Catalog
pub mod distributor;
pub mod material;

// Public site
pub mod message;

// Re-exports
pub use user::{Role, User, UserCreate, UserId, UserUpdate};
pub use project::{Project, ProjectCreate, ProjectId, ProjectType, ProjectUpdate};
pub use quote::{Quote, QuoteCreate, QuoteId, QuoteStatus};
pub use material::{Availability, Material, MaterialCreate, MaterialId, MaterialUpdate};
pub use distributor::{
    ContactInfo, Distributor, DistributorCreate, DistributorId, DistributorUpdate,
};
pub use message::{ContactMessage, ContactMessageCreate};
