//! Design Server - backend for the renovation design studio
//!
//! # Architecture overview
//!
//! - **Database** (`db`): embedded SurrealDB entity store with per-entity
//!   repositories enforcing uniqueness and referential constraints
//! - **Auth** (`auth`): JWT + Argon2, role-gated routes
//! - **HTTP API** (`api`): RESTful surface consumed by the web frontend
//! - **Designs** (`designs`): image submission workflow (staging,
//!   transcoding boundary, AI analysis boundary)
//! - **Quotes** (`quotes`): centralized status state machine
//! - **Estimation** (`estimate`): pure catalog-driven cost derivation
//! - **Services** (`services`): external collaborators behind traits
//!
//! # Module structure
//!
//! ```text
//! design-server/src/
//! ├── core/          # config, state, server bootstrap
//! ├── auth/          # JWT auth, role gating
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # models + repositories
//! ├── designs/       # design submission workflow
//! ├── quotes/        # quote status state machine
//! ├── estimate/      # cost estimation
//! ├── services/      # analysis, transcoding, image store
//! └── utils/         # errors, logging, validation
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod designs;
pub mod estimate;
pub mod quotes;
pub mod services;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - structured fields on auth-relevant events
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
    ____            _
   / __ \___  _____(_)___ _____
  / / / / _ \/ ___/ / __ `/ __ \
 / /_/ /  __(__  ) / /_/ / / / /
/_____/\___/____/_/\__, /_/ /_/
   _____ __       /____/
  / ___// /___  ______/ (_)___
  \__ \/ __/ / / / __  / / __ \
 ___/ / /_/ /_/ / /_/ / / /_/ /
/____/\__/\__,_/\__,_/_/\____/
    "#
    );
}
