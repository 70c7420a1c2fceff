//! Quote API module
//!
//! Creation is public (anonymous quotes are allowed); listing requires a
//! login; status transitions are restricted to staff roles.

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_roles;
use crate::core::ServerState;
use crate::db::models::Role;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/quotes", routes())
}

fn routes() -> Router<ServerState> {
    let open_routes = Router::new().route("/", get(handler::list).post(handler::create));

    // Lifecycle transitions: admin and disenador only
    let staff_routes = Router::new()
        .route("/{id}/status", axum::routing::put(handler::update_status))
        .layer(middleware::from_fn(require_roles(&[
            Role::Admin,
            Role::Disenador,
        ])));

    open_routes.merge(staff_routes)
}
