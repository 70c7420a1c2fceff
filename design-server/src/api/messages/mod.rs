//! Contact message API module

mod handler;

use axum::{Router, middleware, routing::post};

use crate::auth::require_roles;
use crate::core::ServerState;
use crate::db::models::Role;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/messages", routes())
}

fn routes() -> Router<ServerState> {
    // The public contact form writes here without auth
    let public_routes = Router::new().route("/", post(handler::create));

    // Inbox routes: admin only
    let admin_routes = Router::new()
        .route("/", axum::routing::get(handler::list))
        .route("/{id}/read", axum::routing::put(handler::mark_read))
        .layer(middleware::from_fn(require_roles(&[Role::Admin])));

    public_routes.merge(admin_routes)
}
