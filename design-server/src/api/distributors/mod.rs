//! Distributor API module

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_roles;
use crate::core::ServerState;
use crate::db::models::Role;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/distributors", routes())
}

fn routes() -> Router<ServerState> {
    // Read routes: public
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id));

    // Manage routes: admin only; delete is restricted while any material
    // still references the distributor
    let manage_routes = Router::new()
        .route("/", axum::routing::post(handler::create))
        .route(
            "/{id}",
            axum::routing::put(handler::update).delete(handler::delete),
        )
        .layer(middleware::from_fn(require_roles(&[Role::Admin])));

    read_routes.merge(manage_routes)
}
