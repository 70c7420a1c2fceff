//! Server Implementation
//!
//! HTTP server bootstrap and graceful shutdown.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::auth;
use crate::core::{Config, ServerState};
use crate::designs::MAX_IMAGE_SIZE;

/// Slack on top of the image limit for multipart framing overhead
const BODY_LIMIT: usize = MAX_IMAGE_SIZE + 2 * 1024 * 1024;

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with existing state (tests, embedded setups)
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    /// Build the full application router for a state
    pub fn build_router(state: ServerState) -> Router {
        Router::new()
            .merge(api::health::router())
            .merge(api::auth::router())
            .merge(api::designs::router())
            .merge(api::projects::router())
            .merge(api::quotes::router())
            .merge(api::materials::router())
            .merge(api::distributors::router())
            .merge(api::messages::router())
            .merge(api::estimate::router())
            .merge(api::chat::router())
            .merge(api::image::router())
            .layer(middleware::from_fn_with_state(
                state.clone(),
                auth::require_auth,
            ))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .layer(DefaultBodyLimit::max(BODY_LIMIT))
            .with_state(state)
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config).await,
        };

        let app = Self::build_router(state);

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        tracing::info!("Design server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Shutting down...");
            })
            .await?;

        Ok(())
    }
}
