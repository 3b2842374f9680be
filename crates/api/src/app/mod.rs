//! HTTP application wiring (Axum router + session wiring).
//!
//! - `sessions.rs`: per-browser dataset cache
//! - `routes/`: HTTP routes + handlers
//! - `render/`: HTML page and SVG chart presenter
//! - `dto.rs`: query/response DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Router, routing::get};
use tower::ServiceBuilder;

use stockwatch_inventory::SeedSource;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod render;
pub mod routes;
pub mod sessions;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(seed: SeedSource, limits: sessions::SessionLimits) -> Router {
    let store = Arc::new(sessions::SessionStore::new(seed, limits));
    let session_state = middleware::SessionState { store };

    // Dashboard routes: every request is bound to a session.
    let dashboard = routes::router().layer(axum::middleware::from_fn_with_state(
        session_state,
        middleware::session_middleware,
    ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(dashboard)
        .layer(ServiceBuilder::new())
}
