use axum::{
    Router,
    routing::{get, post},
};

pub mod dashboard;
pub mod system;

/// Router for all session-bound endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/", get(dashboard::page))
        .route("/regenerate", post(dashboard::regenerate_form))
        .route("/api/dashboard", get(dashboard::view_json))
        .route("/api/regenerate", post(dashboard::regenerate_json))
}
