//! Router construction.

use crate::handlers;
use crate::middleware::log_requests;
use crate::state::AppState;
use axum::middleware::from_fn;
use axum::routing::{get, patch};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

/// Builds the API router over the given state.
///
/// Routes:
/// - `GET /health`
/// - `GET /tasks`, `POST /tasks`
/// - `PATCH /tasks/{id}`, `DELETE /tasks/{id}`
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/tasks",
            get(handlers::list_tasks).post(handlers::create_task),
        )
        .route(
            "/tasks/{id}",
            patch(handlers::update_task).delete(handlers::delete_task),
        )
        .layer(from_fn(log_requests))
        .layer(create_cors_layer())
        .with_state(state)
}

/// Any origin, method and header; no credentials.
fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
