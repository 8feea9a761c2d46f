//! HTTP adapter for the task inbox.
//!
//! # Responsibility
//! - Expose the core task service as a JSON REST API.
//! - Map core errors to HTTP status codes and `{ "error": ... }` bodies.
//!
//! # Invariants
//! - Handlers never mutate state except through `TaskService`.
//! - Every error response carries a JSON body with an `error` field.

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::ApiError;
pub use routes::create_router;
pub use server::{run, serve};
pub use state::AppState;
