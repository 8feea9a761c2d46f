//! Client error taxonomy.

use thiserror::Error;

/// Failure of one client request. No variant implies a partial update.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server rejected the input (HTTP 400).
    #[error("request rejected: {0}")]
    Validation(String),
    /// The target task no longer exists on the server (HTTP 404).
    #[error("task not found: {0}")]
    NotFound(String),
    #[error("unexpected status {status}: {message}")]
    UnexpectedStatus { status: u16, message: String },
    /// Network failure or undecodable response.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
}
