use std::time::Duration;

use thiserror::Error;

/// Errors that can be propagated to callers of the library.
///
/// Session validation never produces one of these: it resolves to a
/// [`Status`](crate::session::Status) instead.
#[derive(Debug, Error)]
pub enum Error {
    /// The identity service rejected the credentials or the token.
    #[error("Authentication failed: {0}")]
    Authentication(String),
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// The identity service answered with a non-success status and no error body.
    #[error("Unexpected response status: {0}")]
    Status(u16),
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
    /// Writing the active session failed.
    #[error("Session store error: {0}")]
    SessionStore(String),
}
