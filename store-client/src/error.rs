//! Client error types

use thiserror::Error;

/// Errors returned by the store client
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure (connection refused, timeout, bad TLS, ...)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// 404 from the server
    #[error("Not found: {0}")]
    NotFound(String),

    /// 409 from the server (duplicate email, duplicate category name)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// 400 from the server (malformed fields, empty order, ...)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Stock check failed during checkout; the message names the product
    #[error("Insufficient stock: {0}")]
    InsufficientStock(String),

    /// Anything 5xx
    #[error("Server error: {0}")]
    Server(String),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
