//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// External service error (weather provider)
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Rate limit exceeded by the weather provider
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Configuration error, including a missing storage handle
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Caller passed arguments the operation cannot work with
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Requested record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Storage or query failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
