//! Shared error mapping for the SQLite persistence layer

use application::error::ApplicationError;

/// Map a rusqlite error to an application-layer storage error
pub fn map_sqlite_error(e: rusqlite::Error) -> ApplicationError {
    ApplicationError::Storage(e.to_string())
}

/// Map a pool checkout failure
pub fn map_pool_error(e: r2d2::Error) -> ApplicationError {
    ApplicationError::Storage(format!("Failed to get database connection: {e}"))
}

/// Map a failed blocking task
pub fn map_join_error(e: tokio::task::JoinError) -> ApplicationError {
    ApplicationError::Internal(format!("Database task failed: {e}"))
}
