//! Database health check port
//!
//! Lets the readiness endpoint probe storage without knowing it is SQLite.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::Serialize;

use crate::error::ApplicationError;

/// Database health information
#[derive(Debug, Clone, Serialize)]
pub struct DatabaseHealth {
    /// Whether the database is reachable and responding
    pub reachable: bool,
    /// Engine version, if it could be read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Open connections in the pool
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool_size: Option<u32>,
    /// Round trip of the probe query in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
}

impl DatabaseHealth {
    /// Reachable database with engine version
    #[must_use]
    pub fn healthy_with_version(version: impl Into<String>) -> Self {
        Self {
            reachable: true,
            version: Some(version.into()),
            pool_size: None,
            response_time_ms: None,
        }
    }

    /// Unreachable database
    #[must_use]
    pub const fn unhealthy() -> Self {
        Self {
            reachable: false,
            version: None,
            pool_size: None,
            response_time_ms: None,
        }
    }

    /// Attach probe round trip
    #[must_use]
    pub const fn with_response_time(mut self, ms: u64) -> Self {
        self.response_time_ms = Some(ms);
        self
    }

    /// Attach pool size
    #[must_use]
    pub const fn with_pool_size(mut self, size: u32) -> Self {
        self.pool_size = Some(size);
        self
    }
}

/// Port for database health checking operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DatabaseHealthPort: Send + Sync {
    /// Run a trivial query and report details
    async fn check_health(&self) -> Result<DatabaseHealth, ApplicationError>;
}
