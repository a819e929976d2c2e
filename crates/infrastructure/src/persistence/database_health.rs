//! SQLite database health adapter
//!
//! Implements the `DatabaseHealthPort` for SQLite databases using the connection pool.

use std::{sync::Arc, time::Instant};

use application::error::ApplicationError;
use application::ports::{DatabaseHealth, DatabaseHealthPort};
use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use super::{
    ConnectionPool,
    error::{map_join_error, map_pool_error, map_sqlite_error},
};

/// SQLite database health adapter
pub struct SqliteDatabaseHealth {
    pool: Arc<ConnectionPool>,
}

impl std::fmt::Debug for SqliteDatabaseHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteDatabaseHealth")
            .field("pool", &"<ConnectionPool>")
            .finish()
    }
}

impl SqliteDatabaseHealth {
    /// Create a new database health adapter with the given connection pool
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DatabaseHealthPort for SqliteDatabaseHealth {
    #[instrument(skip(self))]
    async fn check_health(&self) -> Result<DatabaseHealth, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let start = Instant::now();

        let result = tokio::task::spawn_blocking(move || {
            let conn = pool.get().map_err(map_pool_error)?;

            let _: i32 = conn
                .query_row("SELECT 1", [], |row| row.get(0))
                .map_err(map_sqlite_error)?;

            let version: String = conn
                .query_row("SELECT sqlite_version()", [], |row| row.get(0))
                .unwrap_or_else(|_| "unknown".to_string());

            Ok::<_, ApplicationError>((version, pool.state().connections))
        })
        .await
        .map_err(map_join_error)?;

        match result {
            Ok((version, pool_size)) => {
                let response_time_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

                debug!(
                    version = %version,
                    pool_size = pool_size,
                    response_time_ms = response_time_ms,
                    "Database health check passed"
                );

                Ok(
                    DatabaseHealth::healthy_with_version(format!("SQLite {version}"))
                        .with_pool_size(pool_size)
                        .with_response_time(response_time_ms),
                )
            },
            Err(e) => {
                warn!(error = %e, "Database health check failed");
                Err(e)
            },
        }
    }
}
