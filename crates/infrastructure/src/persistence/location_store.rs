//! SQLite location store implementation
//!
//! Implements the LocationStore port using SQLite.

use std::sync::Arc;

use application::{
    error::ApplicationError,
    ports::{LocationDirectory, LocationStore},
};
use async_trait::async_trait;
use domain::{LocationId, NewLocation};
use rusqlite::{OptionalExtension, params};
use tokio::task;
use tracing::{debug, instrument};

use super::{
    connection::ConnectionPool,
    error::{map_join_error, map_pool_error, map_sqlite_error},
};

/// SQLite-based location store
#[derive(Debug, Clone)]
pub struct SqliteLocationStore {
    pool: Arc<ConnectionPool>,
}

impl SqliteLocationStore {
    /// Create a new SQLite location store
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LocationStore for SqliteLocationStore {
    #[instrument(skip(self))]
    async fn list_locations(&self) -> Result<LocationDirectory, ApplicationError> {
        let pool = Arc::clone(&self.pool);

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(map_pool_error)?;

            let mut stmt = conn
                .prepare("SELECT name, id FROM locations ORDER BY id")
                .map_err(map_sqlite_error)?;

            let locations = stmt
                .query_map([], |row| {
                    Ok((row.get::<_, String>(0)?, LocationId::new(row.get(1)?)))
                })
                .map_err(map_sqlite_error)?
                .collect::<Result<LocationDirectory, _>>()
                .map_err(map_sqlite_error)?;

            debug!(count = locations.len(), "Loaded locations");
            Ok(locations)
        })
        .await
        .map_err(map_join_error)?
    }

    #[instrument(skip(self))]
    async fn find_id_by_name(&self, name: &str) -> Result<Option<LocationId>, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let name = name.to_string();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(map_pool_error)?;

            conn.query_row(
                "SELECT id FROM locations WHERE name = ?1",
                [&name],
                |row| row.get(0).map(LocationId::new),
            )
            .optional()
            .map_err(map_sqlite_error)
        })
        .await
        .map_err(map_join_error)?
    }

    #[instrument(skip(self, locations), fields(count = locations.len()))]
    async fn seed_locations(&self, locations: &[NewLocation]) -> Result<usize, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let locations = locations.to_vec();

        task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(map_pool_error)?;
            let tx = conn.transaction().map_err(map_sqlite_error)?;

            let mut inserted = 0;
            {
                let mut stmt = tx
                    .prepare(
                        "INSERT OR IGNORE INTO locations (name, latitude, longitude)
                         VALUES (?1, ?2, ?3)",
                    )
                    .map_err(map_sqlite_error)?;

                for location in &locations {
                    let coordinates = location.coordinates();
                    inserted += stmt
                        .execute(params![
                            location.name(),
                            coordinates.latitude(),
                            coordinates.longitude(),
                        ])
                        .map_err(map_sqlite_error)?;
                }
            }

            tx.commit().map_err(map_sqlite_error)?;
            debug!(inserted, "Seeded locations");
            Ok(inserted)
        })
        .await
        .map_err(map_join_error)?
    }
}
