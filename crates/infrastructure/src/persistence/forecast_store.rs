//! SQLite forecast store implementation
//!
//! Bulk-loads forecast rows. Valid times are stored as UTC text in the form
//! `YYYY-MM-DD HH:MM:SS+00:00`, which sorts chronologically and is understood
//! by SQLite's `DATE()`.

use std::sync::Arc;

use application::{error::ApplicationError, ports::ForecastStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{ForecastSample, LocationId};
use rusqlite::params;
use tokio::task;
use tracing::{debug, instrument};

use super::{
    connection::ConnectionPool,
    error::{map_join_error, map_pool_error, map_sqlite_error},
};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%:z";

/// Render a valid time for storage
pub(crate) fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.fixed_offset().format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a stored valid time
pub(crate) fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(s))
        .map(|dt| dt.with_timezone(&Utc))
}

/// SQLite-based forecast store
#[derive(Debug, Clone)]
pub struct SqliteForecastStore {
    pool: Arc<ConnectionPool>,
}

impl SqliteForecastStore {
    /// Create a new SQLite forecast store
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ForecastStore for SqliteForecastStore {
    #[instrument(skip(self, samples), fields(location_id = %location_id, samples = samples.len()))]
    async fn insert_batch(
        &self,
        location_id: LocationId,
        samples: &[ForecastSample],
    ) -> Result<usize, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let samples = samples.to_vec();

        task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(map_pool_error)?;
            let tx = conn.transaction().map_err(map_sqlite_error)?;

            let mut written = 0;
            {
                let mut stmt = tx
                    .prepare(
                        "INSERT INTO forecasts (
                            location_id, forecast_date, t_2m, precip_1h, prob_precip_1h,
                            wind_speed_10m, relative_humidity_2m, frost_depth,
                            sunshine_duration_1h, global_rad
                         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                    )
                    .map_err(map_sqlite_error)?;

                for sample in &samples {
                    written += stmt
                        .execute(params![
                            location_id.as_i64(),
                            format_timestamp(sample.forecast_date),
                            sample.t_2m,
                            sample.precip_1h,
                            sample.prob_precip_1h,
                            sample.wind_speed_10m,
                            sample.relative_humidity_2m,
                            sample.frost_depth,
                            sample.sunshine_duration_1h,
                            sample.global_rad,
                        ])
                        .map_err(map_sqlite_error)?;
                }
            }

            // Dropping an uncommitted transaction rolls it back
            tx.commit().map_err(map_sqlite_error)?;
            debug!(written, "Inserted forecast batch");
            Ok(written)
        })
        .await
        .map_err(map_join_error)?
    }

    #[instrument(skip(self))]
    async fn count(&self) -> Result<u64, ApplicationError> {
        let pool = Arc::clone(&self.pool);

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(map_pool_error)?;
            let count: i64 = conn
                .query_row("SELECT COUNT(*) FROM forecasts", [], |row| row.get(0))
                .map_err(map_sqlite_error)?;
            Ok(u64::try_from(count).unwrap_or_default())
        })
        .await
        .map_err(map_join_error)?
    }
}
