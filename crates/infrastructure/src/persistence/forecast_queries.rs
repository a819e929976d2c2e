//! SQLite aggregate forecast queries
//!
//! Implements the ForecastQueryPort. The metric list is read from the
//! `forecasts` schema once, when the adapter is built.

use std::{collections::BTreeMap, sync::Arc};

use application::{
    error::ApplicationError,
    ports::{DailyAverageTemperature, ForecastQueryPort, RankedValue, TopLocations},
};
use async_trait::async_trait;
use chrono::NaiveDate;
use domain::{Forecast, ForecastSample, LocationId, Metric, MetricCatalog, TopN};
use rusqlite::{Connection, Row, types::Type};
use tokio::task;
use tracing::{debug, info, instrument, warn};

use super::{
    connection::{ConnectionPool, DatabaseError},
    error::{map_join_error, map_pool_error, map_sqlite_error},
    forecast_store::parse_timestamp,
};

/// Columns of `forecasts` that precede the metrics
const KEY_COLUMNS: usize = 3;

const LATEST_DAILY_SQL: &str = "
    SELECT f.id, f.location_id, f.forecast_date, f.t_2m, f.precip_1h, f.prob_precip_1h,
           f.wind_speed_10m, f.relative_humidity_2m, f.frost_depth,
           f.sunshine_duration_1h, f.global_rad
    FROM forecasts f
    INNER JOIN (
        SELECT DATE(forecast_date) AS day, MAX(forecast_date) AS max_time
        FROM forecasts
        GROUP BY DATE(forecast_date)
    ) sub ON DATE(f.forecast_date) = sub.day AND f.forecast_date = sub.max_time
    ORDER BY f.location_id, f.id";

const AVG_LAST3_SQL: &str = "
    WITH ranked AS (
        SELECT DATE(forecast_date) AS day,
               location_id,
               t_2m,
               ROW_NUMBER() OVER (
                   PARTITION BY DATE(forecast_date), location_id
                   ORDER BY forecast_date DESC, id DESC
               ) AS row_num
        FROM forecasts
    )
    SELECT r.day, l.name, AVG(r.t_2m) AS avg_t_2m
    FROM ranked r
    INNER JOIN locations l ON l.id = r.location_id
    WHERE r.row_num <= 3
    GROUP BY r.day, r.location_id, l.name
    ORDER BY r.location_id, r.day";

/// Read the metric columns of `forecasts` in schema order.
///
/// Columns without a matching [`Metric`] are logged and left out.
pub fn read_metric_catalog(conn: &Connection) -> Result<MetricCatalog, DatabaseError> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info('forecasts') ORDER BY cid")?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    if columns.len() < KEY_COLUMNS {
        return Err(DatabaseError::NotFound("table 'forecasts'".to_string()));
    }

    let (catalog, unknown) = MetricCatalog::from_columns(columns.iter().skip(KEY_COLUMNS));
    for column in &unknown {
        warn!(column = %column, "Ignoring unknown forecast column");
    }
    info!(metrics = catalog.len(), "Loaded metric catalog");
    Ok(catalog)
}

fn row_to_forecast(row: &Row<'_>) -> rusqlite::Result<Forecast> {
    let raw_date: String = row.get(2)?;
    let forecast_date = parse_timestamp(&raw_date)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?;

    Ok(Forecast {
        id: row.get(0)?,
        location_id: LocationId::new(row.get(1)?),
        sample: ForecastSample {
            forecast_date,
            t_2m: row.get(3)?,
            precip_1h: row.get(4)?,
            prob_precip_1h: row.get(5)?,
            wind_speed_10m: row.get(6)?,
            relative_humidity_2m: row.get(7)?,
            frost_depth: row.get(8)?,
            sunshine_duration_1h: row.get(9)?,
            global_rad: row.get(10)?,
        },
    })
}

fn row_to_daily_average(row: &Row<'_>) -> rusqlite::Result<DailyAverageTemperature> {
    let raw_day: String = row.get(0)?;
    let day = NaiveDate::parse_from_str(&raw_day, "%Y-%m-%d")
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))?;

    Ok(DailyAverageTemperature {
        day,
        location_name: row.get(1)?,
        avg_t_2m: row.get(2)?,
    })
}

fn top_n_for_metric(
    conn: &Connection,
    metric: Metric,
    n: TopN,
) -> rusqlite::Result<Vec<RankedValue>> {
    // Column names come from the closed Metric enum, never from the database
    let column = metric.column();
    let sql = format!(
        "SELECT f.{column}, l.name
         FROM forecasts f
         INNER JOIN locations l ON l.id = f.location_id
         ORDER BY f.{column} DESC NULLS LAST, f.id
         LIMIT ?1"
    );

    let mut stmt = conn.prepare_cached(&sql)?;
    let ranked = stmt
        .query_map([n.get()], |row| {
            Ok(RankedValue {
                value: row.get(0)?,
                location: row.get(1)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(ranked)
}

/// SQLite-based forecast query adapter
#[derive(Debug, Clone)]
pub struct SqliteForecastQueries {
    pool: Arc<ConnectionPool>,
    catalog: MetricCatalog,
}

impl SqliteForecastQueries {
    /// Build the adapter, reading the metric catalog from the schema
    pub fn new(pool: Arc<ConnectionPool>) -> Result<Self, DatabaseError> {
        let catalog = {
            let conn = pool.get()?;
            read_metric_catalog(&conn)?
        };
        Ok(Self { pool, catalog })
    }
}

#[async_trait]
impl ForecastQueryPort for SqliteForecastQueries {
    #[instrument(skip(self))]
    async fn latest_forecast_daily(&self) -> Result<Vec<Forecast>, ApplicationError> {
        let pool = Arc::clone(&self.pool);

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(map_pool_error)?;
            let mut stmt = conn.prepare(LATEST_DAILY_SQL).map_err(map_sqlite_error)?;

            let rows = stmt
                .query_map([], row_to_forecast)
                .map_err(map_sqlite_error)?
                .collect::<Result<Vec<_>, _>>()
                .map_err(map_sqlite_error)?;

            debug!(rows = rows.len(), "Queried latest daily forecasts");
            Ok(rows)
        })
        .await
        .map_err(map_join_error)?
    }

    #[instrument(skip(self))]
    async fn avg_temp_last3_daily(&self) -> Result<Vec<DailyAverageTemperature>, ApplicationError> {
        let pool = Arc::clone(&self.pool);

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(map_pool_error)?;
            let mut stmt = conn.prepare(AVG_LAST3_SQL).map_err(map_sqlite_error)?;

            let rows = stmt
                .query_map([], row_to_daily_average)
                .map_err(map_sqlite_error)?
                .collect::<Result<Vec<_>, _>>()
                .map_err(map_sqlite_error)?;

            debug!(rows = rows.len(), "Queried daily average temperatures");
            Ok(rows)
        })
        .await
        .map_err(map_join_error)?
    }

    #[instrument(skip(self), fields(n = %n))]
    async fn top_n(&self, n: TopN) -> Result<TopLocations, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let catalog = self.catalog.clone();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(map_pool_error)?;

            let mut result = BTreeMap::new();
            for metric in catalog.iter() {
                let ranked = top_n_for_metric(&conn, metric, n).map_err(map_sqlite_error)?;
                result.insert(metric.column().to_string(), ranked);
            }

            debug!(metrics = result.len(), "Ranked forecast metrics");
            Ok(TopLocations {
                result,
                column_names: catalog.column_names(),
            })
        })
        .await
        .map_err(map_join_error)?
    }
}
