//! Schema setup and batch ingestion
//!
//! Wires the SQLite stores, the Open-Meteo adapter and JSON staging into the
//! application services.

use std::sync::Arc;

use anyhow::{Context, Result};
use application::{ForecastWindow, IngestionReport, IngestionService};
use infrastructure::{
    AppConfig, ConnectionPool, JsonFileStaging, OpenMeteoForecastAdapter, SqliteForecastStore,
    SqliteLocationStore, create_pool,
};
use integration_weather::WeatherConfig;
use tracing::info;

/// Options of the `ingest` command
#[derive(Debug, Clone, Copy, Default)]
pub struct IngestOptions {
    /// Horizon override in days
    pub days: Option<u32>,
    /// Sampling step override in hours
    pub interval_hours: Option<u32>,
    /// Load staged files instead of calling the provider
    pub from_staging: bool,
    /// Skip writing staged files
    pub no_stage: bool,
}

fn open_pool(config: &AppConfig) -> Result<Arc<ConnectionPool>> {
    let pool = create_pool(&config.database)
        .with_context(|| format!("Failed to open database {}", config.database.path))?;
    Ok(Arc::new(pool))
}

fn build_service(config: &AppConfig, pool: &Arc<ConnectionPool>) -> Result<IngestionService> {
    let targets = config
        .ingestion
        .new_locations()
        .context("Invalid location in configuration")?;
    let provider = OpenMeteoForecastAdapter::with_config(WeatherConfig::from(&config.weather))?;

    Ok(IngestionService::new(
        Arc::new(SqliteLocationStore::new(Arc::clone(pool))),
        Arc::new(SqliteForecastStore::new(Arc::clone(pool))),
        Arc::new(provider),
        targets,
    ))
}

/// Create the schema and seed the configured locations.
///
/// Returns the number of newly inserted locations.
pub async fn init_db(config: &AppConfig) -> Result<usize> {
    let pool = open_pool(config)?;
    let service = build_service(config, &pool)?;
    let inserted = service.seed_locations().await?;
    info!(path = %config.database.path, inserted, "Database initialized");
    Ok(inserted)
}

/// Run one ingestion pass
pub async fn run_ingest(config: &AppConfig, options: IngestOptions) -> Result<IngestionReport> {
    let days = options.days.unwrap_or(config.ingestion.forecast_days);
    let interval_hours = options
        .interval_hours
        .unwrap_or(config.ingestion.interval_hours);

    let pool = open_pool(config)?;
    let mut service = build_service(config, &pool)?;

    let staging_wanted = options.from_staging || (config.ingestion.stage && !options.no_stage);
    if staging_wanted {
        service =
            service.with_staging(Arc::new(JsonFileStaging::new(&config.ingestion.staging_dir)));
    }

    let report = if options.from_staging {
        service.run_from_staging(days).await?
    } else {
        service
            .run(ForecastWindow::starting_now(days, interval_hours)?)
            .await?
    };
    Ok(report)
}

#[cfg(test)]
mod tests {
    use application::ForecastStagingPort;
    use chrono::{Duration, TimeZone, Utc};
    use domain::ForecastSample;

    use super::*;

    fn config_in(dir: &std::path::Path) -> AppConfig {
        let mut config = AppConfig::default();
        config.database.path = dir.join("weather.db").to_string_lossy().into_owned();
        config.database.max_connections = 1;
        config.ingestion.staging_dir = dir.join("staging").to_string_lossy().into_owned();
        config
    }

    #[tokio::test]
    async fn init_db_seeds_once() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        assert_eq!(init_db(&config).await.unwrap(), 3);
        assert_eq!(init_db(&config).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn ingest_from_staging_loads_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        let staging = JsonFileStaging::new(&config.ingestion.staging_dir);
        let start = Utc.with_ymd_and_hms(2025, 3, 2, 0, 0, 0).unwrap();
        let samples: Vec<ForecastSample> = (0..4)
            .map(|h| ForecastSample {
                t_2m: Some(20.0),
                ..ForecastSample::empty(start + Duration::hours(h))
            })
            .collect();
        for name in ["limasol", "larnaca"] {
            staging.stage(name, 7, &samples).await.unwrap();
        }

        let report = run_ingest(
            &config,
            IngestOptions {
                from_staging: true,
                ..IngestOptions::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(report.locations_loaded, 2);
        assert_eq!(report.records_loaded, 8);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].name, "nicosia");
    }

    #[tokio::test]
    async fn oversized_configured_horizon_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.ingestion.forecast_days = 100_000_000;

        let result = run_ingest(&config, IngestOptions::default()).await;

        let err = result.unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }
}
