//! Integration tests for infrastructure crate
//!
//! Tests cover:
//! - Open-Meteo forecast adapter against a mock server
//! - End-to-end ingestion into SQLite, with and without staging
//! - Configuration handling

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::float_cmp)]

use std::sync::Arc;

use application::{
    ApplicationError, ForecastProviderPort, ForecastQueryPort, ForecastStore, ForecastWindow,
    IngestionService, LocationStore,
};
use chrono::{TimeZone, Utc};
use domain::{GeoLocation, NewLocation};
use infrastructure::{
    AppConfig, DatabaseConfig, JsonFileStaging, OpenMeteoForecastAdapter, SqliteForecastQueries,
    SqliteForecastStore, SqliteLocationStore, WeatherAppConfig, create_pool,
};
use integration_weather::WeatherConfig;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Test Helpers
// ============================================================================

/// Six hourly samples starting 2025-03-02T00:00 GMT
fn hourly_response() -> serde_json::Value {
    serde_json::json!({
        "latitude": 35.175,
        "longitude": 33.375,
        "elevation": 149.0,
        "hourly": {
            "time": [
                "2025-03-02T00:00", "2025-03-02T01:00", "2025-03-02T02:00",
                "2025-03-02T03:00", "2025-03-02T04:00", "2025-03-02T05:00"
            ],
            "temperature_2m": [10.0, 11.0, 12.0, 13.0, 14.0, 15.0],
            "precipitation": [0.0, 0.0, 0.1, 0.0, 0.0, 0.0],
            "precipitation_probability": [5, 5, 20, 10, 5, 0],
            "wind_speed_10m": [2.0, 2.5, 3.0, 3.5, 4.0, 4.5],
            "relative_humidity_2m": [80, 79, 78, 77, 76, 75],
            "sunshine_duration": [0, 0, 0, 0, 0, 1800],
            "shortwave_radiation": [0, 0, 0, 0, 0, 120]
        }
    })
}

async fn mock_forecast(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(response)
        .mount(server)
        .await;
}

fn adapter_for(server: &MockServer) -> OpenMeteoForecastAdapter {
    let config = WeatherAppConfig {
        base_url: server.uri(),
        timeout_secs: 5,
        ..WeatherAppConfig::default()
    };
    OpenMeteoForecastAdapter::with_config(WeatherConfig::from(&config))
        .expect("Failed to create adapter")
}

/// Window of one day starting at 2025-03-02T01:30
fn window(interval_hours: u32) -> ForecastWindow {
    let now = Utc.with_ymd_and_hms(2025, 3, 2, 1, 30, 0).unwrap();
    ForecastWindow::starting_at(now, 1, interval_hours).unwrap()
}

fn nicosia() -> GeoLocation {
    GeoLocation::new(35.1856, 33.3823).unwrap()
}

// ============================================================================
// Forecast Adapter Tests
// ============================================================================

mod forecast_adapter_tests {
    use super::*;

    #[tokio::test]
    async fn trims_series_to_window() {
        let server = MockServer::start().await;
        mock_forecast(&server, ResponseTemplate::new(200).set_body_json(hourly_response())).await;

        let samples = adapter_for(&server)
            .fetch_series(nicosia(), window(1))
            .await
            .unwrap();

        // 00:00 falls before the window start
        assert_eq!(samples.len(), 5);
        assert_eq!(
            samples[0].forecast_date,
            Utc.with_ymd_and_hms(2025, 3, 2, 1, 0, 0).unwrap()
        );
        assert_eq!(samples[0].t_2m, Some(11.0));
        assert_eq!(samples[4].sunshine_duration_1h, Some(30.0));
        assert!(samples.iter().all(|s| s.frost_depth.is_none()));
    }

    #[tokio::test]
    async fn honours_sampling_interval() {
        let server = MockServer::start().await;
        mock_forecast(&server, ResponseTemplate::new(200).set_body_json(hourly_response())).await;

        let samples = adapter_for(&server)
            .fetch_series(nicosia(), window(2))
            .await
            .unwrap();

        let temps: Vec<Option<f64>> = samples.iter().map(|s| s.t_2m).collect();
        assert_eq!(temps, vec![Some(11.0), Some(13.0), Some(15.0)]);
    }

    #[tokio::test]
    async fn requests_one_extra_day() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .and(query_param("forecast_days", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(hourly_response()))
            .expect(1)
            .mount(&server)
            .await;

        adapter_for(&server)
            .fetch_series(nicosia(), window(1))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn rate_limit_maps_to_rate_limited() {
        let server = MockServer::start().await;
        mock_forecast(&server, ResponseTemplate::new(429)).await;

        let result = adapter_for(&server).fetch_series(nicosia(), window(1)).await;
        assert!(matches!(result, Err(ApplicationError::RateLimited)));
    }

    #[tokio::test]
    async fn server_error_maps_to_external_service() {
        let server = MockServer::start().await;
        mock_forecast(&server, ResponseTemplate::new(503)).await;

        let result = adapter_for(&server).fetch_series(nicosia(), window(1)).await;
        assert!(matches!(result, Err(ApplicationError::ExternalService(_))));
    }
}

// ============================================================================
// Ingestion Tests
// ============================================================================

mod ingestion_tests {
    use super::*;

    struct Harness {
        locations: Arc<SqliteLocationStore>,
        forecasts: Arc<SqliteForecastStore>,
        queries: SqliteForecastQueries,
    }

    fn harness() -> Harness {
        let pool = Arc::new(create_pool(&DatabaseConfig::in_memory()).unwrap());
        Harness {
            locations: Arc::new(SqliteLocationStore::new(Arc::clone(&pool))),
            forecasts: Arc::new(SqliteForecastStore::new(Arc::clone(&pool))),
            queries: SqliteForecastQueries::new(pool).unwrap(),
        }
    }

    fn targets() -> Vec<NewLocation> {
        vec![
            NewLocation::new("nicosia", 35.1856, 33.3823).unwrap(),
            NewLocation::new("larnaca", 34.9229, 33.6233).unwrap(),
        ]
    }

    #[tokio::test]
    async fn loads_every_location_and_stages_series() {
        let server = MockServer::start().await;
        mock_forecast(&server, ResponseTemplate::new(200).set_body_json(hourly_response())).await;
        let staging_dir = tempfile::tempdir().unwrap();
        let staging = JsonFileStaging::new(staging_dir.path());
        let db = harness();

        let service = IngestionService::new(
            db.locations.clone(),
            db.forecasts.clone(),
            Arc::new(adapter_for(&server)),
            targets(),
        )
        .with_staging(Arc::new(staging.clone()));

        let report = service.run(window(1)).await.unwrap();
        assert!(report.is_complete());
        assert_eq!(report.locations_loaded, 2);
        assert_eq!(report.records_loaded, 10);
        assert_eq!(db.forecasts.count().await.unwrap(), 10);
        assert!(staging.path_for("nicosia", 1).is_file());
        assert!(staging.path_for("larnaca", 1).is_file());

        let averages = db.queries.avg_temp_last3_daily().await.unwrap();
        assert_eq!(averages.len(), 2);
        assert_eq!(averages[0].location_name, "nicosia");
        assert_eq!(averages[0].avg_t_2m, Some(14.0));
    }

    #[tokio::test]
    async fn provider_failure_skips_location() {
        let server = MockServer::start().await;
        mock_forecast(&server, ResponseTemplate::new(500)).await;
        let db = harness();

        let service = IngestionService::new(
            db.locations.clone(),
            db.forecasts.clone(),
            Arc::new(adapter_for(&server)),
            targets(),
        );

        let report = service.run(window(1)).await.unwrap();
        assert_eq!(report.locations_loaded, 0);
        assert_eq!(report.skipped.len(), 2);
        assert_eq!(db.locations.list_locations().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn reloads_from_staging_without_provider_calls() {
        let server = MockServer::start().await;
        mock_forecast(&server, ResponseTemplate::new(200).set_body_json(hourly_response())).await;
        let staging_dir = tempfile::tempdir().unwrap();
        let staging = Arc::new(JsonFileStaging::new(staging_dir.path()));

        let first = harness();
        IngestionService::new(
            first.locations.clone(),
            first.forecasts.clone(),
            Arc::new(adapter_for(&server)),
            targets(),
        )
        .with_staging(staging.clone())
        .run(window(1))
        .await
        .unwrap();

        let offline = MockServer::start().await;
        mock_forecast(&offline, ResponseTemplate::new(500)).await;
        let second = harness();
        let report = IngestionService::new(
            second.locations.clone(),
            second.forecasts.clone(),
            Arc::new(adapter_for(&offline)),
            targets(),
        )
        .with_staging(staging)
        .run_from_staging(1)
        .await
        .unwrap();

        assert!(report.is_complete());
        assert_eq!(report.records_loaded, 10);
        assert!(offline.received_requests().await.unwrap().is_empty());
    }
}

// ============================================================================
// Configuration Tests
// ============================================================================

mod config_tests {
    use super::*;

    #[test]
    fn default_config_seeds_three_locations() {
        let config = AppConfig::default();
        let locations = config.ingestion.new_locations().unwrap();

        let names: Vec<&str> = locations.iter().map(NewLocation::name).collect();
        assert_eq!(names, vec!["limasol", "larnaca", "nicosia"]);
    }

    #[test]
    fn weather_config_converts() {
        let app = WeatherAppConfig {
            base_url: "http://localhost:9999".to_string(),
            timeout_secs: 3,
            forecast_days: 7,
        };
        let config = WeatherConfig::from(&app);
        assert_eq!(config.base_url, "http://localhost:9999");
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(config.forecast_days, 7);
    }
}
