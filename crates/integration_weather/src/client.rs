//! Open-Meteo weather client
//!
//! HTTP client for the Open-Meteo hourly forecast API.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::{ApiResponse, HOURLY_VARIABLES, HourlyData, HourlyForecast, HourlySample};

/// Longest horizon Open-Meteo serves
const MAX_FORECAST_DAYS: u8 = 16;

/// Weather client errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Connection to the weather service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the weather service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse response from weather service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid coordinates provided
    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// Weather service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Open-Meteo API base URL (default: <https://api.open-meteo.com/v1>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Upper bound for the requested horizon in days (1-16, default: 16)
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u8,
}

fn default_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

const fn default_timeout() -> u64 {
    30
}

const fn default_forecast_days() -> u8 {
    MAX_FORECAST_DAYS
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            forecast_days: default_forecast_days(),
        }
    }
}

/// Weather client trait for fetching forecast series
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Get the hourly forecast for a location, starting today (UTC)
    async fn get_hourly_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        days: u8,
    ) -> Result<HourlyForecast, WeatherError>;

    /// Check if the weather service is healthy
    async fn is_healthy(&self) -> bool;
}

/// Open-Meteo HTTP client implementation
#[derive(Debug)]
pub struct OpenMeteoClient {
    client: Client,
    config: WeatherConfig,
}

impl OpenMeteoClient {
    /// Create a new Open-Meteo client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a new client with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, WeatherError> {
        Self::new(WeatherConfig::default())
    }

    /// Validate coordinates
    fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), WeatherError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(WeatherError::InvalidCoordinates);
        }
        Ok(())
    }

    /// Build the API URL for an hourly forecast request
    fn build_forecast_url(&self, latitude: f64, longitude: f64, days: u8) -> String {
        let max_days = self.config.forecast_days.clamp(1, MAX_FORECAST_DAYS);
        let days = days.clamp(1, max_days);
        format!(
            "{}/forecast?latitude={}&longitude={}&hourly={}&wind_speed_unit=ms&timezone=GMT&forecast_days={}",
            self.config.base_url,
            latitude,
            longitude,
            HOURLY_VARIABLES.join(","),
            days
        )
    }

    /// Zip the hourly arrays into samples
    fn parse_hourly(data: &HourlyData) -> Result<Vec<HourlySample>, WeatherError> {
        let mut samples = Vec::with_capacity(data.time.len());

        for (i, time) in data.time.iter().enumerate() {
            samples.push(HourlySample {
                time: Self::parse_datetime(time)?,
                temperature_2m: HourlyData::value(&data.temperature_2m, i),
                precipitation: HourlyData::value(&data.precipitation, i),
                precipitation_probability: HourlyData::value(&data.precipitation_probability, i),
                wind_speed_10m: HourlyData::value(&data.wind_speed_10m, i),
                relative_humidity_2m: HourlyData::value(&data.relative_humidity_2m, i),
                sunshine_minutes: HourlyData::value(&data.sunshine_duration, i)
                    .map(|secs| secs / 60.0),
                shortwave_radiation: HourlyData::value(&data.shortwave_radiation, i),
            });
        }

        Ok(samples)
    }

    /// Parse datetime string to `DateTime<Utc>`
    fn parse_datetime(s: &str) -> Result<DateTime<Utc>, WeatherError> {
        // GMT responses come without offset (2025-03-02T14:00)
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M") {
            return Ok(Utc.from_utc_datetime(&dt));
        }

        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
            return Ok(Utc.from_utc_datetime(&dt));
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(dt.with_timezone(&Utc));
        }

        Err(WeatherError::ParseError(format!(
            "Invalid datetime format: {s}"
        )))
    }

    async fn fetch(&self, url: &str) -> Result<ApiResponse, WeatherError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| WeatherError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(WeatherError::RateLimitExceeded);
        }
        if status.is_server_error() {
            return Err(WeatherError::ServiceUnavailable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(WeatherError::RequestFailed(format!("HTTP {status}")));
        }

        response
            .json()
            .await
            .map_err(|e| WeatherError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl WeatherClient for OpenMeteoClient {
    #[instrument(skip(self), fields(lat = %latitude, lon = %longitude, days = %days))]
    async fn get_hourly_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        days: u8,
    ) -> Result<HourlyForecast, WeatherError> {
        Self::validate_coordinates(latitude, longitude)?;

        let url = self.build_forecast_url(latitude, longitude, days);
        debug!(url = %url, "Fetching hourly forecast");

        let api_response = self.fetch(&url).await?;
        let hourly = api_response.hourly.ok_or_else(|| {
            WeatherError::ParseError("No hourly forecast data in response".to_string())
        })?;
        let samples = Self::parse_hourly(&hourly)?;
        debug!(samples = samples.len(), "Parsed hourly forecast");

        Ok(HourlyForecast {
            latitude: api_response.latitude,
            longitude: api_response.longitude,
            elevation: api_response.elevation,
            samples,
        })
    }

    async fn is_healthy(&self) -> bool {
        // Nicosia, one day
        self.get_hourly_forecast(35.17465, 33.363878, 1).await.is_ok()
    }
}
