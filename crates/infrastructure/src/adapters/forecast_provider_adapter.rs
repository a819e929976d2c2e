//! Forecast provider adapter - Implements ForecastProviderPort using integration_weather

use application::error::ApplicationError;
use application::ports::{ForecastProviderPort, ForecastWindow};
use async_trait::async_trait;
use domain::{ForecastSample, GeoLocation};
use integration_weather::{
    HourlySample, OpenMeteoClient, WeatherClient, WeatherConfig, WeatherError,
};
use tracing::{debug, instrument};

/// Longest horizon Open-Meteo serves
const MAX_PROVIDER_DAYS: u32 = 16;

/// Adapter fetching hourly series from Open-Meteo
#[derive(Debug)]
pub struct OpenMeteoForecastAdapter {
    client: OpenMeteoClient,
}

impl OpenMeteoForecastAdapter {
    /// Create a new adapter with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new() -> Result<Self, ApplicationError> {
        Self::with_config(WeatherConfig::default())
    }

    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: WeatherConfig) -> Result<Self, ApplicationError> {
        let client =
            OpenMeteoClient::new(config).map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok(Self { client })
    }

    /// Map integration weather error to application error
    fn map_error(err: WeatherError) -> ApplicationError {
        match err {
            WeatherError::ConnectionFailed(e)
            | WeatherError::RequestFailed(e)
            | WeatherError::ServiceUnavailable(e) => ApplicationError::ExternalService(e),
            WeatherError::ParseError(e) => ApplicationError::Internal(e),
            WeatherError::InvalidCoordinates => {
                ApplicationError::InvalidOperation("Invalid coordinates".into())
            },
            WeatherError::RateLimitExceeded => ApplicationError::RateLimited,
        }
    }

    fn map_sample(sample: &HourlySample) -> ForecastSample {
        ForecastSample {
            forecast_date: sample.time,
            t_2m: sample.temperature_2m,
            precip_1h: sample.precipitation,
            prob_precip_1h: sample.precipitation_probability,
            wind_speed_10m: sample.wind_speed_10m,
            relative_humidity_2m: sample.relative_humidity_2m,
            // Not offered by Open-Meteo
            frost_depth: None,
            sunshine_duration_1h: sample.sunshine_minutes,
            global_rad: sample.shortwave_radiation,
        }
    }

    /// Days to request so that the provider series covers the whole window.
    ///
    /// Open-Meteo series start at midnight of the current day, so the window
    /// end lands one day past its length.
    fn provider_days(window: &ForecastWindow) -> u8 {
        let days = window.days().saturating_add(1).clamp(1, MAX_PROVIDER_DAYS);
        u8::try_from(days).unwrap_or(u8::MAX)
    }
}

#[async_trait]
impl ForecastProviderPort for OpenMeteoForecastAdapter {
    #[instrument(skip(self), fields(days = window.days(), interval = window.interval_hours))]
    async fn fetch_series(
        &self,
        coordinates: GeoLocation,
        window: ForecastWindow,
    ) -> Result<Vec<ForecastSample>, ApplicationError> {
        let forecast = self
            .client
            .get_hourly_forecast(
                coordinates.latitude(),
                coordinates.longitude(),
                Self::provider_days(&window),
            )
            .await
            .map_err(Self::map_error)?;

        let samples: Vec<ForecastSample> = forecast
            .samples
            .iter()
            .filter(|s| window.accepts(s.time))
            .map(Self::map_sample)
            .collect();

        debug!(
            received = forecast.samples.len(),
            kept = samples.len(),
            "Trimmed forecast series to window"
        );
        Ok(samples)
    }
}
