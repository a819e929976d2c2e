//! Aggregate forecast query handlers

use application::{ApplicationError, DailyAverageTemperature, TopLocations};
use axum::{Json, extract::State};
use domain::{Forecast, TopN};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{error::ApiError, middleware::ValidatedPath, state::AppState};

/// Largest `n` accepted by `GET /top_locations/{n}`
pub const MAX_TOP_N: i64 = 10;

/// Response for `GET /latest_forecast_daily`
#[derive(Debug, Serialize)]
pub struct LatestForecastsResponse {
    pub latest_forecasts: Vec<Forecast>,
}

/// Response for `GET /avg_temp_l3_daily`
#[derive(Debug, Serialize)]
pub struct AverageTemperaturesResponse {
    pub average_temperatures: Vec<DailyAverageTemperature>,
}

/// Response for `GET /top_locations/{n}`
#[derive(Debug, Serialize)]
pub struct TopLocationsResponse {
    pub top_locations: TopLocations,
}

/// Path parameters of `GET /top_locations/{n}`
#[derive(Debug, Deserialize, Validate)]
pub struct TopLocationsParams {
    #[validate(range(min = 1, max = MAX_TOP_N, message = "must be an integer between 1 and 10"))]
    pub n: i64,
}

/// Rows holding the latest timestamp of each day
pub async fn latest_forecast_daily(
    State(state): State<AppState>,
) -> Result<Json<LatestForecastsResponse>, ApiError> {
    let latest_forecasts = state.queries()?.latest_forecast_daily().await?;
    Ok(Json(LatestForecastsResponse { latest_forecasts }))
}

/// Average temperature of the last three samples per location and day
pub async fn avg_temp_last3_daily(
    State(state): State<AppState>,
) -> Result<Json<AverageTemperaturesResponse>, ApiError> {
    let average_temperatures = state.queries()?.avg_temp_last3_daily().await?;
    Ok(Json(AverageTemperaturesResponse {
        average_temperatures,
    }))
}

/// Top `n` rows for every metric
pub async fn top_locations(
    State(state): State<AppState>,
    ValidatedPath(params): ValidatedPath<TopLocationsParams>,
) -> Result<Json<TopLocationsResponse>, ApiError> {
    let n = TopN::new(params.n).map_err(ApplicationError::from)?;
    let top_locations = state.queries()?.top_n(n).await?;
    Ok(Json(TopLocationsResponse { top_locations }))
}
