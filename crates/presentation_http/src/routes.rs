//! Route definitions

use axum::{Router, routing::get};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Forecast queries
        .route("/locations", get(handlers::locations::list_locations))
        .route(
            "/latest_forecast_daily",
            get(handlers::forecasts::latest_forecast_daily),
        )
        .route(
            "/avg_temp_l3_daily",
            get(handlers::forecasts::avg_temp_last3_daily),
        )
        .route(
            "/top_locations/{n}",
            get(handlers::forecasts::top_locations),
        )
        // Attach state
        .with_state(state)
}
