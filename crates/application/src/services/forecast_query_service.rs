//! Forecast query service
//!
//! Read side used by the HTTP API and the CLI.

use std::{fmt, sync::Arc};

use domain::{Forecast, TopN};
use tracing::{debug, instrument};

use crate::{
    error::ApplicationError,
    ports::{
        DailyAverageTemperature, ForecastQueryPort, LocationDirectory, LocationStore,
        TopLocations,
    },
};

/// Service answering the aggregate forecast queries
pub struct ForecastQueryService {
    locations: Arc<dyn LocationStore>,
    queries: Arc<dyn ForecastQueryPort>,
}

impl fmt::Debug for ForecastQueryService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForecastQueryService").finish_non_exhaustive()
    }
}

impl ForecastQueryService {
    /// Create a new query service
    pub fn new(locations: Arc<dyn LocationStore>, queries: Arc<dyn ForecastQueryPort>) -> Self {
        Self { locations, queries }
    }

    /// All locations keyed by name
    #[instrument(skip(self))]
    pub async fn list_locations(&self) -> Result<LocationDirectory, ApplicationError> {
        let locations = self.locations.list_locations().await?;
        debug!(count = locations.len(), "Listed locations");
        Ok(locations)
    }

    /// Latest forecast row per calendar day
    #[instrument(skip(self))]
    pub async fn latest_forecast_daily(&self) -> Result<Vec<Forecast>, ApplicationError> {
        let rows = self.queries.latest_forecast_daily().await?;
        debug!(rows = rows.len(), "Fetched latest daily forecasts");
        Ok(rows)
    }

    /// Mean temperature of the last three runs per location and day
    #[instrument(skip(self))]
    pub async fn avg_temp_last3_daily(
        &self,
    ) -> Result<Vec<DailyAverageTemperature>, ApplicationError> {
        let rows = self.queries.avg_temp_last3_daily().await?;
        debug!(rows = rows.len(), "Computed daily average temperatures");
        Ok(rows)
    }

    /// Top `n` locations for every metric
    #[instrument(skip(self), fields(n = %n))]
    pub async fn top_n(&self, n: TopN) -> Result<TopLocations, ApplicationError> {
        let top = self.queries.top_n(n).await?;
        debug!(metrics = top.column_names.len(), "Ranked metrics");
        Ok(top)
    }
}
