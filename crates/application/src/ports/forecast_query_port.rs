//! Read-only aggregate queries over stored forecasts

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use domain::{Forecast, TopN};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Mean temperature of the latest forecast runs for one location and day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAverageTemperature {
    /// Calendar day (UTC)
    pub day: NaiveDate,
    /// Name of the location
    pub location_name: String,
    /// Mean of up to three 2 m temperatures, `None` if all were null
    pub avg_t_2m: Option<f64>,
}

/// One metric value with the location it was forecast for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedValue {
    /// Metric value, `None` when not reported
    pub value: Option<f64>,
    /// Location name
    pub location: String,
}

/// Highest values per metric
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopLocations {
    /// Ranked values keyed by metric column name
    pub result: BTreeMap<String, Vec<RankedValue>>,
    /// Metric column names in schema order
    pub column_names: Vec<String>,
}

/// Port for forecast aggregate queries
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ForecastQueryPort: Send + Sync {
    /// Rows whose `forecast_date` equals the latest timestamp of their
    /// calendar day across all locations, ordered by location id
    async fn latest_forecast_daily(&self) -> Result<Vec<Forecast>, ApplicationError>;

    /// Mean 2 m temperature of the three most recent rows per location and
    /// day, ordered by location id then day
    async fn avg_temp_last3_daily(&self) -> Result<Vec<DailyAverageTemperature>, ApplicationError>;

    /// Up to `n` rows per metric by descending value, nulls last
    async fn top_n(&self, n: TopN) -> Result<TopLocations, ApplicationError>;
}
