//! Forecast entity
//!
//! One predicted weather sample for one location at one valid timestamp.
//! Several rows may exist for the same location and timestamp, one per
//! forecast run; rows are immutable once written.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::LocationId;

/// Forecast values for a single valid timestamp, before storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    /// Timestamp the prediction is valid for
    pub forecast_date: DateTime<Utc>,
    /// Temperature 2 m above ground (°C)
    pub t_2m: Option<f64>,
    /// Precipitation over the past hour (mm)
    pub precip_1h: Option<f64>,
    /// Precipitation probability over the past hour (%)
    pub prob_precip_1h: Option<f64>,
    /// Wind speed 10 m above ground (m/s)
    pub wind_speed_10m: Option<f64>,
    /// Relative humidity 2 m above ground (%)
    pub relative_humidity_2m: Option<f64>,
    /// Frost depth (cm)
    pub frost_depth: Option<f64>,
    /// Sunshine over the past hour (min)
    pub sunshine_duration_1h: Option<f64>,
    /// Global radiation (W/m²)
    pub global_rad: Option<f64>,
}

impl ForecastSample {
    /// A sample with every metric unset
    #[must_use]
    pub const fn empty(forecast_date: DateTime<Utc>) -> Self {
        Self {
            forecast_date,
            t_2m: None,
            precip_1h: None,
            prob_precip_1h: None,
            wind_speed_10m: None,
            relative_humidity_2m: None,
            frost_depth: None,
            sunshine_duration_1h: None,
            global_rad: None,
        }
    }

    /// Calendar day (UTC) the sample is valid for
    #[must_use]
    pub fn day(&self) -> NaiveDate {
        self.forecast_date.date_naive()
    }
}

/// A stored forecast row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// Row id, increasing with insertion order
    pub id: i64,
    /// Owning location
    pub location_id: LocationId,
    /// Forecast values
    #[serde(flatten)]
    pub sample: ForecastSample,
}
