//! Weather data models
//!
//! Hourly forecast types returned by the Open-Meteo forecast endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Hourly variables requested from Open-Meteo, in response order
pub const HOURLY_VARIABLES: [&str; 7] = [
    "temperature_2m",
    "precipitation",
    "precipitation_probability",
    "wind_speed_10m",
    "relative_humidity_2m",
    "sunshine_duration",
    "shortwave_radiation",
];

/// One hourly forecast step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlySample {
    /// Valid time (UTC)
    pub time: DateTime<Utc>,
    /// Air temperature 2 m above ground in Celsius
    pub temperature_2m: Option<f64>,
    /// Precipitation sum of the preceding hour in mm
    pub precipitation: Option<f64>,
    /// Probability of precipitation in percent
    pub precipitation_probability: Option<f64>,
    /// Wind speed 10 m above ground in m/s
    pub wind_speed_10m: Option<f64>,
    /// Relative humidity 2 m above ground in percent
    pub relative_humidity_2m: Option<f64>,
    /// Sunshine in the preceding hour in minutes
    pub sunshine_minutes: Option<f64>,
    /// Shortwave (global) radiation in W/m²
    pub shortwave_radiation: Option<f64>,
}

/// Hourly forecast series for one coordinate pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourlyForecast {
    /// Latitude of the grid cell used
    pub latitude: f64,
    /// Longitude of the grid cell used
    pub longitude: f64,
    /// Grid cell elevation in meters
    pub elevation: f32,
    /// Samples in ascending time order
    pub samples: Vec<HourlySample>,
}

/// Raw hourly arrays from the API
///
/// Open-Meteo reports missing values as `null` entries.
#[derive(Debug, Clone, Deserialize)]
pub struct HourlyData {
    pub time: Vec<String>,
    #[serde(default)]
    pub temperature_2m: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation_probability: Vec<Option<f64>>,
    #[serde(default)]
    pub wind_speed_10m: Vec<Option<f64>>,
    #[serde(default)]
    pub relative_humidity_2m: Vec<Option<f64>>,
    /// Seconds of sunshine in the preceding hour
    #[serde(default)]
    pub sunshine_duration: Vec<Option<f64>>,
    #[serde(default)]
    pub shortwave_radiation: Vec<Option<f64>>,
}

impl HourlyData {
    /// Value at `i` of a column, `None` if the column is short or absent
    pub fn value(column: &[Option<f64>], i: usize) -> Option<f64> {
        column.get(i).copied().flatten()
    }
}

/// Raw API response
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub elevation: f32,
    pub hourly: Option<HourlyData>,
}
