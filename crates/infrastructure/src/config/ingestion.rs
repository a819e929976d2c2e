//! Batch ingestion configuration.

use domain::{DomainError, NewLocation};
use serde::{Deserialize, Serialize};

use super::default_true;

/// A location to ingest forecasts for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Unique name
    pub name: String,
    /// Latitude (-90.0 to 90.0)
    pub latitude: f64,
    /// Longitude (-180.0 to 180.0)
    pub longitude: f64,
}

impl LocationConfig {
    fn new(name: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.to_string(),
            latitude,
            longitude,
        }
    }

    /// Convert to a validated domain location
    pub fn to_new_location(&self) -> Result<NewLocation, DomainError> {
        NewLocation::new(self.name.clone(), self.latitude, self.longitude)
    }
}

/// Ingestion configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestionConfig {
    /// Forecast horizon in days (default: 7)
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u32,

    /// Hours between samples (default: 1)
    #[serde(default = "default_interval_hours")]
    pub interval_hours: u32,

    /// Directory for staged JSON series (default: `data`)
    #[serde(default = "default_staging_dir")]
    pub staging_dir: String,

    /// Write fetched series to the staging directory before loading
    #[serde(default = "default_true")]
    pub stage: bool,

    /// Locations to ingest
    #[serde(default = "default_locations")]
    pub locations: Vec<LocationConfig>,
}

const fn default_forecast_days() -> u32 {
    7
}

const fn default_interval_hours() -> u32 {
    1
}

fn default_staging_dir() -> String {
    "data".to_string()
}

fn default_locations() -> Vec<LocationConfig> {
    vec![
        LocationConfig::new("limasol", 34.68529, 33.033266),
        LocationConfig::new("larnaca", 34.92361, 33.623618),
        LocationConfig::new("nicosia", 35.17465, 33.363878),
    ]
}

impl IngestionConfig {
    /// Validated domain locations, failing on the first invalid entry
    pub fn new_locations(&self) -> Result<Vec<NewLocation>, DomainError> {
        self.locations
            .iter()
            .map(LocationConfig::to_new_location)
            .collect()
    }
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            forecast_days: default_forecast_days(),
            interval_hours: default_interval_hours(),
            staging_dir: default_staging_dir(),
            stage: true,
            locations: default_locations(),
        }
    }
}
