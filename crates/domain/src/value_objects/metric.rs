//! Forecast metrics
//!
//! `Metric` enumerates every numeric column the forecast table may carry.
//! `MetricCatalog` is the subset actually present in a given database, in
//! schema column order. It is built once from the schema descriptor so that
//! column names reaching SQL always come from this enumeration.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// A numeric forecast metric (one column of the forecast table)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Air temperature 2 m above ground
    #[serde(rename = "t_2m")]
    Temperature2m,
    /// Precipitation amount over the past hour
    #[serde(rename = "precip_1h")]
    Precipitation1h,
    /// Probability of precipitation over the past hour
    #[serde(rename = "prob_precip_1h")]
    PrecipitationProbability1h,
    /// Wind speed 10 m above ground
    #[serde(rename = "wind_speed_10m")]
    WindSpeed10m,
    /// Relative humidity 2 m above ground
    #[serde(rename = "relative_humidity_2m")]
    RelativeHumidity2m,
    /// Frost depth
    FrostDepth,
    /// Sunshine duration over the past hour
    #[serde(rename = "sunshine_duration_1h")]
    SunshineDuration1h,
    /// Global radiation
    GlobalRad,
}

impl Metric {
    /// Every known metric, in canonical schema order
    pub const ALL: [Self; 8] = [
        Self::Temperature2m,
        Self::Precipitation1h,
        Self::PrecipitationProbability1h,
        Self::WindSpeed10m,
        Self::RelativeHumidity2m,
        Self::FrostDepth,
        Self::SunshineDuration1h,
        Self::GlobalRad,
    ];

    /// Column name in the forecast table
    #[must_use]
    pub const fn column(&self) -> &'static str {
        match self {
            Self::Temperature2m => "t_2m",
            Self::Precipitation1h => "precip_1h",
            Self::PrecipitationProbability1h => "prob_precip_1h",
            Self::WindSpeed10m => "wind_speed_10m",
            Self::RelativeHumidity2m => "relative_humidity_2m",
            Self::FrostDepth => "frost_depth",
            Self::SunshineDuration1h => "sunshine_duration_1h",
            Self::GlobalRad => "global_rad",
        }
    }

    /// Unit of the stored value
    #[must_use]
    pub const fn unit(&self) -> &'static str {
        match self {
            Self::Temperature2m => "°C",
            Self::Precipitation1h => "mm",
            Self::PrecipitationProbability1h | Self::RelativeHumidity2m => "%",
            Self::WindSpeed10m => "m/s",
            Self::FrostDepth => "cm",
            Self::SunshineDuration1h => "min",
            Self::GlobalRad => "W/m²",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Metric {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.column() == s)
            .ok_or_else(|| DomainError::UnknownMetric(s.to_string()))
    }
}

/// Ordered set of metrics present in the forecast schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricCatalog {
    metrics: Vec<Metric>,
}

impl MetricCatalog {
    /// Build a catalog from raw column names, keeping their order.
    ///
    /// Returns the catalog together with the column names that did not map to
    /// a known metric. Duplicates are dropped.
    pub fn from_columns<I, S>(columns: I) -> (Self, Vec<String>)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut metrics = Vec::new();
        let mut unknown = Vec::new();

        for column in columns {
            let column = column.as_ref();
            match column.parse::<Metric>() {
                Ok(metric) if !metrics.contains(&metric) => metrics.push(metric),
                Ok(_) => {},
                Err(_) => unknown.push(column.to_string()),
            }
        }

        (Self { metrics }, unknown)
    }

    /// Metrics in schema order
    #[must_use]
    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    /// Column names in schema order
    #[must_use]
    pub fn column_names(&self) -> Vec<String> {
        self.metrics.iter().map(|m| m.column().to_string()).collect()
    }

    /// Number of metrics
    #[must_use]
    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    /// Whether the catalog is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Iterate over the metrics
    pub fn iter(&self) -> impl Iterator<Item = Metric> + '_ {
        self.metrics.iter().copied()
    }
}

impl Default for MetricCatalog {
    fn default() -> Self {
        Self {
            metrics: Metric::ALL.to_vec(),
        }
    }
}
