//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Coordinates outside of the valid latitude/longitude range
    #[error("Invalid coordinates: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    /// Location name is empty or otherwise unusable
    #[error("Invalid location name: {0:?}")]
    InvalidLocationName(String),

    /// Top-N count must be a positive integer
    #[error("Invalid top-N count: {0} (must be at least 1)")]
    InvalidTopN(i64),

    /// Metric name does not belong to the forecast schema
    #[error("Unknown metric: {0}")]
    UnknownMetric(String),

    /// Entity not found
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    /// Date/time parsing error
    #[error("Invalid date/time: {0}")]
    InvalidDateTime(String),
}

impl DomainError {
    /// Create a not found error
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }
}
