//! Location entity
//!
//! A fixed point of interest forecasts are fetched for. Locations are created
//! once from configuration and never updated.

use serde::{Deserialize, Serialize};

use crate::{
    errors::DomainError,
    value_objects::{GeoLocation, LocationId},
};

/// A location that has not been stored yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLocation {
    name: String,
    coordinates: GeoLocation,
}

impl NewLocation {
    /// Create a new location, validating name and coordinates
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed name is empty or the coordinates are
    /// out of range.
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidLocationName(name));
        }
        Ok(Self {
            name: trimmed.to_string(),
            coordinates: GeoLocation::new(latitude, longitude)?,
        })
    }

    /// Human-readable unique key
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Coordinates of the location
    #[must_use]
    pub const fn coordinates(&self) -> GeoLocation {
        self.coordinates
    }
}

/// A stored location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    id: LocationId,
    name: String,
    coordinates: GeoLocation,
}

impl Location {
    /// Restore a location from storage
    #[must_use]
    pub const fn restore(id: LocationId, name: String, coordinates: GeoLocation) -> Self {
        Self {
            id,
            name,
            coordinates,
        }
    }

    /// Storage-assigned id
    #[must_use]
    pub const fn id(&self) -> LocationId {
        self.id
    }

    /// Human-readable unique key
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Coordinates of the location
    #[must_use]
    pub const fn coordinates(&self) -> GeoLocation {
        self.coordinates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_location_trims_name() {
        let loc = NewLocation::new("  nicosia ", 35.17465, 33.363878).unwrap();
        assert_eq!(loc.name(), "nicosia");
        assert!((loc.coordinates().latitude() - 35.17465).abs() < f64::EPSILON);
    }

    #[test]
    fn blank_name_is_rejected() {
        assert!(matches!(
            NewLocation::new("   ", 0.0, 0.0),
            Err(DomainError::InvalidLocationName(_))
        ));
    }

    #[test]
    fn bad_coordinates_are_rejected() {
        assert!(matches!(
            NewLocation::new("nowhere", 120.0, 0.0),
            Err(DomainError::InvalidCoordinates { .. })
        ));
    }

    #[test]
    fn restore_keeps_fields() {
        let coords = GeoLocation::new(34.68529, 33.033266).unwrap();
        let loc = Location::restore(LocationId::new(1), "limasol".to_string(), coords);
        assert_eq!(loc.id(), LocationId::new(1));
        assert_eq!(loc.name(), "limasol");
        assert_eq!(loc.coordinates(), coords);
    }
}
