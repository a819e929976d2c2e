//! Location storage port
//!
//! Locations are seeded once from configuration and then only read.

use std::collections::BTreeMap;

use async_trait::async_trait;
use domain::{LocationId, NewLocation};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Location names mapped to their storage ids
pub type LocationDirectory = BTreeMap<String, LocationId>;

/// Port for location storage operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait LocationStore: Send + Sync {
    /// Every stored location keyed by name
    async fn list_locations(&self) -> Result<LocationDirectory, ApplicationError>;

    /// Look up the id of a location by its name
    async fn find_id_by_name(&self, name: &str) -> Result<Option<LocationId>, ApplicationError>;

    /// Insert the given locations unless a location with the same name exists.
    ///
    /// Returns how many rows were inserted.
    async fn seed_locations(&self, locations: &[NewLocation]) -> Result<usize, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn LocationStore) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn LocationStore>();
    }
}
