//! Forecast storage port (write side)

use async_trait::async_trait;
use domain::{ForecastSample, LocationId};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for bulk-loading forecast rows
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ForecastStore: Send + Sync {
    /// Insert all samples for one location in a single transaction.
    ///
    /// Either every sample is stored or none is. Returns the number of rows
    /// written.
    async fn insert_batch(
        &self,
        location_id: LocationId,
        samples: &[ForecastSample],
    ) -> Result<usize, ApplicationError>;

    /// Total number of stored forecast rows
    async fn count(&self) -> Result<u64, ApplicationError>;
}
