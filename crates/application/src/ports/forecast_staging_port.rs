//! Forecast staging port
//!
//! Fetched series are written to flat files before loading so that a load
//! can be replayed without calling the provider again.

use async_trait::async_trait;
use domain::ForecastSample;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for staging fetched forecast series
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ForecastStagingPort: Send + Sync {
    /// Persist a fetched series, replacing an earlier one for the same
    /// location and horizon
    async fn stage(
        &self,
        location_name: &str,
        days: u32,
        samples: &[ForecastSample],
    ) -> Result<(), ApplicationError>;

    /// Read back a staged series
    async fn load(
        &self,
        location_name: &str,
        days: u32,
    ) -> Result<Vec<ForecastSample>, ApplicationError>;
}
