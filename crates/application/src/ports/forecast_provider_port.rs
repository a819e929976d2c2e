//! Forecast provider port
//!
//! Fetches raw forecast series for a coordinate pair from a third-party
//! weather service.

use async_trait::async_trait;
use chrono::{DateTime, Duration, DurationRound, Utc};
use domain::{ForecastSample, GeoLocation};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Time range and sampling step of a forecast request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForecastWindow {
    /// First valid timestamp (inclusive)
    pub start: DateTime<Utc>,
    /// Last valid timestamp (exclusive)
    pub end: DateTime<Utc>,
    /// Hours between two consecutive samples
    pub interval_hours: u32,
}

impl ForecastWindow {
    /// Window of `days` days beginning at the current hour
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperation` if the window end is not representable.
    pub fn starting_now(days: u32, interval_hours: u32) -> Result<Self, ApplicationError> {
        Self::starting_at(Utc::now(), days, interval_hours)
    }

    /// Window of `days` days beginning at the hour containing `now`
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperation` if the window end is not representable.
    pub fn starting_at(
        now: DateTime<Utc>,
        days: u32,
        interval_hours: u32,
    ) -> Result<Self, ApplicationError> {
        let start = now.duration_trunc(Duration::hours(1)).unwrap_or(now);
        let end = Duration::try_days(i64::from(days))
            .and_then(|span| start.checked_add_signed(span))
            .ok_or_else(|| {
                ApplicationError::InvalidOperation(format!(
                    "forecast window of {days} days is out of range"
                ))
            })?;
        Ok(Self {
            start,
            end,
            interval_hours: interval_hours.max(1),
        })
    }

    /// Number of whole days covered, rounded up
    #[must_use]
    pub fn days(&self) -> u32 {
        let hours = (self.end - self.start).num_hours().max(0);
        u32::try_from((hours + 23) / 24).unwrap_or(u32::MAX)
    }

    /// Whether `timestamp` falls inside the window and on the sampling step
    #[must_use]
    pub fn accepts(&self, timestamp: DateTime<Utc>) -> bool {
        if timestamp < self.start || timestamp >= self.end {
            return false;
        }
        let offset = (timestamp - self.start).num_hours();
        offset % i64::from(self.interval_hours) == 0
    }
}

/// Port for weather forecast providers
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ForecastProviderPort: Send + Sync {
    /// Fetch the forecast series for `coordinates` covering `window`.
    ///
    /// Samples are returned in ascending valid-time order.
    async fn fetch_series(
        &self,
        coordinates: GeoLocation,
        window: ForecastWindow,
    ) -> Result<Vec<ForecastSample>, ApplicationError>;
}
