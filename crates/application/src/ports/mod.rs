//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod database_health_port;
mod forecast_provider_port;
mod forecast_query_port;
mod forecast_staging_port;
mod forecast_store;
mod location_store;

#[cfg(test)]
pub use database_health_port::MockDatabaseHealthPort;
pub use database_health_port::{DatabaseHealth, DatabaseHealthPort};
#[cfg(test)]
pub use forecast_provider_port::MockForecastProviderPort;
pub use forecast_provider_port::{ForecastProviderPort, ForecastWindow};
#[cfg(test)]
pub use forecast_query_port::MockForecastQueryPort;
pub use forecast_query_port::{
    DailyAverageTemperature, ForecastQueryPort, RankedValue, TopLocations,
};
#[cfg(test)]
pub use forecast_staging_port::MockForecastStagingPort;
pub use forecast_staging_port::ForecastStagingPort;
#[cfg(test)]
pub use forecast_store::MockForecastStore;
pub use forecast_store::ForecastStore;
#[cfg(test)]
pub use location_store::MockLocationStore;
pub use location_store::{LocationDirectory, LocationStore};
