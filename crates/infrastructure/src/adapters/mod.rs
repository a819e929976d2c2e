//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod forecast_provider_adapter;
mod json_staging_adapter;

pub use forecast_provider_adapter::OpenMeteoForecastAdapter;
pub use json_staging_adapter::JsonFileStaging;
