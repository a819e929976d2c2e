//! Application services - Use case implementations

mod forecast_query_service;
mod ingestion_service;

pub use forecast_query_service::ForecastQueryService;
pub use ingestion_service::{IngestionReport, IngestionService, SkippedLocation};
