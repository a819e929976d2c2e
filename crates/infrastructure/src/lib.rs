//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer.
//! Contains the SQLite stores, the Open-Meteo provider, file staging,
//! configuration loading and tracing setup.

pub mod adapters;
pub mod config;
pub mod persistence;
pub mod telemetry;

pub use adapters::*;
pub use config::{
    AppConfig, DatabaseConfig, Environment, IngestionConfig, LocationConfig, LogFormat,
    ServerConfig, WeatherAppConfig,
};
pub use persistence::{
    ConnectionPool, DatabaseError, SqliteDatabaseHealth, SqliteForecastQueries,
    SqliteForecastStore, SqliteLocationStore, create_pool,
};
pub use telemetry::init_tracing;
