//! Persistence module
//!
//! SQLite-based storage for locations and forecasts.

pub mod connection;
pub mod database_health;
mod error;
pub mod forecast_queries;
pub mod forecast_store;
pub mod location_store;
pub mod migrations;

pub use connection::{ConnectionPool, DatabaseError, PooledConn, create_pool};
pub use database_health::SqliteDatabaseHealth;
pub use forecast_queries::{SqliteForecastQueries, read_metric_catalog};
pub use forecast_store::SqliteForecastStore;
pub use location_store::SqliteLocationStore;
