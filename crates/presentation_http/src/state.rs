//! Application state shared across handlers

use std::{fmt, sync::Arc};

use application::{ApplicationError, DatabaseHealthPort, ForecastQueryService};

/// Shared application state
///
/// Both handles are optional so the server can start without a database;
/// query routes then fail with a configuration error and `/ready` reports 503.
#[derive(Clone, Default)]
pub struct AppState {
    /// Aggregate forecast queries
    pub query_service: Option<Arc<ForecastQueryService>>,
    /// Database health probe
    pub database_health: Option<Arc<dyn DatabaseHealthPort>>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("query_service", &self.query_service.is_some())
            .field("database_health", &self.database_health.is_some())
            .finish()
    }
}

impl AppState {
    /// State with storage attached
    pub fn new(
        query_service: Arc<ForecastQueryService>,
        database_health: Arc<dyn DatabaseHealthPort>,
    ) -> Self {
        Self {
            query_service: Some(query_service),
            database_health: Some(database_health),
        }
    }

    /// Query service, or a configuration error when storage is missing
    pub fn queries(&self) -> Result<&ForecastQueryService, ApplicationError> {
        self.query_service
            .as_deref()
            .ok_or_else(|| ApplicationError::Configuration("storage is not configured".into()))
    }
}
