//! Forecast ingestion service
//!
//! Seeds the configured locations, then fetches, stages and loads one
//! location at a time. A failing location is logged and skipped; rows
//! already loaded for other locations stay in place.

use std::{fmt, sync::Arc};

use domain::{ForecastSample, LocationId, NewLocation};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::{ForecastProviderPort, ForecastStagingPort, ForecastStore, ForecastWindow, LocationStore},
};

/// A location that was not loaded and why
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedLocation {
    /// Location name
    pub name: String,
    /// Error message
    pub reason: String,
}

/// Outcome of an ingestion run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestionReport {
    /// Forecast rows written
    pub records_loaded: usize,
    /// Locations whose batch was written
    pub locations_loaded: usize,
    /// Locations that failed
    pub skipped: Vec<SkippedLocation>,
}

impl IngestionReport {
    fn skip(&mut self, name: &str, err: &ApplicationError) {
        warn!(location = %name, error = %err, "Skipping location");
        self.skipped.push(SkippedLocation {
            name: name.to_string(),
            reason: err.to_string(),
        });
    }

    /// Whether every location was loaded
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Service running batch forecast ingestion
pub struct IngestionService {
    locations: Arc<dyn LocationStore>,
    forecasts: Arc<dyn ForecastStore>,
    provider: Arc<dyn ForecastProviderPort>,
    staging: Option<Arc<dyn ForecastStagingPort>>,
    targets: Vec<NewLocation>,
}

impl fmt::Debug for IngestionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionService")
            .field("targets", &self.targets)
            .field("staging", &self.staging.is_some())
            .finish_non_exhaustive()
    }
}

impl IngestionService {
    /// Create a new ingestion service for the given locations
    pub fn new(
        locations: Arc<dyn LocationStore>,
        forecasts: Arc<dyn ForecastStore>,
        provider: Arc<dyn ForecastProviderPort>,
        targets: Vec<NewLocation>,
    ) -> Self {
        Self {
            locations,
            forecasts,
            provider,
            staging: None,
            targets,
        }
    }

    /// Stage every fetched series before loading it
    #[must_use]
    pub fn with_staging(mut self, staging: Arc<dyn ForecastStagingPort>) -> Self {
        self.staging = Some(staging);
        self
    }

    /// Insert the configured locations that are not stored yet
    #[instrument(skip(self))]
    pub async fn seed_locations(&self) -> Result<usize, ApplicationError> {
        let inserted = self.locations.seed_locations(&self.targets).await?;
        info!(inserted, total = self.targets.len(), "Seeded locations");
        Ok(inserted)
    }

    /// Fetch from the provider and load every configured location.
    ///
    /// Only seeding errors abort the run.
    #[instrument(skip(self), fields(days = window.days(), interval = window.interval_hours))]
    pub async fn run(&self, window: ForecastWindow) -> Result<IngestionReport, ApplicationError> {
        self.seed_locations().await?;
        let mut report = IngestionReport::default();

        for target in &self.targets {
            let name = target.name();
            let id = match self.resolve(name).await {
                Ok(id) => id,
                Err(e) => {
                    report.skip(name, &e);
                    continue;
                },
            };

            let samples = match self.provider.fetch_series(target.coordinates(), window).await {
                Ok(samples) => samples,
                Err(e) => {
                    report.skip(name, &e);
                    continue;
                },
            };
            debug!(location = %name, samples = samples.len(), "Fetched forecast series");

            if let Some(staging) = &self.staging {
                if let Err(e) = staging.stage(name, window.days(), &samples).await {
                    warn!(location = %name, error = %e, "Failed to stage forecast series");
                }
            }

            self.load(&mut report, name, id, &samples).await;
        }

        info!(
            records = report.records_loaded,
            locations = report.locations_loaded,
            skipped = report.skipped.len(),
            "Ingestion finished"
        );
        Ok(report)
    }

    /// Load previously staged series instead of calling the provider
    #[instrument(skip(self))]
    pub async fn run_from_staging(&self, days: u32) -> Result<IngestionReport, ApplicationError> {
        let staging = self.staging.as_ref().ok_or_else(|| {
            ApplicationError::Configuration("forecast staging is not configured".into())
        })?;

        self.seed_locations().await?;
        let mut report = IngestionReport::default();

        for target in &self.targets {
            let name = target.name();
            let loaded = match self.resolve(name).await {
                Ok(id) => staging.load(name, days).await.map(|samples| (id, samples)),
                Err(e) => Err(e),
            };
            match loaded {
                Ok((id, samples)) => self.load(&mut report, name, id, &samples).await,
                Err(e) => report.skip(name, &e),
            }
        }

        info!(
            records = report.records_loaded,
            locations = report.locations_loaded,
            skipped = report.skipped.len(),
            "Staged ingestion finished"
        );
        Ok(report)
    }

    async fn resolve(&self, name: &str) -> Result<LocationId, ApplicationError> {
        self.locations
            .find_id_by_name(name)
            .await?
            .ok_or_else(|| ApplicationError::NotFound(format!("location '{name}'")))
    }

    async fn load(
        &self,
        report: &mut IngestionReport,
        name: &str,
        id: LocationId,
        samples: &[ForecastSample],
    ) {
        match self.forecasts.insert_batch(id, samples).await {
            Ok(written) => {
                debug!(location = %name, rows = written, "Loaded forecast batch");
                report.records_loaded += written;
                report.locations_loaded += 1;
            },
            Err(e) => report.skip(name, &e),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use mockall::predicate::eq;

    use super::*;
    use crate::ports::{
        MockForecastProviderPort, MockForecastStagingPort, MockForecastStore, MockLocationStore,
    };

    fn targets() -> Vec<NewLocation> {
        vec![
            NewLocation::new("larnaca", 34.92361, 33.623618).unwrap(),
            NewLocation::new("nicosia", 35.17465, 33.363878).unwrap(),
        ]
    }

    fn window() -> ForecastWindow {
        let start = Utc.with_ymd_and_hms(2025, 3, 2, 0, 0, 0).unwrap();
        ForecastWindow::starting_at(start, 1, 1).unwrap()
    }

    fn samples(n: i64) -> Vec<ForecastSample> {
        let start = Utc.with_ymd_and_hms(2025, 3, 2, 0, 0, 0).unwrap();
        (0..n)
            .map(|h| ForecastSample {
                t_2m: Some(10.0),
                ..ForecastSample::empty(start + Duration::hours(h))
            })
            .collect()
    }

    fn location_store() -> MockLocationStore {
        let mut store = MockLocationStore::new();
        store.expect_seed_locations().returning(|l| Ok(l.len()));
        store
            .expect_find_id_by_name()
            .with(eq("larnaca"))
            .returning(|_| Ok(Some(LocationId::new(1))));
        store
            .expect_find_id_by_name()
            .with(eq("nicosia"))
            .returning(|_| Ok(Some(LocationId::new(2))));
        store
    }

    #[tokio::test]
    async fn loads_every_location() {
        let mut provider = MockForecastProviderPort::new();
        provider.expect_fetch_series().times(2).returning(|_, _| Ok(samples(24)));

        let mut forecasts = MockForecastStore::new();
        forecasts
            .expect_insert_batch()
            .times(2)
            .returning(|_, s| Ok(s.len()));

        let svc = IngestionService::new(
            Arc::new(location_store()),
            Arc::new(forecasts),
            Arc::new(provider),
            targets(),
        );
        let report = svc.run(window()).await.unwrap();

        assert_eq!(report.records_loaded, 48);
        assert_eq!(report.locations_loaded, 2);
        assert!(report.is_complete());
    }

    #[tokio::test]
    async fn failed_insert_is_skipped_and_run_continues() {
        let mut provider = MockForecastProviderPort::new();
        provider.expect_fetch_series().returning(|_, _| Ok(samples(3)));

        let mut forecasts = MockForecastStore::new();
        forecasts
            .expect_insert_batch()
            .withf(|id, _| id.as_i64() == 1)
            .returning(|_, _| Err(ApplicationError::Storage("database is locked".into())));
        forecasts
            .expect_insert_batch()
            .withf(|id, _| id.as_i64() == 2)
            .returning(|_, s| Ok(s.len()));

        let svc = IngestionService::new(
            Arc::new(location_store()),
            Arc::new(forecasts),
            Arc::new(provider),
            targets(),
        );
        let report = svc.run(window()).await.unwrap();

        assert_eq!(report.records_loaded, 3);
        assert_eq!(report.locations_loaded, 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].name, "larnaca");
        assert!(report.skipped[0].reason.contains("database is locked"));
    }

    #[tokio::test]
    async fn provider_failure_is_skipped() {
        let mut provider = MockForecastProviderPort::new();
        provider
            .expect_fetch_series()
            .returning(|_, _| Err(ApplicationError::RateLimited));

        let mut forecasts = MockForecastStore::new();
        forecasts.expect_insert_batch().never();

        let svc = IngestionService::new(
            Arc::new(location_store()),
            Arc::new(forecasts),
            Arc::new(provider),
            targets(),
        );
        let report = svc.run(window()).await.unwrap();

        assert_eq!(report.records_loaded, 0);
        assert_eq!(report.skipped.len(), 2);
    }

    #[tokio::test]
    async fn unknown_location_is_skipped() {
        let mut locations = MockLocationStore::new();
        locations.expect_seed_locations().returning(|_| Ok(0));
        locations.expect_find_id_by_name().returning(|_| Ok(None));

        let mut provider = MockForecastProviderPort::new();
        provider.expect_fetch_series().never();

        let svc = IngestionService::new(
            Arc::new(locations),
            Arc::new(MockForecastStore::new()),
            Arc::new(provider),
            targets(),
        );
        let report = svc.run(window()).await.unwrap();

        assert_eq!(report.skipped.len(), 2);
        assert!(report.skipped[0].reason.contains("larnaca"));
    }

    #[tokio::test]
    async fn seeding_failure_aborts_run() {
        let mut locations = MockLocationStore::new();
        locations
            .expect_seed_locations()
            .returning(|_| Err(ApplicationError::Storage("unable to open database file".into())));

        let svc = IngestionService::new(
            Arc::new(locations),
            Arc::new(MockForecastStore::new()),
            Arc::new(MockForecastProviderPort::new()),
            targets(),
        );

        assert!(matches!(
            svc.run(window()).await,
            Err(ApplicationError::Storage(_))
        ));
    }

    #[tokio::test]
    async fn stages_before_loading() {
        let mut provider = MockForecastProviderPort::new();
        provider.expect_fetch_series().returning(|_, _| Ok(samples(2)));

        let mut staging = MockForecastStagingPort::new();
        staging
            .expect_stage()
            .withf(|_, days, s| *days == 1 && s.len() == 2)
            .times(2)
            .returning(|_, _, _| Ok(()));

        let mut forecasts = MockForecastStore::new();
        forecasts.expect_insert_batch().returning(|_, s| Ok(s.len()));

        let svc = IngestionService::new(
            Arc::new(location_store()),
            Arc::new(forecasts),
            Arc::new(provider),
            targets(),
        )
        .with_staging(Arc::new(staging));
        let report = svc.run(window()).await.unwrap();

        assert_eq!(report.records_loaded, 4);
    }

    #[tokio::test]
    async fn staging_failure_still_loads() {
        let mut provider = MockForecastProviderPort::new();
        provider.expect_fetch_series().returning(|_, _| Ok(samples(1)));

        let mut staging = MockForecastStagingPort::new();
        staging
            .expect_stage()
            .returning(|_, _, _| Err(ApplicationError::Internal("disk full".into())));

        let mut forecasts = MockForecastStore::new();
        forecasts.expect_insert_batch().returning(|_, s| Ok(s.len()));

        let svc = IngestionService::new(
            Arc::new(location_store()),
            Arc::new(forecasts),
            Arc::new(provider),
            targets(),
        )
        .with_staging(Arc::new(staging));
        let report = svc.run(window()).await.unwrap();

        assert_eq!(report.locations_loaded, 2);
    }

    #[tokio::test]
    async fn run_from_staging_reads_staged_series() {
        let mut staging = MockForecastStagingPort::new();
        staging
            .expect_load()
            .with(eq("larnaca"), eq(7))
            .returning(|_, _| Ok(samples(5)));
        staging
            .expect_load()
            .with(eq("nicosia"), eq(7))
            .returning(|_, _| Err(ApplicationError::NotFound("staged series".into())));

        let mut forecasts = MockForecastStore::new();
        forecasts.expect_insert_batch().returning(|_, s| Ok(s.len()));

        let mut provider = MockForecastProviderPort::new();
        provider.expect_fetch_series().never();

        let svc = IngestionService::new(
            Arc::new(location_store()),
            Arc::new(forecasts),
            Arc::new(provider),
            targets(),
        )
        .with_staging(Arc::new(staging));
        let report = svc.run_from_staging(7).await.unwrap();

        assert_eq!(report.records_loaded, 5);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].name, "nicosia");
    }

    #[tokio::test]
    async fn run_from_staging_requires_staging() {
        let svc = IngestionService::new(
            Arc::new(MockLocationStore::new()),
            Arc::new(MockForecastStore::new()),
            Arc::new(MockForecastProviderPort::new()),
            targets(),
        );

        assert!(matches!(
            svc.run_from_staging(7).await,
            Err(ApplicationError::Configuration(_))
        ));
    }
}
