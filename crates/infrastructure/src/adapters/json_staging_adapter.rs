//! JSON file staging adapter
//!
//! One file per location and horizon: `{dir}/{name}_+{days}Days.json`.

use std::path::PathBuf;

use application::{error::ApplicationError, ports::ForecastStagingPort};
use async_trait::async_trait;
use domain::ForecastSample;
use tracing::{debug, instrument};

/// Stages forecast series as pretty-printed JSON files
#[derive(Debug, Clone)]
pub struct JsonFileStaging {
    dir: PathBuf,
}

impl JsonFileStaging {
    /// Stage under `dir`, created on first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File a series is staged in
    #[must_use]
    pub fn path_for(&self, location_name: &str, days: u32) -> PathBuf {
        self.dir.join(format!("{location_name}_+{days}Days.json"))
    }
}

#[async_trait]
impl ForecastStagingPort for JsonFileStaging {
    #[instrument(skip(self, samples), fields(samples = samples.len()))]
    async fn stage(
        &self,
        location_name: &str,
        days: u32,
        samples: &[ForecastSample],
    ) -> Result<(), ApplicationError> {
        let path = self.path_for(location_name, days);
        let body = serde_json::to_vec_pretty(samples)
            .map_err(|e| ApplicationError::Internal(format!("Failed to encode series: {e}")))?;

        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            ApplicationError::Internal(format!(
                "Failed to create staging directory {}: {e}",
                self.dir.display()
            ))
        })?;
        tokio::fs::write(&path, body).await.map_err(|e| {
            ApplicationError::Internal(format!("Failed to write {}: {e}", path.display()))
        })?;

        debug!(path = %path.display(), "Staged forecast series");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn load(
        &self,
        location_name: &str,
        days: u32,
    ) -> Result<Vec<ForecastSample>, ApplicationError> {
        let path = self.path_for(location_name, days);

        let body = tokio::fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ApplicationError::NotFound(format!("staged series {}", path.display()))
            } else {
                ApplicationError::Internal(format!("Failed to read {}: {e}", path.display()))
            }
        })?;

        let samples: Vec<ForecastSample> = serde_json::from_slice(&body).map_err(|e| {
            ApplicationError::Internal(format!("Invalid staged series {}: {e}", path.display()))
        })?;

        debug!(path = %path.display(), samples = samples.len(), "Loaded staged series");
        Ok(samples)
    }
}
