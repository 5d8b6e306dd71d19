//! Per-run context: configuration, the dataset snapshot and the weather
//! client, threaded explicitly into every command.

use std::sync::Arc;
use tracing::info;

use crate::analyzers::TemperatureAnalyzer;
use crate::config::AppConfig;
use crate::error::Result;
use crate::models::Dataset;
use crate::processors::ParallelProcessor;
use crate::store::{DataSource, DatasetStore};
use crate::utils::progress::ProgressReporter;
use crate::weather::WeatherClient;

pub struct Session {
    config: AppConfig,
    store: DatasetStore,
    dataset: Arc<Dataset>,
    source: DataSource,
    client: WeatherClient,
}

impl Session {
    /// Load (or regenerate) the dataset and build the client. Data-loading
    /// problems are recovered here and never make opening fail on their own.
    pub fn open(config: AppConfig, progress: Option<&ProgressReporter>) -> Result<Self> {
        let store = DatasetStore::from_config(&config.data);
        let (dataset, source) = store.load(progress)?;
        let client = WeatherClient::new(&config.api, config.api_key())?;

        info!(
            records = dataset.len(),
            cities = dataset.cities().len(),
            source = ?source,
            "session opened"
        );

        Ok(Self {
            config,
            store,
            dataset: Arc::new(dataset),
            source,
            client,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Shared read-only snapshot
    pub fn dataset(&self) -> Arc<Dataset> {
        Arc::clone(&self.dataset)
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    pub fn client(&self) -> &WeatherClient {
        &self.client
    }

    pub fn analyzer(&self) -> TemperatureAnalyzer {
        TemperatureAnalyzer::new(&self.dataset)
    }

    pub fn processor(&self) -> ParallelProcessor {
        ParallelProcessor::new(self.config.performance.max_workers)
    }

    /// Replace the snapshot with fresh synthetic data and overwrite the cache.
    /// Snapshots handed out earlier keep their old contents.
    pub fn regenerate(&mut self, progress: Option<&ProgressReporter>) -> Result<Arc<Dataset>> {
        let dataset = self.store.regenerate(progress)?;
        self.dataset = Arc::new(dataset);
        self.source = DataSource::Generated {
            reason: "regeneration requested".to_string(),
        };
        Ok(self.dataset())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> AppConfig {
        let mut config = AppConfig::default();
        config.data.file = dir.path().join("temperature_data.csv");
        config.data.years = 1;
        config.data.seed = Some(11);
        config.api.key = Some("abcdefghijklmnopqrstuvwxyz".to_string());
        config
    }

    #[test]
    fn test_open_generates_then_reads_cache() -> Result<()> {
        let dir = TempDir::new()?;

        let session = Session::open(config_in(&dir), None)?;
        assert!(matches!(session.source(), DataSource::Generated { .. }));
        assert_eq!(session.dataset().len(), 15 * 365);
        assert!(session.client().has_api_key());

        let session = Session::open(config_in(&dir), None)?;
        assert_eq!(session.source(), &DataSource::Cache);
        Ok(())
    }

    #[test]
    fn test_regenerate_replaces_snapshot() -> Result<()> {
        let dir = TempDir::new()?;
        let mut config = config_in(&dir);
        config.data.seed = None;

        let mut session = Session::open(config, None)?;
        let before = session.dataset();
        let after = session.regenerate(None)?;

        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(before.len(), after.len());
        assert_ne!(*before, *after);
        Ok(())
    }
}
