//! Flat-file dataset cache with regenerate-on-failure semantics.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::DataConfig;
use crate::error::{MonitorError, Result};
use crate::generators::SyntheticGenerator;
use crate::models::Dataset;
use crate::readers::DatasetReader;
use crate::utils::progress::ProgressReporter;
use crate::writers::DatasetWriter;

/// Where a loaded dataset came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Cache,
    Generated { reason: String },
}

pub struct DatasetStore {
    path: PathBuf,
    generator: SyntheticGenerator,
    reader: DatasetReader,
    writer: DatasetWriter,
}

impl DatasetStore {
    pub fn new(path: impl Into<PathBuf>, generator: SyntheticGenerator) -> Self {
        Self {
            path: path.into(),
            generator,
            reader: DatasetReader::new(),
            writer: DatasetWriter::new(),
        }
    }

    pub fn from_config(config: &DataConfig) -> Self {
        Self::new(config.file.clone(), SyntheticGenerator::from_config(config))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the cached file, or regenerate and overwrite it when the file is
    /// missing, structurally invalid or empty. The file is never partially
    /// repaired. Failing to persist the fresh data is logged, not fatal.
    pub fn load(&self, progress: Option<&ProgressReporter>) -> Result<(Dataset, DataSource)> {
        let reason = match self.reader.read(&self.path) {
            Ok(dataset) if !dataset.is_empty() => {
                info!(
                    path = %self.path.display(),
                    records = dataset.len(),
                    "loaded cached dataset"
                );
                return Ok((dataset, DataSource::Cache));
            }
            Ok(_) => "cached dataset is empty".to_string(),
            Err(MonitorError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                "no cached dataset".to_string()
            }
            Err(e) => e.to_string(),
        };

        warn!(path = %self.path.display(), reason = %reason, "regenerating synthetic dataset");

        let dataset = self.generator.generate(progress)?;
        if let Err(e) = self.writer.write(&dataset, &self.path) {
            warn!(path = %self.path.display(), error = %e, "could not persist regenerated dataset");
        }

        Ok((dataset, DataSource::Generated { reason }))
    }

    /// Fresh synthetic data, written over the cache
    pub fn regenerate(&self, progress: Option<&ProgressReporter>) -> Result<Dataset> {
        let dataset = self.generator.generate(progress)?;
        self.persist(&dataset)?;
        info!(path = %self.path.display(), records = dataset.len(), "dataset regenerated");
        Ok(dataset)
    }

    pub fn persist(&self, dataset: &Dataset) -> Result<()> {
        self.writer.write(dataset, &self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> DatasetStore {
        let generator =
            SyntheticGenerator::new(NaiveDate::from_ymd_opt(2010, 1, 1).unwrap(), 1, 5.0)
                .with_seed(3);
        DatasetStore::new(dir.path().join("data").join("temperature_data.csv"), generator)
    }

    #[test]
    fn test_missing_file_is_generated_and_persisted() -> Result<()> {
        let dir = TempDir::new()?;
        let store = store_in(&dir);

        let (dataset, source) = store.load(None)?;
        assert!(matches!(source, DataSource::Generated { .. }));
        assert_eq!(dataset.len(), 15 * 365);
        assert!(store.path().exists());

        let (reloaded, source) = store.load(None)?;
        assert_eq!(source, DataSource::Cache);
        assert_eq!(reloaded.len(), dataset.len());
        Ok(())
    }

    #[test]
    fn test_invalid_structure_is_regenerated() -> Result<()> {
        let dir = TempDir::new()?;
        let store = store_in(&dir);
        fs::create_dir_all(store.path().parent().unwrap())?;
        fs::write(store.path(), "city,temp\nParis,3.0\n")?;

        let (dataset, source) = store.load(None)?;
        match source {
            DataSource::Generated { reason } => assert!(reason.contains("Missing required columns")),
            other => panic!("expected regeneration, got {:?}", other),
        }
        assert!(!dataset.is_empty());

        // The bad file was overwritten, not repaired
        let (_, source) = store.load(None)?;
        assert_eq!(source, DataSource::Cache);
        Ok(())
    }

    #[test]
    fn test_empty_file_is_regenerated() -> Result<()> {
        let dir = TempDir::new()?;
        let store = store_in(&dir);
        fs::create_dir_all(store.path().parent().unwrap())?;
        fs::write(store.path(), "city,timestamp,temperature,season\n")?;

        let (_, source) = store.load(None)?;
        assert_eq!(
            source,
            DataSource::Generated {
                reason: "cached dataset is empty".to_string()
            }
        );
        Ok(())
    }
}
