use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::models::Dataset;

/// Writes datasets as `city,timestamp,temperature,season` CSV.
pub struct DatasetWriter;

impl DatasetWriter {
    pub fn new() -> Self {
        Self
    }

    /// Replace the file at `path`. Data goes to a sibling temp file first so a
    /// failed write never leaves a truncated dataset behind.
    pub fn write(&self, dataset: &Dataset, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = path.with_extension("csv.tmp");
        {
            let file = File::create(&tmp_path)?;
            self.write_to(dataset, BufWriter::new(file))?;
        }
        fs::rename(&tmp_path, path)?;

        Ok(())
    }

    pub fn write_to<W: Write>(&self, dataset: &Dataset, writer: W) -> Result<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(true)
            .from_writer(writer);

        for observation in dataset.observations() {
            csv_writer.serialize(observation)?;
        }

        if dataset.is_empty() {
            csv_writer.write_record(crate::utils::constants::REQUIRED_COLUMNS)?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

impl Default for DatasetWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Observation;
    use chrono::NaiveDate;

    #[test]
    fn test_writes_header_and_rows() -> Result<()> {
        let date = NaiveDate::from_ymd_opt(2010, 3, 1).unwrap();
        let dataset = Dataset::new(vec![Observation::new("Rio de Janeiro", date, 25.125)]);

        let mut buffer = Vec::new();
        DatasetWriter::new().write_to(&dataset, &mut buffer)?;
        let text = String::from_utf8(buffer).unwrap();

        assert_eq!(
            text,
            "city,timestamp,temperature,season\nRio de Janeiro,2010-03-01,25.125,spring\n"
        );
        Ok(())
    }

    #[test]
    fn test_empty_dataset_still_has_header() -> Result<()> {
        let mut buffer = Vec::new();
        DatasetWriter::new().write_to(&Dataset::default(), &mut buffer)?;
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "city,timestamp,temperature,season\n"
        );
        Ok(())
    }

    #[test]
    fn test_write_creates_parent_directory() -> Result<()> {
        let dir = tempfile::TempDir::new()?;
        let path = dir.path().join("nested").join("data.csv");
        let date = NaiveDate::from_ymd_opt(2010, 3, 1).unwrap();
        let dataset = Dataset::new(vec![Observation::new("Paris", date, 10.0)]);

        DatasetWriter::new().write(&dataset, &path)?;

        assert!(path.exists());
        assert!(!path.with_extension("csv.tmp").exists());
        Ok(())
    }
}
