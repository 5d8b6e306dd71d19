use chrono::NaiveDate;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{MonitorError, Result};
use crate::models::{Dataset, Observation, Season};
use crate::utils::constants::REQUIRED_COLUMNS;

/// Row as stored on disk; fields are matched by header name so extra
/// columns and any column order are accepted.
#[derive(Debug, Deserialize)]
struct DatasetRow {
    city: String,
    timestamp: String,
    temperature: f64,
    season: String,
}

pub struct DatasetReader {
    check_seasons: bool,
}

impl DatasetReader {
    pub fn new() -> Self {
        Self {
            check_seasons: true,
        }
    }

    pub fn with_season_check(check_seasons: bool) -> Self {
        Self { check_seasons }
    }

    /// Read a dataset file. Structural problems surface as
    /// [`MonitorError::DatasetStructure`]; an empty file with valid headers
    /// yields an empty dataset.
    pub fn read(&self, path: &Path) -> Result<Dataset> {
        let file = File::open(path)?;
        self.read_from(BufReader::new(file))
    }

    pub fn read_from<R: Read>(&self, reader: R) -> Result<Dataset> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|e| MonitorError::DatasetStructure(format!("Unreadable header: {}", e)))?
            .clone();

        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|col| !headers.iter().any(|h| h == *col))
            .collect();
        if !missing.is_empty() {
            return Err(MonitorError::DatasetStructure(format!(
                "Missing required columns: {}",
                missing.join(", ")
            )));
        }

        let mut observations = Vec::new();
        for (line, row) in csv_reader.deserialize::<DatasetRow>().enumerate() {
            let row = row.map_err(|e| {
                MonitorError::DatasetStructure(format!("Row {}: {}", line + 2, e))
            })?;
            let observation = self.parse_row(row, line + 2)?;
            observations.push(observation);
        }

        Ok(Dataset::new(observations))
    }

    fn parse_row(&self, row: DatasetRow, line: usize) -> Result<Observation> {
        let timestamp = parse_timestamp(&row.timestamp).ok_or_else(|| {
            MonitorError::DatasetStructure(format!(
                "Row {}: invalid timestamp '{}'",
                line, row.timestamp
            ))
        })?;

        let season: Season = row.season.parse().map_err(|_| {
            MonitorError::DatasetStructure(format!("Row {}: invalid season '{}'", line, row.season))
        })?;

        let observation = Observation {
            city: row.city,
            timestamp,
            temperature: row.temperature,
            season,
        };

        if self.check_seasons {
            observation.validate_integrity().map_err(|e| match e {
                MonitorError::DatasetStructure(msg) => {
                    MonitorError::DatasetStructure(format!("Row {}: {}", line, msg))
                }
                other => MonitorError::DatasetStructure(format!("Row {}: {}", line, other)),
            })?;
        }

        Ok(observation)
    }
}

impl Default for DatasetReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Accepts `YYYY-MM-DD` optionally followed by a time part
/// (`2010-01-01 00:00:00`, `2010-01-01T00:00:00`).
pub fn parse_timestamp(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let date_part = raw.get(..10)?;
    let rest = &raw[10..];
    if !(rest.is_empty() || rest.starts_with(' ') || rest.starts_with('T')) {
        return None;
    }
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}
