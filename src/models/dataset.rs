use chrono::NaiveDate;
use std::collections::BTreeSet;

use crate::error::{MonitorError, Result};
use crate::models::{Observation, Season};

/// Immutable collection of daily observations for any number of cities.
///
/// Order is whatever the producer supplied; analysis sorts its own copy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    observations: Vec<Observation>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    pub city_count: usize,
    pub record_count: usize,
    pub date_range: Option<(NaiveDate, NaiveDate)>,
}

impl Dataset {
    pub fn new(observations: Vec<Observation>) -> Self {
        Self { observations }
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Distinct city names, sorted
    pub fn cities(&self) -> Vec<String> {
        self.observations
            .iter()
            .map(|o| o.city.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn contains_city(&self, city: &str) -> bool {
        self.observations.iter().any(|o| o.city == city)
    }

    /// All observations for a city; an unknown city is an error
    pub fn city(&self, city: &str) -> Result<Vec<&Observation>> {
        let rows: Vec<&Observation> = self
            .observations
            .iter()
            .filter(|o| o.city == city)
            .collect();

        if rows.is_empty() {
            return Err(MonitorError::empty_city(city));
        }

        Ok(rows)
    }

    /// Observations for a city within one season. The city must exist, the season may be empty.
    pub fn city_season(&self, city: &str, season: Season) -> Result<Vec<&Observation>> {
        Ok(self
            .city(city)?
            .into_iter()
            .filter(|o| o.season == season)
            .collect())
    }

    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.observations.first()?.timestamp;
        Some(
            self.observations
                .iter()
                .fold((first, first), |(lo, hi), o| {
                    (lo.min(o.timestamp), hi.max(o.timestamp))
                }),
        )
    }

    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            city_count: self.cities().len(),
            record_count: self.len(),
            date_range: self.date_range(),
        }
    }
}

impl From<Vec<Observation>> for Dataset {
    fn from(observations: Vec<Observation>) -> Self {
        Self::new(observations)
    }
}

impl DatasetSummary {
    pub fn summary(&self) -> String {
        let period = match self.date_range {
            Some((start, end)) => format!("{} - {}", start, end),
            None => "no data".to_string(),
        };

        format!(
            "Cities: {}\nRecords: {}\nPeriod: {}",
            self.city_count, self.record_count, period
        )
    }
}
