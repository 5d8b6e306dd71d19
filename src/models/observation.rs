use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{MonitorError, Result};
use crate::models::Season;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Observation {
    #[validate(length(min = 1))]
    pub city: String,

    pub timestamp: NaiveDate,

    #[validate(range(min = -100.0, max = 100.0))]
    pub temperature: f64,

    pub season: Season,
}

impl Observation {
    /// Build an observation whose season is derived from the date.
    pub fn new(city: impl Into<String>, timestamp: NaiveDate, temperature: f64) -> Self {
        Self {
            city: city.into(),
            timestamp,
            temperature,
            season: Season::from_date(timestamp),
        }
    }

    pub fn has_consistent_season(&self) -> bool {
        self.season == Season::from_date(self.timestamp)
    }

    pub fn validate_integrity(&self) -> Result<()> {
        if !self.has_consistent_season() {
            return Err(MonitorError::DatasetStructure(format!(
                "{} on {} is labelled {} but the month maps to {}",
                self.city,
                self.timestamp,
                self.season,
                Season::from_date(self.timestamp)
            )));
        }

        if !self.temperature.is_finite() {
            return Err(MonitorError::DatasetStructure(format!(
                "{} on {} has non-finite temperature",
                self.city, self.timestamp
            )));
        }

        self.validate()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_derives_season() {
        let date = NaiveDate::from_ymd_opt(2015, 7, 4).unwrap();
        let obs = Observation::new("Paris", date, 21.5);
        assert_eq!(obs.season, Season::Summer);
        assert!(obs.validate_integrity().is_ok());
    }

    #[test]
    fn test_mislabelled_season_is_rejected() {
        let date = NaiveDate::from_ymd_opt(2015, 1, 10).unwrap();
        let mut obs = Observation::new("Paris", date, 3.0);
        obs.season = Season::Summer;
        assert!(!obs.has_consistent_season());
        assert!(matches!(
            obs.validate_integrity(),
            Err(MonitorError::DatasetStructure(_))
        ));
    }

    #[test]
    fn test_out_of_range_temperature() {
        let date = NaiveDate::from_ymd_opt(2015, 1, 10).unwrap();
        let obs = Observation::new("Paris", date, 250.0);
        assert!(matches!(
            obs.validate_integrity(),
            Err(MonitorError::Validation(_))
        ));

        let obs = Observation::new("", date, 2.0);
        assert!(obs.validate_integrity().is_err());
    }
}
