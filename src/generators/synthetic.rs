use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use tracing::debug;

use crate::config::DataConfig;
use crate::error::{MonitorError, Result};
use crate::models::{Dataset, Observation, Season};
use crate::utils::constants::{baseline_cities, seasonal_baseline};
use crate::utils::progress::ProgressReporter;

/// Daily temperatures drawn from N(seasonal baseline, spread) per city.
pub struct SyntheticGenerator {
    start: NaiveDate,
    years: u32,
    spread: f64,
    seed: Option<u64>,
}

impl SyntheticGenerator {
    pub fn new(start: NaiveDate, years: u32, spread: f64) -> Self {
        Self {
            start,
            years,
            spread,
            seed: None,
        }
    }

    pub fn from_config(config: &DataConfig) -> Self {
        Self {
            start: config.start_date,
            years: config.years,
            spread: config.spread,
            seed: config.seed,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// 365 consecutive days per year, leap days included in the count
    pub fn day_count(&self) -> usize {
        365 * self.years as usize
    }

    /// Generate every city of the baseline table
    pub fn generate(&self, progress: Option<&ProgressReporter>) -> Result<Dataset> {
        self.generate_cities(&baseline_cities(), progress)
    }

    pub fn generate_cities(
        &self,
        cities: &[String],
        progress: Option<&ProgressReporter>,
    ) -> Result<Dataset> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let days = self.day_count();
        let mut observations = Vec::with_capacity(cities.len() * days);

        for city in cities {
            let samplers = self.samplers_for(city)?;

            for offset in 0..days {
                let date = self.start + Duration::days(offset as i64);
                let season = Season::from_date(date);
                let temperature = samplers[season.index()].sample(&mut rng);
                observations.push(Observation {
                    city: city.clone(),
                    timestamp: date,
                    temperature,
                    season,
                });
            }

            if let Some(p) = progress {
                p.increment(1);
            }
            debug!(city = %city, days, "generated synthetic series");
        }

        Ok(Dataset::new(observations))
    }

    fn samplers_for(&self, city: &str) -> Result<[Normal<f64>; 4]> {
        let mut samplers = Vec::with_capacity(4);
        for season in Season::ALL {
            let mean = seasonal_baseline(city, season)
                .ok_or_else(|| MonitorError::UnknownCity(city.to_string()))?;
            let normal = Normal::new(mean, self.spread)
                .map_err(|e| MonitorError::Distribution(e.to_string()))?;
            samplers.push(normal);
        }

        samplers
            .try_into()
            .map_err(|_| MonitorError::Distribution("expected four seasonal samplers".to_string()))
    }
}

impl Default for SyntheticGenerator {
    fn default() -> Self {
        Self::from_config(&DataConfig::default())
    }
}
