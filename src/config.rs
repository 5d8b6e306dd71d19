//! Layered application configuration.
//!
//! Sources, lowest precedence first: built-in defaults, an optional TOML
//! file, then `TEMPMON__`-prefixed environment variables (`__` separates
//! nested keys, e.g. `TEMPMON__API__TIMEOUT_SECS=5`).

use chrono::NaiveDate;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use validator::Validate;

use crate::error::{MonitorError, Result};
use crate::utils::constants::{
    ANOMALY_SIGMA_THRESHOLD, API_KEY_ENV, DATA_DIR, DATA_FILE, GENERATION_SPREAD,
    GENERATION_START, GENERATION_YEARS, MOVING_AVERAGE_WINDOW, OPENWEATHER_API_URL,
    OPENWEATHER_LANG, OPENWEATHER_TIMEOUT_SECS, OPENWEATHER_UNITS,
};

const ENV_PREFIX: &str = "TEMPMON";

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    #[validate(nested)]
    pub data: DataConfig,
    #[validate(nested)]
    pub analysis: AnalysisConfig,
    #[validate(nested)]
    pub api: ApiConfig,
    #[validate(nested)]
    pub performance: PerformanceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DataConfig {
    pub file: PathBuf,
    pub start_date: NaiveDate,
    #[validate(range(min = 1, max = 200))]
    pub years: u32,
    #[validate(range(min = 0.0, max = 50.0))]
    pub spread: f64,
    /// Fixed RNG seed for reproducible datasets
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AnalysisConfig {
    #[validate(range(min = 0.0, max = 10.0))]
    pub sigma_threshold: f64,
    #[validate(range(min = 1, max = 3650))]
    pub moving_average_window: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ApiConfig {
    #[validate(length(min = 1))]
    pub url: String,
    #[validate(range(min = 1, max = 300))]
    pub timeout_secs: u64,
    pub units: String,
    pub lang: String,
    #[serde(default)]
    pub key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PerformanceConfig {
    #[validate(range(min = 1, max = 1024))]
    pub max_workers: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            analysis: AnalysisConfig::default(),
            api: ApiConfig::default(),
            performance: PerformanceConfig::default(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            file: Path::new(DATA_DIR).join(DATA_FILE),
            start_date: NaiveDate::parse_from_str(GENERATION_START, "%Y-%m-%d")
                .unwrap_or(NaiveDate::MIN),
            years: GENERATION_YEARS,
            spread: GENERATION_SPREAD,
            seed: None,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sigma_threshold: ANOMALY_SIGMA_THRESHOLD,
            moving_average_window: MOVING_AVERAGE_WINDOW,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: OPENWEATHER_API_URL.to_string(),
            timeout_secs: OPENWEATHER_TIMEOUT_SECS,
            units: OPENWEATHER_UNITS.to_string(),
            lang: OPENWEATHER_LANG.to_string(),
            key: None,
        }
    }
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            max_workers: num_cpus::get(),
        }
    }
}

impl AppConfig {
    /// Load defaults, then the optional file, then the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = Config::try_from(&AppConfig::default())?;

        let mut builder = Config::builder().add_source(defaults);
        if let Some(path) = path {
            if !path.exists() {
                return Err(MonitorError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            builder = builder.add_source(File::from(path).required(true));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// API key from configuration, falling back to `OPENWEATHER_API_KEY`
    pub fn api_key(&self) -> Option<String> {
        self.api
            .key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|k| !k.trim().is_empty())
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
