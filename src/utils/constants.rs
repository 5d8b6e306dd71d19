use crate::models::Season;

/// Dataset file location
pub const DATA_DIR: &str = "./data";
pub const DATA_FILE: &str = "temperature_data.csv";

/// Required dataset columns
pub const COLUMN_CITY: &str = "city";
pub const COLUMN_TIMESTAMP: &str = "timestamp";
pub const COLUMN_TEMPERATURE: &str = "temperature";
pub const COLUMN_SEASON: &str = "season";
pub const REQUIRED_COLUMNS: [&str; 4] = [
    COLUMN_CITY,
    COLUMN_TIMESTAMP,
    COLUMN_TEMPERATURE,
    COLUMN_SEASON,
];

/// Analysis defaults
pub const ANOMALY_SIGMA_THRESHOLD: f64 = 2.0;
pub const SEASONAL_SIGMA_THRESHOLD: f64 = 2.0;
pub const MOVING_AVERAGE_WINDOW: usize = 30;
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Synthetic generation defaults
pub const GENERATION_START: &str = "2010-01-01";
pub const GENERATION_YEARS: u32 = 10;
pub const GENERATION_SPREAD: f64 = 5.0;

/// Weather provider defaults
pub const OPENWEATHER_API_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const OPENWEATHER_TIMEOUT_SECS: u64 = 10;
pub const OPENWEATHER_UNITS: &str = "metric";
pub const OPENWEATHER_LANG: &str = "ru";
pub const MIN_API_KEY_LEN: usize = 20;
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Cities used by the request-mode comparison
pub const BENCHMARK_API_CITIES: [&str; 5] = ["London", "Paris", "Berlin", "Moscow", "Tokyo"];

/// Expected seasonal mean temperature (°C) per city, ordered winter, spring, summer, autumn
pub const SEASONAL_BASELINES: [(&str, [f64; 4]); 15] = [
    ("New York", [0.0, 10.0, 25.0, 15.0]),
    ("London", [5.0, 11.0, 18.0, 12.0]),
    ("Paris", [4.0, 12.0, 20.0, 13.0]),
    ("Tokyo", [6.0, 15.0, 27.0, 18.0]),
    ("Moscow", [-10.0, 5.0, 18.0, 8.0]),
    ("Sydney", [12.0, 18.0, 25.0, 20.0]),
    ("Berlin", [0.0, 10.0, 20.0, 11.0]),
    ("Beijing", [-2.0, 13.0, 27.0, 16.0]),
    ("Rio de Janeiro", [20.0, 25.0, 30.0, 25.0]),
    ("Dubai", [20.0, 30.0, 40.0, 30.0]),
    ("Los Angeles", [15.0, 18.0, 25.0, 20.0]),
    ("Singapore", [27.0, 28.0, 28.0, 27.0]),
    ("Mumbai", [25.0, 30.0, 35.0, 30.0]),
    ("Cairo", [15.0, 25.0, 35.0, 25.0]),
    ("Mexico City", [12.0, 18.0, 20.0, 15.0]),
];

/// Look up the expected mean temperature for a city in a season
pub fn seasonal_baseline(city: &str, season: Season) -> Option<f64> {
    SEASONAL_BASELINES
        .iter()
        .find(|(name, _)| *name == city)
        .map(|(_, means)| means[season.index()])
}

/// All cities in the baseline table
pub fn baseline_cities() -> Vec<String> {
    SEASONAL_BASELINES
        .iter()
        .map(|(name, _)| name.to_string())
        .collect()
}
