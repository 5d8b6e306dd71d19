use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::models::Season;
use crate::weather::RequestMode;

#[derive(Parser)]
#[command(name = "temperature-monitor")]
#[command(about = "Seasonal temperature statistics, anomaly detection and live weather checks")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Dataset CSV path (overrides configuration)")]
    pub data_file: Option<PathBuf>,

    #[arg(long, global = true, help = "OpenWeatherMap API key [default: OPENWEATHER_API_KEY]")]
    pub api_key: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show dataset size, cities and date range
    Info,

    /// Descriptive statistics for one city, or all cities combined
    Stats {
        #[arg(short = 'C', long)]
        city: Option<String>,
    },

    /// Per-season statistics for one city
    Seasons {
        #[arg(short = 'C', long)]
        city: String,
    },

    /// Flag observations outside mean ± sigma·std
    Anomalies {
        #[arg(short = 'C', long)]
        city: String,

        #[arg(short, long, help = "Sigma threshold [default: from configuration]")]
        sigma: Option<f64>,

        #[arg(long, help = "Use the baseline of one season instead of the whole city")]
        season: Option<SeasonArg>,

        #[arg(short, long, default_value = "20", help = "Maximum rows to print")]
        limit: usize,
    },

    /// Centered moving average of one city's series
    MovingAverage {
        #[arg(short = 'C', long)]
        city: String,

        #[arg(short, long, help = "Window in days [default: from configuration]")]
        window: Option<usize>,

        #[arg(short, long, default_value = "10", help = "Rows to print")]
        limit: usize,
    },

    /// Linear trend of one city's series
    Trend {
        #[arg(short = 'C', long)]
        city: String,
    },

    /// Hottest and coldest observations of one city
    Extremes {
        #[arg(short = 'C', long)]
        city: String,
    },

    /// Mean temperature per calendar month
    Monthly {
        #[arg(short = 'C', long)]
        city: String,
    },

    /// Side-by-side statistics for several cities
    Compare {
        #[arg(short = 'C', long = "city", help = "City to include (repeatable) [default: all]")]
        cities: Vec<String>,

        #[arg(short, long)]
        sigma: Option<f64>,
    },

    /// Current conditions for one city, checked against its seasonal baseline
    Weather {
        #[arg(short = 'C', long)]
        city: String,

        #[arg(short, long, value_enum, default_value_t = ModeArg::Sync)]
        mode: ModeArg,
    },

    /// Current conditions for several cities fetched concurrently
    WeatherMany {
        #[arg(short = 'C', long = "city", required = true)]
        cities: Vec<String>,
    },

    /// Time sequential against parallel processing
    Benchmark {
        #[arg(long, help = "Worker count [default: from configuration]")]
        max_workers: Option<usize>,

        #[arg(long, help = "Also compare blocking and concurrent API requests")]
        api: bool,
    },

    /// Replace the cached dataset with fresh synthetic data
    Regenerate {
        #[arg(long, help = "RNG seed for a reproducible dataset")]
        seed: Option<u64>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SeasonArg {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl From<SeasonArg> for Season {
    fn from(arg: SeasonArg) -> Self {
        match arg {
            SeasonArg::Winter => Season::Winter,
            SeasonArg::Spring => Season::Spring,
            SeasonArg::Summer => Season::Summer,
            SeasonArg::Autumn => Season::Autumn,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Sync,
    Async,
}

impl From<ModeArg> for RequestMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Sync => RequestMode::Blocking,
            ModeArg::Async => RequestMode::Concurrent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_anomalies_with_season() {
        let cli = Cli::try_parse_from([
            "temperature-monitor",
            "anomalies",
            "-C",
            "Moscow",
            "--season",
            "winter",
            "--sigma",
            "2.5",
        ])
        .unwrap();

        match cli.command {
            Commands::Anomalies {
                city, sigma, season, limit,
            } => {
                assert_eq!(city, "Moscow");
                assert_eq!(sigma, Some(2.5));
                assert_eq!(season.map(Season::from), Some(Season::Winter));
                assert_eq!(limit, 20);
            }
            _ => panic!("expected anomalies command"),
        }
    }

    #[test]
    fn test_parse_weather_many() {
        let cli = Cli::try_parse_from([
            "temperature-monitor",
            "weather-many",
            "-C",
            "London",
            "-C",
            "Paris",
        ])
        .unwrap();

        match cli.command {
            Commands::WeatherMany { cities } => assert_eq!(cities, vec!["London", "Paris"]),
            _ => panic!("expected weather-many command"),
        }
    }
}
