use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Season;

/// Current conditions for one city as reported by the weather provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentReading {
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub description: String,
    pub wind_speed: f64,
    pub city: String,
    pub country: String,
    pub timestamp: DateTime<Utc>,
}

impl CurrentReading {
    /// Season of the observation time, used to pick the historical baseline.
    pub fn season(&self) -> Season {
        Season::from_date(self.timestamp.date_naive())
    }

    pub fn summary(&self) -> String {
        format!(
            "{}, {} at {}\n\
            Temperature: {:.1}°C (feels like {:.1}°C)\n\
            Humidity: {:.0}%\n\
            Pressure: {:.0} hPa\n\
            Wind: {:.1} m/s\n\
            Conditions: {}",
            self.city,
            self.country,
            self.timestamp.format("%Y-%m-%d %H:%M UTC"),
            self.temperature,
            self.feels_like,
            self.humidity,
            self.pressure,
            self.wind_speed,
            capitalize(&self.description)
        )
    }

    pub fn month(&self) -> u32 {
        self.timestamp.month()
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_reading_season_and_summary() {
        let reading = CurrentReading {
            temperature: 17.25,
            feels_like: 16.8,
            humidity: 72.0,
            pressure: 1012.0,
            description: "лёгкий дождь".to_string(),
            wind_speed: 4.1,
            city: "London".to_string(),
            country: "GB".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 10, 3, 12, 0, 0).unwrap(),
        };

        assert_eq!(reading.season(), Season::Autumn);
        assert_eq!(reading.month(), 10);
        let summary = reading.summary();
        assert!(summary.contains("17.2°C") || summary.contains("17.3°C"));
        assert!(summary.contains("Лёгкий дождь"));
    }
}
