//! Current-conditions payload of the OpenWeatherMap `/data/2.5/weather` endpoint.

use chrono::DateTime;
use serde::Deserialize;

use crate::error::{MonitorError, Result};
use crate::models::CurrentReading;

#[derive(Debug, Deserialize)]
struct ProviderResponse {
    main: MainBlock,
    weather: Vec<ConditionBlock>,
    wind: WindBlock,
    name: String,
    sys: SysBlock,
    dt: i64,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f64,
    feels_like: f64,
    humidity: f64,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct ConditionBlock {
    description: String,
}

#[derive(Debug, Deserialize)]
struct WindBlock {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct SysBlock {
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    message: Option<String>,
}

/// Parse a successful response body into a reading.
pub fn parse_current_conditions(body: &str) -> Result<CurrentReading> {
    let response: ProviderResponse = serde_json::from_str(body)?;

    let description = response
        .weather
        .into_iter()
        .next()
        .map(|w| w.description)
        .ok_or_else(|| MonitorError::InvalidResponse("empty weather list".to_string()))?;

    let timestamp = DateTime::from_timestamp(response.dt, 0).ok_or_else(|| {
        MonitorError::InvalidResponse(format!("timestamp {} out of range", response.dt))
    })?;

    Ok(CurrentReading {
        temperature: response.main.temp,
        feels_like: response.main.feels_like,
        humidity: response.main.humidity,
        pressure: response.main.pressure,
        description,
        wind_speed: response.wind.speed,
        city: response.name,
        country: response.sys.country,
        timestamp,
    })
}

/// Message for a non-success response: the provider's own `message` when the
/// body carries one, otherwise a generic status line.
pub fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<ProviderError>(body)
        .ok()
        .and_then(|e| e.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("HTTP error {}", status))
}
