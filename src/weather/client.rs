use futures::future::join_all;
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::config::ApiConfig;
use crate::error::{MonitorError, Result};
use crate::models::CurrentReading;
use crate::utils::constants::MIN_API_KEY_LEN;
use crate::weather::response::{error_message, parse_current_conditions};

/// How a request was carried out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestMode {
    /// One blocking call on the current thread
    Blocking,
    /// Suspends at the network wait on the async runtime
    Concurrent,
}

impl RequestMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestMode::Blocking => "sync",
            RequestMode::Concurrent => "async",
        }
    }
}

impl std::fmt::Display for RequestMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one current-conditions request.
///
/// `code` is the HTTP status of a failed response, or 0 when no response
/// arrived at all.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum WeatherOutcome {
    Success {
        reading: CurrentReading,
        elapsed: Duration,
        mode: RequestMode,
    },
    Failure {
        code: u16,
        message: String,
        elapsed: Duration,
    },
}

impl WeatherOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, WeatherOutcome::Success { .. })
    }

    pub fn elapsed(&self) -> Duration {
        match self {
            WeatherOutcome::Success { elapsed, .. } | WeatherOutcome::Failure { elapsed, .. } => {
                *elapsed
            }
        }
    }

    pub fn reading(&self) -> Option<&CurrentReading> {
        match self {
            WeatherOutcome::Success { reading, .. } => Some(reading),
            WeatherOutcome::Failure { .. } => None,
        }
    }

    fn transport(error: impl std::fmt::Display, elapsed: Duration) -> Self {
        WeatherOutcome::Failure {
            code: 0,
            message: format!("Connection error: {}", error),
            elapsed,
        }
    }
}

/// Outcome tagged with the city it was requested for
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityWeather {
    pub city: String,
    pub outcome: WeatherOutcome,
}

/// Client for the current-conditions endpoint.
///
/// Both request modes send the same query and share the response parser.
/// No request is ever retried.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
    units: String,
    lang: String,
}

impl WeatherClient {
    pub fn new(config: &ApiConfig, api_key: Option<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            http,
            base_url: config.url.clone(),
            api_key: api_key.filter(|k| !k.is_empty()),
            timeout: config.timeout(),
            units: config.units.clone(),
            lang: config.lang.clone(),
        })
    }

    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        let key = api_key.into();
        self.api_key = if key.is_empty() { None } else { Some(key) };
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Checked before any request is sent.
    pub fn validate_api_key(&self) -> Result<&str> {
        let key = self.api_key.as_deref().ok_or(MonitorError::ApiKeyMissing)?;

        if key.len() < MIN_API_KEY_LEN {
            return Err(MonitorError::ApiKeyMalformed(format!(
                "expected at least {} characters, got {}",
                MIN_API_KEY_LEN,
                key.len()
            )));
        }
        if key.chars().any(char::is_whitespace) {
            return Err(MonitorError::ApiKeyMalformed(
                "key contains whitespace".to_string(),
            ));
        }

        Ok(key)
    }

    fn query<'a>(&'a self, city: &'a str, key: &'a str) -> [(&'static str, &'a str); 4] {
        [
            ("q", city),
            ("appid", key),
            ("units", self.units.as_str()),
            ("lang", self.lang.as_str()),
        ]
    }

    /// Fetch one city, blocking the calling thread for the network wait.
    ///
    /// Must not be called from inside an async runtime; use
    /// `tokio::task::spawn_blocking` there.
    pub fn fetch_blocking(&self, city: &str) -> Result<WeatherOutcome> {
        let key = self.validate_api_key()?;
        let http = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()?;

        debug!(city, mode = "sync", "requesting current conditions");
        let start = Instant::now();

        let response = match http
            .get(&self.base_url)
            .query(&self.query(city, key))
            .send()
        {
            Ok(response) => response,
            Err(e) => return Ok(self.log_outcome(city, WeatherOutcome::transport(e, start.elapsed()))),
        };

        let status = response.status().as_u16();
        let outcome = match response.text() {
            Ok(body) => interpret(status, &body, start.elapsed(), RequestMode::Blocking),
            Err(e) => WeatherOutcome::transport(e, start.elapsed()),
        };

        Ok(self.log_outcome(city, outcome))
    }

    /// Fetch one city, suspending during the network wait.
    pub async fn fetch(&self, city: &str) -> Result<WeatherOutcome> {
        let key = self.validate_api_key()?;

        debug!(city, mode = "async", "requesting current conditions");
        let start = Instant::now();

        let response = match self
            .http
            .get(&self.base_url)
            .query(&self.query(city, key))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return Ok(self.log_outcome(city, WeatherOutcome::transport(e, start.elapsed()))),
        };

        let status = response.status().as_u16();
        let outcome = match response.text().await {
            Ok(body) => interpret(status, &body, start.elapsed(), RequestMode::Concurrent),
            Err(e) => WeatherOutcome::transport(e, start.elapsed()),
        };

        Ok(self.log_outcome(city, outcome))
    }

    /// Fetch every city concurrently. Each city gets its own outcome; a
    /// failure for one never affects the others. Results keep input order.
    pub async fn fetch_many(&self, cities: &[String]) -> Result<Vec<CityWeather>> {
        self.validate_api_key()?;

        let start = Instant::now();
        let requests = cities.iter().map(|city| async move {
            let outcome = match self.fetch(city).await {
                Ok(outcome) => outcome,
                Err(e) => WeatherOutcome::Failure {
                    code: 0,
                    message: e.to_string(),
                    elapsed: Duration::ZERO,
                },
            };
            CityWeather {
                city: city.clone(),
                outcome,
            }
        });

        let results = join_all(requests).await;

        let succeeded = results.iter().filter(|r| r.outcome.is_success()).count();
        info!(
            cities = results.len(),
            succeeded,
            failed = results.len() - succeeded,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "fan-out complete"
        );

        Ok(results)
    }

    fn log_outcome(&self, city: &str, outcome: WeatherOutcome) -> WeatherOutcome {
        match &outcome {
            WeatherOutcome::Success { reading, elapsed, mode } => debug!(
                city,
                %mode,
                temperature = reading.temperature,
                elapsed_ms = elapsed.as_millis() as u64,
                "weather request succeeded"
            ),
            WeatherOutcome::Failure { code, message, .. } => {
                warn!(city, code, message = %message, "weather request failed")
            }
        }
        outcome
    }
}

/// Shared by both request modes
fn interpret(status: u16, body: &str, elapsed: Duration, mode: RequestMode) -> WeatherOutcome {
    if !(200..300).contains(&status) {
        return WeatherOutcome::Failure {
            code: status,
            message: error_message(status, body),
            elapsed,
        };
    }

    match parse_current_conditions(body) {
        Ok(reading) => WeatherOutcome::Success {
            reading,
            elapsed,
            mode,
        },
        Err(e) => WeatherOutcome::Failure {
            code: status,
            message: e.to_string(),
            elapsed,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_KEY: &str = "0123456789abcdef0123456789abcdef";

    fn client(key: Option<&str>) -> WeatherClient {
        WeatherClient::new(&ApiConfig::default(), key.map(str::to_string)).unwrap()
    }

    #[test]
    fn test_api_key_validation() {
        assert!(matches!(
            client(None).validate_api_key(),
            Err(MonitorError::ApiKeyMissing)
        ));
        assert!(matches!(
            client(Some("")).validate_api_key(),
            Err(MonitorError::ApiKeyMissing)
        ));
        assert!(matches!(
            client(Some("short")).validate_api_key(),
            Err(MonitorError::ApiKeyMalformed(_))
        ));
        assert!(matches!(
            client(Some("0123456789 abcdef0123456789")).validate_api_key(),
            Err(MonitorError::ApiKeyMalformed(_))
        ));
        assert_eq!(client(Some(VALID_KEY)).validate_api_key().unwrap(), VALID_KEY);
    }

    #[test]
    fn test_set_api_key() {
        let mut client = client(None);
        assert!(!client.has_api_key());

        client.set_api_key(VALID_KEY);
        assert!(client.validate_api_key().is_ok());

        client.set_api_key("");
        assert!(matches!(client.validate_api_key(), Err(MonitorError::ApiKeyMissing)));
    }

    #[test]
    fn test_missing_key_fails_before_request() {
        assert!(matches!(
            client(None).fetch_blocking("London"),
            Err(MonitorError::ApiKeyMissing)
        ));
    }

    #[tokio::test]
    async fn test_missing_key_fails_fan_out() {
        let cities = vec!["London".to_string(), "Paris".to_string()];
        assert!(matches!(
            client(None).fetch_many(&cities).await,
            Err(MonitorError::ApiKeyMissing)
        ));
    }

    #[test]
    fn test_interpret_http_error() {
        let outcome = interpret(
            401,
            r#"{"cod":401,"message":"Invalid API key"}"#,
            Duration::from_millis(5),
            RequestMode::Blocking,
        );
        assert_eq!(
            outcome,
            WeatherOutcome::Failure {
                code: 401,
                message: "Invalid API key".to_string(),
                elapsed: Duration::from_millis(5),
            }
        );
    }

    #[test]
    fn test_interpret_malformed_success_body() {
        let outcome = interpret(200, "not json", Duration::ZERO, RequestMode::Concurrent);
        match outcome {
            WeatherOutcome::Failure { code, .. } => assert_eq!(code, 200),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_mode_labels() {
        assert_eq!(RequestMode::Blocking.as_str(), "sync");
        assert_eq!(RequestMode::Concurrent.to_string(), "async");
    }
}
