//! Timing of sequential blocking requests against a concurrent fan-out.

use std::time::{Duration, Instant};
use tracing::info;

use crate::error::Result;
use crate::weather::client::{CityWeather, WeatherClient};

#[derive(Debug, Clone)]
pub struct RequestModeComparison {
    pub sequential: Vec<CityWeather>,
    pub concurrent: Vec<CityWeather>,
    pub sequential_elapsed: Duration,
    pub concurrent_elapsed: Duration,
}

impl RequestModeComparison {
    /// Sequential time over concurrent time; 0 when the concurrent run took no
    /// measurable time.
    pub fn speedup(&self) -> f64 {
        let concurrent = self.concurrent_elapsed.as_secs_f64();
        if concurrent > 0.0 {
            self.sequential_elapsed.as_secs_f64() / concurrent
        } else {
            0.0
        }
    }

    pub fn successes(&self) -> (usize, usize) {
        let count = |results: &[CityWeather]| results.iter().filter(|r| r.outcome.is_success()).count();
        (count(&self.sequential), count(&self.concurrent))
    }
}

/// Fetch every city one after another in blocking mode, then all at once in
/// concurrent mode.
pub async fn compare_request_modes(
    client: &WeatherClient,
    cities: &[String],
) -> Result<RequestModeComparison> {
    client.validate_api_key()?;

    let blocking_client = client.clone();
    let blocking_cities = cities.to_vec();
    let started = Instant::now();
    let sequential = tokio::task::spawn_blocking(move || -> Result<Vec<CityWeather>> {
        blocking_cities
            .into_iter()
            .map(|city| {
                let outcome = blocking_client.fetch_blocking(&city)?;
                Ok(CityWeather { city, outcome })
            })
            .collect()
    })
    .await??;
    let sequential_elapsed = started.elapsed();

    let started = Instant::now();
    let concurrent = client.fetch_many(cities).await?;
    let concurrent_elapsed = started.elapsed();

    let comparison = RequestModeComparison {
        sequential,
        concurrent,
        sequential_elapsed,
        concurrent_elapsed,
    };

    info!(
        cities = cities.len(),
        sequential_ms = sequential_elapsed.as_millis() as u64,
        concurrent_ms = concurrent_elapsed.as_millis() as u64,
        speedup = comparison.speedup(),
        "request mode comparison complete"
    );

    Ok(comparison)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speedup_ratio() {
        let comparison = RequestModeComparison {
            sequential: Vec::new(),
            concurrent: Vec::new(),
            sequential_elapsed: Duration::from_millis(500),
            concurrent_elapsed: Duration::from_millis(125),
        };
        assert!((comparison.speedup() - 4.0).abs() < 1e-9);

        let instant = RequestModeComparison {
            concurrent_elapsed: Duration::ZERO,
            ..comparison
        };
        assert_eq!(instant.speedup(), 0.0);
    }
}
