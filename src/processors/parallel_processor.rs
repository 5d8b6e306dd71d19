use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::analyzers::{CityComparison, TemperatureAnalyzer};
use crate::error::{MonitorError, Result};
use crate::utils::progress::ProgressReporter;

/// Per-city (mean, std) pair
#[derive(Debug, Clone, PartialEq)]
pub struct CityAggregate {
    pub city: String,
    pub mean: f64,
    pub std: f64,
}

#[derive(Debug, Clone)]
pub struct ProcessingComparison {
    pub sequential: Vec<CityAggregate>,
    pub parallel: Vec<CityAggregate>,
    pub sequential_elapsed: Duration,
    pub parallel_elapsed: Duration,
    pub workers: usize,
}

impl ProcessingComparison {
    /// Sequential time over parallel time; 0 when the parallel run took no
    /// measurable time.
    pub fn speedup(&self) -> f64 {
        let parallel = self.parallel_elapsed.as_secs_f64();
        if parallel > 0.0 {
            self.sequential_elapsed.as_secs_f64() / parallel
        } else {
            0.0
        }
    }
}

/// Runs per-city work on a bounded rayon pool. Each task only reads the
/// shared analyzer.
pub struct ParallelProcessor {
    max_workers: usize,
}

impl ParallelProcessor {
    pub fn new(max_workers: usize) -> Self {
        Self {
            max_workers: max_workers.max(1),
        }
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    fn pool(&self) -> Result<rayon::ThreadPool> {
        rayon::ThreadPoolBuilder::new()
            .num_threads(self.max_workers)
            .build()
            .map_err(|e| MonitorError::Config(e.to_string()))
    }

    /// (mean, std) for every city on the worker pool, in input order
    pub fn city_aggregates(
        &self,
        analyzer: &TemperatureAnalyzer,
        cities: &[String],
        progress: Option<&ProgressReporter>,
    ) -> Result<Vec<CityAggregate>> {
        let pool = self.pool()?;
        let processed = AtomicUsize::new(0);

        let aggregates: Result<Vec<CityAggregate>> = pool.install(|| {
            cities
                .par_iter()
                .map(|city| {
                    let result = aggregate(analyzer, city);

                    let count = processed.fetch_add(1, Ordering::Relaxed) + 1;
                    if let Some(p) = progress {
                        p.increment(1);
                    }
                    debug!(city = %city, done = count, total = cities.len(), "city aggregated");

                    result
                })
                .collect()
        });

        aggregates
    }

    /// Same work as [`city_aggregates`](Self::city_aggregates) in a plain loop
    pub fn city_aggregates_sequential(
        &self,
        analyzer: &TemperatureAnalyzer,
        cities: &[String],
    ) -> Result<Vec<CityAggregate>> {
        cities.iter().map(|city| aggregate(analyzer, city)).collect()
    }

    /// Stats and anomaly counts for several cities, one task per city
    pub fn compare_cities(
        &self,
        analyzer: &TemperatureAnalyzer,
        cities: &[String],
        sigma: f64,
    ) -> Result<Vec<CityComparison>> {
        let pool = self.pool()?;
        pool.install(|| {
            cities
                .par_iter()
                .map(|city| analyzer.city_comparison(city, sigma))
                .collect()
        })
    }

    /// Time the sequential loop against the pool over the same cities
    pub fn compare_processing(
        &self,
        analyzer: &TemperatureAnalyzer,
        cities: &[String],
        progress: Option<&ProgressReporter>,
    ) -> Result<ProcessingComparison> {
        let started = Instant::now();
        let sequential = self.city_aggregates_sequential(analyzer, cities)?;
        let sequential_elapsed = started.elapsed();

        let started = Instant::now();
        let parallel = self.city_aggregates(analyzer, cities, progress)?;
        let parallel_elapsed = started.elapsed();

        let comparison = ProcessingComparison {
            sequential,
            parallel,
            sequential_elapsed,
            parallel_elapsed,
            workers: self.max_workers,
        };

        info!(
            cities = cities.len(),
            workers = self.max_workers,
            sequential_us = sequential_elapsed.as_micros() as u64,
            parallel_us = parallel_elapsed.as_micros() as u64,
            speedup = comparison.speedup(),
            "processing comparison complete"
        );

        Ok(comparison)
    }
}

impl Default for ParallelProcessor {
    fn default() -> Self {
        Self::new(num_cpus::get())
    }
}

fn aggregate(analyzer: &TemperatureAnalyzer, city: &str) -> Result<CityAggregate> {
    let (mean, std) = analyzer.city_mean_std(city)?;
    Ok(CityAggregate {
        city: city.to_string(),
        mean,
        std,
    })
}
