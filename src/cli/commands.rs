use crate::analyzers::{BasicStats, TemperatureAnalyzer, TemperatureCheck};
use crate::cli::args::{Cli, Commands};
use crate::config::AppConfig;
use crate::error::Result;
use crate::processors::ParallelProcessor;
use crate::session::Session;
use crate::store::DataSource;
use crate::utils::constants::{baseline_cities, BENCHMARK_API_CITIES};
use crate::utils::progress::ProgressReporter;
use crate::weather::{compare_request_modes, CityWeather, RequestMode, WeatherOutcome};

pub async fn run(cli: Cli) -> Result<()> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(path) = cli.data_file {
        config.data.file = path;
    }
    if let Some(key) = cli.api_key {
        config.api.key = Some(key);
    }

    if let Commands::Regenerate { seed: Some(seed) } = cli.command {
        config.data.seed = Some(seed);
    }

    let progress = ProgressReporter::new(
        baseline_cities().len() as u64,
        "Loading temperature data...",
        false,
    );
    let mut session = Session::open(config, Some(&progress))?;
    progress.finish_and_clear();

    if let DataSource::Generated { reason } = session.source() {
        if !matches!(cli.command, Commands::Regenerate { .. }) {
            println!("⚠️  Generated fresh synthetic data ({})", reason);
        }
    }

    let analyzer = session.analyzer();
    let analysis = session.config().analysis.clone();

    match cli.command {
        Commands::Info => {
            println!("{}", session.dataset().summary().summary());
            println!("Data file: {}", session.config().data.file.display());
            println!("Cities: {}", analyzer.cities().join(", "));
        }

        Commands::Stats { city } => {
            let stats = analyzer.basic_stats(city.as_deref())?;
            println!("Statistics for {}", city.as_deref().unwrap_or("all cities"));
            print_stats(&stats);
        }

        Commands::Seasons { city } => {
            let seasons = analyzer.seasonal_stats(&city)?;
            println!("Seasonal statistics for {}", city);
            println!(
                "{:<8} {:>8} {:>8} {:>8} {:>8} {:>6}",
                "Season", "Mean", "Std", "Min", "Max", "Count"
            );
            for (season, stats) in &seasons {
                println!(
                    "{:<8} {:>8.2} {:>8.2} {:>8.2} {:>8.2} {:>6}",
                    season.as_str(),
                    stats.mean,
                    stats.std,
                    stats.min,
                    stats.max,
                    stats.count
                );
            }
        }

        Commands::Anomalies {
            city,
            sigma,
            season,
            limit,
        } => {
            let sigma = sigma.unwrap_or(analysis.sigma_threshold);

            match season {
                Some(season) => {
                    let season = season.into();
                    match analyzer.detect_seasonal_anomalies(&city, season, sigma)? {
                        Some(report) => {
                            println!(
                                "{} {}: bounds [{:.2}, {:.2}] °C",
                                city, season, report.bounds.lower, report.bounds.upper
                            );
                            println!(
                                "Anomalies: {} of {} ({:.2}%)",
                                report.n_anomalies, report.total, report.percent_anomalies
                            );
                            for anomaly in report.anomalies.iter().take(limit) {
                                println!(
                                    "  {}  {:>7.2} °C  ({:+.2})",
                                    anomaly.observation.timestamp,
                                    anomaly.observation.temperature,
                                    anomaly.deviation
                                );
                            }
                        }
                        None => println!("No {} observations for {}", season, city),
                    }
                }
                None => {
                    let report = analyzer.detect_anomalies(&city, sigma)?;
                    println!(
                        "{}: bounds [{:.2}, {:.2}] °C (mean {:.2}, {}σ)",
                        city, report.bounds.lower, report.bounds.upper, report.bounds.mean, sigma
                    );
                    println!(
                        "Anomalies: {} of {} ({:.2}%)",
                        report.n_anomalies,
                        report.series.len(),
                        report.percent_anomalies
                    );
                    for obs in report.anomalies.iter().take(limit) {
                        println!("  {}  {:>7.2} °C  {}", obs.timestamp, obs.temperature, obs.season);
                    }
                }
            }
        }

        Commands::MovingAverage {
            city,
            window,
            limit,
        } => {
            let window = window.unwrap_or(analysis.moving_average_window);
            let series = analyzer.moving_average(&city, window)?;
            println!("{}-day moving average for {} ({} points)", window, city, series.len());
            for point in series.iter().rev().take(limit).rev() {
                println!(
                    "  {}  {:>7.2} °C  avg {:>7.2} °C",
                    point.timestamp, point.temperature, point.moving_avg
                );
            }
        }

        Commands::Trend { city } => match analyzer.trend(&city) {
            Some(trend) => {
                println!("Trend for {}", city);
                println!("Direction: {}", trend.direction.as_str());
                println!("Slope: {:+.4} °C/year", trend.slope_per_year);
                println!("R²: {:.4}", trend.r_squared);
                println!("p-value: {:.4}", trend.p_value);
                if trend.is_significant {
                    println!("✅ Statistically significant");
                } else {
                    println!("Not statistically significant");
                }
            }
            None => println!("Not enough data to estimate a trend for {}", city),
        },

        Commands::Extremes { city } => {
            let extremes = analyzer.extremes(&city)?;
            println!(
                "Hottest: {:.2} °C on {}",
                extremes.hottest.temperature, extremes.hottest.timestamp
            );
            println!(
                "Coldest: {:.2} °C on {}",
                extremes.coldest.temperature, extremes.coldest.timestamp
            );
        }

        Commands::Monthly { city } => {
            println!("Monthly means for {}", city);
            for month in analyzer.monthly_means(&city)? {
                println!("  {:>2}  {:>7.2} °C  ({} days)", month.month, month.mean, month.count);
            }
        }

        Commands::Compare { cities, sigma } => {
            let cities = if cities.is_empty() {
                analyzer.cities()
            } else {
                cities
            };
            let sigma = sigma.unwrap_or(analysis.sigma_threshold);
            let comparisons = session.processor().compare_cities(&analyzer, &cities, sigma)?;

            println!(
                "{:<16} {:>8} {:>8} {:>8} {:>8} {:>10}",
                "City", "Mean", "Std", "Min", "Max", "Anomalies"
            );
            for c in &comparisons {
                println!(
                    "{:<16} {:>8.2} {:>8.2} {:>8.2} {:>8.2} {:>9.2}%",
                    c.city, c.stats.mean, c.stats.std, c.stats.min, c.stats.max, c.percent_anomalies
                );
            }
        }

        Commands::Weather { city, mode } => {
            let mode: RequestMode = mode.into();
            let outcome = match mode {
                RequestMode::Blocking => {
                    let client = session.client().clone();
                    let target = city.clone();
                    tokio::task::spawn_blocking(move || client.fetch_blocking(&target)).await??
                }
                RequestMode::Concurrent => session.client().fetch(&city).await?,
            };

            match &outcome {
                WeatherOutcome::Success { reading, elapsed, .. } => {
                    println!("{}", reading.summary());
                    println!("Request ({}) took {:.3}s", mode, elapsed.as_secs_f64());
                    let check =
                        analyzer.check_current_temperature(&city, reading.temperature, reading.season());
                    print_check(&city, check.as_ref());
                }
                WeatherOutcome::Failure { code, message, .. } => {
                    println!("❌ Request failed ({}): {}", code, message);
                }
            }
        }

        Commands::WeatherMany { cities } => {
            let spinner = ProgressReporter::new_spinner("Requesting current conditions...", false);
            let results = session.client().fetch_many(&cities).await?;
            spinner.finish_and_clear();
            for result in &results {
                print_city_weather(&analyzer, result);
            }
        }

        Commands::Benchmark { max_workers, api } => {
            let processor = match max_workers {
                Some(workers) => ParallelProcessor::new(workers),
                None => session.processor(),
            };
            let cities = analyzer.cities();

            let progress = ProgressReporter::new(cities.len() as u64, "Benchmarking...", false);
            let comparison = processor.compare_processing(&analyzer, &cities, Some(&progress))?;
            progress.finish_and_clear();

            println!("Processing {} cities:", cities.len());
            println!("  Sequential: {:.3} ms", comparison.sequential_elapsed.as_secs_f64() * 1000.0);
            println!(
                "  Parallel ({} workers): {:.3} ms",
                comparison.workers,
                comparison.parallel_elapsed.as_secs_f64() * 1000.0
            );
            println!("  Speedup: {:.2}x", comparison.speedup());

            if api {
                let api_cities: Vec<String> =
                    BENCHMARK_API_CITIES.iter().map(|c| c.to_string()).collect();
                let spinner = ProgressReporter::new_spinner("Timing API requests...", false);
                let comparison = compare_request_modes(session.client(), &api_cities).await?;
                spinner.finish_and_clear();
                let (seq_ok, conc_ok) = comparison.successes();

                println!("API requests for {} cities:", api_cities.len());
                println!(
                    "  Sequential: {:.3}s ({} succeeded)",
                    comparison.sequential_elapsed.as_secs_f64(),
                    seq_ok
                );
                println!(
                    "  Concurrent: {:.3}s ({} succeeded)",
                    comparison.concurrent_elapsed.as_secs_f64(),
                    conc_ok
                );
                println!("  Speedup: {:.2}x", comparison.speedup());
            }
        }

        Commands::Regenerate { .. } => {
            let progress = ProgressReporter::new(
                baseline_cities().len() as u64,
                "Generating synthetic data...",
                false,
            );
            let dataset = session.regenerate(Some(&progress))?;
            progress.finish_with_message(&format!("Generated {} records", dataset.len()));

            println!("{}", dataset.summary().summary());
            println!("Written to {}", session.config().data.file.display());
        }
    }

    Ok(())
}

fn print_stats(stats: &BasicStats) {
    println!("  Count: {}", stats.count);
    println!("  Mean:  {:.2} °C", stats.mean);
    println!("  Std:   {:.2} °C", stats.std);
    println!("  Min:   {:.2} °C", stats.min);
    println!("  25%:   {:.2} °C", stats.q25);
    println!("  50%:   {:.2} °C", stats.q50);
    println!("  75%:   {:.2} °C", stats.q75);
    println!("  Max:   {:.2} °C", stats.max);
}

fn print_check(city: &str, check: Option<&TemperatureCheck>) {
    match check {
        Some(check) => {
            println!(
                "{} baseline for {}: {:.2} ± {:.2} °C, normal range [{:.2}, {:.2}]",
                check.season,
                city,
                check.season_mean,
                check.season_std,
                check.bounds.lower,
                check.bounds.upper
            );
            if check.is_anomalous {
                println!(
                    "⚠️  {:.1} °C is anomalous ({:+.2} °C from the seasonal mean)",
                    check.current_temp, check.deviation
                );
            } else {
                println!("✅ {:.1} °C is within the normal range", check.current_temp);
            }
        }
        None => println!("No historical data for {} in this season", city),
    }
}

fn print_city_weather(analyzer: &TemperatureAnalyzer, result: &CityWeather) {
    match &result.outcome {
        WeatherOutcome::Success { reading, elapsed, .. } => {
            let verdict = match analyzer.check_current_temperature(
                &result.city,
                reading.temperature,
                reading.season(),
            ) {
                Some(check) if check.is_anomalous => "anomalous",
                Some(_) => "normal",
                None => "no baseline",
            };
            println!(
                "✅ {:<16} {:>6.1} °C  {:<24} {} ({:.3}s)",
                result.city,
                reading.temperature,
                reading.description,
                verdict,
                elapsed.as_secs_f64()
            );
        }
        WeatherOutcome::Failure { code, message, .. } => {
            println!("❌ {:<16} error {}: {}", result.city, code, message);
        }
    }
}
