use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use temperature_monitor::analyzers::{centered_moving_average, TemperatureAnalyzer};
use temperature_monitor::generators::SyntheticGenerator;
use temperature_monitor::models::{Dataset, Season};
use temperature_monitor::processors::ParallelProcessor;

fn dataset(years: u32) -> Dataset {
    SyntheticGenerator::new(NaiveDate::from_ymd_opt(2010, 1, 1).unwrap(), years, 5.0)
        .with_seed(42)
        .generate(None)
        .unwrap()
}

fn benchmark_analyzer(c: &mut Criterion) {
    let analyzer = TemperatureAnalyzer::new(&dataset(10));

    c.bench_function("basic_stats_city", |b| {
        b.iter(|| black_box(analyzer.basic_stats(Some("London")).unwrap()))
    });

    c.bench_function("seasonal_stats_city", |b| {
        b.iter(|| black_box(analyzer.seasonal_stats("London").unwrap()))
    });

    c.bench_function("detect_anomalies_city", |b| {
        b.iter(|| black_box(analyzer.detect_anomalies("London", 2.0).unwrap().n_anomalies))
    });

    c.bench_function("check_current_temperature", |b| {
        b.iter(|| {
            black_box(analyzer.check_current_temperature("London", black_box(28.0), Season::Summer))
        })
    });

    c.bench_function("trend_city", |b| {
        b.iter(|| black_box(analyzer.trend("London")))
    });
}

fn benchmark_moving_average(c: &mut Criterion) {
    let values: Vec<f64> = dataset(10)
        .observations()
        .iter()
        .filter(|o| o.city == "Tokyo")
        .map(|o| o.temperature)
        .collect();

    let mut group = c.benchmark_group("moving_average_by_window");
    for &window in &[1usize, 7, 30, 365] {
        group.bench_with_input(BenchmarkId::new("window", window), &window, |b, &w| {
            b.iter(|| black_box(centered_moving_average(&values, w).len()))
        });
    }
    group.finish();
}

fn benchmark_worker_pool(c: &mut Criterion) {
    let analyzer = TemperatureAnalyzer::new(&dataset(10));
    let cities = analyzer.cities();

    let mut group = c.benchmark_group("city_aggregates");
    group.bench_function("sequential", |b| {
        let processor = ParallelProcessor::new(1);
        b.iter(|| black_box(processor.city_aggregates_sequential(&analyzer, &cities).unwrap()))
    });
    for &workers in &[2usize, 4, 8] {
        group.bench_with_input(BenchmarkId::new("parallel", workers), &workers, |b, &w| {
            let processor = ParallelProcessor::new(w);
            b.iter(|| black_box(processor.city_aggregates(&analyzer, &cities, None).unwrap()))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_analyzer,
    benchmark_moving_average,
    benchmark_worker_pool
);
criterion_main!(benches);
