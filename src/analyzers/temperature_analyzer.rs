use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::analyzers::statistics::{self, linear_regression, quantile_sorted, sample_std, sorted_copy};
use crate::error::{MonitorError, Result};
use crate::models::{Dataset, Observation, Season};
use crate::utils::constants::{DAYS_PER_YEAR, SEASONAL_SIGMA_THRESHOLD, SIGNIFICANCE_LEVEL};
use chrono::{Datelike, NaiveDate};

const ALL_CITIES: &str = "all cities";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BasicStats {
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
    pub q25: f64,
    pub q50: f64,
    pub q75: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnomalyBounds {
    pub mean: f64,
    pub std: f64,
    pub sigma: f64,
    /// `sigma * std`, the one radius both bounds are derived from
    pub half_width: f64,
    pub lower: f64,
    pub upper: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovingAveragePoint {
    pub timestamp: NaiveDate,
    pub temperature: f64,
    pub season: Season,
    pub moving_avg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlaggedObservation {
    pub observation: Observation,
    pub is_anomaly: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnomalyReport {
    pub city: String,
    pub bounds: AnomalyBounds,
    /// Every observation of the city in time order, with its verdict
    pub series: Vec<FlaggedObservation>,
    pub anomalies: Vec<Observation>,
    pub n_anomalies: usize,
    pub percent_anomalies: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonalAnomaly {
    pub observation: Observation,
    /// Signed distance from the seasonal mean
    pub deviation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonalAnomalyReport {
    pub city: String,
    pub season: Season,
    pub bounds: AnomalyBounds,
    pub total: usize,
    /// Sorted by absolute deviation, largest first
    pub anomalies: Vec<SeasonalAnomaly>,
    pub n_anomalies: usize,
    pub percent_anomalies: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TemperatureCheck {
    pub current_temp: f64,
    pub season: Season,
    pub season_mean: f64,
    pub season_std: f64,
    pub bounds: AnomalyBounds,
    pub is_anomalous: bool,
    pub deviation: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Warming,
    Cooling,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendReport {
    pub slope_per_day: f64,
    pub slope_per_year: f64,
    pub intercept: f64,
    pub r_squared: f64,
    pub p_value: f64,
    pub direction: TrendDirection,
    pub is_significant: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extremes {
    pub hottest: Observation,
    pub coldest: Observation,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyMean {
    pub month: u32,
    pub mean: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityComparison {
    pub city: String,
    pub stats: BasicStats,
    pub n_anomalies: usize,
    pub percent_anomalies: f64,
}

impl AnomalyBounds {
    /// `lower` and `upper` are each one rounding away from
    /// `mean ∓ half_width`, so `upper - mean` and `mean - lower` agree to
    /// within `4 * f64::EPSILON * (|mean| + half_width)`.
    pub fn new(mean: f64, std: f64, sigma: f64) -> Self {
        let half_width = sigma * std;
        Self {
            mean,
            std,
            sigma,
            half_width,
            lower: mean - half_width,
            upper: mean + half_width,
        }
    }

    /// Strictly outside the band; values on a bound are normal
    pub fn is_anomalous(&self, value: f64) -> bool {
        value < self.lower || value > self.upper
    }
}

impl TrendDirection {
    pub fn from_slope(slope: f64) -> Self {
        if slope > 0.0 {
            TrendDirection::Warming
        } else {
            TrendDirection::Cooling
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Warming => "warming",
            TrendDirection::Cooling => "cooling",
        }
    }
}

/// Statistics over one immutable dataset snapshot.
///
/// The snapshot is copied and sorted by timestamp once; every query is a pure
/// function of that copy.
pub struct TemperatureAnalyzer {
    observations: Vec<Observation>,
    by_city: HashMap<String, Vec<usize>>,
}

impl TemperatureAnalyzer {
    pub fn new(dataset: &Dataset) -> Self {
        let mut observations = dataset.observations().to_vec();
        observations.sort_by_key(|o| o.timestamp);

        let mut by_city: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, obs) in observations.iter().enumerate() {
            by_city.entry(obs.city.clone()).or_default().push(i);
        }

        Self {
            observations,
            by_city,
        }
    }

    pub fn cities(&self) -> Vec<String> {
        let mut cities: Vec<String> = self.by_city.keys().cloned().collect();
        cities.sort();
        cities
    }

    /// Time-ordered observations of one city
    fn city_rows(&self, city: &str) -> Result<Vec<&Observation>> {
        self.by_city
            .get(city)
            .filter(|idx| !idx.is_empty())
            .map(|idx| idx.iter().map(|&i| &self.observations[i]).collect())
            .ok_or_else(|| MonitorError::empty_city(city))
    }

    pub fn basic_stats(&self, city: Option<&str>) -> Result<BasicStats> {
        let temps: Vec<f64> = match city {
            Some(name) => self
                .city_rows(name)?
                .iter()
                .map(|o| o.temperature)
                .collect(),
            None => self.observations.iter().map(|o| o.temperature).collect(),
        };

        describe(&temps).ok_or_else(|| MonitorError::empty_city(city.unwrap_or(ALL_CITIES)))
    }

    /// Per-season stats; seasons without observations are left out
    pub fn seasonal_stats(&self, city: &str) -> Result<BTreeMap<Season, BasicStats>> {
        let rows = self.city_rows(city)?;

        let mut grouped: BTreeMap<Season, Vec<f64>> = BTreeMap::new();
        for obs in rows {
            grouped.entry(obs.season).or_default().push(obs.temperature);
        }

        Ok(grouped
            .into_iter()
            .filter_map(|(season, temps)| describe(&temps).map(|stats| (season, stats)))
            .collect())
    }

    /// Centered rolling mean. The window shrinks at both ends instead of
    /// dropping points, so the output has one entry per observation. For even
    /// windows the extra sample sits before the centre.
    pub fn moving_average(&self, city: &str, window: usize) -> Result<Vec<MovingAveragePoint>> {
        if window == 0 {
            return Err(MonitorError::InvalidWindow(window));
        }

        let rows = self.city_rows(city)?;
        let temps: Vec<f64> = rows.iter().map(|o| o.temperature).collect();
        let averages = centered_moving_average(&temps, window);

        Ok(rows
            .into_iter()
            .zip(averages)
            .map(|(obs, moving_avg)| MovingAveragePoint {
                timestamp: obs.timestamp,
                temperature: obs.temperature,
                season: obs.season,
                moving_avg,
            })
            .collect())
    }

    /// Flag observations outside mean ± sigma·std of the whole city series.
    ///
    /// Not seasonally adjusted: a normal summer day in a city with cold winters
    /// can be flagged. See [`Self::detect_seasonal_anomalies`] for the per-season variant.
    pub fn detect_anomalies(&self, city: &str, sigma: f64) -> Result<AnomalyReport> {
        check_sigma(sigma)?;

        let rows = self.city_rows(city)?;
        let temps: Vec<f64> = rows.iter().map(|o| o.temperature).collect();
        let bounds = bounds_for(&temps, sigma);

        let series: Vec<FlaggedObservation> = rows
            .into_iter()
            .map(|obs| FlaggedObservation {
                is_anomaly: bounds.is_anomalous(obs.temperature),
                observation: obs.clone(),
            })
            .collect();

        let anomalies: Vec<Observation> = series
            .iter()
            .filter(|f| f.is_anomaly)
            .map(|f| f.observation.clone())
            .collect();

        let n_anomalies = anomalies.len();
        let percent_anomalies = percentage(n_anomalies, series.len());

        Ok(AnomalyReport {
            city: city.to_string(),
            bounds,
            series,
            anomalies,
            n_anomalies,
            percent_anomalies,
        })
    }

    /// Flag observations of one season against that season's own baseline
    pub fn detect_seasonal_anomalies(
        &self,
        city: &str,
        season: Season,
        sigma: f64,
    ) -> Result<Option<SeasonalAnomalyReport>> {
        check_sigma(sigma)?;

        let rows: Vec<&Observation> = self
            .city_rows(city)?
            .into_iter()
            .filter(|o| o.season == season)
            .collect();

        if rows.is_empty() {
            return Ok(None);
        }

        let temps: Vec<f64> = rows.iter().map(|o| o.temperature).collect();
        let bounds = bounds_for(&temps, sigma);

        let mut anomalies: Vec<SeasonalAnomaly> = rows
            .iter()
            .filter(|o| bounds.is_anomalous(o.temperature))
            .map(|o| SeasonalAnomaly {
                observation: (*o).clone(),
                deviation: o.temperature - bounds.mean,
            })
            .collect();
        anomalies.sort_by(|a, b| b.deviation.abs().total_cmp(&a.deviation.abs()));

        let n_anomalies = anomalies.len();

        Ok(Some(SeasonalAnomalyReport {
            city: city.to_string(),
            season,
            bounds,
            total: rows.len(),
            anomalies,
            n_anomalies,
            percent_anomalies: percentage(n_anomalies, rows.len()),
        }))
    }

    /// Compare one live value against the (city, season) history at 2 sigma.
    /// `None` when there is no history for that pair.
    pub fn check_current_temperature(
        &self,
        city: &str,
        current_temp: f64,
        season: Season,
    ) -> Option<TemperatureCheck> {
        let temps: Vec<f64> = self
            .city_rows(city)
            .ok()?
            .into_iter()
            .filter(|o| o.season == season)
            .map(|o| o.temperature)
            .collect();

        if temps.is_empty() {
            return None;
        }

        let bounds = bounds_for(&temps, SEASONAL_SIGMA_THRESHOLD);

        Some(TemperatureCheck {
            current_temp,
            season,
            season_mean: bounds.mean,
            season_std: bounds.std,
            bounds,
            is_anomalous: bounds.is_anomalous(current_temp),
            deviation: current_temp - bounds.mean,
        })
    }

    /// Least-squares trend of temperature against days since the first
    /// observation. `None` when there are fewer than two observations or they
    /// all share one date.
    pub fn trend(&self, city: &str) -> Option<TrendReport> {
        let rows = self.city_rows(city).ok()?;
        let first = rows.first()?.timestamp;

        let days: Vec<f64> = rows
            .iter()
            .map(|o| o.timestamp.signed_duration_since(first).num_days() as f64)
            .collect();
        let temps: Vec<f64> = rows.iter().map(|o| o.temperature).collect();

        let fit = linear_regression(&days, &temps)?;

        Some(TrendReport {
            slope_per_day: fit.slope,
            slope_per_year: fit.slope * DAYS_PER_YEAR,
            intercept: fit.intercept,
            r_squared: fit.r_value * fit.r_value,
            p_value: fit.p_value,
            direction: TrendDirection::from_slope(fit.slope),
            is_significant: fit.p_value < SIGNIFICANCE_LEVEL,
        })
    }

    pub fn extremes(&self, city: &str) -> Result<Extremes> {
        let rows = self.city_rows(city)?;
        let mut hottest = rows[0];
        let mut coldest = rows[0];

        for obs in &rows[1..] {
            if obs.temperature > hottest.temperature {
                hottest = obs;
            }
            if obs.temperature < coldest.temperature {
                coldest = obs;
            }
        }

        Ok(Extremes {
            hottest: hottest.clone(),
            coldest: coldest.clone(),
        })
    }

    /// Mean temperature per calendar month; months without data are omitted
    pub fn monthly_means(&self, city: &str) -> Result<Vec<MonthlyMean>> {
        let mut grouped: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
        for obs in self.city_rows(city)? {
            grouped
                .entry(obs.timestamp.month())
                .or_default()
                .push(obs.temperature);
        }

        Ok(grouped
            .into_iter()
            .filter_map(|(month, temps)| {
                statistics::mean(&temps).map(|mean| MonthlyMean {
                    month,
                    mean,
                    count: temps.len(),
                })
            })
            .collect())
    }

    /// Basic stats plus anomaly counts for one city
    pub fn city_comparison(&self, city: &str, sigma: f64) -> Result<CityComparison> {
        let stats = self.basic_stats(Some(city))?;
        let anomalies = self.detect_anomalies(city, sigma)?;

        Ok(CityComparison {
            city: city.to_string(),
            stats,
            n_anomalies: anomalies.n_anomalies,
            percent_anomalies: anomalies.percent_anomalies,
        })
    }

    /// (mean, std) of one city, the unit of work for pool benchmarks
    pub fn city_mean_std(&self, city: &str) -> Result<(f64, f64)> {
        let temps: Vec<f64> = self
            .city_rows(city)?
            .iter()
            .map(|o| o.temperature)
            .collect();
        let mean = statistics::mean(&temps).ok_or_else(|| MonitorError::empty_city(city))?;
        Ok((mean, sample_std(&temps)))
    }
}

fn describe(values: &[f64]) -> Option<BasicStats> {
    let mean = statistics::mean(values)?;
    let sorted = sorted_copy(values);

    Some(BasicStats {
        mean,
        std: sample_std(values),
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        count: values.len(),
        q25: quantile_sorted(&sorted, 0.25)?,
        q50: quantile_sorted(&sorted, 0.5)?,
        q75: quantile_sorted(&sorted, 0.75)?,
    })
}

fn bounds_for(values: &[f64], sigma: f64) -> AnomalyBounds {
    let mean = statistics::mean(values).unwrap_or(f64::NAN);
    AnomalyBounds::new(mean, sample_std(values), sigma)
}

fn check_sigma(sigma: f64) -> Result<()> {
    if !sigma.is_finite() || sigma < 0.0 {
        return Err(MonitorError::InvalidSigma(sigma));
    }
    Ok(())
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// Window for index `i` spans `[i + 1 + offset - window, i + offset]`,
/// clipped to the series, with `offset = (window - 1) / 2`.
pub fn centered_moving_average(values: &[f64], window: usize) -> Vec<f64> {
    let n = values.len();
    if n == 0 || window == 0 {
        return Vec::new();
    }
    if window == 1 {
        return values.to_vec();
    }

    let mut prefix = Vec::with_capacity(n + 1);
    prefix.push(0.0);
    for v in values {
        prefix.push(prefix[prefix.len() - 1] + v);
    }

    let offset = (window - 1) / 2;
    (0..n)
        .map(|i| {
            let end = (i + 1 + offset).min(n);
            let start = (i + 1 + offset).saturating_sub(window);
            (prefix[end] - prefix[start]) / (end - start) as f64
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn series(city: &str, start: NaiveDate, temps: &[f64]) -> Vec<Observation> {
        temps
            .iter()
            .enumerate()
            .map(|(i, t)| Observation::new(city, start + chrono::Duration::days(i as i64), *t))
            .collect()
    }

    #[test]
    fn test_basic_stats() {
        let ds = Dataset::new(series("Paris", date(2020, 1, 1), &[1.0, 2.0, 3.0, 4.0]));
        let analyzer = TemperatureAnalyzer::new(&ds);
        let stats = analyzer.basic_stats(Some("Paris")).unwrap();

        assert_eq!(stats.count, 4);
        assert_eq!(stats.mean, 2.5);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 4.0);
        assert_eq!(stats.q25, 1.75);
        assert_eq!(stats.q50, 2.5);
        assert_eq!(stats.q75, 3.25);
        assert!((stats.std - (5.0f64 / 3.0).sqrt()).abs() < 1e-12);

        assert!(matches!(
            analyzer.basic_stats(Some("Oslo")),
            Err(MonitorError::EmptyCity { .. })
        ));
        assert!(TemperatureAnalyzer::new(&Dataset::default())
            .basic_stats(None)
            .is_err());
    }

    #[test]
    fn test_moving_average_window_shapes() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];

        assert_eq!(centered_moving_average(&values, 1), values.to_vec());
        assert_eq!(
            centered_moving_average(&values, 3),
            vec![1.5, 2.0, 3.0, 4.0, 4.5]
        );
        // Even window: two samples before the centre, one after
        assert_eq!(
            centered_moving_average(&values, 4),
            vec![1.5, 2.0, 2.5, 3.5, 4.0]
        );
        // Window wider than the series still yields one value per point
        assert_eq!(centered_moving_average(&values, 50).len(), 5);
    }

    #[test]
    fn test_moving_average_rejects_zero_window() {
        let ds = Dataset::new(series("Paris", date(2020, 1, 1), &[1.0, 2.0]));
        let analyzer = TemperatureAnalyzer::new(&ds);
        assert!(matches!(
            analyzer.moving_average("Paris", 0),
            Err(MonitorError::InvalidWindow(0))
        ));
    }

    #[test]
    fn test_anomaly_bounds_are_strict() {
        let bounds = AnomalyBounds::new(10.0, 2.0, 2.0);
        assert_eq!(bounds.half_width, 4.0);
        assert_eq!(bounds.lower, 6.0);
        assert_eq!(bounds.upper, 14.0);
        assert!(!bounds.is_anomalous(6.0));
        assert!(!bounds.is_anomalous(14.0));
        assert!(bounds.is_anomalous(5.999));
        assert!(bounds.is_anomalous(14.001));
    }

    #[test]
    fn test_anomaly_bounds_symmetric_around_mean() {
        let temps = [0.0, 0.05, 0.1, 0.15, 0.2, 0.25, 0.3];
        let ds = Dataset::new(series("Reykjavik", date(2020, 1, 1), &temps));
        let analyzer = TemperatureAnalyzer::new(&ds);

        for k in 1..200 {
            let sigma = k as f64 * 0.037;
            let bounds = analyzer.detect_anomalies("Reykjavik", sigma).unwrap().bounds;
            let tolerance = 4.0 * f64::EPSILON * (bounds.mean.abs() + bounds.half_width);

            assert_eq!(bounds.half_width, sigma * bounds.std);
            let above = bounds.upper - bounds.mean;
            let below = bounds.mean - bounds.lower;
            assert!((above - below).abs() <= tolerance, "sigma {}: {} vs {}", sigma, above, below);
            assert!((above - bounds.half_width).abs() <= tolerance, "sigma {}", sigma);
        }
    }

    #[test]
    fn test_detect_anomalies_flags_outlier() {
        let mut temps = vec![10.0; 20];
        temps[7] = 40.0;
        let ds = Dataset::new(series("Cairo", date(2020, 6, 1), &temps));
        let analyzer = TemperatureAnalyzer::new(&ds);

        let report = analyzer.detect_anomalies("Cairo", 2.0).unwrap();
        assert_eq!(report.n_anomalies, 1);
        assert_eq!(report.anomalies[0].temperature, 40.0);
        assert_eq!(report.series.len(), 20);
        assert!((report.percent_anomalies - 5.0).abs() < 1e-12);

        assert!(matches!(
            analyzer.detect_anomalies("Cairo", -1.0),
            Err(MonitorError::InvalidSigma(_))
        ));
    }

    #[test]
    fn test_city_wide_detection_is_not_seasonally_adjusted() {
        // Long cold winter, short hot summer: summer days stand out city-wide
        let mut obs = series("Moscow", date(2020, 1, 1), &[-10.0; 40]);
        obs.extend(series("Moscow", date(2020, 7, 1), &[25.0, 25.5, 24.5]));
        let analyzer = TemperatureAnalyzer::new(&Dataset::new(obs));

        let city_wide = analyzer.detect_anomalies("Moscow", 2.0).unwrap();
        assert_eq!(city_wide.n_anomalies, 3);

        let summer = analyzer
            .detect_seasonal_anomalies("Moscow", Season::Summer, 2.0)
            .unwrap()
            .unwrap();
        assert_eq!(summer.n_anomalies, 0);
        assert_eq!(summer.total, 3);

        assert!(analyzer
            .detect_seasonal_anomalies("Moscow", Season::Autumn, 2.0)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_seasonal_anomalies_sorted_by_deviation() {
        let mut temps = vec![20.0; 30];
        temps[3] = 5.0;
        temps[10] = 40.0;
        let ds = Dataset::new(series("Tokyo", date(2021, 6, 1), &temps));
        let analyzer = TemperatureAnalyzer::new(&ds);

        let report = analyzer
            .detect_seasonal_anomalies("Tokyo", Season::Summer, 2.0)
            .unwrap()
            .unwrap();
        assert_eq!(report.n_anomalies, 2);
        assert_eq!(report.anomalies[0].observation.temperature, 40.0);
        assert!(report.anomalies[0].deviation > 0.0);
        assert!(report.anomalies[1].deviation < 0.0);
    }

    #[test]
    fn test_check_current_temperature() {
        let ds = Dataset::new(series("Berlin", date(2020, 1, 1), &[0.0, 2.0, 4.0]));
        let analyzer = TemperatureAnalyzer::new(&ds);

        let check = analyzer
            .check_current_temperature("Berlin", 10.0, Season::Winter)
            .unwrap();
        assert_eq!(check.season_mean, 2.0);
        assert_eq!(check.season_std, 2.0);
        assert_eq!(check.bounds.lower, -2.0);
        assert_eq!(check.bounds.upper, 6.0);
        assert!(check.is_anomalous);
        assert_eq!(check.deviation, 8.0);

        let at_bound = analyzer
            .check_current_temperature("Berlin", 6.0, Season::Winter)
            .unwrap();
        assert!(!at_bound.is_anomalous);

        assert!(analyzer
            .check_current_temperature("Berlin", 10.0, Season::Summer)
            .is_none());
        assert!(analyzer
            .check_current_temperature("Oslo", 10.0, Season::Winter)
            .is_none());
    }

    #[test]
    fn test_trend() {
        let temps: Vec<f64> = (0..100).map(|d| 5.0 + 0.01 * d as f64).collect();
        let ds = Dataset::new(series("Sydney", date(2015, 1, 1), &temps));
        let analyzer = TemperatureAnalyzer::new(&ds);

        let trend = analyzer.trend("Sydney").unwrap();
        assert!((trend.slope_per_day - 0.01).abs() < 1e-9);
        assert!((trend.slope_per_year - 3.65).abs() < 1e-6);
        assert!((trend.intercept - 5.0).abs() < 1e-9);
        assert!((trend.r_squared - 1.0).abs() < 1e-9);
        assert_eq!(trend.direction, TrendDirection::Warming);
        assert!(trend.is_significant);
    }

    #[test]
    fn test_trend_needs_two_points() {
        let ds = Dataset::new(series("Dubai", date(2015, 1, 1), &[30.0]));
        let analyzer = TemperatureAnalyzer::new(&ds);
        assert!(analyzer.trend("Dubai").is_none());
        assert!(analyzer.trend("Oslo").is_none());

        let ds = Dataset::new(series("Dubai", date(2015, 1, 1), &[30.0, 28.0]));
        let trend = TemperatureAnalyzer::new(&ds).trend("Dubai").unwrap();
        assert_eq!(trend.r_squared, 1.0);
        assert_eq!(trend.p_value, 0.0);
        assert!(trend.is_significant);
        assert_eq!(trend.direction, TrendDirection::Cooling);
    }

    #[test]
    fn test_extremes_and_monthly_means() {
        let mut obs = series("Mumbai", date(2020, 1, 30), &[25.0, 27.0, 33.0]);
        obs.push(Observation::new("Mumbai", date(2020, 5, 1), 36.0));
        let analyzer = TemperatureAnalyzer::new(&Dataset::new(obs));

        let extremes = analyzer.extremes("Mumbai").unwrap();
        assert_eq!(extremes.hottest.temperature, 36.0);
        assert_eq!(extremes.coldest.temperature, 25.0);

        let monthly = analyzer.monthly_means("Mumbai").unwrap();
        let months: Vec<u32> = monthly.iter().map(|m| m.month).collect();
        assert_eq!(months, vec![1, 2, 5]);
        assert_eq!(monthly[0].mean, 26.0);
        assert_eq!(monthly[0].count, 2);
    }
}
