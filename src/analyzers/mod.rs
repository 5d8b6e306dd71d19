pub mod statistics;
pub mod temperature_analyzer;

pub use temperature_analyzer::{
    centered_moving_average, AnomalyBounds, AnomalyReport, BasicStats, CityComparison, Extremes,
    FlaggedObservation, MonthlyMean, MovingAveragePoint, SeasonalAnomaly, SeasonalAnomalyReport,
    TemperatureAnalyzer, TemperatureCheck, TrendDirection, TrendReport,
};
