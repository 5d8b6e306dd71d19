pub mod client;
pub mod comparison;
pub mod response;

pub use client::{CityWeather, RequestMode, WeatherClient, WeatherOutcome};
pub use comparison::{compare_request_modes, RequestModeComparison};
pub use response::parse_current_conditions;
