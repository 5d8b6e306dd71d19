use thiserror::Error;

pub type Result<T> = std::result::Result<T, MonitorError>;

#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Date parsing error: {0}")]
    DateParse(#[from] chrono::ParseError),

    #[error("Dataset structure error: {0}")]
    DatasetStructure(String),

    #[error("No observations for city '{city}'")]
    EmptyCity { city: String },

    #[error("No seasonal baseline for city '{0}'")]
    UnknownCity(String),

    #[error("Moving average window must be at least 1, got {0}")]
    InvalidWindow(usize),

    #[error("Sigma threshold must be finite and non-negative, got {0}")]
    InvalidSigma(f64),

    #[error("Distribution error: {0}")]
    Distribution(String),

    #[error("API key is not set")]
    ApiKeyMissing,

    #[error("API key is malformed: {0}")]
    ApiKeyMalformed(String),

    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration source error: {0}")]
    ConfigSource(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Async task error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl MonitorError {
    pub fn empty_city(city: &str) -> Self {
        MonitorError::EmptyCity {
            city: city.to_string(),
        }
    }
}
