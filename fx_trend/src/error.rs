//! Error types for the fx_trend crate

use rate_math::MathError;
use thiserror::Error;

/// Custom error types for the fx_trend crate
#[derive(Debug, Error)]
pub enum TrendError {
    /// Metrics were requested on a series with no points
    #[error("Empty series: no historical data available")]
    EmptySeries,

    /// Forecasting was requested on a series that is too short
    #[error("Insufficient data: need at least {needed} points, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// The series breaks the ordering, uniqueness or value contract
    #[error("Invalid series: {0}")]
    InvalidSeries(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A forecast date fell outside the representable calendar
    #[error("Date overflow: cannot step {days} days past {from}")]
    DateOverflow { from: chrono::NaiveDate, days: u64 },

    /// Error from the numeric kernels
    #[error("Math error: {0}")]
    Math(#[from] MathError),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error while reading CSV input
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Error while reading or writing JSON
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Error while parsing a configuration file
    #[error("Config error: {0}")]
    ConfigError(#[from] toml::de::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, TrendError>;
