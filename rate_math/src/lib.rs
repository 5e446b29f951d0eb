//! # Rate Math
//!
//! Numeric kernels for exchange-rate analysis.
//! This crate works on plain `&[f64]` slices and knows nothing about dates or
//! currencies; the `fx_trend` crate layers the domain model on top of it.

use thiserror::Error;

pub mod forecasting;
pub mod moving_averages;
pub mod statistics;

pub use forecasting::{damped_trend_path, exponential_level, LinearFit};
pub use moving_averages::{mean, moving_average};
pub use statistics::{median, min_max, percentage_change, population_std_dev, round_cents};

/// Errors that can occur in rate calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Empty input: no values to calculate over")]
    EmptyInput,

    #[error("Insufficient data for calculation: need at least {needed} values, got {got}")]
    InsufficientData { needed: usize, got: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for rate math operations
pub type Result<T> = std::result::Result<T, MathError>;
