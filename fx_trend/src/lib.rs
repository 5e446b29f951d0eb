//! # FX Trend
//!
//! Descriptive statistics, trend classification and short-horizon forecasts
//! for daily exchange-rate series.
//!
//! ## Features
//!
//! - Rate series model with contract checks (sorted, unique dates, positive rates)
//! - Metrics: current, mean, median, range, volatility, 7/14/30-period moving
//!   averages, percent change and an up/down/stable trend
//! - Forecasts: linear regression, exponential smoothing with a damped trend,
//!   and their step-by-step average
//! - Read-through caching of historical series
//! - Text and JSON reports
//!
//! Every engine call is a pure function of the series it is given, so the same
//! input always yields bit-identical output.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use fx_trend::{CurrencyPair, RateSeries, Trend, TrendEngine};
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let rates = [0.86, 0.87, 0.865, 0.88, 0.875, 0.89, 0.885, 0.90];
//! let points: Vec<_> = rates
//!     .iter()
//!     .enumerate()
//!     .map(|(i, &r)| (start + chrono::Duration::days(i as i64), r))
//!     .collect();
//! let series = RateSeries::from_pairs(CurrencyPair::new("EUR", "GBP"), &points).unwrap();
//!
//! let engine = TrendEngine::new();
//! let metrics = engine.compute_metrics(&series).unwrap();
//! assert_eq!(metrics.trend, Trend::Up);
//!
//! let predictions = engine.forecast_combined(&series, 3).unwrap();
//! assert_eq!(predictions.len(), 3);
//! ```

pub mod cache;
pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod logger;
pub mod metrics;
pub mod models;
pub mod report;
pub mod utils;

// Re-export commonly used types
pub use crate::cache::{FileCache, FileSource, HistoryRequest, MemoryCache, ReadThrough, SeriesCache};
pub use crate::config::{OutputFormat, ReportConfig};
pub use crate::data::{CurrencyPair, DataLoader, RatePoint, RateSeries};
pub use crate::engine::TrendEngine;
pub use crate::error::{Result, TrendError};
pub use crate::metrics::{MovingAverages, Trend, TrendMetrics};
pub use crate::models::{ForecastMethod, Prediction, DEFAULT_ALPHA};
pub use crate::report::TrendReport;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
