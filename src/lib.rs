//! # FX Trend Workspace
//!
//! Umbrella crate re-exporting the workspace members:
//!
//! - [`rate_math`]: numeric kernels over plain slices
//! - [`fx_trend`]: rate series, the trend engine, caching and reports
//!
//! ## Example
//!
//! ```
//! use fx_trend_workspace::rate_math::{moving_average, percentage_change};
//!
//! assert_eq!(moving_average(&[1.0, 2.0, 3.0, 4.0, 5.0], 3).unwrap(), 4.0);
//! assert_eq!(percentage_change(100.0, 150.0), 50.0);
//! ```

pub use fx_trend;
pub use rate_math;

pub use fx_trend::{
    CurrencyPair, ForecastMethod, Prediction, RatePoint, RateSeries, Trend, TrendEngine,
    TrendError, TrendMetrics,
};
