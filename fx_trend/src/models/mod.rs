//! Forecasting models for rate series

use crate::data::RateSeries;
use crate::error::{Result, TrendError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Method that produced a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForecastMethod {
    Linear,
    Exponential,
    Combined,
}

impl fmt::Display for ForecastMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForecastMethod::Linear => write!(f, "linear"),
            ForecastMethod::Exponential => write!(f, "exponential"),
            ForecastMethod::Combined => write!(f, "combined"),
        }
    }
}

impl FromStr for ForecastMethod {
    type Err = TrendError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "linear" => Ok(ForecastMethod::Linear),
            "exponential" | "smoothing" => Ok(ForecastMethod::Exponential),
            "combined" => Ok(ForecastMethod::Combined),
            other => Err(TrendError::InvalidParameter(format!(
                "unknown forecast method: {}",
                other
            ))),
        }
    }
}

/// One forecasted point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Forecast day
    pub date: NaiveDate,
    /// Predicted rate, rounded to cents
    pub predicted: f64,
    /// Heuristic score in `[0, 100]`, rounded to cents
    pub confidence: f64,
    pub method: ForecastMethod,
}

/// Trained forecast model
pub trait TrainedForecastModel: fmt::Debug {
    /// Predict one point per day for `horizon` days after the series' last date
    fn forecast(&self, horizon: usize) -> Result<Vec<Prediction>>;

    /// Method tag attached to the predictions
    fn method(&self) -> ForecastMethod;
}

/// Forecast model that can be trained on a rate series
pub trait ForecastModel: fmt::Debug + Clone {
    /// The type of trained model produced
    type Trained: TrainedForecastModel;

    /// Train the model on the full series
    fn train(&self, series: &RateSeries) -> Result<Self::Trained>;
}

/// Fail unless the series has enough points to establish a direction
pub(crate) fn require_points(series: &RateSeries, needed: usize) -> Result<()> {
    if series.len() < needed {
        return Err(TrendError::InsufficientData {
            needed,
            got: series.len(),
        });
    }
    Ok(())
}

pub mod combined;
pub mod exponential_smoothing;
pub mod linear;

pub use combined::CombinedForecast;
pub use exponential_smoothing::{ExponentialSmoothing, DEFAULT_ALPHA};
pub use linear::LinearTrend;
