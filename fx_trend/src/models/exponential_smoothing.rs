//! Exponential smoothing with a damped local trend

use crate::data::RateSeries;
use crate::error::{Result, TrendError};
use crate::models::{require_points, ForecastMethod, ForecastModel, Prediction, TrainedForecastModel};
use crate::utils::future_dates;
use chrono::NaiveDate;
use rate_math::{damped_trend_path, exponential_level, population_std_dev, round_cents};

/// Smoothing factor used when none is given
pub const DEFAULT_ALPHA: f64 = 0.3;

/// Simple exponential smoothing model
#[derive(Debug, Clone)]
pub struct ExponentialSmoothing {
    /// Smoothing parameter
    alpha: f64,
}

/// Trained exponential smoothing model
#[derive(Debug, Clone)]
pub struct TrainedExponentialSmoothing {
    /// Smoothing parameter
    alpha: f64,
    /// Smoothed level after the last observation
    level: f64,
    /// Last step change scaled by alpha, held for the whole horizon
    trend: f64,
    /// Population standard deviation of the training rates
    volatility: f64,
    /// Date of the last training point
    last_date: NaiveDate,
}

impl ExponentialSmoothing {
    /// Create a new exponential smoothing model
    pub fn new(alpha: f64) -> Result<Self> {
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(TrendError::InvalidParameter(format!(
                "Alpha must be between 0 and 1, got {}",
                alpha
            )));
        }

        Ok(Self { alpha })
    }
}

impl Default for ExponentialSmoothing {
    fn default() -> Self {
        Self { alpha: DEFAULT_ALPHA }
    }
}

impl ForecastModel for ExponentialSmoothing {
    type Trained = TrainedExponentialSmoothing;

    fn train(&self, series: &RateSeries) -> Result<Self::Trained> {
        require_points(series, 2)?;

        let rates = series.rates();
        let last_date = series.last().map(|p| p.date).ok_or(TrendError::EmptySeries)?;
        let level = exponential_level(&rates, self.alpha)?;
        let trend = (rates[rates.len() - 1] - rates[rates.len() - 2]) * self.alpha;

        Ok(TrainedExponentialSmoothing {
            alpha: self.alpha,
            level,
            trend,
            volatility: population_std_dev(&rates),
            last_date,
        })
    }
}

impl TrainedForecastModel for TrainedExponentialSmoothing {
    fn forecast(&self, horizon: usize) -> Result<Vec<Prediction>> {
        let dates = future_dates(self.last_date, horizon)?;
        let path = damped_trend_path(self.level, self.trend, self.alpha, horizon)?;

        Ok(dates
            .into_iter()
            .zip(path)
            .zip(1..)
            .map(|((date, value), step)| {
                let confidence = (95.0 - self.volatility * 15.0 - step as f64 * 3.0).max(0.0);

                Prediction {
                    date,
                    predicted: round_cents(value),
                    confidence: round_cents(confidence),
                    method: self.method(),
                }
            })
            .collect())
    }

    fn method(&self) -> ForecastMethod {
        ForecastMethod::Exponential
    }
}
