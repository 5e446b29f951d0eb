//! Linear trend extrapolation

use crate::data::RateSeries;
use crate::error::{Result, TrendError};
use crate::models::{require_points, ForecastMethod, ForecastModel, Prediction, TrainedForecastModel};
use crate::utils::future_dates;
use chrono::NaiveDate;
use rate_math::{population_std_dev, round_cents, LinearFit};

/// Least squares line over index positions, extended past the last point
#[derive(Debug, Clone, Default)]
pub struct LinearTrend;

/// Trained linear trend model
#[derive(Debug, Clone)]
pub struct TrainedLinearTrend {
    /// Line through the training rates
    fit: LinearFit,
    /// Number of training points; forecast step `i` sits at index `len - 1 + i`
    len: usize,
    /// Population standard deviation of the training rates
    volatility: f64,
    /// Date of the last training point
    last_date: NaiveDate,
}

impl LinearTrend {
    pub fn new() -> Self {
        Self
    }
}

impl ForecastModel for LinearTrend {
    type Trained = TrainedLinearTrend;

    fn train(&self, series: &RateSeries) -> Result<Self::Trained> {
        require_points(series, 2)?;
        let last_date = series.last().map(|p| p.date).ok_or(TrendError::EmptySeries)?;

        let rates = series.rates();
        Ok(TrainedLinearTrend {
            fit: LinearFit::fit(&rates)?,
            len: rates.len(),
            volatility: population_std_dev(&rates),
            last_date,
        })
    }
}

impl TrainedForecastModel for TrainedLinearTrend {
    fn forecast(&self, horizon: usize) -> Result<Vec<Prediction>> {
        let dates = future_dates(self.last_date, horizon)?;

        Ok(dates
            .into_iter()
            .zip(1..)
            .map(|(date, step)| {
                let x = (self.len - 1 + step) as f64;
                let confidence = (100.0 - self.volatility * 10.0 - step as f64 * 2.0).max(0.0);

                Prediction {
                    date,
                    predicted: round_cents(self.fit.value_at(x)),
                    confidence: round_cents(confidence),
                    method: self.method(),
                }
            })
            .collect())
    }

    fn method(&self) -> ForecastMethod {
        ForecastMethod::Linear
    }
}
