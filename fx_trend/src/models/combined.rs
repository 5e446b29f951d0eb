//! Average of the linear and exponential smoothing forecasts

use crate::data::RateSeries;
use crate::error::Result;
use crate::models::exponential_smoothing::TrainedExponentialSmoothing;
use crate::models::linear::TrainedLinearTrend;
use crate::models::{
    ExponentialSmoothing, ForecastMethod, ForecastModel, LinearTrend, Prediction,
    TrainedForecastModel,
};
use rate_math::round_cents;

/// Runs both models over the same series and averages them step by step
#[derive(Debug, Clone, Default)]
pub struct CombinedForecast {
    linear: LinearTrend,
    exponential: ExponentialSmoothing,
}

/// Trained combined model
#[derive(Debug, Clone)]
pub struct TrainedCombinedForecast {
    linear: TrainedLinearTrend,
    exponential: TrainedExponentialSmoothing,
}

impl CombinedForecast {
    /// Combine with the given smoothing model
    pub fn new(exponential: ExponentialSmoothing) -> Self {
        Self {
            linear: LinearTrend::new(),
            exponential,
        }
    }
}

impl ForecastModel for CombinedForecast {
    type Trained = TrainedCombinedForecast;

    fn train(&self, series: &RateSeries) -> Result<Self::Trained> {
        Ok(TrainedCombinedForecast {
            linear: self.linear.train(series)?,
            exponential: self.exponential.train(series)?,
        })
    }
}

impl TrainedForecastModel for TrainedCombinedForecast {
    fn forecast(&self, horizon: usize) -> Result<Vec<Prediction>> {
        let linear = self.linear.forecast(horizon)?;
        let exponential = self.exponential.forecast(horizon)?;

        // Both sides are already rounded; the average is rounded again
        Ok(linear
            .into_iter()
            .zip(exponential)
            .map(|(l, e)| Prediction {
                date: l.date,
                predicted: round_cents((l.predicted + e.predicted) / 2.0),
                confidence: round_cents((l.confidence + e.confidence) / 2.0),
                method: self.method(),
            })
            .collect())
    }

    fn method(&self) -> ForecastMethod {
        ForecastMethod::Combined
    }
}
