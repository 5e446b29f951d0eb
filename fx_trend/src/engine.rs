//! The trend-analysis engine
//!
//! [`TrendEngine`] is a stateless value: every method is a pure function of its
//! arguments, so one instance can be shared freely between threads. The
//! engine assumes the series honors the [`RateSeries`] contract and reports
//! problems by returning an error; it never logs or retries.

use crate::data::RateSeries;
use crate::error::{Result, TrendError};
use crate::metrics::{MovingAverages, Trend, TrendMetrics};
use crate::models::{
    CombinedForecast, ExponentialSmoothing, ForecastMethod, ForecastModel, LinearTrend,
    Prediction, TrainedForecastModel,
};
use rate_math::{
    mean, median, min_max, moving_average, percentage_change, population_std_dev, round_cents,
};

/// Stateless statistics and forecasting over exchange-rate series
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrendEngine;

impl TrendEngine {
    pub fn new() -> Self {
        Self
    }

    /// Trailing moving average of the series' rates over `period` points
    pub fn moving_average(&self, series: &RateSeries, period: usize) -> Result<f64> {
        if series.is_empty() {
            return Err(TrendError::EmptySeries);
        }
        Ok(moving_average(&series.rates(), period)?)
    }

    /// Population standard deviation of the series' rates
    pub fn volatility(&self, series: &RateSeries) -> f64 {
        population_std_dev(&series.rates())
    }

    /// Summary statistics and trend classification of the whole series
    pub fn compute_metrics(&self, series: &RateSeries) -> Result<TrendMetrics> {
        let rates = series.rates();
        let (&current, head) = rates.split_last().ok_or(TrendError::EmptySeries)?;
        let previous = head.last().copied().unwrap_or(current);

        let ma7 = moving_average(&rates, 7)?;
        let ma14 = moving_average(&rates, 14)?;
        let ma30 = moving_average(&rates, 30)?;
        let (min, max) = min_max(&rates)?;

        Ok(TrendMetrics {
            current: round_cents(current),
            mean: round_cents(mean(&rates)?),
            median: round_cents(median(&rates)?),
            min: round_cents(min),
            max: round_cents(max),
            volatility: round_cents(population_std_dev(&rates)),
            trend: Trend::classify(current, ma7, ma14),
            change_percent: round_cents(percentage_change(previous, current)),
            moving_averages: MovingAverages {
                ma7: round_cents(ma7),
                ma14: round_cents(ma14),
                ma30: round_cents(ma30),
            },
        })
    }

    /// Extrapolate a least squares line fitted over the point indices
    pub fn forecast_linear(&self, series: &RateSeries, days_ahead: usize) -> Result<Vec<Prediction>> {
        run(&LinearTrend::new(), series, days_ahead)
    }

    /// Exponential smoothing with a damped last-step trend
    pub fn forecast_exponential_smoothing(
        &self,
        series: &RateSeries,
        days_ahead: usize,
        alpha: f64,
    ) -> Result<Vec<Prediction>> {
        run(&ExponentialSmoothing::new(alpha)?, series, days_ahead)
    }

    /// Step-by-step average of the linear and smoothing forecasts
    pub fn forecast_combined(&self, series: &RateSeries, days_ahead: usize) -> Result<Vec<Prediction>> {
        run(&CombinedForecast::default(), series, days_ahead)
    }

    /// Forecast with the chosen method; `alpha` drives the smoothing part of
    /// the exponential and combined methods
    pub fn forecast(
        &self,
        series: &RateSeries,
        days_ahead: usize,
        method: ForecastMethod,
        alpha: f64,
    ) -> Result<Vec<Prediction>> {
        match method {
            ForecastMethod::Linear => self.forecast_linear(series, days_ahead),
            ForecastMethod::Exponential => {
                self.forecast_exponential_smoothing(series, days_ahead, alpha)
            }
            ForecastMethod::Combined => run(
                &CombinedForecast::new(ExponentialSmoothing::new(alpha)?),
                series,
                days_ahead,
            ),
        }
    }
}

fn run<M: ForecastModel>(model: &M, series: &RateSeries, days_ahead: usize) -> Result<Vec<Prediction>> {
    model.train(series)?.forecast(days_ahead)
}
