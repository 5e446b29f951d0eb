//! Forecasting kernels for short-horizon extrapolation
//!
//! Contains:
//! - Ordinary least squares line fit over index positions
//! - Single exponential smoothing level
//! - Damped trend accumulation for the smoothing forecast

use crate::{MathError, Result};
use serde::{Deserialize, Serialize};

/// Least squares line `value = intercept + slope * index` fitted over the
/// zero-based positions of a slice
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    slope: f64,
    intercept: f64,
}

impl LinearFit {
    /// Fit a line through the values using the closed-form OLS solution
    pub fn fit(values: &[f64]) -> Result<Self> {
        if values.len() < 2 {
            return Err(MathError::InsufficientData {
                needed: 2,
                got: values.len(),
            });
        }

        let n = values.len() as f64;
        let mut sum_x = 0.0;
        let mut sum_y = 0.0;
        let mut sum_xy = 0.0;
        let mut sum_x2 = 0.0;

        for (i, &y) in values.iter().enumerate() {
            let x = i as f64;
            sum_x += x;
            sum_y += y;
            sum_xy += x * y;
            sum_x2 += x * x;
        }

        let slope = (n * sum_xy - sum_x * sum_y) / (n * sum_x2 - sum_x * sum_x);
        let intercept = (sum_y - slope * sum_x) / n;

        Ok(Self { slope, intercept })
    }

    /// Change in value per index step
    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// Fitted value at index zero
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Value of the fitted line at index position `x`
    pub fn value_at(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

fn check_alpha(alpha: f64) -> Result<()> {
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(MathError::InvalidInput(format!(
            "Smoothing factor must be between 0 and 1 (exclusive), got {}",
            alpha
        )));
    }
    Ok(())
}

/// Final level of single exponential smoothing.
///
/// The level starts at the first value and is updated once per following
/// value with `level = alpha * value + (1 - alpha) * level`.
pub fn exponential_level(values: &[f64], alpha: f64) -> Result<f64> {
    check_alpha(alpha)?;

    let (first, rest) = values.split_first().ok_or(MathError::EmptyInput)?;

    Ok(rest
        .iter()
        .fold(*first, |level, &value| alpha * value + (1.0 - alpha) * level))
}

/// Extend a smoothed level over `horizon` steps with a constant trend whose
/// contribution saturates geometrically.
///
/// Step `i` adds `trend * (1 - (1 - alpha)^i)` to the running level; the
/// returned vector holds the running level after each step.
pub fn damped_trend_path(level: f64, trend: f64, alpha: f64, horizon: usize) -> Result<Vec<f64>> {
    check_alpha(alpha)?;

    let decay = 1.0 - alpha;
    let mut current = level;

    Ok((1..=horizon)
        .map(|i| {
            current += trend * (1.0 - decay.powf(i as f64));
            current
        })
        .collect())
}
