//! Descriptive statistics over rate values
//!
//! Contains:
//! - Population standard deviation (volatility)
//! - Median and extrema
//! - Percentage change
//! - Cent rounding

use crate::moving_averages::mean;
use crate::{MathError, Result};

/// Population standard deviation (divides by `N`, not `N - 1`).
///
/// Returns `0.0` for fewer than two values.
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }

    let n = values.len() as f64;
    let avg = match mean(values) {
        Ok(avg) => avg,
        Err(_) => return 0.0,
    };
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / n;

    variance.sqrt()
}

/// Median of the values; the two central values are averaged for even lengths
pub fn median(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(MathError::EmptyInput);
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        mean(&sorted[mid - 1..=mid])
    } else {
        Ok(sorted[mid])
    }
}

/// Smallest and largest value, in that order
pub fn min_max(values: &[f64]) -> Result<(f64, f64)> {
    let (first, rest) = values.split_first().ok_or(MathError::EmptyInput)?;

    Ok(rest
        .iter()
        .fold((*first, *first), |(lo, hi), &v| (lo.min(v), hi.max(v))))
}

/// Percentage change from `old` to `new`.
///
/// A zero base has no relative change; it reports `0` when `new` is also zero
/// and a capped `100` otherwise.
pub fn percentage_change(old: f64, new: f64) -> f64 {
    if old == 0.0 {
        return if new == 0.0 { 0.0 } else { 100.0 };
    }

    (new - old) / old * 100.0
}

/// Round to two decimal places, halves rounding up toward positive infinity
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}
