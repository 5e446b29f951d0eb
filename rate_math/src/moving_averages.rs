//! Moving average calculations
//!
//! Contains the arithmetic mean and the trailing simple moving average used for
//! the 7/14/30-period averages of a rate series.

use crate::{MathError, Result};

/// Arithmetic mean of all values.
///
/// Accumulated as offsets from the first value, so a constant slice averages
/// to exactly that constant.
pub fn mean(values: &[f64]) -> Result<f64> {
    let (&first, rest) = values.split_first().ok_or(MathError::EmptyInput)?;

    let offset = rest.iter().map(|v| v - first).sum::<f64>();
    Ok(first + offset / values.len() as f64)
}

/// Trailing simple moving average over the last `period` values.
///
/// When fewer than `period` values are available the mean of the whole slice
/// is returned instead, so short series still get a usable average.
///
/// ```
/// use rate_math::moving_average;
///
/// assert_eq!(moving_average(&[1.0, 2.0, 3.0, 4.0, 5.0], 3).unwrap(), 4.0);
/// assert_eq!(moving_average(&[1.0, 2.0, 3.0], 5).unwrap(), 2.0);
/// ```
pub fn moving_average(values: &[f64], period: usize) -> Result<f64> {
    if period == 0 {
        return Err(MathError::InvalidInput(
            "Period must be greater than zero".to_string(),
        ));
    }

    if values.len() < period {
        return mean(values);
    }

    mean(&values[values.len() - period..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[2.0, 4.0, 6.0]).unwrap(), 4.0);
        assert_eq!(mean(&[]), Err(MathError::EmptyInput));
    }

    #[test]
    fn test_mean_of_constant_is_exact() {
        let values = vec![0.9; 40];
        assert_eq!(mean(&values).unwrap(), 0.9);
        assert_eq!(moving_average(&values, 7).unwrap(), 0.9);
        assert_eq!(moving_average(&values, 14).unwrap(), 0.9);
    }

    #[test]
    fn test_moving_average_uses_trailing_window() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];

        // (3 + 4 + 5) / 3
        assert_eq!(moving_average(&values, 3).unwrap(), 4.0);
        // Window equal to the length covers everything
        assert_eq!(moving_average(&values, 5).unwrap(), 3.0);
        assert_eq!(moving_average(&values, 1).unwrap(), 5.0);
    }

    #[test]
    fn test_moving_average_longer_than_data() {
        // (1 + 2 + 3) / 3
        assert_eq!(moving_average(&[1.0, 2.0, 3.0], 5).unwrap(), 2.0);
        assert_eq!(moving_average(&[7.5], 30).unwrap(), 7.5);
    }

    #[test]
    fn test_moving_average_rejects_bad_input() {
        assert!(matches!(
            moving_average(&[1.0, 2.0], 0),
            Err(MathError::InvalidInput(_))
        ));
        assert_eq!(moving_average(&[], 7), Err(MathError::EmptyInput));
    }
}
