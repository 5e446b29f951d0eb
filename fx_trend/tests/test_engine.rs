use approx::assert_abs_diff_eq;
use chrono::{Duration, NaiveDate};
use fx_trend::models::ForecastMethod;
use fx_trend::{CurrencyPair, RateSeries, Trend, TrendEngine, TrendError};
use pretty_assertions::assert_eq;
use rate_math::round_cents;
use rstest::{fixture, rstest};

fn day(offset: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(offset)
}

fn series_of(rates: &[f64]) -> RateSeries {
    let points: Vec<(NaiveDate, f64)> = rates
        .iter()
        .enumerate()
        .map(|(i, &rate)| (day(i as i64), rate))
        .collect();
    RateSeries::from_pairs(CurrencyPair::new("EUR", "GBP"), &points).unwrap()
}

#[fixture]
fn eur_gbp() -> RateSeries {
    series_of(&[0.86, 0.87, 0.865, 0.88, 0.875, 0.89, 0.885, 0.90])
}

#[rstest]
fn test_metrics_of_rising_series(eur_gbp: RateSeries) {
    let metrics = TrendEngine::new().compute_metrics(&eur_gbp).unwrap();

    assert_eq!(metrics.current, 0.90);
    assert_eq!(metrics.min, 0.86);
    assert_eq!(metrics.max, 0.90);
    assert_eq!(metrics.median, 0.88);
    assert_abs_diff_eq!(metrics.mean, 0.878, epsilon = 0.01);
    assert_eq!(metrics.volatility, 0.01);
    assert_eq!(metrics.change_percent, 1.69);
    assert_eq!(metrics.trend, Trend::Up);
    assert_abs_diff_eq!(metrics.moving_averages.ma7, 0.881, epsilon = 0.01);
    // Shorter than 14 and 30 points, both fall back to the overall mean
    assert_eq!(metrics.moving_averages.ma14, metrics.mean);
    assert_eq!(metrics.moving_averages.ma30, metrics.mean);
}

#[test]
fn test_metrics_of_falling_series() {
    let series = series_of(&[0.90, 0.885, 0.89, 0.875, 0.88, 0.865, 0.87, 0.86]);
    let metrics = TrendEngine::new().compute_metrics(&series).unwrap();

    assert_eq!(metrics.trend, Trend::Down);
    assert!(metrics.change_percent < 0.0);
}

#[rstest]
#[case(1, 0.86)]
#[case(5, 1.25)]
#[case(40, 0.9)]
fn test_constant_series_is_stable(#[case] len: usize, #[case] rate: f64) {
    let series = series_of(&vec![rate; len]);
    let metrics = TrendEngine::new().compute_metrics(&series).unwrap();

    assert_eq!(metrics.volatility, 0.0);
    assert_eq!(metrics.mean, rate);
    assert_eq!(metrics.median, rate);
    assert_eq!(metrics.min, rate);
    assert_eq!(metrics.max, rate);
    assert_eq!(metrics.trend, Trend::Stable);
    assert_eq!(metrics.change_percent, 0.0);
}

#[test]
fn test_single_point_has_no_change() {
    let metrics = TrendEngine::new().compute_metrics(&series_of(&[1.08])).unwrap();

    assert_eq!(metrics.current, 1.08);
    assert_eq!(metrics.change_percent, 0.0);
    assert_eq!(metrics.trend, Trend::Stable);
}

#[test]
fn test_metrics_on_empty_series_fail() {
    let empty = RateSeries::new(CurrencyPair::new("EUR", "GBP"), Vec::new()).unwrap();
    let result = TrendEngine::new().compute_metrics(&empty);

    assert!(matches!(result, Err(TrendError::EmptySeries)));
}

#[test]
fn test_moving_average_and_volatility() {
    let engine = TrendEngine::new();

    assert_eq!(engine.moving_average(&series_of(&[1.0, 2.0, 3.0, 4.0, 5.0]), 3).unwrap(), 4.0);
    assert_eq!(engine.moving_average(&series_of(&[1.0, 2.0, 3.0]), 5).unwrap(), 2.0);
    assert_abs_diff_eq!(
        engine.volatility(&series_of(&[1.0, 2.0, 3.0, 4.0])),
        1.118,
        epsilon = 0.001
    );
    assert_eq!(engine.volatility(&series_of(&[1.0, 1.0, 1.0, 1.0])), 0.0);
}

#[rstest]
fn test_linear_forecast_values(eur_gbp: RateSeries) {
    let predictions = TrendEngine::new().forecast_linear(&eur_gbp, 3).unwrap();

    let values: Vec<f64> = predictions.iter().map(|p| p.predicted).collect();
    let confidence: Vec<f64> = predictions.iter().map(|p| p.confidence).collect();

    assert_eq!(values, vec![0.90, 0.91, 0.91]);
    assert_eq!(confidence, vec![97.88, 95.88, 93.88]);
    assert!(predictions.iter().all(|p| p.method == ForecastMethod::Linear));
}

#[rstest]
fn test_exponential_forecast_values(eur_gbp: RateSeries) {
    let predictions = TrendEngine::new()
        .forecast_exponential_smoothing(&eur_gbp, 3, 0.3)
        .unwrap();

    let values: Vec<f64> = predictions.iter().map(|p| p.predicted).collect();
    let confidence: Vec<f64> = predictions.iter().map(|p| p.confidence).collect();

    assert_eq!(values, vec![0.89, 0.89, 0.89]);
    assert_eq!(confidence, vec![91.81, 88.81, 85.81]);
    assert!(predictions.iter().all(|p| p.method == ForecastMethod::Exponential));
}

#[rstest]
fn test_combined_is_mean_of_both(eur_gbp: RateSeries) {
    let engine = TrendEngine::new();
    let linear = engine.forecast_linear(&eur_gbp, 5).unwrap();
    let exponential = engine.forecast_exponential_smoothing(&eur_gbp, 5, 0.3).unwrap();
    let combined = engine.forecast_combined(&eur_gbp, 5).unwrap();

    assert_eq!(combined.len(), 5);
    for ((c, l), e) in combined.iter().zip(&linear).zip(&exponential) {
        assert_eq!(c.date, l.date);
        assert_eq!(c.date, e.date);
        assert_eq!(c.predicted, round_cents((l.predicted + e.predicted) / 2.0));
        assert_eq!(c.confidence, round_cents((l.confidence + e.confidence) / 2.0));
        assert_eq!(c.method, ForecastMethod::Combined);
    }
}

#[rstest]
#[case(ForecastMethod::Linear, 1)]
#[case(ForecastMethod::Linear, 7)]
#[case(ForecastMethod::Exponential, 7)]
#[case(ForecastMethod::Exponential, 30)]
#[case(ForecastMethod::Combined, 14)]
fn test_forecast_dates_are_contiguous(
    eur_gbp: RateSeries,
    #[case] method: ForecastMethod,
    #[case] days_ahead: usize,
) {
    let predictions = TrendEngine::new()
        .forecast(&eur_gbp, days_ahead, method, 0.3)
        .unwrap();

    assert_eq!(predictions.len(), days_ahead);
    for (i, p) in predictions.iter().enumerate() {
        // Last observation is 2024-01-08
        assert_eq!(p.date, day(8 + i as i64));
        assert!((0.0..=100.0).contains(&p.confidence));
        assert_eq!(p.method, method);
    }
}

#[rstest]
fn test_confidence_clamps_at_zero(eur_gbp: RateSeries) {
    let engine = TrendEngine::new();

    let linear = engine.forecast_linear(&eur_gbp, 60).unwrap();
    let exponential = engine.forecast_exponential_smoothing(&eur_gbp, 60, 0.3).unwrap();

    assert_eq!(linear.last().unwrap().confidence, 0.0);
    assert_eq!(exponential.last().unwrap().confidence, 0.0);
    assert!(linear.windows(2).all(|w| w[1].confidence <= w[0].confidence));
}

#[test]
fn test_high_volatility_lowers_confidence() {
    let calm = series_of(&[1.0, 1.01, 1.02, 1.03]);
    let wild = series_of(&[1.0, 3.0, 1.5, 4.0]);
    let engine = TrendEngine::new();

    let calm_first = engine.forecast_linear(&calm, 1).unwrap()[0].confidence;
    let wild_first = engine.forecast_linear(&wild, 1).unwrap()[0].confidence;

    assert!(wild_first < calm_first);
}

#[rstest]
#[case(0)]
#[case(1)]
fn test_forecasts_need_two_points(#[case] len: usize) {
    let series = series_of(&vec![0.9; len]);
    let engine = TrendEngine::new();

    for method in [
        ForecastMethod::Linear,
        ForecastMethod::Exponential,
        ForecastMethod::Combined,
    ] {
        let result = engine.forecast(&series, 3, method, 0.3);
        assert!(matches!(
            result,
            Err(TrendError::InsufficientData { needed: 2, got }) if got == len
        ));
    }
}

#[rstest]
fn test_zero_days_ahead_gives_nothing(eur_gbp: RateSeries) {
    assert!(TrendEngine::new().forecast_combined(&eur_gbp, 0).unwrap().is_empty());
}

#[rstest]
#[case(0.0)]
#[case(1.0)]
#[case(-0.5)]
fn test_alpha_outside_unit_interval_is_rejected(eur_gbp: RateSeries, #[case] alpha: f64) {
    let result = TrendEngine::new().forecast_exponential_smoothing(&eur_gbp, 3, alpha);
    assert!(matches!(result, Err(TrendError::InvalidParameter(_))));
}

#[rstest]
fn test_calls_are_idempotent(eur_gbp: RateSeries) {
    let engine = TrendEngine::new();

    assert_eq!(
        engine.compute_metrics(&eur_gbp).unwrap(),
        engine.compute_metrics(&eur_gbp).unwrap()
    );
    assert_eq!(
        engine.forecast_combined(&eur_gbp, 10).unwrap(),
        engine.forecast_combined(&eur_gbp, 10).unwrap()
    );

    let first = engine.forecast_exponential_smoothing(&eur_gbp, 10, 0.3).unwrap();
    let second = engine.forecast_exponential_smoothing(&eur_gbp, 10, 0.3).unwrap();
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.predicted.to_bits(), b.predicted.to_bits());
    }
}

#[test]
fn test_engine_is_shareable_across_threads() {
    let engine = TrendEngine::new();
    let series = series_of(&[0.86, 0.87, 0.865, 0.88, 0.875, 0.89, 0.885, 0.90]);
    let expected = engine.forecast_combined(&series, 5).unwrap();

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| engine.forecast_combined(&series, 5).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
