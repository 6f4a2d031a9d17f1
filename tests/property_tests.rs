//! Property-based tests for scoring, detection and correlation.
//!
//! These tests verify invariants that should hold for all valid inputs,
//! using randomly generated time series data.

use anofox_anomaly::core::TimeSeries;
use anofox_anomaly::correlation::{
    pearson_correlation, spearman_rank_correlation, CrossCorrelator,
};
use anofox_anomaly::detection::Detector;
use anofox_anomaly::scoring::{BitmapScorer, DerivativeScorer, EmaScorer, Scorer, WeightedSumScorer};
use proptest::prelude::*;

/// Create a TimeSeries on a unit grid from a vector of values.
fn make_ts(values: &[f64]) -> TimeSeries {
    let timestamps: Vec<f64> = (0..values.len()).map(|i| i as f64).collect();
    TimeSeries::new(timestamps, values.to_vec()).unwrap()
}

/// Strategy for generating valid time series values.
/// Adds small variation to avoid all-constant series which have no variance.
fn valid_values_strategy(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    (min_len..max_len).prop_flat_map(|len| {
        prop::collection::vec(1.0..1000.0_f64, len).prop_map(|mut v| {
            for (i, val) in v.iter_mut().enumerate() {
                *val += (i as f64) * 0.001;
            }
            v
        })
    })
}

/// Strategy for generating a series with possibly duplicated timestamps.
fn grid_series_strategy(min_len: usize, max_len: usize) -> impl Strategy<Value = TimeSeries> {
    (min_len..max_len).prop_flat_map(|len| {
        (
            prop::collection::vec(0u8..50, len),
            prop::collection::vec(-100.0..100.0_f64, len),
        )
            .prop_map(|(timestamps, values)| {
                let timestamps = timestamps.into_iter().map(f64::from).collect();
                TimeSeries::new(timestamps, values).unwrap()
            })
    })
}

// =============================================================================
// Property: every scorer returns one finite, non-negative score per point
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn ema_scores_cover_the_series(values in valid_values_strategy(2, 100)) {
        let ts = make_ts(&values);
        let scores = EmaScorer::new().score(&ts).unwrap();
        prop_assert_eq!(scores.len(), ts.len());
        prop_assert_eq!(scores.timestamps(), ts.timestamps());
        prop_assert!(scores.scores().iter().all(|s| s.is_finite() && *s >= 0.0));
    }

    #[test]
    fn derivative_scores_cover_the_series(values in valid_values_strategy(2, 100)) {
        let ts = make_ts(&values);
        let scores = DerivativeScorer::new().score(&ts).unwrap();
        prop_assert_eq!(scores.len(), ts.len());
        prop_assert!(scores.scores().iter().all(|s| s.is_finite() && *s >= 0.0));
    }

    #[test]
    fn weighted_sum_scores_cover_the_series(values in valid_values_strategy(2, 100)) {
        let ts = make_ts(&values);
        let scores = WeightedSumScorer::new().score(&ts).unwrap();
        prop_assert_eq!(scores.len(), ts.len());
        prop_assert!(scores.scores().iter().all(|s| s.is_finite() && *s >= 0.0));
    }

    #[test]
    fn bitmap_scores_cover_the_series(values in valid_values_strategy(60, 150)) {
        let ts = make_ts(&values);
        let scores = BitmapScorer::new()
            .with_lag_window_size(25)
            .with_future_window_size(25)
            .score(&ts)
            .unwrap();
        prop_assert_eq!(scores.len(), ts.len());
        prop_assert!(scores.scores().iter().all(|s| s.is_finite() && *s >= 0.0));
    }
}

// =============================================================================
// Property: denoising is idempotent
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn denoise_is_idempotent(values in valid_values_strategy(2, 100)) {
        let scores = EmaScorer::new().score(&make_ts(&values)).unwrap();
        let once = scores.denoise();
        let twice = once.denoise();
        prop_assert_eq!(once.scores(), twice.scores());
    }
}

// =============================================================================
// Property: align leaves both series on one common grid
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn align_produces_identical_grids(
        a in grid_series_strategy(1, 40),
        b in grid_series_strategy(1, 40)
    ) {
        let mut a = a;
        let mut b = b;
        let longest = a.len().max(b.len());
        a.align(&mut b);

        prop_assert_eq!(a.len(), b.len());
        prop_assert!(a.len() >= longest);
        prop_assert_eq!(a.timestamps(), b.timestamps());
        prop_assert!(a.timestamps().windows(2).all(|w| w[0] <= w[1]));
    }
}

// =============================================================================
// Property: crop keeps exactly the points inside the range
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn crop_respects_bounds(
        series in grid_series_strategy(1, 60),
        start in 0.0..25.0_f64,
        span in 0.0..25.0_f64
    ) {
        let end = start + span;
        let cropped = series.crop(start, end);

        prop_assert!(cropped.timestamps().iter().all(|&t| t >= start && t <= end));
        let expected = series.timestamps().iter().filter(|&&t| t >= start && t <= end).count();
        prop_assert_eq!(cropped.len(), expected);
    }
}

// =============================================================================
// Property: a series correlates perfectly with itself
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn cross_correlation_with_self_is_one(values in valid_values_strategy(2, 80)) {
        let ts = make_ts(&values);
        let result = CrossCorrelator::new().run(&ts, &ts).unwrap();
        prop_assert!((result.coefficient - 1.0).abs() < 1e-9);
    }

    #[test]
    fn pearson_with_self_is_exactly_one(values in valid_values_strategy(2, 80)) {
        let ts = make_ts(&values);
        prop_assert_eq!(pearson_correlation(&ts, &ts).unwrap(), 1.0);
    }

    #[test]
    fn spearman_with_self_is_exactly_one(values in valid_values_strategy(3, 80)) {
        let ts = make_ts(&values);
        prop_assert_eq!(spearman_rank_correlation(&ts, &ts).unwrap(), 1.0);
    }
}

// =============================================================================
// Property: correlation rejects series of different lengths
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn mismatched_lengths_are_rejected(
        a in valid_values_strategy(3, 40),
        b in valid_values_strategy(3, 40)
    ) {
        prop_assume!(a.len() != b.len());
        let a = make_ts(&a);
        let b = make_ts(&b);
        prop_assert!(pearson_correlation(&a, &b).is_err());
        prop_assert!(spearman_rank_correlation(&a, &b).is_err());
    }
}

// =============================================================================
// Property: detected anomalies stay inside their windows
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn anomalies_are_well_formed(values in valid_values_strategy(20, 100)) {
        let ts = make_ts(&values);
        let detector = Detector::new();
        for anomaly in detector.anomalies(&ts).unwrap() {
            prop_assert!(anomaly.start_timestamp <= anomaly.timestamp);
            prop_assert!(anomaly.timestamp <= anomaly.end_timestamp);
            prop_assert!(anomaly.score >= 0.0);
            prop_assert_eq!(anomaly.threshold, detector.threshold);
        }
    }
}
