//! Pearson correlation coefficient.

use crate::core::TimeSeries;
use crate::error::{AnomalyError, Result};
use crate::utils::stats;

/// Measure the linear correlation between two series of equal length.
///
/// Returns a coefficient in `[-1, 1]`: 1 for total positive and -1 for
/// total negative linear correlation, 0 when either side has no variance.
/// Meant for series whose values are roughly normally distributed; see
/// [`spearman_rank_correlation`](crate::correlation::spearman_rank_correlation)
/// otherwise.
pub fn pearson_correlation(current: &TimeSeries, target: &TimeSeries) -> Result<f64> {
    if current.len() != target.len() {
        return Err(AnomalyError::DimensionMismatch {
            expected: current.len(),
            got: target.len(),
        });
    }
    Ok(coefficient(current.values(), target.values()))
}

/// Pearson coefficient over raw value slices of equal length.
pub(crate) fn coefficient(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len() as f64;
    let x_squares: f64 = x.iter().map(|v| v * v).sum();
    let y_squares: f64 = y.iter().map(|v| v * v).sum();
    let x_mean = stats::mean(x);
    let y_mean = stats::mean(y);

    let denom = ((x_squares - n * x_mean * x_mean) * (y_squares - n * y_mean * y_mean)).sqrt();
    if denom == 0.0 {
        return 0.0;
    }
    let products: f64 = x.iter().zip(y).map(|(a, b)| a * b).sum();
    (products - n * x_mean * y_mean) / denom
}
