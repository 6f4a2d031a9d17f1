//! Spearman rank correlation coefficient.

use crate::core::TimeSeries;
use crate::correlation::pearson;
use crate::error::{AnomalyError, Result};

/// Measure the monotonic correlation between two series of equal length.
///
/// The non-parametric counterpart of
/// [`pearson_correlation`](crate::correlation::pearson_correlation): both
/// value vectors are replaced by their ranks before the Pearson formula is
/// applied, so any monotonic relation scores 1 (or -1) regardless of the
/// value distributions. Requires at least 3 points.
pub fn spearman_rank_correlation(current: &TimeSeries, target: &TimeSeries) -> Result<f64> {
    if current.len() != target.len() {
        return Err(AnomalyError::DimensionMismatch {
            expected: current.len(),
            got: target.len(),
        });
    }
    if current.len() < 3 {
        return Err(AnomalyError::InsufficientData {
            needed: 3,
            got: current.len(),
        });
    }

    let current_ranks = ranks(current.values());
    let target_ranks = ranks(target.values());
    Ok(pearson::coefficient(&current_ranks, &target_ranks))
}

/// 1-based ranks of the values; a run of equal values shares the mean of
/// the ranks it occupies.
fn ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| {
        values[a]
            .partial_cmp(&values[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut ranks = vec![0.0; values.len()];
    let mut run_start = 0;
    while run_start < order.len() {
        let mut run_end = run_start;
        while run_end + 1 < order.len() && values[order[run_end + 1]] == values[order[run_start]] {
            run_end += 1;
        }
        let rank = (run_start + run_end) as f64 / 2.0 + 1.0;
        for &index in &order[run_start..=run_end] {
            ranks[index] = rank;
        }
        run_start = run_end + 1;
    }
    ranks
}
