//! Lag-scanning cross-correlation.

use crate::core::TimeSeries;
use crate::error::{AnomalyError, Result};

/// Outcome of a cross-correlation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrelationResult {
    /// Timestamp offset of the best unshifted coefficient.
    pub shift: f64,
    /// Best correlation coefficient over all evaluated lags.
    pub coefficient: f64,
    /// Best coefficient after weighting each lag by its offset.
    pub shifted_coefficient: f64,
}

/// Cross-correlation between two series over a range of sample lags.
///
/// Both series are normalized by their own maximum and aligned onto a
/// common timestamp grid before the scan, so coefficients stay in
/// `[-1, 1]` and two identical series correlate to exactly 1. Lags are
/// limited to sample offsets whose timestamp distance from the series
/// start stays within `max_shift`; when every point is within `max_shift`
/// only the unshifted lag is evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossCorrelator {
    /// Largest timestamp offset considered when scanning lags.
    pub max_shift: f64,
    /// Weight of the offset bonus applied to shifted coefficients.
    pub impact: f64,
}

impl Default for CrossCorrelator {
    fn default() -> Self {
        Self {
            max_shift: 60.0,
            impact: 0.05,
        }
    }
}

impl CrossCorrelator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximal shift in timestamp units.
    pub fn with_max_shift(mut self, max_shift: f64) -> Self {
        self.max_shift = max_shift;
        self
    }

    /// Set the impact of the shift on shifted coefficients.
    pub fn with_impact(mut self, impact: f64) -> Self {
        self.impact = impact;
        self
    }

    /// Correlate the two series.
    ///
    /// Each series must have at least 2 points.
    pub fn run(&self, current: &TimeSeries, target: &TimeSeries) -> Result<CorrelationResult> {
        if current.len() < 2 || target.len() < 2 {
            return Err(AnomalyError::InsufficientData {
                needed: 2,
                got: current.len().min(target.len()),
            });
        }

        let mut current = current.normalize();
        let mut target = target.normalize();
        current.align(&mut target);

        let n = current.len();
        let current_mean = current.mean();
        let target_mean = target.mean();
        let denom = current.std_dev() * target.std_dev() * n as f64;

        let timestamps = current.timestamps();
        let start = timestamps[0];
        // number of leading samples whose offset from the start is within
        // max_shift
        let max_lag = timestamps.partition_point(|&t| t - start <= self.max_shift);
        let delays = if max_lag == 0 || max_lag == n {
            0..1
        } else {
            -(max_lag as i64)..max_lag as i64
        };

        let current_values = current.values();
        let target_values = target.values();
        let mut best: Option<(f64, f64)> = None;
        let mut best_shifted = f64::NEG_INFINITY;
        for delay in delays {
            let offset = (timestamps[delay.unsigned_abs() as usize] - start).abs();

            let mut sum = 0.0;
            for (i, &value) in current_values.iter().enumerate() {
                let j = i as i64 + delay;
                if j >= 0 && (j as usize) < n {
                    sum += (value - current_mean) * (target_values[j as usize] - target_mean);
                }
            }
            // a zero denominator leaves the raw cross term unnormalized
            let r = if denom != 0.0 { sum / denom } else { sum };

            if best.map_or(true, |(_, best_r)| r > best_r) {
                best = Some((offset, r));
            }
            let shifted = if self.max_shift > 0.0 {
                r * (1.0 + offset / self.max_shift * self.impact)
            } else {
                r
            };
            if shifted > best_shifted {
                best_shifted = shifted;
            }
        }

        // delays is never empty, so best is always set
        let (shift, coefficient) = best.unwrap_or((0.0, 0.0));
        Ok(CorrelationResult {
            shift,
            coefficient,
            shifted_coefficient: best_shifted,
        })
    }

    /// Correlate the two series and return only the unshifted coefficient.
    pub fn coefficient(&self, current: &TimeSeries, target: &TimeSeries) -> Result<f64> {
        Ok(self.run(current, target)?.coefficient)
    }
}
