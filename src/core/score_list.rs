//! Per-point anomaly scores produced by scorers.

use crate::core::TimeSeries;
use crate::error::{AnomalyError, Result};
use crate::utils::stats;

/// Scores below this fraction of the maximum score count as noise.
const NOISE_THRESHOLD_RATIO: f64 = 0.001;

/// Anomaly scores parallel to the timestamps of the series they were
/// computed from. Higher means more anomalous.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreList {
    timestamps: Vec<f64>,
    scores: Vec<f64>,
}

impl ScoreList {
    /// Create a score list from parallel vectors.
    pub fn new(timestamps: Vec<f64>, scores: Vec<f64>) -> Result<Self> {
        if timestamps.len() != scores.len() {
            return Err(AnomalyError::DimensionMismatch {
                expected: timestamps.len(),
                got: scores.len(),
            });
        }
        Ok(Self { timestamps, scores })
    }

    pub(crate) fn from_parts(timestamps: Vec<f64>, scores: Vec<f64>) -> Self {
        debug_assert_eq!(timestamps.len(), scores.len());
        Self { timestamps, scores }
    }

    /// Get the number of scores.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Get timestamps.
    pub fn timestamps(&self) -> &[f64] {
        &self.timestamps
    }

    /// Get scores.
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    /// The maximum score (NaN for an empty list).
    pub fn max_score(&self) -> f64 {
        let (_, max) = stats::min_max(&self.scores);
        max
    }

    /// Return a copy with noise suppressed: every score strictly below 0.1%
    /// of the maximum becomes 0, all others are kept bit-identical.
    pub fn denoise(&self) -> ScoreList {
        if self.is_empty() {
            return self.clone();
        }
        let threshold = self.max_score() * NOISE_THRESHOLD_RATIO;
        let scores = self
            .scores
            .iter()
            .map(|&s| if s < threshold { 0.0 } else { s })
            .collect();
        ScoreList {
            timestamps: self.timestamps.clone(),
            scores,
        }
    }

    /// Reinterpret the scores as a time series, consuming the list.
    ///
    /// Used by the correlator facade to correlate anomaly scores instead of
    /// raw values.
    pub fn into_time_series(self) -> TimeSeries {
        TimeSeries::from_parts(self.timestamps, self.scores)
    }
}
