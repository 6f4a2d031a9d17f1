//! Fixed-band threshold scorer.

use crate::core::{ScoreList, TimeSeries};
use crate::error::{AnomalyError, Result};
use crate::scoring::Scorer;

/// Scores each point by its distance outside a fixed `[lower, upper]` band.
///
/// Points inside the band score 0.
#[derive(Debug, Clone)]
pub struct AbsoluteThresholdScorer {
    pub lower_threshold: f64,
    pub upper_threshold: f64,
}

impl AbsoluteThresholdScorer {
    pub fn new(lower_threshold: f64, upper_threshold: f64) -> Self {
        Self {
            lower_threshold,
            upper_threshold,
        }
    }
}

impl Scorer for AbsoluteThresholdScorer {
    fn score(&self, series: &TimeSeries) -> Result<ScoreList> {
        if self.lower_threshold > self.upper_threshold {
            return Err(AnomalyError::InvalidParameter(
                "lower threshold must not exceed upper threshold".to_string(),
            ));
        }

        let scores = series
            .values()
            .iter()
            .map(|&v| {
                if v > self.upper_threshold {
                    v - self.upper_threshold
                } else if v < self.lower_threshold {
                    self.lower_threshold - v
                } else {
                    0.0
                }
            })
            .collect();

        Ok(ScoreList::from_parts(series.timestamps().to_vec(), scores))
    }
}
