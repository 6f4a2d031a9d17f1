//! Normal distribution likelihood scorer.

use statrs::distribution::{Continuous, Normal};

use crate::core::{ScoreList, TimeSeries};
use crate::error::{AnomalyError, Result};
use crate::scoring::Scorer;

/// Scores points by their probability density under a normal distribution
/// fitted to the series.
///
/// Values in the unlikely tails keep their (small) density as the score;
/// values inside the likely region score 0. A constant series fits no
/// distribution and scores all zeros.
#[derive(Debug, Clone)]
pub struct NormalDistributionScorer {
    /// Densities at or above this threshold count as normal.
    pub epsilon_threshold: f64,
}

impl Default for NormalDistributionScorer {
    fn default() -> Self {
        Self {
            epsilon_threshold: 0.0025,
        }
    }
}

impl NormalDistributionScorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the density threshold.
    pub fn with_epsilon_threshold(mut self, threshold: f64) -> Self {
        self.epsilon_threshold = threshold;
        self
    }
}

impl Scorer for NormalDistributionScorer {
    fn score(&self, series: &TimeSeries) -> Result<ScoreList> {
        if self.epsilon_threshold <= 0.0 {
            return Err(AnomalyError::InvalidParameter(
                "epsilon threshold must be positive".to_string(),
            ));
        }

        let mean = series.mean();
        let std_dev = series.std_dev();

        let scores = if std_dev > 0.0 {
            // a zero std_dev has no density to evaluate
            let normal = Normal::new(mean, std_dev).map_err(|e| {
                AnomalyError::InvalidParameter(format!("normal distribution: {e}"))
            })?;
            series
                .values()
                .iter()
                .map(|&v| {
                    let density = normal.pdf(v);
                    if density < self.epsilon_threshold {
                        density
                    } else {
                        0.0
                    }
                })
                .collect()
        } else {
            vec![0.0; series.len()]
        };

        Ok(ScoreList::from_parts(series.timestamps().to_vec(), scores))
    }
}
