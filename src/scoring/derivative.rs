//! Rate-of-change scorer.

use crate::core::{ScoreList, TimeSeries};
use crate::error::{AnomalyError, Result};
use crate::scoring::Scorer;
use crate::utils::stats;

/// Scores each point by how far its rate of change strays from the smoothed
/// rate of change of the series.
///
/// Derivatives are taken as `|dv/dt|` per step (`|dv|` when two points share
/// a timestamp) and front-padded with the first derivative so the output
/// stays parallel to the input.
#[derive(Debug, Clone)]
pub struct DerivativeScorer {
    /// EMA smoothing factor in (0, 1] applied to the derivatives.
    pub smoothing_factor: f64,
}

impl Default for DerivativeScorer {
    fn default() -> Self {
        Self {
            smoothing_factor: 0.2,
        }
    }
}

impl DerivativeScorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the smoothing factor.
    pub fn with_smoothing_factor(mut self, factor: f64) -> Self {
        self.smoothing_factor = factor;
        self
    }

    fn compute_derivatives(series: &TimeSeries) -> Vec<f64> {
        let timestamps = series.timestamps();
        let values = series.values();
        let n = timestamps.len();
        if n < 2 {
            return vec![0.0; n];
        }

        let mut derivatives = Vec::with_capacity(n);
        for i in 1..n {
            let dt = timestamps[i] - timestamps[i - 1];
            let dv = values[i] - values[i - 1];
            let derivative = if dt != 0.0 { dv / dt } else { dv };
            derivatives.push(derivative.abs());
        }
        // front-pad so index i still maps to point i
        derivatives.insert(0, derivatives[0]);
        derivatives
    }
}

impl Scorer for DerivativeScorer {
    fn score(&self, series: &TimeSeries) -> Result<ScoreList> {
        if self.smoothing_factor <= 0.0 || self.smoothing_factor > 1.0 {
            return Err(AnomalyError::InvalidParameter(
                "smoothing factor must be in (0, 1]".to_string(),
            ));
        }

        let derivatives = Self::compute_derivatives(series);
        let smoothed = stats::exponential_moving_average(&derivatives, self.smoothing_factor);

        let mut scores: Vec<f64> = derivatives
            .iter()
            .zip(&smoothed)
            .map(|(d, s)| (d - s).abs())
            .collect();

        let std_dev = stats::std_dev(&scores);
        if std_dev > 0.0 {
            for score in &mut scores {
                *score /= std_dev;
            }
        }

        Ok(ScoreList::from_parts(series.timestamps().to_vec(), scores).denoise())
    }
}
