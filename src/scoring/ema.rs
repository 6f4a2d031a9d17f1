//! Exponential moving average deviation scorer.

use crate::core::{ScoreList, TimeSeries};
use crate::error::{AnomalyError, Result};
use crate::scoring::Scorer;
use crate::utils::stats;

/// Scores each point by its absolute deviation from the exponential moving
/// average of a trailing window, relative to the overall spread.
///
/// While fewer than `lag_window_size` points precede an index, the whole
/// prefix serves as the window. The short default window makes this a
/// responsive local-change detector; the
/// [`Detector`](crate::detection::Detector) also uses it to pin down the peak
/// inside each anomalous interval.
#[derive(Debug, Clone)]
pub struct EmaScorer {
    /// Trailing window length in points.
    pub lag_window_size: usize,
    /// EMA smoothing factor in (0, 1].
    pub smoothing_factor: f64,
}

impl Default for EmaScorer {
    fn default() -> Self {
        Self {
            lag_window_size: 2,
            smoothing_factor: 0.2,
        }
    }
}

impl EmaScorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the trailing window length.
    pub fn with_lag_window_size(mut self, size: usize) -> Self {
        self.lag_window_size = size;
        self
    }

    /// Set the smoothing factor.
    pub fn with_smoothing_factor(mut self, factor: f64) -> Self {
        self.smoothing_factor = factor;
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.smoothing_factor <= 0.0 || self.smoothing_factor > 1.0 {
            return Err(AnomalyError::InvalidParameter(
                "smoothing factor must be in (0, 1]".to_string(),
            ));
        }
        Ok(())
    }
}

impl Scorer for EmaScorer {
    fn score(&self, series: &TimeSeries) -> Result<ScoreList> {
        self.validate()?;

        let values = series.values();
        let std_dev = series.std_dev();
        let mut scores = Vec::with_capacity(values.len());
        for (i, &value) in values.iter().enumerate() {
            let window = &values[i.saturating_sub(self.lag_window_size)..=i];
            let ema = stats::exponential_moving_average(window, self.smoothing_factor);
            let mut score = (value - ema[ema.len() - 1]).abs();
            if std_dev > 0.0 {
                score /= std_dev;
            }
            scores.push(score);
        }

        Ok(ScoreList::from_parts(series.timestamps().to_vec(), scores))
    }
}
