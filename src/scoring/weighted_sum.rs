//! Weighted blend of the EMA and derivative scorers.

use crate::core::{ScoreList, TimeSeries};
use crate::error::{AnomalyError, Result};
use crate::scoring::{DerivativeScorer, EmaScorer, Scorer};

/// Ensemble scorer combining [`EmaScorer`] and [`DerivativeScorer`]
/// index-wise.
///
/// Each point takes the larger of the EMA score and the weighted blend
/// `ema * ema_weight + derivative * (1 - ema_weight)`; where the EMA score
/// alone already exceeds `ema_significant`, the derivative score competes as
/// well. Intended for short series; the
/// [`Detector`](crate::detection::Detector) falls back to it when the bitmap
/// scorer has too little data.
#[derive(Debug, Clone)]
pub struct WeightedSumScorer {
    /// Weight of the EMA score in the blend.
    pub ema_weight: f64,
    /// EMA score above which the derivative score competes directly.
    pub ema_significant: f64,
    /// EMA scorer fed into the blend.
    pub ema: EmaScorer,
    /// Derivative scorer fed into the blend.
    pub derivative: DerivativeScorer,
}

impl Default for WeightedSumScorer {
    fn default() -> Self {
        Self {
            ema_weight: 0.65,
            ema_significant: 0.94,
            ema: EmaScorer::default(),
            derivative: DerivativeScorer::default(),
        }
    }
}

impl WeightedSumScorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the blend weight of the EMA score.
    pub fn with_ema_weight(mut self, weight: f64) -> Self {
        self.ema_weight = weight;
        self
    }

    /// Set the significance level above which the derivative competes.
    pub fn with_ema_significant(mut self, significant: f64) -> Self {
        self.ema_significant = significant;
        self
    }

    fn combine(&self, ema_score: f64, derivative_score: f64) -> f64 {
        let weighted =
            ema_score * self.ema_weight + derivative_score * (1.0 - self.ema_weight);
        let score = ema_score.max(weighted);
        if ema_score > self.ema_significant {
            score.max(derivative_score)
        } else {
            score
        }
    }
}

impl Scorer for WeightedSumScorer {
    fn score(&self, series: &TimeSeries) -> Result<ScoreList> {
        if !(0.0..=1.0).contains(&self.ema_weight) {
            return Err(AnomalyError::InvalidParameter(
                "ema weight must be in [0, 1]".to_string(),
            ));
        }

        let ema_scores = self.ema.score(series)?;
        let derivative_scores = self.derivative.score(series)?;

        let scores = ema_scores
            .scores()
            .iter()
            .zip(derivative_scores.scores())
            .map(|(&e, &d)| self.combine(e, d))
            .collect();

        Ok(ScoreList::from_parts(series.timestamps().to_vec(), scores).denoise())
    }
}
