//! Anomaly scoring algorithms.
//!
//! Every algorithm implements [`Scorer`]: a time series goes in, one score per
//! point comes out. Higher scores mean more anomalous.
//!
//! - [`BitmapScorer`]: SAX discretization with sliding chunk-frequency
//!   windows, the primary detector for longer series
//! - [`EmaScorer`]: deviation from a short exponential moving average
//! - [`DerivativeScorer`]: deviation of the rate of change from its own
//!   moving average
//! - [`WeightedSumScorer`]: EMA and derivative blended, the fallback for
//!   series too short for the bitmap scorer
//! - [`NormalDistributionScorer`]: low-likelihood scoring under a fitted
//!   normal distribution
//! - [`AbsoluteThresholdScorer`]: distance outside a fixed band

use std::fmt;

use crate::core::{ScoreList, TimeSeries};
use crate::error::Result;

mod absolute_threshold;
mod bitmap;
mod derivative;
mod ema;
mod normal_distribution;
mod weighted_sum;

pub use absolute_threshold::AbsoluteThresholdScorer;
pub use bitmap::{BitmapScorer, SaxEncoding};
pub use derivative::DerivativeScorer;
pub use ema::EmaScorer;
pub use normal_distribution::NormalDistributionScorer;
pub use weighted_sum::WeightedSumScorer;

/// Trait for anomaly scoring algorithms.
pub trait Scorer: fmt::Debug {
    /// Score every point of the series.
    ///
    /// The returned list is parallel to the series: same length, same
    /// timestamps. Fails with
    /// [`InsufficientData`](crate::AnomalyError::InsufficientData) when the
    /// series cannot support the algorithm's window requirements.
    fn score(&self, series: &TimeSeries) -> Result<ScoreList>;
}
