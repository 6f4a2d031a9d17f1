//! # anofox-anomaly
//!
//! Anomaly detection and correlation library for univariate time series.
//!
//! Provides SAX bitmap, EMA, derivative, weighted-sum ensemble, normal
//! distribution and absolute threshold anomaly scorers, threshold-based
//! anomaly detection with peak refinement, and cross, Pearson and
//! Spearman rank correlation between time series.

// Allow some clippy warnings for cleaner code in specific cases
#![allow(clippy::needless_range_loop)]

pub mod core;
pub mod correlation;
pub mod detection;
pub mod error;
pub mod scoring;
pub mod utils;

pub use error::{AnomalyError, Result};

pub mod prelude {
    pub use crate::core::{ScoreList, TimeSeries};
    pub use crate::correlation::{CorrelationMethod, Correlator};
    pub use crate::detection::{Anomaly, Detector};
    pub use crate::error::{AnomalyError, Result};
    pub use crate::scoring::{BitmapScorer, Scorer};
}
