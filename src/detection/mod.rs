//! Anomaly detection on top of anomaly scores.
//!
//! [`Detector`] turns the scores of any [`Scorer`](crate::scoring::Scorer)
//! into [`Anomaly`] windows by sweeping a threshold and refining each window
//! to its peak.

mod detector;

pub use detector::{Anomaly, Detector};
