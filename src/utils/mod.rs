//! Utility functions shared across the crate.

pub mod stats;

pub use stats::{exponential_moving_average, mean, median, min_max, std_dev, variance};
