//! Error types for the anofox-anomaly library.

use thiserror::Error;

/// Result type alias for anomaly detection operations.
pub type Result<T> = std::result::Result<T, AnomalyError>;

/// Errors that can occur during scoring and correlation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnomalyError {
    /// Not enough data points for the operation.
    ///
    /// Recoverable for the bitmap scorer: the [`Detector`](crate::detection::Detector)
    /// falls back to the weighted-sum ensemble when it sees this variant.
    /// Fatal everywhere else.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Dimension mismatch between parallel data structures.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Timestamp-related error.
    #[error("timestamp error: {0}")]
    TimestampError(String),
}
