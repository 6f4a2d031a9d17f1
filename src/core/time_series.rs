//! TimeSeries data structure for univariate temporal data.

use crate::error::{AnomalyError, Result};
use crate::utils::stats;

/// A univariate time series stored as parallel timestamp and value vectors.
///
/// Construction sorts points by timestamp and that order is canonical from
/// then on. The sort is stable, so points sharing a timestamp keep their
/// relative input order; duplicates are preserved, never collapsed. An empty
/// series is legal.
#[derive(Debug, Clone)]
pub struct TimeSeries {
    timestamps: Vec<f64>,
    values: Vec<f64>,
}

impl TimeSeries {
    /// Create a new time series from parallel vectors.
    ///
    /// Fails when the vectors differ in length or a timestamp is not finite.
    pub fn new(timestamps: Vec<f64>, values: Vec<f64>) -> Result<Self> {
        if timestamps.len() != values.len() {
            return Err(AnomalyError::DimensionMismatch {
                expected: timestamps.len(),
                got: values.len(),
            });
        }
        if timestamps.iter().any(|t| !t.is_finite()) {
            return Err(AnomalyError::TimestampError(
                "timestamps must be finite".to_string(),
            ));
        }

        let mut points: Vec<(f64, f64)> = timestamps.into_iter().zip(values).collect();
        points.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        let (timestamps, values) = points.into_iter().unzip();

        Ok(Self { timestamps, values })
    }

    /// Internal constructor for series derived from an already-valid one.
    pub(crate) fn from_parts(timestamps: Vec<f64>, values: Vec<f64>) -> Self {
        debug_assert_eq!(timestamps.len(), values.len());
        Self { timestamps, values }
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Check if the series is empty.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Get timestamps in canonical order.
    pub fn timestamps(&self) -> &[f64] {
        &self.timestamps
    }

    /// Get values in canonical order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Get the earliest timestamp, or `None` for an empty series.
    pub fn earliest_timestamp(&self) -> Option<f64> {
        self.timestamps.first().copied()
    }

    /// Get the latest timestamp, or `None` for an empty series.
    pub fn latest_timestamp(&self) -> Option<f64> {
        self.timestamps.last().copied()
    }

    /// Mean of the values (NaN for an empty series).
    pub fn mean(&self) -> f64 {
        stats::mean(&self.values)
    }

    /// Population standard deviation of the values (NaN for an empty series).
    pub fn std_dev(&self) -> f64 {
        stats::std_dev(&self.values)
    }

    /// Median of the values (NaN for an empty series).
    pub fn median(&self) -> f64 {
        stats::median(&self.values)
    }

    /// Return the subsequence with `start <= timestamp <= end`.
    pub fn crop(&self, start: f64, end: f64) -> TimeSeries {
        let mut timestamps = Vec::new();
        let mut values = Vec::new();
        for (&t, &v) in self.timestamps.iter().zip(&self.values) {
            if t >= start && t <= end {
                timestamps.push(t);
                values.push(v);
            }
        }
        TimeSeries::from_parts(timestamps, values)
    }

    /// Return a copy with every timestamp shifted by `offset`.
    pub fn add_offset(&self, offset: f64) -> TimeSeries {
        let timestamps = self.timestamps.iter().map(|t| t + offset).collect();
        TimeSeries::from_parts(timestamps, self.values.clone())
    }

    /// Return a copy with all values divided by the series maximum.
    ///
    /// A zero maximum leaves the values unchanged instead of poisoning the
    /// series with NaN or infinity.
    pub fn normalize(&self) -> TimeSeries {
        let (_, max) = stats::min_max(&self.values);
        if self.is_empty() || max == 0.0 {
            return self.clone();
        }
        let values = self.values.iter().map(|v| v / max).collect();
        TimeSeries::from_parts(self.timestamps.clone(), values)
    }

    /// Return a copy with all values mapped to [0, 1] via `(v - min) / (max - min)`.
    ///
    /// A degenerate range leaves the values unchanged.
    pub fn normalize_with_min_max(&self) -> TimeSeries {
        let (min, max) = stats::min_max(&self.values);
        let range = max - min;
        if self.is_empty() || range == 0.0 {
            return self.clone();
        }
        let values = self.values.iter().map(|v| (v - min) / range).collect();
        TimeSeries::from_parts(self.timestamps.clone(), values)
    }

    /// Align two series onto the union of their timestamp grids, in place.
    ///
    /// Walks both series in timestamp order. Equal heads advance both sides,
    /// each keeping its own point. When one head is strictly smaller, that
    /// side keeps its true point and the other side receives a synthetic
    /// point at the same timestamp carrying its next unconsumed value. Once
    /// one side is exhausted, the remaining timestamps of the longer side are
    /// mirrored into the shorter side carrying the shorter side's last
    /// original value.
    ///
    /// Post-condition: both series have equal length and identical timestamp
    /// vectors. Callers must not assume the original lengths survive. If
    /// either series is empty, both are left unchanged.
    pub fn align(&mut self, other: &mut TimeSeries) {
        if self.is_empty() || other.is_empty() {
            return;
        }

        let capacity = self.len() + other.len();
        let mut timestamps = Vec::with_capacity(capacity);
        let mut self_values = Vec::with_capacity(capacity);
        let mut other_values = Vec::with_capacity(capacity);

        let mut i = 0;
        let mut j = 0;
        while i < self.len() && j < other.len() {
            let t_self = self.timestamps[i];
            let t_other = other.timestamps[j];
            if t_self == t_other {
                timestamps.push(t_self);
                self_values.push(self.values[i]);
                other_values.push(other.values[j]);
                i += 1;
                j += 1;
            } else if t_self < t_other {
                timestamps.push(t_self);
                self_values.push(self.values[i]);
                other_values.push(other.values[j]);
                i += 1;
            } else {
                timestamps.push(t_other);
                self_values.push(self.values[i]);
                other_values.push(other.values[j]);
                j += 1;
            }
        }
        while i < self.len() {
            timestamps.push(self.timestamps[i]);
            self_values.push(self.values[i]);
            other_values.push(other.values[other.len() - 1]);
            i += 1;
        }
        while j < other.len() {
            timestamps.push(other.timestamps[j]);
            self_values.push(self.values[self.len() - 1]);
            other_values.push(other.values[j]);
            j += 1;
        }

        self.timestamps = timestamps.clone();
        self.values = self_values;
        other.timestamps = timestamps;
        other.values = other_values;
    }
}
