//! Correlation between two time series.
//!
//! Three methods behind one facade ([`Correlator`]): lag-scanning
//! [cross-correlation](CrossCorrelator), [Pearson](pearson_correlation) and
//! [Spearman rank](spearman_rank_correlation). The facade optionally
//! replaces each series with its anomaly scores and crops both to a time
//! period before correlating.

mod cross;
mod pearson;
mod spearman;

pub use cross::{CorrelationResult, CrossCorrelator};
pub use pearson::pearson_correlation;
pub use spearman::spearman_rank_correlation;

use crate::core::TimeSeries;
use crate::detection::Detector;
use crate::error::Result;

/// Correlation method run by the [`Correlator`].
#[derive(Debug, Clone, PartialEq)]
pub enum CorrelationMethod {
    /// Cross-correlation under the given configuration.
    CrossCorrelation(CrossCorrelator),
    /// Pearson linear correlation.
    Pearson,
    /// Spearman rank correlation.
    SpearmanRank,
}

impl Default for CorrelationMethod {
    fn default() -> Self {
        Self::CrossCorrelation(CrossCorrelator::default())
    }
}

/// Facade over the correlation methods with a shared preparation pipeline.
///
/// Configured once through chained setters, then reusable: `run` never
/// mutates the correlator or its inputs. Preparation first replaces each
/// series with its anomaly scores when `use_anomaly_score` is set, then
/// crops to `time_period` when one is set.
///
/// # Example
///
/// ```
/// use anofox_anomaly::core::TimeSeries;
/// use anofox_anomaly::correlation::{CorrelationMethod, Correlator};
///
/// let a = TimeSeries::new(vec![0.0, 1.0, 2.0], vec![1.0, 2.0, 3.0]).unwrap();
/// let b = TimeSeries::new(vec![0.0, 1.0, 2.0], vec![2.0, 4.0, 6.0]).unwrap();
///
/// let coefficient = Correlator::new()
///     .with_method(CorrelationMethod::Pearson)
///     .run(&a, &b)
///     .unwrap();
/// assert_eq!(coefficient, 1.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Correlator {
    /// Method to run.
    pub method: CorrelationMethod,
    /// Correlate anomaly scores instead of raw values.
    pub use_anomaly_score: bool,
    /// Inclusive time period both series are cropped to.
    pub time_period: Option<(f64, f64)>,
}

impl Correlator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the correlation method.
    pub fn with_method(mut self, method: CorrelationMethod) -> Self {
        self.method = method;
        self
    }

    /// Correlate anomaly scores instead of raw values.
    pub fn with_anomaly_scores(mut self, use_anomaly_score: bool) -> Self {
        self.use_anomaly_score = use_anomaly_score;
        self
    }

    /// Crop both series to `[start, end]` before correlating.
    pub fn with_time_period(mut self, start: f64, end: f64) -> Self {
        self.time_period = Some((start, end));
        self
    }

    /// Run the configured method over both series.
    pub fn run(&self, current: &TimeSeries, target: &TimeSeries) -> Result<f64> {
        let current = self.prepare(current)?;
        let target = self.prepare(target)?;

        match &self.method {
            CorrelationMethod::CrossCorrelation(correlator) => {
                correlator.coefficient(&current, &target)
            }
            CorrelationMethod::Pearson => pearson_correlation(&current, &target),
            CorrelationMethod::SpearmanRank => spearman_rank_correlation(&current, &target),
        }
    }

    fn prepare(&self, series: &TimeSeries) -> Result<TimeSeries> {
        let mut series = if self.use_anomaly_score {
            Detector::new().scores(series)?.into_time_series()
        } else {
            series.clone()
        };
        if let Some((start, end)) = self.time_period {
            series = series.crop(start, end);
        }
        Ok(series)
    }
}
