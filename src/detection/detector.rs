//! Threshold-based anomaly detection.

use crate::core::{ScoreList, TimeSeries};
use crate::error::{AnomalyError, Result};
use crate::scoring::{BitmapScorer, EmaScorer, Scorer, WeightedSumScorer};

/// One detected anomaly.
///
/// `start_timestamp` and `end_timestamp` bound the contiguous run of
/// above-threshold scores; `timestamp`, `value` and `score` describe the
/// peak of the refined scores inside that window.
#[derive(Debug, Clone, PartialEq)]
pub struct Anomaly {
    /// First timestamp of the anomalous window.
    pub start_timestamp: f64,
    /// Last timestamp of the anomalous window.
    pub end_timestamp: f64,
    /// Timestamp of the highest refined score inside the window.
    pub timestamp: f64,
    /// Series value at the peak.
    pub value: f64,
    /// Refined score at the peak.
    pub score: f64,
    /// Threshold that produced the window.
    pub threshold: f64,
}

impl Anomaly {
    /// Get the anomalous window as a `(start, end)` timestamp pair.
    pub fn time_window(&self) -> (f64, f64) {
        (self.start_timestamp, self.end_timestamp)
    }
}

/// Detects anomalous windows by sweeping a threshold over anomaly scores.
///
/// Scores come from the configured scorer, or from [`BitmapScorer`] with a
/// [`WeightedSumScorer`] fallback when the series is too short for bitmap
/// windows. Contiguous runs of scores strictly above the threshold become
/// candidate windows; each window is re-scored with [`EmaScorer`] to place
/// the peak.
///
/// # Example
///
/// ```
/// use anofox_anomaly::core::TimeSeries;
/// use anofox_anomaly::detection::Detector;
///
/// let timestamps: Vec<f64> = (0..200).map(|i| i as f64).collect();
/// let values: Vec<f64> = (0..200)
///     .map(|i| if i == 120 { 80.0 } else { (i as f64 * 0.4).sin() })
///     .collect();
/// let series = TimeSeries::new(timestamps, values).unwrap();
///
/// let anomalies = Detector::new().with_threshold(3.0).anomalies(&series).unwrap();
/// assert!(!anomalies.is_empty());
/// ```
#[derive(Debug)]
pub struct Detector {
    /// Scores strictly above this value are anomalous.
    pub threshold: f64,
    /// Scorer used instead of the default bitmap pipeline.
    pub scorer: Option<Box<dyn Scorer + Send + Sync>>,
}

impl Default for Detector {
    fn default() -> Self {
        Self {
            threshold: 2.0,
            scorer: None,
        }
    }
}

impl Detector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the anomaly threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Replace the default scoring pipeline with a custom scorer.
    pub fn with_scorer(mut self, scorer: impl Scorer + Send + Sync + 'static) -> Self {
        self.scorer = Some(Box::new(scorer));
        self
    }

    /// Score the series with the configured scorer, or with the default
    /// pipeline.
    ///
    /// The default pipeline runs the bitmap scorer and falls back to the
    /// weighted-sum ensemble when the series cannot fill the bitmap
    /// windows. Errors of a configured scorer are returned as-is.
    pub fn scores(&self, series: &TimeSeries) -> Result<ScoreList> {
        if let Some(scorer) = &self.scorer {
            return scorer.score(series);
        }
        match BitmapScorer::new().score(series) {
            Ok(scores) => Ok(scores),
            Err(AnomalyError::InsufficientData { .. }) => WeightedSumScorer::new().score(series),
            Err(err) => Err(err),
        }
    }

    /// Detect anomalies in the series.
    pub fn anomalies(&self, series: &TimeSeries) -> Result<Vec<Anomaly>> {
        let scores = self.scores(series)?;
        self.anomalies_from_scores(series, &scores)
    }

    /// Detect anomalies from precomputed scores.
    ///
    /// The scores must cover the series point for point. A run that is
    /// still open at the end of the series is reported like any other.
    pub fn anomalies_from_scores(
        &self,
        series: &TimeSeries,
        scores: &ScoreList,
    ) -> Result<Vec<Anomaly>> {
        if series.len() != scores.len() {
            return Err(AnomalyError::DimensionMismatch {
                expected: series.len(),
                got: scores.len(),
            });
        }

        let timestamps = scores.timestamps();
        let mut anomalies = Vec::new();
        let mut open: Option<(f64, f64)> = None;
        for (i, &score) in scores.scores().iter().enumerate() {
            if score > self.threshold {
                let start = open.map_or(timestamps[i], |(start, _)| start);
                open = Some((start, timestamps[i]));
            } else if let Some(window) = open.take() {
                self.refine(series, window, &mut anomalies)?;
            }
        }
        if let Some(window) = open {
            self.refine(series, window, &mut anomalies)?;
        }

        Ok(anomalies)
    }

    /// Re-score one window and push the anomaly at the refined peak.
    fn refine(
        &self,
        series: &TimeSeries,
        window: (f64, f64),
        anomalies: &mut Vec<Anomaly>,
    ) -> Result<()> {
        let (start, end) = window;
        let cropped = series.crop(start, end);
        if cropped.is_empty() {
            return Ok(());
        }

        let refined = EmaScorer::new().score(&cropped)?;
        let (peak_index, peak_score) = refined.scores().iter().enumerate().fold(
            (0, f64::NEG_INFINITY),
            |best, (i, &score)| {
                if score > best.1 {
                    (i, score)
                } else {
                    best
                }
            },
        );

        anomalies.push(Anomaly {
            start_timestamp: start,
            end_timestamp: end,
            timestamp: refined.timestamps()[peak_index],
            value: cropped.values()[peak_index],
            score: peak_score,
            threshold: self.threshold,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::AbsoluteThresholdScorer;
    use approx::assert_relative_eq;

    fn spiked_series(n: usize, spike_at: std::ops::Range<usize>, spike: f64) -> TimeSeries {
        let timestamps = (0..n).map(|i| i as f64).collect();
        let values = (0..n)
            .map(|i| {
                if spike_at.contains(&i) {
                    spike
                } else {
                    (i as f64 * 0.3).sin()
                }
            })
            .collect();
        TimeSeries::new(timestamps, values).unwrap()
    }

    #[test]
    fn default_detector_flags_an_injected_spike() {
        let series = spiked_series(2000, 1000..1010, 50.0);

        let anomalies = Detector::new().anomalies(&series).unwrap();

        assert!(!anomalies.is_empty());
        assert!(
            anomalies
                .iter()
                .any(|a| a.start_timestamp <= 1035.0 && a.end_timestamp >= 975.0),
            "no anomaly near the spike: {anomalies:?}"
        );
        for anomaly in &anomalies {
            assert_eq!(anomaly.threshold, 2.0);
            assert!(anomaly.start_timestamp <= anomaly.timestamp);
            assert!(anomaly.timestamp <= anomaly.end_timestamp);
        }
    }

    #[test]
    fn detector_is_deterministic() {
        let series = spiked_series(2000, 700..705, 40.0);
        let detector = Detector::new();

        let first = detector.anomalies(&series).unwrap();
        let second = detector.anomalies(&series).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn short_series_falls_back_to_the_ensemble_scorer() {
        let series = spiked_series(100, 50..52, 30.0);

        let detector = Detector::new();
        let scores = detector.scores(&series).unwrap();
        assert_eq!(scores.len(), series.len());

        let anomalies = detector.anomalies(&series).unwrap();
        assert!(!anomalies.is_empty());
        let peak = anomalies[0].timestamp;
        assert!((48.0..=54.0).contains(&peak), "peak at {peak}");
    }

    #[test]
    fn custom_scorer_and_threshold_drive_the_sweep() {
        let timestamps = vec![0.0, 1.0, 2.0, 3.0, 4.0];
        let values = vec![0.0, 0.0, 10.0, 0.0, 0.0];
        let series = TimeSeries::new(timestamps, values).unwrap();

        let anomalies = Detector::new()
            .with_threshold(3.0)
            .with_scorer(AbsoluteThresholdScorer::new(-5.0, 5.0))
            .anomalies(&series)
            .unwrap();

        assert_eq!(anomalies.len(), 1);
        let anomaly = &anomalies[0];
        assert_eq!(anomaly.time_window(), (2.0, 2.0));
        assert_relative_eq!(anomaly.timestamp, 2.0);
        assert_relative_eq!(anomaly.value, 10.0);
        assert_relative_eq!(anomaly.score, 0.0);
        assert_relative_eq!(anomaly.threshold, 3.0);
    }

    #[test]
    fn trailing_run_is_reported() {
        let series =
            TimeSeries::new(vec![0.0, 1.0, 2.0, 3.0, 4.0], vec![1.0, 1.0, 1.0, 1.0, 9.0]).unwrap();
        let scores =
            ScoreList::new(vec![0.0, 1.0, 2.0, 3.0, 4.0], vec![0.0, 0.0, 0.0, 4.0, 5.0]).unwrap();

        let anomalies = Detector::new()
            .anomalies_from_scores(&series, &scores)
            .unwrap();

        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].time_window(), (3.0, 4.0));
        assert_relative_eq!(anomalies[0].timestamp, 4.0);
        assert_relative_eq!(anomalies[0].value, 9.0);
    }

    #[test]
    fn runs_split_at_below_threshold_points() {
        let series =
            TimeSeries::new(vec![0.0, 1.0, 2.0], vec![5.0, 1.0, 5.0]).unwrap();
        let scores = ScoreList::new(vec![0.0, 1.0, 2.0], vec![3.0, 0.0, 3.0]).unwrap();

        let detector = Detector::new();
        let anomalies = detector.anomalies_from_scores(&series, &scores).unwrap();
        assert_eq!(anomalies.len(), 2);
        assert_eq!(anomalies[0].time_window(), (0.0, 0.0));
        assert_eq!(anomalies[1].time_window(), (2.0, 2.0));

        // scores at the threshold are not anomalous
        let quiet = ScoreList::new(vec![0.0, 1.0, 2.0], vec![2.0, 2.0, 2.0]).unwrap();
        assert!(detector
            .anomalies_from_scores(&series, &quiet)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn mismatched_score_lengths_are_rejected() {
        let series = TimeSeries::new(vec![0.0, 1.0, 2.0], vec![1.0, 2.0, 3.0]).unwrap();
        let scores = ScoreList::new(vec![0.0, 1.0], vec![0.0, 0.0]).unwrap();

        let result = Detector::new().anomalies_from_scores(&series, &scores);
        assert!(matches!(
            result,
            Err(AnomalyError::DimensionMismatch {
                expected: 3,
                got: 2
            })
        ));
    }

    #[test]
    fn configured_scorer_bypasses_the_bitmap_pipeline() {
        // ten points are far below the bitmap minimum, so a successful run
        // proves the configured scorer was used directly
        let series = spiked_series(10, 5..6, 20.0);
        let scores = Detector::new()
            .with_scorer(EmaScorer::new())
            .scores(&series)
            .unwrap();
        assert_eq!(scores.len(), 10);
    }
}
