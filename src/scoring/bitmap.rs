//! SAX bitmap anomaly scorer.

use std::collections::HashMap;

use crate::core::{ScoreList, TimeSeries};
use crate::error::{AnomalyError, Result};
use crate::scoring::Scorer;
use crate::utils::stats;

/// Minimum combined size of the lagging and future windows.
const MINIMAL_POINTS_IN_WINDOWS: usize = 50;
/// Fraction of the series length used for each window when none is set.
const DEFAULT_WINDOW_FRACTION: f64 = 0.0125;

/// SAX representation of a series: one alphabet symbol per sample.
///
/// The value range `[min, max]` is split into `precision` equal-height bands;
/// each value maps to the highest band index it equals or exceeds. Symbols
/// are band indices, so alphabets larger than ten stay one symbol per sample.
/// Immutable once generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaxEncoding {
    symbols: Vec<u8>,
}

impl SaxEncoding {
    fn generate(values: &[f64], precision: usize) -> Self {
        let (min, max) = stats::min_max(values);
        let band_height = (max - min) / precision as f64;

        let symbols = values
            .iter()
            .map(|&value| {
                // ascending scan keeps the highest band the value reaches;
                // a zero band height maps everything to the top band
                let mut band = 0u8;
                for section in 1..precision {
                    if value >= min + section as f64 * band_height {
                        band = section as u8;
                    } else {
                        break;
                    }
                }
                band
            })
            .collect();

        Self { symbols }
    }

    /// Get the symbols, one per input sample.
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    /// Get the number of symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Check if the encoding is empty.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Chunk frequencies of one window, keyed by symbol substrings of the
/// encoding buffer.
type ChunkCounts<'a> = HashMap<&'a [u8], usize>;

fn increment<'a>(counts: &mut ChunkCounts<'a>, chunk: &'a [u8]) {
    *counts.entry(chunk).or_insert(0) += 1;
}

fn decrement(counts: &mut ChunkCounts<'_>, chunk: &[u8]) {
    if let Some(count) = counts.get_mut(chunk) {
        *count -= 1;
        // dropping emptied entries keeps the map identical to one rebuilt
        // from scratch for the same window
        if *count == 0 {
            counts.remove(chunk);
        }
    }
}

/// Frequencies of all chunks lying fully inside `[start, end)`.
fn chunk_frequency<'a>(
    sax: &'a SaxEncoding,
    start: usize,
    end: usize,
    chunk_size: usize,
) -> ChunkCounts<'a> {
    let mut counts = ChunkCounts::new();
    if end - start >= chunk_size {
        for chunk_start in start..=end - chunk_size {
            increment(
                &mut counts,
                &sax.symbols()[chunk_start..chunk_start + chunk_size],
            );
        }
    }
    counts
}

/// The lagging and future chunk-frequency maps around one position.
///
/// `lag_counts` covers `[position - lag, position)`, `future_counts` covers
/// `[position, position + future)`. Advancing by one position touches exactly
/// one leaving and one entering chunk per window, so the maps stay equal to
/// maps rebuilt from scratch. A window shorter than the chunk size holds an
/// empty map and is never updated.
struct WindowState<'a> {
    sax: &'a SaxEncoding,
    chunk_size: usize,
    lag: usize,
    future: usize,
    position: usize,
    lag_counts: ChunkCounts<'a>,
    future_counts: ChunkCounts<'a>,
}

impl<'a> WindowState<'a> {
    fn at(
        sax: &'a SaxEncoding,
        chunk_size: usize,
        lag: usize,
        future: usize,
        position: usize,
    ) -> Self {
        let lag_counts = chunk_frequency(sax, position - lag, position, chunk_size);
        let future_counts = chunk_frequency(sax, position, position + future, chunk_size);
        Self {
            sax,
            chunk_size,
            lag,
            future,
            position,
            lag_counts,
            future_counts,
        }
    }

    fn chunk_at(&self, start: usize) -> &'a [u8] {
        &self.sax.symbols()[start..start + self.chunk_size]
    }

    /// Slide both windows one position to the right.
    fn advance(&mut self) {
        let position = self.position + 1;
        if self.lag >= self.chunk_size {
            // the chunk slices borrow the SAX buffer, not self
            let leaving = self.chunk_at(position - 1 - self.lag);
            let entering = self.chunk_at(position - self.chunk_size);
            decrement(&mut self.lag_counts, leaving);
            increment(&mut self.lag_counts, entering);
        }
        if self.future >= self.chunk_size {
            let leaving = self.chunk_at(position - 1);
            let entering = self.chunk_at(position + self.future - self.chunk_size);
            decrement(&mut self.future_counts, leaving);
            increment(&mut self.future_counts, entering);
        }
        self.position = position;
    }

    /// Squared-difference distance between the two frequency maps.
    fn distance(&self) -> f64 {
        let mut score = 0.0;
        for (chunk, &lag_count) in &self.lag_counts {
            let future_count = self.future_counts.get(*chunk).copied().unwrap_or(0);
            let diff = future_count as f64 - lag_count as f64;
            score += diff * diff;
        }
        for (chunk, &future_count) in &self.future_counts {
            if !self.lag_counts.contains_key(*chunk) {
                let count = future_count as f64;
                score += count * count;
            }
        }
        score
    }
}

/// The primary anomaly scorer: SAX discretization plus a comparison of
/// chunk frequencies between a lagging and a future window at every
/// position.
///
/// Positions before the first full lagging window or after the last full
/// future window score 0. Window sizes default to 1.25% of the series
/// length; the combined span must reach 50 points and fit inside the
/// series, otherwise scoring fails with
/// [`InsufficientData`](AnomalyError::InsufficientData).
#[derive(Debug, Clone)]
pub struct BitmapScorer {
    /// Length of the symbol substrings counted per window.
    pub chunk_size: usize,
    /// Number of SAX bands (alphabet size), at most 255.
    pub precision: usize,
    /// Lagging window size in points, derived from the series when unset.
    pub lag_window_size: Option<usize>,
    /// Future window size in points, derived from the series when unset.
    pub future_window_size: Option<usize>,
}

impl Default for BitmapScorer {
    fn default() -> Self {
        Self {
            chunk_size: 2,
            precision: 4,
            lag_window_size: None,
            future_window_size: None,
        }
    }
}

impl BitmapScorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the chunk size.
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    /// Set the alphabet size.
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Set the lagging window size.
    pub fn with_lag_window_size(mut self, size: usize) -> Self {
        self.lag_window_size = Some(size);
        self
    }

    /// Set the future window size.
    pub fn with_future_window_size(mut self, size: usize) -> Self {
        self.future_window_size = Some(size);
        self
    }

    /// Discretize the series into its SAX representation.
    pub fn discretize(&self, series: &TimeSeries) -> Result<SaxEncoding> {
        self.validate()?;
        Ok(SaxEncoding::generate(series.values(), self.precision))
    }

    fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(AnomalyError::InvalidParameter(
                "chunk size must be positive".to_string(),
            ));
        }
        if self.precision == 0 || self.precision > u8::MAX as usize + 1 {
            return Err(AnomalyError::InvalidParameter(
                "precision must be in 1..=256".to_string(),
            ));
        }
        Ok(())
    }

    fn window_sizes(&self, series_len: usize) -> (usize, usize) {
        let derived = (series_len as f64 * DEFAULT_WINDOW_FRACTION) as usize;
        (
            self.lag_window_size.unwrap_or(derived),
            self.future_window_size.unwrap_or(derived),
        )
    }
}

impl Scorer for BitmapScorer {
    fn score(&self, series: &TimeSeries) -> Result<ScoreList> {
        self.validate()?;

        let n = series.len();
        let (lag, future) = self.window_sizes(n);
        let span = lag + future;
        if span < MINIMAL_POINTS_IN_WINDOWS {
            return Err(AnomalyError::InsufficientData {
                needed: MINIMAL_POINTS_IN_WINDOWS,
                got: span,
            });
        }
        if span > n {
            return Err(AnomalyError::InsufficientData {
                needed: span,
                got: n,
            });
        }

        let sax = SaxEncoding::generate(series.values(), self.precision);
        let mut scores = vec![0.0; n];

        // eligible positions carry a full lagging window on the left and a
        // full future window on the right; the maintenance is sequential by
        // construction
        let first = lag;
        let last = n - future;
        let mut window = WindowState::at(&sax, self.chunk_size, lag, future, first);
        scores[first] = window.distance();
        for score in &mut scores[first + 1..=last] {
            window.advance();
            *score = window.distance();
        }

        Ok(ScoreList::from_parts(series.timestamps().to_vec(), scores))
    }
}
