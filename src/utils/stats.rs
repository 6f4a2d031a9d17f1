//! Statistical utility functions.

/// Calculate the mean of a slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Calculate the variance of a slice (population variance with n denominator).
///
/// The correlation coefficients in this crate normalize by `stdev * stdev * n`,
/// which is only exact with the population divisor.
pub fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let m = mean(values);
    let sum_sq: f64 = values.iter().map(|x| (x - m) * (x - m)).sum();
    sum_sq / values.len() as f64
}

/// Calculate the population standard deviation of a slice.
pub fn std_dev(values: &[f64]) -> f64 {
    variance(values).sqrt()
}

/// Calculate the median of a slice.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = sorted.len();
    if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    }
}

/// Find the minimum and maximum of a slice in one pass.
pub fn min_max(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (f64::NAN, f64::NAN);
    }
    let mut min = values[0];
    let mut max = values[0];
    for &v in &values[1..] {
        if v < min {
            min = v;
        }
        if v > max {
            max = v;
        }
    }
    (min, max)
}

/// Exponential moving average with the given smoothing factor.
///
/// The first element seeds the average; each following element blends in with
/// weight `smoothing_factor`:
///
/// `ema[i] = smoothing_factor * x[i] + (1 - smoothing_factor) * ema[i-1]`
///
/// # Example
/// ```
/// use anofox_anomaly::utils::exponential_moving_average;
///
/// let ema = exponential_moving_average(&[1.0, 2.0, 3.0], 0.5);
/// assert_eq!(ema, vec![1.0, 1.5, 2.25]);
/// ```
pub fn exponential_moving_average(values: &[f64], smoothing_factor: f64) -> Vec<f64> {
    let mut ema = Vec::with_capacity(values.len());
    for (i, &v) in values.iter().enumerate() {
        if i == 0 {
            ema.push(v);
        } else {
            ema.push(smoothing_factor * v + (1.0 - smoothing_factor) * ema[i - 1]);
        }
    }
    ema
}
