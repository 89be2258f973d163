//! Column statistics used to choose splits.
//!
//! All helpers return `None` on an empty column instead of a NaN, so callers
//! have to decide what an empty column means for them.

use num::Float;

/// Arithmetic mean of a column.
pub fn mean<T: Float>(values: &[T]) -> Option<T> {
    if values.is_empty() {
        return None;
    }
    let sum = values.iter().fold(T::zero(), |acc, &x| acc + x);
    T::from(values.len()).map(|n| sum / n)
}

/// Population variance of a column (divides by `n`, not `n - 1`).
///
/// ```
/// use kdknnlib::stats::variance;
///
/// assert_eq!(variance(&[1.0f32, 3.0]), Some(1.0));
/// assert_eq!(variance::<f32>(&[]), None);
/// ```
pub fn variance<T: Float>(values: &[T]) -> Option<T> {
    let mu = mean(values)?;
    let ssd = values.iter().fold(T::zero(), |acc, &x| {
        let diff = x - mu;
        acc + diff * diff
    });
    T::from(values.len()).map(|n| ssd / n)
}

/// Quantile of a column with linear interpolation between the closest ranks.
///
/// `q` is clamped into `[0, 1]`. NaN values sort last.
pub fn quantile<T: Float>(values: &[T], q: f64) -> Option<T> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or_else(|| a.is_nan().cmp(&b.is_nan())));

    let q = q.max(0.0).min(1.0);
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = T::from(position - lower as f64)?;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * weight)
}

/// Median of a column. Even-length columns average the two middle values.
///
/// ```
/// use kdknnlib::stats::median;
///
/// assert_eq!(median(&[5.0f32, 1.0, 3.0]), Some(3.0));
/// assert_eq!(median(&[4.0f32, 1.0, 3.0, 2.0]), Some(2.5));
/// ```
pub fn median<T: Float>(values: &[T]) -> Option<T> {
    quantile(values, 0.5)
}
