//! Distance kernels between two equal-length points.
//!
//! Every kernel has the [`Distance`](crate::Distance) signature so any of them
//! can be handed to a [`Tree`](crate::Tree). Only the overlapping prefix of the
//! two slices is compared; callers are expected to pass points of the same
//! dimension.

/// Euclidean (L2) distance.
///
/// ```
/// use kdknnlib::euclidean;
///
/// assert_eq!(euclidean(&[0.0, 0.0], &[3.0, 4.0]), 5.0);
/// ```
pub fn euclidean(a: &[f32], b: &[f32]) -> f64 {
    squared_euclidean(a, b).sqrt()
}

/// Squared Euclidean distance. Orders points the same way as [`euclidean`]
/// without the square root.
pub fn squared_euclidean(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| {
            let diff = x as f64 - y as f64;
            diff * diff
        })
        .sum()
}

/// Manhattan (L1) distance.
pub fn manhattan(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| (x as f64 - y as f64).abs())
        .sum()
}

/// Chebyshev (L-infinity) distance.
pub fn chebyshev(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| (x as f64 - y as f64).abs())
        .fold(0.0, f64::max)
}
