use crate::errors::KnnError;

pub type Result<T> = std::result::Result<T, KnnError>;

/// Key of a node inside a tree's node store.
pub type NodeKey = usize;

/// A distance kernel: symmetric, non-negative, over equal-length vectors.
pub type Distance = fn(&[f32], &[f32]) -> f64;
