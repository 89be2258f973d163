extern crate rand;
use rand::{Rng, SeedableRng};

extern crate rand_chacha;
use rand_chacha::ChaCha20Rng;

use std::f32::consts::PI;

use crate::types::Result;
use crate::util::check_argument;

/// A labeled, row-oriented collection of fixed-length feature vectors.
///
/// This is the contract a [`Tree`](crate::Tree) needs from its training data:
/// a row count, column-wise access for computing split statistics, and a way
/// to partition the rows into two disjoint datasets by a predicate.
pub trait Dataset: Sized {
    type Label: Clone;

    /// Returns the number of rows.
    fn row_count(&self) -> usize;

    /// Returns the number of features of every row.
    fn dimensions(&self) -> usize;

    /// Returns all values of the feature at `index`, in row order.
    fn column(&self, index: usize) -> Vec<f32>;

    /// Splits the rows into those for which `predicate` holds (first) and the
    /// rest (second). Relative row order is kept on both sides.
    fn partition<F>(self, predicate: F) -> (Self, Self)
    where
        F: Fn(&[f32]) -> bool;

    /// Consumes the dataset, returning its samples and labels in row order.
    fn into_parts(self) -> (Vec<Vec<f32>>, Vec<Self::Label>);
}

/// An in-memory [`Dataset`] of samples and their labels.
///
/// # Examples
///
/// ```
/// use kdknnlib::{Dataset, Labeled};
///
/// let data = Labeled::new(
///     vec![vec![0.0, 1.0], vec![2.0, 3.0]],
///     vec!["a", "b"],
/// ).unwrap();
/// assert_eq!(data.row_count(), 2);
/// assert_eq!(data.column(1), vec![1.0, 3.0]);
/// ```
#[derive(Clone, Debug)]
pub struct Labeled<L> {
    samples: Vec<Vec<f32>>,
    labels: Vec<L>,
    dimensions: usize,
}

impl<L: Clone> Labeled<L> {
    /// Create a dataset from samples and labels.
    ///
    /// Every sample must have the same length, and there must be exactly one
    /// label per sample.
    pub fn new(samples: Vec<Vec<f32>>, labels: Vec<L>) -> Result<Self> {
        check_argument(samples.len() == labels.len(), "number of samples and labels must match")?;
        let dimensions = samples.first().map_or(0, |s| s.len());
        check_argument(
            samples.iter().all(|s| s.len() == dimensions),
            "all samples must have the same dimension",
        )?;
        Ok(Labeled { samples, labels, dimensions })
    }

    /// Create an empty dataset with a fixed dimension.
    pub fn empty(dimensions: usize) -> Self {
        Labeled { samples: Vec::new(), labels: Vec::new(), dimensions }
    }

    pub fn samples(&self) -> &[Vec<f32>] {
        &self.samples
    }

    pub fn labels(&self) -> &[L] {
        &self.labels
    }

    pub fn sample(&self, index: usize) -> Option<&[f32]> {
        self.samples.get(index).map(|s| s.as_slice())
    }

    pub fn label(&self, index: usize) -> Option<&L> {
        self.labels.get(index)
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl Labeled<usize> {
    /// Generate a seeded mixture of Gaussian blobs, one per center.
    ///
    /// Each row picks a center uniformly at random and is labeled with the
    /// center's index. `scale` is the per-coordinate standard deviation.
    pub fn blobs(num: usize, centers: &[Vec<f32>], scale: f32, seed: u64) -> Result<Self> {
        check_argument(!centers.is_empty(), "at least one center is required")?;
        check_argument(scale >= 0.0, "scale cannot be negative")?;
        let dimensions = centers[0].len();
        check_argument(
            centers.iter().all(|c| c.len() == dimensions),
            "all centers must have the same dimension",
        )?;

        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut samples = Vec::with_capacity(num);
        let mut labels = Vec::with_capacity(num);
        for _ in 0..num {
            let label = rng.gen_range(0..centers.len());
            let sample = centers[label]
                .iter()
                .map(|&mean| next_gaussian(mean, scale, &mut rng))
                .collect();
            samples.push(sample);
            labels.push(label);
        }
        Ok(Labeled { samples, labels, dimensions })
    }
}

/// Box-Muller draw around `mean`.
fn next_gaussian(mean: f32, scale: f32, rng: &mut ChaCha20Rng) -> f32 {
    let mut r = f64::sqrt(-2.0f64 * f64::ln(rng.gen::<f64>())) as f32;
    // ln(0) is -inf
    while r.is_infinite() {
        r = f64::sqrt(-2.0f64 * f64::ln(rng.gen::<f64>())) as f32;
    }
    mean + scale * r * f32::cos(2.0 * PI * rng.gen::<f32>())
}

impl<L: Clone> Dataset for Labeled<L> {
    type Label = L;

    fn row_count(&self) -> usize {
        self.samples.len()
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn column(&self, index: usize) -> Vec<f32> {
        self.samples.iter().map(|s| s[index]).collect()
    }

    fn partition<F>(self, predicate: F) -> (Self, Self)
    where
        F: Fn(&[f32]) -> bool,
    {
        let dimensions = self.dimensions;
        let mut left = Labeled::empty(dimensions);
        let mut right = Labeled::empty(dimensions);
        for (sample, label) in self.samples.into_iter().zip(self.labels) {
            let side = if predicate(&sample) { &mut left } else { &mut right };
            side.samples.push(sample);
            side.labels.push(label);
        }
        (left, right)
    }

    fn into_parts(self) -> (Vec<Vec<f32>>, Vec<L>) {
        (self.samples, self.labels)
    }
}
