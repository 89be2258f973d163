/// Axis-aligned hyperplane splitting the points under a node.
///
/// A cut consists of a `dimension` and a `value`. Dimensions use zero-based
/// indexing; that is, in a three dimensional data point the three dimensions
/// are `0`, `1`, and `2`. The value of the cut is the location along the
/// Cartesian axis where the cut is located.
///
/// For example, if the dimension of the cut is `2` and the value of the cut
/// is `1.0` then the cut partitions points into two sets: the data points that
/// have dimension 2 component strictly less than 1.0 (left) and all others
/// (right).
///
/// # Examples
///
/// ```
/// use kdknnlib::Cut;
///
/// let cut = Cut::new(1, 0.0);
/// assert!(cut.is_left_of(&[1.0, -1.0]));
/// assert!(!cut.is_left_of(&[1.0, 0.0]));
/// assert!(!cut.is_left_of(&[1.0, 2.0, 3.0, 4.0]));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cut {
    dimension: usize,
    value: f32,
}

impl Cut {

    /// Create a new cut from a given dimension and value.
    pub fn new(dimension: usize, value: f32) -> Self {
        Cut { dimension, value }
    }

    /// Returns true if `point` belongs to the left side of the cut, that is,
    /// its component in the cut's dimension is strictly less than the cut's
    /// value.
    pub fn is_left_of(&self, point: &[f32]) -> bool {
        point[self.dimension] < self.value
    }

    /// Get the dimension of the cut.
    pub fn dimension(&self) -> usize { self.dimension }

    /// Get the value of the cut.
    pub fn value(&self) -> f32 { self.value }
}
