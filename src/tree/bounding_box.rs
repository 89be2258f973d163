use std::fmt;

use crate::types::{Distance, Result};
use crate::util::check_argument;

/// Bounding box on collections on points.
///
/// Given a set of *d*- dimensional points, a bounding box is the smallest *d*-
/// dimensional rectangular prism containing all of these points. A bounding box
/// is represented by two vectors, its min corner and its max corner, with
/// `min_values[i] <= max_values[i]` in every dimension.
///
/// # Examples
///
/// ```
/// use kdknnlib::BoundingBox;
///
/// // create a new bounding box from a single point
/// let point: Vec<f32> = vec![1.0, 2.0];
/// let bbox = BoundingBox::new_from_point(&point);
/// assert_eq!(bbox.min_values(), &point[..]);
/// assert_eq!(bbox.max_values(), &point[..]);
///
/// // create a second bounding box by merging the first one with another point
/// let new_point = vec![3.0, -2.0];
/// let merged_bbox = BoundingBox::merged_box_with_point(&bbox, &new_point);
/// println!("{}", &merged_bbox);   // BoundingBox ([1.0, -2.0], [3.0, 2.0])
///
/// assert!(merged_bbox.contains_point(&point));
/// assert!(merged_bbox.contains_point(&new_point));
/// assert!(merged_bbox.contains_box(&bbox));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct BoundingBox {
    min_values: Vec<f32>,
    max_values: Vec<f32>,
}

impl BoundingBox {

    /// Create a new bounding box from a min values vector and a max values
    /// vector.
    ///
    /// Fails if the corners have different lengths or if a min value exceeds
    /// its max value.
    ///
    /// # Examples
    ///
    /// ```
    /// use kdknnlib::BoundingBox;
    ///
    /// let bbox = BoundingBox::new(&[-1.0, 0.0], &[1.0, 3.0]).unwrap();
    /// assert_eq!(bbox.dimensions(), 2);
    ///
    /// assert!(BoundingBox::new(&[2.0], &[1.0]).is_err());
    /// ```
    pub fn new(min_values: &[f32], max_values: &[f32]) -> Result<Self> {
        check_argument(min_values.len() == max_values.len(), "mismatched corner lengths")?;
        check_argument(
            min_values.iter().zip(max_values).all(|(x, y)| x <= y),
            "min corner exceeds max corner",
        )?;
        Ok(BoundingBox {
            min_values: min_values.to_vec(),
            max_values: max_values.to_vec(),
        })
    }

    /// Create a new bounding box from a single point.
    ///
    /// The resulting bounding box has no interior: its min values are equal to
    /// its max values.
    pub fn new_from_point(point: &[f32]) -> Self {
        BoundingBox {
            min_values: point.to_vec(),
            max_values: point.to_vec(),
        }
    }

    /// Create the smallest bounding box holding every point, or `None` when
    /// there are no points.
    ///
    /// # Examples
    ///
    /// ```
    /// use kdknnlib::BoundingBox;
    ///
    /// let points = vec![vec![0.0, 4.0], vec![2.0, 1.0], vec![1.0, 3.0]];
    /// let bbox = BoundingBox::from_points(&points).unwrap();
    /// assert_eq!(bbox.min_values(), &[0.0, 1.0]);
    /// assert_eq!(bbox.max_values(), &[2.0, 4.0]);
    ///
    /// assert!(BoundingBox::from_points(&[]).is_none());
    /// ```
    pub fn from_points(points: &[Vec<f32>]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bbox = BoundingBox::new_from_point(first);
        for point in rest {
            bbox.add_point(point);
        }
        Some(bbox)
    }

    /// Returns a new bounding box given by the merging of a bounding box with
    /// a point.
    pub fn merged_box_with_point(bounding_box: &BoundingBox, point: &[f32]) -> Self {
        let mut merged = bounding_box.clone();
        merged.add_point(point);
        merged
    }

    /// Returns a new bounding box given by the merging of two bounding boxes.
    ///
    /// The merged box takes the minimum value in each dimension as its min
    /// corner and the maximum value in each dimension as its max corner.
    ///
    /// # Examples
    ///
    /// ```
    /// use kdknnlib::BoundingBox;
    ///
    /// let bbox1 = BoundingBox::new(&[0.0, 0.0], &[2.0, 2.0]).unwrap();
    /// let bbox2 = BoundingBox::new(&[1.0, 1.0], &[3.0, 4.0]).unwrap();
    ///
    /// let merged = BoundingBox::merged_box_with_box(&bbox1, &bbox2);
    /// assert_eq!(merged.min_values(), &[0.0, 0.0]);
    /// assert_eq!(merged.max_values(), &[3.0, 4.0]);
    /// ```
    pub fn merged_box_with_box(bounding_box1: &BoundingBox, bounding_box2: &BoundingBox) -> Self {
        let mut merged = bounding_box1.clone();
        merged.add_two_arrays(&bounding_box2.min_values, &bounding_box2.max_values);
        merged
    }

    fn add_point(&mut self, point: &[f32]) {
        self.add_two_arrays(point, point);
    }

    fn add_two_arrays(&mut self, min_values: &[f32], max_values: &[f32]) {
        for (x, &y) in self.min_values.iter_mut().zip(min_values) {
            *x = x.min(y);
        }
        for (x, &y) in self.max_values.iter_mut().zip(max_values) {
            *x = x.max(y);
        }
    }

    /// Get the dimensionality of the bounding box.
    pub fn dimensions(&self) -> usize { self.min_values.len() }

    /// Get the vector of min values of the bounding box.
    pub fn min_values(&self) -> &[f32] { &self.min_values }

    /// Get the vector of max values of the bounding box.
    pub fn max_values(&self) -> &[f32] { &self.max_values }

    /// The representative corner points of the box: its min corner followed
    /// by its max corner.
    pub fn corners(&self) -> [&[f32]; 2] {
        [self.min_values.as_slice(), self.max_values.as_slice()]
    }

    /// Returns true if the given point is contained inside the bounding box.
    pub fn contains_point(&self, point: &[f32]) -> bool {
        self.min_values
            .iter()
            .zip(&self.max_values)
            .zip(point)
            .all(|((min, max), x)| min <= x && x <= max)
    }

    /// Returns true if the given bounding box is contained inside this
    /// bounding box.
    pub fn contains_box(&self, bounding_box: &BoundingBox) -> bool {
        self.contains_point(&bounding_box.min_values) && self.contains_point(&bounding_box.max_values)
    }

    /// Returns true if some corner of the box is strictly closer to `point`
    /// than `target`.
    ///
    /// This only looks at the two corners and not at the closest point on the
    /// box surface, so it can both keep and discard boxes wrongly. Tree
    /// queries use it to decide whether a subtree is worth visiting.
    ///
    /// # Examples
    ///
    /// ```
    /// use kdknnlib::{euclidean, BoundingBox};
    ///
    /// let bbox = BoundingBox::new(&[5.0, 5.0], &[6.0, 6.0]).unwrap();
    /// assert!(!bbox.may_be_closer(&[0.0, 0.0], 1.0, euclidean));
    /// assert!(bbox.may_be_closer(&[0.0, 0.0], f64::INFINITY, euclidean));
    ///
    /// // the query sits inside the box but both corners are far away
    /// let wide = BoundingBox::new(&[-10.0, -10.0], &[10.0, 10.0]).unwrap();
    /// assert!(!wide.may_be_closer(&[0.0, 0.0], 1.0, euclidean));
    /// ```
    pub fn may_be_closer(&self, point: &[f32], target: f64, distance: Distance) -> bool {
        self.corners().into_iter().any(|corner| distance(point, corner) < target)
    }

    /// Same as [`BoundingBox::may_be_closer`] but inclusive of `radius`.
    pub fn may_be_within(&self, point: &[f32], radius: f64, distance: Distance) -> bool {
        self.corners().into_iter().any(|corner| distance(point, corner) <= radius)
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BoundingBox ({:?}, {:?})", self.min_values, self.max_values)
    }
}
