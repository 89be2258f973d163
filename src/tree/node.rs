use super::BoundingBox;
use super::Cut;
use crate::types::NodeKey;

/// A leaf node of a neighbor tree, also called a neighborhood.
///
/// A leaf holds a batch of samples together with their labels, a key to its
/// parent [`Split`] (`None` when the leaf is the root) and the bounding box of
/// its samples. An empty leaf has no bounding box.
///
/// # Examples
///
/// ```
/// use kdknnlib::Leaf;
///
/// let leaf = Leaf::new(vec![vec![0.0, 1.0], vec![2.0, -1.0]], vec!['a', 'b']);
/// assert_eq!(leaf.len(), 2);
/// assert!(leaf.parent().is_none());
///
/// let bbox = leaf.bounding_box().unwrap();
/// assert_eq!(bbox.min_values(), &[0.0, -1.0]);
/// assert_eq!(bbox.max_values(), &[2.0, 1.0]);
/// ```
#[derive(Debug)]
pub struct Leaf<L> {
    parent: Option<NodeKey>,
    samples: Vec<Vec<f32>>,
    labels: Vec<L>,
    bounding_box: Option<BoundingBox>,
}

impl<L> Leaf<L> {

    /// Create a new leaf node.
    ///
    /// The bounding box is derived from the samples' per-dimension extremes.
    /// The parent is initialized to `None`.
    pub fn new(samples: Vec<Vec<f32>>, labels: Vec<L>) -> Self {
        let bounding_box = BoundingBox::from_points(&samples);
        Leaf {
            parent: None,
            samples,
            labels,
            bounding_box,
        }
    }

    /// Returns the key of the parent [`Split`] node.
    pub fn parent(&self) -> Option<NodeKey> { self.parent }

    /// Returns the samples stored at this leaf.
    pub fn samples(&self) -> &[Vec<f32>] { &self.samples }

    /// Returns the labels of the samples, in the same order.
    pub fn labels(&self) -> &[L] { &self.labels }

    /// Returns this leaf's bounding box, `None` for an empty leaf.
    pub fn bounding_box(&self) -> Option<&BoundingBox> { self.bounding_box.as_ref() }

    pub fn len(&self) -> usize { self.samples.len() }

    pub fn is_empty(&self) -> bool { self.samples.is_empty() }

    /// Iterate over `(sample, label)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&[f32], &L)> {
        self.samples.iter().map(|s| s.as_slice()).zip(self.labels.iter())
    }
}

/// An internal node of a neighbor tree, also called a coordinate.
///
/// Split nodes hold the keys of their left and right children, which must
/// exist, a [`Cut`] deciding which side a point falls on, and a bounding box
/// equal to the union of the children's boxes.
///
/// # Examples
///
/// ```
/// use kdknnlib::{BoundingBox, Cut, Split};
///
/// let bbox = BoundingBox::new(&[0.0, 1.0], &[2.0, 3.0]).unwrap();
/// let split = Split::new(4, 7, Some(bbox), Cut::new(0, 0.7));
/// assert_eq!(split.left(), 4);
/// assert_eq!(split.right(), 7);
/// assert_eq!(split.cut().dimension(), 0);
/// ```
#[derive(Debug)]
pub struct Split {
    parent: Option<NodeKey>,
    left: NodeKey,
    right: NodeKey,
    bounding_box: Option<BoundingBox>,
    cut: Cut,
}

impl Split {

    /// Create a new split node.
    ///
    /// The parent is initialized to `None`.
    pub fn new(
        left: NodeKey,
        right: NodeKey,
        bounding_box: Option<BoundingBox>,
        cut: Cut) -> Self
    {
        Split {
            parent: None,
            left,
            right,
            bounding_box,
            cut,
        }
    }

    /// Returns the key of the parent [`Split`] node.
    pub fn parent(&self) -> Option<NodeKey> { self.parent }

    /// Returns the node key of the left child.
    pub fn left(&self) -> NodeKey { self.left }

    /// Returns the node key of the right child.
    pub fn right(&self) -> NodeKey { self.right }

    /// Returns a reference to this node's bounding box.
    pub fn bounding_box(&self) -> Option<&BoundingBox> { self.bounding_box.as_ref() }

    /// Returns a reference to this node's cut.
    pub fn cut(&self) -> &Cut { &self.cut }

    /// Returns the key of the child `point` descends into.
    pub fn child_for(&self, point: &[f32]) -> NodeKey {
        if self.cut.is_left_of(point) {
            self.left
        } else {
            self.right
        }
    }
}

/// An enum type representing either a [`Split`] node or a [`Leaf`] node.
///
/// The methods defined for this enum type are mainly for convenience in working
/// agnostically with either leaves or split nodes.
#[derive(Debug)]
pub enum Node<L> {
    Leaf(Leaf<L>),
    Split(Split),
}

impl<L> Node<L> {

    /// Returns the key of the parent [`Split`] node.
    pub fn parent(&self) -> Option<NodeKey> {
        match self {
            Node::Leaf(n) => n.parent,
            Node::Split(n) => n.parent,
        }
    }

    /// Set the parent node by node key.
    pub(crate) fn set_parent(&mut self, parent: Option<NodeKey>) {
        match self {
            Node::Leaf(n) => n.parent = parent,
            Node::Split(n) => n.parent = parent,
        }
    }

    /// Returns the bounding box of everything below this node.
    pub fn bounding_box(&self) -> Option<&BoundingBox> {
        match self {
            Node::Leaf(n) => n.bounding_box(),
            Node::Split(n) => n.bounding_box(),
        }
    }

    /// Returns the keys of the left and right children, `None` for a leaf.
    pub fn children(&self) -> Option<[NodeKey; 2]> {
        match self {
            Node::Leaf(_) => None,
            Node::Split(n) => Some([n.left, n.right]),
        }
    }

    pub fn is_leaf(&self) -> bool {
        std::matches!(self, Node::Leaf(_))
    }

    /// Get a reference to the leaf represented by this node, if it is one.
    pub fn as_leaf(&self) -> Option<&Leaf<L>> {
        match self {
            Node::Leaf(n) => Some(n),
            Node::Split(_) => None,
        }
    }
}
