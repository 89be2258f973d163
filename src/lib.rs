//! A k-d tree for approximate k-nearest-neighbor queries over labeled points.
//!
//! A [`Tree`] is grown once from a static [`Dataset`] by recursively cutting
//! the rows on the column of highest variance at that column's median, until
//! every leaf holds at most `max_leaf_size` samples. Queries descend to the
//! leaf a point falls into and then backtrack through the tree, skipping
//! subtrees whose bounding box corners are all farther away than the current
//! k-th best candidate.
//!
//! ```
//! use kdknnlib::{euclidean, Labeled, TreeBuilder};
//!
//! // a labeled dataset with two well separated groups
//! let data = Labeled::new(
//!     vec![vec![0.0, 0.0], vec![1.0, 1.0], vec![5.0, 5.0], vec![6.0, 6.0], vec![5.0, 6.0]],
//!     vec!["a", "a", "b", "b", "b"],
//! ).unwrap();
//!
//! // grow a tree with at most two samples per leaf
//! let mut tree = TreeBuilder::new()
//!     .max_leaf_size(2)
//!     .distance(euclidean)
//!     .build()
//!     .unwrap();
//! tree.grow(data);
//!
//! // labels and distances of the two nearest samples
//! let (labels, distances) = tree.neighbors(&[5.2, 5.8], 2).unwrap();
//! assert_eq!(labels, vec!["b", "b"]);
//! assert!(distances[0] <= distances[1]);
//! ```
//!
//! The search is approximate: the corner test used for pruning can skip a
//! subtree that holds a closer sample.

mod errors;
pub use errors::KnnError;

mod types;
pub use types::{Distance, NodeKey, Result};

mod util;

mod distance;
pub use distance::{chebyshev, euclidean, manhattan, squared_euclidean};

pub mod stats;

mod dataset;
pub use dataset::{Dataset, Labeled};

mod store;
pub use store::NodeStore;

pub mod tree;
pub use tree::{BoundingBox, Cut, Leaf, Neighbors, Node, NodeTraverser, Split, Tree, TreeBuilder};
