//! Submodule containing types and components of a neighbor tree.
//!
mod bounding_box;
pub use bounding_box::BoundingBox;

mod cut;
pub use cut::Cut;

mod node;
pub use node::{Leaf, Node, Split};

mod tree;
pub use tree::{NodeTraverser, Tree, TreeBuilder};

mod neighbor_search;
pub use neighbor_search::Neighbors;
