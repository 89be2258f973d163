extern crate slab;
use slab::Slab;

use crate::Node;

/// A type for storing nodes by key.
///
/// A tree owns all of its nodes through its node store. Parent and child links
/// are keys into the same store, so no node owns another.
pub type NodeStore<L> = Slab<Node<L>>;
