extern crate bit_vec;
use bit_vec::BitVec;

use log::trace;
use rayon::prelude::*;

use crate::tree::{Node, Tree};
use crate::types::{NodeKey, Result};
use crate::util::check_argument;

/// Labels and distances of the neighbors found by a query, nearest first.
pub type Neighbors<L> = (Vec<L>, Vec<f64>);

fn sort_by_distance<L>(candidates: &mut [(f64, L)]) {
    // stable, so equal distances keep the order they were found in
    candidates.sort_by(|a, b| a.0.total_cmp(&b.0));
}

fn into_neighbors<L>(candidates: Vec<(f64, L)>) -> Neighbors<L> {
    let (distances, labels): (Vec<f64>, Vec<L>) = candidates.into_iter().unzip();
    (labels, distances)
}

impl<L: Clone> Tree<L> {

    /// Approximate k nearest neighbors of `point`.
    ///
    /// The search starts at the leaf `point` falls into and backtracks through
    /// parents from there. A subtree is entered only when one of the corners
    /// of its bounding box is strictly closer to `point` than the current
    /// k-th best distance, so a subtree holding a closer sample can be missed
    /// and the result is not guaranteed to be exact.
    ///
    /// Returns at most `k` labels with their distances, nearest first. A bare
    /// tree returns two empty vectors.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when `k` is 0 or when `point` does not have the
    /// dimension of the samples the tree was grown on.
    ///
    /// # Examples
    ///
    /// ```
    /// use kdknnlib::{euclidean, Labeled, Tree};
    ///
    /// let mut tree = Tree::new(20, euclidean).unwrap();
    /// let (labels, distances) = tree.neighbors(&[0.0, 0.0], 3).unwrap();
    /// assert!(labels.is_empty() && distances.is_empty());
    ///
    /// tree.grow(Labeled::new(vec![vec![0.0, 0.0], vec![3.0, 4.0]], vec![1, 2]).unwrap());
    /// let (labels, distances) = tree.neighbors(&[0.0, 0.0], 3).unwrap();
    /// assert_eq!(labels, vec![1, 2]);
    /// assert_eq!(distances, vec![0.0, 5.0]);
    ///
    /// assert!(tree.neighbors(&[0.0, 0.0], 0).is_err());
    /// ```
    pub fn neighbors(&self, point: &[f32], k: usize) -> Result<Neighbors<L>> {
        check_argument(k >= 1, "k must be at least 1")?;
        self.check_point(point)?;

        let start = match self.search_key(point) {
            Some(key) => key,
            None => return Ok((Vec::new(), Vec::new())),
        };

        let distance = self.distance();
        let mut visited = BitVec::from_elem(self.node_store().capacity(), false);
        let mut stack: Vec<NodeKey> = vec![start];
        let mut candidates: Vec<(f64, L)> = Vec::new();
        let mut pops = 0usize;

        while let Some(current) = stack.pop() {
            pops += 1;
            let node = match self.node(current) {
                Some(node) => node,
                None => continue,
            };

            if !visited.get(current).unwrap_or(false) {
                visited.set(current, true);
                if let Node::Leaf(leaf) = node {
                    candidates.extend(
                        leaf.iter().map(|(sample, label)| (distance(point, sample), label.clone())),
                    );
                    sort_by_distance(&mut candidates);
                    // anything past the k-th candidate can never come back
                    candidates.truncate(k);
                }
            }

            let target = candidates.get(k - 1).map_or(f64::INFINITY, |c| c.0);

            if let Some(children) = node.children() {
                for child in children {
                    if visited.get(child).unwrap_or(false) {
                        continue;
                    }
                    let promising = self
                        .node(child)
                        .and_then(Node::bounding_box)
                        .map_or(false, |bbox| bbox.may_be_closer(point, target, distance));
                    if promising {
                        stack.push(child);
                    } else {
                        visited.set(child, true);
                    }
                }
            }

            if let Some(parent) = node.parent() {
                stack.push(parent);
            }
        }

        trace!(
            "neighbors: {} pops, {} of {} nodes visited or pruned",
            pops,
            visited.iter().filter(|&v| v).count(),
            self.num_nodes()
        );
        Ok(into_neighbors(candidates))
    }

    /// All samples within `radius` of `point`, nearest first.
    ///
    /// Scans the leaf `point` falls into, then explores from the root,
    /// entering a subtree when one of the corners of its bounding box lies
    /// within `radius` of `point`. Like [`Tree::neighbors`], samples in other
    /// subtrees whose corners are all too far away are not reported.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when `radius` is negative or NaN, or when `point`
    /// does not have the dimension of the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use kdknnlib::{manhattan, Labeled, Tree};
    ///
    /// let data = Labeled::new(
    ///     vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![4.0, 4.0]],
    ///     vec!['a', 'b', 'c'],
    /// ).unwrap();
    /// let mut tree = Tree::new(1, manhattan).unwrap();
    /// tree.grow(data);
    ///
    /// let (labels, distances) = tree.range(&[0.0, 0.0], 1.0).unwrap();
    /// assert_eq!(labels, vec!['a', 'b']);
    /// assert_eq!(distances, vec![0.0, 1.0]);
    /// ```
    pub fn range(&self, point: &[f32], radius: f64) -> Result<Neighbors<L>> {
        check_argument(radius >= 0.0, "radius must be non-negative")?;
        self.check_point(point)?;

        let distance = self.distance();
        let home = self.search_key(point);
        let mut stack: Vec<NodeKey> = self.root().into_iter().collect();
        if home != self.root() {
            stack.extend(home);
        }
        let mut found: Vec<(f64, L)> = Vec::new();

        while let Some(current) = stack.pop() {
            match self.node(current) {
                Some(Node::Leaf(leaf)) => {
                    for (sample, label) in leaf.iter() {
                        let d = distance(point, sample);
                        if d <= radius {
                            found.push((d, label.clone()));
                        }
                    }
                }
                Some(Node::Split(split)) => {
                    for child in [split.left(), split.right()] {
                        // the home leaf is already on the stack
                        if Some(child) == home {
                            continue;
                        }
                        let within = self
                            .node(child)
                            .and_then(Node::bounding_box)
                            .map_or(false, |bbox| bbox.may_be_within(point, radius, distance));
                        if within {
                            stack.push(child);
                        }
                    }
                }
                None => {}
            }
        }

        sort_by_distance(&mut found);
        Ok(into_neighbors(found))
    }
}

impl<L: Clone + Send + Sync> Tree<L> {

    /// Runs [`Tree::neighbors`] for every point in parallel.
    ///
    /// Results come back in the order of `points`. The first failing query
    /// fails the whole batch.
    pub fn neighbors_batch(&self, points: &[Vec<f32>], k: usize) -> Result<Vec<Neighbors<L>>> {
        check_argument(k >= 1, "k must be at least 1")?;
        points.par_iter().map(|point| self.neighbors(point, k)).collect()
    }
}
