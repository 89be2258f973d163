use log::debug;

use crate::dataset::Dataset;
use crate::distance::euclidean;
use crate::stats;
use crate::store::NodeStore;
use crate::tree::{BoundingBox, Cut, Leaf, Node, Split};
use crate::types::{Distance, NodeKey, Result};
use crate::util::{check_argument, check_configuration};

const DEFAULT_MAX_LEAF_SIZE: usize = 30;

/// A k-d tree answering approximate nearest neighbor queries over a fixed set
/// of labeled points.
///
/// A tree contains [`Split`] nodes and [`Leaf`] nodes. Leaves hold small
/// batches of samples with their labels. Split nodes hold a [`Cut`] on the
/// column of highest variance, taken at the column median, and a
/// [`BoundingBox`] on everything beneath them.
///
/// All nodes live in the tree's [`NodeStore`]. Children and parents refer to
/// each other by key, so the store is the only owner and dropping the tree
/// drops every node.
///
/// # Examples
///
/// ```
/// use kdknnlib::{euclidean, Labeled, Tree};
///
/// let data = Labeled::new(
///     vec![vec![0.0, 0.0], vec![1.0, 1.0], vec![5.0, 5.0], vec![6.0, 6.0], vec![5.0, 6.0]],
///     vec!["a", "a", "b", "b", "b"],
/// ).unwrap();
///
/// let mut tree = Tree::new(2, euclidean).unwrap();
/// assert!(tree.bare());
///
/// tree.grow(data);
/// let (labels, distances) = tree.neighbors(&[0.1, 0.1], 1).unwrap();
/// assert_eq!(labels, vec!["a"]);
/// assert!((distances[0] - 0.1414).abs() < 1e-3);
/// ```
pub struct Tree<L> {
    node_store: NodeStore<L>,
    root: Option<NodeKey>,
    max_leaf_size: usize,
    distance: Distance,
    dimensions: usize,
    num_samples: usize,
}

/// Pending work while growing a tree.
///
/// `Build` tasks carry the rows that still have to be placed. `Assemble`
/// joins the two subtrees most recently built into a split node.
enum Task<D> {
    Build { dataset: D, splittable: bool },
    Assemble { cut: Cut },
}

impl<L: Clone> Tree<L> {

    /// Create a new bare `Tree`.
    ///
    /// Leaves hold at most `max_leaf_size` samples, which must be at least 1.
    /// `distance` is used by every query.
    ///
    /// # Examples
    ///
    /// ```
    /// use kdknnlib::{manhattan, KnnError, Tree};
    ///
    /// let tree: Tree<u8> = Tree::new(10, manhattan).unwrap();
    /// assert_eq!(tree.max_leaf_size(), 10);
    ///
    /// let result: Result<Tree<u8>, KnnError> = Tree::new(0, manhattan);
    /// assert!(std::matches!(result, Err(KnnError::InvalidConfiguration { .. })));
    /// ```
    pub fn new(max_leaf_size: usize, distance: Distance) -> Result<Self> {
        check_configuration(max_leaf_size >= 1, "max leaf size must be at least 1")?;
        Ok(Tree {
            node_store: NodeStore::new(),
            root: None,
            max_leaf_size,
            distance,
            dimensions: 0,
            num_samples: 0,
        })
    }

    /// Build the tree from a dataset, replacing anything grown before.
    ///
    /// Rows are split recursively on the column of highest variance (the
    /// first such column on ties) at that column's median: rows strictly
    /// below the median go left, the rest go right. A side with at most
    /// `max_leaf_size` rows becomes a leaf, even when it is empty. An empty
    /// dataset leaves the tree bare.
    ///
    /// The construction works off an explicit task stack, so deep trees do
    /// not grow the call stack.
    pub fn grow<D>(&mut self, dataset: D)
    where
        D: Dataset<Label = L>,
    {
        self.destroy();
        if dataset.row_count() == 0 {
            debug!("grow called with an empty dataset, tree stays bare");
            return;
        }
        self.dimensions = dataset.dimensions();
        self.num_samples = dataset.row_count();

        let mut tasks = vec![Task::Build { dataset, splittable: true }];
        let mut built: Vec<NodeKey> = Vec::new();

        while let Some(task) = tasks.pop() {
            match task {
                Task::Build { dataset, splittable } => {
                    let cut = if splittable && dataset.row_count() > self.max_leaf_size {
                        Tree::<L>::find_best_split(&dataset)
                    } else {
                        None
                    };
                    match cut {
                        None => built.push(self.insert_leaf(dataset)),
                        Some(cut) => {
                            let (left, right) = dataset.partition(|sample| cut.is_left_of(sample));
                            // identical rows cannot be separated, keep both halves as leaves
                            let separated = left.row_count() > 0 && right.row_count() > 0;
                            tasks.push(Task::Assemble { cut });
                            tasks.push(Task::Build { dataset: right, splittable: separated });
                            tasks.push(Task::Build { dataset: left, splittable: separated });
                        }
                    }
                }
                Task::Assemble { cut } => {
                    // the left subtree is built first, so the right one is on top
                    if let (Some(right), Some(left)) = (built.pop(), built.pop()) {
                        built.push(self.insert_split(left, right, cut));
                    }
                }
            }
        }
        self.root = built.pop();

        debug!(
            "grew tree on {} samples: {} nodes, {} leaves, height {}",
            self.num_samples,
            self.num_nodes(),
            self.num_leaves(),
            self.height()
        );
    }

    /// Choose the cut for a set of rows.
    ///
    /// Picks the column with the highest population variance and cuts at its
    /// median. When the median leaves no row strictly below it but the column
    /// still varies, the column mean is used instead so both sides get rows.
    /// Returns `None` for rows without any column.
    fn find_best_split<D: Dataset>(dataset: &D) -> Option<Cut> {
        let mut best: Option<(usize, f64, Vec<f64>)> = None;
        for column in 0..dataset.dimensions() {
            let values: Vec<f64> = dataset.column(column).into_iter().map(f64::from).collect();
            let variance = stats::variance(&values)?;
            let better = match &best {
                None => true,
                Some((_, best_variance, _)) => variance > *best_variance,
            };
            if better {
                best = Some((column, variance, values));
            }
        }

        let (column, variance, values) = best?;
        let mut threshold = stats::median(&values)? as f32;
        let any_left = values.iter().any(|&v| (v as f32) < threshold);
        if !any_left && variance > 0.0 {
            threshold = stats::mean(&values)? as f32;
        }
        Some(Cut::new(column, threshold))
    }

    fn insert_leaf<D>(&mut self, dataset: D) -> NodeKey
    where
        D: Dataset<Label = L>,
    {
        let (samples, labels) = dataset.into_parts();
        self.node_store.insert(Node::Leaf(Leaf::new(samples, labels)))
    }

    fn insert_split(&mut self, left: NodeKey, right: NodeKey, cut: Cut) -> NodeKey {
        let left_box = self.node_store.get(left).and_then(Node::bounding_box);
        let right_box = self.node_store.get(right).and_then(Node::bounding_box);
        let bounding_box = match (left_box, right_box) {
            (Some(a), Some(b)) => Some(BoundingBox::merged_box_with_box(a, b)),
            (Some(a), None) | (None, Some(a)) => Some(a.clone()),
            (None, None) => None,
        };

        let key = self.node_store.insert(Node::Split(Split::new(left, right, bounding_box, cut)));
        for child in [left, right] {
            if let Some(node) = self.node_store.get_mut(child) {
                node.set_parent(Some(key));
            }
        }
        key
    }

    /// Find the leaf `point` falls into.
    ///
    /// Starting at the root, each split sends the point left when its value
    /// in the cut dimension is strictly less than the cut value, right
    /// otherwise. Returns `None` for a bare tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use kdknnlib::{euclidean, Labeled, Tree};
    ///
    /// let data = Labeled::new(
    ///     vec![vec![0.0], vec![1.0], vec![10.0], vec![11.0]],
    ///     vec![0, 0, 1, 1],
    /// ).unwrap();
    /// let mut tree = Tree::new(2, euclidean).unwrap();
    /// assert!(tree.search(&[0.5]).unwrap().is_none());
    ///
    /// tree.grow(data);
    /// let leaf = tree.search(&[0.5]).unwrap().unwrap();
    /// assert_eq!(leaf.labels(), &[0, 0]);
    /// ```
    pub fn search(&self, point: &[f32]) -> Result<Option<&Leaf<L>>> {
        self.check_point(point)?;
        Ok(self.search_key(point).and_then(|key| self.node(key)).and_then(Node::as_leaf))
    }

    /// Key of the leaf `point` descends into.
    pub(crate) fn search_key(&self, point: &[f32]) -> Option<NodeKey> {
        match self.traverse(point).last() {
            Some((key, Node::Leaf(_))) => Some(key),
            _ => None,
        }
    }

    /// Returns an iterator over the nodes from the root down to the leaf
    /// `point` falls into. See [`NodeTraverser`].
    ///
    /// # Panics
    ///
    /// If `point` has fewer dimensions than the tree.
    pub fn traverse<'a>(&'a self, point: &'a [f32]) -> NodeTraverser<'a, L> {
        NodeTraverser::new(self, point)
    }

    pub(crate) fn check_point(&self, point: &[f32]) -> Result<()> {
        if self.bare() {
            return Ok(());
        }
        check_argument(point.len() == self.dimensions, "point dimension does not match the tree")
    }

    /// Drop every node, returning the tree to its bare state.
    pub fn destroy(&mut self) {
        self.node_store.clear();
        self.root = None;
        self.dimensions = 0;
        self.num_samples = 0;
    }

    /// Returns true if the tree has not been grown, or was grown on no rows.
    pub fn bare(&self) -> bool { self.root.is_none() }

    /// Returns the key of the root node.
    #[inline(always)]
    pub fn root(&self) -> Option<NodeKey> { self.root }

    /// Returns the node stored under `key`.
    #[inline(always)]
    pub fn node(&self, key: NodeKey) -> Option<&Node<L>> { self.node_store.get(key) }

    #[inline(always)]
    pub fn node_store(&self) -> &NodeStore<L> { &self.node_store }

    pub fn max_leaf_size(&self) -> usize { self.max_leaf_size }

    pub fn distance(&self) -> Distance { self.distance }

    /// Number of features of the samples the tree was grown on, 0 when bare.
    pub fn dimensions(&self) -> usize { self.dimensions }

    /// Number of samples the tree was grown on.
    pub fn num_samples(&self) -> usize { self.num_samples }

    pub fn num_nodes(&self) -> usize { self.node_store.len() }

    pub fn num_leaves(&self) -> usize {
        self.node_store.iter().filter(|(_, node)| node.is_leaf()).count()
    }

    /// Number of node levels on the longest path from the root to a leaf.
    ///
    /// A bare tree has height 0 and a tree whose root is a leaf has height 1.
    pub fn height(&self) -> usize {
        self.root.map_or(0, |root| self.subtree_height(root))
    }

    /// Height of the root's right subtree minus the height of its left
    /// subtree. 0 when the root is a leaf or the tree is bare.
    pub fn balance(&self) -> isize {
        match self.root.and_then(|root| self.node(root)) {
            Some(Node::Split(split)) => {
                self.subtree_height(split.right()) as isize - self.subtree_height(split.left()) as isize
            }
            _ => 0,
        }
    }

    fn subtree_height(&self, key: NodeKey) -> usize {
        let mut height = 0;
        let mut stack = vec![(key, 1)];
        while let Some((current, depth)) = stack.pop() {
            height = height.max(depth);
            if let Some(children) = self.node(current).and_then(Node::children) {
                for child in children {
                    stack.push((child, depth + 1));
                }
            }
        }
        height
    }
}

/// Configuration for a [`Tree`].
///
/// # Examples
///
/// ```
/// use kdknnlib::{chebyshev, TreeBuilder};
///
/// let tree = TreeBuilder::new()
///     .max_leaf_size(8)
///     .distance(chebyshev)
///     .build::<String>()
///     .unwrap();
/// assert_eq!(tree.max_leaf_size(), 8);
/// assert!(tree.bare());
/// ```
pub struct TreeBuilder {
    max_leaf_size: usize,
    distance: Distance,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        TreeBuilder {
            max_leaf_size: DEFAULT_MAX_LEAF_SIZE,
            distance: euclidean,
        }
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        TreeBuilder::default()
    }

    pub fn max_leaf_size(&mut self, max_leaf_size: usize) -> &mut TreeBuilder {
        self.max_leaf_size = max_leaf_size;
        self
    }

    pub fn distance(&mut self, distance: Distance) -> &mut TreeBuilder {
        self.distance = distance;
        self
    }

    pub fn build<L: Clone>(&self) -> Result<Tree<L>> {
        Tree::new(self.max_leaf_size, self.distance)
    }
}

/// A type for traversing nodes from the root to the leaf a point falls into.
///
/// Yields `(key, node)` pairs. Returned by [`Tree::traverse`].
pub struct NodeTraverser<'a, L> {
    tree: &'a Tree<L>,
    point: &'a [f32],
    current_node_key: Option<NodeKey>,
}

impl<'a, L: Clone> NodeTraverser<'a, L> {

    /// Create a new node traverser from a tree and a query point.
    pub fn new(tree: &'a Tree<L>, point: &'a [f32]) -> Self {
        NodeTraverser {
            tree,
            point,
            current_node_key: tree.root(),
        }
    }

    /// Return the key of the next node in a traversal.
    fn next_node_key(&self, node: &Node<L>) -> Option<NodeKey> {
        match node {
            Node::Leaf(_) => None,
            Node::Split(split) => Some(split.child_for(self.point)),
        }
    }
}

impl<'a, L: Clone> Iterator for NodeTraverser<'a, L> {
    type Item = (NodeKey, &'a Node<L>);

    fn next(&mut self) -> Option<(NodeKey, &'a Node<L>)> {
        let node_key = self.current_node_key?;
        let node = self.tree.node(node_key)?;
        self.current_node_key = self.next_node_key(node);
        Some((node_key, node))
    }
}
