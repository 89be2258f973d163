extern crate kdknnlib;
extern crate rand;
extern crate rand_chacha;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use kdknnlib::{
    chebyshev, euclidean, manhattan, Dataset, Distance, KnnError, Labeled, Node, NodeKey, Tree,
    TreeBuilder,
};

#[cfg(test)]
parameterized_test::create! { leaf_size_bound, (max_leaf_size, data_size), {
    check_leaf_sizes(max_leaf_size, data_size);
}}

#[cfg(test)]
parameterized_test::create! { neighbor_properties, (distance, max_leaf_size, k), {
    check_neighbors(distance, max_leaf_size, k);
}}

fn uniform_data(data_size: usize, dimensions: usize, seed: u64) -> Labeled<usize> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let samples: Vec<Vec<f32>> = (0..data_size)
        .map(|_| (0..dimensions).map(|_| 100.0 * rng.gen::<f32>()).collect())
        .collect();
    let labels: Vec<usize> = (0..data_size).collect();
    Labeled::new(samples, labels).unwrap()
}

/// Exact distances from `point` to every sample, ascending.
fn brute_force(data: &Labeled<usize>, point: &[f32], distance: Distance) -> Vec<f64> {
    let mut distances: Vec<f64> = data.samples().iter().map(|s| distance(point, s)).collect();
    distances.sort_by(|a, b| a.total_cmp(b));
    distances
}

fn leaf_sizes<L: Clone>(tree: &Tree<L>) -> Vec<usize> {
    let mut sizes = Vec::new();
    let mut stack: Vec<NodeKey> = tree.root().into_iter().collect();
    while let Some(key) = stack.pop() {
        match tree.node(key).unwrap() {
            Node::Leaf(leaf) => sizes.push(leaf.len()),
            Node::Split(split) => {
                assert_eq!(tree.node(split.left()).unwrap().parent(), Some(key));
                assert_eq!(tree.node(split.right()).unwrap().parent(), Some(key));
                stack.push(split.left());
                stack.push(split.right());
            }
        }
    }
    sizes
}

fn check_leaf_sizes(max_leaf_size: usize, data_size: usize) {
    let data = uniform_data(data_size, 3, 11);
    let mut tree = Tree::new(max_leaf_size, euclidean).unwrap();
    tree.grow(data);

    let sizes = leaf_sizes(&tree);
    assert_eq!(sizes.iter().sum::<usize>(), data_size);
    assert_eq!(sizes.len(), tree.num_leaves());
    if data_size <= max_leaf_size {
        assert_eq!(sizes, vec![data_size]);
    } else {
        assert!(sizes.iter().all(|&s| s <= max_leaf_size));
    }
}

fn check_neighbors(distance: Distance, max_leaf_size: usize, k: usize) {
    let data_size = 500;
    let data = uniform_data(data_size, 4, 5);
    let mut tree = Tree::new(max_leaf_size, distance).unwrap();
    tree.grow(data.clone());

    let mut rng = ChaCha20Rng::seed_from_u64(23);
    for _ in 0..50 {
        let query: Vec<f32> = (0..4).map(|_| 100.0 * rng.gen::<f32>()).collect();
        let (labels, distances) = tree.neighbors(&query, k).unwrap();

        assert_eq!(labels.len(), k.min(data_size));
        assert_eq!(distances.len(), labels.len());
        assert!(distances.windows(2).all(|w| w[0] <= w[1]));

        // reported distances belong to the reported labels
        for (label, d) in labels.iter().zip(&distances) {
            let sample = data.sample(*label).unwrap();
            assert_eq!(distance(&query, sample), *d);
        }

        // an approximate answer can only be farther than the exact one
        let exact = brute_force(&data, &query, distance);
        for (found, best) in distances.iter().zip(&exact) {
            assert!(found >= best);
        }

        let again = tree.neighbors(&query, k).unwrap();
        assert_eq!(again, (labels, distances));
    }
}

leaf_size_bound! {
    single_sample_leaves: (1, 200),
    small_leaves: (2, 301),
    medium_leaves: (7, 1000),
    default_leaves: (30, 2000),
    everything_in_root: (50, 50),
    fewer_than_leaf: (50, 3),
}

neighbor_properties! {
    euclidean_1: (euclidean, 1, 1),
    euclidean_5: (euclidean, 5, 5),
    euclidean_30: (euclidean, 30, 10),
    manhattan_3: (manhattan, 3, 4),
    chebyshev_8: (chebyshev, 8, 2),
    k_above_size: (euclidean, 10, 600),
}

#[test]
fn self_query_is_exact() {
    let data = uniform_data(400, 3, 99);
    let mut tree = Tree::new(4, euclidean).unwrap();
    tree.grow(data.clone());

    for (index, sample) in data.samples().iter().enumerate() {
        let (labels, distances) = tree.neighbors(sample, 1).unwrap();
        assert_eq!(labels, vec![index]);
        assert_eq!(distances, vec![0.0]);
    }
}

#[test]
fn clusters_are_recovered() {
    let centers = vec![vec![0.0, 0.0], vec![50.0, 50.0], vec![-50.0, 50.0]];
    let data = Labeled::blobs(3000, &centers, 1.0, 3).unwrap();
    let mut tree = TreeBuilder::new().max_leaf_size(16).build().unwrap();
    tree.grow(data);

    for (label, center) in centers.iter().enumerate() {
        let (labels, _) = tree.neighbors(center, 10).unwrap();
        assert_eq!(labels.len(), 10);
        assert!(labels.iter().all(|&l| l == label));
    }
}

#[test]
fn range_is_bounded_by_radius() {
    let data = uniform_data(800, 2, 42);
    let mut tree = Tree::new(6, euclidean).unwrap();
    tree.grow(data.clone());

    let mut rng = ChaCha20Rng::seed_from_u64(77);
    for _ in 0..20 {
        let query = vec![100.0 * rng.gen::<f32>(), 100.0 * rng.gen::<f32>()];
        let radius = 10.0 * rng.gen::<f64>();
        let (labels, distances) = tree.range(&query, radius).unwrap();
        assert_eq!(labels.len(), distances.len());
        assert!(distances.iter().all(|&d| d <= radius));
        assert!(distances.windows(2).all(|w| w[0] <= w[1]));

        let exact = brute_force(&data, &query, euclidean);
        let within = exact.iter().filter(|&&d| d <= radius).count();
        assert!(labels.len() <= within);
    }

    // every corner is within reach, so nothing is pruned
    let (labels, _) = tree.range(&[50.0, 50.0], 1.0e6).unwrap();
    assert_eq!(labels.len(), 800);
}

#[test]
fn range_always_scans_the_home_leaf() {
    // a 10 x 10 grid in two leaves whose corners are all far from the query
    let samples: Vec<Vec<f32>> = (0..100).map(|i| vec![(i % 10) as f32, (i / 10) as f32]).collect();
    let labels: Vec<usize> = (0..100).collect();
    let mut tree = Tree::new(50, euclidean).unwrap();
    tree.grow(Labeled::new(samples, labels).unwrap());

    let (labels, distances) = tree.range(&[4.0, 2.0], 0.0).unwrap();
    assert_eq!(labels, vec![24]);
    assert_eq!(distances, vec![0.0]);
    assert_eq!(tree.neighbors(&[4.0, 2.0], 1).unwrap(), (labels, distances));

    let (labels, _) = tree.range(&[4.0, 2.0], 1.0).unwrap();
    assert_eq!(labels[0], 24);
    assert!(labels.len() <= 5);
}

#[test]
fn batch_matches_sequential() {
    let data = uniform_data(300, 3, 8);
    let mut tree = Tree::new(5, manhattan).unwrap();
    tree.grow(data);

    let mut rng = ChaCha20Rng::seed_from_u64(1);
    let points: Vec<Vec<f32>> = (0..64)
        .map(|_| (0..3).map(|_| 100.0 * rng.gen::<f32>()).collect())
        .collect();
    let batch = tree.neighbors_batch(&points, 3).unwrap();
    for (point, result) in points.iter().zip(batch) {
        assert_eq!(result, tree.neighbors(point, 3).unwrap());
    }

    let bad = vec![vec![0.0, 0.0]];
    assert!(std::matches!(
        tree.neighbors_batch(&bad, 3),
        Err(KnnError::InvalidArgument { .. })
    ));
}

#[test]
fn regrow_replaces_previous_tree() {
    let mut tree = Tree::new(3, euclidean).unwrap();
    tree.grow(uniform_data(100, 2, 1));
    assert_eq!(tree.num_samples(), 100);

    let data = Labeled::new(vec![vec![1.0, 2.0, 3.0]], vec![7usize]).unwrap();
    assert_eq!(data.row_count(), 1);
    tree.grow(data);
    assert_eq!(tree.num_samples(), 1);
    assert_eq!(tree.dimensions(), 3);
    assert_eq!(tree.num_nodes(), 1);
    let (labels, distances) = tree.neighbors(&[1.0, 2.0, 3.0], 4).unwrap();
    assert_eq!(labels, vec![7]);
    assert_eq!(distances, vec![0.0]);
}

#[test]
fn invalid_configuration_and_arguments() {
    assert_eq!(
        Tree::<u8>::new(0, euclidean).err(),
        Some(KnnError::InvalidConfiguration { msg: "max leaf size must be at least 1" })
    );

    let bare: Tree<u8> = Tree::new(20, euclidean).unwrap();
    assert_eq!(bare.neighbors(&[0.0, 0.0], 3), Ok((vec![], vec![])));

    let mut tree = Tree::new(2, euclidean).unwrap();
    tree.grow(uniform_data(10, 2, 4));
    assert!(std::matches!(
        tree.neighbors(&[0.0, 0.0], 0),
        Err(KnnError::InvalidArgument { .. })
    ));
}
