extern crate kdknnlib;

use kdknnlib::{euclidean, Labeled, Result, TreeBuilder};

fn main() -> Result<()> {
    let dimensions = 3;
    let data_size = 10000;
    let max_leaf_size = 30;
    let k = 5;
    let radius = 1.0;
    let random_seed = 17;

    let centers = vec![vec![0.0; dimensions], vec![10.0; dimensions], vec![-10.0; dimensions]];
    let data = Labeled::blobs(data_size, &centers, 1.0, random_seed)?;

    let mut tree = TreeBuilder::new()
        .max_leaf_size(max_leaf_size)
        .distance(euclidean)
        .build()?;
    tree.grow(data);

    println!(
        "grew {} samples into {} nodes ({} leaves), height {}, balance {}",
        tree.num_samples(),
        tree.num_nodes(),
        tree.num_leaves(),
        tree.height(),
        tree.balance()
    );

    for center in &centers {
        let (labels, distances) = tree.neighbors(center, k)?;
        println!("{:?}: labels {:?} distances {:?}", center, labels, distances);

        let (labels, _) = tree.range(center, radius)?;
        println!("{:?}: {} samples within {}", center, labels.len(), radius);
    }
    Ok(())
}
