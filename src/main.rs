// A small experiment driver: trains both classifiers on a synthetic dataset
// and reports test accuracy while sweeping k and the tree depth.
use std::error::Error;

use minilearn::{
    Classifier, CostFunction, Dataset, DecisionTree, DecisionTreeParams, KnnClassifier, Metric,
    accuracy,
};
use ndarray::{Array1, Array2};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

const SEED: u64 = 1234;

/// Three noisy clusters in the plane, one per class.
fn synthetic_clusters(per_class: usize, seed: u64) -> Result<Dataset<f64>, Box<dyn Error>> {
    let centers: [(f64, f64); 3] = [(0.0, 0.0), (4.0, 1.0), (1.5, 4.5)];
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);

    let n = per_class * centers.len();
    let mut features = Array2::<f64>::zeros((n, 2));
    let mut labels = Array1::<usize>::zeros(n);
    for (class, &(cx, cy)) in centers.iter().enumerate() {
        for i in 0..per_class {
            let row = class * per_class + i;
            features[[row, 0]] = cx + rng.random_range(-2.0..2.0);
            features[[row, 1]] = cy + rng.random_range(-2.0..2.0);
            labels[row] = class;
        }
    }
    Ok(Dataset::new(features, labels)?)
}

fn evaluate<C: Classifier<f64>>(
    model: &mut C,
    train: &Dataset<f64>,
    test: &Dataset<f64>,
) -> Result<f64, C::Error> {
    let predicted = model
        .fit(train.features(), train.labels())?
        .predict_classes(test.features())?;
    Ok(accuracy(predicted.view(), test.labels())?)
}

fn main() -> Result<(), Box<dyn Error>> {
    println!("minilearn experiment driver");

    let data = synthetic_clusters(60, SEED)?;
    let n_train = data.n_samples() * 2 / 3;
    let (train, test) = data.train_test_split(n_train, SEED)?;
    println!(
        "{} samples, {} features, {} classes ({} train / {} test)",
        data.n_samples(),
        data.n_features(),
        data.n_classes(),
        train.n_samples(),
        test.n_samples()
    );

    println!("\nk-NN accuracy by k:");
    for metric in [Metric::Euclidean, Metric::Manhattan] {
        let mut scores = Vec::new();
        for k in 1..=10 {
            let mut model = KnnClassifier::new(k, metric)?;
            scores.push(format!("{:5.1}", evaluate(&mut model, &train, &test)?));
        }
        println!("  {:<16} {}", metric.to_string(), scores.join(" "));
    }

    println!("\nDecision tree accuracy by max_depth (0..=8):");
    for cost in [
        CostFunction::Misclassification,
        CostFunction::Entropy,
        CostFunction::Gini,
    ] {
        let mut scores = Vec::new();
        for depth in 0..=8 {
            let params = DecisionTreeParams::default()
                .with_max_depth(depth)
                .with_cost(cost);
            let mut tree = DecisionTree::new(params);
            scores.push(format!("{:5.1}", evaluate(&mut tree, &train, &test)?));
        }
        println!("  {:<16} {}", cost.to_string(), scores.join(" "));
    }

    println!("\nGrowing a depth-2 Gini tree:");
    let params = DecisionTreeParams::default()
        .with_max_depth(2)
        .with_cost(CostFunction::Gini)
        .with_verbose(true);
    let mut tree = DecisionTree::new(params);
    tree.fit(train.features(), train.labels())?;
    println!("{} nodes, {} leaves", tree.n_nodes(), tree.n_leaves());

    Ok(())
}
