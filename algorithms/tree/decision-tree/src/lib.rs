//! A greedily grown binary decision tree classifier.
//!
//! The tree partitions the training rows with axis-aligned `feature <= threshold`
//! tests chosen by exhaustive search over midpoints (see [`split::best_split`]),
//! and predicts the label distribution of the leaf a sample falls into.

use std::error::Error;
use std::fmt::{Display, Formatter};

use minilearn_helpers::{
    Classifier, DataError, Float, class_distribution, validate_query, validate_training,
};
use ndarray::{Array2, ArrayView1, ArrayView2};

pub mod cost;
mod node;
mod params;
pub mod split;

pub use cost::CostFunction;
pub use node::{NodeIter, Split, TreeNode};
pub use params::DecisionTreeParams;
pub use split::SplitCandidate;

/// Errors that can occur when fitting or querying a decision tree.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeError {
    /// `predict` was called before `fit`
    NotFitted,
    /// The training or query data breaks the data contract
    Data(DataError),
}

impl Display for TreeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TreeError::NotFitted => write!(f, "Cannot predict before the tree is fitted"),
            TreeError::Data(err) => write!(f, "Invalid data: {}", err),
        }
    }
}

impl Error for TreeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TreeError::Data(err) => Some(err),
            TreeError::NotFitted => None,
        }
    }
}

impl From<DataError> for TreeError {
    fn from(err: DataError) -> Self {
        TreeError::Data(err)
    }
}

/// A fitted tree together with the shape of the data it was fitted on.
#[derive(Debug, Clone, PartialEq)]
struct FittedTree<F: Float> {
    root: TreeNode<F>,
    n_classes: usize,
    n_features: usize,
}

/// Read-only view of the training data shared by every node while the tree
/// is grown. Nodes only store row indices into it.
struct TrainingContext<'a, F: Float> {
    features: ArrayView2<'a, F>,
    labels: ArrayView1<'a, usize>,
    n_classes: usize,
    params: &'a DecisionTreeParams,
}

impl<F: Float> TrainingContext<'_, F> {
    /// Builds the subtree for the rows in `indices`, recursing until a
    /// stopping condition turns the node into a leaf.
    fn grow(&self, indices: Vec<usize>, depth: usize) -> TreeNode<F> {
        debug_assert!(!indices.is_empty(), "tree nodes never cover an empty region");
        let class_probabilities =
            class_distribution(indices.iter().map(|&i| self.labels[i]), self.n_classes);
        let mut node = TreeNode::leaf(indices, depth, class_probabilities);

        if depth >= self.params.max_depth
            || node.indices().len() <= self.params.min_leaf_instances
        {
            self.report_leaf(&node);
            return node;
        }

        let Some(candidate) =
            split::best_split(self.features, self.labels, node.indices(), self.params.cost)
        else {
            self.report_leaf(&node);
            return node;
        };

        if self.params.verbose {
            println!(
                "{:indent$}depth {}: split {} rows on feature {} <= {:?} (cost {:?})",
                "",
                depth,
                node.indices().len(),
                candidate.feature,
                candidate.threshold,
                candidate.cost,
                indent = depth * 2
            );
        }

        let (left, right) = split::partition(
            self.features.column(candidate.feature),
            node.indices(),
            candidate.threshold,
        );
        let left = self.grow(left, depth + 1);
        let right = self.grow(right, depth + 1);
        node.set_split(Split::new(
            candidate.feature,
            candidate.threshold,
            candidate.cost,
            left,
            right,
        ));
        node
    }

    fn report_leaf(&self, node: &TreeNode<F>) {
        if self.params.verbose {
            println!(
                "{:indent$}depth {}: leaf with {} rows, p = {}",
                "",
                node.depth(),
                node.indices().len(),
                node.class_probabilities(),
                indent = node.depth() * 2
            );
        }
    }
}

/// A binary decision tree classifier.
///
/// `fit` grows the tree top-down: a node becomes a leaf when it reaches
/// `max_depth`, holds at most `min_leaf_instances` rows, or has no split
/// that leaves both sides non-empty. Otherwise the split with the lowest
/// weighted impurity is applied and both children are grown in turn.
/// Construction is deterministic, and recursion depth is bounded by
/// `max_depth`.
///
/// # Type Parameters
///
/// * `F`: The float type for the features (e.g., `f32`, `f64`).
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTree<F: Float> {
    params: DecisionTreeParams,
    fitted: Option<FittedTree<F>>,
}

impl<F: Float> Default for DecisionTree<F> {
    fn default() -> Self {
        DecisionTree::new(DecisionTreeParams::default())
    }
}

impl<F: Float> DecisionTree<F> {
    pub fn new(params: DecisionTreeParams) -> Self {
        DecisionTree {
            params,
            fitted: None,
        }
    }

    pub fn params(&self) -> &DecisionTreeParams {
        &self.params
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    /// The root of the fitted tree.
    pub fn root(&self) -> Option<&TreeNode<F>> {
        self.fitted.as_ref().map(|t| &t.root)
    }

    /// The resolved class count, available once fitted.
    pub fn n_classes(&self) -> Option<usize> {
        self.fitted.as_ref().map(|t| t.n_classes)
    }

    /// Total number of nodes, 0 when unfitted.
    pub fn n_nodes(&self) -> usize {
        self.root().map_or(0, |root| root.iter().count())
    }

    /// Number of leaves, 0 when unfitted.
    pub fn n_leaves(&self) -> usize {
        self.root()
            .map_or(0, |root| root.iter().filter(|n| n.is_leaf()).count())
    }

    /// Depth of the deepest node, 0 when unfitted.
    pub fn depth(&self) -> usize {
        self.root()
            .and_then(|root| root.iter().map(|n| n.depth()).max())
            .unwrap_or(0)
    }

    /// Grows a new tree on the given training data, discarding any previous one.
    ///
    /// # Errors
    ///
    /// Returns `TreeError::Data` if the training set is empty, if the number
    /// of rows and labels differ, if a feature is not finite, or if a label
    /// is outside the configured class count.
    pub fn fit(
        &mut self,
        features: ArrayView2<F>,
        labels: ArrayView1<usize>,
    ) -> Result<&mut Self, TreeError> {
        self.fitted = None;
        let n_classes = validate_training(features, labels, self.params.num_classes)?;

        let context = TrainingContext {
            features: features.view(),
            labels: labels.view(),
            n_classes,
            params: &self.params,
        };
        let root = context.grow((0..features.nrows()).collect(), 0);

        self.fitted = Some(FittedTree {
            root,
            n_classes,
            n_features: features.ncols(),
        });
        Ok(self)
    }

    /// Predicts class probabilities for every row of `query`: the stored
    /// distribution of the leaf each sample descends to.
    ///
    /// # Errors
    ///
    /// Returns `TreeError::NotFitted` before `fit` and `TreeError::Data` if
    /// the query has the wrong number of columns or non-finite values.
    pub fn predict(&self, query: ArrayView2<F>) -> Result<Array2<F>, TreeError> {
        let fitted = self.fitted.as_ref().ok_or(TreeError::NotFitted)?;
        validate_query(query, fitted.n_features)?;

        let mut probabilities = Array2::<F>::zeros((query.nrows(), fitted.n_classes));
        for (sample, mut out) in query.rows().into_iter().zip(probabilities.rows_mut()) {
            out.assign(&fitted.root.leaf_for(sample).class_probabilities());
        }
        Ok(probabilities)
    }
}

impl<F: Float> Classifier<F> for DecisionTree<F> {
    type Error = TreeError;

    fn fit(
        &mut self,
        features: ArrayView2<F>,
        labels: ArrayView1<usize>,
    ) -> Result<&mut Self, TreeError> {
        DecisionTree::fit(self, features, labels)
    }

    fn predict_proba(&self, features: ArrayView2<F>) -> Result<Array2<F>, TreeError> {
        self.predict(features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{Array1, array};
    use rand::{Rng, SeedableRng};
    use rand_xoshiro::Xoshiro256PlusPlus;

    const ALL_COSTS: [CostFunction; 3] = [
        CostFunction::Misclassification,
        CostFunction::Entropy,
        CostFunction::Gini,
    ];

    fn line_data() -> (Array2<f64>, Array1<usize>) {
        (array![[0.0], [1.0], [10.0], [11.0]], array![0, 0, 1, 1])
    }

    fn random_data(seed: u64, n: usize, d: usize, c: usize) -> (Array2<f64>, Array1<usize>) {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        // Coarse grid values so that duplicates occur and some regions cannot be split.
        let features = Array2::from_shape_fn((n, d), |_| rng.random_range(0..6) as f64 * 0.5);
        let labels = Array1::from_shape_fn(n, |_| rng.random_range(0..c));
        (features, labels)
    }

    #[test]
    fn test_single_split_on_a_line() {
        let (features, labels) = line_data();
        let mut tree = DecisionTree::new(DecisionTreeParams::default().with_max_depth(1));
        tree.fit(features.view(), labels.view()).unwrap();

        let root = tree.root().unwrap();
        let split = root.split().unwrap();
        assert_eq!(split.feature(), 0);
        assert_abs_diff_eq!(split.threshold(), 5.5);
        assert_abs_diff_eq!(split.left().class_probabilities(), array![1.0, 0.0]);
        assert_abs_diff_eq!(split.right().class_probabilities(), array![0.0, 1.0]);
        assert_eq!(tree.n_leaves(), 2);
        assert_eq!(tree.depth(), 1);

        let probs = tree.predict(array![[-3.0], [5.5], [5.6], [100.0]].view()).unwrap();
        assert_abs_diff_eq!(probs, array![[1.0, 0.0], [1.0, 0.0], [0.0, 1.0], [0.0, 1.0]]);
    }

    #[test]
    fn test_verbose_fit_grows_the_same_tree() {
        let (features, labels) = line_data();
        let query = array![[-3.0], [5.5], [5.6], [100.0]];
        let params = DecisionTreeParams::default().with_max_depth(2);

        let mut quiet = DecisionTree::new(params);
        quiet.fit(features.view(), labels.view()).unwrap();
        let mut verbose = DecisionTree::new(params.with_verbose(true));
        verbose.fit(features.view(), labels.view()).unwrap();

        assert!(verbose.params().verbose);
        assert_eq!(verbose.n_nodes(), quiet.n_nodes());
        assert_eq!(verbose.n_leaves(), quiet.n_leaves());
        assert_eq!(verbose.depth(), quiet.depth());
        assert_abs_diff_eq!(
            verbose.predict(query.view()).unwrap(),
            quiet.predict(query.view()).unwrap()
        );
        assert_abs_diff_eq!(
            verbose.root().unwrap().split().unwrap().threshold(),
            5.5
        );
    }

    #[test]
    fn test_depth_zero_predicts_global_distribution() {
        let features = array![[0.0], [1.0], [2.0], [3.0]];
        let labels = array![0, 2, 2, 1];
        let mut tree = DecisionTree::new(DecisionTreeParams::default().with_max_depth(0));
        tree.fit(features.view(), labels.view()).unwrap();

        assert_eq!(tree.n_nodes(), 1);
        assert!(tree.root().unwrap().is_leaf());
        let probs = tree.predict(array![[0.0], [42.0]].view()).unwrap();
        assert_abs_diff_eq!(probs, array![[0.25, 0.25, 0.5], [0.25, 0.25, 0.5]]);
    }

    #[test]
    fn test_identical_rows_make_a_leaf() {
        let features = array![[1.0, 2.0], [1.0, 2.0], [1.0, 2.0], [1.0, 2.0]];
        let labels = array![0, 1, 0, 1];
        for cost in ALL_COSTS {
            let params = DecisionTreeParams::default()
                .with_max_depth(10)
                .with_cost(cost);
            let mut tree = DecisionTree::new(params);
            tree.fit(features.view(), labels.view()).unwrap();
            assert_eq!(tree.n_nodes(), 1);
            assert_abs_diff_eq!(
                tree.root().unwrap().class_probabilities(),
                array![0.5, 0.5]
            );
        }
    }

    #[test]
    fn test_min_leaf_instances_stops_splitting() {
        let (features, labels) = line_data();
        let params = DecisionTreeParams::default().with_min_leaf_instances(4);
        let mut tree = DecisionTree::new(params);
        tree.fit(features.view(), labels.view()).unwrap();
        assert_eq!(tree.n_nodes(), 1);

        let params = DecisionTreeParams::default().with_min_leaf_instances(3);
        let mut tree = DecisionTree::new(params);
        tree.fit(features.view(), labels.view()).unwrap();
        assert_eq!(tree.n_nodes(), 3);
    }

    #[test]
    fn test_pure_regions_are_still_split() {
        // Purity is not a stopping condition: after the 5.5 split both pure
        // children keep splitting until single rows remain.
        let (features, labels) = line_data();
        let params = DecisionTreeParams::default().with_max_depth(10);
        let mut tree = DecisionTree::new(params);
        tree.fit(features.view(), labels.view()).unwrap();

        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.n_leaves(), 4);
        for leaf in tree.root().unwrap().iter().filter(|n| n.is_leaf()) {
            assert_eq!(leaf.indices().len(), 1);
        }
    }

    #[test]
    fn test_structure_invariants_on_random_data() {
        for (seed, cost) in (0..6).zip(ALL_COSTS.iter().cycle()) {
            let (features, labels) = random_data(seed, 80, 3, 3);
            let params = DecisionTreeParams::default()
                .with_max_depth(6)
                .with_cost(*cost)
                .with_min_leaf_instances(2);
            let mut tree = DecisionTree::new(params);
            tree.fit(features.view(), labels.view()).unwrap();

            let root = tree.root().unwrap();
            let mut all: Vec<usize> = root.indices().to_vec();
            all.sort_unstable();
            assert_eq!(all, (0..80).collect::<Vec<_>>());

            for node in root.iter() {
                assert!(!node.indices().is_empty());
                assert!(node.depth() <= 6);
                assert_abs_diff_eq!(node.class_probabilities().sum(), 1.0, epsilon = 1e-12);

                let Some(split) = node.split() else {
                    continue;
                };
                let (left, right) = (split.left(), split.right());
                assert_eq!(left.depth(), node.depth() + 1);
                assert_eq!(
                    left.indices().len() + right.indices().len(),
                    node.indices().len()
                );
                assert!(left.indices().iter().all(|i| !right.indices().contains(i)));
                assert!(
                    left.indices()
                        .iter()
                        .all(|&i| features[[i, split.feature()]] <= split.threshold())
                );
                assert!(
                    right
                        .indices()
                        .iter()
                        .all(|&i| features[[i, split.feature()]] > split.threshold())
                );
            }
        }
    }

    #[test]
    fn test_leaves_partition_the_training_rows() {
        let (features, labels) = random_data(17, 60, 2, 4);
        let mut tree = DecisionTree::new(DecisionTreeParams::default().with_max_depth(4));
        tree.fit(features.view(), labels.view()).unwrap();

        let mut covered: Vec<usize> = tree
            .root()
            .unwrap()
            .iter()
            .filter(|n| n.is_leaf())
            .flat_map(|n| n.indices().iter().copied())
            .collect();
        covered.sort_unstable();
        assert_eq!(covered, (0..60).collect::<Vec<_>>());

        // Every training row lands in the leaf that owns it.
        for leaf in tree.root().unwrap().iter().filter(|n| n.is_leaf()) {
            for &i in leaf.indices() {
                let reached = tree.root().unwrap().leaf_for(features.row(i));
                assert_eq!(reached.indices(), leaf.indices());
            }
        }
    }

    #[test]
    fn test_prediction_rows_sum_to_one() {
        let (features, labels) = random_data(3, 50, 4, 3);
        let (query, _) = random_data(4, 30, 4, 3);
        for cost in ALL_COSTS {
            let mut tree = DecisionTree::new(DecisionTreeParams::default().with_cost(cost));
            let probs = tree
                .fit(features.view(), labels.view())
                .unwrap()
                .predict(query.view())
                .unwrap();
            assert_eq!(probs.dim(), (30, 3));
            for row in probs.rows() {
                assert_abs_diff_eq!(row.sum(), 1.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_fit_twice_gives_the_same_tree() {
        let (features, labels) = random_data(8, 70, 3, 2);
        let (query, _) = random_data(9, 20, 3, 2);
        let params = DecisionTreeParams::default()
            .with_max_depth(5)
            .with_cost(CostFunction::Entropy);

        let mut tree = DecisionTree::new(params);
        tree.fit(features.view(), labels.view()).unwrap();
        let first_root = tree.root().unwrap().clone();
        let first = tree.predict(query.view()).unwrap();

        tree.fit(features.view(), labels.view()).unwrap();
        assert_eq!(tree.root().unwrap(), &first_root);
        assert_eq!(tree.predict(query.view()).unwrap(), first);

        let mut other = DecisionTree::new(params);
        other.fit(features.view(), labels.view()).unwrap();
        assert_eq!(other, tree);
    }

    #[test]
    fn test_refit_replaces_previous_tree() {
        let (features, labels) = line_data();
        let mut tree = DecisionTree::<f64>::default();
        tree.fit(features.view(), labels.view()).unwrap();
        assert_eq!(tree.n_classes(), Some(2));

        let features = array![[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]];
        let labels = array![0, 1, 2];
        tree.fit(features.view(), labels.view()).unwrap();
        assert_eq!(tree.n_classes(), Some(3));
        assert_eq!(tree.root().unwrap().indices(), &[0, 1, 2]);
    }

    #[test]
    fn test_explicit_class_count() {
        let (features, labels) = line_data();
        let params = DecisionTreeParams::default().with_num_classes(3);
        let mut tree = DecisionTree::new(params);
        let probs = tree
            .fit(features.view(), labels.view())
            .unwrap()
            .predict(array![[0.0]].view())
            .unwrap();
        assert_abs_diff_eq!(probs, array![[1.0, 0.0, 0.0]]);

        let mut narrow = DecisionTree::new(DecisionTreeParams::default().with_num_classes(1));
        assert_eq!(
            narrow.fit(features.view(), labels.view()).unwrap_err(),
            TreeError::Data(DataError::LabelOutOfRange {
                label: 1,
                n_classes: 1
            })
        );
        assert!(!narrow.is_fitted());
    }

    #[test]
    fn test_classifier_trait_predicts_classes() {
        let (features, labels) = line_data();
        let mut tree = DecisionTree::<f64>::default();
        Classifier::fit(&mut tree, features.view(), labels.view()).unwrap();
        let classes = tree.predict_classes(array![[0.2], [10.9]].view()).unwrap();
        assert_eq!(classes, array![0, 1]);
    }

    #[test]
    fn test_f32_tree() {
        let features = array![[0.0f32, 1.0], [0.5, 1.0], [3.0, 0.0], [3.5, 0.0]];
        let labels = array![1, 1, 0, 0];
        let params = DecisionTreeParams::default().with_cost(CostFunction::Gini);
        let mut tree = DecisionTree::new(params);
        let probs = tree
            .fit(features.view(), labels.view())
            .unwrap()
            .predict(array![[0.1f32, 1.0], [3.2, 0.0]].view())
            .unwrap();
        assert_abs_diff_eq!(probs, array![[0.0f32, 1.0], [1.0, 0.0]]);
    }

    #[test]
    fn test_error_before_fit() {
        let tree = DecisionTree::<f64>::default();
        assert_eq!(
            tree.predict(array![[1.0]].view()).unwrap_err(),
            TreeError::NotFitted
        );
        assert_eq!(tree.n_nodes(), 0);
        assert!(tree.root().is_none());
    }

    #[test]
    fn test_error_on_bad_input() {
        let mut tree = DecisionTree::<f64>::default();
        assert_eq!(
            tree.fit(array![[0.0], [1.0]].view(), array![0].view())
                .unwrap_err(),
            TreeError::Data(DataError::MismatchedDimensions {
                features: 2,
                labels: 1
            })
        );

        let (features, labels) = line_data();
        tree.fit(features.view(), labels.view()).unwrap();
        assert_eq!(
            tree.predict(array![[1.0, 2.0]].view()).unwrap_err(),
            TreeError::Data(DataError::FeatureCountMismatch {
                expected: 1,
                found: 2
            })
        );
        assert_eq!(
            tree.predict(array![[f64::INFINITY]].view()).unwrap_err(),
            TreeError::Data(DataError::NonFiniteFeature { row: 0, column: 0 })
        );
    }
}
