//! K-nearest-neighbours and decision-tree classifiers over `ndarray` feature
//! matrices, with the helpers they share.

pub use minilearn_helpers::{
    Classifier, DataError, Dataset, Distance, Float, L1Dist, L2Dist, Metric, accuracy,
    argmax_rows, bincount, class_distribution, validate_query, validate_training,
};

pub use k_nn::{KnnClassifier, KnnError, KnnPrediction};

pub use decision_tree::{
    CostFunction, DecisionTree, DecisionTreeParams, NodeIter, Split, SplitCandidate, TreeError,
    TreeNode, cost, split,
};
