use crate::cost::CostFunction;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Hyperparameters of a [`DecisionTree`](crate::DecisionTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct DecisionTreeParams {
    /// Nodes at this depth become leaves. A depth of 0 gives a single leaf.
    pub max_depth: usize,
    /// Impurity measure minimized by every split.
    pub cost: CostFunction,
    /// Regions with at most this many rows are not split.
    pub min_leaf_instances: usize,
    /// Fixed class count; derived as `max(label) + 1` when `None`.
    pub num_classes: Option<usize>,
    /// Print every split and leaf while the tree is grown.
    pub verbose: bool,
}

impl Default for DecisionTreeParams {
    fn default() -> Self {
        DecisionTreeParams {
            max_depth: 3,
            cost: CostFunction::Misclassification,
            min_leaf_instances: 1,
            num_classes: None,
            verbose: false,
        }
    }
}

impl DecisionTreeParams {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_cost(mut self, cost: CostFunction) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_min_leaf_instances(mut self, min_leaf_instances: usize) -> Self {
        self.min_leaf_instances = min_leaf_instances;
        self
    }

    pub fn with_num_classes(mut self, num_classes: usize) -> Self {
        self.num_classes = Some(num_classes);
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}
