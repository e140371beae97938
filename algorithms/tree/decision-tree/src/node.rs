use minilearn_helpers::Float;
use ndarray::{Array1, ArrayView1};

/// One region of the training feature space.
///
/// A node keeps the training-row indices that fall into its region and the
/// label distribution over them. Internal nodes also own a [`Split`] with
/// the two child regions.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode<F: Float> {
    indices: Vec<usize>,
    depth: usize,
    class_probabilities: Array1<F>,
    split: Option<Split<F>>,
}

/// The axis-aligned test of an internal node and its two children.
///
/// Samples with `feature <= threshold` go left, all others go right.
#[derive(Debug, Clone, PartialEq)]
pub struct Split<F: Float> {
    feature: usize,
    threshold: F,
    cost: F,
    left: Box<TreeNode<F>>,
    right: Box<TreeNode<F>>,
}

impl<F: Float> Split<F> {
    pub(crate) fn new(
        feature: usize,
        threshold: F,
        cost: F,
        left: TreeNode<F>,
        right: TreeNode<F>,
    ) -> Self {
        Split {
            feature,
            threshold,
            cost,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn feature(&self) -> usize {
        self.feature
    }

    pub fn threshold(&self) -> F {
        self.threshold
    }

    /// Weighted impurity of the two children at the time of the split.
    pub fn cost(&self) -> F {
        self.cost
    }

    pub fn left(&self) -> &TreeNode<F> {
        &self.left
    }

    pub fn right(&self) -> &TreeNode<F> {
        &self.right
    }
}

impl<F: Float> TreeNode<F> {
    pub(crate) fn leaf(indices: Vec<usize>, depth: usize, class_probabilities: Array1<F>) -> Self {
        TreeNode {
            indices,
            depth,
            class_probabilities,
            split: None,
        }
    }

    pub(crate) fn set_split(&mut self, split: Split<F>) {
        self.split = Some(split);
    }

    /// Training-row indices in this node's region.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Distance from the root, which has depth 0.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Label frequencies of the rows in this region.
    pub fn class_probabilities(&self) -> ArrayView1<F> {
        self.class_probabilities.view()
    }

    pub fn split(&self) -> Option<&Split<F>> {
        self.split.as_ref()
    }

    pub fn is_leaf(&self) -> bool {
        self.split.is_none()
    }

    pub fn left(&self) -> Option<&TreeNode<F>> {
        self.split.as_ref().map(|s| s.left())
    }

    pub fn right(&self) -> Option<&TreeNode<F>> {
        self.split.as_ref().map(|s| s.right())
    }

    /// Follows the splits from this node down to the leaf whose region
    /// contains `sample`.
    pub fn leaf_for(&self, sample: ArrayView1<F>) -> &TreeNode<F> {
        let mut node = self;
        while let Some(split) = &node.split {
            node = if sample[split.feature] <= split.threshold {
                split.left()
            } else {
                split.right()
            };
        }
        node
    }

    /// Iterates over this node and all of its descendants in pre-order
    /// (node, left subtree, right subtree).
    pub fn iter(&self) -> NodeIter<'_, F> {
        NodeIter { stack: vec![self] }
    }
}

/// Pre-order iterator over a subtree, see [`TreeNode::iter`].
pub struct NodeIter<'a, F: Float> {
    stack: Vec<&'a TreeNode<F>>,
}

impl<'a, F: Float> Iterator for NodeIter<'a, F> {
    type Item = &'a TreeNode<F>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Some(split) = &node.split {
            self.stack.push(split.right());
            self.stack.push(split.left());
        }
        Some(node)
    }
}
