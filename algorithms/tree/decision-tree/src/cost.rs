//! Impurity measures for a set of class labels.
//!
//! Class probabilities are the empirical label frequencies of the set. Every
//! function panics on an empty set: split search never evaluates an empty
//! side of a split.

use std::fmt::{Display, Formatter};

use minilearn_helpers::{Float, bincount};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// The impurity measure minimized while growing a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub enum CostFunction {
    #[default]
    Misclassification,
    Entropy,
    Gini,
}

impl CostFunction {
    pub fn evaluate<F: Float>(&self, labels: &[usize]) -> F {
        match self {
            CostFunction::Misclassification => misclassification(labels),
            CostFunction::Entropy => entropy(labels),
            CostFunction::Gini => gini_index(labels),
        }
    }
}

impl Display for CostFunction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CostFunction::Misclassification => write!(f, "misclassification"),
            CostFunction::Entropy => write!(f, "entropy"),
            CostFunction::Gini => write!(f, "gini"),
        }
    }
}

/// Label counts and the set size, as floats.
fn frequencies<F: Float>(labels: &[usize]) -> (Vec<usize>, F) {
    assert!(!labels.is_empty(), "cost of an empty label set is undefined");
    let counts = bincount(labels.iter().copied(), 0);
    (counts, F::from_count(labels.len()))
}

/// `1 - max(p_c)`.
pub fn misclassification<F: Float>(labels: &[usize]) -> F {
    let (counts, total) = frequencies::<F>(labels);
    let majority = counts.iter().copied().max().unwrap_or(0);
    F::one() - F::from_count(majority) / total
}

/// `-sum(p_c * ln(p_c))` over the classes present in `labels`.
pub fn entropy<F: Float>(labels: &[usize]) -> F {
    let (counts, total) = frequencies::<F>(labels);
    -counts
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = F::from_count(count) / total;
            p * p.ln()
        })
        .sum::<F>()
}

/// `1 - sum(p_c^2)`.
pub fn gini_index<F: Float>(labels: &[usize]) -> F {
    let (counts, total) = frequencies::<F>(labels);
    F::one()
        - counts
            .iter()
            .map(|&count| {
                let p = F::from_count(count) / total;
                p * p
            })
            .sum::<F>()
}
