//! Greedy search for the best axis-aligned split of a node's region.

use std::cmp::Ordering;

use minilearn_helpers::Float;
use ndarray::{ArrayView1, ArrayView2};

use crate::cost::CostFunction;

/// The best `feature <= threshold` test found for a region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitCandidate<F: Float> {
    /// Size-weighted average impurity of the two sides.
    pub cost: F,
    pub feature: usize,
    pub threshold: F,
}

/// Finds the split of `indices` that minimizes the weighted child impurity.
///
/// Candidate thresholds for each feature are the midpoints between
/// consecutive values of that feature over the region, sorted ascending.
/// Features are scanned in column order and thresholds in ascending order;
/// the first candidate reaching the minimum cost wins. Candidates leaving
/// either side empty are skipped.
///
/// Returns `None` when no candidate produces two non-empty sides, which is
/// the case for a single row or for rows that agree on every feature.
pub fn best_split<F: Float>(
    features: ArrayView2<F>,
    labels: ArrayView1<usize>,
    indices: &[usize],
    cost: CostFunction,
) -> Option<SplitCandidate<F>> {
    let region = F::from_count(indices.len());
    let two = F::one() + F::one();

    let mut best: Option<SplitCandidate<F>> = None;
    let mut left = Vec::with_capacity(indices.len());
    let mut right = Vec::with_capacity(indices.len());

    for feature in 0..features.ncols() {
        let column = features.column(feature);
        let mut sorted: Vec<F> = indices.iter().map(|&i| column[i]).collect();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

        for pair in sorted.windows(2) {
            let threshold = (pair[0] + pair[1]) / two;

            left.clear();
            right.clear();
            for &i in indices {
                if column[i] <= threshold {
                    left.push(labels[i]);
                } else {
                    right.push(labels[i]);
                }
            }
            if left.is_empty() || right.is_empty() {
                continue;
            }

            let weighted = (F::from_count(left.len()) * cost.evaluate::<F>(&left)
                + F::from_count(right.len()) * cost.evaluate::<F>(&right))
                / region;
            if best.is_none_or(|b| weighted < b.cost) {
                best = Some(SplitCandidate {
                    cost: weighted,
                    feature,
                    threshold,
                });
            }
        }
    }
    best
}

/// Splits `indices` into the rows with `column <= threshold` and the rest,
/// keeping their relative order.
pub fn partition<F: Float>(
    column: ArrayView1<F>,
    indices: &[usize],
    threshold: F,
) -> (Vec<usize>, Vec<usize>) {
    indices
        .iter()
        .copied()
        .partition(|&i| column[i] <= threshold)
}
