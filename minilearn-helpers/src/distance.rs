use std::fmt::{Display, Formatter};

use ndarray::{Array2, ArrayView1, ArrayView2};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::Float;

/// A dissimilarity measure between two feature vectors of equal length.
///
/// Mismatched lengths are not checked here; callers validate dimensions
/// before any distance is computed.
pub trait Distance<F: Float>: Clone + Send + Sync {
    /// Computes the distance between `a` and `b`.
    fn distance(&self, a: ArrayView1<F>, b: ArrayView1<F>) -> F;

    /// Distances between every row of `a` and every row of `b`.
    ///
    /// The result has shape `(a.nrows(), b.nrows())`.
    fn pairwise(&self, a: ArrayView2<F>, b: ArrayView2<F>) -> Array2<F> {
        Array2::from_shape_fn((a.nrows(), b.nrows()), |(i, j)| {
            self.distance(a.row(i), b.row(j))
        })
    }
}

/// Manhattan distance: `sum(|a_i - b_i|)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct L1Dist;

impl<F: Float> Distance<F> for L1Dist {
    fn distance(&self, a: ArrayView1<F>, b: ArrayView1<F>) -> F {
        a.iter()
            .zip(b.iter())
            .map(|(&x, &y)| (x - y).abs())
            .sum()
    }
}

/// Euclidean distance: `sqrt(sum((a_i - b_i)^2))`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct L2Dist;

impl<F: Float> Distance<F> for L2Dist {
    fn distance(&self, a: ArrayView1<F>, b: ArrayView1<F>) -> F {
        a.iter()
            .zip(b.iter())
            .map(|(&x, &y)| {
                let diff = x - y;
                diff * diff
            })
            .sum::<F>()
            .sqrt()
    }
}

/// The distance functions a classifier can be configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub enum Metric {
    #[default]
    Euclidean,
    Manhattan,
}

impl<F: Float> Distance<F> for Metric {
    fn distance(&self, a: ArrayView1<F>, b: ArrayView1<F>) -> F {
        match self {
            Metric::Euclidean => L2Dist.distance(a, b),
            Metric::Manhattan => L1Dist.distance(a, b),
        }
    }
}

impl Display for Metric {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Metric::Euclidean => write!(f, "L2 (Euclidean)"),
            Metric::Manhattan => write!(f, "L1 (Manhattan)"),
        }
    }
}
