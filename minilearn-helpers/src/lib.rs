use ndarray::NdFloat;

use std::iter::Sum;

// Include submodules
mod classifier;
mod dataset;
mod distance;
mod error;
mod labels;
mod metrics;

// Re-export types from submodules
pub use classifier::Classifier;
pub use dataset::{validate_query, validate_training, Dataset};
pub use distance::{Distance, L1Dist, L2Dist, Metric};
pub use error::DataError;
pub use labels::{bincount, class_distribution};
pub use metrics::{accuracy, argmax_rows};

/// Scalar type shared by every model in the workspace (`f32` or `f64`).
pub trait Float: NdFloat + Sum {
    /// Converts a sample or label count into the float type.
    fn from_count(n: usize) -> Self;
}

impl Float for f32 {
    fn from_count(n: usize) -> Self {
        n as f32
    }
}

impl Float for f64 {
    fn from_count(n: usize) -> Self {
        n as f64
    }
}
