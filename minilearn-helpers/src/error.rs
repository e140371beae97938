use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors raised when a feature matrix or label vector breaks the data contract.
#[derive(Debug, Clone, PartialEq)]
pub enum DataError {
    /// The training set has no rows.
    EmptyDataSet,
    /// The feature matrix and the label vector disagree on the number of samples.
    MismatchedDimensions { features: usize, labels: usize },
    /// A query matrix does not have as many columns as the training matrix.
    FeatureCountMismatch { expected: usize, found: usize },
    /// A label is not smaller than the configured number of classes.
    LabelOutOfRange { label: usize, n_classes: usize },
    /// A feature value is NaN or infinite.
    NonFiniteFeature { row: usize, column: usize },
    /// A train/test split would leave one of the sides empty.
    InvalidSplit { train: usize, total: usize },
    /// Metrics were requested for an empty or undefined prediction.
    EmptyPrediction,
}

impl Display for DataError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DataError::EmptyDataSet => write!(f, "Training data is empty"),
            DataError::MismatchedDimensions { features, labels } => write!(
                f,
                "Feature matrix has {} rows but the label vector has {} entries",
                features, labels
            ),
            DataError::FeatureCountMismatch { expected, found } => write!(
                f,
                "Expected {} features per sample, found {}",
                expected, found
            ),
            DataError::LabelOutOfRange { label, n_classes } => write!(
                f,
                "Label {} is out of range for {} classes",
                label, n_classes
            ),
            DataError::NonFiniteFeature { row, column } => write!(
                f,
                "Feature value at row {}, column {} is not finite",
                row, column
            ),
            DataError::InvalidSplit { train, total } => write!(
                f,
                "Cannot take {} training samples out of {} and keep a non-empty test set",
                train, total
            ),
            DataError::EmptyPrediction => write!(f, "Cannot score an empty prediction"),
        }
    }
}

impl Error for DataError {}
