use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::{DataError, Float};

/// Checks a training matrix/label pair and resolves the class count.
///
/// Returns `n_classes` when given, otherwise `max(label) + 1`.
pub fn validate_training<F: Float>(
    features: ArrayView2<F>,
    labels: ArrayView1<usize>,
    n_classes: Option<usize>,
) -> Result<usize, DataError> {
    if features.nrows() == 0 {
        return Err(DataError::EmptyDataSet);
    }
    if features.nrows() != labels.len() {
        return Err(DataError::MismatchedDimensions {
            features: features.nrows(),
            labels: labels.len(),
        });
    }
    check_finite(features)?;

    let max_label = labels.iter().copied().max().unwrap_or(0);
    match n_classes {
        Some(n_classes) if max_label >= n_classes => Err(DataError::LabelOutOfRange {
            label: max_label,
            n_classes,
        }),
        Some(n_classes) => Ok(n_classes),
        None => Ok(max_label + 1),
    }
}

/// Checks that a query matrix matches the training dimensionality.
pub fn validate_query<F: Float>(
    features: ArrayView2<F>,
    n_features: usize,
) -> Result<(), DataError> {
    if features.ncols() != n_features {
        return Err(DataError::FeatureCountMismatch {
            expected: n_features,
            found: features.ncols(),
        });
    }
    check_finite(features)
}

fn check_finite<F: Float>(features: ArrayView2<F>) -> Result<(), DataError> {
    match features.indexed_iter().find(|(_, value)| !value.is_finite()) {
        Some(((row, column), _)) => Err(DataError::NonFiniteFeature { row, column }),
        None => Ok(()),
    }
}

/// An owned feature matrix with its label vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset<F: Float> {
    features: Array2<F>,
    labels: Array1<usize>,
    n_classes: usize,
}

impl<F: Float> Dataset<F> {
    pub fn new(features: Array2<F>, labels: Array1<usize>) -> Result<Self, DataError> {
        let n_classes = validate_training(features.view(), labels.view(), None)?;
        Ok(Dataset {
            features,
            labels,
            n_classes,
        })
    }

    pub fn features(&self) -> ArrayView2<F> {
        self.features.view()
    }

    pub fn labels(&self) -> ArrayView1<usize> {
        self.labels.view()
    }

    pub fn n_samples(&self) -> usize {
        self.features.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Shuffles the rows with a seeded generator and splits them into a
    /// training set of `n_train` rows and a test set with the rest.
    pub fn train_test_split(&self, n_train: usize, seed: u64) -> Result<(Self, Self), DataError> {
        let total = self.n_samples();
        if n_train == 0 || n_train >= total {
            return Err(DataError::InvalidSplit {
                train: n_train,
                total,
            });
        }

        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let mut order: Vec<usize> = (0..total).collect();
        order.shuffle(&mut rng);
        let (train, test) = order.split_at(n_train);

        Ok((self.select(train)?, self.select(test)?))
    }

    fn select(&self, rows: &[usize]) -> Result<Self, DataError> {
        Dataset::new(
            self.features.select(Axis(0), rows),
            self.labels.select(Axis(0), rows),
        )
    }
}
