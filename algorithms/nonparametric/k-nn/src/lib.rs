use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{Display, Formatter};
// These are the core components from our shared library.
use minilearn_helpers::{
    Classifier, DataError, Distance, Float, Metric, validate_query, validate_training,
};

// ndarray types are used in the public function signatures.
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

/// Errors that can occur when using the k-NN classifier.
#[derive(Debug, Clone, PartialEq)]
pub enum KnnError {
    /// k cannot be zero for a k-NN classifier
    InvalidK,
    /// `predict` was called before `fit`
    NotFitted,
    /// The training or query data breaks the data contract
    Data(DataError),
}

impl Display for KnnError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            KnnError::InvalidK => write!(f, "k cannot be zero for a k-NN classifier"),
            KnnError::NotFitted => write!(f, "Cannot predict before the classifier is fitted"),
            KnnError::Data(err) => write!(f, "Invalid data: {}", err),
        }
    }
}

impl Error for KnnError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            KnnError::Data(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DataError> for KnnError {
    fn from(err: DataError) -> Self {
        KnnError::Data(err)
    }
}

/// The output of [`KnnClassifier::predict`].
#[derive(Debug, Clone, PartialEq)]
pub struct KnnPrediction<F: Float> {
    /// Class probabilities, shape `(n_queries, n_classes)`.
    pub probabilities: Array2<F>,
    /// Training-row indices of the chosen neighbours, nearest first,
    /// shape `(n_queries, min(k, n_train))`.
    pub neighbors: Array2<usize>,
}

/// The training data kept by a fitted classifier.
#[derive(Debug, Clone)]
struct TrainingSet<F: Float> {
    features: Array2<F>,
    labels: Array1<usize>,
    n_classes: usize,
}

/// A k-Nearest Neighbors (k-NN) classifier.
///
/// This is a lazy learner: `fit` only stores the training data, and every
/// call to `predict` measures the distance from each query to every stored
/// point, keeps the `k` closest and turns their labels into class
/// probabilities.
///
/// # Type Parameters
///
/// * `F`: The float type for the features (e.g., `f32`, `f64`).
#[derive(Debug, Clone)]
pub struct KnnClassifier<F: Float> {
    k: usize,
    metric: Metric,
    num_classes: Option<usize>,
    training: Option<TrainingSet<F>>,
}

impl<F: Float> Default for KnnClassifier<F> {
    fn default() -> Self {
        KnnClassifier {
            k: 1,
            metric: Metric::Euclidean,
            num_classes: None,
            training: None,
        }
    }
}

impl<F: Float> KnnClassifier<F> {
    /// Creates a new, unfitted k-NN classifier.
    ///
    /// # Arguments
    ///
    /// * `k`: The number of neighbors to consider for classification. Must be greater than 0.
    /// * `metric`: The distance function used to rank training points.
    ///
    /// # Errors
    ///
    /// Returns `KnnError::InvalidK` if `k` is 0, as this is not a valid configuration.
    pub fn new(k: usize, metric: Metric) -> Result<Self, KnnError> {
        if k == 0 {
            return Err(KnnError::InvalidK);
        }
        Ok(Self {
            k,
            metric,
            ..Self::default()
        })
    }

    /// Fixes the number of classes instead of deriving it from the labels at fit time.
    pub fn with_num_classes(mut self, num_classes: usize) -> Self {
        self.num_classes = Some(num_classes);
        self
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// The resolved class count, available once fitted.
    pub fn n_classes(&self) -> Option<usize> {
        self.training.as_ref().map(|t| t.n_classes)
    }

    pub fn is_fitted(&self) -> bool {
        self.training.is_some()
    }

    /// Stores a copy of the training data.
    ///
    /// No computation happens here; the class count becomes `max(label) + 1`
    /// unless one was set with [`KnnClassifier::with_num_classes`].
    ///
    /// # Errors
    ///
    /// Returns `KnnError::Data` if the training set is empty, if the number of
    /// rows and labels differ, if a feature is not finite, or if a label is
    /// outside the configured class count. A failed call leaves the
    /// classifier unfitted.
    pub fn fit(
        &mut self,
        features: ArrayView2<F>,
        labels: ArrayView1<usize>,
    ) -> Result<&mut Self, KnnError> {
        self.training = None;
        let n_classes = validate_training(features, labels, self.num_classes)?;
        self.training = Some(TrainingSet {
            features: features.to_owned(),
            labels: labels.to_owned(),
            n_classes,
        });
        Ok(self)
    }

    /// Predicts class probabilities for every row of `query`.
    ///
    /// Each probability row is the label histogram of the `k` nearest
    /// training points divided by `k`. Equidistant points are ranked by
    /// their training-row index, lowest first.
    ///
    /// When `k` exceeds the number of training points all of them are used
    /// as neighbours, but the histogram is still divided by `k`, so the rows
    /// then sum to `n_train / k`. Keeping `k` at or below the training set
    /// size is the caller's responsibility.
    ///
    /// # Errors
    ///
    /// Returns `KnnError::NotFitted` before `fit`, and `KnnError::Data` if
    /// the query has the wrong number of columns or non-finite values.
    pub fn predict(&self, query: ArrayView2<F>) -> Result<KnnPrediction<F>, KnnError> {
        let training = self.training.as_ref().ok_or(KnnError::NotFitted)?;
        validate_query(query, training.features.ncols())?;

        // (n_queries, n_train) grid of distances
        let distances = self.metric.pairwise(query, training.features.view());

        let n_train = training.features.nrows();
        let n_neighbors = self.k.min(n_train);
        let k = F::from_count(self.k);

        let mut probabilities = Array2::<F>::zeros((query.nrows(), training.n_classes));
        let mut neighbors = Array2::<usize>::zeros((query.nrows(), n_neighbors));

        for (i, row) in distances.rows().into_iter().enumerate() {
            let nearest = nearest_indices(row, n_neighbors);
            for (slot, &j) in nearest.iter().enumerate() {
                neighbors[[i, slot]] = j;
                probabilities[[i, training.labels[j]]] += F::one();
            }
        }
        probabilities.mapv_inplace(|count| count / k);

        Ok(KnnPrediction {
            probabilities,
            neighbors,
        })
    }
}

/// Indices of the `n` smallest entries of `distances`, in ascending order.
///
/// Ties are ordered by index, which reproduces a stable ascending sort. Only
/// the first `n` positions are fully sorted.
fn nearest_indices<F: Float>(distances: ArrayView1<F>, n: usize) -> Vec<usize> {
    let by_distance = |a: &usize, b: &usize| {
        distances[*a]
            .partial_cmp(&distances[*b])
            .unwrap_or(Ordering::Equal)
            .then(a.cmp(b))
    };

    if n == 0 {
        return Vec::new();
    }
    let mut order: Vec<usize> = (0..distances.len()).collect();
    if n < order.len() {
        order.select_nth_unstable_by(n - 1, by_distance);
        order.truncate(n);
    }
    order.sort_unstable_by(by_distance);
    order
}

impl<F: Float> Classifier<F> for KnnClassifier<F> {
    type Error = KnnError;

    fn fit(
        &mut self,
        features: ArrayView2<F>,
        labels: ArrayView1<usize>,
    ) -> Result<&mut Self, KnnError> {
        KnnClassifier::fit(self, features, labels)
    }

    fn predict_proba(&self, features: ArrayView2<F>) -> Result<Array2<F>, KnnError> {
        Ok(self.predict(features)?.probabilities)
    }
}
