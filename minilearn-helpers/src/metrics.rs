use ndarray::{Array1, ArrayView1, ArrayView2};
use ndarray_stats::QuantileExt;

use crate::{DataError, Float};

/// Hard class predictions: the index of the largest probability in each row.
///
/// Ties resolve to the lowest class index.
pub fn argmax_rows<F: Float>(probabilities: ArrayView2<F>) -> Result<Array1<usize>, DataError> {
    probabilities
        .rows()
        .into_iter()
        .map(|row| row.argmax().map_err(|_| DataError::EmptyPrediction))
        .collect()
}

/// Percentage of predictions that match the true labels, in `[0, 100]`.
pub fn accuracy(predicted: ArrayView1<usize>, truth: ArrayView1<usize>) -> Result<f64, DataError> {
    if predicted.len() != truth.len() {
        return Err(DataError::MismatchedDimensions {
            features: predicted.len(),
            labels: truth.len(),
        });
    }
    if truth.is_empty() {
        return Err(DataError::EmptyPrediction);
    }
    let correct = predicted
        .iter()
        .zip(truth.iter())
        .filter(|(p, t)| p == t)
        .count();
    Ok(correct as f64 / truth.len() as f64 * 100.0)
}
