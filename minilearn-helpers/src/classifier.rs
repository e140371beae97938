use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::{argmax_rows, DataError, Float};

/// The common interface of the probabilistic classifiers in this workspace.
///
/// A driver can train and score any model through this trait without
/// knowing which algorithm sits behind it.
pub trait Classifier<F: Float> {
    type Error: std::error::Error + From<DataError>;

    /// Trains (or for lazy learners, stores) the model on a labeled feature matrix.
    fn fit(
        &mut self,
        features: ArrayView2<F>,
        labels: ArrayView1<usize>,
    ) -> Result<&mut Self, Self::Error>;

    /// Class probabilities, one row per query sample.
    fn predict_proba(&self, features: ArrayView2<F>) -> Result<Array2<F>, Self::Error>;

    /// The most probable class for each query sample.
    fn predict_classes(&self, features: ArrayView2<F>) -> Result<Array1<usize>, Self::Error> {
        let probabilities = self.predict_proba(features)?;
        Ok(argmax_rows(probabilities.view())?)
    }
}
