use ndarray::Array1;

use crate::Float;

/// Counts the occurrences of each label.
///
/// The result has length `max(minlength, max(label) + 1)`, so every label
/// indexes a slot and classes absent from `labels` count as zero.
pub fn bincount<I>(labels: I, minlength: usize) -> Vec<usize>
where
    I: IntoIterator<Item = usize>,
{
    let mut counts = vec![0; minlength];
    for label in labels {
        if label >= counts.len() {
            counts.resize(label + 1, 0);
        }
        counts[label] += 1;
    }
    counts
}

/// Normalized label frequencies over `n_classes` classes.
///
/// Every label must be `< n_classes` and `labels` must not be empty.
pub fn class_distribution<F, I>(labels: I, n_classes: usize) -> Array1<F>
where
    F: Float,
    I: IntoIterator<Item = usize>,
{
    let counts = bincount(labels, n_classes);
    debug_assert_eq!(counts.len(), n_classes, "label outside of [0, n_classes)");
    let total = F::from_count(counts.iter().sum());
    counts
        .iter()
        .take(n_classes)
        .map(|&count| F::from_count(count) / total)
        .collect()
}
