//! Example demonstrating error handling with the k-NN classifier.
//!
//! Every misuse of the classifier surfaces as a `KnnError` instead of a panic
//! or a silently wrong probability matrix.

use k_nn::{KnnClassifier, KnnError};
use minilearn_helpers::{DataError, Metric};
use ndarray::{Array1, Array2, array};

fn main() {
    println!("k-NN Classifier Error Handling Examples");
    println!("=======================================");

    // Example 1: Handle invalid k value
    println!("\n1. Handling invalid k value (k=0):");
    match KnnClassifier::<f64>::new(0, Metric::Euclidean) {
        Ok(_) => println!("   Classifier created successfully"),
        Err(KnnError::InvalidK) => println!("   ✓ Caught expected error: {}", KnnError::InvalidK),
        Err(e) => println!("   ✗ Unexpected error: {}", e),
    }

    // Example 2: Predicting before fitting
    println!("\n2. Handling predict before fit:");
    let classifier = KnnClassifier::<f64>::new(3, Metric::Euclidean).expect("k is positive");
    match classifier.predict(array![[1.0, 1.0]].view()) {
        Ok(_) => println!("   Prediction succeeded"),
        Err(KnnError::NotFitted) => println!("   ✓ Caught expected error: {}", KnnError::NotFitted),
        Err(e) => println!("   ✗ Unexpected error: {}", e),
    }

    // Example 3: Handle empty training set
    println!("\n3. Handling empty training set:");
    let mut classifier = KnnClassifier::<f64>::new(3, Metric::Euclidean).expect("k is positive");
    let empty_features = Array2::<f64>::zeros((0, 2));
    let empty_labels = Array1::<usize>::zeros(0);
    match classifier.fit(empty_features.view(), empty_labels.view()) {
        Ok(_) => println!("   Classifier fitted on an empty training set"),
        Err(KnnError::Data(DataError::EmptyDataSet)) => {
            println!("   ✓ Caught expected error: {}", KnnError::Data(DataError::EmptyDataSet))
        }
        Err(e) => println!("   ✗ Unexpected error: {}", e),
    }

    // Example 4: Successful prediction with proper error handling
    println!("\n4. Successful prediction with error handling:");
    let features = array![
        [1.0, 1.0],
        [2.0, 2.0],
        [1.0, 2.0],
        [8.0, 8.0],
        [9.0, 8.0],
        [8.0, 9.0]
    ];
    let labels = array![0, 0, 0, 1, 1, 1];
    let query = array![[2.5, 2.5], [7.5, 8.5]];

    let mut classifier = KnnClassifier::new(3, Metric::Euclidean).expect("k is positive");
    match classifier
        .fit(features.view(), labels.view())
        .and_then(|model| model.predict(query.view()))
    {
        Ok(prediction) => {
            for (row, neighbors) in prediction
                .probabilities
                .rows()
                .into_iter()
                .zip(prediction.neighbors.rows())
            {
                println!("   ✓ Probabilities {} from neighbours {}", row, neighbors);
            }
        }
        Err(e) => println!("   ✗ Prediction failed: {}", e),
    }

    // Example 5: Demonstrate error propagation in a function
    println!("\n5. Error propagation in functions:");

    fn classify_with_error_handling() -> Result<Vec<f64>, KnnError> {
        let features = array![[1.0], [-1.0]];
        let labels = array![1, 0];
        let mut classifier = KnnClassifier::new(1, Metric::Manhattan)?;
        // The query has two columns while the training data has one.
        let prediction = classifier
            .fit(features.view(), labels.view())?
            .predict(array![[0.5, 0.5]].view())?;
        Ok(prediction.probabilities.iter().copied().collect())
    }

    match classify_with_error_handling() {
        Ok(result) => println!("   ✓ Classification result: {:?}", result),
        Err(e) => println!("   ✓ Classification failed as expected: {}", e),
    }

    println!("\n6. Error types and their meanings:");
    println!("   - InvalidK: k cannot be zero for a k-NN classifier");
    println!("   - NotFitted: predict was called before fit");
    println!("   - Data: the feature matrix or labels break the data contract");

    println!("\nAll examples completed successfully!");
}
