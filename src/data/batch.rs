//! Batch data structure

use ndarray::Array2;

/// A mini-batch of examples: one input row per example, one class label
/// per row.
#[derive(Clone, Debug)]
pub struct Batch {
    /// Input features, shape `(batch, features)`
    pub inputs: Array2<f32>,
    /// Class index per row, same length as `inputs.nrows()`
    pub labels: Vec<usize>,
}

impl Batch {
    /// Create a new batch
    ///
    /// # Panics
    ///
    /// Panics if `labels.len()` differs from the number of input rows.
    pub fn new(inputs: Array2<f32>, labels: Vec<usize>) -> Self {
        assert_eq!(
            inputs.nrows(),
            labels.len(),
            "inputs and labels must have equal length"
        );
        Self { inputs, labels }
    }

    /// Number of examples in this batch
    pub fn size(&self) -> usize {
        self.labels.len()
    }

    /// Number of features per example
    pub fn feature_dim(&self) -> usize {
        self.inputs.ncols()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn test_batch_creation() {
        let inputs = arr2(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]);
        let batch = Batch::new(inputs, vec![0, 1, 0]);

        assert_eq!(batch.size(), 3);
        assert_eq!(batch.feature_dim(), 2);
    }

    #[test]
    #[should_panic(expected = "equal length")]
    fn test_batch_length_mismatch_panics() {
        let inputs = arr2(&[[1.0, 2.0], [3.0, 4.0]]);
        Batch::new(inputs, vec![0]);
    }
}
