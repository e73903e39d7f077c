//! Top-k accuracy over prediction logits

use ndarray::{Array2, ArrayView1};

/// Whether `label` ranks among the top `k` scores of `row`.
///
/// The label's rank is the number of entries strictly greater than its
/// own score, so ties do not push the true label out of the top k.
pub fn in_top_k(row: ArrayView1<'_, f32>, label: usize, k: usize) -> bool {
    let target = row[label];
    let ahead = row.iter().filter(|&&v| v > target).count();
    ahead < k
}

/// Fraction of rows whose true label is among the k highest-scored
/// predictions. Returns 0.0 for an empty batch.
///
/// # Panics
///
/// Panics if `labels.len()` differs from the number of logit rows.
pub fn top_k_accuracy(logits: &Array2<f32>, labels: &[usize], k: usize) -> f32 {
    assert_eq!(
        logits.nrows(),
        labels.len(),
        "logits and labels must have equal length"
    );

    if labels.is_empty() {
        return 0.0;
    }

    let hits = logits
        .rows()
        .into_iter()
        .zip(labels.iter())
        .filter(|(row, &label)| in_top_k(row.view(), label, k))
        .count();

    hits as f32 / labels.len() as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn test_top_1_exact_match() {
        let logits = arr2(&[[0.1, 0.7, 0.2], [0.5, 0.3, 0.2]]);
        assert_eq!(top_k_accuracy(&logits, &[1, 0], 1), 1.0);
        assert_eq!(top_k_accuracy(&logits, &[0, 1], 1), 0.0);
    }

    #[test]
    fn test_top_k_widens_the_net() {
        let logits = arr2(&[[0.1, 0.7, 0.2]]);
        // Label 2 is second-best: misses top-1, hits top-2.
        assert_eq!(top_k_accuracy(&logits, &[2], 1), 0.0);
        assert_eq!(top_k_accuracy(&logits, &[2], 2), 1.0);
    }

    #[test]
    fn test_k_at_least_class_count_always_hits() {
        let logits = arr2(&[[0.3, 0.3, 0.4], [0.9, 0.05, 0.05]]);
        assert_eq!(top_k_accuracy(&logits, &[1, 2], 5), 1.0);
    }

    #[test]
    fn test_ties_do_not_evict_the_label() {
        let logits = arr2(&[[0.5, 0.5, 0.0]]);
        // Both tied entries count as top-1 hits.
        assert_eq!(top_k_accuracy(&logits, &[0], 1), 1.0);
        assert_eq!(top_k_accuracy(&logits, &[1], 1), 1.0);
    }

    #[test]
    fn test_empty_batch_is_zero() {
        let logits = Array2::<f32>::zeros((0, 3));
        assert_eq!(top_k_accuracy(&logits, &[], 1), 0.0);
    }

    #[test]
    #[should_panic(expected = "equal length")]
    fn test_length_mismatch_panics() {
        let logits = arr2(&[[0.1, 0.9]]);
        top_k_accuracy(&logits, &[0, 1], 1);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use ndarray::Array2;
    use proptest::prelude::*;

    proptest! {
        /// Accuracy is bounded and monotone in k.
        #[test]
        fn top_k_accuracy_bounded_and_monotone(
            rows in 1usize..20,
            scores in prop::collection::vec(-10.0f32..10.0, 100),
        ) {
            let classes = 5usize;
            let logits = Array2::from_shape_fn((rows, classes), |(i, j)| {
                scores[(i * classes + j) % scores.len()]
            });
            let labels: Vec<usize> = (0..rows).map(|i| i % classes).collect();

            let mut previous = 0.0f32;
            for k in 1..=classes {
                let acc = top_k_accuracy(&logits, &labels, k);
                prop_assert!((0.0..=1.0).contains(&acc));
                prop_assert!(acc >= previous, "accuracy must not shrink as k grows");
                previous = acc;
            }
            // Every label is within the top-`classes` scores.
            prop_assert_eq!(previous, 1.0);
        }
    }
}
