//! Linear softmax reference graph
//!
//! A single dense layer with softmax cross-entropy loss and plain SGD
//! updates. Small enough to reason about, real enough to drive full
//! training runs against a [`DatasetProvider`].

use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::time::Instant;

use super::{EvalStepOutput, ModelGraph, RunOptions, StepTrace, TrainStepOutput};
use crate::data::{Batch, DatasetProvider};
use crate::error::{Error, Result};
use crate::metrics::top_k_accuracy;
use crate::train::ModeFlags;

/// Probabilities are clamped here before the log so a confidently wrong
/// prediction yields a large finite loss instead of infinity.
const PROB_FLOOR: f32 = 1e-12;

/// Serialized form of the graph parameters.
#[derive(Debug, Serialize, Deserialize)]
struct LinearWeights {
    feature_dim: usize,
    num_classes: usize,
    weights: Vec<f32>,
    biases: Vec<f32>,
}

/// One dense layer + softmax cross-entropy over a provider's feeds.
pub struct LinearSoftmaxGraph {
    provider: Box<dyn DatasetProvider>,
    /// Shape `(features, classes)`
    weights: Array2<f32>,
    /// One bias per class
    biases: Array1<f32>,
    learning_rate: f32,
    feature_dim: usize,
    num_classes: usize,
}

impl LinearSoftmaxGraph {
    /// Build a freshly initialized graph over `provider`.
    ///
    /// Weights use Glorot-uniform initialization from a seeded RNG, so
    /// the same seed reproduces the same starting point.
    pub fn new(
        provider: Box<dyn DatasetProvider>,
        feature_dim: usize,
        learning_rate: f32,
        seed: u64,
    ) -> Self {
        let num_classes = provider.num_classes();
        let mut rng = StdRng::seed_from_u64(seed);
        let limit = (6.0 / (feature_dim + num_classes) as f32).sqrt();
        let weights =
            Array2::from_shape_fn((feature_dim, num_classes), |_| rng.gen_range(-limit..limit));
        let biases = Array1::zeros(num_classes);

        Self {
            provider,
            weights,
            biases,
            learning_rate,
            feature_dim,
            num_classes,
        }
    }

    /// Serialize parameters to a pretty-printed JSON weights file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let snapshot = LinearWeights {
            feature_dim: self.feature_dim,
            num_classes: self.num_classes,
            weights: self.weights.iter().copied().collect(),
            biases: self.biases.to_vec(),
        };
        let file = File::create(path).map_err(|source| Error::WeightsIo {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::to_writer_pretty(BufWriter::new(file), &snapshot).map_err(|source| {
            Error::WeightsFormat {
                path: path.to_path_buf(),
                source,
            }
        })
    }

    fn next_batch(&mut self, modes: ModeFlags) -> Result<Batch> {
        let batch = self.provider.next_batch(modes.split())?;
        if batch.feature_dim() != self.feature_dim {
            return Err(Error::ShapeMismatch {
                expected: self.feature_dim,
                actual: batch.feature_dim(),
            });
        }
        Ok(batch)
    }

    /// Logits for a batch: `x · W + b`
    fn logits(&self, inputs: &Array2<f32>) -> Array2<f32> {
        inputs.dot(&self.weights) + &self.biases
    }

    /// Row-wise softmax, shifted by the row max for stability.
    fn softmax(logits: &Array2<f32>) -> Array2<f32> {
        let mut probs = logits.clone();
        for mut row in probs.rows_mut() {
            let max = row.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
            row.mapv_inplace(|v| (v - max).exp());
            let sum = row.sum();
            row.mapv_inplace(|v| v / sum);
        }
        probs
    }

    /// Mean cross-entropy of `probs` against integer labels.
    fn cross_entropy(probs: &Array2<f32>, labels: &[usize]) -> f32 {
        let total: f32 = labels
            .iter()
            .enumerate()
            .map(|(row, &label)| -probs[[row, label]].max(PROB_FLOOR).ln())
            .sum();
        total / labels.len() as f32
    }
}

impl ModelGraph for LinearSoftmaxGraph {
    fn description(&self) -> String {
        format!(
            "linear-softmax: {} features -> {} classes, sgd lr={}",
            self.feature_dim, self.num_classes, self.learning_rate
        )
    }

    fn learning_rate(&self) -> f32 {
        self.learning_rate
    }

    fn train_step(&mut self, modes: ModeFlags, options: RunOptions) -> Result<TrainStepOutput> {
        let batch = self.next_batch(modes)?;
        let started = options.trace_compute_time.then(Instant::now);

        let logits = self.logits(&batch.inputs);
        let probs = Self::softmax(&logits);
        let loss = Self::cross_entropy(&probs, &batch.labels);
        if !loss.is_finite() {
            return Err(Error::Step {
                message: format!("non-finite training loss {loss}"),
            });
        }

        // Softmax + cross-entropy gradient: (p - onehot) / batch.
        let mut d_logits = probs;
        let inv_batch = 1.0 / batch.size() as f32;
        for (row, &label) in batch.labels.iter().enumerate() {
            d_logits[[row, label]] -= 1.0;
        }
        d_logits.mapv_inplace(|v| v * inv_batch);

        let w_grad = batch.inputs.t().dot(&d_logits);
        let b_grad = d_logits.sum_axis(Axis(0));
        self.weights.scaled_add(-self.learning_rate, &w_grad);
        self.biases.scaled_add(-self.learning_rate, &b_grad);

        let trace = started.map(|t| StepTrace {
            compute_time: t.elapsed(),
        });

        Ok(TrainStepOutput { loss, trace })
    }

    fn eval_step(&mut self, modes: ModeFlags) -> Result<EvalStepOutput> {
        let batch = self.next_batch(modes)?;

        let logits = self.logits(&batch.inputs);
        let probs = Self::softmax(&logits);
        let loss = Self::cross_entropy(&probs, &batch.labels);
        let top1 = top_k_accuracy(&logits, &batch.labels, 1);
        let top5 = top_k_accuracy(&logits, &batch.labels, 5);

        Ok(EvalStepOutput { loss, top1, top5 })
    }

    fn restore(&mut self, path: &Path) -> Result<()> {
        let file = File::open(path).map_err(|source| Error::WeightsIo {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot: LinearWeights =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| {
                Error::WeightsFormat {
                    path: path.to_path_buf(),
                    source,
                }
            })?;

        if snapshot.feature_dim != self.feature_dim || snapshot.num_classes != self.num_classes {
            return Err(Error::WeightsMismatch {
                expected: format!("{}x{}", self.feature_dim, self.num_classes),
                found: format!("{}x{}", snapshot.feature_dim, snapshot.num_classes),
            });
        }

        self.weights = Array2::from_shape_vec(
            (snapshot.feature_dim, snapshot.num_classes),
            snapshot.weights,
        )
        .map_err(|_| Error::WeightsMismatch {
            expected: format!("{}x{}", self.feature_dim, self.num_classes),
            found: "weight vector of the wrong length".into(),
        })?;
        self.biases = Array1::from_vec(snapshot.biases);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{SyntheticConfig, SyntheticDataset};

    fn test_graph() -> LinearSoftmaxGraph {
        let config = SyntheticConfig {
            num_classes: 4,
            feature_dim: 8,
            batch_size: 16,
            train_batches: 10,
            validation_batches: 4,
            blacklisted_fraction: 0.25,
            seed: 11,
        };
        let provider = Box::new(SyntheticDataset::new(config));
        LinearSoftmaxGraph::new(provider, 8, 0.5, 3)
    }

    #[test]
    fn test_train_step_reduces_loss_over_time() {
        let mut graph = test_graph();
        let modes = ModeFlags::training();

        let first = graph.train_step(modes, RunOptions::default()).unwrap();
        let mut last = first.loss;
        for _ in 0..100 {
            last = graph.train_step(modes, RunOptions::default()).unwrap().loss;
        }

        assert!(first.loss.is_finite());
        assert!(last.is_finite());
        // Separable clusters and a hundred SGD steps: loss must drop.
        assert!(last < first.loss);
    }

    #[test]
    fn test_trace_only_when_requested() {
        let mut graph = test_graph();
        let modes = ModeFlags::training();

        let untraced = graph.train_step(modes, RunOptions::default()).unwrap();
        assert!(untraced.trace.is_none());

        let traced = graph
            .train_step(
                modes,
                RunOptions {
                    trace_compute_time: true,
                },
            )
            .unwrap();
        assert!(traced.trace.is_some());
    }

    #[test]
    fn test_eval_step_outputs_are_bounded() {
        let mut graph = test_graph();
        let out = graph.eval_step(ModeFlags::validation()).unwrap();

        assert!(out.loss.is_finite());
        assert!((0.0..=1.0).contains(&out.top1));
        assert!((0.0..=1.0).contains(&out.top5));
        assert!(out.top5 >= out.top1);
    }

    #[test]
    fn test_eval_step_does_not_update_parameters() {
        let mut graph = test_graph();
        let before = graph.weights.clone();
        graph.eval_step(ModeFlags::validation()).unwrap();
        assert_eq!(graph.weights, before);
    }

    #[test]
    fn test_save_restore_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weights.json");

        let mut trained = test_graph();
        for _ in 0..20 {
            trained
                .train_step(ModeFlags::training(), RunOptions::default())
                .unwrap();
        }
        trained.save(&path).unwrap();

        let mut fresh = test_graph();
        assert_ne!(fresh.weights, trained.weights);
        fresh.restore(&path).unwrap();
        assert_eq!(fresh.weights, trained.weights);
        assert_eq!(fresh.biases, trained.biases);
    }

    #[test]
    fn test_restore_rejects_mismatched_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weights.json");
        test_graph().save(&path).unwrap();

        let config = SyntheticConfig {
            num_classes: 2,
            feature_dim: 3,
            batch_size: 4,
            train_batches: 2,
            validation_batches: 1,
            blacklisted_fraction: 0.0,
            seed: 1,
        };
        let provider = Box::new(SyntheticDataset::new(config));
        let mut other = LinearSoftmaxGraph::new(provider, 3, 0.1, 1);

        let err = other.restore(&path).unwrap_err();
        assert!(matches!(err, Error::WeightsMismatch { .. }));
    }

    #[test]
    fn test_restore_missing_file_is_io_error() {
        let mut graph = test_graph();
        let err = graph.restore(Path::new("/nonexistent/weights.json")).unwrap_err();
        assert!(matches!(err, Error::WeightsIo { .. }));
    }
}
