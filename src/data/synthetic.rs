//! Synthetic classification data for demos and tests
//!
//! Generates deterministic Gaussian-ish class clusters: each class gets a
//! fixed center in feature space and examples are drawn as center plus
//! uniform noise. A configurable fraction of the validation split is
//! marked blacklisted; the non-blacklisted split is the remainder.

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{Batch, DatasetProvider, Split};
use crate::error::{Error, Result};

/// Shape of the synthetic feed.
#[derive(Debug, Clone)]
pub struct SyntheticConfig {
    /// Number of target classes
    pub num_classes: usize,
    /// Features per example
    pub feature_dim: usize,
    /// Examples per batch
    pub batch_size: usize,
    /// Training batches per epoch
    pub train_batches: usize,
    /// Validation batches per epoch
    pub validation_batches: usize,
    /// Fraction of validation examples marked blacklisted
    pub blacklisted_fraction: f64,
    /// RNG seed; same seed, same data
    pub seed: u64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            num_classes: 10,
            feature_dim: 64,
            batch_size: 32,
            train_batches: 50,
            validation_batches: 10,
            blacklisted_fraction: 0.25,
            seed: 42,
        }
    }
}

/// One split's examples plus a cycling cursor.
struct Pool {
    examples: Vec<(Vec<f32>, usize)>,
    cursor: usize,
}

impl Pool {
    fn new(examples: Vec<(Vec<f32>, usize)>) -> Self {
        Self {
            examples,
            cursor: 0,
        }
    }
}

/// In-memory synthetic dataset implementing [`DatasetProvider`].
///
/// All three splits are materialized up front, so epoch sizing is exact
/// and batches repeat deterministically across epochs.
pub struct SyntheticDataset {
    config: SyntheticConfig,
    train: Pool,
    validation: Pool,
    non_blacklisted: Pool,
}

impl SyntheticDataset {
    /// Generate a dataset from `config`.
    pub fn new(config: SyntheticConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);

        // Fixed class centers, spread over [-1, 1] per dimension.
        let centers: Vec<Vec<f32>> = (0..config.num_classes)
            .map(|_| {
                (0..config.feature_dim)
                    .map(|_| rng.gen_range(-1.0..1.0))
                    .collect()
            })
            .collect();

        let mut draw = |rng: &mut StdRng, count: usize| -> Vec<(Vec<f32>, usize)> {
            (0..count)
                .map(|i| {
                    let label = i % config.num_classes.max(1);
                    let row = centers[label]
                        .iter()
                        .map(|&c| c + rng.gen_range(-0.3..0.3))
                        .collect();
                    (row, label)
                })
                .collect()
        };

        let train = draw(&mut rng, config.train_batches * config.batch_size);
        let validation = draw(&mut rng, config.validation_batches * config.batch_size);

        // Blacklist a fraction of the validation examples; the
        // non-blacklisted split is whatever survives the filter.
        let non_blacklisted: Vec<(Vec<f32>, usize)> = validation
            .iter()
            .filter(|_| !rng.gen_bool(config.blacklisted_fraction))
            .cloned()
            .collect();

        Self {
            config,
            train: Pool::new(train),
            validation: Pool::new(validation),
            non_blacklisted: Pool::new(non_blacklisted),
        }
    }

    fn pool_mut(&mut self, split: Split) -> &mut Pool {
        match split {
            Split::Train => &mut self.train,
            Split::Validation => &mut self.validation,
            Split::NonBlacklistedValidation => &mut self.non_blacklisted,
        }
    }

    fn pool(&self, split: Split) -> &Pool {
        match split {
            Split::Train => &self.train,
            Split::Validation => &self.validation,
            Split::NonBlacklistedValidation => &self.non_blacklisted,
        }
    }
}

impl DatasetProvider for SyntheticDataset {
    fn num_classes(&self) -> usize {
        self.config.num_classes
    }

    fn num_batches_per_epoch(&self, split: Split) -> usize {
        self.pool(split).examples.len() / self.config.batch_size.max(1)
    }

    fn next_batch(&mut self, split: Split) -> Result<Batch> {
        let batch_size = self.config.batch_size;
        let feature_dim = self.config.feature_dim;
        let pool = self.pool_mut(split);

        if pool.examples.is_empty() {
            return Err(Error::EmptySplit { split });
        }

        let mut inputs = Array2::<f32>::zeros((batch_size, feature_dim));
        let mut labels = Vec::with_capacity(batch_size);

        for i in 0..batch_size {
            let (row, label) = &pool.examples[pool.cursor];
            for (j, &v) in row.iter().enumerate() {
                inputs[[i, j]] = v;
            }
            labels.push(*label);
            pool.cursor = (pool.cursor + 1) % pool.examples.len();
        }

        Ok(Batch::new(inputs, labels))
    }
}
