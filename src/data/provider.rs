//! Dataset provider trait

use super::{Batch, Split};
use crate::error::Result;

/// Supplies epoch sizing and input batches for the three logical splits.
///
/// The orchestrator calls `num_batches_per_epoch` once per split to size
/// its passes, then pulls exactly that many batches per pass via
/// `next_batch`. Providers are expected to cycle: after a full epoch's
/// worth of batches, the next call starts the split over.
///
/// Providers may prefetch on background threads internally; each
/// `next_batch` call is a blocking synchronous boundary and the
/// orchestrator neither observes nor coordinates any such concurrency.
pub trait DatasetProvider {
    /// Number of target classes
    fn num_classes(&self) -> usize;

    /// Number of batches that make up one epoch over `split`
    fn num_batches_per_epoch(&self, split: Split) -> usize;

    /// Produce the next batch for `split`, cycling at epoch boundaries
    fn next_batch(&mut self, split: Split) -> Result<Batch>;
}
