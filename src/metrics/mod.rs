//! Metric aggregation for validation passes
//!
//! - [`RunningMean`] - incremental arithmetic mean, the accumulator used
//!   for per-pass loss and accuracy averaging
//! - [`top_k_accuracy`] - fraction of examples whose true label is among
//!   the k highest-scored predictions

mod running;
mod topk;

pub use running::RunningMean;
pub use topk::{in_top_k, top_k_accuracy};
