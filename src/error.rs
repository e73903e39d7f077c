//! Error types for training runs
//!
//! There is no retry or partial-epoch recovery: any failure in step
//! evaluation, data feeding, weight restore, or recorder I/O is fatal and
//! propagates up to the caller.

use std::path::PathBuf;
use thiserror::Error;

use crate::data::Split;

/// Result type for training-run operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving a training run
#[derive(Debug, Error)]
pub enum Error {
    /// Step evaluation failed inside the model graph
    #[error("step evaluation failed: {message}")]
    Step { message: String },

    /// A split has no examples to draw a batch from
    #[error("split '{split}' is empty, cannot draw a batch")]
    EmptySplit { split: Split },

    /// Batch feature width does not match the graph
    #[error("batch shape mismatch: graph expects {expected} features, batch has {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Weights file could not be read or written
    #[error("weights file {path}: {source}")]
    WeightsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Weights file exists but does not describe a valid model
    #[error("weights file {path} is not a valid model: {source}")]
    WeightsFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Restored weights disagree with the constructed graph
    #[error("restored weights ({found}) do not fit the graph ({expected})")]
    WeightsMismatch { expected: String, found: String },

    /// Recorder failed to write log or summary output
    #[error("recorder I/O: {0}")]
    Recorder(#[from] std::io::Error),
}
