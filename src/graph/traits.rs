//! Core trait and step output types for model graphs

use std::path::Path;
use std::time::Duration;

use crate::error::Result;
use crate::train::ModeFlags;

/// Per-step execution options, handed out by the recorder.
///
/// Mirrors the profiling side-channel of the original session API: when
/// `trace_compute_time` is set the graph measures the step and returns a
/// [`StepTrace`] alongside its outputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Measure and report compute time for this step
    pub trace_compute_time: bool,
}

/// Compute-time metadata for one traced step
#[derive(Debug, Clone, Copy)]
pub struct StepTrace {
    /// Wall-clock time spent evaluating the step operations
    pub compute_time: Duration,
}

/// Output of one optimizer-apply + loss evaluation
#[derive(Debug, Clone, Copy)]
pub struct TrainStepOutput {
    /// Scalar training loss for this step
    pub loss: f32,
    /// Present when the step was traced
    pub trace: Option<StepTrace>,
}

/// Output of one loss + accuracy evaluation
#[derive(Debug, Clone, Copy)]
pub struct EvalStepOutput {
    /// Scalar validation loss for this step
    pub loss: f32,
    /// Top-1 accuracy over the step's batch, in [0, 1]
    pub top1: f32,
    /// Top-5 accuracy over the step's batch, in [0, 1]
    pub top5: f32,
}

/// The model graph contract consumed by the execution context.
///
/// A graph owns its data feeds and parameters. The two step operations
/// are blocking synchronous calls; mode flags select the data path, and
/// only `train_step` may mutate parameters.
pub trait ModelGraph {
    /// Human-readable architecture summary, attached to the recorder at
    /// session open
    fn description(&self) -> String;

    /// Current learning rate of the underlying optimizer
    fn learning_rate(&self) -> f32;

    /// Evaluate the optimizer-apply and loss operations for one step
    fn train_step(&mut self, modes: ModeFlags, options: RunOptions) -> Result<TrainStepOutput>;

    /// Evaluate loss and top-1/top-5 accuracy for one step without any
    /// parameter update
    fn eval_step(&mut self, modes: ModeFlags) -> Result<EvalStepOutput>;

    /// Replace parameters with the contents of a weights file
    fn restore(&mut self, path: &Path) -> Result<()>;
}
