//! Core trait and context types for the recorder system

use crate::error::Result;
use crate::graph::{RunOptions, StepTrace};
use crate::train::ModeFlags;

/// Snapshot of one completed training step, handed to
/// [`Recorder::train_step_end`].
#[derive(Debug, Clone, Copy)]
pub struct StepContext {
    /// 1-based epoch number
    pub epoch: usize,
    /// Zero-based step index within the pass
    pub step: usize,
    /// Total steps in this pass
    pub steps_per_epoch: usize,
    /// Global step counter after this step
    pub global_step: u64,
    /// Scalar loss of this step
    pub loss: f32,
    /// Learning rate in effect for this step
    pub learning_rate: f32,
    /// Mode flags the step ran under
    pub modes: ModeFlags,
    /// Compute-time metadata when the step was traced
    pub trace: Option<StepTrace>,
}

/// Summary of one completed validation pass, handed to
/// [`Recorder::validation_end`].
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext {
    /// 1-based epoch number
    pub epoch: usize,
    /// Global step counter at pass end
    pub global_step: u64,
    /// Whether this was the non-blacklisted variant
    pub non_blacklisted: bool,
    /// Averaged loss over the pass; zero for an empty pass
    pub loss: f32,
    /// Learning rate in effect during the pass
    pub learning_rate: f32,
    /// Averaged top-1 accuracy; zero for an empty pass
    pub top1: f32,
    /// Averaged top-5 accuracy; zero for an empty pass
    pub top5: f32,
    /// Number of steps the pass ran
    pub steps: usize,
}

/// Lifecycle observer for a training run.
///
/// Implement this trait to receive orchestration events. All methods
/// have default implementations, so a recorder only implements the hooks
/// it needs. Mutating hooks return `Result` because recorder I/O
/// failures terminate the run; `run_options` is a pure read.
pub trait Recorder {
    /// Free-form status message from the orchestrator or wiring
    fn log_msg(&mut self, _msg: &str) -> Result<()> {
        Ok(())
    }

    /// Called once when the session opens, with the graph summary and
    /// the initial global step (nonzero after a weights restore)
    fn session_opened(&mut self, _graph_description: &str, _global_step: u64) -> Result<()> {
        Ok(())
    }

    /// Execution options for the step about to run at `global_step`
    fn run_options(&self, _global_step: u64) -> RunOptions {
        RunOptions::default()
    }

    /// Called before each training step with its zero-based index
    fn train_step_begin(&mut self, _step: usize) -> Result<()> {
        Ok(())
    }

    /// Called after each training step
    fn train_step_end(&mut self, _ctx: &StepContext) -> Result<()> {
        Ok(())
    }

    /// Called after a full training pass with the final step counter and
    /// final loss
    fn train_end(&mut self, _epoch: usize, _global_step: u64, _final_loss: f32) -> Result<()> {
        Ok(())
    }

    /// Called before each validation step with its index and the pass
    /// length
    fn validation_step_begin(&mut self, _step: usize, _steps: usize) -> Result<()> {
        Ok(())
    }

    /// Called after a full validation pass with the averaged metrics
    fn validation_end(&mut self, _ctx: &ValidationContext) -> Result<()> {
        Ok(())
    }

    /// Flush and close any files; called once after the last epoch
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}
