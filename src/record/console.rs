//! Console progress recorder

use super::traits::{Recorder, StepContext, ValidationContext};
use crate::cli::LogLevel;
use crate::error::Result;

/// Prints run progress to stdout.
///
/// Step lines appear every `log_interval` steps; epoch and validation
/// summaries always appear. `LogLevel::Quiet` suppresses everything.
pub struct ConsoleRecorder {
    level: LogLevel,
    log_interval: usize,
}

impl ConsoleRecorder {
    /// Create a console recorder logging every `log_interval` steps
    pub fn new(level: LogLevel, log_interval: usize) -> Self {
        Self {
            level,
            log_interval: log_interval.max(1),
        }
    }

    fn enabled(&self) -> bool {
        self.level != LogLevel::Quiet
    }
}

impl Default for ConsoleRecorder {
    fn default() -> Self {
        Self::new(LogLevel::Normal, 10)
    }
}

impl Recorder for ConsoleRecorder {
    fn log_msg(&mut self, msg: &str) -> Result<()> {
        if self.enabled() {
            println!("{msg}");
        }
        Ok(())
    }

    fn session_opened(&mut self, graph_description: &str, global_step: u64) -> Result<()> {
        if self.enabled() {
            println!("Session open: {graph_description} (global step {global_step})");
        }
        Ok(())
    }

    fn train_step_end(&mut self, ctx: &StepContext) -> Result<()> {
        if self.enabled() && ctx.step > 0 && ctx.step.is_multiple_of(self.log_interval) {
            println!(
                "  Step {}/{}: loss: {:.4}, lr: {:.2e}",
                ctx.step, ctx.steps_per_epoch, ctx.loss, ctx.learning_rate
            );
        }
        Ok(())
    }

    fn train_end(&mut self, epoch: usize, global_step: u64, final_loss: f32) -> Result<()> {
        if self.enabled() {
            println!("Epoch {epoch}: loss: {final_loss:.4} (global step {global_step})");
        }
        Ok(())
    }

    fn validation_end(&mut self, ctx: &ValidationContext) -> Result<()> {
        if self.enabled() {
            let variant = if ctx.non_blacklisted {
                "validation (non-blacklisted)"
            } else {
                "validation"
            };
            println!(
                "Epoch {}: {}: loss: {:.4}, top-1: {:.4}, top-5: {:.4} ({} steps)",
                ctx.epoch, variant, ctx.loss, ctx.top1, ctx.top5, ctx.steps
            );
        }
        Ok(())
    }
}
