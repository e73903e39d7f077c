//! The epoch orchestrator
//!
//! One [`Runner`] drives a whole run: per epoch, a training pass
//! followed by the two validation passes, every step a blocking call
//! into the shared session. There is no state machine beyond the linear
//! epoch counter, and no retry: the first error ends the run.

use std::time::Instant;

use super::config::EpochRange;
use super::mode::ModeFlags;
use super::result::RunResult;
use crate::data::{DatasetProvider, Split};
use crate::error::Result;
use crate::metrics::RunningMean;
use crate::record::{Recorder, StepContext, ValidationContext};
use crate::session::Session;

/// Per-split step counts for one epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpochPlan {
    /// Training steps per epoch
    pub training_steps: usize,
    /// Standard validation steps per epoch
    pub validation_steps: usize,
    /// Non-blacklisted validation steps per epoch
    pub nbl_validation_steps: usize,
}

impl EpochPlan {
    /// Read the per-split sizing from a dataset provider
    pub fn from_provider(provider: &dyn DatasetProvider) -> Self {
        Self {
            training_steps: provider.num_batches_per_epoch(Split::Train),
            validation_steps: provider.num_batches_per_epoch(Split::Validation),
            nbl_validation_steps: provider
                .num_batches_per_epoch(Split::NonBlacklistedValidation),
        }
    }
}

/// Drives training and validation passes against one session and one
/// recorder.
pub struct Runner {
    session: Session,
    recorder: Box<dyn Recorder>,
    plan: EpochPlan,
}

impl Runner {
    /// Create a runner over an opened session
    pub fn new(session: Session, recorder: Box<dyn Recorder>, plan: EpochPlan) -> Self {
        Self {
            session,
            recorder,
            plan,
        }
    }

    /// The shared session, read-only
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Execute one training pass of `plan.training_steps` steps.
    ///
    /// Each step notifies the recorder before and after evaluating the
    /// optimizer-apply + loss operations under training flags; the pass
    /// ends with a `train_end` notification carrying the final global
    /// step and final loss. Returns the final step's loss (zero for a
    /// zero-step pass).
    pub fn train_pass(&mut self, epoch: usize) -> Result<f32> {
        let modes = ModeFlags::training();
        let steps = self.plan.training_steps;
        let mut final_loss = 0.0;

        for step in 0..steps {
            self.recorder.train_step_begin(step)?;

            let options = self.recorder.run_options(self.session.global_step());
            let output = self.session.run_train_step(modes, options)?;
            final_loss = output.loss;

            self.recorder.train_step_end(&StepContext {
                epoch,
                step,
                steps_per_epoch: steps,
                global_step: self.session.global_step(),
                loss: output.loss,
                learning_rate: self.session.learning_rate(),
                modes,
                trace: output.trace,
            })?;
        }

        self.recorder
            .train_end(epoch, self.session.global_step(), final_loss)?;

        Ok(final_loss)
    }

    /// Execute one validation pass over the standard or non-blacklisted
    /// split.
    ///
    /// Loss and top-1/top-5 accuracy are folded into fresh running
    /// means; after the last step the averages go to the recorder. A
    /// zero-step pass reports exact zeros, which is defined behavior,
    /// not an error. No parameter update happens and the global step
    /// counter does not move.
    pub fn validation_pass(
        &mut self,
        epoch: usize,
        non_blacklisted: bool,
    ) -> Result<ValidationContext> {
        let (modes, steps) = if non_blacklisted {
            (
                ModeFlags::non_blacklisted_validation(),
                self.plan.nbl_validation_steps,
            )
        } else {
            (ModeFlags::validation(), self.plan.validation_steps)
        };

        let mut loss = RunningMean::new();
        let mut top1 = RunningMean::new();
        let mut top5 = RunningMean::new();

        for step in 0..steps {
            self.recorder.validation_step_begin(step, steps)?;

            let output = self.session.run_eval_step(modes)?;
            loss.push(f64::from(output.loss));
            top1.push(f64::from(output.top1));
            top5.push(f64::from(output.top5));
        }

        let ctx = ValidationContext {
            epoch,
            global_step: self.session.global_step(),
            non_blacklisted,
            loss: loss.mean() as f32,
            learning_rate: self.session.learning_rate(),
            top1: top1.mean() as f32,
            top5: top5.mean() as f32,
            steps,
        };
        self.recorder.validation_end(&ctx)?;

        Ok(ctx)
    }

    /// Run every epoch in `epochs`: training pass, standard validation
    /// pass, non-blacklisted validation pass, in that fixed order.
    pub fn run(&mut self, epochs: EpochRange) -> Result<RunResult> {
        let started = Instant::now();

        self.recorder.session_opened(
            &self.session.graph_description(),
            self.session.global_step(),
        )?;

        let mut epochs_run = 0;
        let mut final_train_loss = 0.0;

        for epoch in epochs.iter() {
            final_train_loss = self.train_pass(epoch)?;
            self.validation_pass(epoch, false)?;
            self.validation_pass(epoch, true)?;
            epochs_run += 1;
        }

        Ok(RunResult {
            epochs_run,
            final_global_step: self.session.global_step(),
            final_train_loss,
            elapsed_secs: started.elapsed().as_secs_f64(),
        })
    }

    /// Tear down: close the recorder's files, then the session.
    pub fn finish(self) -> Result<()> {
        let Runner {
            session,
            mut recorder,
            ..
        } = self;
        recorder.close()?;
        session.close();
        Ok(())
    }
}
