//! Execution context for a training run
//!
//! [`Session`] is the explicitly constructed, explicitly passed execution
//! context: it owns the model graph and the global step counter, and is
//! the only path through which step operations run. Construction either
//! fresh-initializes the graph or restores it from a weights file;
//! teardown is a consuming [`Session::close`].

use std::path::Path;

use crate::error::Result;
use crate::graph::{EvalStepOutput, ModelGraph, RunOptions, TrainStepOutput};
use crate::train::ModeFlags;

/// Shared execution context for all passes of a run.
///
/// The global step counter is owned here and advanced only by training
/// steps; callers read it through [`Session::global_step`] and never
/// mutate it directly. Graph state is mutated only through the two step
/// operations, so a run needs no locking of its own.
pub struct Session {
    graph: Box<dyn ModelGraph>,
    global_step: u64,
}

impl Session {
    /// Open a session over `graph`.
    ///
    /// When `weights_file` is given the graph's parameters are restored
    /// from it; otherwise the graph keeps its fresh initialization.
    pub fn open(mut graph: Box<dyn ModelGraph>, weights_file: Option<&Path>) -> Result<Session> {
        if let Some(path) = weights_file {
            graph.restore(path)?;
        }
        Ok(Session {
            graph,
            global_step: 0,
        })
    }

    /// Current global step; monotonically non-decreasing
    pub fn global_step(&self) -> u64 {
        self.global_step
    }

    /// Current learning rate of the graph's optimizer
    pub fn learning_rate(&self) -> f32 {
        self.graph.learning_rate()
    }

    /// Architecture summary of the underlying graph
    pub fn graph_description(&self) -> String {
        self.graph.description()
    }

    /// Evaluate one optimizer-apply + loss step and advance the global
    /// step counter.
    pub fn run_train_step(
        &mut self,
        modes: ModeFlags,
        options: RunOptions,
    ) -> Result<TrainStepOutput> {
        let output = self.graph.train_step(modes, options)?;
        self.global_step += 1;
        Ok(output)
    }

    /// Evaluate one loss + accuracy step. The global step counter is not
    /// advanced: only training steps move it.
    pub fn run_eval_step(&mut self, modes: ModeFlags) -> Result<EvalStepOutput> {
        self.graph.eval_step(modes)
    }

    /// Tear the session down, releasing the graph and its data feeds.
    pub fn close(self) {
        drop(self.graph);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::graph::StepTrace;

    /// Graph stub returning fixed outputs, optionally failing train steps.
    struct StubGraph {
        fail_train: bool,
    }

    impl StubGraph {
        fn new() -> Self {
            Self { fail_train: false }
        }
    }

    impl ModelGraph for StubGraph {
        fn description(&self) -> String {
            "stub graph".into()
        }

        fn learning_rate(&self) -> f32 {
            0.01
        }

        fn train_step(
            &mut self,
            _modes: ModeFlags,
            options: RunOptions,
        ) -> Result<TrainStepOutput> {
            if self.fail_train {
                return Err(Error::Step {
                    message: "stub failure".into(),
                });
            }
            Ok(TrainStepOutput {
                loss: 1.0,
                trace: options.trace_compute_time.then(|| StepTrace {
                    compute_time: std::time::Duration::from_millis(1),
                }),
            })
        }

        fn eval_step(&mut self, _modes: ModeFlags) -> Result<EvalStepOutput> {
            Ok(EvalStepOutput {
                loss: 0.5,
                top1: 0.9,
                top5: 1.0,
            })
        }

        fn restore(&mut self, _path: &Path) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_train_steps_advance_global_step() {
        let mut session = Session::open(Box::new(StubGraph::new()), None).unwrap();
        assert_eq!(session.global_step(), 0);

        for expected in 1..=5 {
            session
                .run_train_step(ModeFlags::training(), RunOptions::default())
                .unwrap();
            assert_eq!(session.global_step(), expected);
        }
    }

    #[test]
    fn test_eval_steps_leave_global_step_alone() {
        let mut session = Session::open(Box::new(StubGraph::new()), None).unwrap();
        session
            .run_train_step(ModeFlags::training(), RunOptions::default())
            .unwrap();

        for _ in 0..3 {
            session.run_eval_step(ModeFlags::validation()).unwrap();
        }
        assert_eq!(session.global_step(), 1);
    }

    #[test]
    fn test_failed_train_step_does_not_advance() {
        let mut graph = StubGraph::new();
        graph.fail_train = true;
        let mut session = Session::open(Box::new(graph), None).unwrap();

        let err = session
            .run_train_step(ModeFlags::training(), RunOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::Step { .. }));
        assert_eq!(session.global_step(), 0);
    }

    #[test]
    fn test_session_exposes_graph_metadata() {
        let session = Session::open(Box::new(StubGraph::new()), None).unwrap();
        assert_eq!(session.graph_description(), "stub graph");
        assert_eq!(session.learning_rate(), 0.01);
        session.close();
    }
}
