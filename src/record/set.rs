//! Fan-out over multiple recorders

use super::traits::{Recorder, StepContext, ValidationContext};
use crate::error::Result;
use crate::graph::RunOptions;

/// Dispatches every event to a list of recorders in registration order.
///
/// The first hook error aborts the dispatch and propagates, matching the
/// fail-fast error model of the run itself. `run_options` merges the
/// member options: a step is traced if any member asks for tracing.
pub struct RecorderSet {
    recorders: Vec<Box<dyn Recorder>>,
}

impl RecorderSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self {
            recorders: Vec::new(),
        }
    }

    /// Add a recorder
    pub fn add<R: Recorder + 'static>(&mut self, recorder: R) {
        self.recorders.push(Box::new(recorder));
    }

    /// Whether no recorders are registered
    pub fn is_empty(&self) -> bool {
        self.recorders.is_empty()
    }

    /// Number of registered recorders
    pub fn len(&self) -> usize {
        self.recorders.len()
    }
}

impl Default for RecorderSet {
    fn default() -> Self {
        Self::new()
    }
}

impl Recorder for RecorderSet {
    fn log_msg(&mut self, msg: &str) -> Result<()> {
        for rec in &mut self.recorders {
            rec.log_msg(msg)?;
        }
        Ok(())
    }

    fn session_opened(&mut self, graph_description: &str, global_step: u64) -> Result<()> {
        for rec in &mut self.recorders {
            rec.session_opened(graph_description, global_step)?;
        }
        Ok(())
    }

    fn run_options(&self, global_step: u64) -> RunOptions {
        let mut merged = RunOptions::default();
        for rec in &self.recorders {
            let options = rec.run_options(global_step);
            merged.trace_compute_time |= options.trace_compute_time;
        }
        merged
    }

    fn train_step_begin(&mut self, step: usize) -> Result<()> {
        for rec in &mut self.recorders {
            rec.train_step_begin(step)?;
        }
        Ok(())
    }

    fn train_step_end(&mut self, ctx: &StepContext) -> Result<()> {
        for rec in &mut self.recorders {
            rec.train_step_end(ctx)?;
        }
        Ok(())
    }

    fn train_end(&mut self, epoch: usize, global_step: u64, final_loss: f32) -> Result<()> {
        for rec in &mut self.recorders {
            rec.train_end(epoch, global_step, final_loss)?;
        }
        Ok(())
    }

    fn validation_step_begin(&mut self, step: usize, steps: usize) -> Result<()> {
        for rec in &mut self.recorders {
            rec.validation_step_begin(step, steps)?;
        }
        Ok(())
    }

    fn validation_end(&mut self, ctx: &ValidationContext) -> Result<()> {
        for rec in &mut self.recorders {
            rec.validation_end(ctx)?;
        }
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        for rec in &mut self.recorders {
            rec.close()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Recorder stub that appends event names to a shared log.
    struct Logging {
        tag: &'static str,
        events: Rc<RefCell<Vec<String>>>,
        trace: bool,
    }

    impl Recorder for Logging {
        fn log_msg(&mut self, msg: &str) -> Result<()> {
            self.events.borrow_mut().push(format!("{}:{}", self.tag, msg));
            Ok(())
        }

        fn run_options(&self, _global_step: u64) -> RunOptions {
            RunOptions {
                trace_compute_time: self.trace,
            }
        }
    }

    #[test]
    fn test_events_fan_out_in_registration_order() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut set = RecorderSet::new();
        set.add(Logging {
            tag: "a",
            events: Rc::clone(&events),
            trace: false,
        });
        set.add(Logging {
            tag: "b",
            events: Rc::clone(&events),
            trace: false,
        });

        assert_eq!(set.len(), 2);
        set.log_msg("hello").unwrap();
        assert_eq!(*events.borrow(), vec!["a:hello", "b:hello"]);
    }

    #[test]
    fn test_run_options_merge_traces() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut set = RecorderSet::new();
        set.add(Logging {
            tag: "quiet",
            events: Rc::clone(&events),
            trace: false,
        });
        assert!(!set.run_options(0).trace_compute_time);

        set.add(Logging {
            tag: "tracer",
            events,
            trace: true,
        });
        assert!(set.run_options(0).trace_compute_time);
    }

    #[test]
    fn test_first_error_propagates() {
        struct Failing;
        impl Recorder for Failing {
            fn log_msg(&mut self, _msg: &str) -> Result<()> {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full").into())
            }
        }

        let mut set = RecorderSet::new();
        set.add(Failing);
        assert!(set.log_msg("x").is_err());
    }

    #[test]
    fn test_empty_set() {
        let mut set = RecorderSet::new();
        assert!(set.is_empty());
        assert!(set.log_msg("ignored").is_ok());
        assert_eq!(set.run_options(7), RunOptions::default());
    }
}
