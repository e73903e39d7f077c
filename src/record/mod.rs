//! Recorder observer system
//!
//! The orchestrator reports everything it does through the [`Recorder`]
//! trait - step begin/end, epoch end, validation end, plus setup and
//! teardown. All hooks have default implementations, so a recorder only
//! implements the events it cares about. Hooks that perform I/O return
//! `Result`: a recorder failure is as fatal as a step failure.
//!
//! - [`ConsoleRecorder`] - progress lines on stdout, gated by log level
//! - [`RunLog`] - per-run directory with a message log, summary CSV, and
//!   run manifest
//! - [`RecorderSet`] - fans every event out to a list of recorders

mod console;
mod run_log;
mod set;
mod traits;

pub use console::ConsoleRecorder;
pub use run_log::RunLog;
pub use set::RecorderSet;
pub use traits::{Recorder, StepContext, ValidationContext};
