//! Orquestar: epoch orchestration for supervised classifier training runs
//!
//! The crate drives a supervised training loop: per epoch, one training
//! pass followed by a standard validation pass and a non-blacklisted
//! validation pass, all against one shared execution context. The
//! collaborators (dataset provider, model graph, recorder) are traits,
//! so the orchestration logic is independent of any particular model or
//! output stack.
//!
//! # Example
//!
//! ```no_run
//! use orquestar::data::{SyntheticConfig, SyntheticDataset};
//! use orquestar::graph::LinearSoftmaxGraph;
//! use orquestar::record::ConsoleRecorder;
//! use orquestar::session::Session;
//! use orquestar::train::{EpochPlan, EpochRange, Runner};
//!
//! # fn main() -> orquestar::Result<()> {
//! let provider = SyntheticDataset::new(SyntheticConfig::default());
//! let plan = EpochPlan::from_provider(&provider);
//! let graph = LinearSoftmaxGraph::new(Box::new(provider), 64, 0.05, 42);
//! let session = Session::open(Box::new(graph), None)?;
//!
//! let mut runner = Runner::new(session, Box::new(ConsoleRecorder::default()), plan);
//! let result = runner.run(EpochRange::new(1, 10))?;
//! println!("trained {} epochs", result.epochs_run);
//! runner.finish()?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod data;
pub mod error;
pub mod graph;
pub mod metrics;
pub mod record;
pub mod session;
pub mod train;

// Convenience re-exports
pub use error::{Error, Result};
pub use session::Session;
pub use train::{EpochPlan, EpochRange, ModeFlags, RunConfig, RunResult, Runner};
