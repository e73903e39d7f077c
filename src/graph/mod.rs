//! Model graph contract and the linear reference graph
//!
//! The orchestrator never touches model internals: it evaluates the two
//! step operations of a [`ModelGraph`] under per-step [`ModeFlags`] and
//! reads back scalar outputs. [`LinearSoftmaxGraph`] is the in-crate
//! reference implementation: a single softmax layer over a dataset
//! provider's feeds, enough to drive real end-to-end runs.
//!
//! [`ModeFlags`]: crate::train::ModeFlags

mod linear;
mod traits;

pub use linear::LinearSoftmaxGraph;
pub use traits::{EvalStepOutput, ModelGraph, RunOptions, StepTrace, TrainStepOutput};
