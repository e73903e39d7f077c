//! Command-line interface
//!
//! Argument parsing only; the binary's wiring lives in `main.rs`.
//!
//! # Usage
//!
//! ```bash
//! orquestar --start-epoch 1 --end-epoch 100
//! orquestar --run-name baseline --summary-every 50
//! orquestar --weights-file runs/baseline/weights.json --profile-every 500
//! ```

mod logging;

pub use logging::LogLevel;

use chrono::Utc;
use clap::Parser;
use std::path::PathBuf;

/// Orquestar: epoch orchestration for supervised classifier training runs
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "orquestar")]
#[command(version)]
#[command(about = "Drives training epochs interleaved with standard and non-blacklisted validation")]
pub struct Args {
    /// First epoch to run (1-based, inclusive)
    #[arg(long, default_value_t = 1)]
    pub start_epoch: usize,

    /// Last epoch to run (inclusive)
    #[arg(long, default_value_t = 100)]
    pub end_epoch: usize,

    /// Run name; defaults to the current timestamp
    #[arg(long)]
    pub run_name: Option<String>,

    /// Restore weights from this file instead of fresh initialization
    #[arg(long)]
    pub weights_file: Option<PathBuf>,

    /// Trace step compute time every N global steps
    #[arg(long)]
    pub profile_every: Option<u64>,

    /// Write a training summary row every N global steps
    #[arg(long)]
    pub summary_every: Option<u64>,

    /// Ask the input pipeline to log annotated images where supported
    #[arg(long)]
    pub log_annotated_images: bool,

    /// Directory run outputs are written under
    #[arg(long, default_value = "runs")]
    pub runs_dir: PathBuf,

    /// Number of synthetic classes
    #[arg(long, default_value_t = 10)]
    pub classes: usize,

    /// Features per synthetic example
    #[arg(long, default_value_t = 64)]
    pub features: usize,

    /// Examples per batch
    #[arg(long, default_value_t = 32)]
    pub batch_size: usize,

    /// Training batches per epoch
    #[arg(long, default_value_t = 50)]
    pub train_batches: usize,

    /// Validation batches per epoch
    #[arg(long, default_value_t = 10)]
    pub validation_batches: usize,

    /// Learning rate for the reference graph
    #[arg(long, default_value_t = 0.05)]
    pub lr: f32,

    /// RNG seed for data generation and weight init
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// The run name to use: the given one, or a fresh timestamp
    pub fn resolve_run_name(&self) -> String {
        self.run_name
            .clone()
            .unwrap_or_else(|| Utc::now().format("%Y%m%d%H%M%S").to_string())
    }

    /// Console log level implied by the quiet/verbose flags
    pub fn log_level(&self) -> LogLevel {
        if self.quiet {
            LogLevel::Quiet
        } else if self.verbose {
            LogLevel::Verbose
        } else {
            LogLevel::Normal
        }
    }
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Args, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Args::try_parse_from(args)
}
