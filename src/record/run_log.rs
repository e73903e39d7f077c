//! File-backed run recorder
//!
//! Owns a per-run directory under the runs root:
//!
//! ```text
//! runs/<run_name>/
//!   manifest.json   run configuration + start time
//!   train.log       timestamped status messages and traces
//!   summary.csv     step and validation metric rows
//! ```
//!
//! Summary rows for training steps are sampled on the configured
//! interval; validation rows are always written. Profiling hands the
//! session a trace request on the configured interval and logs the
//! returned compute time.

use chrono::Utc;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::traits::{Recorder, StepContext, ValidationContext};
use crate::error::Result;
use crate::graph::RunOptions;
use crate::train::RunConfig;

/// Contents of `manifest.json`.
#[derive(Debug, Serialize)]
struct RunManifest<'a> {
    started_at: String,
    config: &'a RunConfig,
}

/// Recorder writing a message log, a summary CSV, and a run manifest.
pub struct RunLog {
    dir: PathBuf,
    log: BufWriter<File>,
    summary: BufWriter<File>,
    profile_every: Option<u64>,
    summary_every: Option<u64>,
}

impl RunLog {
    /// Create the run directory under `root` and open its files.
    ///
    /// Fails if the directory or any file cannot be created, or if a
    /// manifest cannot be written.
    pub fn create(root: &Path, config: &RunConfig) -> Result<RunLog> {
        let dir = root.join(&config.run_name);
        fs::create_dir_all(&dir)?;

        let manifest = RunManifest {
            started_at: Utc::now().to_rfc3339(),
            config,
        };
        let manifest_file = File::create(dir.join("manifest.json"))?;
        serde_json::to_writer_pretty(BufWriter::new(manifest_file), &manifest)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

        let log = BufWriter::new(File::create(dir.join("train.log"))?);
        let mut summary = BufWriter::new(File::create(dir.join("summary.csv"))?);
        writeln!(
            summary,
            "kind,epoch,global_step,step,loss,learning_rate,top1,top5"
        )?;

        Ok(RunLog {
            dir,
            log,
            summary,
            profile_every: config.profile_every,
            summary_every: config.summary_every,
        })
    }

    /// Directory this run writes into
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn stamp(&mut self, msg: &str) -> Result<()> {
        let now = Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ");
        writeln!(self.log, "[{now}] {msg}")?;
        Ok(())
    }

    fn interval_hit(interval: Option<u64>, global_step: u64) -> bool {
        matches!(interval, Some(n) if n > 0 && global_step % n == 0)
    }
}

impl Recorder for RunLog {
    fn log_msg(&mut self, msg: &str) -> Result<()> {
        self.stamp(msg)
    }

    fn session_opened(&mut self, graph_description: &str, global_step: u64) -> Result<()> {
        self.stamp(&format!(
            "session open: {graph_description} (global step {global_step})"
        ))
    }

    fn run_options(&self, global_step: u64) -> RunOptions {
        RunOptions {
            trace_compute_time: Self::interval_hit(self.profile_every, global_step),
        }
    }

    fn train_step_end(&mut self, ctx: &StepContext) -> Result<()> {
        if Self::interval_hit(self.summary_every, ctx.global_step) {
            writeln!(
                self.summary,
                "train,{},{},{},{},{},,",
                ctx.epoch, ctx.global_step, ctx.step, ctx.loss, ctx.learning_rate
            )?;
        }
        if let Some(trace) = ctx.trace {
            self.stamp(&format!(
                "step {} compute time: {:.3} ms",
                ctx.global_step,
                trace.compute_time.as_secs_f64() * 1e3
            ))?;
        }
        Ok(())
    }

    fn train_end(&mut self, epoch: usize, global_step: u64, final_loss: f32) -> Result<()> {
        self.stamp(&format!(
            "epoch {epoch} training done: loss {final_loss:.6} (global step {global_step})"
        ))
    }

    fn validation_end(&mut self, ctx: &ValidationContext) -> Result<()> {
        let kind = if ctx.non_blacklisted {
            "validation-nbl"
        } else {
            "validation"
        };
        writeln!(
            self.summary,
            "{},{},{},,{},{},{},{}",
            kind, ctx.epoch, ctx.global_step, ctx.loss, ctx.learning_rate, ctx.top1, ctx.top5
        )?;
        self.stamp(&format!(
            "epoch {} {}: loss {:.6}, top-1 {:.4}, top-5 {:.4} over {} steps",
            ctx.epoch, kind, ctx.loss, ctx.top1, ctx.top5, ctx.steps
        ))
    }

    fn close(&mut self) -> Result<()> {
        self.log.flush()?;
        self.summary.flush()?;
        Ok(())
    }
}
