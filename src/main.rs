//! Orquestar CLI
//!
//! Training-run entry point: wires the synthetic data feed, the linear
//! reference graph, and the recorders together, then hands control to
//! the epoch orchestrator.
//!
//! ```bash
//! orquestar --start-epoch 1 --end-epoch 100
//! orquestar --run-name baseline --summary-every 50 --profile-every 500
//! orquestar --weights-file runs/baseline/weights.json
//! ```

use clap::Parser;
use std::process::ExitCode;

use orquestar::cli::{Args, LogLevel};
use orquestar::data::{SyntheticConfig, SyntheticDataset};
use orquestar::graph::LinearSoftmaxGraph;
use orquestar::record::{ConsoleRecorder, Recorder, RecorderSet, RunLog};
use orquestar::train::{EpochPlan, EpochRange, RunConfig, Runner};
use orquestar::{Result, RunResult, Session};

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(result) => {
            println!(
                "Run complete: {} epochs, final loss {:.4}, global step {} ({:.1}s)",
                result.epochs_run,
                result.final_train_loss,
                result.final_global_step,
                result.elapsed_secs
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<RunResult> {
    let config = RunConfig {
        run_name: args.resolve_run_name(),
        epochs: EpochRange::new(args.start_epoch, args.end_epoch),
        weights_file: args.weights_file.clone(),
        profile_every: args.profile_every,
        summary_every: args.summary_every,
        log_annotated_images: args.log_annotated_images,
    };

    let run_log = RunLog::create(&args.runs_dir, &config)?;
    let run_dir = run_log.dir().to_path_buf();

    let mut recorder = RecorderSet::new();
    recorder.add(ConsoleRecorder::new(args.log_level(), 10));
    recorder.add(run_log);

    recorder.log_msg(&format!("Run directory: {}", run_dir.display()))?;
    recorder.log_msg("Setting up data feeds...")?;
    if config.log_annotated_images {
        recorder.log_msg(
            "annotated image logging requested, but the synthetic feed has no images; ignoring",
        )?;
    }
    let provider = SyntheticDataset::new(SyntheticConfig {
        num_classes: args.classes,
        feature_dim: args.features,
        batch_size: args.batch_size,
        train_batches: args.train_batches,
        validation_batches: args.validation_batches,
        seed: args.seed,
        ..SyntheticConfig::default()
    });
    let plan = EpochPlan::from_provider(&provider);
    if args.log_level() == LogLevel::Verbose {
        recorder.log_msg(&format!(
            "epoch plan: {} train / {} validation / {} non-blacklisted steps",
            plan.training_steps, plan.validation_steps, plan.nbl_validation_steps
        ))?;
    }

    let graph = LinearSoftmaxGraph::new(Box::new(provider), args.features, args.lr, args.seed);

    recorder.log_msg("Starting session...")?;
    if let Some(path) = &config.weights_file {
        recorder.log_msg(&format!("Restoring weights file: {}", path.display()))?;
    }
    let session = Session::open(Box::new(graph), config.weights_file.as_deref())?;

    let mut runner = Runner::new(session, Box::new(recorder), plan);
    let result = runner.run(config.epochs)?;
    runner.finish()?;

    Ok(result)
}
