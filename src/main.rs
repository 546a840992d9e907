// peakbench - Free and Open Source Software Statement
//
// This project, peakbench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/main.rs
//
// CLI entry point: parse and validate arguments, wire up logging, Ctrl-C
// cancellation and the watchdog, then run the selected workload through the
// score-discovery loop (single-instance or parallel) and write the report.

use clap::Parser;
use log::{error, info, warn, LevelFilter};
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use peakbench::bench::parallel::ParallelHarness;
use peakbench::bench::runner::{BenchRunner, RunOutcome, Watchdog};
use peakbench::bench::AttemptRunner;
use peakbench::core::types::{Args, RunSummary, WorkloadKind};
use peakbench::core::TunerOptions;
use peakbench::report::ScoreFileManager;
use peakbench::workload::{
    CancelToken, LoopedAdapter, Sha256dWorkload, Sha3xWorkload, SortWorkload, Workload,
};
use peakbench::Result;
use std::time::Duration;

const LOG_TARGET: &str = "peakbench::main";

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if let Err(err) = args.validate() {
        eprintln!("❌ Error: {}", err);
        std::process::exit(1);
    }

    init_logging()?;

    let kind = parse_workload(&args.workload)?;
    let opts = args.tuner_options();

    let cancel = CancelToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!(target: LOG_TARGET, "🛑 Ctrl-C received, finishing up...");
                cancel.cancel();
            }
        });
    }

    let watchdog = if args.watchdog {
        let deadline = args
            .watchdog_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| opts.expected_run_duration());
        Some(Watchdog::arm(deadline))
    } else {
        None
    };

    let workers = match args.parallel {
        0 => num_cpus::get(),
        n => n,
    };

    info!(target: LOG_TARGET, "🐝 peakbench: workload {:?}, {} instance(s)", kind, workers);

    let (outcome, workers_verified) = if workers > 1 {
        run_parallel(kind, workers, &args, &opts, cancel.clone()).await
    } else {
        (run_single(kind, &opts, cancel.clone()).await, true)
    };

    if let Some(watchdog) = watchdog {
        watchdog.disarm();
    }

    let verified = outcome.verified && workers_verified;
    if !workers_verified {
        error!(target: LOG_TARGET, "❌ One or more parallel workers failed verification");
    }

    if let Some(path) = &args.report {
        let summary = RunSummary {
            workload: outcome.workload.clone(),
            peak_score: outcome.peak_score,
            uncertainty: outcome.uncertainty,
            peak_uncertainty: outcome.peak_uncertainty,
            attempts: outcome.attempts,
            elapsed_secs: outcome.elapsed.as_secs_f64(),
            verified,
            aborted: outcome.aborted.clone(),
            parallel_workers: workers,
            tuner: opts.clone(),
        };
        let manager = ScoreFileManager::new(path.clone());
        if let Err(err) = manager.save(&summary).await {
            warn!(target: LOG_TARGET, "⚠️ Could not write score report: {}", err);
        }
    }

    if !verified {
        std::process::exit(1);
    }
    Ok(())
}

fn init_logging() -> Result<()> {
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S)} {m}{n}")))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(LevelFilter::Info))?;
    log4rs::init_config(config)?;
    Ok(())
}

fn parse_workload(name: &str) -> Result<WorkloadKind> {
    let kind = match name {
        "sha3x" => WorkloadKind::Sha3x,
        "sha256d" => WorkloadKind::Sha256d,
        "sort" => WorkloadKind::Sort,
        _ => {
            eprintln!("❌ Unknown workload: {}", name);
            eprintln!("💡 Available workloads: sha3x, sha256d, sort");
            std::process::exit(1);
        }
    };
    Ok(kind)
}

fn build_workload(kind: WorkloadKind, opts: &TunerOptions) -> Box<dyn Workload> {
    match kind {
        WorkloadKind::Sha3x => Box::new(Sha3xWorkload::new(opts.random_seed)),
        WorkloadKind::Sha256d => Box::new(Sha256dWorkload::new(opts.random_seed)),
        WorkloadKind::Sort => Box::new(LoopedAdapter::new(SortWorkload::new(opts.random_seed), opts)),
    }
}

async fn run_single(kind: WorkloadKind, opts: &TunerOptions, cancel: CancelToken) -> RunOutcome {
    let workload = build_workload(kind, opts);
    let name = workload.name().to_string();
    let attempter = AttemptRunner::new(workload, opts.clone(), cancel);
    let mut runner = BenchRunner::new(name, attempter, opts.clone());
    runner.run().await
}

async fn run_parallel(
    kind: WorkloadKind,
    workers: usize,
    args: &Args,
    opts: &TunerOptions,
    cancel: CancelToken,
) -> (RunOutcome, bool) {
    // Each worker gets a fresh, independent workload instance; seeds are
    // offset so parallel inputs differ while staying reproducible.
    let make_opts = opts.clone();
    let make_cancel = cancel.clone();
    let harness = ParallelHarness::spawn(
        workers,
        args.aggregation,
        cancel.clone(),
        move |worker_id| {
            let mut worker_opts = make_opts.clone();
            worker_opts.random_seed = worker_opts.random_seed.wrapping_add(worker_id as u64);
            AttemptRunner::new(
                build_workload(kind, &worker_opts),
                worker_opts.clone(),
                make_cancel.clone(),
            )
        },
    );
    let mut runner = BenchRunner::new(args.workload.clone(), harness, opts.clone());
    let outcome = runner.run().await;
    let workers_verified = runner.into_attempter().shutdown();
    (outcome, workers_verified)
}
