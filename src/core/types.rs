// peakbench - Free and Open Source Software Statement
//
// This project, peakbench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/core/types.rs
//
// This file defines core data structures for peakbench. It includes types for
// command-line arguments, workload selection, parallel aggregation styles and
// the serialized run summary written to the score report file.
//
// Tree Location:
// - src/core/types.rs (core data structures)
// - Depends on: clap, serde

use crate::core::options::TunerOptions;
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Built-in demo workload variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkloadKind {
    Sha3x,
    Sha256d,
    Sort,
}

/// How a parallel run combines the per-worker scores into one result
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum AggregationStyle {
    /// Worst worker wins; the target is dispatched unchanged.
    Min,
    /// Mean of the worker scores; the target is dispatched unchanged.
    Average,
    /// Sum of the worker scores; the target is pre-divided by worker count.
    Sum,
}

/// Command-line arguments for the peakbench harness
#[derive(Parser, Debug)]
#[command(
    name = "peakbench",
    version,
    about = "Adaptive peak-throughput discovery harness",
    long_about = "peakbench discovers the highest sustainable throughput (\"score\") a workload\n\
                  can achieve on the current machine and reports it with a calibrated\n\
                  uncertainty band. It runs the workload at alternating lowball/highball\n\
                  target rates, absorbs noisy attempts by retrying until the outcome matches\n\
                  the prediction, and converges through warmup, ballpark and finale phases.\n\n\
                  Examples:\n\
                    SHA3 hashing score:  peakbench --workload sha3x\n\
                    Parallel sum score:  peakbench --workload sha3x --parallel 0 --aggregation sum\n\
                    Quick run:           peakbench --workload sort --min-warmup-secs 2 --max-warmup-secs 10\n\
                    JSON report:         peakbench --workload sha256d --report scores/run.json"
)]
pub struct Args {
    /// Workload to measure: sha3x, sha256d, or sort
    #[arg(
        short = 'w',
        long = "workload",
        value_name = "NAME",
        default_value = "sha3x",
        help = "Workload to measure (sha3x, sha256d, sort)"
    )]
    pub workload: String,

    /// Number of parallel workload instances
    /// 1 = single-instance run (default), 0 = one per logical CPU
    #[arg(
        short = 'p',
        long,
        default_value = "1",
        value_name = "COUNT",
        help = "Parallel workload instances (1 = single, 0 = auto-detect CPUs)"
    )]
    pub parallel: usize,

    /// Aggregation style for parallel runs
    #[arg(
        long,
        value_enum,
        default_value_t = AggregationStyle::Average,
        help = "How parallel worker scores are combined (min, average, sum)"
    )]
    pub aggregation: AggregationStyle,

    /// Write a JSON score report to this path when the run completes
    #[arg(long, value_name = "PATH", help = "Path for the JSON score report")]
    pub report: Option<PathBuf>,

    /// Enable the watchdog that hard-exits the process if the run hangs
    #[arg(long, help = "Enable the last-resort watchdog timer")]
    pub watchdog: bool,

    /// Watchdog deadline in seconds (default: derived from the tuner options)
    #[arg(long, value_name = "SECS", help = "Watchdog deadline in seconds")]
    pub watchdog_secs: Option<u64>,

    /// Seed for deterministic workload input generation
    #[arg(long, default_value = "123", value_name = "SEED")]
    pub seed: u64,

    //
    // Tuner overrides. Defaults mirror TunerOptions::default().
    //
    /// Initial throughput estimate in iterations per second
    #[arg(long, default_value = "100.0", value_name = "SCORE")]
    pub initial_estimate: f64,

    /// Minimum warmup duration in seconds
    #[arg(long, default_value = "10", value_name = "SECS")]
    pub min_warmup_secs: u64,

    /// Maximum warmup duration in seconds
    #[arg(long, default_value = "150", value_name = "SECS")]
    pub max_warmup_secs: u64,

    /// Uncertainty at which warmup is considered converged
    #[arg(long, default_value = "0.1", value_name = "FRACTION")]
    pub warmup_target_uncertainty: f64,

    /// Attempts in the ballpark phase
    #[arg(long, default_value = "20", value_name = "COUNT")]
    pub ballpark_iterations: u32,

    /// Attempts in the finale phase (default: half the ballpark count)
    #[arg(long, value_name = "COUNT")]
    pub finale_iterations: Option<u32>,

    /// Uncertainty multiplier after a correctly predicted attempt
    #[arg(long, default_value = "0.6", value_name = "FACTOR")]
    pub correct_guess_adjustment: f64,

    /// Uncertainty multiplier after an incorrectly predicted attempt
    #[arg(long, default_value = "1.2", value_name = "FACTOR")]
    pub incorrect_guess_adjustment: f64,

    /// Ceiling on the uncertainty band
    #[arg(long, default_value = "0.4", value_name = "FRACTION")]
    pub max_uncertainty: f64,

    /// Bump uncertainty gently instead of adopting wild implied values
    #[arg(long, help = "Tame uncertainty spikes from single noisy samples")]
    pub tame_uncertainty: bool,

    /// Target wall-clock duration of one measured batch, in milliseconds
    #[arg(long, default_value = "1000", value_name = "MS")]
    pub batch_target_duration_ms: u64,

    /// Whether batch sizing compensates for paused time
    #[arg(
        long,
        action = clap::ArgAction::Set,
        default_value_t = true,
        value_name = "BOOL"
    )]
    pub target_includes_pauses: bool,

    /// Floor on the unpaused fraction used for batch sizing
    #[arg(long, default_value = "0.2", value_name = "FRACTION")]
    pub min_unpaused_factor: f64,

    /// Maximum elapsed/target ratio before a pause-heavy run is aborted
    #[arg(long, default_value = "10.0", value_name = "FACTOR")]
    pub max_time_dilation: f64,

    /// Report qualitative success/failure instead of measured rates
    #[arg(long, help = "Collapse measured rates to unspecified success/failure")]
    pub unspecified_estimate: bool,
}

impl Args {
    /// Validate argument combinations before the harness starts.
    pub fn validate(&self) -> Result<(), String> {
        if self.initial_estimate <= 0.0 || !self.initial_estimate.is_finite() {
            return Err("--initial-estimate must be positive and finite".to_string());
        }
        if self.max_uncertainty <= 0.0 || self.max_uncertainty >= 1.0 {
            return Err("--max-uncertainty must be in (0, 1)".to_string());
        }
        if self.correct_guess_adjustment <= 0.0 || self.correct_guess_adjustment >= 1.0 {
            return Err("--correct-guess-adjustment must be in (0, 1)".to_string());
        }
        if self.incorrect_guess_adjustment <= 1.0 {
            return Err("--incorrect-guess-adjustment must be greater than 1".to_string());
        }
        if self.min_warmup_secs > self.max_warmup_secs {
            return Err(format!(
                "--min-warmup-secs {} exceeds --max-warmup-secs {}",
                self.min_warmup_secs, self.max_warmup_secs
            ));
        }
        if self.batch_target_duration_ms == 0 {
            return Err("--batch-target-duration-ms must be at least 1".to_string());
        }
        if self.min_unpaused_factor <= 0.0 || self.min_unpaused_factor > 1.0 {
            return Err("--min-unpaused-factor must be in (0, 1]".to_string());
        }
        if self.max_time_dilation < 1.0 {
            return Err("--max-time-dilation must be at least 1".to_string());
        }
        Ok(())
    }

    /// Build the tuner option profile from the CLI overrides.
    pub fn tuner_options(&self) -> TunerOptions {
        let defaults = TunerOptions::default();
        TunerOptions {
            initial_estimate: self.initial_estimate,
            min_warmup: Duration::from_secs(self.min_warmup_secs),
            max_warmup: Duration::from_secs(self.max_warmup_secs),
            warmup_target_uncertainty: self.warmup_target_uncertainty,
            ballpark_iterations: self.ballpark_iterations,
            finale_iterations: self
                .finale_iterations
                .unwrap_or(self.ballpark_iterations / 2),
            correct_guess_adjustment: self.correct_guess_adjustment,
            incorrect_guess_adjustment: self.incorrect_guess_adjustment,
            max_uncertainty: self.max_uncertainty,
            tame_uncertainty: self.tame_uncertainty,
            batch_target_duration: Duration::from_millis(self.batch_target_duration_ms),
            target_includes_pauses: self.target_includes_pauses,
            min_unpaused_factor: self.min_unpaused_factor,
            max_time_dilation: self.max_time_dilation,
            unspecified_estimate: self.unspecified_estimate,
            random_seed: self.seed,
            ..defaults
        }
    }
}

/// Final result of one benchmark run, serialized into the score report file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub workload: String,
    pub peak_score: f64,
    pub uncertainty: f64,
    pub peak_uncertainty: f64,
    pub attempts: u64,
    pub elapsed_secs: f64,
    pub verified: bool,
    pub aborted: Option<String>,
    pub parallel_workers: usize,
    pub tuner: TunerOptions,
}
