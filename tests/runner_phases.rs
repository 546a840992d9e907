// peakbench - Free and Open Source Software Statement
//
// This project, peakbench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: tests/runner_phases.rs
//
// End-to-end tests for the run driver against a deterministic fake workload:
// the phases must converge on the workload's capacity, and interruption or
// failed verification must surface in the outcome instead of crashing.

use peakbench::bench::{Attempter, BenchRunner};
use peakbench::core::error::BenchError;
use peakbench::workload::AttemptResult;
use peakbench::TunerOptions;
use std::time::Duration;

/// A workload that sustains exactly `capacity` iterations per second, with no
/// real time spent.
struct SteadyAttempter {
    capacity: f64,
    verified: bool,
}

impl Attempter for SteadyAttempter {
    fn attempt(&mut self, _target_score: f64) -> Result<AttemptResult, BenchError> {
        Ok(AttemptResult::Rate(self.capacity))
    }

    fn verify(&mut self) -> bool {
        self.verified
    }
}

/// Succeeds for a fixed number of attempts, then reports an interruption.
struct InterruptingAttempter {
    remaining: u32,
}

impl Attempter for InterruptingAttempter {
    fn attempt(&mut self, _target_score: f64) -> Result<AttemptResult, BenchError> {
        if self.remaining == 0 {
            return Err(BenchError::interrupted("test shutdown"));
        }
        self.remaining -= 1;
        Ok(AttemptResult::Rate(50.0))
    }

    fn verify(&mut self) -> bool {
        true
    }
}

fn quick_options() -> TunerOptions {
    TunerOptions {
        initial_estimate: 100.0,
        initial_uncertainty: 0.2,
        min_warmup: Duration::from_secs(0),
        max_warmup: Duration::from_secs(5),
        warmup_target_uncertainty: 0.1,
        ballpark_iterations: 4,
        finale_iterations: 2,
        ..TunerOptions::default()
    }
}

#[tokio::test]
async fn run_converges_on_a_steady_workload() {
    let opts = quick_options();
    let attempter = SteadyAttempter {
        capacity: 150.0,
        verified: true,
    };
    let mut runner = BenchRunner::new("steady", attempter, opts);
    let outcome = runner.run().await;

    assert_eq!(outcome.workload, "steady");
    assert!(outcome.aborted.is_none());
    assert!(outcome.verified);
    // The peak is a confirmed lowball target, so it sits just under the
    // capacity but well above the initial estimate.
    assert!(outcome.peak_score > 100.0, "peak {}", outcome.peak_score);
    assert!(outcome.peak_score <= 150.0, "peak {}", outcome.peak_score);
    assert!(outcome.uncertainty < 0.1);
    assert!(outcome.peak_uncertainty.is_finite());
    // At minimum one warmup pair, two ballpark pairs and one finale pair.
    assert!(outcome.attempts >= 8, "attempts {}", outcome.attempts);
}

#[tokio::test]
async fn interruption_ends_the_run_with_the_current_peak() {
    let opts = quick_options();
    let attempter = InterruptingAttempter { remaining: 4 };
    let mut runner = BenchRunner::new("interrupted", attempter, opts);
    let outcome = runner.run().await;

    assert!(outcome.aborted.is_some());
    assert!(outcome
        .aborted
        .as_deref()
        .unwrap()
        .contains("test shutdown"));
    assert!(outcome.verified);
    assert_eq!(outcome.attempts, 4);
}

#[tokio::test]
async fn failed_verification_is_reported() {
    let opts = quick_options();
    let attempter = SteadyAttempter {
        capacity: 150.0,
        verified: false,
    };
    let mut runner = BenchRunner::new("unverified", attempter, opts);
    let outcome = runner.run().await;

    assert!(!outcome.verified);
    assert!(outcome.aborted.is_none());
}

#[tokio::test]
async fn immeasurably_fast_workloads_cut_warmup_short() {
    // An infinite rate drives the estimate to infinity; warmup must not spin
    // against its deadline chasing an unbracketable workload.
    let opts = quick_options();
    let attempter = SteadyAttempter {
        capacity: f64::INFINITY,
        verified: true,
    };
    let mut runner = BenchRunner::new("infinite", attempter, opts);
    let start = std::time::Instant::now();
    let outcome = runner.run().await;

    assert!(outcome.aborted.is_none());
    assert_eq!(outcome.peak_score, f64::INFINITY);
    assert!(start.elapsed() < Duration::from_secs(4));
}
