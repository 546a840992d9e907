// peakbench - Free and Open Source Software Statement
//
// This project, peakbench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: tests/parallel_aggregation.rs
//
// Tests for the parallel harness: score aggregation across workers, target
// pre-division for sum mode, unspecified-outcome propagation and worker
// verification at shutdown.

use peakbench::bench::{Attempter, ParallelHarness};
use peakbench::core::error::BenchError;
use peakbench::core::types::AggregationStyle;
use peakbench::workload::{AttemptResult, CancelToken};

/// Always reports the same rate, regardless of the target.
struct FixedRateAttempter {
    rate: f64,
    verified: bool,
}

impl Attempter for FixedRateAttempter {
    fn attempt(&mut self, _target_score: f64) -> Result<AttemptResult, BenchError> {
        Ok(AttemptResult::Rate(self.rate))
    }

    fn verify(&mut self) -> bool {
        self.verified
    }
}

/// Reports the target it was given, exposing what the harness dispatched.
struct TargetEchoAttempter;

impl Attempter for TargetEchoAttempter {
    fn attempt(&mut self, target_score: f64) -> Result<AttemptResult, BenchError> {
        Ok(AttemptResult::Rate(target_score))
    }

    fn verify(&mut self) -> bool {
        true
    }
}

/// Reports a fixed, non-rate outcome.
struct FixedOutcomeAttempter {
    outcome: AttemptResult,
}

impl Attempter for FixedOutcomeAttempter {
    fn attempt(&mut self, _target_score: f64) -> Result<AttemptResult, BenchError> {
        Ok(self.outcome)
    }

    fn verify(&mut self) -> bool {
        true
    }
}

fn fixed_rates(style: AggregationStyle) -> ParallelHarness {
    // Workers report 10, 20 and 30 iterations per second.
    ParallelHarness::spawn(3, style, CancelToken::new(), |worker_id| {
        FixedRateAttempter {
            rate: 10.0 * (worker_id + 1) as f64,
            verified: true,
        }
    })
}

#[test]
fn min_takes_the_slowest_worker() {
    let mut harness = fixed_rates(AggregationStyle::Min);
    let result = harness.attempt(100.0).unwrap();
    assert_eq!(result, AttemptResult::Rate(10.0));
    assert!(harness.shutdown());
}

#[test]
fn average_takes_the_mean() {
    let mut harness = fixed_rates(AggregationStyle::Average);
    let result = harness.attempt(100.0).unwrap();
    assert_eq!(result, AttemptResult::Rate(20.0));
    assert!(harness.shutdown());
}

#[test]
fn sum_adds_the_workers_up() {
    let mut harness = fixed_rates(AggregationStyle::Sum);
    let result = harness.attempt(100.0).unwrap();
    assert_eq!(result, AttemptResult::Rate(60.0));
    assert!(harness.shutdown());
}

#[test]
fn sum_divides_the_target_across_workers() {
    // Each of the four workers echoes its per-instance target; the combined
    // score must land back on the dispatched total.
    let mut harness = ParallelHarness::spawn(
        4,
        AggregationStyle::Sum,
        CancelToken::new(),
        |_| TargetEchoAttempter,
    );
    let result = harness.attempt(100.0).unwrap();
    assert_eq!(result, AttemptResult::Rate(100.0));
    assert!(harness.shutdown());
}

#[test]
fn min_and_average_dispatch_the_target_unchanged() {
    for style in [AggregationStyle::Min, AggregationStyle::Average] {
        let mut harness =
            ParallelHarness::spawn(4, style, CancelToken::new(), |_| TargetEchoAttempter);
        let result = harness.attempt(100.0).unwrap();
        assert_eq!(result, AttemptResult::Rate(100.0), "style {:?}", style);
        assert!(harness.shutdown());
    }
}

#[test]
fn one_unspecified_failure_fails_the_attempt() {
    let mut harness = ParallelHarness::spawn(
        3,
        AggregationStyle::Average,
        CancelToken::new(),
        |worker_id| FixedOutcomeAttempter {
            outcome: if worker_id == 1 {
                AttemptResult::UnspecifiedFailure
            } else {
                AttemptResult::Rate(50.0)
            },
        },
    );
    let result = harness.attempt(40.0).unwrap();
    assert_eq!(result, AttemptResult::UnspecifiedFailure);
    assert!(harness.shutdown());
}

#[test]
fn unspecified_success_taints_a_numeric_combination() {
    let mut harness = ParallelHarness::spawn(
        3,
        AggregationStyle::Sum,
        CancelToken::new(),
        |worker_id| FixedOutcomeAttempter {
            outcome: if worker_id == 2 {
                AttemptResult::UnspecifiedSuccess
            } else {
                AttemptResult::Rate(50.0)
            },
        },
    );
    let result = harness.attempt(40.0).unwrap();
    assert_eq!(result, AttemptResult::UnspecifiedSuccess);
    assert!(harness.shutdown());
}

#[test]
fn shutdown_reports_a_failed_worker_verification() {
    let harness = ParallelHarness::spawn(
        3,
        AggregationStyle::Average,
        CancelToken::new(),
        |worker_id| FixedRateAttempter {
            rate: 10.0,
            verified: worker_id != 1,
        },
    );
    assert!(!harness.shutdown());
}

#[test]
fn repeated_attempts_keep_working() {
    let mut harness = fixed_rates(AggregationStyle::Min);
    for _ in 0..5 {
        assert_eq!(harness.attempt(100.0).unwrap(), AttemptResult::Rate(10.0));
    }
    assert!(harness.shutdown());
}
