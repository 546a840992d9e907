// peakbench - Free and Open Source Software Statement
//
// This project, peakbench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/bench/attempt.rs
//
// This file implements the attempt evaluator: it executes exactly one measured
// batch against a target score and produces a throughput measurement, keeping
// a smoothed view of how much of each batch the workload spends paused.
//
// Tree Location:
// - src/bench/attempt.rs (single-attempt execution and measurement)
// - Depends on: bench/batch, bench/timer, workload, log

use crate::bench::batch;
use crate::bench::timer::PauseTimer;
use crate::core::error::BenchError;
use crate::core::options::TunerOptions;
use crate::workload::{AttemptResult, CancelToken, Workload};
use log::debug;
use std::time::Instant;

const LOG_TARGET: &str = "peakbench::attempt";

/// Anything the run driver can issue attempts against: a single measured
/// workload, or a parallel fan-out of several.
pub trait Attempter {
    /// Run one attempt at `target_score` and report the outcome.
    fn attempt(&mut self, target_score: f64) -> Result<AttemptResult, BenchError>;

    /// End-of-run correctness check.
    fn verify(&mut self) -> bool;

    /// Fraction of the most recent batches spent paused, for reporting.
    fn paused_fraction(&self) -> f64 {
        0.0
    }
}

/// Executes measured batches for one workload instance.
pub struct AttemptRunner<W: Workload> {
    workload: W,
    timer: PauseTimer,
    opts: TunerOptions,
    cancel: CancelToken,
    unpaused_fraction: f64,
}

impl<W: Workload> AttemptRunner<W> {
    pub fn new(workload: W, opts: TunerOptions, cancel: CancelToken) -> Self {
        Self {
            workload,
            timer: PauseTimer::new(),
            opts,
            cancel,
            unpaused_fraction: 1.0,
        }
    }

    pub fn workload_name(&self) -> &str {
        self.workload.name()
    }

    pub fn into_workload(self) -> W {
        self.workload
    }

    fn run_one(&mut self, target_score: f64) -> Result<AttemptResult, BenchError> {
        self.cancel.check()?;
        let target_iterations =
            batch::target_iterations(target_score, self.unpaused_fraction, &self.opts);

        // The workload call, wrapped as tightly as possible by the clock reads.
        self.timer.reset();
        let start = Instant::now();
        let completed = self
            .workload
            .run_batch(target_iterations, &mut self.timer, &self.cancel)?;
        let return_time = Instant::now();

        // Follow-up calculations. Not time-critical.
        let end = self.timer.effective_end(return_time);
        let elapsed = end.saturating_duration_since(start);
        let unpaused = elapsed.saturating_sub(self.timer.pause_total());
        let measured_rate = if unpaused.is_zero() {
            // Finished faster than the clock can resolve.
            f64::INFINITY
        } else {
            completed as f64 * 1.0e9 / unpaused.as_nanos() as f64
        };

        // Update the smoothed unpaused fraction for the next batch sizing,
        // and guard against a workload that pauses almost continuously.
        if !elapsed.is_zero() {
            self.unpaused_fraction = unpaused.as_secs_f64() / elapsed.as_secs_f64();
            let dilation = elapsed.as_secs_f64() / self.opts.batch_target_duration.as_secs_f64();
            if self.opts.target_includes_pauses
                && dilation > self.opts.max_time_dilation
                && self.opts.min_unpaused_factor / self.unpaused_fraction
                    > self.opts.max_time_dilation
            {
                return Err(BenchError::TimingPathology {
                    elapsed_ms: elapsed.as_millis() as u64,
                    batch_ms: self.opts.batch_target_duration.as_millis() as u64,
                });
            }
        }

        debug!(target: LOG_TARGET,
            "elapsed={:?} unpaused={:?} target_iterations={} completed={} measured_rate={:.3} target_score={:.3}",
            elapsed, unpaused, target_iterations, completed, measured_rate, target_score
        );

        if self.opts.unspecified_estimate {
            return Ok(if measured_rate >= target_score {
                AttemptResult::UnspecifiedSuccess
            } else {
                AttemptResult::UnspecifiedFailure
            });
        }
        Ok(AttemptResult::Rate(measured_rate))
    }
}

impl<W: Workload> Attempter for AttemptRunner<W> {
    fn attempt(&mut self, target_score: f64) -> Result<AttemptResult, BenchError> {
        self.run_one(target_score)
    }

    fn verify(&mut self) -> bool {
        self.workload.verify()
    }

    fn paused_fraction(&self) -> f64 {
        1.0 - self.unpaused_fraction
    }
}
