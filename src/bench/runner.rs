// peakbench - Free and Open Source Software Statement
//
// This project, peakbench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/bench/runner.rs
//
// This file implements the benchmark run driver. It paces the estimator
// through the warmup, ballpark and finale phases, pairing highball and
// lowball attempts and retrying each direction until its outcome matches the
// prediction, then reports the final peak score and uncertainty.
//
// Tree Location:
// - src/bench/runner.rs (phase driver and watchdog)
// - Depends on: bench/attempt, bench/estimator, report, crossbeam, log

use crate::bench::attempt::Attempter;
use crate::bench::estimator::Estimator;
use crate::core::error::BenchError;
use crate::core::options::TunerOptions;
use crate::report::progress::ProgressReporter;
use crossbeam::channel::{bounded, RecvTimeoutError, Sender};
use log::{debug, error, info, warn};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const LOG_TARGET: &str = "peakbench::runner";

const LOWBALL: bool = true;
const HIGHBALL: bool = false;

/// Final result of one benchmark run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub workload: String,
    /// Highest target score confirmed during the finale.
    pub peak_score: f64,
    /// Uncertainty band at the end of the run.
    pub uncertainty: f64,
    /// Tightest band at which the peak was confirmed.
    pub peak_uncertainty: f64,
    pub attempts: u64,
    pub elapsed: Duration,
    pub verified: bool,
    /// Present when the run was cut short (cancellation, timing pathology).
    pub aborted: Option<String>,
}

/// Drives one benchmark run to completion.
pub struct BenchRunner<A: Attempter> {
    workload_name: String,
    attempter: A,
    estimator: Estimator,
    opts: TunerOptions,
    attempts: u64,
    reporter: ProgressReporter,
}

impl<A: Attempter> BenchRunner<A> {
    pub fn new(workload_name: impl Into<String>, attempter: A, opts: TunerOptions) -> Self {
        Self {
            workload_name: workload_name.into(),
            attempter,
            estimator: Estimator::new(&opts),
            opts,
            attempts: 0,
            reporter: ProgressReporter::new(),
        }
    }

    /// Recover the attempter after the run, e.g. to shut down a parallel
    /// harness and collect worker verification results.
    pub fn into_attempter(self) -> A {
        self.attempter
    }

    /// Run warmup, ballpark and finale, then verify and summarize.
    ///
    /// Never fails: an interruption or timing pathology ends the phases early
    /// and the best peak found so far is reported, with the abort reason
    /// carried in the outcome.
    pub async fn run(&mut self) -> RunOutcome {
        info!(target: LOG_TARGET, "🐝 Starting score discovery for {}", self.workload_name);
        self.reporter.begin();
        self.reporter.header();

        let aborted = match self.drive_phases() {
            Ok(()) => None,
            Err(err) => {
                if err.is_interruption() {
                    info!(target: LOG_TARGET, "🛑 Run interrupted: {}", err);
                } else {
                    error!(target: LOG_TARGET, "❌ Run aborted: {}", err);
                }
                Some(err.to_string())
            }
        };

        let verified = self.attempter.verify();
        if !verified {
            error!(target: LOG_TARGET, "❌ {} failed verification", self.workload_name);
        }

        let outcome = RunOutcome {
            workload: self.workload_name.clone(),
            peak_score: self.estimator.max_peak(),
            uncertainty: self.estimator.uncertainty(),
            peak_uncertainty: self.estimator.max_peak_uncertainty(),
            attempts: self.attempts,
            elapsed: self.reporter.elapsed(),
            verified,
            aborted,
        };
        self.reporter.final_score(&outcome);
        outcome
    }

    fn drive_phases(&mut self) -> Result<(), BenchError> {
        // Warmup: run paired attempts until the band converges, bounded by
        // the min/max warmup window. An infinite estimate means the workload
        // is too fast to bracket, so further warmup is pointless.
        let warmup_start = Instant::now();
        let min_end = warmup_start + self.opts.min_warmup;
        let max_end = warmup_start + self.opts.max_warmup;
        debug!(target: LOG_TARGET, "Starting warmup");
        loop {
            let now = Instant::now();
            if now > max_end {
                break;
            }
            if now > min_end
                && self.estimator.uncertainty() <= self.opts.warmup_target_uncertainty
            {
                break;
            }
            if self.estimator.estimate() == f64::INFINITY {
                break;
            }
            self.attempt_until_correct(HIGHBALL, Some(max_end))?;
            self.attempt_until_correct(LOWBALL, Some(max_end))?;
        }
        debug!(target: LOG_TARGET,
            "Warmup completed after {:.1}s",
            warmup_start.elapsed().as_secs_f64()
        );

        info!(target: LOG_TARGET, "   -- ballpark --");
        let mut remaining = self.opts.ballpark_iterations;
        while remaining > 0 {
            self.attempt_until_correct(HIGHBALL, None)?;
            self.attempt_until_correct(LOWBALL, None)?;
            remaining = remaining.saturating_sub(2);
        }

        info!(target: LOG_TARGET, "   -- finale --");
        self.estimator.begin_finale();
        let mut remaining = self.opts.finale_iterations;
        while remaining > 0 {
            self.attempt_until_correct(HIGHBALL, None)?;
            self.attempt_until_correct(LOWBALL, None)?;
            remaining = remaining.saturating_sub(2);
        }
        Ok(())
    }

    /// Retry attempts in one direction until the outcome matches the
    /// prediction. An incorrect guess is itself informative (it has already
    /// adjusted the estimate), so the loop simply tries again with the
    /// corrected state. The optional deadline stops retries during warmup.
    fn attempt_until_correct(
        &mut self,
        lowball: bool,
        deadline: Option<Instant>,
    ) -> Result<(), BenchError> {
        loop {
            if self.run_attempt(lowball)? {
                return Ok(());
            }
            if let Some(deadline) = deadline {
                if Instant::now() > deadline {
                    return Ok(());
                }
            }
        }
    }

    fn run_attempt(&mut self, lowball: bool) -> Result<bool, BenchError> {
        let target = self.estimator.target(lowball);
        let result = self.attempter.attempt(target)?;
        self.attempts += 1;
        let record = self.estimator.record(target, lowball, result);
        self.reporter
            .attempt_line(&record, self.attempter.paused_fraction());
        Ok(record.guess_was_correct)
    }
}

/// Last-resort safety net: hard-exits the process if the run outlives its
/// deadline. Never consulted by the convergence logic.
pub struct Watchdog {
    disarm_tx: Sender<()>,
    handle: JoinHandle<()>,
}

impl Watchdog {
    pub fn arm(deadline: Duration) -> Self {
        let (disarm_tx, disarm_rx) = bounded::<()>(1);
        let handle = thread::spawn(move || match disarm_rx.recv_timeout(deadline) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                debug!(target: LOG_TARGET, "Watchdog disarmed");
            }
            Err(RecvTimeoutError::Timeout) => {
                error!(target: LOG_TARGET, "!!! WATCHDOG TIMER ELAPSED !!!");
                std::process::exit(1);
            }
        });
        info!(target: LOG_TARGET, "🐕 Watchdog armed for {:.0}s", deadline.as_secs_f64());
        Self { disarm_tx, handle }
    }

    pub fn disarm(self) {
        if self.disarm_tx.send(()).is_err() {
            warn!(target: LOG_TARGET, "Watchdog already gone at disarm");
        }
        let _ = self.handle.join();
    }
}
