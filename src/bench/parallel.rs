// peakbench - Free and Open Source Software Statement
//
// This project, peakbench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/bench/parallel.rs
//
// This file implements parallel aggregation: fanning a single target score
// out to N independent workload instances on worker threads and combining
// their scores by min, average or sum. The estimator itself stays
// single-instance and unaware of parallelism.
//
// Tree Location:
// - src/bench/parallel.rs (parallel fan-out and aggregation)
// - Depends on: bench/attempt, crossbeam, log

use crate::bench::attempt::Attempter;
use crate::core::error::BenchError;
use crate::core::types::AggregationStyle;
use crate::workload::{AttemptResult, CancelToken};
use crossbeam::channel::{bounded, Receiver, Sender};
use log::{debug, info};
use std::thread::{self, JoinHandle};

const LOG_TARGET: &str = "peakbench::parallel";

struct WorkerHandle {
    target_tx: Sender<f64>,
    result_rx: Receiver<Result<AttemptResult, BenchError>>,
    handle: JoinHandle<bool>,
}

/// Fans one target score out to N workers over bounded channels and blocks
/// until every worker has replied. Each worker owns an independent workload
/// instance and attempt runner; no state is shared between them.
pub struct ParallelHarness {
    workers: Vec<WorkerHandle>,
    style: AggregationStyle,
    cancel: CancelToken,
}

impl ParallelHarness {
    /// Spawn `num_workers` workers, constructing a fresh attempter (and thus
    /// a fresh workload instance) for each so per-instance state is truly
    /// independent.
    pub fn spawn<A, F>(
        num_workers: usize,
        style: AggregationStyle,
        cancel: CancelToken,
        mut make_attempter: F,
    ) -> Self
    where
        A: Attempter + Send + 'static,
        F: FnMut(usize) -> A,
    {
        let num_workers = num_workers.max(1);
        info!(target: LOG_TARGET,
            "🧵 Spawning {} parallel workers (aggregation: {:?})",
            num_workers, style
        );
        let workers = (0..num_workers)
            .map(|worker_id| {
                let (target_tx, target_rx) = bounded::<f64>(1);
                let (result_tx, result_rx) = bounded::<Result<AttemptResult, BenchError>>(1);
                let mut runner = make_attempter(worker_id);
                let handle = thread::spawn(move || {
                    for target in target_rx.iter() {
                        let result = runner.attempt(target);
                        let stop = result.is_err();
                        if result_tx.send(result).is_err() || stop {
                            break;
                        }
                    }
                    debug!(target: LOG_TARGET, "Worker {} stopping", worker_id);
                    runner.verify()
                });
                WorkerHandle {
                    target_tx,
                    result_rx,
                    handle,
                }
            })
            .collect();
        Self {
            workers,
            style,
            cancel,
        }
    }

    /// Stop every worker and collect their verification results. In-flight
    /// results of a cancelled worker are discarded.
    pub fn shutdown(self) -> bool {
        self.cancel.cancel();
        let mut all_verified = true;
        for (worker_id, worker) in self.workers.into_iter().enumerate() {
            drop(worker.target_tx);
            drop(worker.result_rx);
            match worker.handle.join() {
                Ok(verified) => all_verified &= verified,
                Err(_) => {
                    debug!(target: LOG_TARGET, "Worker {} panicked during join", worker_id);
                    all_verified = false;
                }
            }
        }
        all_verified
    }

    fn aggregate(&self, results: Vec<AttemptResult>) -> AttemptResult {
        // Unspecified outcomes can't be combined numerically: a failure
        // anywhere fails the attempt, an unquantified success leaves it
        // unquantified.
        if results
            .iter()
            .any(|r| matches!(r, AttemptResult::UnspecifiedFailure))
        {
            return AttemptResult::UnspecifiedFailure;
        }
        if results
            .iter()
            .any(|r| matches!(r, AttemptResult::UnspecifiedSuccess))
        {
            return AttemptResult::UnspecifiedSuccess;
        }
        let rates: Vec<f64> = results
            .iter()
            .map(|r| match r {
                AttemptResult::Rate(rate) => *rate,
                _ => unreachable!("unspecified outcomes handled above"),
            })
            .collect();
        let combined = match self.style {
            AggregationStyle::Min => rates.iter().copied().fold(f64::INFINITY, f64::min),
            AggregationStyle::Average => rates.iter().sum::<f64>() / rates.len() as f64,
            AggregationStyle::Sum => rates.iter().sum(),
        };
        AttemptResult::Rate(combined)
    }
}

impl Attempter for ParallelHarness {
    fn attempt(&mut self, target_score: f64) -> Result<AttemptResult, BenchError> {
        // Sum aggregation splits the target evenly; min and average dispatch
        // it unchanged.
        let instance_target = match self.style {
            AggregationStyle::Sum => target_score / self.workers.len() as f64,
            AggregationStyle::Min | AggregationStyle::Average => target_score,
        };
        for (worker_id, worker) in self.workers.iter().enumerate() {
            worker
                .target_tx
                .send(instance_target)
                .map_err(|_| BenchError::WorkerDisconnected { worker_id })?;
        }
        let mut results = Vec::with_capacity(self.workers.len());
        for (worker_id, worker) in self.workers.iter().enumerate() {
            let result = worker
                .result_rx
                .recv()
                .map_err(|_| BenchError::WorkerDisconnected { worker_id })??;
            results.push(result);
        }
        Ok(self.aggregate(results))
    }

    fn verify(&mut self) -> bool {
        // Workers verify their own instances during shutdown.
        true
    }
}
