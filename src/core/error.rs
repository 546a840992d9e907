// peakbench - Free and Open Source Software Statement
//
// This project, peakbench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/core/error.rs
//
// This file defines the error surface of the peakbench harness. Interruption
// and timing pathology both unwind the attempt loop; the runner reports the
// best peak found so far instead of crashing.
//
// Tree Location:
// - src/core/error.rs (harness error types)
// - Depends on: thiserror

use thiserror::Error;

/// Errors that can abort a benchmark attempt or an entire run.
#[derive(Error, Debug)]
pub enum BenchError {
    /// Cooperative cancellation. Raised when the cancel token fires (Ctrl-C,
    /// parallel teardown). The run ends cleanly with the current peak.
    #[error("benchmark interrupted: {reason}")]
    Interrupted { reason: String },

    /// The workload spends so much time paused that its true throughput
    /// cannot be measured in bounded time. Not retried.
    #[error(
        "workload is spending too much time paused ({elapsed_ms}ms elapsed against a \
         {batch_ms}ms batch target); try raising --max-time-dilation if you don't mind \
         long-running batches"
    )]
    TimingPathology { elapsed_ms: u64, batch_ms: u64 },

    /// A parallel worker thread hung up before replying.
    #[error("parallel worker {worker_id} disconnected")]
    WorkerDisconnected { worker_id: usize },
}

impl BenchError {
    pub fn interrupted(reason: impl Into<String>) -> Self {
        BenchError::Interrupted {
            reason: reason.into(),
        }
    }

    /// True when the error is a clean cooperative shutdown rather than a
    /// measurement pathology.
    pub fn is_interruption(&self) -> bool {
        matches!(self, BenchError::Interrupted { .. })
    }
}
