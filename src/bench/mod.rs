// peakbench - Free and Open Source Software Statement
//
// This project, peakbench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/bench/mod.rs
//
// This file declares the bench module: the adaptive score-discovery control
// loop and everything that feeds it. The estimator converges on the highest
// sustainable throughput by issuing alternating lowball/highball attempts and
// interpreting their outcomes.
//
// Tree Location:
// - src/bench/mod.rs (bench module entry point)
// - Submodules: timer, batch, attempt, estimator, runner, parallel

pub mod attempt;
pub mod batch;
pub mod estimator;
pub mod parallel;
pub mod runner;
pub mod timer;

// Re-export key bench types
pub use attempt::{AttemptRunner, Attempter};
pub use estimator::{AttemptRecord, Estimator};
pub use parallel::ParallelHarness;
pub use runner::{BenchRunner, RunOutcome};
pub use timer::PauseTimer;
