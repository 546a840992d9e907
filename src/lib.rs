// peakbench - Free and Open Source Software Statement
//
// This project, peakbench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/lib.rs
//
// This file serves as the main library entry point for peakbench, located at
// the root of the source tree. It exports all public modules and types that
// other crates or binaries can use.
//
// Tree Location:
// - src/lib.rs (root library file)
// - Exports modules: core, bench, workload, report, utils

pub mod bench;
pub mod core;
pub mod report;
pub mod utils;
pub mod workload;

// Re-export commonly used types at the crate root for convenience
pub use crate::bench::estimator::Estimator;
pub use crate::bench::runner::{BenchRunner, RunOutcome};
pub use crate::core::error::BenchError;
pub use crate::core::options::TunerOptions;
pub use crate::workload::{AttemptResult, CancelToken, Workload};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;
