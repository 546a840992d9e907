// peakbench - Free and Open Source Software Statement
//
// This project, peakbench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/core/mod.rs
//
// This file declares the core module for peakbench. It groups the fundamental
// data structures shared across the harness: command-line arguments, tuner
// options, and the error surface.
//
// Tree Location:
// - src/core/mod.rs (core module entry point)
// - Submodules: types, options, error

pub mod error;
pub mod options;
pub mod types;

// Re-export key core types
pub use error::BenchError;
pub use options::TunerOptions;
pub use types::{AggregationStyle, Args, RunSummary, WorkloadKind};
