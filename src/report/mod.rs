// peakbench - Free and Open Source Software Statement
//
// This project, peakbench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/report/mod.rs
//
// This file declares the report module: per-attempt progress lines consumed
// from the estimator's snapshots, and the JSON score report file written at
// the end of a run.
//
// Tree Location:
// - src/report/mod.rs (report module entry point)
// - Submodules: progress, score_file

pub mod progress;
pub mod score_file;

pub use progress::ProgressReporter;
pub use score_file::{ScoreFileError, ScoreFileManager};
