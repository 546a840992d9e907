// peakbench - Free and Open Source Software Statement
//
// This project, peakbench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/utils/mod.rs
//
// This file declares the utils module for peakbench, providing formatting
// helpers shared by the progress reporter and the CLI summary.
//
// Tree Location:
// - src/utils/mod.rs (utility module entry point)
// - Submodules: format

pub mod format;

pub use format::FormatUtils;
