// peakbench - Free and Open Source Software Statement
//
// This project, peakbench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/bench/batch.rs
//
// This file implements batch sizing: translating a target throughput into a
// concrete iteration count for one measured call, and splitting that count
// into bounded loops for workloads with non-linear per-iteration cost.
//
// Tree Location:
// - src/bench/batch.rs (batch sizing logic)
// - Depends on: core/options

use crate::core::options::TunerOptions;

/// Number of iterations to run in one measured call for `target_score`.
///
/// When the target includes pauses, the rate is scaled down by the observed
/// unpaused fraction (floored at `min_unpaused_factor`) so the *total*
/// elapsed time of the batch, pauses included, approximates the batch target
/// duration. Never returns zero; saturates instead of overflowing for
/// extreme scores.
pub fn target_iterations(
    target_score: f64,
    unpaused_fraction: f64,
    opts: &TunerOptions,
) -> u64 {
    let rate = if opts.target_includes_pauses {
        target_score * unpaused_fraction.max(opts.min_unpaused_factor)
    } else {
        target_score
    };
    let iterations = rate * opts.batch_target_duration.as_millis() as f64 / 1000.0;
    // Float-to-int casts saturate, which handles both infinity and overflow.
    (iterations as u64).max(1)
}

/// A total iteration count split into bounded loops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopSplit {
    pub num_loops: u64,
    pub iterations_per_loop: u32,
}

impl LoopSplit {
    pub fn total(&self) -> u64 {
        self.num_loops * self.iterations_per_loop as u64
    }
}

/// Split `num_iterations` into loops of at most `max_per_loop` iterations.
///
/// Threshold mode prevents the per-loop count from oscillating within a range
/// determined by the threshold factor: once the total crosses
/// `max_per_loop^2 / threshold_factor`, the maximum per-loop value is always
/// used. The default factor of 2 stops the count flipping non-uniformly
/// between `max_per_loop` and `max_per_loop - 1` just past the threshold,
/// which would otherwise destabilize measurement.
pub fn split_loops(
    num_iterations: u64,
    max_per_loop: u32,
    threshold_mode: bool,
    threshold_factor: u32,
) -> LoopSplit {
    let total = num_iterations.max(1);
    let max_per_loop = max_per_loop.max(1) as u64;
    let num_loops = (total - 1) / max_per_loop + 1;

    let iterations_per_loop = if threshold_mode {
        let threshold = max_per_loop * (max_per_loop / threshold_factor.max(1) as u64);
        if total < threshold {
            (total / num_loops) as u32
        } else {
            max_per_loop as u32
        }
    } else {
        (total / num_loops) as u32
    };

    LoopSplit {
        num_loops,
        iterations_per_loop,
    }
}
