// peakbench - Free and Open Source Software Statement
//
// This project, peakbench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/core/options.rs
//
// This file defines the tuning knobs of the score-discovery loop. Every field
// has a default; the CLI overrides individual values and the whole profile is
// serialized into the score report so a run can be reproduced.
//
// Tree Location:
// - src/core/options.rs (estimator and batch tuning options)
// - Depends on: serde

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tuning options for the estimator, the batch sizer and the attempt loop.
///
/// The defaults are deliberately conservative: they favor stable convergence
/// over fast runs, and every one of them can be overridden from the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TunerOptions {
    /// Starting guess for the sustainable score, in iterations per second.
    pub initial_estimate: f64,
    /// Starting fractional half-width of the confidence band.
    pub initial_uncertainty: f64,

    /// Warmup runs at least this long even if uncertainty converges earlier.
    pub min_warmup: Duration,
    /// Warmup never runs longer than this, converged or not.
    pub max_warmup: Duration,
    /// Uncertainty level at which warmup is considered converged.
    pub warmup_target_uncertainty: f64,
    /// Number of attempts in the ballpark phase (paired highball/lowball).
    pub ballpark_iterations: u32,
    /// Number of attempts in the finale phase. Defaults to half the ballpark.
    pub finale_iterations: u32,

    /// Uncertainty multiplier applied when an attempt matched its prediction.
    pub correct_guess_adjustment: f64,
    /// Uncertainty multiplier applied when an attempt defied its prediction.
    pub incorrect_guess_adjustment: f64,
    /// Ceiling on uncertainty after every update.
    pub max_uncertainty: f64,
    /// When true, an out-of-band implied uncertainty only bumps uncertainty
    /// by the incorrect-guess factor instead of being adopted outright. Keeps
    /// one noisy sample from spiking the band.
    pub tame_uncertainty: bool,

    /// Desired wall-clock duration of one measured batch.
    pub batch_target_duration: Duration,
    /// When true, batch sizing compensates for paused time so the *total*
    /// elapsed time of a batch approximates the target duration.
    pub target_includes_pauses: bool,
    /// Floor on the unpaused fraction used for batch sizing.
    pub min_unpaused_factor: f64,
    /// Maximum tolerated ratio of elapsed time to the batch target before a
    /// pause-heavy workload is declared unmeasurable.
    pub max_time_dilation: f64,
    /// When true, measured rates are collapsed to unspecified success/failure
    /// against the target instead of being reported numerically.
    pub unspecified_estimate: bool,

    /// Loop splitting: avoid per-loop iteration counts oscillating near the
    /// maximum-per-loop boundary.
    pub threshold_mode: bool,
    /// Must be >= 1. Increasing this factor lowers the threshold.
    pub threshold_factor: u32,
    /// Start looped batches with the timer paused so setup is excluded.
    pub start_paused: bool,

    /// Seed for deterministic workload input generation.
    pub random_seed: u64,
}

impl Default for TunerOptions {
    fn default() -> Self {
        Self {
            initial_estimate: 100.0,
            initial_uncertainty: 0.2,
            min_warmup: Duration::from_secs(10),
            max_warmup: Duration::from_secs(150),
            warmup_target_uncertainty: 0.1,
            ballpark_iterations: 20,
            finale_iterations: 10,
            correct_guess_adjustment: 0.6,
            incorrect_guess_adjustment: 1.2,
            max_uncertainty: 0.40,
            tame_uncertainty: false,
            batch_target_duration: Duration::from_millis(1000),
            target_includes_pauses: true,
            min_unpaused_factor: 0.2,
            max_time_dilation: 10.0,
            unspecified_estimate: false,
            threshold_mode: true,
            threshold_factor: 2,
            start_paused: true,
            random_seed: 123,
        }
    }
}

impl TunerOptions {
    /// Expected run length used to derive the default watchdog deadline:
    /// twice the warmup cap plus twice the nominal ballpark duration.
    pub fn expected_run_duration(&self) -> Duration {
        let ballpark = self.batch_target_duration * (self.ballpark_iterations * 2);
        (self.max_warmup + ballpark) * 2
    }
}
