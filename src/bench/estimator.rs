// peakbench - Free and Open Source Software Statement
//
// This project, peakbench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/bench/estimator.rs
//
// This file implements the bisection control loop state: a running throughput
// estimate with an uncertainty band, updated from the outcome of alternating
// lowball/highball attempts. It is a pure state machine; executing attempts
// and pacing phases is the runner's job.
//
// Tree Location:
// - src/bench/estimator.rs (score estimate and uncertainty update)
// - Depends on: core/options, workload (AttemptResult)

use crate::core::options::TunerOptions;
use crate::workload::AttemptResult;

/// Read-only snapshot of one attempt's effect on the estimator, handed to the
/// reporter after every update.
#[derive(Debug, Clone, Copy)]
pub struct AttemptRecord {
    pub target: f64,
    pub result: AttemptResult,
    pub lowball: bool,
    pub run_succeeded: bool,
    /// Did the outcome match what the lowball/highball choice predicted?
    pub guess_was_correct: bool,
    pub old_uncertainty: f64,
    pub estimate: f64,
    pub uncertainty: f64,
    pub max_peak: f64,
    pub recent_peak: f64,
}

/// The core self-tuning trial-and-error state.
///
/// `estimate` is the current best guess of the sustainable score, always
/// positive while running (it may reach infinity for an immeasurably fast
/// workload). `uncertainty` is the fractional half-width of the confidence
/// band around it. Peaks track the highest target at which an attempt has
/// ever / recently succeeded; a failure below the recent peak invalidates it,
/// which is how a mid-run regression (a GC pause, a thermal dip) is absorbed.
#[derive(Debug, Clone)]
pub struct Estimator {
    estimate: f64,
    uncertainty: f64,
    max_peak: f64,
    recent_peak: f64,
    max_peak_uncertainty: f64,
    opts: TunerOptions,
}

impl Estimator {
    pub fn new(opts: &TunerOptions) -> Self {
        Self {
            estimate: opts.initial_estimate,
            uncertainty: opts.initial_uncertainty,
            max_peak: f64::NEG_INFINITY,
            recent_peak: f64::NEG_INFINITY,
            max_peak_uncertainty: f64::INFINITY,
            opts: opts.clone(),
        }
    }

    pub fn estimate(&self) -> f64 {
        self.estimate
    }

    pub fn uncertainty(&self) -> f64 {
        self.uncertainty
    }

    pub fn max_peak(&self) -> f64 {
        self.max_peak
    }

    pub fn recent_peak(&self) -> f64 {
        self.recent_peak
    }

    /// Smallest uncertainty observed while the recent peak was also the max
    /// peak. Diagnostic only; never consulted by the convergence logic.
    pub fn max_peak_uncertainty(&self) -> f64 {
        self.max_peak_uncertainty
    }

    /// Lower and upper edges of the current confidence band.
    pub fn bracket(&self) -> (f64, f64) {
        (
            self.estimate * (1.0 - self.uncertainty / 2.0),
            self.estimate * (1.0 + self.uncertainty / 2.0),
        )
    }

    /// The target score a lowball or highball attempt should aim for.
    pub fn target(&self, lowball: bool) -> f64 {
        let (under, over) = self.bracket();
        if lowball {
            under
        } else {
            over
        }
    }

    /// Finale phase: report a clean peak independent of warmup noise.
    pub fn begin_finale(&mut self) {
        self.max_peak = self.recent_peak;
        self.max_peak_uncertainty = f64::INFINITY;
    }

    /// Fold one attempt outcome into the state and return the snapshot.
    ///
    /// `target` must be the value obtained from [`Estimator::target`] for
    /// this `lowball` flag before the attempt ran.
    pub fn record(&mut self, target: f64, lowball: bool, result: AttemptResult) -> AttemptRecord {
        let (under, over) = self.bracket();
        let old_estimate = self.estimate;
        let old_uncertainty = self.uncertainty;

        // Four-way outcome classification. A concrete rate updates the
        // estimate directly; unspecified outcomes nudge it by the band width.
        let run_succeeded;
        let mut guess_was_correct;
        let mut specified_rate = None;
        match result {
            AttemptResult::Rate(rate) if rate >= target && rate < f64::INFINITY => {
                run_succeeded = true;
                self.record_success(target);
                guess_was_correct = lowball;
                self.estimate = rate;
                specified_rate = Some(rate);
            }
            AttemptResult::UnspecifiedFailure => {
                run_succeeded = false;
                guess_was_correct = !lowball;
                // An unexpected lowball failure implies the estimate itself
                // was too optimistic.
                if lowball {
                    self.estimate *= 1.0 - self.uncertainty;
                }
            }
            AttemptResult::Rate(rate) if rate <= 0.0 => {
                // A zero rate must not become the estimate: it would hit zero
                // and never recover. Treat it like an unspecified failure.
                run_succeeded = false;
                guess_was_correct = !lowball;
                if lowball {
                    self.estimate *= 1.0 - self.uncertainty;
                }
            }
            AttemptResult::Rate(rate) if rate < target => {
                run_succeeded = false;
                guess_was_correct = !lowball;
                self.estimate = rate;
                specified_rate = Some(rate);
            }
            // Infinite measured rates and declared-but-unquantified successes.
            AttemptResult::Rate(_) | AttemptResult::UnspecifiedSuccess => {
                run_succeeded = true;
                self.record_success(target);
                guess_was_correct = lowball;
                if !lowball {
                    self.estimate *= 1.0 + self.uncertainty;
                }
            }
        }

        // Peak bookkeeping: remember the tightest band at which the current
        // best score was confirmed, and drop the recent-peak claim when a
        // failure below it shows a regression.
        if self.recent_peak == self.max_peak && under <= self.max_peak && self.max_peak <= over {
            self.max_peak_uncertainty = self.max_peak_uncertainty.min(old_uncertainty);
        }
        if !run_succeeded && target < self.recent_peak {
            self.recent_peak = f64::NEG_INFINITY;
        }

        // If we thought the workload was infinitely fast and the run
        // succeeded, we were right no matter the lowball flag. Otherwise the
        // loop would chase an already-infinite target ever higher.
        if run_succeeded && target == f64::INFINITY {
            guess_was_correct = true;
        }

        // Uncertainty update. A specified rate implies its own uncertainty;
        // if that exceeds the current band, either adopt it or (tame mode)
        // just bump the band as though the guess was wrong.
        if let Some(rate) = specified_rate {
            let implied_uncertainty = (old_estimate - rate).abs() / target;
            if implied_uncertainty > self.uncertainty {
                if self.opts.tame_uncertainty {
                    self.uncertainty *= self.opts.incorrect_guess_adjustment;
                } else {
                    self.uncertainty = implied_uncertainty;
                }
            } else {
                self.adjust_uncertainty(guess_was_correct);
            }
        } else {
            self.adjust_uncertainty(guess_was_correct);
        }
        self.uncertainty = self.uncertainty.min(self.opts.max_uncertainty);

        AttemptRecord {
            target,
            result,
            lowball,
            run_succeeded,
            guess_was_correct,
            old_uncertainty,
            estimate: self.estimate,
            uncertainty: self.uncertainty,
            max_peak: self.max_peak,
            recent_peak: self.recent_peak,
        }
    }

    fn record_success(&mut self, target: f64) {
        self.recent_peak = nan_safe_max(self.recent_peak, target);
        self.max_peak = nan_safe_max(self.max_peak, target);
    }

    fn adjust_uncertainty(&mut self, guess_was_correct: bool) {
        self.uncertainty *= if guess_was_correct {
            self.opts.correct_guess_adjustment
        } else {
            self.opts.incorrect_guess_adjustment
        };
    }
}

// f64::max would discard an infinite peak in favor of NaN's partner; keep the
// comparison explicit.
fn nan_safe_max(left: f64, right: f64) -> f64 {
    if right > left {
        right
    } else {
        left
    }
}
