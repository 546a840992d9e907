// peakbench - Free and Open Source Software Statement
//
// This project, peakbench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: tests/estimator_scenarios.rs
//
// Scenario tests for the bisection estimator: convergence against a steady
// workload, clamping, unspecified-outcome handling, the infinite-target
// guard, and both configurations of the tame-uncertainty branch.

use peakbench::workload::AttemptResult;
use peakbench::{Estimator, TunerOptions};

fn options() -> TunerOptions {
    TunerOptions {
        initial_estimate: 100.0,
        initial_uncertainty: 0.2,
        ..TunerOptions::default()
    }
}

/// Drive one attempt in the given direction against a workload that always
/// measures `capacity`.
fn attempt_steady(est: &mut Estimator, lowball: bool, capacity: f64) -> bool {
    let target = est.target(lowball);
    est.record(target, lowball, AttemptResult::Rate(capacity))
        .guess_was_correct
}

#[test]
fn converges_to_steady_capacity() {
    let opts = options();
    let mut est = Estimator::new(&opts);
    let capacity = 100.0; // matches the initial estimate, so no implied spike

    let mut last_uncertainty = est.uncertainty();
    for round in 0..20 {
        for &lowball in &[false, true] {
            let correct = attempt_steady(&mut est, lowball, capacity);
            assert!(
                correct,
                "round {} ({}) defied its prediction",
                round,
                if lowball { "lowball" } else { "highball" }
            );
        }
        assert!(
            est.uncertainty() < last_uncertainty,
            "uncertainty must strictly decrease while guesses stay correct"
        );
        last_uncertainty = est.uncertainty();
    }
    // The estimate is pinned at the capacity once a lowball succeeds.
    assert!((est.estimate() - capacity).abs() < 1e-9);
    assert!(est.max_peak() <= capacity);
    assert!(est.max_peak() > capacity * 0.8);
}

#[test]
fn uncertainty_stays_clamped() {
    let opts = options();
    let mut est = Estimator::new(&opts);
    // Alternate wildly between huge successes and failures; the band must
    // never leave (0, max_uncertainty].
    for i in 0..50 {
        let lowball = i % 2 == 0;
        let target = est.target(lowball);
        let result = if i % 3 == 0 {
            AttemptResult::Rate(target * 50.0)
        } else {
            AttemptResult::UnspecifiedFailure
        };
        est.record(target, lowball, result);
        assert!(est.uncertainty() > 0.0);
        assert!(est.uncertainty() <= opts.max_uncertainty + 1e-12);
    }
}

#[test]
fn lowball_success_with_faster_workload_spikes_uncertainty() {
    // estimate=100, uncertainty=0.2 -> lowball target 90. The workload
    // measures 150, so implied uncertainty is |100-150|/90 ~ 0.556 > 0.2 and
    // is adopted outright when tame mode is off.
    let opts = options();
    let mut est = Estimator::new(&opts);
    let target = est.target(true);
    assert!((target - 90.0).abs() < 1e-9);

    let record = est.record(target, true, AttemptResult::Rate(150.0));
    assert!(record.run_succeeded);
    assert!(record.guess_was_correct);
    assert!((record.estimate - 150.0).abs() < 1e-9);
    let implied = (100.0_f64 - 150.0).abs() / 90.0;
    let expected = implied.min(opts.max_uncertainty);
    assert!((est.uncertainty() - expected).abs() < 1e-9);
}

#[test]
fn tame_mode_bumps_uncertainty_instead_of_adopting_it() {
    let opts = TunerOptions {
        tame_uncertainty: true,
        ..options()
    };
    let mut est = Estimator::new(&opts);
    let target = est.target(true);

    est.record(target, true, AttemptResult::Rate(150.0));
    // Tame mode ignores the implied value and scales by the incorrect-guess
    // factor: 0.2 * 1.2 = 0.24.
    assert!((est.uncertainty() - 0.2 * opts.incorrect_guess_adjustment).abs() < 1e-9);
}

#[test]
fn unspecified_failure_shrinks_estimate_on_lowball_only() {
    let opts = options();

    let mut est = Estimator::new(&opts);
    let target = est.target(true);
    let record = est.record(target, true, AttemptResult::UnspecifiedFailure);
    assert!(!record.run_succeeded);
    assert!(!record.guess_was_correct);
    assert!((est.estimate() - 100.0 * (1.0 - 0.2)).abs() < 1e-9);

    let mut est = Estimator::new(&opts);
    let target = est.target(false);
    let record = est.record(target, false, AttemptResult::UnspecifiedFailure);
    assert!(!record.run_succeeded);
    assert!(record.guess_was_correct);
    assert!((est.estimate() - 100.0).abs() < 1e-9, "highball failure leaves the estimate alone");
}

#[test]
fn zero_rate_is_treated_as_unspecified_failure() {
    // A measured rate of zero must never become the estimate; it would hit
    // zero and never recover.
    let opts = options();
    let mut est = Estimator::new(&opts);
    let target = est.target(true);
    est.record(target, true, AttemptResult::Rate(0.0));
    assert!(est.estimate() > 0.0);
}

#[test]
fn specified_failure_adopts_the_measured_rate() {
    let opts = options();
    let mut est = Estimator::new(&opts);
    let target = est.target(false); // 110
    let record = est.record(target, false, AttemptResult::Rate(70.0));
    assert!(!record.run_succeeded);
    assert!(record.guess_was_correct);
    assert!((est.estimate() - 70.0).abs() < 1e-9);
}

#[test]
fn infinite_target_success_is_always_a_correct_guess() {
    let opts = TunerOptions {
        initial_estimate: f64::INFINITY,
        ..options()
    };
    let mut est = Estimator::new(&opts);
    for &lowball in &[true, false] {
        let target = est.target(lowball);
        assert_eq!(target, f64::INFINITY);
        let record = est.record(target, lowball, AttemptResult::Rate(f64::INFINITY));
        assert!(record.run_succeeded);
        assert!(
            record.guess_was_correct,
            "an infinitely fast workload must not be chased ever higher"
        );
    }
}

#[test]
fn failure_below_recent_peak_resets_it() {
    let opts = options();
    let mut est = Estimator::new(&opts);

    // Establish a peak with a lowball success.
    let target = est.target(true);
    est.record(target, true, AttemptResult::Rate(target));
    let peak = est.recent_peak();
    assert!(peak > 0.0);

    // Now fail well below it; the recent-peak claim is invalidated while the
    // all-time max peak survives.
    let target = est.target(true);
    assert!(target < peak);
    est.record(target, true, AttemptResult::UnspecifiedFailure);
    assert_eq!(est.recent_peak(), f64::NEG_INFINITY);
    assert_eq!(est.max_peak(), peak);
}

#[test]
fn finale_resets_peak_tracking() {
    let opts = options();
    let mut est = Estimator::new(&opts);
    let target = est.target(true);
    est.record(target, true, AttemptResult::Rate(target));
    est.begin_finale();
    assert_eq!(est.max_peak(), est.recent_peak());
    assert_eq!(est.max_peak_uncertainty(), f64::INFINITY);
}
