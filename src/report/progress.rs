// peakbench - Free and Open Source Software Statement
//
// This project, peakbench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/report/progress.rs
//
// This file implements the progress reporter. After every attempt it formats
// one line from the estimator's read-only snapshot: elapsed time, outcome
// markers, target, estimate, uncertainty and peaks.
//
// Tree Location:
// - src/report/progress.rs (per-attempt progress lines)
// - Depends on: bench/estimator (AttemptRecord), utils/format, log

use crate::bench::estimator::AttemptRecord;
use crate::bench::runner::RunOutcome;
use crate::utils::format::FormatUtils;
use crate::workload::AttemptResult;
use log::info;
use std::time::{Duration, Instant};

const LOG_TARGET: &str = "peakbench::progress";

/// Formats progress lines from estimator snapshots. Purely a consumer of the
/// core's state; it never feeds anything back into the loop.
pub struct ProgressReporter {
    start_time: Instant,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
        }
    }

    /// Restart the elapsed-time clock at the beginning of a run.
    pub fn begin(&mut self) {
        self.start_time = Instant::now();
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn header(&self) {
        info!(target: LOG_TARGET,
            "          Target\tEst\tUncert%\tMaxPeak\tPeak\t%paused"
        );
    }

    /// One line per attempt. Markers: '?' unspecified outcome, '>' success /
    /// '<' failure, '!' the outcome defied the lowball/highball prediction.
    pub fn attempt_line(&self, record: &AttemptRecord, paused_fraction: f64) {
        let unspecified = !matches!(record.result, AttemptResult::Rate(_));
        let paused = if paused_fraction > 0.0 {
            format!("\t{}", FormatUtils::format_percentage(paused_fraction))
        } else {
            String::new()
        };
        info!(target: LOG_TARGET,
            "  {}: {}{}{} {}\t{}\t{}\t{}\t{}{}",
            FormatUtils::format_elapsed(self.elapsed()),
            if unspecified { '?' } else { ' ' },
            if record.run_succeeded { '>' } else { '<' },
            if record.guess_was_correct { ' ' } else { '!' },
            FormatUtils::format_score(record.target),
            FormatUtils::format_score(record.estimate),
            FormatUtils::format_percentage(record.uncertainty),
            FormatUtils::format_score(record.max_peak),
            FormatUtils::format_score(record.recent_peak),
            paused,
        );
    }

    /// Final score block, or an error line when verification failed.
    pub fn final_score(&self, outcome: &RunOutcome) {
        if !outcome.verified {
            info!(target: LOG_TARGET, "ERROR: {} failed verification.", outcome.workload);
            return;
        }
        info!(target: LOG_TARGET,
            "🏁 {} score: {} ({} attempts in {:.1}s)",
            outcome.workload,
            FormatUtils::format_score(outcome.peak_score),
            outcome.attempts,
            outcome.elapsed.as_secs_f64(),
        );
        info!(target: LOG_TARGET,
            "   uncertainty: {}%",
            FormatUtils::format_percentage(outcome.uncertainty)
        );
        if let Some(reason) = &outcome.aborted {
            info!(target: LOG_TARGET, "   (run ended early: {})", reason);
        }
    }
}
