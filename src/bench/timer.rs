// peakbench - Free and Open Source Software Statement
//
// This project, peakbench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/bench/timer.rs
//
// This file implements the pause/resume timer. A workload excludes time spent
// on non-measured work (regenerating inputs, setup between loops) by pausing
// the timer, without tracking absolute timestamps itself.
//
// Tree Location:
// - src/bench/timer.rs (pause/resume timing logic)
// - Depends on: std

use std::time::{Duration, Instant};

/// Tracks paused intervals within one measured batch.
///
/// Both `pause` and `start` are idempotent. If you want the timer paused,
/// just call `pause` and don't worry about the current state; it will work.
/// Workloads are arbitrary code, so redundant calls must never corrupt the
/// accounting.
#[derive(Debug, Default)]
pub struct PauseTimer {
    paused: bool,
    pause_start: Option<Instant>,
    pause_total: Duration,
}

impl PauseTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zeroes the accumulated pause duration. Called once per attempt before
    /// the workload runs.
    pub fn reset(&mut self) {
        self.paused = false;
        self.pause_start = None;
        self.pause_total = Duration::ZERO;
    }

    /// Resume measurement. If currently paused, folds the elapsed pause
    /// interval into the accumulated total. Returns the current timestamp.
    pub fn start(&mut self) -> Instant {
        let now = Instant::now();
        self.start_at(now);
        now
    }

    /// Pause measurement. If not already paused, records the pause start.
    /// Returns the current timestamp.
    pub fn pause(&mut self) -> Instant {
        let now = Instant::now();
        self.pause_at(now);
        now
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Accumulated pause time, excluding any still-open pause interval.
    pub fn pause_total(&self) -> Duration {
        self.pause_total
    }

    /// The timestamp measurement effectively ended at: the pause start if the
    /// timer is still paused when the attempt returns, else the return time.
    pub fn effective_end(&self, return_time: Instant) -> Instant {
        match (self.paused, self.pause_start) {
            (true, Some(at)) => at,
            _ => return_time,
        }
    }

    /// Unpaused elapsed time for an attempt that started at `start` and
    /// returned at `return_time`.
    pub fn unpaused_elapsed(&self, start: Instant, return_time: Instant) -> Duration {
        let end = self.effective_end(return_time);
        end.saturating_duration_since(start)
            .saturating_sub(self.pause_total)
    }

    pub(crate) fn start_at(&mut self, now: Instant) {
        if self.paused {
            if let Some(at) = self.pause_start {
                self.pause_total += now.saturating_duration_since(at);
            }
        }
        self.paused = false;
    }

    pub(crate) fn pause_at(&mut self, now: Instant) {
        if !self.paused {
            self.pause_start = Some(now);
            self.paused = true;
        }
    }
}
