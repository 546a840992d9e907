// peakbench - Free and Open Source Software Statement
//
// This project, peakbench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/workload/sort.rs
//
// This file implements the sort demo workload: each loop sorts a freshly
// shuffled array, pausing the timer while the input is regenerated so only
// the sort itself is measured. One iteration is one sorted element, so the
// per-iteration cost grows with the loop size (n log n), which is exactly
// what the looped batch path exists for.
//
// Tree Location:
// - src/workload/sort.rs (n log n sort workload, looped batching)
// - Depends on: rand

use crate::bench::timer::PauseTimer;
use crate::core::error::BenchError;
use crate::workload::{seeded_rng, CancelToken, LoopedWorkload};
use rand::rngs::StdRng;
use rand::Rng;

const MAX_ELEMENTS_PER_SORT: u32 = 1 << 16;

/// Sorts shuffled u64 arrays, regenerating the input under a paused timer.
pub struct SortWorkload {
    rng: StdRng,
    scratch: Vec<u64>,
    sorted_ok: bool,
}

impl SortWorkload {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: seeded_rng(seed),
            scratch: Vec::new(),
            sorted_ok: true,
        }
    }
}

impl LoopedWorkload for SortWorkload {
    fn name(&self) -> &str {
        "sort"
    }

    fn max_iterations_per_loop(&self) -> u32 {
        MAX_ELEMENTS_PER_SORT
    }

    fn run_loops(
        &mut self,
        num_loops: u64,
        iterations_per_loop: u32,
        timer: &mut PauseTimer,
        cancel: &CancelToken,
    ) -> Result<u64, BenchError> {
        let len = iterations_per_loop as usize;
        let mut completed = 0u64;
        for _ in 0..num_loops {
            cancel.check()?;

            // Input regeneration is setup, not measured work. The pause is
            // idempotent, so it is harmless that the adapter may already
            // have paused us at batch start.
            timer.pause();
            self.scratch.clear();
            self.scratch.extend((0..len).map(|_| self.rng.gen::<u64>()));
            timer.start();

            self.scratch.sort_unstable();
            completed += len as u64;

            // Check sortedness off the clock; it would otherwise inflate the
            // measured cost by O(n) per loop.
            timer.pause();
            if !self.scratch.windows(2).all(|w| w[0] <= w[1]) {
                self.sorted_ok = false;
            }
        }
        Ok(completed)
    }

    fn verify(&mut self) -> bool {
        self.sorted_ok
    }
}
