// peakbench - Free and Open Source Software Statement
//
// This project, peakbench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/workload/mod.rs
//
// This file declares the workload module: the contract between the harness
// and the units of work it measures, the cancel token used for cooperative
// shutdown, and the built-in demo workloads.
//
// Tree Location:
// - src/workload/mod.rs (workload trait and supporting types)
// - Submodules: sha3x, sha256, sort
// - Depends on: rand

pub mod sha256;
pub mod sha3x;
pub mod sort;

pub use sha256::Sha256dWorkload;
pub use sha3x::Sha3xWorkload;
pub use sort::SortWorkload;

use crate::bench::batch;
use crate::bench::timer::PauseTimer;
use crate::core::error::BenchError;
use crate::core::options::TunerOptions;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Outcome of one measured attempt, as fed into the estimator.
///
/// Workloads that can quantify their own throughput report `Rate`; workloads
/// that only know whether they kept up report the unspecified variants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttemptResult {
    /// Measured throughput in iterations per second. An infinite rate means
    /// "immeasurably fast" and is treated as an unquantified success.
    Rate(f64),
    /// The attempt succeeded but declines to say by how much.
    UnspecifiedSuccess,
    /// The attempt failed but declines to say by how much.
    UnspecifiedFailure,
}

/// Cooperative cancellation token shared between the harness, the workload
/// and the signal handler. Workloads check it at loop boundaries.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Returns an interruption error once the token has fired.
    pub fn check(&self) -> Result<(), BenchError> {
        if self.is_cancelled() {
            Err(BenchError::interrupted("cancel token fired"))
        } else {
            Ok(())
        }
    }
}

/// A unit of work the harness can measure.
///
/// `run_batch` performs the requested number of iterations and reports how
/// many actually completed. It may call `pause`/`start` on the shared timer
/// any number of times; both are idempotent, so redundant calls are harmless.
/// It should check the cancel token at loop boundaries and bail out with
/// `BenchError::Interrupted` when it fires.
pub trait Workload: Send {
    fn name(&self) -> &str;

    fn run_batch(
        &mut self,
        iterations: u64,
        timer: &mut PauseTimer,
        cancel: &CancelToken,
    ) -> Result<u64, BenchError>;

    /// Called once at the very end of a run to confirm output correctness.
    /// A `false` result makes the run report an error instead of a score.
    fn verify(&mut self) -> bool {
        true
    }
}

// Boxed workloads forward the trait so factories can hand out trait objects.
impl Workload for Box<dyn Workload> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn run_batch(
        &mut self,
        iterations: u64,
        timer: &mut PauseTimer,
        cancel: &CancelToken,
    ) -> Result<u64, BenchError> {
        (**self).run_batch(iterations, timer, cancel)
    }

    fn verify(&mut self) -> bool {
        (**self).verify()
    }
}

/// A workload whose per-iteration cost is non-linear in the batch size (for
/// example n log n sorts). The harness splits a total iteration count into
/// `num_loops` calls of bounded size so one loop never exceeds
/// `max_iterations_per_loop`.
pub trait LoopedWorkload: Send {
    fn name(&self) -> &str;

    fn max_iterations_per_loop(&self) -> u32;

    fn run_loops(
        &mut self,
        num_loops: u64,
        iterations_per_loop: u32,
        timer: &mut PauseTimer,
        cancel: &CancelToken,
    ) -> Result<u64, BenchError>;

    fn verify(&mut self) -> bool {
        true
    }
}

/// Adapts a [`LoopedWorkload`] to the flat [`Workload`] contract by splitting
/// the batch with the loop sizer. Starts the batch paused when configured, so
/// extremely fast loops are not dominated by setup time.
pub struct LoopedAdapter<W: LoopedWorkload> {
    inner: W,
    threshold_mode: bool,
    threshold_factor: u32,
    start_paused: bool,
}

impl<W: LoopedWorkload> LoopedAdapter<W> {
    pub fn new(inner: W, opts: &TunerOptions) -> Self {
        Self {
            inner,
            threshold_mode: opts.threshold_mode,
            threshold_factor: opts.threshold_factor,
            start_paused: opts.start_paused,
        }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: LoopedWorkload> Workload for LoopedAdapter<W> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn run_batch(
        &mut self,
        iterations: u64,
        timer: &mut PauseTimer,
        cancel: &CancelToken,
    ) -> Result<u64, BenchError> {
        if self.start_paused {
            timer.pause();
        }
        let split = batch::split_loops(
            iterations,
            self.inner.max_iterations_per_loop(),
            self.threshold_mode,
            self.threshold_factor,
        );
        self.inner
            .run_loops(split.num_loops, split.iterations_per_loop, timer, cancel)
    }

    fn verify(&mut self) -> bool {
        self.inner.verify()
    }
}

/// A workload built from a closure, mostly useful in tests and quick
/// experiments.
pub struct FnWorkload<F> {
    name: String,
    f: F,
}

impl<F> FnWorkload<F>
where
    F: FnMut(u64, &mut PauseTimer, &CancelToken) -> Result<u64, BenchError> + Send,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> Workload for FnWorkload<F>
where
    F: FnMut(u64, &mut PauseTimer, &CancelToken) -> Result<u64, BenchError> + Send,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn run_batch(
        &mut self,
        iterations: u64,
        timer: &mut PauseTimer,
        cancel: &CancelToken,
    ) -> Result<u64, BenchError> {
        (self.f)(iterations, timer, cancel)
    }
}

/// Deterministic RNG for workload input generation; same seed, same inputs.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// How often batch loops poll the cancel token, in iterations.
pub const CANCEL_CHECK_INTERVAL: u64 = 4096;
