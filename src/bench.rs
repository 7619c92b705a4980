//! Benchmark harness: build two random inputs, run every [`Strategy`] on
//! them, report the accumulation times and check the products agree.

use std::io::Write;
use std::time::Duration;

use chrono::Local;
use rand::{rngs::StdRng, SeedableRng};

use crate::error::{MatmulError, Result};
use crate::matrix::BlockedMatrix;
use crate::multiply::Strategy;
use crate::simd;

/// Block-grid dimensions of both benchmark inputs (100×100 blocks of 8×8).
pub const DEFAULT_GRID: usize = 100;

/// Line printed in place of a timing when the operands cannot be multiplied.
pub const MISMATCH_MESSAGE: &str = "Matrices cannot be multiplied.";

/// Benchmark parameters. All sizes are in blocks, not elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BenchConfig {
    pub rows_a: usize,
    pub cols_a: usize,
    pub rows_b: usize,
    pub cols_b: usize,
    /// Seed for the input generator; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            rows_a: DEFAULT_GRID,
            cols_a: DEFAULT_GRID,
            rows_b: DEFAULT_GRID,
            cols_b: DEFAULT_GRID,
            seed: None,
        }
    }
}

impl BenchConfig {
    /// Square `blocks × blocks` inputs on both sides.
    pub fn square(blocks: usize) -> Self {
        Self {
            rows_a: blocks,
            cols_a: blocks,
            rows_b: blocks,
            cols_b: blocks,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

/// Outcome of one strategy. `elapsed` is `None` when the operands were rejected.
#[derive(Clone, Copy, Debug)]
pub struct StrategyRun {
    pub strategy: Strategy,
    pub elapsed: Option<Duration>,
}

#[derive(Clone, Debug)]
pub struct BenchReport {
    pub runs: Vec<StrategyRun>,
    /// Largest relative difference between the naive and vectorized products.
    pub max_relative_error: Option<f32>,
}

impl BenchReport {
    pub fn elapsed(&self, strategy: Strategy) -> Option<Duration> {
        self.runs
            .iter()
            .find(|run| run.strategy == strategy)
            .and_then(|run| run.elapsed)
    }

    /// How many times faster the vectorized strategy ran than the naive one.
    pub fn speedup(&self) -> Option<f64> {
        let naive = self.elapsed(Strategy::Naive)?.as_secs_f64();
        let vectorized = self.elapsed(Strategy::Vectorized)?.as_secs_f64();
        (vectorized > 0.0).then(|| naive / vectorized)
    }
}

/// Runs the benchmark with `S×S` blocks and writes the report to `out`.
///
/// A dimension mismatch is reported as [`MISMATCH_MESSAGE`] and leaves that
/// strategy without a timing; every other error aborts the run.
pub fn run<const S: usize, W: Write + ?Sized>(
    config: &BenchConfig,
    out: &mut W,
) -> Result<BenchReport> {
    writeln!(
        out,
        "Blocked matrix multiplication benchmark, started {}",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    )?;
    writeln!(out, "SIMD backend: {}", simd::backend_name())?;
    writeln!(
        out,
        "A: {}x{} blocks, B: {}x{} blocks, block size {S}x{S}",
        config.rows_a, config.cols_a, config.rows_b, config.cols_b
    )?;

    let mut rng = config.rng();
    let a = BlockedMatrix::<S>::random(config.rows_a, config.cols_a, &mut rng)?;
    let b = BlockedMatrix::<S>::random(config.rows_b, config.cols_b, &mut rng)?;

    let mut runs = Vec::with_capacity(Strategy::ALL.len());
    let mut products = Vec::with_capacity(Strategy::ALL.len());

    for strategy in Strategy::ALL {
        writeln!(out, "\n{strategy}:")?;

        match strategy.multiply(&a, &b) {
            Ok(timed) => {
                writeln!(out, "Time passed: {} seconds", timed.seconds())?;
                runs.push(StrategyRun {
                    strategy,
                    elapsed: Some(timed.elapsed),
                });
                products.push(timed.into_inner());
            }
            Err(MatmulError::DimensionMismatch { .. }) => {
                writeln!(out, "{MISMATCH_MESSAGE}")?;
                runs.push(StrategyRun {
                    strategy,
                    elapsed: None,
                });
            }
            Err(err) => return Err(err),
        }
    }

    let max_relative_error = match products.as_slice() {
        [naive, vectorized] => naive.max_relative_error(vectorized),
        _ => None,
    };

    let report = BenchReport {
        runs,
        max_relative_error,
    };

    if let (Some(speedup), Some(error)) = (report.speedup(), report.max_relative_error) {
        writeln!(
            out,
            "\nSpeedup: {speedup:.2}x, max relative difference: {error:e}"
        )?;
    }

    Ok(report)
}
