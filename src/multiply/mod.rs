//! Block matrix multiplication strategies.
//!
//! Both strategies share the same outer structure, implemented once in
//! [`accumulate_blocks`]:
//!
//! 1. Check that the inner block dimensions agree (`A.block_cols == B.block_rows`).
//!    Nothing is allocated when they don't.
//! 2. Allocate a zeroed result grid of `A.block_rows × B.block_cols` blocks.
//! 3. Start the clock, visit every block triple `(i, j, k)` in `i, j, k` order
//!    and hand `C[i][j] += A[i][k] · B[k][j]` to the strategy's block kernel,
//!    then stop the clock.
//!
//! Only step 3 is timed, so allocation cost never shows up in the comparison.

use std::fmt;
use std::time::{Duration, Instant};

use crate::block::Block;
use crate::error::{dimension_mismatch, Result};
use crate::matrix::BlockedMatrix;

pub mod naive;
pub mod vectorized;

/// A multiplication result together with the time spent accumulating it.
#[derive(Clone, Debug)]
pub struct Timed<T> {
    pub value: T,
    pub elapsed: Duration,
}

impl<T> Timed<T> {
    /// Elapsed accumulation time in seconds.
    pub fn seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

/// Fails with [`crate::MatmulError::DimensionMismatch`] unless `a` can be multiplied by `b`.
pub fn check_dimensions<const S: usize>(
    a: &BlockedMatrix<S>,
    b: &BlockedMatrix<S>,
) -> Result<()> {
    if a.block_cols() != b.block_rows() {
        return Err(dimension_mismatch(
            (a.block_rows(), a.block_cols()),
            (b.block_rows(), b.block_cols()),
        ));
    }
    Ok(())
}

/// Runs the shared block-triple loop with `kernel` computing `c += a · b` per block.
///
/// The returned duration covers the loop only.
pub fn accumulate_blocks<const S: usize, K>(
    a: &BlockedMatrix<S>,
    b: &BlockedMatrix<S>,
    mut kernel: K,
) -> Result<Timed<BlockedMatrix<S>>>
where
    K: FnMut(&mut Block<S>, &Block<S>, &Block<S>),
{
    check_dimensions(a, b)?;

    let (rows, cols, inner) = (a.block_rows(), b.block_cols(), a.block_cols());
    let mut c = BlockedMatrix::zeros(rows, cols)?;

    let start = Instant::now();

    for i in 0..rows {
        for j in 0..cols {
            for k in 0..inner {
                kernel(c.block_mut(i, j), a.block(i, k), b.block(k, j));
            }
        }
    }

    let elapsed = start.elapsed();

    Ok(Timed { value: c, elapsed })
}

/// The two multiplication strategies compared by the benchmark.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Scalar six-loop accumulation.
    Naive,
    /// Row-at-a-time SIMD accumulation on the native backend.
    Vectorized,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::Naive, Strategy::Vectorized];

    /// Heading printed above this strategy's timing.
    pub fn label(self) -> &'static str {
        match self {
            Strategy::Naive => "Naive Multiplication",
            Strategy::Vectorized => "Manual Vectorization",
        }
    }

    /// Multiplies `a · b` and reports the accumulation time.
    pub fn multiply<const S: usize>(
        self,
        a: &BlockedMatrix<S>,
        b: &BlockedMatrix<S>,
    ) -> Result<Timed<BlockedMatrix<S>>> {
        match self {
            Strategy::Naive => naive::multiply_timed(a, b),
            Strategy::Vectorized => vectorized::multiply_timed(a, b),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
