//! Scalar block multiplication.
//!
//! The textbook six-loop form: block row `i`, block column `j`, inner block
//! `k`, then intra-block row `l`, column `m` and inner index `n`:
//!
//! ```text
//! C[i][j][l][m] += A[i][k][l][n] * B[k][j][n][m]
//! ```
//!
//! Every element is summed over `k` first and `n` second. This is the
//! correctness baseline the vectorized kernel is compared against.

use crate::block::Block;
use crate::error::Result;
use crate::matrix::BlockedMatrix;
use crate::multiply::{accumulate_blocks, Timed};

/// `c += a · b` for one block triple, one scalar multiply-add at a time.
#[inline]
pub fn block_kernel<const S: usize>(c: &mut Block<S>, a: &Block<S>, b: &Block<S>) {
    for l in 0..S {
        for m in 0..S {
            for n in 0..S {
                c[(l, m)] += a[(l, n)] * b[(n, m)];
            }
        }
    }
}

/// Multiplies `a · b` with the scalar kernel.
///
/// # Errors
///
/// [`crate::MatmulError::DimensionMismatch`] if `a.block_cols() != b.block_rows()`;
/// no result is allocated in that case.
///
/// ```rust
/// use blockmul::{multiply::naive, BlockedMatrix};
///
/// let ones: BlockedMatrix = BlockedMatrix::filled(1, 1, 1.0).unwrap();
/// let product = naive::multiply(&ones, &ones).unwrap();
/// assert!(product.values().all(|x| x == 8.0));
/// ```
pub fn multiply<const S: usize>(
    a: &BlockedMatrix<S>,
    b: &BlockedMatrix<S>,
) -> Result<BlockedMatrix<S>> {
    multiply_timed(a, b).map(Timed::into_inner)
}

/// Same as [`multiply`], also returning the time spent in the accumulation loop.
pub fn multiply_timed<const S: usize>(
    a: &BlockedMatrix<S>,
    b: &BlockedMatrix<S>,
) -> Result<Timed<BlockedMatrix<S>>> {
    accumulate_blocks(a, b, block_kernel::<S>)
}
