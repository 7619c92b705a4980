//! Row-at-a-time SIMD block multiplication.
//!
//! For a block triple `(i, j, k)` and an intra-block row `l`, row `l` of
//! `C[i][j]` is updated as a linear combination of the rows of `B[k][j]`:
//!
//! ```text
//! C[l][..] += A[l][m] * B[m][..]    for m in 0..S
//! ```
//!
//! Each step broadcasts the scalar `A[l][m]` across a vector, loads a chunk
//! of row `m` of `B`, multiplies, and adds into an accumulator holding the
//! matching chunk of `C`'s row. The accumulator is loaded from `C` once and
//! stored back once per chunk. Multiply and add stay separate instructions, so
//! every element sees the same sequence of roundings as the scalar kernel.
//!
//! The block loop reaches the kernel through [`BlockKernel::kernel`]. On the
//! AVX2 backend that entry point is a `#[target_feature(enable = "avx2")]`
//! function, so the intrinsics inline into the kernel body even when the
//! crate is built without `-C target-cpu=native`.

use crate::block::Block;
use crate::error::{check_block_size, Result};
use crate::matrix::BlockedMatrix;
use crate::multiply::{accumulate_blocks, Timed};
use crate::simd::{scalar, NativeF32, SimdVector};

#[cfg(all(avx2, any(target_arch = "x86", target_arch = "x86_64")))]
use crate::simd::avx2::f32x8::F32x8 as Avx2F32x8;

#[cfg(all(neon, target_arch = "aarch64"))]
use crate::simd::neon::f32x4::F32x4 as NeonF32x4;

/// Vector backends the vectorized multiplier can drive.
///
/// The default [`BlockKernel::kernel`] runs [`block_kernel`] directly. A
/// backend whose intrinsics need CPU features the build does not enable
/// globally overrides it with a `#[target_feature]` entry point.
pub trait BlockKernel: SimdVector {
    /// `c += a · b` for one block triple.
    #[inline(always)]
    fn kernel<const S: usize>(c: &mut Block<S>, a: &Block<S>, b: &Block<S>) {
        block_kernel::<Self, S>(c, a, b)
    }
}

impl BlockKernel for scalar::F32x8 {}

#[cfg(all(neon, target_arch = "aarch64"))]
impl BlockKernel for NeonF32x4 {}

#[cfg(all(avx2, any(target_arch = "x86", target_arch = "x86_64")))]
impl BlockKernel for Avx2F32x8 {
    #[inline]
    fn kernel<const S: usize>(c: &mut Block<S>, a: &Block<S>, b: &Block<S>) {
        // SAFETY: build.rs only compiles the AVX2 backend for hosts or
        // targets that report AVX2.
        unsafe { block_kernel_avx2::<S>(c, a, b) }
    }
}

/// [`block_kernel`] on [`Avx2F32x8`], compiled with AVX2 enabled.
///
/// # Safety
///
/// The CPU must support AVX2.
#[cfg(all(avx2, any(target_arch = "x86", target_arch = "x86_64")))]
#[target_feature(enable = "avx2")]
pub unsafe fn block_kernel_avx2<const S: usize>(c: &mut Block<S>, a: &Block<S>, b: &Block<S>) {
    block_kernel::<Avx2F32x8, S>(c, a, b)
}

/// `c += a · b` for one block triple using vectors of type `V`.
///
/// `S` must be a multiple of `V::LANES`; [`multiply_with`] checks this
/// before calling the kernel.
#[inline(always)]
pub fn block_kernel<V: SimdVector, const S: usize>(c: &mut Block<S>, a: &Block<S>, b: &Block<S>) {
    for l in 0..S {
        let a_row = a.row(l);
        let c_row = c.row_mut(l);

        for chunk in (0..S).step_by(V::LANES) {
            let lanes = chunk..chunk + V::LANES;

            let mut acc = V::load_slice(&c_row[lanes.clone()]);
            for (m, &a_lm) in a_row.iter().enumerate() {
                acc = acc + V::splat(a_lm) * V::load_slice(&b.row(m)[lanes.clone()]);
            }
            acc.store_slice(&mut c_row[lanes]);
        }
    }
}

/// Multiplies `a · b` with the vectorized kernel on the backend selected for this build.
///
/// # Errors
///
/// [`crate::MatmulError::DimensionMismatch`] if `a.block_cols() != b.block_rows()`.
///
/// ```rust
/// use blockmul::{multiply::vectorized, BlockedMatrix};
///
/// let a: BlockedMatrix = BlockedMatrix::from_fn(1, 1, |r, c| (r + c) as f32).unwrap();
/// let identity: BlockedMatrix = BlockedMatrix::identity(1).unwrap();
/// assert_eq!(vectorized::multiply(&a, &identity).unwrap(), a);
/// ```
pub fn multiply<const S: usize>(
    a: &BlockedMatrix<S>,
    b: &BlockedMatrix<S>,
) -> Result<BlockedMatrix<S>> {
    multiply_with::<NativeF32, S>(a, b).map(Timed::into_inner)
}

/// Same as [`multiply`], also returning the time spent in the accumulation loop.
pub fn multiply_timed<const S: usize>(
    a: &BlockedMatrix<S>,
    b: &BlockedMatrix<S>,
) -> Result<Timed<BlockedMatrix<S>>> {
    multiply_with::<NativeF32, S>(a, b)
}

/// Multiplies `a · b` with the vectorized kernel on an explicit backend `V`.
///
/// # Errors
///
/// [`crate::MatmulError::InvalidBlockSize`] if `S` is not a multiple of `V::LANES`,
/// [`crate::MatmulError::DimensionMismatch`] if the inner block dimensions disagree.
pub fn multiply_with<V: BlockKernel, const S: usize>(
    a: &BlockedMatrix<S>,
    b: &BlockedMatrix<S>,
) -> Result<Timed<BlockedMatrix<S>>> {
    check_block_size(S, V::LANES)?;

    accumulate_blocks(a, b, <V as BlockKernel>::kernel::<S>)
}
