//! Block-tiled matrix storage.
//!
//! A [`BlockedMatrix`] is a row-major grid of [`Block`]s held in one
//! contiguous `Vec`. Block `(i, j)` lives at index `i * block_cols + j`, and
//! logical element `(row, col)` lives in block `(row / S, col / S)` at
//! intra-block position `(row % S, col % S)`.

use std::fmt;
use std::io::{self, Write};
use std::mem;

use ndarray::{Array2, ArrayView2};
use rand::Rng;

use crate::block::Block;
use crate::error::{check_block_size, MatmulError, Result};
use crate::simd::LANE_COUNT;
use crate::BLOCK_SIZE;

/// Width of the right-aligned field each element is printed in.
pub const PRINT_FIELD_WIDTH: usize = 20;

/// Separator printed between adjacent block columns on one line.
const BLOCK_COLUMN_GAP: &str = "   ";

/// Upper bound (exclusive) of the values produced by [`BlockedMatrix::random`].
pub const RANDOM_UPPER_BOUND: f32 = 100.0;

/// A logical `(block_rows·S) × (block_cols·S)` matrix stored as a grid of `S×S` blocks.
///
/// The matrix owns every block; dropping it releases all storage exactly once.
///
/// ```rust
/// use blockmul::BlockedMatrix;
///
/// let m: BlockedMatrix = BlockedMatrix::filled(2, 3, 1.0).unwrap();
/// assert_eq!((m.rows(), m.cols()), (16, 24));
/// assert_eq!(m.get(15, 23), 1.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct BlockedMatrix<const S: usize = BLOCK_SIZE> {
    block_rows: usize,
    block_cols: usize,
    blocks: Vec<Block<S>>,
}

impl<const S: usize> BlockedMatrix<S> {
    /// Checks the block size and grid shape, returning the number of blocks.
    fn validate(block_rows: usize, block_cols: usize) -> Result<usize> {
        check_block_size(S, LANE_COUNT)?;

        if block_rows == 0 || block_cols == 0 {
            return Err(MatmulError::EmptyGrid {
                block_rows,
                block_cols,
            });
        }

        // total bytes must stay within isize::MAX for the Vec allocation
        block_rows
            .checked_mul(block_cols)
            .filter(|&count| {
                count
                    .checked_mul(mem::size_of::<Block<S>>())
                    .is_some_and(|bytes| bytes <= isize::MAX as usize)
            })
            .ok_or(MatmulError::GridTooLarge {
                block_rows,
                block_cols,
            })
    }

    fn from_blocks(
        block_rows: usize,
        block_cols: usize,
        make_block: impl FnMut(usize) -> Block<S>,
    ) -> Result<Self> {
        let count = Self::validate(block_rows, block_cols)?;

        let blocks = (0..count).map(make_block).collect();
        Ok(Self {
            block_rows,
            block_cols,
            blocks,
        })
    }

    /// Allocates a `block_rows × block_cols` grid, zero-filled or filled with
    /// values sampled uniformly from `[0, 100)`.
    ///
    /// # Errors
    ///
    /// [`MatmulError::EmptyGrid`] if either count is zero,
    /// [`MatmulError::GridTooLarge`] if the grid cannot be allocated,
    /// [`MatmulError::InvalidBlockSize`] if `S` is not a multiple of the lane width.
    pub fn create<R: Rng>(
        block_rows: usize,
        block_cols: usize,
        fill_with_zeros: bool,
        rng: &mut R,
    ) -> Result<Self> {
        if fill_with_zeros {
            Self::zeros(block_rows, block_cols)
        } else {
            Self::random(block_rows, block_cols, rng)
        }
    }

    /// A matrix with every element equal to `0.0`.
    pub fn zeros(block_rows: usize, block_cols: usize) -> Result<Self> {
        Self::from_blocks(block_rows, block_cols, |_| Block::zeroed())
    }

    /// A matrix with every element drawn from `rng` uniformly in `[0, 100)`.
    pub fn random<R: Rng>(
        block_rows: usize,
        block_cols: usize,
        rng: &mut R,
    ) -> Result<Self> {
        Self::from_blocks(block_rows, block_cols, |_| {
            Block::from_fn(|_, _| rng.random_range(0.0..RANDOM_UPPER_BOUND))
        })
    }

    /// A matrix with every element equal to `value`.
    pub fn filled(block_rows: usize, block_cols: usize, value: f32) -> Result<Self> {
        Self::from_blocks(block_rows, block_cols, |_| Block::splat(value))
    }

    /// Builds a matrix from `f(row, col)` evaluated at every logical position.
    pub fn from_fn(
        block_rows: usize,
        block_cols: usize,
        mut f: impl FnMut(usize, usize) -> f32,
    ) -> Result<Self> {
        Self::from_blocks(block_rows, block_cols, |index| {
            let (i, j) = (index / block_cols, index % block_cols);
            Block::from_fn(|l, m| f(i * S + l, j * S + m))
        })
    }

    /// A square identity matrix of `blocks × blocks` blocks.
    pub fn identity(blocks: usize) -> Result<Self> {
        Self::from_fn(blocks, blocks, |row, col| if row == col { 1.0 } else { 0.0 })
    }

    /// Copies a logical `ndarray` matrix into block storage.
    ///
    /// # Errors
    ///
    /// [`MatmulError::RaggedDimensions`] if either dimension is not a multiple of `S`.
    pub fn from_array(array: ArrayView2<'_, f32>) -> Result<Self> {
        let (rows, cols) = array.dim();
        if S == 0 || rows % S != 0 || cols % S != 0 {
            return Err(MatmulError::RaggedDimensions {
                rows,
                cols,
                block_size: S,
            });
        }

        Self::from_fn(rows / S, cols / S, |row, col| array[[row, col]])
    }

    /// Copies the logical matrix into a row-major `ndarray` array.
    pub fn to_array(&self) -> Array2<f32> {
        Array2::from_shape_fn((self.rows(), self.cols()), |(row, col)| self.get(row, col))
    }

    pub fn block_rows(&self) -> usize {
        self.block_rows
    }

    pub fn block_cols(&self) -> usize {
        self.block_cols
    }

    /// Number of logical rows.
    pub fn rows(&self) -> usize {
        self.block_rows * S
    }

    /// Number of logical columns.
    pub fn cols(&self) -> usize {
        self.block_cols * S
    }

    #[inline(always)]
    fn block_index(&self, i: usize, j: usize) -> usize {
        assert!(
            i < self.block_rows && j < self.block_cols,
            "block ({i}, {j}) out of bounds for a {}x{} block grid",
            self.block_rows,
            self.block_cols
        );
        i * self.block_cols + j
    }

    /// Block at grid position `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if `(i, j)` is outside the block grid.
    #[inline(always)]
    pub fn block(&self, i: usize, j: usize) -> &Block<S> {
        &self.blocks[self.block_index(i, j)]
    }

    #[inline(always)]
    pub fn block_mut(&mut self, i: usize, j: usize) -> &mut Block<S> {
        let index = self.block_index(i, j);
        &mut self.blocks[index]
    }

    /// All blocks in row-major grid order.
    pub fn blocks(&self) -> &[Block<S>] {
        &self.blocks
    }

    /// Logical element `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `(row, col)` is outside the logical matrix.
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.block(row / S, col / S)[(row % S, col % S)]
    }

    /// Iterates every element, block by block.
    pub fn values(&self) -> impl Iterator<Item = f32> + '_ {
        self.blocks.iter().flat_map(|block| block.iter().copied())
    }

    /// Largest element-wise relative difference `|x - y| / max(|x|, |y|, 1)`.
    ///
    /// Returns `None` if the two matrices have different block grids.
    pub fn max_relative_error(&self, other: &Self) -> Option<f32> {
        if (self.block_rows, self.block_cols) != (other.block_rows, other.block_cols) {
            return None;
        }

        let max = self
            .values()
            .zip(other.values())
            .map(|(x, y)| (x - y).abs() / x.abs().max(y.abs()).max(1.0))
            .fold(0.0f32, f32::max);
        Some(max)
    }

    /// Renders the matrix in logical row-major order.
    ///
    /// Each value is right-aligned in a [`PRINT_FIELD_WIDTH`]-character field,
    /// block columns are separated by three spaces, and a blank line follows
    /// each group of `S` rows.
    pub fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        write!(writer, "{self}")
    }

    /// Writes the matrix to standard output.
    pub fn print(&self) -> io::Result<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        self.write_to(&mut handle)?;
        handle.flush()
    }
}

impl<const S: usize> fmt::Display for BlockedMatrix<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.block_rows {
            for l in 0..S {
                for j in 0..self.block_cols {
                    if j > 0 {
                        f.write_str(BLOCK_COLUMN_GAP)?;
                    }
                    for value in self.block(i, j).row(l) {
                        write!(f, "{value:>width$}", width = PRINT_FIELD_WIDTH)?;
                    }
                }
                writeln!(f)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
