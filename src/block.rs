//! Fixed-size square tiles, the unit of vectorized computation.

use std::ops::{Index, IndexMut};

/// An `S×S` tile of `f32` values stored row-major.
///
/// The `#[repr(C, align(32))]` layout puts the first row on a 32-byte
/// boundary; with `S = 8` every row is exactly one AVX2 register, so the
/// vectorized kernel always takes the aligned load/store path.
///
/// ```rust
/// use blockmul::Block;
///
/// let mut block = Block::<8>::zeroed();
/// block[(2, 3)] = 1.5;
/// assert_eq!(block.row(2)[3], 1.5);
/// ```
#[repr(C, align(32))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Block<const S: usize> {
    rows: [[f32; S]; S],
}

impl<const S: usize> Block<S> {
    /// A tile with every element equal to `0.0`.
    pub const fn zeroed() -> Self {
        Self::splat(0.0)
    }

    /// A tile with every element equal to `value`.
    pub const fn splat(value: f32) -> Self {
        Self {
            rows: [[value; S]; S],
        }
    }

    /// Builds a tile from `f(intra_row, intra_col)`.
    pub fn from_fn(mut f: impl FnMut(usize, usize) -> f32) -> Self {
        let mut block = Self::zeroed();
        for (l, row) in block.rows.iter_mut().enumerate() {
            for (m, value) in row.iter_mut().enumerate() {
                *value = f(l, m);
            }
        }
        block
    }

    #[inline(always)]
    pub fn row(&self, l: usize) -> &[f32; S] {
        &self.rows[l]
    }

    #[inline(always)]
    pub fn row_mut(&mut self, l: usize) -> &mut [f32; S] {
        &mut self.rows[l]
    }

    /// Iterates every element in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &f32> + '_ {
        self.rows.iter().flatten()
    }
}

impl<const S: usize> Default for Block<S> {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl<const S: usize> Index<(usize, usize)> for Block<S> {
    type Output = f32;

    #[inline(always)]
    fn index(&self, (l, m): (usize, usize)) -> &Self::Output {
        &self.rows[l][m]
    }
}

impl<const S: usize> IndexMut<(usize, usize)> for Block<S> {
    #[inline(always)]
    fn index_mut(&mut self, (l, m): (usize, usize)) -> &mut Self::Output {
        &mut self.rows[l][m]
    }
}
