//! Block-tiled `f32` matrix multiplication: a naive scalar kernel against a
//! hand-vectorized SIMD kernel.
//!
//! Matrices are stored as grids of fixed-size square [`Block`]s. Both
//! multiplication strategies walk the same block grid; they differ only in
//! how a single block triple `C[i][j] += A[i][k] · B[k][j]` is computed.
//!
//! ```rust
//! use blockmul::{multiply::{naive, vectorized}, BlockedMatrix};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let a: BlockedMatrix = BlockedMatrix::random(4, 3, &mut rng).unwrap();
//! let b: BlockedMatrix = BlockedMatrix::random(3, 2, &mut rng).unwrap();
//!
//! let slow = naive::multiply(&a, &b).unwrap();
//! let fast = vectorized::multiply(&a, &b).unwrap();
//! assert!(slow.max_relative_error(&fast).unwrap() < 1e-4);
//! ```

pub mod bench;
pub mod block;
pub mod error;
pub mod matrix;
pub mod multiply;
pub mod simd;

pub use block::Block;
pub use error::{MatmulError, Result};
pub use matrix::BlockedMatrix;
pub use multiply::{Strategy, Timed};

/// Default block side length. One block row fills one 256-bit AVX2 register.
pub const BLOCK_SIZE: usize = 8;
