//! Error types for blockmul operations.
//!
//! Construction and multiplication report failures through [`MatmulError`]
//! instead of panicking, so the benchmark harness can print a message and
//! carry on with the next strategy.

use thiserror::Error;

/// Errors that can occur while building or multiplying blocked matrices.
#[derive(Debug, Error)]
pub enum MatmulError {
    /// Inner block dimensions of the two operands disagree (`cols_a != rows_b`).
    #[error(
        "dimension mismatch: A is {rows_a}x{cols_a} blocks, B is {rows_b}x{cols_b} blocks \
         (A block columns must equal B block rows)"
    )]
    DimensionMismatch {
        rows_a: usize,
        cols_a: usize,
        rows_b: usize,
        cols_b: usize,
    },

    /// A block grid with zero block rows or zero block columns was requested.
    #[error("block grid must be non-empty (requested {block_rows}x{block_cols} blocks)")]
    EmptyGrid {
        block_rows: usize,
        block_cols: usize,
    },

    /// The requested block grid does not fit in addressable memory.
    #[error("{block_rows}x{block_cols} block grid is too large to allocate")]
    GridTooLarge {
        block_rows: usize,
        block_cols: usize,
    },

    /// Block size is zero or not a multiple of the vector lane width.
    #[error("block size {block_size} is not a non-zero multiple of the {lanes}-lane vector width")]
    InvalidBlockSize { block_size: usize, lanes: usize },

    /// Logical dimensions cannot be tiled exactly by the block size.
    #[error("{rows}x{cols} matrix cannot be tiled by {block_size}x{block_size} blocks")]
    RaggedDimensions {
        rows: usize,
        cols: usize,
        block_size: usize,
    },

    /// Writing a matrix or a benchmark report failed.
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for blockmul operations.
pub type Result<T> = std::result::Result<T, MatmulError>;

/// Creates a dimension mismatch error from the two operands' block grids.
pub fn dimension_mismatch(a: (usize, usize), b: (usize, usize)) -> MatmulError {
    MatmulError::DimensionMismatch {
        rows_a: a.0,
        cols_a: a.1,
        rows_b: b.0,
        cols_b: b.1,
    }
}

/// Checks that `block_size` is a non-zero multiple of `lanes`.
pub fn check_block_size(block_size: usize, lanes: usize) -> Result<()> {
    if block_size == 0 || lanes == 0 || block_size % lanes != 0 {
        return Err(MatmulError::InvalidBlockSize { block_size, lanes });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_display() {
        let error = dimension_mismatch((2, 3), (2, 2));
        let display = format!("{}", error);
        assert!(display.contains("dimension mismatch"));
        assert!(display.contains("2x3 blocks"));
        assert!(display.contains("2x2 blocks"));
    }

    #[test]
    fn test_empty_grid_display() {
        let error = MatmulError::EmptyGrid {
            block_rows: 0,
            block_cols: 4,
        };
        assert!(format!("{}", error).contains("0x4 blocks"));
    }

    #[test]
    fn test_grid_too_large_display() {
        let error = MatmulError::GridTooLarge {
            block_rows: usize::MAX,
            block_cols: 2,
        };
        assert!(format!("{}", error).contains("too large"));
    }

    #[test]
    fn test_ragged_dimensions_display() {
        let error = MatmulError::RaggedDimensions {
            rows: 100,
            cols: 100,
            block_size: 8,
        };
        assert!(format!("{}", error).contains("100x100 matrix cannot be tiled by 8x8 blocks"));
    }

    #[test]
    fn test_check_block_size() {
        assert!(check_block_size(8, 8).is_ok());
        assert!(check_block_size(16, 8).is_ok());
        assert!(check_block_size(8, 4).is_ok());
        assert!(matches!(
            check_block_size(6, 8),
            Err(MatmulError::InvalidBlockSize {
                block_size: 6,
                lanes: 8
            })
        ));
        assert!(check_block_size(0, 8).is_err());
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        let error: MatmulError = io.into();
        assert!(matches!(error, MatmulError::Io(_)));

        // Should implement Error trait and expose the io error as its source
        assert!(std::error::Error::source(&error).is_some());
    }
}
