//! Cross-checks both multiplication strategies against ndarray's `dot`.

use blockmul::multiply::{naive, vectorized};
use blockmul::{BlockedMatrix, MatmulError, Strategy, BLOCK_SIZE};
use ndarray::Array2;
use rand::{rngs::StdRng, SeedableRng};

const TOLERANCE: f32 = 1e-4;

fn reference(a: &BlockedMatrix, b: &BlockedMatrix) -> BlockedMatrix {
    let product: Array2<f32> = a.to_array().dot(&b.to_array());
    BlockedMatrix::from_array(product.view()).unwrap()
}

#[test]
fn test_strategies_match_ndarray() {
    let shapes = [(1, 1, 1), (2, 3, 4), (5, 1, 3), (4, 4, 4)];
    let mut rng = StdRng::seed_from_u64(42);

    for (m, k, n) in shapes {
        let a: BlockedMatrix = BlockedMatrix::random(m, k, &mut rng).unwrap();
        let b: BlockedMatrix = BlockedMatrix::random(k, n, &mut rng).unwrap();
        let expected = reference(&a, &b);

        for strategy in Strategy::ALL {
            let product = strategy.multiply(&a, &b).unwrap().into_inner();
            assert_eq!(product.block_rows(), m);
            assert_eq!(product.block_cols(), n);

            let error = expected.max_relative_error(&product).unwrap();
            assert!(
                error < TOLERANCE,
                "{strategy} on {m}x{k} by {k}x{n} blocks: relative error {error}"
            );
        }
    }
}

#[test]
fn test_naive_and_vectorized_agree_exactly() {
    let mut rng = StdRng::seed_from_u64(7);
    let a: BlockedMatrix = BlockedMatrix::random(6, 5, &mut rng).unwrap();
    let b: BlockedMatrix = BlockedMatrix::random(5, 3, &mut rng).unwrap();

    assert_eq!(
        naive::multiply(&a, &b).unwrap(),
        vectorized::multiply(&a, &b).unwrap()
    );
}

#[test]
fn test_random_values_in_range() {
    let mut rng = StdRng::seed_from_u64(1);
    let a: BlockedMatrix = BlockedMatrix::random(3, 2, &mut rng).unwrap();

    assert_eq!(a.rows(), 3 * BLOCK_SIZE);
    assert_eq!(a.cols(), 2 * BLOCK_SIZE);
    assert!(a.values().all(|x| (0.0..100.0).contains(&x)));
}

#[test]
fn test_zeros_product_is_zero() {
    let mut rng = StdRng::seed_from_u64(2);
    let a: BlockedMatrix = BlockedMatrix::random(2, 2, &mut rng).unwrap();
    let zeros: BlockedMatrix = BlockedMatrix::zeros(2, 2).unwrap();

    for strategy in Strategy::ALL {
        let product = strategy.multiply(&a, &zeros).unwrap().into_inner();
        assert!(product.values().all(|x| x == 0.0));
    }
}

#[test]
fn test_identity_is_neutral() {
    let mut rng = StdRng::seed_from_u64(3);
    let a: BlockedMatrix = BlockedMatrix::random(3, 3, &mut rng).unwrap();
    let identity: BlockedMatrix = BlockedMatrix::identity(3).unwrap();

    assert_eq!(naive::multiply(&a, &identity).unwrap(), a);
    assert_eq!(vectorized::multiply(&identity, &a).unwrap(), a);
}

#[test]
fn test_all_ones_block_gives_block_size() {
    let ones: BlockedMatrix = BlockedMatrix::filled(1, 1, 1.0).unwrap();

    for strategy in Strategy::ALL {
        let product = strategy.multiply(&ones, &ones).unwrap().into_inner();
        assert!(product.values().all(|x| x == BLOCK_SIZE as f32));
    }
}

#[test]
fn test_incompatible_shapes_are_rejected() {
    let a: BlockedMatrix = BlockedMatrix::zeros(2, 3).unwrap();
    let b: BlockedMatrix = BlockedMatrix::zeros(2, 2).unwrap();

    for strategy in Strategy::ALL {
        match strategy.multiply(&a, &b) {
            Err(MatmulError::DimensionMismatch {
                rows_a,
                cols_a,
                rows_b,
                cols_b,
            }) => assert_eq!((rows_a, cols_a, rows_b, cols_b), (2, 3, 2, 2)),
            other => panic!("{strategy}: expected a dimension mismatch, got {other:?}"),
        }
    }
}

#[test]
fn test_empty_grid_is_rejected() {
    assert!(matches!(
        BlockedMatrix::<BLOCK_SIZE>::zeros(0, 4),
        Err(MatmulError::EmptyGrid { .. })
    ));
}
