use nalgebra::DMatrix;
use tensel::matmul::{matmul, matmul_into, naive_matmul, thread_depth_limit, MatmulSettings};
use util::assert_panics;

fn integer_matrix(rows: usize, cols: usize, seed: i64) -> DMatrix<i64> {
    DMatrix::from_fn(rows, cols, |i, j| ((i as i64 * 7 + j as i64 * 3 + seed) % 11) - 5)
}

fn settings(leaf_size: usize, max_parallel_depth: usize) -> MatmulSettings {
    MatmulSettings {
        leaf_size,
        max_parallel_depth,
    }
}

#[test]
fn thread_depth_limit_is_ceil_log2() {
    let depths: Vec<_> = [0, 1, 2, 3, 4, 5, 8, 9, 16, 17]
        .iter()
        .map(|&n| thread_depth_limit(n))
        .collect();
    assert_eq!(depths, vec![0, 0, 1, 2, 2, 3, 3, 4, 4, 5]);
}

#[test]
fn default_settings() {
    let defaults = MatmulSettings::default();
    assert_eq!(defaults.leaf_size, 64);
    assert_eq!(
        defaults.max_parallel_depth,
        thread_depth_limit(rayon::current_num_threads())
    );
}

#[test]
fn naive_matmul_matches_nalgebra() {
    let a = integer_matrix(5, 7, 1);
    let b = integer_matrix(7, 3, 2);
    assert_eq!(naive_matmul(&a, &b), &a * &b);
}

#[test]
fn parallel_matmul_is_exact_for_integers() {
    // Row, column and inner splits all occur for these shapes and leaf size
    let shapes = [(37, 53, 29), (64, 8, 64), (3, 200, 2), (1, 1, 1), (100, 1, 100)];
    for &(m, k, n) in &shapes {
        let a = integer_matrix(m, k, 3);
        let b = integer_matrix(k, n, 4);
        let expected = &a * &b;
        for depth in [0, 1, 3] {
            assert_eq!(matmul(&a, &b, &settings(4, depth)), expected);
        }
        assert_eq!(matmul(&a, &b, &MatmulSettings::default()), expected);
    }
}

#[test]
fn zero_leaf_size_is_treated_as_one() {
    let a = integer_matrix(6, 5, 0);
    let b = integer_matrix(5, 4, 1);
    assert_eq!(matmul(&a, &b, &settings(0, 2)), &a * &b);
}

#[test]
fn matmul_into_accumulates() {
    let a = integer_matrix(20, 30, 5);
    let b = integer_matrix(30, 10, 6);
    let mut c = DMatrix::from_element(20, 10, 1);
    matmul_into(&mut c, &a, &b, &settings(3, 2));
    assert_eq!(c, DMatrix::from_element(20, 10, 1) + &a * &b);
}

#[test]
fn empty_dimensions() {
    let a = DMatrix::<i64>::zeros(0, 5);
    let b = integer_matrix(5, 3, 0);
    assert_eq!(matmul(&a, &b, &settings(1, 2)).shape(), (0, 3));

    let a = DMatrix::<i64>::zeros(4, 0);
    let b = DMatrix::<i64>::zeros(0, 3);
    assert_eq!(matmul(&a, &b, &settings(1, 2)), DMatrix::zeros(4, 3));
}

#[test]
fn floating_point_matmul_agrees_with_nalgebra() {
    let a = DMatrix::from_fn(50, 70, |i, j| ((i * j) as f64).sin());
    let b = DMatrix::from_fn(70, 40, |i, j| ((i + 2 * j) as f64).cos());
    let c = matmul(&a, &b, &settings(8, 3));
    let diff = (c - &a * &b).abs().max();
    assert!(diff < 1e-12);
}

#[test]
fn incompatible_dimensions_panic() {
    let a = integer_matrix(3, 4, 0);
    let b = integer_matrix(3, 4, 0);
    assert_panics!(naive_matmul(&a, &b));
    assert_panics!(matmul(&a, &b, &MatmulSettings::default()));

    let b = integer_matrix(4, 2, 0);
    assert_panics!(matmul_into(&mut DMatrix::zeros(2, 2), &a, &b, &MatmulSettings::default()));
}
