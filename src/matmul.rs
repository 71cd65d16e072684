//! Parallel divide-and-conquer dense matrix multiplication.
//!
//! The product `C += A B` is split recursively along the largest of the three dimensions
//! `m`, `n` and `k` (for `A` of size `m x k` and `B` of size `k x n`). Splitting `m` or `n`
//! produces two products writing to disjoint blocks of `C`, which run in parallel. Splitting
//! `k` produces two partial products of the same block; each is computed into a local
//! buffer and added to the shared block under a lock.
use crate::Scalar;
use log::debug;
use nalgebra::{DMatrix, DMatrixView, DMatrixViewMut};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatmulSettings {
    /// Blocks whose dimensions are all at most this size are multiplied directly.
    pub leaf_size: usize,
    /// The number of recursion levels that may fork parallel tasks.
    pub max_parallel_depth: usize,
}

impl Default for MatmulSettings {
    fn default() -> Self {
        Self {
            leaf_size: 64,
            max_parallel_depth: thread_depth_limit(rayon::current_num_threads()),
        }
    }
}

/// The number of binary forks needed to occupy `num_threads` threads, i.e. `⌈log₂ num_threads⌉`.
///
/// ```
/// use tensel::matmul::thread_depth_limit;
/// assert_eq!(thread_depth_limit(1), 0);
/// assert_eq!(thread_depth_limit(8), 3);
/// assert_eq!(thread_depth_limit(9), 4);
/// ```
pub fn thread_depth_limit(num_threads: usize) -> usize {
    (usize::BITS - (num_threads.max(1) - 1).leading_zeros()) as usize
}

/// Computes `A B` with the reference triple loop.
pub fn naive_matmul<T: Scalar>(a: &DMatrix<T>, b: &DMatrix<T>) -> DMatrix<T> {
    assert_eq!(a.ncols(), b.nrows(), "Inner dimensions of the factors must agree.");
    let mut c = DMatrix::zeros(a.nrows(), b.ncols());
    accumulate_naive(&mut full_view_mut(&mut c), &full_view(a), &full_view(b));
    c
}

pub fn matmul<T>(a: &DMatrix<T>, b: &DMatrix<T>, settings: &MatmulSettings) -> DMatrix<T>
where
    T: Scalar + Send + Sync,
{
    let mut c = DMatrix::zeros(a.nrows(), b.ncols());
    matmul_into(&mut c, a, b, settings);
    c
}

/// Accumulates `C += A B`.
///
/// # Panics
///
/// Panics if the dimensions of `c`, `a` and `b` are incompatible.
pub fn matmul_into<T>(c: &mut DMatrix<T>, a: &DMatrix<T>, b: &DMatrix<T>, settings: &MatmulSettings)
where
    T: Scalar + Send + Sync,
{
    assert_eq!(a.ncols(), b.nrows(), "Inner dimensions of the factors must agree.");
    assert_eq!(
        c.shape(),
        (a.nrows(), b.ncols()),
        "Output must have as many rows as A and as many columns as B."
    );
    debug!(
        "Multiplying {}x{} by {}x{} (leaf size {}, parallel depth {})",
        a.nrows(),
        a.ncols(),
        b.nrows(),
        b.ncols(),
        settings.leaf_size,
        settings.max_parallel_depth
    );

    let leaf_size = settings.leaf_size.max(1);
    multiply_block(
        &mut full_view_mut(c),
        full_view(a),
        full_view(b),
        leaf_size,
        settings.max_parallel_depth,
    );
}

fn full_view<T: Scalar>(matrix: &DMatrix<T>) -> DMatrixView<'_, T> {
    matrix.view((0, 0), matrix.shape())
}

fn full_view_mut<T: Scalar>(matrix: &mut DMatrix<T>) -> DMatrixViewMut<'_, T> {
    let shape = matrix.shape();
    matrix.view_mut((0, 0), shape)
}

fn accumulate_naive<T: Scalar>(c: &mut DMatrixViewMut<'_, T>, a: &DMatrixView<'_, T>, b: &DMatrixView<'_, T>) {
    for j in 0..b.ncols() {
        for p in 0..a.ncols() {
            let b_pj = b[(p, j)];
            for i in 0..a.nrows() {
                c[(i, j)] += a[(i, p)] * b_pj;
            }
        }
    }
}

/// Runs both tasks, in parallel while `depth` permits.
fn fork<A, B>(depth: usize, task_a: A, task_b: B)
where
    A: FnOnce(usize) + Send,
    B: FnOnce(usize) + Send,
{
    if depth > 0 {
        rayon::join(|| task_a(depth - 1), || task_b(depth - 1));
    } else {
        task_a(0);
        task_b(0);
    }
}

fn multiply_block<T>(
    c: &mut DMatrixViewMut<'_, T>,
    a: DMatrixView<'_, T>,
    b: DMatrixView<'_, T>,
    leaf_size: usize,
    depth: usize,
) where
    T: Scalar + Send + Sync,
{
    let (m, k) = a.shape();
    let n = b.ncols();
    if m == 0 || n == 0 || k == 0 {
        return;
    }
    if m.max(n).max(k) <= leaf_size {
        accumulate_naive(c, &a, &b);
        return;
    }

    if m >= n && m >= k {
        let mid = m / 2;
        let (mut c_top, mut c_bottom) = c.rows_range_pair_mut(..mid, mid..);
        let (a_top, a_bottom) = (a.rows_range(..mid), a.rows_range(mid..));
        fork(
            depth,
            |d| multiply_block(&mut c_top, a_top, b, leaf_size, d),
            |d| multiply_block(&mut c_bottom, a_bottom, b, leaf_size, d),
        );
    } else if n >= k {
        let mid = n / 2;
        let (mut c_left, mut c_right) = c.columns_range_pair_mut(..mid, mid..);
        let (b_left, b_right) = (b.columns_range(..mid), b.columns_range(mid..));
        fork(
            depth,
            |d| multiply_block(&mut c_left, a, b_left, leaf_size, d),
            |d| multiply_block(&mut c_right, a, b_right, leaf_size, d),
        );
    } else {
        let mid = k / 2;
        let (a_left, a_right) = (a.columns_range(..mid), a.columns_range(mid..));
        let (b_top, b_bottom) = (b.rows_range(..mid), b.rows_range(mid..));
        if depth > 0 {
            let shared = Mutex::new(c);
            let accumulate_partial = |a_part: DMatrixView<'_, T>, b_part: DMatrixView<'_, T>, d: usize| {
                let mut partial = DMatrix::zeros(m, n);
                multiply_block(&mut full_view_mut(&mut partial), a_part, b_part, leaf_size, d);
                **shared.lock() += &partial;
            };
            fork(
                depth,
                |d| accumulate_partial(a_left, b_top, d),
                |d| accumulate_partial(a_right, b_bottom, d),
            );
        } else {
            multiply_block(c, a_left, b_top, leaf_size, 0);
            multiply_block(c, a_right, b_bottom, leaf_size, 0);
        }
    }
}
