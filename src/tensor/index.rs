//! Index sequences used to route multi-indices between operand expressions.
//!
//! A multi-index for a rank-`R` tensor is a `[usize; R]`. All partition points used here are
//! const generic parameters, so splitting and joining indices compiles down to plain
//! array moves.
use std::array;

/// The number of scalars held by a tensor of the given dimension and rank, i.e. `dim^rank`.
pub const fn storage_len(dim: usize, rank: usize) -> usize {
    let mut len = 1;
    let mut r = 0;
    while r < rank {
        len *= dim;
        r += 1;
    }
    len
}

struct Partition<const R1: usize, const R2: usize, const R: usize>;

impl<const R1: usize, const R2: usize, const R: usize> Partition<R1, R2, R> {
    const VALID: () = assert!(R1 + R2 == R, "index partition does not cover the full multi-index");
}

/// The sequence `[0, 1, ..., N - 1]`.
pub fn sequence<const N: usize>() -> [usize; N] {
    array::from_fn(|i| i)
}

/// The sequence `[OFFSET, OFFSET + 1, ..., OFFSET + N - 1]`.
pub fn offset_sequence<const OFFSET: usize, const N: usize>() -> [usize; N] {
    array::from_fn(|i| OFFSET + i)
}

/// The all-zero multi-index, i.e. the first index in iteration order.
pub fn zeros<const N: usize>() -> [usize; N] {
    [0; N]
}

/// Splits a multi-index into its first `R1` and its last `R2` components.
///
/// `R1 + R2 == R` is checked at compile time.
///
/// ```
/// use tensel::tensor::index::split;
/// let (left, right) = split::<2, 1, 3>(&[4, 5, 6]);
/// assert_eq!(left, [4, 5]);
/// assert_eq!(right, [6]);
/// ```
pub fn split<const R1: usize, const R2: usize, const R: usize>(index: &[usize; R]) -> ([usize; R1], [usize; R2]) {
    let () = Partition::<R1, R2, R>::VALID;
    let left_positions = sequence::<R1>();
    let right_positions = offset_sequence::<R1, R2>();
    (left_positions.map(|k| index[k]), right_positions.map(|k| index[k]))
}

/// Concatenates two multi-indices. This is the inverse of [`split`].
pub fn join<const R1: usize, const R2: usize, const R: usize>(left: &[usize; R1], right: &[usize; R2]) -> [usize; R] {
    let () = Partition::<R1, R2, R>::VALID;
    array::from_fn(|k| if k < R1 { left[k] } else { right[k - R1] })
}

/// Whether every component of `index` lies in `[0, D)`.
pub fn in_bounds<const D: usize, const R: usize>(index: &[usize; R]) -> bool {
    index.iter().all(|&i| i < D)
}

/// The row-major (last index fastest) offset of `index` in a dense buffer of length `D^R`.
///
/// Each component is range checked in debug builds only.
#[inline]
pub fn linear_offset<const D: usize, const R: usize>(index: &[usize; R]) -> usize {
    debug_assert!(
        in_bounds::<D, R>(index),
        "multi-index {:?} is out of bounds for dimension {}",
        index,
        D
    );
    index.iter().fold(0, |offset, &i| offset * D + i)
}

/// The multi-index located at the given row-major offset. Inverse of [`linear_offset`].
pub fn unravel<const D: usize, const R: usize>(mut offset: usize) -> [usize; R] {
    debug_assert!(offset < storage_len(D, R));
    let mut index = [0; R];
    for k in (0..R).rev() {
        index[k] = offset % D;
        offset /= D;
    }
    index
}

/// Advances `index` to its lexicographic successor, with the last axis varying fastest.
///
/// Returns `false` (leaving `index` at all zeros) when `index` was the last multi-index.
#[inline]
pub fn increment<const D: usize, const R: usize>(index: &mut [usize; R]) -> bool {
    for k in (0..R).rev() {
        index[k] += 1;
        if index[k] < D {
            return true;
        }
        index[k] = 0;
    }
    false
}
