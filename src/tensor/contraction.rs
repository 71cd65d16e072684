use crate::tensor::index::increment;
use crate::tensor::{MultiIndexIter, ShapeError, TensorExpression};
use num::Zero;

/// Marker selecting the number of axes `N` to contract.
///
/// ```
/// use tensel::tensor::{contract, Axes, Tensor, TensorExpression};
/// // c_i = A_ij b_j
/// let a = Tensor::<f64, 2, 2>::from_vec(vec![1.0, 2.0, 3.0, 4.0]);
/// let b = Tensor::<f64, 2, 1>::from_vec(vec![1.0, 1.0]);
/// let c: Tensor<f64, 2, 1> = contract(&a, &b, Axes::<1>).eval();
/// assert_eq!(c.as_slice(), &[3.0, 7.0]);
/// ```
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Axes<const N: usize>;

/// Contraction of the last `N` axes of `u` against the first `N` axes of `v`.
///
/// With `u` of rank `R1` and `v` of rank `R2`, the result has rank `R = R1 + R2 - 2N` and
/// ```text
/// w(i_1, ..., i_{R1-N}, j_1, ..., j_{R2-N})
///     = sum_k u(i_1, ..., i_{R1-N}, k_1, ..., k_N) * v(k_1, ..., k_N, j_1, ..., j_{R2-N})
/// ```
/// where `k` ranges over `[0, D)^N` in row-major order (`k_N` fastest). The summation order is
/// fixed, so repeated evaluations are bit-identical.
///
/// Valid configurations satisfy `1 <= N <= min(R1, R2)` and `R >= 1`. Contractions over every
/// axis produce a scalar and are provided by [`contract_full`] instead.
///
/// Examples: `c_i = A_ij b_j` is `N = 1`, and `S_ij = C_ijkl E_kl` is `N = 2`.
pub struct Contraction<
    'a,
    U,
    V,
    const D: usize,
    const R1: usize,
    const R2: usize,
    const N: usize,
    const R: usize,
> {
    lhs: &'a U,
    rhs: &'a V,
}

fn validate(lhs_rank: usize, rhs_rank: usize, contracted: usize, declared: usize) -> Result<(), ShapeError> {
    if contracted == 0 {
        Err(ShapeError::NoContractedAxes)
    } else if contracted > lhs_rank || contracted > rhs_rank {
        Err(ShapeError::TooManyContractedAxes {
            contracted,
            lhs_rank,
            rhs_rank,
        })
    } else if lhs_rank + rhs_rank == 2 * contracted {
        Err(ShapeError::ScalarResult)
    } else if declared + 2 * contracted != lhs_rank + rhs_rank {
        Err(ShapeError::RankMismatch {
            expected: lhs_rank + rhs_rank - 2 * contracted,
            declared,
        })
    } else {
        Ok(())
    }
}

impl<'a, U, V, const D: usize, const R1: usize, const R2: usize, const N: usize, const R: usize>
    Contraction<'a, U, V, D, R1, R2, N, R>
where
    U: TensorExpression<D, R1>,
    V: TensorExpression<D, R2, Scalar = U::Scalar>,
{
    const SHAPE_CHECK: () = {
        assert!(N >= 1, "contraction must contract at least one axis, use an outer product instead");
        assert!(N <= R1 && N <= R2, "cannot contract more axes than an operand has");
        assert!(R1 + R2 > 2 * N, "contraction over all axes yields a scalar, use contract_full instead");
        assert!(R + 2 * N == R1 + R2, "contraction result rank must be R1 + R2 - 2N");
    };

    /// Builds the contraction. Invalid `N` or result rank `R` are compile-time errors.
    ///
    /// Contracting no axes does not build:
    ///
    /// ```compile_fail
    /// use tensel::tensor::{Axes, Contraction, Tensor};
    /// let a = Tensor::<f64, 2, 2>::zeros();
    /// let b = Tensor::<f64, 2, 2>::zeros();
    /// let _ = Contraction::<_, _, 2, 2, 2, 0, 4>::new(&a, &b, Axes::<0>);
    /// ```
    ///
    /// Neither does contracting more axes than an operand has:
    ///
    /// ```compile_fail
    /// use tensel::tensor::{Axes, Contraction, Tensor};
    /// let a = Tensor::<f64, 2, 2>::zeros();
    /// let b = Tensor::<f64, 2, 2>::zeros();
    /// let _ = Contraction::<_, _, 2, 2, 2, 3, 0>::new(&a, &b, Axes::<3>);
    /// ```
    pub fn new(lhs: &'a U, rhs: &'a V, _axes: Axes<N>) -> Self {
        let () = Self::SHAPE_CHECK;
        Self { lhs, rhs }
    }

    /// Builds the contraction, validating `N` and `R` at run time.
    pub fn try_new(lhs: &'a U, rhs: &'a V, _axes: Axes<N>) -> Result<Self, ShapeError> {
        validate(R1, R2, N, R)?;
        Ok(Self { lhs, rhs })
    }
}

impl<'a, U, V, const D: usize, const R1: usize, const R2: usize, const N: usize, const R: usize> TensorExpression<D, R>
    for Contraction<'a, U, V, D, R1, R2, N, R>
where
    U: TensorExpression<D, R1>,
    V: TensorExpression<D, R2, Scalar = U::Scalar>,
{
    type Scalar = U::Scalar;

    fn evaluate(&self, index: &[usize; R]) -> U::Scalar {
        // The first R1 - N result components address the free axes of lhs,
        // the remaining R2 - N the free axes of rhs.
        let lhs_free = R1 - N;
        let mut lhs_index = [0; R1];
        let mut rhs_index = [0; R2];
        lhs_index[..lhs_free].copy_from_slice(&index[..lhs_free]);
        rhs_index[N..].copy_from_slice(&index[lhs_free..]);

        let mut k = [0; N];
        let mut accumulator = U::Scalar::zero();
        loop {
            lhs_index[lhs_free..].copy_from_slice(&k);
            rhs_index[..N].copy_from_slice(&k);
            accumulator += self.lhs.evaluate(&lhs_index) * self.rhs.evaluate(&rhs_index);
            if !increment::<D, N>(&mut k) {
                break;
            }
        }
        accumulator
    }
}

impl<'a, U, V, const D: usize, const R1: usize, const R2: usize, const N: usize, const R: usize> Clone
    for Contraction<'a, U, V, D, R1, R2, N, R>
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, U, V, const D: usize, const R1: usize, const R2: usize, const N: usize, const R: usize> Copy
    for Contraction<'a, U, V, D, R1, R2, N, R>
{
}

/// Contracts the last `N` axes of `lhs` with the first `N` axes of `rhs`.
///
/// See [`Contraction`].
pub fn contract<'a, U, V, const D: usize, const R1: usize, const R2: usize, const N: usize, const R: usize>(
    lhs: &'a U,
    rhs: &'a V,
    axes: Axes<N>,
) -> Contraction<'a, U, V, D, R1, R2, N, R>
where
    U: TensorExpression<D, R1>,
    V: TensorExpression<D, R2, Scalar = U::Scalar>,
{
    Contraction::new(lhs, rhs, axes)
}

/// Contracts every axis of `lhs` with the corresponding axis of `rhs`, returning a scalar.
///
/// This is `sum_k lhs(k) * rhs(k)` over all multi-indices `k`, accumulated in row-major order.
///
/// ```
/// use tensel::tensor::{contract_full, Tensor};
/// let a = Tensor::<i64, 2, 2>::from_vec(vec![1, 2, 3, 4]);
/// assert_eq!(contract_full(&a, &a), 30);
/// ```
pub fn contract_full<U, V, const D: usize, const R: usize>(lhs: &U, rhs: &V) -> U::Scalar
where
    U: TensorExpression<D, R>,
    V: TensorExpression<D, R, Scalar = U::Scalar>,
{
    let mut accumulator = U::Scalar::zero();
    for index in MultiIndexIter::<D, R>::new() {
        accumulator += lhs.evaluate(&index) * rhs.evaluate(&index);
    }
    accumulator
}

/// Alias for [`contract_full`].
pub fn dot<U, V, const D: usize, const R: usize>(lhs: &U, rhs: &V) -> U::Scalar
where
    U: TensorExpression<D, R>,
    V: TensorExpression<D, R, Scalar = U::Scalar>,
{
    contract_full(lhs, rhs)
}
