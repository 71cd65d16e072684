use crate::tensor::index::split;
use crate::tensor::{ShapeError, TensorExpression};

/// The outer product `u ⊗ v` of a rank-`R1` expression `u` and a rank-`R2` expression `v`.
///
/// The product has rank `R = R1 + R2`. A result index is split at the fixed position `R1`:
/// ```text
/// (u ⊗ v)(i_1, ..., i_R1, j_1, ..., j_R2) = u(i_1, ..., i_R1) * v(j_1, ..., j_R2)
/// ```
pub struct OuterProduct<'a, U, V, const D: usize, const R1: usize, const R2: usize, const R: usize> {
    lhs: &'a U,
    rhs: &'a V,
}

impl<'a, U, V, const D: usize, const R1: usize, const R2: usize, const R: usize> OuterProduct<'a, U, V, D, R1, R2, R>
where
    U: TensorExpression<D, R1>,
    V: TensorExpression<D, R2, Scalar = U::Scalar>,
{
    const RANK_CHECK: () = assert!(R == R1 + R2, "outer product rank must be the sum of the operand ranks");

    /// Builds the outer product. A wrong result rank `R` is a compile-time error.
    ///
    /// ```compile_fail
    /// use tensel::tensor::{OuterProduct, Tensor};
    /// let u = Tensor::<f64, 3, 2>::zeros();
    /// let v = Tensor::<f64, 3, 1>::zeros();
    /// let _ = OuterProduct::<_, _, 3, 2, 1, 4>::new(&u, &v);
    /// ```
    pub fn new(lhs: &'a U, rhs: &'a V) -> Self {
        let () = Self::RANK_CHECK;
        Self { lhs, rhs }
    }

    /// Builds the outer product, checking the result rank at run time.
    pub fn try_new(lhs: &'a U, rhs: &'a V) -> Result<Self, ShapeError> {
        if R == R1 + R2 {
            Ok(Self { lhs, rhs })
        } else {
            Err(ShapeError::RankMismatch {
                expected: R1 + R2,
                declared: R,
            })
        }
    }
}

impl<'a, U, V, const D: usize, const R1: usize, const R2: usize, const R: usize> TensorExpression<D, R>
    for OuterProduct<'a, U, V, D, R1, R2, R>
where
    U: TensorExpression<D, R1>,
    V: TensorExpression<D, R2, Scalar = U::Scalar>,
{
    type Scalar = U::Scalar;

    #[inline]
    fn evaluate(&self, index: &[usize; R]) -> U::Scalar {
        let (left, right) = split::<R1, R2, R>(index);
        self.lhs.evaluate(&left) * self.rhs.evaluate(&right)
    }
}

impl<'a, U, V, const D: usize, const R1: usize, const R2: usize, const R: usize> Clone
    for OuterProduct<'a, U, V, D, R1, R2, R>
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, U, V, const D: usize, const R1: usize, const R2: usize, const R: usize> Copy
    for OuterProduct<'a, U, V, D, R1, R2, R>
{
}

/// The outer product `lhs ⊗ rhs`.
pub fn otimes<'a, U, V, const D: usize, const R1: usize, const R2: usize, const R: usize>(
    lhs: &'a U,
    rhs: &'a V,
) -> OuterProduct<'a, U, V, D, R1, R2, R>
where
    U: TensorExpression<D, R1>,
    V: TensorExpression<D, R2, Scalar = U::Scalar>,
{
    OuterProduct::new(lhs, rhs)
}
