use crate::tensor::TensorExpression;

/// The expression `alpha * u`.
///
/// `alpha` is a plain scalar. Scaling by a rank-0 expression is not supported, which keeps
/// scaling and contraction apart.
pub struct Scaled<'a, U, const D: usize, const R: usize>
where
    U: TensorExpression<D, R>,
{
    operand: &'a U,
    alpha: U::Scalar,
}

impl<'a, U, const D: usize, const R: usize> Scaled<'a, U, D, R>
where
    U: TensorExpression<D, R>,
{
    pub fn new(operand: &'a U, alpha: U::Scalar) -> Self {
        Self { operand, alpha }
    }

    pub fn alpha(&self) -> U::Scalar {
        self.alpha
    }
}

impl<'a, U, const D: usize, const R: usize> TensorExpression<D, R> for Scaled<'a, U, D, R>
where
    U: TensorExpression<D, R>,
{
    type Scalar = U::Scalar;

    #[inline]
    fn evaluate(&self, index: &[usize; R]) -> U::Scalar {
        self.operand.evaluate(index) * self.alpha
    }
}

impl<'a, U, const D: usize, const R: usize> Clone for Scaled<'a, U, D, R>
where
    U: TensorExpression<D, R>,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, U, const D: usize, const R: usize> Copy for Scaled<'a, U, D, R> where U: TensorExpression<D, R> {}

/// The expression `u + v` for operands of equal rank and dimension.
pub struct Sum<'a, U, V, const D: usize, const R: usize> {
    lhs: &'a U,
    rhs: &'a V,
}

impl<'a, U, V, const D: usize, const R: usize> Sum<'a, U, V, D, R>
where
    U: TensorExpression<D, R>,
    V: TensorExpression<D, R, Scalar = U::Scalar>,
{
    pub fn new(lhs: &'a U, rhs: &'a V) -> Self {
        Self { lhs, rhs }
    }
}

impl<'a, U, V, const D: usize, const R: usize> TensorExpression<D, R> for Sum<'a, U, V, D, R>
where
    U: TensorExpression<D, R>,
    V: TensorExpression<D, R, Scalar = U::Scalar>,
{
    type Scalar = U::Scalar;

    #[inline]
    fn evaluate(&self, index: &[usize; R]) -> U::Scalar {
        self.lhs.evaluate(index) + self.rhs.evaluate(index)
    }
}

/// The expression `u - v` for operands of equal rank and dimension.
pub struct Difference<'a, U, V, const D: usize, const R: usize> {
    lhs: &'a U,
    rhs: &'a V,
}

impl<'a, U, V, const D: usize, const R: usize> Difference<'a, U, V, D, R>
where
    U: TensorExpression<D, R>,
    V: TensorExpression<D, R, Scalar = U::Scalar>,
{
    pub fn new(lhs: &'a U, rhs: &'a V) -> Self {
        Self { lhs, rhs }
    }
}

impl<'a, U, V, const D: usize, const R: usize> TensorExpression<D, R> for Difference<'a, U, V, D, R>
where
    U: TensorExpression<D, R>,
    V: TensorExpression<D, R, Scalar = U::Scalar>,
{
    type Scalar = U::Scalar;

    #[inline]
    fn evaluate(&self, index: &[usize; R]) -> U::Scalar {
        self.lhs.evaluate(index) - self.rhs.evaluate(index)
    }
}

macro_rules! impl_copy_for_binary_node {
    ($($node:ident),*) => {
        $(
            impl<'a, U, V, const D: usize, const R: usize> Clone for $node<'a, U, V, D, R> {
                fn clone(&self) -> Self {
                    *self
                }
            }

            impl<'a, U, V, const D: usize, const R: usize> Copy for $node<'a, U, V, D, R> {}
        )*
    };
}

impl_copy_for_binary_node!(Sum, Difference);
