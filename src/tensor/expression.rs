use crate::tensor::{
    contract_full, Axes, Contraction, Difference, ExpressionIter, MultiIndexIter, OuterProduct, Scaled, Sum, Tensor,
};
use crate::Scalar;

/// The capability shared by all tensor expression nodes.
///
/// An expression of dimension `D` and rank `R` can be evaluated at any multi-index
/// `[i_1, ..., i_R]` with every `i_k` in `[0, D)`. Apart from [`Tensor`], expressions are
/// lightweight views: they borrow their operands and compute entries on demand, so that
/// building and evaluating an expression tree performs no heap allocation.
///
/// Rank and dimension are part of the type, which is what makes shape mismatches between
/// operands compile-time errors.
pub trait TensorExpression<const D: usize, const R: usize> {
    type Scalar: Scalar;

    /// Evaluates the expression at a single multi-index.
    fn evaluate(&self, index: &[usize; R]) -> Self::Scalar;

    fn rank(&self) -> usize {
        R
    }

    fn dimension(&self) -> usize {
        D
    }

    /// All multi-indices of this expression, in row-major order.
    fn indices(&self) -> MultiIndexIter<D, R> {
        MultiIndexIter::new()
    }

    /// Reads the expression in row-major order, one evaluation per entry.
    fn linear_iter(&self) -> ExpressionIter<'_, Self, D, R> {
        ExpressionIter::new(self)
    }

    /// Materializes the expression into a dense tensor.
    fn eval(&self) -> Tensor<Self::Scalar, D, R>
    where
        Self: Sized,
    {
        Tensor::from_expression(self)
    }

    fn scaled(&self, alpha: Self::Scalar) -> Scaled<'_, Self, D, R>
    where
        Self: Sized,
    {
        Scaled::new(self, alpha)
    }

    fn plus<'a, V>(&'a self, other: &'a V) -> Sum<'a, Self, V, D, R>
    where
        Self: Sized,
        V: TensorExpression<D, R, Scalar = Self::Scalar>,
    {
        Sum::new(self, other)
    }

    fn minus<'a, V>(&'a self, other: &'a V) -> Difference<'a, Self, V, D, R>
    where
        Self: Sized,
        V: TensorExpression<D, R, Scalar = Self::Scalar>,
    {
        Difference::new(self, other)
    }

    /// The outer product `self ⊗ other`, of rank `R + R2 = RO`.
    fn otimes<'a, V, const R2: usize, const RO: usize>(&'a self, other: &'a V) -> OuterProduct<'a, Self, V, D, R, R2, RO>
    where
        Self: Sized,
        V: TensorExpression<D, R2, Scalar = Self::Scalar>,
    {
        OuterProduct::new(self, other)
    }

    /// Contracts the last `N` axes of `self` with the first `N` axes of `other`.
    ///
    /// See [`Contraction`] for details.
    fn contract<'a, V, const R2: usize, const N: usize, const RO: usize>(
        &'a self,
        other: &'a V,
        axes: Axes<N>,
    ) -> Contraction<'a, Self, V, D, R, R2, N, RO>
    where
        Self: Sized,
        V: TensorExpression<D, R2, Scalar = Self::Scalar>,
    {
        Contraction::new(self, other, axes)
    }

    /// Contracts all axes of `self` with all axes of `other`, producing a scalar.
    fn contract_full<V>(&self, other: &V) -> Self::Scalar
    where
        Self: Sized,
        V: TensorExpression<D, R, Scalar = Self::Scalar>,
    {
        contract_full(self, other)
    }

    /// Whether `self` and `other` agree exactly at every index.
    fn elementwise_eq<V>(&self, other: &V) -> bool
    where
        Self: Sized,
        V: TensorExpression<D, R, Scalar = Self::Scalar>,
    {
        self.linear_iter().eq(other.linear_iter())
    }
}
