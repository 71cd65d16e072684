//! Arithmetic operators for references to expression nodes.
//!
//! `&u + &v` and `&u - &v` build [`Sum`] and [`Difference`] nodes, `&u * alpha` and `alpha * &u`
//! build [`Scaled`] nodes. There is intentionally no `&u * &v`: products of tensors are spelled
//! out as [`otimes`](crate::tensor::otimes) or [`contract`](crate::tensor::contract).
//!
//! Operators take references, so the resulting node borrows its operands. Nested operators
//! therefore need named intermediates:
//!
//! ```
//! use tensel::tensor::{Tensor, TensorExpression};
//! let a = Tensor::<f64, 2, 1>::from_vec(vec![1.0, 2.0]);
//! let b = Tensor::<f64, 2, 1>::from_vec(vec![3.0, 5.0]);
//! let sum = &a + &b;
//! let scaled = 2.0 * &sum;
//! assert_eq!(scaled.eval().as_slice(), &[8.0, 14.0]);
//! ```
use crate::tensor::{Contraction, Difference, OuterProduct, Scaled, Sum, Tensor, TensorExpression};
use crate::Scalar;
use std::ops::{Add, Mul, Sub};

macro_rules! impl_expression_ops {
    ([$($generics:tt)*] $node:ty where [$($bounds:tt)*]) => {
        impl<'r, $($generics)*, Rhs> Add<&'r Rhs> for &'r $node
        where
            $($bounds)*
            Rhs: TensorExpression<D, R, Scalar = <$node as TensorExpression<D, R>>::Scalar>,
        {
            type Output = Sum<'r, $node, Rhs, D, R>;

            fn add(self, rhs: &'r Rhs) -> Self::Output {
                Sum::new(self, rhs)
            }
        }

        impl<'r, $($generics)*, Rhs> Sub<&'r Rhs> for &'r $node
        where
            $($bounds)*
            Rhs: TensorExpression<D, R, Scalar = <$node as TensorExpression<D, R>>::Scalar>,
        {
            type Output = Difference<'r, $node, Rhs, D, R>;

            fn sub(self, rhs: &'r Rhs) -> Self::Output {
                Difference::new(self, rhs)
            }
        }

        impl<'r, $($generics)*, S> Mul<S> for &'r $node
        where
            $($bounds)*
            S: Scalar,
            $node: TensorExpression<D, R, Scalar = S>,
        {
            type Output = Scaled<'r, $node, D, R>;

            fn mul(self, alpha: S) -> Self::Output {
                Scaled::new(self, alpha)
            }
        }

        impl_expression_ops!(@left_scalar [$($generics)*] $node where [$($bounds)*] f32);
        impl_expression_ops!(@left_scalar [$($generics)*] $node where [$($bounds)*] f64);
    };
    (@left_scalar [$($generics:tt)*] $node:ty where [$($bounds:tt)*] $scalar:ty) => {
        impl<'r, $($generics)*> Mul<&'r $node> for $scalar
        where
            $($bounds)*
            $node: TensorExpression<D, R, Scalar = $scalar>,
        {
            type Output = Scaled<'r, $node, D, R>;

            fn mul(self, expression: &'r $node) -> Self::Output {
                Scaled::new(expression, self)
            }
        }
    };
}

impl_expression_ops!([T, const D: usize, const R: usize] Tensor<T, D, R> where [T: Scalar,]);
impl_expression_ops!(
    ['a, U, const D: usize, const R: usize] Scaled<'a, U, D, R>
    where [U: TensorExpression<D, R>,]
);
impl_expression_ops!(
    ['a, U, V, const D: usize, const R: usize] Sum<'a, U, V, D, R>
    where [U: TensorExpression<D, R>, V: TensorExpression<D, R, Scalar = U::Scalar>,]
);
impl_expression_ops!(
    ['a, U, V, const D: usize, const R: usize] Difference<'a, U, V, D, R>
    where [U: TensorExpression<D, R>, V: TensorExpression<D, R, Scalar = U::Scalar>,]
);
impl_expression_ops!(
    ['a, U, V, const D: usize, const R1: usize, const R2: usize, const R: usize]
    OuterProduct<'a, U, V, D, R1, R2, R>
    where [U: TensorExpression<D, R1>, V: TensorExpression<D, R2, Scalar = U::Scalar>,]
);
impl_expression_ops!(
    ['a, U, V, const D: usize, const R1: usize, const R2: usize, const N: usize, const R: usize]
    Contraction<'a, U, V, D, R1, R2, N, R>
    where [U: TensorExpression<D, R1>, V: TensorExpression<D, R2, Scalar = U::Scalar>,]
);
