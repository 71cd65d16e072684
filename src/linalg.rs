//! Small dense linear algebra on rank-1 and rank-2 tensors.
//!
//! Determinants and inverses have hand-written paths for dimensions 1 to 3, which are the
//! sizes that occur in element computations. Other dimensions go through `nalgebra`.
use crate::tensor::{contract_full, Tensor, TensorExpression};
use crate::{Real, Scalar};
use nalgebra::{DMatrix, SMatrix, SVector};
use numeric_literals::replace_float_literals;

/// The identity tensor `δ_ij`.
pub fn identity<T: Scalar, const D: usize>() -> Tensor<T, D, 2> {
    Tensor::from_fn(|[i, j]| if i == j { T::one() } else { T::zero() })
}

pub fn transpose<T: Scalar, const D: usize>(matrix: &Tensor<T, D, 2>) -> Tensor<T, D, 2> {
    Tensor::from_fn(|[i, j]| matrix[[j, i]])
}

pub fn trace<T: Scalar, const D: usize>(matrix: &Tensor<T, D, 2>) -> T {
    (0..D).fold(T::zero(), |acc, i| acc + matrix[[i, i]])
}

/// The Euclidean (Frobenius for rank 2) norm of an expression.
pub fn norm<T, E, const D: usize, const R: usize>(expression: &E) -> T
where
    T: Real,
    E: TensorExpression<D, R, Scalar = T>,
{
    contract_full(expression, expression).sqrt()
}

pub fn cross<T: Scalar>(a: &Tensor<T, 3, 1>, b: &Tensor<T, 3, 1>) -> Tensor<T, 3, 1> {
    Tensor::from_vec(vec![
        a[[1]] * b[[2]] - a[[2]] * b[[1]],
        a[[2]] * b[[0]] - a[[0]] * b[[2]],
        a[[0]] * b[[1]] - a[[1]] * b[[0]],
    ])
}

pub fn determinant<T: Real, const D: usize>(matrix: &Tensor<T, D, 2>) -> T {
    let m = |i: usize, j: usize| matrix[[i, j]];
    match D {
        1 => m(0, 0),
        2 => m(0, 0) * m(1, 1) - m(0, 1) * m(1, 0),
        3 => {
            m(0, 0) * (m(1, 1) * m(2, 2) - m(1, 2) * m(2, 1)) - m(0, 1) * (m(1, 0) * m(2, 2) - m(1, 2) * m(2, 0))
                + m(0, 2) * (m(1, 0) * m(2, 1) - m(1, 1) * m(2, 0))
        }
        _ => to_dmatrix(matrix).determinant(),
    }
}

/// Attempts to invert a matrix. Returns `None` if the matrix is singular.
#[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
pub fn try_inverse<T: Real, const D: usize>(matrix: &Tensor<T, D, 2>) -> Option<Tensor<T, D, 2>> {
    let m = |i: usize, j: usize| matrix[[i, j]];
    match D {
        1 | 2 | 3 => {
            let det = determinant(matrix);
            if det == 0.0 {
                return None;
            }
            let cofactor_transpose = match D {
                1 => identity(),
                2 => Tensor::from_fn(|[i, j]| {
                    let sign = if i == j { 1.0 } else { -1.0 };
                    sign * m(1 - j, 1 - i)
                }),
                _ => Tensor::from_fn(|[i, j]| {
                    // Cyclic index shifts turn the 2x2 minors into signed cofactors
                    let (j1, j2) = ((j + 1) % 3, (j + 2) % 3);
                    let (i1, i2) = ((i + 1) % 3, (i + 2) % 3);
                    m(j1, i1) * m(j2, i2) - m(j1, i2) * m(j2, i1)
                }),
            };
            let mut inverse = cofactor_transpose;
            inverse *= 1.0 / det;
            Some(inverse)
        }
        _ => to_dmatrix(matrix)
            .try_inverse()
            .map(|inverse| Tensor::from_fn(|[i, j]| inverse[(i, j)])),
    }
}

pub fn to_dmatrix<T: Scalar, const D: usize>(matrix: &Tensor<T, D, 2>) -> DMatrix<T> {
    DMatrix::from_fn(D, D, |i, j| matrix[[i, j]])
}

impl<T: Scalar, const D: usize> From<SMatrix<T, D, D>> for Tensor<T, D, 2> {
    fn from(matrix: SMatrix<T, D, D>) -> Self {
        Tensor::from_fn(|[i, j]| matrix[(i, j)])
    }
}

impl<'a, T: Scalar, const D: usize> From<&'a Tensor<T, D, 2>> for SMatrix<T, D, D> {
    fn from(tensor: &'a Tensor<T, D, 2>) -> Self {
        SMatrix::from_fn(|i, j| tensor[[i, j]])
    }
}

impl<T: Scalar, const D: usize> From<SVector<T, D>> for Tensor<T, D, 1> {
    fn from(vector: SVector<T, D>) -> Self {
        Tensor::from_fn(|[i]| vector[i])
    }
}

impl<'a, T: Scalar, const D: usize> From<&'a Tensor<T, D, 1>> for SVector<T, D> {
    fn from(tensor: &'a Tensor<T, D, 1>) -> Self {
        SVector::from_fn(|i, _| tensor[[i]])
    }
}
