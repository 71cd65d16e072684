use crate::tensor::index::{linear_offset, storage_len, unravel};
use crate::tensor::{ShapeError, TensorExpression};
use crate::Scalar;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::convert::TryFrom;
use std::fmt;
use std::fmt::Display;
use std::ops::{AddAssign, Index, IndexMut, MulAssign, SubAssign};

/// A dense tensor of dimension `D` and rank `R`.
///
/// The tensor owns exactly `D^R` scalars stored in row-major order, meaning that the last index
/// varies fastest. It is the only expression node that owns data; every other node is a view over
/// one or more tensors.
///
/// Cloning performs a deep copy. Moving transfers the buffer, and the compiler rejects any
/// further use of the moved-from value. Since two tensors never share storage, an expression
/// borrowing a tensor can never observe a write to it.
///
/// Indexing checks each component against `D` in debug builds only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tensor<T, const D: usize, const R: usize> {
    data: Vec<T>,
}

impl<T, const D: usize, const R: usize> Tensor<T, D, R> {
    const POSITIVE_DIMENSION: () = assert!(D > 0, "tensor dimension must be positive");

    /// The number of scalars stored, `D^R`.
    pub const LEN: usize = storage_len(D, R);

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Iterates over all entries in row-major order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    pub fn at(&self, index: [usize; R]) -> &T {
        &self.data[linear_offset::<D, R>(&index)]
    }

    pub fn at_mut(&mut self, index: [usize; R]) -> &mut T {
        &mut self.data[linear_offset::<D, R>(&index)]
    }
}

impl<T, const D: usize, const R: usize> Tensor<T, D, R>
where
    T: Scalar,
{
    pub fn zeros() -> Self {
        Self::from_element(T::zero())
    }

    pub fn from_element(value: T) -> Self {
        let () = Self::POSITIVE_DIMENSION;
        Self {
            data: vec![value; Self::LEN],
        }
    }

    /// Creates a tensor by evaluating `f` at every multi-index, in row-major order.
    ///
    /// ```
    /// use tensel::tensor::Tensor;
    /// let t = Tensor::<i32, 3, 2>::from_fn(|[i, j]| (3 * i + j) as i32);
    /// assert_eq!(t[[2, 1]], 7);
    /// ```
    pub fn from_fn(mut f: impl FnMut([usize; R]) -> T) -> Self {
        let () = Self::POSITIVE_DIMENSION;
        let data = (0..Self::LEN).map(|offset| f(unravel::<D, R>(offset))).collect();
        Self { data }
    }

    /// Creates a tensor from entries given in row-major order.
    ///
    /// # Panics
    ///
    /// Panics if `data` does not have length `D^R`.
    pub fn from_vec(data: Vec<T>) -> Self {
        match Self::try_from(data) {
            Ok(tensor) => tensor,
            Err(err) => panic!("{}", err),
        }
    }

    /// Materializes an expression, evaluating it exactly once at every index.
    pub fn from_expression<E>(expression: &E) -> Self
    where
        E: TensorExpression<D, R, Scalar = T>,
    {
        let () = Self::POSITIVE_DIMENSION;
        Self {
            data: expression.linear_iter().collect(),
        }
    }

    /// Overwrites this tensor with the values of `expression`.
    ///
    /// The expression is traversed once, in row-major order. An expression that borrows `self`
    /// cannot be passed here, so there is no read-while-write hazard.
    pub fn assign<E>(&mut self, expression: &E)
    where
        E: TensorExpression<D, R, Scalar = T>,
    {
        for (target, value) in self.data.iter_mut().zip(expression.linear_iter()) {
            *target = value;
        }
    }

    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    pub fn map<U: Scalar>(&self, f: impl FnMut(T) -> U) -> Tensor<U, D, R> {
        Tensor {
            data: self.data.iter().copied().map(f).collect(),
        }
    }
}

impl<T, const D: usize, const R: usize> TensorExpression<D, R> for Tensor<T, D, R>
where
    T: Scalar,
{
    type Scalar = T;

    #[inline]
    fn evaluate(&self, index: &[usize; R]) -> T {
        self.data[linear_offset::<D, R>(index)]
    }
}

impl<T, const D: usize, const R: usize> Default for Tensor<T, D, R>
where
    T: Scalar,
{
    fn default() -> Self {
        Self::zeros()
    }
}

impl<T, const D: usize, const R: usize> Index<[usize; R]> for Tensor<T, D, R> {
    type Output = T;

    fn index(&self, index: [usize; R]) -> &T {
        self.at(index)
    }
}

impl<T, const D: usize, const R: usize> IndexMut<[usize; R]> for Tensor<T, D, R> {
    fn index_mut(&mut self, index: [usize; R]) -> &mut T {
        self.at_mut(index)
    }
}

impl<T, const D: usize, const R: usize> TryFrom<Vec<T>> for Tensor<T, D, R> {
    type Error = ShapeError;

    fn try_from(data: Vec<T>) -> Result<Self, Self::Error> {
        let () = Self::POSITIVE_DIMENSION;
        if data.len() == Self::LEN {
            Ok(Self { data })
        } else {
            Err(ShapeError::StorageLength {
                expected: Self::LEN,
                actual: data.len(),
            })
        }
    }
}

impl<T, const D: usize, const R: usize> From<Tensor<T, D, R>> for Vec<T> {
    fn from(tensor: Tensor<T, D, R>) -> Self {
        tensor.data
    }
}

impl<'a, T, E, const D: usize, const R: usize> AddAssign<&'a E> for Tensor<T, D, R>
where
    T: Scalar,
    E: TensorExpression<D, R, Scalar = T>,
{
    fn add_assign(&mut self, rhs: &'a E) {
        for (target, value) in self.data.iter_mut().zip(rhs.linear_iter()) {
            *target += value;
        }
    }
}

impl<'a, T, E, const D: usize, const R: usize> SubAssign<&'a E> for Tensor<T, D, R>
where
    T: Scalar,
    E: TensorExpression<D, R, Scalar = T>,
{
    fn sub_assign(&mut self, rhs: &'a E) {
        for (target, value) in self.data.iter_mut().zip(rhs.linear_iter()) {
            *target -= value;
        }
    }
}

impl<T, const D: usize, const R: usize> MulAssign<T> for Tensor<T, D, R>
where
    T: Scalar,
{
    fn mul_assign(&mut self, alpha: T) {
        for value in &mut self.data {
            *value *= alpha;
        }
    }
}

fn write_nested<T: Display>(f: &mut fmt::Formatter<'_>, data: &[T], dim: usize, rank: usize) -> fmt::Result {
    if rank == 0 {
        return write!(f, "{}", data[0]);
    }
    write!(f, "[")?;
    let chunk_len = data.len() / dim;
    for (n, chunk) in data.chunks(chunk_len).enumerate() {
        if n > 0 {
            write!(f, ", ")?;
        }
        write_nested(f, chunk, dim, rank - 1)?;
    }
    write!(f, "]")
}

impl<T, const D: usize, const R: usize> Display for Tensor<T, D, R>
where
    T: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_nested(f, &self.data, D, R)
    }
}

impl<T, const D: usize, const R: usize> Serialize for Tensor<T, D, R>
where
    T: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.data.serialize(serializer)
    }
}

impl<'de, T, const D: usize, const R: usize> Deserialize<'de> for Tensor<T, D, R>
where
    T: Deserialize<'de>,
{
    fn deserialize<De: Deserializer<'de>>(deserializer: De) -> Result<Self, De::Error> {
        let data = Vec::<T>::deserialize(deserializer)?;
        Self::try_from(data).map_err(De::Error::custom)
    }
}
