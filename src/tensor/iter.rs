use crate::tensor::index::{increment, storage_len, zeros};
use crate::tensor::TensorExpression;
use std::iter::FusedIterator;

/// Enumerates every multi-index of a rank-`R`, dimension-`D` tensor.
///
/// The order is lexicographic with the last axis varying fastest, which coincides with the
/// row-major storage order of [`Tensor`](crate::tensor::Tensor). Exactly `D^R` indices are
/// produced.
///
/// ```
/// use tensel::tensor::MultiIndexIter;
/// let indices: Vec<_> = MultiIndexIter::<2, 2>::new().collect();
/// assert_eq!(indices, vec![[0, 0], [0, 1], [1, 0], [1, 1]]);
/// ```
#[derive(Debug, Clone)]
pub struct MultiIndexIter<const D: usize, const R: usize> {
    next: [usize; R],
    remaining: usize,
}

impl<const D: usize, const R: usize> MultiIndexIter<D, R> {
    pub fn new() -> Self {
        Self {
            next: zeros(),
            remaining: storage_len(D, R),
        }
    }
}

impl<const D: usize, const R: usize> Default for MultiIndexIter<D, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const D: usize, const R: usize> Iterator for MultiIndexIter<D, R> {
    type Item = [usize; R];

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.next;
        increment::<D, R>(&mut self.next);
        self.remaining -= 1;
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<const D: usize, const R: usize> ExactSizeIterator for MultiIndexIter<D, R> {}

impl<const D: usize, const R: usize> FusedIterator for MultiIndexIter<D, R> {}

/// Evaluates an expression at every multi-index, in the order of [`MultiIndexIter`].
///
/// Created by [`TensorExpression::linear_iter`].
#[derive(Debug)]
pub struct ExpressionIter<'a, E: ?Sized, const D: usize, const R: usize> {
    expression: &'a E,
    indices: MultiIndexIter<D, R>,
}

impl<'a, E: ?Sized, const D: usize, const R: usize> ExpressionIter<'a, E, D, R> {
    pub fn new(expression: &'a E) -> Self {
        Self {
            expression,
            indices: MultiIndexIter::new(),
        }
    }
}

impl<'a, E: ?Sized, const D: usize, const R: usize> Clone for ExpressionIter<'a, E, D, R> {
    fn clone(&self) -> Self {
        Self {
            expression: self.expression,
            indices: self.indices.clone(),
        }
    }
}

impl<'a, E, const D: usize, const R: usize> Iterator for ExpressionIter<'a, E, D, R>
where
    E: TensorExpression<D, R> + ?Sized,
{
    type Item = E::Scalar;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.indices
            .next()
            .map(|index| self.expression.evaluate(&index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

impl<'a, E, const D: usize, const R: usize> ExactSizeIterator for ExpressionIter<'a, E, D, R> where
    E: TensorExpression<D, R> + ?Sized
{
}

impl<'a, E, const D: usize, const R: usize> FusedIterator for ExpressionIter<'a, E, D, R> where
    E: TensorExpression<D, R> + ?Sized
{
}
