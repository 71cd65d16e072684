//! Strategies for generating tensors in property-based tests.
use crate::tensor::Tensor;
use crate::Scalar;
use ::proptest::collection::vec;
use ::proptest::prelude::*;

/// Tensors whose entries are drawn independently from `values`.
pub fn tensor_strategy<T, S, const D: usize, const R: usize>(values: S) -> impl Strategy<Value = Tensor<T, D, R>>
where
    T: Scalar,
    S: Strategy<Value = T>,
{
    vec(values, Tensor::<T, D, R>::LEN).prop_map(Tensor::from_vec)
}

impl<const D: usize, const R: usize> Arbitrary for Tensor<f64, D, R> {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        // Keep entries moderate so that sums of products stay well-conditioned
        tensor_strategy(-10.0..10.0).boxed()
    }
}
