//! Finite element building blocks on top of a tensor algebra engine with compile-time rank
//! and dimension.
//!
//! The [`tensor`] module is the core: dense tensors and composable, lazily evaluated
//! expressions over them. The remaining modules use it to express element-local physics.
pub mod element;
pub mod linalg;
pub mod materials;
pub mod matmul;
pub mod tensor;

#[cfg(feature = "proptest-support")]
pub mod proptest;

pub extern crate nalgebra;

pub use tensel_traits::{Real, Scalar};
