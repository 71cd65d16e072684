//! Dense tensors of compile-time rank and dimension, and lazily evaluated expressions over them.
//!
//! [`Tensor`] owns its entries. All other nodes ([`Scaled`], [`Sum`], [`Difference`],
//! [`OuterProduct`] and [`Contraction`]) borrow their operands and compute entries only when
//! evaluated at a concrete multi-index, so arbitrarily nested expressions never materialize
//! intermediate tensors. The lifetime on each node ties it to the data it reads.
//!
//! Axis convention for contractions: the *last* `N` axes of the left operand are contracted
//! against the *first* `N` axes of the right operand.
//!
//! ```
//! use tensel::tensor::{contract, Axes, Tensor, TensorExpression};
//! let u = Tensor::<f64, 3, 1>::from_vec(vec![1.0, 2.0, 3.0]);
//! let v = Tensor::<f64, 3, 2>::from_fn(|[i, j]| (3 * i + j) as f64);
//! let w: Tensor<f64, 3, 1> = contract(&u, &v, Axes::<1>).eval();
//! assert_eq!(w.as_slice(), &[24.0, 30.0, 36.0]);
//! ```
mod contraction;
mod elementwise;
mod error;
mod expression;
pub mod index;
mod iter;
mod ops;
mod outer;
mod storage;

pub use contraction::{contract, contract_full, dot, Axes, Contraction};
pub use elementwise::{Difference, Scaled, Sum};
pub use error::ShapeError;
pub use expression::TensorExpression;
pub use iter::{ExpressionIter, MultiIndexIter};
pub use outer::{otimes, OuterProduct};
pub use storage::Tensor;
