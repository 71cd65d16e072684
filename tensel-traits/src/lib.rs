use nalgebra::{ClosedAdd, ClosedMul, ClosedSub, RealField};
use num::{One, Zero};

pub use nalgebra;

/// Scalar types that tensor expressions can be built from.
///
/// Integers qualify as well as floating-point types.
pub trait Scalar: nalgebra::Scalar + Copy + Zero + One + ClosedAdd + ClosedSub + ClosedMul {}

impl<T> Scalar for T where T: nalgebra::Scalar + Copy + Zero + One + ClosedAdd + ClosedSub + ClosedMul {}

pub trait Real: Scalar + RealField {}

impl<T: RealField + Copy> Real for T {}
