//! Element-local kinematics expressed with tensor expressions.
use crate::linalg::{determinant, transpose, try_inverse};
use crate::tensor::{contract, Axes, Tensor, TensorExpression};
use crate::Real;
use eyre::eyre;
use itertools::izip;
use log::warn;
use numeric_literals::replace_float_literals;

/// The bilinear four-node quadrilateral on the reference domain `[-1, 1]^2`.
///
/// Nodes are ordered counter-clockwise, starting at `(-1, -1)`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Quad4;

impl Quad4 {
    pub const NUM_NODES: usize = 4;

    #[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
    pub fn reference_vertices<T: Real>() -> [Tensor<T, 2, 1>; Quad4::NUM_NODES] {
        [
            Tensor::from_vec(vec![-1.0, -1.0]),
            Tensor::from_vec(vec![1.0, -1.0]),
            Tensor::from_vec(vec![1.0, 1.0]),
            Tensor::from_vec(vec![-1.0, 1.0]),
        ]
    }

    /// Evaluates the four basis functions at the reference coordinate `xi`.
    #[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
    pub fn evaluate_basis<T: Real>(xi: &Tensor<T, 2, 1>) -> [T; Quad4::NUM_NODES] {
        Self::reference_vertices::<T>().map(|node| (1.0 + node[[0]] * xi[[0]]) * (1.0 + node[[1]] * xi[[1]]) / 4.0)
    }

    /// The reference gradients `∇_ξ N_A` of the four basis functions at `xi`.
    #[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
    pub fn gradients<T: Real>(xi: &Tensor<T, 2, 1>) -> [Tensor<T, 2, 1>; Quad4::NUM_NODES] {
        Self::reference_vertices::<T>().map(|node| {
            Tensor::from_fn(|[c]| {
                let other = 1 - c;
                node[[c]] * (1.0 + node[[other]] * xi[[other]]) / 4.0
            })
        })
    }

    /// The 2x2 tensor-product Gauss rule, returned as `(weights, points)`.
    #[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
    pub fn gauss_quadrature<T: Real>() -> ([T; 4], [Tensor<T, 2, 1>; 4]) {
        let a = 1.0 / T::sqrt(3.0);
        let points = Self::reference_vertices::<T>().map(|node| Tensor::from_fn(|[c]| a * node[[c]]));
        ([1.0; 4], points)
    }
}

/// Geometric quantities of an element at a single quadrature point.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementKinematics<T, const NSD: usize> {
    jacobian: Tensor<T, NSD, 2>,
    jacobian_determinant: T,
    jxw: T,
    shape_gradients: Vec<Tensor<T, NSD, 1>>,
}

impl<T: Real, const NSD: usize> ElementKinematics<T, NSD> {
    /// Computes the kinematics of an element whose topological dimension equals `NSD`.
    ///
    /// `nodes` holds the physical coordinates `x_A` of the element nodes and
    /// `reference_gradients` the gradients `∇_ξ N_A` at the quadrature point with weight
    /// `weight`. The Jacobian is `J = Σ_A x_A ⊗ ∇_ξ N_A` and the physical gradients are
    /// `∇N_A = J^{-T} ∇_ξ N_A`.
    ///
    /// Returns an error if the Jacobian is singular.
    ///
    /// # Panics
    ///
    /// Panics if `nodes` and `reference_gradients` have different lengths.
    pub fn at_quadrature_point(
        nodes: &[Tensor<T, NSD, 1>],
        reference_gradients: &[Tensor<T, NSD, 1>],
        weight: T,
    ) -> eyre::Result<Self> {
        assert_eq!(
            nodes.len(),
            reference_gradients.len(),
            "Need one reference gradient per node."
        );

        let mut jacobian = Tensor::<T, NSD, 2>::zeros();
        for (x, grad_xi) in izip!(nodes, reference_gradients) {
            jacobian += &x.otimes::<_, 1, 2>(grad_xi);
        }

        let jacobian_determinant = determinant(&jacobian);
        let jacobian_inverse = try_inverse(&jacobian)
            .ok_or_else(|| eyre!("Element Jacobian is singular (determinant {}).", jacobian_determinant))?;
        if jacobian_determinant < T::zero() {
            warn!(
                "Inverted element: negative Jacobian determinant {}.",
                jacobian_determinant
            );
        }

        let jacobian_inverse_t = transpose(&jacobian_inverse);
        let shape_gradients = reference_gradients
            .iter()
            .map(|grad_xi| -> Tensor<T, NSD, 1> { contract(&jacobian_inverse_t, grad_xi, Axes::<1>).eval() })
            .collect();

        Ok(Self {
            jacobian,
            jacobian_determinant,
            jxw: jacobian_determinant.abs() * weight,
            shape_gradients,
        })
    }

    pub fn jacobian(&self) -> &Tensor<T, NSD, 2> {
        &self.jacobian
    }

    pub fn jacobian_determinant(&self) -> T {
        self.jacobian_determinant
    }

    /// The quadrature weight scaled by `|det J|`.
    pub fn jxw(&self) -> T {
        self.jxw
    }

    /// The physical gradients `∇N_A`, one per node.
    pub fn shape_gradients(&self) -> &[Tensor<T, NSD, 1>] {
        &self.shape_gradients
    }
}

impl<T: Real> ElementKinematics<T, 2> {
    /// Kinematics at every 2x2 Gauss point of a [`Quad4`] element with the given vertices.
    pub fn quad4(vertices: &[Tensor<T, 2, 1>; Quad4::NUM_NODES]) -> eyre::Result<Vec<Self>> {
        let (weights, points) = Quad4::gauss_quadrature::<T>();
        izip!(weights, &points)
            .map(|(w, xi)| Self::at_quadrature_point(vertices, &Quad4::gradients(xi), w))
            .collect()
    }
}
