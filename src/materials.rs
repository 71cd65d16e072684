//! Isotropic linear elasticity written in terms of tensor expressions.
use crate::element::ElementKinematics;
use crate::linalg::transpose;
use crate::tensor::{contract, Axes, Tensor, TensorExpression};
use crate::Real;
use nalgebra::DMatrix;
use numeric_literals::replace_float_literals;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LameParameters<T> {
    pub mu: T,
    pub lambda: T,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct YoungPoisson<T> {
    pub young: T,
    pub poisson: T,
}

impl<T: Real> From<YoungPoisson<T>> for LameParameters<T> {
    #[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
    fn from(params: YoungPoisson<T>) -> Self {
        let YoungPoisson { young, poisson } = params;
        let mu = 0.5 * young / (1.0 + poisson);
        let lambda = 2.0 * mu * poisson / (1.0 - 2.0 * poisson);
        Self { mu, lambda }
    }
}

fn delta<T: Real>(i: usize, j: usize) -> T {
    if i == j {
        T::one()
    } else {
        T::zero()
    }
}

/// The isotropic elasticity tensor
/// $$
/// C_{ijkl} = \lambda \delta_{ij} \delta_{kl} + \mu (\delta_{ik} \delta_{jl} + \delta_{il} \delta_{jk}).
/// $$
pub fn elasticity_tensor<T: Real, const D: usize>(params: &LameParameters<T>) -> Tensor<T, D, 4> {
    let &LameParameters { mu, lambda } = params;
    Tensor::from_fn(|[i, j, k, l]| {
        lambda * delta::<T>(i, j) * delta::<T>(k, l)
            + mu * (delta::<T>(i, k) * delta::<T>(j, l) + delta::<T>(i, l) * delta::<T>(j, k))
    })
}

/// The symmetric part `(H + H^T) / 2` of a displacement gradient `H`.
#[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
pub fn infinitesimal_strain<T: Real, const D: usize>(displacement_gradient: &Tensor<T, D, 2>) -> Tensor<T, D, 2> {
    let h_t = transpose(displacement_gradient);
    let sum = displacement_gradient.plus(&h_t);
    sum.scaled(0.5).eval()
}

/// The Cauchy stress `σ = C : ε`.
pub fn stress<T: Real, const D: usize>(params: &LameParameters<T>, strain: &Tensor<T, D, 2>) -> Tensor<T, D, 2> {
    let c = elasticity_tensor::<T, D>(params);
    contract(&c, strain, Axes::<2>).eval()
}

/// The strain energy density `ψ = ε : C : ε / 2`.
#[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
pub fn energy_density<T: Real, const D: usize>(params: &LameParameters<T>, strain: &Tensor<T, D, 2>) -> T {
    0.5 * stress(params, strain).contract_full(strain)
}

/// Assembles the dense stiffness matrix of a single element.
///
/// `kinematics` holds the element kinematics at each quadrature point. With `n` nodes the
/// result is `D n x D n`, and the block coupling nodes `A` and `B` is
/// $$
/// K_{(A D + i)(B D + k)} = \sum_q |J_q| w_q \, C_{ijkl} \, \partial_j N_A \, \partial_l N_B.
/// $$
/// Each block is obtained by contracting the reordered tensor `C_ikjl` with `∇N_A ⊗ ∇N_B`
/// over its last two axes.
///
/// # Panics
///
/// Panics if the quadrature points do not all report the same number of nodes.
pub fn element_stiffness<T: Real, const D: usize>(
    params: &LameParameters<T>,
    kinematics: &[ElementKinematics<T, D>],
) -> DMatrix<T> {
    let c = elasticity_tensor::<T, D>(params);
    let c_ikjl = Tensor::<T, D, 4>::from_fn(|[i, k, j, l]| c[[i, j, k, l]]);

    let num_nodes = kinematics
        .first()
        .map(|point| point.shape_gradients().len())
        .unwrap_or(0);
    let mut stiffness = DMatrix::zeros(D * num_nodes, D * num_nodes);

    for point in kinematics {
        let gradients = point.shape_gradients();
        assert_eq!(gradients.len(), num_nodes, "Node count must agree across quadrature points.");
        for (a, grad_a) in gradients.iter().enumerate() {
            for (b, grad_b) in gradients.iter().enumerate() {
                let grad_ab = grad_a.otimes::<_, 1, 2>(grad_b);
                let block: Tensor<T, D, 2> = contract(&c_ikjl, &grad_ab, Axes::<2>).eval();
                for [i, k] in block.indices() {
                    stiffness[(a * D + i, b * D + k)] += point.jxw() * block[[i, k]];
                }
            }
        }
    }

    stiffness
}
