use matrixcompare::assert_matrix_eq;
use nalgebra::{Matrix3, SMatrix, Vector3};
use proptest::prelude::*;
use tensel::linalg::identity;
use tensel::tensor::{contract, contract_full, dot, Axes, Contraction, ShapeError, Tensor, TensorExpression};

#[test]
fn vector_matrix_contraction() {
    // w_j = u_i v_ij
    let u = Tensor::<f64, 3, 1>::from_vec(vec![1.0, 2.0, 3.0]);
    let v = Tensor::<f64, 3, 2>::from_fn(|[i, j]| (3 * i + j) as f64);
    let w: Tensor<f64, 3, 1> = contract(&u, &v, Axes::<1>).eval();
    assert_eq!(w.as_slice(), &[24.0, 30.0, 36.0]);
}

#[test]
fn matrix_vector_contraction_agrees_with_nalgebra() {
    let a = Matrix3::new(2.0, -1.0, 0.5, 1.0, 3.0, -2.0, 0.0, 4.0, 1.5);
    let b = Vector3::new(1.0, -2.0, 0.25);

    let a_tensor = Tensor::from(a);
    let b_tensor = Tensor::from(b);
    let c: Tensor<f64, 3, 1> = a_tensor.contract::<_, 1, 1, 1>(&b_tensor, Axes::<1>).eval();

    assert_matrix_eq!(Vector3::from(&c), a * b, comp = abs, tol = 1e-14);
}

#[test]
fn full_contraction_yields_scalar() {
    let u = Tensor::<i64, 3, 1>::from_vec(vec![1, 2, 3]);
    let v = Tensor::<i64, 3, 1>::from_vec(vec![4, 5, 6]);
    assert_eq!(dot(&u, &v), 32);
    assert_eq!(u.contract_full(&u), 14);

    let a = Tensor::<i64, 2, 2>::from_vec(vec![1, 2, 3, 4]);
    assert_eq!(contract_full(&a, &identity::<i64, 2>()), 5);
}

#[test]
fn double_contraction_of_rank_four_with_rank_two() {
    // S_ij = C_ijkl E_kl
    let c = Tensor::<i64, 3, 4>::from_fn(|[i, j, k, l]| (27 * i + 9 * j + 3 * k + l) as i64 - 40);
    let e = Tensor::<i64, 3, 2>::from_fn(|[k, l]| (k as i64 - 1) * (2 * l as i64 + 1));
    let s: Tensor<i64, 3, 2> = contract(&c, &e, Axes::<2>).eval();

    for [i, j] in s.indices() {
        let mut expected = 0;
        for k in 0..3 {
            for l in 0..3 {
                expected += c[[i, j, k, l]] * e[[k, l]];
            }
        }
        assert_eq!(s[[i, j]], expected);
    }
}

#[test]
fn rank_four_with_two_contracted_axes_against_rank_four() {
    // T_ijmn = A_ijkl B_klmn
    let a = Tensor::<i64, 2, 4>::from_fn(|[i, j, k, l]| (8 * i + 4 * j + 2 * k + l) as i64);
    let b = Tensor::<i64, 2, 4>::from_fn(|[k, l, m, n]| (k + l) as i64 - (m * n) as i64);
    let t: Tensor<i64, 2, 4> = contract(&a, &b, Axes::<2>).eval();

    for [i, j, m, n] in t.indices() {
        let mut expected = 0;
        for [k, l] in Tensor::<i64, 2, 2>::zeros().indices() {
            expected += a[[i, j, k, l]] * b[[k, l, m, n]];
        }
        assert_eq!(t[[i, j, m, n]], expected);
    }
}

#[test]
fn identity_is_neutral_for_single_contraction() {
    let v = Tensor::<f64, 3, 1>::from_vec(vec![0.5, -1.0, 7.0]);
    let id = identity::<f64, 3>();
    let w: Tensor<f64, 3, 1> = contract(&id, &v, Axes::<1>).eval();
    assert_eq!(w, v);
}

#[test]
fn contraction_of_lazy_operands() {
    let a = Tensor::<i64, 2, 2>::from_vec(vec![1, 2, 3, 4]);
    let b = Tensor::<i64, 2, 2>::from_vec(vec![-1, 0, 5, 2]);
    let v = Tensor::<i64, 2, 1>::from_vec(vec![3, -2]);

    let sum = &a + &b;
    let lazy: Tensor<i64, 2, 1> = contract(&sum, &v, Axes::<1>).eval();
    let av: Tensor<i64, 2, 1> = contract(&a, &v, Axes::<1>).eval();
    let bv: Tensor<i64, 2, 1> = contract(&b, &v, Axes::<1>).eval();
    assert_eq!(lazy, av.plus(&bv).eval());

    let contraction = contract::<_, _, 2, 2, 1, 1, 1>(&a, &v, Axes::<1>);
    let doubled = &contraction * 2;
    assert_eq!(doubled.eval(), av.scaled(2).eval());
}

#[test]
fn try_new_rejects_invalid_configurations() {
    let u = Tensor::<f64, 3, 1>::zeros();
    let m = Tensor::<f64, 3, 2>::zeros();

    let no_axes = Contraction::<_, _, 3, 1, 2, 0, 3>::try_new(&u, &m, Axes::<0>);
    assert_eq!(no_axes.err(), Some(ShapeError::NoContractedAxes));

    let too_many = Contraction::<_, _, 3, 1, 2, 2, 1>::try_new(&u, &m, Axes::<2>);
    assert_eq!(
        too_many.err(),
        Some(ShapeError::TooManyContractedAxes {
            contracted: 2,
            lhs_rank: 1,
            rhs_rank: 2
        })
    );

    let scalar = Contraction::<_, _, 3, 1, 1, 1, 1>::try_new(&u, &u, Axes::<1>);
    assert_eq!(scalar.err(), Some(ShapeError::ScalarResult));

    let wrong_rank = Contraction::<_, _, 3, 1, 2, 1, 2>::try_new(&u, &m, Axes::<1>);
    assert_eq!(
        wrong_rank.err(),
        Some(ShapeError::RankMismatch {
            expected: 1,
            declared: 2
        })
    );
}

#[test]
fn try_new_accepts_valid_configuration() {
    let m = Tensor::<f64, 2, 2>::from_vec(vec![1.0, 2.0, 3.0, 4.0]);
    let v = Tensor::<f64, 2, 1>::from_vec(vec![1.0, 1.0]);
    let product = Contraction::<_, _, 2, 2, 1, 1, 1>::try_new(&m, &v, Axes::<1>).unwrap();
    assert_eq!(product.eval().as_slice(), &[3.0, 7.0]);
}

#[test]
fn shape_error_messages() {
    let error = ShapeError::TooManyContractedAxes {
        contracted: 3,
        lhs_rank: 2,
        rhs_rank: 4,
    };
    insta::assert_snapshot!(error.to_string(), @"Cannot contract 3 axes of operands with ranks 2 and 4.");
}

proptest! {
    #[test]
    fn matrix_product_agrees_with_nalgebra(a in any::<Tensor<f64, 3, 2>>(), b in any::<Tensor<f64, 3, 2>>()) {
        let c: Tensor<f64, 3, 2> = contract(&a, &b, Axes::<1>).eval();
        let expected = SMatrix::from(&a) * SMatrix::from(&b);
        assert_matrix_eq!(SMatrix::from(&c), expected, comp = abs, tol = 1e-12);
    }

    #[test]
    fn repeated_evaluation_is_bit_identical(a in any::<Tensor<f64, 3, 3>>(), b in any::<Tensor<f64, 3, 2>>()) {
        let contraction = contract::<_, _, 3, 3, 2, 1, 3>(&a, &b, Axes::<1>);
        let first = contraction.eval();
        let second = contraction.eval();
        let first_bits: Vec<u64> = first.iter().map(|x| x.to_bits()).collect();
        let second_bits: Vec<u64> = second.iter().map(|x| x.to_bits()).collect();
        prop_assert_eq!(first_bits, second_bits);
    }
}
