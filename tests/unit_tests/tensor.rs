use proptest::prelude::*;
use tensel::tensor::{otimes, MultiIndexIter, OuterProduct, ShapeError, Tensor, TensorExpression};
use util::assert_panics;

#[test]
fn storage_is_row_major() {
    let t = Tensor::<i64, 2, 3>::from_fn(|[i, j, k]| (100 * i + 10 * j + k) as i64);
    assert_eq!(Tensor::<i64, 2, 3>::LEN, 8);
    assert_eq!(t.as_slice(), &[0, 1, 10, 11, 100, 101, 110, 111]);
    assert_eq!(t[[1, 0, 1]], 101);
    assert_eq!(t.rank(), 3);
    assert_eq!(t.dimension(), 2);
}

#[test]
fn rank_zero_tensor_holds_a_single_value() {
    let t = Tensor::<f64, 3, 0>::from_vec(vec![5.0]);
    assert_eq!(Tensor::<f64, 3, 0>::LEN, 1);
    assert_eq!(t[[]], 5.0);
    assert_eq!(t.to_string(), "5");
}

#[test]
fn index_mut_writes_single_entry() {
    let mut t = Tensor::<i64, 2, 2>::zeros();
    t[[1, 0]] = 7;
    *t.at_mut([0, 1]) += 3;
    assert_eq!(t.as_slice(), &[0, 3, 7, 0]);
}

#[test]
fn try_from_vec_validates_length() {
    let result = Tensor::<f64, 2, 2>::try_from(vec![1.0, 2.0, 3.0]);
    assert_eq!(
        result,
        Err(ShapeError::StorageLength {
            expected: 4,
            actual: 3
        })
    );
    assert_panics!(Tensor::<f64, 2, 2>::from_vec(vec![1.0]));
}

#[test]
#[cfg(debug_assertions)]
fn out_of_range_index_panics_in_debug_builds() {
    let t = Tensor::<f64, 2, 2>::zeros();
    assert_panics!(t[[0, 2]]);
}

#[test]
fn multi_index_iter_visits_row_major_order() {
    let indices: Vec<_> = MultiIndexIter::<2, 2>::new().collect();
    assert_eq!(indices, vec![[0, 0], [0, 1], [1, 0], [1, 1]]);

    let iter = MultiIndexIter::<3, 3>::new();
    assert_eq!(iter.len(), 27);
    assert_eq!(iter.last(), Some([2, 2, 2]));

    let scalar_indices: Vec<[usize; 0]> = MultiIndexIter::<4, 0>::new().collect();
    assert_eq!(scalar_indices, vec![[0usize; 0]]);
}

#[test]
fn display_nests_brackets_by_rank() {
    let t = Tensor::<i64, 2, 2>::from_vec(vec![1, 2, 3, 4]);
    insta::assert_snapshot!(t.to_string(), @"[[1, 2], [3, 4]]");

    let v = Tensor::<i64, 3, 1>::from_vec(vec![1, -2, 3]);
    insta::assert_snapshot!(v.to_string(), @"[1, -2, 3]");
}

#[test]
fn operators_build_lazy_nodes() {
    let a = Tensor::<f64, 2, 1>::from_vec(vec![1.0, 2.0]);
    let b = Tensor::<f64, 2, 1>::from_vec(vec![3.0, 5.0]);

    let sum = &a + &b;
    let scaled = 2.0 * &sum;
    let difference = &scaled - &a;
    assert_eq!(sum.eval().as_slice(), &[4.0, 7.0]);
    assert_eq!(scaled.eval().as_slice(), &[8.0, 14.0]);
    assert_eq!(difference.eval().as_slice(), &[7.0, 12.0]);
    assert_eq!(scaled.alpha(), 2.0);
    assert_eq!((&difference * 0.5).eval().as_slice(), &[3.5, 6.0]);

    // Evaluating a node does not consume it or its operands
    assert_eq!(sum.evaluate(&[1]), 7.0);
    assert_eq!(a.as_slice(), &[1.0, 2.0]);
}

#[test]
fn integer_expressions_are_exact() {
    let a = Tensor::<i64, 3, 2>::from_fn(|[i, j]| (3 * i + j) as i64);
    let b = Tensor::<i64, 3, 2>::from_element(2);
    let sum = &a + &b;
    let tripled = &sum * 3;
    let expected = Tensor::<i64, 3, 2>::from_fn(|[i, j]| 3 * ((3 * i + j) as i64 + 2));
    assert!(tripled.elementwise_eq(&expected));
    assert_eq!(tripled.eval(), expected);
}

#[test]
fn compound_assignment_accepts_expressions() {
    let a = Tensor::<f64, 2, 2>::from_vec(vec![1.0, 2.0, 3.0, 4.0]);
    let mut t = Tensor::<f64, 2, 2>::from_element(1.0);
    t += &a.scaled(2.0);
    assert_eq!(t.as_slice(), &[3.0, 5.0, 7.0, 9.0]);
    t -= &a;
    assert_eq!(t.as_slice(), &[2.0, 3.0, 4.0, 5.0]);
    t *= 0.5;
    assert_eq!(t.as_slice(), &[1.0, 1.5, 2.0, 2.5]);

    let mut u = Tensor::<f64, 2, 2>::zeros();
    u.assign(&a.minus(&t));
    assert_eq!(u.as_slice(), &[0.0, 0.5, 1.0, 1.5]);
}

#[test]
fn linear_iter_matches_storage() {
    let a = Tensor::<i64, 3, 2>::from_fn(|[i, j]| (i * j) as i64);
    let scaled = a.scaled(-1);
    let values: Vec<_> = scaled.linear_iter().collect();
    assert_eq!(scaled.linear_iter().len(), 9);
    assert_eq!(values, a.map(|x| -x).into_vec());
}

#[test]
fn outer_product_splits_index_at_lhs_rank() {
    let u = Tensor::<i64, 3, 2>::from_fn(|[i, j]| (3 * i + j) as i64);
    let v = Tensor::<i64, 3, 1>::from_vec(vec![1, -1, 2]);

    let w: Tensor<i64, 3, 3> = u.otimes::<_, 1, 3>(&v).eval();
    for [i, j, k] in w.indices() {
        assert_eq!(w[[i, j, k]], u[[i, j]] * v[[k]]);
    }

    let reversed: Tensor<i64, 3, 3> = otimes::<_, _, 3, 1, 2, 3>(&v, &u).eval();
    assert_eq!(reversed[[2, 1, 0]], v[[2]] * u[[1, 0]]);
}

#[test]
fn outer_product_try_new_rejects_wrong_rank() {
    let u = Tensor::<f64, 3, 2>::zeros();
    let v = Tensor::<f64, 3, 1>::zeros();
    let result = OuterProduct::<_, _, 3, 2, 1, 4>::try_new(&u, &v);
    assert_eq!(
        result.err(),
        Some(ShapeError::RankMismatch {
            expected: 3,
            declared: 4
        })
    );
    assert!(OuterProduct::<_, _, 3, 2, 1, 3>::try_new(&u, &v).is_ok());
}

proptest! {
    #[test]
    fn sum_and_difference_match_entrywise(a in any::<Tensor<f64, 3, 2>>(), b in any::<Tensor<f64, 3, 2>>()) {
        let sum = a.plus(&b).eval();
        let difference = a.minus(&b).eval();
        for index in a.indices() {
            prop_assert_eq!(sum[index], a[index] + b[index]);
            prop_assert_eq!(difference[index], a[index] - b[index]);
        }
        prop_assert_eq!(b.plus(&a).eval(), sum);
        prop_assert!(a.minus(&a).elementwise_eq(&Tensor::<f64, 3, 2>::zeros()));
    }

    #[test]
    fn scaling_matches_map(a in any::<Tensor<f64, 2, 3>>(), alpha in -10.0..10.0f64) {
        prop_assert_eq!(a.scaled(alpha).eval(), a.map(|x| x * alpha));
        prop_assert_eq!((alpha * &a).eval(), (&a * alpha).eval());
    }

    #[test]
    fn nested_expressions_evaluate_without_intermediates(
        a in any::<Tensor<f64, 3, 1>>(),
        b in any::<Tensor<f64, 3, 1>>(),
        c in any::<Tensor<f64, 3, 1>>()
    ) {
        // (a + b) - 2c
        let sum = &a + &b;
        let c2 = &c * 2.0;
        let expr = &sum - &c2;
        for [i] in expr.indices() {
            prop_assert_eq!(expr.evaluate(&[i]), (a[[i]] + b[[i]]) - c[[i]] * 2.0);
        }
    }
}
