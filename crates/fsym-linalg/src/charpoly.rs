//! Characteristic polynomial and eigenvalues.
//!
//! The Faddeev-LeVerrier recurrence produces `det(λI − A)` with divisions
//! by the step index only, so it stays exact without ever dividing by a
//! matrix entry. The indeterminate is reserved for the characteristic
//! variable; a matrix that already carries it is rejected.

use fsym_matrix::Matrix;
use fsym_scalar::{ExactScalar, Number, Polynomial};

use crate::{
    DecompositionResult, ensure_square, ensure_symbol_free, lift_closure_failure, scalar_to_number,
};

/// A root of the characteristic polynomial with its multiplicity as a root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Eigenvalue {
    pub value: Number,
    pub algebraic_multiplicity: usize,
}

/// Monic characteristic polynomial `det(λI − A)` of degree `n`.
pub fn charpoly(matrix: &Matrix) -> DecompositionResult<Polynomial> {
    let order = ensure_square(matrix)?;
    ensure_symbol_free(
        matrix,
        "characteristic polynomial of a matrix carrying the indeterminate",
    )?;
    let mut coeffs = vec![Number::zero(); order + 1];
    coeffs[order] = Number::one();
    let mut auxiliary = Matrix::identity(order);
    for step in 1..=order {
        let product = matrix.mul(&auxiliary)?;
        #[allow(clippy::cast_possible_wrap)]
        let coefficient =
            (-&trace(&product)?).checked_div(&Number::from_integer(step as i64))?;
        coeffs[order - step] = coefficient.clone();
        if step < order {
            let shift = Matrix::identity(order).scale(&ExactScalar::from_number(coefficient));
            auxiliary = product.add(&shift)?;
        }
    }
    Ok(Polynomial::new(coeffs))
}

/// All eigenvalues with algebraic multiplicities; on success the
/// multiplicities sum to the order. Roots outside the closure fail with
/// [`crate::DecompositionError::UnsupportedRootForm`], never approximated.
pub fn eigenvalues(matrix: &Matrix) -> DecompositionResult<Vec<Eigenvalue>> {
    let polynomial = charpoly(matrix)?;
    let roots = polynomial
        .roots_with_multiplicity()
        .map_err(lift_closure_failure)?;
    Ok(roots
        .into_iter()
        .map(|(value, algebraic_multiplicity)| Eigenvalue {
            value,
            algebraic_multiplicity,
        })
        .collect())
}

fn trace(matrix: &Matrix) -> DecompositionResult<Number> {
    let mut acc = Number::zero();
    for k in 0..matrix.rows() {
        acc = &acc + scalar_to_number(matrix.at(k, k), "trace over polynomial entries")?;
    }
    Ok(acc)
}


#[cfg(test)]
mod proptest_tests {
    use super::*;
    use crate::determinant::det;
    use proptest::prelude::*;

    fn arb_square(order: usize) -> impl Strategy<Value = Matrix> {
        prop::collection::vec(-4i64..=4, order * order).prop_map(move |values| {
            let mut iter = values.into_iter();
            Matrix::from_fn(order, order, |_, _| {
                ExactScalar::from_integer(iter.next().unwrap_or_default())
            })
        })
    }

    proptest! {
        #[test]
        fn constant_term_is_the_signed_determinant(m in arb_square(3)) {
            let p = charpoly(&m).expect("charpoly");
            let d = det(&m).expect("det");
            // (-1)³·p(0) = det(A) for order 3.
            prop_assert_eq!(ExactScalar::from_number(-&p.coeff(0)), d);
        }

        #[test]
        fn charpoly_is_monic_of_full_degree(m in arb_square(3)) {
            let p = charpoly(&m).expect("charpoly");
            prop_assert_eq!(p.degree(), 3);
            prop_assert_eq!(p.coeff(3), Number::one());
        }
    }
}
