//! Doolittle LU factorization without pivoting.
//!
//! `A = L·U` with `L` unit lower triangular holding the elimination
//! multipliers and `U` upper triangular. No row permutation is ever
//! performed: a zero pivot is reported, not worked around, so the factors
//! always multiply back to `A` itself.

use fsym_matrix::Matrix;
use fsym_scalar::ExactScalar;

use crate::{DecompositionError, DecompositionResult, ensure_square};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LuFactors {
    pub l: Matrix,
    pub u: Matrix,
}

/// Factors a square matrix; fails with
/// [`DecompositionError::ZeroPivotEncountered`] at the first exactly zero
/// pivot.
pub fn lu(matrix: &Matrix) -> DecompositionResult<LuFactors> {
    let order = ensure_square(matrix)?;
    let mut l = vec![vec![ExactScalar::zero(); order]; order];
    let mut u = vec![vec![ExactScalar::zero(); order]; order];
    for k in 0..order {
        l[k][k] = ExactScalar::one();
        for j in k..order {
            let mut acc = matrix.at(k, j).clone();
            for s in 0..k {
                acc = &acc - &(&l[k][s] * &u[s][j]);
            }
            u[k][j] = acc;
        }
        if u[k][k].is_zero() {
            return Err(DecompositionError::ZeroPivotEncountered { step: k });
        }
        for i in k + 1..order {
            let mut acc = matrix.at(i, k).clone();
            for s in 0..k {
                acc = &acc - &(&l[i][s] * &u[s][k]);
            }
            l[i][k] = acc.checked_div(&u[k][k])?;
        }
    }
    Ok(LuFactors {
        l: Matrix::from_rows(l)?,
        u: Matrix::from_rows(u)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int_matrix(rows: &[&[i64]]) -> Matrix {
        Matrix::from_rows(
            rows.iter()
                .map(|row| row.iter().map(|&v| ExactScalar::from_integer(v)).collect())
                .collect(),
        )
        .expect("well-formed literal")
    }

    fn check_factors(matrix: &Matrix, factors: &LuFactors) {
        assert!(factors.l.is_lower_triangular());
        assert!(factors.u.is_upper_triangular());
        for k in 0..factors.l.rows() {
            assert!(factors.l.at(k, k).is_one());
        }
        assert_eq!(factors.l.mul(&factors.u).expect("shapes"), *matrix);
    }

    #[test]
    fn factors_a_three_by_three() {
        let m = int_matrix(&[&[2, 1, 1], &[4, 3, 3], &[8, 7, 9]]);
        let factors = lu(&m).expect("lu");
        check_factors(&m, &factors);
        assert_eq!(factors.l, int_matrix(&[&[1, 0, 0], &[2, 1, 0], &[4, 3, 1]]));
        assert_eq!(factors.u, int_matrix(&[&[2, 1, 1], &[0, 1, 1], &[0, 0, 2]]));
    }

    #[test]
    fn fractional_multipliers_stay_exact() {
        let m = int_matrix(&[&[2, 1], &[1, 3]]);
        let factors = lu(&m).expect("lu");
        check_factors(&m, &factors);
        let half = Matrix::parse_rows(&[&["1", "0"], &["1/2", "1"]]).expect("parse");
        assert_eq!(factors.l, half);
    }

    #[test]
    fn complex_entries_factor_too() {
        let m = Matrix::parse_rows(&[&["1", "i"], &["i", "2"]]).expect("parse");
        let factors = lu(&m).expect("lu");
        check_factors(&m, &factors);
    }

    #[test]
    fn zero_pivot_is_reported_with_its_step() {
        let m = int_matrix(&[&[0, 1], &[1, 0]]);
        assert_eq!(lu(&m), Err(DecompositionError::ZeroPivotEncountered { step: 0 }));
        // A later pivot can vanish after elimination even when the
        // corresponding entry of A does not.
        let late = int_matrix(&[&[1, 2], &[2, 4]]);
        assert_eq!(lu(&late), Err(DecompositionError::ZeroPivotEncountered { step: 1 }));
    }

    #[test]
    fn non_square_input_is_a_structural_mismatch() {
        let m = int_matrix(&[&[1, 2, 3], &[4, 5, 6]]);
        assert_eq!(
            lu(&m),
            Err(DecompositionError::StructuralMismatch { rows: 2, cols: 3 })
        );
    }
}

#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    // Build A = L·U from generated factors; Doolittle factors with nonzero
    // pivots are unique, so the round trip must reproduce them exactly.
    fn arb_factored(order: usize) -> impl Strategy<Value = (Matrix, Matrix)> {
        let lower = prop::collection::vec(-3i64..=3, order * (order - 1) / 2);
        let upper = prop::collection::vec(-4i64..=4, order * (order - 1) / 2);
        let diagonal = prop::collection::vec(1i64..=5, order);
        (lower, upper, diagonal).prop_map(move |(lower, upper, diagonal)| {
            let mut lower = lower.into_iter();
            let l = Matrix::from_fn(order, order, |r, c| {
                if r == c {
                    ExactScalar::one()
                } else if r > c {
                    ExactScalar::from_integer(lower.next().unwrap_or_default())
                } else {
                    ExactScalar::zero()
                }
            });
            let mut upper = upper.into_iter();
            let mut diagonal = diagonal.into_iter();
            let u = Matrix::from_fn(order, order, |r, c| {
                if r == c {
                    ExactScalar::from_integer(diagonal.next().unwrap_or(1))
                } else if r < c {
                    ExactScalar::from_integer(upper.next().unwrap_or_default())
                } else {
                    ExactScalar::zero()
                }
            });
            (l, u)
        })
    }

    proptest! {
        #[test]
        fn round_trips_to_the_generating_factors((l, u) in arb_factored(3)) {
            let a = l.mul(&u).expect("shapes");
            let factors = lu(&a).expect("pivots are nonzero by construction");
            prop_assert_eq!(factors.l, l);
            prop_assert_eq!(factors.u, u);
        }
    }
}
