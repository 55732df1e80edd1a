//! Determinant, adjugate, and inverse with kernel selection.
//!
//! Two kernels compute the same value: sign-tracked Gaussian elimination
//! for symbol-free matrices, and Laplace cofactor expansion when entries
//! carry the indeterminate (no division exists for polynomials, so the
//! division-free expansion is the only exact route).

use fsym_matrix::Matrix;
use fsym_scalar::ExactScalar;

use crate::{DecompositionError, DecompositionResult, ensure_square};

/// Which determinant kernel handles a given matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetStrategy {
    /// Sign-tracked Gaussian elimination, O(n³) field operations.
    Elimination,
    /// Laplace expansion along the first row, division-free.
    Cofactor,
}

impl DetStrategy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Elimination => "elimination",
            Self::Cofactor => "cofactor",
        }
    }
}

/// Kernel selection: elimination wherever division is available.
#[must_use]
pub fn det_strategy(matrix: &Matrix) -> DetStrategy {
    if matrix.is_symbol_free() {
        DetStrategy::Elimination
    } else {
        DetStrategy::Cofactor
    }
}

/// Exact determinant of a square matrix.
pub fn det(matrix: &Matrix) -> DecompositionResult<ExactScalar> {
    let order = ensure_square(matrix)?;
    match det_strategy(matrix) {
        DetStrategy::Elimination => det_by_elimination(matrix, order),
        DetStrategy::Cofactor => Ok(det_by_cofactor(matrix)),
    }
}

/// Transposed cofactor matrix; satisfies `A·adj(A) = det(A)·I` for every
/// square `A`. The 1×1 adjugate is `[1]`.
pub fn adjugate(matrix: &Matrix) -> DecompositionResult<Matrix> {
    let order = ensure_square(matrix)?;
    if order == 1 {
        return Ok(Matrix::identity(1));
    }
    let mut data = vec![vec![ExactScalar::zero(); order]; order];
    for i in 0..order {
        for j in 0..order {
            let cofactor = det(&minor(matrix, i, j))?;
            data[j][i] = if (i + j) % 2 == 0 {
                cofactor
            } else {
                -&cofactor
            };
        }
    }
    Ok(Matrix::from_rows(data)?)
}

/// `adj(A)/det(A)`; fails with [`DecompositionError::SingularMatrix`] when
/// the determinant vanishes.
pub fn inverse(matrix: &Matrix) -> DecompositionResult<Matrix> {
    let determinant = det(matrix)?;
    if determinant.is_zero() {
        return Err(DecompositionError::SingularMatrix);
    }
    let reciprocal = ExactScalar::one().checked_div(&determinant)?;
    Ok(adjugate(matrix)?.scale(&reciprocal))
}

/// Exact singularity test: `det(A) == 0`.
pub fn is_singular(matrix: &Matrix) -> DecompositionResult<bool> {
    Ok(det(matrix)?.is_zero())
}

fn det_by_elimination(matrix: &Matrix, order: usize) -> DecompositionResult<ExactScalar> {
    let mut work: Vec<Vec<ExactScalar>> = matrix.row_iter().map(<[ExactScalar]>::to_vec).collect();
    let mut negate = false;
    for k in 0..order {
        let Some(found) = (k..order).find(|&r| !work[r][k].is_zero()) else {
            return Ok(ExactScalar::zero());
        };
        if found != k {
            work.swap(k, found);
            negate = !negate;
        }
        let pivot = work[k][k].clone();
        for r in k + 1..order {
            if work[r][k].is_zero() {
                continue;
            }
            let factor = work[r][k].checked_div(&pivot)?;
            for c in k..order {
                work[r][c] = &work[r][c] - &(&factor * &work[k][c]);
            }
        }
    }
    let mut product = ExactScalar::one();
    for k in 0..order {
        product = &product * &work[k][k];
    }
    Ok(if negate { -&product } else { product })
}

fn det_by_cofactor(matrix: &Matrix) -> ExactScalar {
    let order = matrix.rows();
    if order == 1 {
        return matrix.at(0, 0).clone();
    }
    let mut acc = ExactScalar::zero();
    for col in 0..order {
        let entry = matrix.at(0, col);
        if entry.is_zero() {
            continue;
        }
        let term = entry * &det_by_cofactor(&minor(matrix, 0, col));
        acc = if col % 2 == 0 { &acc + &term } else { &acc - &term };
    }
    acc
}

pub(crate) fn minor(matrix: &Matrix, row: usize, col: usize) -> Matrix {
    let order = matrix.rows();
    Matrix::from_fn(order - 1, order - 1, |r, c| {
        let rr = if r < row { r } else { r + 1 };
        let cc = if c < col { c } else { c + 1 };
        matrix.at(rr, cc).clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fsym_scalar::Number;

    fn int_matrix(rows: &[&[i64]]) -> Matrix {
        Matrix::from_rows(
            rows.iter()
                .map(|row| row.iter().map(|&v| ExactScalar::from_integer(v)).collect())
                .collect(),
        )
        .expect("well-formed literal")
    }

    #[test]
    fn determinant_of_small_matrices() {
        assert_eq!(det(&int_matrix(&[&[7]])).expect("det"), ExactScalar::from_integer(7));
        assert_eq!(
            det(&int_matrix(&[&[1, 2], &[3, 4]])).expect("det"),
            ExactScalar::from_integer(-2)
        );
        assert_eq!(
            det(&int_matrix(&[&[2, 0, 1], &[1, 3, 2], &[1, 1, 1]])).expect("det"),
            ExactScalar::from_integer(2)
        );
    }

    #[test]
    fn determinant_with_radical_entries() {
        // det [[√2, 1], [1, √2]] = 2 - 1 = 1
        let root_two = ExactScalar::from_number(Number::sqrt_of_integer(2));
        let m = Matrix::from_rows(vec![
            vec![root_two.clone(), ExactScalar::one()],
            vec![ExactScalar::one(), root_two],
        ])
        .expect("rows");
        assert_eq!(det(&m).expect("det"), ExactScalar::one());
    }

    #[test]
    fn symbolic_matrices_take_the_cofactor_kernel() {
        let m = Matrix::parse_rows(&[&["x", "1"], &["2", "x"]]).expect("parse");
        assert_eq!(det_strategy(&m), DetStrategy::Cofactor);
        let d = det(&m).expect("det");
        // x² - 2 at x = 3 is 7.
        assert_eq!(d.substitute(&Number::from_integer(3)), Number::from_integer(7));
    }

    #[test]
    fn numeric_matrices_take_the_elimination_kernel() {
        assert_eq!(det_strategy(&Matrix::identity(3)), DetStrategy::Elimination);
        assert_eq!(DetStrategy::Elimination.as_str(), "elimination");
    }

    #[test]
    fn non_square_input_is_a_structural_mismatch() {
        let m = int_matrix(&[&[1, 2, 3], &[4, 5, 6]]);
        assert_eq!(
            det(&m),
            Err(DecompositionError::StructuralMismatch { rows: 2, cols: 3 })
        );
    }

    #[test]
    fn adjugate_identity_holds() {
        let m = int_matrix(&[&[1, 2], &[3, 4]]);
        let adj = adjugate(&m).expect("adjugate");
        assert_eq!(adj, int_matrix(&[&[4, -2], &[-3, 1]]));
        let product = m.mul(&adj).expect("shapes");
        assert_eq!(product, Matrix::identity(2).scale(&ExactScalar::from_integer(-2)));
    }

    #[test]
    fn adjugate_of_one_by_one_is_the_unit() {
        assert_eq!(
            adjugate(&int_matrix(&[&[9]])).expect("adjugate"),
            Matrix::identity(1)
        );
    }

    #[test]
    fn inverse_round_trips() {
        let m = int_matrix(&[&[2, 1], &[1, 1]]);
        let inv = inverse(&m).expect("inverse");
        assert_eq!(m.mul(&inv).expect("shapes"), Matrix::identity(2));
        assert_eq!(inv.mul(&m).expect("shapes"), Matrix::identity(2));
    }

    #[test]
    fn inverse_with_complex_entries() {
        let m = Matrix::parse_rows(&[&["1", "i"], &["0", "1"]]).expect("parse");
        let inv = inverse(&m).expect("inverse");
        assert_eq!(m.mul(&inv).expect("shapes"), Matrix::identity(2));
    }

    #[test]
    fn singular_matrices_have_no_inverse() {
        let m = int_matrix(&[&[1, 2], &[2, 4]]);
        assert!(is_singular(&m).expect("singular check"));
        assert_eq!(inverse(&m), Err(DecompositionError::SingularMatrix));
    }
}
