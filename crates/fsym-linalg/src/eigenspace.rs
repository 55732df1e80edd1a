//! Eigenspaces: kernel bases of `A − λ₀I`.

use fsym_matrix::Matrix;
use fsym_scalar::{ExactScalar, Number};

use crate::charpoly::{Eigenvalue, eigenvalues};
use crate::elimination::null_space_basis;
use crate::{DecompositionResult, ensure_square};

/// One eigenvalue together with an exact basis of its eigenspace. For a
/// genuine eigenvalue `1 ≤ basis.len() ≤ algebraic_multiplicity`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Eigenpair {
    pub eigenvalue: Eigenvalue,
    pub basis: Vec<Matrix>,
}

/// Basis of the eigenspace for `eigenvalue`: the kernel of `A − λ₀I`. The
/// returned column vectors are exactly linearly independent; an empty basis
/// means `eigenvalue` is not an eigenvalue at all.
pub fn eigenvectors(matrix: &Matrix, eigenvalue: &Number) -> DecompositionResult<Vec<Matrix>> {
    let order = ensure_square(matrix)?;
    let shift = ExactScalar::from_number(eigenvalue.clone());
    let shifted = Matrix::from_fn(order, order, |r, c| {
        if r == c {
            matrix.at(r, c) - &shift
        } else {
            matrix.at(r, c).clone()
        }
    });
    null_space_basis(&shifted)
}

/// Every eigenvalue paired with its eigenspace basis, in eigenvalue
/// extraction order.
pub fn eigenpairs(matrix: &Matrix) -> DecompositionResult<Vec<Eigenpair>> {
    let values = eigenvalues(matrix)?;
    let mut pairs = Vec::with_capacity(values.len());
    for eigenvalue in values {
        let basis = eigenvectors(matrix, &eigenvalue.value)?;
        pairs.push(Eigenpair { eigenvalue, basis });
    }
    Ok(pairs)
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

    fn check_eigenpair(matrix: &Matrix, value: &Number, vector: &Matrix) {
        let image = matrix.mul(vector).expect("shapes");
        let scaled = vector.scale(&ExactScalar::from_number(value.clone()));
        assert_eq!(image, scaled);
    }

    #[test]
    fn diagonal_matrices_have_axis_eigenvectors() {
        let m = int_matrix(&[&[2, 0], &[0, 3]]);
        let for_two = eigenvectors(&m, &Number::from_integer(2)).expect("basis");
        assert_eq!(for_two.len(), 1);
        check_eigenpair(&m, &Number::from_integer(2), &for_two[0]);
        let for_three = eigenvectors(&m, &Number::from_integer(3)).expect("basis");
        assert_eq!(for_three.len(), 1);
        check_eigenpair(&m, &Number::from_integer(3), &for_three[0]);
    }

    #[test]
    fn non_eigenvalues_yield_empty_bases() {
        let m = int_matrix(&[&[2, 0], &[0, 3]]);
        assert!(eigenvectors(&m, &Number::from_integer(5)).expect("basis").is_empty());
    }

    #[test]
    fn shear_has_a_deficient_eigenspace() {
        let m = int_matrix(&[&[1, 1], &[0, 1]]);
        let pairs = eigenpairs(&m).expect("pairs");
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].eigenvalue.algebraic_multiplicity, 2);
        assert_eq!(pairs[0].basis.len(), 1);
    }

    #[test]
    fn symmetric_matrices_have_full_eigenspaces() {
        let m = int_matrix(&[&[2, 1], &[1, 2]]);
        let pairs = eigenpairs(&m).expect("pairs");
        let geometric_total: usize = pairs.iter().map(|pair| pair.basis.len()).sum();
        assert_eq!(geometric_total, 2);
        for pair in &pairs {
            assert_eq!(pair.basis.len(), pair.eigenvalue.algebraic_multiplicity);
            for vector in &pair.basis {
                check_eigenpair(&m, &pair.eigenvalue.value, vector);
            }
        }
    }

    #[test]
    fn complex_eigenvectors_of_a_rotation() {
        let m = int_matrix(&[&[0, -1], &[1, 0]]);
        let pairs = eigenpairs(&m).expect("pairs");
        assert_eq!(pairs.len(), 2);
        for pair in &pairs {
            assert_eq!(pair.basis.len(), 1);
            check_eigenpair(&m, &pair.eigenvalue.value, &pair.basis[0]);
        }
    }

    #[test]
    fn surd_eigenvalues_produce_surd_eigenvectors() {
        let m = int_matrix(&[&[1, 1], &[1, -1]]);
        let root_two = Number::sqrt_of_integer(2);
        let basis = eigenvectors(&m, &root_two).expect("basis");
        assert_eq!(basis.len(), 1);
        check_eigenpair(&m, &root_two, &basis[0]);
    }

    #[test]
    fn repeated_eigenvalue_with_full_geometric_multiplicity() {
        let m = int_matrix(&[&[3, 0], &[0, 3]]);
        let pairs = eigenpairs(&m).expect("pairs");
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].basis.len(), 2);
    }
}
