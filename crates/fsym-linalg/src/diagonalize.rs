//! Similarity diagonalization `A = P·D·P⁻¹`.

use fsym_matrix::Matrix;
use fsym_scalar::{ExactScalar, Number};

use crate::eigenspace::eigenpairs;
use crate::{DecompositionError, DecompositionResult, ensure_square};

/// Change of basis `p` and diagonal `d` with `A·P = P·D` exactly. The
/// column order of `p` matches the diagonal of `d`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagonalization {
    pub p: Matrix,
    pub d: Matrix,
}

/// Diagonalizes over the exact closure. Fails with
/// [`DecompositionError::NotDiagonalizable`] when the geometric
/// multiplicities do not exhaust the order.
pub fn diagonalize(matrix: &Matrix) -> DecompositionResult<Diagonalization> {
    let order = ensure_square(matrix)?;
    let pairs = eigenpairs(matrix)?;
    let geometric_total: usize = pairs.iter().map(|pair| pair.basis.len()).sum();
    if geometric_total < order {
        return Err(DecompositionError::NotDiagonalizable {
            geometric_total,
            order,
        });
    }
    let mut columns: Vec<Matrix> = Vec::with_capacity(order);
    let mut diagonal: Vec<Number> = Vec::with_capacity(order);
    for pair in pairs {
        for vector in pair.basis {
            columns.push(vector);
            diagonal.push(pair.eigenvalue.value.clone());
        }
    }
    let p = Matrix::from_fn(order, order, |r, c| columns[c].at(r, 0).clone());
    let d = Matrix::from_fn(order, order, |r, c| {
        if r == c {
            ExactScalar::from_number(diagonal[r].clone())
        } else {
            ExactScalar::zero()
        }
    });
    Ok(Diagonalization { p, d })
}
