//! QR factorization by classical Gram-Schmidt.
//!
//! Orthogonalization runs entirely in rational projections; the single
//! square root per column happens once at normalization time, so the only
//! closure boundary is `√(‖u‖²)`. Complex entries are refused up front and
//! dependent columns surface as singularity.

use fsym_matrix::Matrix;
use fsym_scalar::ExactScalar;

use crate::{
    DecompositionError, DecompositionResult, ensure_symbol_free, lift_closure_failure,
    scalar_to_number,
};

/// `A = Q·R` with `Qᵀ·Q = I` and `R` upper triangular with positive
/// diagonal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrFactors {
    pub q: Matrix,
    pub r: Matrix,
}

/// Factors an m×n real matrix with independent columns. Fails with
/// [`DecompositionError::UnsupportedComplexEntries`] on any imaginary
/// part, [`DecompositionError::SingularMatrix`] on dependent columns, and
/// [`DecompositionError::UnsupportedRootForm`] when a column norm leaves
/// the closure.
pub fn qr(matrix: &Matrix) -> DecompositionResult<QrFactors> {
    if !matrix.is_complex_free() {
        return Err(DecompositionError::UnsupportedComplexEntries);
    }
    ensure_symbol_free(matrix, "orthogonalization over polynomial entries")?;
    let (rows, cols) = matrix.shape();

    let mut raw_columns: Vec<Vec<ExactScalar>> = Vec::with_capacity(cols);
    let mut norms_sqr: Vec<ExactScalar> = Vec::with_capacity(cols);
    let mut coefficients = vec![vec![ExactScalar::zero(); cols]; cols];
    for j in 0..cols {
        let original = matrix.column_vec(j)?;
        let mut residual = original.clone();
        for k in 0..j {
            let coefficient = dot(&original, &raw_columns[k]).checked_div(&norms_sqr[k])?;
            for (entry, basis_entry) in residual.iter_mut().zip(&raw_columns[k]) {
                *entry = &*entry - &(&coefficient * basis_entry);
            }
            coefficients[k][j] = coefficient;
        }
        if residual.iter().all(ExactScalar::is_zero) {
            return Err(DecompositionError::SingularMatrix);
        }
        norms_sqr.push(dot(&residual, &residual));
        raw_columns.push(residual);
    }

    let mut norms = Vec::with_capacity(cols);
    for norm_sqr in &norms_sqr {
        let value = scalar_to_number(norm_sqr, "column norm over polynomial entries")?;
        let root = value.sqrt().map_err(lift_closure_failure)?;
        norms.push(ExactScalar::from_number(root));
    }
    let mut orthonormal = Vec::with_capacity(cols);
    for (residual, norm) in raw_columns.iter().zip(&norms) {
        let mut column = Vec::with_capacity(rows);
        for entry in residual {
            column.push(entry.checked_div(norm)?);
        }
        orthonormal.push(column);
    }

    let q = Matrix::from_fn(rows, cols, |r, c| orthonormal[c][r].clone());
    let r = Matrix::from_fn(cols, cols, |row, col| {
        if row == col {
            norms[row].clone()
        } else if row < col {
            &coefficients[row][col] * &norms[row]
        } else {
            ExactScalar::zero()
        }
    });
    Ok(QrFactors { q, r })
}

fn dot(a: &[ExactScalar], b: &[ExactScalar]) -> ExactScalar {
    let mut acc = ExactScalar::zero();
    for (x, y) in a.iter().zip(b) {
        acc = &acc + &(x * y);
    }
    acc
}
