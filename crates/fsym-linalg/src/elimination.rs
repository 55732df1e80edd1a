//! Gauss-Jordan elimination: reduced row echelon form, rank, and the null
//! space basis every eigenspace computation reads off.
//!
//! Elimination divides by pivots, so it requires decidable division in every
//! entry; matrices carrying the indeterminate are rejected at the boundary
//! (the characteristic polynomial engine deliberately avoids division).

use fsym_matrix::Matrix;
use fsym_scalar::ExactScalar;

use crate::{DecompositionResult, ensure_symbol_free};

/// Canonical reduced row echelon form plus the pivot column indices, in
/// strictly increasing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RrefResult {
    pub rref: Matrix,
    pub pivot_columns: Vec<usize>,
}

/// Gauss-Jordan reduction with first-nonzero pivot selection. Works on any
/// shape; the result is canonical, so reducing twice is a no-op.
pub fn rref(matrix: &Matrix) -> DecompositionResult<RrefResult> {
    ensure_symbol_free(matrix, "row reduction over polynomial entries")?;
    let (rows, cols) = matrix.shape();
    let mut work: Vec<Vec<ExactScalar>> = matrix.row_iter().map(<[ExactScalar]>::to_vec).collect();
    let mut pivot_columns = Vec::new();
    let mut pivot_row = 0usize;
    for col in 0..cols {
        if pivot_row == rows {
            break;
        }
        let Some(found) = (pivot_row..rows).find(|&r| !work[r][col].is_zero()) else {
            continue;
        };
        work.swap(pivot_row, found);
        let pivot = work[pivot_row][col].clone();
        for entry in &mut work[pivot_row] {
            *entry = entry.checked_div(&pivot)?;
        }
        for r in 0..rows {
            if r == pivot_row || work[r][col].is_zero() {
                continue;
            }
            let factor = work[r][col].clone();
            for c in 0..cols {
                work[r][c] = &work[r][c] - &(&factor * &work[pivot_row][c]);
            }
        }
        pivot_columns.push(col);
        pivot_row += 1;
    }
    Ok(RrefResult {
        rref: Matrix::from_rows(work)?,
        pivot_columns,
    })
}

/// Number of pivots in the reduced form.
pub fn rank(matrix: &Matrix) -> DecompositionResult<usize> {
    Ok(rref(matrix)?.pivot_columns.len())
}

/// One column vector per free column of the reduced form: 1 at the free
/// position, the negated pivot-row entries above. The vectors are exactly
/// linearly independent and span the kernel.
pub fn null_space_basis(matrix: &Matrix) -> DecompositionResult<Vec<Matrix>> {
    let RrefResult {
        rref: reduced,
        pivot_columns,
    } = rref(matrix)?;
    let cols = matrix.cols();
    let mut basis = Vec::with_capacity(cols - pivot_columns.len());
    for free in 0..cols {
        if pivot_columns.contains(&free) {
            continue;
        }
        let mut entries = vec![ExactScalar::zero(); cols];
        entries[free] = ExactScalar::one();
        for (pivot_row, &pivot_col) in pivot_columns.iter().enumerate() {
            entries[pivot_col] = -reduced.at(pivot_row, free);
        }
        basis.push(Matrix::column(entries));
    }
    Ok(basis)
}
