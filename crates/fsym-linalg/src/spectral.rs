//! Spectral decomposition of normal matrices: `A = P·D·Pᴴ` with `P`
//! unitary.
//!
//! Eigenspaces of a normal matrix are mutually orthogonal under the
//! conjugate inner product, so orthonormalization happens per eigenspace
//! only; the cross-space inner products vanish exactly.

use fsym_matrix::Matrix;
use fsym_scalar::{ExactScalar, Number};

use crate::diagonalize::Diagonalization;
use crate::eigenspace::eigenpairs;
use crate::{
    DecompositionError, DecompositionResult, ensure_square, lift_closure_failure, scalar_to_number,
};

/// Unitary diagonalization. Fails with
/// [`DecompositionError::NotNormalMatrix`] unless `A·Aᴴ == Aᴴ·A` exactly,
/// and with [`DecompositionError::UnsupportedRootForm`] when an
/// eigenvector norm leaves the closure.
pub fn spectral_decompose(matrix: &Matrix) -> DecompositionResult<Diagonalization> {
    let order = ensure_square(matrix)?;
    if !matrix.is_normal() {
        return Err(DecompositionError::NotNormalMatrix);
    }
    let pairs = eigenpairs(matrix)?;
    let geometric_total: usize = pairs.iter().map(|pair| pair.basis.len()).sum();
    if geometric_total < order {
        return Err(DecompositionError::NotDiagonalizable {
            geometric_total,
            order,
        });
    }

    let mut columns: Vec<Vec<ExactScalar>> = Vec::with_capacity(order);
    let mut diagonal: Vec<Number> = Vec::with_capacity(order);
    for pair in &pairs {
        let mut space: Vec<Vec<ExactScalar>> = Vec::with_capacity(pair.basis.len());
        let mut space_norms_sqr: Vec<ExactScalar> = Vec::with_capacity(pair.basis.len());
        for vector in &pair.basis {
            let mut residual = vector.column_vec(0)?;
            for (basis_vector, norm_sqr) in space.iter().zip(&space_norms_sqr) {
                let coefficient = hermitian_dot(&residual, basis_vector).checked_div(norm_sqr)?;
                for (entry, basis_entry) in residual.iter_mut().zip(basis_vector) {
                    *entry = &*entry - &(&coefficient * basis_entry);
                }
            }
            let norm_sqr = hermitian_dot(&residual, &residual);
            let value = scalar_to_number(&norm_sqr, "vector norm over polynomial entries")?;
            let norm = ExactScalar::from_number(value.sqrt().map_err(lift_closure_failure)?);
            let mut normalized = Vec::with_capacity(order);
            for entry in &residual {
                normalized.push(entry.checked_div(&norm)?);
            }
            space.push(residual);
            space_norms_sqr.push(norm_sqr);
            columns.push(normalized);
            diagonal.push(pair.eigenvalue.value.clone());
        }
    }

    let p = Matrix::from_fn(order, order, |r, c| columns[c][r].clone());
    let d = Matrix::from_fn(order, order, |r, c| {
        if r == c {
            ExactScalar::from_number(diagonal[r].clone())
        } else {
            ExactScalar::zero()
        }
    });
    Ok(Diagonalization { p, d })
}

/// `⟨u, v⟩ = Σ uᵢ·conj(vᵢ)`; `⟨u, u⟩` is real and positive for nonzero `u`.
fn hermitian_dot(u: &[ExactScalar], v: &[ExactScalar]) -> ExactScalar {
    let mut acc = ExactScalar::zero();
    for (x, y) in u.iter().zip(v) {
        acc = &acc + &(x * &y.conj());
    }
    acc
}
