#![forbid(unsafe_code)]

//! Exact decomposition engines over the scalar closure.
//!
//! Every operation is an independent boundary entry point: it validates its
//! own structural preconditions, returns `Result`, and never panics on any
//! matrix that passed the construction boundary. A failure in one engine
//! says nothing about the others; callers that want the full picture run
//! them all and collect the outcomes.
//!
//! Module layout:
//! - `elimination`: [`rref`], [`rank`], [`null_space_basis`]
//! - `determinant`: [`det`] with strategy dispatch, [`adjugate`], [`inverse`]
//! - `charpoly`: [`charpoly`] (Faddeev-LeVerrier), [`eigenvalues`]
//! - `eigenspace`: [`eigenvectors`], [`eigenpairs`]
//! - `diagonalize`: [`diagonalize`], `A = P·D·P⁻¹`
//! - `lu`: [`lu`], Doolittle without pivoting
//! - `qr`: [`qr`], classical Gram-Schmidt
//! - `spectral`: [`spectral_decompose`], unitary diagonalization
//! - `evidence`: [`DecompositionLedger`], bounded FIFO audit trail

pub mod charpoly;
pub mod determinant;
pub mod diagonalize;
pub mod eigenspace;
pub mod elimination;
pub mod evidence;
pub mod lu;
pub mod qr;
pub mod spectral;

pub use charpoly::{Eigenvalue, charpoly, eigenvalues};
pub use determinant::{DetStrategy, adjugate, det, det_strategy, inverse, is_singular};
pub use diagonalize::{Diagonalization, diagonalize};
pub use eigenspace::{Eigenpair, eigenpairs, eigenvectors};
pub use elimination::{RrefResult, null_space_basis, rank, rref};
pub use evidence::{
    DecompositionLedger, OperationEvidenceEntry, OperationOutcome, record_outcome,
};
pub use lu::{LuFactors, lu};
pub use qr::{QrFactors, qr};
pub use spectral::spectral_decompose;

use fsym_matrix::{Matrix, MatrixError};
use fsym_scalar::{ExactScalar, Number, ScalarError};
use thiserror::Error;

pub type DecompositionResult<T> = Result<T, DecompositionError>;

/// Shared failure taxonomy of the decomposition engines.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecompositionError {
    #[error("operation requires a square matrix, got {rows}x{cols}")]
    StructuralMismatch { rows: usize, cols: usize },
    #[error("singular matrix")]
    SingularMatrix,
    #[error(
        "matrix is not diagonalizable: geometric multiplicities sum to \
         {geometric_total} over order {order}"
    )]
    NotDiagonalizable {
        geometric_total: usize,
        order: usize,
    },
    #[error("matrix is not normal")]
    NotNormalMatrix,
    #[error("result lies outside the exact closure (residual degree {degree})")]
    UnsupportedRootForm { degree: usize },
    #[error("operation does not support complex entries")]
    UnsupportedComplexEntries,
    #[error("zero pivot encountered at elimination step {step}")]
    ZeroPivotEncountered { step: usize },
    #[error(transparent)]
    Scalar(#[from] ScalarError),
    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

pub(crate) fn ensure_square(matrix: &Matrix) -> DecompositionResult<usize> {
    let (rows, cols) = matrix.shape();
    if rows == cols {
        Ok(rows)
    } else {
        Err(DecompositionError::StructuralMismatch { rows, cols })
    }
}

pub(crate) fn ensure_symbol_free(
    matrix: &Matrix,
    operation: &'static str,
) -> DecompositionResult<()> {
    if matrix.is_symbol_free() {
        Ok(())
    } else {
        Err(ScalarError::UnsupportedOperation { operation }.into())
    }
}

/// Promotes a closure failure from the scalar layer to the engine-level
/// variant; everything else stays wrapped.
pub(crate) fn lift_closure_failure(err: ScalarError) -> DecompositionError {
    match err {
        ScalarError::UnsupportedRootForm { degree } => {
            DecompositionError::UnsupportedRootForm { degree }
        }
        other => DecompositionError::Scalar(other),
    }
}

pub(crate) fn scalar_to_number<'a>(
    entry: &'a ExactScalar,
    operation: &'static str,
) -> DecompositionResult<&'a Number> {
    entry
        .to_number()
        .ok_or(DecompositionError::Scalar(ScalarError::UnsupportedOperation {
            operation,
        }))
}
