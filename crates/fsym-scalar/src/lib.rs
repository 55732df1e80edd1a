#![forbid(unsafe_code)]

//! FrankenSymPy exact scalar field: the number closure every decomposition
//! engine computes in.
//!
//! The closure is `ℚ`-linear combinations of square roots of squarefree
//! integers, paired into complex numbers, extended by one polynomial
//! indeterminate. Equality is decidable, arithmetic never rounds, and
//! anything outside the closure (cube roots, nested radicals) is rejected
//! rather than approximated.
//!
//! Module layout:
//! - `surd`: [`SurdSum`], real sums `Σ cᵢ·√dᵢ` in canonical form
//! - `number`: [`Number`], complex pairs over the surd closure
//! - `poly`: [`Polynomial`], dense univariate polynomials with exact roots
//! - `scalar`: [`ExactScalar`], the matrix entry type (value or poly)
//! - `parse`: [`parse_scalar`], the boundary grammar

pub mod number;
pub mod parse;
pub mod poly;
pub mod scalar;
pub mod surd;

pub use number::Number;
pub use parse::{InvalidScalarLiteral, parse_scalar};
pub use poly::Polynomial;
pub use scalar::ExactScalar;
pub use surd::SurdSum;

use thiserror::Error;

pub type ScalarResult<T> = Result<T, ScalarError>;

/// Failures of exact scalar arithmetic. Everything here is a statement
/// about the closure, not about precision: no operation ever rounds.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ScalarError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("root form outside the exact closure (residual degree {degree})")]
    UnsupportedRootForm { degree: usize },
    #[error("unsupported scalar operation: {operation}")]
    UnsupportedOperation { operation: &'static str },
}
