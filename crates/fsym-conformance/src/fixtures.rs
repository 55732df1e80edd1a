//! Shared scenario matrices for the conformance suites.
//!
//! Each constructor is total; the shapes and entries are fixed literals
//! chosen to steer specific engines into specific outcomes.

use fsym_matrix::Matrix;
use fsym_scalar::{ExactScalar, Number};
use num_bigint::BigInt;
use num_rational::BigRational;

fn int_matrix(rows: &'static [&'static [i64]]) -> Matrix {
    Matrix::from_fn(rows.len(), rows[0].len(), |r, c| {
        ExactScalar::from_integer(rows[r][c])
    })
}

fn rational(numerator: i64, denominator: i64) -> ExactScalar {
    ExactScalar::from_rational(BigRational::new(
        BigInt::from(numerator),
        BigInt::from(denominator),
    ))
}

/// `[[2,0],[0,3]]`. Distinct integer spectrum, eigenbasis on the axes.
#[must_use]
pub fn diagonal_spectrum() -> Matrix {
    int_matrix(&[&[2, 0], &[0, 3]])
}

/// `[[1,1],[0,1]]`. Eigenvalue 1 with algebraic multiplicity 2 but a
/// one-dimensional eigenspace.
#[must_use]
pub fn deficient_shear() -> Matrix {
    int_matrix(&[&[1, 1], &[0, 1]])
}

/// `[[0,1],[1,0]]`. Symmetric permutation with spectrum `{1, -1}`.
#[must_use]
pub fn exchange() -> Matrix {
    int_matrix(&[&[0, 1], &[1, 0]])
}

/// `[[1,2,3],[4,5,6]]`. Rank-two rectangle for the propagation scenario.
#[must_use]
pub fn wide_rank_two() -> Matrix {
    int_matrix(&[&[1, 2, 3], &[4, 5, 6]])
}

/// `[[1,1/2],[1/2,1/3]]`. Leading Hilbert block; determinant `1/12`.
#[must_use]
pub fn unit_fractions() -> Matrix {
    Matrix::from_fn(2, 2, |r, c| rational(1, (r + c + 1) as i64))
}

/// `[[1,1],[1,0]]`. Fibonacci step with golden-ratio spectrum.
#[must_use]
pub fn fibonacci_step() -> Matrix {
    int_matrix(&[&[1, 1], &[1, 0]])
}

/// `[[1,2],[2,4]]`. Rank one, so inverse and QR both refuse it.
#[must_use]
pub fn collapsed_columns() -> Matrix {
    int_matrix(&[&[1, 2], &[2, 4]])
}

/// `[[√2,0],[0,√8]]`. Radical entries whose product collapses to 4.
#[must_use]
pub fn radical_diagonal() -> Matrix {
    Matrix::from_fn(2, 2, |r, c| {
        if r == c {
            ExactScalar::from_number(Number::sqrt_of_integer(if r == 0 { 2 } else { 8 }))
        } else {
            ExactScalar::zero()
        }
    })
}

/// `[[2,i],[-i,2]]`. Hermitian with real spectrum `{1, 3}`.
#[must_use]
pub fn hermitian_coupling() -> Matrix {
    Matrix::from_fn(2, 2, |r, c| match (r, c) {
        (0, 1) => ExactScalar::from_number(Number::i()),
        (1, 0) => ExactScalar::from_number(-&Number::i()),
        _ => ExactScalar::from_integer(2),
    })
}

/// `[[x,1,0],[1,x,1],[0,1,x]]`. Tridiagonal in the indeterminate; only
/// the division-free engines accept it.
#[must_use]
pub fn symbolic_tridiagonal() -> Matrix {
    Matrix::from_fn(3, 3, |r, c| {
        if r == c {
            ExactScalar::indeterminate()
        } else if r.abs_diff(c) == 1 {
            ExactScalar::one()
        } else {
            ExactScalar::zero()
        }
    })
}
