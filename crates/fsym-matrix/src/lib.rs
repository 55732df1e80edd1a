#![forbid(unsafe_code)]

//! Dense matrices over the exact scalar closure.
//!
//! A [`Matrix`] is immutable once constructed: every operation returns a
//! new matrix. Construction through [`Matrix::from_rows`] (or the literal
//! form [`Matrix::parse_rows`]) is the validation boundary: ragged input,
//! empty input, and malformed entry literals are rejected there, so every
//! matrix that exists is rectangular and non-empty.

use std::fmt;

use fsym_scalar::{ExactScalar, InvalidScalarLiteral, Number, parse_scalar};
use thiserror::Error;

pub type MatrixResult<T> = Result<T, MatrixError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatrixError {
    #[error("row {row} has {found} entries, expected {expected}")]
    RaggedRows {
        expected: usize,
        found: usize,
        row: usize,
    },
    #[error("matrix must have at least one row and one column")]
    EmptyMatrix,
    #[error("dimension mismatch: left is {}x{}, right is {}x{}", left.0, left.1, right.0, right.1)]
    DimensionMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },
    #[error("index ({row}, {col}) out of bounds for a {rows}x{cols} matrix")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    #[error("entry ({row}, {col}): {source}")]
    InvalidEntry {
        row: usize,
        col: usize,
        #[source]
        source: InvalidScalarLiteral,
    },
}

/// Row-major dense matrix of [`ExactScalar`] entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<ExactScalar>,
}

impl Matrix {
    /// Validation boundary: rejects ragged rows and empty shapes.
    pub fn from_rows(rows: Vec<Vec<ExactScalar>>) -> MatrixResult<Self> {
        let row_count = rows.len();
        let col_count = rows.first().map_or(0, Vec::len);
        if row_count == 0 || col_count == 0 {
            return Err(MatrixError::EmptyMatrix);
        }
        let mut data = Vec::with_capacity(row_count * col_count);
        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != col_count {
                return Err(MatrixError::RaggedRows {
                    expected: col_count,
                    found: row.len(),
                    row: index,
                });
            }
            data.extend(row);
        }
        Ok(Self {
            rows: row_count,
            cols: col_count,
            data,
        })
    }

    /// Literal form of [`Matrix::from_rows`]: every entry goes through the
    /// scalar grammar, and the first malformed literal is reported with its
    /// coordinates.
    pub fn parse_rows(rows: &[&[&str]]) -> MatrixResult<Self> {
        let mut parsed = Vec::with_capacity(rows.len());
        for (r, row) in rows.iter().enumerate() {
            let mut out = Vec::with_capacity(row.len());
            for (c, literal) in row.iter().enumerate() {
                let entry = parse_scalar(literal).map_err(|source| MatrixError::InvalidEntry {
                    row: r,
                    col: c,
                    source,
                })?;
                out.push(entry);
            }
            parsed.push(out);
        }
        Self::from_rows(parsed)
    }

    #[must_use]
    pub fn identity(order: usize) -> Self {
        Self::from_fn(order, order, |r, c| {
            if r == c {
                ExactScalar::one()
            } else {
                ExactScalar::zero()
            }
        })
    }

    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::from_fn(rows, cols, |_, _| ExactScalar::zero())
    }

    #[must_use]
    pub fn from_fn(rows: usize, cols: usize, mut entry: impl FnMut(usize, usize) -> ExactScalar) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                data.push(entry(r, c));
            }
        }
        Self { rows, cols, data }
    }

    /// Single-column matrix from a vector of entries.
    #[must_use]
    pub fn column(entries: Vec<ExactScalar>) -> Self {
        let rows = entries.len();
        Self {
            rows,
            cols: 1,
            data: entries,
        }
    }

    #[must_use]
    pub const fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub const fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> MatrixResult<&ExactScalar> {
        if row >= self.rows || col >= self.cols {
            return Err(MatrixError::IndexOutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(&self.data[row * self.cols + col])
    }

    /// Entry access for trusted in-bounds coordinates.
    #[must_use]
    pub fn at(&self, row: usize, col: usize) -> &ExactScalar {
        &self.data[row * self.cols + col]
    }

    pub fn row_iter(&self) -> impl Iterator<Item = &[ExactScalar]> {
        self.data.chunks(self.cols.max(1))
    }

    pub fn column_vec(&self, col: usize) -> MatrixResult<Vec<ExactScalar>> {
        if col >= self.cols {
            return Err(MatrixError::IndexOutOfBounds {
                row: 0,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok((0..self.rows).map(|r| self.at(r, col).clone()).collect())
    }

    pub fn add(&self, rhs: &Self) -> MatrixResult<Self> {
        self.zip_with(rhs, |a, b| a + b)
    }

    pub fn sub(&self, rhs: &Self) -> MatrixResult<Self> {
        self.zip_with(rhs, |a, b| a - b)
    }

    pub fn mul(&self, rhs: &Self) -> MatrixResult<Self> {
        if self.cols != rhs.rows {
            return Err(MatrixError::DimensionMismatch {
                left: self.shape(),
                right: rhs.shape(),
            });
        }
        Ok(Self::from_fn(self.rows, rhs.cols, |r, c| {
            let mut acc = ExactScalar::zero();
            for k in 0..self.cols {
                acc = &acc + &(self.at(r, k) * rhs.at(k, c));
            }
            acc
        }))
    }

    #[must_use]
    pub fn scale(&self, factor: &ExactScalar) -> Self {
        self.map(|entry| entry * factor)
    }

    #[must_use]
    pub fn neg(&self) -> Self {
        self.map(|entry| -entry)
    }

    #[must_use]
    pub fn transpose(&self) -> Self {
        Self::from_fn(self.cols, self.rows, |r, c| self.at(c, r).clone())
    }

    /// `Aᴴ`: transpose with conjugated entries.
    #[must_use]
    pub fn conjugate_transpose(&self) -> Self {
        Self::from_fn(self.cols, self.rows, |r, c| self.at(c, r).conj())
    }

    #[must_use]
    pub fn map(&self, mut f: impl FnMut(&ExactScalar) -> ExactScalar) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|entry| f(entry)).collect(),
        }
    }

    /// Substitutes the indeterminate in every entry.
    #[must_use]
    pub fn substitute(&self, at: &Number) -> Self {
        self.map(|entry| ExactScalar::from_number(entry.substitute(at)))
    }

    // ── Structural predicates ───────────────────────────────────────

    /// Every entry has zero imaginary part.
    #[must_use]
    pub fn is_complex_free(&self) -> bool {
        self.data.iter().all(ExactScalar::is_real)
    }

    /// No entry carries the indeterminate.
    #[must_use]
    pub fn is_symbol_free(&self) -> bool {
        !self.data.iter().any(ExactScalar::is_symbolic)
    }

    /// `A·Aᴴ == Aᴴ·A` by exact comparison; false for non-square shapes.
    #[must_use]
    pub fn is_normal(&self) -> bool {
        if !self.is_square() {
            return false;
        }
        let adjoint = self.conjugate_transpose();
        match (self.mul(&adjoint), adjoint.mul(self)) {
            (Ok(left), Ok(right)) => left == right,
            _ => false,
        }
    }

    #[must_use]
    pub fn is_hermitian(&self) -> bool {
        self.is_square() && *self == self.conjugate_transpose()
    }

    #[must_use]
    pub fn is_upper_triangular(&self) -> bool {
        self.is_square()
            && (0..self.rows)
                .all(|r| (0..r).all(|c| self.at(r, c).is_zero()))
    }

    #[must_use]
    pub fn is_lower_triangular(&self) -> bool {
        self.is_square()
            && (0..self.rows)
                .all(|r| (r + 1..self.cols).all(|c| self.at(r, c).is_zero()))
    }

    #[must_use]
    pub fn is_diagonal(&self) -> bool {
        self.is_upper_triangular() && self.is_lower_triangular()
    }

    fn zip_with(
        &self,
        rhs: &Self,
        f: impl Fn(&ExactScalar, &ExactScalar) -> ExactScalar,
    ) -> MatrixResult<Self> {
        if self.shape() != rhs.shape() {
            return Err(MatrixError::DimensionMismatch {
                left: self.shape(),
                right: rhs.shape(),
            });
        }
        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(rhs.data.iter())
                .map(|(a, b)| f(a, b))
                .collect(),
        })
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, row) in self.row_iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "[")?;
            for (c, entry) in row.iter().enumerate() {
                if c > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{entry}")?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}


#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_matrix(rows: usize, cols: usize) -> impl Strategy<Value = Matrix> {
        prop::collection::vec(-9i64..=9, rows * cols).prop_map(move |values| {
            let mut iter = values.into_iter();
            Matrix::from_fn(rows, cols, |_, _| {
                ExactScalar::from_integer(iter.next().unwrap_or_default())
            })
        })
    }

    proptest! {
        #[test]
        fn transpose_is_an_involution(m in arb_matrix(3, 2)) {
            prop_assert_eq!(m.transpose().transpose(), m);
        }

        #[test]
        fn addition_commutes(a in arb_matrix(2, 3), b in arb_matrix(2, 3)) {
            prop_assert_eq!(a.add(&b).expect("shapes match"), b.add(&a).expect("shapes match"));
        }

        #[test]
        fn transpose_distributes_over_products(a in arb_matrix(2, 3), b in arb_matrix(3, 2)) {
            let lhs = a.mul(&b).expect("compatible").transpose();
            let rhs = b.transpose().mul(&a.transpose()).expect("compatible");
            prop_assert_eq!(lhs, rhs);
        }
    }
}
