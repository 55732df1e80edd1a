//! The matrix entry type: an exact value or a univariate polynomial.
//!
//! Arithmetic promotes values to constant polynomials when the two sides
//! mix, and collapses degenerate polynomials back to plain values, so the
//! `Poly` variant always carries degree ≥ 1.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_rational::BigRational;

use crate::number::Number;
use crate::poly::Polynomial;
use crate::{ScalarError, ScalarResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExactScalar {
    Value(Number),
    Poly(Polynomial),
}

impl ExactScalar {
    #[must_use]
    pub fn zero() -> Self {
        Self::Value(Number::zero())
    }

    #[must_use]
    pub fn one() -> Self {
        Self::Value(Number::one())
    }

    #[must_use]
    pub fn from_integer(value: i64) -> Self {
        Self::Value(Number::from_integer(value))
    }

    #[must_use]
    pub fn from_rational(value: BigRational) -> Self {
        Self::Value(Number::from_rational(value))
    }

    #[must_use]
    pub fn from_number(value: Number) -> Self {
        Self::Value(value)
    }

    /// Wraps a polynomial, collapsing constants down to plain values.
    #[must_use]
    pub fn from_poly(poly: Polynomial) -> Self {
        if poly.is_constant() {
            Self::Value(poly.coeff(0))
        } else {
            Self::Poly(poly)
        }
    }

    /// The bare indeterminate.
    #[must_use]
    pub fn indeterminate() -> Self {
        Self::Poly(Polynomial::indeterminate())
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Value(value) => value.is_zero(),
            Self::Poly(_) => false,
        }
    }

    #[must_use]
    pub fn is_one(&self) -> bool {
        match self {
            Self::Value(value) => value.is_one(),
            Self::Poly(_) => false,
        }
    }

    /// True for entries that carry the indeterminate.
    #[must_use]
    pub fn is_symbolic(&self) -> bool {
        matches!(self, Self::Poly(_))
    }

    /// True when the entry is a value with zero imaginary part. Symbolic
    /// entries count as real: the indeterminate stands for a real unknown.
    #[must_use]
    pub fn is_real(&self) -> bool {
        match self {
            Self::Value(value) => value.is_real(),
            Self::Poly(poly) => poly.coeffs().iter().all(Number::is_real),
        }
    }

    #[must_use]
    pub fn to_number(&self) -> Option<&Number> {
        match self {
            Self::Value(value) => Some(value),
            Self::Poly(_) => None,
        }
    }

    /// Substitutes the indeterminate, collapsing every entry to a value.
    #[must_use]
    pub fn substitute(&self, at: &Number) -> Number {
        match self {
            Self::Value(value) => value.clone(),
            Self::Poly(poly) => poly.eval(at),
        }
    }

    #[must_use]
    pub fn conj(&self) -> Self {
        match self {
            Self::Value(value) => Self::Value(value.conj()),
            Self::Poly(poly) => Self::Poly(poly.conj()),
        }
    }

    /// Exact division. Fails with [`ScalarError::DivisionByZero`] on a zero
    /// divisor and [`ScalarError::UnsupportedOperation`] when the divisor
    /// is a non-constant polynomial.
    pub fn checked_div(&self, rhs: &Self) -> ScalarResult<Self> {
        match rhs {
            Self::Value(divisor) => match self {
                Self::Value(value) => Ok(Self::Value(value.checked_div(divisor)?)),
                Self::Poly(poly) => {
                    let inverse = Number::one().checked_div(divisor)?;
                    Ok(Self::from_poly(poly.scaled(&inverse)))
                }
            },
            Self::Poly(_) => Err(ScalarError::UnsupportedOperation {
                operation: "divide by a non-constant polynomial",
            }),
        }
    }

    /// Repeated-squaring exponentiation with `x^0 = 1`.
    #[must_use]
    pub fn pow(&self, exponent: u32) -> Self {
        let mut result = Self::one();
        let mut base = self.clone();
        let mut remaining = exponent;
        while remaining > 0 {
            if remaining & 1 == 1 {
                result = &result * &base;
            }
            base = &base * &base;
            remaining >>= 1;
        }
        result
    }

    fn as_poly(&self) -> Polynomial {
        match self {
            Self::Value(value) => Polynomial::constant(value.clone()),
            Self::Poly(poly) => poly.clone(),
        }
    }
}

impl From<Number> for ExactScalar {
    fn from(value: Number) -> Self {
        Self::Value(value)
    }
}

impl Add for &ExactScalar {
    type Output = ExactScalar;

    fn add(self, rhs: &ExactScalar) -> ExactScalar {
        match (self, rhs) {
            (ExactScalar::Value(a), ExactScalar::Value(b)) => ExactScalar::Value(a + b),
            _ => ExactScalar::from_poly(&self.as_poly() + &rhs.as_poly()),
        }
    }
}

impl Sub for &ExactScalar {
    type Output = ExactScalar;

    fn sub(self, rhs: &ExactScalar) -> ExactScalar {
        match (self, rhs) {
            (ExactScalar::Value(a), ExactScalar::Value(b)) => ExactScalar::Value(a - b),
            _ => ExactScalar::from_poly(&self.as_poly() - &rhs.as_poly()),
        }
    }
}

impl Neg for &ExactScalar {
    type Output = ExactScalar;

    fn neg(self) -> ExactScalar {
        match self {
            ExactScalar::Value(value) => ExactScalar::Value(-value),
            ExactScalar::Poly(poly) => ExactScalar::Poly(-poly),
        }
    }
}

impl Mul for &ExactScalar {
    type Output = ExactScalar;

    fn mul(self, rhs: &ExactScalar) -> ExactScalar {
        match (self, rhs) {
            (ExactScalar::Value(a), ExactScalar::Value(b)) => ExactScalar::Value(a * b),
            _ => ExactScalar::from_poly(&self.as_poly() * &rhs.as_poly()),
        }
    }
}

impl Add for ExactScalar {
    type Output = ExactScalar;

    fn add(self, rhs: ExactScalar) -> ExactScalar {
        &self + &rhs
    }
}

impl Sub for ExactScalar {
    type Output = ExactScalar;

    fn sub(self, rhs: ExactScalar) -> ExactScalar {
        &self - &rhs
    }
}

impl Neg for ExactScalar {
    type Output = ExactScalar;

    fn neg(self) -> ExactScalar {
        -&self
    }
}

impl Mul for ExactScalar {
    type Output = ExactScalar;

    fn mul(self, rhs: ExactScalar) -> ExactScalar {
        &self * &rhs
    }
}

impl fmt::Display for ExactScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => write!(f, "{value}"),
            Self::Poly(poly) => write!(f, "{poly}"),
        }
    }
}
