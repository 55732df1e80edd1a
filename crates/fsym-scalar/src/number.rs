//! Complex numbers over the surd closure.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

use crate::surd::{SurdSum, rational_sqrt_exact, sqrt_of_rational};
use crate::{ScalarError, ScalarResult};

/// Exact complex number `re + im·i` with both parts in the surd closure.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Number {
    pub re: SurdSum,
    pub im: SurdSum,
}

impl Number {
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn one() -> Self {
        Self::from_integer(1)
    }

    /// The imaginary unit.
    #[must_use]
    pub fn i() -> Self {
        Self {
            re: SurdSum::zero(),
            im: SurdSum::one(),
        }
    }

    #[must_use]
    pub fn from_integer(value: i64) -> Self {
        Self::from_real(SurdSum::from_integer(value))
    }

    #[must_use]
    pub fn from_bigint(value: BigInt) -> Self {
        Self::from_real(SurdSum::from_bigint(value))
    }

    #[must_use]
    pub fn from_rational(value: BigRational) -> Self {
        Self::from_real(SurdSum::from_rational(value))
    }

    #[must_use]
    pub fn from_real(re: SurdSum) -> Self {
        Self {
            re,
            im: SurdSum::zero(),
        }
    }

    /// `√n` for any integer: nonnegative values stay real, negative values
    /// land on the positive imaginary axis.
    #[must_use]
    pub fn sqrt_of_integer(value: i64) -> Self {
        if value >= 0 {
            #[allow(clippy::cast_sign_loss)]
            Self::from_real(SurdSum::sqrt_of_natural(value as u64))
        } else {
            #[allow(clippy::cast_sign_loss)]
            Self {
                re: SurdSum::zero(),
                im: SurdSum::sqrt_of_natural(value.unsigned_abs()),
            }
        }
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.re.is_zero() && self.im.is_zero()
    }

    #[must_use]
    pub fn is_one(&self) -> bool {
        self.re.is_one() && self.im.is_zero()
    }

    #[must_use]
    pub fn is_real(&self) -> bool {
        self.im.is_zero()
    }

    #[must_use]
    pub fn is_rational(&self) -> bool {
        self.im.is_zero() && self.re.is_rational()
    }

    #[must_use]
    pub fn to_rational(&self) -> Option<BigRational> {
        if self.im.is_zero() {
            self.re.to_rational()
        } else {
            None
        }
    }

    #[must_use]
    pub fn conj(&self) -> Self {
        Self {
            re: self.re.clone(),
            im: -&self.im,
        }
    }

    /// `|z|² = re² + im²`, always a real surd sum.
    #[must_use]
    pub fn norm_sqr(&self) -> SurdSum {
        &(&self.re * &self.re) + &(&self.im * &self.im)
    }

    /// Exact division via `z·conj(w)/|w|²`.
    pub fn checked_div(&self, rhs: &Self) -> ScalarResult<Self> {
        let norm = rhs.norm_sqr();
        if norm.is_zero() {
            return Err(ScalarError::DivisionByZero);
        }
        let numerator = self * &rhs.conj();
        Ok(Self {
            re: numerator.re.checked_div(&norm)?,
            im: numerator.im.checked_div(&norm)?,
        })
    }

    /// Principal square root, restricted to results that stay inside the
    /// closure: rational real values (negative ones gain a factor of `i`),
    /// and rational complex values whose modulus is a perfect rational
    /// square. Everything else would nest radicals and fails with
    /// [`ScalarError::UnsupportedRootForm`].
    pub fn sqrt(&self) -> ScalarResult<Self> {
        if self.is_zero() {
            return Ok(Self::zero());
        }
        if self.im.is_zero() {
            let value = self
                .re
                .to_rational()
                .ok_or(ScalarError::UnsupportedRootForm { degree: 2 })?;
            if value.is_negative() {
                return Ok(Self {
                    re: SurdSum::zero(),
                    im: sqrt_of_rational(&(-value))?,
                });
            }
            return Ok(Self::from_real(sqrt_of_rational(&value)?));
        }

        let a = self
            .re
            .to_rational()
            .ok_or(ScalarError::UnsupportedRootForm { degree: 2 })?;
        let b = self
            .im
            .to_rational()
            .ok_or(ScalarError::UnsupportedRootForm { degree: 2 })?;
        let modulus_sqr = &a * &a + &b * &b;
        let modulus = rational_sqrt_exact(&modulus_sqr)
            .ok_or(ScalarError::UnsupportedRootForm { degree: 2 })?;
        // √(a+bi) = u + (b/2u)i with u = √((|z|+a)/2); u > 0 since b ≠ 0.
        let half = BigRational::new(BigInt::from(1), BigInt::from(2));
        let re_part = sqrt_of_rational(&((&modulus + &a) * &half))?;
        let im_part = SurdSum::from_rational(&b * &half).checked_div(&re_part)?;
        Ok(Self {
            re: re_part,
            im: im_part,
        })
    }
}

impl Add for &Number {
    type Output = Number;

    fn add(self, rhs: &Number) -> Number {
        Number {
            re: &self.re + &rhs.re,
            im: &self.im + &rhs.im,
        }
    }
}

impl Sub for &Number {
    type Output = Number;

    fn sub(self, rhs: &Number) -> Number {
        Number {
            re: &self.re - &rhs.re,
            im: &self.im - &rhs.im,
        }
    }
}

impl Neg for &Number {
    type Output = Number;

    fn neg(self) -> Number {
        Number {
            re: -&self.re,
            im: -&self.im,
        }
    }
}

impl Mul for &Number {
    type Output = Number;

    fn mul(self, rhs: &Number) -> Number {
        Number {
            re: &(&self.re * &rhs.re) - &(&self.im * &rhs.im),
            im: &(&self.re * &rhs.im) + &(&self.im * &rhs.re),
        }
    }
}

impl Add for Number {
    type Output = Number;

    fn add(self, rhs: Number) -> Number {
        &self + &rhs
    }
}

impl Sub for Number {
    type Output = Number;

    fn sub(self, rhs: Number) -> Number {
        &self - &rhs
    }
}

impl Neg for Number {
    type Output = Number;

    fn neg(self) -> Number {
        -&self
    }
}

impl Mul for Number {
    type Output = Number;

    fn mul(self, rhs: Number) -> Number {
        &self * &rhs
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.im.is_zero() {
            return write!(f, "{}", self.re);
        }
        if self.re.is_zero() {
            return write_imaginary(f, &self.im, false);
        }
        write!(f, "{}", self.re)?;
        write_imaginary(f, &self.im, true)
    }
}

fn write_imaginary(f: &mut fmt::Formatter<'_>, im: &SurdSum, with_sign: bool) -> fmt::Result {
    let negated = -im;
    if im.is_one() {
        return write!(f, "{}i", if with_sign { " + " } else { "" });
    }
    if negated.is_one() {
        return write!(f, "{}i", if with_sign { " - " } else { "-" });
    }
    if im.term_count() > 1 {
        if with_sign {
            write!(f, " + ({im})*i")
        } else {
            write!(f, "({im})*i")
        }
    } else if with_sign {
        let rendered = im.to_string();
        if let Some(stripped) = rendered.strip_prefix('-') {
            write!(f, " - {stripped}*i")
        } else {
            write!(f, " + {rendered}*i")
        }
    } else {
        write!(f, "{im}*i")
    }
}
