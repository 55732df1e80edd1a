//! Dense univariate polynomials over the exact complex closure.
//!
//! Coefficients are stored lowest degree first with trailing zeros trimmed;
//! the empty vector is the zero polynomial. Root extraction never
//! approximates: linear and quadratic factors are solved in closed form,
//! higher degrees are deflated through the rational root theorem, and any
//! residual factor of degree ≥ 3 is reported as unsupported.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, ToPrimitive, Zero};

use crate::number::Number;
use crate::{ScalarError, ScalarResult};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Polynomial {
    coeffs: Vec<Number>,
}

impl Polynomial {
    /// Builds from `coeffs[k]` = coefficient of `x^k`, trimming trailing
    /// zeros into canonical form.
    #[must_use]
    pub fn new(mut coeffs: Vec<Number>) -> Self {
        while coeffs.last().is_some_and(Number::is_zero) {
            coeffs.pop();
        }
        Self { coeffs }
    }

    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn constant(value: Number) -> Self {
        Self::new(vec![value])
    }

    /// The bare indeterminate `x`.
    #[must_use]
    pub fn indeterminate() -> Self {
        Self::new(vec![Number::zero(), Number::one()])
    }

    #[must_use]
    pub fn coeffs(&self) -> &[Number] {
        &self.coeffs
    }

    /// Coefficient of `x^k`, zero beyond the stored degree.
    #[must_use]
    pub fn coeff(&self, k: usize) -> Number {
        self.coeffs.get(k).cloned().unwrap_or_else(Number::zero)
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    #[must_use]
    pub fn is_constant(&self) -> bool {
        self.coeffs.len() <= 1
    }

    /// Degree with the convention that constants (including zero) have
    /// degree 0.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    #[must_use]
    pub fn leading(&self) -> Option<&Number> {
        self.coeffs.last()
    }

    #[must_use]
    pub fn scaled(&self, factor: &Number) -> Self {
        Self::new(self.coeffs.iter().map(|c| c * factor).collect())
    }

    /// Horner evaluation.
    #[must_use]
    pub fn eval(&self, at: &Number) -> Number {
        let mut acc = Number::zero();
        for coeff in self.coeffs.iter().rev() {
            acc = &(&acc * at) + coeff;
        }
        acc
    }

    /// Conjugates every coefficient.
    #[must_use]
    pub fn conj(&self) -> Self {
        Self::new(self.coeffs.iter().map(Number::conj).collect())
    }

    /// Divides through by the leading coefficient.
    pub fn monic(&self) -> ScalarResult<Self> {
        let leading = self.leading().ok_or(ScalarError::UnsupportedOperation {
            operation: "normalize the zero polynomial",
        })?;
        let mut out = Vec::with_capacity(self.coeffs.len());
        for coeff in &self.coeffs {
            out.push(coeff.checked_div(leading)?);
        }
        Ok(Self::new(out))
    }

    /// Synthetic division by `(x − root)`, discarding the remainder. The
    /// caller guarantees `root` really is a root, which makes the division
    /// exact.
    #[must_use]
    pub fn deflate(&self, root: &Number) -> Self {
        let n = self.coeffs.len();
        if n <= 1 {
            return Self::zero();
        }
        let mut quotient = vec![Number::zero(); n - 1];
        let mut carry = Number::zero();
        for k in (1..n).rev() {
            carry = &self.coeffs[k] + &(root * &carry);
            quotient[k - 1] = carry.clone();
        }
        Self::new(quotient)
    }

    /// One rational root found through the rational root theorem, or `None`
    /// when the coefficients are not all rational or no candidate divides.
    #[must_use]
    pub fn find_rational_root(&self) -> Option<Number> {
        if self.coeffs.len() < 2 {
            return None;
        }
        let rationals: Option<Vec<BigRational>> =
            self.coeffs.iter().map(Number::to_rational).collect();
        let rationals = rationals?;
        if rationals[0].is_zero() {
            return Some(Number::zero());
        }

        let mut common_denominator = BigInt::one();
        for value in &rationals {
            common_denominator = common_denominator.lcm(value.denom());
        }
        let integers: Vec<BigInt> = rationals
            .iter()
            .map(|value| (value.numer() * &common_denominator) / value.denom())
            .collect();

        let constant = integers.first()?.magnitude().to_u64()?;
        let leading = integers.last()?.magnitude().to_u64()?;
        for p in divisors_u64(constant) {
            for q in divisors_u64(leading) {
                for sign in [1i64, -1] {
                    let candidate = BigRational::new(
                        BigInt::from(sign) * BigInt::from(p),
                        BigInt::from(q),
                    );
                    let root = Number::from_rational(candidate);
                    if self.eval(&root).is_zero() {
                        return Some(root);
                    }
                }
            }
        }
        None
    }

    /// Both roots of a quadratic via the exact formula; a discriminant
    /// outside the closure fails with [`ScalarError::UnsupportedRootForm`].
    pub fn quadratic_roots(&self) -> ScalarResult<(Number, Number)> {
        debug_assert_eq!(self.degree(), 2);
        let a = self.coeff(2);
        let b = self.coeff(1);
        let c = self.coeff(0);
        let four_ac = &(&Number::from_integer(4) * &a) * &c;
        let discriminant = &(&b * &b) - &four_ac;
        let root = discriminant.sqrt()?;
        let two_a = &Number::from_integer(2) * &a;
        let plus = (&(-&b) + &root).checked_div(&two_a)?;
        let minus = (&(-&b) - &root).checked_div(&two_a)?;
        Ok((plus, minus))
    }

    /// Full factorization into roots with multiplicities. Linear and
    /// quadratic tails are solved directly; higher degrees deflate through
    /// rational roots. Residual factors of degree ≥ 3 fail with
    /// [`ScalarError::UnsupportedRootForm`]; on success the multiplicities
    /// sum to the degree.
    pub fn roots_with_multiplicity(&self) -> ScalarResult<Vec<(Number, usize)>> {
        if self.is_zero() {
            return Err(ScalarError::UnsupportedOperation {
                operation: "extract roots of the zero polynomial",
            });
        }
        let mut found: Vec<(Number, usize)> = Vec::new();
        let mut residual = self.clone();
        while residual.coeffs.len() > 1 && residual.coeffs[0].is_zero() {
            push_root(&mut found, Number::zero());
            residual = Self::new(residual.coeffs[1..].to_vec());
        }
        loop {
            match residual.coeffs.len() {
                0 | 1 => break,
                2 => {
                    let root = (-&residual.coeffs[0]).checked_div(&residual.coeffs[1])?;
                    push_root(&mut found, root);
                    break;
                }
                3 => {
                    let (plus, minus) = residual.quadratic_roots()?;
                    push_root(&mut found, plus);
                    push_root(&mut found, minus);
                    break;
                }
                _ => match residual.find_rational_root() {
                    Some(root) => {
                        residual = residual.deflate(&root);
                        push_root(&mut found, root);
                    }
                    None => {
                        return Err(ScalarError::UnsupportedRootForm {
                            degree: residual.degree(),
                        });
                    }
                },
            }
        }
        Ok(found)
    }
}

fn push_root(found: &mut Vec<(Number, usize)>, root: Number) {
    for (existing, multiplicity) in found.iter_mut() {
        if *existing == root {
            *multiplicity += 1;
            return;
        }
    }
    found.push((root, 1));
}

fn divisors_u64(n: u64) -> Vec<u64> {
    debug_assert!(n >= 1);
    let mut out = Vec::new();
    let mut d = 1u64;
    while d.saturating_mul(d) <= n {
        if n % d == 0 {
            out.push(d);
            if d != n / d {
                out.push(n / d);
            }
        }
        d += 1;
    }
    out
}

impl Add for &Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: &Polynomial) -> Polynomial {
        let len = self.coeffs.len().max(rhs.coeffs.len());
        let mut out = Vec::with_capacity(len);
        for k in 0..len {
            out.push(&self.coeff(k) + &rhs.coeff(k));
        }
        Polynomial::new(out)
    }
}

impl Sub for &Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: &Polynomial) -> Polynomial {
        let len = self.coeffs.len().max(rhs.coeffs.len());
        let mut out = Vec::with_capacity(len);
        for k in 0..len {
            out.push(&self.coeff(k) - &rhs.coeff(k));
        }
        Polynomial::new(out)
    }
}

impl Neg for &Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        Polynomial::new(self.coeffs.iter().map(|c| -c).collect())
    }
}

impl Mul for &Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: &Polynomial) -> Polynomial {
        if self.is_zero() || rhs.is_zero() {
            return Polynomial::zero();
        }
        let mut out = vec![Number::zero(); self.coeffs.len() + rhs.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            for (j, b) in rhs.coeffs.iter().enumerate() {
                out[i + j] = &out[i + j] + &(a * b);
            }
        }
        Polynomial::new(out)
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.coeffs.is_empty() {
            return write!(f, "0");
        }
        let mut first = true;
        for k in (0..self.coeffs.len()).rev() {
            let coeff = &self.coeffs[k];
            if coeff.is_zero() {
                continue;
            }
            let mut rendered = coeff.to_string();
            if first {
                first = false;
            } else if rendered.starts_with('-') && !rendered.contains(' ') {
                rendered.remove(0);
                write!(f, " - ")?;
            } else {
                write!(f, " + ")?;
            }
            let wrapped = if rendered.contains(' ') {
                format!("({rendered})")
            } else {
                rendered
            };
            match k {
                0 => write!(f, "{wrapped}")?,
                1 if wrapped == "1" => write!(f, "x")?,
                1 => write!(f, "{wrapped}*x")?,
                _ if wrapped == "1" => write!(f, "x^{k}")?,
                _ => write!(f, "{wrapped}*x^{k}")?,
            }
        }
        Ok(())
    }
}
