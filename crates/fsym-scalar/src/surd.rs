//! Sums of quadratic surds with rational coefficients.
//!
//! A [`SurdSum`] is a finite sum `Σ cᵢ·√dᵢ` where every `cᵢ` is an
//! arbitrary-precision rational and every `dᵢ` is a distinct squarefree
//! positive integer. The radicand `1` carries the rational part. Canonical
//! form (squarefree radicands, no zero coefficients, radicand-keyed map)
//! makes equality structural: square roots of distinct squarefree integers
//! are linearly independent over ℚ.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::{ScalarError, ScalarResult};

/// Exact real number in the closure `ℚ(√d₁, √d₂, …)`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SurdSum {
    terms: BTreeMap<BigUint, BigRational>,
}

impl SurdSum {
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn one() -> Self {
        Self::from_integer(1)
    }

    #[must_use]
    pub fn from_integer(value: i64) -> Self {
        Self::from_rational(BigRational::from_integer(BigInt::from(value)))
    }

    #[must_use]
    pub fn from_bigint(value: BigInt) -> Self {
        Self::from_rational(BigRational::from_integer(value))
    }

    #[must_use]
    pub fn from_rational(value: BigRational) -> Self {
        let mut out = Self::default();
        out.insert_term(BigUint::one(), value);
        out
    }

    /// `√n` for a natural `n`, reduced to canonical form (`√12 = 2·√3`).
    #[must_use]
    pub fn sqrt_of_natural(n: u64) -> Self {
        if n == 0 {
            return Self::zero();
        }
        let (square_root, radicand) = squarefree_decompose_u64(n);
        let mut out = Self::default();
        out.insert_term(
            BigUint::from(radicand),
            BigRational::from_integer(BigInt::from(square_root)),
        );
        out
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    #[must_use]
    pub fn is_one(&self) -> bool {
        self.to_rational().is_some_and(|value| value.is_one())
    }

    /// True when the sum carries no radical term.
    #[must_use]
    pub fn is_rational(&self) -> bool {
        self.terms.keys().all(BigUint::is_one)
    }

    #[must_use]
    pub fn to_rational(&self) -> Option<BigRational> {
        if self.is_rational() {
            Some(self.rational_part())
        } else {
            None
        }
    }

    /// Coefficient of the radicand `1` (zero when absent).
    #[must_use]
    pub fn rational_part(&self) -> BigRational {
        self.terms
            .get(&BigUint::one())
            .cloned()
            .unwrap_or_else(BigRational::zero)
    }

    /// Number of canonical terms.
    #[must_use]
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Exact division. Rationalizes the divisor by conjugating away one
    /// radical prime at a time; each pass strictly shrinks the divisor's
    /// prime support, so the loop terminates.
    pub fn checked_div(&self, rhs: &Self) -> ScalarResult<Self> {
        if rhs.is_zero() {
            return Err(ScalarError::DivisionByZero);
        }
        let mut numerator = self.clone();
        let mut denominator = rhs.clone();
        while let Some(prime) = denominator.leading_radical_prime() {
            let conjugate = denominator.conjugate_flip(&prime);
            numerator = &numerator * &conjugate;
            denominator = &denominator * &conjugate;
        }
        let scale = denominator.rational_part();
        if scale.is_zero() {
            return Err(ScalarError::DivisionByZero);
        }
        Ok(numerator.scaled(&scale.recip()))
    }

    /// Exact square root, defined on nonnegative rational values. Radical
    /// or negative inputs have no representative in the real closure and
    /// fail with [`ScalarError::UnsupportedRootForm`].
    pub fn sqrt(&self) -> ScalarResult<Self> {
        let value = self
            .to_rational()
            .ok_or(ScalarError::UnsupportedRootForm { degree: 2 })?;
        if value.is_negative() {
            return Err(ScalarError::UnsupportedRootForm { degree: 2 });
        }
        sqrt_of_rational(&value)
    }

    #[must_use]
    pub fn scaled(&self, factor: &BigRational) -> Self {
        if factor.is_zero() {
            return Self::zero();
        }
        Self {
            terms: self
                .terms
                .iter()
                .map(|(radicand, coeff)| (radicand.clone(), coeff * factor))
                .collect(),
        }
    }

    fn insert_term(&mut self, radicand: BigUint, coeff: BigRational) {
        if coeff.is_zero() {
            return;
        }
        match self.terms.entry(radicand) {
            Entry::Vacant(slot) => {
                slot.insert(coeff);
            }
            Entry::Occupied(mut slot) => {
                let updated = slot.get() + &coeff;
                if updated.is_zero() {
                    slot.remove();
                } else {
                    *slot.get_mut() = updated;
                }
            }
        }
    }

    /// Smallest prime dividing any radical radicand, if one exists.
    fn leading_radical_prime(&self) -> Option<BigUint> {
        let radicand = self.terms.keys().find(|key| !key.is_one())?;
        Some(smallest_prime_factor(radicand))
    }

    /// Image under the automorphism `√p ↦ −√p`.
    fn conjugate_flip(&self, prime: &BigUint) -> Self {
        Self {
            terms: self
                .terms
                .iter()
                .map(|(radicand, coeff)| {
                    let flipped = if (radicand % prime).is_zero() {
                        -coeff.clone()
                    } else {
                        coeff.clone()
                    };
                    (radicand.clone(), flipped)
                })
                .collect(),
        }
    }
}

/// `√(p/q)` for a nonnegative reduced rational, as `√(p·q)/q`.
pub(crate) fn sqrt_of_rational(value: &BigRational) -> ScalarResult<SurdSum> {
    if value.is_zero() {
        return Ok(SurdSum::zero());
    }
    let numer = value
        .numer()
        .to_biguint()
        .ok_or(ScalarError::UnsupportedRootForm { degree: 2 })?;
    let denom = value
        .denom()
        .to_biguint()
        .ok_or(ScalarError::UnsupportedRootForm { degree: 2 })?;
    let radicand_value = (&numer * &denom)
        .to_u64()
        .ok_or(ScalarError::UnsupportedRootForm { degree: 2 })?;
    let (square_root, radicand) = squarefree_decompose_u64(radicand_value);
    let coeff = BigRational::new(BigInt::from(square_root), BigInt::from(denom));
    let mut out = SurdSum::default();
    out.insert_term(BigUint::from(radicand), coeff);
    Ok(out)
}

/// `r² = numer/denom` exactly, when both sides are perfect squares.
pub(crate) fn rational_sqrt_exact(value: &BigRational) -> Option<BigRational> {
    if value.is_negative() {
        return None;
    }
    let numer = value.numer().to_biguint()?;
    let denom = value.denom().to_biguint()?;
    let numer_root = num_integer::Roots::sqrt(&numer);
    let denom_root = num_integer::Roots::sqrt(&denom);
    if &numer_root * &numer_root != numer || &denom_root * &denom_root != denom {
        return None;
    }
    Some(BigRational::new(
        BigInt::from(numer_root),
        BigInt::from(denom_root),
    ))
}

/// `n = s²·d` with `d` squarefree. Trial division up to `∛n` leaves a
/// cofactor with at most two prime factors; a perfect-square check settles
/// its shape.
fn squarefree_decompose_u64(n: u64) -> (u64, u64) {
    debug_assert!(n >= 1);
    let mut remaining = n;
    let mut square_root: u64 = 1;
    let mut radicand: u64 = 1;
    let mut p: u64 = 2;
    while p.saturating_mul(p).saturating_mul(p) <= remaining {
        if remaining % p == 0 {
            let mut exponent = 0u32;
            while remaining % p == 0 {
                remaining /= p;
                exponent += 1;
            }
            square_root *= p.pow(exponent / 2);
            if exponent % 2 == 1 {
                radicand *= p;
            }
        }
        p = if p == 2 { 3 } else { p + 2 };
    }
    let root = integer_sqrt_u64(remaining);
    if root * root == remaining {
        square_root *= root;
    } else {
        radicand *= remaining;
    }
    (square_root, radicand)
}

fn integer_sqrt_u64(n: u64) -> u64 {
    if n < 2 {
        return n;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let mut guess = (n as f64).sqrt() as u64;
    while guess.saturating_mul(guess) > n {
        guess -= 1;
    }
    while (guess + 1).saturating_mul(guess + 1) <= n {
        guess += 1;
    }
    guess
}

fn smallest_prime_factor(n: &BigUint) -> BigUint {
    if let Some(small) = n.to_u64() {
        return BigUint::from(smallest_prime_factor_u64(small));
    }
    let two = BigUint::from(2u32);
    if (n % &two).is_zero() {
        return two;
    }
    let mut candidate = BigUint::from(3u32);
    loop {
        if &candidate * &candidate > *n {
            return n.clone();
        }
        if (n % &candidate).is_zero() {
            return candidate;
        }
        candidate += 2u32;
    }
}

fn smallest_prime_factor_u64(n: u64) -> u64 {
    debug_assert!(n >= 2);
    if n % 2 == 0 {
        return 2;
    }
    let mut p = 3u64;
    while p.saturating_mul(p) <= n {
        if n % p == 0 {
            return p;
        }
        p += 2;
    }
    n
}

impl Add for &SurdSum {
    type Output = SurdSum;

    fn add(self, rhs: &SurdSum) -> SurdSum {
        let mut out = self.clone();
        for (radicand, coeff) in &rhs.terms {
            out.insert_term(radicand.clone(), coeff.clone());
        }
        out
    }
}

impl Sub for &SurdSum {
    type Output = SurdSum;

    fn sub(self, rhs: &SurdSum) -> SurdSum {
        let mut out = self.clone();
        for (radicand, coeff) in &rhs.terms {
            out.insert_term(radicand.clone(), -coeff.clone());
        }
        out
    }
}

impl Neg for &SurdSum {
    type Output = SurdSum;

    fn neg(self) -> SurdSum {
        SurdSum {
            terms: self
                .terms
                .iter()
                .map(|(radicand, coeff)| (radicand.clone(), -coeff.clone()))
                .collect(),
        }
    }
}

impl Mul for &SurdSum {
    type Output = SurdSum;

    /// `√d₁·√d₂ = g·√((d₁/g)(d₂/g))` with `g = gcd(d₁, d₂)`; coprime parts
    /// of squarefree radicands stay squarefree, so no refactoring is needed.
    fn mul(self, rhs: &SurdSum) -> SurdSum {
        let mut out = SurdSum::default();
        for (da, ca) in &self.terms {
            for (db, cb) in &rhs.terms {
                let g = da.gcd(db);
                let radicand = (da / &g) * (db / &g);
                let scale = BigRational::from_integer(BigInt::from(g));
                out.insert_term(radicand, ca * cb * scale);
            }
        }
        out
    }
}

impl Add for SurdSum {
    type Output = SurdSum;

    fn add(self, rhs: SurdSum) -> SurdSum {
        &self + &rhs
    }
}

impl Sub for SurdSum {
    type Output = SurdSum;

    fn sub(self, rhs: SurdSum) -> SurdSum {
        &self - &rhs
    }
}

impl Neg for SurdSum {
    type Output = SurdSum;

    fn neg(self) -> SurdSum {
        -&self
    }
}

impl Mul for SurdSum {
    type Output = SurdSum;

    fn mul(self, rhs: SurdSum) -> SurdSum {
        &self * &rhs
    }
}

impl fmt::Display for SurdSum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }
        let mut first = true;
        for (radicand, coeff) in &self.terms {
            let negative = coeff.is_negative();
            let magnitude = coeff.abs();
            if first {
                if negative {
                    write!(f, "-")?;
                }
                first = false;
            } else if negative {
                write!(f, " - ")?;
            } else {
                write!(f, " + ")?;
            }
            if radicand.is_one() {
                write!(f, "{magnitude}")?;
            } else if magnitude.is_one() {
                write!(f, "sqrt({radicand})")?;
            } else {
                write!(f, "{magnitude}*sqrt({radicand})")?;
            }
        }
        Ok(())
    }
}
