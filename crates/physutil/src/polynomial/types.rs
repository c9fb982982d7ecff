//! `Polynomial<F>`: fixed-capacity coefficients with a rational denominator.
//!
//! Invariants
//! - `data[i]` for `i <= degree` are live; slots above `degree` are kept at zero.
//! - The represented function is `Σ data[i]·xⁱ / denom`. Every operator keeps
//!   numerator and denominator paired, so no division happens until a caller
//!   asks for `value`.

use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Rem, Sub, SubAssign,
};

use super::scalar::Scalar;
use super::MAX_DEGREE;

/// Number of coefficient slots.
pub(crate) const SLOTS: usize = MAX_DEGREE + 1;

/// Polynomial of declared degree `degree <= MAX_DEGREE` over `F`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Polynomial<F: Scalar> {
    pub(crate) data: [F; SLOTS],
    pub(crate) degree: usize,
    pub(crate) denom: F,
}

struct CoeffCount<const N: usize>;
impl<const N: usize> CoeffCount<N> {
    const OK: () = assert!(
        N >= 1 && N <= SLOTS,
        "coefficient count must be in 1..=MAX_DEGREE+1"
    );
}

impl<F: Scalar> Default for Polynomial<F> {
    fn default() -> Self {
        Self::zero(0)
    }
}

impl<F: Scalar> Polynomial<F> {
    /// Zero polynomial of the given declared degree (clamped to `MAX_DEGREE`).
    #[inline]
    pub fn zero(degree: usize) -> Self {
        Self {
            data: [F::zero(); SLOTS],
            degree: degree.min(MAX_DEGREE),
            denom: F::one(),
        }
    }

    /// From ascending coefficients (`coeffs[0]` is the constant term).
    ///
    /// The array length is checked at compile time.
    pub fn new<const N: usize>(coeffs: [F; N]) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = CoeffCount::<N>::OK;
        let mut p = Self::zero(N - 1);
        p.data[..N].copy_from_slice(&coeffs);
        p
    }

    /// From ascending coefficients; `None` if empty or longer than `MAX_DEGREE + 1`.
    pub fn from_coeffs(coeffs: &[F]) -> Option<Self> {
        if coeffs.is_empty() || coeffs.len() > SLOTS {
            return None;
        }
        let mut p = Self::zero(coeffs.len() - 1);
        p.data[..coeffs.len()].copy_from_slice(coeffs);
        Some(p)
    }

    /// From coefficients listed highest degree first.
    pub fn from_highest_first(coeffs: &[F]) -> Option<Self> {
        let mut p = Self::from_coeffs(coeffs)?;
        p.data[..coeffs.len()].reverse();
        Some(p)
    }

    /// `coeff · x^degree`.
    #[inline]
    pub fn monomial(degree: usize, coeff: F) -> Self {
        let mut p = Self::zero(degree);
        p.data[p.degree] = coeff;
        p
    }

    /// Same function with a different declared degree; truncates or zero-fills.
    pub fn with_degree(mut self, degree: usize) -> Self {
        let degree = degree.min(MAX_DEGREE);
        for slot in self.data.iter_mut().skip(degree + 1) {
            *slot = F::zero();
        }
        self.degree = degree;
        self
    }

    #[inline]
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Live coefficients, ascending.
    #[inline]
    pub fn coeffs(&self) -> &[F] {
        &self.data[..=self.degree]
    }

    #[inline]
    pub fn denom(&self) -> F {
        self.denom
    }

    /// Flip signs so that `denom >= 0`; the represented function is unchanged.
    pub fn fix_sign(&mut self) -> &mut Self {
        if self.denom < F::zero() {
            self.denom = -self.denom;
            for c in self.data.iter_mut() {
                *c = -*c;
            }
        }
        self
    }

    /// Numerator at `x` (Horner). Roots do not depend on `denom`.
    #[inline]
    pub fn eval(&self, x: F) -> F {
        self.eval_sub(x, self.degree)
    }

    /// Numerator truncated to `subdegree` at `x`.
    #[inline]
    pub fn eval_sub(&self, x: F, subdegree: usize) -> F {
        let top = subdegree.min(self.degree);
        self.data[..=top]
            .iter()
            .rev()
            .fold(F::zero(), |acc, &c| acc * x + c)
    }

    /// Function value `eval(x) / denom`.
    #[inline]
    pub fn value(&self, x: F) -> F {
        self.eval(x) / self.denom
    }

    /// Product, or `None` if the degree would exceed `MAX_DEGREE`.
    pub fn checked_mul(&self, rhs: &Self) -> Option<Self> {
        let degree = self.degree + rhs.degree;
        if degree > MAX_DEGREE {
            return None;
        }
        let mut res = Self::zero(degree);
        for (i, &a) in self.coeffs().iter().enumerate() {
            for (j, &b) in rhs.coeffs().iter().enumerate() {
                res.data[i + j] = res.data[i + j] + a * b;
            }
        }
        res.denom = self.denom * rhs.denom;
        Some(res)
    }

    /// `self * self`.
    ///
    /// # Panics
    /// If `2 * degree > MAX_DEGREE`.
    #[inline]
    pub fn sqr(&self) -> Self {
        *self * *self
    }

    fn combine(&self, rhs: &Self, sign: F) -> Self {
        let mut res = Self::zero(self.degree.max(rhs.degree));
        for i in 0..=res.degree {
            res.data[i] = self.data[i] * rhs.denom + sign * rhs.data[i] * self.denom;
        }
        res.denom = self.denom * rhs.denom;
        res
    }
}

impl<F: Scalar> Index<usize> for Polynomial<F> {
    type Output = F;
    #[inline]
    fn index(&self, idx: usize) -> &F {
        &self.coeffs()[idx]
    }
}

impl<F: Scalar> IndexMut<usize> for Polynomial<F> {
    #[inline]
    fn index_mut(&mut self, idx: usize) -> &mut F {
        &mut self.data[..=self.degree][idx]
    }
}

impl<F: Scalar> Neg for Polynomial<F> {
    type Output = Self;
    fn neg(mut self) -> Self {
        for c in self.data.iter_mut() {
            *c = -*c;
        }
        self
    }
}

// Scalar operands are scaled by `denom` so they act on the function value.
impl<F: Scalar> AddAssign<F> for Polynomial<F> {
    #[inline]
    fn add_assign(&mut self, op: F) {
        self.data[0] = self.data[0] + op * self.denom;
    }
}
impl<F: Scalar> SubAssign<F> for Polynomial<F> {
    #[inline]
    fn sub_assign(&mut self, op: F) {
        self.data[0] = self.data[0] - op * self.denom;
    }
}
impl<F: Scalar> MulAssign<F> for Polynomial<F> {
    #[inline]
    fn mul_assign(&mut self, op: F) {
        for c in self.data.iter_mut() {
            *c = *c * op;
        }
    }
}
impl<F: Scalar> DivAssign<F> for Polynomial<F> {
    #[inline]
    fn div_assign(&mut self, op: F) {
        self.denom = self.denom * op;
    }
}

impl<F: Scalar> Add<F> for Polynomial<F> {
    type Output = Self;
    #[inline]
    fn add(mut self, op: F) -> Self {
        self += op;
        self
    }
}
impl<F: Scalar> Sub<F> for Polynomial<F> {
    type Output = Self;
    #[inline]
    fn sub(mut self, op: F) -> Self {
        self -= op;
        self
    }
}
impl<F: Scalar> Mul<F> for Polynomial<F> {
    type Output = Self;
    #[inline]
    fn mul(mut self, op: F) -> Self {
        self *= op;
        self
    }
}
impl<F: Scalar> Div<F> for Polynomial<F> {
    type Output = Self;
    #[inline]
    fn div(mut self, op: F) -> Self {
        self /= op;
        self
    }
}

macro_rules! scalar_lhs_ops {
    ($($t:ty),*) => {$(
        impl Add<Polynomial<$t>> for $t {
            type Output = Polynomial<$t>;
            #[inline]
            fn add(self, pn: Polynomial<$t>) -> Polynomial<$t> {
                pn + self
            }
        }
        impl Sub<Polynomial<$t>> for $t {
            type Output = Polynomial<$t>;
            #[inline]
            fn sub(self, pn: Polynomial<$t>) -> Polynomial<$t> {
                -pn + self
            }
        }
        impl Mul<Polynomial<$t>> for $t {
            type Output = Polynomial<$t>;
            #[inline]
            fn mul(self, pn: Polynomial<$t>) -> Polynomial<$t> {
                pn * self
            }
        }
    )*};
}
scalar_lhs_ops!(f32, f64);

impl<F: Scalar> Add for Polynomial<F> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.combine(&rhs, F::one())
    }
}
impl<F: Scalar> Sub for Polynomial<F> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self.combine(&rhs, -F::one())
    }
}
impl<F: Scalar> AddAssign for Polynomial<F> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = self.combine(&rhs, F::one());
    }
}
impl<F: Scalar> SubAssign for Polynomial<F> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = self.combine(&rhs, -F::one());
    }
}

/// # Panics
/// If the product degree exceeds `MAX_DEGREE`; use `checked_mul` to avoid it.
impl<F: Scalar> Mul for Polynomial<F> {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        match self.checked_mul(&rhs) {
            Some(p) => p,
            None => panic!(
                "polynomial product degree {} exceeds MAX_DEGREE {}",
                self.degree + rhs.degree,
                MAX_DEGREE
            ),
        }
    }
}
impl<F: Scalar> MulAssign for Polynomial<F> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

/// Quotient; a zero divisor yields the zero polynomial.
impl<F: Scalar> Div for Polynomial<F> {
    type Output = Self;
    fn div(self, den: Self) -> Self {
        self.div_rem(&den).map(|(q, _)| q).unwrap_or_default()
    }
}

/// Remainder; a zero divisor leaves the numerator as remainder.
impl<F: Scalar> Rem for Polynomial<F> {
    type Output = Self;
    fn rem(self, den: Self) -> Self {
        self.div_rem(&den).map(|(_, r)| r).unwrap_or(self)
    }
}
