//! Division with remainder, derivative and Sturm root counting.
//!
//! Division is division-free on the hot path: each elimination step scales the
//! running remainder by the divisor's leading coefficient and folds that factor
//! into the denominators instead of dividing.

use super::scalar::Scalar;
use super::types::{Polynomial, SLOTS};
use super::MAX_DEGREE;

/// Sturm chain members with a denominator beyond this are rescaled.
const STURM_RESCALE: f64 = 1e10;

/// Highest index whose coefficient is not negligible next to the largest one.
///
/// `None` for the all-zero polynomial. Coefficients strictly below
/// `max|c| · POLY_EPS` are trimmed.
pub(crate) fn significant_degree<F: Scalar>(data: &[F], degree: usize) -> Option<usize> {
    let maxel = data[..=degree]
        .iter()
        .fold(F::zero(), |m, c| m.max(c.abs()));
    if maxel == F::zero() {
        return None;
    }
    let thresh = maxel * F::POLY_EPS;
    let mut d = degree;
    while data[d].abs() < thresh {
        d -= 1;
    }
    Some(d)
}

impl<F: Scalar> Polynomial<F> {
    /// Power-rule derivative; degree drops by one (stays 0 for constants).
    pub fn derivative(&self) -> Self {
        let mut res = Self::zero(self.degree.saturating_sub(1));
        for i in 0..self.degree {
            res.data[i] = self.data[i + 1] * F::lit((i + 1) as f64);
        }
        res.denom = self.denom;
        res
    }

    /// Schoolbook long division: returns `(quot, rem)` with
    /// `self = quot · den + rem` as functions.
    ///
    /// Leading coefficients that are negligible relative to the largest one are
    /// trimmed from both operands first. `None` if `den` is the zero polynomial.
    pub fn div_rem(&self, den: &Self) -> Option<(Self, Self)> {
        let dd = significant_degree(&den.data, den.degree)?;
        let Some(nd) = significant_degree(&self.data, self.degree) else {
            let mut quot = Self::zero(0);
            quot.denom = self.denom;
            return Some((quot, Self::zero(0)));
        };
        if nd < dd {
            let mut quot = Self::zero(0);
            quot.denom = self.denom;
            return Some((quot, self.with_degree(nd)));
        }

        let qdeg = nd - dd;
        let lead = den.data[dd];
        let mut quot = Self::zero(qdeg);
        quot.denom = self.denom;
        let mut rem = self.with_degree(nd);

        let mut l = nd;
        let mut k = qdeg;
        loop {
            let top = rem.data[l];
            quot.data[k] = top * den.denom;
            quot.denom = quot.denom * lead;
            for q in quot.data[k + 1..=qdeg].iter_mut() {
                *q = *q * lead;
            }
            for i in (0..dd).rev() {
                let j = l - dd + i;
                rem.data[j] = rem.data[j] * lead - den.data[i] * top;
            }
            for r in rem.data[..l - dd].iter_mut() {
                *r = *r * lead;
            }
            rem.data[l] = F::zero();
            rem.denom = rem.denom * lead;
            if l == dd {
                break;
            }
            l -= 1;
            k -= 1;
        }
        let rem = rem.with_degree(dd.saturating_sub(1));
        Some((quot, rem))
    }

    /// True when `self` is negligible as a function next to `other`.
    fn negligible_next_to(&self, other: &Self) -> bool {
        let scale = |p: &Self| {
            p.coeffs().iter().fold(F::zero(), |m, c| m.max(c.abs())) / p.denom.abs()
        };
        scale(self) <= scale(other) * F::POLY_EPS
    }

    /// Number of distinct real roots in `(start, end]` via a Sturm chain.
    ///
    /// Chain: `p`, `p'`, then `-(f[i-2] mod f[i-1])` until the remainder
    /// vanishes. Members whose denominator grows past `1e10` are rescaled.
    pub fn num_roots(&self, start: F, end: F) -> usize {
        let Some(deg) = significant_degree(&self.data, self.degree) else {
            return 0;
        };
        if deg == 0 {
            return 0;
        }
        let mut chain = [Self::zero(0); SLOTS + 1];
        chain[0] = self.with_degree(deg);
        chain[1] = chain[0].derivative();
        let mut len = 2;
        while len <= MAX_DEGREE + 1 {
            let Some((_, mut r)) = chain[len - 2].div_rem(&chain[len - 1]) else {
                break;
            };
            if r.negligible_next_to(&chain[len - 2]) {
                break;
            }
            r.denom = -r.denom;
            if r.denom.abs() > F::lit(STURM_RESCALE) {
                let s = F::lit(1.0 / STURM_RESCALE);
                r *= s;
                r.denom = r.denom * s;
            }
            chain[len] = r;
            len += 1;
            if significant_degree(&r.data, r.degree) == Some(0) {
                break;
            }
        }

        let sign_changes = |x: F| {
            let mut changes = 0usize;
            let mut prev = F::zero();
            for p in &chain[..len] {
                let v = p.eval(x) * p.denom;
                if v == F::zero() {
                    continue;
                }
                if prev != F::zero() && (v < F::zero()) != (prev < F::zero()) {
                    changes += 1;
                }
                prev = v;
            }
            changes
        };
        sign_changes(start).abs_diff(sign_changes(end))
    }
}
