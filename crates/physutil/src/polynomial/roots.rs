//! Real root finding on an interval.
//!
//! Degrees 1 through 4 have closed-form solvers; higher degrees bisect between
//! the critical points found by recursing on the derivative.

use std::cmp::Ordering;
use std::ops::Deref;

use super::scalar::{cubert, sgnnz, Scalar};
use super::types::Polynomial;
use super::{DEFAULT_BISECTION_ITERS, MAX_DEGREE};

/// Slack on discriminant-like quantities in the quartic solver.
const QUARTIC_EPS: f64 = 1e-9;

/// Allocation-free list of at most `MAX_DEGREE` roots, ascending.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Roots<F: Scalar> {
    buf: [F; MAX_DEGREE],
    len: usize,
}

impl<F: Scalar> Default for Roots<F> {
    fn default() -> Self {
        Self {
            buf: [F::zero(); MAX_DEGREE],
            len: 0,
        }
    }
}

impl<F: Scalar> Roots<F> {
    #[inline]
    fn push(&mut self, x: F) {
        if self.len < MAX_DEGREE {
            self.buf[self.len] = x;
            self.len += 1;
        }
    }

    /// Keep roots in `[start, end]` (drops `NaN`), ascending.
    fn finish(mut self, start: F, end: F) -> Self {
        let mut kept = 0;
        for i in 0..self.len {
            let x = self.buf[i];
            if x >= start && x <= end {
                self.buf[kept] = x;
                kept += 1;
            }
        }
        self.len = kept;
        self.buf[..kept].sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        self
    }
}

impl<F: Scalar> Deref for Roots<F> {
    type Target = [F];
    #[inline]
    fn deref(&self) -> &[F] {
        &self.buf[..self.len]
    }
}

/// Closed-form or numeric strategy chosen from the trimmed degree.
#[derive(Clone, Copy, Debug)]
enum Solver {
    None,
    Linear,
    Quadratic,
    Cubic,
    Quartic,
    Bisection,
}

impl Solver {
    fn for_degree(degree: usize) -> Self {
        match degree {
            0 => Solver::None,
            1 => Solver::Linear,
            2 => Solver::Quadratic,
            3 => Solver::Cubic,
            4 => Solver::Quartic,
            _ => Solver::Bisection,
        }
    }
}

impl<F: Scalar> Polynomial<F> {
    /// Real roots in `[start, end]`, ascending. Bisection (degree > 4) runs
    /// `DEFAULT_BISECTION_ITERS` halvings per bracket.
    #[inline]
    pub fn find_roots(&self, start: F, end: F) -> Roots<F> {
        self.find_roots_iters(start, end, DEFAULT_BISECTION_ITERS)
    }

    /// As [`find_roots`](Self::find_roots) with an explicit bisection budget.
    pub fn find_roots_iters(&self, start: F, end: F, iters: usize) -> Roots<F> {
        let mut roots = Roots::default();
        if !(start <= end) {
            return roots;
        }
        let c = &self.data;
        let maxel = c[..=self.degree]
            .iter()
            .fold(F::zero(), |m, v| m.max(v.abs()));
        if maxel == F::zero() {
            return roots;
        }
        let mut degree = self.degree;
        while degree > 0 && c[degree].abs() <= maxel * F::POLY_EPS {
            degree -= 1;
        }

        match Solver::for_degree(degree) {
            Solver::None => {}
            Solver::Linear => roots.push(-c[0] / c[1]),
            Solver::Quadratic => quadratic(&mut roots, c[2], c[1], c[0], start, end),
            Solver::Cubic => {
                let lead = c[3];
                cubic(&mut roots, c[2] / lead, c[1] / lead, c[0] / lead);
            }
            Solver::Quartic => {
                let lead = c[4];
                quartic(
                    &mut roots,
                    [c[3] / lead, c[2] / lead, c[1] / lead, c[0] / lead],
                );
            }
            Solver::Bisection => {
                let trimmed = self.with_degree(degree);
                bisect_brackets(&mut roots, &trimmed, start, end, iters);
            }
        }
        roots.finish(start, end)
    }
}

/// `a·x² + b·x + c`, `a != 0`.
fn quadratic<F: Scalar>(roots: &mut Roots<F>, a: F, b: F, c: F, start: F, end: F) {
    let (a, b, c) = if a < F::zero() { (-a, -b, -c) } else { (a, b, c) };
    let two = F::lit(2.0);
    let d = b * b - F::lit(4.0) * a * c;
    if d < F::zero() {
        return;
    }
    // At a root, 2a·x + b = ±√d; bound that over the interval before solving.
    let lo = two * a * start + b;
    let hi = two * a * end + b;
    let sq = d.sqrt();
    let q = -(b + sgnnz(b) * sq) / two;
    if q == F::zero() {
        roots.push(F::zero());
        roots.push(F::zero());
        return;
    }
    let slack = sq * F::POLY_EPS;
    let branch = sgnnz(b) * sq;
    for (x, v) in [(q / a, -branch), (c / q, branch)] {
        if v >= lo - slack && v <= hi + slack {
            roots.push(x);
        }
    }
}

/// Monic `x³ + a·x² + b·x + c` by Cardano.
fn cubic<F: Scalar>(roots: &mut Roots<F>, a: F, b: F, c: F) {
    let a3 = a / F::lit(3.0);
    let p = b - a * a3;
    let q = (a3 * b - c) / F::lit(2.0) - a3 * a3 * a3;
    let p3 = p / F::lit(3.0);
    let disc = p3 * p3 * p3 + q * q;
    if disc > F::zero() {
        let s = disc.sqrt();
        roots.push(cubert(q + s) + cubert(q - s) - a3);
        return;
    }
    let phi = disc.abs().sqrt().atan2(q) / F::lit(3.0);
    let r = (disc.abs() + q * q).powf(F::lit(1.0 / 6.0));
    let ar = r * phi.cos();
    let ai = r * phi.sin() * F::lit(3.0).sqrt();
    roots.push(F::lit(2.0) * ar - a3);
    roots.push(-ar + ai - a3);
    roots.push(-ar - ai - a3);
}

/// Monic `x⁴ + a3·x³ + a2·x² + a1·x + a0` by Ferrari.
fn quartic<F: Scalar>(roots: &mut Roots<F>, [a3, a2, a1, a0]: [F; 4]) {
    let e = F::lit(QUARTIC_EPS);
    let two = F::lit(2.0);
    let four = F::lit(4.0);
    // Resolvent cubic, solved untrimmed: its lower coefficients grow with
    // the fourth power of the roots and would swamp the monic lead.
    let mut sub = Roots::default();
    cubic(
        &mut sub,
        -a2,
        a1 * a3 - four * a0,
        four * a2 * a0 - a1 * a1 - a3 * a3 * a0,
    );
    // Largest real root keeps R² as far from negative as possible.
    let Some(y) = sub.iter().copied().reduce(F::max) else {
        return;
    };

    let r2 = a3 * a3 / four - a2 + y;
    let (r, base, t) = if r2 < e {
        let disc = y * y - four * a0;
        if disc < -e {
            return;
        }
        let base = F::lit(0.75) * a3 * a3 - two * a2;
        (F::zero(), base, two * disc.max(F::zero()).sqrt())
    } else {
        let r = r2.sqrt();
        let base = F::lit(0.75) * a3 * a3 - r2 - two * a2;
        let t = (four * a3 * a2 - F::lit(8.0) * a1 - a3 * a3 * a3) / (four * r);
        (r, base, t)
    };
    let shift = -a3 / four;
    let d2 = base + t;
    if d2 > -e {
        let d = d2.max(F::zero()).sqrt();
        roots.push(shift + (r - d) / two);
        roots.push(shift + (r + d) / two);
    }
    let e2 = base - t;
    if e2 > -e {
        let ee = e2.max(F::zero()).sqrt();
        roots.push(shift - (r + ee) / two);
        roots.push(shift - (r - ee) / two);
    }
}

/// Bisect every sign-changing bracket between consecutive critical points.
fn bisect_brackets<F: Scalar>(
    roots: &mut Roots<F>,
    poly: &Polynomial<F>,
    start: F,
    end: F,
    iters: usize,
) {
    let crit = poly.derivative().find_roots_iters(start, end, iters);
    let mut marks = [F::zero(); MAX_DEGREE + 1];
    let mut n = 0;
    marks[n] = start;
    n += 1;
    for &x in crit.iter() {
        if x > marks[n - 1] && x < end {
            marks[n] = x;
            n += 1;
        }
    }
    if n < marks.len() && end > marks[n - 1] {
        marks[n] = end;
        n += 1;
    }

    for &x in &marks[..n] {
        if poly.eval(x) == F::zero() {
            roots.push(x);
        }
    }
    for w in marks[..n].windows(2) {
        let (mut lo, mut hi) = (w[0], w[1]);
        let flo = poly.eval(lo);
        let fhi = poly.eval(hi);
        if flo == F::zero() || fhi == F::zero() || (flo < F::zero()) == (fhi < F::zero()) {
            continue;
        }
        let rising = flo < F::zero();
        for _ in 0..iters {
            let mid = (lo + hi) / F::lit(2.0);
            let fm = poly.eval(mid);
            if fm == F::zero() {
                lo = mid;
                hi = mid;
                break;
            }
            if (fm < F::zero()) == rising {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        roots.push((lo + hi) / F::lit(2.0));
    }
}
