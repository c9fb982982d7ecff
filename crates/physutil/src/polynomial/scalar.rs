//! Scalar requirements for polynomial coefficients.
//!
//! - `Scalar`: `f32`/`f64` with the per-precision trimming epsilon.
//! - `cubert`, `signed_pow`: odd-symmetric real powers that pass tiny inputs
//!   through unchanged instead of producing `NaN`/`-inf` from `ln(0)`.

use std::fmt::Debug;

use num_traits::Float;

/// Inputs below this magnitude are returned unchanged by the power helpers.
const POW_FLOOR: f64 = 1e-20;

/// Floating-point coefficient type.
pub trait Scalar: Float + Debug + Default + 'static {
    /// Relative magnitude below which a leading coefficient is treated as zero.
    const POLY_EPS: Self;

    /// Literal conversion from an `f64` constant (may round for `f32`).
    fn lit(x: f64) -> Self;
}

impl Scalar for f32 {
    const POLY_EPS: f32 = 1e-6;
    #[inline]
    fn lit(x: f64) -> Self {
        x as f32
    }
}

impl Scalar for f64 {
    const POLY_EPS: f64 = 1e-10;
    #[inline]
    fn lit(x: f64) -> Self {
        x
    }
}

/// Sign with zero counted as positive.
#[inline]
pub(crate) fn sgnnz<F: Scalar>(x: F) -> F {
    if x >= F::zero() {
        F::one()
    } else {
        -F::one()
    }
}

/// `sign(x) * |x|^p`, or `x` itself when `|x| < 1e-20`.
#[inline]
pub fn signed_pow<F: Scalar>(x: F, p: F) -> F {
    if x.abs() > F::lit(POW_FLOOR) {
        (x.abs().ln() * p).exp() * sgnnz(x)
    } else {
        x
    }
}

/// Real cube root, odd-symmetric.
#[inline]
pub fn cubert<F: Scalar>(x: F) -> F {
    signed_pow(x, F::lit(1.0 / 3.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cubert_is_odd_and_exact_on_cubes() {
        assert!((cubert(27.0_f64) - 3.0).abs() < 1e-12);
        assert!((cubert(-8.0_f64) + 2.0).abs() < 1e-12);
        assert!((cubert(0.125_f32) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn tiny_inputs_pass_through() {
        assert_eq!(cubert(0.0_f64), 0.0);
        assert_eq!(signed_pow(1e-25_f64, 0.5), 1e-25);
        assert_eq!(signed_pow(-1e-30_f32, 2.0), -1e-30);
    }
}
