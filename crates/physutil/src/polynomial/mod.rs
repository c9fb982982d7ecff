//! Fixed-capacity polynomials with a rational denominator.
//!
//! Purpose
//! - Small allocation-free polynomial value type for physics kernels:
//!   arithmetic, long division, derivative, Sturm root counting and real root
//!   finding on an interval.
//!
//! Layout
//! - `scalar`: `Scalar` bound plus `cubert`/`signed_pow`.
//! - `types`: `Polynomial<F>` and its operators.
//! - `divide`: `div_rem`, `derivative`, `num_roots`.
//! - `roots`: `Roots<F>` and `find_roots`.
//!
//! References
//! - Cardano and Ferrari closed forms; Sturm's theorem for root counting.

mod divide;
mod roots;
mod scalar;
mod types;

/// Largest representable degree.
pub const MAX_DEGREE: usize = 8;

/// Bisection halvings per bracket used by `find_roots`.
pub const DEFAULT_BISECTION_ITERS: usize = 20;

pub use roots::Roots;
pub use scalar::{cubert, signed_pow, Scalar};
pub use types::Polynomial;
