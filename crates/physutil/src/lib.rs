//! Numeric kernels for physics tooling.
//!
//! - `hull3`: 3D convex hull (quickhull) with angular visibility tolerances.
//! - `tri2`: polygon-with-holes triangulation (monotone sweep, ear-clipping fallback).
//! - `polynomial`: fixed-capacity polynomials, Sturm counting and real roots.
//! - `sample`: reproducible random clouds and polygons for tests and benches.
//!
//! Kernels are single-threaded and allocation-light; builders such as
//! [`hull3::QuickHull`] keep their scratch buffers between calls.

pub mod api;
pub mod hull3;
pub mod polynomial;
pub mod sample;
pub mod tri2;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use nalgebra::{Vector2 as Vec2, Vector3 as Vec3};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::hull3::{convex_hull, Hull, HullCfg, HullError, QuickHull};
    pub use crate::polynomial::{Polynomial, Roots};
    pub use crate::sample::{CloudCfg, CloudShape, ReplayToken, StarCfg};
    pub use crate::tri2::{triangulate, Method, TriCfg, TriangulateError, Triangulation};
    pub use nalgebra::{Vector2 as Vec2, Vector3 as Vec3};
}
