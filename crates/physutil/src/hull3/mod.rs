//! 3D convex hull (quickhull) over arbitrary point sources.
//!
//! Purpose
//! - Build a closed, outward-oriented triangle mesh around a point cloud for
//!   collision proxies and volume estimates.
//!
//! Approach
//! - Seed a tetrahedron from extreme points, assign every other point to a face
//!   it sees, then repeatedly add the farthest outside point: delete the faces
//!   it sees (plus near-visible faces that would leave a non-convex hole), and
//!   fan new faces from the point to the hole boundary.
//! - Visibility uses angular thresholds (`HullCfg`) rather than absolute
//!   distances, so results do not depend on the cloud's scale.
//!
//! Tolerance
//! - Outside points of deleted faces are only offered to the new faces around
//!   the added point, first fit. A point that ends up outside a surviving face
//!   is dropped as interior, so the result is convex to about 1% of the
//!   cloud's extent rather than exactly.
//!
//! Layout
//! - `cfg`: tolerance constants and `HullCfg`.
//! - `source`: `PointSource` and the `Strided` accessor.
//! - `types`: `Hull`, `HullError`, arena nodes and ring helpers.
//! - `build`: the `QuickHull` builder.

mod build;
mod cfg;
mod source;
mod types;

pub use build::QuickHull;
pub use cfg::HullCfg;
pub use source::{PointSource, Strided};
pub use types::{Hull, HullError};

/// One-shot hull with default tolerances.
pub fn convex_hull<P: PointSource + ?Sized>(points: &P) -> Result<Hull, HullError> {
    QuickHull::new(HullCfg::default()).build(points)
}

#[cfg(test)]
mod tests;
