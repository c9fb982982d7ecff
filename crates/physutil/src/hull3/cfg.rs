//! Tolerance defaults for the 3D hull builder.
//!
//! Visibility thresholds are signed sines of the angle between a face normal
//! and the direction to the point; negative values admit faces the point sits
//! slightly behind.

/// A point is assigned to a face it sees beyond this threshold.
pub(crate) const VISIBILITY_EPS: f64 = 0.002;
/// Faces next to the visible region that are deleted to keep the hole convex.
pub(crate) const NEAR_VISIBLE_EPS: f64 = -0.001;
/// Looser threshold every face of a walked edge fan must pass.
pub(crate) const FAN_EPS: f64 = -0.002;
/// Longest edge fan followed before giving up on it.
pub(crate) const FAN_LIMIT: usize = 64;
/// Seed tetrahedron degeneracy, relative to powers of the seed diameter.
pub(crate) const SEED_EPS: f64 = 1e-6;
/// Visit budget is `MAX_ITER_FACTOR * N²`.
pub(crate) const MAX_ITER_FACTOR: usize = 2;

/// Numeric knobs of [`QuickHull`](super::QuickHull).
#[derive(Clone, Copy, Debug)]
pub struct HullCfg {
    pub visibility_eps: f64,
    pub near_visible_eps: f64,
    pub fan_eps: f64,
    pub fan_limit: usize,
    pub seed_eps: f64,
    pub max_iter_factor: usize,
}

impl Default for HullCfg {
    fn default() -> Self {
        Self {
            visibility_eps: VISIBILITY_EPS,
            near_visible_eps: NEAR_VISIBLE_EPS,
            fan_eps: FAN_EPS,
            fan_limit: FAN_LIMIT,
            seed_eps: SEED_EPS,
            max_iter_factor: MAX_ITER_FACTOR,
        }
    }
}
