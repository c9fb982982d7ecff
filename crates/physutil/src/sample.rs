//! Deterministic random inputs for tests, benches and the CLI.
//!
//! Model
//! - Point clouds: uniform in a cube, a ball, or on a sphere of given radius.
//! - Star polygons: `n` equally spaced angles with bounded angular and radial
//!   jitter, sorted by angle so the result is simple and counter-clockwise.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG,
//!   so draw `k` of a run can be reproduced without replaying draws `0..k`.

use nalgebra::{Vector2, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    pub fn new(seed: u64, index: u64) -> Self {
        Self { seed, index }
    }

    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Region a point cloud is drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloudShape {
    Cube,
    Ball,
    Sphere,
}

#[derive(Clone, Copy, Debug)]
pub struct CloudCfg {
    pub count: usize,
    pub shape: CloudShape,
    /// Half edge length for `Cube`, radius otherwise.
    pub radius: f64,
}

impl Default for CloudCfg {
    fn default() -> Self {
        Self {
            count: 256,
            shape: CloudShape::Ball,
            radius: 1.0,
        }
    }
}

/// Draw `cfg.count` points centred on the origin.
pub fn point_cloud(cfg: CloudCfg, tok: ReplayToken) -> Vec<Vector3<f64>> {
    let mut rng = tok.to_std_rng();
    let r = cfg.radius.abs();
    let mut cube = move || {
        Vector3::new(
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
        )
    };
    (0..cfg.count)
        .map(|_| match cfg.shape {
            CloudShape::Cube => cube() * r,
            CloudShape::Ball => loop {
                let p = cube();
                if p.norm_squared() <= 1.0 {
                    break p * r;
                }
            },
            CloudShape::Sphere => loop {
                let p = cube();
                let n2 = p.norm_squared();
                if n2 <= 1.0 && n2 > 1e-6 {
                    break p * (r / n2.sqrt());
                }
            },
        })
        .collect()
}

/// Radial-jitter star polygon configuration.
#[derive(Clone, Copy, Debug)]
pub struct StarCfg {
    pub vertex_count: usize,
    /// Angular jitter as a fraction of the base spacing Δ=2π/n. Clamped to [0, 0.49].
    pub angle_jitter_frac: f64,
    /// Radii are `base_radius * (1 + u)` with `u ∈ [-radial_jitter, radial_jitter]`.
    pub radial_jitter: f64,
    pub base_radius: f64,
}

impl Default for StarCfg {
    fn default() -> Self {
        Self {
            vertex_count: 24,
            angle_jitter_frac: 0.3,
            radial_jitter: 0.5,
            base_radius: 1.0,
        }
    }
}

/// Simple counter-clockwise polygon, star-shaped around the origin.
pub fn star_polygon(cfg: StarCfg, tok: ReplayToken) -> Vec<Vector2<f64>> {
    let mut rng = tok.to_std_rng();
    let n = cfg.vertex_count.max(3);
    let aj = cfg.angle_jitter_frac.clamp(0.0, 0.49);
    let rj = cfg.radial_jitter.clamp(0.0, 0.95);
    let r0 = cfg.base_radius.max(1e-9);
    let delta = 2.0 * std::f64::consts::PI / (n as f64);
    let phase = rng.gen::<f64>() * delta;
    let mut angles: Vec<f64> = (0..n)
        .map(|k| {
            let jitter = (rng.gen::<f64>() * 2.0 - 1.0) * aj * delta;
            phase + (k as f64) * delta + jitter
        })
        .collect();
    angles.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    angles
        .into_iter()
        .map(|th| {
            let u = (rng.gen::<f64>() * 2.0 - 1.0) * rj;
            let r = (1.0 + u) * r0;
            Vector2::new(th.cos() * r, th.sin() * r)
        })
        .collect()
}

/// `outer`, a separator, then `outer` scaled about the origin by `hole_scale`
/// in reverse order (a clockwise hole for counter-clockwise `outer`).
pub fn with_hole(outer: &[Vector2<f64>], hole_scale: f64) -> Vec<Option<Vector2<f64>>> {
    outer
        .iter()
        .copied()
        .map(Some)
        .chain(std::iter::once(None))
        .chain(outer.iter().rev().map(|p| Some(p * hole_scale)))
        .collect()
}
