//! Curated surface for tools built on the kernels.
//!
//! Prefer these re-exports in binaries and benches; module paths below may
//! move between releases.

// 3D hull
pub use crate::hull3::{convex_hull, Hull, HullCfg, HullError, PointSource, QuickHull, Strided};
// 2D triangulation
pub use crate::tri2::{
    contours, ear_clip, polygon_area, triangulate, Method, TriCfg, TriangulateError, Triangulation,
};
// Polynomials
pub use crate::polynomial::{
    cubert, signed_pow, Polynomial, Roots, Scalar, DEFAULT_BISECTION_ITERS, MAX_DEGREE,
};
// Sampling
pub use crate::sample::{
    point_cloud, star_polygon, with_hole, CloudCfg, CloudShape, ReplayToken, StarCfg,
};

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn kernels_agree_on_random_inputs() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..16 {
            let tok = ReplayToken::new(rng.gen(), rng.gen_range(0..1000));
            let cloud = point_cloud(CloudCfg::default(), tok);
            let hull = convex_hull(cloud.as_slice()).unwrap();
            assert!(hull.is_closed());

            let outer = star_polygon(StarCfg::default(), tok);
            let poly: Vec<_> = outer.iter().copied().map(Some).collect();
            let tri = triangulate(&poly, TriCfg::default()).unwrap();
            let want = polygon_area(&poly);
            assert!((tri.area(&poly) - want).abs() <= 0.003 * want);

            // (x - a)(x - b)(x - c) on a bracket holding all three roots.
            let mut r: [f64; 3] = [rng.gen_range(-5.0..5.0), 0.0, 0.0];
            r[1] = r[0] + rng.gen_range(0.5..2.0);
            r[2] = r[1] + rng.gen_range(0.5..2.0);
            let p = Polynomial::new([-r[0], 1.0])
                * Polynomial::new([-r[1], 1.0])
                * Polynomial::new([-r[2], 1.0]);
            let roots = p.find_roots(r[0] - 1.0, r[2] + 1.0);
            assert_eq!(roots.len(), 3);
            for (got, want) in roots.iter().zip(r) {
                assert!((got - want).abs() < 1e-6, "{got} vs {want}");
            }
        }
    }
}
