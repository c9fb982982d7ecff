use super::*;
use crate::sample::{star_polygon, with_hole, ReplayToken, StarCfg};
use nalgebra::Vector2;
use proptest::prelude::*;

fn poly(pts: &[[f64; 2]]) -> Vec<Option<Vector2<f64>>> {
    pts.iter().map(|&[x, y]| Some(Vector2::new(x, y))).collect()
}

fn unit_square() -> Vec<Option<Vector2<f64>>> {
    poly(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]])
}

fn diamond(r: f64) -> Vec<Vector2<f64>> {
    vec![
        Vector2::new(0.0, -r),
        Vector2::new(r, 0.0),
        Vector2::new(0.0, r),
        Vector2::new(-r, 0.0),
    ]
}

/// Every triangle has positive area on `vertices`.
fn all_ccw(t: &Triangulation, vertices: &[Option<Vector2<f64>>]) -> bool {
    t.triangles.iter().all(|&tri| {
        let p = tri.map(|i| vertices[i].unwrap());
        (p[1] - p[0]).perp(&(p[2] - p[0])) > 0.0
    })
}

fn used(t: &Triangulation) -> Vec<usize> {
    let mut v: Vec<usize> = t.triangles.iter().flatten().copied().collect();
    v.sort_unstable();
    v.dedup();
    v
}

#[test]
fn unit_square_sweeps_into_two_triangles() {
    let sq = unit_square();
    let t = triangulate(&sq, TriCfg::default()).unwrap();
    assert_eq!(t.method, Method::Sweep);
    assert_eq!(t.triangles, vec![[3, 0, 1], [2, 3, 1]]);
    assert!((t.area(&sq) - 1.0).abs() < 1e-12);
    assert!(all_ccw(&t, &sq));
}

#[test]
fn sag_is_bridged() {
    // Notch from above: vertex 3 is a reflex local minimum.
    let v = poly(&[[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [2.0, 1.0], [0.0, 4.0]]);
    let t = triangulate(&v, TriCfg::default()).unwrap();
    assert_eq!(t.method, Method::Sweep);
    assert_eq!(t.len(), 3);
    assert!((t.area(&v) - 10.0).abs() < 1e-12);
    assert!(all_ccw(&t, &v));
    assert_eq!(used(&t), vec![0, 1, 2, 3, 4]);
}

#[test]
fn diamond_with_hole() {
    let v = with_hole(&diamond(4.0), 0.25);
    assert!((polygon_area(&v) - 30.0).abs() < 1e-12);
    let t = triangulate(&v, TriCfg::default()).unwrap();
    assert_eq!(t.method, Method::Sweep);
    // n + 2h - 2 for n = 8 vertices and one hole.
    assert_eq!(t.len(), 8);
    assert!((t.area(&v) - 30.0).abs() < 1e-12);
    assert!(all_ccw(&t, &v));
    assert_eq!(used(&t), vec![0, 1, 2, 3, 5, 6, 7, 8]);
}

#[test]
fn level_bottomed_hole_is_unreliable() {
    let square: Vec<Vector2<f64>> = unit_square()
        .into_iter()
        .flatten()
        .map(|p| (p - Vector2::new(0.5, 0.5)) * 4.0)
        .collect();
    let v = with_hole(&square, 0.5);
    match triangulate(&v, TriCfg::default()) {
        Err(TriangulateError::Unreliable {
            partial,
            expected_min,
            input_area,
            output_area,
        }) => {
            assert_eq!(partial.len(), 2);
            assert_eq!(expected_min, 4);
            assert!((input_area - 12.0).abs() < 1e-12);
            assert!((output_area - 16.0).abs() < 1e-12);
        }
        other => panic!("expected Unreliable, got {other:?}"),
    }
}

#[test]
fn disjoint_ccw_contours_are_split() {
    let mut v = unit_square();
    v.push(None);
    v.extend(poly(&[[3.0, 0.0], [4.0, 0.0], [4.0, 1.0], [3.0, 1.0]]));
    let t = triangulate(&v, TriCfg::default()).unwrap();
    assert_eq!(t.method, Method::PerContour);
    assert_eq!(t.triangles, vec![[3, 0, 1], [2, 3, 1], [8, 5, 6], [7, 8, 6]]);
    assert!((t.area(&v) - 2.0).abs() < 1e-12);

    match triangulate(&v, TriCfg::with_capacity(3)) {
        Err(TriangulateError::CapacityExceeded { partial }) => {
            assert_eq!(partial.method, Method::PerContour);
            assert_eq!(partial.triangles, vec![[3, 0, 1], [2, 3, 1], [8, 5, 6]]);
        }
        other => panic!("expected CapacityExceeded, got {other:?}"),
    }
}

#[test]
fn capacity_is_enforced() {
    let sq = unit_square();
    match triangulate(&sq, TriCfg::with_capacity(1)) {
        Err(TriangulateError::CapacityExceeded { partial }) => {
            assert_eq!(partial.triangles, vec![[3, 0, 1]]);
        }
        other => panic!("expected CapacityExceeded, got {other:?}"),
    }
    assert_eq!(triangulate(&sq, TriCfg::with_capacity(2)).unwrap().len(), 2);

    let cfg = TriCfg {
        force_ear_clipping: true,
        ..TriCfg::with_capacity(1)
    };
    assert!(matches!(
        triangulate(&sq, cfg),
        Err(TriangulateError::CapacityExceeded { .. })
    ));
}

#[test]
fn forced_ear_clipping_matches_public_ear_clip() {
    let sq = unit_square();
    let cfg = TriCfg {
        force_ear_clipping: true,
        ..TriCfg::default()
    };
    let forced = triangulate(&sq, cfg).unwrap();
    assert_eq!(forced.method, Method::EarClip);
    assert_eq!(forced.triangles, vec![[0, 1, 3], [1, 2, 3]]);
    assert_eq!(forced, ear_clip(&sq, usize::MAX));
    assert_eq!(ear_clip(&sq, 1).len(), 1);
}

#[test]
fn bowtie_completes() {
    let v = poly(&[[0.0, 0.0], [2.0, 2.0], [2.0, 0.0], [0.0, 2.0]]);
    let t = triangulate(&v, TriCfg::default()).unwrap();
    assert!(t.triangles.iter().flatten().all(|&i| i < 4));
    assert!(t.len() >= 4 - 2);
}

#[test]
fn clockwise_contour_is_reported() {
    let v = poly(&[[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]]);
    assert!((polygon_area(&v) + 1.0).abs() < 1e-12);
    let forced = TriCfg {
        force_ear_clipping: true,
        ..TriCfg::default()
    };
    for cfg in [TriCfg::default(), forced] {
        match triangulate(&v, cfg) {
            Err(TriangulateError::Unreliable {
                partial,
                expected_min,
                input_area,
                ..
            }) => {
                assert_eq!(partial.method, Method::EarClip);
                assert!(partial.len() < 2);
                assert_eq!(expected_min, 2);
                assert!((input_area + 1.0).abs() < 1e-12);
            }
            other => panic!("expected Unreliable, got {other:?}"),
        }
    }
}

#[test]
fn two_holes_in_rotated_square() {
    // Axis-aligned square of half side `h` around `c`, clockwise if `hole`.
    let square = |c: [f64; 2], h: f64, hole: bool| {
        let mut q = vec![
            Vector2::new(c[0] - h, c[1] - h),
            Vector2::new(c[0] + h, c[1] - h),
            Vector2::new(c[0] + h, c[1] + h),
            Vector2::new(c[0] - h, c[1] + h),
        ];
        if hole {
            q.reverse();
        }
        q
    };
    for angle in [0.1f64, 0.5, 1.0, 2.5, 4.0] {
        let (s, c) = angle.sin_cos();
        let rot = |p: Vector2<f64>| Some(Vector2::new(c * p.x - s * p.y, s * p.x + c * p.y));
        let mut v: Vec<_> = square([0.0, 0.0], 5.0, false).into_iter().map(rot).collect();
        v.push(None);
        v.extend(square([-2.5, 0.0], 1.0, true).into_iter().map(rot));
        v.push(None);
        v.extend(square([2.5, 0.0], 1.0, true).into_iter().map(rot));

        assert!((polygon_area(&v) - 92.0).abs() < 1e-9);
        let t = triangulate(&v, TriCfg::default()).unwrap();
        assert_eq!(t.method, Method::Sweep);
        // n + 2h - 2 for n = 12 vertices and two holes.
        assert_eq!(t.len(), 14, "angle {angle}");
        assert!((t.area(&v) - 92.0).abs() < 1e-9, "angle {angle}");
        assert!(t.triangles.iter().flatten().all(|&i| v[i].is_some()));
    }
}

#[test]
fn too_few_vertices() {
    assert_eq!(
        triangulate(&[], TriCfg::default()),
        Err(TriangulateError::TooFewVertices)
    );
    let mut v = poly(&[[0.0, 0.0], [1.0, 0.0]]);
    v.push(None);
    v.extend(poly(&[[0.0, 1.0], [1.0, 1.0]]));
    assert_eq!(
        triangulate(&v, TriCfg::default()),
        Err(TriangulateError::TooFewVertices)
    );
    assert_eq!(
        triangulate(&[None, None, None], TriCfg::default()),
        Err(TriangulateError::TooFewVertices)
    );
}

#[test]
fn separators_and_short_contours() {
    let mut v = unit_square();
    v.push(None);
    assert_eq!(contours(&v), vec![0..4]);
    assert_eq!(
        triangulate(&v, TriCfg::default()).unwrap().triangles,
        vec![[3, 0, 1], [2, 3, 1]]
    );

    // A two-vertex run between separators is skipped.
    let mut w = poly(&[[5.0, 5.0], [6.0, 5.0]]);
    w.push(None);
    w.extend(unit_square());
    assert_eq!(contours(&w), vec![3..7]);
    let t = triangulate(&w, TriCfg::default()).unwrap();
    assert_eq!(t.triangles, vec![[6, 3, 4], [5, 6, 4]]);
    assert!((polygon_area(&w) - 1.0).abs() < 1e-12);
}

#[test]
fn seeded_star_polygons_keep_their_area() {
    for index in 0..40 {
        let cfg = StarCfg {
            vertex_count: 8 + (index as usize % 5) * 9,
            ..StarCfg::default()
        };
        let v: Vec<_> = star_polygon(cfg, ReplayToken::new(9, index))
            .into_iter()
            .map(Some)
            .collect();
        let t = triangulate(&v, TriCfg::default()).unwrap();
        let want = polygon_area(&v);
        assert!(t.len() >= v.len() - 2, "#{index}: {} triangles", t.len());
        assert!(
            (t.area(&v) - want).abs() <= 0.003 * want,
            "#{index}: {:?} area {} vs {}",
            t.method,
            t.area(&v),
            want
        );
        let clipped = ear_clip(&v, usize::MAX);
        assert_eq!(clipped.len(), v.len() - 2);
        assert!((clipped.area(&v) - want).abs() <= 1e-9 * want);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn star_area_is_conserved(seed in any::<u64>(), n in 3usize..60) {
        let cfg = StarCfg { vertex_count: n, ..StarCfg::default() };
        let v: Vec<_> = star_polygon(cfg, ReplayToken::new(seed, 0))
            .into_iter()
            .map(Some)
            .collect();
        let t = triangulate(&v, TriCfg::default()).unwrap();
        let want = polygon_area(&v);
        prop_assert!(want > 0.0);
        prop_assert!((t.area(&v) - want).abs() <= 0.003 * want);
        prop_assert!(t.triangles.iter().flatten().all(|&i| i < n));
    }
}
