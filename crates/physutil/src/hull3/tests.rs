use super::*;
use crate::sample::{point_cloud, CloudCfg, CloudShape, ReplayToken};
use nalgebra::Vector3;
use proptest::prelude::*;

fn cube_corners() -> Vec<Vector3<f64>> {
    // index = 4x + 2y + z
    (0..8)
        .map(|i| Vector3::new((i >> 2 & 1) as f64, (i >> 1 & 1) as f64, (i & 1) as f64))
        .collect()
}

/// Max signed distance of any input point outside any hull face, relative to
/// the cloud's extent.
fn worst_outside(points: &[Vector3<f64>], hull: &Hull) -> f64 {
    let extent = points
        .iter()
        .flat_map(|p| points.iter().map(move |q| (p - q).amax()))
        .fold(0.0, f64::max);
    let mut worst = f64::NEG_INFINITY;
    for t in &hull.triangles {
        let a = points[t[0]];
        let n = (points[t[1]] - a).cross(&(points[t[2]] - a));
        let len = n.norm();
        if len == 0.0 {
            continue;
        }
        for p in points {
            worst = worst.max((p - a).dot(&n) / len / extent);
        }
    }
    worst
}

#[test]
fn cube_has_twelve_outward_triangles() {
    let pts = cube_corners();
    let hull = convex_hull(pts.as_slice()).unwrap();
    assert_eq!(hull.len(), 12);
    assert!(hull.is_closed());
    assert_eq!(hull.vertex_indices(), (0..8).collect::<Vec<_>>());
    for v in 0..8 {
        let uses = hull.triangles.iter().filter(|t| t.contains(&v)).count();
        assert!(uses >= 3, "vertex {v} in {uses} triangles");
    }
    assert!(worst_outside(&pts, &hull) <= 1e-12);
    // Outward: every normal points away from the centre.
    let c = Vector3::new(0.5, 0.5, 0.5);
    for t in &hull.triangles {
        let a = pts[t[0]];
        let n = (pts[t[1]] - a).cross(&(pts[t[2]] - a));
        assert!((a - c).dot(&n) > 0.0);
    }
}

#[test]
fn interior_points_are_not_vertices() {
    let mut pts = cube_corners();
    pts.push(Vector3::new(0.5, 0.5, 0.5));
    pts.push(Vector3::new(0.25, 0.75, 0.5));
    let hull = convex_hull(pts.as_slice()).unwrap();
    assert_eq!(hull.len(), 12);
    assert_eq!(hull.vertex_indices(), (0..8).collect::<Vec<_>>());
}

#[test]
fn tetrahedron_only() {
    let pts = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
    let hull = convex_hull(&pts[..]).unwrap();
    assert_eq!(hull.len(), 4);
    assert!(hull.is_closed());
}

#[test]
fn too_few_points() {
    let pts = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
    assert_eq!(
        convex_hull(&pts[..]),
        Err(HullError::TooFewPoints { got: 3 })
    );
}

#[test]
fn coplanar_and_coincident_input_is_rejected() {
    let grid: Vec<[f64; 3]> = (0..16)
        .map(|i| [(i % 4) as f64, (i / 4) as f64, 0.0])
        .collect();
    assert_eq!(convex_hull(&grid[..]), Err(HullError::DegenerateSeed));

    let line: Vec<[f64; 3]> = (0..6).map(|i| [i as f64, 2.0 * i as f64, 1.0]).collect();
    assert_eq!(convex_hull(&line[..]), Err(HullError::DegenerateSeed));

    let same = vec![[1.0, 2.0, 3.0]; 5];
    assert_eq!(convex_hull(&same[..]), Err(HullError::DegenerateSeed));
}

#[test]
fn strided_source_reads_embedded_positions() {
    // Records of (u, x, y, z, w).
    let mut data = Vec::new();
    for p in cube_corners() {
        data.extend_from_slice(&[-7.0, p.x, p.y, p.z, 9.0]);
    }
    let src = Strided::with_offset(&data, 1, 5).unwrap();
    assert_eq!(src.len(), 8);
    assert_eq!(src.point(3), Vector3::new(0.0, 1.0, 1.0));
    let hull = convex_hull(&src).unwrap();
    assert_eq!(hull.len(), 12);

    assert!(Strided::new(&data, 2).is_none());
    assert!(Strided::with_offset(&data[..3], 1, 3).is_none());
    assert_eq!(Strided::new(&data[..3], 3).map(|s| s.len()), Some(1));
}

#[test]
fn builder_reuses_scratch_and_output() {
    let mut qh = QuickHull::new(HullCfg::default());
    let mut out = vec![[99, 99, 99]];
    let cube = cube_corners();
    assert_eq!(qh.build_into(cube.as_slice(), &mut out).unwrap(), 12);
    assert_eq!(out.len(), 12);
    let cloud = point_cloud(CloudCfg::default(), ReplayToken::new(5, 0));
    let n = qh.build_into(cloud.as_slice(), &mut out).unwrap();
    assert_eq!(n, out.len());
    assert!(Hull { triangles: out }.is_closed());
}

#[test]
fn visit_budget_reports_partial_surface() {
    let cfg = HullCfg {
        max_iter_factor: 0,
        ..HullCfg::default()
    };
    let cube = cube_corners();
    match QuickHull::new(cfg).build(cube.as_slice()) {
        Err(HullError::NotConverged { partial }) => assert_eq!(partial.len(), 4),
        other => panic!("expected NotConverged, got {other:?}"),
    }
}

#[test]
fn sphere_points_are_mostly_vertices() {
    let cfg = CloudCfg {
        count: 200,
        shape: CloudShape::Sphere,
        radius: 3.0,
    };
    let pts = point_cloud(cfg, ReplayToken::new(2024, 1));
    let hull = convex_hull(pts.as_slice()).unwrap();
    assert!(hull.is_closed());
    // Euler: a closed triangulated sphere with V vertices has 2V - 4 faces.
    let v = hull.vertex_indices().len();
    assert_eq!(hull.len(), 2 * v - 4);
    assert!(v > 160, "only {v} of 200 sphere points on the hull");
}

#[test]
fn seeded_clouds_are_convex_and_closed() {
    let mut qh = QuickHull::new(HullCfg::default());
    for index in 0..24 {
        for shape in [CloudShape::Cube, CloudShape::Ball] {
            let cfg = CloudCfg {
                count: 150,
                shape,
                radius: 10.0,
            };
            let pts = point_cloud(cfg, ReplayToken::new(77, index));
            let hull = qh.build(pts.as_slice()).unwrap();
            assert!(hull.is_closed(), "{shape:?} #{index}");
            assert_eq!(hull.len(), 2 * hull.vertex_indices().len() - 4);
            assert!(worst_outside(&pts, &hull) < 1e-2, "{shape:?} #{index}");
        }
    }
}

#[test]
fn dense_spheres_stay_within_tolerance() {
    let mut qh = QuickHull::new(HullCfg::default());
    for index in 0..40 {
        let cfg = CloudCfg {
            count: 500,
            shape: CloudShape::Sphere,
            radius: 1.0,
        };
        let pts = point_cloud(cfg, ReplayToken::new(500, index));
        let hull = qh.build(pts.as_slice()).unwrap();
        assert!(hull.is_closed(), "#{index}");
        let worst = worst_outside(&pts, &hull);
        assert!(worst < 1e-2, "#{index}: {worst}");
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn hull_encloses_random_clouds(
        pts in prop::collection::vec(prop::array::uniform3(-100.0f64..100.0), 8..80),
    ) {
        let points: Vec<Vector3<f64>> = pts.iter().map(|&p| Vector3::from(p)).collect();
        let hull = convex_hull(points.as_slice()).unwrap();
        prop_assert!(hull.is_closed());
        prop_assert!(worst_outside(&points, &hull) < 1e-2);
        prop_assert!(hull.vertex_indices().len() >= 4);
    }
}
