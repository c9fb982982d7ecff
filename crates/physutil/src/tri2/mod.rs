//! 2D polygon triangulation: monotone sweep with sag bridging.
//!
//! Purpose
//! - Triangulate polygons with holes given as separator-joined contours
//!   (`None` between contours): outer rings counter-clockwise, holes clockwise.
//!
//! Approach
//! - Classify each vertex as a bottom (local minimum, convex) or a sag
//!   (local minimum, reflex) inside a small height band.
//! - Sweep upward from every bottom between two chain bounds, clipping convex
//!   corners; sags met inside the region are bridged to the current pinnacle.
//! - Validate triangle count and area. Single contours fall back to O(n²) ear
//!   clipping; multi-contour failures, and ear clipping that cannot cover a
//!   contour, are reported as `Unreliable`.
//!
//! Layout
//! - `cfg`: tolerance constants and `TriCfg`.
//! - `types`: `Triangulation`, `Method`, `TriangulateError`.
//! - `thunk`: ring arena shared by both algorithms.
//! - `sweep`, `earclip`: the two algorithms.

mod cfg;
mod earclip;
mod sweep;
mod thunk;
mod types;

use std::ops::Range;

use nalgebra::Vector2;
use tracing::{debug, warn};

pub use cfg::TriCfg;
pub use types::{Method, TriangulateError, Triangulation};

use thunk::{link_all, link_contours, ring_areas};

/// Maximal runs of `Some` with at least three vertices.
pub fn contours(vertices: &[Option<Vector2<f64>>]) -> Vec<Range<usize>> {
    let mut out = Vec::new();
    let mut start = 0;
    for (i, v) in vertices.iter().enumerate() {
        if v.is_none() {
            if i - start >= 3 {
                out.push(start..i);
            }
            start = i + 1;
        }
    }
    if vertices.len().saturating_sub(start) >= 3 {
        out.push(start..vertices.len());
    }
    out
}

/// Signed area of all contours; counter-clockwise rings count positive.
pub fn polygon_area(vertices: &[Option<Vector2<f64>>]) -> f64 {
    let ranges = contours(vertices);
    let th = link_contours(vertices, &ranges);
    ring_areas(&th, &ranges).iter().sum::<f64>() * 0.5
}

/// Ear-clip every `Some` vertex as one ring, ignoring separators.
///
/// Stops silently after `max_triangles`.
pub fn ear_clip(vertices: &[Option<Vector2<f64>>], max_triangles: usize) -> Triangulation {
    let (triangles, _) = earclip::clip_ears(link_all(vertices), max_triangles);
    Triangulation {
        triangles,
        method: Method::EarClip,
    }
}

/// Triangulate separator-joined contours.
///
/// Returned indices refer to `vertices`. All-counter-clockwise input with
/// several contours is treated as disjoint polygons.
pub fn triangulate(
    vertices: &[Option<Vector2<f64>>],
    cfg: TriCfg,
) -> Result<Triangulation, TriangulateError> {
    let ranges = contours(vertices);
    if ranges.is_empty() {
        return Err(TriangulateError::TooFewVertices);
    }
    let cap = cfg.max_triangles;
    let th = link_contours(vertices, &ranges);
    let areas = ring_areas(&th, &ranges);

    if ranges.len() == 1 && cfg.force_ear_clipping {
        return clip_single(vertices, th, cap, areas[0]);
    }

    if ranges.len() > 1 && areas.iter().all(|&a| a > 0.0) {
        return per_contour(vertices, &ranges, cfg);
    }

    let (ymin, ymax) = th
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), t| {
            (lo.min(t.pt.y), hi.max(t.pt.y))
        });
    let e = (ymax - ymin) * cfg.height_eps_frac;
    let nverts = th.len();
    let out = sweep::sweep(th, e, &cfg, cap);
    if out.capped {
        return Err(TriangulateError::CapacityExceeded {
            partial: Triangulation {
                triangles: out.triangles,
                method: Method::Sweep,
            },
        });
    }

    let area_in2: f64 = areas.iter().sum();
    let expected_min = nverts.saturating_sub(2 * ranges.len());
    let short = out.triangles.len() < expected_min;
    let mismatch = (area_in2 - out.area2).abs() > cfg.area_tolerance * area_in2.abs();

    if ranges.len() == 1 {
        if short || mismatch || out.degenerate > 0 {
            debug!(
                triangles = out.triangles.len(),
                expected_min,
                degenerate = out.degenerate,
                "sweep rejected, ear clipping"
            );
            let th = link_contours(vertices, &ranges);
            return clip_single(vertices, th, cap, area_in2);
        }
    } else if short || mismatch {
        warn!(
            contours = ranges.len(),
            triangles = out.triangles.len(),
            expected_min,
            input_area = area_in2 * 0.5,
            output_area = out.area2 * 0.5,
            "multi-contour triangulation failed its checks"
        );
        return Err(TriangulateError::Unreliable {
            partial: Triangulation {
                triangles: out.triangles,
                method: Method::Sweep,
            },
            expected_min,
            input_area: area_in2 * 0.5,
            output_area: out.area2 * 0.5,
        });
    }

    Ok(Triangulation {
        triangles: out.triangles,
        method: Method::Sweep,
    })
}

/// Ear-clip one ring. Fewer than `n - 2` triangles (clockwise or
/// self-overlapping input) is reported as `Unreliable`.
fn clip_single(
    vertices: &[Option<Vector2<f64>>],
    th: thunk::Thunks,
    cap: usize,
    area_in2: f64,
) -> Result<Triangulation, TriangulateError> {
    let expected_min = th.len().saturating_sub(2);
    let (triangles, capped) = earclip::clip_ears(th, cap);
    let tri = Triangulation {
        triangles,
        method: Method::EarClip,
    };
    if capped {
        return Err(TriangulateError::CapacityExceeded { partial: tri });
    }
    if tri.len() < expected_min {
        let output_area = tri.area(vertices);
        warn!(
            triangles = tri.len(),
            expected_min,
            "ear clipping stalled, contour is not counter-clockwise and simple"
        );
        return Err(TriangulateError::Unreliable {
            partial: tri,
            expected_min,
            input_area: area_in2 * 0.5,
            output_area,
        });
    }
    Ok(tri)
}

/// Triangulate each contour on its own and merge with shifted indices.
fn per_contour(
    vertices: &[Option<Vector2<f64>>],
    ranges: &[Range<usize>],
    cfg: TriCfg,
) -> Result<Triangulation, TriangulateError> {
    let mut triangles: Vec<[usize; 3]> = Vec::new();
    for r in ranges {
        let sub = TriCfg {
            max_triangles: cfg.max_triangles - triangles.len(),
            ..cfg
        };
        let shift = |t: [usize; 3]| t.map(|i| i + r.start);
        match triangulate(&vertices[r.clone()], sub) {
            Ok(t) => triangles.extend(t.triangles.into_iter().map(shift)),
            Err(TriangulateError::CapacityExceeded { partial }) => {
                triangles.extend(partial.triangles.into_iter().map(shift));
                return Err(TriangulateError::CapacityExceeded {
                    partial: Triangulation {
                        triangles,
                        method: Method::PerContour,
                    },
                });
            }
            Err(TriangulateError::Unreliable {
                partial,
                expected_min,
                input_area,
                output_area,
            }) => {
                return Err(TriangulateError::Unreliable {
                    partial: Triangulation {
                        triangles: partial.triangles.into_iter().map(shift).collect(),
                        method: partial.method,
                    },
                    expected_min,
                    input_area,
                    output_area,
                });
            }
            Err(err) => return Err(err),
        }
    }
    Ok(Triangulation {
        triangles,
        method: Method::PerContour,
    })
}

#[cfg(test)]
mod tests;
