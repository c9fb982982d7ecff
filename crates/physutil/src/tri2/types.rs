//! Triangulation output and errors.

use std::fmt;

use nalgebra::Vector2;

/// Which algorithm produced a triangulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    /// Monotone sweep over all contours at once.
    Sweep,
    /// Each contour triangulated on its own (all contours counter-clockwise).
    PerContour,
    /// Ear clipping, used when the sweep result failed its checks.
    EarClip,
}

/// Triangles as input indices; counter-clockwise for counter-clockwise input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Triangulation {
    pub triangles: Vec<[usize; 3]>,
    pub method: Method,
}

impl Triangulation {
    #[inline]
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Sum of signed triangle areas measured on `vertices`. Triangles touching
    /// a separator or an out-of-range index contribute nothing.
    pub fn area(&self, vertices: &[Option<Vector2<f64>>]) -> f64 {
        let at = |i: usize| vertices.get(i).copied().flatten();
        self.triangles
            .iter()
            .filter_map(|t| {
                let (a, b, c) = (at(t[0])?, at(t[1])?, at(t[2])?);
                Some((b - a).perp(&(c - a)) * 0.5)
            })
            .sum()
    }
}

/// Errors surfaced by the triangulator.
#[derive(Clone, Debug, PartialEq)]
pub enum TriangulateError {
    /// No contour has three or more vertices.
    TooFewVertices,
    /// `max_triangles` ran out before the polygon was covered.
    CapacityExceeded { partial: Triangulation },
    /// Multi-contour sweep output failed its count or area check, or ear
    /// clipping covered fewer than `n - 2` triangles of a single contour.
    Unreliable {
        partial: Triangulation,
        expected_min: usize,
        input_area: f64,
        output_area: f64,
    },
}

impl fmt::Display for TriangulateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriangulateError::TooFewVertices => {
                write!(f, "polygon has no contour with at least 3 vertices")
            }
            TriangulateError::CapacityExceeded { partial } => write!(
                f,
                "triangle capacity exhausted after {} triangles",
                partial.len()
            ),
            TriangulateError::Unreliable {
                partial,
                expected_min,
                input_area,
                output_area,
            } => write!(
                f,
                "triangulation unreliable: {} triangles (expected at least {}), area {} vs input {}",
                partial.len(),
                expected_min,
                output_area,
                input_area
            ),
        }
    }
}

impl std::error::Error for TriangulateError {}
