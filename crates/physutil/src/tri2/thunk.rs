//! Vertex thunks: per-vertex ring links shared by the sweep and ear clipping.
//!
//! `next[1]` follows input order around a contour, `next[0]` goes back. A
//! clipped vertex has both links set to `NIL`. Bridges add extra thunks that
//! duplicate an existing vertex (same `vtx`) on a second chain.

use std::ops::Range;

use nalgebra::Vector2;
use smallvec::SmallVec;

pub(crate) const NIL: usize = usize::MAX;

#[derive(Clone, Copy, Debug)]
pub(crate) struct Thunk {
    /// Index into the caller's vertex slice.
    pub vtx: usize,
    pub pt: Vector2<f64>,
    pub next: [usize; 2],
    pub jump: usize,
    pub processed: bool,
}

impl Thunk {
    #[inline]
    pub fn new(vtx: usize, pt: Vector2<f64>) -> Self {
        Self {
            vtx,
            pt,
            next: [NIL; 2],
            jump: NIL,
            processed: false,
        }
    }

    #[inline]
    pub fn is_live(&self) -> bool {
        self.next[0] != NIL
    }
}

/// Thunk arena; small polygons stay on the stack.
pub(crate) type Thunks = SmallVec<[Thunk; 32]>;

/// `a × b`.
#[inline]
pub(crate) fn cross(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    a.perp(&b)
}

/// Build one closed ring per range. Every index in `ranges` must hold `Some`.
pub(crate) fn link_contours(vertices: &[Option<Vector2<f64>>], ranges: &[Range<usize>]) -> Thunks {
    let mut th = Thunks::new();
    for r in ranges {
        let first = th.len();
        th.extend(
            r.clone()
                .filter_map(|i| vertices[i].map(|p| Thunk::new(i, p))),
        );
        let last = th.len() - 1;
        for t in first..=last {
            th[t].next[0] = if t == first { last } else { t - 1 };
            th[t].next[1] = if t == last { first } else { t + 1 };
        }
    }
    th
}

/// Link every `Some` vertex into a single ring, ignoring separators.
pub(crate) fn link_all(vertices: &[Option<Vector2<f64>>]) -> Thunks {
    let mut th: Thunks = vertices
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|p| Thunk::new(i, p)))
        .collect();
    let n = th.len();
    for t in 0..n {
        th[t].next[0] = (t + n - 1) % n;
        th[t].next[1] = (t + 1) % n;
    }
    th
}

/// Twice the signed area of each ring in `link_contours` order.
pub(crate) fn ring_areas(th: &Thunks, ranges: &[Range<usize>]) -> SmallVec<[f64; 8]> {
    let mut start = 0;
    ranges
        .iter()
        .map(|r| {
            let n = r.len();
            let a = (start..start + n)
                .map(|t| cross(th[t].pt, th[th[t].next[1]].pt))
                .sum();
            start += n;
            a
        })
        .collect()
}
