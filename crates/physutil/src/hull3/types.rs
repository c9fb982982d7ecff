//! Hull output, errors, and the index-arena nodes used while building.

use std::fmt;

use nalgebra::Vector3;

/// Absent link in the arenas.
pub(crate) const NIL: usize = usize::MAX;

/// Closed triangulated hull surface; triangles index the input points and wind
/// counter-clockwise seen from outside.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Hull {
    pub triangles: Vec<[usize; 3]>,
}

impl Hull {
    #[inline]
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Input indices used by at least one triangle, sorted and unique.
    pub fn vertex_indices(&self) -> Vec<usize> {
        let mut v: Vec<usize> = self.triangles.iter().flatten().copied().collect();
        v.sort_unstable();
        v.dedup();
        v
    }

    /// Every directed edge occurs once and has exactly one reversed partner.
    pub fn is_closed(&self) -> bool {
        let mut edges: Vec<(usize, usize)> = self
            .triangles
            .iter()
            .flat_map(|t| [(t[0], t[1]), (t[1], t[2]), (t[2], t[0])])
            .collect();
        edges.sort_unstable();
        if edges.windows(2).any(|w| w[0] == w[1]) {
            return false;
        }
        !edges.is_empty()
            && edges
                .iter()
                .all(|&(a, b)| edges.binary_search(&(b, a)).is_ok())
    }
}

/// Errors surfaced by the hull builder.
#[derive(Debug, Clone, PartialEq)]
pub enum HullError {
    /// Fewer than four input points.
    TooFewPoints { got: usize },
    /// The seed points are coincident, collinear or coplanar.
    DegenerateSeed,
    /// Neighbour links could not be restored while stitching a hole, or the
    /// face ring emptied out.
    BrokenTopology,
    /// Visit budget exhausted; `partial` is the surface at that moment.
    NotConverged { partial: Hull },
}

impl fmt::Display for HullError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HullError::TooFewPoints { got } => {
                write!(f, "convex hull needs at least 4 points, got {}", got)
            }
            HullError::DegenerateSeed => {
                write!(f, "initial tetrahedron is degenerate (points are coplanar)")
            }
            HullError::BrokenTopology => {
                write!(f, "hull topology broke while re-triangulating a hole")
            }
            HullError::NotConverged { partial } => write!(
                f,
                "hull did not converge within the visit budget ({} partial triangles)",
                partial.len()
            ),
        }
    }
}

impl std::error::Error for HullError {}

/// Doubly linked ring membership shared by points and faces.
pub(crate) trait Linked {
    fn links(&self) -> (usize, usize);
    fn set_links(&mut self, prev: usize, next: usize);

    #[inline]
    fn next(&self) -> usize {
        self.links().1
    }
    #[inline]
    fn prev(&self) -> usize {
        self.links().0
    }
    #[inline]
    fn set_next(&mut self, next: usize) {
        let prev = self.prev();
        self.set_links(prev, next);
    }
    #[inline]
    fn set_prev(&mut self, prev: usize) {
        let next = self.next();
        self.set_links(prev, next);
    }
}

/// Outside-point list node.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PtNode {
    pub prev: usize,
    pub next: usize,
}

impl Linked for PtNode {
    #[inline]
    fn links(&self) -> (usize, usize) {
        (self.prev, self.next)
    }
    #[inline]
    fn set_links(&mut self, prev: usize, next: usize) {
        self.prev = prev;
        self.next = next;
    }
}

/// Hull face. `buddy[k]` is the neighbour across edge `idx[k] -> idx[k+1]`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Face {
    pub idx: [usize; 3],
    pub n: Vector3<f64>,
    pub pt0: Vector3<f64>,
    pub buddy: [usize; 3],
    pub prev: usize,
    pub next: usize,
    /// Head of the outside-point ring, `NIL` when empty.
    pub outside: usize,
    pub deleted: bool,
}

impl Face {
    pub fn new(idx: [usize; 3], pos: &[Vector3<f64>]) -> Self {
        let pt0 = pos[idx[0]];
        Self {
            idx,
            n: (pos[idx[1]] - pt0).cross(&(pos[idx[2]] - pt0)),
            pt0,
            buddy: [NIL; 3],
            prev: NIL,
            next: NIL,
            outside: NIL,
            deleted: false,
        }
    }
}

impl Linked for Face {
    #[inline]
    fn links(&self) -> (usize, usize) {
        (self.prev, self.next)
    }
    #[inline]
    fn set_links(&mut self, prev: usize, next: usize) {
        self.prev = prev;
        self.next = next;
    }
}

/// Detach `i` from its ring; both links become `NIL`.
pub(crate) fn unlink<T: Linked>(arena: &mut [T], i: usize) {
    let (p, n) = arena[i].links();
    if p != NIL {
        arena[p].set_next(n);
    }
    if n != NIL {
        arena[n].set_prev(p);
    }
    arena[i].set_links(NIL, NIL);
}

/// Insert `i` right after `*head`, or start a one-element ring.
pub(crate) fn push_after<T: Linked>(arena: &mut [T], head: &mut usize, i: usize) {
    if *head == NIL {
        *head = i;
        arena[i].set_links(i, i);
    } else {
        let h = *head;
        let hn = arena[h].next();
        arena[i].set_links(h, hn);
        arena[hn].set_prev(i);
        arena[h].set_next(i);
    }
}

/// Splice the whole ring starting at `other` in after `*head`.
pub(crate) fn splice<T: Linked>(arena: &mut [T], head: &mut usize, other: usize) {
    if other == NIL {
        return;
    }
    if *head == NIL {
        *head = other;
        return;
    }
    let h = *head;
    let hn = arena[h].next();
    let tail = arena[other].prev();
    arena[hn].set_prev(tail);
    arena[tail].set_next(hn);
    arena[h].set_next(other);
    arena[other].set_prev(h);
}

/// `sgn(dp·n)(dp·n)² > sgn(e)e²|dp|²|n|²`: `dp` leaves the face plane on the
/// normal side at an angle whose sine exceeds `e`.
#[inline]
pub(crate) fn cansee(dp: &Vector3<f64>, n: &Vector3<f64>, e: f64) -> bool {
    let x = dp.dot(n);
    x * x.abs() > e * e.abs() * dp.norm_squared() * n.norm_squared()
}
