//! Incremental quickhull over index arenas.
//!
//! Faces live in `faces` and are chained into the active ring through their
//! `prev/next` links; each face owns a ring of outside points (`pts` arena).
//! Deleted faces stay in the arena with `deleted = true` so neighbour indices
//! never dangle. All scratch storage belongs to the builder and is reused
//! across calls.

use nalgebra::Vector3;
use tracing::{debug, warn};

use super::cfg::HullCfg;
use super::source::PointSource;
use super::types::{cansee, push_after, splice, unlink, Face, Hull, HullError, PtNode, NIL};

/// Reusable quickhull builder.
#[derive(Clone, Debug, Default)]
pub struct QuickHull {
    cfg: HullCfg,
    pos: Vec<Vector3<f64>>,
    pts: Vec<PtNode>,
    faces: Vec<Face>,
    stack: Vec<usize>,
    live: Vec<usize>,
    fan: Vec<usize>,
    order: Vec<(usize, usize)>,
}

/// Ring cursors that must skip faces as they are deleted.
struct Cursors {
    start: usize,
    resume: usize,
    active: usize,
    /// Outside points of deleted faces, waiting to be re-associated.
    orphans: usize,
}

impl QuickHull {
    pub fn new(cfg: HullCfg) -> Self {
        Self {
            cfg,
            ..Self::default()
        }
    }

    #[inline]
    pub fn cfg(&self) -> &HullCfg {
        &self.cfg
    }

    /// Build the hull of `points`.
    pub fn build<P: PointSource + ?Sized>(&mut self, points: &P) -> Result<Hull, HullError> {
        let mut triangles = Vec::new();
        self.build_into(points, &mut triangles)?;
        Ok(Hull { triangles })
    }

    /// Build into a caller-owned buffer (cleared first); returns the triangle
    /// count. On `NotConverged` the buffer is left empty and the partial
    /// surface travels in the error.
    pub fn build_into<P: PointSource + ?Sized>(
        &mut self,
        points: &P,
        out: &mut Vec<[usize; 3]>,
    ) -> Result<usize, HullError> {
        out.clear();
        let npts = points.len();
        if npts < 4 {
            return Err(HullError::TooFewPoints { got: npts });
        }
        self.pos.clear();
        self.pos.extend((0..npts).map(|i| points.point(i)));

        let seeds = self.select_seeds()?;
        let mut cur = self.init_tetrahedron(seeds)?;

        let max_iter = self.cfg.max_iter_factor.saturating_mul(npts).saturating_mul(npts);
        let mut tr = cur.start;
        let mut idle = 0usize;
        let mut iter = 0usize;
        loop {
            if iter >= max_iter {
                let partial = Hull {
                    triangles: self.collect_ring(cur.start),
                };
                warn!(
                    points = npts,
                    triangles = partial.len(),
                    "convex hull hit its visit budget"
                );
                return Err(HullError::NotConverged { partial });
            }
            iter += 1;

            if self.faces[tr].outside == NIL {
                idle += 1;
                if idle >= cur.active {
                    break;
                }
                tr = self.faces[tr].next;
                continue;
            }
            idle = 0;
            cur.resume = self.faces[tr].next;
            self.add_point(tr, &mut cur)?;
            tr = cur.resume;
        }

        out.extend(self.collect_ring(cur.start));
        debug!(points = npts, triangles = out.len(), visits = iter, "convex hull built");
        Ok(out.len())
    }

    /// `b0` leftmost; `b1` farthest from `b0`; `b2` farthest from line `b0 b1`;
    /// `b3` farthest from plane `b0 b1 b2`.
    fn select_seeds(&self) -> Result<[usize; 4], HullError> {
        let pos = &self.pos;
        let argmax = |key: &dyn Fn(&Vector3<f64>) -> f64| {
            let mut best = 0;
            let mut best_key = key(&pos[0]);
            for (i, p) in pos.iter().enumerate().skip(1) {
                let k = key(p);
                if k > best_key {
                    best = i;
                    best_key = k;
                }
            }
            best
        };

        let b0 = argmax(&|p| -p.x);
        let p0 = pos[b0];
        let b1 = argmax(&|p| (p - p0).norm_squared());
        let axis = pos[b1] - p0;
        let b2 = argmax(&|p| axis.cross(&(p - p0)).norm_squared());
        let norm = axis.cross(&(pos[b2] - p0));
        let b3 = argmax(&|p| (p - p0).dot(&norm).abs());

        let s2 = axis.norm_squared();
        let eps2 = self.cfg.seed_eps * self.cfg.seed_eps;
        let height = (pos[b3] - p0).dot(&norm);
        if !(s2 > 0.0) || norm.norm_squared() <= eps2 * s2 * s2 || height * height <= eps2 * s2 * s2 * s2
        {
            debug!(seeds = ?[b0, b1, b2, b3], "rejected degenerate hull seed");
            return Err(HullError::DegenerateSeed);
        }
        Ok(if height > 0.0 {
            [b0, b2, b1, b3]
        } else {
            [b0, b1, b2, b3]
        })
    }

    /// Four outward faces, reciprocal buddies, and the first point association.
    fn init_tetrahedron(&mut self, seeds: [usize; 4]) -> Result<Cursors, HullError> {
        let npts = self.pos.len();
        self.pts.clear();
        self.pts.extend((0..npts).map(|i| PtNode {
            prev: if i == 0 { npts - 1 } else { i - 1 },
            next: if i + 1 == npts { 0 } else { i + 1 },
        }));
        for &s in &seeds {
            unlink(&mut self.pts, s);
        }

        self.faces.clear();
        let mut cur = Cursors {
            start: NIL,
            resume: NIL,
            active: 0,
            orphans: NIL,
        };
        let p0 = self.pos[seeds[0]];
        let s2 = seeds[1..]
            .iter()
            .map(|&s| (self.pos[s] - p0).norm_squared())
            .fold(0.0, f64::max);
        let min_n2 = self.cfg.seed_eps * self.cfg.seed_eps * s2 * s2;
        for i in 0..4 {
            let mut idx = [0; 3];
            for (slot, (_, &s)) in seeds.iter().enumerate().filter(|&(j, _)| j != i).enumerate() {
                idx[slot] = s;
            }
            let mut face = Face::new(idx, &self.pos);
            if (self.pos[seeds[i]] - face.pt0).dot(&face.n) > 0.0 {
                face.idx.swap(0, 2);
                face.n = -face.n;
            }
            if face.n.norm_squared() < min_n2 {
                debug!(face = i, "rejected hull seed with a degenerate face");
                return Err(HullError::DegenerateSeed);
            }
            self.faces.push(face);
            push_after(&mut self.faces, &mut cur.start, i);
            cur.active += 1;
        }
        for i in 0..4 {
            for j in (0..4).filter(|&j| j != i) {
                for k in 0..3 {
                    let a = self.faces[i].idx[k];
                    let b = self.faces[i].idx[(k + 1) % 3];
                    let other = &self.faces[j].idx;
                    if (0..3).any(|t| other[t] == a && other[(t + 2) % 3] == b) {
                        self.faces[i].buddy[k] = j;
                    }
                }
            }
        }

        let head = (0..npts).find(|&i| self.pts[i].next != NIL).unwrap_or(NIL);
        self.associate(head, cur.start);
        Ok(cur)
    }

    /// Move every point of the ring `head` to the first face of ring `faces`
    /// that sees it; points no face sees are interior and dropped.
    fn associate(&mut self, head: usize, faces: usize) {
        if head == NIL || faces == NIL {
            return;
        }
        let eps = self.cfg.visibility_eps;
        let last = self.pts[head].prev;
        let mut pt = head;
        loop {
            let next = self.pts[pt].next;
            unlink(&mut self.pts, pt);
            let p = self.pos[pt];
            let mut f = faces;
            loop {
                let face = &self.faces[f];
                if cansee(&(p - face.pt0), &face.n, eps) {
                    let mut outside = face.outside;
                    push_after(&mut self.pts, &mut outside, pt);
                    self.faces[f].outside = outside;
                    break;
                }
                f = face.next;
                if f == faces {
                    break;
                }
            }
            if pt == last {
                break;
            }
            pt = next;
        }
    }

    /// Remove face `f` from the active ring, keeping cursors on live faces.
    /// Deleting an already deleted face is a no-op.
    fn delete_face(&mut self, f: usize, cur: &mut Cursors) {
        if self.faces[f].deleted {
            return;
        }
        let outside = std::mem::replace(&mut self.faces[f].outside, NIL);
        splice(&mut self.pts, &mut cur.orphans, outside);
        let next = match self.faces[f].next {
            n if n == f => NIL,
            n => n,
        };
        if cur.start == f {
            cur.start = next;
        }
        if cur.resume == f {
            cur.resume = next;
        }
        unlink(&mut self.faces, f);
        self.faces[f].deleted = true;
        cur.active -= 1;
    }

    /// Grow the hull by the farthest outside point of face `tr`.
    fn add_point(&mut self, tr: usize, cur: &mut Cursors) -> Result<(), HullError> {
        let ptmax = self.take_farthest(tr);
        let p = self.pos[ptmax];
        cur.orphans = NIL;

        // Face seeing the point most confidently.
        let mut best = cur.start;
        let mut best_d = f64::NEG_INFINITY;
        let mut f = cur.start;
        loop {
            let d = (p - self.faces[f].pt0).dot(&self.faces[f].n);
            if d > best_d {
                best_d = d;
                best = f;
            }
            f = self.faces[f].next;
            if f == cur.start {
                break;
            }
        }

        // Flood-fill everything strictly visible around it.
        self.delete_face(best, cur);
        self.stack.clear();
        self.stack.push(best);
        while let Some(f) = self.stack.pop() {
            for k in 0..3 {
                let b = self.faces[f].buddy[k];
                let face = &self.faces[b];
                if !face.deleted && cansee(&(p - face.pt0), &face.n, 0.0) {
                    self.delete_face(b, cur);
                    self.stack.push(b);
                }
            }
        }

        self.widen_hole(p, cur);
        if cur.start == NIL {
            warn!(point = ptmax, "convex hull face ring collapsed");
            return Err(HullError::BrokenTopology);
        }

        let new_ring = self.stitch(ptmax, cur)?;
        let orphans = std::mem::replace(&mut cur.orphans, NIL);
        self.associate(orphans, new_ring);
        splice(&mut self.faces, &mut cur.resume, new_ring);
        Ok(())
    }

    /// Detach and return the outside point of `tr` farthest along its normal.
    fn take_farthest(&mut self, tr: usize) -> usize {
        let head = self.faces[tr].outside;
        let n = self.faces[tr].n;
        let mut best = head;
        let mut best_d = f64::NEG_INFINITY;
        let mut pt = head;
        loop {
            let d = self.pos[pt].dot(&n);
            if d > best_d {
                best_d = d;
                best = pt;
            }
            pt = self.pts[pt].next;
            if pt == head {
                break;
            }
        }
        let mut head = head;
        if head == best {
            head = self.pts[best].next;
        }
        unlink(&mut self.pts, best);
        if head == best {
            head = NIL;
        }
        self.faces[tr].outside = head;
        best
    }

    /// Delete near-visible faces bordering the hole until it is stable: faces
    /// with two or more deleted neighbours, and edge fans that close on a
    /// different deleted face.
    fn widen_hole(&mut self, p: Vector3<f64>, cur: &mut Cursors) {
        let near = self.cfg.near_visible_eps;
        loop {
            if cur.start == NIL {
                return;
            }
            self.collect_live(cur.start);
            let mut changed = false;
            for li in 0..self.live.len() {
                let tr = self.live[li];
                let face = self.faces[tr];
                if face.deleted || !cansee(&(p - face.pt0), &face.n, near) {
                    continue;
                }
                let dead = face.buddy.map(|b| self.faces[b].deleted);
                match dead.iter().filter(|&&d| d).count() {
                    0 => {}
                    1 => {
                        let Some(bi0) = dead.iter().position(|&d| d) else {
                            continue;
                        };
                        for step in [2, 1] {
                            if self.walk_fan(p, tr, bi0, step) {
                                for fi in 0..self.fan.len() {
                                    let f = self.fan[fi];
                                    self.delete_face(f, cur);
                                }
                                changed = true;
                            }
                        }
                    }
                    _ => {
                        self.delete_face(tr, cur);
                        changed = true;
                    }
                }
            }
            if !changed {
                return;
            }
        }
    }

    /// Walk the fan around the end of edge `bi0` of `tr` (`step` 1 or 2 picks
    /// the direction), collecting faces into `self.fan`. True when the walk
    /// ends on a deleted face other than `tr`'s deleted neighbour.
    fn walk_fan(&mut self, p: Vector3<f64>, tr: usize, bi0: usize, step: usize) -> bool {
        self.fan.clear();
        let mut t1 = tr;
        let mut b1 = bi0;
        loop {
            if self.fan.len() == self.cfg.fan_limit {
                return false;
            }
            let bi = (b1 + step) % 3;
            let nb = self.faces[t1].buddy[bi];
            let Some(back) = (0..3).find(|&k| self.faces[nb].buddy[k] == t1) else {
                return false;
            };
            self.fan.push(t1);
            t1 = nb;
            b1 = back;
            let face = &self.faces[t1];
            if !cansee(&(p - face.pt0), &face.n, self.cfg.fan_eps) {
                return false;
            }
            if face.deleted {
                return t1 != self.faces[tr].buddy[bi0];
            }
        }
    }

    /// One new face per hole boundary edge, buddies resolved by matching each
    /// face's `idx[1]` against the sorted `idx[2]` of the others.
    fn stitch(&mut self, apex: usize, cur: &mut Cursors) -> Result<usize, HullError> {
        let mut new_ring = NIL;
        let first_new = self.faces.len();
        self.collect_live(cur.start);
        for li in 0..self.live.len() {
            let tr = self.live[li];
            for i in 0..3 {
                if !self.faces[self.faces[tr].buddy[i]].deleted {
                    continue;
                }
                let idx = self.faces[tr].idx;
                let mut face = Face::new([apex, idx[(i + 1) % 3], idx[i]], &self.pos);
                face.buddy[1] = tr;
                let id = self.faces.len();
                self.faces.push(face);
                self.faces[tr].buddy[i] = id;
                push_after(&mut self.faces, &mut new_ring, id);
            }
        }

        self.order.clear();
        self.order
            .extend((first_new..self.faces.len()).map(|f| (self.faces[f].idx[2], f)));
        self.order.sort_unstable();
        for f in first_new..self.faces.len() {
            let key = self.faces[f].idx[1];
            let Ok(pos) = self.order.binary_search_by_key(&key, |&(k, _)| k) else {
                warn!(vertex = key, "hull hole boundary is not a single loop");
                return Err(HullError::BrokenTopology);
            };
            let g = self.order[pos].1;
            self.faces[f].buddy[0] = g;
            self.faces[g].buddy[2] = f;
        }
        for f in first_new..self.faces.len() {
            let [b0, _, b2] = self.faces[f].buddy;
            if b0 == NIL || b2 == NIL || self.faces[b0].buddy[2] != f {
                warn!("hull hole stitching left an open edge");
                return Err(HullError::BrokenTopology);
            }
        }
        cur.active += self.faces.len() - first_new;
        Ok(new_ring)
    }

    fn collect_live(&mut self, start: usize) {
        self.live.clear();
        if start == NIL {
            return;
        }
        let mut f = start;
        loop {
            self.live.push(f);
            f = self.faces[f].next;
            if f == start {
                break;
            }
        }
    }

    fn collect_ring(&mut self, start: usize) -> Vec<[usize; 3]> {
        self.collect_live(start);
        self.live.iter().map(|&f| self.faces[f].idx).collect()
    }
}
