//! Bottom-up monotone sweep with sag bridging.
//!
//! The sweep grows a region upward from each *bottom* vertex between a left
//! bound (walking `next[0]`) and a right bound (walking `next[1]`), emitting
//! triangles whenever the lower successor makes a convex turn. A *sag*
//! (downward notch, including hole bottoms) that falls inside the region is
//! bridged to the current pinnacle with two duplicate thunks, which splits the
//! ring so the sweep can continue on both sides.

use smallvec::SmallVec;

use super::cfg::TriCfg;
use super::thunk::{cross, Thunk, Thunks, NIL};

/// Raw sweep result before validation.
pub(crate) struct SweepOutcome {
    pub triangles: Vec<[usize; 3]>,
    /// Twice the signed output area.
    pub area2: f64,
    pub degenerate: usize,
    /// The output cap stopped the sweep while triangles were still pending.
    pub capped: bool,
}

/// Open interval between `a` and `b`, either order.
#[inline]
fn inrange(x: f64, a: f64, b: f64) -> bool {
    (a + b - 2.0 * x).abs() < (a - b).abs()
}

/// Sweep over linked rings in `th`. `e` is the absolute height epsilon.
pub(crate) fn sweep(mut th: Thunks, e: f64, cfg: &TriCfg, cap: usize) -> SweepOutcome {
    let mut bottoms: SmallVec<[usize; 16]> = SmallVec::new();
    let mut sags: SmallVec<[usize; 16]> = SmallVec::new();
    for t in 0..th.len() {
        let p = th[t].pt;
        let n1 = th[th[t].next[1]].pt;
        let n0 = th[th[t].next[0]].pt;
        let low = n1.y.min(n0.y);
        if low > p.y - e {
            if cross(n1 - p, n0 - p) >= 0.0 {
                bottoms.push(t);
            } else if low > p.y + e {
                sags.push(t);
            }
        }
    }

    let ratio2 = cfg.degenerate_ratio * cfg.degenerate_ratio;
    let mut out = SweepOutcome {
        triangles: Vec::new(),
        area2: 0.0,
        degenerate: 0,
        capped: false,
    };
    let mut ibottom = 0;
    let mut bounds = [NIL; 2];
    let mut prev_bounds = [NIL; 2];
    let mut pinnacle = NIL;
    let mut prev_sags = sags.len();
    // Every pass spends budget, including restarts after a top parks a jump.
    let mut iter = th.len() * 4;

    'sweep: while iter > 0 {
        iter -= 1;
        'step: {
            if bounds[0] == NIL {
                while ibottom < bottoms.len() && !th[bottoms[ibottom]].is_live() {
                    ibottom += 1;
                }
                let Some(&b) = bottoms.get(ibottom) else {
                    break 'sweep;
                };
                ibottom += 1;
                bounds = [b, b];
                pinnacle = b;
            }
            th[bounds[0]].processed = true;
            th[bounds[1]].processed = true;
            if (bounds == prev_bounds && sags.len() == prev_sags)
                || !th[bounds[0]].is_live()
                || !th[bounds[1]].is_live()
            {
                bounds = [NIL; 2];
                break 'step;
            }
            prev_bounds = bounds;
            prev_sags = sags.len();

            // A bound at a convex top either resumes along its jump chain or
            // parks a jump to the opposite bound and restarts.
            for i in 0..2 {
                let b = bounds[i];
                let p = th[b].pt;
                let n0 = th[th[b].next[0]].pt;
                let n1 = th[th[b].next[1]].pt;
                if n0.y < p.y && n1.y <= p.y && cross(n0 - p, n1 - p) > 0.0 {
                    if th[b].jump == NIL {
                        th[b].jump = bounds[i ^ 1];
                        bounds = [NIL; 2];
                        continue 'sweep;
                    }
                    while th[bounds[i]].jump != NIL {
                        let j = th[bounds[i]].jump;
                        th[bounds[i]].jump = NIL;
                        bounds[i] = j;
                    }
                    if !th[bounds[0]].is_live() || !th[bounds[1]].is_live() {
                        bounds = [NIL; 2];
                        continue 'sweep;
                    }
                }
            }

            let [b0, b1] = bounds;
            let b0n = th[b0].next[0];
            let b1n = th[b1].next[1];
            let i = usize::from(th[b1n].pt.y < th[b0n].pt.y);
            let mut ymax = th[th[bounds[i ^ 1]].next[i ^ 1]].pt.y;
            let ymin = th[b0].pt.y.min(th[b1].pt.y);

            // Lowest sag inside the quad b0n, b0, b1, b1n.
            let mut isag = None;
            for (j, &s) in sags.iter().enumerate() {
                let sp = th[s].pt;
                if inrange(sp.y, ymin, ymax)
                    && s != b0n
                    && s != b1n
                    && cross(th[b0].pt - th[b0n].pt, sp - th[b0n].pt) >= 0.0
                    && cross(th[b1].pt - th[b0].pt, sp - th[b0].pt) >= 0.0
                    && cross(th[b1n].pt - th[b1].pt, sp - th[b1].pt) >= 0.0
                    && cross(th[b0n].pt - th[b1n].pt, sp - th[b1n].pt) >= 0.0
                {
                    ymax = sp.y;
                    isag = Some(j);
                }
            }

            if let Some(j) = isag {
                let s = sags[j];
                if th[s].is_live() && th[pinnacle].is_live() {
                    bridge(&mut th, &mut bottoms, &mut bounds, &mut pinnacle, s);
                }
                sags.remove(j);
                break 'step;
            }

            // Clip vertices behind the advancing vertex while they turn convex.
            let ii = i ^ 1;
            let sign = if i == 0 { 1.0 } else { -1.0 };
            let mut ptr = bounds[i];
            while ptr != bounds[ii] {
                let back = th[ptr].next[ii];
                let fwd = th[ptr].next[i];
                let p = th[ptr].pt;
                let convex = cross(th[back].pt - p, th[fwd].pt - p) * sign > 0.0;
                if !(convex || th[bounds[0]].next[0] == th[bounds[1]].next[1]) {
                    break;
                }
                if out.triangles.len() >= cap {
                    out.capped = true;
                    break 'sweep;
                }
                let apex = th[bounds[i]].next[i];
                let mut tri = [th[apex].vtx; 3];
                let mut corner = [th[apex].pt; 3];
                tri[1 + i] = th[ptr].vtx;
                corner[1 + i] = p;
                tri[2 - i] = th[back].vtx;
                corner[2 - i] = th[back].pt;
                let e0 = corner[1] - corner[0];
                let e1 = corner[2] - corner[0];
                let darea = cross(e0, e1);
                out.area2 += darea;
                if darea * darea < ratio2 * e0.norm_squared() * e1.norm_squared() {
                    out.degenerate += 1;
                }
                out.triangles.push(tri);

                th[back].next[i] = fwd;
                th[fwd].next[ii] = back;
                bounds[i] = back;
                if pinnacle == ptr {
                    pinnacle = fwd;
                }
                th[ptr].next = [NIL; 2];
                th[ptr].processed = true;
                ptr = back;
            }

            bounds[i] = th[bounds[i]].next[i];
            if bounds[i] == th[bounds[ii]].next[ii] {
                bounds = [NIL; 2];
            } else if th[bounds[i]].pt.y > th[pinnacle].pt.y {
                pinnacle = bounds[i];
            }
        }
    }
    out
}

/// Split the ring by joining the pinnacle and sag `s` with a pair of
/// duplicate thunks, registering the first bottom found on the new chain.
fn bridge(
    th: &mut Thunks,
    bottoms: &mut SmallVec<[usize; 16]>,
    bounds: &mut [usize; 2],
    pinnacle: &mut usize,
    s: usize,
) {
    let pin = *pinnacle;
    let a = th.len();
    let b = a + 1;
    let (pin_vtx, pin_pt) = (th[pin].vtx, th[pin].pt);
    let (s_vtx, s_pt) = (th[s].vtx, th[s].pt);
    th.push(Thunk::new(pin_vtx, pin_pt));
    th.push(Thunk::new(s_vtx, s_pt));

    let pin_next = th[pin].next[1];
    th[pin_next].next[0] = a;
    let s_prev = th[s].next[0];
    th[s_prev].next[1] = b;
    th[a].next[0] = b;
    th[a].next[1] = th[pin].next[1];
    th[b].next[1] = a;
    th[b].next[0] = th[s].next[0];
    th[pin].next[1] = s;
    th[s].next[0] = pin;

    if bounds[1] == pin {
        bounds[1] = a;
    }
    let stop = th[bounds[1]].next[1];
    let mut ptr = a;
    let mut steps = 0;
    while ptr != stop && steps < a {
        let low = th[th[ptr].next[0]].pt.y.min(th[th[ptr].next[1]].pt.y);
        if low > th[ptr].pt.y {
            bottoms.push(ptr);
            break;
        }
        ptr = th[ptr].next[1];
        steps += 1;
    }
    bounds[1] = pin;
    *pinnacle = s;
}
