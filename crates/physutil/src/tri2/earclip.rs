//! O(n²) ear clipping over a single ring.

use super::thunk::{cross, Thunks};

/// Clip ears from the ring in `th` (all thunks linked, counter-clockwise).
///
/// Returns the triangles and whether `cap` stopped the clipping early.
pub(crate) fn clip_ears(mut th: Thunks, cap: usize) -> (Vec<[usize; 3]>, bool) {
    let mut tris = Vec::new();
    let mut count = th.len();
    if count < 3 {
        return (tris, false);
    }
    // Convex at the start; never updated afterwards.
    for t in 0..count {
        let p = th[t].pt;
        th[t].processed =
            cross(th[th[t].next[1]].pt - p, th[th[t].next[0]].pt - p) > 0.0;
    }

    let turn = |th: &Thunks, t: usize| {
        let p = th[t].pt;
        cross(th[th[t].next[1]].pt - p, th[th[t].next[0]].pt - p)
    };

    let mut ptr0 = 0;
    let mut non_ears = 0;
    while non_ears < count {
        if tris.len() >= cap {
            return (tris, true);
        }
        if count == 3 {
            let [prev, next] = th[ptr0].next;
            tris.push([th[ptr0].vtx, th[next].vtx, th[prev].vtx]);
            break;
        }
        let mut skipped = 0;
        while skipped < count && turn(&th, ptr0) < 0.0 {
            ptr0 = th[ptr0].next[1];
            skipped += 1;
        }
        if skipped == count {
            break;
        }

        let [prev, next] = th[ptr0].next;
        let (p0, pp, pn) = (th[ptr0].pt, th[prev].pt, th[next].pt);
        // First reflex vertex after the candidate, then the first vertex
        // from there on that lies inside the candidate triangle.
        let mut ptr = th[next].next[1];
        while ptr != prev && th[ptr].processed {
            ptr = th[ptr].next[1];
        }
        while ptr != prev {
            let q = th[ptr].pt;
            let inside = cross(p0 - pp, q - pp)
                .min(cross(pn - p0, q - p0))
                .min(cross(pp - pn, q - pn));
            if inside >= 0.0 {
                break;
            }
            ptr = th[ptr].next[1];
        }

        if ptr == prev {
            tris.push([th[ptr0].vtx, th[next].vtx, th[prev].vtx]);
            th[next].next[0] = prev;
            th[prev].next[1] = next;
            count -= 1;
            non_ears = 0;
        } else {
            non_ears += 1;
        }
        ptr0 = th[ptr0].next[1];
    }
    (tris, false)
}
