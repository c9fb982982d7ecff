//! Tolerance defaults for the polygon triangulator.

/// Height band, as a fraction of the input's y extent, inside which vertices
/// count as level with their neighbours.
pub(crate) const HEIGHT_EPS_FRAC: f64 = 0.0005;
/// Relative mismatch between input and output area that marks a failed sweep.
pub(crate) const AREA_TOLERANCE: f64 = 0.003;
/// Triangles with `area² < (ratio·|e0|·|e1|)²` count as slivers.
pub(crate) const DEGENERATE_RATIO: f64 = 0.02;

/// Knobs of [`triangulate`](super::triangulate).
#[derive(Clone, Copy, Debug)]
pub struct TriCfg {
    /// Output cap; reaching it before the polygon is covered is an error.
    pub max_triangles: usize,
    pub height_eps_frac: f64,
    pub area_tolerance: f64,
    pub degenerate_ratio: f64,
    /// Skip the sweep and ear-clip single-contour input directly.
    pub force_ear_clipping: bool,
}

impl Default for TriCfg {
    fn default() -> Self {
        Self {
            max_triangles: usize::MAX,
            height_eps_frac: HEIGHT_EPS_FRAC,
            area_tolerance: AREA_TOLERANCE,
            degenerate_ratio: DEGENERATE_RATIO,
            force_ear_clipping: false,
        }
    }
}

impl TriCfg {
    /// Defaults with an output cap.
    pub fn with_capacity(max_triangles: usize) -> Self {
        Self {
            max_triangles,
            ..Self::default()
        }
    }
}
