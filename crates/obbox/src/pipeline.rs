//! End-to-end solve: merge, bound, hull, then the oriented-box search.
//!
//! This is the composition the library exists for. Each phase logs an
//! `info` event on entry/exit so long runs are observable; absence of a
//! subscriber changes nothing about the result.

use std::fmt;

use nalgebra::Vector3;
use tracing::{info, warn};

use crate::cfg::DEFAULT_TOL;
use crate::cloud::{merge_points, MergeError};
use crate::hull3::hull3d;
use crate::obb::{axis_aligned_bound_box, min_rotated_obb, Obb, ObbError};
use crate::types::{BoundBox, HullDim};

/// Configuration for a full solve.
#[derive(Clone, Copy, Debug)]
pub struct SolveCfg {
    /// Merge near-duplicates within this distance before hulling; `None`
    /// skips the merge phase.
    pub merge_tol: Option<f64>,
    /// Degeneracy/visibility tolerance for the hull and the OBB search.
    pub hull_tol: f64,
    /// Grid samples per angle per OBB pass.
    pub steps: usize,
    /// OBB refinement passes.
    pub passes: usize,
}

impl Default for SolveCfg {
    fn default() -> Self {
        Self {
            merge_tol: None,
            hull_tol: DEFAULT_TOL,
            steps: 7,
            passes: 1,
        }
    }
}

/// Everything a solve produces, with the phase counters a caller would
/// otherwise have to recompute.
#[derive(Clone, Debug)]
pub struct Solution {
    /// Points handed in.
    pub n_input: usize,
    /// Points left after the merge phase (equals `n_input` when skipped).
    pub n_unique: usize,
    /// Dimension the 3D hull carved out.
    pub hull_dim: HullDim,
    /// Number of principal points fed to the OBB search.
    pub n_principal: usize,
    /// Axis-aligned box of the (merged) cloud, for reference.
    pub aabb: BoundBox,
    /// The solved oriented box.
    pub obb: Obb,
}

/// Errors from the composed solve.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveError {
    Merge(MergeError),
    Obb(ObbError),
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::Merge(e) => write!(f, "merge phase: {}", e),
            SolveError::Obb(e) => write!(f, "OBB phase: {}", e),
        }
    }
}

impl std::error::Error for SolveError {}

impl From<MergeError> for SolveError {
    fn from(e: MergeError) -> Self {
        SolveError::Merge(e)
    }
}

impl From<ObbError> for SolveError {
    fn from(e: ObbError) -> Self {
        SolveError::Obb(e)
    }
}

/// Run the whole pipeline over `pts`.
///
/// The 3D hull prunes interior points before the OBB search; when the hull
/// is degenerate (flat or collapsed cloud) the search falls back to the
/// full point set, which still yields the correct (possibly flat) box.
pub fn solve(pts: &[Vector3<f64>], cfg: &SolveCfg) -> Result<Solution, SolveError> {
    let n_input = pts.len();
    info!(n_input, "solve start");

    let merged;
    let active: &[Vector3<f64>] = match cfg.merge_tol {
        Some(tol) => {
            let (_, unique) = merge_points(pts, tol, n_input)?;
            info!(
                merged = n_input - unique.len(),
                kept = unique.len(),
                "merge phase done"
            );
            merged = unique;
            &merged
        }
        None => pts,
    };
    let n_unique = active.len();

    let aabb = axis_aligned_bound_box(active);

    info!(n_unique, "hull phase");
    let hull = hull3d(active, cfg.hull_tol);
    let principal: Vec<Vector3<f64>> = if hull.dim == HullDim::Solid {
        hull.vertices.iter().map(|&i| active[i]).collect()
    } else {
        warn!(
            dim = hull.dim.code(),
            "hull does not enclose a volume; searching over the full cloud"
        );
        active.to_vec()
    };
    info!(
        dim = hull.dim.code(),
        n_principal = principal.len(),
        "hull phase done"
    );

    info!(steps = cfg.steps, passes = cfg.passes, "OBB phase");
    let obb = min_rotated_obb(&principal, cfg.steps, cfg.passes, cfg.hull_tol)?;
    info!(volume = obb.volume(), "solve done");

    Ok(Solution {
        n_input,
        n_unique,
        hull_dim: hull.dim,
        n_principal: principal.len(),
        aabb,
        obb,
    })
}
