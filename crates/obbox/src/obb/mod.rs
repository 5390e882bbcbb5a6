//! Minimum-volume oriented bounding box by nested grid search.
//!
//! How
//! - Sample `(theta, phi)` on a `steps x steps` grid over `[0, pi/2]²`.
//!   For each sample: project the cloud onto the view plane, hull it in
//!   2D, run rotating calipers to pick the in-plane roll `psi`, then scan
//!   the extents of all points in the psi-rotated frame and keep the
//!   smallest volume.
//! - Each pass re-centres a shrunken window on the best angles so far;
//!   the half-width is the previous pass's grid step, clamped to the
//!   original quarter-turn window.
//!
//! The quarter-turn window suffices: any box orientation is equivalent to
//! one with heading and pitch in `[0, pi/2]` up to axis permutation and
//! sign flips, and `psi` is solved exactly in-plane rather than sampled.

use std::f64::consts::FRAC_PI_2;
use std::fmt;

use nalgebra::{Vector2, Vector3};
use tracing::debug;

use crate::hull2::hull2d;
use crate::project::{project_with_frame, Frame};
use crate::rect::min_enclosing_rect;
use crate::types::{Angles, Axes, BoundBox, HullDim};


/// Errors surfaced by the OBB search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObbError {
    /// The grid needs at least one sample per axis.
    InvalidSteps(usize),
    /// At least one refinement pass is required.
    InvalidPasses(usize),
}

impl fmt::Display for ObbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObbError::InvalidSteps(steps) => write!(f, "steps must be >= 1, got {}", steps),
            ObbError::InvalidPasses(passes) => write!(f, "passes must be >= 1, got {}", passes),
        }
    }
}

impl std::error::Error for ObbError {}

/// A solved oriented bounding box.
///
/// `local` holds min/max extents expressed in the `axes` frame (world-space
/// corners are `axes · p` for `p` in the box); `angles` are the rotations
/// that rebuild that frame from the world axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Obb {
    pub local: BoundBox,
    pub axes: Axes,
    pub angles: Angles,
}

impl Obb {
    /// Identity frame around an empty box; what a fully degenerate search
    /// returns.
    pub fn unsolved() -> Self {
        Self {
            local: BoundBox::default(),
            axes: Axes::default(),
            angles: Angles::default(),
        }
    }

    /// Volume of the box; zero when unsolved.
    pub fn volume(&self) -> f64 {
        if self.local.empty() {
            return 0.0;
        }
        let s = self.local.span();
        s.x * s.y * s.z
    }
}

/// Axis-aligned bounding box of a cloud.
pub fn axis_aligned_bound_box(pts: &[Vector3<f64>]) -> BoundBox {
    let mut bb = BoundBox::default();
    for &p in pts {
        bb.append(p);
    }
    bb
}

/// Search for the minimum-volume oriented bounding box of `pts`.
///
/// `steps` grid samples per angle per pass, `passes` refinement passes,
/// `tol` the projection merge/degeneracy tolerance. If every sample is
/// degenerate (e.g. the cloud is a point or a line) the result is
/// `Obb::unsolved()`; clouds with a solid 3D hull always produce at least
/// one valid sample.
pub fn min_rotated_obb(
    pts: &[Vector3<f64>],
    steps: usize,
    passes: usize,
    tol: f64,
) -> Result<Obb, ObbError> {
    if steps < 1 {
        return Err(ObbError::InvalidSteps(steps));
    }
    if passes < 1 {
        return Err(ObbError::InvalidPasses(passes));
    }

    let mut theta_min = 0.0f64;
    let mut theta_max = FRAC_PI_2;
    let mut theta_delta = (theta_max - theta_min) / steps as f64;
    let mut phi_min = 0.0f64;
    let mut phi_max = FRAC_PI_2;
    let mut phi_delta = (phi_max - phi_min) / steps as f64;

    let mut best = Obb::unsolved();
    let mut best_vol = f64::INFINITY;

    for pass in 0..passes {
        debug!(
            pass,
            theta_min, theta_max, phi_min, phi_max, "grid search window"
        );
        for theta_i in 0..steps {
            let theta = theta_min + theta_i as f64 * theta_delta;
            for phi_i in 0..steps {
                let phi = phi_min + phi_i as f64 * phi_delta;

                let Some(frame) = Frame::from_view_angles(theta, phi) else {
                    continue;
                };

                // Hull of the projected cloud; anything flatter than a
                // polygon cannot anchor the calipers.
                let projected = project_with_frame(pts, &frame, tol);
                let hull = hull2d(&projected);
                if hull.dim < HullDim::Plane {
                    continue;
                }

                // Re-project the hull ring and solve the in-plane roll.
                let ring: Vec<Vector2<f64>> = hull
                    .vertices
                    .iter()
                    .map(|&i| Vector2::new(pts[i].dot(&frame.u), pts[i].dot(&frame.v)))
                    .collect();
                let rect = min_enclosing_rect(&ring);
                let psi = rect.psi;

                // Rotate (u, v) by psi about w so the frame hugs the
                // rectangle sides.
                let (sps, cps) = psi.sin_cos();
                let u = frame.u * cps + frame.v * sps;
                let v = frame.u * -sps + frame.v * cps;
                let w = frame.w;

                // Extents over the full input in the rotated frame.
                let mut lo = Vector3::repeat(f64::INFINITY);
                let mut hi = Vector3::repeat(f64::NEG_INFINITY);
                for p in pts {
                    let q = Vector3::new(p.dot(&u), p.dot(&v), p.dot(&w));
                    lo = lo.inf(&q);
                    hi = hi.sup(&q);
                }

                let span = hi - lo;
                let volume = span.x * span.y * span.z;
                if volume < best_vol {
                    best_vol = volume;
                    best = Obb {
                        local: BoundBox::new(lo, hi),
                        axes: Axes::new(u, v, w),
                        angles: Angles::new(theta, phi, psi),
                    };
                }
            }
        }

        // Shrink the window onto the best angles; half-width is this pass's
        // grid step.
        if pass + 1 < passes {
            theta_min = (best.angles.theta - theta_delta).max(0.0);
            theta_max = (best.angles.theta + theta_delta).min(FRAC_PI_2);
            theta_delta = (theta_max - theta_min) / steps as f64;

            phi_min = (best.angles.phi - phi_delta).max(0.0);
            phi_max = (best.angles.phi + phi_delta).min(FRAC_PI_2);
            phi_delta = (phi_max - phi_min) / steps as f64;
        }
    }

    Ok(best)
}
