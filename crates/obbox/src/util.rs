//! Small numeric helpers shared by the geometry modules.

use nalgebra::{Vector2, Vector3};

use crate::cfg::NORM_EPS;

/// Unit vector along `v`, or `None` when the magnitude is below the
/// normalisation floor. Call sites either skip the sample (projection,
/// OBB search) or fall through to a degenerate branch (hull seeding).
#[inline]
pub(crate) fn unit_or_none(v: Vector3<f64>) -> Option<Vector3<f64>> {
    let norm = v.norm();
    if !norm.is_finite() || norm < NORM_EPS {
        return None;
    }
    Some(v / norm)
}

/// z-component of the 2D cross product `(b - a) x (c - a)`.
///
/// Positive for a CCW turn at `b`.
#[inline]
pub(crate) fn cross2(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> f64 {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}
