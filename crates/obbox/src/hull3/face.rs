//! Triangular hull faces with soft-delete lifecycle.

use nalgebra::Vector3;

use crate::cfg::NORM_EPS;

/// Triangle on the hull, referenced by indices into the ambient point set.
///
/// Invariants:
/// - While `alive`, `normal` is unit length and points outward, with
///   `normal · p + offset = 0` on the face plane.
/// - Faces are never removed or shifted; they die in place so indices stay
///   stable across the whole build.
/// - `outside` holds indices of points strictly in front of the plane by
///   more than the build tolerance.
#[derive(Clone, Debug)]
pub struct Face {
    pub a: usize,
    pub b: usize,
    pub c: usize,
    pub normal: Vector3<f64>,
    pub offset: f64,
    pub outside: Vec<usize>,
    pub alive: bool,
}

impl Face {
    /// Face over `(a, b, c)` with `normal = (pB - pA) x (pC - pA)`.
    ///
    /// A raw normal at or below `max(tol, 1e-15)` means the triangle is
    /// degenerate; the face is born dead and keeps the raw normal.
    pub fn new(a: usize, b: usize, c: usize, pts: &[Vector3<f64>], tol: f64) -> Self {
        let pa = pts[a];
        let normal = (pts[b] - pa).cross(&(pts[c] - pa));
        let mag = normal.norm();
        if mag <= tol.max(NORM_EPS) {
            return Self {
                a,
                b,
                c,
                normal,
                offset: 0.0,
                outside: Vec::new(),
                alive: false,
            };
        }
        let normal = normal / mag;
        Self {
            a,
            b,
            c,
            normal,
            offset: -normal.dot(&pa),
            outside: Vec::new(),
            alive: true,
        }
    }

    /// Signed distance of `p` from the face plane; positive is outside.
    #[inline]
    pub fn signed_distance(&self, p: Vector3<f64>) -> f64 {
        self.normal.dot(&p) + self.offset
    }

    #[inline]
    pub fn visible_from(&self, p: Vector3<f64>, tol: f64) -> bool {
        self.signed_distance(p) > tol
    }
}
