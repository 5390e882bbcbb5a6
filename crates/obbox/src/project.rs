//! Projection of a 3D cloud onto a view plane.
//!
//! The view direction `w` comes from heading `theta` (yaw about world +z)
//! and declination `phi` (pitch from the xy plane); `u` and `v` complete a
//! right-handed orthonormal frame. Projected points keep the index of the
//! 3D point they came from, and near-coincident projections are swept into
//! one representative so the 2D hull never chews on duplicates.

use nalgebra::Vector3;

use crate::types::Indexed2;
use crate::util::unit_or_none;

/// View frame: `w` looks along the projection axis, `u`/`v` span the plane.
#[derive(Clone, Copy, Debug)]
pub struct Frame {
    pub u: Vector3<f64>,
    pub v: Vector3<f64>,
    pub w: Vector3<f64>,
}

impl Frame {
    /// Build the frame for `(theta, phi)`.
    ///
    /// `None` when any axis fails to normalise; callers skip the sample.
    pub fn from_view_angles(theta: f64, phi: f64) -> Option<Frame> {
        let (sth, cth) = theta.sin_cos();
        let (sph, cph) = phi.sin_cos();
        let w = unit_or_none(Vector3::new(cth * cph, sth * cph, sph))?;

        // Helper axis not parallel to w, then subtract the w component.
        let t = if w.z.abs() < 0.9 {
            Vector3::new(0.0, 0.0, 1.0)
        } else {
            Vector3::new(1.0, 0.0, 0.0)
        };
        let u = unit_or_none(t - w * w.dot(&t))?;
        let v = unit_or_none(w.cross(&u))?;
        Some(Frame { u, v, w })
    }
}

/// Project every point onto the frame's `(u, v)` plane and sweep-merge
/// projections closer than `tol`.
///
/// The output is sorted lexicographically; each equivalence class of
/// near-coincident projections keeps its first (lowest) member.
pub fn project_with_frame(pts: &[Vector3<f64>], frame: &Frame, tol: f64) -> Vec<Indexed2> {
    let mut out: Vec<Indexed2> = pts
        .iter()
        .enumerate()
        .map(|(i, p)| Indexed2::new(p.dot(&frame.u), p.dot(&frame.v), i))
        .collect();
    out.sort_by(Indexed2::lex_cmp);
    let tol_sqr = tol * tol;
    out.dedup_by(|a, b| (a.p - b.p).norm_squared() <= tol_sqr);
    out
}

/// Convenience: build the frame for `(theta, phi)` and project.
///
/// `None` only when the frame itself is degenerate.
pub fn project_to_plane(
    pts: &[Vector3<f64>],
    theta: f64,
    phi: f64,
    tol: f64,
) -> Option<Vec<Indexed2>> {
    let frame = Frame::from_view_angles(theta, phi)?;
    Some(project_with_frame(pts, &frame, tol))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn frame_is_right_handed_at_the_origin_angles() {
        let f = Frame::from_view_angles(0.0, 0.0).unwrap();
        assert!((f.w - Vector3::new(1.0, 0.0, 0.0)).norm() < 1e-15);
        assert!((f.u - Vector3::new(0.0, 0.0, 1.0)).norm() < 1e-15);
        assert!((f.v - Vector3::new(0.0, -1.0, 0.0)).norm() < 1e-15);
    }

    #[test]
    fn looking_straight_up_switches_the_helper_axis() {
        let f = Frame::from_view_angles(0.0, std::f64::consts::FRAC_PI_2).unwrap();
        assert!((f.w - Vector3::new(0.0, 0.0, 1.0)).norm() < 1e-12);
        // w.z is ~1, so the helper is +x and u stays well-defined.
        assert!(f.u.norm() > 0.99);
    }

    #[test]
    fn projection_keeps_origin_indices_and_merges_duplicates() {
        let pts = vec![
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, 5e-10),
            Vector3::new(1.0, 2.0, 0.0),
        ];
        // Look down +z so (x, y) survive in some in-plane basis.
        let proj = project_to_plane(&pts, 0.0, std::f64::consts::FRAC_PI_2, 1e-6).unwrap();
        assert_eq!(proj.len(), 2);
        // The coincident pair collapses to a single representative.
        assert!(proj.iter().any(|q| q.idx == 2));
        assert_eq!(proj.iter().filter(|q| q.idx <= 1).count(), 1);
    }

    #[test]
    fn zero_tolerance_only_merges_exact_duplicates() {
        let pts = vec![
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(0.0, 1.0 + 1e-12, 0.0),
        ];
        let proj = project_to_plane(&pts, 0.0, 0.0, 0.0).unwrap();
        assert_eq!(proj.len(), 2);
    }

    proptest! {
        /// Frames are orthonormal across the whole search window.
        #[test]
        fn frames_are_orthonormal(theta in 0.0..std::f64::consts::FRAC_PI_2,
                                  phi in 0.0..std::f64::consts::FRAC_PI_2) {
            let f = Frame::from_view_angles(theta, phi).unwrap();
            prop_assert!((f.u.norm() - 1.0).abs() < 1e-12);
            prop_assert!((f.v.norm() - 1.0).abs() < 1e-12);
            prop_assert!((f.w.norm() - 1.0).abs() < 1e-12);
            prop_assert!(f.u.dot(&f.v).abs() < 1e-12);
            prop_assert!(f.v.dot(&f.w).abs() < 1e-12);
            prop_assert!(f.w.dot(&f.u).abs() < 1e-12);
        }
    }
}
