//! Minimum enclosing rectangle of a convex polygon (rotating calipers).
//!
//! One side of the minimum rectangle always lies along a polygon edge, so
//! the search walks every edge once, advancing four support indices that
//! only ever move forward around the ring: O(m) amortised.

use nalgebra::Vector2;

/// Minimum rectangle metadata for a CCW polygon.
///
/// `psi` is the angle of the rectangle's first axis `ue` (the direction of
/// the parent edge); `width` is the extent along `ue`, `height` along the
/// 90°-CCW rotation of `ue`. `valid` is false below three vertices, where
/// the "rectangle" collapses to a point or a segment.
#[derive(Clone, Copy, Debug)]
pub struct MinRect {
    pub area: f64,
    pub width: f64,
    pub height: f64,
    pub psi: f64,
    pub parent_edge: Option<usize>,
    pub valid: bool,
}

impl MinRect {
    /// Cleared state: infinite area so any candidate improves it.
    pub fn empty() -> Self {
        Self {
            area: f64::INFINITY,
            width: 0.0,
            height: 0.0,
            psi: 0.0,
            parent_edge: None,
            valid: false,
        }
    }
}

/// Unit direction of edge `i` and its 90°-CCW normal.
///
/// A zero-length edge (duplicate consecutive vertices) substitutes the
/// world axes so the scan can continue.
fn edge_frame(poly: &[Vector2<f64>], i: usize) -> (Vector2<f64>, Vector2<f64>) {
    let e = poly[(i + 1) % poly.len()] - poly[i];
    let len_sqr = e.norm_squared();
    if len_sqr <= 0.0 {
        return (Vector2::new(1.0, 0.0), Vector2::new(0.0, 1.0));
    }
    let ue = e / len_sqr.sqrt();
    (ue, Vector2::new(-ue.y, ue.x))
}

/// Minimum-area enclosing rectangle of the CCW polygon `poly`.
pub fn min_enclosing_rect(poly: &[Vector2<f64>]) -> MinRect {
    let m = poly.len();
    let mut mr = MinRect::empty();
    if m == 0 {
        return mr;
    }
    if m == 1 {
        mr.area = 0.0;
        mr.parent_edge = Some(0);
        return mr;
    }
    if m == 2 {
        // A segment: degenerate rectangle along it.
        let e = poly[1] - poly[0];
        let len_sqr = e.norm_squared();
        mr.area = 0.0;
        mr.parent_edge = Some(0);
        if len_sqr > 0.0 {
            mr.width = len_sqr.sqrt();
            mr.psi = e.y.atan2(e.x);
        }
        return mr;
    }

    // Edge 0: find the support points by a full scan.
    let (mut i_umin, mut i_umax, mut i_vmin, mut i_vmax) = (0, 0, 0, 0);
    {
        let (ue, ve) = edge_frame(poly, 0);
        let mut min_u = poly[0].dot(&ue);
        let mut max_u = min_u;
        let mut min_v = poly[0].dot(&ve);
        let mut max_v = min_v;
        for (k, p) in poly.iter().enumerate().skip(1) {
            let su = p.dot(&ue);
            let sv = p.dot(&ve);
            if su < min_u {
                min_u = su;
                i_umin = k;
            }
            if su > max_u {
                max_u = su;
                i_umax = k;
            }
            if sv < min_v {
                min_v = sv;
                i_vmin = k;
            }
            if sv > max_v {
                max_v = sv;
                i_vmax = k;
            }
        }
        mr.width = max_u - min_u;
        mr.height = max_v - min_v;
        mr.area = mr.width * mr.height;
        mr.psi = ue.y.atan2(ue.x);
        mr.parent_edge = Some(0);
        mr.valid = true;
    }

    // Remaining edges: rotate the frame and advance each support index
    // while the next vertex strictly improves its projection.
    for i in 1..m {
        let (ue, ve) = edge_frame(poly, i);

        while poly[(i_umax + 1) % m].dot(&ue) > poly[i_umax].dot(&ue) {
            i_umax = (i_umax + 1) % m;
        }
        while poly[(i_umin + 1) % m].dot(&ue) < poly[i_umin].dot(&ue) {
            i_umin = (i_umin + 1) % m;
        }
        while poly[(i_vmax + 1) % m].dot(&ve) > poly[i_vmax].dot(&ve) {
            i_vmax = (i_vmax + 1) % m;
        }
        while poly[(i_vmin + 1) % m].dot(&ve) < poly[i_vmin].dot(&ve) {
            i_vmin = (i_vmin + 1) % m;
        }

        let width = poly[i_umax].dot(&ue) - poly[i_umin].dot(&ue);
        let height = poly[i_vmax].dot(&ve) - poly[i_vmin].dot(&ve);
        let area = width * height;
        if area < mr.area {
            mr.area = area;
            mr.width = width;
            mr.height = height;
            mr.psi = ue.y.atan2(ue.x);
            mr.parent_edge = Some(i);
        }
    }

    mr
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(coords: &[(f64, f64)]) -> Vec<Vector2<f64>> {
        coords.iter().map(|&(x, y)| Vector2::new(x, y)).collect()
    }

    #[test]
    fn degenerate_inputs_are_invalid() {
        assert!(!min_enclosing_rect(&[]).valid);

        let one = min_enclosing_rect(&ring(&[(1.0, 1.0)]));
        assert!(!one.valid);
        assert_eq!(one.area, 0.0);

        let seg = min_enclosing_rect(&ring(&[(0.0, 0.0), (3.0, 4.0)]));
        assert!(!seg.valid);
        assert_eq!(seg.area, 0.0);
        assert!((seg.width - 5.0).abs() < 1e-12);
        assert!((seg.psi - (4.0f64).atan2(3.0)).abs() < 1e-12);
    }

    #[test]
    fn axis_aligned_rectangle_matches_the_extent_scan() {
        let poly = ring(&[(0.0, 0.0), (3.0, 0.0), (3.0, 2.0), (0.0, 2.0)]);
        let mr = min_enclosing_rect(&poly);
        assert!(mr.valid);
        assert!((mr.area - 6.0).abs() < 1e-12);
        // psi is a multiple of pi/2: the box is already axis aligned.
        let quarter = mr.psi / std::f64::consts::FRAC_PI_2;
        assert!((quarter - quarter.round()).abs() < 1e-12);
    }

    #[test]
    fn rotated_square_recovers_the_rotation() {
        let a = std::f64::consts::FRAC_PI_6;
        let (s, c) = a.sin_cos();
        let rot = |x: f64, y: f64| (c * x - s * y, s * x + c * y);
        let poly = ring(&[rot(0.0, 0.0), rot(2.0, 0.0), rot(2.0, 2.0), rot(0.0, 2.0)]);
        let mr = min_enclosing_rect(&poly);
        assert!(mr.valid);
        assert!((mr.area - 4.0).abs() < 1e-9);
        // The recovered angle is the rotation modulo the square's symmetry.
        let rem = (mr.psi - a).rem_euclid(std::f64::consts::FRAC_PI_2);
        let dist = rem.min(std::f64::consts::FRAC_PI_2 - rem);
        assert!(dist < 1e-9, "psi {} not aligned with {}", mr.psi, a);
    }

    #[test]
    fn hexagon_rectangle_touches_every_vertex_projection() {
        // Regular hexagon, CCW.
        let poly: Vec<Vector2<f64>> = (0..6)
            .map(|k| {
                let a = std::f64::consts::FRAC_PI_3 * k as f64;
                Vector2::new(a.cos(), a.sin())
            })
            .collect();
        let mr = min_enclosing_rect(&poly);
        assert!(mr.valid);
        let i = mr.parent_edge.unwrap();
        let e = poly[(i + 1) % 6] - poly[i];
        let ue = e / e.norm();
        let ve = Vector2::new(-ue.y, ue.x);
        // Every vertex projects inside the reported extents.
        let us: Vec<f64> = poly.iter().map(|p| p.dot(&ue)).collect();
        let vs: Vec<f64> = poly.iter().map(|p| p.dot(&ve)).collect();
        let u_span = us.iter().cloned().fold(f64::NEG_INFINITY, f64::max)
            - us.iter().cloned().fold(f64::INFINITY, f64::min);
        let v_span = vs.iter().cloned().fold(f64::NEG_INFINITY, f64::max)
            - vs.iter().cloned().fold(f64::INFINITY, f64::min);
        assert!((u_span - mr.width).abs() < 1e-12);
        assert!((v_span - mr.height).abs() < 1e-12);
        // Known optimum for the unit hexagon: 2 x sqrt(3), side flush with an edge.
        assert!((mr.area - 2.0 * 3f64.sqrt()).abs() < 1e-12);
    }
}
