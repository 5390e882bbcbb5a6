//! 2D convex hull over indexed points (Andrew's monotone chain).
//!
//! Input points carry the index of the 3D point they were projected from;
//! the hull is reported in terms of those origin indices, CCW, with no
//! repeated first vertex and no three collinear consecutive vertices.

use crate::types::{HullDim, Indexed2};
use crate::util::cross2;

/// Result of a 2D hull build: dimension code plus origin indices.
#[derive(Clone, Debug)]
pub struct Hull2 {
    pub dim: HullDim,
    pub vertices: Vec<usize>,
}

/// Convex hull of `pts` in CCW order.
///
/// Degenerate inputs report through `dim`: empty input, a single point, or
/// a collinear set (two extreme endpoints). Collinear intermediate points
/// are always popped, so the returned polygon is strictly convex.
pub fn hull2d(pts: &[Indexed2]) -> Hull2 {
    if pts.is_empty() {
        return Hull2 {
            dim: HullDim::TooFew,
            vertices: Vec::new(),
        };
    }
    let mut sorted = pts.to_vec();
    sorted.sort_by(Indexed2::lex_cmp);

    if sorted.len() == 1 {
        return Hull2 {
            dim: HullDim::Point,
            vertices: vec![sorted[0].idx],
        };
    }
    if sorted.len() == 2 {
        return Hull2 {
            dim: HullDim::Line,
            vertices: vec![sorted[0].idx, sorted[1].idx],
        };
    }

    // Lower chain.
    let mut hull: Vec<Indexed2> = Vec::with_capacity(sorted.len() * 2);
    for &p in &sorted {
        while hull.len() >= 2
            && cross2(hull[hull.len() - 2].p, hull[hull.len() - 1].p, p.p) <= 0.0
        {
            hull.pop();
        }
        hull.push(p);
    }

    // Upper chain; never pop below the lower chain.
    let lower_len = hull.len();
    for &p in sorted.iter().rev().skip(1) {
        while hull.len() > lower_len
            && cross2(hull[hull.len() - 2].p, hull[hull.len() - 1].p, p.p) <= 0.0
        {
            hull.pop();
        }
        hull.push(p);
    }
    // The last point repeats the first.
    hull.pop();

    let vertices: Vec<usize> = hull.iter().map(|q| q.idx).collect();
    let dim = match vertices.len() {
        0 => HullDim::TooFew,
        1 => HullDim::Point,
        2 => HullDim::Line,
        _ => HullDim::Plane,
    };
    Hull2 { dim, vertices }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(f64, f64)]) -> Vec<Indexed2> {
        coords
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Indexed2::new(x, y, i))
            .collect()
    }

    #[test]
    fn degenerate_inputs() {
        assert_eq!(hull2d(&[]).dim, HullDim::TooFew);

        let one = hull2d(&pts(&[(3.0, 4.0)]));
        assert_eq!(one.dim, HullDim::Point);
        assert_eq!(one.vertices, vec![0]);

        let two = hull2d(&pts(&[(1.0, 0.0), (0.0, 0.0)]));
        assert_eq!(two.dim, HullDim::Line);
        assert_eq!(two.vertices, vec![1, 0]);
    }

    #[test]
    fn collinear_points_collapse_to_a_segment() {
        let h = hull2d(&pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]));
        assert_eq!(h.dim, HullDim::Line);
        assert_eq!(h.vertices, vec![0, 3]);
    }

    #[test]
    fn rectangle_with_midpoint_on_edge() {
        let h = hull2d(&pts(&[
            (0.0, 0.0),
            (1.0, 0.0),
            (2.0, 0.0),
            (2.0, 1.0),
            (0.0, 1.0),
        ]));
        assert_eq!(h.dim, HullDim::Plane);
        // CCW rectangle starting at the lexicographic minimum; the edge
        // midpoint (1, 0) is popped.
        assert_eq!(h.vertices, vec![0, 2, 3, 4]);
    }

    #[test]
    fn hull_is_strictly_ccw() {
        let cloud = pts(&[
            (0.0, 0.0),
            (4.0, 0.5),
            (5.0, 3.0),
            (2.5, 5.0),
            (-0.5, 3.0),
            (2.0, 2.0),
            (3.0, 1.0),
            (1.0, 4.0),
        ]);
        let h = hull2d(&cloud);
        assert_eq!(h.dim, HullDim::Plane);
        let ring: Vec<_> = h
            .vertices
            .iter()
            .map(|&i| cloud.iter().find(|q| q.idx == i).unwrap().p)
            .collect();
        let m = ring.len();
        let mut area2 = 0.0;
        for i in 0..m {
            let a = ring[i];
            let b = ring[(i + 1) % m];
            let c = ring[(i + 2) % m];
            // Strict convexity at every corner.
            assert!(cross2(a, b, c) > 0.0);
            area2 += a.x * b.y - b.x * a.y;
        }
        assert!(area2 > 0.0);
        // Interior points are excluded.
        assert!(!h.vertices.contains(&5));
        assert!(!h.vertices.contains(&6));
    }

    #[test]
    fn duplicate_coordinates_keep_one_representative() {
        let h = hull2d(&pts(&[
            (0.0, 0.0),
            (0.0, 0.0),
            (1.0, 0.0),
            (1.0, 1.0),
            (0.0, 1.0),
            (1.0, 1.0),
        ]));
        assert_eq!(h.dim, HullDim::Plane);
        assert_eq!(h.vertices.len(), 4);
    }
}
