use super::*;
use proptest::prelude::*;

fn cube_corners() -> Vec<Vector3<f64>> {
    let mut pts = Vec::new();
    for z in [0.0, 1.0] {
        for y in [0.0, 1.0] {
            for x in [0.0, 1.0] {
                pts.push(Vector3::new(x, y, z));
            }
        }
    }
    pts
}

/// Largest signed distance of `p` over the alive faces.
fn max_signed_distance(hull: &Hull3, p: Vector3<f64>) -> f64 {
    hull.faces
        .iter()
        .map(|f| f.signed_distance(p))
        .fold(f64::NEG_INFINITY, f64::max)
}

#[test]
fn empty_and_tiny_inputs_are_too_few() {
    let h = hull3d(&[], 1e-9);
    assert_eq!(h.dim, HullDim::TooFew);
    assert!(h.vertices.is_empty());

    let pts = vec![
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(0.0, 1.0, 0.0),
    ];
    let h = hull3d(&pts, 1e-9);
    assert_eq!(h.dim, HullDim::TooFew);
    assert_eq!(h.vertices, vec![0, 1, 2]);
}

#[test]
fn coincident_cloud_collapses_to_a_point() {
    let pts = vec![Vector3::new(2.0, -1.0, 3.0); 6];
    let h = hull3d(&pts, 1e-9);
    assert_eq!(h.dim, HullDim::Point);
    assert_eq!(h.vertices.len(), 1);
}

#[test]
fn collinear_cloud_returns_the_endpoints() {
    let pts = vec![
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(2.0, 0.0, 0.0),
        Vector3::new(5.0, 0.0, 0.0),
        Vector3::new(1.0, 0.0, 0.0),
    ];
    let h = hull3d(&pts, 1e-9);
    assert_eq!(h.dim, HullDim::Line);
    assert_eq!(h.vertices, vec![0, 2]);
}

#[test]
fn coplanar_cloud_returns_a_candidate_superset() {
    // A square grid in the z = 0 plane plus its centre.
    let mut pts = Vec::new();
    for y in 0..3 {
        for x in 0..3 {
            pts.push(Vector3::new(x as f64, y as f64, 0.0));
        }
    }
    let h = hull3d(&pts, 1e-9);
    assert_eq!(h.dim, HullDim::Plane);
    // The four corners of the grid must be among the candidates.
    for corner in [0usize, 2, 6, 8] {
        assert!(h.vertices.contains(&corner), "missing corner {}", corner);
    }
    assert!(h.faces.is_empty());
}

#[test]
fn unit_cube_hull_excludes_interior_point() {
    let mut pts = cube_corners();
    pts.push(Vector3::new(0.5, 0.5, 0.5));
    let h = hull3d(&pts, 1e-9);
    assert_eq!(h.dim, HullDim::Solid);
    assert_eq!(h.vertices, (0..8).collect::<Vec<_>>());
    assert_eq!(h.faces.len(), 12);
    for f in &h.faces {
        assert!(f.alive);
    }
}

#[test]
fn tetrahedron_hull_keeps_all_four_faces() {
    let pts = vec![
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(0.0, 1.0, 0.0),
        Vector3::new(0.0, 0.0, 1.0),
    ];
    let h = hull3d(&pts, 1e-9);
    assert_eq!(h.dim, HullDim::TooFew);

    let mut pts = pts;
    pts.push(Vector3::new(0.1, 0.1, 0.1));
    let h = hull3d(&pts, 1e-9);
    assert_eq!(h.dim, HullDim::Solid);
    assert_eq!(h.vertices, vec![0, 1, 2, 3]);
    assert_eq!(h.faces.len(), 4);
}

#[test]
fn hull_is_stable_under_interior_augmentation() {
    let base = cube_corners();
    let hull_a = hull3d(&base, 1e-9);

    let mut augmented = base.clone();
    for i in 0..10 {
        let t = 0.1 + 0.08 * i as f64;
        augmented.push(Vector3::new(t, 0.5, 1.0 - t * 0.5));
    }
    let hull_b = hull3d(&augmented, 1e-9);
    assert_eq!(hull_a.dim, HullDim::Solid);
    assert_eq!(hull_a.vertices, hull_b.vertices);
}

#[test]
fn every_face_sees_the_centroid_from_behind() {
    let mut pts = cube_corners();
    pts.push(Vector3::new(0.2, 0.9, 0.4));
    let h = hull3d(&pts, 1e-9);
    assert_eq!(h.dim, HullDim::Solid);
    let centroid = h
        .vertices
        .iter()
        .map(|&i| pts[i])
        .sum::<Vector3<f64>>()
        / h.vertices.len() as f64;
    for f in &h.faces {
        assert!(f.signed_distance(centroid) < 0.0);
    }
}

#[test]
fn nan_coordinates_degrade_to_a_degenerate_result() {
    let pts = vec![
        Vector3::new(f64::NAN, 0.0, 0.0),
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(0.0, 1.0, 0.0),
        Vector3::new(0.0, 0.0, 1.0),
        Vector3::new(1.0, 1.0, 1.0),
    ];
    let h = hull3d(&pts, 1e-9);
    assert!(h.dim < HullDim::Solid);
}

proptest! {
    /// Solid hulls contain every input point to within the tolerance, from
    /// exact predicates up to loose merge-scale cutoffs.
    #[test]
    fn solid_hull_contains_all_points(
        raw in prop::collection::vec(
            (-10.0f64..10.0, -10.0f64..10.0, -10.0f64..10.0),
            8..40,
        ),
        tol in prop::sample::select(vec![0.0, 1e-12, 1e-9, 1e-6]),
    ) {
        let pts: Vec<Vector3<f64>> =
            raw.iter().map(|&(x, y, z)| Vector3::new(x, y, z)).collect();
        let h = hull3d(&pts, tol);
        if h.dim == HullDim::Solid {
            prop_assert!(!h.faces.is_empty());
            for p in &pts {
                prop_assert!(max_signed_distance(&h, *p) <= tol + 1e-12);
            }
            // Every face's winding puts the vertex centroid behind it.
            let centroid = h.vertices.iter().map(|&i| pts[i]).sum::<Vector3<f64>>()
                / h.vertices.len() as f64;
            for f in &h.faces {
                prop_assert!(f.signed_distance(centroid) < 0.0);
            }
        }
    }
}
