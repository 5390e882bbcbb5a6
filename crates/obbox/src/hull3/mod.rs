//! Incremental 3D convex hull (quickhull with horizon stitching).
//!
//! Purpose
//! - From a point cloud and a tolerance, find the hull vertex indices and
//!   an outward-oriented triangulation of the hull surface.
//!
//! How
//! - A degeneracy ladder first classifies the cloud: empty, a single unique
//!   point, collinear, coplanar, or genuinely 3D. Only the last case runs
//!   the incremental loop.
//! - The loop keeps every face ever created in one growing array with an
//!   `alive` flag; adjacency is reconstructed each round from the horizon
//!   of the faces visible from the chosen eye point, so there are no
//!   back-references to maintain.

use std::collections::HashMap;

use nalgebra::Vector3;

use crate::types::HullDim;

mod face;
pub use face::Face;

#[cfg(test)]
mod tests;

/// Result of a 3D hull build.
///
/// `vertices` are indices into the input cloud, sorted ascending. For
/// `dim < Solid` they carry the degenerate substitute the ladder produced
/// (verbatim set, endpoints, or the coplanar extrema superset) and `faces`
/// is empty. For `Solid`, `faces` holds the surviving triangulation,
/// outward-oriented.
#[derive(Clone, Debug)]
pub struct Hull3 {
    pub dim: HullDim,
    pub vertices: Vec<usize>,
    pub faces: Vec<Face>,
}

impl Hull3 {
    fn degenerate(dim: HullDim, vertices: Vec<usize>) -> Self {
        Self {
            dim,
            vertices,
            faces: Vec::new(),
        }
    }
}

/// Indices of the extremes of `pts` along `dir`, earliest point winning ties.
fn extremes_along(pts: &[Vector3<f64>], dir: Vector3<f64>) -> (usize, usize) {
    let mut lo = 0;
    let mut hi = 0;
    let mut lo_p = pts[0].dot(&dir);
    let mut hi_p = lo_p;
    for (i, p) in pts.iter().enumerate().skip(1) {
        let pr = p.dot(&dir);
        if pr < lo_p {
            lo_p = pr;
            lo = i;
        }
        if pr > hi_p {
            hi_p = pr;
            hi = i;
        }
    }
    (lo, hi)
}

/// Compute the 3D convex hull of `pts` under tolerance `tol`.
///
/// The returned dimension follows the usual ladder: `TooFew` for fewer than
/// four usable points, `Point`/`Line` for collapsed clouds, `Plane` for a
/// coplanar cloud (the vertex list is then a superset of candidate hull
/// vertices from extrema in four independent directions, not a polygon),
/// and `Solid` for a full hull.
pub fn hull3d(pts: &[Vector3<f64>], tol: f64) -> Hull3 {
    let n = pts.len();
    if n == 0 {
        return Hull3::degenerate(HullDim::TooFew, Vec::new());
    }
    if n <= 3 {
        // 1-3 points: the hull is the set itself.
        return Hull3::degenerate(HullDim::TooFew, (0..n).collect());
    }

    // *** Initial simplex: pick (p0, p1, p2, p3).
    // p0: leftmost point, ties keep the earliest.
    let mut p0 = 0;
    for i in 1..n {
        if pts[i].x < pts[p0].x {
            p0 = i;
        }
    }

    // p1: farthest from p0 by squared distance.
    let mut p1 = p0;
    let mut best = -1.0;
    for (i, p) in pts.iter().enumerate() {
        let d2 = (p - pts[p0]).norm_squared();
        if d2 > best {
            best = d2;
            p1 = i;
        }
    }
    if p1 == p0 {
        // Everything coincides with p0.
        return Hull3::degenerate(HullDim::Point, vec![p0]);
    }

    // p2: maximises the triangle area with (p0, p1) via |u x (p - p0)|².
    let u = pts[p1] - pts[p0];
    let mut p2 = p0;
    best = -1.0;
    for (i, p) in pts.iter().enumerate() {
        if i == p0 || i == p1 {
            continue;
        }
        let a2 = u.cross(&(p - pts[p0])).norm_squared();
        if a2 > best {
            best = a2;
            p2 = i;
        }
    }
    if p2 == p0 || best <= tol * tol {
        // Nearly collinear: the hull is the segment between the extreme
        // projections onto u.
        let (lo, hi) = extremes_along(pts, u);
        if lo == hi {
            return Hull3::degenerate(HullDim::Point, vec![lo]);
        }
        let mut ends = vec![lo, hi];
        ends.sort_unstable();
        return Hull3::degenerate(HullDim::Line, ends);
    }

    let seed = Face::new(p0, p1, p2, pts, tol);

    // p3: farthest from the seed plane by |signed distance|.
    let mut p3 = p0;
    best = -1.0;
    for (i, p) in pts.iter().enumerate() {
        if i == p0 || i == p1 || i == p2 {
            continue;
        }
        let sd = seed.signed_distance(*p).abs();
        if sd > best {
            best = sd;
            p3 = i;
        }
    }
    if p3 == p0 || best <= tol {
        // Coplanar(-ish). Return a safe superset of candidate hull vertices:
        // extrema along the plane normal, two tangents, and one edge.
        let mut out = vec![p0, p1, p2];
        let nrm = seed.normal;
        let dirs = [
            nrm,
            u.cross(&nrm),
            (pts[p2] - pts[p0]).cross(&nrm),
            pts[p2] - pts[p1],
        ];
        for dir in dirs {
            if dir.norm_squared() <= tol * tol {
                continue;
            }
            let (lo, hi) = extremes_along(pts, dir);
            out.push(lo);
            out.push(hi);
        }
        out.sort_unstable();
        out.dedup();
        return Hull3::degenerate(HullDim::Plane, out);
    }

    // Orient the seed so p3 lies behind it, then build the tetrahedron with
    // every face outward.
    let (s1, s2) = if seed.signed_distance(pts[p3]) > 0.0 {
        (p2, p1)
    } else {
        (p1, p2)
    };
    let mut faces = Vec::with_capacity(32);
    faces.push(Face::new(p0, s1, s2, pts, tol));
    faces.push(Face::new(p0, s2, p3, pts, tol));
    faces.push(Face::new(s2, s1, p3, pts, tol));
    faces.push(Face::new(s1, p0, p3, pts, tol));

    // Assign each remaining point to the face it is farthest outside of.
    for i in 0..n {
        if i == p0 || i == p1 || i == p2 || i == p3 {
            continue;
        }
        let mut best_dist = tol;
        let mut best_face = None;
        for (f, face) in faces.iter().enumerate() {
            if !face.alive {
                continue;
            }
            let sd = face.signed_distance(pts[i]);
            if sd > best_dist {
                best_dist = sd;
                best_face = Some(f);
            }
        }
        if let Some(f) = best_face {
            faces[f].outside.push(i);
        }
    }

    // *** Main loop: expand towards the farthest outside point, cut away the
    // visible cap, and stitch new faces along its horizon.
    loop {
        // Face whose outside set reaches farthest.
        let mut best_face = None;
        let mut best_reach = -1.0;
        for (f, face) in faces.iter().enumerate() {
            if !face.alive || face.outside.is_empty() {
                continue;
            }
            let reach = face
                .outside
                .iter()
                .map(|&i| face.signed_distance(pts[i]))
                .fold(-1.0, f64::max);
            if reach > best_reach {
                best_reach = reach;
                best_face = Some(f);
            }
        }
        let Some(fi) = best_face else {
            break;
        };

        // Eye: the farthest point of that face's outside set.
        let eye = {
            let face = &faces[fi];
            let mut eye = face.outside[0];
            let mut far = -1.0;
            for &i in &face.outside {
                let sd = face.signed_distance(pts[i]);
                if sd > far {
                    far = sd;
                    eye = i;
                }
            }
            eye
        };
        let eye_p = pts[eye];

        // Kill every face the eye can see.
        let mut visible = Vec::with_capacity(16);
        for (f, face) in faces.iter_mut().enumerate() {
            if face.alive && face.visible_from(eye_p, tol) {
                face.alive = false;
                visible.push(f);
            }
        }

        // Horizon: directed edges used exactly once among the visible faces
        // and never in reverse. These bound the hole left by the cap.
        let mut count: HashMap<(usize, usize), u32> = HashMap::new();
        for &f in &visible {
            let face = &faces[f];
            for e in [(face.a, face.b), (face.b, face.c), (face.c, face.a)] {
                *count.entry(e).or_insert(0) += 1;
            }
        }
        let mut horizon: Vec<(usize, usize)> = count
            .iter()
            .filter(|&(&(u, v), &c_uv)| {
                c_uv == 1 && count.get(&(v, u)).copied().unwrap_or(0) == 0
            })
            .map(|(&e, _)| e)
            .collect();
        // Fix the stitch order so the face array is a pure function of the
        // input, not of hash iteration.
        horizon.sort_unstable();

        // Stitch (u, v, eye) over each horizon edge; orientation is
        // inherited from the dead faces.
        let mut new_faces = Vec::with_capacity(horizon.len());
        for (hu, hv) in horizon {
            let nf = Face::new(hu, hv, eye, pts, tol);
            if !nf.alive {
                continue;
            }
            faces.push(nf);
            new_faces.push(faces.len() - 1);
        }

        // Pool the orphaned outside points (minus the eye) and re-bin them
        // against the new faces; points that see nothing are now interior.
        let mut pool = Vec::new();
        for &f in &visible {
            let outside = std::mem::take(&mut faces[f].outside);
            pool.extend(outside.into_iter().filter(|&i| i != eye));
        }
        pool.sort_unstable();
        pool.dedup();
        for i in pool {
            let mut best_dist = tol;
            let mut best_new = None;
            for &f in &new_faces {
                if !faces[f].alive {
                    continue;
                }
                let sd = faces[f].signed_distance(pts[i]);
                if sd > best_dist {
                    best_dist = sd;
                    best_new = Some(f);
                }
            }
            if let Some(f) = best_new {
                faces[f].outside.push(i);
            }
        }
    }

    // Collect the surviving triangulation and its vertex set.
    faces.retain(|f| f.alive);
    let mut vertices: Vec<usize> = faces
        .iter()
        .flat_map(|f| [f.a, f.b, f.c])
        .collect();
    vertices.sort_unstable();
    vertices.dedup();

    Hull3 {
        dim: HullDim::Solid,
        vertices,
        faces,
    }
}
