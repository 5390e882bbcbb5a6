//! Random box-shaped point clouds (deterministic, replayable).
//!
//! Purpose
//! - Provide a small, reproducible sampler for benches and property tests:
//!   clouds whose true minimum box is known by construction, with optional
//!   surface scatter and near-duplicate noise to exercise the merge stage.
//!
//! Model
//! - Start from the corners of an axis-aligned box, scatter extra points
//!   on its faces, rotate everything by a heading about +z, then append
//!   near-duplicates of random points within a fraction of `dup_tol`.
//! - Determinism uses a replay token `(seed, index)` mixed into one RNG.

use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Box-cloud sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct CloudCfg {
    /// Box extents before rotation.
    pub extents: Vector3<f64>,
    /// Heading applied to the whole cloud (radians about +z).
    pub yaw: f64,
    /// Extra points scattered on each of the six faces.
    pub points_per_face: usize,
    /// Number of near-duplicate points appended at the end.
    pub duplicates: usize,
    /// Near-duplicates land strictly within this distance of their base.
    pub dup_tol: f64,
}

impl Default for CloudCfg {
    fn default() -> Self {
        Self {
            extents: Vector3::new(2.0, 1.0, 1.0),
            yaw: 0.0,
            points_per_face: 16,
            duplicates: 0,
            dup_tol: 1e-6,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw a rotated box cloud. The corners always come first, so the true
/// minimum volume is `extents.x * extents.y * extents.z` regardless of the
/// scatter.
pub fn draw_box_cloud(cfg: &CloudCfg, token: ReplayToken) -> Vec<Vector3<f64>> {
    let mut rng = token.to_std_rng();
    let e = cfg.extents;
    let mut pts = Vec::with_capacity(8 + 6 * cfg.points_per_face + cfg.duplicates);

    for z in [0.0, e.z] {
        for y in [0.0, e.y] {
            for x in [0.0, e.x] {
                pts.push(Vector3::new(x, y, z));
            }
        }
    }

    // Face scatter: pin one coordinate to a face plane, draw the others.
    for axis in 0..3 {
        for &side in &[0.0, 1.0] {
            for _ in 0..cfg.points_per_face {
                let mut p = Vector3::new(
                    rng.gen_range(0.0..=1.0) * e.x,
                    rng.gen_range(0.0..=1.0) * e.y,
                    rng.gen_range(0.0..=1.0) * e.z,
                );
                p[axis] = side * e[axis];
                pts.push(p);
            }
        }
    }

    let (s, c) = cfg.yaw.sin_cos();
    for p in &mut pts {
        *p = Vector3::new(c * p.x - s * p.y, s * p.x + c * p.y, p.z);
    }

    let n_base = pts.len();
    for _ in 0..cfg.duplicates {
        let base = pts[rng.gen_range(0..n_base)];
        let jitter = Vector3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        ) * (0.4 * cfg.dup_tol);
        pts.push(base + jitter);
    }

    pts
}
