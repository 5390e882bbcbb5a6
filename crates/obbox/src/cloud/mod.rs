//! Online duplicate merging for 3D point clouds.
//!
//! Purpose
//! - Collapse any incoming point within `tol` of an already-stored point to
//!   the existing index, without an O(n²) scan.
//!
//! How
//! - Points are bucketed by `floor(|p|² / tol)`. If `|p - q| <= tol` then
//!   `| |p|² - |q|² |` is bounded by the scaled tolerance
//!   `2·tol·(|x|+|y|+|z|)`, so merge candidates for `p` live in a small
//!   window of buckets around its own. Only those survivors take the exact
//!   squared-distance test.

use std::collections::HashMap;
use std::fmt;

use nalgebra::Vector3;


/// Errors surfaced by the merge structure.
#[derive(Debug, Clone, PartialEq)]
pub enum MergeError {
    /// The merge tolerance must be strictly positive.
    NonPositiveTolerance(f64),
}

impl fmt::Display for MergeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeError::NonPositiveTolerance(tol) => {
                write!(f, "merge tolerance must be > 0, got {}", tol)
            }
        }
    }
}

impl std::error::Error for MergeError {}

/// Append-only point store that merges near-duplicates on insert.
///
/// Invariants:
/// - `points`, `mag_sqr` and `scaled_tol` are indexed together.
/// - Every stored id appears exactly once, in the bucket of its `mag_sqr`.
/// - Any two stored points are more than `tol` apart.
#[derive(Debug, Clone)]
pub struct MergeBuckets {
    points: Vec<Vector3<f64>>,
    mag_sqr: Vec<f64>,
    scaled_tol: Vec<f64>,
    buckets: HashMap<i64, Vec<usize>>,
    tol: f64,
    tol_sqr: f64,
    inv_tol: f64,
}

impl MergeBuckets {
    /// Preallocates for `estimated_size` unique points. `tol > 0` required.
    pub fn new(estimated_size: usize, tol: f64) -> Result<Self, MergeError> {
        if !(tol > 0.0) {
            return Err(MergeError::NonPositiveTolerance(tol));
        }
        Ok(Self {
            points: Vec::with_capacity(estimated_size),
            mag_sqr: Vec::with_capacity(estimated_size),
            scaled_tol: Vec::with_capacity(estimated_size),
            buckets: HashMap::new(),
            tol,
            tol_sqr: tol * tol,
            inv_tol: 1.0 / tol,
        })
    }

    #[inline]
    fn bucket_index(&self, mag_sqr: f64) -> i64 {
        (mag_sqr * self.inv_tol).floor() as i64
    }

    /// Insert `p`, merging it into an existing point when one lies within
    /// `tol`. Returns `(merged, index)`: `merged == true` means no storage
    /// was consumed and `index` is the id that now represents `p`. The
    /// earliest registered point wins ties.
    pub fn append(&mut self, p: Vector3<f64>) -> (bool, usize) {
        let msd = p.norm_squared();
        let scaled = 2.0 * self.tol * (p.x.abs() + p.y.abs() + p.z.abs());

        let from = self.bucket_index(msd - scaled);
        let to = self.bucket_index(msd + scaled);
        for bucket in from..=to {
            let Some(candidates) = self.buckets.get(&bucket) else {
                continue;
            };
            for &j in candidates {
                // Quick reject on |p|² before paying for the distance; the
                // wider of the two scaled tolerances keeps it conservative.
                if (self.mag_sqr[j] - msd).abs() <= scaled.max(self.scaled_tol[j])
                    && (p - self.points[j]).norm_squared() <= self.tol_sqr
                {
                    return (true, j);
                }
            }
        }

        let id = self.points.len();
        self.points.push(p);
        self.mag_sqr.push(msd);
        self.scaled_tol.push(scaled);
        self.buckets.entry(self.bucket_index(msd)).or_default().push(id);
        (false, id)
    }

    /// Number of unique points stored so far.
    #[inline]
    pub fn size(&self) -> usize {
        self.points.len()
    }

    /// The unique points, indexed by the ids `append` handed out.
    #[inline]
    pub fn points(&self) -> &[Vector3<f64>] {
        &self.points
    }

    /// Hand the point list to the caller without copying; the bucket
    /// scratch is discarded with `self`.
    #[inline]
    pub fn into_points(self) -> Vec<Vector3<f64>> {
        self.points
    }
}

/// Deduplicate a cloud in one pass.
///
/// Returns `(map, unique)` where `map[i]` is the index in `unique` that now
/// represents input point `i`; `unique.len() == map.iter().max() + 1`.
pub fn merge_points(
    pts: &[Vector3<f64>],
    tol: f64,
    estimated_size: usize,
) -> Result<(Vec<usize>, Vec<Vector3<f64>>), MergeError> {
    let mut buckets = MergeBuckets::new(estimated_size, tol)?;
    let mut map = Vec::with_capacity(pts.len());
    for &p in pts {
        let (_, idx) = buckets.append(p);
        map.push(idx);
    }
    Ok((map, buckets.into_points()))
}
