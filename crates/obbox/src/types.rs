//! Core geometric types shared across the pipeline.
//!
//! - `HullDim`: in-band degeneracy report for the hull builders.
//! - `Indexed2`: a projected 2D point that remembers which 3D point it
//!   came from.
//! - `Axes`: an orthonormal world frame (normalisation enforced).
//! - `BoundBox`: min/max extents, possibly empty.
//! - `Angles`: the (theta, phi, psi) rotation triple of a solved box.

use nalgebra::{Vector2, Vector3};

use crate::util::unit_or_none;

/// Number of topological dimensions carved out by a hull.
///
/// Ordered so that callers can ask for "at least a polygon" with `>=`.
/// `code()` maps onto the conventional -1..=3 dimension codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum HullDim {
    /// Not enough usable points; the caller holds the set verbatim.
    TooFew,
    /// One unique point survives.
    Point,
    /// Collinear; two extreme endpoints span the set.
    Line,
    /// Coplanar (3D) or a polygon with positive area (2D).
    Plane,
    /// A full 3D hull.
    Solid,
}

impl HullDim {
    /// Integer dimension code: -1, 0, 1, 2 or 3.
    #[inline]
    pub fn code(self) -> i32 {
        match self {
            HullDim::TooFew => -1,
            HullDim::Point => 0,
            HullDim::Line => 1,
            HullDim::Plane => 2,
            HullDim::Solid => 3,
        }
    }
}

/// 2D point tagged with the index of the 3D point it was projected from.
#[derive(Clone, Copy, Debug)]
pub struct Indexed2 {
    pub p: Vector2<f64>,
    pub idx: usize,
}

impl Indexed2 {
    #[inline]
    pub fn new(x: f64, y: f64, idx: usize) -> Self {
        Self {
            p: Vector2::new(x, y),
            idx,
        }
    }

    /// Lexicographic (x, y) order with the origin index as a final tie-break,
    /// so sorts are total even with duplicate coordinates.
    pub fn lex_cmp(&self, other: &Self) -> std::cmp::Ordering {
        use std::cmp::Ordering;
        self.p
            .x
            .partial_cmp(&other.p.x)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.p.y.partial_cmp(&other.p.y).unwrap_or(Ordering::Equal))
            .then_with(|| self.idx.cmp(&other.idx))
    }
}

/// Right-handed orthonormal frame in world coordinates.
///
/// Invariants:
/// - Each axis is unit length (constructors normalise).
/// - Axes are pairwise orthogonal for every frame produced by this crate;
///   `is_orthonormal` lets tests assert it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Axes {
    pub x: Vector3<f64>,
    pub y: Vector3<f64>,
    pub z: Vector3<f64>,
}

impl Default for Axes {
    fn default() -> Self {
        Self {
            x: Vector3::new(1.0, 0.0, 0.0),
            y: Vector3::new(0.0, 1.0, 0.0),
            z: Vector3::new(0.0, 0.0, 1.0),
        }
    }
}

impl Axes {
    /// Build a frame from three directions, normalising each. Axes that fail
    /// to normalise fall back to the corresponding identity axis.
    pub fn new(x: Vector3<f64>, y: Vector3<f64>, z: Vector3<f64>) -> Self {
        let id = Axes::default();
        Self {
            x: unit_or_none(x).unwrap_or(id.x),
            y: unit_or_none(y).unwrap_or(id.y),
            z: unit_or_none(z).unwrap_or(id.z),
        }
    }

    /// Unit length and pairwise orthogonality, both within `eps`.
    pub fn is_orthonormal(&self, eps: f64) -> bool {
        (self.x.norm() - 1.0).abs() <= eps
            && (self.y.norm() - 1.0).abs() <= eps
            && (self.z.norm() - 1.0).abs() <= eps
            && self.x.dot(&self.y).abs() <= eps
            && self.y.dot(&self.z).abs() <= eps
            && self.z.dot(&self.x).abs() <= eps
    }
}

/// Axis-aligned extents, `min` and `max` componentwise.
///
/// The default box is empty (`min = +inf`, `max = -inf`) and contains
/// nothing; `append` seeds it from the first point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundBox {
    pub min: Vector3<f64>,
    pub max: Vector3<f64>,
}

impl Default for BoundBox {
    fn default() -> Self {
        Self {
            min: Vector3::repeat(f64::INFINITY),
            max: Vector3::repeat(f64::NEG_INFINITY),
        }
    }
}

impl BoundBox {
    #[inline]
    pub fn new(min: Vector3<f64>, max: Vector3<f64>) -> Self {
        Self { min, max }
    }

    /// min <= max on every component.
    #[inline]
    pub fn valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z
    }

    #[inline]
    pub fn empty(&self) -> bool {
        !self.valid()
    }

    /// An empty box contains nothing.
    pub fn contains(&self, p: Vector3<f64>) -> bool {
        if self.empty() {
            return false;
        }
        p.x >= self.min.x
            && p.y >= self.min.y
            && p.z >= self.min.z
            && p.x <= self.max.x
            && p.y <= self.max.y
            && p.z <= self.max.z
    }

    /// Grow to include `p`; returns whether the box changed.
    pub fn append(&mut self, p: Vector3<f64>) -> bool {
        if self.empty() {
            self.min = p;
            self.max = p;
            return true;
        }
        if self.contains(p) {
            return false;
        }
        self.min = self.min.inf(&p);
        self.max = self.max.sup(&p);
        true
    }

    /// Componentwise extent (max - min). Meaningless for an empty box.
    #[inline]
    pub fn span(&self) -> Vector3<f64> {
        self.max - self.min
    }
}

/// Rotation triple of a solved oriented box, all radians.
///
/// `theta` is heading (yaw about world +z), `phi` declination from the xy
/// plane, `psi` the in-plane roll about the view axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Angles {
    pub theta: f64,
    pub phi: f64,
    pub psi: f64,
}

impl Angles {
    #[inline]
    pub fn new(theta: f64, phi: f64, psi: f64) -> Self {
        Self { theta, phi, psi }
    }
}
