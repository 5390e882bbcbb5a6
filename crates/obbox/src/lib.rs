//! Minimum oriented bounding boxes for 3D point clouds.
//!
//! Pipeline
//! - `cloud`: online duplicate merging under a Euclidean tolerance.
//! - `hull3`: incremental 3D convex hull (quickhull with horizon stitching).
//! - `hull2` / `project` / `rect`: planar projection, monotone-chain hull,
//!   and rotating-calipers minimum rectangle.
//! - `obb`: nested grid search over heading/pitch that composes the planar
//!   stages into a minimum-volume oriented box.
//! - `pipeline`: the end-to-end solve (merge, hull, OBB) with phase logging.
//!
//! All predicates are floating-point with explicit tolerances; degeneracy is
//! reported in-band through dimension codes rather than errors.

pub mod cloud;
pub mod hull2;
pub mod hull3;
pub mod obb;
pub mod pipeline;
pub mod project;
pub mod rand3;
pub mod rect;
pub mod types;

pub(crate) mod cfg;
mod util;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Convenience re-exports so callers read the same vocabulary as the modules.
pub use nalgebra::{Vector2 as Vec2, Vector3 as Vec3};
pub use types::{Angles, Axes, BoundBox, HullDim, Indexed2};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::cloud::{merge_points, MergeBuckets};
    pub use crate::hull2::{hull2d, Hull2};
    pub use crate::hull3::{hull3d, Face, Hull3};
    pub use crate::obb::{axis_aligned_bound_box, min_rotated_obb, Obb};
    pub use crate::pipeline::{solve, SolveCfg, Solution};
    pub use crate::project::{project_to_plane, project_with_frame, Frame};
    pub use crate::rect::{min_enclosing_rect, MinRect};
    pub use crate::types::{Angles, Axes, BoundBox, HullDim, Indexed2};
    pub use nalgebra::{Vector2 as Vec2, Vector3 as Vec3};
}
