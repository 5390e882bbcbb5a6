//! Tolerance defaults (internal).
//!
//! Policy
//! - The user-facing merge/degeneracy tolerance is always an explicit call
//!   parameter. Only the hard numerical floors live here as fixed constants,
//!   so there is no tolerance juggling at call sites.

/// Magnitude below which a vector cannot be normalised.
pub(crate) const NORM_EPS: f64 = 1e-15;

/// Fallback tolerance for callers that have no better idea (length units).
pub(crate) const DEFAULT_TOL: f64 = 1e-9;
