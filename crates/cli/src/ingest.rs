//! CSV ingestion for surface scans.
//!
//! Rows are `face_number, px, py, pz, nx, ny, nz`. Only the point columns
//! feed the solver; face numbers and normals are carried by the format but
//! not needed here. Header lines and junk rows parse to nulls and are
//! dropped with a count.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use obbox::Vec3;
use polars::prelude::*;

const COLUMNS: [&str; 7] = ["face", "px", "py", "pz", "nx", "ny", "nz"];

/// Read the point column triple from a scan CSV.
///
/// Returns `(points, skipped_rows)`; a skipped row is any line whose point
/// fields failed to parse as numbers (headers, comments, short lines).
pub fn read_points(path: &Path) -> Result<(Vec<Vec3<f64>>, usize)> {
    let schema = Schema::from_iter(
        COLUMNS
            .iter()
            .map(|name| Field::new((*name).into(), DataType::Float64)),
    );

    let df = LazyCsvReader::new(path)
        .with_has_header(false)
        .with_schema(Some(Arc::new(schema)))
        .with_ignore_errors(true)
        .with_truncate_ragged_lines(true)
        .finish()
        .with_context(|| format!("opening {}", path.display()))?
        .collect()
        .with_context(|| format!("reading {}", path.display()))?;

    let xs = df.column("px")?.f64()?;
    let ys = df.column("py")?.f64()?;
    let zs = df.column("pz")?.f64()?;

    let mut pts = Vec::with_capacity(df.height());
    let mut skipped = 0usize;
    for ((x, y), z) in xs.into_iter().zip(ys).zip(zs) {
        match (x, y, z) {
            (Some(x), Some(y), Some(z)) => pts.push(Vec3::new(x, y, z)),
            _ => skipped += 1,
        }
    }
    Ok((pts, skipped))
}
