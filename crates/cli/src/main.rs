use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use obbox::pipeline::{solve, SolveCfg, Solution};
use obbox::Vec3;
use serde::Serialize;
use tracing_subscriber::fmt::SubscriberBuilder;

mod ingest;

#[derive(Parser)]
#[command(name = "obbox")]
#[command(about = "Minimum oriented bounding box of a scanned point cloud")]
struct Cmd {
    /// Merge and degeneracy tolerance, in length units
    #[arg(long, short = 'e', default_value_t = 1e-9)]
    epsilon: f64,

    /// Grid samples per angle per search pass
    #[arg(long, short = 's', default_value_t = 7)]
    steps: usize,

    /// Search refinement passes
    #[arg(long, short = 'p', default_value_t = 1)]
    passes: usize,

    /// Merge near-duplicate points before solving
    #[arg(long, short = 'm')]
    merge_points: bool,

    /// Debug-level logging
    #[arg(long, short = 'v')]
    verbose: bool,

    /// CSV file of `face,px,py,pz,nx,ny,nz` rows
    input: PathBuf,
}

#[derive(Serialize)]
struct BoxReport {
    min: [f64; 3],
    max: [f64; 3],
}

#[derive(Serialize)]
struct ObbReport {
    min: [f64; 3],
    max: [f64; 3],
    axes: [[f64; 3]; 3],
    angles: [f64; 3],
    volume: f64,
}

/// Stdout summary of a solve; everything downstream tooling needs.
#[derive(Serialize)]
struct Summary {
    points: usize,
    unique: usize,
    hull_dim: i32,
    principal: usize,
    aabb: BoxReport,
    obb: ObbReport,
}

fn triple(v: &Vec3<f64>) -> [f64; 3] {
    [v.x, v.y, v.z]
}

impl Summary {
    fn from_solution(sol: &Solution) -> Self {
        Self {
            points: sol.n_input,
            unique: sol.n_unique,
            hull_dim: sol.hull_dim.code(),
            principal: sol.n_principal,
            aabb: BoxReport {
                min: triple(&sol.aabb.min),
                max: triple(&sol.aabb.max),
            },
            obb: ObbReport {
                min: triple(&sol.obb.local.min),
                max: triple(&sol.obb.local.max),
                axes: [
                    triple(&sol.obb.axes.x),
                    triple(&sol.obb.axes.y),
                    triple(&sol.obb.axes.z),
                ],
                angles: [
                    sol.obb.angles.theta,
                    sol.obb.angles.phi,
                    sol.obb.angles.psi,
                ],
                volume: sol.obb.volume(),
            },
        }
    }
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .init();

    tracing::info!(input = %cmd.input.display(), "reading scan");
    let (pts, skipped) = ingest::read_points(&cmd.input)?;
    tracing::info!(points = pts.len(), skipped, "scan read");
    if pts.is_empty() {
        bail!("no points in {}", cmd.input.display());
    }

    let cfg = SolveCfg {
        merge_tol: cmd.merge_points.then_some(cmd.epsilon),
        hull_tol: cmd.epsilon,
        steps: cmd.steps,
        passes: cmd.passes,
    };
    let sol = solve(&pts, &cfg)?;

    println!(
        "{}",
        serde_json::to_string_pretty(&Summary::from_solution(&sol))?
    );
    Ok(())
}
