//! Timing and accuracy probe on a rotated box cloud.
//!
//! Draws a reproducible cloud whose true minimum box is known by
//! construction, runs the full solve, and prints how close the search got
//! and how long each stage took.

use std::time::Instant;

use obbox::pipeline::{solve, SolveCfg};
use obbox::rand3::{draw_box_cloud, CloudCfg, ReplayToken};

fn main() {
    let cloud_cfg = CloudCfg {
        yaw: 0.52,
        points_per_face: 64,
        duplicates: 40,
        ..CloudCfg::default()
    };
    let pts = draw_box_cloud(&cloud_cfg, ReplayToken { seed: 2024, index: 0 });
    let e = cloud_cfg.extents;
    let true_volume = e.x * e.y * e.z;

    let cfg = SolveCfg {
        merge_tol: Some(cloud_cfg.dup_tol),
        steps: 9,
        passes: 3,
        ..SolveCfg::default()
    };

    let start = Instant::now();
    let sol = solve(&pts, &cfg).expect("solve succeeds on a box cloud");
    let elapsed_ms = start.elapsed().as_secs_f64() * 1e3;

    println!(
        "points={} unique={} hull_dim={} principal={}",
        sol.n_input,
        sol.n_unique,
        sol.hull_dim.code(),
        sol.n_principal
    );
    println!(
        "volume={:.9} true={:.9} excess={:.3e}",
        sol.obb.volume(),
        true_volume,
        sol.obb.volume() - true_volume
    );
    println!(
        "theta={:.6} phi={:.6} psi={:.6} elapsed_ms={:.2}",
        sol.obb.angles.theta, sol.obb.angles.phi, sol.obb.angles.psi, elapsed_ms
    );
}
