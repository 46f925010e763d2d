//! Welds a small line network and a pair of meshes, printing the result.
//!
//! Usage:
//! ```text
//! cargo run --example weld                       # precision 3
//! cargo run --example weld -- 1                  # coarser grid
//! RUST_LOG=geokey=trace cargo run --example weld # per-vertex logging
//! ```

use geokey::operations::{unique_edges, IndexedMesh, MeshesJoinAndWeld, NetworkFromLines};
use geokey::{MapParams, Point3, Result};

fn main() -> Result<()> {
    // Default: WARN for everything, DEBUG for geokey.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("geokey=debug".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let precision = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(geokey::math::DEFAULT_PRECISION);
    let params = MapParams::new(precision);

    let p = Point3::new;
    let lines = [
        (p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)),
        (p(1.0, 0.0, 0.0), p(2.0, 0.0, 0.0)),
        (p(0.0, 0.0, 0.0), p(0.0, 0.0, 1.0)),
        (p(1.04, 0.0, 0.0), p(0.0, 0.0, 0.0)),
    ];
    let network = NetworkFromLines::new(&lines, params).execute()?;
    println!("network at precision {precision}:");
    for (i, v) in network.vertices.iter().enumerate() {
        println!("  v{i}: ({}, {}, {})", v.x, v.y, v.z);
    }
    println!("  edges: {:?}", network.edges);
    println!("  unique edges: {:?}", unique_edges(&network.edges));

    let left = IndexedMesh::new(
        vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0), p(0.0, 1.0, 0.0)],
        vec![vec![0, 1, 2, 3]],
    );
    let right = IndexedMesh::new(
        vec![p(1.0004, 0.0, 0.0), p(2.0, 0.0, 0.0), p(2.0, 1.0, 0.0), p(0.9996, 1.0, 0.0)],
        vec![vec![0, 1, 2, 3]],
    );
    let mesh = MeshesJoinAndWeld::new(&[left, right], params).execute()?;
    println!("mesh: {} vertices, faces {:?}", mesh.vertices.len(), mesh.faces);

    Ok(())
}
