//! Precision-based geometric keys.
//!
//! Coordinates are snapped to a decimal grid and deduplicated by the
//! resulting [`GeometricKey`], giving stable vertex indices for building
//! edge networks, welded meshes and cell complexes from raw geometry.

pub mod error;
pub mod key;
pub mod map;
pub mod math;
pub mod operations;

pub use error::{GeokeyError, Result};
pub use key::{quantize, GeometricKey, Precision};
pub use map::{GeometricLookup, GeometricMap, MapParams};
pub use math::Point3;
