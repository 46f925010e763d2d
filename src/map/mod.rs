mod geometric_map;
mod lookup;

pub use geometric_map::GeometricMap;
pub use lookup::GeometricLookup;

use crate::math::DEFAULT_PRECISION;

/// Parameters controlling how coordinates are keyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapParams {
    /// Number of fractional decimal digits kept per axis.
    pub precision: u32,
}

impl MapParams {
    /// Creates parameters with the given precision.
    #[must_use]
    pub fn new(precision: u32) -> Self {
        Self { precision }
    }
}

impl Default for MapParams {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
        }
    }
}
