mod precision;
mod text;

pub use precision::Precision;
pub use text::SEPARATOR;

use crate::error::Result;
use crate::math::Point3;

/// Canonical quantized form of a 3D coordinate.
///
/// Each axis is stored as the fixed-point integer `round(value * 10^p)`.
/// Two coordinates produce equal keys iff their per-axis rounded values are
/// equal at the same precision, so `-0.0001` and `0.0` share a key at
/// precision 3. The textual form (`Display`) is `"x,y,z"` with exactly `p`
/// fractional digits per token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GeometricKey {
    components: [i64; 3],
    precision: Precision,
}

impl GeometricKey {
    pub(crate) fn from_components(components: [i64; 3], precision: Precision) -> Self {
        Self {
            components,
            precision,
        }
    }

    /// Returns the fixed-point components `[x, y, z]`.
    #[must_use]
    pub fn components(&self) -> [i64; 3] {
        self.components
    }

    /// Returns the precision the key was built at.
    #[must_use]
    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Returns the snapped coordinate the key stands for.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_point(&self) -> Point3 {
        let scale = self.precision.scale() as f64;
        let [x, y, z] = self.components;
        Point3::new(x as f64 / scale, y as f64 / scale, z as f64 / scale)
    }
}

/// Quantizes `point` to `precision` fractional decimal digits.
///
/// This is the stateless form of [`GeometricMap::key_of`](crate::map::GeometricMap::key_of):
/// keys computed here compare equal to keys from any map of the same
/// precision.
///
/// # Errors
///
/// Returns [`QuantizeError::InvalidCoordinate`](crate::error::QuantizeError::InvalidCoordinate)
/// for non-finite input and
/// [`QuantizeError::PrecisionOverflow`](crate::error::QuantizeError::PrecisionOverflow)
/// if `precision` exceeds [`MAX_PRECISION`](crate::math::MAX_PRECISION) or a
/// scaled value leaves the `i64` range.
pub fn quantize(point: &Point3, precision: u32) -> Result<GeometricKey> {
    Precision::new(precision)?.quantize(point)
}
