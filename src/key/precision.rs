use crate::error::{QuantizeError, Result};
use crate::math::{Axis, Point3, MAX_PRECISION};

use super::GeometricKey;

/// Powers of ten for every supported precision.
const SCALES: [i64; MAX_PRECISION as usize + 1] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
    10_000_000_000,
    100_000_000_000,
    1_000_000_000_000,
    10_000_000_000_000,
    100_000_000_000_000,
    1_000_000_000_000_000,
];

/// `2^63`; rounded magnitudes must stay below it.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Number of fractional decimal digits kept per axis.
///
/// A precision of `p` partitions space into axis-aligned cubes with edge
/// length `10^-p`. The exact binary value of each coordinate is rounded half
/// away from zero, so at precision 3 `0.0005` snaps to `0.001` and `-0.0005`
/// snaps to `-0.001`, while `1.54345` (stored just below the midpoint) snaps
/// to `1.5434` at precision 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Precision {
    digits: u32,
}

impl Precision {
    /// Creates a precision of `digits` fractional decimal digits.
    ///
    /// # Errors
    ///
    /// Returns [`QuantizeError::PrecisionOverflow`] if `digits` exceeds
    /// [`MAX_PRECISION`].
    pub fn new(digits: u32) -> Result<Self> {
        if digits > MAX_PRECISION {
            return Err(QuantizeError::PrecisionOverflow { precision: digits }.into());
        }
        Ok(Self { digits })
    }

    /// Returns the number of fractional digits.
    #[must_use]
    pub fn digits(self) -> u32 {
        self.digits
    }

    /// Returns `10^digits` as an integer.
    #[must_use]
    pub fn scale(self) -> i64 {
        SCALES[self.digits as usize]
    }

    /// Edge length of one quantization cell, `10^-digits`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn cell_size(self) -> f64 {
        1.0 / self.scale() as f64
    }

    /// Quantizes a point at this precision.
    ///
    /// # Errors
    ///
    /// Returns [`QuantizeError::InvalidCoordinate`] if any axis is NaN or
    /// infinite, and [`QuantizeError::PrecisionOverflow`] if a scaled axis
    /// value does not fit the fixed-point representation.
    pub fn quantize(self, point: &Point3) -> Result<GeometricKey> {
        let mut components = [0i64; 3];
        for (slot, axis) in components.iter_mut().zip(Axis::ALL) {
            *slot = self.quantize_axis(axis, axis.of(point))?;
        }
        Ok(GeometricKey::from_components(components, self))
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::float_cmp
    )]
    fn quantize_axis(self, axis: Axis, value: f64) -> Result<i64> {
        if !value.is_finite() {
            return Err(QuantizeError::InvalidCoordinate { axis, value }.into());
        }
        let scale = self.scale() as f64;
        // value * scale == product + error exactly.
        let product = value * scale;
        let error = value.mul_add(scale, -product);
        // f64::round is half away from zero, applied to the exact product:
        // a product that rounded onto a midpoint is nudged back by `error`.
        let mut rounded = product.round();
        let residual = product - rounded;
        if residual == -0.5 && error < 0.0 {
            rounded -= 1.0;
        } else if residual == 0.5 && error > 0.0 {
            rounded += 1.0;
        }
        // Symmetric so every key's magnitude fits an i64.
        if rounded.abs() >= I64_BOUND {
            return Err(QuantizeError::PrecisionOverflow {
                precision: self.digits,
            }
            .into());
        }
        Ok(rounded as i64)
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self {
            digits: crate::math::DEFAULT_PRECISION,
        }
    }
}
