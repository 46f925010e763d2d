use std::fmt;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// Number of fractional decimal digits used when none is configured.
pub const DEFAULT_PRECISION: u32 = 3;

/// Largest supported precision.
///
/// `10^15` is the largest power of ten an `f64` holds exactly, and an `f64`
/// carries no more than 15 to 17 significant decimal digits anyway.
pub const MAX_PRECISION: u32 = 15;

/// One of the three coordinate axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in storage order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Returns the component of `point` along this axis.
    #[must_use]
    pub fn of(self, point: &Point3) -> f64 {
        match self {
            Axis::X => point.x,
            Axis::Y => point.y,
            Axis::Z => point.z,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        f.write_str(name)
    }
}
