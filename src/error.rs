use thiserror::Error;

use crate::math::Axis;

/// Top-level error type for geokey.
#[derive(Debug, Error)]
pub enum GeokeyError {
    #[error(transparent)]
    Quantize(#[from] QuantizeError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors raised while turning a coordinate into a geometric key.
///
/// Each one is local to the offending coordinate; the map that was being
/// written to is left exactly as it was.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuantizeError {
    #[error("invalid coordinate: {axis} = {value} is not finite")]
    InvalidCoordinate { axis: Axis, value: f64 },

    #[error("precision {precision} cannot be represented as a fixed-width key")]
    PrecisionOverflow { precision: u32 },

    #[error("malformed geometric key: {0}")]
    MalformedKey(String),
}

/// Errors related to bulk build operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience type alias for results using [`GeokeyError`].
pub type Result<T> = std::result::Result<T, GeokeyError>;
