use std::fmt;
use std::str::FromStr;

use crate::error::QuantizeError;

use super::{GeometricKey, Precision};

/// Separator between axis tokens in the textual key form.
pub const SEPARATOR: char = ',';

impl fmt::Display for GeometricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &component) in self.components.iter().enumerate() {
            if i > 0 {
                write!(f, "{SEPARATOR}")?;
            }
            write_fixed(f, component, self.precision)?;
        }
        Ok(())
    }
}

/// Writes a fixed-point integer as a decimal with exactly `precision` digits.
fn write_fixed(f: &mut fmt::Formatter<'_>, value: i64, precision: Precision) -> fmt::Result {
    let sign = if value < 0 { "-" } else { "" };
    let magnitude = value.unsigned_abs();
    let digits = precision.digits() as usize;
    if digits == 0 {
        return write!(f, "{sign}{magnitude}");
    }
    let scale = precision.scale().unsigned_abs();
    write!(
        f,
        "{sign}{}.{:0width$}",
        magnitude / scale,
        magnitude % scale,
        width = digits
    )
}

impl FromStr for GeometricKey {
    type Err = QuantizeError;

    /// Parses the `"x,y,z"` form produced by `Display`.
    ///
    /// The precision is the number of fractional digits, which must be the
    /// same for all three tokens.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || QuantizeError::MalformedKey(s.to_owned());

        let tokens: Vec<&str> = s.split(SEPARATOR).collect();
        let [x, y, z] = tokens.as_slice() else {
            return Err(malformed());
        };

        let (x, digits) = parse_token(x).ok_or_else(malformed)?;
        let (y, y_digits) = parse_token(y).ok_or_else(malformed)?;
        let (z, z_digits) = parse_token(z).ok_or_else(malformed)?;
        if y_digits != digits || z_digits != digits {
            return Err(malformed());
        }

        let digits = u32::try_from(digits).map_err(|_| malformed())?;
        let precision = Precision::new(digits)
            .map_err(|_| QuantizeError::PrecisionOverflow { precision: digits })?;
        let scale = precision.scale();

        let mut components = [0i64; 3];
        for (slot, (whole, frac, negative)) in components.iter_mut().zip([x, y, z]) {
            let magnitude = whole
                .checked_mul(scale)
                .and_then(|v| v.checked_add(frac))
                .ok_or(QuantizeError::PrecisionOverflow { precision: digits })?;
            *slot = if negative { -magnitude } else { magnitude };
        }

        Ok(GeometricKey::from_components(components, precision))
    }
}

/// Splits one decimal token into `(whole, fraction, negative)` and the
/// number of fractional digits.
fn parse_token(token: &str) -> Option<((i64, i64, bool), usize)> {
    let (negative, body) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token),
    };
    let (whole, frac) = match body.split_once('.') {
        Some((whole, frac)) if !frac.is_empty() => (whole, frac),
        Some(_) => return None,
        None => (body, ""),
    };
    if whole.is_empty() || !is_digits(whole) || !is_digits(frac) {
        return None;
    }
    let whole_value = whole.parse::<i64>().ok()?;
    let frac_value = if frac.is_empty() {
        0
    } else {
        frac.parse::<i64>().ok()?
    };
    Some(((whole_value, frac_value, negative), frac.len()))
}

fn is_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}
