use rustc_hash::FxHashMap;

use crate::error::Result;
use crate::key::{GeometricKey, Precision};
use crate::math::Point3;

/// Associates caller-defined payloads with geometric locations.
///
/// Used to identify external elements (for example CAD objects) by the
/// coordinates they sit at. Unlike [`GeometricMap`](super::GeometricMap),
/// inserting at an occupied key replaces the payload.
#[derive(Debug, Clone)]
pub struct GeometricLookup<T> {
    precision: u32,
    entries: FxHashMap<GeometricKey, T>,
}

impl<T> GeometricLookup<T> {
    /// Creates an empty lookup keyed at `precision` fractional digits.
    #[must_use]
    pub fn new(precision: u32) -> Self {
        Self {
            precision,
            entries: FxHashMap::default(),
        }
    }

    /// Returns the number of occupied keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no payload is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stores `payload` at `point`, returning the payload it replaced.
    ///
    /// # Errors
    ///
    /// Returns a quantization error for non-finite input or an
    /// unrepresentable precision.
    pub fn insert(&mut self, point: &Point3, payload: T) -> Result<Option<T>> {
        let key = self.key_of(point)?;
        Ok(self.entries.insert(key, payload))
    }

    /// Returns the payload stored at `point`'s key.
    ///
    /// # Errors
    ///
    /// Returns a quantization error for non-finite input or an
    /// unrepresentable precision.
    pub fn get(&self, point: &Point3) -> Result<Option<&T>> {
        let key = self.key_of(point)?;
        Ok(self.entries.get(&key))
    }

    /// Removes and returns the payload stored at `point`'s key.
    ///
    /// # Errors
    ///
    /// Returns a quantization error for non-finite input or an
    /// unrepresentable precision.
    pub fn remove(&mut self, point: &Point3) -> Result<Option<T>> {
        let key = self.key_of(point)?;
        Ok(self.entries.remove(&key))
    }

    fn key_of(&self, point: &Point3) -> Result<GeometricKey> {
        Precision::new(self.precision)?.quantize(point)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn finds_payload_at_coincident_point() {
        let mut lookup = GeometricLookup::new(3);
        lookup.insert(&p(1.0, 2.0, 3.0), "guid-a").unwrap();
        lookup.insert(&p(4.0, 5.0, 6.0), "guid-b").unwrap();

        assert_eq!(lookup.get(&p(1.0003, 2.0, 2.9999)).unwrap(), Some(&"guid-a"));
        assert_eq!(lookup.get(&p(7.0, 7.0, 7.0)).unwrap(), None);
    }

    #[test]
    fn insert_replaces_payload() {
        let mut lookup = GeometricLookup::new(2);
        assert_eq!(lookup.insert(&p(0.0, 0.0, 0.0), 1).unwrap(), None);
        assert_eq!(lookup.insert(&p(0.001, 0.0, 0.0), 2).unwrap(), Some(1));
        assert_eq!(lookup.len(), 1);
    }

    #[test]
    fn remove_empties_the_key() {
        let mut lookup = GeometricLookup::new(3);
        lookup.insert(&p(1.0, 1.0, 1.0), vec![1, 2]).unwrap();
        assert_eq!(lookup.remove(&p(1.0, 1.0, 1.0)).unwrap(), Some(vec![1, 2]));
        assert!(lookup.is_empty());
    }

    #[test]
    fn invalid_point_is_rejected() {
        let mut lookup = GeometricLookup::new(3);
        assert!(lookup.insert(&p(f64::NAN, 0.0, 0.0), ()).is_err());
        assert!(lookup.is_empty());
    }
}
