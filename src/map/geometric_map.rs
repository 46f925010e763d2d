use rustc_hash::FxHashMap;

use crate::error::Result;
use crate::key::{GeometricKey, Precision};
use crate::math::Point3;

use super::MapParams;

/// Incremental registry assigning a dense index to every distinct
/// geometric key.
///
/// Indices are zero-based and handed out in order of first occurrence.
/// The first coordinate seen for a key becomes its representative; later
/// coordinates with the same key return the existing index and are
/// otherwise discarded. Entries are never removed or renumbered.
///
/// Every failing call leaves the map unchanged.
#[derive(Debug, Clone)]
pub struct GeometricMap {
    precision: u32,
    indices: FxHashMap<GeometricKey, usize>,
    keys: Vec<GeometricKey>,
    vertices: Vec<Point3>,
}

impl GeometricMap {
    /// Creates an empty map keyed at `precision` fractional digits.
    ///
    /// A precision above [`MAX_PRECISION`](crate::math::MAX_PRECISION) is
    /// accepted here and reported by every call that quantizes.
    #[must_use]
    pub fn new(precision: u32) -> Self {
        Self {
            precision,
            indices: FxHashMap::default(),
            keys: Vec::new(),
            vertices: Vec::new(),
        }
    }

    /// Creates an empty map from parameters.
    #[must_use]
    pub fn with_params(params: MapParams) -> Self {
        Self::new(params.precision)
    }

    /// Returns the configured precision.
    #[must_use]
    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Returns the number of distinct keys registered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns `true` if nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Quantizes `point` at this map's precision without touching the map.
    ///
    /// # Errors
    ///
    /// Returns a quantization error for non-finite input or an
    /// unrepresentable precision.
    pub fn key_of(&self, point: &Point3) -> Result<GeometricKey> {
        Precision::new(self.precision)?.quantize(point)
    }

    /// Registers `point` and returns its index.
    ///
    /// # Errors
    ///
    /// Returns a quantization error for non-finite input or an
    /// unrepresentable precision. Nothing is registered in that case.
    pub fn add(&mut self, point: &Point3) -> Result<usize> {
        let key = self.key_of(point)?;
        Ok(self.insert_key(key, point))
    }

    /// Registers both endpoints of a segment, start first.
    ///
    /// Coincident edges are not merged; see
    /// [`unique_edges`](crate::operations::unique_edges).
    ///
    /// # Errors
    ///
    /// Returns a quantization error if either endpoint is invalid. Both
    /// endpoints are quantized before either is registered, so a failing
    /// edge leaves the map unchanged.
    pub fn add_edge(&mut self, start: &Point3, end: &Point3) -> Result<(usize, usize)> {
        let start_key = self.key_of(start)?;
        let end_key = self.key_of(end)?;
        let u = self.insert_key(start_key, start);
        let v = self.insert_key(end_key, end);
        Ok((u, v))
    }

    /// Registers the vertices of a polygon and returns their indices in
    /// input order, so winding is preserved.
    ///
    /// # Errors
    ///
    /// Returns a quantization error if any point is invalid. All points are
    /// quantized before the first one is registered, so a failing face
    /// leaves the map unchanged.
    pub fn add_face(&mut self, points: &[Point3]) -> Result<Vec<usize>> {
        let keys = points
            .iter()
            .map(|point| self.key_of(point))
            .collect::<Result<Vec<_>>>()?;
        Ok(keys
            .into_iter()
            .zip(points)
            .map(|(key, point)| self.insert_key(key, point))
            .collect())
    }

    /// Registers every point of `points`, returning one index per input.
    ///
    /// # Errors
    ///
    /// Stops at the first invalid point; points before it stay registered.
    pub fn extend<I>(&mut self, points: I) -> Result<Vec<usize>>
    where
        I: IntoIterator<Item = Point3>,
    {
        points.into_iter().map(|point| self.add(&point)).collect()
    }

    /// Returns the index registered for `point`'s key, without registering.
    ///
    /// # Errors
    ///
    /// Returns a quantization error for non-finite input or an
    /// unrepresentable precision.
    pub fn lookup(&self, point: &Point3) -> Result<Option<usize>> {
        let key = self.key_of(point)?;
        Ok(self.indices.get(&key).copied())
    }

    /// Returns `true` if `point` coincides with a registered vertex.
    ///
    /// # Errors
    ///
    /// Same as [`lookup`](Self::lookup).
    pub fn contains(&self, point: &Point3) -> Result<bool> {
        Ok(self.lookup(point)?.is_some())
    }

    /// Representatives in index order: `vertices()[i]` belongs to index `i`.
    #[must_use]
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    /// Returns the representative of `index`, if registered.
    #[must_use]
    pub fn vertex(&self, index: usize) -> Option<&Point3> {
        self.vertices.get(index)
    }

    /// Returns the key of every registered vertex, in index order.
    pub fn keys(&self) -> impl Iterator<Item = GeometricKey> + '_ {
        self.keys.iter().copied()
    }

    /// Returns cell-centre coordinates in index order instead of the raw
    /// representatives.
    #[must_use]
    pub fn snapped_vertices(&self) -> Vec<Point3> {
        self.keys().map(|key| key.to_point()).collect()
    }

    /// Consumes the map and returns the representatives.
    #[must_use]
    pub fn into_vertices(self) -> Vec<Point3> {
        self.vertices
    }

    fn insert_key(&mut self, key: GeometricKey, point: &Point3) -> usize {
        if let Some(&index) = self.indices.get(&key) {
            return index;
        }
        let index = self.vertices.len();
        self.indices.insert(key, index);
        self.keys.push(key);
        self.vertices.push(*point);
        tracing::trace!(index, %key, "registered vertex");
        index
    }
}

impl Default for GeometricMap {
    fn default() -> Self {
        Self::with_params(MapParams::default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{GeokeyError, QuantizeError};
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn add_is_idempotent() {
        let mut map = GeometricMap::new(3);
        let first = map.add(&p(1.0, 2.0, 3.0)).unwrap();
        let second = map.add(&p(1.0, 2.0, 3.0)).unwrap();
        assert_eq!(first, second);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn indices_are_dense_in_first_occurrence_order() {
        let mut map = GeometricMap::new(3);
        assert_eq!(map.add(&p(5.0, 0.0, 0.0)).unwrap(), 0);
        assert_eq!(map.add(&p(1.0, 0.0, 0.0)).unwrap(), 1);
        assert_eq!(map.add(&p(5.0, 0.0, 0.0)).unwrap(), 0);
        assert_eq!(map.add(&p(3.0, 0.0, 0.0)).unwrap(), 2);
        assert_eq!(map.vertices().len(), 3);
    }

    #[test]
    fn first_write_wins() {
        let mut map = GeometricMap::new(3);
        let a = map.add(&p(0.0, 0.0, 0.0)).unwrap();
        let b = map.add(&p(0.000_000_1, 0.0, 0.0)).unwrap();
        assert_eq!(a, b);
        assert_eq!(map.vertices()[a], p(0.0, 0.0, 0.0));
    }

    #[test]
    fn representative_is_raw_input() {
        let mut map = GeometricMap::new(1);
        let index = map.add(&p(0.123, 0.0, 0.0)).unwrap();
        assert_relative_eq!(map.vertices()[index].x, 0.123);
        assert_relative_eq!(map.snapped_vertices()[index].x, 0.1);
    }

    #[test]
    fn invalid_add_leaves_map_unchanged() {
        let mut map = GeometricMap::new(3);
        map.add(&p(1.0, 1.0, 1.0)).unwrap();
        let before = map.vertices().to_vec();

        let err = map.add(&p(f64::NAN, 0.0, 0.0)).unwrap_err();
        assert!(matches!(
            err,
            GeokeyError::Quantize(QuantizeError::InvalidCoordinate { .. })
        ));
        assert_eq!(map.vertices(), before.as_slice());
    }

    #[test]
    fn oversized_precision_fails_each_call() {
        let mut map = GeometricMap::new(40);
        let err = map.add(&p(0.0, 0.0, 0.0)).unwrap_err();
        assert!(matches!(
            err,
            GeokeyError::Quantize(QuantizeError::PrecisionOverflow { precision: 40 })
        ));
        assert!(map.lookup(&p(0.0, 0.0, 0.0)).is_err());
        assert!(map.is_empty());
    }

    #[test]
    fn add_edge_resolves_start_first() {
        let mut map = GeometricMap::new(3);
        let (u, v) = map.add_edge(&p(1.0, 0.0, 0.0), &p(0.0, 0.0, 0.0)).unwrap();
        assert_eq!((u, v), (0, 1));
        assert_eq!(map.vertices()[0], p(1.0, 0.0, 0.0));
    }

    #[test]
    fn add_edge_does_not_merge_reversed_edges() {
        let mut map = GeometricMap::new(3);
        let forward = map.add_edge(&p(0.0, 0.0, 0.0), &p(1.0, 0.0, 0.0)).unwrap();
        let backward = map.add_edge(&p(1.0, 0.0, 0.0), &p(0.0, 0.0, 0.0)).unwrap();
        assert_eq!(forward, (0, 1));
        assert_eq!(backward, (1, 0));
    }

    #[test]
    fn failing_edge_registers_nothing() {
        let mut map = GeometricMap::new(3);
        let err = map
            .add_edge(&p(1.0, 0.0, 0.0), &p(f64::NAN, 0.0, 0.0))
            .unwrap_err();
        assert!(matches!(
            err,
            GeokeyError::Quantize(QuantizeError::InvalidCoordinate { .. })
        ));
        assert!(map.is_empty());
        assert_eq!(map.keys().count(), 0);
    }

    #[test]
    fn keys_and_vertices_stay_aligned() {
        let mut map = GeometricMap::new(2);
        map.add_face(&[p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.001, 0.0, 0.0)])
            .unwrap();
        map.add_edge(&p(1.0, 0.0, 0.0), &p(0.0, 2.0, 0.0)).unwrap();
        let keys: Vec<GeometricKey> = map.keys().collect();
        assert_eq!(keys.len(), map.len());
        for (key, vertex) in keys.iter().zip(map.vertices()) {
            assert_eq!(*key, map.key_of(vertex).unwrap());
        }
    }

    #[test]
    fn add_face_preserves_winding() {
        let mut map = GeometricMap::new(3);
        map.add(&p(1.0, 1.0, 0.0)).unwrap();
        let face = map
            .add_face(&[p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0), p(0.0, 1.0, 0.0)])
            .unwrap();
        assert_eq!(face, vec![1, 2, 0, 3]);
    }

    #[test]
    fn failing_face_registers_nothing() {
        let mut map = GeometricMap::new(3);
        let result = map.add_face(&[
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(0.0, f64::INFINITY, 0.0),
        ]);
        assert!(result.is_err());
        assert!(map.is_empty());
    }

    #[test]
    fn lookup_does_not_register() {
        let mut map = GeometricMap::new(3);
        map.add(&p(2.0, 2.0, 2.0)).unwrap();
        assert_eq!(map.lookup(&p(2.0001, 2.0, 2.0)).unwrap(), Some(0));
        assert_eq!(map.lookup(&p(9.0, 9.0, 9.0)).unwrap(), None);
        assert!(!map.contains(&p(9.0, 9.0, 9.0)).unwrap());
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn key_of_matches_free_function() {
        let map = GeometricMap::new(4);
        let point = p(0.12345, -7.0, 3.5);
        assert_eq!(map.key_of(&point).unwrap(), crate::key::quantize(&point, 4).unwrap());
        assert!(map.is_empty());
    }

    #[test]
    fn keys_follow_index_order() {
        let mut map = GeometricMap::new(0);
        map.extend([p(3.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(2.0, 0.0, 0.0)])
            .unwrap();
        let text: Vec<String> = map.keys().map(|key| key.to_string()).collect();
        assert_eq!(text, ["3,0,0", "1,0,0", "2,0,0"]);
    }

    #[test]
    fn default_uses_three_digits() {
        let map = GeometricMap::default();
        assert_eq!(map.precision(), 3);
    }
}
