use rustc_hash::FxHashSet;

use crate::error::Result;
use crate::map::{GeometricMap, MapParams};
use crate::math::Point3;

use super::EdgeNetwork;

/// Builds a line network from segments, welding coincident endpoints.
///
/// Every input line yields exactly one edge, in input order. Duplicate or
/// reversed edges are kept; pass the result through [`unique_edges`] when
/// they are not wanted.
pub struct NetworkFromLines<'a> {
    lines: &'a [(Point3, Point3)],
    params: MapParams,
}

impl<'a> NetworkFromLines<'a> {
    /// Creates a new `NetworkFromLines` operation.
    #[must_use]
    pub fn new(lines: &'a [(Point3, Point3)], params: MapParams) -> Self {
        Self { lines, params }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns a quantization error if any endpoint is invalid.
    pub fn execute(&self) -> Result<EdgeNetwork> {
        let mut map = GeometricMap::with_params(self.params);
        let edges = self
            .lines
            .iter()
            .map(|(start, end)| map.add_edge(start, end))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            lines = self.lines.len(),
            vertices = map.len(),
            precision = self.params.precision,
            "built network from lines"
        );

        Ok(EdgeNetwork {
            vertices: map.into_vertices(),
            edges,
        })
    }
}

/// Removes repeated undirected edges and self loops.
///
/// `(u, v)` and `(v, u)` count as the same edge; the first occurrence is
/// kept with its original direction, and survivors stay in input order.
#[must_use]
pub fn unique_edges(edges: &[(usize, usize)]) -> Vec<(usize, usize)> {
    let mut seen: FxHashSet<(usize, usize)> = FxHashSet::default();
    edges
        .iter()
        .copied()
        .filter(|&(u, v)| u != v && seen.insert((u.min(v), u.max(v))))
        .collect()
}
