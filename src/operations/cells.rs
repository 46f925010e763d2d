use crate::error::Result;
use crate::map::{GeometricMap, MapParams};
use crate::math::Point3;

use super::CellComplex;

/// Builds a cell complex from cells given as closed face loops.
///
/// Each cell is a list of faces and each face an ordered loop of points
/// (not repeating the first point at the end). Loops that touch share
/// vertex indices; face winding is kept as given.
pub struct CellsFromLoops<'a> {
    cells: &'a [Vec<Vec<Point3>>],
    params: MapParams,
}

impl<'a> CellsFromLoops<'a> {
    /// Creates a new `CellsFromLoops` operation.
    #[must_use]
    pub fn new(cells: &'a [Vec<Vec<Point3>>], params: MapParams) -> Self {
        Self { cells, params }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns a quantization error if any loop point is invalid.
    pub fn execute(&self) -> Result<CellComplex> {
        let mut map = GeometricMap::with_params(self.params);
        let mut cells = Vec::with_capacity(self.cells.len());
        for cell in self.cells {
            let faces = cell
                .iter()
                .map(|face| map.add_face(face))
                .collect::<Result<Vec<_>>>()?;
            cells.push(faces);
        }

        tracing::debug!(
            cells = cells.len(),
            vertices = map.len(),
            precision = self.params.precision,
            "built cell complex from loops"
        );

        Ok(CellComplex {
            vertices: map.into_vertices(),
            cells,
        })
    }
}
