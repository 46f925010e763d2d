mod cells;
mod network;
mod weld;

pub use cells::CellsFromLoops;
pub use network::{unique_edges, NetworkFromLines};
pub use weld::{MeshWeld, MeshesJoin, MeshesJoinAndWeld};

use crate::error::{OperationError, Result};
use crate::math::Point3;

/// A polygon mesh as a vertex list plus faces of vertex indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexedMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Faces as ordered vertex indices (winding preserved).
    pub faces: Vec<Vec<usize>>,
}

impl IndexedMesh {
    /// Creates a mesh from vertices and faces.
    #[must_use]
    pub fn new(vertices: Vec<Point3>, faces: Vec<Vec<usize>>) -> Self {
        Self { vertices, faces }
    }

    /// Checks that every face index refers to a vertex.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] naming the first bad index.
    pub fn check_indices(&self) -> Result<()> {
        let count = self.vertices.len();
        for (face_index, face) in self.faces.iter().enumerate() {
            if let Some(&bad) = face.iter().find(|&&v| v >= count) {
                return Err(OperationError::InvalidInput(format!(
                    "face {face_index} references vertex {bad}, mesh has {count} vertices"
                ))
                .into());
            }
        }
        Ok(())
    }
}

/// A line network: deduplicated vertices plus one index pair per input line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeNetwork {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Edges as `(start, end)` vertex indices.
    pub edges: Vec<(usize, usize)>,
}

/// A volumetric cell complex: each cell is a list of faces, each face an
/// ordered list of vertex indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellComplex {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Cells as faces of vertex indices.
    pub cells: Vec<Vec<Vec<usize>>>,
}
