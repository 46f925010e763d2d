use crate::error::{OperationError, Result};
use crate::map::{GeometricMap, MapParams};

use super::IndexedMesh;

/// Welds the vertices of a mesh that share a geometric key.
///
/// Vertices are registered in mesh order, so the first vertex of each key
/// becomes the welded position. Faces are remapped, repeated consecutive
/// indices along each (cyclic) face boundary are collapsed, and faces left
/// with fewer than three vertices are dropped.
pub struct MeshWeld<'a> {
    mesh: &'a IndexedMesh,
    params: MapParams,
}

impl<'a> MeshWeld<'a> {
    /// Creates a new `MeshWeld` operation.
    #[must_use]
    pub fn new(mesh: &'a IndexedMesh, params: MapParams) -> Self {
        Self { mesh, params }
    }

    /// Executes the weld, returning a new mesh.
    ///
    /// # Errors
    ///
    /// Returns an error if a vertex cannot be quantized or a face refers to
    /// a vertex the mesh does not have.
    pub fn execute(&self) -> Result<IndexedMesh> {
        let mut map = GeometricMap::with_params(self.params);
        let remap = map.extend(self.mesh.vertices.iter().copied())?;

        let mut faces = Vec::with_capacity(self.mesh.faces.len());
        for (face_index, face) in self.mesh.faces.iter().enumerate() {
            let welded = face
                .iter()
                .map(|&v| {
                    remap.get(v).copied().ok_or_else(|| {
                        OperationError::InvalidInput(format!(
                            "face {face_index} references vertex {v}, mesh has {} vertices",
                            remap.len()
                        ))
                    })
                })
                .collect::<std::result::Result<Vec<_>, _>>()?;
            let welded = collapse_repeats(&welded);
            if welded.len() >= 3 {
                faces.push(welded);
            }
        }

        tracing::debug!(
            vertices_in = self.mesh.vertices.len(),
            vertices_out = map.len(),
            faces_dropped = self.mesh.faces.len() - faces.len(),
            precision = self.params.precision,
            "welded mesh"
        );

        Ok(IndexedMesh {
            vertices: map.into_vertices(),
            faces,
        })
    }
}

/// Concatenates meshes without welding.
///
/// Face indices of each mesh are offset by the number of vertices that
/// precede it.
pub struct MeshesJoin<'a> {
    meshes: &'a [IndexedMesh],
}

impl<'a> MeshesJoin<'a> {
    /// Creates a new `MeshesJoin` operation.
    #[must_use]
    pub fn new(meshes: &'a [IndexedMesh]) -> Self {
        Self { meshes }
    }

    /// Executes the join.
    ///
    /// # Errors
    ///
    /// Returns an error if any face refers to a vertex outside its own mesh.
    pub fn execute(&self) -> Result<IndexedMesh> {
        let mut joined = IndexedMesh::default();
        for mesh in self.meshes {
            mesh.check_indices()?;
            let offset = joined.vertices.len();
            joined.vertices.extend_from_slice(&mesh.vertices);
            joined.faces.extend(
                mesh.faces
                    .iter()
                    .map(|face| face.iter().map(|&v| v + offset).collect::<Vec<_>>()),
            );
        }
        Ok(joined)
    }
}

/// Joins meshes and welds coincident vertices across all of them.
pub struct MeshesJoinAndWeld<'a> {
    meshes: &'a [IndexedMesh],
    params: MapParams,
}

impl<'a> MeshesJoinAndWeld<'a> {
    /// Creates a new `MeshesJoinAndWeld` operation.
    #[must_use]
    pub fn new(meshes: &'a [IndexedMesh], params: MapParams) -> Self {
        Self { meshes, params }
    }

    /// Executes the join and weld.
    ///
    /// # Errors
    ///
    /// Returns an error if a face index is out of range or a vertex cannot
    /// be quantized.
    pub fn execute(&self) -> Result<IndexedMesh> {
        let joined = MeshesJoin::new(self.meshes).execute()?;
        MeshWeld::new(&joined, self.params).execute()
    }
}

/// Drops every index equal to its cyclic successor.
fn collapse_repeats(face: &[usize]) -> Vec<usize> {
    let n = face.len();
    (0..n)
        .filter(|&i| face[i] != face[(i + 1) % n])
        .map(|i| face[i])
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::GeokeyError;
    use crate::math::Point3;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    /// Two unit squares sharing the edge x = 1, stored without sharing.
    fn two_squares() -> IndexedMesh {
        IndexedMesh::new(
            vec![
                p(0.0, 0.0, 0.0),
                p(1.0, 0.0, 0.0),
                p(1.0, 1.0, 0.0),
                p(0.0, 1.0, 0.0),
                p(1.0001, 0.0, 0.0),
                p(2.0, 0.0, 0.0),
                p(2.0, 1.0, 0.0),
                p(0.9999, 1.0, 0.0),
            ],
            vec![vec![0, 1, 2, 3], vec![4, 5, 6, 7]],
        )
    }

    #[test]
    fn collapse_repeats_is_cyclic() {
        assert_eq!(collapse_repeats(&[0, 0, 1, 2, 2]), vec![0, 1, 2]);
        assert_eq!(collapse_repeats(&[3, 1, 2, 3]), vec![3, 1, 2]);
        assert_eq!(collapse_repeats(&[5, 5]), Vec::<usize>::new());
    }

    #[test]
    fn weld_shares_vertices_between_faces() {
        let welded = MeshWeld::new(&two_squares(), MapParams::new(3))
            .execute()
            .unwrap();
        assert_eq!(welded.vertices.len(), 6);
        assert_eq!(welded.faces, vec![vec![0, 1, 2, 3], vec![1, 4, 5, 2]]);
        assert_eq!(welded.vertices[1], p(1.0, 0.0, 0.0));
    }

    #[test]
    fn weld_drops_collapsed_faces() {
        let mesh = IndexedMesh::new(
            vec![
                p(0.0, 0.0, 0.0),
                p(0.0001, 0.0, 0.0),
                p(1.0, 0.0, 0.0),
                p(0.0, 1.0, 0.0),
            ],
            vec![vec![0, 1, 2], vec![0, 2, 3]],
        );
        let welded = MeshWeld::new(&mesh, MapParams::new(2)).execute().unwrap();
        assert_eq!(welded.vertices.len(), 3);
        assert_eq!(welded.faces, vec![vec![0, 1, 2]]);
    }

    #[test]
    fn weld_rejects_bad_face_index() {
        let mesh = IndexedMesh::new(vec![p(0.0, 0.0, 0.0)], vec![vec![0, 1, 2]]);
        let err = MeshWeld::new(&mesh, MapParams::default())
            .execute()
            .unwrap_err();
        assert!(matches!(
            err,
            GeokeyError::Operation(OperationError::InvalidInput(_))
        ));
    }

    #[test]
    fn join_offsets_indices() {
        let a = IndexedMesh::new(
            vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0)],
            vec![vec![0, 1, 2]],
        );
        let b = IndexedMesh::new(
            vec![p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0), p(0.0, 1.0, 0.0)],
            vec![vec![2, 0, 1]],
        );
        let joined = MeshesJoin::new(&[a, b]).execute().unwrap();
        assert_eq!(joined.vertices.len(), 6);
        assert_eq!(joined.faces, vec![vec![0, 1, 2], vec![5, 3, 4]]);
    }

    #[test]
    fn join_and_weld_shares_vertices_across_meshes() {
        let a = IndexedMesh::new(
            vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0)],
            vec![vec![0, 1, 2]],
        );
        let b = IndexedMesh::new(
            vec![p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0), p(0.0, 1.0, 0.0)],
            vec![vec![0, 1, 2]],
        );
        let welded = MeshesJoinAndWeld::new(&[a, b], MapParams::new(3))
            .execute()
            .unwrap();
        assert_eq!(welded.vertices.len(), 4);
        assert_eq!(welded.faces, vec![vec![0, 1, 2], vec![1, 3, 2]]);
    }

    #[test]
    fn join_of_nothing_is_empty() {
        let joined = MeshesJoin::new(&[]).execute().unwrap();
        assert_eq!(joined, IndexedMesh::default());
    }
}
