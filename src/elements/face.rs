use glam::Vec3;

use crate::{HalfEdgeMesh, MeshError};

use super::{FaceKey, VertexId};

/// A triangle face defined by three vertices in counter-clockwise winding
/// order.
///
/// The vertices are stored in canonical rotation (smallest id first, winding
/// preserved) so the face registers under the same [`FaceKey`] no matter
/// which corner it was built from. Normal and area are computed once at
/// construction; a face is immutable for its whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// The corner vertices in canonical rotation.
    pub vertices: [VertexId; 3],

    /// Unit normal of the triangle plane.
    pub normal: Vec3,

    /// Surface area of the triangle.
    pub area: f32,
}

impl Face {
    /// Builds a face over three live vertices given in counter-clockwise
    /// order.
    ///
    /// Fails with [`MeshError::DegenerateFace`] when the corners are
    /// duplicated or collinear, i.e. when their cross product vanishes.
    pub fn new(
        v0: VertexId,
        v1: VertexId,
        v2: VertexId,
        mesh: &HalfEdgeMesh,
    ) -> Result<Self, MeshError> {
        let p0 = mesh.vertices[&v0].position;
        let p1 = mesh.vertices[&v1].position;
        let p2 = mesh.vertices[&v2].position;

        let cross = (p1 - p0).cross(p2 - p0);
        let normal = cross
            .try_normalize()
            .ok_or(MeshError::DegenerateFace { v0, v1, v2 })?;

        Ok(Self {
            vertices: FaceKey::new(v0, v1, v2).0,
            normal,
            area: cross.length() / 2.0,
        })
    }

    /// The canonical key this face is registered under.
    #[inline]
    pub fn key(&self) -> FaceKey {
        FaceKey(self.vertices)
    }
}

#[cfg(test)]
mod test {
    use glam::Vec3;

    use super::*;

    fn mesh_with(positions: &[Vec3]) -> (HalfEdgeMesh, Vec<VertexId>) {
        let mut mesh = HalfEdgeMesh::new();
        let ids = positions.iter().map(|&p| mesh.insert_vertex(p)).collect();
        (mesh, ids)
    }

    #[test]
    fn vertices_are_stored_in_canonical_rotation() {
        let (mesh, ids) = mesh_with(&[
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(0.0, 0.5, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
        ]);
        let (v0, v1, v2) = (ids[0], ids[1], ids[2]);

        let face012 = Face::new(v0, v1, v2, &mesh).unwrap();
        let face120 = Face::new(v1, v2, v0, &mesh).unwrap();
        let face201 = Face::new(v2, v0, v1, &mesh).unwrap();

        assert_eq!(face012.vertices, [v0, v1, v2]);
        assert_eq!(face120.vertices, [v0, v1, v2]);
        assert_eq!(face201.vertices, [v0, v1, v2]);

        assert_eq!(face012.key(), face120.key());
        assert_eq!(face012.key(), face201.key());

        let face021 = Face::new(v0, v2, v1, &mesh).unwrap();
        assert_ne!(face012.key(), face021.key());
    }

    #[test]
    fn collinear_vertices_are_rejected() {
        let (mesh, ids) = mesh_with(&[
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
        ]);

        let result = Face::new(ids[0], ids[1], ids[2], &mesh);
        assert_eq!(
            result,
            Err(MeshError::DegenerateFace {
                v0: ids[0],
                v1: ids[1],
                v2: ids[2],
            })
        );
    }

    #[test]
    fn normal_and_area_come_from_the_winding() {
        let (mesh, ids) = mesh_with(&[
            Vec3::ZERO,
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ]);

        let face = Face::new(ids[0], ids[1], ids[2], &mesh).unwrap();
        assert_eq!(face.normal, Vec3::Z);
        assert_eq!(face.area, 0.5);

        let reversed = Face::new(ids[0], ids[2], ids[1], &mesh).unwrap();
        assert_eq!(reversed.normal, Vec3::NEG_Z);
    }
}
