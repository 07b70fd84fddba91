use glam::{Mat4, Vec2, Vec3};
use thiserror::Error;

use crate::VertexId;

/// The ways an indexed triangle mesh or one of its faces can be malformed.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MeshError {
    #[error("vertex positions must be specified")]
    EmptyPositions,

    #[error("object must be a triangle mesh")]
    NotTriangulated,

    #[error("texture coordinates must align with position data")]
    MisalignedTextureCoordinates,

    #[error("vertex normals must align with position data")]
    MisalignedNormals,

    #[error("({v0},{v1},{v2}) is not a triangle")]
    DegenerateFace {
        v0: VertexId,
        v1: VertexId,
        v2: VertexId,
    },
}

/// An indexed triangle mesh: parallel vertex attribute arrays plus an index
/// list of counter-clockwise wound triangles.
///
/// This is the exchange format on both sides of simplification. Texture
/// coordinates are accepted on input but never produced; the model transform
/// is carried through untouched.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexedMesh {
    pub positions: Vec<Vec3>,
    pub texture_coordinates: Vec<Vec2>,
    pub normals: Vec<Vec3>,
    /// Triples of indices into `positions`. May be empty, in which case every
    /// three consecutive positions form a triangle.
    pub indices: Vec<u32>,
    pub model_transform: Mat4,
}

impl IndexedMesh {
    /// Validating constructor.
    ///
    /// Checks that the attribute arrays describe a triangle mesh and align
    /// with each other; this is the boundary at which malformed input
    /// surfaces, simplification itself does not fail on a valid mesh.
    pub fn new(
        positions: Vec<Vec3>,
        texture_coordinates: Vec<Vec2>,
        normals: Vec<Vec3>,
        indices: Vec<u32>,
        model_transform: Mat4,
    ) -> Result<Self, MeshError> {
        if positions.is_empty() {
            return Err(MeshError::EmptyPositions);
        }
        if indices.is_empty() && !positions.len().is_multiple_of(3)
            || !indices.len().is_multiple_of(3)
        {
            return Err(MeshError::NotTriangulated);
        }
        if indices.is_empty()
            && !texture_coordinates.is_empty()
            && positions.len() != texture_coordinates.len()
        {
            return Err(MeshError::MisalignedTextureCoordinates);
        }
        if indices.is_empty() && !normals.is_empty() && positions.len() != normals.len() {
            return Err(MeshError::MisalignedNormals);
        }

        Ok(Self {
            positions,
            texture_coordinates,
            normals,
            indices,
            model_transform,
        })
    }

    /// Number of triangles described by this mesh.
    pub fn triangle_count(&self) -> usize {
        if self.indices.is_empty() {
            self.positions.len() / 3
        } else {
            self.indices.len() / 3
        }
    }

    /// The index triples of all triangles, synthesized sequentially when the
    /// index list is empty.
    pub fn triangle_indices(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        let explicit = !self.indices.is_empty();

        (0..self.triangle_count()).map(move |triangle| {
            if explicit {
                let i = 3 * triangle;
                [self.indices[i], self.indices[i + 1], self.indices[i + 2]]
            } else {
                let i = (3 * triangle) as u32;
                [i, i + 1, i + 2]
            }
        })
    }
}
