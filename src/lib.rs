//! Quadric-error-metric triangle mesh simplification on a halfedge mesh.
//!
//! The crate reduces a manifold triangle mesh to roughly `(1 - rate) * F0`
//! faces by iterative edge contraction: every edge is scored by how far its
//! optimal replacement vertex deviates from the surface planes accumulated
//! in per-vertex error quadrics, and the cheapest valid contraction is
//! applied until the face target is reached.
//!
//! ## Usage
//!
//! ```
//! use glam::{Mat4, Vec3};
//! use mesh_decimate::{IndexedMesh, simplify};
//!
//! let positions = vec![
//!     Vec3::new(0.0, 0.0, 0.0),
//!     Vec3::new(1.0, 0.0, 0.0),
//!     Vec3::new(0.0, 1.0, 0.0),
//!     Vec3::new(0.0, 0.0, 1.0),
//! ];
//! let indices = vec![0, 2, 1, 0, 1, 3, 0, 3, 2, 1, 2, 3];
//!
//! let mesh = IndexedMesh::new(positions, vec![], vec![], indices, Mat4::IDENTITY).unwrap();
//!
//! // a tetrahedron is already minimal, rate 0 keeps it as is
//! let simplified = simplify(&mesh, 0.0).unwrap();
//! assert_eq!(simplified.triangle_count(), 4);
//! ```
//!
//! The workhorse underneath is [`HalfEdgeMesh`], an edge-centric mesh
//! representation supporting constant-time local traversal and the atomic
//! [`HalfEdgeMesh::contract`] mutation. It can be used on its own for
//! topological surgery that goes beyond [`simplify`].

mod elements;
mod iter;
mod mesh;
mod ops;
mod quadric;
mod simplify;
mod utils;

pub use elements::*;
pub use iter::*;
pub use mesh::*;
pub use quadric::*;
pub use simplify::simplify;

use glam::{Mat4, Vec3};
use hashbrown::HashMap;
use itertools::Itertools;
use tracing::instrument;

/// Halfedge representation of a triangle mesh.
///
/// Vertices, halfedges and faces live in id-keyed maps owned by the mesh;
/// all cross-references between them are keys, so the cyclic topology never
/// implies ownership. A halfedge is addressed by its `(tail, head)` pair,
/// which makes the twin relation a pure key operation.
#[derive(Debug, Clone)]
pub struct HalfEdgeMesh {
    /// Live vertices by id.
    pub vertices: HashMap<VertexId, Vertex>,
    /// Halfedges by directed vertex pair. Twins are inserted and removed
    /// together.
    pub halfedges: HashMap<EdgeKey, HalfEdge>,
    /// Faces by canonical vertex rotation.
    pub faces: HashMap<FaceKey, Face>,

    next_vertex_id: u64,
    model_transform: Mat4,
}

impl Default for HalfEdgeMesh {
    fn default() -> Self {
        Self {
            vertices: HashMap::new(),
            halfedges: HashMap::new(),
            faces: HashMap::new(),
            next_vertex_id: 0,
            model_transform: Mat4::IDENTITY,
        }
    }
}

impl HalfEdgeMesh {
    /// Creates an empty mesh.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the halfedge representation of an indexed triangle mesh.
    ///
    /// Vertex ids equal the input indices; triangles are wired in input
    /// order. Input normals and texture coordinates are ignored, normals are
    /// recomputed from topology on export. Fails when a triangle of the
    /// input is degenerate.
    #[instrument(skip(mesh))]
    pub fn build(mesh: &IndexedMesh) -> Result<Self, MeshError> {
        let mut half_edge_mesh = Self {
            vertices: HashMap::with_capacity(mesh.positions.len()),
            halfedges: HashMap::with_capacity(mesh.triangle_count() * 4),
            faces: HashMap::with_capacity(mesh.triangle_count()),
            next_vertex_id: 0,
            model_transform: mesh.model_transform,
        };

        for &position in &mesh.positions {
            half_edge_mesh.insert_vertex(position);
        }

        for [i, j, k] in mesh.triangle_indices() {
            half_edge_mesh.create_triangle(
                VertexId(i as u64),
                VertexId(j as u64),
                VertexId(k as u64),
            )?;
        }

        Ok(half_edge_mesh)
    }

    /// Compacts the live vertices back into an indexed triangle mesh.
    ///
    /// Vertices are emitted in ascending id order and faces in canonical
    /// rotation, so two structurally equal meshes export identically. Vertex
    /// normals are recomputed as area-weighted face normal averages; the
    /// model transform is carried through unchanged.
    #[instrument(skip(self))]
    pub fn to_indexed(&self) -> IndexedMesh {
        let mut positions = Vec::with_capacity(self.vertices.len());
        let mut normals = Vec::with_capacity(self.vertices.len());
        let mut index_map = HashMap::with_capacity(self.vertices.len());

        for (index, (&vertex_id, vertex)) in self
            .vertices
            .iter()
            .sorted_by_key(|&(&vertex_id, _)| vertex_id)
            .enumerate()
        {
            positions.push(vertex.position);
            normals.push(self.weighted_vertex_normal(vertex_id));
            index_map.insert(vertex_id, index as u32);
        }

        let mut indices = Vec::with_capacity(self.faces.len() * 3);
        for face_key in self.faces.keys().sorted() {
            for vertex_id in self.faces[face_key].vertices {
                indices.push(index_map[&vertex_id]);
            }
        }

        IndexedMesh {
            positions,
            texture_coordinates: Vec::new(),
            normals,
            indices,
            model_transform: self.model_transform,
        }
    }

    /// Area-weighted average of the face normals around a vertex.
    pub fn weighted_vertex_normal(&self, vertex_id: VertexId) -> Vec3 {
        let vertex = &self.vertices[&vertex_id];

        let mut normal = Vec3::ZERO;
        for face_key in vertex.faces(self) {
            let face = &self.faces[&face_key];
            normal += face.normal * face.area;
        }

        normal.normalize_or_zero()
    }

    /// Hands out the next unused vertex id.
    pub fn next_vertex_id(&mut self) -> VertexId {
        let id = VertexId(self.next_vertex_id);
        self.next_vertex_id += 1;
        id
    }
}
