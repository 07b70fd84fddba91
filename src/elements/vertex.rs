use glam::Vec3;
use tracing::instrument;

use crate::{FanIterator, HalfEdgeMesh, error_none};

use super::{EdgeKey, FaceKey, VertexId};

/// A corner point of the mesh.
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    /// Unique id among the live vertices of the mesh.
    pub id: VertexId,

    /// Position in model space.
    pub position: Vec3,

    /// One of the halfedges pointing away from this vertex.
    ///
    /// `Some` for every vertex of a correctly constructed mesh; a vertex that
    /// has lost all its edges keeps `None` until it is reconnected.
    pub outgoing: Option<EdgeKey>,
}

impl Vertex {
    pub fn new(id: VertexId, position: Vec3) -> Self {
        Self {
            id,
            position,
            outgoing: None,
        }
    }

    /// Returns all halfedges that point away from this vertex, in clockwise
    /// order.
    ///
    /// The walk first rewinds counter-clockwise to the boundary halfedge if
    /// the vertex sits on a surface border, so the whole fan is covered no
    /// matter which outgoing halfedge the back-reference currently names.
    #[instrument(skip(mesh))]
    pub fn outgoing_halfedges<'a>(&self, mesh: &'a HalfEdgeMesh) -> FanIterator<'a> {
        FanIterator::new(self.fan_start(mesh), mesh, |he, mesh| {
            mesh.cw_rotated_neighbour(he)
        })
    }

    /// Rewinds to the outgoing halfedge the clockwise fan walk must start at:
    /// the boundary halfedge for border vertices, any otherwise.
    fn fan_start(&self, mesh: &HalfEdgeMesh) -> Option<EdgeKey> {
        let start = self.outgoing?;

        let mut current = start;
        loop {
            let halfedge = mesh
                .halfedges
                .get(&current)
                .or_else(error_none!("Outgoing halfedge not found"))?;

            if halfedge.is_boundary() {
                return Some(current);
            }

            let previous = mesh
                .ccw_rotated_neighbour(current)
                .or_else(error_none!("Face halfedge has no ccw neighbour"))?;

            if previous == start {
                return Some(start);
            }
            current = previous;
        }
    }

    /// Returns all neighbouring (connected through an edge) vertices of this
    /// vertex.
    #[instrument(skip(mesh))]
    pub fn neighbours<'a>(&self, mesh: &'a HalfEdgeMesh) -> impl Iterator<Item = VertexId> + 'a {
        self.outgoing_halfedges(mesh).map(|he| he.head)
    }

    /// Returns all faces incident to this vertex.
    #[instrument(skip(mesh))]
    pub fn faces<'a>(&self, mesh: &'a HalfEdgeMesh) -> impl Iterator<Item = FaceKey> + 'a {
        self.outgoing_halfedges(mesh).filter_map(|he| {
            mesh.halfedges
                .get(&he)
                .or_else(error_none!("Halfedge not found"))?
                .face
        })
    }

    /// The degree of this vertex, i.e. the number of edges incident to it.
    #[inline]
    #[instrument(skip(mesh))]
    pub fn degree(&self, mesh: &HalfEdgeMesh) -> usize {
        self.neighbours(mesh).count()
    }

    /// Returns `true` if this vertex is incident to a boundary edge.
    #[instrument(skip(mesh))]
    pub fn is_boundary(&self, mesh: &HalfEdgeMesh) -> bool {
        self.outgoing_halfedges(mesh).any(|he| {
            mesh.halfedges
                .get(&he)
                .is_none_or(|halfedge| halfedge.is_boundary())
        })
    }
}
