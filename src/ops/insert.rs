use glam::Vec3;
use tracing::instrument;

use crate::{EdgeKey, Face, FaceKey, HalfEdge, HalfEdgeMesh, MeshError, Vertex, VertexId};

impl HalfEdgeMesh {
    /// Inserts an unconnected vertex, assigning the next free id.
    pub fn insert_vertex(&mut self, position: Vec3) -> VertexId {
        let id = self.next_vertex_id();
        self.vertices.insert(id, Vertex::new(id, position));
        id
    }

    /// Inserts the pair of twin halfedges between two vertices and returns
    /// the one pointing from `tail` to `head`.
    ///
    /// For an already known edge the existing halfedges are left untouched;
    /// a well-formed mesh never has more than two triangles on an unordered
    /// edge, so one of the pair is still unclaimed by a face.
    pub fn insert_or_get_edge(&mut self, tail: VertexId, head: VertexId) -> EdgeKey {
        let key = EdgeKey::new(tail, head);

        if !self.halfedges.contains_key(&key) {
            self.halfedges.insert(key, HalfEdge::default());
            self.halfedges.insert(key.twin(), HalfEdge::default());
        }

        key
    }

    /// Creates the triangle `(v0, v1, v2)` given in counter-clockwise order.
    ///
    /// Registers the three halfedges (reusing existing twins on shared
    /// edges), wires their `next` cycle, points the corner back-references at
    /// their outgoing halfedges and registers the face under its canonical
    /// key.
    #[instrument(skip(self))]
    pub fn create_triangle(
        &mut self,
        v0: VertexId,
        v1: VertexId,
        v2: VertexId,
    ) -> Result<FaceKey, MeshError> {
        let edge01 = self.insert_or_get_edge(v0, v1);
        let edge12 = self.insert_or_get_edge(v1, v2);
        let edge20 = self.insert_or_get_edge(v2, v0);

        let face = Face::new(v0, v1, v2, self)?;
        let face_key = face.key();

        for (edge, next) in [(edge01, edge12), (edge12, edge20), (edge20, edge01)] {
            let halfedge = self
                .halfedges
                .get_mut(&edge)
                .expect("halfedge was inserted above");
            halfedge.next = Some(next);
            halfedge.face = Some(face_key);
        }

        for (vertex_id, outgoing) in [(v0, edge01), (v1, edge12), (v2, edge20)] {
            let vertex = self
                .vertices
                .get_mut(&vertex_id)
                .unwrap_or_else(|| panic!("attempted to access a nonexistent vertex {vertex_id}"));
            vertex.outgoing = Some(outgoing);
        }

        self.faces.insert(face_key, face);

        Ok(face_key)
    }
}
