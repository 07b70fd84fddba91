use crate::{EdgeKey, FaceKey, HalfEdgeMesh, VertexId};

impl HalfEdgeMesh {
    /// Removes a vertex from the mesh.
    ///
    /// Deleting a vertex that is not live means the mesh state is
    /// inconsistent and aborts.
    pub(crate) fn delete_vertex(&mut self, vertex_id: VertexId) {
        if self.vertices.remove(&vertex_id).is_none() {
            panic!("attempted to delete a nonexistent vertex {vertex_id}");
        }
    }

    /// Removes a halfedge together with its twin.
    ///
    /// Twins only ever exist as a pair; a missing direction means the mesh
    /// state is inconsistent and aborts.
    pub(crate) fn delete_edge(&mut self, edge: EdgeKey) {
        for key in [edge, edge.twin()] {
            if self.halfedges.remove(&key).is_none() {
                panic!("attempted to delete a nonexistent edge {key}");
            }
        }
    }

    /// Removes a face from the mesh.
    pub(crate) fn delete_face(&mut self, face_key: FaceKey) {
        if self.faces.remove(&face_key).is_none() {
            panic!("attempted to delete a nonexistent face {face_key}");
        }
    }
}

#[cfg(test)]
mod test {
    use glam::Vec3;

    use crate::{EdgeKey, FaceKey, HalfEdgeMesh, VertexId};

    fn single_triangle() -> HalfEdgeMesh {
        let mut mesh = HalfEdgeMesh::new();
        let v0 = mesh.insert_vertex(Vec3::ZERO);
        let v1 = mesh.insert_vertex(Vec3::X);
        let v2 = mesh.insert_vertex(Vec3::Y);
        mesh.create_triangle(v0, v1, v2).unwrap();
        mesh
    }

    #[test]
    fn deletes_remove_both_twins() {
        let mut mesh = single_triangle();
        let edge01 = EdgeKey::new(VertexId(0), VertexId(1));

        mesh.delete_edge(edge01);

        assert!(!mesh.halfedges.contains_key(&edge01));
        assert!(!mesh.halfedges.contains_key(&edge01.twin()));
        assert_eq!(mesh.halfedges.len(), 4);
    }

    #[test]
    #[should_panic(expected = "nonexistent vertex")]
    fn deleting_an_unknown_vertex_aborts() {
        let mut mesh = single_triangle();
        mesh.delete_vertex(VertexId(42));
    }

    #[test]
    #[should_panic(expected = "nonexistent edge")]
    fn deleting_an_unknown_edge_aborts() {
        let mut mesh = single_triangle();
        mesh.delete_edge(EdgeKey::new(VertexId(0), VertexId(42)));
    }

    #[test]
    #[should_panic(expected = "nonexistent face")]
    fn deleting_an_unknown_face_aborts() {
        let mut mesh = single_triangle();
        mesh.delete_face(FaceKey::new(VertexId(0), VertexId(2), VertexId(1)));
    }
}
