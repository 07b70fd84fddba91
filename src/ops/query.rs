use crate::{EdgeKey, HalfEdge, HalfEdgeMesh, error_none};

impl HalfEdgeMesh {
    /// Previous halfedge around the face of `edge`, i.e. two `next` steps on
    /// a triangle. `None` for boundary halfedges.
    pub fn prev(&self, edge: EdgeKey) -> Option<EdgeKey> {
        let next = self.halfedges.get(&edge)?.next?;
        self.halfedges.get(&next)?.next
    }

    /// In clockwise order the next halfedge sharing `edge`'s tail vertex.
    /// `None` when the rotation crosses a surface border.
    pub fn cw_rotated_neighbour(&self, edge: EdgeKey) -> Option<EdgeKey> {
        self.halfedges
            .get(&edge.twin())
            .or_else(error_none!("Twin halfedge not found"))?
            .next
    }

    /// In counter-clockwise order the next halfedge sharing `edge`'s tail
    /// vertex. `None` when the rotation crosses a surface border.
    pub fn ccw_rotated_neighbour(&self, edge: EdgeKey) -> Option<EdgeKey> {
        Some(self.prev(edge)?.twin())
    }

    /// Halfedge lookup for mutation preconditions; a missing record is a
    /// fatal inconsistency.
    pub(crate) fn expect_halfedge(&self, key: EdgeKey) -> &HalfEdge {
        self.halfedges
            .get(&key)
            .unwrap_or_else(|| panic!("attempted to access a nonexistent edge {key}"))
    }
}

#[cfg(test)]
mod test {
    use crate::utils::fixtures;
    use crate::{EdgeKey, HalfEdgeMesh, VertexId};

    #[test]
    fn rotations_are_inverses_on_interior_fans() {
        let mesh = HalfEdgeMesh::build(&fixtures::hexagon_patch()).unwrap();
        let edge = EdgeKey::new(VertexId(0), VertexId(1));

        let cw = mesh.cw_rotated_neighbour(edge).unwrap();
        assert_eq!(cw.tail, edge.tail);
        assert_eq!(mesh.ccw_rotated_neighbour(cw), Some(edge));
    }

    #[test]
    fn rotation_stops_at_the_border() {
        let mesh = HalfEdgeMesh::build(&fixtures::hexagon_patch()).unwrap();

        // the outer ring edge (2,3) has no face on its outside
        let boundary = EdgeKey::new(VertexId(3), VertexId(2));
        assert!(mesh.halfedges[&boundary].is_boundary());
        assert_eq!(mesh.prev(boundary), None);
        assert_eq!(mesh.cw_rotated_neighbour(boundary.twin()), None);
    }

    #[test]
    #[should_panic(expected = "nonexistent edge")]
    fn expecting_an_unknown_halfedge_aborts() {
        let mesh = HalfEdgeMesh::build(&fixtures::hexagon_patch()).unwrap();
        mesh.expect_halfedge(EdgeKey::new(VertexId(2), VertexId(7)));
    }
}
