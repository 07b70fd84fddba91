use tracing::instrument;

use crate::{EdgeKey, HalfEdgeMesh, Vertex, VertexId};

impl HalfEdgeMesh {
    /// Contracts the edge `v0 -> v1` into the single new vertex `v_new`.
    ///
    /// Every triangle incident to either endpoint, except the two triangles
    /// sharing the contracted edge, is re-created over `v_new`; the two
    /// shared triangles, both endpoints and all their connecting halfedges
    /// are removed. The mesh satisfies its invariants again when this
    /// returns.
    ///
    /// Preconditions: the edge is live and has a face on both sides, the
    /// contraction passed the link test, and `v_new.id` is not in use.
    /// Violations are programmer errors and abort.
    #[instrument(skip(self, v_new))]
    pub fn contract(&mut self, edge01: EdgeKey, v_new: Vertex) {
        let edge10 = edge01.twin();

        let he01 = *self.expect_halfedge(edge01);
        let he10 = *self.expect_halfedge(edge10);

        let face01 = he01
            .face
            .unwrap_or_else(|| panic!("attempted to contract the boundary edge {edge01}"));
        let face10 = he10
            .face
            .unwrap_or_else(|| panic!("attempted to contract the boundary edge {edge10}"));

        let v0 = edge01.tail;
        let v1 = edge01.head;
        // the apex vertices of the two triangles sharing the edge
        let v1_next = he01.next.expect("face halfedge has a next").head;
        let v0_next = he10.next.expect("face halfedge has a next").head;

        let v_new_id = v_new.id;
        assert!(
            !self.vertices.contains_key(&v_new_id),
            "vertex id {v_new_id} is already live"
        );
        self.vertices.insert(v_new_id, v_new);

        self.rewire_sector(v0, v1_next, v0_next, v_new_id);
        self.rewire_sector(v1, v0_next, v1_next, v_new_id);

        self.delete_edge(edge01);
        self.delete_face(face01);
        self.delete_face(face10);
        self.delete_vertex(v0);
        self.delete_vertex(v1);
    }

    /// Re-attaches the triangles incident to `v_target` to `v_new`.
    ///
    /// Walks the outgoing halfedges of `v_target` from `v_start` up to (and
    /// excluding) `v_end`, replacing each triangle `(v_target, vi, vj)` with
    /// `(v_new, vi, vj)` and deleting the consumed halfedge pair and face.
    /// The pair closing the sector towards `v_end` is deleted last; the two
    /// triangles on the contracted edge itself are never part of a sector.
    fn rewire_sector(
        &mut self,
        v_target: VertexId,
        v_start: VertexId,
        v_end: VertexId,
        v_new: VertexId,
    ) {
        let edge_end = EdgeKey::new(v_target, v_end);
        let mut edge0i = EdgeKey::new(v_target, v_start);

        while edge0i != edge_end {
            let he0i = *self.expect_halfedge(edge0i);

            let edgeij = he0i
                .next
                .unwrap_or_else(|| panic!("contracted sector crossed a border at {edge0i}"));
            let edgej0 = self
                .expect_halfedge(edgeij)
                .next
                .unwrap_or_else(|| panic!("contracted sector crossed a border at {edgeij}"));

            let vi = edge0i.head;
            let vj = edgeij.head;

            self.create_triangle(v_new, vi, vj)
                .unwrap_or_else(|err| panic!("contraction created a degenerate triangle: {err}"));

            let old_face = he0i
                .face
                .unwrap_or_else(|| panic!("contracted sector crossed a border at {edge0i}"));
            self.delete_edge(edge0i);
            self.delete_face(old_face);

            edge0i = edgej0.twin();
        }

        self.delete_edge(edge_end);
    }
}
