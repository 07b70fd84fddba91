/// Logs an error and evaluates to `None`. For use with `Option::or_else` on
/// lookups that should succeed on a consistent mesh.
#[macro_export]
macro_rules! error_none {
    ($msg:literal) => {
        || {
            tracing::error!($msg);
            None
        }
    };
}

#[cfg(test)]
pub(crate) fn get_tracing_subscriber() {
    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_line_number(true)
        .pretty()
        .try_init()
    {
        tracing::warn!("Tracing subscriber already initialized: {}", e);
    }
}

/// Checks the structural invariants every public mesh operation must
/// preserve: paired twins, triangular `next` cycles sharing one face,
/// canonical face registration and live outgoing back-references.
#[cfg(test)]
pub(crate) fn assert_mesh_invariants(mesh: &crate::HalfEdgeMesh) {
    for (&key, halfedge) in &mesh.halfedges {
        assert!(
            mesh.halfedges.contains_key(&key.twin()),
            "halfedge {key} has no twin"
        );
        assert!(
            mesh.vertices.contains_key(&key.tail) && mesh.vertices.contains_key(&key.head),
            "halfedge {key} references a dead vertex"
        );

        if let Some(next) = halfedge.next {
            assert_eq!(next.tail, key.head, "next of {key} starts elsewhere");

            let second = mesh.halfedges[&next].next.expect("face cycle is complete");
            let third = mesh.halfedges[&second].next.expect("face cycle is complete");
            assert_eq!(third, key, "halfedge {key} is not on a triangle cycle");

            assert!(halfedge.face.is_some());
            assert_eq!(halfedge.face, mesh.halfedges[&next].face);
            assert_eq!(halfedge.face, mesh.halfedges[&second].face);
        }
    }

    for (&face_key, face) in &mesh.faces {
        let [v0, v1, v2] = face.vertices;
        assert!(
            v0 != v1 && v1 != v2 && v2 != v0,
            "face {face_key} repeats a vertex"
        );
        for vertex_id in face.vertices {
            assert!(
                mesh.vertices.contains_key(&vertex_id),
                "face {face_key} references a dead vertex"
            );
        }
        assert_eq!(face.key(), face_key, "face registered under a foreign key");
    }

    for (&vertex_id, vertex) in &mesh.vertices {
        let outgoing = vertex
            .outgoing
            .expect("live vertex has an outgoing halfedge");
        assert_eq!(outgoing.tail, vertex_id);
        assert!(
            mesh.halfedges.contains_key(&outgoing),
            "vertex {vertex_id} points at a dead halfedge"
        );
    }
}

/// Checks that every given index triple exists as a fully wired triangle:
/// both halfedge directions registered, the `next` cycle closed and all
/// three halfedges claiming the face under its canonical key.
#[cfg(test)]
pub(crate) fn verify_triangles(mesh: &crate::HalfEdgeMesh, triangles: &[[u64; 3]]) {
    use crate::{EdgeKey, FaceKey, VertexId};

    assert_eq!(mesh.faces.len(), triangles.len());

    for &[i, j, k] in triangles {
        let (v0, v1, v2) = (VertexId(i), VertexId(j), VertexId(k));

        for (tail, head) in [(v0, v1), (v1, v2), (v2, v0)] {
            let edge = EdgeKey::new(tail, head);
            assert!(mesh.halfedges.contains_key(&edge), "missing edge {edge}");
            assert!(
                mesh.halfedges.contains_key(&edge.twin()),
                "missing twin of {edge}"
            );
        }

        let edge01 = EdgeKey::new(v0, v1);
        let edge12 = EdgeKey::new(v1, v2);
        let edge20 = EdgeKey::new(v2, v0);

        assert_eq!(mesh.halfedges[&edge01].next, Some(edge12));
        assert_eq!(mesh.halfedges[&edge12].next, Some(edge20));
        assert_eq!(mesh.halfedges[&edge20].next, Some(edge01));

        let face_key = FaceKey::new(v0, v1, v2);
        assert!(
            mesh.faces.contains_key(&face_key),
            "missing face {face_key}"
        );
        for edge in [edge01, edge12, edge20] {
            assert_eq!(mesh.halfedges[&edge].face, Some(face_key));
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use glam::{Mat4, Vec3};

    use crate::IndexedMesh;

    /// Rotates an index triple so the smallest index comes first, preserving
    /// winding. Matches the canonical order exported faces come out in.
    pub(crate) fn canonical_rotation([a, b, c]: [u32; 3]) -> [u32; 3] {
        let min = a.min(b).min(c);
        if min == a {
            [a, b, c]
        } else if min == b {
            [b, c, a]
        } else {
            [c, a, b]
        }
    }

    /// A flat patch of ten triangles around the interior hub edge (0,1),
    /// ringed by eight border vertices.
    pub(crate) fn hexagon_patch() -> IndexedMesh {
        let positions = vec![
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.5, -1.0, 0.0),
            Vec3::new(1.5, -1.0, 0.0),
            Vec3::new(2.5, -1.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
            Vec3::new(2.5, 1.0, 0.0),
            Vec3::new(1.5, 1.0, 0.0),
            Vec3::new(0.5, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 0.0),
        ];

        #[rustfmt::skip]
        let indices = vec![
            0, 2, 3,
            0, 3, 1,
            0, 1, 7,
            0, 7, 8,
            0, 8, 9,
            0, 9, 2,
            1, 3, 4,
            1, 4, 5,
            1, 5, 6,
            1, 6, 7,
        ];

        IndexedMesh::new(
            positions,
            vec![],
            vec![Vec3::Z; 10],
            indices,
            Mat4::IDENTITY,
        )
        .unwrap()
    }

    /// Two coplanar triangles forming a unit square split along (0,2).
    pub(crate) fn planar_quad() -> IndexedMesh {
        let positions = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        let indices = vec![0, 1, 2, 0, 2, 3];

        IndexedMesh::new(positions, vec![], vec![], indices, Mat4::IDENTITY).unwrap()
    }

    /// Closed manifold with six vertices and eight faces.
    pub(crate) fn octahedron() -> IndexedMesh {
        let positions = vec![
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(0.0, 0.0, -1.0),
        ];

        #[rustfmt::skip]
        let indices = vec![
            0, 2, 4,
            2, 1, 4,
            1, 3, 4,
            3, 0, 4,
            2, 0, 5,
            1, 2, 5,
            3, 1, 5,
            0, 3, 5,
        ];

        IndexedMesh::new(positions, vec![], vec![], indices, Mat4::IDENTITY).unwrap()
    }

    /// Two tetrahedra glued at a triangle: the equator vertices 0, 1, 2 and
    /// the poles 3 (top) and 4 (bottom). Contracting an equator edge would
    /// pinch the mesh, which makes this the minimal link-test fixture.
    pub(crate) fn triangular_bipyramid() -> IndexedMesh {
        let positions = vec![
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(-0.5, 0.866, 0.0),
            Vec3::new(-0.5, -0.866, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(0.0, 0.0, -1.0),
        ];

        #[rustfmt::skip]
        let indices = vec![
            0, 1, 3,
            1, 2, 3,
            2, 0, 3,
            1, 0, 4,
            2, 1, 4,
            0, 2, 4,
        ];

        IndexedMesh::new(positions, vec![], vec![], indices, Mat4::IDENTITY).unwrap()
    }

    /// Closed manifold with twelve vertices and twenty faces, big enough for
    /// several rounds of contraction.
    pub(crate) fn icosahedron() -> IndexedMesh {
        let t = (1.0 + 5.0_f32.sqrt()) / 2.0;

        let positions = vec![
            Vec3::new(-1.0, t, 0.0),
            Vec3::new(1.0, t, 0.0),
            Vec3::new(-1.0, -t, 0.0),
            Vec3::new(1.0, -t, 0.0),
            Vec3::new(0.0, -1.0, t),
            Vec3::new(0.0, 1.0, t),
            Vec3::new(0.0, -1.0, -t),
            Vec3::new(0.0, 1.0, -t),
            Vec3::new(t, 0.0, -1.0),
            Vec3::new(t, 0.0, 1.0),
            Vec3::new(-t, 0.0, -1.0),
            Vec3::new(-t, 0.0, 1.0),
        ];

        #[rustfmt::skip]
        let indices = vec![
            0, 11, 5,
            0, 5, 1,
            0, 1, 7,
            0, 7, 10,
            0, 10, 11,
            1, 5, 9,
            5, 11, 4,
            11, 10, 2,
            10, 7, 6,
            7, 1, 8,
            3, 9, 4,
            3, 4, 2,
            3, 2, 6,
            3, 6, 8,
            3, 8, 9,
            4, 9, 5,
            2, 4, 11,
            6, 2, 10,
            8, 6, 7,
            9, 8, 1,
        ];

        IndexedMesh::new(positions, vec![], vec![], indices, Mat4::IDENTITY).unwrap()
    }
}
