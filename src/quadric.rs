use derive_more::{Add, AddAssign, Deref, DerefMut};
use glam::{Mat3, Mat4, Vec3};

use crate::{HalfEdgeMesh, VertexId};

/// Accumulated squared distance to a set of planes, the per-vertex error
/// measure of quadric-based simplification.
///
/// The quadric of a plane `p = (n, -n·x)` is the outer product `p pᵀ`;
/// evaluating a point `v` in homogeneous form against the summed 4×4 matrix
/// yields the total squared deviation from all accumulated planes. Quadrics
/// add up, which is what makes the measure cheap to propagate through edge
/// contractions.
#[derive(Debug, Default, Clone, Copy, Add, AddAssign, Deref, DerefMut)]
pub struct Quadric(Mat4);

impl Quadric {
    /// The quadric of a single plane with the given unit normal passing
    /// through the given point.
    pub fn from_plane(normal: Vec3, point: Vec3) -> Self {
        let plane = normal.extend(-point.dot(normal));
        Self(Mat4::from_cols(
            plane * plane.x,
            plane * plane.y,
            plane * plane.z,
            plane * plane.w,
        ))
    }

    /// Sums the plane quadrics over the face fan of a vertex.
    pub fn for_vertex(mesh: &HalfEdgeMesh, vertex_id: VertexId) -> Self {
        let vertex = &mesh.vertices[&vertex_id];

        let mut quadric = Self::default();
        for face_key in vertex.faces(mesh) {
            quadric += Self::from_plane(mesh.faces[&face_key].normal, vertex.position);
        }
        quadric
    }

    /// Squared deviation of a point measured against the accumulated planes.
    pub fn error(&self, point: Vec3) -> f32 {
        let p = point.extend(1.0);
        p.dot(self.0 * p)
    }

    /// The position minimizing [`Quadric::error`], obtained by solving the
    /// 3×3 system `A v = -b` taken from the upper left of the matrix.
    ///
    /// `None` when the system is (near) singular, e.g. for the quadric of a
    /// flat neighbourhood, where every point of the plane minimizes equally.
    pub fn minimizer(&self) -> Option<Vec3> {
        let a = Mat3::from_mat4(self.0);
        let d = self.0.w_axis.w;

        if a.determinant().abs() < f32::EPSILON || d.abs() < f32::EPSILON {
            return None;
        }

        let b = self.0.w_axis.truncate();
        Some(-(a.inverse() * b))
    }
}
