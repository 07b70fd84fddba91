use super::{EdgeKey, FaceKey};

/// A directional edge pointing from one vertex to another.
///
/// Halfedges are addressed by their [`EdgeKey`], which carries the tail and
/// head vertices; the record itself only stores the connectivity that cannot
/// be derived from the key. Twins are always inserted and removed as a pair.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HalfEdge {
    /// The next halfedge counter-clockwise around the owning face.
    /// `None` if this is a boundary halfedge.
    pub next: Option<EdgeKey>,

    /// The face this halfedge belongs to. `None` if this is a boundary
    /// halfedge, i.e. the outer side of a surface border.
    pub face: Option<FaceKey>,
}

impl HalfEdge {
    /// Returns `true` if there is no face adjacent to this halfedge.
    #[inline]
    pub fn is_boundary(&self) -> bool {
        self.face.is_none()
    }
}
