use std::cmp::Ordering;

use float_ord::FloatOrd;
use glam::Vec3;
use hashbrown::HashSet;
use slotmap::new_key_type;

use crate::{EdgeKey, HalfEdgeMesh, Quadric};

new_key_type! {
    /// Arena key of a candidate contraction, shared between the priority
    /// queue and the valid-edge index.
    pub(crate) struct CandidateId;
}

/// A candidate edge contraction: the canonical edge, the replacement vertex
/// position and the cost of performing it.
#[derive(Debug, Clone, Copy)]
pub(crate) struct EdgeContraction {
    pub edge: EdgeKey,

    /// Position of the replacement vertex minimizing the summed quadric.
    pub position: Vec3,

    /// How much the mesh deviates from the accumulated planes after this
    /// contraction.
    pub cost: f32,

    /// The priority queue cannot reprioritize an entry in place. A candidate
    /// superseded by a mesh mutation is flagged invalid and skipped when it
    /// eventually surfaces at the top of the queue.
    pub valid: bool,
}

impl EdgeContraction {
    /// Evaluates the optimal contraction of `edge` against the summed
    /// endpoint quadric.
    ///
    /// When the quadric system is singular the edge midpoint is used and the
    /// contraction reported as free.
    pub fn new(edge: EdgeKey, mesh: &HalfEdgeMesh, quadric: Quadric) -> Self {
        match quadric.minimizer() {
            Some(position) => Self {
                edge,
                position,
                cost: quadric.error(position),
                valid: true,
            },
            None => {
                let p0 = mesh.vertices[&edge.tail].position;
                let p1 = mesh.vertices[&edge.head].position;
                Self {
                    edge,
                    position: (p0 + p1) / 2.0,
                    cost: 0.0,
                    valid: true,
                }
            }
        }
    }
}

/// Heap entry ordering candidates by ascending cost.
#[derive(Debug, Clone, Copy)]
pub(crate) struct QueueEntry {
    pub cost: FloatOrd<f32>,
    pub id: CandidateId,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // reversed so the binary heap pops the cheapest contraction first
        other.cost.cmp(&self.cost)
    }
}

/// The link test: returns `true` if contracting `edge01` would produce a
/// non-manifold neighbourhood.
///
/// After removing the two triangles on the edge, the one-rings of the two
/// endpoints may only share the two apex vertices. Any further shared vertex
/// would fold the rewired fans onto each other. Edges on a surface border,
/// and edges whose endpoint fans cross one, are also reported degenerate;
/// border contractions are unsupported.
pub(crate) fn will_degenerate(mesh: &HalfEdgeMesh, edge01: EdgeKey) -> bool {
    let edge10 = edge01.twin();
    let he01 = mesh.halfedges[&edge01];
    let he10 = mesh.halfedges[&edge10];

    let (Some(edge1a), Some(edge0a)) = (he01.next, he10.next) else {
        return true;
    };

    let v0 = edge01.tail;
    let v1_next = edge1a.head;
    let v0_next = edge0a.head;

    // the one-ring of v1 minus the edge endpoints and apexes
    let mut neighbourhood = HashSet::new();
    let mut iterator = edge1a;
    while iterator != edge10 {
        let head = iterator.head;
        if head != v0 && head != v1_next && head != v0_next {
            neighbourhood.insert(head);
        }

        let Some(next) = mesh.cw_rotated_neighbour(iterator) else {
            return true;
        };
        iterator = next;
    }

    // any hit from the one-ring of v0 breaks the link condition
    let mut iterator = edge0a;
    while iterator != edge01 {
        if neighbourhood.contains(&iterator.head) {
            return true;
        }

        let Some(next) = mesh.cw_rotated_neighbour(iterator) else {
            return true;
        };
        iterator = next;
    }

    false
}
