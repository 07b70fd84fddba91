mod candidate;

use std::collections::BinaryHeap;
use std::time::Instant;

use float_ord::FloatOrd;
use hashbrown::{HashMap, HashSet};
use slotmap::SlotMap;
use tracing::{info, instrument};

use crate::{EdgeKey, HalfEdgeMesh, IndexedMesh, MeshError, Quadric, Vertex, VertexId};

use candidate::{CandidateId, EdgeContraction, QueueEntry, will_degenerate};

/// Simplifies a triangle mesh by greedy edge contraction, reducing the face
/// count by roughly `rate * F0` where `F0` is the input face count.
///
/// Repeatedly contracts the live edge whose replacement vertex deviates the
/// least from the accumulated surface planes, until the face target is
/// reached or no contractible edge remains. Vertex normals of the result are
/// recomputed as area-weighted face normal averages; texture coordinates are
/// not carried through.
///
/// A `rate` outside `[0, 1]` is a programmer error and aborts. The only
/// failure source is a degenerate face in the input mesh.
#[instrument(skip(mesh))]
pub fn simplify(mesh: &IndexedMesh, rate: f32) -> Result<IndexedMesh, MeshError> {
    assert!(
        (0.0..=1.0).contains(&rate),
        "simplification rate {rate} must be within [0, 1]"
    );

    let start = Instant::now();

    let mut scheduler = Scheduler::new(HalfEdgeMesh::build(mesh)?);
    let initial_face_count = scheduler.mesh.faces.len();

    scheduler.seed_candidates();
    scheduler.run((1.0 - rate) * initial_face_count as f32);

    info!(
        "simplified mesh from {initial_face_count} to {} triangles in {:.3}s",
        scheduler.mesh.faces.len(),
        start.elapsed().as_secs_f32(),
    );

    Ok(scheduler.mesh.to_indexed())
}

/// Greedy contraction scheduler.
///
/// Owns the mesh, the per-vertex quadrics and the candidate bookkeeping for
/// the duration of one simplification run. Candidates live in an arena that
/// both the priority queue and the valid-edge index refer into, so a mesh
/// mutation can flag queued entries stale in constant time.
struct Scheduler {
    mesh: HalfEdgeMesh,
    quadrics: HashMap<VertexId, Quadric>,
    candidates: SlotMap<CandidateId, EdgeContraction>,
    queue: BinaryHeap<QueueEntry>,
    /// The authoritative candidate per canonical edge.
    valid_edges: HashMap<EdgeKey, CandidateId>,
}

impl Scheduler {
    fn new(mesh: HalfEdgeMesh) -> Self {
        let quadrics = mesh
            .vertices
            .keys()
            .map(|&vertex_id| (vertex_id, Quadric::for_vertex(&mesh, vertex_id)))
            .collect();

        Self {
            mesh,
            quadrics,
            candidates: SlotMap::with_key(),
            queue: BinaryHeap::new(),
            valid_edges: HashMap::new(),
        }
    }

    /// One initial candidate per unordered edge of the mesh.
    fn seed_candidates(&mut self) {
        let edges: Vec<EdgeKey> = self
            .mesh
            .halfedges
            .keys()
            .map(|edge| edge.canonical())
            .collect();

        for edge in edges {
            if !self.valid_edges.contains_key(&edge) {
                self.push_candidate(edge);
            }
        }
    }

    /// Evaluates a fresh candidate for `edge` and registers it as the
    /// authoritative one.
    fn push_candidate(&mut self, edge: EdgeKey) {
        let quadric = self.quadrics[&edge.tail] + self.quadrics[&edge.head];
        let contraction = EdgeContraction::new(edge, &self.mesh, quadric);
        let cost = contraction.cost;

        let id = self.candidates.insert(contraction);
        self.valid_edges.insert(edge, id);
        self.queue.push(QueueEntry {
            cost: FloatOrd(cost),
            id,
        });
    }

    /// Contracts lowest-cost candidates until the face count falls to the
    /// target or the queue runs dry.
    fn run(&mut self, target_face_count: f32) {
        while !(self.queue.is_empty() || (self.mesh.faces.len() as f32) <= target_face_count) {
            let entry = self.queue.pop().expect("queue was checked to be non-empty");
            let contraction = self.candidates[entry.id];

            // degenerate candidates are dropped without requeueing; a later
            // contraction in their neighbourhood regenerates the edge
            if !contraction.valid || will_degenerate(&self.mesh, contraction.edge) {
                continue;
            }

            let edge01 = contraction.edge;
            let (v0, v1) = (edge01.tail, edge01.head);

            let v_new_id = self.mesh.next_vertex_id();
            let quadric = self.quadrics[&v0] + self.quadrics[&v1];
            self.quadrics.insert(v_new_id, quadric);

            self.invalidate_incident(v0);
            self.invalidate_incident(v1);

            self.mesh
                .contract(edge01, Vertex::new(v_new_id, contraction.position));
            self.quadrics.remove(&v0);
            self.quadrics.remove(&v1);

            self.regenerate_neighbourhood(v_new_id);
        }
    }

    /// Flags every candidate on the edge fan of `vertex_id` stale; the
    /// contraction is about to rewire or delete all of them.
    fn invalidate_incident(&mut self, vertex_id: VertexId) {
        let fan: Vec<EdgeKey> = self.mesh.vertices[&vertex_id]
            .outgoing_halfedges(&self.mesh)
            .collect();

        for edge in fan {
            if let Some(id) = self.valid_edges.remove(&edge.canonical()) {
                self.candidates[id].valid = false;
            }
        }
    }

    /// Fresh candidates for every edge in the 2-ring of the new vertex.
    /// Existing entries for those edges are superseded.
    fn regenerate_neighbourhood(&mut self, v_new: VertexId) {
        let mut visited = HashSet::new();

        let neighbours: Vec<VertexId> = self.mesh.vertices[&v_new]
            .outgoing_halfedges(&self.mesh)
            .map(|edge| edge.head)
            .collect();

        for neighbour in neighbours {
            let fan: Vec<EdgeKey> = self.mesh.vertices[&neighbour]
                .outgoing_halfedges(&self.mesh)
                .collect();

            for edge in fan {
                let edge = edge.canonical();
                if visited.insert(edge) {
                    if let Some(&stale) = self.valid_edges.get(&edge) {
                        self.candidates[stale].valid = false;
                    }
                    self.push_candidate(edge);
                }
            }
        }
    }
}
