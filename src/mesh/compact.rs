//! Garbage collection of tombstoned elements.

use super::halfedge::HalfEdgeMesh;
use super::index::{EdgeId, FaceId, HalfEdgeId, MeshIndex, VertexId};

/// Old-to-new index tables produced by [`HalfEdgeMesh::compact`].
///
/// Removed elements map to an invalid id.
#[derive(Debug, Clone, Default)]
pub struct Compaction<I: MeshIndex = u32> {
    vertices: Vec<VertexId<I>>,
    edges: Vec<EdgeId<I>>,
    faces: Vec<FaceId<I>>,
}

impl<I: MeshIndex> Compaction<I> {
    /// New id of a vertex, if it survived.
    pub fn vertex(&self, old: VertexId<I>) -> Option<VertexId<I>> {
        self.vertices.get(old.index()).copied().filter(|v| v.is_valid())
    }

    /// New id of an edge, if it survived.
    pub fn edge(&self, old: EdgeId<I>) -> Option<EdgeId<I>> {
        self.edges.get(old.index()).copied().filter(|e| e.is_valid())
    }

    /// New id of a half-edge, if it survived. Orientation is preserved.
    pub fn halfedge(&self, old: HalfEdgeId<I>) -> Option<HalfEdgeId<I>> {
        let e = self.edge(old.edge())?;
        Some(HalfEdgeId::new(e.halfedge().index() | (old.index() & 1)))
    }

    /// New id of a face, if it survived.
    pub fn face(&self, old: FaceId<I>) -> Option<FaceId<I>> {
        self.faces.get(old.index()).copied().filter(|f| f.is_valid())
    }

    /// Number of elements removed, as `(vertices, edges, faces)`.
    pub fn removed(&self) -> (usize, usize, usize) {
        let count = |n: usize, kept: usize| n - kept;
        (
            count(self.vertices.len(), self.vertices.iter().filter(|v| v.is_valid()).count()),
            count(self.edges.len(), self.edges.iter().filter(|e| e.is_valid()).count()),
            count(self.faces.len(), self.faces.iter().filter(|f| f.is_valid()).count()),
        )
    }

    /// True if nothing moved.
    pub fn is_identity(&self) -> bool {
        self.removed() == (0, 0, 0)
    }
}

/// Assign consecutive ids to live slots, invalid to the rest.
fn renumber<T, Id: Copy>(
    slots: &[T],
    used: impl Fn(&T) -> bool,
    make: impl Fn(usize) -> Id,
    dead: Id,
) -> Vec<Id> {
    let mut next = 0;
    slots
        .iter()
        .map(|s| {
            if used(s) {
                next += 1;
                make(next - 1)
            } else {
                dead
            }
        })
        .collect()
}

impl<I: MeshIndex> HalfEdgeMesh<I> {
    /// Remove tombstoned elements and renumber survivors in their original
    /// order. Tags travel with their records.
    ///
    /// Returns the remap tables. On an already compact mesh this is a no-op
    /// returning an identity map.
    pub fn compact(&mut self) -> Compaction<I> {
        let vertices = renumber(&self.vertices, |v| v.is_used(), VertexId::new, VertexId::invalid());
        let edges = renumber(
            self.halfedges.chunks(2).collect::<Vec<_>>().as_slice(),
            |pair| pair[0].is_used(),
            EdgeId::new,
            EdgeId::invalid(),
        );
        let faces = renumber(&self.faces, |f| f.is_used(), FaceId::new, FaceId::invalid());

        let map = Compaction {
            vertices,
            edges,
            faces,
        };
        if map.is_identity() {
            return map;
        }

        let he_map = |h: HalfEdgeId<I>| map.halfedge(h).unwrap_or_else(HalfEdgeId::invalid);
        let v_map = |v: VertexId<I>| map.vertex(v).unwrap_or_else(VertexId::invalid);
        let f_map = |f: FaceId<I>| map.face(f).unwrap_or_else(FaceId::invalid);

        self.vertices.retain(|v| v.is_used());
        for v in &mut self.vertices {
            v.halfedge = he_map(v.halfedge);
        }

        self.halfedges.retain(|h| h.is_used());
        for h in &mut self.halfedges {
            h.origin = v_map(h.origin);
            h.next = he_map(h.next);
            h.prev = he_map(h.prev);
            if h.face.is_valid() {
                h.face = f_map(h.face);
            }
        }

        self.faces.retain(|f| f.is_used());
        for f in &mut self.faces {
            f.halfedge = he_map(f.halfedge);
        }

        map
    }
}
