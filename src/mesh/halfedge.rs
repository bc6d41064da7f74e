//! Half-edge mesh data structure.
//!
//! Half-edges are allocated in twin pairs, so the twin of `h` is `h ^ 1` and
//! edge `i` is the pair `{2i, 2i + 1}`. Each record also carries the
//! constraint tags used by the remesher: vertices hold an anchor id and a
//! feature-curve id, half-edges hold the feature id of their edge (identical
//! on both twins). Because the tags live on the records they move with their
//! element through every edit and through [`HalfEdgeMesh::compact`].
//!
//! # Deletion
//!
//! Edits never shrink the arenas. Removed elements are tombstoned:
//!
//! - a vertex is unused when it has no outgoing half-edge
//! - a half-edge is unused when it has no origin
//! - a face is unused when it has no half-edge
//!
//! Compaction removes tombstones and renumbers the survivors.
//!
//! # Boundary Handling
//!
//! Boundary half-edges have an invalid face and are linked into loops through
//! `next`/`prev`. A boundary vertex always points to its outgoing boundary
//! half-edge, so the rotation `next(twin(h))` starting there visits the whole
//! fan.

use nalgebra::{Point3, Vector3};

use super::index::{EdgeId, FaceId, HalfEdgeId, MeshIndex, VertexId};

/// A vertex in the half-edge mesh.
#[derive(Debug, Clone)]
pub struct Vertex<I: MeshIndex = u32> {
    /// The 3D position of this vertex.
    pub position: Point3<f64>,

    /// One outgoing half-edge from this vertex.
    /// For boundary vertices, this is the outgoing boundary half-edge.
    pub halfedge: HalfEdgeId<I>,

    /// Index of the fixed point this vertex is pinned to.
    pub anchor: Option<usize>,

    /// Index of the feature curve this vertex slides on.
    pub feature: Option<usize>,
}

impl<I: MeshIndex> Vertex<I> {
    /// Create a new, untagged vertex at the given position.
    pub fn new(position: Point3<f64>) -> Self {
        Self {
            position,
            halfedge: HalfEdgeId::invalid(),
            anchor: None,
            feature: None,
        }
    }

    /// Whether the vertex still belongs to the mesh.
    #[inline]
    pub fn is_used(&self) -> bool {
        self.halfedge.is_valid()
    }
}

/// A half-edge in the mesh.
#[derive(Debug, Clone, Copy)]
pub struct HalfEdge<I: MeshIndex = u32> {
    /// The vertex this half-edge originates from.
    pub origin: VertexId<I>,

    /// The next half-edge around the face (counter-clockwise).
    pub next: HalfEdgeId<I>,

    /// The previous half-edge around the face.
    pub prev: HalfEdgeId<I>,

    /// The face this half-edge belongs to. Invalid on the boundary.
    pub face: FaceId<I>,

    /// Feature curve of the edge, mirrored on the twin.
    pub feature: Option<usize>,
}

impl<I: MeshIndex> HalfEdge<I> {
    /// Create a new unlinked half-edge.
    pub fn new() -> Self {
        Self {
            origin: VertexId::invalid(),
            next: HalfEdgeId::invalid(),
            prev: HalfEdgeId::invalid(),
            face: FaceId::invalid(),
            feature: None,
        }
    }

    /// Check if this half-edge is on the boundary.
    #[inline]
    pub fn is_boundary(&self) -> bool {
        !self.face.is_valid()
    }

    /// Whether the half-edge still belongs to the mesh.
    #[inline]
    pub fn is_used(&self) -> bool {
        self.origin.is_valid()
    }
}

impl<I: MeshIndex> Default for HalfEdge<I> {
    fn default() -> Self {
        Self::new()
    }
}

/// A triangular face in the half-edge mesh.
#[derive(Debug, Clone, Copy)]
pub struct Face<I: MeshIndex = u32> {
    /// One half-edge on the boundary of this face.
    pub halfedge: HalfEdgeId<I>,
}

impl<I: MeshIndex> Face<I> {
    /// Create a new face with the given half-edge.
    pub fn new(halfedge: HalfEdgeId<I>) -> Self {
        Self { halfedge }
    }

    /// Whether the face still belongs to the mesh.
    #[inline]
    pub fn is_used(&self) -> bool {
        self.halfedge.is_valid()
    }
}

impl<I: MeshIndex> Default for Face<I> {
    fn default() -> Self {
        Self {
            halfedge: HalfEdgeId::invalid(),
        }
    }
}

/// A manifold triangle mesh with tagged vertices and edges.
#[derive(Debug, Clone)]
pub struct HalfEdgeMesh<I: MeshIndex = u32> {
    pub(crate) vertices: Vec<Vertex<I>>,
    pub(crate) halfedges: Vec<HalfEdge<I>>,
    pub(crate) faces: Vec<Face<I>>,
}

impl<I: MeshIndex> Default for HalfEdgeMesh<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: MeshIndex> HalfEdgeMesh<I> {
    /// Create a new empty mesh.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            halfedges: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh with pre-allocated capacity.
    pub fn with_capacity(num_vertices: usize, num_faces: usize) -> Self {
        // E ~ 3F/2 on a closed mesh, a few more with boundary
        let num_halfedges = num_faces * 3 + num_faces / 2;

        Self {
            vertices: Vec::with_capacity(num_vertices),
            halfedges: Vec::with_capacity(num_halfedges),
            faces: Vec::with_capacity(num_faces),
        }
    }

    // ==================== Accessors ====================

    /// Number of vertex slots, including tombstones.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of half-edge slots, including tombstones.
    #[inline]
    pub fn num_halfedges(&self) -> usize {
        self.halfedges.len()
    }

    /// Number of edge slots, including tombstones.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.halfedges.len() / 2
    }

    /// Number of face slots, including tombstones.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Get a vertex by ID.
    #[inline]
    pub fn vertex(&self, id: VertexId<I>) -> &Vertex<I> {
        &self.vertices[id.index()]
    }

    /// Get a mutable vertex by ID.
    #[inline]
    pub fn vertex_mut(&mut self, id: VertexId<I>) -> &mut Vertex<I> {
        &mut self.vertices[id.index()]
    }

    /// Get a half-edge by ID.
    #[inline]
    pub fn halfedge(&self, id: HalfEdgeId<I>) -> &HalfEdge<I> {
        &self.halfedges[id.index()]
    }

    /// Get a mutable half-edge by ID.
    #[inline]
    pub fn halfedge_mut(&mut self, id: HalfEdgeId<I>) -> &mut HalfEdge<I> {
        &mut self.halfedges[id.index()]
    }

    /// Get a face by ID.
    #[inline]
    pub fn face(&self, id: FaceId<I>) -> &Face<I> {
        &self.faces[id.index()]
    }

    /// Get a mutable face by ID.
    #[inline]
    pub fn face_mut(&mut self, id: FaceId<I>) -> &mut Face<I> {
        &mut self.faces[id.index()]
    }

    /// Get the position of a vertex.
    #[inline]
    pub fn position(&self, v: VertexId<I>) -> &Point3<f64> {
        &self.vertex(v).position
    }

    /// Set the position of a vertex.
    #[inline]
    pub fn set_position(&mut self, v: VertexId<I>, pos: Point3<f64>) {
        self.vertex_mut(v).position = pos;
    }

    // ==================== Liveness ====================

    /// Whether the vertex slot holds a live vertex.
    #[inline]
    pub fn is_vertex_used(&self, v: VertexId<I>) -> bool {
        v.index() < self.vertices.len() && self.vertex(v).is_used()
    }

    /// Whether the half-edge slot holds a live half-edge.
    #[inline]
    pub fn is_halfedge_used(&self, he: HalfEdgeId<I>) -> bool {
        he.index() < self.halfedges.len() && self.halfedge(he).is_used()
    }

    /// Whether the edge slot holds a live edge.
    #[inline]
    pub fn is_edge_used(&self, e: EdgeId<I>) -> bool {
        self.is_halfedge_used(e.halfedge())
    }

    /// Whether the face slot holds a live face.
    #[inline]
    pub fn is_face_used(&self, f: FaceId<I>) -> bool {
        f.index() < self.faces.len() && self.face(f).is_used()
    }

    // ==================== Tags ====================

    /// Fixed-point index the vertex is anchored to.
    #[inline]
    pub fn anchor(&self, v: VertexId<I>) -> Option<usize> {
        self.vertex(v).anchor
    }

    /// Feature-curve index the vertex is constrained to.
    #[inline]
    pub fn vertex_feature(&self, v: VertexId<I>) -> Option<usize> {
        self.vertex(v).feature
    }

    /// Feature-curve index of an edge.
    #[inline]
    pub fn edge_feature(&self, e: EdgeId<I>) -> Option<usize> {
        self.halfedge(e.halfedge()).feature
    }

    /// Pin a vertex to a fixed point, or release it.
    pub fn set_anchor(&mut self, v: VertexId<I>, anchor: Option<usize>) {
        self.vertex_mut(v).anchor = anchor;
    }

    /// Constrain a vertex to a feature curve, or release it.
    pub fn set_vertex_feature(&mut self, v: VertexId<I>, feature: Option<usize>) {
        self.vertex_mut(v).feature = feature;
    }

    /// Tag both half-edges of an edge with a feature curve.
    pub fn set_edge_feature(&mut self, e: EdgeId<I>, feature: Option<usize>) {
        for he in e.halfedges() {
            self.halfedge_mut(he).feature = feature;
        }
    }

    /// Drop every anchor and feature tag.
    pub fn clear_tags(&mut self) {
        for v in &mut self.vertices {
            v.anchor = None;
            v.feature = None;
        }
        for he in &mut self.halfedges {
            he.feature = None;
        }
    }

    // ==================== Topology Queries ====================

    /// Get the twin (opposite) half-edge.
    #[inline]
    pub fn twin(&self, he: HalfEdgeId<I>) -> HalfEdgeId<I> {
        he.pair()
    }

    /// Get the next half-edge around the face.
    #[inline]
    pub fn next(&self, he: HalfEdgeId<I>) -> HalfEdgeId<I> {
        self.halfedge(he).next
    }

    /// Get the previous half-edge around the face.
    #[inline]
    pub fn prev(&self, he: HalfEdgeId<I>) -> HalfEdgeId<I> {
        self.halfedge(he).prev
    }

    /// Get the origin vertex of a half-edge.
    #[inline]
    pub fn origin(&self, he: HalfEdgeId<I>) -> VertexId<I> {
        self.halfedge(he).origin
    }

    /// Get the destination vertex of a half-edge.
    #[inline]
    pub fn dest(&self, he: HalfEdgeId<I>) -> VertexId<I> {
        self.origin(he.pair())
    }

    /// Get the face of a half-edge.
    #[inline]
    pub fn face_of(&self, he: HalfEdgeId<I>) -> FaceId<I> {
        self.halfedge(he).face
    }

    /// Endpoints of an edge, in the direction of its even half-edge.
    #[inline]
    pub fn edge_vertices(&self, e: EdgeId<I>) -> [VertexId<I>; 2] {
        let he = e.halfedge();
        [self.origin(he), self.dest(he)]
    }

    /// Check if a half-edge is on the boundary.
    #[inline]
    pub fn is_boundary_halfedge(&self, he: HalfEdgeId<I>) -> bool {
        self.halfedge(he).is_boundary()
    }

    /// Check if an edge lies on a naked boundary.
    #[inline]
    pub fn is_boundary_edge(&self, e: EdgeId<I>) -> bool {
        let he = e.halfedge();
        self.is_boundary_halfedge(he) || self.is_boundary_halfedge(he.pair())
    }

    /// Check if a vertex is on the boundary.
    pub fn is_boundary_vertex(&self, v: VertexId<I>) -> bool {
        self.vertex_halfedges(v)
            .any(|he| self.is_boundary_halfedge(he))
    }

    /// Find the half-edge running from `from` to `to`, if the two are adjacent.
    pub fn find_halfedge(&self, from: VertexId<I>, to: VertexId<I>) -> Option<HalfEdgeId<I>> {
        self.vertex_halfedges(from).find(|&he| self.dest(he) == to)
    }

    // ==================== Iteration ====================

    /// Iterate over live vertex IDs.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId<I>> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_used())
            .map(|(i, _)| VertexId::new(i))
    }

    /// Iterate over live edge IDs.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId<I>> + '_ {
        (0..self.num_edges())
            .map(EdgeId::new)
            .filter(move |&e| self.is_edge_used(e))
    }

    /// Iterate over live face IDs.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId<I>> + '_ {
        self.faces
            .iter()
            .enumerate()
            .filter(|(_, f)| f.is_used())
            .map(|(i, _)| FaceId::new(i))
    }

    /// Number of live vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertex_ids().count()
    }

    /// Number of live edges.
    pub fn edge_count(&self) -> usize {
        self.edge_ids().count()
    }

    /// Number of live faces.
    pub fn face_count(&self) -> usize {
        self.face_ids().count()
    }

    /// Iterate over outgoing half-edges around a vertex.
    pub fn vertex_halfedges(&self, v: VertexId<I>) -> VertexHalfEdgeIter<'_, I> {
        VertexHalfEdgeIter::new(self, v)
    }

    /// Ordered 1-ring of a vertex.
    pub fn vertex_neighbors(&self, v: VertexId<I>) -> impl Iterator<Item = VertexId<I>> + '_ {
        self.vertex_halfedges(v).map(|he| self.dest(he))
    }

    /// Iterate over faces adjacent to a vertex.
    pub fn vertex_faces(&self, v: VertexId<I>) -> impl Iterator<Item = FaceId<I>> + '_ {
        self.vertex_halfedges(v)
            .map(|he| self.face_of(he))
            .filter(|f| f.is_valid())
    }

    /// Get the three vertices of a triangular face.
    pub fn face_triangle(&self, f: FaceId<I>) -> [VertexId<I>; 3] {
        let he0 = self.face(f).halfedge;
        let he1 = self.next(he0);
        let he2 = self.next(he1);
        [self.origin(he0), self.origin(he1), self.origin(he2)]
    }

    /// Get the positions of the three vertices of a triangular face.
    pub fn face_positions(&self, f: FaceId<I>) -> [Point3<f64>; 3] {
        let [v0, v1, v2] = self.face_triangle(f);
        [*self.position(v0), *self.position(v1), *self.position(v2)]
    }

    // ==================== Geometry ====================

    /// Compute the unit normal of a face.
    pub fn face_normal(&self, f: FaceId<I>) -> Vector3<f64> {
        let [p0, p1, p2] = self.face_positions(f);
        (p1 - p0)
            .cross(&(p2 - p0))
            .try_normalize(f64::EPSILON)
            .unwrap_or_else(Vector3::zeros)
    }

    /// Compute the area of a face.
    pub fn face_area(&self, f: FaceId<I>) -> f64 {
        let [p0, p1, p2] = self.face_positions(f);
        0.5 * (p1 - p0).cross(&(p2 - p0)).norm()
    }

    /// Area-weighted vertex normal.
    ///
    /// Returns the zero vector when the incident faces are degenerate or
    /// cancel out.
    pub fn vertex_normal(&self, v: VertexId<I>) -> Vector3<f64> {
        let mut normal = Vector3::zeros();
        for f in self.vertex_faces(v) {
            let [p0, p1, p2] = self.face_positions(f);
            normal += (p1 - p0).cross(&(p2 - p0));
        }
        normal
            .try_normalize(f64::EPSILON)
            .unwrap_or_else(Vector3::zeros)
    }

    /// Compute the length of an edge.
    pub fn edge_length(&self, e: EdgeId<I>) -> f64 {
        self.edge_vector(e).norm()
    }

    /// Vector along an edge, from its first to its second endpoint.
    pub fn edge_vector(&self, e: EdgeId<I>) -> Vector3<f64> {
        let [a, b] = self.edge_vertices(e);
        self.position(b) - self.position(a)
    }

    /// Compute the midpoint of an edge.
    pub fn edge_midpoint(&self, e: EdgeId<I>) -> Point3<f64> {
        let [a, b] = self.edge_vertices(e);
        nalgebra::center(self.position(a), self.position(b))
    }

    /// Number of edges incident to a vertex.
    pub fn valence(&self, v: VertexId<I>) -> usize {
        self.vertex_halfedges(v).count()
    }

    /// Compute the bounding box of the live vertices.
    pub fn bounding_box(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let mut ids = self.vertex_ids();
        let first = *self.position(ids.next()?);
        let (mut min, mut max) = (first, first);

        for v in ids {
            let p = self.position(v);
            for i in 0..3 {
                min[i] = min[i].min(p[i]);
                max[i] = max[i].max(p[i]);
            }
        }

        Some((min, max))
    }

    /// Compute the total surface area of the mesh.
    pub fn surface_area(&self) -> f64 {
        self.face_ids().map(|f| self.face_area(f)).sum()
    }

    // ==================== Construction ====================

    /// Add a new isolated vertex and return its ID.
    ///
    /// The vertex counts as unused until an edge is attached to it.
    pub fn add_vertex(&mut self, position: Point3<f64>) -> VertexId<I> {
        let id = VertexId::new(self.vertices.len());
        self.vertices.push(Vertex::new(position));
        id
    }

    /// Allocate a twin pair `a -> b`, `b -> a` and return the first half-edge.
    pub(crate) fn new_edge(&mut self, a: VertexId<I>, b: VertexId<I>) -> HalfEdgeId<I> {
        let he = HalfEdgeId::new(self.halfedges.len());
        self.halfedges.push(HalfEdge {
            origin: a,
            ..HalfEdge::new()
        });
        self.halfedges.push(HalfEdge {
            origin: b,
            ..HalfEdge::new()
        });
        he
    }

    /// Allocate a face bordered by the three given half-edges, linking them
    /// into a cycle.
    pub(crate) fn new_face(&mut self, hes: [HalfEdgeId<I>; 3]) -> FaceId<I> {
        let f = FaceId::new(self.faces.len());
        self.faces.push(Face::new(hes[0]));
        self.link_face(f, hes);
        f
    }

    /// Set `next`/`prev`/`face` so `hes` forms the cycle of face `f`.
    pub(crate) fn link_face(&mut self, f: FaceId<I>, hes: [HalfEdgeId<I>; 3]) {
        for i in 0..3 {
            let he = self.halfedge_mut(hes[i]);
            he.next = hes[(i + 1) % 3];
            he.prev = hes[(i + 2) % 3];
            he.face = f;
        }
        self.face_mut(f).halfedge = hes[0];
    }

    /// Link `a.next = b`, `b.prev = a`.
    #[inline]
    pub(crate) fn link(&mut self, a: HalfEdgeId<I>, b: HalfEdgeId<I>) {
        self.halfedge_mut(a).next = b;
        self.halfedge_mut(b).prev = a;
    }

    // ==================== Validation ====================

    /// Check that all connectivity and tag mirroring is consistent.
    ///
    /// Tombstoned slots are ignored; every live element must only reference
    /// live elements.
    pub fn is_valid(&self) -> bool {
        if self.halfedges.len() % 2 != 0 {
            return false;
        }

        for (i, v) in self.vertices.iter().enumerate() {
            if !v.is_used() {
                continue;
            }
            let vid = VertexId::new(i);
            if !self.is_halfedge_used(v.halfedge) || self.origin(v.halfedge) != vid {
                return false;
            }
            // Boundary vertices must start their fan on the boundary.
            let on_boundary = self.vertex_halfedges(vid).any(|he| self.is_boundary_halfedge(he));
            if on_boundary && !self.is_boundary_halfedge(v.halfedge) {
                return false;
            }
        }

        for (i, he) in self.halfedges.iter().enumerate() {
            if !he.is_used() {
                continue;
            }
            let heid = HalfEdgeId::new(i);
            let twin = self.halfedge(heid.pair());
            if !twin.is_used() || twin.feature != he.feature {
                return false;
            }
            if !self.is_vertex_used(he.origin) || he.origin == twin.origin {
                return false;
            }
            if !self.is_halfedge_used(he.next) || !self.is_halfedge_used(he.prev) {
                return false;
            }
            if self.prev(he.next) != heid || self.next(he.prev) != heid {
                return false;
            }
            if self.origin(he.next) != twin.origin {
                return false;
            }
            if he.face.is_valid() {
                if !self.is_face_used(he.face) || self.face_of(he.next) != he.face {
                    return false;
                }
                if self.next(self.next(he.next)) != heid {
                    return false;
                }
            } else if !self.is_boundary_halfedge(he.next) {
                return false;
            }
        }

        for (i, f) in self.faces.iter().enumerate() {
            if !f.is_used() {
                continue;
            }
            if !self.is_halfedge_used(f.halfedge) || self.face_of(f.halfedge) != FaceId::new(i) {
                return false;
            }
        }

        true
    }
}

/// Iterator over outgoing half-edges around a vertex.
pub struct VertexHalfEdgeIter<'a, I: MeshIndex = u32> {
    mesh: &'a HalfEdgeMesh<I>,
    start: HalfEdgeId<I>,
    current: HalfEdgeId<I>,
    done: bool,
}

impl<'a, I: MeshIndex> VertexHalfEdgeIter<'a, I> {
    fn new(mesh: &'a HalfEdgeMesh<I>, v: VertexId<I>) -> Self {
        let start = mesh.vertex(v).halfedge;
        Self {
            mesh,
            start,
            current: start,
            done: !start.is_valid(),
        }
    }
}

impl<'a, I: MeshIndex> Iterator for VertexHalfEdgeIter<'a, I> {
    type Item = HalfEdgeId<I>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.current;

        // v -> w, twin is w -> v, and the half-edge after it leaves v again
        self.current = self.mesh.next(self.current.pair());

        if self.current == self.start || !self.current.is_valid() {
            self.done = true;
        }

        Some(result)
    }
}
