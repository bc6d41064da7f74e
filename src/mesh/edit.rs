//! Local topology edits: edge split, edge collapse and edge flip.
//!
//! Every edit either succeeds and leaves a valid manifold mesh, or is
//! rejected and leaves the mesh untouched. Removed elements are tombstoned
//! in place; [`HalfEdgeMesh::compact`] reclaims them.
//!
//! Tags on existing records stay put. New elements created by a split start
//! untagged, see [`FeatureTracker::on_split`](crate::feature::FeatureTracker::on_split).

use log::trace;
use nalgebra::Point3;

use super::halfedge::{HalfEdge, HalfEdgeMesh};
use super::index::{EdgeId, HalfEdgeId, MeshIndex, VertexId};

/// Elements produced by [`HalfEdgeMesh::split_edge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeSplit<I: MeshIndex = u32> {
    /// The inserted vertex.
    pub vertex: VertexId<I>,
    /// Sub-edge touching the first endpoint; reuses the split edge's index.
    pub first: EdgeId<I>,
    /// Sub-edge touching the second endpoint.
    pub second: EdgeId<I>,
    /// New edges from the inserted vertex to the apexes of the adjacent faces.
    pub diagonals: [Option<EdgeId<I>>; 2],
}

impl<I: MeshIndex> EdgeSplit<I> {
    /// Every edge created by the split (not including the reused one).
    pub fn new_edges(&self) -> impl Iterator<Item = EdgeId<I>> + '_ {
        std::iter::once(self.second).chain(self.diagonals.iter().flatten().copied())
    }
}

impl<I: MeshIndex> HalfEdgeMesh<I> {
    /// Insert a vertex at `position` on edge `e`.
    ///
    /// With `e` running `a -> b`, the edge keeps its index as `a -> m`, and
    /// each adjacent triangle is divided in two by a new edge from `m` to its
    /// apex. Returns `None` if the edge is unused.
    pub fn split_edge(&mut self, e: EdgeId<I>, position: Point3<f64>) -> Option<EdgeSplit<I>> {
        if !self.is_edge_used(e) {
            return None;
        }

        let h0 = e.halfedge();
        let h1 = h0.pair();
        let b = self.dest(h0);

        let m = self.add_vertex(position);
        let n0 = self.new_edge(m, b);
        let n1 = n0.pair();
        self.halfedge_mut(h1).origin = m;

        let mut diagonals = [None, None];

        // Side of h0: (a, b, c) -> (a, m, c) + (m, b, c)
        let f0 = self.face_of(h0);
        if f0.is_valid() {
            let hb = self.next(h0);
            let hc = self.prev(h0);
            let c = self.origin(hc);
            let d0 = self.new_edge(m, c);
            self.link_face(f0, [h0, d0, hc]);
            self.new_face([n0, hb, d0.pair()]);
            diagonals[0] = Some(d0.edge());
        } else {
            let after = self.next(h0);
            self.link(h0, n0);
            self.link(n0, after);
        }

        // Side of h1: (b, a, d) -> (m, a, d) + (b, m, d)
        let f1 = self.face_of(h1);
        if f1.is_valid() {
            let ha = self.next(h1);
            let hd = self.prev(h1);
            let d = self.origin(hd);
            let e0 = self.new_edge(d, m);
            self.link_face(f1, [h1, ha, e0]);
            self.new_face([n1, e0.pair(), hd]);
            diagonals[1] = Some(e0.edge());
        } else {
            let before = self.prev(h1);
            self.link(before, n1);
            self.link(n1, h1);
        }

        self.vertex_mut(m).halfedge = if f1.is_valid() { n0 } else { h1 };
        if self.vertex(b).halfedge == h1 {
            self.vertex_mut(b).halfedge = n1;
        }

        Some(EdgeSplit {
            vertex: m,
            first: e,
            second: n0.edge(),
            diagonals,
        })
    }

    /// Check whether collapsing `he` would keep the mesh manifold.
    pub fn is_collapse_ok(&self, he: HalfEdgeId<I>) -> bool {
        if !self.is_halfedge_used(he) {
            return false;
        }
        let t = he.pair();
        let (h_open, t_open) = (self.is_boundary_halfedge(he), self.is_boundary_halfedge(t));
        if h_open && t_open {
            return false;
        }

        let a = self.origin(he);
        let b = self.dest(he);
        if !h_open && !t_open && self.is_boundary_vertex(a) && self.is_boundary_vertex(b) {
            trace!("collapse {:?}: interior edge between boundary vertices", he.edge());
            return false;
        }

        let mut apexes = Vec::with_capacity(2);
        if !h_open {
            apexes.push(self.origin(self.prev(he)));
        }
        if !t_open {
            apexes.push(self.origin(self.prev(t)));
        }

        // Link condition: the shared neighbours are exactly the apexes.
        let ring_b: Vec<VertexId<I>> = self.vertex_neighbors(b).collect();
        let common: Vec<VertexId<I>> = self
            .vertex_neighbors(a)
            .filter(|v| ring_b.contains(v))
            .collect();
        if common.len() != apexes.len() || !apexes.iter().all(|v| common.contains(v)) {
            trace!("collapse {:?}: link condition fails", he.edge());
            return false;
        }

        for &apex in &apexes {
            let min_valence = if self.is_boundary_vertex(apex) { 2 } else { 3 };
            if self.valence(apex) <= min_valence {
                trace!("collapse {:?}: apex {:?} would degenerate", he.edge(), apex);
                return false;
            }
        }

        true
    }

    /// Merge the origin of `he` into its destination.
    ///
    /// Returns the surviving vertex, or `None` (without touching the mesh)
    /// if the collapse is not allowed. Positions are not changed.
    pub fn collapse_edge(&mut self, he: HalfEdgeId<I>) -> Option<VertexId<I>> {
        if !self.is_collapse_ok(he) {
            return None;
        }

        let t = he.pair();
        let a = self.origin(he);
        let b = self.dest(he);
        let outgoing: Vec<HalfEdgeId<I>> = self.vertex_halfedges(a).collect();

        // Open sides are unlinked first so the face sides below read the
        // updated boundary links.
        for side in [he, t] {
            if self.is_boundary_halfedge(side) {
                let (p, n) = (self.prev(side), self.next(side));
                self.link(p, n);
            }
        }

        let mut removed_edges = vec![he.edge()];
        let mut removed_faces = Vec::with_capacity(2);
        let mut fixups = Vec::with_capacity(3);

        // (a, b, c): b -> c replaces a -> c
        if !self.is_boundary_halfedge(he) {
            let hb = self.next(he);
            let hc = self.prev(he);
            let c = self.origin(hc);
            self.absorb(hb, hc.pair());
            if self.vertex(c).halfedge == hc {
                self.vertex_mut(c).halfedge = hb.pair();
            }
            removed_edges.push(hc.edge());
            removed_faces.push(self.face_of(he));
            fixups.push(c);
        }

        // (b, a, d): d -> b replaces d -> a
        if !self.is_boundary_halfedge(t) {
            let ha = self.next(t);
            let hd = self.prev(t);
            let d = self.origin(hd);
            self.absorb(hd, ha.pair());
            if self.vertex(d).halfedge == ha.pair() {
                self.vertex_mut(d).halfedge = hd;
            }
            removed_edges.push(ha.edge());
            removed_faces.push(self.face_of(t));
            fixups.push(d);
        }

        for out in outgoing {
            self.halfedge_mut(out).origin = b;
        }

        // Any surviving outgoing half-edge of b will do before adjusting.
        let seed = if self.is_boundary_halfedge(he) {
            self.prev(t).pair()
        } else {
            self.next(he)
        };
        self.vertex_mut(b).halfedge = seed;

        for e in removed_edges {
            for h in e.halfedges() {
                *self.halfedge_mut(h) = HalfEdge::new();
            }
        }
        for f in removed_faces {
            self.face_mut(f).halfedge = HalfEdgeId::invalid();
        }
        let removed = self.vertex_mut(a);
        removed.halfedge = HalfEdgeId::invalid();
        removed.anchor = None;
        removed.feature = None;

        self.adjust_outgoing(b);
        for v in fixups {
            self.adjust_outgoing(v);
        }

        Some(b)
    }

    /// Make `keep` take the place of `gone` in its face cycle, inheriting the
    /// edge feature if `keep` has none.
    fn absorb(&mut self, keep: HalfEdgeId<I>, gone: HalfEdgeId<I>) {
        let (p, n, f) = (self.prev(gone), self.next(gone), self.face_of(gone));
        self.link(p, keep);
        self.link(keep, n);
        self.halfedge_mut(keep).face = f;
        if f.is_valid() {
            self.face_mut(f).halfedge = keep;
        }
        if self.edge_feature(keep.edge()).is_none() {
            let inherited = self.halfedge(gone).feature;
            self.set_edge_feature(keep.edge(), inherited);
        }
    }

    /// Rotate edge `e` inside its quad so it joins the two apexes.
    ///
    /// Returns `false` without changes for boundary or unused edges, when the
    /// apexes are already connected, or when an endpoint has valence 3 or
    /// less.
    pub fn flip_edge(&mut self, e: EdgeId<I>) -> bool {
        if !self.is_edge_used(e) || self.is_boundary_edge(e) {
            return false;
        }

        let h = e.halfedge();
        let t = h.pair();
        let (a, b) = (self.origin(h), self.dest(h));
        let (hb, hc) = (self.next(h), self.prev(h));
        let (ha, hd) = (self.next(t), self.prev(t));
        let (c, d) = (self.origin(hc), self.origin(hd));

        if c == d || self.find_halfedge(c, d).is_some() {
            trace!("flip {:?}: apexes already connected", e);
            return false;
        }
        if self.valence(a) <= 3 || self.valence(b) <= 3 {
            trace!("flip {:?}: endpoint valence too low", e);
            return false;
        }

        let (f0, f1) = (self.face_of(h), self.face_of(t));
        self.halfedge_mut(h).origin = d;
        self.halfedge_mut(t).origin = c;
        self.link_face(f0, [h, hc, ha]);
        self.link_face(f1, [t, hd, hb]);

        if self.vertex(a).halfedge == h {
            self.vertex_mut(a).halfedge = ha;
        }
        if self.vertex(b).halfedge == t {
            self.vertex_mut(b).halfedge = hb;
        }

        true
    }

    /// Point a boundary vertex at its outgoing boundary half-edge.
    pub(crate) fn adjust_outgoing(&mut self, v: VertexId<I>) {
        if !self.is_vertex_used(v) {
            return;
        }
        if let Some(he) = self
            .vertex_halfedges(v)
            .find(|&he| self.is_boundary_halfedge(he))
        {
            self.vertex_mut(v).halfedge = he;
        }
    }
}
