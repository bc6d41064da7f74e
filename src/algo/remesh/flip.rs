//! Edge flip pass.

use log::trace;
use nalgebra::{Point3, Vector3};

use super::FlipCriterion;
use crate::mesh::{EdgeId, HalfEdgeMesh, MeshIndex, VertexId};

/// The quad around an interior edge `a -> b`: `c` is the apex on the left
/// of `a -> b`, `d` on the right.
struct Quad<I: MeshIndex> {
    a: VertexId<I>,
    b: VertexId<I>,
    c: VertexId<I>,
    d: VertexId<I>,
}

impl<I: MeshIndex> Quad<I> {
    fn around(mesh: &HalfEdgeMesh<I>, e: EdgeId<I>) -> Option<Self> {
        if !mesh.is_edge_used(e) || mesh.is_boundary_edge(e) {
            return None;
        }
        let h = e.halfedge();
        Some(Self {
            a: mesh.origin(h),
            b: mesh.dest(h),
            c: mesh.origin(mesh.prev(h)),
            d: mesh.origin(mesh.prev(h.pair())),
        })
    }

    fn positions(&self, mesh: &HalfEdgeMesh<I>) -> [Point3<f64>; 4] {
        [self.a, self.b, self.c, self.d].map(|v| *mesh.position(v))
    }

    /// Whether the quad `a, d, b, c` turns the same way at every corner.
    ///
    /// Degenerate corners count as not convex.
    fn is_convex(&self, mesh: &HalfEdgeMesh<I>) -> bool {
        let ring = [self.a, self.d, self.b, self.c].map(|v| *mesh.position(v));
        let turns: [Vector3<f64>; 4] = std::array::from_fn(|i| {
            let (p, q, r) = (ring[i], ring[(i + 1) % 4], ring[(i + 2) % 4]);
            (q - p).cross(&(r - q))
        });
        let normal: Vector3<f64> = turns.iter().sum();
        turns.iter().all(|t| t.dot(&normal) > 0.0)
    }
}

/// Whether flipping interior edge `e` brings the valences of its quad
/// closer to 6.
///
/// Boundary vertices count two extra edges, so their ideal is 4. Flips that
/// would fold a non-convex quad are refused.
pub fn valence_flip_improves<I: MeshIndex>(mesh: &HalfEdgeMesh<I>, e: EdgeId<I>) -> bool {
    let Some(q) = Quad::around(mesh, e) else {
        return false;
    };

    let val = |v: VertexId<I>| {
        let n = mesh.valence(v) as i64;
        if mesh.is_boundary_vertex(v) {
            n + 2
        } else {
            n
        }
    };
    let (va, vb, vc, vd) = (val(q.a), val(q.b), val(q.c), val(q.d));

    let before = (va - 6).abs() + (vb - 6).abs() + (vc - 6).abs() + (vd - 6).abs();
    let after = (va - 7).abs() + (vb - 7).abs() + (vc - 5).abs() + (vd - 5).abs();
    before > after && q.is_convex(mesh)
}

/// Whether flipping interior edge `e` makes its two triangles Delaunay.
///
/// True when the angles at the apexes, opposite `e`, sum to more than the
/// angles at the endpoints of `e`, which are opposite the flipped diagonal.
pub fn angle_flip_improves<I: MeshIndex>(mesh: &HalfEdgeMesh<I>, e: EdgeId<I>) -> bool {
    let Some(q) = Quad::around(mesh, e) else {
        return false;
    };
    let [pa, pb, pc, pd] = q.positions(mesh);

    let at_endpoints = (pc - pa).angle(&(pd - pa)) + (pd - pb).angle(&(pc - pb));
    let at_apexes = (pa - pc).angle(&(pb - pc)) + (pa - pd).angle(&(pb - pd));
    at_apexes > at_endpoints
}

/// Flip every live interior non-feature edge the criterion asks for.
///
/// Only edges present when the pass starts are considered.
pub(super) fn flip_pass<I: MeshIndex>(mesh: &mut HalfEdgeMesh<I>, criterion: FlipCriterion) -> usize {
    let mut flips = 0;

    for i in 0..mesh.num_edges() {
        let e = EdgeId::new(i);
        if !mesh.is_edge_used(e) || mesh.is_boundary_edge(e) || mesh.edge_feature(e).is_some() {
            continue;
        }

        let wanted = match criterion {
            FlipCriterion::Valence => valence_flip_improves(mesh, e),
            FlipCriterion::Angle => angle_flip_improves(mesh, e),
        };
        if !wanted {
            continue;
        }

        if mesh.flip_edge(e) {
            flips += 1;
        } else {
            trace!("flip {:?} wanted but rejected", e);
        }
    }

    flips
}
