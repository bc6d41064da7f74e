//! Smoothing and projection passes.

use nalgebra::{Point3, Vector3};

use crate::algo::smooth::{
    apply_displacements, filtered_average, laplacian_displacements, tangential, vertex_normals,
    SmoothingWeights,
};
use crate::geometry::GeometryProjector;
use crate::mesh::{HalfEdgeMesh, MeshIndex};

/// Damping on the cotangent displacement in minimal-surface mode.
const COTANGENT_DAMPING: f64 = 0.5;

/// Move every non-anchored vertex toward its neighbours.
///
/// Interior vertices move tangentially toward their 1-ring centroid.
/// Boundary vertices move toward their boundary neighbours and feature
/// vertices toward neighbours on the same curve (or anchored), so both
/// slide along their constraint. Displacements are computed from one
/// snapshot and applied together.
pub(super) fn smooth_pass<I: MeshIndex>(mesh: &mut HalfEdgeMesh<I>, strength: f64, minimal: bool) {
    if strength == 0.0 {
        return;
    }

    if minimal {
        let mut moves = laplacian_displacements(mesh, SmoothingWeights::Cotangent, strength);
        for v in mesh.vertex_ids() {
            let d = &mut moves[v.index()];
            *d = if mesh.anchor(v).is_some() {
                Vector3::zeros()
            } else {
                *d * COTANGENT_DAMPING
            };
        }
        apply_displacements(mesh, &moves);
    }

    let uniform = laplacian_displacements(mesh, SmoothingWeights::Uniform, strength);
    let normals = vertex_normals(mesh);
    let mut moves = vec![Vector3::zeros(); mesh.num_vertices()];

    for v in mesh.vertex_ids() {
        if mesh.anchor(v).is_some() {
            continue;
        }
        let p = *mesh.position(v);
        let mut d = tangential(&uniform[v.index()], &normals[v.index()]);

        if mesh.is_boundary_vertex(v) {
            if let Some(avg) = filtered_average(mesh, v, |n| mesh.is_boundary_vertex(n)) {
                d = strength * (avg - p);
            }
        }

        if let Some(feature) = mesh.vertex_feature(v) {
            let same_curve = |n| mesh.vertex_feature(n) == Some(feature) || mesh.anchor(n).is_some();
            if let Some(avg) = filtered_average(mesh, v, same_curve) {
                d = strength * (avg - p);
            }
        }

        moves[v.index()] = d;
    }

    apply_displacements(mesh, &moves);
}

/// Pull every non-anchored vertex `pull` of the way toward `surface`.
///
/// The target is the nearer hit of rays cast both ways along the vertex
/// normal within one unit, falling back to the closest surface point.
/// Vertices with no target stay put.
pub(super) fn project_pass<I: MeshIndex>(
    mesh: &mut HalfEdgeMesh<I>,
    surface: &dyn GeometryProjector,
    pull: f64,
) {
    let normals = vertex_normals(mesh);
    let mut moved = Vec::new();

    for v in mesh.vertex_ids() {
        if mesh.anchor(v).is_some() {
            continue;
        }
        let p = *mesh.position(v);
        if let Some(q) = surface_target(surface, &p, &normals[v.index()]) {
            moved.push((v, p + (q - p) * pull));
        }
    }

    for (v, p) in moved {
        mesh.set_position(v, p);
    }
}

fn surface_target(
    surface: &dyn GeometryProjector,
    p: &Point3<f64>,
    normal: &Vector3<f64>,
) -> Option<Point3<f64>> {
    let hit = if normal.norm_squared() > 0.0 {
        [*normal, -normal]
            .iter()
            .filter_map(|dir| surface.ray_intersect(p, dir))
            .filter(|(t, _)| *t < 1.0)
            .min_by(|x, y| x.0.total_cmp(&y.0))
            .map(|(_, q)| q)
    } else {
        None
    };
    hit.or_else(|| surface.closest_point(p))
}
