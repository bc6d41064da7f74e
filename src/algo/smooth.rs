//! Laplacian displacement fields used by the relaxation pass.
//!
//! Every function here reads the current positions and returns
//! displacements without touching the mesh, so a caller can evaluate all of
//! them against one snapshot and apply them together.
//!
//! # Example
//!
//! ```
//! use bubblemesh::prelude::*;
//! use bubblemesh::algo::smooth::{apply_displacements, laplacian_displacements, SmoothingWeights};
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(2.0, 0.0, 0.0),
//!     Point3::new(2.0, 2.0, 0.0),
//!     Point3::new(0.0, 2.0, 0.0),
//!     Point3::new(0.3, 0.4, 0.0), // off-center interior vertex
//! ];
//! let faces = vec![[0, 1, 4], [1, 2, 4], [2, 3, 4], [3, 0, 4]];
//! let mut mesh: HalfEdgeMesh = build_from_triangles(&vertices, &faces).unwrap();
//!
//! let moves = laplacian_displacements(&mesh, SmoothingWeights::Uniform, 1.0);
//! apply_displacements(&mut mesh, &moves);
//! assert!((mesh.position(VertexId::new(4)) - Point3::new(1.0, 1.0, 0.0)).norm() < 1e-12);
//! ```

use nalgebra::{Point3, Vector3};

use crate::mesh::{HalfEdgeMesh, MeshIndex, VertexId};

/// Below this a cotangent term is treated as degenerate and skipped.
const DEGENERATE_CROSS: f64 = 1e-12;

/// Neighbour weighting for [`laplacian_displacements`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SmoothingWeights {
    /// Every neighbour counts the same; moves toward the 1-ring centroid.
    #[default]
    Uniform,
    /// Cotangent weights from the two triangles sharing each spoke.
    Cotangent,
}

/// Laplacian displacement of every interior vertex, scaled by `strength`.
///
/// Boundary and unused vertices get a zero displacement. The result is
/// indexed by vertex slot.
pub fn laplacian_displacements<I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    weights: SmoothingWeights,
    strength: f64,
) -> Vec<Vector3<f64>> {
    let mut out = vec![Vector3::zeros(); mesh.num_vertices()];
    for v in mesh.vertex_ids() {
        if mesh.is_boundary_vertex(v) {
            continue;
        }
        out[v.index()] = match weights {
            SmoothingWeights::Uniform => uniform_displacement(mesh, v, strength),
            SmoothingWeights::Cotangent => cotangent_displacement(mesh, v, strength),
        };
    }
    out
}

/// `strength * (centroid of neighbours - position)`.
pub fn uniform_displacement<I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    v: VertexId<I>,
    strength: f64,
) -> Vector3<f64> {
    match average_of(mesh, mesh.vertex_neighbors(v)) {
        Some(centroid) => strength * (centroid - mesh.position(v)),
        None => Vector3::zeros(),
    }
}

/// Cotangent-weighted Laplacian of an interior vertex, scaled by `strength`.
///
/// The spoke to ring vertex `n_j` is weighted by `|cot a| + |cot b|`, where
/// `a` and `b` are the angles at the two ring vertices adjacent to `n_j`.
pub fn cotangent_displacement<I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    v: VertexId<I>,
    strength: f64,
) -> Vector3<f64> {
    let p = *mesh.position(v);
    let ring: Vec<Point3<f64>> = mesh
        .vertex_neighbors(v)
        .map(|n| *mesh.position(n))
        .collect();
    let n = ring.len();
    if n < 3 {
        return Vector3::zeros();
    }

    let radial: Vec<Vector3<f64>> = ring.iter().map(|q| q - p).collect();
    let around: Vec<Vector3<f64>> = (0..n).map(|j| ring[(j + 1) % n] - ring[j]).collect();

    let mut sum = Vector3::zeros();
    let mut total = 0.0;
    for j in 0..n {
        let prev = (j + n - 1) % n;
        let next = (j + 1) % n;
        let w = abs_cot(&radial[prev], &around[prev]) + abs_cot(&radial[next], &around[j]);
        sum += w * radial[j];
        total += w;
    }

    if total <= 0.0 {
        return Vector3::zeros();
    }
    strength * sum / total
}

/// `|cos / sin|` of the angle between `a` and `b`, zero when degenerate.
fn abs_cot(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    let cross = a.cross(b).norm();
    if cross < DEGENERATE_CROSS {
        return 0.0;
    }
    (a.dot(b) / cross).abs()
}

/// Drop the component of `d` along the unit vector `normal`.
///
/// A zero normal leaves `d` unchanged.
pub fn tangential(d: &Vector3<f64>, normal: &Vector3<f64>) -> Vector3<f64> {
    d - normal * normal.dot(d)
}

/// Mean position of the neighbours of `v` accepted by `filter`, if any.
pub fn filtered_average<I, F>(mesh: &HalfEdgeMesh<I>, v: VertexId<I>, filter: F) -> Option<Point3<f64>>
where
    I: MeshIndex,
    F: Fn(VertexId<I>) -> bool,
{
    average_of(mesh, mesh.vertex_neighbors(v).filter(|&n| filter(n)))
}

fn average_of<I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    vertices: impl Iterator<Item = VertexId<I>>,
) -> Option<Point3<f64>> {
    let mut sum = Vector3::zeros();
    let mut count = 0usize;
    for n in vertices {
        sum += mesh.position(n).coords;
        count += 1;
    }
    (count > 0).then(|| Point3::from(sum / count as f64))
}

/// Unit area-weighted normal of every vertex, indexed by vertex slot.
pub fn vertex_normals<I: MeshIndex>(mesh: &HalfEdgeMesh<I>) -> Vec<Vector3<f64>> {
    let mut normals = vec![Vector3::zeros(); mesh.num_vertices()];
    for v in mesh.vertex_ids() {
        normals[v.index()] = mesh.vertex_normal(v);
    }
    normals
}

/// Add `displacements[v]` to every live vertex.
pub fn apply_displacements<I: MeshIndex>(mesh: &mut HalfEdgeMesh<I>, displacements: &[Vector3<f64>]) {
    for v in mesh.vertex_ids().collect::<Vec<_>>() {
        if let Some(d) = displacements.get(v.index()) {
            let p = mesh.position(v) + d;
            mesh.set_position(v, p);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::build_from_triangles;
    use crate::test_util::{disk, grid, grid_vertex};
    use approx::assert_relative_eq;

    /// Square fan around an interior vertex at `center`.
    fn fan(center: Point3<f64>) -> HalfEdgeMesh {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 2.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
            center,
        ];
        let faces = vec![[0, 1, 4], [1, 2, 4], [2, 3, 4], [3, 0, 4]];
        build_from_triangles(&vertices, &faces).unwrap()
    }

    #[test]
    fn test_uniform_moves_to_centroid() {
        let mesh = fan(Point3::new(0.5, 0.5, 0.3));
        let d = uniform_displacement(&mesh, VertexId::new(4), 0.5);
        assert_relative_eq!(d, Vector3::new(0.25, 0.25, -0.15), epsilon = 1e-12);
    }

    #[test]
    fn test_boundary_vertices_not_displaced() {
        let mesh = fan(Point3::new(0.5, 0.5, 0.0));
        let moves = laplacian_displacements(&mesh, SmoothingWeights::Uniform, 1.0);
        for m in &moves[..4] {
            assert_eq!(*m, Vector3::zeros());
        }
        assert!(moves[4].norm() > 0.1);
    }

    #[test]
    fn test_cotangent_regular_is_stationary() {
        // Center of a regular planar disk is already balanced.
        let mesh = disk(2, 8, 2.0);
        let d = cotangent_displacement(&mesh, VertexId::new(0), 1.0);
        assert_relative_eq!(d.norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_cotangent_flattens_peak() {
        let mesh = fan(Point3::new(1.0, 1.0, 0.5));
        let d = cotangent_displacement(&mesh, VertexId::new(4), 1.0);
        assert!(d.z < 0.0);
        assert_relative_eq!(d.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(d.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_tangential_removes_normal_part() {
        let d = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(tangential(&d, &Vector3::z()), Vector3::new(1.0, 2.0, 0.0));
        assert_eq!(tangential(&d, &Vector3::zeros()), d);
    }

    #[test]
    fn test_filtered_average() {
        let mesh = grid(2, 2, 1.0);
        let center = grid_vertex(2, 1, 1);
        let boundary = filtered_average(&mesh, center, |n| mesh.is_boundary_vertex(n)).unwrap();
        // Every neighbour of the center is on the boundary.
        let all = filtered_average(&mesh, center, |_| true).unwrap();
        assert_relative_eq!(boundary, all);
        assert_relative_eq!(all, Point3::new(1.0, 1.0, 0.0), epsilon = 1e-12);

        assert!(filtered_average(&mesh, center, |_| false).is_none());
    }

    #[test]
    fn test_vertex_normals_of_plane() {
        let mesh = grid(2, 2, 1.0);
        for n in vertex_normals(&mesh) {
            assert_relative_eq!(n, Vector3::z(), epsilon = 1e-12);
        }
    }
}
