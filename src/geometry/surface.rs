//! Triangle-soup target surface.

use nalgebra::{Point3, Vector3};

use super::primitives::{closest_point_on_triangle, ray_triangle_intersect};
use super::GeometryProjector;
use crate::mesh::{HalfEdgeMesh, MeshIndex};

/// Relative parallel-ray threshold for Möller–Trumbore.
const RAY_EPSILON: f64 = 1e-12;

/// A fixed set of triangles answering projection queries by linear scan.
#[derive(Debug, Clone, Default)]
pub struct TriangleSurface {
    triangles: Vec<[Point3<f64>; 3]>,
}

impl TriangleSurface {
    /// Build a surface from explicit triangles.
    pub fn new(triangles: Vec<[Point3<f64>; 3]>) -> Self {
        Self { triangles }
    }

    /// Snapshot the live faces of a mesh.
    pub fn from_mesh<I: MeshIndex>(mesh: &HalfEdgeMesh<I>) -> Self {
        Self::new(mesh.face_ids().map(|f| mesh.face_positions(f)).collect())
    }

    /// Build a surface from indexed triangles.
    ///
    /// Faces referencing missing vertices are skipped.
    pub fn from_indexed(vertices: &[Point3<f64>], faces: &[[usize; 3]]) -> Self {
        let triangles = faces
            .iter()
            .filter_map(|f| {
                Some([
                    *vertices.get(f[0])?,
                    *vertices.get(f[1])?,
                    *vertices.get(f[2])?,
                ])
            })
            .collect();
        Self::new(triangles)
    }

    /// Number of triangles.
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// Whether the surface has no triangles.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

impl GeometryProjector for TriangleSurface {
    fn closest_point(&self, p: &Point3<f64>) -> Option<Point3<f64>> {
        self.triangles
            .iter()
            .map(|[a, b, c]| closest_point_on_triangle(p, a, b, c))
            .min_by(|x, y| (x - p).norm_squared().total_cmp(&(y - p).norm_squared()))
    }

    fn ray_intersect(
        &self,
        origin: &Point3<f64>,
        direction: &Vector3<f64>,
    ) -> Option<(f64, Point3<f64>)> {
        self.triangles
            .iter()
            .filter_map(|tri| ray_triangle_intersect(origin, direction, tri, RAY_EPSILON))
            .min_by(f64::total_cmp)
            .map(|t| (t, origin + direction * t))
    }
}
