//! Piecewise-linear feature curves.

use nalgebra::Point3;

use super::primitives::closest_point_on_segment;
use super::FeatureCurve;
use crate::error::{MeshError, Result};
use crate::mesh::{HalfEdgeId, HalfEdgeMesh, MeshIndex};

/// An open or closed polyline.
///
/// The curve parameter of a point is `segment index + local t`, so vertex
/// `i` sits at parameter `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    points: Vec<Point3<f64>>,
    closed: bool,
}

impl Polyline {
    /// Create a polyline through `points`.
    ///
    /// # Errors
    /// Returns `InvalidParameter` when `points` is empty.
    pub fn new(points: Vec<Point3<f64>>, closed: bool) -> Result<Self> {
        if points.is_empty() {
            return Err(MeshError::invalid_param("points", 0, "polyline needs at least one point"));
        }
        Ok(Self { points, closed })
    }

    /// Open polyline through `points`.
    pub fn open(points: Vec<Point3<f64>>) -> Result<Self> {
        Self::new(points, false)
    }

    /// Closed polyline through `points`; the last point connects to the first.
    pub fn closed(points: Vec<Point3<f64>>) -> Result<Self> {
        Self::new(points, true)
    }

    /// The polyline's vertices.
    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    /// Whether the last point connects back to the first.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Iterate over segments as point pairs.
    pub fn segments(&self) -> impl Iterator<Item = (&Point3<f64>, &Point3<f64>)> + '_ {
        let n = self.points.len();
        let count = if self.closed && n > 2 { n } else { n.saturating_sub(1) };
        (0..count).map(move |i| (&self.points[i], &self.points[(i + 1) % n]))
    }

    /// Total length.
    pub fn length(&self) -> f64 {
        self.segments().map(|(a, b)| (b - a).norm()).sum()
    }

    /// Extract every naked boundary loop of `mesh` as a closed polyline.
    ///
    /// Loops are reported in order of their lowest boundary half-edge.
    pub fn boundary_loops<I: MeshIndex>(mesh: &HalfEdgeMesh<I>) -> Vec<Polyline> {
        let mut visited = vec![false; mesh.num_halfedges()];
        let mut loops = Vec::new();

        for i in 0..mesh.num_halfedges() {
            let start = HalfEdgeId::<I>::new(i);
            if visited[i] || !mesh.is_halfedge_used(start) || !mesh.is_boundary_halfedge(start) {
                continue;
            }

            let mut points = Vec::new();
            let mut he = start;
            loop {
                visited[he.index()] = true;
                points.push(*mesh.position(mesh.origin(he)));
                he = mesh.next(he);
                if he == start || !he.is_valid() || visited[he.index()] {
                    break;
                }
            }
            loops.push(Polyline {
                points,
                closed: true,
            });
        }

        loops
    }
}

impl FeatureCurve for Polyline {
    fn closest_point(&self, p: &Point3<f64>) -> (f64, Point3<f64>) {
        let mut best = (0.0, self.points[0]);
        let mut best_dist = (best.1 - p).norm_squared();

        for (i, (a, b)) in self.segments().enumerate() {
            let (t, q) = closest_point_on_segment(p, a, b);
            let dist = (q - p).norm_squared();
            if dist < best_dist {
                best_dist = dist;
                best = (i as f64 + t, q);
            }
        }

        best
    }
}
