//! Anchor and feature-curve bookkeeping.
//!
//! Tags live on the mesh records (see [`Vertex`](crate::mesh::Vertex) and
//! [`HalfEdge`](crate::mesh::HalfEdge)); the tracker owns the constraint
//! geometry and decides which elements get which tag. Compaction needs no
//! help from the tracker since tags move with their records.

use log::{debug, info};
use nalgebra::Point3;

use crate::geometry::FeatureCurve;
use crate::mesh::{EdgeSplit, HalfEdgeMesh, MeshIndex, VertexId};

/// Tag counts after [`FeatureTracker::seed`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    /// Vertices pinned to a fixed point.
    pub anchored_vertices: usize,
    /// Vertices constrained to a curve.
    pub feature_vertices: usize,
    /// Edges constrained to a curve.
    pub feature_edges: usize,
}

/// Fixed points and feature curves plus the proximity rule that maps mesh
/// elements onto them.
pub struct FeatureTracker {
    fixed_points: Vec<Point3<f64>>,
    curves: Vec<Box<dyn FeatureCurve>>,
    tolerance: f64,
}

impl std::fmt::Debug for FeatureTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureTracker")
            .field("fixed_points", &self.fixed_points)
            .field("curves", &self.curves.len())
            .field("tolerance", &self.tolerance)
            .finish()
    }
}

impl FeatureTracker {
    /// Create a tracker. Elements closer than `tolerance` (strictly) to a
    /// constraint are tagged with it.
    pub fn new(
        fixed_points: Vec<Point3<f64>>,
        curves: Vec<Box<dyn FeatureCurve>>,
        tolerance: f64,
    ) -> Self {
        Self {
            fixed_points,
            curves,
            tolerance,
        }
    }

    /// Proximity tolerance.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Fixed point with the given anchor id.
    pub fn fixed_point(&self, anchor: usize) -> Option<&Point3<f64>> {
        self.fixed_points.get(anchor)
    }

    /// Feature curve with the given id.
    pub fn curve(&self, feature: usize) -> Option<&dyn FeatureCurve> {
        self.curves.get(feature).map(|c| c.as_ref())
    }

    /// Number of fixed points.
    pub fn num_fixed_points(&self) -> usize {
        self.fixed_points.len()
    }

    /// Number of feature curves.
    pub fn num_curves(&self) -> usize {
        self.curves.len()
    }

    /// Replace every tag on `mesh` by proximity to the constraints.
    ///
    /// - anchor: nearest fixed point within tolerance
    /// - vertex feature: nearest curve within tolerance
    /// - edge feature: among curves both endpoints are within tolerance of,
    ///   the one with the smallest larger endpoint distance
    ///
    /// Ties go to the lowest index, so seeding is deterministic.
    pub fn seed<I: MeshIndex>(&self, mesh: &mut HalfEdgeMesh<I>) -> SeedSummary {
        mesh.clear_tags();
        let mut summary = SeedSummary::default();

        // distances[v][c], filled for live vertices
        let mut distances = vec![Vec::new(); mesh.num_vertices()];
        for v in mesh.vertex_ids().collect::<Vec<_>>() {
            let p = *mesh.position(v);
            let row: Vec<f64> = self.curves.iter().map(|c| c.distance(&p)).collect();

            let anchor = nearest_within(
                self.fixed_points.iter().map(|fp| (fp - p).norm()),
                self.tolerance,
            );
            let feature = nearest_within(row.iter().copied(), self.tolerance);
            mesh.set_anchor(v, anchor);
            mesh.set_vertex_feature(v, feature);
            summary.anchored_vertices += usize::from(anchor.is_some());
            summary.feature_vertices += usize::from(feature.is_some());

            distances[v.index()] = row;
        }

        for e in mesh.edge_ids().collect::<Vec<_>>() {
            let [a, b] = mesh.edge_vertices(e);
            let (da, db) = (&distances[a.index()], &distances[b.index()]);
            let feature = nearest_within(
                da.iter().zip(db).map(|(x, y)| x.max(*y)),
                self.tolerance,
            );
            mesh.set_edge_feature(e, feature);
            summary.feature_edges += usize::from(feature.is_some());
        }

        info!(
            "seeded {} anchors, {} feature vertices, {} feature edges",
            summary.anchored_vertices, summary.feature_vertices, summary.feature_edges
        );
        summary
    }

    /// Tag the elements created by a split of an edge tagged `parent_feature`.
    ///
    /// The new vertex and both sub-edges take the parent's feature; the new
    /// vertex is never anchored and the diagonals are untagged.
    pub fn on_split<I: MeshIndex>(
        mesh: &mut HalfEdgeMesh<I>,
        split: &EdgeSplit<I>,
        parent_feature: Option<usize>,
    ) {
        mesh.set_anchor(split.vertex, None);
        mesh.set_vertex_feature(split.vertex, parent_feature);
        mesh.set_edge_feature(split.first, parent_feature);
        mesh.set_edge_feature(split.second, parent_feature);
        for d in split.diagonals.iter().flatten() {
            mesh.set_edge_feature(*d, None);
        }
    }

    /// Move anchored vertices exactly onto their fixed points.
    pub fn snap_anchors<I: MeshIndex>(&self, mesh: &mut HalfEdgeMesh<I>) {
        for v in mesh.vertex_ids().collect::<Vec<VertexId<I>>>() {
            if let Some(p) = mesh.anchor(v).and_then(|a| self.fixed_point(a)) {
                mesh.set_position(v, *p);
            }
        }
    }

    /// Move feature vertices onto the closest point of their curve.
    ///
    /// Anchored vertices are left alone.
    pub fn snap_features<I: MeshIndex>(&self, mesh: &mut HalfEdgeMesh<I>) {
        let mut moved = 0usize;
        for v in mesh.vertex_ids().collect::<Vec<VertexId<I>>>() {
            if mesh.anchor(v).is_some() {
                continue;
            }
            if let Some(curve) = mesh.vertex_feature(v).and_then(|c| self.curve(c)) {
                let (_, q) = curve.closest_point(mesh.position(v));
                mesh.set_position(v, q);
                moved += 1;
            }
        }
        debug!("snapped {} feature vertices", moved);
    }
}

/// Index of the smallest value strictly below `tolerance`, first on ties.
fn nearest_within(values: impl Iterator<Item = f64>, tolerance: f64) -> Option<usize> {
    values
        .enumerate()
        .filter(|(_, d)| *d < tolerance)
        .min_by(|(_, x), (_, y)| x.total_cmp(y))
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Polyline;
    use crate::mesh::EdgeId;
    use crate::test_util::{grid, grid_vertex};

    fn left_side() -> Box<dyn FeatureCurve> {
        Box::new(
            Polyline::open(vec![Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 3.0, 0.0)]).unwrap(),
        )
    }

    fn bottom_side() -> Box<dyn FeatureCurve> {
        Box::new(
            Polyline::open(vec![Point3::new(0.0, 0.0, 0.0), Point3::new(3.0, 0.0, 0.0)]).unwrap(),
        )
    }

    fn tracker() -> FeatureTracker {
        FeatureTracker::new(
            vec![Point3::new(3.0, 3.0, 0.0), Point3::new(3.0, 3.005, 0.0)],
            vec![left_side(), bottom_side()],
            0.01,
        )
    }

    #[test]
    fn test_accessors() {
        let t = tracker();
        assert_eq!(t.num_fixed_points(), 2);
        assert_eq!(t.num_curves(), 2);
        assert_eq!(t.tolerance(), 0.01);
        assert_eq!(t.fixed_point(1), Some(&Point3::new(3.0, 3.005, 0.0)));
        assert!(t.fixed_point(2).is_none());
        assert!(t.curve(1).is_some());
        assert!(t.curve(2).is_none());
    }

    #[test]
    fn test_seed_tags() {
        let mut mesh = grid(3, 3, 1.0);
        let summary = tracker().seed(&mut mesh);

        // Nearest of the two fixed points wins.
        assert_eq!(mesh.anchor(grid_vertex(3, 3, 3)), Some(0));
        assert_eq!(summary.anchored_vertices, 1);

        assert_eq!(mesh.vertex_feature(grid_vertex(3, 0, 2)), Some(0));
        assert_eq!(mesh.vertex_feature(grid_vertex(3, 2, 0)), Some(1));
        assert_eq!(mesh.vertex_feature(grid_vertex(3, 1, 1)), None);
        // Corner lies on both curves at distance 0; the first is taken.
        assert_eq!(mesh.vertex_feature(grid_vertex(3, 0, 0)), Some(0));
        assert_eq!(summary.feature_vertices, 7);

        let left = mesh
            .find_halfedge(grid_vertex(3, 0, 1), grid_vertex(3, 0, 0))
            .unwrap()
            .edge();
        assert_eq!(mesh.edge_feature(left), Some(0));
        // Joins (0,0) and (1,1); (1,1) is on no curve.
        let diagonal = mesh
            .find_halfedge(grid_vertex(3, 0, 0), grid_vertex(3, 1, 1))
            .unwrap()
            .edge();
        assert_eq!(mesh.edge_feature(diagonal), None);
        assert_eq!(summary.feature_edges, 6);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_tolerance_is_strict() {
        let mut mesh = grid(1, 1, 1.0);
        let t = FeatureTracker::new(vec![Point3::new(0.01, 0.0, 0.0)], Vec::new(), 0.01);
        t.seed(&mut mesh);
        assert_eq!(mesh.anchor(VertexId::new(0)), None);
    }

    #[test]
    fn test_seed_is_deterministic() {
        let t = tracker();
        let mut mesh = grid(3, 3, 1.0);
        t.seed(&mut mesh);
        let tags = |m: &HalfEdgeMesh| {
            let v: Vec<_> = m
                .vertex_ids()
                .map(|v| (m.anchor(v), m.vertex_feature(v)))
                .collect();
            let e: Vec<_> = m.edge_ids().map(|e| m.edge_feature(e)).collect();
            (v, e)
        };
        let first = tags(&mesh);
        t.seed(&mut mesh);
        assert_eq!(first, tags(&mesh));
    }

    #[test]
    fn test_on_split_propagates() {
        let mut mesh = grid(3, 3, 1.0);
        tracker().seed(&mut mesh);
        let e = mesh
            .find_halfedge(grid_vertex(3, 0, 1), grid_vertex(3, 0, 2))
            .unwrap()
            .edge();
        let parent = mesh.edge_feature(e);
        assert_eq!(parent, Some(0));

        let mid = mesh.edge_midpoint(e);
        let split = mesh.split_edge(e, mid).unwrap();
        FeatureTracker::on_split(&mut mesh, &split, parent);

        assert_eq!(mesh.vertex_feature(split.vertex), Some(0));
        assert_eq!(mesh.anchor(split.vertex), None);
        assert_eq!(mesh.edge_feature(split.first), Some(0));
        assert_eq!(mesh.edge_feature(split.second), Some(0));
        let diagonals: Vec<EdgeId> = split.diagonals.iter().flatten().copied().collect();
        assert_eq!(diagonals.len(), 1);
        assert_eq!(mesh.edge_feature(diagonals[0]), None);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_snapping() {
        let mut mesh = grid(3, 3, 1.0);
        let t = tracker();
        t.seed(&mut mesh);
        let corner = grid_vertex(3, 3, 3);
        let side = grid_vertex(3, 0, 2);
        mesh.set_position(corner, Point3::new(2.5, 2.5, 1.0));
        mesh.set_position(side, Point3::new(0.3, 2.0, 0.2));

        t.snap_anchors(&mut mesh);
        t.snap_features(&mut mesh);

        assert_eq!(*mesh.position(corner), Point3::new(3.0, 3.0, 0.0));
        approx::assert_relative_eq!(*mesh.position(side), Point3::new(0.0, 2.0, 0.0), epsilon = 1e-12);
    }
}
