//! Incremental feature-preserving isotropic remeshing.
//!
//! Each iteration of [`Remesher::step`] applies, in order:
//!
//! 1. **Split** edges longer than `(1 + t) · 4/3 · L`
//! 2. **Collapse** edges shorter than `(1 - t) · 4/5 · L`
//! 3. **Flip** interior non-feature edges to improve valence or angles
//! 4. **Smooth** free vertices tangentially (boundary and feature vertices
//!    slide along their boundary or curve)
//! 5. **Project** free vertices back toward the target surface, snap feature
//!    vertices to their curve and anchors to their fixed point
//! 6. **Compact** away tombstoned elements
//!
//! where `L` is the target length reported by a [`LengthField`] and `t` is
//! [`RemeshOptions::length_tolerance`]. Split and collapse mark the 1-ring
//! of every vertex they touch so each neighbourhood changes at most once per
//! iteration.
//!
//! The remesher keeps its state between calls, so a host can run one step per
//! tick and show the mesh converge. [`RemeshSession`] wraps that pattern with
//! reset handling.
//!
//! # Example
//!
//! ```
//! use bubblemesh::prelude::*;
//! use bubblemesh::algo::length::ConstantLength;
//! use bubblemesh::algo::remesh::{RemeshInput, RemeshOptions, Remesher};
//! use bubblemesh::geometry::TriangleSurface;
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(3.0, 0.0, 0.0),
//!     Point3::new(3.0, 3.0, 0.0),
//!     Point3::new(0.0, 3.0, 0.0),
//! ];
//! let mesh: HalfEdgeMesh = build_from_triangles(&vertices, &[[0, 1, 2], [0, 2, 3]]).unwrap();
//! let surface = TriangleSurface::from_mesh(&mesh);
//!
//! let input = RemeshInput::new(mesh, surface, ConstantLength(1.0)).with_fixed_points(vertices);
//! let mut remesher = Remesher::new(input, RemeshOptions::default().with_iterations(3)).unwrap();
//! let stats = remesher.step().unwrap();
//!
//! assert!(stats.splits > 0);
//! assert!(remesher.mesh().is_valid());
//! ```
//!
//! # References
//!
//! - Botsch, M., & Kobbelt, L. (2004). "A remeshing approach to multiresolution modeling."
//!   Symposium on Geometry Processing.

mod flip;
mod refine;
mod relax;
mod session;

pub use flip::{angle_flip_improves, valence_flip_improves};
pub use session::{RemeshSession, SessionState};

use std::ops::AddAssign;

use log::debug;
use nalgebra::Point3;

use crate::algo::length::LengthField;
use crate::error::{MeshError, Result};
use crate::feature::{FeatureTracker, SeedSummary};
use crate::geometry::{FeatureCurve, GeometryProjector};
use crate::mesh::{HalfEdgeMesh, MeshIndex};

use refine::TargetLengths;

/// How the flip pass decides whether to flip an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlipCriterion {
    /// Drive vertex valences toward 6 (4 on the boundary).
    Valence,
    /// Flip when it makes the pair of triangles Delaunay.
    #[default]
    Angle,
}

/// Options for [`Remesher`].
#[derive(Debug, Clone, PartialEq)]
pub struct RemeshOptions {
    /// Distance below which a vertex or edge is tagged with a fixed point or
    /// feature curve at seeding.
    pub proximity_tolerance: f64,

    /// Blend factor toward the target surface after smoothing, in `[0, 1]`.
    /// Zero selects minimal-surface mode: no projection, cotangent smoothing
    /// and the angle flip criterion.
    pub pull: f64,

    /// Flip criterion when `pull > 0`.
    pub flip: FlipCriterion,

    /// Iterations per [`Remesher::step`].
    pub iterations: usize,

    /// Fraction of the Laplacian displacement applied per iteration, in `[0, 1]`.
    pub smoothing_strength: f64,

    /// Hysteresis `t` on the split and collapse thresholds, in `[0, 1)`.
    pub length_tolerance: f64,
}

impl Default for RemeshOptions {
    fn default() -> Self {
        Self {
            proximity_tolerance: 0.01,
            pull: 0.8,
            flip: FlipCriterion::Angle,
            iterations: 1,
            smoothing_strength: 0.8,
            length_tolerance: 0.15,
        }
    }
}

impl RemeshOptions {
    /// Set the seeding proximity tolerance.
    pub fn with_proximity_tolerance(mut self, tolerance: f64) -> Self {
        self.proximity_tolerance = tolerance;
        self
    }

    /// Set the pull toward the target surface.
    pub fn with_pull(mut self, pull: f64) -> Self {
        self.pull = pull;
        self
    }

    /// Set the flip criterion.
    pub fn with_flip(mut self, flip: FlipCriterion) -> Self {
        self.flip = flip;
        self
    }

    /// Set the number of iterations per step.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the smoothing strength.
    pub fn with_smoothing_strength(mut self, strength: f64) -> Self {
        self.smoothing_strength = strength;
        self
    }

    /// Set the split/collapse hysteresis.
    pub fn with_length_tolerance(mut self, tolerance: f64) -> Self {
        self.length_tolerance = tolerance;
        self
    }

    /// Whether these options select minimal-surface mode.
    pub fn is_minimal_surface(&self) -> bool {
        self.pull == 0.0
    }

    /// Split threshold as a multiple of the target length.
    pub fn split_ratio(&self) -> f64 {
        (1.0 + self.length_tolerance) * 4.0 / 3.0
    }

    /// Collapse threshold as a multiple of the target length.
    pub fn collapse_ratio(&self) -> f64 {
        (1.0 - self.length_tolerance) * 4.0 / 5.0
    }

    /// Check every option is in range.
    ///
    /// # Errors
    /// Returns `InvalidParameter` naming the first offending option.
    pub fn validate(&self) -> Result<()> {
        if !(self.proximity_tolerance > 0.0 && self.proximity_tolerance.is_finite()) {
            return Err(MeshError::invalid_param(
                "proximity_tolerance",
                self.proximity_tolerance,
                "must be positive and finite",
            ));
        }
        if !(0.0..=1.0).contains(&self.pull) {
            return Err(MeshError::invalid_param("pull", self.pull, "must be in [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.smoothing_strength) {
            return Err(MeshError::invalid_param(
                "smoothing_strength",
                self.smoothing_strength,
                "must be in [0, 1]",
            ));
        }
        if !(0.0..1.0).contains(&self.length_tolerance) {
            return Err(MeshError::invalid_param(
                "length_tolerance",
                self.length_tolerance,
                "must be in [0, 1)",
            ));
        }
        Ok(())
    }
}

/// Counts of topological edits performed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemeshStats {
    /// Edges split.
    pub splits: usize,
    /// Edges collapsed.
    pub collapses: usize,
    /// Edges flipped.
    pub flips: usize,
}

impl AddAssign for RemeshStats {
    fn add_assign(&mut self, rhs: Self) {
        self.splits += rhs.splits;
        self.collapses += rhs.collapses;
        self.flips += rhs.flips;
    }
}

/// Everything a [`Remesher`] is built from.
pub struct RemeshInput<I: MeshIndex = u32> {
    /// Starting mesh.
    pub mesh: HalfEdgeMesh<I>,
    /// Points that nearby vertices are pinned to.
    pub fixed_points: Vec<Point3<f64>>,
    /// Curves that nearby vertices and edges slide along.
    pub curves: Vec<Box<dyn FeatureCurve>>,
    /// Surface free vertices are pulled toward.
    pub surface: Box<dyn GeometryProjector>,
    /// Target edge length.
    pub length: Box<dyn LengthField<I>>,
}

impl<I: MeshIndex> RemeshInput<I> {
    /// Input with no fixed points or curves.
    pub fn new(
        mesh: HalfEdgeMesh<I>,
        surface: impl GeometryProjector + 'static,
        length: impl LengthField<I> + 'static,
    ) -> Self {
        Self {
            mesh,
            fixed_points: Vec::new(),
            curves: Vec::new(),
            surface: Box::new(surface),
            length: Box::new(length),
        }
    }

    /// Set the fixed points.
    pub fn with_fixed_points(mut self, points: Vec<Point3<f64>>) -> Self {
        self.fixed_points = points;
        self
    }

    /// Add a feature curve.
    pub fn with_curve(mut self, curve: impl FeatureCurve + 'static) -> Self {
        self.curves.push(Box::new(curve));
        self
    }

    /// Add several boxed feature curves.
    pub fn with_curves(mut self, curves: impl IntoIterator<Item = Box<dyn FeatureCurve>>) -> Self {
        self.curves.extend(curves);
        self
    }
}

/// Stateful remeshing engine.
///
/// Owns the mesh, its tags and the collaborators; each [`step`](Self::step)
/// refines the mesh in place.
pub struct Remesher<I: MeshIndex = u32> {
    mesh: HalfEdgeMesh<I>,
    tracker: FeatureTracker,
    surface: Box<dyn GeometryProjector>,
    length: Box<dyn LengthField<I>>,
    options: RemeshOptions,
    seeded: SeedSummary,
}

impl<I: MeshIndex> std::fmt::Debug for Remesher<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Remesher")
            .field("vertices", &self.mesh.vertex_count())
            .field("faces", &self.mesh.face_count())
            .field("tracker", &self.tracker)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<I: MeshIndex> Remesher<I> {
    /// Take ownership of `input` and tag it against its constraints.
    ///
    /// The mesh is compacted first, so unreferenced input vertices are
    /// dropped. No relaxation happens here.
    ///
    /// # Errors
    /// `InvalidParameter` for out-of-range options, `EmptyMesh` when the
    /// mesh has no faces.
    pub fn new(input: RemeshInput<I>, options: RemeshOptions) -> Result<Self> {
        options.validate()?;
        let RemeshInput {
            mut mesh,
            fixed_points,
            curves,
            surface,
            length,
        } = input;

        if mesh.face_count() == 0 {
            return Err(MeshError::EmptyMesh);
        }
        mesh.compact();

        let tracker = FeatureTracker::new(fixed_points, curves, options.proximity_tolerance);
        let seeded = tracker.seed(&mut mesh);

        Ok(Self {
            mesh,
            tracker,
            surface,
            length,
            options,
            seeded,
        })
    }

    /// The current mesh.
    pub fn mesh(&self) -> &HalfEdgeMesh<I> {
        &self.mesh
    }

    /// Give up the engine and keep the mesh.
    pub fn into_mesh(self) -> HalfEdgeMesh<I> {
        self.mesh
    }

    /// The constraint tracker.
    pub fn tracker(&self) -> &FeatureTracker {
        &self.tracker
    }

    /// Tag counts from construction.
    pub fn seed_summary(&self) -> SeedSummary {
        self.seeded
    }

    /// Current options.
    pub fn options(&self) -> &RemeshOptions {
        &self.options
    }

    /// Replace the options for subsequent steps.
    ///
    /// The proximity tolerance only affects seeding and is ignored here.
    ///
    /// # Errors
    /// `InvalidParameter` for out-of-range options; the old options stay.
    pub fn set_options(&mut self, options: RemeshOptions) -> Result<()> {
        options.validate()?;
        self.options = options;
        Ok(())
    }

    /// Run [`RemeshOptions::iterations`] iterations.
    ///
    /// # Errors
    /// `InvalidTargetLength` when the length field returns a non-positive or
    /// non-finite value. The mesh is still valid afterwards, but the failing
    /// iteration may have stopped part way.
    pub fn step(&mut self) -> Result<RemeshStats> {
        let mut total = RemeshStats::default();
        for i in 0..self.options.iterations {
            let stats = self.iterate()?;
            debug!(
                "iteration {}: {} splits, {} collapses, {} flips, {} faces",
                i,
                stats.splits,
                stats.collapses,
                stats.flips,
                self.mesh.num_faces()
            );
            total += stats;
        }
        Ok(total)
    }

    fn iterate(&mut self) -> Result<RemeshStats> {
        let options = &self.options;
        let mesh = &mut self.mesh;

        let mut targets = TargetLengths::new(mesh, self.length.as_ref())?;
        let mut visited = vec![false; mesh.num_vertices()];

        let splits = refine::split_pass(mesh, &mut targets, &mut visited, options.split_ratio())?;
        let collapses =
            refine::collapse_pass(mesh, &mut targets, &mut visited, options.collapse_ratio())?;

        let minimal = options.is_minimal_surface();
        let criterion = if minimal {
            FlipCriterion::Angle
        } else {
            options.flip
        };
        let flips = flip::flip_pass(mesh, criterion);

        relax::smooth_pass(mesh, options.smoothing_strength, minimal);
        if !minimal {
            relax::project_pass(mesh, self.surface.as_ref(), options.pull);
        }
        self.tracker.snap_features(mesh);
        self.tracker.snap_anchors(mesh);

        let compaction = mesh.compact();
        let (v, e, f) = compaction.removed();
        debug!("compacted away {} vertices, {} edges, {} faces", v, e, f);

        Ok(RemeshStats {
            splits,
            collapses,
            flips,
        })
    }
}

/// Mean length of the live edges, or zero for an edgeless mesh.
pub fn average_edge_length<I: MeshIndex>(mesh: &HalfEdgeMesh<I>) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for e in mesh.edge_ids() {
        sum += mesh.edge_length(e);
        count += 1;
    }
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::length::ConstantLength;
    use crate::geometry::{Polyline, TriangleSurface};
    use crate::mesh::{EdgeId, VertexId};
    use crate::test_util::{disk, grid, thin_triangle};
    use approx::assert_relative_eq;

    fn planar_input(mesh: HalfEdgeMesh, length: f64) -> RemeshInput {
        let surface = TriangleSurface::from_mesh(&mesh);
        RemeshInput::new(mesh, surface, ConstantLength(length))
    }

    fn boundary_points(mesh: &HalfEdgeMesh) -> Vec<Point3<f64>> {
        mesh.vertex_ids()
            .filter(|&v| mesh.is_boundary_vertex(v))
            .map(|v| *mesh.position(v))
            .collect()
    }

    #[test]
    fn test_default_options() {
        let o = RemeshOptions::default();
        assert_eq!(o.proximity_tolerance, 0.01);
        assert_eq!(o.pull, 0.8);
        assert_eq!(o.flip, FlipCriterion::Angle);
        assert_eq!(o.iterations, 1);
        assert_eq!(o.smoothing_strength, 0.8);
        assert_eq!(o.length_tolerance, 0.15);
        assert!(o.validate().is_ok());
        assert_relative_eq!(o.split_ratio(), 1.15 * 4.0 / 3.0);
        assert_relative_eq!(o.collapse_ratio(), 0.85 * 0.8);
    }

    #[test]
    fn test_invalid_options() {
        let bad = [
            RemeshOptions::default().with_pull(1.5),
            RemeshOptions::default().with_pull(-0.1),
            RemeshOptions::default().with_proximity_tolerance(0.0),
            RemeshOptions::default().with_smoothing_strength(2.0),
            RemeshOptions::default().with_length_tolerance(1.0),
        ];
        for options in bad {
            assert!(matches!(
                options.validate(),
                Err(MeshError::InvalidParameter { .. })
            ));
        }

        let err = Remesher::new(planar_input(grid(2, 2, 1.0), 1.0), RemeshOptions::default().with_pull(2.0));
        assert!(err.is_err());
    }

    #[test]
    fn test_empty_mesh_rejected() {
        let input: RemeshInput =
            RemeshInput::new(HalfEdgeMesh::new(), TriangleSurface::default(), ConstantLength(1.0));
        assert!(matches!(
            Remesher::new(input, RemeshOptions::default()),
            Err(MeshError::EmptyMesh)
        ));
    }

    #[test]
    fn test_thin_triangle_splits_once() {
        let mut remesher =
            Remesher::new(planar_input(thin_triangle(), 1.0), RemeshOptions::default()).unwrap();
        let stats = remesher.step().unwrap();

        assert_eq!(stats.splits, 1);
        assert_eq!(stats.collapses, 0);
        assert_eq!(remesher.mesh().vertex_count(), 4);
        assert_eq!(remesher.mesh().face_count(), 2);
        assert!(remesher.mesh().is_valid());
    }

    #[test]
    fn test_anchors_stay_exact() {
        let mesh = grid(4, 4, 0.5);
        let fixed = boundary_points(&mesh);
        let input = planar_input(mesh, 0.8).with_fixed_points(fixed.clone());
        let mut remesher = Remesher::new(input, RemeshOptions::default()).unwrap();
        assert_eq!(remesher.seed_summary().anchored_vertices, fixed.len());

        for _ in 0..5 {
            remesher.step().unwrap();
            let mesh = remesher.mesh();
            assert!(mesh.is_valid());
            let mut anchored = 0;
            for v in mesh.vertex_ids() {
                if let Some(a) = mesh.anchor(v) {
                    assert_eq!(*mesh.position(v), fixed[a]);
                    anchored += 1;
                }
            }
            assert_eq!(anchored, fixed.len());
        }
    }

    #[test]
    fn test_disk_converges_to_unit_length() {
        let mesh = disk(4, 24, 4.0);
        let fixed = boundary_points(&mesh);
        let input = planar_input(mesh, 1.0).with_fixed_points(fixed.clone());
        let options = RemeshOptions::default().with_pull(0.0);
        let mut remesher = Remesher::new(input, options).unwrap();

        for _ in 0..20 {
            remesher.step().unwrap();
            assert!(remesher.mesh().is_valid());
        }

        let mesh = remesher.mesh();
        let mean = average_edge_length(mesh);
        assert!((0.8..=1.33).contains(&mean), "mean edge length {}", mean);
        for v in mesh.vertex_ids() {
            if let Some(a) = mesh.anchor(v) {
                assert_eq!(*mesh.position(v), fixed[a]);
            }
            // Minimal mode never lifts the plane.
            assert_relative_eq!(mesh.position(v).z, 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_boundary_feature_vertices_stay_on_curve() {
        let mesh = grid(4, 4, 0.5);
        let rim = Polyline::boundary_loops(&mesh).remove(0);
        let input = planar_input(mesh, 0.4).with_curve(rim.clone());
        let mut remesher = Remesher::new(input, RemeshOptions::default().with_iterations(3)).unwrap();
        remesher.step().unwrap();

        let mesh = remesher.mesh();
        assert!(mesh.is_valid());
        for v in mesh.vertex_ids() {
            if mesh.vertex_feature(v) == Some(0) {
                assert!(rim.distance(mesh.position(v)) < 1e-9);
            }
        }
    }

    /// 4x4 square fanned around its center; no interior edge joins two rim
    /// vertices.
    fn fan_square() -> HalfEdgeMesh {
        let mut vertices: Vec<Point3<f64>> = [
            (0.0, 0.0),
            (2.0, 0.0),
            (4.0, 0.0),
            (4.0, 2.0),
            (4.0, 4.0),
            (2.0, 4.0),
            (0.0, 4.0),
            (0.0, 2.0),
        ]
        .iter()
        .map(|&(x, y)| Point3::new(x, y, 0.0))
        .collect();
        vertices.push(Point3::new(2.0, 2.0, 0.0));
        let faces: Vec<[usize; 3]> = (0..8).map(|i| [8, i, (i + 1) % 8]).collect();
        crate::mesh::build_from_triangles(&vertices, &faces).unwrap()
    }

    #[test]
    fn test_rim_curve_square_refines() {
        let mesh = fan_square();
        let corners: Vec<_> = [0, 2, 4, 6].iter().map(|&i| *mesh.position(VertexId::new(i))).collect();
        let rims: Vec<Box<dyn FeatureCurve>> = Polyline::boundary_loops(&mesh)
            .into_iter()
            .map(|c| Box::new(c) as Box<dyn FeatureCurve>)
            .collect();
        let input = planar_input(mesh, 1.0)
            .with_fixed_points(corners.clone())
            .with_curves(rims);

        let mut remesher = Remesher::new(input, RemeshOptions::default()).unwrap();
        assert_eq!(remesher.tracker().num_curves(), 1);
        for _ in 0..10 {
            remesher.step().unwrap();
        }

        let mesh = remesher.into_mesh();
        assert!(mesh.is_valid());
        assert!(average_edge_length(&mesh) < 2.0);
        assert!(mesh.vertex_count() > 9);
        for v in mesh.vertex_ids() {
            if let Some(a) = mesh.anchor(v) {
                assert_eq!(*mesh.position(v), corners[a]);
            }
        }
    }

    #[test]
    fn test_diagonal_between_rim_vertices_is_feature() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(4.0, 0.0, 0.0),
            Point3::new(4.0, 4.0, 0.0),
            Point3::new(0.0, 4.0, 0.0),
        ];
        let mesh: HalfEdgeMesh =
            crate::mesh::build_from_triangles(&vertices, &[[0, 1, 2], [0, 2, 3]]).unwrap();
        let rim = Polyline::boundary_loops(&mesh).remove(0);
        let remesher = Remesher::new(planar_input(mesh, 1.0).with_curve(rim), RemeshOptions::default())
            .unwrap();

        let mesh = remesher.mesh();
        let diagonal = mesh
            .find_halfedge(VertexId::new(0), VertexId::new(2))
            .unwrap()
            .edge();
        assert_eq!(mesh.edge_feature(diagonal), Some(0));
        assert!(mesh.edge_ids().all(|e| mesh.edge_feature(e) == Some(0)));
    }

    #[test]
    fn test_invalid_target_length() {
        let mesh = grid(2, 2, 1.0);
        let surface = TriangleSurface::from_mesh(&mesh);
        let field = |m: &HalfEdgeMesh, e: EdgeId| if m.edge_midpoint(e).x > 1.5 { -1.0 } else { 1.0 };
        let mut remesher =
            Remesher::new(RemeshInput::new(mesh, surface, field), RemeshOptions::default()).unwrap();

        match remesher.step() {
            Err(MeshError::InvalidTargetLength { edge, location, value }) => {
                assert_eq!(value, -1.0);
                assert!(location.x > 1.5);
                assert!(edge < remesher.mesh().num_edges());
            }
            other => panic!("expected InvalidTargetLength, got {:?}", other),
        }
        // Rejected before any edit.
        assert_eq!(remesher.mesh().vertex_count(), 9);
    }

    #[test]
    fn test_nan_target_length() {
        let mesh = grid(1, 1, 1.0);
        let surface = TriangleSurface::from_mesh(&mesh);
        let input = RemeshInput::new(mesh, surface, ConstantLength(f64::NAN));
        let mut remesher = Remesher::new(input, RemeshOptions::default()).unwrap();
        assert!(matches!(
            remesher.step(),
            Err(MeshError::InvalidTargetLength { .. })
        ));
    }

    #[test]
    fn test_zero_iterations_is_noop() {
        let mut remesher = Remesher::new(
            planar_input(thin_triangle(), 1.0),
            RemeshOptions::default().with_iterations(0),
        )
        .unwrap();
        assert_eq!(remesher.step().unwrap(), RemeshStats::default());
        assert_eq!(remesher.mesh().vertex_count(), 3);
    }

    #[test]
    fn test_unreferenced_vertices_dropped() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(9.0, 9.0, 9.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let mesh: HalfEdgeMesh = crate::mesh::build_from_triangles(&vertices, &[[0, 2, 3]]).unwrap();
        let remesher = Remesher::new(planar_input(mesh, 1.0), RemeshOptions::default()).unwrap();
        assert_eq!(remesher.mesh().num_vertices(), 3);
        assert_eq!(*remesher.mesh().position(VertexId::new(1)), vertices[2]);
    }

    #[test]
    fn test_average_edge_length() {
        assert_relative_eq!(average_edge_length(&grid(1, 1, 2.0)), (8.0 + 8f64.sqrt()) / 5.0);
        assert_eq!(average_edge_length(&HalfEdgeMesh::<u32>::new()), 0.0);
    }
}
