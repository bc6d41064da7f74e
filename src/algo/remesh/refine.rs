//! Split and collapse passes.

use log::trace;

use crate::algo::length::LengthField;
use crate::error::{MeshError, Result};
use crate::feature::FeatureTracker;
use crate::mesh::{EdgeId, HalfEdgeMesh, MeshIndex, VertexId};

/// Target lengths for one iteration.
///
/// Every live edge is evaluated up front; edges created during the iteration
/// are evaluated the first time they are asked for.
pub(super) struct TargetLengths<'a, I: MeshIndex> {
    field: &'a dyn LengthField<I>,
    cache: Vec<Option<f64>>,
}

impl<'a, I: MeshIndex> TargetLengths<'a, I> {
    pub(super) fn new(mesh: &HalfEdgeMesh<I>, field: &'a dyn LengthField<I>) -> Result<Self> {
        let mut targets = Self {
            field,
            cache: vec![None; mesh.num_edges()],
        };
        for e in mesh.edge_ids() {
            targets.get(mesh, e)?;
        }
        Ok(targets)
    }

    pub(super) fn get(&mut self, mesh: &HalfEdgeMesh<I>, e: EdgeId<I>) -> Result<f64> {
        if let Some(Some(value)) = self.cache.get(e.index()) {
            return Ok(*value);
        }

        let value = self.field.evaluate(mesh, e);
        if !(value > 0.0 && value.is_finite()) {
            return Err(MeshError::invalid_target_length(
                e.index(),
                mesh.edge_midpoint(e),
                value,
            ));
        }

        if self.cache.len() <= e.index() {
            self.cache.resize(e.index() + 1, None);
        }
        self.cache[e.index()] = Some(value);
        Ok(value)
    }
}

/// Mark `v` and its 1-ring, growing `visited` to cover new vertices.
fn mark_ring<I: MeshIndex>(mesh: &HalfEdgeMesh<I>, visited: &mut Vec<bool>, v: VertexId<I>) {
    if visited.len() < mesh.num_vertices() {
        visited.resize(mesh.num_vertices(), false);
    }
    visited[v.index()] = true;
    for n in mesh.vertex_neighbors(v) {
        visited[n.index()] = true;
    }
}

fn is_visited<I: MeshIndex>(visited: &[bool], v: VertexId<I>) -> bool {
    visited.get(v.index()).copied().unwrap_or(false)
}

/// Split every edge longer than `ratio` times its target at its midpoint.
///
/// Only edges present when the pass starts are considered.
pub(super) fn split_pass<I: MeshIndex>(
    mesh: &mut HalfEdgeMesh<I>,
    targets: &mut TargetLengths<'_, I>,
    visited: &mut Vec<bool>,
    ratio: f64,
) -> Result<usize> {
    let mut splits = 0;

    for i in 0..mesh.num_edges() {
        let e = EdgeId::new(i);
        if !mesh.is_edge_used(e) {
            continue;
        }
        let [a, b] = mesh.edge_vertices(e);
        if is_visited(visited, a) || is_visited(visited, b) {
            continue;
        }
        if mesh.edge_length(e) <= ratio * targets.get(mesh, e)? {
            continue;
        }

        let parent = mesh.edge_feature(e);
        let mid = mesh.edge_midpoint(e);
        if let Some(split) = mesh.split_edge(e, mid) {
            FeatureTracker::on_split(mesh, &split, parent);
            mark_ring(mesh, visited, split.vertex);
            splits += 1;
        }
    }

    Ok(splits)
}

/// Where a short edge collapses to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CollapseTarget {
    Midpoint,
    Start,
    End,
}

/// Pick the collapse target for edge `e`, or `None` to keep it.
///
/// Anchors never move and a feature vertex only merges along its own curve.
fn collapse_target<I: MeshIndex>(mesh: &HalfEdgeMesh<I>, e: EdgeId<I>) -> Option<CollapseTarget> {
    let [start, end] = mesh.edge_vertices(e);
    let (fs, fe) = (mesh.vertex_feature(start), mesh.vertex_feature(end));
    let on_feature = mesh.edge_feature(e).is_some();

    match (mesh.anchor(start).is_some(), mesh.anchor(end).is_some()) {
        (true, true) => None,
        (true, false) => (on_feature || fe.is_none()).then_some(CollapseTarget::Start),
        (false, true) => (on_feature || fs.is_none()).then_some(CollapseTarget::End),
        (false, false) => match (fs, fe) {
            (x, y) if x == y => Some(CollapseTarget::Midpoint),
            (Some(_), None) => Some(CollapseTarget::Start),
            (None, Some(_)) => Some(CollapseTarget::End),
            _ => None,
        },
    }
}

/// Collapse every edge shorter than `ratio` times its target.
///
/// Only edges present when the pass starts are considered, and an edge is
/// skipped once either endpoint has been visited in this iteration.
pub(super) fn collapse_pass<I: MeshIndex>(
    mesh: &mut HalfEdgeMesh<I>,
    targets: &mut TargetLengths<'_, I>,
    visited: &mut Vec<bool>,
    ratio: f64,
) -> Result<usize> {
    let mut collapses = 0;
    let mut rejected = 0;

    for i in 0..mesh.num_edges() {
        let e = EdgeId::new(i);
        if !mesh.is_edge_used(e) {
            continue;
        }
        let [start, end] = mesh.edge_vertices(e);
        if is_visited(visited, start) || is_visited(visited, end) {
            continue;
        }
        if mesh.anchor(start).is_some() && mesh.anchor(end).is_some() {
            continue;
        }
        if mesh.edge_length(e) >= ratio * targets.get(mesh, e)? {
            continue;
        }

        let Some(target) = collapse_target(mesh, e) else {
            trace!("collapse {:?}: constrained endpoints", e);
            continue;
        };

        let h = e.halfedge();
        let survivor = match target {
            CollapseTarget::Start => mesh.collapse_edge(h.pair()),
            CollapseTarget::End => mesh.collapse_edge(h),
            CollapseTarget::Midpoint => {
                let mid = mesh.edge_midpoint(e);
                let survivor = mesh.collapse_edge(h);
                if let Some(v) = survivor {
                    mesh.set_position(v, mid);
                }
                survivor
            }
        };

        match survivor {
            Some(v) => {
                mark_ring(mesh, visited, v);
                collapses += 1;
            }
            None => rejected += 1,
        }
    }

    if rejected > 0 {
        trace!("{} collapses rejected", rejected);
    }
    Ok(collapses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::length::ConstantLength;
    use crate::test_util::{grid, grid_vertex, thin_triangle};
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    fn edge_between(mesh: &HalfEdgeMesh, a: VertexId, b: VertexId) -> EdgeId {
        mesh.find_halfedge(a, b).unwrap().edge()
    }

    #[test]
    fn test_new_edges_evaluated_on_demand() {
        let mut mesh = thin_triangle();
        let field = ConstantLength(1.0);
        let mut targets = TargetLengths::new(&mesh, &field).unwrap();
        let split = mesh.split_edge(EdgeId::new(0), Point3::new(1.5, 0.0, 0.0)).unwrap();
        for e in split.new_edges() {
            assert_eq!(targets.get(&mesh, e).unwrap(), 1.0);
        }
    }

    #[test]
    fn test_split_pass_respects_visited() {
        let mut mesh = thin_triangle();
        let field = ConstantLength(1.0);
        let mut targets = TargetLengths::new(&mesh, &field).unwrap();
        let mut visited = vec![false; mesh.num_vertices()];

        let splits = split_pass(&mut mesh, &mut targets, &mut visited, 1.15 * 4.0 / 3.0).unwrap();
        assert_eq!(splits, 1);
        assert_eq!(mesh.vertex_count(), 4);
        assert!(visited.iter().all(|&v| v));

        let m = VertexId::new(3);
        assert_relative_eq!(*mesh.position(m), Point3::new(1.5, 0.0, 0.0));
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_collapse_targets() {
        let mut mesh = grid(3, 3, 1.0);
        let a = grid_vertex(3, 1, 1);
        let b = grid_vertex(3, 2, 1);
        let e = edge_between(&mesh, a, b);
        let [start, end] = mesh.edge_vertices(e);
        assert_eq!(collapse_target(&mesh, e), Some(CollapseTarget::Midpoint));

        mesh.set_vertex_feature(start, Some(0));
        assert_eq!(collapse_target(&mesh, e), Some(CollapseTarget::Start));
        mesh.set_vertex_feature(end, Some(1));
        assert_eq!(collapse_target(&mesh, e), None);
        mesh.set_vertex_feature(end, Some(0));
        assert_eq!(collapse_target(&mesh, e), Some(CollapseTarget::Midpoint));

        mesh.clear_tags();
        mesh.set_vertex_feature(end, Some(0));
        assert_eq!(collapse_target(&mesh, e), Some(CollapseTarget::End));

        // Anchored start: only pulls in a free end, or along a feature edge.
        mesh.clear_tags();
        mesh.set_anchor(start, Some(0));
        assert_eq!(collapse_target(&mesh, e), Some(CollapseTarget::Start));
        mesh.set_vertex_feature(end, Some(2));
        assert_eq!(collapse_target(&mesh, e), None);
        mesh.set_edge_feature(e, Some(2));
        assert_eq!(collapse_target(&mesh, e), Some(CollapseTarget::Start));

        mesh.set_anchor(end, Some(1));
        assert_eq!(collapse_target(&mesh, e), None);
    }

    #[test]
    fn test_collapse_pass_keeps_anchor() {
        let mut mesh = grid(3, 3, 1.0);
        let anchor = grid_vertex(3, 1, 1);
        let free = grid_vertex(3, 2, 1);
        let anchored_at = *mesh.position(anchor);
        mesh.set_anchor(anchor, Some(0));
        // Pull `free` close so only this edge is short.
        mesh.set_position(free, Point3::new(1.1, 1.0, 0.0));

        let field = ConstantLength(1.0);
        let mut targets = TargetLengths::new(&mesh, &field).unwrap();
        let mut visited = vec![false; mesh.num_vertices()];
        let collapses = collapse_pass(&mut mesh, &mut targets, &mut visited, 0.85 * 0.8).unwrap();

        assert_eq!(collapses, 1);
        assert!(!mesh.is_vertex_used(free));
        assert!(mesh.is_vertex_used(anchor));
        assert_eq!(*mesh.position(anchor), anchored_at);
        assert!(visited[anchor.index()]);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_collapse_pass_midpoint() {
        let mut mesh = grid(3, 3, 1.0);
        let a = grid_vertex(3, 1, 1);
        let b = grid_vertex(3, 2, 1);
        mesh.set_position(b, Point3::new(1.2, 1.0, 0.0));

        let field = ConstantLength(1.0);
        let mut targets = TargetLengths::new(&mesh, &field).unwrap();
        let mut visited = vec![false; mesh.num_vertices()];
        assert_eq!(collapse_pass(&mut mesh, &mut targets, &mut visited, 0.68).unwrap(), 1);

        let survivor = if mesh.is_vertex_used(a) { a } else { b };
        assert_relative_eq!(*mesh.position(survivor), Point3::new(1.1, 1.0, 0.0), epsilon = 1e-12);
        assert_eq!(mesh.vertex_count(), 15);
        assert!(mesh.is_valid());
    }
}
