//! Mesh construction utilities.
//!
//! Converts between face-vertex lists (as found in mesh files) and the
//! half-edge representation.

use std::collections::HashMap;

use nalgebra::Point3;

use super::halfedge::HalfEdgeMesh;
use super::index::{HalfEdgeId, MeshIndex, VertexId};
use crate::error::{MeshError, Result};

/// Build a half-edge mesh from vertices and triangle faces.
///
/// Vertex `i` of the input becomes `VertexId::new(i)`. Vertices not
/// referenced by any face are left unused and disappear at the next
/// compaction.
///
/// # Errors
/// Fails on an empty face list, out-of-range or repeated indices, edges
/// shared by more than two faces or traversed twice in the same direction,
/// and vertices where separate fans touch.
///
/// # Example
/// ```
/// use bubblemesh::mesh::{build_from_triangles, HalfEdgeMesh};
/// use nalgebra::Point3;
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.5, 1.0, 0.0),
/// ];
/// let faces = vec![[0, 1, 2]];
///
/// let mesh: HalfEdgeMesh = build_from_triangles(&vertices, &faces).unwrap();
/// assert_eq!(mesh.num_vertices(), 3);
/// assert_eq!(mesh.num_edges(), 3);
/// ```
pub fn build_from_triangles<I: MeshIndex>(
    vertices: &[Point3<f64>],
    faces: &[[usize; 3]],
) -> Result<HalfEdgeMesh<I>> {
    if faces.is_empty() {
        return Err(MeshError::EmptyMesh);
    }

    for (fi, face) in faces.iter().enumerate() {
        if let Some(&vi) = face.iter().find(|&&vi| vi >= vertices.len()) {
            return Err(MeshError::InvalidVertexIndex { face: fi, vertex: vi });
        }
        if face[0] == face[1] || face[1] == face[2] || face[0] == face[2] {
            return Err(MeshError::DegenerateFace { face: fi });
        }
    }

    let mut mesh = HalfEdgeMesh::with_capacity(vertices.len(), faces.len());
    let vertex_ids: Vec<VertexId<I>> = vertices.iter().map(|&p| mesh.add_vertex(p)).collect();

    // Undirected edge (min, max) -> half-edge running min -> max
    let mut edge_map: HashMap<(usize, usize), HalfEdgeId<I>> = HashMap::new();
    let mut outgoing = vec![0usize; vertices.len()];

    for face in faces {
        let mut hes = [HalfEdgeId::invalid(); 3];
        for i in 0..3 {
            let (a, b) = (face[i], face[(i + 1) % 3]);
            let key = (a.min(b), a.max(b));
            let he = match edge_map.get(&key) {
                Some(&forward) => {
                    let he = if a < b { forward } else { forward.pair() };
                    if mesh.face_of(he).is_valid() {
                        return Err(MeshError::NonManifoldEdge { v0: a, v1: b });
                    }
                    he
                }
                None => {
                    let forward = mesh.new_edge(vertex_ids[key.0], vertex_ids[key.1]);
                    edge_map.insert(key, forward);
                    outgoing[key.0] += 1;
                    outgoing[key.1] += 1;
                    if a < b {
                        forward
                    } else {
                        forward.pair()
                    }
                }
            };
            hes[i] = he;
            mesh.vertex_mut(vertex_ids[a]).halfedge = he;
        }
        mesh.new_face(hes);
    }

    link_boundary_loops(&mut mesh)?;
    fix_boundary_vertex_halfedges(&mut mesh);

    // Every outgoing half-edge must be reachable by rotation, otherwise
    // two fans share the vertex.
    for (i, &expected) in outgoing.iter().enumerate() {
        let v = vertex_ids[i];
        if expected > 0 && mesh.valence(v) != expected {
            return Err(MeshError::NonManifoldVertex { vertex: i });
        }
    }

    Ok(mesh)
}

/// Link boundary half-edges into loops.
///
/// The successor of a boundary half-edge ending at `v` is found by turning
/// clockwise around `v` through the interior faces until the fan opens.
fn link_boundary_loops<I: MeshIndex>(mesh: &mut HalfEdgeMesh<I>) -> Result<()> {
    let boundary_hes: Vec<HalfEdgeId<I>> = (0..mesh.num_halfedges())
        .map(HalfEdgeId::new)
        .filter(|&he| mesh.is_boundary_halfedge(he))
        .collect();

    let limit = mesh.num_halfedges();
    for &he in &boundary_hes {
        let mut cur = he.pair();
        let mut steps = 0;
        while !mesh.is_boundary_halfedge(cur) {
            cur = mesh.prev(cur).pair();
            steps += 1;
            if steps > limit {
                let v = mesh.dest(he).index();
                return Err(MeshError::NonManifoldVertex { vertex: v });
            }
        }
        mesh.link(he, cur);
    }

    Ok(())
}

/// Point every boundary vertex at its outgoing boundary half-edge.
fn fix_boundary_vertex_halfedges<I: MeshIndex>(mesh: &mut HalfEdgeMesh<I>) {
    for i in 0..mesh.num_vertices() {
        mesh.adjust_outgoing(VertexId::new(i));
    }
}

/// Convert a half-edge mesh back to a face-vertex representation.
///
/// Only live elements are emitted; vertex indices are renumbered
/// contiguously in their original order.
pub fn to_face_vertex<I: MeshIndex>(mesh: &HalfEdgeMesh<I>) -> (Vec<Point3<f64>>, Vec<[usize; 3]>) {
    let mut remap = vec![usize::MAX; mesh.num_vertices()];
    let mut vertices = Vec::new();
    for v in mesh.vertex_ids() {
        remap[v.index()] = vertices.len();
        vertices.push(*mesh.position(v));
    }

    let faces = mesh
        .face_ids()
        .map(|f| mesh.face_triangle(f).map(|v| remap[v.index()]))
        .collect();

    (vertices, faces)
}
