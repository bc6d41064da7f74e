//! # bubblemesh
//!
//! Incremental, feature-preserving isotropic remeshing of triangle meshes.
//!
//! A [`Remesher`](algo::remesh::Remesher) owns a half-edge mesh and, on every
//! call to `step`, splits long edges, collapses short ones, flips edges
//! toward regular valence or Delaunay angles, smooths vertices tangentially
//! and pulls them back onto a target surface. Vertices near fixed points are
//! pinned; vertices and edges near feature curves only slide along them.
//! The engine keeps its state between calls, so a host can run one step per
//! frame and watch the mesh settle.
//!
//! ## Features
//!
//! - **Half-edge mesh**: twin half-edges allocated in pairs, typed indices,
//!   split/collapse/flip with tombstones and explicit compaction
//! - **Constraints**: anchor and feature tags stored on the mesh records
//! - **Pluggable collaborators**: target length, target surface and feature
//!   curves are small traits with reference implementations
//! - **File formats**: OBJ and STL
//!
//! ## Quick Start
//!
//! ```
//! use bubblemesh::prelude::*;
//! use bubblemesh::algo::length::ConstantLength;
//! use bubblemesh::algo::remesh::{average_edge_length, RemeshInput, RemeshOptions, Remesher};
//! use bubblemesh::geometry::{Polyline, TriangleSurface};
//! use nalgebra::Point3;
//!
//! // A 4x4 square fanned around its center, so every interior edge has one
//! // end off the rim.
//! let mut vertices: Vec<Point3<f64>> = [
//!     (0.0, 0.0), (2.0, 0.0), (4.0, 0.0), (4.0, 2.0),
//!     (4.0, 4.0), (2.0, 4.0), (0.0, 4.0), (0.0, 2.0),
//! ]
//! .iter()
//! .map(|&(x, y)| Point3::new(x, y, 0.0))
//! .collect();
//! vertices.push(Point3::new(2.0, 2.0, 0.0));
//! let faces: Vec<[usize; 3]> = (0..8).map(|i| [8, i, (i + 1) % 8]).collect();
//! let mesh: HalfEdgeMesh = build_from_triangles(&vertices, &faces).unwrap();
//!
//! // Keep the corners and let the rest of the rim slide along it.
//! let corners: Vec<_> = [0, 2, 4, 6].iter().map(|&i| vertices[i]).collect();
//! let rim = Polyline::boundary_loops(&mesh).remove(0);
//! let input = RemeshInput::new(mesh.clone(), TriangleSurface::from_mesh(&mesh), ConstantLength(1.0))
//!     .with_fixed_points(corners)
//!     .with_curve(rim);
//!
//! let mut remesher = Remesher::new(input, RemeshOptions::default()).unwrap();
//! for _ in 0..10 {
//!     remesher.step().unwrap();
//! }
//! assert!(remesher.mesh().is_valid());
//! assert!(average_edge_length(remesher.mesh()) < 2.0);
//! ```
//!
//! ## Mesh Traversal
//!
//! ```
//! use bubblemesh::prelude::*;
//! use nalgebra::Point3;
//!
//! # let vertices = vec![
//! #     Point3::new(0.0, 0.0, 0.0),
//! #     Point3::new(1.0, 0.0, 0.0),
//! #     Point3::new(0.5, 1.0, 0.0),
//! # ];
//! # let faces = vec![[0, 1, 2]];
//! # let mesh: HalfEdgeMesh = build_from_triangles(&vertices, &faces).unwrap();
//! let v = VertexId::new(0);
//! for neighbor in mesh.vertex_neighbors(v) {
//!     println!("Neighbor: {:?}", neighbor);
//! }
//!
//! // Twin half-edges share an edge
//! let he = mesh.vertex(v).halfedge;
//! assert_eq!(he.pair().edge(), he.edge());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod feature;
pub mod geometry;
pub mod io;
pub mod mesh;

#[cfg(test)]
mod test_util;

/// Prelude module for convenient imports.
///
/// ```
/// use bubblemesh::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{MeshError, Result};
    pub use crate::mesh::{
        build_from_triangles, to_face_vertex, EdgeId, Face, FaceId, HalfEdge, HalfEdgeId,
        HalfEdgeMesh, MeshIndex, Vertex, VertexId,
    };
}

// Re-export nalgebra types for convenience
pub use nalgebra;

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use crate::test_util::tetrahedron;

    #[test]
    fn test_tetrahedron() {
        let mesh: HalfEdgeMesh = tetrahedron();

        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_faces(), 4);
        assert_eq!(mesh.num_edges(), 6);
        // Closed: every half-edge has a face.
        assert_eq!(mesh.num_halfedges(), 12);
        assert!(mesh.is_valid());

        for v in mesh.vertex_ids() {
            assert!(!mesh.is_boundary_vertex(v), "vertex {:?} should not be on boundary", v);
            assert_eq!(mesh.valence(v), 3);
        }
    }
}
