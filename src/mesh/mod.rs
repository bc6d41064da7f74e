//! Core mesh data structures.
//!
//! The primary type is [`HalfEdgeMesh`], a manifold triangle mesh stored as
//! a half-edge structure with constraint tags on its records and O(1) local
//! edits ([`split_edge`](HalfEdgeMesh::split_edge),
//! [`collapse_edge`](HalfEdgeMesh::collapse_edge),
//! [`flip_edge`](HalfEdgeMesh::flip_edge)).
//!
//! # Index Types
//!
//! Mesh elements are identified by type-safe index wrappers:
//! - [`VertexId`] - Identifies a vertex
//! - [`HalfEdgeId`] - Identifies a half-edge
//! - [`EdgeId`] - Identifies a twin pair of half-edges
//! - [`FaceId`] - Identifies a face
//!
//! These indices are generic over the underlying integer type ([`MeshIndex`] trait).
//!
//! # Construction
//!
//! ```
//! use bubblemesh::mesh::{HalfEdgeMesh, build_from_triangles};
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//! ];
//! let faces = vec![[0, 1, 2]];
//!
//! let mesh: HalfEdgeMesh = build_from_triangles(&vertices, &faces).unwrap();
//! assert!(mesh.is_valid());
//! ```

mod builder;
mod compact;
mod edit;
mod halfedge;
mod index;

pub use builder::{build_from_triangles, to_face_vertex};
pub use compact::Compaction;
pub use edit::EdgeSplit;
pub use halfedge::{Face, HalfEdge, HalfEdgeMesh, Vertex, VertexHalfEdgeIter};
pub use index::{EdgeId, FaceId, HalfEdgeId, MeshIndex, VertexId};
