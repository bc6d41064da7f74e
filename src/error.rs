//! Error types for bubblemesh.
//!
//! Rejected local edits (a collapse that would break manifoldness, a flip on a
//! boundary edge) are not errors; they are reported through `Option`/`bool`
//! returns on the mesh and skipped by the remesher. The variants here cover
//! malformed input, I/O, and configuration problems.

use std::path::PathBuf;

use nalgebra::Point3;
use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur while building, remeshing or saving a mesh.
#[derive(Error, Debug)]
pub enum MeshError {
    /// The mesh has no faces.
    #[error("mesh has no faces")]
    EmptyMesh,

    /// A face references an invalid vertex index.
    #[error("face {face} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The face index.
        face: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// A face has duplicate vertex indices (degenerate triangle).
    #[error("face {face} is degenerate (has duplicate vertices)")]
    DegenerateFace {
        /// The face index.
        face: usize,
    },

    /// An edge has more than two incident faces, or two faces traverse it in
    /// the same direction.
    #[error("edge ({v0}, {v1}) is non-manifold")]
    NonManifoldEdge {
        /// First vertex of the edge.
        v0: usize,
        /// Second vertex of the edge.
        v1: usize,
    },

    /// Several separate fans meet at one vertex (a "bowtie").
    #[error("vertex {vertex} is non-manifold")]
    NonManifoldVertex {
        /// The vertex index.
        vertex: usize,
    },

    /// The length field returned a non-positive or non-finite target.
    #[error("target edge length {value} for edge {edge} at {location:?} must be positive and finite")]
    InvalidTargetLength {
        /// Edge index the length was requested for.
        edge: usize,
        /// Midpoint of the edge.
        location: Point3<f64>,
        /// The offending value.
        value: f64,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error loading mesh from file.
    #[error("failed to load mesh from {path}: {message}")]
    LoadError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Error saving mesh to file.
    #[error("failed to save mesh to {path}: {message}")]
    SaveError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Unsupported file format.
    #[error("unsupported file format: {extension}")]
    UnsupportedFormat {
        /// The file extension.
        extension: String,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },
}

impl MeshError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        MeshError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }

    /// Create an error for a bad target length on `edge`.
    pub fn invalid_target_length(edge: usize, location: Point3<f64>, value: f64) -> Self {
        MeshError::InvalidTargetLength {
            edge,
            location,
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_target_length_message() {
        let err = MeshError::invalid_target_length(7, Point3::new(1.0, 2.0, 3.0), -0.5);
        let msg = err.to_string();
        assert!(msg.contains("edge 7"));
        assert!(msg.contains("-0.5"));
    }

    #[test]
    fn test_invalid_param_message() {
        let err = MeshError::invalid_param("pull", 1.5, "must be in [0, 1]");
        assert_eq!(err.to_string(), "invalid parameter: pull = 1.5 (must be in [0, 1])");
    }
}
