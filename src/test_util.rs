//! Mesh fixtures shared by unit tests.

use std::f64::consts::TAU;

use nalgebra::Point3;

use crate::mesh::{build_from_triangles, HalfEdgeMesh, VertexId};

/// Planar `nx` x `ny` grid of squares in the XY plane, each split along the
/// `(i, j) -> (i + 1, j + 1)` diagonal.
pub fn grid(nx: usize, ny: usize, spacing: f64) -> HalfEdgeMesh {
    let mut vertices = Vec::with_capacity((nx + 1) * (ny + 1));
    for j in 0..=ny {
        for i in 0..=nx {
            vertices.push(Point3::new(i as f64 * spacing, j as f64 * spacing, 0.0));
        }
    }

    let idx = |i: usize, j: usize| j * (nx + 1) + i;
    let mut faces = Vec::with_capacity(2 * nx * ny);
    for j in 0..ny {
        for i in 0..nx {
            faces.push([idx(i, j), idx(i + 1, j), idx(i + 1, j + 1)]);
            faces.push([idx(i, j), idx(i + 1, j + 1), idx(i, j + 1)]);
        }
    }

    build_from_triangles(&vertices, &faces).unwrap()
}

/// Id of grid vertex `(i, j)` in a grid with `nx` columns of squares.
pub fn grid_vertex(nx: usize, i: usize, j: usize) -> VertexId {
    VertexId::new(j * (nx + 1) + i)
}

/// A closed tetrahedron, every vertex of valence 3.
pub fn tetrahedron() -> HalfEdgeMesh {
    let vertices = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.5, 1.0, 0.0),
        Point3::new(0.5, 0.5, 1.0),
    ];
    let faces = vec![[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]];
    build_from_triangles(&vertices, &faces).unwrap()
}

/// Planar disk of `radius` with a center vertex and `rings` concentric rings
/// of `segments` vertices each. The outer ring is vertices
/// `1 + (rings - 1) * segments ..`.
pub fn disk(rings: usize, segments: usize, radius: f64) -> HalfEdgeMesh {
    let mut vertices = vec![Point3::origin()];
    for r in 1..=rings {
        let rad = radius * r as f64 / rings as f64;
        // Offset alternate rings to avoid slivers.
        let phase = if r % 2 == 0 { 0.5 } else { 0.0 };
        for s in 0..segments {
            let angle = TAU * (s as f64 + phase) / segments as f64;
            vertices.push(Point3::new(rad * angle.cos(), rad * angle.sin(), 0.0));
        }
    }

    let ring = |r: usize, s: usize| 1 + (r - 1) * segments + s % segments;
    let mut faces = Vec::new();
    for s in 0..segments {
        faces.push([0, ring(1, s), ring(1, s + 1)]);
    }
    for r in 1..rings {
        for s in 0..segments {
            let (a, b) = (ring(r, s), ring(r, s + 1));
            let (c, d) = (ring(r + 1, s), ring(r + 1, s + 1));
            if r % 2 == 1 {
                faces.push([a, c, d]);
                faces.push([a, d, b]);
            } else {
                faces.push([a, c, b]);
                faces.push([b, c, d]);
            }
        }
    }

    build_from_triangles(&vertices, &faces).unwrap()
}

/// A thin flat triangle with edges of roughly 1.51, 1.51 and 3.
pub fn thin_triangle() -> HalfEdgeMesh {
    let vertices = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(3.0, 0.0, 0.0),
        Point3::new(1.5, 0.2, 0.0),
    ];
    build_from_triangles(&vertices, &[[0, 1, 2]]).unwrap()
}
