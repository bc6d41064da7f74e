//! Wavefront OBJ format support.
//!
//! Only geometry is read: `v` and `f` records. Texture and normal indices in
//! `f` records are ignored, negative (relative) indices are resolved, and
//! polygons are split into a triangle fan.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use nalgebra::Point3;

use crate::error::{MeshError, Result};
use crate::mesh::{build_from_triangles, to_face_vertex, HalfEdgeMesh, MeshIndex};

/// Load a mesh from an OBJ file.
///
/// # Example
///
/// ```no_run
/// use bubblemesh::io::obj;
/// use bubblemesh::mesh::HalfEdgeMesh;
///
/// let mesh: HalfEdgeMesh = obj::load("model.obj").unwrap();
/// ```
pub fn load<P: AsRef<Path>, I: MeshIndex>(path: P) -> Result<HalfEdgeMesh<I>> {
    let path = path.as_ref();
    let file = File::open(path)?;

    let (vertices, faces) = read_triangles(BufReader::new(file)).map_err(|message| {
        MeshError::LoadError {
            path: path.to_path_buf(),
            message,
        }
    })?;

    if faces.is_empty() {
        return Err(MeshError::LoadError {
            path: path.to_path_buf(),
            message: "OBJ file contains no faces".to_string(),
        });
    }

    build_from_triangles(&vertices, &faces)
}

/// Save the live part of a mesh to an OBJ file.
///
/// # Example
///
/// ```no_run
/// use bubblemesh::io::obj;
/// use bubblemesh::mesh::HalfEdgeMesh;
///
/// let mesh: HalfEdgeMesh = HalfEdgeMesh::new();
/// obj::save(&mesh, "output.obj").unwrap();
/// ```
pub fn save<P: AsRef<Path>, I: MeshIndex>(mesh: &HalfEdgeMesh<I>, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write(mesh, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Write a mesh as OBJ text.
pub fn write<W: Write, I: MeshIndex>(mesh: &HalfEdgeMesh<I>, writer: &mut W) -> std::io::Result<()> {
    let (vertices, faces) = to_face_vertex(mesh);

    for p in &vertices {
        writeln!(writer, "v {} {} {}", p.x, p.y, p.z)?;
    }
    for f in &faces {
        writeln!(writer, "f {} {} {}", f[0] + 1, f[1] + 1, f[2] + 1)?;
    }
    Ok(())
}

/// Parse OBJ text into positions and triangles with zero-based indices.
pub(crate) fn read_triangles<R: BufRead>(
    reader: R,
) -> std::result::Result<(Vec<Point3<f64>>, Vec<[usize; 3]>), String> {
    let mut vertices = Vec::new();
    let mut faces = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| e.to_string())?;
        let mut tokens = line.split_whitespace();

        match tokens.next() {
            Some("v") => {
                let mut coord = [0.0; 3];
                for c in &mut coord {
                    *c = tokens
                        .next()
                        .and_then(|t| t.parse::<f64>().ok())
                        .ok_or_else(|| format!("line {}: malformed vertex", line_no + 1))?;
                }
                vertices.push(Point3::from(coord));
            }
            Some("f") => {
                let polygon = tokens
                    .map(|t| resolve_index(t, vertices.len()))
                    .collect::<Option<Vec<usize>>>()
                    .ok_or_else(|| format!("line {}: malformed face", line_no + 1))?;
                if polygon.len() < 3 {
                    return Err(format!("line {}: face has fewer than 3 vertices", line_no + 1));
                }
                for k in 1..polygon.len() - 1 {
                    faces.push([polygon[0], polygon[k], polygon[k + 1]]);
                }
            }
            _ => {}
        }
    }

    Ok((vertices, faces))
}

/// Resolve a `v`, `v/vt` or `v/vt/vn` face token to a zero-based index.
fn resolve_index(token: &str, num_vertices: usize) -> Option<usize> {
    let raw: i64 = token.split('/').next()?.parse().ok()?;
    match raw {
        0 => None,
        r if r > 0 => Some(r as usize - 1),
        r => num_vertices.checked_sub(r.unsigned_abs() as usize),
    }
}
