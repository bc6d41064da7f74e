//! STL format support.
//!
//! STL stores three positions per triangle; loading welds exactly coincident
//! corners back together so the mesh has connectivity to remesh. Both
//! binary and ASCII files are read; files are written as binary.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Read, Seek, Write};
use std::path::Path;

use nalgebra::{Point3, Vector3};

use crate::error::{MeshError, Result};
use crate::mesh::{build_from_triangles, to_face_vertex, HalfEdgeMesh, MeshIndex};

/// Load a mesh from an STL file.
///
/// # Example
///
/// ```no_run
/// use bubblemesh::io::stl;
/// use bubblemesh::mesh::HalfEdgeMesh;
///
/// let mesh: HalfEdgeMesh = stl::load("model.stl").unwrap();
/// ```
pub fn load<P: AsRef<Path>, I: MeshIndex>(path: P) -> Result<HalfEdgeMesh<I>> {
    let path = path.as_ref();
    let mut file = File::open(path)?;

    let (vertices, faces) = read_triangles(&mut file).map_err(|message| MeshError::LoadError {
        path: path.to_path_buf(),
        message,
    })?;

    build_from_triangles(&vertices, &faces)
}

/// Save the live part of a mesh to a binary STL file.
///
/// # Example
///
/// ```no_run
/// use bubblemesh::io::stl;
/// use bubblemesh::mesh::HalfEdgeMesh;
///
/// let mesh: HalfEdgeMesh = HalfEdgeMesh::new();
/// stl::save(&mesh, "output.stl").unwrap();
/// ```
pub fn save<P: AsRef<Path>, I: MeshIndex>(mesh: &HalfEdgeMesh<I>, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);

    write_triangles(mesh, &mut writer).map_err(|e| MeshError::SaveError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    writer.flush()?;
    Ok(())
}

/// Read STL triangles, welding identical corners.
///
/// Triangles that collapse after welding are dropped.
pub(crate) fn read_triangles<R: Read + Seek>(
    reader: &mut R,
) -> std::result::Result<(Vec<Point3<f64>>, Vec<[usize; 3]>), String> {
    let stl = stl_io::read_stl(reader).map_err(|e| e.to_string())?;

    let mut vertices: Vec<Point3<f64>> = Vec::new();
    let mut welded: HashMap<[u32; 3], usize> = HashMap::new();
    let mut weld = |v: &stl_io::Vertex| {
        let key = [v[0].to_bits(), v[1].to_bits(), v[2].to_bits()];
        *welded.entry(key).or_insert_with(|| {
            vertices.push(Point3::new(v[0] as f64, v[1] as f64, v[2] as f64));
            vertices.len() - 1
        })
    };

    let mut faces = Vec::with_capacity(stl.faces.len());
    for tri in &stl.faces {
        let [i0, i1, i2] = tri.vertices.map(|i| weld(&stl.vertices[i]));
        if i0 != i1 && i1 != i2 && i0 != i2 {
            faces.push([i0, i1, i2]);
        }
    }

    if faces.is_empty() {
        return Err("STL file contains no valid triangles".to_string());
    }
    Ok((vertices, faces))
}

/// Write the live faces of a mesh as binary STL.
pub(crate) fn write_triangles<W: Write, I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    writer: &mut W,
) -> std::io::Result<()> {
    let (vertices, faces) = to_face_vertex(mesh);
    let vertex = |p: &Point3<f64>| stl_io::Vertex::new([p.x as f32, p.y as f32, p.z as f32]);

    let triangles: Vec<stl_io::Triangle> = faces
        .iter()
        .map(|f| {
            let [p0, p1, p2] = f.map(|i| vertices[i]);
            let n = (p1 - p0)
                .cross(&(p2 - p0))
                .try_normalize(f64::EPSILON)
                .unwrap_or_else(Vector3::zeros);
            stl_io::Triangle {
                normal: stl_io::Normal::new([n.x as f32, n.y as f32, n.z as f32]),
                vertices: [vertex(&p0), vertex(&p1), vertex(&p2)],
            }
        })
        .collect();

    stl_io::write_stl(writer, triangles.iter())
}
