//! STL writers (ASCII and binary).
//!
//! Both writers emit one facet per triangle using the triangle's cached
//! normal, so [`compute_triangle_normals`](crate::ops::compute_triangle_normals)
//! should run first.

use std::io::Write;

use bytemuck::{Pod, Zeroable};

use crate::error::{MeshError, Result};
use crate::math::vec3_to_array;
use crate::mesh::{Mesh, Triangle};
use crate::profile_function;

const HEADER_LEN: usize = 80;
const HEADER_TEXT: &[u8] = b"wiregrid binary STL";

/// One binary facet without its trailing attribute word.
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct FacetRecord {
    normal: [f32; 3],
    vertices: [[f32; 3]; 3],
}

impl FacetRecord {
    /// Store every float with little-endian byte order.
    fn to_le(mut self) -> Self {
        let floats: &mut [f32; 12] = bytemuck::cast_mut(&mut self);
        for f in floats.iter_mut() {
            *f = f32::from_bits(f.to_bits().to_le());
        }
        self
    }
}

fn corners(mesh: &Mesh, triangle: &Triangle) -> Result<[[f32; 3]; 3]> {
    let [a, b, c] = triangle.vertex_indices;
    Ok([
        vec3_to_array(&mesh.position(a)?),
        vec3_to_array(&mesh.position(b)?),
        vec3_to_array(&mesh.position(c)?),
    ])
}

/// Write `mesh` as ASCII STL.
pub fn write_stl_ascii<W: Write>(mesh: &Mesh, writer: &mut W) -> Result<()> {
    profile_function!();
    writeln!(writer, "solid mesh")?;
    for triangle in mesh.triangles() {
        let [nx, ny, nz] = triangle.normal;
        writeln!(writer, "facet normal {nx} {ny} {nz}")?;
        writeln!(writer, "\touter loop")?;
        for [x, y, z] in corners(mesh, triangle)? {
            writeln!(writer, "\t\tvertex {x} {y} {z}")?;
        }
        writeln!(writer, "\tendloop")?;
        writeln!(writer, "endfacet")?;
    }
    writeln!(writer, "endsolid mesh")?;
    Ok(())
}

/// Write `mesh` as binary STL.
///
/// Layout: 80-byte header, little-endian `u32` facet count, then per facet
/// 12 `f32` (normal and three corners) and a zero `u16` attribute word.
pub fn write_stl_binary<W: Write>(mesh: &Mesh, writer: &mut W) -> Result<()> {
    profile_function!();
    let count = u32::try_from(mesh.num_triangles()).map_err(|_| {
        MeshError::invalid_param("triangle count", mesh.num_triangles(), "exceeds u32 range")
    })?;

    let mut header = [0u8; HEADER_LEN];
    header[..HEADER_TEXT.len()].copy_from_slice(HEADER_TEXT);
    writer.write_all(&header)?;
    writer.write_all(&count.to_le_bytes())?;

    for triangle in mesh.triangles() {
        let record = FacetRecord {
            normal: triangle.normal,
            vertices: corners(mesh, triangle)?,
        }
        .to_le();
        writer.write_all(bytemuck::bytes_of(&record))?;
        writer.write_all(&0u16.to_le_bytes())?;
    }
    Ok(())
}
