//! three.js JSON model writer (format 3.1).
//!
//! three.js indexes every attribute separately, so each attribute stream is
//! compacted on its own and faces carry one index triple per stream:
//!
//! ```text
//! [type, p0, p1, p2, (uv0, uv1, uv2), (n0, n1, n2), (c0, c1, c2)]
//! ```
//!
//! `type` is the face bitmask; the parenthesized triples are present only when
//! the matching bit is set.

use std::io::Write;

use serde::Serialize;

use crate::error::{MeshError, Result};
use crate::mesh::{Mesh, Triangle, VertexLayout, VertexSemantic};
use crate::ops::{
    component_mapping, deflate, deflate_records, fix_vertex_components, remap_triangles,
    DeflateOptions,
};
use crate::profile_function;

/// Face has per-vertex texture coordinates.
pub const FACE_VERTEX_UVS: u32 = 1 << 3;
/// Face has per-vertex normals.
pub const FACE_VERTEX_NORMALS: u32 = 1 << 5;
/// Face has per-vertex colors.
pub const FACE_VERTEX_COLORS: u32 = 1 << 7;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Metadata {
    format_version: f32,
    generator: &'static str,
    vertices: usize,
    faces: usize,
    normals: usize,
    colors: usize,
    uvs: Vec<usize>,
}

#[derive(Serialize)]
struct ThreeJsModel {
    metadata: Metadata,
    scale: f32,
    vertices: Vec<f32>,
    normals: Vec<f32>,
    colors: Vec<u32>,
    uvs: Vec<Vec<f32>>,
    faces: Vec<usize>,
}

/// One compacted attribute: unique values and per-face index triples.
struct Stream {
    values: Vec<f32>,
    triangles: Vec<Triangle>,
}

impl Stream {
    fn len(&self, size: usize) -> usize {
        self.values.len() / size
    }
}

/// Project `(semantic, 0)` into its own `size`-float records and compact them.
fn compact_attribute(mesh: &Mesh, semantic: VertexSemantic, size: usize) -> Result<Option<Stream>> {
    if !mesh.layout().contains(semantic, 0) {
        return Ok(None);
    }
    let target = VertexLayout::new().with_component(semantic, 0, size)?;
    let mapping = component_mapping(mesh.layout(), &target);
    let mut records = Vec::with_capacity(mesh.num_vertices() * size);
    for src in mesh.vertex_buffer().chunks_exact(mesh.stride()) {
        records.extend(mapping.iter().map(|slot| slot.map_or(0.0, |offset| src[offset])));
    }
    let (values, remap) = deflate_records(&records, size, &DeflateOptions::default())?;
    Ok(Some(Stream {
        values,
        triangles: remap_triangles(mesh.triangles(), &remap)?,
    }))
}

fn pack_color(rgba: &[f32]) -> u32 {
    rgba.iter()
        .take(3)
        .fold(0, |acc, &c| (acc << 8) | (c.clamp(0.0, 1.0) * 255.0).round() as u32)
}

/// Write `mesh` as a three.js JSON model.
///
/// Positions are multiplied by `scale`. Material indices are not written.
/// Fails with [`MeshError::ComponentNotFound`] when the layout has no
/// `(position, 0)`.
pub fn write_threejs<W: Write>(mesh: &Mesh, writer: &mut W, scale: f32) -> Result<()> {
    profile_function!();
    if !mesh.layout().contains(VertexSemantic::Position, 0) {
        return Err(MeshError::ComponentNotFound {
            semantic: VertexSemantic::Position,
            stream_index: 0,
        });
    }

    let positions = fix_vertex_components(mesh, VertexLayout::position_only())?;
    let (positions, _) = deflate(&positions)?;
    if positions.num_triangles() != mesh.num_triangles() {
        return Err(MeshError::RemapIncomplete {
            vertex_index: positions.num_vertices(),
        });
    }

    let normals = compact_attribute(mesh, VertexSemantic::Normal, 3)?;
    let uvs = compact_attribute(mesh, VertexSemantic::TexCoord, 2)?;
    let colors = compact_attribute(mesh, VertexSemantic::Color, 4)?;

    let mut face_type = 0;
    if uvs.is_some() {
        face_type |= FACE_VERTEX_UVS;
    }
    if normals.is_some() {
        face_type |= FACE_VERTEX_NORMALS;
    }
    if colors.is_some() {
        face_type |= FACE_VERTEX_COLORS;
    }

    let streams = [&uvs, &normals, &colors];
    let mut faces = Vec::with_capacity(mesh.num_triangles() * 13);
    for (index, triangle) in positions.triangles().iter().enumerate() {
        faces.push(face_type as usize);
        faces.extend(triangle.vertex_indices);
        for stream in streams.iter().copied().flatten() {
            faces.extend(stream.triangles[index].vertex_indices);
        }
    }

    let model = ThreeJsModel {
        metadata: Metadata {
            format_version: 3.1,
            generator: "wiregrid",
            vertices: positions.num_vertices(),
            faces: mesh.num_triangles(),
            normals: normals.as_ref().map_or(0, |s| s.len(3)),
            colors: colors.as_ref().map_or(0, |s| s.len(4)),
            uvs: uvs.iter().map(|s| s.len(2)).collect(),
        },
        scale: 1.0,
        vertices: positions.vertex_buffer().iter().map(|v| v * scale).collect(),
        normals: normals.map(|s| s.values).unwrap_or_default(),
        colors: colors
            .map(|s| s.values.chunks_exact(4).map(pack_color).collect())
            .unwrap_or_default(),
        uvs: uvs.map(|s| s.values).into_iter().collect(),
        faces,
    };

    serde_json::to_writer_pretty(&mut *writer, &model)?;
    writeln!(writer)?;
    log::debug!(
        "Wrote three.js model: {} positions, {} faces",
        model.metadata.vertices,
        model.metadata.faces
    );
    Ok(())
}
