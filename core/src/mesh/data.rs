//! CPU-side mesh data structures.
//!
//! This module provides:
//! - [`Triangle`] - Three vertex indices, a group tag and a cached face normal
//! - [`Mesh`] - A flat interleaved `f32` vertex buffer described by a
//!   [`VertexLayout`], plus a triangle list
//!
//! Vertex `i`'s field for a component `c` lives at
//! `i * stride + c.offset() .. i * stride + c.offset() + c.size()`.

use std::sync::Arc;

use crate::error::{IndexKind, MeshError, Result};
use crate::math::{vec3_from_slice, Vec3};

use super::layout::{VertexLayout, VertexSemantic};

/// A triangle referencing three vertices of its owning [`Mesh`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Triangle {
    /// Vertex indices, each `< num_vertices` of the owning mesh.
    pub vertex_indices: [usize; 3],
    /// Material/group tag, opaque to the geometry kernel.
    pub group_index: usize,
    /// Face normal. Zero until computed by
    /// [`compute_triangle_normals`](crate::ops::compute_triangle_normals).
    pub normal: [f32; 3],
}

impl Triangle {
    /// Create a triangle with a zero normal.
    pub fn new(vertex_indices: [usize; 3], group_index: usize) -> Self {
        Self {
            vertex_indices,
            group_index,
            normal: [0.0; 3],
        }
    }

    /// Whether any two vertex indices are equal.
    pub fn has_repeated_index(&self) -> bool {
        let [a, b, c] = self.vertex_indices;
        a == b || b == c || a == c
    }
}

/// A mesh holding an interleaved vertex buffer and a triangle list.
///
/// The vertex layout is shared via `Arc` and cannot be mutated through the
/// mesh. Transforming operations (deflate, component remapping) return new
/// meshes with freshly allocated buffers.
///
/// # Example
///
/// ```
/// use wiregrid_core::mesh::{Mesh, Triangle, VertexLayout, VertexSemantic};
///
/// let mut mesh = Mesh::new(VertexLayout::position_only(), 3, 1)?;
/// mesh.set_vertex(0, VertexSemantic::Position, 0, &[0.0, 0.0, 0.0])?;
/// mesh.set_vertex(1, VertexSemantic::Position, 0, &[1.0, 0.0, 0.0])?;
/// mesh.set_vertex(2, VertexSemantic::Position, 0, &[0.0, 1.0, 0.0])?;
/// mesh.set_triangle(0, Triangle::new([0, 1, 2], 0))?;
/// assert_eq!(mesh.num_vertices(), 3);
/// # Ok::<(), wiregrid_core::error::MeshError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    layout: Arc<VertexLayout>,
    vertex_buffer: Vec<f32>,
    triangles: Vec<Triangle>,
}

impl Mesh {
    /// Allocate a zero-filled mesh with the given vertex and triangle counts.
    ///
    /// Fails with [`MeshError::InvalidLayout`] if the layout does not validate,
    /// and with [`MeshError::InvalidParameter`] if the buffer size overflows.
    pub fn new(layout: Arc<VertexLayout>, num_vertices: usize, num_triangles: usize) -> Result<Self> {
        layout
            .validate()
            .map_err(|e| MeshError::InvalidLayout(Box::new(e)))?;
        log::debug!(
            "Allocating mesh: {} vertices x {} floats, {} triangles",
            num_vertices,
            layout.stride(),
            num_triangles
        );
        let len = num_vertices.checked_mul(layout.stride()).ok_or_else(|| {
            MeshError::invalid_param("num_vertices", num_vertices, "vertex buffer size overflows")
        })?;
        let vertex_buffer = vec![0.0; len];
        Ok(Self {
            layout,
            vertex_buffer,
            triangles: vec![Triangle::default(); num_triangles],
        })
    }

    /// Assemble a mesh from an existing buffer and triangle list.
    ///
    /// Fails if the layout is invalid, if the buffer length is not a whole
    /// number of vertex records, or if a triangle references a missing vertex.
    pub fn from_parts(
        layout: Arc<VertexLayout>,
        vertex_buffer: Vec<f32>,
        triangles: Vec<Triangle>,
    ) -> Result<Self> {
        layout
            .validate()
            .map_err(|e| MeshError::InvalidLayout(Box::new(e)))?;
        let mesh = Self {
            layout,
            vertex_buffer,
            triangles,
        };
        mesh.validate()?;
        Ok(mesh)
    }

    /// Split the mesh into layout, vertex buffer and triangles.
    pub fn into_parts(self) -> (Arc<VertexLayout>, Vec<f32>, Vec<Triangle>) {
        (self.layout, self.vertex_buffer, self.triangles)
    }

    /// Re-check every mesh invariant.
    pub fn validate(&self) -> Result<()> {
        let stride = self.stride();
        if self.vertex_buffer.len() % stride != 0 {
            return Err(MeshError::CorruptBuffer {
                len: self.vertex_buffer.len(),
                stride,
            });
        }
        let num_vertices = self.num_vertices();
        for triangle in &self.triangles {
            for &index in &triangle.vertex_indices {
                if index >= num_vertices {
                    return Err(MeshError::vertex_out_of_range(index, num_vertices));
                }
            }
        }
        Ok(())
    }

    /// Get the vertex layout.
    pub fn layout(&self) -> &Arc<VertexLayout> {
        &self.layout
    }

    /// Floats per vertex record.
    pub fn stride(&self) -> usize {
        self.layout.stride()
    }

    /// Get the number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertex_buffer.len() / self.stride()
    }

    /// Get the number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// The whole interleaved vertex buffer.
    pub fn vertex_buffer(&self) -> &[f32] {
        &self.vertex_buffer
    }

    /// The vertex buffer viewed as raw native-endian bytes.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertex_buffer)
    }

    /// All triangles.
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Mutable access to the triangles.
    ///
    /// Vertex indices written through this slice are not checked; call
    /// [`validate`](Self::validate) afterwards if they were changed.
    pub fn triangles_mut(&mut self) -> &mut [Triangle] {
        &mut self.triangles
    }

    /// One full vertex record (`stride` floats).
    pub fn vertex_record(&self, index: usize) -> Result<&[f32]> {
        self.data_slice(index, 0, self.stride())
    }

    /// Read one component of a vertex.
    pub fn vertex(&self, index: usize, semantic: VertexSemantic, stream_index: u32) -> Result<&[f32]> {
        let component = self.layout.get(semantic, stream_index)?;
        self.data_slice(index, component.offset(), component.size())
    }

    /// Write one component of a vertex.
    ///
    /// Up to `size` values are written; if fewer are given the remaining
    /// floats of the component are set to zero. Supplying more values than
    /// the component holds fails with [`MeshError::ValueCountMismatch`].
    pub fn set_vertex(
        &mut self,
        index: usize,
        semantic: VertexSemantic,
        stream_index: u32,
        values: &[f32],
    ) -> Result<()> {
        let component = self.layout.get(semantic, stream_index)?;
        let (offset, size) = (component.offset(), component.size());
        if values.len() > size {
            return Err(MeshError::ValueCountMismatch {
                expected: size,
                actual: values.len(),
            });
        }
        let dst = self.data_slice_mut(index, offset, size)?;
        dst.fill(0.0);
        dst[..values.len()].copy_from_slice(values);
        Ok(())
    }

    /// Read `(position, 0)` as a 3D vector.
    pub fn position(&self, index: usize) -> Result<Vec3> {
        Ok(vec3_from_slice(self.vertex(index, VertexSemantic::Position, 0)?))
    }

    /// Get a triangle.
    pub fn triangle(&self, index: usize) -> Result<&Triangle> {
        self.triangles.get(index).ok_or(MeshError::IndexOutOfRange {
            kind: IndexKind::Triangle,
            index,
            len: self.triangles.len(),
        })
    }

    /// Replace a triangle.
    pub fn set_triangle(&mut self, index: usize, triangle: Triangle) -> Result<()> {
        let num_vertices = self.num_vertices();
        if let Some(&bad) = triangle
            .vertex_indices
            .iter()
            .find(|&&vertex| vertex >= num_vertices)
        {
            return Err(MeshError::vertex_out_of_range(bad, num_vertices));
        }
        let len = self.triangles.len();
        let slot = self.triangles.get_mut(index).ok_or(MeshError::IndexOutOfRange {
            kind: IndexKind::Triangle,
            index,
            len,
        })?;
        *slot = triangle;
        Ok(())
    }

    // -- Raw field access by float offset -------------------------------------

    /// Read one float at `offset` within a vertex record.
    pub fn data1(&self, vertex: usize, offset: usize) -> Result<f32> {
        Ok(self.data_slice(vertex, offset, 1)?[0])
    }

    /// Read two floats starting at `offset` within a vertex record.
    pub fn data2(&self, vertex: usize, offset: usize) -> Result<[f32; 2]> {
        let s = self.data_slice(vertex, offset, 2)?;
        Ok([s[0], s[1]])
    }

    /// Read three floats starting at `offset` within a vertex record.
    pub fn data3(&self, vertex: usize, offset: usize) -> Result<[f32; 3]> {
        let s = self.data_slice(vertex, offset, 3)?;
        Ok([s[0], s[1], s[2]])
    }

    /// Read four floats starting at `offset` within a vertex record.
    pub fn data4(&self, vertex: usize, offset: usize) -> Result<[f32; 4]> {
        let s = self.data_slice(vertex, offset, 4)?;
        Ok([s[0], s[1], s[2], s[3]])
    }

    /// Write one float at `offset` within a vertex record.
    pub fn set_data1(&mut self, vertex: usize, offset: usize, x: f32) -> Result<()> {
        self.data_slice_mut(vertex, offset, 1)?[0] = x;
        Ok(())
    }

    /// Write two floats starting at `offset` within a vertex record.
    pub fn set_data2(&mut self, vertex: usize, offset: usize, x: f32, y: f32) -> Result<()> {
        self.data_slice_mut(vertex, offset, 2)?
            .copy_from_slice(&[x, y]);
        Ok(())
    }

    /// Write three floats starting at `offset` within a vertex record.
    pub fn set_data3(&mut self, vertex: usize, offset: usize, x: f32, y: f32, z: f32) -> Result<()> {
        self.data_slice_mut(vertex, offset, 3)?
            .copy_from_slice(&[x, y, z]);
        Ok(())
    }

    /// Write four floats starting at `offset` within a vertex record.
    pub fn set_data4(
        &mut self,
        vertex: usize,
        offset: usize,
        x: f32,
        y: f32,
        z: f32,
        w: f32,
    ) -> Result<()> {
        self.data_slice_mut(vertex, offset, 4)?
            .copy_from_slice(&[x, y, z, w]);
        Ok(())
    }

    fn check_field(&self, vertex: usize, offset: usize, count: usize) -> Result<usize> {
        let num_vertices = self.num_vertices();
        if vertex >= num_vertices {
            return Err(MeshError::vertex_out_of_range(vertex, num_vertices));
        }
        let stride = self.stride();
        if offset >= stride || count > stride - offset {
            return Err(MeshError::IndexOutOfRange {
                kind: IndexKind::Component,
                index: offset.saturating_add(count - 1),
                len: stride,
            });
        }
        Ok(vertex * stride + offset)
    }

    fn data_slice(&self, vertex: usize, offset: usize, count: usize) -> Result<&[f32]> {
        let start = self.check_field(vertex, offset, count)?;
        Ok(&self.vertex_buffer[start..start + count])
    }

    fn data_slice_mut(&mut self, vertex: usize, offset: usize, count: usize) -> Result<&mut [f32]> {
        let start = self.check_field(vertex, offset, count)?;
        Ok(&mut self.vertex_buffer[start..start + count])
    }
}
