//! # wiregrid core
//!
//! Geometry kernel for moving polygonal meshes between interchange formats.
//!
//! - [`mesh`] - Vertex layouts, the interleaved [`Mesh`](mesh::Mesh) and
//!   primitive generators
//! - [`ops`] - Vertex compaction, layout remapping, face normals and
//!   degenerate-triangle removal
//! - [`material`] / [`model`] - Materials and the mesh + materials container
//! - [`export`] - STL and three.js writers
//! - [`diagnostics`] - Warnings collected by recovering operations
//!
//! # Example
//!
//! ```
//! use wiregrid_core::prelude::*;
//!
//! let cube = generate_cube(VertexLayout::position_normal_uv(), Vec3::new(1.0, 1.0, 1.0), Vec3::zeros())?;
//! let positions = fix_vertex_components(&cube, VertexLayout::position_only())?;
//! let (compacted, remap) = deflate(&positions)?;
//! assert_eq!(compacted.num_vertices(), 8);
//! assert_eq!(remap.len(), 24);
//! # Ok::<(), MeshError>(())
//! ```

pub mod diagnostics;
pub mod error;
pub mod export;
pub mod material;
pub mod math;
pub mod mesh;
pub mod model;
pub mod ops;
pub mod profiling;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Commonly used types and operations.
pub mod prelude {
    pub use crate::diagnostics::{Diagnostic, Diagnostics};
    pub use crate::error::{MeshError, Result};
    pub use crate::export::{write_stl_ascii, write_stl_binary, write_threejs};
    pub use crate::material::{MatParam, MatParamValue, Material, Shading};
    pub use crate::math::Vec3;
    pub use crate::mesh::{
        generate_cube, generate_cylinder, generate_sphere, generate_torus, Mesh, Triangle,
        VertexComponent, VertexLayout, VertexSemantic,
    };
    pub use crate::model::Model;
    pub use crate::ops::{
        compute_triangle_normals, compute_triangle_normals_with, deflate, deflate_with,
        fix_vertex_components, randomize_material_colors, remove_degenerate_triangles,
        DeflateOptions, DegeneracyTolerance, DegeneratePolicy, NormalOptions,
    };
}
