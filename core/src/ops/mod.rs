//! Mesh operators.
//!
//! - [`deflate`] - Merge vertices equal within a tolerance and remap triangles
//! - [`fix_vertex_components`] - Re-project a mesh onto another vertex layout
//! - [`compute_triangle_normals`] - Fill per-face normals
//! - [`remove_degenerate_triangles`] - Drop zero-area triangles
//! - [`randomize_material_colors`] - Random diffuse tints for debugging

mod colors;
mod deflate;
mod normals;
mod remap;

pub use colors::randomize_material_colors;
pub use deflate::{
    compare_with_tolerance, deflate, deflate_records, deflate_with, DeflateOptions,
    SortedKeyIndex, VertexKey, DEFAULT_EPSILON,
};
pub(crate) use deflate::remap_triangles;
pub use normals::{
    classify_triangle, compute_triangle_normals, compute_triangle_normals_with,
    remove_degenerate_triangles, Degeneracy, DegeneracyTolerance, DegeneratePolicy,
    NormalOptions,
};
pub use remap::{component_mapping, fix_vertex_components};
