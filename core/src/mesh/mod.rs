//! CPU-side mesh types and generators.
//!
//! - [`VertexComponent`] - One named float field of a vertex record
//! - [`VertexLayout`] - Ordered components packed into a fixed stride
//! - [`Mesh`] - Interleaved `f32` vertex buffer plus a [`Triangle`] list
//! - Generators for primitive shapes (cube, cylinder, sphere, torus)

mod data;
pub mod generators;
mod layout;

pub use data::{Mesh, Triangle};
pub use generators::{generate_cube, generate_cylinder, generate_sphere, generate_torus};
pub use layout::{
    VertexComponent, VertexLayout, VertexSemantic, MAX_COMPONENT_SIZE, MAX_STREAM_INDEX,
};
