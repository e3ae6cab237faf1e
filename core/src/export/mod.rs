//! Writers for interchange formats.
//!
//! - [`write_stl_ascii`] / [`write_stl_binary`] - STL, one facet per triangle
//! - [`write_threejs`] - three.js JSON model format 3.1
//!
//! Writers take any [`std::io::Write`] and never open files themselves.

mod stl;
mod threejs;

pub use stl::{write_stl_ascii, write_stl_binary};
pub use threejs::{write_threejs, FACE_VERTEX_COLORS, FACE_VERTEX_NORMALS, FACE_VERTEX_UVS};
