//! Re-projection of a mesh onto a different vertex layout.

use std::sync::Arc;

use crate::error::Result;
use crate::mesh::{Mesh, VertexLayout};
use crate::profile_function;

/// For each float slot of `target`, the source float offset it is copied
/// from, or `None` if the slot is zero-filled.
///
/// A target component copies from the source component with the same
/// semantic and stream index. Floats past the end of the source component
/// are zero-filled.
pub fn component_mapping(source: &VertexLayout, target: &VertexLayout) -> Vec<Option<usize>> {
    let mut mapping = Vec::with_capacity(target.stride());
    for component in target.components() {
        let src = source.find(component.semantic(), component.stream_index());
        for i in 0..component.size() {
            mapping.push(src.filter(|s| i < s.size()).map(|s| s.offset() + i));
        }
    }
    mapping
}

/// Build a mesh with `target` layout from `mesh`.
///
/// Vertex count and triangles (including cached normals and group indices)
/// are copied unchanged. Target components absent from the source layout are
/// zero-filled; source components absent from the target are dropped.
///
/// # Example
///
/// ```
/// use wiregrid_core::math::Vec3;
/// use wiregrid_core::mesh::{generate_cube, VertexLayout};
/// use wiregrid_core::ops::fix_vertex_components;
///
/// let cube = generate_cube(VertexLayout::position_normal_uv(), Vec3::new(1.0, 1.0, 1.0), Vec3::zeros())?;
/// let positions = fix_vertex_components(&cube, VertexLayout::position_only())?;
/// assert_eq!(positions.num_vertices(), 24);
/// assert_eq!(positions.stride(), 3);
/// # Ok::<(), wiregrid_core::error::MeshError>(())
/// ```
pub fn fix_vertex_components(mesh: &Mesh, target: Arc<VertexLayout>) -> Result<Mesh> {
    profile_function!();
    let mapping = component_mapping(mesh.layout(), &target);
    let num_vertices = mesh.num_vertices();
    let mut buffer = Vec::with_capacity(num_vertices * target.stride());
    for src in mesh.vertex_buffer().chunks_exact(mesh.stride()) {
        buffer.extend(mapping.iter().map(|slot| slot.map_or(0.0, |offset| src[offset])));
    }
    log::debug!(
        "Remapped {} vertices: stride {} -> {}",
        num_vertices,
        mesh.stride(),
        target.stride()
    );
    Mesh::from_parts(target, buffer, mesh.triangles().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{Triangle, VertexSemantic};

    fn source_mesh() -> Mesh {
        let mut mesh = Mesh::new(VertexLayout::position_normal_uv(), 3, 1).unwrap();
        for i in 0..3 {
            let f = i as f32;
            mesh.set_vertex(i, VertexSemantic::Position, 0, &[f, f + 1.0, f + 2.0])
                .unwrap();
            mesh.set_vertex(i, VertexSemantic::Normal, 0, &[0.0, 0.0, 1.0]).unwrap();
            mesh.set_vertex(i, VertexSemantic::TexCoord, 0, &[f, -f]).unwrap();
        }
        let mut triangle = Triangle::new([0, 1, 2], 3);
        triangle.normal = [0.0, 0.0, 1.0];
        mesh.set_triangle(0, triangle).unwrap();
        mesh
    }

    #[test]
    fn test_mapping_slots() {
        let source = VertexLayout::position_normal_uv();
        let target: VertexLayout = "texcoord:3,position:3".parse().unwrap();
        let mapping = component_mapping(&source, &target);
        assert_eq!(
            mapping,
            vec![Some(6), Some(7), None, Some(0), Some(1), Some(2)]
        );
    }

    #[test]
    fn test_extract_positions() {
        let mesh = source_mesh();
        let positions = fix_vertex_components(&mesh, VertexLayout::position_only()).unwrap();
        assert_eq!(positions.num_vertices(), 3);
        assert_eq!(positions.vertex_buffer()[3..6], [1.0, 2.0, 3.0]);
        assert_eq!(positions.triangles(), mesh.triangles());
    }

    #[test]
    fn test_added_component_is_zero_filled() {
        let mesh = fix_vertex_components(&source_mesh(), VertexLayout::position_only()).unwrap();
        let target: VertexLayout = "position:3,color:4".parse().unwrap();
        let colored = fix_vertex_components(&mesh, Arc::new(target)).unwrap();
        for i in 0..colored.num_vertices() {
            assert_eq!(
                colored.vertex(i, VertexSemantic::Color, 0).unwrap(),
                &[0.0, 0.0, 0.0, 0.0]
            );
            assert_eq!(colored.position(i).unwrap(), mesh.position(i).unwrap());
        }
        assert_eq!(colored.triangles(), mesh.triangles());
    }

    #[test]
    fn test_wider_component_zero_fills_tail() {
        let target: VertexLayout = "position:4".parse().unwrap();
        let mesh = fix_vertex_components(&source_mesh(), Arc::new(target)).unwrap();
        assert_eq!(
            mesh.vertex(2, VertexSemantic::Position, 0).unwrap(),
            &[2.0, 3.0, 4.0, 0.0]
        );
    }

    #[test]
    fn test_invalid_target_layout() {
        let target: VertexLayout = "normal:3".parse().unwrap();
        assert!(fix_vertex_components(&source_mesh(), Arc::new(target)).is_err());
    }
}
