//! End-to-end tests: generators feeding the mesh operators and writers.
//!
//! ```bash
//! cargo test -p wiregrid-core --test pipeline_tests
//! ```

mod common;

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rstest::rstest;

use common::{assert_remap_onto, Shape};
use wiregrid_core::material::DIFFUSE;
use wiregrid_core::prelude::*;

// ============================================================================
// Compaction
// ============================================================================

#[test]
fn test_cube_positions_collapse_to_corners() {
    let cube = Shape::Cube.generate(VertexLayout::position_normal_uv());
    assert_eq!(cube.num_vertices(), 24);

    let positions = fix_vertex_components(&cube, VertexLayout::position_only()).unwrap();
    let (compacted, remap) = deflate(&positions).unwrap();

    assert_eq!(compacted.num_vertices(), 8);
    assert_eq!(remap.len(), 24);
    assert_remap_onto(&remap, 8);
    assert_eq!(compacted.num_triangles(), 12);
}

#[rstest]
#[case::cube(Shape::Cube)]
#[case::cylinder(Shape::Cylinder)]
#[case::sphere(Shape::Sphere)]
#[case::torus(Shape::Torus)]
fn test_deflate_is_idempotent(#[case] shape: Shape) {
    let mesh = shape.generate(VertexLayout::position_normal());
    let (once, remap) = deflate(&mesh).unwrap();
    assert_remap_onto(&remap, once.num_vertices());

    let (twice, _) = deflate(&once).unwrap();
    assert_eq!(twice.num_vertices(), once.num_vertices());
    assert_eq!(twice.vertex_buffer(), once.vertex_buffer());
    assert_eq!(twice.triangles(), once.triangles());
}

#[rstest]
#[case::cube(Shape::Cube, 8)]
#[case::sphere(Shape::Sphere, 2 + 12 * 5)]
#[case::torus(Shape::Torus, 8 * 12)]
fn test_position_only_deflate_counts(#[case] shape: Shape, #[case] expected: usize) {
    let mesh = shape.generate(VertexLayout::position_only());
    let (compacted, _) = deflate(&mesh).unwrap();
    assert_eq!(compacted.num_vertices(), expected);
}

#[rstest]
#[case::identical(0.0, 1e-8, 1)]
#[case::within_default(5e-9, 1e-8, 1)]
#[case::beyond_default(1e-6, 1e-8, 2)]
#[case::loose_tolerance(1e-6, 1e-5, 1)]
#[case::exact_match_zero_tolerance(0.0, 0.0, 1)]
#[case::exact_mismatch_zero_tolerance(1e-9, 0.0, 2)]
fn test_tolerance_table(#[case] offset: f32, #[case] epsilon: f64, #[case] expected: usize) {
    let mesh = Mesh::from_parts(
        VertexLayout::position_only(),
        vec![0.0, 0.0, 0.0, offset, 0.0, 0.0],
        Vec::new(),
    )
    .unwrap();
    let options = DeflateOptions::default().with_epsilon(epsilon);
    let (compacted, _) = deflate_with(&mesh, &options).unwrap();
    assert_eq!(compacted.num_vertices(), expected);
}

// ============================================================================
// Remapping
// ============================================================================

#[rstest]
#[case::cube(Shape::Cube)]
#[case::cylinder(Shape::Cylinder)]
#[case::sphere(Shape::Sphere)]
#[case::torus(Shape::Torus)]
fn test_remap_preserves_topology(
    #[case] shape: Shape,
    #[values("position:3", "position:3,color:4", "color:4,position:4,texcoord:1:2")] target: &str,
) {
    let mesh = shape.generate(VertexLayout::position_normal_uv());
    let target: VertexLayout = target.parse().unwrap();
    let remapped = fix_vertex_components(&mesh, Arc::new(target)).unwrap();

    assert_eq!(remapped.num_vertices(), mesh.num_vertices());
    assert_eq!(remapped.triangles(), mesh.triangles());
    for i in 0..mesh.num_vertices() {
        assert_eq!(remapped.position(i).unwrap(), mesh.position(i).unwrap());
    }
}

// ============================================================================
// Normals and degeneracy
// ============================================================================

#[rstest]
#[case::cube(Shape::Cube)]
#[case::cylinder(Shape::Cylinder)]
#[case::sphere(Shape::Sphere)]
fn test_generated_normals_point_outward(#[case] shape: Shape) {
    let mesh = compute_triangle_normals(shape.generate(VertexLayout::position_only())).unwrap();
    for triangle in mesh.triangles() {
        let [a, b, c] = triangle.vertex_indices;
        let centroid =
            (mesh.position(a).unwrap() + mesh.position(b).unwrap() + mesh.position(c).unwrap()) / 3.0;
        let normal = Vec3::from(triangle.normal);
        assert!(normal.dot(&centroid) > 0.0, "{shape:?}: inward normal {normal:?}");
        assert!((normal.norm() - 1.0).abs() < 1e-5);
    }
}

#[test]
fn test_torus_normals_point_away_from_tube() {
    let mesh = compute_triangle_normals(Shape::Torus.generate(VertexLayout::position_only())).unwrap();
    for triangle in mesh.triangles() {
        let [a, b, c] = triangle.vertex_indices;
        let centroid =
            (mesh.position(a).unwrap() + mesh.position(b).unwrap() + mesh.position(c).unwrap()) / 3.0;
        let ring = Vec3::new(centroid.x, centroid.y, 0.0).normalize();
        let outward = centroid - ring;
        assert!(Vec3::from(triangle.normal).dot(&outward) > 0.0);
    }
}

#[rstest]
#[case::cube(Shape::Cube)]
#[case::cylinder(Shape::Cylinder)]
#[case::sphere(Shape::Sphere)]
#[case::torus(Shape::Torus)]
fn test_generated_shapes_have_no_degenerates(#[case] shape: Shape) {
    let mut diagnostics = Diagnostics::new();
    let mesh = shape.generate(VertexLayout::position_normal_uv());
    let count = mesh.num_triangles();
    let (mesh, removed) =
        remove_degenerate_triangles(mesh, &DegeneracyTolerance::default(), &mut diagnostics).unwrap();
    assert!(removed.is_empty());
    assert!(diagnostics.is_empty());
    assert_eq!(mesh.num_triangles(), count);
}

#[rstest]
#[case(3)]
#[case(8)]
#[case(16)]
fn test_cone_has_two_degenerates_per_slice(#[case] slices: usize) {
    let cone = generate_cylinder(VertexLayout::position_only(), 1.0, 0.0, 1.0, slices, 1).unwrap();

    let strict = compute_triangle_normals(cone.clone());
    assert!(matches!(strict, Err(MeshError::DegenerateTriangle { .. })));

    let mut diagnostics = Diagnostics::new();
    let options = NormalOptions::default().with_policy(DegeneratePolicy::fallback());
    let lenient = compute_triangle_normals_with(cone.clone(), &options, &mut diagnostics).unwrap();
    assert_eq!(diagnostics.fallback_count(), 2 * slices);
    assert_eq!(lenient.num_triangles(), cone.num_triangles());

    let mut diagnostics = Diagnostics::new();
    let (cleaned, removed) =
        remove_degenerate_triangles(cone, &DegeneracyTolerance::default(), &mut diagnostics).unwrap();
    assert_eq!(removed.len(), 2 * slices);
    assert_eq!(diagnostics.removed_triangles(), removed);
    assert_eq!(cleaned.num_triangles(), 2 * slices);
}

// ============================================================================
// Writers and models
// ============================================================================

#[rstest]
#[case::cube(Shape::Cube)]
#[case::cylinder(Shape::Cylinder)]
#[case::sphere(Shape::Sphere)]
#[case::torus(Shape::Torus)]
fn test_stl_sizes(#[case] shape: Shape) {
    let mesh = compute_triangle_normals(shape.generate(VertexLayout::position_normal())).unwrap();

    let mut binary = Vec::new();
    write_stl_binary(&mesh, &mut binary).unwrap();
    assert_eq!(binary.len(), 84 + 50 * mesh.num_triangles());

    let mut ascii = Vec::new();
    write_stl_ascii(&mesh, &mut ascii).unwrap();
    let text = String::from_utf8(ascii).unwrap();
    assert_eq!(text.matches("endfacet").count(), mesh.num_triangles());
}

#[test]
fn test_threejs_face_count_matches_mesh() {
    let mesh = Shape::Sphere.generate(VertexLayout::position_normal());
    let mut out = Vec::new();
    write_threejs(&mesh, &mut out, 1.0).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json["metadata"]["faces"], mesh.num_triangles());
    // type + 3 position + 3 normal indices per face
    assert_eq!(json["faces"].as_array().unwrap().len(), 7 * mesh.num_triangles());
}

#[test]
fn test_model_pipeline() {
    let mesh = Shape::Torus.generate(VertexLayout::position_normal());
    let mut model = Model::with_default_material("torus", mesh)
        .map_mesh(compute_triangle_normals)
        .unwrap();
    let mut rng = StdRng::seed_from_u64(42);
    assert_eq!(randomize_material_colors(&mut model, &mut rng), 1);

    let diffuse = model
        .material(0)
        .unwrap()
        .param(DIFFUSE)
        .and_then(MatParamValue::as_color)
        .unwrap();
    assert!(diffuse[..3].iter().all(|c| (0.5..=1.0).contains(c)));
    assert_eq!(diffuse[3], 1.0);
    assert!(model.mesh().triangles().iter().all(|t| t.normal != [0.0; 3]));
}
