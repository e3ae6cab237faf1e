//! Mesh generators for primitive shapes.
//!
//! Every generator fills `(position, 0)` and, when the layout has them,
//! `(normal, 0)` with unit vertex normals. The cube additionally writes
//! `(texcoord, 0)`. Any other component is left zeroed. Triangles are wound
//! counter-clockwise when seen from outside, so face normals point outward.

use std::f32::consts::PI;
use std::sync::Arc;

use crate::error::{MeshError, Result};
use crate::math::Vec3;
use crate::profile_function;

use super::data::{Mesh, Triangle};
use super::layout::{VertexLayout, VertexSemantic};

/// Write `values` into a component if the layout has it, truncated to the
/// component size.
fn set_if_present(
    mesh: &mut Mesh,
    index: usize,
    semantic: VertexSemantic,
    values: &[f32],
) -> Result<()> {
    let Some(size) = mesh.layout().find(semantic, 0).map(|c| c.size()) else {
        return Ok(());
    };
    mesh.set_vertex(index, semantic, 0, &values[..values.len().min(size)])
}

fn check_position(layout: &VertexLayout) -> Result<()> {
    let size = layout.get(VertexSemantic::Position, 0)?.size();
    if size < 3 {
        return Err(MeshError::invalid_param(
            "position size",
            size,
            "generators need a 3D position",
        ));
    }
    Ok(())
}

fn check_count(name: &'static str, value: usize, min: usize, reason: &'static str) -> Result<()> {
    if value < min {
        return Err(MeshError::invalid_param(name, value, reason));
    }
    Ok(())
}

fn check_radius(name: &'static str, value: f32, allow_zero: bool) -> Result<()> {
    let ok = value.is_finite() && if allow_zero { value >= 0.0 } else { value > 0.0 };
    if !ok {
        let reason = if allow_zero {
            "must be finite and non-negative"
        } else {
            "must be finite and positive"
        };
        return Err(MeshError::invalid_param(name, value, reason));
    }
    Ok(())
}

/// Unit circle sampled at `slices` evenly spaced angles, as `(sin, cos)`.
fn ring_table(slices: usize) -> Vec<(f32, f32)> {
    (0..slices)
        .map(|i| {
            let angle = 2.0 * PI * i as f32 / slices as f32;
            (angle.sin(), angle.cos())
        })
        .collect()
}

// ============================================================================
// Cube
// ============================================================================

/// Generate an axis-aligned box with 4 vertices per face.
///
/// Produces 24 vertices and 12 triangles. Faces are emitted in the order
/// top, front (-Z), left, right, back (+Z), bottom, each as two triangles
/// `(0,1,2)` and `(0,2,3)` over its four vertices.
pub fn generate_cube(layout: Arc<VertexLayout>, size: Vec3, origin: Vec3) -> Result<Mesh> {
    profile_function!();
    check_position(&layout)?;
    log::debug!("Generating cube: size={:?}, origin={:?}", size, origin);

    let corner = |x: f32, y: f32, z: f32| origin + size.component_mul(&Vec3::new(x, y, z));
    let top_left_front = corner(-0.5, 0.5, -0.5);
    let top_left_back = corner(-0.5, 0.5, 0.5);
    let top_right_back = corner(0.5, 0.5, 0.5);
    let top_right_front = corner(0.5, 0.5, -0.5);
    let bottom_left_front = corner(-0.5, -0.5, -0.5);
    let bottom_left_back = corner(-0.5, -0.5, 0.5);
    let bottom_right_back = corner(0.5, -0.5, 0.5);
    let bottom_right_front = corner(0.5, -0.5, -0.5);

    let faces: [([Vec3; 4], [f32; 3]); 6] = [
        (
            [top_left_front, top_left_back, top_right_back, top_right_front],
            [0.0, 1.0, 0.0],
        ),
        (
            [top_left_front, top_right_front, bottom_right_front, bottom_left_front],
            [0.0, 0.0, -1.0],
        ),
        (
            [top_left_back, top_left_front, bottom_left_front, bottom_left_back],
            [-1.0, 0.0, 0.0],
        ),
        (
            [top_right_front, top_right_back, bottom_right_back, bottom_right_front],
            [1.0, 0.0, 0.0],
        ),
        (
            [top_right_back, top_left_back, bottom_left_back, bottom_right_back],
            [0.0, 0.0, 1.0],
        ),
        (
            [bottom_left_back, bottom_left_front, bottom_right_front, bottom_right_back],
            [0.0, -1.0, 0.0],
        ),
    ];
    const FACE_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

    let mut mesh = Mesh::new(layout, 24, 12)?;
    for (face, (corners, normal)) in faces.iter().enumerate() {
        let base = face * 4;
        for (k, p) in corners.iter().enumerate() {
            mesh.set_vertex(base + k, VertexSemantic::Position, 0, &[p.x, p.y, p.z])?;
            set_if_present(&mut mesh, base + k, VertexSemantic::Normal, normal)?;
            set_if_present(&mut mesh, base + k, VertexSemantic::TexCoord, &FACE_UVS[k])?;
        }
        mesh.set_triangle(face * 2, Triangle::new([base, base + 1, base + 2], 0))?;
        mesh.set_triangle(face * 2 + 1, Triangle::new([base, base + 2, base + 3], 0))?;
    }
    Ok(mesh)
}

// ============================================================================
// Cylinder
// ============================================================================

/// Generate a capped cylinder (or cone frustum) along the Z axis.
///
/// The base cap sits at `z = -length / 2` with `base_radius`, the top cap at
/// `z = +length / 2` with `top_radius`. Setting `top_radius` to zero yields a
/// cone whose top ring collapses into degenerate triangles.
///
/// Vertex order: base center, base ring, `stacks + 1` side rings, top ring,
/// top center, giving `2 + (stacks + 3) * slices` vertices and
/// `2 * slices * (stacks + 1)` triangles.
pub fn generate_cylinder(
    layout: Arc<VertexLayout>,
    base_radius: f32,
    top_radius: f32,
    length: f32,
    slices: usize,
    stacks: usize,
) -> Result<Mesh> {
    profile_function!();
    check_position(&layout)?;
    check_radius("base_radius", base_radius, true)?;
    check_radius("top_radius", top_radius, true)?;
    if !length.is_finite() {
        return Err(MeshError::invalid_param("length", length, "must be finite"));
    }
    check_count("slices", slices, 3, "need at least 3 slices")?;
    check_count("stacks", stacks, 1, "need at least 1 stack")?;
    log::debug!(
        "Generating cylinder: r0={}, r1={}, length={}, slices={}, stacks={}",
        base_radius,
        top_radius,
        length,
        slices,
        stacks
    );

    let table = ring_table(slices);
    let delta_radius = top_radius - base_radius;
    let side_length = (delta_radius * delta_radius + length * length).sqrt();
    let (normal_xy, normal_z) = if side_length > 1e-5 {
        (length / side_length, -delta_radius / side_length)
    } else {
        (1.0, 0.0)
    };

    let num_vertices = 2 + (stacks + 3) * slices;
    let num_triangles = 2 * slices * (stacks + 1);
    let mut mesh = Mesh::new(layout, num_vertices, num_triangles)?;

    let mut vertex = 0;
    let mut emit = |mesh: &mut Mesh, p: [f32; 3], n: [f32; 3]| -> Result<()> {
        mesh.set_vertex(vertex, VertexSemantic::Position, 0, &p)?;
        set_if_present(mesh, vertex, VertexSemantic::Normal, &n)?;
        vertex += 1;
        Ok(())
    };

    let base_z = -0.5 * length;
    let top_z = 0.5 * length;
    emit(&mut mesh, [0.0, 0.0, base_z], [0.0, 0.0, -1.0])?;
    for &(s, c) in &table {
        emit(&mut mesh, [base_radius * s, base_radius * c, base_z], [0.0, 0.0, -1.0])?;
    }
    for j in 0..=stacks {
        let frac = j as f32 / stacks as f32;
        let z = length * (frac - 0.5);
        let radius = base_radius + frac * delta_radius;
        for &(s, c) in &table {
            emit(
                &mut mesh,
                [radius * s, radius * c, z],
                [normal_xy * s, normal_xy * c, normal_z],
            )?;
        }
    }
    for &(s, c) in &table {
        emit(&mut mesh, [top_radius * s, top_radius * c, top_z], [0.0, 0.0, 1.0])?;
    }
    emit(&mut mesh, [0.0, 0.0, top_z], [0.0, 0.0, 1.0])?;

    let mut triangles = Vec::with_capacity(num_triangles);
    // Base cap fan around vertex 0.
    for i in 0..slices {
        let next = (i + 1) % slices;
        triangles.push([0, 1 + i, 1 + next]);
    }
    for j in 0..stacks {
        let row_a = 1 + (j + 1) * slices;
        let row_b = row_a + slices;
        for i in 0..slices {
            let next = (i + 1) % slices;
            triangles.push([row_a + i, row_b + i, row_a + next]);
            triangles.push([row_a + next, row_b + i, row_b + next]);
        }
    }
    // Top cap fan around the last vertex.
    let row_a = 1 + (stacks + 2) * slices;
    let center = row_a + slices;
    for i in 0..slices {
        let next = (i + 1) % slices;
        triangles.push([row_a + i, center, row_a + next]);
    }

    for (index, vertex_indices) in triangles.into_iter().enumerate() {
        mesh.set_triangle(index, Triangle::new(vertex_indices, 0))?;
    }
    Ok(mesh)
}

// ============================================================================
// Sphere
// ============================================================================

/// Generate a UV sphere centered at the origin with poles on the Z axis.
///
/// Vertex order: north pole, `stacks - 1` latitude rings of `slices`
/// vertices, south pole. Produces `2 + slices * (stacks - 1)` vertices and
/// `2 * slices * (stacks - 1)` triangles.
pub fn generate_sphere(
    layout: Arc<VertexLayout>,
    radius: f32,
    slices: usize,
    stacks: usize,
) -> Result<Mesh> {
    profile_function!();
    check_position(&layout)?;
    check_radius("radius", radius, false)?;
    check_count("slices", slices, 3, "need at least 3 slices")?;
    check_count("stacks", stacks, 2, "need at least 2 stacks")?;
    log::debug!(
        "Generating sphere: radius={}, slices={}, stacks={}",
        radius,
        slices,
        stacks
    );

    let around = ring_table(slices);
    let num_vertices = 2 + slices * (stacks - 1);
    let num_triangles = 2 * slices * (stacks - 1);
    let mut mesh = Mesh::new(layout, num_vertices, num_triangles)?;

    let mut vertex = 0;
    let mut emit = |mesh: &mut Mesh, n: [f32; 3]| -> Result<()> {
        let p = [n[0] * radius, n[1] * radius, n[2] * radius];
        mesh.set_vertex(vertex, VertexSemantic::Position, 0, &p)?;
        set_if_present(mesh, vertex, VertexSemantic::Normal, &n)?;
        vertex += 1;
        Ok(())
    };

    emit(&mut mesh, [0.0, 0.0, 1.0])?;
    for j in 1..stacks {
        let polar = PI * j as f32 / stacks as f32;
        let (sin_j, cos_j) = (polar.sin(), polar.cos());
        for &(s, c) in &around {
            emit(&mut mesh, [s * sin_j, c * sin_j, cos_j])?;
        }
    }
    emit(&mut mesh, [0.0, 0.0, -1.0])?;

    let mut triangles = Vec::with_capacity(num_triangles);
    for i in 0..slices {
        let next = (i + 1) % slices;
        triangles.push([0, 1 + next, 1 + i]);
    }
    for j in 1..stacks - 1 {
        let row_a = 1 + (j - 1) * slices;
        let row_b = row_a + slices;
        for i in 0..slices {
            let next = (i + 1) % slices;
            triangles.push([row_a + i, row_a + next, row_b + i]);
            triangles.push([row_a + next, row_b + next, row_b + i]);
        }
    }
    let row_a = 1 + (stacks - 2) * slices;
    let south = row_a + slices;
    for i in 0..slices {
        let next = (i + 1) % slices;
        triangles.push([row_a + i, row_a + next, south]);
    }

    for (index, vertex_indices) in triangles.into_iter().enumerate() {
        mesh.set_triangle(index, Triangle::new(vertex_indices, 0))?;
    }
    Ok(mesh)
}

// ============================================================================
// Torus
// ============================================================================

/// Generate a torus around the Z axis.
///
/// `outer_radius` is the distance from the origin to the tube center,
/// `inner_radius` the tube radius. Produces `rings * sides` vertices and
/// `2 * rings * sides` triangles.
pub fn generate_torus(
    layout: Arc<VertexLayout>,
    inner_radius: f32,
    outer_radius: f32,
    sides: usize,
    rings: usize,
) -> Result<Mesh> {
    profile_function!();
    check_position(&layout)?;
    check_radius("inner_radius", inner_radius, false)?;
    check_radius("outer_radius", outer_radius, false)?;
    check_count("sides", sides, 3, "need at least 3 sides")?;
    check_count("rings", rings, 3, "need at least 3 rings")?;
    log::debug!(
        "Generating torus: inner={}, outer={}, sides={}, rings={}",
        inner_radius,
        outer_radius,
        sides,
        rings
    );

    let num_vertices = rings * sides;
    let num_triangles = 2 * rings * sides;
    let mut mesh = Mesh::new(layout, num_vertices, num_triangles)?;

    let tube = ring_table(sides);
    let mut vertex = 0;
    for i in 0..rings {
        let theta = 2.0 * PI * i as f32 / rings as f32;
        let (sin_theta, cos_theta) = (theta.sin(), theta.cos());
        for &(sin_phi, cos_phi) in &tube {
            let reach = outer_radius + inner_radius * cos_phi;
            let p = [cos_theta * reach, -sin_theta * reach, sin_phi * inner_radius];
            let n = [cos_theta * cos_phi, -sin_theta * cos_phi, sin_phi];
            mesh.set_vertex(vertex, VertexSemantic::Position, 0, &p)?;
            set_if_present(&mut mesh, vertex, VertexSemantic::Normal, &n)?;
            vertex += 1;
        }
    }

    let mut triangle = 0;
    for i in 0..rings {
        let row = i * sides;
        let next_row = ((i + 1) % rings) * sides;
        for j in 0..sides {
            let next = (j + 1) % sides;
            mesh.set_triangle(triangle, Triangle::new([row + j, row + next, next_row + j], 0))?;
            mesh.set_triangle(
                triangle + 1,
                Triangle::new([next_row + j, row + next, next_row + next], 0),
            )?;
            triangle += 2;
        }
    }
    Ok(mesh)
}
