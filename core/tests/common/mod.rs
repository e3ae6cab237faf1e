//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use wiregrid_core::prelude::*;

/// Primitive shapes the generators can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Cube,
    Cylinder,
    Sphere,
    Torus,
}

impl Shape {
    /// Generate the shape with small, fixed parameters.
    pub fn generate(self, layout: Arc<VertexLayout>) -> Mesh {
        let mesh = match self {
            Shape::Cube => generate_cube(layout, Vec3::new(1.0, 1.0, 1.0), Vec3::zeros()),
            Shape::Cylinder => generate_cylinder(layout, 1.0, 1.0, 2.0, 12, 2),
            Shape::Sphere => generate_sphere(layout, 1.0, 12, 6),
            Shape::Torus => generate_torus(layout, 0.25, 1.0, 8, 12),
        };
        mesh.unwrap_or_else(|e| panic!("failed to generate {self:?}: {e}"))
    }
}

/// Assert that `remap` maps onto exactly `0..count`.
pub fn assert_remap_onto(remap: &[usize], count: usize) {
    assert!(remap.iter().all(|&i| i < count), "remap entry out of range");
    let mut seen = vec![false; count];
    for &i in remap {
        seen[i] = true;
    }
    assert!(seen.into_iter().all(|hit| hit), "remap misses a compacted vertex");
}
