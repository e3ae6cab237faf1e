//! Face normals and degenerate-triangle handling.
//!
//! A triangle is degenerate when any of the following holds, checked in
//! this order:
//!
//! 1. two of its vertex indices are equal
//! 2. two of its positions are equal within
//!    [`DegeneracyTolerance::position_epsilon`] on every axis
//! 3. the magnitude of `(v1 - v0) × (v2 - v0)` is below
//!    [`DegeneracyTolerance::area_epsilon`]
//!
//! Normals are `normalize((v1 - v0) × (v2 - v0))` evaluated in `f64`, so
//! counter-clockwise triangles face the viewer.

use std::fmt;

use nalgebra::Vector3;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::{MeshError, Result};
use crate::mesh::{Mesh, Triangle};
use crate::profile_function;

/// Why a triangle was classified as degenerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Degeneracy {
    /// Two vertex indices are the same.
    RepeatedIndex,
    /// Two distinct vertices share a position.
    CoincidentPositions,
    /// The three positions lie on one line.
    Collinear,
}

impl fmt::Display for Degeneracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RepeatedIndex => write!(f, "repeated vertex index"),
            Self::CoincidentPositions => write!(f, "coincident positions"),
            Self::Collinear => write!(f, "collinear positions"),
        }
    }
}

/// Tolerances used to classify degenerate triangles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DegeneracyTolerance {
    /// Per-axis tolerance for two positions to count as the same point.
    pub position_epsilon: f64,
    /// Minimum edge cross product magnitude of a valid triangle.
    pub area_epsilon: f64,
}

impl Default for DegeneracyTolerance {
    fn default() -> Self {
        Self {
            position_epsilon: 1e-8,
            area_epsilon: 1e-7,
        }
    }
}

impl DegeneracyTolerance {
    /// Check that both tolerances are finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("position_epsilon", self.position_epsilon),
            ("area_epsilon", self.area_epsilon),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(MeshError::invalid_param(
                    name,
                    value,
                    "must be finite and non-negative",
                ));
            }
        }
        Ok(())
    }
}

/// What normal evaluation does with a degenerate triangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DegeneratePolicy {
    /// Stop with [`MeshError::DegenerateTriangle`].
    #[default]
    Fail,
    /// Assign `normal`, record a diagnostic and continue.
    Fallback {
        /// Normal given to every degenerate triangle.
        normal: [f32; 3],
    },
}

impl DegeneratePolicy {
    /// Fallback policy with the `+Y` normal.
    pub fn fallback() -> Self {
        Self::Fallback {
            normal: [0.0, 1.0, 0.0],
        }
    }
}

/// Options for [`compute_triangle_normals_with`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NormalOptions {
    pub tolerance: DegeneracyTolerance,
    pub policy: DegeneratePolicy,
}

impl NormalOptions {
    /// Set the degeneracy tolerances.
    pub fn with_tolerance(mut self, tolerance: DegeneracyTolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set what happens to degenerate triangles.
    pub fn with_policy(mut self, policy: DegeneratePolicy) -> Self {
        self.policy = policy;
        self
    }
}

// ============================================================================
// Classification
// ============================================================================

/// Classification result plus the unnormalized face normal.
struct Face {
    degeneracy: Option<Degeneracy>,
    cross: Vector3<f64>,
}

fn evaluate(mesh: &Mesh, triangle: &Triangle, tolerance: &DegeneracyTolerance) -> Result<Face> {
    let [i0, i1, i2] = triangle.vertex_indices;
    let v0 = mesh.position(i0)?.cast::<f64>();
    let v1 = mesh.position(i1)?.cast::<f64>();
    let v2 = mesh.position(i2)?.cast::<f64>();
    let cross = (v1 - v0).cross(&(v2 - v0));
    let area = cross.norm();

    let same_point = |a: &Vector3<f64>, b: &Vector3<f64>| {
        a.iter()
            .zip(b.iter())
            .all(|(x, y)| (x - y).abs() < tolerance.position_epsilon)
    };

    let degeneracy = if triangle.has_repeated_index() {
        Some(Degeneracy::RepeatedIndex)
    } else if same_point(&v0, &v1) || same_point(&v1, &v2) || same_point(&v0, &v2) {
        Some(Degeneracy::CoincidentPositions)
    } else if area.is_nan() || area < tolerance.area_epsilon {
        Some(Degeneracy::Collinear)
    } else {
        None
    };
    Ok(Face { degeneracy, cross })
}

/// Classify one triangle against the positions of `mesh`.
///
/// Returns `None` for a valid triangle. Fails if a vertex index is out of
/// range.
pub fn classify_triangle(
    mesh: &Mesh,
    triangle: &Triangle,
    tolerance: &DegeneracyTolerance,
) -> Result<Option<Degeneracy>> {
    Ok(evaluate(mesh, triangle, tolerance)?.degeneracy)
}

// ============================================================================
// Normal evaluation
// ============================================================================

/// Compute every triangle's face normal, failing on the first degenerate
/// triangle.
pub fn compute_triangle_normals(mesh: Mesh) -> Result<Mesh> {
    compute_triangle_normals_with(mesh, &NormalOptions::default(), &mut Diagnostics::new())
}

/// Compute every triangle's face normal with explicit options.
///
/// Each degenerate triangle is recorded as
/// [`Diagnostic::DegenerateTriangle`]. Under
/// [`DegeneratePolicy::Fallback`] it also gets the fallback normal and a
/// [`Diagnostic::FallbackNormal`] entry; under [`DegeneratePolicy::Fail`]
/// the mesh is discarded and [`MeshError::DegenerateTriangle`] returned.
pub fn compute_triangle_normals_with(
    mut mesh: Mesh,
    options: &NormalOptions,
    diagnostics: &mut Diagnostics,
) -> Result<Mesh> {
    profile_function!();
    options.tolerance.validate()?;

    let mut normals = Vec::with_capacity(mesh.num_triangles());
    for (triangle_index, triangle) in mesh.triangles().iter().enumerate() {
        let face = evaluate(&mesh, triangle, &options.tolerance)?;
        let Some(kind) = face.degeneracy else {
            let n = face.cross.normalize();
            normals.push([n.x as f32, n.y as f32, n.z as f32]);
            continue;
        };
        diagnostics.push(Diagnostic::DegenerateTriangle {
            triangle_index,
            kind,
        });
        match options.policy {
            DegeneratePolicy::Fail => {
                return Err(MeshError::DegenerateTriangle { triangle_index });
            }
            DegeneratePolicy::Fallback { normal } => {
                diagnostics.push(Diagnostic::FallbackNormal {
                    triangle_index,
                    normal,
                });
                normals.push(normal);
            }
        }
    }

    for (triangle, normal) in mesh.triangles_mut().iter_mut().zip(normals) {
        triangle.normal = normal;
    }
    Ok(mesh)
}

// ============================================================================
// Removal
// ============================================================================

/// Drop every degenerate triangle from `mesh`.
///
/// Returns the mesh with the remaining triangles in their original order,
/// plus the source indices of the removed ones. The vertex buffer is left
/// untouched. Each removal records a [`Diagnostic::DegenerateTriangle`] and a
/// [`Diagnostic::RemovedTriangle`].
pub fn remove_degenerate_triangles(
    mesh: Mesh,
    tolerance: &DegeneracyTolerance,
    diagnostics: &mut Diagnostics,
) -> Result<(Mesh, Vec<usize>)> {
    profile_function!();
    tolerance.validate()?;

    let mut removed = Vec::new();
    let mut kept = Vec::with_capacity(mesh.num_triangles());
    for (triangle_index, triangle) in mesh.triangles().iter().enumerate() {
        match evaluate(&mesh, triangle, tolerance)?.degeneracy {
            Some(kind) => {
                diagnostics.push(Diagnostic::DegenerateTriangle {
                    triangle_index,
                    kind,
                });
                diagnostics.push(Diagnostic::RemovedTriangle { triangle_index });
                removed.push(triangle_index);
            }
            None => kept.push(*triangle),
        }
    }

    log::debug!(
        "Removed {} of {} triangles",
        removed.len(),
        mesh.num_triangles()
    );
    let (layout, buffer, _) = mesh.into_parts();
    Ok((Mesh::from_parts(layout, buffer, kept)?, removed))
}
