//! Generate, clean, compact and write one mesh.

use std::io::Write;
use std::sync::Arc;

use wiregrid_core::prelude::*;

use crate::args::{Args, Format, Shape};

/// Counts reported after a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub vertices: usize,
    pub triangles: usize,
    pub removed: usize,
    pub fallbacks: usize,
}

fn generate(args: &Args) -> Result<Mesh> {
    let layout = Arc::new(args.layout.clone());
    let r = args.radius;
    match args.shape {
        Shape::Cube => generate_cube(layout, Vec3::new(2.0 * r, 2.0 * r, 2.0 * r), Vec3::zeros()),
        Shape::Cylinder => generate_cylinder(
            layout,
            r,
            args.top_radius.unwrap_or(r),
            2.0 * r,
            args.slices,
            args.stacks,
        ),
        Shape::Sphere => generate_sphere(layout, r, args.slices, args.stacks),
        Shape::Torus => generate_torus(layout, 0.25 * r, r, args.stacks, args.slices),
    }
}

/// Run the whole pipeline and write the result into `writer`.
pub fn run<W: Write>(args: &Args, writer: &mut W) -> Result<Summary> {
    let mut diagnostics = Diagnostics::new();
    let mut mesh = generate(args)?;
    log::info!(
        "Generated {:?}: {} vertices, {} triangles",
        args.shape,
        mesh.num_vertices(),
        mesh.num_triangles()
    );

    if args.remove_degenerate {
        let (cleaned, removed) =
            remove_degenerate_triangles(mesh, &DegeneracyTolerance::default(), &mut diagnostics)?;
        log::info!("Removed {} degenerate triangles", removed.len());
        mesh = cleaned;
    }

    let mut options = NormalOptions::default();
    if args.fallback_normals {
        options = options.with_policy(DegeneratePolicy::fallback());
    }
    mesh = compute_triangle_normals_with(mesh, &options, &mut diagnostics)?;

    if args.deflate {
        let (compacted, _) = deflate_with(&mesh, &DeflateOptions::default().with_epsilon(args.epsilon))?;
        log::info!(
            "Deflated {} -> {} vertices",
            mesh.num_vertices(),
            compacted.num_vertices()
        );
        mesh = compacted;
    }

    match args.format {
        Format::StlAscii => write_stl_ascii(&mesh, writer)?,
        Format::StlBinary => write_stl_binary(&mesh, writer)?,
        Format::ThreeJs => write_threejs(&mesh, writer, args.scale)?,
    }
    writer.flush()?;

    let summary = Summary {
        vertices: mesh.num_vertices(),
        triangles: mesh.num_triangles(),
        removed: diagnostics.removed_triangles().len(),
        fallbacks: diagnostics.fallback_count(),
    };
    log::info!(
        "Wrote {:?}: {} vertices, {} triangles ({} removed, {} fallback normals)",
        args.format,
        summary.vertices,
        summary.triangles,
        summary.removed,
        summary.fallbacks
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    fn run_with(argv: &[&str]) -> (Result<Summary>, Vec<u8>) {
        let args = Args::try_parse_from(std::iter::once("wiregrid").chain(argv.iter().copied()))
            .unwrap();
        let mut out = Vec::new();
        let summary = run(&args, &mut out);
        (summary, out)
    }

    #[test]
    fn test_cube_stl_ascii() {
        let (summary, out) = run_with(&["cube"]);
        let summary = summary.unwrap();
        assert_eq!(summary.vertices, 24);
        assert_eq!(summary.triangles, 12);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("solid mesh\n"));
        assert_eq!(text.matches("facet normal").count(), 12);
    }

    #[test]
    fn test_cube_deflate_keeps_attribute_seams() {
        let (summary, _) = run_with(&["cube", "--deflate"]);
        assert_eq!(summary.unwrap().vertices, 24);

        let (summary, _) = run_with(&["cube", "--deflate", "--layout", "position:3"]);
        assert_eq!(summary.unwrap().vertices, 8);
    }

    #[test]
    fn test_sphere_stl_binary() {
        let (summary, out) = run_with(&[
            "sphere",
            "--format",
            "stl-binary",
            "--slices",
            "8",
            "--stacks",
            "4",
        ]);
        let summary = summary.unwrap();
        assert_eq!(summary.triangles, 2 * 8 * 3);
        assert_eq!(out.len(), 84 + 50 * summary.triangles);
    }

    #[test]
    fn test_cone_fails_without_recovery() {
        let (summary, out) = run_with(&["cylinder", "--top-radius", "0", "--slices", "6", "--stacks", "1"]);
        assert!(matches!(summary, Err(MeshError::DegenerateTriangle { .. })));
        assert!(out.is_empty());
    }

    #[test]
    fn test_cone_with_removal() {
        let (summary, _) = run_with(&[
            "cylinder",
            "--top-radius",
            "0",
            "--slices",
            "6",
            "--stacks",
            "1",
            "--remove-degenerate",
        ]);
        let summary = summary.unwrap();
        assert_eq!(summary.removed, 12);
        assert_eq!(summary.triangles, 12);
        assert_eq!(summary.fallbacks, 0);
    }

    #[test]
    fn test_cone_with_fallback_normals() {
        let (summary, _) = run_with(&[
            "cylinder",
            "--top-radius",
            "0",
            "--slices",
            "6",
            "--stacks",
            "1",
            "--fallback-normals",
        ]);
        let summary = summary.unwrap();
        assert_eq!(summary.fallbacks, 12);
        assert_eq!(summary.triangles, 24);
    }

    #[test]
    fn test_torus_threejs() {
        let (summary, out) = run_with(&[
            "torus",
            "--format",
            "threejs",
            "--layout",
            "position:3,normal:3",
            "--slices",
            "12",
            "--stacks",
            "6",
        ]);
        let summary = summary.unwrap();
        assert_eq!(summary.vertices, 72);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\"formatVersion\": 3.1"));
        assert!(text.contains("\"generator\": \"wiregrid\""));
    }
}
