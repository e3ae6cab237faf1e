//! Command line arguments.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use wiregrid_core::mesh::VertexLayout;
use wiregrid_core::ops::DEFAULT_EPSILON;

/// Primitive to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shape {
    Cube,
    Cylinder,
    Sphere,
    Torus,
}

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    /// Text STL.
    #[default]
    StlAscii,
    /// Little-endian binary STL.
    StlBinary,
    /// three.js JSON model, format 3.1.
    #[value(name = "threejs")]
    ThreeJs,
}

fn parse_layout(value: &str) -> Result<VertexLayout, String> {
    let layout: VertexLayout = value.parse().map_err(|e| format!("{e}"))?;
    layout.validate().map_err(|e| format!("{e}"))?;
    Ok(layout)
}

/// wiregrid: generate a primitive, clean it up and write it out.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "wiregrid",
    about = "Generate primitive meshes and export them",
    long_about = "Generate a primitive mesh, optionally clean and compact it, \
        and write it as STL or a three.js JSON model.\n\n\
        PIPELINE:\n\
          generate -> [--remove-degenerate] -> face normals -> [--deflate] -> write\n\n\
        EXAMPLES:\n\
          # Binary STL sphere\n\
          wiregrid sphere --format stl-binary --output sphere.stl\n\
        \n\
          # Compacted cone as a three.js model\n\
          wiregrid cylinder --top-radius 0 --remove-degenerate --deflate --format threejs",
    version
)]
pub struct Args {
    /// Primitive to generate.
    #[arg(value_enum)]
    pub shape: Shape,

    /// Vertex layout as `semantic[:stream]:size` specs separated by commas.
    #[arg(long, default_value = "position:3,normal:3,texcoord:2", value_parser = parse_layout)]
    pub layout: VertexLayout,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::StlAscii)]
    pub format: Format,

    /// Output file. Writes to stdout when omitted.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Geometry scale for the three.js writer.
    #[arg(long, default_value_t = 1.0)]
    pub scale: f32,

    /// Segments around the primary axis.
    #[arg(long, default_value_t = 16)]
    pub slices: usize,

    /// Segments along the primary axis.
    #[arg(long, default_value_t = 8)]
    pub stacks: usize,

    /// Characteristic radius of the shape.
    #[arg(long, default_value_t = 1.0)]
    pub radius: f32,

    /// Cylinder top radius. Defaults to --radius; 0 makes a cone.
    #[arg(long)]
    pub top_radius: Option<f32>,

    /// Merge vertices equal within --epsilon before writing.
    #[arg(long)]
    pub deflate: bool,

    /// Per-float tolerance used by --deflate.
    #[arg(long, default_value_t = DEFAULT_EPSILON)]
    pub epsilon: f64,

    /// Drop zero-area triangles before computing normals.
    #[arg(long)]
    pub remove_degenerate: bool,

    /// Give degenerate triangles a fallback normal instead of failing.
    #[arg(long)]
    pub fallback_normals: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiregrid_core::mesh::VertexSemantic;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["wiregrid", "cube"]).unwrap();
        assert_eq!(args.shape, Shape::Cube);
        assert_eq!(args.format, Format::StlAscii);
        assert_eq!(args.layout.stride(), 8);
        assert!(args.layout.contains(VertexSemantic::TexCoord, 0));
        assert_eq!(args.output, None);
        assert_eq!(args.epsilon, DEFAULT_EPSILON);
        assert!(!args.deflate);
        assert!(!args.fallback_normals);
    }

    #[test]
    fn test_all_options() {
        let args = Args::try_parse_from([
            "wiregrid",
            "cylinder",
            "--layout",
            "position:3,color:4",
            "--format",
            "threejs",
            "-o",
            "out.json",
            "--scale",
            "2",
            "--slices",
            "6",
            "--stacks",
            "3",
            "--top-radius",
            "0",
            "--deflate",
            "--epsilon",
            "1e-4",
            "--remove-degenerate",
            "--fallback-normals",
        ])
        .unwrap();
        assert_eq!(args.shape, Shape::Cylinder);
        assert_eq!(args.format, Format::ThreeJs);
        assert_eq!(args.layout.stride(), 7);
        assert_eq!(args.output, Some(PathBuf::from("out.json")));
        assert_eq!(args.scale, 2.0);
        assert_eq!((args.slices, args.stacks), (6, 3));
        assert_eq!(args.top_radius, Some(0.0));
        assert_eq!(args.epsilon, 1e-4);
        assert!(args.deflate && args.remove_degenerate && args.fallback_normals);
    }

    #[test]
    fn test_stl_binary_format_name() {
        let args = Args::try_parse_from(["wiregrid", "torus", "--format", "stl-binary"]).unwrap();
        assert_eq!(args.format, Format::StlBinary);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(Args::try_parse_from(["wiregrid"]).is_err());
        assert!(Args::try_parse_from(["wiregrid", "cone"]).is_err());
        assert!(Args::try_parse_from(["wiregrid", "cube", "--layout", "normal:3"]).is_err());
        assert!(Args::try_parse_from(["wiregrid", "cube", "--layout", "position:5"]).is_err());
        assert!(Args::try_parse_from(["wiregrid", "cube", "--format", "obj"]).is_err());
    }
}
