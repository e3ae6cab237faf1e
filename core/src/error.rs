//! Error types for wiregrid.
//!
//! Every fallible operation in the crate returns [`Result`]. None of these
//! conditions are fatal to the process; callers decide how to recover.

use std::fmt;

use thiserror::Error;

use crate::mesh::VertexSemantic;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// What kind of index an [`MeshError::IndexOutOfRange`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    /// A vertex index.
    Vertex,
    /// A triangle index.
    Triangle,
    /// A float offset inside one vertex record.
    Component,
    /// A material slot of a model.
    Material,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex => write!(f, "vertex"),
            Self::Triangle => write!(f, "triangle"),
            Self::Component => write!(f, "component offset"),
            Self::Material => write!(f, "material"),
        }
    }
}

/// Errors that can occur while building or transforming meshes.
#[derive(Error, Debug)]
pub enum MeshError {
    /// A vertex component has an unknown semantic, a stream index outside
    /// `[0, 8]`, or a size outside `[1, 4]`.
    #[error("invalid vertex component {name}: {reason}")]
    InvalidComponent {
        /// Semantic name as given by the caller.
        name: String,
        /// Why the component was rejected.
        reason: &'static str,
    },

    /// The layout already contains a component with this semantic and stream index.
    #[error("vertex component ({semantic}, {stream_index}) already exists")]
    DuplicateComponent {
        /// Semantic of the rejected component.
        semantic: VertexSemantic,
        /// Stream index of the rejected component.
        stream_index: u32,
    },

    /// The layout has no `(position, 0)` component.
    #[error("vertex layout must contain a position with stream index 0")]
    MissingPosition,

    /// Summed component sizes disagree with the layout stride.
    #[error("vertex component sizes add up to {summed}, but stride is {stride}")]
    SizeMismatch {
        /// Sum of all component sizes.
        summed: usize,
        /// Stride recorded by the layout.
        stride: usize,
    },

    /// A mesh was built against a layout that failed validation.
    #[error("invalid vertex layout: {0}")]
    InvalidLayout(#[source] Box<MeshError>),

    /// A vertex, triangle or component offset is out of bounds.
    #[error("{kind} index {index} out of range (len {len})")]
    IndexOutOfRange {
        /// What was being indexed.
        kind: IndexKind,
        /// The offending index.
        index: usize,
        /// Number of valid entries.
        len: usize,
    },

    /// The layout does not contain the requested component.
    #[error("vertex component ({semantic}, {stream_index}) not found in layout")]
    ComponentNotFound {
        /// Requested semantic.
        semantic: VertexSemantic,
        /// Requested stream index.
        stream_index: u32,
    },

    /// More values were supplied than the component can hold.
    #[error("component holds {expected} floats, got {actual}")]
    ValueCountMismatch {
        /// Component size.
        expected: usize,
        /// Number of supplied values.
        actual: usize,
    },

    /// A raw vertex buffer is not a whole number of vertex records.
    #[error("vertex buffer of {len} floats is not a multiple of stride {stride}")]
    CorruptBuffer {
        /// Buffer length in floats.
        len: usize,
        /// Layout stride in floats.
        stride: usize,
    },

    /// A triangle has zero area.
    #[error("triangle {triangle_index} is degenerate")]
    DegenerateTriangle {
        /// Index of the triangle in the mesh.
        triangle_index: usize,
    },

    /// Compaction left a source vertex without a destination.
    #[error("remap slot for vertex {vertex_index} was never assigned")]
    RemapIncomplete {
        /// Source vertex index with no mapping.
        vertex_index: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },

    /// I/O error while writing an export format.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MeshError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        MeshError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }

    pub(crate) fn vertex_out_of_range(index: usize, len: usize) -> Self {
        MeshError::IndexOutOfRange {
            kind: IndexKind::Vertex,
            index,
            len,
        }
    }
}
