//! Vertex layout definitions for meshes.
//!
//! A vertex layout describes one vertex record inside a flat `f32` buffer.
//! Each [`VertexComponent`] is identified by a `(semantic, stream_index)` pair
//! and occupies `size` contiguous floats starting at `offset`.
//!
//! Offsets are assigned by the layout in insertion order: a new component's
//! offset is the stride before it was added. Writers rely on this to slice
//! attributes out of the buffer, so the byte layout is fully determined by
//! the order of [`VertexLayout::add`] calls.
//!
//! Layouts are shared via `Arc` once a mesh is built against them, which
//! makes them immutable for the lifetime of that mesh.
//!
//! # Example
//!
//! ```
//! use wiregrid_core::mesh::{VertexLayout, VertexSemantic};
//!
//! let layout = VertexLayout::new()
//!     .with_component(VertexSemantic::Position, 0, 3)?
//!     .with_component(VertexSemantic::Normal, 0, 3)?
//!     .with_component(VertexSemantic::TexCoord, 0, 2)?;
//!
//! assert_eq!(layout.stride(), 8);
//! assert_eq!(layout.get(VertexSemantic::TexCoord, 0)?.offset(), 6);
//! layout.validate()?;
//! # Ok::<(), wiregrid_core::error::MeshError>(())
//! ```

use std::fmt;
use std::ops::Range;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{MeshError, Result};

/// Highest valid stream index.
pub const MAX_STREAM_INDEX: u32 = 8;

/// Largest number of floats in one component.
pub const MAX_COMPONENT_SIZE: usize = 4;

/// Semantic meaning of a vertex component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexSemantic {
    /// Vertex position.
    Position,
    /// Texture coordinates.
    TexCoord,
    /// Vertex normal.
    Normal,
    /// Vertex tangent.
    Tangent,
    /// Vertex binormal (bitangent).
    Binormal,
    /// Vertex color.
    Color,
    /// Skinning weights.
    Weights,
    /// Skinning indices.
    Indices,
    /// Application-defined data.
    Custom,
}

impl VertexSemantic {
    /// Every semantic, in canonical order.
    pub const ALL: [Self; 9] = [
        Self::Position,
        Self::TexCoord,
        Self::Normal,
        Self::Tangent,
        Self::Binormal,
        Self::Color,
        Self::Weights,
        Self::Indices,
        Self::Custom,
    ];

    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Position => "position",
            Self::TexCoord => "texcoord",
            Self::Normal => "normal",
            Self::Tangent => "tangent",
            Self::Binormal => "binormal",
            Self::Color => "color",
            Self::Weights => "weights",
            Self::Indices => "indices",
            Self::Custom => "custom",
        }
    }

    /// Look up a semantic by its canonical name.
    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|semantic| semantic.name() == name)
            .ok_or_else(|| MeshError::InvalidComponent {
                name: name.to_string(),
                reason: "unknown semantic",
            })
    }
}

impl fmt::Display for VertexSemantic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single named, sized field within a vertex record.
///
/// The offset is owned by the layout: components start at offset 0 and are
/// placed by [`VertexLayout::add`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VertexComponent {
    semantic: VertexSemantic,
    stream_index: u32,
    size: usize,
    offset: usize,
}

impl VertexComponent {
    /// Create a new, unplaced vertex component.
    ///
    /// The component is validated when it is added to a layout.
    pub fn new(semantic: VertexSemantic, stream_index: u32, size: usize) -> Self {
        Self {
            semantic,
            stream_index,
            size,
            offset: 0,
        }
    }

    /// Semantic of this component.
    pub fn semantic(&self) -> VertexSemantic {
        self.semantic
    }

    /// Stream index disambiguating components with the same semantic.
    pub fn stream_index(&self) -> u32 {
        self.stream_index
    }

    /// Number of floats.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Float offset within one vertex record.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Float range within one vertex record.
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.size
    }

    /// The `(semantic, stream_index)` key identifying this component.
    pub fn key(&self) -> (VertexSemantic, u32) {
        (self.semantic, self.stream_index)
    }

    /// Check stream index and size bounds.
    pub fn validate(&self) -> Result<()> {
        if self.stream_index > MAX_STREAM_INDEX {
            return Err(MeshError::InvalidComponent {
                name: self.semantic.name().to_string(),
                reason: "stream index must be between 0 and 8",
            });
        }
        if self.size == 0 || self.size > MAX_COMPONENT_SIZE {
            return Err(MeshError::InvalidComponent {
                name: self.semantic.name().to_string(),
                reason: "component size must be between 1 and 4",
            });
        }
        Ok(())
    }
}

/// Parses `semantic:size` or `semantic:stream:size`, e.g. `texcoord:1:2`.
impl FromStr for VertexComponent {
    type Err = MeshError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason| MeshError::InvalidComponent {
            name: s.to_string(),
            reason,
        };
        let parts: Vec<&str> = s.trim().split(':').collect();
        let (name, stream, size) = match parts.as_slice() {
            [name, size] => (*name, "0", *size),
            [name, stream, size] => (*name, *stream, *size),
            _ => return Err(invalid("expected semantic:size or semantic:stream:size")),
        };
        let semantic = VertexSemantic::from_name(name)?;
        let stream_index = stream
            .parse::<u32>()
            .map_err(|_| invalid("stream index is not a number"))?;
        let size = size
            .parse::<usize>()
            .map_err(|_| invalid("size is not a number"))?;
        let component = Self::new(semantic, stream_index, size);
        component.validate()?;
        Ok(component)
    }
}

/// Ordered schema of vertex components.
///
/// The stride is maintained incrementally as components are added and always
/// equals the sum of all component sizes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct VertexLayout {
    components: Vec<VertexComponent>,
    stride: usize,
    label: Option<String>,
}

impl VertexLayout {
    /// Create a new empty vertex layout.
    pub fn new() -> Self {
        Self {
            components: Vec::new(),
            stride: 0,
            label: None,
        }
    }

    /// Add a component, placing it at the current stride.
    pub fn add(&mut self, mut component: VertexComponent) -> Result<()> {
        component.validate()?;
        if self.contains(component.semantic, component.stream_index) {
            return Err(MeshError::DuplicateComponent {
                semantic: component.semantic,
                stream_index: component.stream_index,
            });
        }
        component.offset = self.stride;
        self.stride += component.size;
        self.components.push(component);
        Ok(())
    }

    /// Builder form of [`add`](Self::add).
    pub fn with_component(
        mut self,
        semantic: VertexSemantic,
        stream_index: u32,
        size: usize,
    ) -> Result<Self> {
        self.add(VertexComponent::new(semantic, stream_index, size))?;
        Ok(self)
    }

    /// Set a debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Debug label, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Total float count of one vertex record.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the layout has no components.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Components in insertion order.
    pub fn components(&self) -> &[VertexComponent] {
        &self.components
    }

    /// Check if a component with this semantic and stream index exists.
    pub fn contains(&self, semantic: VertexSemantic, stream_index: u32) -> bool {
        self.find(semantic, stream_index).is_some()
    }

    /// Get a component, or `None` if absent.
    pub fn find(&self, semantic: VertexSemantic, stream_index: u32) -> Option<&VertexComponent> {
        self.components
            .iter()
            .find(|c| c.semantic == semantic && c.stream_index == stream_index)
    }

    /// Get a component.
    pub fn get(&self, semantic: VertexSemantic, stream_index: u32) -> Result<&VertexComponent> {
        self.find(semantic, stream_index)
            .ok_or(MeshError::ComponentNotFound {
                semantic,
                stream_index,
            })
    }

    /// Validate the layout: `(position, 0)` must exist and the component
    /// sizes must add up to the stride.
    pub fn validate(&self) -> Result<()> {
        if !self.contains(VertexSemantic::Position, 0) {
            return Err(MeshError::MissingPosition);
        }
        let summed: usize = self.components.iter().map(|c| c.size).sum();
        if summed != self.stride {
            return Err(MeshError::SizeMismatch {
                summed,
                stride: self.stride,
            });
        }
        Ok(())
    }

    /// Append a component known to be valid and unique.
    fn push(mut self, semantic: VertexSemantic, size: usize) -> Self {
        self.components.push(VertexComponent {
            semantic,
            stream_index: 0,
            size,
            offset: self.stride,
        });
        self.stride += size;
        self
    }
}

/// Parses a comma-separated list of component specs, e.g.
/// `position:3,normal:3,texcoord:0:2`.
impl FromStr for VertexLayout {
    type Err = MeshError;

    fn from_str(s: &str) -> Result<Self> {
        let mut layout = Self::new();
        for spec in s.split(',').filter(|spec| !spec.trim().is_empty()) {
            layout.add(spec.parse()?)?;
        }
        Ok(layout)
    }
}

// ============================================================================
// Common Layouts
// ============================================================================

impl VertexLayout {
    /// Position-only layout (3 floats per vertex).
    pub fn position_only() -> Arc<Self> {
        Arc::new(
            Self::new()
                .push(VertexSemantic::Position, 3)
                .with_label("position_only"),
        )
    }

    /// Position + normal layout (6 floats per vertex).
    pub fn position_normal() -> Arc<Self> {
        Arc::new(
            Self::new()
                .push(VertexSemantic::Position, 3)
                .push(VertexSemantic::Normal, 3)
                .with_label("position_normal"),
        )
    }

    /// Position + normal + texcoord layout (8 floats per vertex).
    pub fn position_normal_uv() -> Arc<Self> {
        Arc::new(
            Self::new()
                .push(VertexSemantic::Position, 3)
                .push(VertexSemantic::Normal, 3)
                .push(VertexSemantic::TexCoord, 2)
                .with_label("position_normal_uv"),
        )
    }
}
