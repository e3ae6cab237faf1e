//! Collected warnings from mesh operations.
//!
//! Operations that can recover from bad input (degenerate triangles, fallback
//! normals) take a `&mut Diagnostics` and record what they did. Every recorded
//! event is also forwarded to `log::warn!`.

use std::fmt;

use crate::ops::Degeneracy;

/// A single recorded event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Diagnostic {
    /// A triangle was classified as degenerate.
    DegenerateTriangle {
        /// Index of the triangle in the mesh it was found in.
        triangle_index: usize,
        /// Why it is degenerate.
        kind: Degeneracy,
    },
    /// A degenerate triangle was given a fallback normal.
    FallbackNormal {
        /// Index of the triangle.
        triangle_index: usize,
        /// The normal that was assigned.
        normal: [f32; 3],
    },
    /// A degenerate triangle was dropped from the triangle list.
    RemovedTriangle {
        /// Index of the triangle in the source mesh.
        triangle_index: usize,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateTriangle {
                triangle_index,
                kind,
            } => write!(f, "triangle {triangle_index} is degenerate ({kind})"),
            Self::FallbackNormal {
                triangle_index,
                normal,
            } => write!(
                f,
                "triangle {triangle_index} assigned fallback normal ({}, {}, {})",
                normal[0], normal[1], normal[2]
            ),
            Self::RemovedTriangle { triangle_index } => {
                write!(f, "triangle {triangle_index} removed")
            }
        }
    }
}

/// Ordered list of [`Diagnostic`] events.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    events: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event and log it as a warning.
    pub fn push(&mut self, event: Diagnostic) {
        log::warn!("{}", event);
        self.events.push(event);
    }

    /// All events in recording order.
    pub fn events(&self) -> &[Diagnostic] {
        &self.events
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Triangle indices of all [`Diagnostic::RemovedTriangle`] events.
    pub fn removed_triangles(&self) -> Vec<usize> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Diagnostic::RemovedTriangle { triangle_index } => Some(*triangle_index),
                _ => None,
            })
            .collect()
    }

    /// Number of [`Diagnostic::FallbackNormal`] events.
    pub fn fallback_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, Diagnostic::FallbackNormal { .. }))
            .count()
    }

    /// Drop all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
