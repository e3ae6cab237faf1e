//! Vertex compaction ("deflate").
//!
//! Vertices whose records are equal within a tolerance across every layout
//! component are collapsed into one, and triangle indices are rewritten
//! through the resulting remap table.
//!
//! The tolerance comparison is evaluated in `f64`:
//!
//! - `a + ε < b` orders `a` before `b`
//! - `a > b + ε` orders `a` after `b`
//! - otherwise the two floats compare equal and the next float decides
//!
//! This relation is not transitive: with `ε = 1e-8` the values `0`, `9e-9`
//! and `1.8e-8` form a chain where neighbours are equal but the ends are not.
//! Compaction compares each sorted key against the last *unique* key, so such
//! a chain splits into two vertices rather than one.

use std::cmp::Ordering;

use crate::error::{MeshError, Result};
use crate::mesh::{Mesh, Triangle};
use crate::{profile_function, profile_plot, profile_scope};

/// Default absolute tolerance per float comparison.
pub const DEFAULT_EPSILON: f64 = 1e-8;

const UNASSIGNED: usize = usize::MAX;

/// Compaction options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeflateOptions {
    /// Absolute tolerance applied to each float of a vertex record.
    pub epsilon: f64,
}

impl Default for DeflateOptions {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl DeflateOptions {
    /// Set the comparison tolerance.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Check that the tolerance is finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(MeshError::invalid_param(
                "epsilon",
                self.epsilon,
                "must be finite and non-negative",
            ));
        }
        Ok(())
    }
}

/// Compare two floats with an absolute tolerance.
///
/// NaN compares equal to everything.
pub fn compare_with_tolerance(a: f32, b: f32, epsilon: f64) -> Ordering {
    let (a, b) = (f64::from(a), f64::from(b));
    if a + epsilon < b {
        Ordering::Less
    } else if a > b + epsilon {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

// ============================================================================
// VertexKey
// ============================================================================

/// A borrowed view of one vertex record, ordered by tolerance comparison.
#[derive(Debug, Clone, Copy)]
pub struct VertexKey<'a> {
    index: usize,
    record: &'a [f32],
}

impl<'a> VertexKey<'a> {
    /// Key for vertex `index` of `mesh`.
    pub fn new(mesh: &'a Mesh, index: usize) -> Result<Self> {
        Ok(Self {
            index,
            record: mesh.vertex_record(index)?,
        })
    }

    /// Source vertex index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The full vertex record in layout order.
    pub fn record(&self) -> &'a [f32] {
        self.record
    }

    /// Lexicographic comparison of the two records, float by float.
    pub fn compare(&self, other: &VertexKey<'_>, epsilon: f64) -> Ordering {
        self.record
            .iter()
            .zip(other.record)
            .map(|(&a, &b)| compare_with_tolerance(a, b, epsilon))
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| self.record.len().cmp(&other.record.len()))
    }

    /// Whether every float of both records is equal within `epsilon`.
    pub fn approx_eq(&self, other: &VertexKey<'_>, epsilon: f64) -> bool {
        self.compare(other, epsilon) == Ordering::Equal
    }
}

// ============================================================================
// SortedKeyIndex
// ============================================================================

/// Keys for every vertex of a mesh, sorted by [`VertexKey::compare`].
///
/// The sort is stable: keys that compare equal keep their source order.
#[derive(Debug, Clone)]
pub struct SortedKeyIndex<'a> {
    keys: Vec<VertexKey<'a>>,
    epsilon: f64,
}

impl<'a> SortedKeyIndex<'a> {
    /// Build and sort keys for all vertices of `mesh`.
    pub fn new(mesh: &'a Mesh, epsilon: f64) -> Result<Self> {
        Self::from_records(mesh.vertex_buffer(), mesh.stride(), epsilon)
    }

    /// Build and sort keys over a flat buffer of `stride`-float records.
    pub fn from_records(buffer: &'a [f32], stride: usize, epsilon: f64) -> Result<Self> {
        profile_scope!("sort_vertex_keys");
        if stride == 0 || buffer.len() % stride != 0 {
            return Err(MeshError::CorruptBuffer {
                len: buffer.len(),
                stride,
            });
        }
        let mut keys: Vec<VertexKey<'a>> = buffer
            .chunks_exact(stride)
            .enumerate()
            .map(|(index, record)| VertexKey { index, record })
            .collect();
        stable_sort_by(&mut keys, |a, b| a.compare(b, epsilon));
        Ok(Self { keys, epsilon })
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> &[VertexKey<'a>] {
        &self.keys
    }

    /// Tolerance the keys were sorted with.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether there are no keys.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Bottom-up merge sort.
///
/// The tolerance comparator is not a total order, and `slice::sort_by` may
/// panic when handed one, so keys are sorted here instead.
fn stable_sort_by<T: Copy, F: Fn(&T, &T) -> Ordering>(items: &mut Vec<T>, compare: F) {
    let len = items.len();
    if len < 2 {
        return;
    }
    let mut scratch = items.clone();
    let mut width = 1;
    while width < len {
        let mut start = 0;
        while start < len {
            let mid = (start + width).min(len);
            let end = (start + 2 * width).min(len);
            merge(&items[start..mid], &items[mid..end], &mut scratch[start..end], &compare);
            start = end;
        }
        std::mem::swap(items, &mut scratch);
        width *= 2;
    }
}

fn merge<T: Copy, F: Fn(&T, &T) -> Ordering>(left: &[T], right: &[T], out: &mut [T], compare: &F) {
    let (mut i, mut j) = (0, 0);
    for slot in out.iter_mut() {
        // Right only wins on strict less, which keeps the sort stable.
        let take_right = j < right.len()
            && (i >= left.len() || compare(&right[j], &left[i]) == Ordering::Less);
        if take_right {
            *slot = right[j];
            j += 1;
        } else {
            *slot = left[i];
            i += 1;
        }
    }
}

// ============================================================================
// Deflate
// ============================================================================

/// Remove duplicate vertices using [`DeflateOptions::default`].
///
/// Returns the compacted mesh and `remap`, where `remap[i]` is the compacted
/// index of source vertex `i`.
pub fn deflate(mesh: &Mesh) -> Result<(Mesh, Vec<usize>)> {
    deflate_with(mesh, &DeflateOptions::default())
}

/// Remove duplicate vertices with explicit options.
///
/// The compacted mesh shares the source layout, owns a new vertex buffer and
/// keeps the same number of triangles in the same order. Unique vertices are
/// numbered in sorted key order, and each takes the record of the first source
/// vertex of its class.
pub fn deflate_with(mesh: &Mesh, options: &DeflateOptions) -> Result<(Mesh, Vec<usize>)> {
    profile_function!();
    let (buffer, remap) = deflate_records(mesh.vertex_buffer(), mesh.stride(), options)?;
    let triangles = remap_triangles(mesh.triangles(), &remap)?;
    let compacted = Mesh::from_parts(mesh.layout().clone(), buffer, triangles)?;

    log::debug!(
        "Deflated mesh: {} -> {} vertices",
        mesh.num_vertices(),
        compacted.num_vertices()
    );
    profile_plot!("deflate_vertices", compacted.num_vertices());
    Ok((compacted, remap))
}

/// Compact a flat buffer of `stride`-float records.
///
/// Returns the unique records and the remap table, with the same semantics
/// as [`deflate_with`]. Used for attribute streams that are not a full mesh.
pub fn deflate_records(
    buffer: &[f32],
    stride: usize,
    options: &DeflateOptions,
) -> Result<(Vec<f32>, Vec<usize>)> {
    options.validate()?;

    let index = SortedKeyIndex::from_records(buffer, stride, options.epsilon)?;
    let mut remap = vec![UNASSIGNED; index.len()];
    let mut unique = Vec::with_capacity(buffer.len());
    let mut last_unique: Option<VertexKey<'_>> = None;
    let mut unique_count = 0;

    for key in index.keys() {
        let is_new = match &last_unique {
            Some(last) => !key.approx_eq(last, options.epsilon),
            None => true,
        };
        if is_new {
            unique.extend_from_slice(key.record());
            unique_count += 1;
            last_unique = Some(*key);
        }
        remap[key.index()] = unique_count - 1;
    }

    if let Some(vertex_index) = remap.iter().position(|&slot| slot == UNASSIGNED) {
        return Err(MeshError::RemapIncomplete { vertex_index });
    }
    Ok((unique, remap))
}

/// Pass every triangle's vertex indices through `remap`.
pub(crate) fn remap_triangles(triangles: &[Triangle], remap: &[usize]) -> Result<Vec<Triangle>> {
    triangles
        .iter()
        .map(|triangle| {
            let mut out = *triangle;
            for slot in out.vertex_indices.iter_mut() {
                *slot = *remap
                    .get(*slot)
                    .ok_or_else(|| MeshError::vertex_out_of_range(*slot, remap.len()))?;
            }
            Ok(out)
        })
        .collect()
}
