//! CPU-side geometry data structures.
//!
//! This module provides:
//! - [`BufferAttribute`] - Per-vertex attribute data (fixed-size float tuples)
//! - [`IndexFormat`] - Index data format (u16 or u32)
//! - [`IndexData`] - Owned index storage in either format
//! - [`Geometry`] - Named attribute set plus an optional index

use std::collections::HashMap;

/// Name of the position attribute, the one attribute the topology
/// converter requires for index synthesis and width selection.
pub const POSITION: &str = "position";

/// Per-vertex attribute data.
///
/// Stores a flat `f32` payload interpreted as rows of `item_size`
/// components, e.g. `item_size = 3` for positions. Rows are the unit
/// that index values refer to.
#[derive(Debug, Clone, PartialEq)]
pub struct BufferAttribute {
    data: Vec<f32>,
    item_size: usize,
}

impl BufferAttribute {
    /// Create an attribute from flat component data.
    ///
    /// `data.len()` must be a multiple of `item_size`; the remainder
    /// is truncated if it is not.
    pub fn new(mut data: Vec<f32>, item_size: usize) -> Self {
        debug_assert!(item_size > 0);
        let rem = data.len() % item_size;
        if rem != 0 {
            data.truncate(data.len() - rem);
        }
        Self { data, item_size }
    }

    /// Number of components per row.
    #[inline]
    pub fn item_size(&self) -> usize {
        self.item_size
    }

    /// Number of rows.
    #[inline]
    pub fn count(&self) -> usize {
        self.data.len() / self.item_size
    }

    /// Component `k` of row `row`.
    #[inline]
    pub fn component(&self, row: usize, k: usize) -> f32 {
        self.data[row * self.item_size + k]
    }

    /// First component of row `row`.
    #[inline]
    pub fn x(&self, row: usize) -> f32 {
        self.component(row, 0)
    }

    /// Flat component data.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Attribute data as bytes, for upload paths.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }
}

/// Index format for indexed drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IndexFormat {
    /// 16-bit unsigned integers (max 65535 vertices).
    #[default]
    Uint16,
    /// 32-bit unsigned integers (max ~4 billion vertices).
    Uint32,
}

impl IndexFormat {
    /// Get the size in bytes of each index.
    pub fn size(&self) -> usize {
        match self {
            Self::Uint16 => 2,
            Self::Uint32 => 4,
        }
    }
}

/// Owned index storage.
///
/// The element width is a storage-size choice, not a semantic one:
/// [`IndexData::from_values`] picks 32-bit storage only when the
/// referenced vertex count exceeds `u16::MAX`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexData {
    /// 16-bit indices.
    U16(Vec<u16>),
    /// 32-bit indices.
    U32(Vec<u32>),
}

impl IndexData {
    /// Build index storage from plain values, choosing the element
    /// width from the vertex count the values refer to.
    pub fn from_values(values: &[u32], vertex_count: usize) -> Self {
        if vertex_count > u16::MAX as usize {
            Self::U32(values.to_vec())
        } else {
            Self::U16(values.iter().map(|&v| v as u16).collect())
        }
    }

    /// Number of index elements.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Self::U16(v) => v.len(),
            Self::U32(v) => v.len(),
        }
    }

    /// Whether the index is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index element `i`, widened to u32.
    #[inline]
    pub fn get(&self, i: usize) -> u32 {
        match self {
            Self::U16(v) => v[i] as u32,
            Self::U32(v) => v[i],
        }
    }

    /// Storage format of the elements.
    pub fn format(&self) -> IndexFormat {
        match self {
            Self::U16(_) => IndexFormat::Uint16,
            Self::U32(_) => IndexFormat::Uint32,
        }
    }

    /// All elements widened to u32.
    pub fn to_u32_vec(&self) -> Vec<u32> {
        match self {
            Self::U16(v) => v.iter().map(|&i| i as u32).collect(),
            Self::U32(v) => v.clone(),
        }
    }

    /// Index data as bytes, for upload paths.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::U16(v) => bytemuck::cast_slice(v),
            Self::U32(v) => bytemuck::cast_slice(v),
        }
    }
}

/// A CPU-side geometry: a named set of per-vertex attributes plus an
/// optional index.
///
/// Invariant: when an index is present, every element is a valid row
/// offset into every attribute. The topology converter relies on this
/// but does not re-check it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geometry {
    attributes: HashMap<String, BufferAttribute>,
    index: Option<IndexData>,
}

impl Geometry {
    /// Create an empty geometry with no attributes and no index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an attribute under `name`, replacing any existing one.
    pub fn set_attribute(&mut self, name: impl Into<String>, attribute: BufferAttribute) {
        self.attributes.insert(name.into(), attribute);
    }

    /// Builder-style variant of [`set_attribute`](Self::set_attribute).
    pub fn with_attribute(mut self, name: impl Into<String>, attribute: BufferAttribute) -> Self {
        self.set_attribute(name, attribute);
        self
    }

    /// Look up an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&BufferAttribute> {
        self.attributes.get(name)
    }

    /// The `position` attribute, if present.
    pub fn position(&self) -> Option<&BufferAttribute> {
        self.attribute(POSITION)
    }

    /// Names of all attached attributes (unordered).
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(|s| s.as_str())
    }

    /// The attached index, if any.
    pub fn index(&self) -> Option<&IndexData> {
        self.index.as_ref()
    }

    /// Attach an index, replacing any existing one.
    pub fn set_index(&mut self, index: IndexData) {
        self.index = Some(index);
    }

    /// Builder-style variant of [`set_index`](Self::set_index).
    pub fn with_index(mut self, index: IndexData) -> Self {
        self.set_index(index);
        self
    }

    /// Detach and return the index.
    pub fn remove_index(&mut self) -> Option<IndexData> {
        self.index.take()
    }

    /// Whether this geometry uses indexed drawing.
    pub fn is_indexed(&self) -> bool {
        self.index.is_some()
    }
}
