//! Per-vertex working state shared by searches and ownership floods
//!
//! The buffer is owned by the caller and lent to each search by `&mut`, so one
//! buffer can never back two concurrent searches. Reuse it serially and call
//! [`VertexInfoBuffer::reset`] between unrelated traversals.

use std::ops::{Index, IndexMut};

use crate::types::{EdgeWeight, TreeIndex, VertexIndex};

/// Search state of a single vertex
///
/// # Lifecycle
///
/// - `owner`: region label, survives partial resets (0 = unowned)
/// - `lowest_weight`: best known cumulative cost from a source (`+∞` = unreached)
/// - `parent`: predecessor on the best known path (`None` = root or unreached)
/// - `closed`: finalized and removed from the open list
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexInfo {
    /// Region label assigned by ownership floods
    pub owner: TreeIndex,
    /// Best known cumulative distance from a source
    pub lowest_weight: EdgeWeight,
    /// Predecessor on the best known path
    pub parent: Option<VertexIndex>,
    /// Whether the vertex has been finalized
    pub closed: bool,
}

impl Default for VertexInfo {
    fn default() -> Self {
        Self {
            owner: 0,
            lowest_weight: EdgeWeight::INFINITY,
            parent: None,
            closed: false,
        }
    }
}

impl VertexInfo {
    /// Fresh, unowned, unreached state
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset search state, optionally also dropping the owner label
    pub fn clear(&mut self, clear_owner: bool) {
        self.lowest_weight = EdgeWeight::INFINITY;
        self.parent = None;
        self.closed = false;
        if clear_owner {
            self.owner = 0;
        }
    }

    /// True once a search has assigned a finite cost
    #[inline]
    pub fn is_reached(&self) -> bool {
        self.lowest_weight.is_finite()
    }
}

/// Caller-owned arena of [`VertexInfo`], one entry per graph vertex
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexInfoBuffer {
    infos: Vec<VertexInfo>,
}

impl VertexInfoBuffer {
    /// Allocate fresh state for `vertex_count` vertices
    pub fn new(vertex_count: usize) -> Self {
        Self {
            infos: vec![VertexInfo::new(); vertex_count],
        }
    }

    /// Number of entries
    #[inline]
    pub fn len(&self) -> usize {
        self.infos.len()
    }

    /// True if the buffer holds no entries
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.infos.is_empty()
    }

    /// Grow or shrink to `vertex_count` entries; new entries are fresh
    pub fn resize(&mut self, vertex_count: usize) {
        self.infos.resize(vertex_count, VertexInfo::new());
    }

    /// Reset every entry (see [`VertexInfo::clear`])
    pub fn reset(&mut self, clear_owner: bool) {
        for info in &mut self.infos {
            info.clear(clear_owner);
        }
    }

    /// Owner label of `index`, or `None` if out of range
    pub fn owner(&self, index: VertexIndex) -> Option<TreeIndex> {
        self.infos.get(index).map(|info| info.owner)
    }

    /// Set the owner label of `index`; out-of-range indices are ignored
    pub fn set_owner(&mut self, index: VertexIndex, owner: TreeIndex) {
        if let Some(info) = self.infos.get_mut(index) {
            info.owner = owner;
        }
    }

    /// Entry for `index`, if in range
    #[inline]
    pub fn get(&self, index: VertexIndex) -> Option<&VertexInfo> {
        self.infos.get(index)
    }

    /// Mutable entry for `index`, if in range
    #[inline]
    pub fn get_mut(&mut self, index: VertexIndex) -> Option<&mut VertexInfo> {
        self.infos.get_mut(index)
    }

    /// All entries
    #[inline]
    pub fn as_slice(&self) -> &[VertexInfo] {
        &self.infos
    }

    /// Iterate entries in vertex order
    pub fn iter(&self) -> std::slice::Iter<'_, VertexInfo> {
        self.infos.iter()
    }
}

impl Index<VertexIndex> for VertexInfoBuffer {
    type Output = VertexInfo;

    #[inline]
    fn index(&self, index: VertexIndex) -> &VertexInfo {
        &self.infos[index]
    }
}

impl IndexMut<VertexIndex> for VertexInfoBuffer {
    #[inline]
    fn index_mut(&mut self, index: VertexIndex) -> &mut VertexInfo {
        &mut self.infos[index]
    }
}
