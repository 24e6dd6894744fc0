//! Open list kept sorted by descending cost
//!
//! The cheapest vertex sits at the tail so popping it is O(1). Insertion is
//! a linear scan, which is fine for the frontier sizes planar graphs produce.

use crate::types::{EdgeWeight, VertexIndex};
use crate::vertex_info::VertexInfoBuffer;

#[derive(Debug, Default, Clone)]
pub(crate) struct OpenList {
    entries: Vec<VertexIndex>,
}

impl OpenList {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append without sorting (stack order for unweighted traversals)
    #[inline]
    pub(crate) fn push(&mut self, vertex: VertexIndex) {
        self.entries.push(vertex);
    }

    /// Take the tail entry: the cheapest one when the list is sorted
    #[inline]
    pub(crate) fn pop(&mut self) -> Option<VertexIndex> {
        self.entries.pop()
    }

    /// Drop `vertex` if present
    pub(crate) fn remove(&mut self, vertex: VertexIndex) -> bool {
        match self.entries.iter().position(|&v| v == vertex) {
            Some(pos) => {
                self.entries.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Insert `vertex` in front of the first entry that is cheaper than `weight`
    ///
    /// Entries of equal cost stay in front of the new one, so among ties the
    /// most recently inserted vertex is popped first.
    pub(crate) fn insert_sorted(&mut self, vertex: VertexIndex, weight: EdgeWeight, info: &VertexInfoBuffer) {
        match self
            .entries
            .iter()
            .position(|&v| weight > info[v].lowest_weight)
        {
            Some(pos) => self.entries.insert(pos, vertex),
            None => self.entries.push(vertex),
        }
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn as_slice(&self) -> &[VertexIndex] {
        &self.entries
    }
}
