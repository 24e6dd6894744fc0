//! Shared graph vocabulary: index aliases, edge forms and the sparse weight table

use std::collections::{BTreeMap, BTreeSet};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Index of a vertex in a [`Graph`](crate::Graph)'s parallel arrays
pub type VertexIndex = usize;

/// Region label assigned by ownership floods (0 = unowned)
pub type TreeIndex = usize;

/// Weight of a single edge
pub type EdgeWeight = f32;

/// Adjacent vertices of one vertex
///
/// Ordered so that traversal order, and with it every tie-break, is deterministic.
pub type NeighbourSet = BTreeSet<VertexIndex>;

/// One [`NeighbourSet`] per vertex
pub type NeighbourList = Vec<NeighbourSet>;

/// Ordered vertex sequence describing a path
pub type GraphPath = Vec<VertexIndex>;

/// Unordered collection of vertices (reachable sets, boundary lists)
pub type VertexIndexList = Vec<VertexIndex>;

/// An undirected edge in linear list form
///
/// Used for MST output, active edge subsets and intra-region edge sets.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedEdge {
    /// Edge weight
    pub weight: EdgeWeight,
    /// First endpoint
    pub a: VertexIndex,
    /// Second endpoint
    pub b: VertexIndex,
}

impl WeightedEdge {
    /// Create a new edge
    pub fn new(weight: EdgeWeight, a: VertexIndex, b: VertexIndex) -> Self {
        Self { weight, a, b }
    }

    /// Endpoints as `(lower, higher)`
    #[inline]
    pub fn canonical(&self) -> (VertexIndex, VertexIndex) {
        canonical_pair(self.a, self.b)
    }

    /// The endpoint opposite `v`, if `v` is an endpoint at all
    pub fn other(&self, v: VertexIndex) -> Option<VertexIndex> {
        if v == self.a {
            Some(self.b)
        } else if v == self.b {
            Some(self.a)
        } else {
            None
        }
    }
}

/// Order two indices as `(min, max)`
#[inline]
pub fn canonical_pair(a: VertexIndex, b: VertexIndex) -> (VertexIndex, VertexIndex) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Sparse edge weight table
///
/// Every weight lives under `(min(a, b), max(a, b))`. [`EdgeWeights::insert`]
/// and [`EdgeWeights::get`] canonicalize their arguments; [`EdgeWeights::get_exact`]
/// does not, which makes the storage order observable.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeWeights {
    map: BTreeMap<VertexIndex, BTreeMap<VertexIndex, EdgeWeight>>,
}

impl EdgeWeights {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the weight of edge `(a, b)`, returning the previous value
    pub fn insert(&mut self, a: VertexIndex, b: VertexIndex, weight: EdgeWeight) -> Option<EdgeWeight> {
        let (lower, higher) = canonical_pair(a, b);
        self.map.entry(lower).or_default().insert(higher, weight)
    }

    /// Weight of edge `(a, b)` in either argument order
    #[inline]
    pub fn get(&self, a: VertexIndex, b: VertexIndex) -> Option<EdgeWeight> {
        let (lower, higher) = canonical_pair(a, b);
        self.get_exact(lower, higher)
    }

    /// Weight stored under exactly `(lower, higher)`
    pub fn get_exact(&self, lower: VertexIndex, higher: VertexIndex) -> Option<EdgeWeight> {
        self.map.get(&lower).and_then(|row| row.get(&higher)).copied()
    }

    /// Remove edge `(a, b)`, returning its weight
    pub fn remove(&mut self, a: VertexIndex, b: VertexIndex) -> Option<EdgeWeight> {
        let (lower, higher) = canonical_pair(a, b);
        let row = self.map.get_mut(&lower)?;
        let removed = row.remove(&higher);
        if row.is_empty() {
            self.map.remove(&lower);
        }
        removed
    }

    /// Number of stored edges
    pub fn len(&self) -> usize {
        self.map.values().map(BTreeMap::len).sum()
    }

    /// True if no weights are stored
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Remove all weights
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// All stored edges in canonical `(lower, higher)` order
    pub fn iter(&self) -> impl Iterator<Item = WeightedEdge> + '_ {
        self.map.iter().flat_map(|(&lower, row)| {
            row.iter()
                .map(move |(&higher, &weight)| WeightedEdge::new(weight, lower, higher))
        })
    }

    /// Rewrite every index through `remap`, dropping edges mapped to `None`
    pub(crate) fn remap<F>(&mut self, mut remap: F)
    where
        F: FnMut(VertexIndex) -> Option<VertexIndex>,
    {
        let old = std::mem::take(&mut self.map);
        for (lower, row) in old {
            for (higher, weight) in row {
                if let (Some(a), Some(b)) = (remap(lower), remap(higher)) {
                    self.insert(a, b, weight);
                }
            }
        }
    }
}

impl FromIterator<WeightedEdge> for EdgeWeights {
    fn from_iter<I: IntoIterator<Item = WeightedEdge>>(iter: I) -> Self {
        let mut weights = EdgeWeights::new();
        for edge in iter {
            weights.insert(edge.a, edge.b, edge.weight);
        }
        weights
    }
}

/// Build symmetric adjacency sets for `vertex_count` vertices from a linear edge list
///
/// Edges referencing vertices outside the range are skipped.
pub fn neighbours_from_edges(vertex_count: usize, edges: &[WeightedEdge]) -> NeighbourList {
    let mut neighbours = vec![NeighbourSet::new(); vertex_count];
    for edge in edges {
        if edge.a < vertex_count && edge.b < vertex_count && edge.a != edge.b {
            neighbours[edge.a].insert(edge.b);
            neighbours[edge.b].insert(edge.a);
        }
    }
    neighbours
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_stored_canonically() {
        let mut weights = EdgeWeights::new();
        weights.insert(7, 2, 1.5);

        assert_eq!(weights.get(2, 7), Some(1.5));
        assert_eq!(weights.get(7, 2), Some(1.5));
        assert_eq!(weights.get_exact(2, 7), Some(1.5));
        // Reverse order is never written
        assert_eq!(weights.get_exact(7, 2), None);
        assert_eq!(weights.len(), 1);
    }

    #[test]
    fn test_weights_overwrite_and_remove() {
        let mut weights = EdgeWeights::new();
        assert_eq!(weights.insert(1, 3, 2.0), None);
        assert_eq!(weights.insert(3, 1, 4.0), Some(2.0));
        assert_eq!(weights.remove(3, 1), Some(4.0));
        assert!(weights.is_empty());
        assert_eq!(weights.remove(3, 1), None);
    }

    #[test]
    fn test_weights_iter_is_canonical() {
        let weights: EdgeWeights = vec![
            WeightedEdge::new(1.0, 4, 0),
            WeightedEdge::new(2.0, 1, 2),
            WeightedEdge::new(3.0, 3, 1),
        ]
        .into_iter()
        .collect();

        let edges: Vec<_> = weights.iter().collect();
        assert_eq!(edges.len(), 3);
        for edge in &edges {
            assert!(edge.a < edge.b);
        }
        assert_eq!(edges[0], WeightedEdge::new(1.0, 0, 4));
    }

    #[test]
    fn test_weights_remap() {
        let mut weights = EdgeWeights::new();
        weights.insert(0, 1, 1.0);
        weights.insert(1, 2, 2.0);

        // Swap 0 and 2, drop nothing
        weights.remap(|v| Some(2 - v));
        assert_eq!(weights.get_exact(1, 2), Some(1.0));
        assert_eq!(weights.get_exact(0, 1), Some(2.0));

        // Drop vertex 1
        weights.remap(|v| if v == 1 { None } else { Some(v) });
        assert!(weights.is_empty());
    }

    #[test]
    fn test_weighted_edge_other() {
        let edge = WeightedEdge::new(0.5, 3, 8);
        assert_eq!(edge.other(3), Some(8));
        assert_eq!(edge.other(8), Some(3));
        assert_eq!(edge.other(1), None);
        assert_eq!(edge.canonical(), (3, 8));
    }

    #[test]
    fn test_neighbours_from_edges() {
        let edges = vec![
            WeightedEdge::new(1.0, 0, 1),
            WeightedEdge::new(1.0, 2, 1),
            WeightedEdge::new(1.0, 2, 9), // out of range
        ];
        let neighbours = neighbours_from_edges(3, &edges);
        assert!(neighbours[0].contains(&1));
        assert!(neighbours[1].contains(&0));
        assert!(neighbours[1].contains(&2));
        assert_eq!(neighbours[2].len(), 1);
    }
}
