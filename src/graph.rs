//! Graph main structure

use glam::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::GraphConfig;
use crate::error::{GraphError, Result};
use crate::generation::generate_graph;
use crate::types::{
    EdgeWeight, EdgeWeights, NeighbourList, NeighbourSet, VertexIndex, WeightedEdge,
};

/// A weighted undirected graph over 2D points
///
/// Vertices have no object of their own: a vertex is an index into the
/// parallel `points` and `neighbours` arrays.
///
/// # Invariants
///
/// - `points.len() == neighbours.len()`
/// - `b ∈ neighbours[a]` ⟺ `a ∈ neighbours[b]`
/// - weights are non-negative and stored under `(min, max)` (see [`EdgeWeights`])
///
/// The fields are public so callers can assemble graphs by hand; use
/// [`Graph::validate`] to check the invariants afterwards.
///
/// # Example
///
/// ```
/// use rust_delaunay_graph::*;
///
/// let config = GraphConfigBuilder::new()
///     .seed(7)
///     .poisson(8.0, 30)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// let graph = Graph::generate(&config).unwrap();
/// assert!(graph.vertex_count() > 10);
/// assert!(graph.validate().is_ok());
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    /// Vertex positions in the 100×100 domain
    pub points: Vec<Vec2>,
    /// Adjacent vertices of each vertex
    pub neighbours: NeighbourList,
    /// Edge weights keyed by `(lower, higher)`
    pub weights: EdgeWeights,
}

impl Graph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph with the given points and no edges
    pub fn from_points(points: Vec<Vec2>) -> Self {
        let neighbours = vec![NeighbourSet::new(); points.len()];
        Self {
            points,
            neighbours,
            weights: EdgeWeights::new(),
        }
    }

    /// Run the full pipeline described by `config`: sample points, connect
    /// them and assign edge weights
    pub fn generate(config: &GraphConfig) -> Result<Self> {
        generate_graph(config)
    }

    /// Remove all vertices, edges and weights
    pub fn clear(&mut self) {
        self.points.clear();
        self.neighbours.clear();
        self.weights.clear();
    }

    /// Number of vertices
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    /// Number of undirected edges in the adjacency
    pub fn edge_count(&self) -> usize {
        self.neighbours.iter().map(NeighbourSet::len).sum::<usize>() / 2
    }

    /// True if `neighbour` is adjacent to `point`
    ///
    /// Returns false for out-of-range indices.
    pub fn point_has_neighbour(&self, point: VertexIndex, neighbour: VertexIndex) -> bool {
        self.neighbours
            .get(point)
            .map(|set| set.contains(&neighbour))
            .unwrap_or(false)
    }

    /// Neighbours of `index`, or an empty set if out of range
    pub fn neighbours_of(&self, index: VertexIndex) -> impl Iterator<Item = VertexIndex> + '_ {
        self.neighbours
            .get(index)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Weight of edge `(a, b)` in either order
    #[inline]
    pub fn weight(&self, a: VertexIndex, b: VertexIndex) -> Option<EdgeWeight> {
        self.weights.get(a, b)
    }

    /// Weight of edge `(a, b)`, or [`GraphError::MissingWeight`]
    pub fn require_weight(&self, a: VertexIndex, b: VertexIndex) -> Result<EdgeWeight> {
        let weight = self.weights.get(a, b).ok_or(GraphError::MissingWeight {
            a: a.min(b),
            b: a.max(b),
        })?;
        if weight < 0.0 {
            return Err(GraphError::NegativeWeight {
                a: a.min(b),
                b: a.max(b),
                weight,
            });
        }
        Ok(weight)
    }

    /// Store the weight of edge `(a, b)` canonically
    pub fn set_weight(&mut self, a: VertexIndex, b: VertexIndex, weight: EdgeWeight) {
        self.weights.insert(a, b, weight);
    }

    /// Connect `a` and `b` symmetrically
    ///
    /// Self loops and out-of-range indices are ignored; returns whether an edge was added.
    pub fn add_edge(&mut self, a: VertexIndex, b: VertexIndex) -> bool {
        let len = self.neighbours.len();
        if a == b || a >= len || b >= len {
            return false;
        }
        let added = self.neighbours[a].insert(b);
        self.neighbours[b].insert(a);
        added
    }

    /// Every adjacency edge once, as `(lower, higher)` with its weight
    ///
    /// Edges without a stored weight are reported with weight `0.0`.
    pub fn edges(&self) -> Vec<WeightedEdge> {
        let mut edges = Vec::with_capacity(self.edge_count());
        for (i, set) in self.neighbours.iter().enumerate() {
            for &n in set.range(i + 1..) {
                let weight = self.weights.get_exact(i, n).unwrap_or(0.0);
                edges.push(WeightedEdge::new(weight, i, n));
            }
        }
        edges
    }

    /// Check the structural invariants
    ///
    /// Errors with [`GraphError::SizeMismatch`], [`GraphError::IndexOutOfRange`],
    /// [`GraphError::AsymmetricEdge`] or [`GraphError::NegativeWeight`].
    /// Missing weights are allowed here; weighted searches report them.
    pub fn validate(&self) -> Result<()> {
        let len = self.points.len();
        if self.neighbours.len() != len {
            return Err(GraphError::SizeMismatch {
                expected: len,
                actual: self.neighbours.len(),
            });
        }

        for (a, set) in self.neighbours.iter().enumerate() {
            for &b in set {
                if b >= len {
                    return Err(GraphError::IndexOutOfRange { index: b, len });
                }
                if !self.neighbours[b].contains(&a) {
                    return Err(GraphError::AsymmetricEdge { a, b });
                }
            }
        }

        for edge in self.weights.iter() {
            if edge.weight < 0.0 {
                return Err(GraphError::NegativeWeight {
                    a: edge.a,
                    b: edge.b,
                    weight: edge.weight,
                });
            }
        }

        Ok(())
    }

    /// Exchange the indices of `v1` and `v2`
    ///
    /// Positions, neighbour sets and weights move with the vertices and every
    /// reference to either index is rewritten. Returns false (and changes
    /// nothing) if either index is out of range.
    pub fn swap_index(&mut self, v1: VertexIndex, v2: VertexIndex) -> bool {
        let len = self.points.len();
        if v1 >= len || v2 >= len || self.neighbours.len() != len {
            return false;
        }
        if v1 == v2 {
            return true;
        }

        self.points.swap(v1, v2);
        self.neighbours.swap(v1, v2);

        for set in &mut self.neighbours {
            let had_v1 = set.remove(&v1);
            let had_v2 = set.remove(&v2);
            if had_v1 {
                set.insert(v2);
            }
            if had_v2 {
                set.insert(v1);
            }
        }

        self.weights.remap(|v| {
            Some(if v == v1 {
                v2
            } else if v == v2 {
                v1
            } else {
                v
            })
        });

        true
    }

    /// Remove a vertex by moving the last vertex into its slot
    ///
    /// All edges touching `index` are dropped and the former last vertex is
    /// renamed to `index`. Returns the removed position, or `None` if out of range.
    pub fn remove_point(&mut self, index: VertexIndex) -> Option<Vec2> {
        let len = self.points.len();
        if index >= len || self.neighbours.len() != len {
            return None;
        }
        let last = len - 1;

        let removed_neighbours = std::mem::take(&mut self.neighbours[index]);
        for n in removed_neighbours {
            self.neighbours[n].remove(&index);
        }

        let removed = self.points.swap_remove(index);
        self.neighbours.swap_remove(index);

        if index != last {
            for set in &mut self.neighbours {
                if set.remove(&last) {
                    set.insert(index);
                }
            }
        }

        self.weights.remap(|v| {
            if v == index {
                None
            } else if v == last {
                Some(index)
            } else {
                Some(v)
            }
        });

        Some(removed)
    }
}

/// A subgraph with compacted indices and back-references to its source graph
///
/// `graph` vertex `i` corresponds to vertex `point_indices_in_original_graph[i]`
/// of the graph it was extracted from.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexGraph {
    /// Original index of each local vertex
    pub point_indices_in_original_graph: Vec<VertexIndex>,
    /// The extracted graph in local indices
    pub graph: Graph,
}

impl IndexGraph {
    /// Extract the subgraph induced by `indices`
    ///
    /// Out-of-range and duplicate indices are skipped. Only edges with both
    /// endpoints in the subset are kept, together with their weights.
    pub fn from_subset(source: &Graph, indices: &[VertexIndex]) -> Self {
        let mut local_of = vec![None; source.vertex_count()];
        let mut originals = Vec::with_capacity(indices.len());

        for &original in indices {
            if original < local_of.len() && local_of[original].is_none() {
                local_of[original] = Some(originals.len());
                originals.push(original);
            }
        }

        let mut graph = Graph::from_points(originals.iter().map(|&i| source.points[i]).collect());

        for (local, &original) in originals.iter().enumerate() {
            let Some(set) = source.neighbours.get(original) else {
                continue;
            };
            for &n in set {
                if let Some(local_n) = local_of[n] {
                    graph.neighbours[local].insert(local_n);
                    if let Some(weight) = source.weights.get(original, n) {
                        graph.weights.insert(local, local_n, weight);
                    }
                }
            }
        }

        Self {
            point_indices_in_original_graph: originals,
            graph,
        }
    }

    /// Original index of local vertex `local`
    pub fn original_index(&self, local: VertexIndex) -> Option<VertexIndex> {
        self.point_indices_in_original_graph.get(local).copied()
    }

    /// Remove everything
    pub fn clear(&mut self) {
        self.point_indices_in_original_graph.clear();
        self.graph.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Path 0 - 1 - 2 plus a spur 1 - 3
    fn small_graph() -> Graph {
        let mut graph = Graph::from_points(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(1.0, 1.0),
        ]);
        graph.add_edge(0, 1);
        graph.add_edge(1, 2);
        graph.add_edge(1, 3);
        graph.set_weight(0, 1, 1.0);
        graph.set_weight(2, 1, 2.0);
        graph.set_weight(1, 3, 3.0);
        graph
    }

    #[test]
    fn test_basic_queries() {
        let graph = small_graph();
        assert_eq!(graph.vertex_count(), 4);
        assert_eq!(graph.edge_count(), 3);
        assert!(graph.point_has_neighbour(0, 1));
        assert!(graph.point_has_neighbour(1, 0));
        assert!(!graph.point_has_neighbour(0, 2));
        assert!(!graph.point_has_neighbour(42, 0));
        assert_eq!(graph.weight(1, 2), Some(2.0));
        assert_eq!(graph.neighbours_of(1).collect::<Vec<_>>(), vec![0, 2, 3]);
        assert_eq!(graph.neighbours_of(99).count(), 0);
        assert!(graph.validate().is_ok());
    }

    #[test]
    fn test_add_edge_rejects_invalid() {
        let mut graph = small_graph();
        assert!(!graph.add_edge(2, 2));
        assert!(!graph.add_edge(0, 17));
        assert!(!graph.add_edge(0, 1)); // already present
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn test_edges_canonical() {
        let graph = small_graph();
        let edges = graph.edges();
        assert_eq!(
            edges,
            vec![
                WeightedEdge::new(1.0, 0, 1),
                WeightedEdge::new(2.0, 1, 2),
                WeightedEdge::new(3.0, 1, 3),
            ]
        );
    }

    #[test]
    fn test_validate_detects_violations() {
        let mut graph = small_graph();
        graph.neighbours[0].insert(2);
        assert_eq!(graph.validate(), Err(GraphError::AsymmetricEdge { a: 0, b: 2 }));

        let mut graph = small_graph();
        graph.neighbours.pop();
        assert!(matches!(graph.validate(), Err(GraphError::SizeMismatch { .. })));

        let mut graph = small_graph();
        graph.set_weight(0, 1, -1.0);
        assert!(matches!(graph.validate(), Err(GraphError::NegativeWeight { .. })));
    }

    #[test]
    fn test_require_weight() {
        let mut graph = small_graph();
        assert_eq!(graph.require_weight(3, 1), Ok(3.0));
        graph.weights.remove(0, 1);
        assert_eq!(graph.require_weight(1, 0), Err(GraphError::MissingWeight { a: 0, b: 1 }));
    }

    #[test]
    fn test_swap_index_adjacent_vertices() {
        let mut graph = small_graph();
        assert!(graph.swap_index(0, 1));

        // Old vertex 1 (hub) now lives at 0
        assert_eq!(graph.points[0], Vec2::new(1.0, 0.0));
        assert_eq!(graph.neighbours_of(0).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(graph.neighbours_of(1).collect::<Vec<_>>(), vec![0]);
        assert_eq!(graph.weight(0, 2), Some(2.0));
        assert_eq!(graph.weight(0, 3), Some(3.0));
        assert_eq!(graph.weight(0, 1), Some(1.0));
        assert!(graph.validate().is_ok());
    }

    #[test]
    fn test_swap_index_shared_neighbour() {
        // 0 and 2 both neighbour 1; swapping them must keep both edges
        let mut graph = small_graph();
        assert!(graph.swap_index(0, 2));
        assert_eq!(graph.neighbours_of(1).collect::<Vec<_>>(), vec![0, 2, 3]);
        assert_eq!(graph.weight(1, 0), Some(2.0));
        assert_eq!(graph.weight(1, 2), Some(1.0));
        assert!(graph.validate().is_ok());
    }

    #[test]
    fn test_swap_index_out_of_range() {
        let mut graph = small_graph();
        let before = graph.clone();
        assert!(!graph.swap_index(0, 10));
        assert_eq!(graph, before);
    }

    #[test]
    fn test_remove_point_middle() {
        let mut graph = small_graph();
        let removed = graph.remove_point(1);
        assert_eq!(removed, Some(Vec2::new(1.0, 0.0)));

        // Vertex 3 moved into slot 1; all hub edges are gone
        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.points[1], Vec2::new(1.0, 1.0));
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.weights.is_empty());
        assert!(graph.validate().is_ok());
    }

    #[test]
    fn test_remove_point_renames_last() {
        let mut graph = small_graph();
        graph.remove_point(0);

        // Old 3 is now 0 and still neighbours the hub
        assert_eq!(graph.points[0], Vec2::new(1.0, 1.0));
        assert!(graph.point_has_neighbour(0, 1));
        assert_eq!(graph.weight(0, 1), Some(3.0));
        assert_eq!(graph.weight(1, 2), Some(2.0));
        assert!(graph.validate().is_ok());
    }

    #[test]
    fn test_remove_last_point() {
        let mut graph = small_graph();
        graph.remove_point(3);
        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.neighbours_of(1).collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(graph.weights.len(), 2);
        assert!(graph.validate().is_ok());
        assert_eq!(graph.remove_point(3), None);
    }

    #[test]
    fn test_index_graph_from_subset() {
        let graph = small_graph();
        let sub = IndexGraph::from_subset(&graph, &[3, 1, 1, 99]);

        assert_eq!(sub.point_indices_in_original_graph, vec![3, 1]);
        assert_eq!(sub.graph.vertex_count(), 2);
        assert!(sub.graph.point_has_neighbour(0, 1));
        assert_eq!(sub.graph.weight(0, 1), Some(3.0));
        assert_eq!(sub.original_index(1), Some(1));
        assert_eq!(sub.original_index(2), None);
        assert!(sub.graph.validate().is_ok());
    }

    #[test]
    fn test_clear() {
        let mut graph = small_graph();
        graph.clear();
        assert_eq!(graph.vertex_count(), 0);
        assert!(graph.weights.is_empty());
    }
}
