//! Minimum spanning tree extraction (Prim's algorithm)

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::error::{GraphError, Result};
use crate::graph::Graph;
use crate::types::{EdgeWeight, VertexIndex, WeightedEdge};

/// Frontier edge from a tree vertex to a candidate vertex
#[derive(Debug, Clone, Copy)]
struct CandidateEdge {
    weight: EdgeWeight,
    from: VertexIndex,
    to: VertexIndex,
}

// BinaryHeap is a max-heap: cheapest edge compares greatest, then lowest target
impl Ord for CandidateEdge {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .total_cmp(&self.weight)
            .then_with(|| other.to.cmp(&self.to))
            .then_with(|| other.from.cmp(&self.from))
    }
}

impl PartialOrd for CandidateEdge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for CandidateEdge {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CandidateEdge {}

/// Minimum spanning tree grown from vertex 0
///
/// See [`generate_minimum_spanning_tree_from`].
///
/// # Example
///
/// ```
/// use rust_delaunay_graph::*;
/// use glam::UVec2;
///
/// let mut graph = generation::generate_grid(UVec2::new(4, 4), 0.0, true);
/// graph.weights = create_edge_list_with_weights(&graph, EdgeWeightMode::Distance);
///
/// let tree = generate_minimum_spanning_tree(&graph).unwrap();
/// assert_eq!(tree.len(), graph.vertex_count() - 1);
/// ```
pub fn generate_minimum_spanning_tree(graph: &Graph) -> Result<Vec<WeightedEdge>> {
    generate_minimum_spanning_tree_from(graph, 0)
}

/// Minimum spanning tree of the component containing `seed`
///
/// Each edge is reported as `(parent, child)` with its table weight, in the
/// order vertices join the tree. Equal weights are broken towards the lower
/// child index. Vertices outside the seed's component are not covered.
///
/// # Returns
///
/// An empty list for an empty graph or an out-of-range seed.
///
/// # Errors
///
/// `MissingWeight` / `NegativeWeight` if an edge of the component has no valid weight
pub fn generate_minimum_spanning_tree_from(graph: &Graph, seed: VertexIndex) -> Result<Vec<WeightedEdge>> {
    let count = graph.vertex_count();
    if seed >= count {
        return Ok(Vec::new());
    }
    if graph.neighbours.len() != count {
        return Err(GraphError::SizeMismatch {
            expected: count,
            actual: graph.neighbours.len(),
        });
    }

    let mut in_tree = vec![false; count];
    let mut heap = BinaryHeap::new();
    let mut tree = Vec::with_capacity(count.saturating_sub(1));

    let push_frontier = |heap: &mut BinaryHeap<CandidateEdge>, in_tree: &[bool], from: VertexIndex| -> Result<()> {
        for &to in &graph.neighbours[from] {
            if !in_tree[to] {
                heap.push(CandidateEdge {
                    weight: graph.require_weight(from, to)?,
                    from,
                    to,
                });
            }
        }
        Ok(())
    };

    in_tree[seed] = true;
    push_frontier(&mut heap, &in_tree, seed)?;

    while let Some(edge) = heap.pop() {
        if in_tree[edge.to] {
            continue;
        }
        in_tree[edge.to] = true;
        tree.push(WeightedEdge::new(edge.weight, edge.from, edge.to));
        push_frontier(&mut heap, &in_tree, edge.to)?;
    }

    if tree.len() + 1 < count {
        tracing::debug!(
            seed,
            covered = tree.len() + 1,
            vertices = count,
            "spanning tree covers only the seed component"
        );
    }

    Ok(tree)
}
