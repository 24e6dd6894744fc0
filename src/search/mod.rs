//! Generalized Dijkstra search
//!
//! One engine serves reachability floods, weighted cost fields and
//! shortest-path queries. Behaviour is selected with [`SearchFlags`] and
//! customised through optional callbacks:
//!
//! - `on_post_init`: runs after the buffer reset, before seeding (e.g. to
//!   pre-close blocker vertices)
//! - `on_vertex_selected`: runs each time a vertex is finalized
//! - `weight_fn`: replaces the graph's weight table for edge costs
//!
//! All per-vertex state lives in a caller-owned [`VertexInfoBuffer`] so costs,
//! parents and owners stay inspectable after the search returns.

mod open_list;
mod paths;

pub use paths::{
    create_group_of_verts_not_blocked_by_vertices, create_list_of_verts_within_radius_of_vertex,
    create_list_of_verts_within_steps_of_vertex, find_shortest_path, find_shortest_path_dijkstra,
    find_shortest_path_dijkstra_to_position,
};

use std::time::Instant;

pub(crate) use open_list::OpenList;

use crate::error::{GraphError, Result};
use crate::graph::Graph;
use crate::types::{EdgeWeight, VertexIndex};
use crate::vertex_info::VertexInfoBuffer;

/// Behaviour switches for [`DijkstraSearch`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchFlags {
    /// Only step onto neighbours with the same owner as the current vertex
    pub force_same_ownership: bool,
    /// Use edge costs and a cost-sorted open list instead of plain flooding
    pub check_weights: bool,
    /// Return the parent chain from the end vertex instead of the reached set
    pub return_shortest_path: bool,
}

impl SearchFlags {
    /// Unweighted flood returning every reachable vertex
    pub fn reachable() -> Self {
        Self::default()
    }

    /// Weighted flood returning every vertex reached under the weight limit
    pub fn weighted() -> Self {
        Self {
            check_weights: true,
            ..Self::default()
        }
    }

    /// Weighted search returning the path to the end vertex
    pub fn shortest_path() -> Self {
        Self {
            check_weights: true,
            return_shortest_path: true,
            ..Self::default()
        }
    }

    /// Same flags with ownership enforcement turned on
    pub fn same_ownership(mut self) -> Self {
        self.force_same_ownership = true;
        self
    }
}

type PostInitFn<'a> = Box<dyn FnMut(&mut VertexInfoBuffer) + 'a>;
type VertexSelectedFn<'a> = Box<dyn FnMut(VertexIndex) + 'a>;
type WeightFn<'a> = Box<dyn FnMut(VertexIndex, VertexIndex, Option<VertexIndex>) -> EdgeWeight + 'a>;

/// A configured search over a graph
///
/// # Example
///
/// ```
/// use rust_delaunay_graph::*;
/// use glam::Vec2;
///
/// let mut graph = Graph::from_points(vec![Vec2::ZERO, Vec2::X, Vec2::Y]);
/// graph.add_edge(0, 1);
/// graph.add_edge(1, 2);
/// graph.set_weight(0, 1, 1.0);
/// graph.set_weight(1, 2, 2.0);
///
/// let mut info = VertexInfoBuffer::new(graph.vertex_count());
/// let path = DijkstraSearch::new(&graph, &mut info, &[0], SearchFlags::shortest_path())
///     .end_index(2)
///     .search()
///     .unwrap();
///
/// // Paths are listed from the end back to the start
/// assert_eq!(path, vec![2, 1, 0]);
/// assert_eq!(info[2].lowest_weight, 3.0);
/// ```
pub struct DijkstraSearch<'a> {
    graph: &'a Graph,
    info: &'a mut VertexInfoBuffer,
    starts: Vec<VertexIndex>,
    flags: SearchFlags,
    end_index: Option<VertexIndex>,
    max_weight: EdgeWeight,
    stop_at_end: bool,
    post_init: Option<PostInitFn<'a>>,
    vertex_selected: Option<VertexSelectedFn<'a>>,
    weight_fn: Option<WeightFn<'a>>,
}

impl<'a> DijkstraSearch<'a> {
    /// Prepare a search from `starts`
    ///
    /// Duplicate start vertices are ignored.
    pub fn new(
        graph: &'a Graph,
        info: &'a mut VertexInfoBuffer,
        starts: &[VertexIndex],
        flags: SearchFlags,
    ) -> Self {
        let mut unique_starts = Vec::with_capacity(starts.len());
        for &s in starts {
            if !unique_starts.contains(&s) {
                unique_starts.push(s);
            }
        }

        Self {
            graph,
            info,
            starts: unique_starts,
            flags,
            end_index: None,
            max_weight: EdgeWeight::MAX,
            stop_at_end: false,
            post_init: None,
            vertex_selected: None,
            weight_fn: None,
        }
    }

    /// Target vertex for shortest-path mode and early exit
    pub fn end_index(mut self, end: VertexIndex) -> Self {
        self.end_index = Some(end);
        self
    }

    /// Only accept cumulative costs strictly below `max_weight`
    pub fn max_weight(mut self, max_weight: EdgeWeight) -> Self {
        self.max_weight = max_weight;
        self
    }

    /// Stop as soon as the end vertex is finalized
    ///
    /// Costs of vertices farther away than the end are then left partial.
    pub fn stop_at_end(mut self, stop: bool) -> Self {
        self.stop_at_end = stop;
        self
    }

    /// Hook run after the buffer reset and before the starts are seeded
    pub fn on_post_init<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut VertexInfoBuffer) + 'a,
    {
        self.post_init = Some(Box::new(f));
        self
    }

    /// Hook run with each vertex taken off the open list
    pub fn on_vertex_selected<F>(mut self, f: F) -> Self
    where
        F: FnMut(VertexIndex) + 'a,
    {
        self.vertex_selected = Some(Box::new(f));
        self
    }

    /// Replace table lookups with `f(current, neighbour, parent_of_current)`
    pub fn weight_fn<F>(mut self, f: F) -> Self
    where
        F: FnMut(VertexIndex, VertexIndex, Option<VertexIndex>) -> EdgeWeight + 'a,
    {
        self.weight_fn = Some(Box::new(f));
        self
    }

    /// Run the search
    ///
    /// # Returns
    ///
    /// - shortest-path mode: the path from the end vertex back to a start,
    ///   or empty if the end is unset or unreachable
    /// - otherwise: every reached vertex once, starts first, in discovery order
    ///
    /// An empty graph, no starts, or an out-of-range start or end vertex
    /// yields an empty result.
    ///
    /// # Errors
    ///
    /// - `SizeMismatch` if the buffer or adjacency is shorter than the point list
    /// - `MissingWeight` / `NegativeWeight` from the weight table or callback
    pub fn search(self) -> Result<Vec<VertexIndex>> {
        let DijkstraSearch {
            graph,
            info,
            starts,
            flags,
            end_index,
            max_weight,
            stop_at_end,
            mut post_init,
            mut vertex_selected,
            mut weight_fn,
        } = self;

        let vertex_count = graph.vertex_count();
        if vertex_count == 0 || graph.neighbours.is_empty() || starts.is_empty() {
            return Ok(Vec::new());
        }
        if graph.neighbours.len() != vertex_count {
            return Err(GraphError::SizeMismatch {
                expected: vertex_count,
                actual: graph.neighbours.len(),
            });
        }
        if info.len() < vertex_count {
            return Err(GraphError::SizeMismatch {
                expected: vertex_count,
                actual: info.len(),
            });
        }
        if starts.iter().any(|&s| s >= vertex_count) || end_index.is_some_and(|e| e >= vertex_count) {
            return Ok(Vec::new());
        }

        let start_time = Instant::now();
        let list_reached = !flags.return_shortest_path;

        info.reset(false);
        if let Some(f) = post_init.as_mut() {
            f(info);
        }

        let mut open = OpenList::new();
        let mut reached = Vec::new();
        for &s in &starts {
            info[s].lowest_weight = 0.0;
            info[s].closed = true;
            open.push(s);
        }
        if list_reached {
            reached.extend_from_slice(&starts);
        }

        let mut selected = 0usize;
        while let Some(current) = open.pop() {
            info[current].closed = true;
            selected += 1;
            if let Some(f) = vertex_selected.as_mut() {
                f(current);
            }
            if stop_at_end && end_index == Some(current) {
                break;
            }

            let current_owner = info[current].owner;
            let current_weight = info[current].lowest_weight;
            let current_parent = info[current].parent;

            for &n in &graph.neighbours[current] {
                if info[n].closed {
                    continue;
                }
                if flags.force_same_ownership && info[n].owner != current_owner {
                    continue;
                }

                if !flags.check_weights {
                    // Flood: claim on discovery, cost counts steps
                    info[n].closed = true;
                    info[n].parent = Some(current);
                    info[n].lowest_weight = current_weight + 1.0;
                    open.push(n);
                    if list_reached {
                        reached.push(n);
                    }
                    continue;
                }

                let weight = match weight_fn.as_mut() {
                    Some(f) => {
                        let w = f(current, n, current_parent);
                        if w < 0.0 {
                            return Err(GraphError::NegativeWeight {
                                a: current.min(n),
                                b: current.max(n),
                                weight: w,
                            });
                        }
                        w
                    }
                    None => graph.require_weight(current, n)?,
                };

                let total = current_weight + weight;
                if total < info[n].lowest_weight && total < max_weight {
                    let first_discovery = !info[n].is_reached();
                    if !first_discovery {
                        open.remove(n);
                    }
                    info[n].lowest_weight = total;
                    info[n].parent = Some(current);
                    open.insert_sorted(n, total, info);

                    if list_reached && first_discovery {
                        reached.push(n);
                    }
                }
            }
        }

        tracing::trace!(
            starts = starts.len(),
            selected,
            weighted = flags.check_weights,
            elapsed = ?start_time.elapsed(),
            "dijkstra search finished"
        );

        if list_reached {
            return Ok(reached);
        }

        let Some(end) = end_index else {
            return Ok(Vec::new());
        };
        Ok(walk_parents(info, end, vertex_count))
    }
}

/// Follow parent links from `end` to a root; empty if `end` was never reached
fn walk_parents(info: &VertexInfoBuffer, end: VertexIndex, vertex_count: usize) -> Vec<VertexIndex> {
    if !info[end].is_reached() {
        return Vec::new();
    }

    let mut path = vec![end];
    let mut current = end;
    while let Some(parent) = info[current].parent {
        if path.len() > vertex_count {
            tracing::warn!(end, "parent chain does not terminate");
            return Vec::new();
        }
        path.push(parent);
        current = parent;
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{create_edge_list_with_weights, generate_grid, EdgeWeightMode};
    use glam::{UVec2, Vec2};

    /// Five vertices, cheapest 0 -> 4 route is 0-1-2-3-4 (cost 5)
    pub(super) fn sample_graph() -> Graph {
        let points = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(3.0, 1.0),
            Vec2::new(4.0, 0.0),
        ];
        let mut graph = Graph::from_points(points);
        for (a, b, w) in [
            (0, 1, 1.0),
            (1, 2, 1.0),
            (0, 2, 3.0),
            (2, 3, 1.0),
            (1, 3, 4.0),
            (3, 4, 2.0),
            (0, 4, 10.0),
        ] {
            graph.add_edge(a, b);
            graph.set_weight(a, b, w);
        }
        graph
    }

    #[test]
    fn test_shortest_path_end_first() {
        let graph = sample_graph();
        let mut info = VertexInfoBuffer::new(graph.vertex_count());
        let path = DijkstraSearch::new(&graph, &mut info, &[0], SearchFlags::shortest_path())
            .end_index(4)
            .search()
            .unwrap();

        assert_eq!(path, vec![4, 3, 2, 1, 0]);
        assert_eq!(info[4].lowest_weight, 5.0);
    }

    #[test]
    fn test_unweighted_reachable_order() {
        let graph = sample_graph();
        let mut info = VertexInfoBuffer::new(graph.vertex_count());
        let reached = DijkstraSearch::new(&graph, &mut info, &[0], SearchFlags::reachable())
            .search()
            .unwrap();

        assert_eq!(reached, vec![0, 1, 2, 4, 3]);
        assert_eq!(info[3].parent, Some(4));
        assert!(info.iter().all(|v| v.closed));
    }

    #[test]
    fn test_weighted_reachable_lists_each_vertex_once() {
        let graph = sample_graph();
        let mut info = VertexInfoBuffer::new(graph.vertex_count());
        let mut reached = DijkstraSearch::new(&graph, &mut info, &[0], SearchFlags::weighted())
            .search()
            .unwrap();

        assert_eq!(reached[0], 0);
        reached.sort();
        assert_eq!(reached, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_max_weight_limits_reach() {
        let graph = sample_graph();
        let mut info = VertexInfoBuffer::new(graph.vertex_count());
        let reached = DijkstraSearch::new(&graph, &mut info, &[0], SearchFlags::weighted())
            .max_weight(2.5)
            .search()
            .unwrap();

        assert_eq!(reached, vec![0, 1, 2]);
        assert!(!info[3].is_reached());
    }

    #[test]
    fn test_multiple_sources() {
        let graph = sample_graph();
        let mut info = VertexInfoBuffer::new(graph.vertex_count());
        DijkstraSearch::new(&graph, &mut info, &[0, 4], SearchFlags::weighted())
            .search()
            .unwrap();

        assert_eq!(info[0].lowest_weight, 0.0);
        assert_eq!(info[4].lowest_weight, 0.0);
        assert_eq!(info[3].lowest_weight, 2.0);
        assert_eq!(info[2].lowest_weight, 2.0);
    }

    #[test]
    fn test_callbacks() {
        let graph = sample_graph();
        let mut info = VertexInfoBuffer::new(graph.vertex_count());
        let mut order = Vec::new();
        let mut post_init_ran = false;

        DijkstraSearch::new(&graph, &mut info, &[0], SearchFlags::weighted())
            .on_post_init(|_| post_init_ran = true)
            .on_vertex_selected(|v| order.push(v))
            .search()
            .unwrap();

        assert!(post_init_ran);
        assert_eq!(order.len(), 5);
        // Finalized in non-decreasing cost order
        for pair in order.windows(2) {
            assert!(info[pair[0]].lowest_weight <= info[pair[1]].lowest_weight);
        }
    }

    #[test]
    fn test_weight_callback_overrides_table() {
        let graph = sample_graph();
        let mut info = VertexInfoBuffer::new(graph.vertex_count());
        let path = DijkstraSearch::new(&graph, &mut info, &[0], SearchFlags::shortest_path())
            .end_index(4)
            .weight_fn(|_, _, _| 1.0)
            .search()
            .unwrap();

        assert_eq!(path, vec![4, 0]);
    }

    #[test]
    fn test_weight_callback_sees_parent() {
        let graph = sample_graph();
        let mut info = VertexInfoBuffer::new(graph.vertex_count());
        let mut root_calls = 0;
        DijkstraSearch::new(&graph, &mut info, &[0], SearchFlags::weighted())
            .weight_fn(|current, _, parent| {
                if current == 0 {
                    assert_eq!(parent, None);
                    root_calls += 1;
                } else {
                    assert!(parent.is_some());
                }
                1.0
            })
            .search()
            .unwrap();
        assert_eq!(root_calls, 3);
    }

    #[test]
    fn test_negative_callback_weight_is_error() {
        let graph = sample_graph();
        let mut info = VertexInfoBuffer::new(graph.vertex_count());
        let result = DijkstraSearch::new(&graph, &mut info, &[0], SearchFlags::weighted())
            .weight_fn(|_, _, _| -1.0)
            .search();
        assert!(matches!(result, Err(GraphError::NegativeWeight { .. })));
    }

    #[test]
    fn test_same_ownership() {
        let graph = sample_graph();
        let mut info = VertexInfoBuffer::new(graph.vertex_count());
        for v in 0..3 {
            info.set_owner(v, 1);
        }
        info.set_owner(3, 2);
        info.set_owner(4, 2);

        let mut reached = DijkstraSearch::new(
            &graph,
            &mut info,
            &[0],
            SearchFlags::reachable().same_ownership(),
        )
        .search()
        .unwrap();
        reached.sort();

        assert_eq!(reached, vec![0, 1, 2]);
        // Owners survive the reset
        assert_eq!(info.owner(4), Some(2));
    }

    #[test]
    fn test_unreachable_end_gives_empty_path() {
        let mut graph = sample_graph();
        graph.points.push(Vec2::new(50.0, 50.0));
        graph.neighbours.push(Default::default());

        let mut info = VertexInfoBuffer::new(graph.vertex_count());
        let path = DijkstraSearch::new(&graph, &mut info, &[0], SearchFlags::shortest_path())
            .end_index(5)
            .search()
            .unwrap();
        assert!(path.is_empty());
    }

    #[test]
    fn test_degenerate_inputs() {
        let graph = sample_graph();
        let mut info = VertexInfoBuffer::new(graph.vertex_count());

        let empty = DijkstraSearch::new(&graph, &mut info, &[], SearchFlags::weighted()).search();
        assert_eq!(empty, Ok(vec![]));

        let out_of_range = DijkstraSearch::new(&graph, &mut info, &[9], SearchFlags::weighted()).search();
        assert_eq!(out_of_range, Ok(vec![]));

        let bad_end = DijkstraSearch::new(&graph, &mut info, &[0], SearchFlags::shortest_path())
            .end_index(9)
            .search();
        assert_eq!(bad_end, Ok(vec![]));

        let no_end = DijkstraSearch::new(&graph, &mut info, &[0], SearchFlags::shortest_path()).search();
        assert_eq!(no_end, Ok(vec![]));

        let empty_graph = Graph::new();
        let mut empty_info = VertexInfoBuffer::new(0);
        let result = DijkstraSearch::new(&empty_graph, &mut empty_info, &[0], SearchFlags::reachable()).search();
        assert_eq!(result, Ok(vec![]));
    }

    #[test]
    fn test_short_buffer_is_error() {
        let graph = sample_graph();
        let mut info = VertexInfoBuffer::new(2);
        let result = DijkstraSearch::new(&graph, &mut info, &[0], SearchFlags::weighted()).search();
        assert_eq!(
            result,
            Err(GraphError::SizeMismatch {
                expected: 5,
                actual: 2
            })
        );
    }

    #[test]
    fn test_missing_weight_is_error() {
        let mut graph = sample_graph();
        graph.weights.remove(3, 4);

        let mut info = VertexInfoBuffer::new(graph.vertex_count());
        let result = DijkstraSearch::new(&graph, &mut info, &[0], SearchFlags::weighted()).search();
        assert_eq!(result, Err(GraphError::MissingWeight { a: 3, b: 4 }));
    }

    #[test]
    fn test_stop_at_end_leaves_far_vertices_open() {
        let graph = sample_graph();
        let mut info = VertexInfoBuffer::new(graph.vertex_count());
        let path = DijkstraSearch::new(&graph, &mut info, &[0], SearchFlags::shortest_path())
            .end_index(1)
            .stop_at_end(true)
            .search()
            .unwrap();

        assert_eq!(path, vec![1, 0]);
        assert!(!info[3].closed);
    }

    /// All-pairs shortest distances by Floyd-Warshall
    fn floyd_warshall(graph: &Graph) -> Vec<Vec<f32>> {
        let n = graph.vertex_count();
        let mut dist = vec![vec![f32::INFINITY; n]; n];
        for (i, row) in dist.iter_mut().enumerate() {
            row[i] = 0.0;
        }
        for edge in graph.weights.iter() {
            dist[edge.a][edge.b] = edge.weight;
            dist[edge.b][edge.a] = edge.weight;
        }
        for k in 0..n {
            for i in 0..n {
                for j in 0..n {
                    let via = dist[i][k] + dist[k][j];
                    if via < dist[i][j] {
                        dist[i][j] = via;
                    }
                }
            }
        }
        dist
    }

    #[test]
    fn test_costs_match_brute_force() {
        for seed in 0..8 {
            let mut graph = generate_grid(UVec2::new(4, 3), 0.0, true);
            graph.weights = create_edge_list_with_weights(&graph, EdgeWeightMode::Random { seed });
            let expected = floyd_warshall(&graph);

            for start in 0..graph.vertex_count() {
                let mut info = VertexInfoBuffer::new(graph.vertex_count());
                DijkstraSearch::new(&graph, &mut info, &[start], SearchFlags::weighted())
                    .search()
                    .unwrap();

                for (v, row_value) in expected[start].iter().enumerate() {
                    assert!(
                        (info[v].lowest_weight - row_value).abs() < 1e-4,
                        "seed {} start {} vertex {}: {} vs {}",
                        seed,
                        start,
                        v,
                        info[v].lowest_weight,
                        row_value
                    );
                }
            }
        }
    }
}
