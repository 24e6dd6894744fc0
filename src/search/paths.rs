//! Path and neighbourhood queries built on [`DijkstraSearch`]

use std::collections::HashSet;

use glam::Vec2;

use super::{DijkstraSearch, SearchFlags};
use crate::error::Result;
use crate::geometry::find_nearest_vertex_to_point;
use crate::graph::Graph;
use crate::types::{EdgeWeight, GraphPath, VertexIndex, VertexIndexList};
use crate::vertex_info::VertexInfoBuffer;

/// Cheapest path between two vertices
///
/// The search stops as soon as `end` is finalized. The path is listed from
/// `end` back to `start`.
///
/// # Returns
///
/// - `[start]` if `start == end`
/// - an empty path if either index is out of range or `end` is unreachable
///
/// # Errors
///
/// `MissingWeight` / `NegativeWeight` if an explored edge has no valid weight
///
/// # Example
///
/// ```
/// use rust_delaunay_graph::*;
/// use glam::UVec2;
///
/// let mut graph = generation::generate_grid(UVec2::new(3, 3), 0.0, false);
/// graph.weights = create_edge_list_with_weights(&graph, EdgeWeightMode::Fixed(1.0));
///
/// // Opposite corners of a 3x3 lattice are four steps apart
/// let path = find_shortest_path_dijkstra(&graph, 0, 2).unwrap();
/// assert_eq!(path.len(), 5);
/// assert_eq!(path.first(), Some(&2));
/// assert_eq!(path.last(), Some(&0));
/// ```
pub fn find_shortest_path_dijkstra(graph: &Graph, start: VertexIndex, end: VertexIndex) -> Result<GraphPath> {
    let count = graph.vertex_count();
    if start >= count || end >= count {
        return Ok(GraphPath::new());
    }
    if start == end {
        return Ok(vec![start]);
    }

    let mut info = VertexInfoBuffer::new(count);
    DijkstraSearch::new(graph, &mut info, &[start], SearchFlags::shortest_path())
        .end_index(end)
        .stop_at_end(true)
        .search()
}

/// Cheapest path from `start` to the vertex nearest `end_position`
pub fn find_shortest_path_dijkstra_to_position(
    graph: &Graph,
    start: VertexIndex,
    end_position: Vec2,
) -> Result<GraphPath> {
    match find_nearest_vertex_to_point(&graph.points, end_position) {
        Some(end) => find_shortest_path_dijkstra(graph, start, end),
        None => Ok(GraphPath::new()),
    }
}

/// Greedy walk that always takes the cheapest outgoing edge
///
/// Steps straight onto `end` whenever it is adjacent. The path is listed from
/// `start` to `end`. Greedy walks are not optimal and can run into dead ends
/// or cycles; both yield an empty path.
///
/// # Errors
///
/// `MissingWeight` / `NegativeWeight` if an inspected edge has no valid weight
pub fn find_shortest_path(graph: &Graph, start: VertexIndex, end: VertexIndex) -> Result<GraphPath> {
    let count = graph.vertex_count();
    if start >= count || end >= count || graph.neighbours.len() != count {
        return Ok(GraphPath::new());
    }

    let mut path = vec![start];
    let mut visited = HashSet::from([start]);
    let mut current = start;

    while current != end {
        let neighbours = &graph.neighbours[current];
        let next = if neighbours.contains(&end) {
            Some(end)
        } else {
            let mut best: Option<(VertexIndex, EdgeWeight)> = None;
            for &n in neighbours {
                let weight = graph.require_weight(current, n)?;
                if best.map_or(true, |(_, w)| weight < w) {
                    best = Some((n, weight));
                }
            }
            best.map(|(n, _)| n)
        };

        let Some(next) = next else {
            return Ok(GraphPath::new());
        };
        if !visited.insert(next) {
            tracing::trace!(start, end, revisited = next, "greedy walk cycled");
            return Ok(GraphPath::new());
        }
        path.push(next);
        current = next;
    }

    Ok(path)
}

/// Every vertex reachable from `start` without crossing a blocker or an
/// ownership boundary
///
/// Blockers are closed before the flood starts. `start` is always listed
/// first. Owner labels in `info` are read, never written.
pub fn create_group_of_verts_not_blocked_by_vertices(
    graph: &Graph,
    info: &mut VertexInfoBuffer,
    blockers: &[VertexIndex],
    start: VertexIndex,
) -> Result<VertexIndexList> {
    DijkstraSearch::new(graph, info, &[start], SearchFlags::reachable().same_ownership())
        .on_post_init(|info| {
            for &b in blockers {
                if let Some(v) = info.get_mut(b) {
                    v.closed = true;
                }
            }
        })
        .search()
}

/// Vertices of `start`'s region within a cumulative edge cost below `max_weight`
pub fn create_list_of_verts_within_steps_of_vertex(
    graph: &Graph,
    info: &mut VertexInfoBuffer,
    start: VertexIndex,
    max_weight: EdgeWeight,
) -> Result<VertexIndexList> {
    DijkstraSearch::new(graph, info, &[start], SearchFlags::weighted().same_ownership())
        .max_weight(max_weight)
        .search()
}

/// Vertices strictly closer than `radius` to `center`, in index order
///
/// Includes `center` itself for any positive radius; empty if `center` is out of range.
pub fn create_list_of_verts_within_radius_of_vertex(
    graph: &Graph,
    center: VertexIndex,
    radius: f32,
) -> VertexIndexList {
    let Some(&center_pos) = graph.points.get(center) else {
        return VertexIndexList::new();
    };
    let radius_sq = radius * radius;

    graph
        .points
        .iter()
        .enumerate()
        .filter(|(_, p)| p.distance_squared(center_pos) < radius_sq)
        .map(|(i, _)| i)
        .collect()
}
