//! Region partitioning by competing ownership floods
//!
//! Each region grows from a root vertex along a subset of "active" edges.
//! Costs persist in the [`VertexInfoBuffer`] across floods, so a later flood
//! only claims vertices it reaches more cheaply than every earlier one. The
//! result is a discrete weighted Voronoi partition of the graph.

use std::collections::HashSet;
use std::f32::consts::TAU;
use std::time::Instant;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::{GraphError, Result};
use crate::graph::Graph;
use crate::search::OpenList;
use crate::types::{
    neighbours_from_edges, EdgeWeights, NeighbourList, NeighbourSet, TreeIndex, VertexIndex,
    VertexIndexList, WeightedEdge,
};
use crate::vertex_info::VertexInfoBuffer;

/// Flood `owner` outward from `start`, claiming every vertex it reaches more
/// cheaply than any earlier flood
///
/// Only `closed` flags are reset; `lowest_weight` and `owner` carry over
/// from previous calls. Reset the buffer before the first flood of a
/// partition. An out-of-range `start` does nothing.
///
/// # Errors
///
/// - `SizeMismatch` if `info` is shorter than `neighbours`
/// - `MissingWeight` / `NegativeWeight` for traversed edges without a valid weight
pub fn split_graph_bfs_flood_fill_ownership(
    owner: TreeIndex,
    start: VertexIndex,
    info: &mut VertexInfoBuffer,
    neighbours: &NeighbourList,
    weights: &EdgeWeights,
) -> Result<()> {
    if info.len() < neighbours.len() {
        return Err(GraphError::SizeMismatch {
            expected: neighbours.len(),
            actual: info.len(),
        });
    }
    if start >= neighbours.len() {
        return Ok(());
    }

    for i in 0..neighbours.len() {
        info[i].closed = false;
    }

    info[start].lowest_weight = 0.0;
    info[start].parent = None;
    info[start].owner = owner;

    let mut open = OpenList::new();
    open.push(start);

    while let Some(current) = open.pop() {
        info[current].closed = true;
        let current_weight = info[current].lowest_weight;

        for &n in &neighbours[current] {
            if info[n].closed {
                continue;
            }

            let weight = weights.get(current, n).ok_or(GraphError::MissingWeight {
                a: current.min(n),
                b: current.max(n),
            })?;
            if weight < 0.0 {
                return Err(GraphError::NegativeWeight {
                    a: current.min(n),
                    b: current.max(n),
                    weight,
                });
            }

            let total = current_weight + weight;
            if total < info[n].lowest_weight {
                open.remove(n);
                info[n].lowest_weight = total;
                info[n].owner = owner;
                info[n].parent = Some(current);
                open.insert_sorted(n, total, info);
            }
        }
    }

    Ok(())
}

/// Partition a graph into regions grown along `active_edges`
///
/// # Arguments
///
/// * `info` - Working buffer; fully reset, then holds each vertex's owner
/// * `graph` - Graph supplying vertex positions
/// * `active_edges` - Edges floods may traverse, with their costs (e.g. an MST)
/// * `num_splits` - Number of random roots when `tree_roots` is empty
/// * `tree_roots` - Positions snapped to their nearest vertex as region roots
/// * `seed` - Seed for random root selection
///
/// Root `i` floods with label `i + 1`. Vertices no flood reaches keep owner 0.
///
/// # Returns
///
/// The active edges whose endpoints share a (non-zero) owner, as
/// `(lower, higher)` with their active-edge weight.
///
/// # Errors
///
/// - `SizeMismatch` if `info` is shorter than the graph
/// - `NegativeWeight` for active edges with negative cost
///
/// # Example
///
/// ```
/// use rust_delaunay_graph::*;
/// use glam::UVec2;
///
/// let mut graph = generation::generate_grid(UVec2::new(6, 6), 0.0, false);
/// graph.weights = create_edge_list_with_weights(&graph, EdgeWeightMode::Distance);
/// let tree = generate_minimum_spanning_tree(&graph).unwrap();
///
/// let mut info = VertexInfoBuffer::new(graph.vertex_count());
/// let kept = split_graph(&mut info, &graph, &tree, 3, &[], 42).unwrap();
///
/// assert!(info.iter().all(|v| (1..=3).contains(&v.owner)));
/// assert!(kept.len() <= tree.len());
/// ```
pub fn split_graph(
    info: &mut VertexInfoBuffer,
    graph: &Graph,
    active_edges: &[WeightedEdge],
    num_splits: usize,
    tree_roots: &[Vec2],
    seed: u64,
) -> Result<Vec<WeightedEdge>> {
    let count = graph.vertex_count();
    if count == 0 {
        return Ok(Vec::new());
    }
    if info.len() < count {
        return Err(GraphError::SizeMismatch {
            expected: count,
            actual: info.len(),
        });
    }

    let start_time = Instant::now();
    info.reset(true);

    let active_neighbours = neighbours_from_edges(count, active_edges);
    let active_weights: EdgeWeights = active_edges
        .iter()
        .filter(|e| e.a < count && e.b < count)
        .copied()
        .collect();

    let roots = pick_roots(graph, num_splits, tree_roots, seed);
    for (i, &root) in roots.iter().enumerate() {
        split_graph_bfs_flood_fill_ownership(i + 1, root, info, &active_neighbours, &active_weights)?;
    }

    let mut kept = Vec::new();
    for (i, set) in active_neighbours.iter().enumerate() {
        for &n in set.range(i + 1..) {
            let owner = info[i].owner;
            if owner != 0 && owner == info[n].owner {
                if let Some(weight) = active_weights.get_exact(i, n) {
                    kept.push(WeightedEdge::new(weight, i, n));
                }
            }
        }
    }

    tracing::debug!(
        regions = roots.len(),
        active_edges = active_edges.len(),
        kept = kept.len(),
        elapsed = ?start_time.elapsed(),
        "graph split"
    );

    Ok(kept)
}

/// Region roots: nearest vertex to each tree root, or seeded random vertices
fn pick_roots(graph: &Graph, num_splits: usize, tree_roots: &[Vec2], seed: u64) -> Vec<VertexIndex> {
    if tree_roots.is_empty() {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        return (0..num_splits)
            .map(|_| rng.gen_range(0..graph.vertex_count()))
            .collect();
    }

    #[cfg(feature = "spatial-index")]
    {
        let index = crate::spatial::SpatialIndex::new(&graph.points);
        tree_roots.iter().filter_map(|&p| index.find_nearest(p)).collect()
    }

    #[cfg(not(feature = "spatial-index"))]
    {
        tree_roots
            .iter()
            .filter_map(|&p| crate::geometry::find_nearest_vertex_to_point(&graph.points, p))
            .collect()
    }
}

/// Vertices grouped by owner label
///
/// `groups[label]` lists the vertices owned by `label` in index order, for
/// labels `0..=num_labels` (group 0 collects unowned vertices). Labels above
/// `num_labels` are ignored.
pub fn group_vertices_by_owner(info: &VertexInfoBuffer, num_labels: TreeIndex) -> Vec<VertexIndexList> {
    let mut groups = vec![VertexIndexList::new(); num_labels + 1];
    for (i, v) in info.iter().enumerate() {
        if let Some(group) = groups.get_mut(v.owner) {
            group.push(i);
        }
    }
    groups
}

/// Vertices owned by `label` with at least one neighbour owned by someone else
pub fn build_boundary_vertex_list(
    label: TreeIndex,
    neighbours: &NeighbourList,
    info: &VertexInfoBuffer,
) -> VertexIndexList {
    neighbours
        .iter()
        .enumerate()
        .filter(|&(i, _)| info.owner(i) == Some(label))
        .filter(|(_, set)| set.iter().any(|&n| info.owner(n) != Some(label)))
        .map(|(i, _)| i)
        .collect()
}

/// Boundary vertices of an explicit region
///
/// A vertex of `verts_in_region` is on the boundary if it has a neighbour
/// outside the region that is not owned by `label`.
pub fn build_boundary_vertex_list_in_region(
    label: TreeIndex,
    neighbours: &NeighbourList,
    info: &VertexInfoBuffer,
    verts_in_region: &[VertexIndex],
) -> VertexIndexList {
    let region: HashSet<VertexIndex> = verts_in_region.iter().copied().collect();

    verts_in_region
        .iter()
        .copied()
        .filter(|&v| {
            neighbours.get(v).is_some_and(|set| {
                set.iter()
                    .any(|n| !region.contains(n) && info.owner(*n) != Some(label))
            })
        })
        .collect()
}

/// Screen-space angle of `dir` in `[0, 2π)`, with y pointing down
#[inline]
fn screen_angle(dir: Vec2) -> f32 {
    let angle = (-dir.y).atan2(dir.x);
    if angle < 0.0 {
        angle + TAU
    } else {
        angle
    }
}

/// Next neighbour clockwise from the direction towards `previous_pos`
///
/// Used to walk region outlines. Angles are measured in screen space (y
/// down). Only neighbours listed in `valid_verts` are considered; on equal
/// angles the higher index wins.
///
/// # Returns
///
/// `None` if no neighbour is valid.
pub fn find_next_neighbour_clockwise_from_index(
    points: &[Vec2],
    valid_verts: &[VertexIndex],
    neighbours: &NeighbourSet,
    point_pos: Vec2,
    previous_pos: Vec2,
) -> Option<VertexIndex> {
    let start_angle = screen_angle(previous_pos - point_pos);

    let mut best: Option<(VertexIndex, f32)> = None;
    for &n in neighbours {
        if !valid_verts.contains(&n) {
            continue;
        }
        let Some(&pos) = points.get(n) else {
            continue;
        };

        let mut diff = screen_angle(pos - point_pos) - start_angle;
        if diff < 0.0 {
            diff += TAU;
        }
        if best.map_or(true, |(_, d)| diff >= d) {
            best = Some((n, diff));
        }
    }

    best.map(|(n, _)| n)
}

/// Allowed vertex with the smallest y (topmost in screen space)
///
/// Ties keep the earlier entry; out-of-range entries are skipped.
pub fn find_topmost_point_index(points: &[Vec2], allowed_verts: &[VertexIndex]) -> Option<VertexIndex> {
    let mut best: Option<(VertexIndex, f32)> = None;
    for &v in allowed_verts {
        let Some(p) = points.get(v) else {
            continue;
        };
        if best.map_or(true, |(_, y)| p.y < y) {
            best = Some((v, p.y));
        }
    }
    best.map(|(v, _)| v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{create_edge_list_with_weights, generate_grid, EdgeWeightMode};
    use crate::mst::generate_minimum_spanning_tree;
    use glam::UVec2;

    /// Path 0-1-2-3-4 with unit weights
    fn line_graph() -> (NeighbourList, EdgeWeights) {
        let edges: Vec<_> = (0..4).map(|i| WeightedEdge::new(1.0, i, i + 1)).collect();
        let neighbours = neighbours_from_edges(5, &edges);
        let weights = edges.into_iter().collect();
        (neighbours, weights)
    }

    fn weighted_grid(size: u32) -> Graph {
        let mut graph = generate_grid(UVec2::splat(size), 0.0, false);
        graph.weights = create_edge_list_with_weights(&graph, EdgeWeightMode::Distance);
        graph
    }

    #[test]
    fn test_floods_compete_for_vertices() {
        let (neighbours, weights) = line_graph();
        let mut info = VertexInfoBuffer::new(5);

        split_graph_bfs_flood_fill_ownership(1, 0, &mut info, &neighbours, &weights).unwrap();
        assert!(info.iter().all(|v| v.owner == 1));

        split_graph_bfs_flood_fill_ownership(2, 4, &mut info, &neighbours, &weights).unwrap();
        let owners: Vec<_> = info.iter().map(|v| v.owner).collect();
        // The tie at vertex 2 stays with the first flood
        assert_eq!(owners, vec![1, 1, 1, 2, 2]);
        assert_eq!(info[3].lowest_weight, 1.0);
    }

    #[test]
    fn test_flood_errors() {
        let (neighbours, weights) = line_graph();

        let mut short = VertexInfoBuffer::new(2);
        assert!(matches!(
            split_graph_bfs_flood_fill_ownership(1, 0, &mut short, &neighbours, &weights),
            Err(GraphError::SizeMismatch { .. })
        ));

        let mut info = VertexInfoBuffer::new(5);
        assert_eq!(
            split_graph_bfs_flood_fill_ownership(1, 0, &mut info, &neighbours, &EdgeWeights::new()),
            Err(GraphError::MissingWeight { a: 0, b: 1 })
        );

        // Out-of-range start is a no-op
        let mut info = VertexInfoBuffer::new(5);
        split_graph_bfs_flood_fill_ownership(1, 9, &mut info, &neighbours, &weights).unwrap();
        assert!(info.iter().all(|v| v.owner == 0));
    }

    #[test]
    fn test_split_with_tree_roots_at_corners() {
        let graph = weighted_grid(6);
        let active = graph.edges();
        let roots = [graph.points[0], graph.points[1], graph.points[2], graph.points[3]];

        let mut info = VertexInfoBuffer::new(graph.vertex_count());
        let kept = split_graph(&mut info, &graph, &active, 0, &roots, 0).unwrap();

        for corner in 0..4 {
            assert_eq!(info.owner(corner), Some(corner + 1));
        }
        assert!(info.iter().all(|v| (1..=4).contains(&v.owner)));

        // Kept edges stay inside one region and keep their weights
        assert!(!kept.is_empty());
        assert!(kept.len() < active.len());
        for edge in &kept {
            assert_eq!(info[edge.a].owner, info[edge.b].owner);
            assert_eq!(graph.weight(edge.a, edge.b), Some(edge.weight));
        }
    }

    #[test]
    fn test_split_random_roots_covers_graph() {
        let graph = weighted_grid(7);
        let tree = generate_minimum_spanning_tree(&graph).unwrap();

        let mut info = VertexInfoBuffer::new(graph.vertex_count());
        split_graph(&mut info, &graph, &tree, 3, &[], 5).unwrap();

        let groups = group_vertices_by_owner(&info, 3);
        assert!(groups[0].is_empty());
        let total: usize = groups.iter().map(Vec::len).sum();
        assert_eq!(total, graph.vertex_count());

        // Same seed, same partition
        let mut again = VertexInfoBuffer::new(graph.vertex_count());
        split_graph(&mut again, &graph, &tree, 3, &[], 5).unwrap();
        assert_eq!(info, again);
    }

    #[test]
    fn test_split_resets_previous_owners() {
        let graph = weighted_grid(4);
        let active = graph.edges();
        let mut info = VertexInfoBuffer::new(graph.vertex_count());
        for v in 0..graph.vertex_count() {
            info.set_owner(v, 9);
        }

        split_graph(&mut info, &graph, &active, 1, &[], 0).unwrap();
        assert!(info.iter().all(|v| v.owner == 1));
    }

    #[test]
    fn test_split_degenerate_inputs() {
        let mut info = VertexInfoBuffer::new(0);
        assert!(split_graph(&mut info, &Graph::new(), &[], 3, &[], 0).unwrap().is_empty());

        let graph = weighted_grid(3);
        let mut short = VertexInfoBuffer::new(2);
        assert!(split_graph(&mut short, &graph, &graph.edges(), 2, &[], 0).is_err());

        // No splits requested: nothing is owned, nothing kept
        let mut info = VertexInfoBuffer::new(graph.vertex_count());
        let kept = split_graph(&mut info, &graph, &graph.edges(), 0, &[], 0).unwrap();
        assert!(kept.is_empty());
        assert!(info.iter().all(|v| v.owner == 0));
    }

    #[test]
    fn test_boundary_lists() {
        let (neighbours, weights) = line_graph();
        let mut info = VertexInfoBuffer::new(5);
        split_graph_bfs_flood_fill_ownership(1, 0, &mut info, &neighbours, &weights).unwrap();
        split_graph_bfs_flood_fill_ownership(2, 4, &mut info, &neighbours, &weights).unwrap();

        assert_eq!(build_boundary_vertex_list(1, &neighbours, &info), vec![2]);
        assert_eq!(build_boundary_vertex_list(2, &neighbours, &info), vec![3]);

        assert_eq!(build_boundary_vertex_list_in_region(1, &neighbours, &info, &[0, 1, 2]), vec![2]);
        // Neighbours inside the region never count, whatever their owner
        assert!(build_boundary_vertex_list_in_region(1, &neighbours, &info, &[0, 1, 2, 3, 4]).is_empty());
    }

    #[test]
    fn test_group_vertices_by_owner() {
        let mut info = VertexInfoBuffer::new(5);
        info.set_owner(0, 2);
        info.set_owner(1, 1);
        info.set_owner(3, 2);
        info.set_owner(4, 7);

        let groups = group_vertices_by_owner(&info, 2);
        assert_eq!(groups, vec![vec![2], vec![1], vec![0, 3]]);
    }

    #[test]
    fn test_next_neighbour_clockwise() {
        // Screen space: y grows downwards
        let points = vec![
            Vec2::new(0.0, 0.0),  // centre
            Vec2::new(1.0, 0.0),  // east
            Vec2::new(0.0, -1.0), // up
            Vec2::new(-1.0, 0.0), // west
            Vec2::new(0.0, 1.0),  // down
        ];
        let neighbours: NeighbourSet = [1, 2, 3, 4].into_iter().collect();
        let all = [1, 2, 3, 4];

        // Coming from the east, clockwise turns down first
        let next = find_next_neighbour_clockwise_from_index(&points, &all, &neighbours, points[0], points[1]);
        assert_eq!(next, Some(4));

        let next = find_next_neighbour_clockwise_from_index(&points, &[1, 2, 3], &neighbours, points[0], points[1]);
        assert_eq!(next, Some(3));

        let next = find_next_neighbour_clockwise_from_index(&points, &[], &neighbours, points[0], points[1]);
        assert_eq!(next, None);
    }

    #[test]
    fn test_topmost_point() {
        let points = vec![
            Vec2::new(0.0, 5.0),
            Vec2::new(1.0, 2.0),
            Vec2::new(2.0, 2.0),
            Vec2::new(3.0, 1.0),
        ];
        assert_eq!(find_topmost_point_index(&points, &[0, 1, 2]), Some(1));
        assert_eq!(find_topmost_point_index(&points, &[2, 1]), Some(2));
        assert_eq!(find_topmost_point_index(&points, &[0, 3, 42]), Some(3));
        assert_eq!(find_topmost_point_index(&points, &[]), None);
    }
}
