//! Regular lattice graphs

use glam::{UVec2, Vec2};

use crate::config::DOMAIN_SIZE;
use crate::graph::Graph;
use crate::types::VertexIndex;

/// Generate a `size.x × size.y` lattice graph
///
/// Points are spaced `(100 - padding) / (size - 1)` apart, offset by
/// `padding / 2` from the domain edge. Each point is connected to its
/// horizontal and vertical neighbours, plus diagonals if `connect_diagonals`.
/// Sizes below 2 are raised to 2. No weights are assigned.
///
/// After generation the first four indices are the corners:
///
/// | index | corner       |
/// |-------|--------------|
/// | 0     | bottom-left  |
/// | 1     | top-left     |
/// | 2     | top-right    |
/// | 3     | bottom-right |
///
/// # Example
///
/// ```
/// use rust_delaunay_graph::generation::generate_grid;
/// use glam::{UVec2, Vec2};
///
/// let graph = generate_grid(UVec2::new(4, 4), 0.0, false);
/// assert_eq!(graph.vertex_count(), 16);
/// assert_eq!(graph.points[2], Vec2::new(100.0, 100.0));
/// ```
pub fn generate_grid(grid_size: UVec2, padding: f32, connect_diagonals: bool) -> Graph {
    let size = grid_size.max(UVec2::splat(2));
    let (w, h) = (size.x as usize, size.y as usize);

    let span = DOMAIN_SIZE - padding;
    let step = Vec2::new(span / (w - 1) as f32, span / (h - 1) as f32);
    let offset = Vec2::splat(padding / 2.0);

    let mut points = Vec::with_capacity(w * h);
    for y in 0..h {
        for x in 0..w {
            points.push(offset + Vec2::new(x as f32, y as f32) * step);
        }
    }

    let mut graph = Graph::from_points(points);
    let index = |x: usize, y: usize| y * w + x;

    for y in 0..h {
        for x in 0..w {
            let i = index(x, y);
            if x + 1 < w {
                graph.add_edge(i, index(x + 1, y));
            }
            if y + 1 < h {
                graph.add_edge(i, index(x, y + 1));
            }
            if connect_diagonals && x + 1 < w && y + 1 < h {
                graph.add_edge(i, index(x + 1, y + 1));
                graph.add_edge(index(x + 1, y), index(x, y + 1));
            }
        }
    }

    let corners = [index(0, 0), index(0, h - 1), index(w - 1, h - 1), index(w - 1, 0)];
    move_corners_to_front(&mut graph, corners);

    tracing::debug!(width = w, height = h, edges = graph.edge_count(), "grid generated");
    graph
}

/// Swap each corner into slot `0..4`, following corners displaced by earlier swaps
fn move_corners_to_front(graph: &mut Graph, mut corners: [VertexIndex; 4]) {
    for target in 0..corners.len() {
        let current = corners[target];
        if current == target {
            continue;
        }
        graph.swap_index(target, current);
        for location in corners.iter_mut().skip(target + 1) {
            if *location == target {
                *location = current;
            }
        }
        corners[target] = target;
    }
}
