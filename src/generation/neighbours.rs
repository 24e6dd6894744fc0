//! Neighbour lists from Delaunay triangulations
//!
//! The raw triangulation connects every point to its Delaunay neighbours. Two
//! pruning rules make the result usable as a walkable graph:
//!
//! 1. Sliver pruning: an edge is dropped if the triangle's inner angle at
//!    either of its endpoints is smaller than `min_inner_angle`.
//! 2. Hull pruning: edges on the convex hull are only kept when shorter than
//!    `max_distance_apart * 2.5`, so concave point clouds are not bridged
//!    across their gaps.

use glam::Vec2;

use crate::config::HULL_EDGE_FACTOR;
use crate::error::Result;
use crate::generation::delaunay::{triangulate, Triangle};
use crate::types::{NeighbourList, NeighbourSet};

/// Build a symmetric neighbour list for `points`
///
/// # Arguments
///
/// * `points` - Vertex positions
/// * `max_distance_apart` - Expected spacing; hull edges must be shorter than 2.5× this
/// * `min_inner_angle` - Minimum inner angle in radians; `None` disables sliver pruning
///
/// # Returns
///
/// One neighbour set per point, or an empty list for fewer than three points.
///
/// # Example
///
/// ```
/// use rust_delaunay_graph::generation::create_neighbour_list;
/// use glam::Vec2;
///
/// let points = vec![Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0), Vec2::new(0.0, 4.0)];
/// let neighbours = create_neighbour_list(&points, 4.0, None).unwrap();
/// assert_eq!(neighbours[0].len(), 2);
/// ```
pub fn create_neighbour_list(
    points: &[Vec2],
    max_distance_apart: f32,
    min_inner_angle: Option<f32>,
) -> Result<NeighbourList> {
    if points.len() < 3 {
        return Ok(NeighbourList::new());
    }

    let max_hull_edge = max_distance_apart * HULL_EDGE_FACTOR;
    let min_cos_angle = min_inner_angle
        .filter(|&angle| angle <= std::f32::consts::TAU)
        .map(f32::cos);

    let triangulation = triangulate(points)?;
    let mut neighbours = vec![NeighbourSet::new(); points.len()];

    for triangle in &triangulation.triangles {
        for k in 0..3 {
            let (a, b, opposite) = triangle.edge(k);

            if let Some(min_cos) = min_cos_angle {
                if edge_touches_sharp_angle(points, a, b, opposite, min_cos) {
                    continue;
                }
            }

            if is_hull_edge(triangle, k) && points[a].distance(points[b]) >= max_hull_edge {
                continue;
            }

            neighbours[a].insert(b);
            neighbours[b].insert(a);
        }
    }

    Ok(neighbours)
}

#[inline]
fn is_hull_edge(triangle: &Triangle, k: usize) -> bool {
    triangle.hull_edges[k]
}

/// True if the inner angle at `a` or at `b` is sharper than the threshold
///
/// Angles are compared through their cosines: a sharper angle has a larger cosine.
fn edge_touches_sharp_angle(points: &[Vec2], a: usize, b: usize, opposite: usize, min_cos: f32) -> bool {
    let cos_at_a = cos_inner_angle(points[a], points[b], points[opposite]);
    let cos_at_b = cos_inner_angle(points[b], points[a], points[opposite]);
    cos_at_a > min_cos || cos_at_b > min_cos
}

/// Cosine of the angle at `corner` between the rays towards `p` and `q`
fn cos_inner_angle(corner: Vec2, p: Vec2, q: Vec2) -> f32 {
    let to_p = p - corner;
    let to_q = q - corner;
    let denom = to_p.length() * to_q.length();
    if denom <= f32::EPSILON {
        return 1.0;
    }
    to_p.dot(to_q) / denom
}
