//! Planar geometry helpers: angle differences, segment distances and
//! nearest-neighbour scans

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::Vec2;

use crate::types::{VertexIndex, WeightedEdge};

/// Smallest absolute difference between two angles, in `[0, π]`
///
/// Inputs are radians and may differ by at most one full turn.
pub fn difference_between_angles(angle1: f32, angle2: f32) -> f32 {
    let diff = (angle1 - angle2).abs();
    if diff > PI {
        TAU - diff
    } else {
        diff
    }
}

/// Difference between two undirected orientations, in `[0, π/2]`
///
/// An angle and its opposite describe the same orientation, so `0` and `π`
/// compare as equal.
pub fn difference_between_angles_bidirectional(angle1: f32, angle2: f32) -> f32 {
    let diff = difference_between_angles(angle1, angle2);
    if diff > FRAC_PI_2 {
        PI - diff
    } else {
        diff
    }
}

/// Distance from `point` to the segment `start`-`end`
///
/// A zero-length segment is treated as the single point `start`.
pub fn distance_from_line_segment(start: Vec2, end: Vec2, point: Vec2) -> f32 {
    let line = end - start;
    let len = line.length();
    let to_point = point - start;
    if len <= f32::EPSILON {
        return to_point.length();
    }

    let dir = line / len;
    let along = dir.dot(to_point);
    if along < 0.0 {
        to_point.length()
    } else if along > len {
        point.distance(end)
    } else {
        (to_point - dir * along).length()
    }
}

/// Edge in `edges` closest to `point`
///
/// # Returns
///
/// `(position in edges, distance)`, or `None` if no edge has both endpoints
/// inside `points`. Ties keep the earlier edge.
pub fn find_nearest_edge(points: &[Vec2], edges: &[WeightedEdge], point: Vec2) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;
    for (i, edge) in edges.iter().enumerate() {
        let (Some(&a), Some(&b)) = (points.get(edge.a), points.get(edge.b)) else {
            continue;
        };
        let dist = distance_from_line_segment(a, b, point);
        if best.map_or(true, |(_, d)| dist < d) {
            best = Some((i, dist));
        }
    }
    best
}

/// Point in `points` closest to `point`, with its distance
///
/// Ties keep the lower index; `None` for an empty list.
pub fn find_nearest_point(points: &[Vec2], point: Vec2) -> Option<(VertexIndex, f32)> {
    let mut best: Option<(VertexIndex, f32)> = None;
    for (i, p) in points.iter().enumerate() {
        let dist = p.distance(point);
        if best.map_or(true, |(_, d)| dist < d) {
            best = Some((i, dist));
        }
    }
    best
}

/// Index of the point closest to `point`, or `None` for an empty list
#[inline]
pub fn find_nearest_vertex_to_point(points: &[Vec2], point: Vec2) -> Option<VertexIndex> {
    find_nearest_point(points, point).map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_difference_between_angles_wraps() {
        assert!(approx(difference_between_angles(0.1, 0.4), 0.3));
        assert!(approx(difference_between_angles(0.1, TAU - 0.1), 0.2));
        assert!(approx(difference_between_angles(0.0, PI), PI));
    }

    #[test]
    fn test_bidirectional_difference() {
        assert!(approx(difference_between_angles_bidirectional(0.0, PI), 0.0));
        assert!(approx(difference_between_angles_bidirectional(0.0, FRAC_PI_2), FRAC_PI_2));
        assert!(approx(difference_between_angles_bidirectional(0.2, PI + 0.1), 0.1));
    }

    #[test]
    fn test_distance_from_line_segment() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);

        assert!(approx(distance_from_line_segment(a, b, Vec2::new(5.0, 3.0)), 3.0));
        assert!(approx(distance_from_line_segment(a, b, Vec2::new(-3.0, 4.0)), 5.0));
        assert!(approx(distance_from_line_segment(a, b, Vec2::new(13.0, 4.0)), 5.0));
        assert!(approx(distance_from_line_segment(a, a, Vec2::new(3.0, 4.0)), 5.0));
    }

    #[test]
    fn test_find_nearest_edge() {
        let points = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
        ];
        let edges = vec![WeightedEdge::new(1.0, 0, 1), WeightedEdge::new(1.0, 1, 2)];

        let (index, dist) = find_nearest_edge(&points, &edges, Vec2::new(9.0, 6.0)).unwrap();
        assert_eq!(index, 1);
        assert!(approx(dist, 1.0));

        assert_eq!(find_nearest_edge(&points, &[], Vec2::ZERO), None);
        let dangling = vec![WeightedEdge::new(1.0, 0, 7)];
        assert_eq!(find_nearest_edge(&points, &dangling, Vec2::ZERO), None);
    }

    #[test]
    fn test_find_nearest_point() {
        let points = vec![Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(5.0, 5.0)];

        let (index, dist) = find_nearest_point(&points, Vec2::new(6.0, 5.0)).unwrap();
        assert_eq!(index, 2);
        assert!(approx(dist, 1.0));

        assert_eq!(find_nearest_vertex_to_point(&points, Vec2::new(9.0, -1.0)), Some(1));
        assert_eq!(find_nearest_vertex_to_point(&[], Vec2::ZERO), None);
    }
}
