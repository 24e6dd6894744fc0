//! Delaunay triangulation of planar point sets
//!
//! Thin wrapper around spade's incremental Delaunay triangulation that maps
//! triangulation vertices back to indices in the caller's point list and
//! flags which triangle edges lie on the convex hull.

use glam::Vec2;
use spade::handles::FixedVertexHandle;
use spade::{DelaunayTriangulation, Point2, Triangulation as _};

use crate::error::{GraphError, Result};
use crate::types::VertexIndex;

/// One triangle of a triangulation
///
/// Edge `k` runs from `vertices[k]` to `vertices[(k + 1) % 3]`; the vertex
/// opposite it is `vertices[(k + 2) % 3]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle {
    /// Corner indices into the triangulated point list, counter-clockwise
    pub vertices: [VertexIndex; 3],
    /// Whether edge `k` has no neighbouring triangle across it
    pub hull_edges: [bool; 3],
}

impl Triangle {
    /// Endpoints of edge `k` and the vertex opposite it
    #[inline]
    pub fn edge(&self, k: usize) -> (VertexIndex, VertexIndex, VertexIndex) {
        (
            self.vertices[k],
            self.vertices[(k + 1) % 3],
            self.vertices[(k + 2) % 3],
        )
    }

    /// True if any edge of this triangle is on the hull
    #[inline]
    pub fn touches_hull(&self) -> bool {
        self.hull_edges.iter().any(|&h| h)
    }
}

/// Result of Delaunay triangulation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Triangulation {
    /// All inner triangles
    pub triangles: Vec<Triangle>,
    /// Input points that coincided with an earlier point and were merged into it
    pub merged_duplicates: usize,
}

/// Compute the Delaunay triangulation of `points`
///
/// Fewer than three points produce an empty triangulation. Points at the
/// same position are merged: triangles reference the first such index.
///
/// # Errors
///
/// Returns `GenerationFailed` if a point has non-finite coordinates.
pub fn triangulate(points: &[Vec2]) -> Result<Triangulation> {
    if points.len() < 3 {
        return Ok(Triangulation::default());
    }

    let mut triangulation: DelaunayTriangulation<Point2<f64>> = DelaunayTriangulation::new();

    // Handle index in the triangulation -> index in `points`
    let mut point_index_of: Vec<Option<VertexIndex>> = Vec::with_capacity(points.len());
    let mut merged_duplicates = 0;

    for (i, p) in points.iter().enumerate() {
        let handle = triangulation
            .insert(Point2::new(p.x as f64, p.y as f64))
            .map_err(|e| {
                GraphError::GenerationFailed(format!("cannot triangulate point {} {:?}: {:?}", i, p, e))
            })?;

        let slot = handle.index();
        if slot >= point_index_of.len() {
            point_index_of.resize(slot + 1, None);
        }
        match point_index_of[slot] {
            Some(_) => merged_duplicates += 1,
            None => point_index_of[slot] = Some(i),
        }
    }

    if merged_duplicates > 0 {
        tracing::warn!(merged_duplicates, "triangulation merged coincident points");
    }

    let lookup = |handle: FixedVertexHandle| -> Result<VertexIndex> {
        point_index_of
            .get(handle.index())
            .copied()
            .flatten()
            .ok_or_else(|| {
                GraphError::GenerationFailed(format!(
                    "triangulation vertex {} has no source point",
                    handle.index()
                ))
            })
    };

    let mut triangles = Vec::with_capacity(triangulation.num_inner_faces());
    for face in triangulation.inner_faces() {
        let edges = face.adjacent_edges();
        let mut vertices = [0; 3];
        let mut hull_edges = [false; 3];
        for (k, edge) in edges.iter().enumerate() {
            vertices[k] = lookup(edge.from().fix())?;
            hull_edges[k] = edge.rev().face().is_outer();
        }
        triangles.push(Triangle {
            vertices,
            hull_edges,
        });
    }

    Ok(Triangulation {
        triangles,
        merged_duplicates,
    })
}
