//! Spatial indexing for fast position-to-vertex lookups
//!
//! This module is only available with the `spatial-index` feature.

#[cfg(feature = "spatial-index")]
use glam::Vec2;
#[cfg(feature = "spatial-index")]
use kiddo::immutable::float::kdtree::ImmutableKdTree;
#[cfg(feature = "spatial-index")]
use kiddo::SquaredEuclidean;

#[cfg(feature = "spatial-index")]
use crate::types::VertexIndex;

/// Wrapper around KD-tree for nearest-vertex queries
///
/// Replaces the linear scan of [`find_nearest_vertex_to_point`](crate::find_nearest_vertex_to_point)
/// when many positions are resolved against the same point set, e.g. snapping
/// region roots onto a graph.
///
/// # Performance
///
/// - Construction: O(n log n)
/// - Query: O(log n)
#[cfg(feature = "spatial-index")]
#[derive(Clone)]
pub struct SpatialIndex {
    tree: Option<ImmutableKdTree<f32, usize, 2, 32>>,
    len: usize,
}

#[cfg(feature = "spatial-index")]
impl SpatialIndex {
    /// Build spatial index from vertex positions
    ///
    /// # Arguments
    ///
    /// * `points` - Vertex positions; item `i` is reported as vertex `i`
    ///
    /// # Example
    ///
    /// ```
    /// use rust_delaunay_graph::*;
    /// use glam::Vec2;
    ///
    /// # #[cfg(feature = "spatial-index")]
    /// # {
    /// let points = vec![
    ///     Vec2::new(10.0, 10.0),
    ///     Vec2::new(90.0, 10.0),
    ///     Vec2::new(50.0, 90.0),
    /// ];
    ///
    /// let index = SpatialIndex::new(&points);
    /// assert_eq!(index.find_nearest(Vec2::new(85.0, 20.0)), Some(1));
    /// # }
    /// ```
    pub fn new(points: &[Vec2]) -> Self {
        if points.is_empty() {
            return Self { tree: None, len: 0 };
        }

        let coords: Vec<[f32; 2]> = points.iter().map(|p| [p.x, p.y]).collect();

        Self {
            tree: Some(ImmutableKdTree::new_from_slice(&coords)),
            len: points.len(),
        }
    }

    /// Index of the vertex nearest to `position`, or `None` if the index is empty
    pub fn find_nearest(&self, position: Vec2) -> Option<VertexIndex> {
        let tree = self.tree.as_ref()?;
        let result = tree.nearest_one::<SquaredEuclidean>(&[position.x, position.y]);
        Some(result.item as VertexIndex)
    }

    /// Number of indexed points
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if no points are indexed
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
