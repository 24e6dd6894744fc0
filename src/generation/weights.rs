//! Edge weight assignment
//!
//! Each function visits every undirected edge once (from its lower endpoint)
//! and returns a fresh [`EdgeWeights`] table for the graph's adjacency.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::graph::Graph;
use crate::image::IntensitySampler;
use crate::types::{EdgeWeight, EdgeWeights, VertexIndex};

/// Weight of a pure black pixel in image-derived weights
const BLACK_WEIGHT: f32 = 0.1;
/// Weight of a pure white pixel in image-derived weights
const WHITE_WEIGHT: f32 = 1.0;

/// How [`create_edge_list_with_weights`] assigns weights
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum EdgeWeightMode {
    /// Every edge gets the same weight
    Fixed(EdgeWeight),
    /// Uniform random weights in `[0, 1)` from a seeded generator
    Random {
        /// Generator seed
        seed: u64,
    },
    /// Euclidean distance between the endpoints
    #[default]
    Distance,
}

impl EdgeWeightMode {
    /// Resolve the mode from loose parameters
    ///
    /// A non-negative `fixed_weight` wins, then `random_weights`, then distance.
    pub fn from_flags(random_weights: bool, random_seed: u64, fixed_weight: f32) -> Self {
        if fixed_weight >= 0.0 {
            EdgeWeightMode::Fixed(fixed_weight)
        } else if random_weights {
            EdgeWeightMode::Random { seed: random_seed }
        } else {
            EdgeWeightMode::Distance
        }
    }
}

/// Iterate every undirected edge once as `(lower, higher)`
fn unique_edges(graph: &Graph) -> impl Iterator<Item = (VertexIndex, VertexIndex)> + '_ {
    graph
        .neighbours
        .iter()
        .enumerate()
        .flat_map(|(i, set)| set.range(i + 1..).map(move |&n| (i, n)))
}

/// Assign weights to every edge of `graph` according to `mode`
///
/// # Example
///
/// ```
/// use rust_delaunay_graph::*;
/// use glam::Vec2;
///
/// let mut graph = Graph::from_points(vec![Vec2::ZERO, Vec2::new(3.0, 4.0)]);
/// graph.add_edge(0, 1);
///
/// let weights = create_edge_list_with_weights(&graph, EdgeWeightMode::Distance);
/// assert_eq!(weights.get(0, 1), Some(5.0));
/// ```
pub fn create_edge_list_with_weights(graph: &Graph, mode: EdgeWeightMode) -> EdgeWeights {
    let mut rng = match mode {
        EdgeWeightMode::Random { seed } => Some(ChaCha8Rng::seed_from_u64(seed)),
        _ => None,
    };

    let mut weights = EdgeWeights::new();
    for (i, n) in unique_edges(graph) {
        let weight = match (mode, rng.as_mut()) {
            (EdgeWeightMode::Fixed(w), _) => w,
            (EdgeWeightMode::Random { .. }, Some(rng)) => rng.gen::<f32>(),
            _ => graph.points[i].distance(graph.points[n]),
        };
        weights.insert(i, n, weight);
    }
    weights
}

/// Weights from an intensity source: dark regions are cheap, bright regions expensive
///
/// Each endpoint's intensity is remapped to `[0.1, 1.0]`; the edge gets the mean.
pub fn create_edge_list_with_weights_from_source_image(
    graph: &Graph,
    image: &dyn IntensitySampler,
) -> EdgeWeights {
    let remap = |p: Vec2| image.intensity(p) * (WHITE_WEIGHT - BLACK_WEIGHT) + BLACK_WEIGHT;

    let mut weights = EdgeWeights::new();
    for (i, n) in unique_edges(graph) {
        let weight = (remap(graph.points[i]) + remap(graph.points[n])) / 2.0;
        weights.insert(i, n, weight);
    }
    weights
}

/// Weights from a per-vertex orientation field
///
/// `rotations[i]` is an angle in radians. Edges parallel to the lower
/// endpoint's orientation cost 0, perpendicular edges cost 1. The field is
/// bidirectional: an angle and its opposite give the same weights.
///
/// Returns an empty table if there are fewer rotations than points.
pub fn create_edge_list_with_weights_using_vector_field(
    graph: &Graph,
    rotations: &[f32],
) -> EdgeWeights {
    let mut weights = EdgeWeights::new();
    if rotations.len() < graph.points.len() {
        return weights;
    }

    for (i, n) in unique_edges(graph) {
        let field_dir = Vec2::from_angle(rotations[i]);
        let edge_dir = (graph.points[n] - graph.points[i]).normalize_or_zero();
        let weight = 1.0 - field_dir.dot(edge_dir).abs();
        weights.insert(i, n, weight);
    }
    weights
}
