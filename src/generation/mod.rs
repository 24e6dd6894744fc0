//! Graph generation pipeline
//!
//! Samples points in the 100×100 domain (Poisson-disk or regular grid),
//! connects them through a pruned Delaunay triangulation and assigns edge
//! weights.

mod delaunay;
mod grid;
mod neighbours;
mod poisson;
mod weights;

pub use delaunay::{triangulate, Triangle, Triangulation};
pub use grid::generate_grid;
pub use neighbours::create_neighbour_list;
pub use poisson::{generate_sampling, generate_sampling_with_varying_point_density, PoissonOptions};
pub use weights::{
    create_edge_list_with_weights, create_edge_list_with_weights_from_source_image,
    create_edge_list_with_weights_using_vector_field, EdgeWeightMode,
};

use std::time::Instant;

use crate::config::{GraphConfig, PointSource};
use crate::error::{GraphError, Result};
use crate::graph::Graph;

/// Generate a weighted graph from configuration
///
/// Poisson sources are connected by [`create_neighbour_list`]; grid sources
/// keep their lattice connectivity. The result is validated before returning.
pub(crate) fn generate_graph(config: &GraphConfig) -> Result<Graph> {
    let start = Instant::now();

    // Step 1: Sample points (and lattice edges for grids)
    let mut graph = match config.point_source {
        PointSource::Poisson {
            min_distance,
            max_samples_per_point,
        } => {
            let mut points = Vec::new();
            let options = PoissonOptions {
                min_distance,
                max_samples_per_point,
                seed: config.seed,
            };
            generate_sampling(&mut points, &options, false);
            let mut graph = Graph::from_points(points);

            // Step 2: Connect through the pruned triangulation
            let neighbours = create_neighbour_list(
                &graph.points,
                config.max_distance_apart,
                config.min_inner_angle,
            )?;
            if !neighbours.is_empty() {
                graph.neighbours = neighbours;
            }
            graph
        }
        PointSource::Grid {
            size,
            padding,
            connect_diagonals,
        } => generate_grid(size, padding, connect_diagonals),
    };

    if graph.vertex_count() == 0 {
        return Err(GraphError::GenerationFailed(format!(
            "{} source produced no points",
            config.point_source.name()
        )));
    }

    // Step 3: Assign weights
    graph.weights = create_edge_list_with_weights(&graph, config.weight_mode);

    graph.validate()?;

    tracing::debug!(
        source = config.point_source.name(),
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        elapsed = ?start.elapsed(),
        "graph generated"
    );

    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GraphConfigBuilder;
    use glam::UVec2;

    #[test]
    fn test_generate_poisson_graph() {
        let config = GraphConfigBuilder::new()
            .seed(42)
            .poisson(6.0, 30)
            .unwrap()
            .build()
            .unwrap();

        let graph = generate_graph(&config).unwrap();
        assert!(graph.vertex_count() > 50);
        assert!(graph.edge_count() >= graph.vertex_count());
        assert_eq!(graph.weights.len(), graph.edge_count());

        // Distance weights by default
        for edge in graph.weights.iter() {
            let d = graph.points[edge.a].distance(graph.points[edge.b]);
            assert!((edge.weight - d).abs() < 1e-4);
        }
    }

    #[test]
    fn test_generate_grid_graph() {
        let config = GraphConfigBuilder::new()
            .seed(1)
            .grid(UVec2::new(4, 4), 0.0, false)
            .unwrap()
            .weight_mode(EdgeWeightMode::Fixed(2.0))
            .build()
            .unwrap();

        let graph = generate_graph(&config).unwrap();
        assert_eq!(graph.vertex_count(), 16);
        assert_eq!(graph.edge_count(), 24);
        assert!(graph.weights.iter().all(|e| e.weight == 2.0));
    }

    #[test]
    fn test_generation_deterministic() {
        let config = GraphConfigBuilder::new()
            .seed(99)
            .poisson(8.0, 20)
            .unwrap()
            .weight_mode(EdgeWeightMode::Random { seed: 3 })
            .build()
            .unwrap();

        assert_eq!(generate_graph(&config).unwrap(), generate_graph(&config).unwrap());
    }
}
