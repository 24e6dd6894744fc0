//! Planar graph construction and pathfinding
//!
//! A standalone library for sampling points in a 100×100 domain, connecting
//! them into weighted graphs via Delaunay triangulation, and querying those
//! graphs (shortest paths, spanning trees, region partitions).
//!
//! # Quick Start
//!
//! ```rust
//! use rust_delaunay_graph::*;
//!
//! // Sample and connect a graph
//! let config = GraphConfigBuilder::new()
//!     .seed(42)
//!     .poisson(6.0, 30).unwrap()
//!     .build().unwrap();
//!
//! let graph = Graph::generate(&config).unwrap();
//!
//! // Cheapest path between the first and last vertex (listed end first)
//! let path = find_shortest_path_dijkstra(&graph, 0, graph.vertex_count() - 1).unwrap();
//! println!("path visits {} vertices", path.len());
//!
//! // Split the spanning tree into four regions
//! let tree = generate_minimum_spanning_tree(&graph).unwrap();
//! let mut info = VertexInfoBuffer::new(graph.vertex_count());
//! let kept = split_graph(&mut info, &graph, &tree, 4, &[], 7).unwrap();
//! println!("{} tree edges stay inside a region", kept.len());
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): KD-tree lookups when snapping positions to vertices
//! - `serde`: Enables serialization support for configuration and graphs

// Modules
pub mod error;
pub mod config;
pub mod types;
pub mod vertex_info;
pub mod graph;
pub mod image;
pub mod generation;
pub mod search;
pub mod mst;
pub mod region;
pub mod geometry;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use error::{GraphError, Result};
pub use config::{GraphConfig, GraphConfigBuilder, PointSource};
pub use types::{
    EdgeWeight, EdgeWeights, GraphPath, NeighbourList, NeighbourSet, TreeIndex, VertexIndex,
    VertexIndexList, WeightedEdge,
};
pub use vertex_info::{VertexInfo, VertexInfoBuffer};
pub use graph::{Graph, IndexGraph};
pub use image::{GrayscaleImage, IntensitySampler};
pub use generation::{
    create_edge_list_with_weights, create_edge_list_with_weights_from_source_image,
    create_edge_list_with_weights_using_vector_field, create_neighbour_list, generate_grid,
    generate_sampling, generate_sampling_with_varying_point_density, EdgeWeightMode, PoissonOptions,
};
pub use search::{
    create_group_of_verts_not_blocked_by_vertices, create_list_of_verts_within_radius_of_vertex,
    create_list_of_verts_within_steps_of_vertex, find_shortest_path, find_shortest_path_dijkstra,
    find_shortest_path_dijkstra_to_position, DijkstraSearch, SearchFlags,
};
pub use mst::{generate_minimum_spanning_tree, generate_minimum_spanning_tree_from};
pub use region::{
    build_boundary_vertex_list, build_boundary_vertex_list_in_region,
    find_next_neighbour_clockwise_from_index, find_topmost_point_index, group_vertices_by_owner,
    split_graph, split_graph_bfs_flood_fill_ownership,
};
pub use geometry::{
    difference_between_angles, difference_between_angles_bidirectional, distance_from_line_segment,
    find_nearest_edge, find_nearest_point, find_nearest_vertex_to_point,
};

#[cfg(feature = "spatial-index")]
pub use spatial::SpatialIndex;

// Re-export glam vector types for convenience
pub use glam::{UVec2, Vec2};
