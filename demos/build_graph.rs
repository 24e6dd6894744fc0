//! Complete workflow demonstration for rust_delaunay_graph
//!
//! Run with `RUST_LOG=debug` to see per-stage timing.

use rust_delaunay_graph::*;
use tracing_subscriber::fmt::SubscriberBuilder;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    println!("=== rust_delaunay_graph Demo ===\n");

    // Step 1: Configure and generate
    println!("Step 1: Generating graph...");
    let config = GraphConfigBuilder::new()
        .seed(12345)
        .poisson(4.0, 30)?
        .min_inner_angle(0.25)?
        .build()?;

    let graph = Graph::generate(&config)?;
    println!("  Source: {}", config.point_source.name());
    println!("  Vertices: {}", graph.vertex_count());
    println!("  Edges: {}", graph.edge_count());

    // Step 2: Shortest path between opposite corners of the domain
    println!("\nStep 2: Shortest path...");
    let start = find_nearest_vertex_to_point(&graph.points, Vec2::new(0.0, 0.0)).unwrap_or(0);
    let path = find_shortest_path_dijkstra_to_position(&graph, start, Vec2::new(100.0, 100.0))?;
    let length: f32 = path
        .windows(2)
        .filter_map(|pair| graph.weight(pair[0], pair[1]))
        .sum();
    println!("  {} vertices, length {:.2}", path.len(), length);

    // Step 3: Minimum spanning tree
    println!("\nStep 3: Minimum spanning tree...");
    let tree = generate_minimum_spanning_tree(&graph)?;
    let tree_weight: f32 = tree.iter().map(|e| e.weight).sum();
    println!("  {} edges, total weight {:.2}", tree.len(), tree_weight);

    // Step 4: Split the tree into quadrant regions
    println!("\nStep 4: Splitting into regions...");
    let roots = [
        Vec2::new(25.0, 25.0),
        Vec2::new(25.0, 75.0),
        Vec2::new(75.0, 75.0),
        Vec2::new(75.0, 25.0),
    ];
    let mut info = VertexInfoBuffer::new(graph.vertex_count());
    let kept = split_graph(&mut info, &graph, &tree, roots.len(), &roots, config.seed)?;
    println!("  {} tree edges stay inside a region", kept.len());

    let groups = group_vertices_by_owner(&info, roots.len());
    for (label, group) in groups.iter().enumerate().skip(1) {
        let boundary = build_boundary_vertex_list(label, &graph.neighbours, &info);
        println!(
            "  Region {}: {} vertices, {} on the boundary",
            label,
            group.len(),
            boundary.len()
        );
    }
    if !groups[0].is_empty() {
        println!("  Unowned: {} vertices", groups[0].len());
    }

    println!("\n=== Demo Complete ===");
    Ok(())
}
