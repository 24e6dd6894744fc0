//! Graph generation configuration and builder
//!
//! This module provides configuration types for deterministic graph generation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use glam::UVec2;

use crate::error::{GraphError, Result};
use crate::generation::EdgeWeightMode;

/// Side length of the square logical domain all points live in
pub const DOMAIN_SIZE: f32 = 100.0;

/// Smallest Poisson spacing that is still sampled; below this sampling is a no-op
pub const MIN_SAMPLE_DISTANCE: f32 = 0.0001;

/// Default number of candidates tried around each active sample
pub const DEFAULT_SAMPLES_PER_POINT: usize = 30;

/// Hull edges longer than `max_distance_apart * HULL_EDGE_FACTOR` are not connected
pub const HULL_EDGE_FACTOR: f32 = 2.5;

/// Where the vertices of a generated graph come from
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointSource {
    /// Poisson-disk sampling, connected by Delaunay triangulation
    Poisson {
        /// Minimum distance between any two samples
        min_distance: f32,
        /// Candidates tried around each sample before it is retired
        max_samples_per_point: usize,
    },
    /// Regular lattice with its own 4- or 8-connectivity
    Grid {
        /// Points along x and y (each clamped to at least 2)
        size: UVec2,
        /// Total margin left free around the lattice
        padding: f32,
        /// Also connect diagonal neighbours
        connect_diagonals: bool,
    },
}

impl PointSource {
    /// Typical spacing between neighbouring points
    pub fn spacing(&self) -> f32 {
        match *self {
            PointSource::Poisson { min_distance, .. } => min_distance,
            PointSource::Grid { size, padding, .. } => {
                let cells = size.max(UVec2::splat(2)) - UVec2::ONE;
                let step_x = (DOMAIN_SIZE - padding) / cells.x as f32;
                let step_y = (DOMAIN_SIZE - padding) / cells.y as f32;
                step_x.max(step_y)
            }
        }
    }

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            PointSource::Poisson { .. } => "Poisson",
            PointSource::Grid { .. } => "Grid",
        }
    }
}

impl Default for PointSource {
    fn default() -> Self {
        PointSource::Poisson {
            min_distance: 5.0,
            max_samples_per_point: DEFAULT_SAMPLES_PER_POINT,
        }
    }
}

/// Configuration for deterministic graph generation
///
/// The same configuration always produces the identical graph.
///
/// # Example
///
/// ```rust
/// use rust_delaunay_graph::*;
///
/// let config = GraphConfigBuilder::new()
///     .seed(42)
///     .poisson(4.0, 30)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// // Config is serializable (with "serde" feature)
/// # #[cfg(feature = "serde")]
/// # {
/// let json = serde_json::to_string(&config).unwrap();
/// let restored: GraphConfig = serde_json::from_str(&json).unwrap();
/// assert_eq!(config, restored);
/// # }
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphConfig {
    /// Random seed for sampling and random edge weights
    pub seed: u64,

    /// Vertex source (Poisson sampling or regular grid)
    pub point_source: PointSource,

    /// Expected neighbour spacing; hull edges longer than 2.5× this are dropped
    pub max_distance_apart: f32,

    /// Drop triangle edges adjacent to inner angles below this (radians)
    ///
    /// `None` keeps every Delaunay edge.
    pub min_inner_angle: Option<f32>,

    /// How edge weights are assigned
    pub weight_mode: EdgeWeightMode,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            point_source: PointSource::default(),
            max_distance_apart: PointSource::default().spacing(),
            min_inner_angle: None,
            weight_mode: EdgeWeightMode::Distance,
        }
    }
}

/// Builder for creating GraphConfig with validation
///
/// # Example
///
/// ```rust
/// use rust_delaunay_graph::*;
///
/// let config = GraphConfigBuilder::new()
///     .seed(12345)
///     .grid(UVec2::new(8, 8), 20.0, false)
///     .unwrap()
///     .weight_mode(EdgeWeightMode::Fixed(1.0))
///     .build()
///     .unwrap();
///
/// assert_eq!(config.seed, 12345);
/// ```
#[derive(Debug, Clone)]
pub struct GraphConfigBuilder {
    seed: Option<u64>,
    point_source: PointSource,
    max_distance_apart: Option<f32>,
    min_inner_angle: Option<f32>,
    weight_mode: EdgeWeightMode,
}

impl GraphConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - seed: random
    /// - point_source: Poisson, 5.0 spacing, 30 candidates per sample
    /// - max_distance_apart: the point source's spacing
    /// - min_inner_angle: none
    /// - weight_mode: Euclidean distance
    pub fn new() -> Self {
        Self {
            seed: None,
            point_source: PointSource::default(),
            max_distance_apart: None,
            min_inner_angle: None,
            weight_mode: EdgeWeightMode::Distance,
        }
    }

    /// Set the random seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sample vertices with Poisson-disk sampling
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `min_distance` is not positive or
    /// `max_samples_per_point` is zero
    pub fn poisson(mut self, min_distance: f32, max_samples_per_point: usize) -> Result<Self> {
        if !(min_distance >= MIN_SAMPLE_DISTANCE) || !min_distance.is_finite() {
            return Err(GraphError::InvalidConfig(format!(
                "Poisson min distance must be >= {} (got {})",
                MIN_SAMPLE_DISTANCE, min_distance
            )));
        }
        if max_samples_per_point == 0 {
            return Err(GraphError::InvalidConfig(
                "max samples per point must be > 0".to_string(),
            ));
        }
        self.point_source = PointSource::Poisson {
            min_distance,
            max_samples_per_point,
        };
        Ok(self)
    }

    /// Use a regular lattice instead of sampling
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `padding` is outside `[0, 100)`
    pub fn grid(mut self, size: UVec2, padding: f32, connect_diagonals: bool) -> Result<Self> {
        if !(0.0..DOMAIN_SIZE).contains(&padding) {
            return Err(GraphError::InvalidConfig(format!(
                "grid padding must be in [0, {}) (got {})",
                DOMAIN_SIZE, padding
            )));
        }
        self.point_source = PointSource::Grid {
            size,
            padding,
            connect_diagonals,
        };
        Ok(self)
    }

    /// Override the expected neighbour spacing used for hull pruning
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `distance <= 0.0`
    pub fn max_distance_apart(mut self, distance: f32) -> Result<Self> {
        if !(distance > 0.0) {
            return Err(GraphError::InvalidConfig(format!(
                "max distance apart must be positive (got {})",
                distance
            )));
        }
        self.max_distance_apart = Some(distance);
        Ok(self)
    }

    /// Prune Delaunay edges next to inner angles smaller than `angle` (radians)
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` unless `0 < angle < π`
    pub fn min_inner_angle(mut self, angle: f32) -> Result<Self> {
        if !(angle > 0.0 && angle < std::f32::consts::PI) {
            return Err(GraphError::InvalidConfig(format!(
                "min inner angle must be in (0, π) (got {})",
                angle
            )));
        }
        self.min_inner_angle = Some(angle);
        Ok(self)
    }

    /// Set how edge weights are assigned
    pub fn weight_mode(mut self, mode: EdgeWeightMode) -> Self {
        self.weight_mode = mode;
        self
    }

    /// Build the configuration
    ///
    /// If no seed was provided, generates a random seed.
    pub fn build(self) -> Result<GraphConfig> {
        let seed = self.seed.unwrap_or_else(rand::random);
        let max_distance_apart = self
            .max_distance_apart
            .unwrap_or_else(|| self.point_source.spacing());

        Ok(GraphConfig {
            seed,
            point_source: self.point_source,
            max_distance_apart,
            min_inner_angle: self.min_inner_angle,
            weight_mode: self.weight_mode,
        })
    }
}

impl Default for GraphConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
