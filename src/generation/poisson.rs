//! Poisson-disk point sampling
//!
//! Implementation of Robert Bridson's "Fast Poisson Disk Sampling in
//! Arbitrary Dimensions" (SIGGRAPH 2007), restricted to the 2D domain
//! `[0, 100) × [0, 100)`.
//!
//! # Algorithm
//!
//! 1. Overlay a background grid with cell size `r / √2`, so a cell can hold at
//!    most one accepted sample.
//! 2. Seed the active list with one random point (or with existing points).
//! 3. Take a point off the active list and try up to `k` candidates in the
//!    annulus `[r, 2r)` around it. A candidate is accepted if it is inside the
//!    domain and no sample in the surrounding grid cells is closer than `r`.
//! 4. Accepted candidates join the active list; stop when it is empty.
//!
//! # References
//!
//! - [Bridson 2007](https://www.cs.ubc.ca/~rbridson/docs/bridson-siggraph07-poissondisk.pdf)

use std::f32::consts::{SQRT_2, TAU};
use std::time::Instant;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::{DEFAULT_SAMPLES_PER_POINT, DOMAIN_SIZE, MIN_SAMPLE_DISTANCE};
use crate::image::IntensitySampler;

/// Options for Poisson-disk sampling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoissonOptions {
    /// Minimum distance between any two samples (`r`)
    pub min_distance: f32,
    /// Candidates tried around each active sample before it is retired (`k`)
    pub max_samples_per_point: usize,
    /// Seed for the candidate generator
    pub seed: u64,
}

impl Default for PoissonOptions {
    fn default() -> Self {
        Self {
            min_distance: 5.0,
            max_samples_per_point: DEFAULT_SAMPLES_PER_POINT,
            seed: 0,
        }
    }
}

/// Background acceleration grid: at most one sample per cell
struct SampleGrid {
    cell_size: f32,
    width: usize,
    height: usize,
    cells: Vec<Option<Vec2>>,
}

impl SampleGrid {
    fn new(cell_size: f32) -> Self {
        let width = (DOMAIN_SIZE / cell_size).ceil() as usize;
        let height = (DOMAIN_SIZE / cell_size).ceil() as usize;
        Self {
            cell_size,
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    /// Cell coordinate of `pos`, or `None` outside the domain
    fn cell_of(&self, pos: Vec2) -> Option<(usize, usize)> {
        if !in_domain(pos) {
            return None;
        }
        let gx = (pos.x / self.cell_size) as usize;
        let gy = (pos.y / self.cell_size) as usize;
        (gx < self.width && gy < self.height).then_some((gx, gy))
    }

    fn insert(&mut self, pos: Vec2) -> bool {
        match self.cell_of(pos) {
            Some((gx, gy)) => {
                self.cells[gy * self.width + gx] = Some(pos);
                true
            }
            None => false,
        }
    }

    /// True if any sample within `span` cells of `cell` is closer than `distance`
    fn has_sample_within(&self, pos: Vec2, (gx, gy): (usize, usize), span: usize, distance: f32) -> bool {
        let x_range = gx.saturating_sub(span)..=(gx + span).min(self.width - 1);
        let y_range = gy.saturating_sub(span)..=(gy + span).min(self.height - 1);
        let distance_sq = distance * distance;

        for y in y_range {
            for x in x_range.clone() {
                if let Some(existing) = self.cells[y * self.width + x] {
                    if existing.distance_squared(pos) < distance_sq {
                        return true;
                    }
                }
            }
        }
        false
    }
}

#[inline]
fn in_domain(pos: Vec2) -> bool {
    pos.x >= 0.0 && pos.x < DOMAIN_SIZE && pos.y >= 0.0 && pos.y < DOMAIN_SIZE
}

/// Cells to scan so every sample closer than `distance` is found
#[inline]
fn cell_span(distance: f32, cell_size: f32) -> usize {
    (distance / cell_size).ceil() as usize
}

fn random_domain_point(rng: &mut ChaCha8Rng) -> Vec2 {
    Vec2::new(rng.gen_range(0.0..DOMAIN_SIZE), rng.gen_range(0.0..DOMAIN_SIZE))
}

fn random_annulus_offset(rng: &mut ChaCha8Rng, inner: f32) -> Vec2 {
    let angle = rng.gen_range(0.0..TAU);
    let dist = rng.gen_range(inner..2.0 * inner);
    Vec2::from_angle(angle) * dist
}

/// Fill `point_list` with Poisson-disk samples
///
/// # Arguments
///
/// * `point_list` - Output list; cleared first unless `start_with_existing` is set
/// * `options` - Spacing, candidates per point and seed
/// * `start_with_existing` - Grow from the points already in the list instead of
///   a single random seed (e.g. to add a denser layer on top of a sparse one)
///
/// A `min_distance` below `0.0001` leaves the list untouched.
///
/// When continuing from existing points, only new samples are guaranteed to
/// be at least `min_distance` from everything; pre-existing points keep
/// whatever spacing they had.
///
/// # Example
///
/// ```rust
/// use rust_delaunay_graph::generation::{generate_sampling, PoissonOptions};
///
/// let mut points = Vec::new();
/// let options = PoissonOptions { min_distance: 10.0, max_samples_per_point: 30, seed: 42 };
/// generate_sampling(&mut points, &options, false);
/// assert!(points.len() > 20);
/// ```
pub fn generate_sampling(point_list: &mut Vec<Vec2>, options: &PoissonOptions, start_with_existing: bool) {
    let r = options.min_distance;
    if !(r >= MIN_SAMPLE_DISTANCE) {
        return;
    }

    let start = Instant::now();
    let mut rng = ChaCha8Rng::seed_from_u64(options.seed);
    let mut grid = SampleGrid::new(r / SQRT_2);
    let span = cell_span(r, grid.cell_size);
    let mut active_list: Vec<Vec2> = Vec::new();
    let initial_len;

    if start_with_existing {
        initial_len = point_list.len();
        for &pos in point_list.iter().rev() {
            if grid.insert(pos) {
                active_list.push(pos);
            }
        }
    } else {
        initial_len = 0;
        let pos = random_domain_point(&mut rng);
        point_list.clear();
        grid.insert(pos);
        active_list.push(pos);
        point_list.push(pos);
    }

    while !active_list.is_empty() {
        let current = active_list.swap_remove(0);

        for _ in 0..options.max_samples_per_point {
            let pos = current + random_annulus_offset(&mut rng, r);
            let Some(cell) = grid.cell_of(pos) else {
                continue;
            };

            if !grid.has_sample_within(pos, cell, span, r) {
                grid.insert(pos);
                active_list.push(pos);
                point_list.push(pos);
            }
        }
    }

    tracing::debug!(
        min_distance = r,
        added = point_list.len() - initial_len,
        total = point_list.len(),
        elapsed = ?start.elapsed(),
        "poisson sampling finished"
    );
}

/// Poisson-disk sampling whose spacing follows an intensity map
///
/// The spacing around each active sample is interpolated between
/// `min_distance` (black) and `max_distance` (white) from `density` sampled at
/// that sample's position. Without a density map the whole domain uses
/// `max_distance`. `point_list` is cleared first.
///
/// A `min_distance` below `0.0001` leaves the list untouched; a
/// `max_distance` below `min_distance` is raised to it.
pub fn generate_sampling_with_varying_point_density(
    point_list: &mut Vec<Vec2>,
    max_samples_per_point: usize,
    density: Option<&dyn IntensitySampler>,
    min_distance: f32,
    max_distance: f32,
    seed: u64,
) {
    if !(min_distance >= MIN_SAMPLE_DISTANCE) {
        return;
    }
    let max_distance = max_distance.max(min_distance);

    let start = Instant::now();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut grid = SampleGrid::new(min_distance / SQRT_2);
    let span = cell_span(max_distance, grid.cell_size);
    let mut active_list: Vec<Vec2> = Vec::new();

    let pos = random_domain_point(&mut rng);
    point_list.clear();
    grid.insert(pos);
    active_list.push(pos);
    point_list.push(pos);

    while !active_list.is_empty() {
        let current = active_list.swap_remove(0);

        let perc = density.map(|d| d.intensity(current).clamp(0.0, 1.0)).unwrap_or(1.0);
        let desired_distance = min_distance + (max_distance - min_distance) * perc;

        for _ in 0..max_samples_per_point {
            let pos = current + random_annulus_offset(&mut rng, desired_distance);
            let Some(cell) = grid.cell_of(pos) else {
                continue;
            };

            if !grid.has_sample_within(pos, cell, span, desired_distance) {
                grid.insert(pos);
                active_list.push(pos);
                point_list.push(pos);
            }
        }
    }

    tracing::debug!(
        min_distance,
        max_distance,
        total = point_list.len(),
        elapsed = ?start.elapsed(),
        "density-varying poisson sampling finished"
    );
}
