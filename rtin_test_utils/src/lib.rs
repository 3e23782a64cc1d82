//! utils for rtin tests and fuzzing
#![forbid(unsafe_code)]
#![deny(unused)]
#![warn(clippy::all, clippy::missing_const_for_fn)]

use rand::prelude::Distribution;
use rand_distr::Normal;

/// A heightfield of `grid_size²` elevations that all equal `height`.
pub fn flat_terrain(grid_size: usize, height: f64) -> Vec<f64> {
    vec![height; grid_size * grid_size]
}

/// A flat heightfield at zero with a single elevation of `height` at `[x, y]`.
pub fn spike_terrain(grid_size: usize, [x, y]: [usize; 2], height: f64) -> Vec<f64> {
    let mut terrain = vec![0.0; grid_size * grid_size];
    terrain[y * grid_size + x] = height;

    terrain
}

/// A deterministic, bumpy heightfield with integer elevations in `0..17`.
///
/// All interpolated heights are exact halves, so errors computed from it compare exactly.
pub fn ridge_terrain(grid_size: usize) -> Vec<f64> {
    let mut terrain = Vec::with_capacity(grid_size * grid_size);
    for y in 0..grid_size {
        for x in 0..grid_size {
            terrain.push(((x * x * 7 + y * 13 + x * y * 3) % 17) as f64);
        }
    }

    terrain
}

/// Samples a heightfield of `grid_size²` elevations from a [Normal] distribution.
///
/// The default parametrization is `μ = 0.0` and `σ = 0.005`.
///
/// Parameters can be passed as an optional tuple `(μ, σ)`.
pub fn sample_terrain(grid_size: usize, params: Option<(f64, f64)>) -> Vec<f64> {
    let mut rng = rand::rng();
    let (mean, std_dev) = params.unwrap_or((0.0, 0.005));
    let normal = Normal::new(mean, std_dev).expect("Expected a finite, non-negative standard deviation");

    let n = grid_size * grid_size;
    let mut terrain: Vec<f64> = Vec::with_capacity(n);
    for _ in 0..n {
        terrain.push(normal.sample(&mut rng));
    }

    terrain
}
