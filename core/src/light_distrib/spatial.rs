//! Spatial Light Distribution.

use super::LightDistribution;
use crate::geometry::*;
use crate::light::*;
use crate::pbrt::*;
use crate::sampling::*;

/// Default total number of grid cells.
pub const DEFAULT_MAX_CELLS: usize = 4096;

/// Squared distances are clamped to this value so that a cell centre on a
/// light does not produce an infinite weight.
const MIN_DISTANCE_SQUARED: Float = 1e-6;

/// A spatially-varying light distribution that adjusts the probability of
/// sampling a light source based on an estimate of its contribution to a
/// region of space. A fixed grid is imposed over the scene bounds and a
/// sampling distribution is computed at scene-init for every cell, so lookups
/// never allocate or lock.
pub struct SpatialLightDistribution {
    world_bound: Bounds3f,
    n_cells: [usize; 3],
    cells: Vec<Distribution1D>,
}

impl SpatialLightDistribution {
    /// Create a new instance of `SpatialLightDistribution`.
    ///
    /// * `lights`      - The finite lights of the scene.
    /// * `world_bound` - Bounds of the scene geometry.
    /// * `max_cells`   - Total cell budget (defaults to 4096).
    pub fn new(lights: &[ArcLight], world_bound: Bounds3f, max_cells: usize) -> Self {
        let n_cells = grid_resolution(&world_bound, max_cells);
        if lights.is_empty() {
            return Self {
                world_bound,
                n_cells,
                cells: vec![],
            };
        }

        info!(
            "SpatialLightDistribution: scene bounds {}, cell res ({}, {}, {})",
            world_bound, n_cells[0], n_cells[1], n_cells[2]
        );

        let mut cells = Vec::with_capacity(n_cells[0] * n_cells[1] * n_cells[2]);
        for z in 0..n_cells[2] {
            for y in 0..n_cells[1] {
                for x in 0..n_cells[0] {
                    let center = Point3f::new(
                        (x as Float + 0.5) / n_cells[0] as Float,
                        (y as Float + 0.5) / n_cells[1] as Float,
                        (z as Float + 0.5) / n_cells[2] as Float,
                    );
                    let p = if world_bound.is_empty() {
                        Point3f::zero()
                    } else {
                        world_bound.lerp(&center)
                    };
                    cells.push(compute_distribution(lights, &p));
                }
            }
        }

        Self {
            world_bound,
            n_cells,
            cells,
        }
    }

    /// Returns the number of cells along each axis.
    pub fn resolution(&self) -> [usize; 3] {
        self.n_cells
    }

    fn cell_index(&self, p: &Point3f) -> usize {
        if self.world_bound.is_empty() {
            return 0;
        }

        // Points slightly outside the bounds due to round-off clamp to the
        // border cells.
        let offset = self.world_bound.offset(p);
        let mut pi = [0_usize; 3];
        for i in 0..3 {
            let c = (offset[i] * self.n_cells[i] as Float).floor();
            pi[i] = clamp(c, 0.0, (self.n_cells[i] - 1) as Float) as usize;
        }
        (pi[2] * self.n_cells[1] + pi[1]) * self.n_cells[0] + pi[0]
    }
}

impl LightDistribution for SpatialLightDistribution {
    fn lookup(&self, p: &Point3f) -> Option<&Distribution1D> {
        if self.cells.is_empty() {
            None
        } else {
            Some(&self.cells[self.cell_index(p)])
        }
    }
}

/// Compute per axis cell counts proportional to the extent of the bounds so
/// that cells are roughly cube shaped and their total does not exceed the
/// budget. Flat axes get a single cell.
///
/// * `b`         - The bounds.
/// * `max_cells` - Total cell budget.
fn grid_resolution(b: &Bounds3f, max_cells: usize) -> [usize; 3] {
    let max_cells = max(1, max_cells);
    if b.is_empty() || b.maximum_extent() <= 0.0 {
        return [1, 1, 1];
    }

    let diag = b.diagonal();
    let bmax = b.maximum_extent();
    let mut product = 1.0;
    let mut active = 0;
    for i in 0..3 {
        if diag[i] > 0.0 {
            product *= diag[i] / bmax;
            active += 1;
        }
    }

    let k = (max_cells as Float / product).powf(1.0 / active as Float);
    let mut n_cells = [1; 3];
    for i in 0..3 {
        if diag[i] > 0.0 {
            // Tolerate round-off in `powf()` for exact cube roots.
            n_cells[i] = max(1, (diag[i] / bmax * k + 1e-3) as usize);
        }
    }

    while n_cells[0] * n_cells[1] * n_cells[2] > max_cells {
        let widest = (0..3).max_by_key(|&i| n_cells[i]).unwrap_or(0);
        n_cells[widest] -= 1;
    }
    n_cells
}

// Compute the sampling distribution for a cell from the light power over the
// squared distance to its centre.
fn compute_distribution(lights: &[ArcLight], p: &Point3f) -> Distribution1D {
    let mut light_contrib: Vec<Float> = lights
        .iter()
        .map(|light| {
            let d = light.distance(p);
            max(light.power(), 0.0) / max(d * d, MIN_DISTANCE_SQUARED)
        })
        .collect();

    // We don't want to leave any lights with a zero probability; a light may
    // still contribute to points in the cell. Compute a minimum (small)
    // weight and ensure every light gets at least that much.
    let sum_contrib: Float = light_contrib.iter().sum();
    let avg_contrib = sum_contrib / light_contrib.len() as Float;
    let min_contrib = if avg_contrib > 0.0 { 0.001 * avg_contrib } else { 1.0 };
    for (i, contrib) in light_contrib.iter_mut().enumerate() {
        debug!("Cell p = {}, light {} contrib = {}", p, i, contrib);
        *contrib = max(*contrib, min_contrib);
    }

    Distribution1D::new(light_contrib)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
