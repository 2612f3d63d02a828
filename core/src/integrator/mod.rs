//! Integrator

mod common;

use crate::camera::*;
use crate::geometry::*;
use crate::pbrt::*;
use crate::rng::*;
use crate::scene::Scene;
use crate::sensor::*;
use crate::spectrum::*;
use itertools::iproduct;
use std::time::Instant;

// Re-export.
pub use common::*;

/// Width and height of a render block in pixels.
pub const BLOCK_SIZE: usize = 16;

/// Common data for integrators.
#[derive(Clone, Debug)]
pub struct IntegratorData {
    /// Maximum path depth.
    pub max_depth: usize,

    /// Number of worker threads used by `render()`.
    pub threads: usize,

    /// Index of the last rendered pass since the last reset.
    pass: u32,
}

impl IntegratorData {
    /// Create a new `IntegratorData`.
    ///
    /// * `max_depth` - Maximum path depth.
    /// * `threads`   - Number of worker threads.
    pub fn new(max_depth: usize, threads: usize) -> Self {
        Self {
            max_depth,
            threads: threads.max(1),
            pass: 0,
        }
    }

    /// Returns the index of the last rendered pass.
    pub fn pass(&self) -> u32 {
        self.pass
    }
}

/// A block of the sensor rendered by one worker.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Block {
    /// Block column.
    pub bx: usize,

    /// Block row.
    pub by: usize,

    /// First pixel column.
    pub x0: usize,

    /// One past the last pixel column.
    pub x1: usize,

    /// First pixel row.
    pub y0: usize,

    /// One past the last pixel row.
    pub y1: usize,
}

impl Block {
    /// Returns the blocks covering an image, row by row.
    ///
    /// * `resolution` - Image resolution.
    pub fn tile(resolution: Resolution) -> Vec<Block> {
        let nx = (resolution.width + BLOCK_SIZE - 1) / BLOCK_SIZE;
        let ny = (resolution.height + BLOCK_SIZE - 1) / BLOCK_SIZE;
        iproduct!(0..ny, 0..nx)
            .map(|(by, bx)| {
                let x0 = bx * BLOCK_SIZE;
                let y0 = by * BLOCK_SIZE;
                Block {
                    bx,
                    by,
                    x0,
                    x1: min(x0 + BLOCK_SIZE, resolution.width),
                    y0,
                    y1: min(y0 + BLOCK_SIZE, resolution.height),
                }
            })
            .collect()
    }

    /// Returns the seed of the block's sampler for a pass. Each block and
    /// pass combination gets its own deterministic stream.
    ///
    /// * `pass` - Pass index starting at 1.
    pub fn seed(&self, pass: u32) -> u32 {
        ((self.by + self.bx * 17 + 1) as u32).wrapping_mul(pass)
    }

    /// Returns the number of pixels.
    pub fn area(&self) -> usize {
        (self.x1 - self.x0) * (self.y1 - self.y0)
    }
}

/// Integrator interface.
pub trait Integrator: Send + Sync {
    /// Returns the common data.
    fn get_data(&self) -> &IntegratorData;

    /// Returns the common data for mutation between passes.
    fn get_data_mut(&mut self) -> &mut IntegratorData;

    /// Returns the incident radiance at the origin of a given ray.
    ///
    /// * `ray`     - The ray.
    /// * `scene`   - The scene.
    /// * `sampler` - The sampler.
    fn li(&self, ray: &Ray, scene: &Scene, sampler: &mut Sampler) -> Spectrum;

    /// Render one block with one jittered camera ray per pixel.
    ///
    /// * `block`      - The block.
    /// * `resolution` - Sensor resolution.
    /// * `camera`     - The camera.
    /// * `scene`      - The scene.
    /// * `sampler`    - The block's sampler.
    fn render_block(
        &self,
        block: &Block,
        resolution: Resolution,
        camera: &dyn Camera,
        scene: &Scene,
        sampler: &mut Sampler,
    ) -> SensorBlock {
        let mut sensor_block = SensorBlock::with_capacity(block.area());
        let du = 2.0 / resolution.width as Float;
        let dv = 2.0 / resolution.height as Float;
        for y in block.y0..block.y1 {
            for x in block.x0..block.x1 {
                let u = resolution.u(x) + du * sampler.next_float();
                let v = resolution.v(y) + dv * sampler.next_float();
                let ray = camera.generate_ray(u, v);
                let l = self.li(&ray, scene, sampler);
                debug!("Pixel: ({x}, {y}) -> ray: {ray} -> L = {l}");
                sensor_block.add(x, y, discard_invalid(l, x, y));
            }
        }
        sensor_block
    }

    /// Render one progressive pass into the sensor. Blocks are rendered in
    /// parallel and merged into the sensor by the calling thread. Returns the
    /// elapsed time in milliseconds.
    ///
    /// * `camera`          - The camera.
    /// * `sensor`          - The sensor.
    /// * `scene`           - The scene.
    /// * `reset_requested` - Clears the sensor and restarts the pass sequence
    ///                       before rendering; set it after editing the scene.
    fn render(
        &mut self,
        camera: &(dyn Camera + Sync),
        sensor: &mut Sensor,
        scene: &Scene,
        reset_requested: bool,
    ) -> u128 {
        let start = Instant::now();

        if reset_requested {
            sensor.reset();
            self.get_data_mut().pass = 0;
        }
        let data = self.get_data_mut();
        data.pass = data.pass.wrapping_add(1).max(1);
        let pass = data.pass;
        let threads = data.threads;

        let resolution = sensor.resolution;
        let blocks = Block::tile(resolution);
        info!("Rendering pass {} over {} blocks", pass, blocks.len());

        let this = &*self;
        std::thread::scope(|scope| {
            let (tx, rx) = crossbeam_channel::bounded::<Block>(threads);
            let (done_tx, done_rx) = crossbeam_channel::unbounded::<SensorBlock>();

            // Spawn worker threads.
            for _ in 0..threads {
                let rxc = rx.clone();
                let done_txc = done_tx.clone();
                scope.spawn(move || {
                    for block in rxc.iter() {
                        let mut sampler = Sampler::new(block.seed(pass));
                        let sensor_block = this.render_block(&block, resolution, camera, scene, &mut sampler);
                        if done_txc.send(sensor_block).is_err() {
                            break;
                        }
                    }
                });
            }
            drop(rx); // Drop extra rx since we've cloned one for each worker.
            drop(done_tx);

            // Send work. Workers only stop once `tx` is dropped.
            scope.spawn(move || {
                for block in blocks {
                    if tx.send(block).is_err() {
                        break;
                    }
                }
            });

            // Merge finished blocks as they arrive.
            for sensor_block in done_rx.iter() {
                sensor.merge_block(sensor_block);
            }
        });

        let elapsed = start.elapsed().as_millis();
        info!("Pass {} finished in {} ms", pass, elapsed);
        elapsed
    }
}

/// Replaces non-finite or negative radiance with black so that one bad
/// sample never spoils a pass.
///
/// * `l` - The sample value.
/// * `x` - Column, for diagnostics.
/// * `y` - Row, for diagnostics.
pub fn discard_invalid(l: Spectrum, x: usize, y: usize) -> Spectrum {
    if l.has_nans() {
        error!("Not-a-number radiance value returned for pixel ({x}, {y}). Setting to black.");
        Spectrum::default()
    } else if l.has_infs() {
        error!("Infinite radiance value returned for pixel ({x}, {y}). Setting to black.");
        Spectrum::default()
    } else if l.y() < -1e-5 {
        error!("Negative luminance value, {}, returned for pixel ({x}, {y}). Setting to black.", l.y());
        Spectrum::default()
    } else {
        l
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_cover_image_once() {
        let resolution = Resolution::new(40, 17);
        let blocks = Block::tile(resolution);
        assert_eq!(blocks.len(), 3 * 2);
        assert_eq!(blocks.iter().map(Block::area).sum::<usize>(), 40 * 17);
        let last = blocks.last().unwrap();
        assert_eq!((last.x0, last.x1, last.y0, last.y1), (32, 40, 16, 17));
    }

    #[test]
    fn block_seeds_differ() {
        let blocks = Block::tile(Resolution::new(64, 64));
        let mut seeds: Vec<_> = blocks.iter().map(|b| b.seed(1)).collect();
        seeds.sort_unstable();
        seeds.dedup();
        assert_eq!(seeds.len(), blocks.len());
        assert!(blocks[0].seed(1) != blocks[0].seed(2));
    }

    #[test]
    fn invalid_samples_are_black() {
        assert!(discard_invalid(Spectrum::new(Float::NAN), 0, 0).is_black());
        assert!(discard_invalid(Spectrum::new(INFINITY), 0, 0).is_black());
        assert!(discard_invalid(Spectrum::new(-1.0), 0, 0).is_black());
        assert!(discard_invalid(Spectrum::new(0.5), 0, 0) == Spectrum::new(0.5));
    }
}
